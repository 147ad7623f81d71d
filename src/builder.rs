// Message builder

use crate::client::ChatClient;
use crate::types::*;
use crate::utils::{validate_range, StringValidator};

use std::sync::Arc;
use std::time::Duration;

/// A struct for building chat requests with a fluent interface.
pub struct MessageBuilder {
    client: Arc<ChatClient>,
    model: ChatModel,
    system: Option<String>,
    messages: Vec<Message>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl MessageBuilder {
    /// Create a message builder from a client reference
    pub(crate) fn from_client(client: Arc<ChatClient>) -> Self {
        Self {
            model: client.default_model.clone(),
            system: None,
            messages: Vec::new(),
            temperature: None,
            max_tokens: client.default_max_tokens,
            client,
        }
    }

    /// Set the system prompt for the message
    ///
    /// The system prompt provides high-level instructions for the assistant.
    pub fn system(mut self, system: impl Into<String>) -> AnalysisResult<Self> {
        self.system = Some(StringValidator::not_empty(system, "system")?);
        Ok(self)
    }

    /// Set the model to use for the message
    ///
    /// Overrides the default model from the client.
    pub fn model(mut self, model: ChatModel) -> Self {
        self.model = model;
        self
    }

    /// Add a user message with text content
    pub fn user_message(mut self, text: impl Into<String>) -> AnalysisResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AnalysisError::ValidationError(
                "User message cannot be empty".into(),
            ));
        }
        self.messages.push(Message {
            role: Role::User,
            content: vec![Content::Text { text }],
        });
        Ok(self)
    }

    /// Add an assistant message with text content
    pub fn assistant_message(mut self, text: impl Into<String>) -> Self {
        self.messages.push(Message {
            role: Role::Assistant,
            content: vec![Content::Text { text: text.into() }],
        });
        self
    }

    /// Set the temperature parameter (between 0.0 and 1.0)
    ///
    /// Controls randomness in the response. Lower values are more deterministic,
    /// higher values more creative.
    pub fn temperature(mut self, temperature: f32) -> AnalysisResult<Self> {
        self.temperature = Some(validate_range(temperature, 0.0, 1.0, "temperature")?);
        Ok(self)
    }

    /// Set the maximum number of tokens to generate
    pub fn max_tokens(mut self, max_tokens: u32) -> AnalysisResult<Self> {
        if max_tokens == 0 {
            return Err(AnalysisError::ValidationError(
                "max_tokens must be greater than 0".into(),
            ));
        }
        self.max_tokens = Some(max_tokens);
        Ok(self)
    }

    /// Send the message and get a response
    pub async fn send(self) -> AnalysisResult<MessageResponse> {
        if self.messages.is_empty() {
            return Err(AnalysisError::ValidationError(
                "At least one message is required".to_string(),
            ));
        }

        let endpoint = format!("{}/messages", self.client.base_url);
        let request = MessageRequest {
            model: self.model.as_str().to_string(),
            messages: self.messages.clone(),
            system: self.system.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        self.execute_request(&endpoint, request).await
    }

    /// Execute a request, using the mock handler when one is installed
    async fn execute_request(
        &self,
        endpoint: &str,
        request: MessageRequest,
    ) -> AnalysisResult<MessageResponse> {
        let handler_opt = {
            if let Ok(guard) = self.client.request_handler.lock() {
                (*guard).as_ref().cloned()
            } else {
                None
            }
        };

        if let Some(handler) = handler_opt {
            return handler(request).await;
        }

        let response = self
            .client
            .http_client
            .post(endpoint)
            .header("x-api-key", self.client.api_key.as_str())
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await?;

        let response = self.handle_error_response(response).await?;

        response.json::<MessageResponse>().await.map_err(|e| {
            AnalysisError::parse_error(
                e.to_string(),
                None,
                Some(e),
                Some(concat!(file!(), ":", line!())),
            )
        })
    }

    /// Handle error responses from the chat API
    async fn handle_error_response(
        &self,
        response: reqwest::Response,
    ) -> AnalysisResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == 429 {
            let retry_after = headers
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);

            return Err(AnalysisError::rate_limited(retry_after));
        }

        // Sanitize error message before returning
        let sanitized_error = sanitize_error_message(&error_text);

        Err(AnalysisError::api_error(
            sanitized_error,
            Some(status),
            None,
            Some(concat!(file!(), ":", line!())),
        ))
    }
}
