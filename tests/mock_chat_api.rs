use review_insights::client::{MockApiHandler, RequestHandlerFuture};
use review_insights::types::*;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Canned outcome for a mocked request
#[derive(Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    Success(MessageResponse),
    Error(AnalysisError),
}

impl From<MessageResponse> for MockResponse {
    fn from(resp: MessageResponse) -> Self {
        MockResponse::Success(resp)
    }
}

impl From<AnalysisError> for MockResponse {
    fn from(error: AnalysisError) -> Self {
        MockResponse::Error(error)
    }
}

impl MockResponse {
    pub fn into_result(self) -> AnalysisResult<MessageResponse> {
        match self {
            MockResponse::Success(resp) => Ok(resp),
            MockResponse::Error(err) => Err(err),
        }
    }
}

/// Mock chat API for testing purposes
///
/// Responses are served from a FIFO queue first (one per request, for batch
/// tests), then from the per-model map, then a 404-style error.
#[derive(Clone, Default)]
pub struct MockChatApi {
    inner: Arc<Mutex<MockChatApiInner>>,
}

#[derive(Default)]
struct MockChatApiInner {
    queue: VecDeque<MockResponse>,
    responses: HashMap<String, MockResponse>,
    request_history: Vec<MessageRequest>,
}

#[allow(dead_code)]
impl MockChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response consumed by the next request, FIFO.
    pub fn enqueue<T: Into<MockResponse>>(&self, response: T) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner.queue.push_back(response.into());
        self
    }

    /// Register a fallback response for a specific model.
    pub fn add_mock<T: Into<MockResponse>>(&self, model: ChatModel, response: T) -> &Self {
        let mut inner = self.inner.lock().unwrap();
        inner
            .responses
            .insert(model.as_str().to_string(), response.into());
        self
    }

    /// Get the captured request history
    pub fn get_request_history(&self) -> Vec<MessageRequest> {
        let inner = self.inner.lock().unwrap();
        inner.request_history.clone()
    }

    fn respond(&self, request: MessageRequest) -> AnalysisResult<MessageResponse> {
        let mut inner = self.inner.lock().unwrap();
        inner.request_history.push(request.clone());

        if let Some(response) = inner.queue.pop_front() {
            return response.into_result();
        }
        match inner.responses.get(&request.model) {
            Some(response) => response.clone().into_result(),
            None => Err(AnalysisError::api_error(
                format!("No mock response configured for model: {}", request.model),
                Some(404),
                None,
                Some(concat!(file!(), ":", line!())),
            )),
        }
    }
}

impl MockApiHandler for MockChatApi {
    fn process_request(&self, request: MessageRequest) -> RequestHandlerFuture {
        let this = self.clone();
        Box::pin(async move { this.respond(request) })
    }
}

/// Convert Arc<MockChatApi> to Arc<dyn MockApiHandler>
#[allow(dead_code)]
pub fn mock_api_to_handler(mock: Arc<MockChatApi>) -> Arc<dyn MockApiHandler> {
    mock
}

// Helper function to create a sample message response with text
#[allow(dead_code)]
pub fn create_text_response(text: &str) -> MessageResponse {
    MessageResponse {
        id: "msg_mock123".to_string(),
        model: "claude-3-haiku-20240307".to_string(),
        r#type: "message".to_string(),
        role: Role::Assistant,
        content: vec![Content::Text {
            text: text.to_string(),
        }],
        usage: Usage {
            input_tokens: 10,
            output_tokens: text.split_whitespace().count() as u32,
        },
        stop_reason: Some("end_turn".to_string()),
        stop_sequence: None,
    }
}

// Helper function to create a sample message response with JSON in a code block
#[allow(dead_code)]
pub fn create_json_response(json: &str) -> MessageResponse {
    create_text_response(&format!("```json\n{}\n```", json))
}
