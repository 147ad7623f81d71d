// Core client implementation

use crate::builder::MessageBuilder;
use crate::types::*;
use lazy_static::lazy_static;
use reqwest::{header, Client as HttpClient};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Type aliases to simplify complex types
/// Handler for a single request operation
type RequestOp<T> = dyn Future<Output = AnalysisResult<T>> + Send;

/// Result of a request operation
pub type RequestHandlerFuture = Pin<Box<RequestOp<MessageResponse>>>;

/// Function that processes a request and returns a future
type RequestHandlerFn = dyn Fn(MessageRequest) -> RequestHandlerFuture + Send + Sync + 'static;

/// Trait for mocking the chat API for testing purposes
pub trait MockApiHandler: Send + Sync {
    /// Process a request and return a response
    fn process_request(&self, request: MessageRequest) -> RequestHandlerFuture;
}

lazy_static! {
    static ref CLIENT_CONFIG: Mutex<TlsConfig> = Mutex::new(TlsConfig::default());
}

/// Configuration for TLS
#[derive(Clone, Debug)]
pub struct TlsConfig {
    pub min_tls_version: Option<reqwest::tls::Version>,
    pub cert_verification: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            min_tls_version: Some(reqwest::tls::Version::TLS_1_2),
            cert_verification: true,
        }
    }
}

/// Set global TLS configuration for all chat clients
pub fn set_tls_config(config: TlsConfig) {
    if let Ok(mut cfg) = CLIENT_CONFIG.lock() {
        *cfg = config;
    }
}

/// Client for an Anthropic-style chat-completion endpoint.
///
/// One instance serves the whole analysis batch; requests are built through
/// [`MessageBuilder`] and sent one at a time.
#[derive(Clone)]
pub struct ChatClient {
    pub(crate) http_client: HttpClient,
    pub(crate) api_key: SecureApiKey,
    pub base_url: String,
    pub default_model: ChatModel,
    pub default_max_tokens: Option<u32>,
    pub(crate) request_handler: Arc<Mutex<Option<Arc<RequestHandlerFn>>>>,
}

impl ChatClient {
    /// Create a new chat client with the specified API key
    pub fn new(api_key: impl Into<String>) -> Self {
        let tls_config = match CLIENT_CONFIG.lock() {
            Ok(guard) => {
                let config = guard.clone();
                drop(guard);
                config
            }
            Err(_) => TlsConfig::default(),
        };

        Self::with_tls_config(api_key, tls_config)
    }

    /// Set custom request handler for this client
    /// This is useful for testing
    pub fn set_request_handler<F>(&self, handler: Box<F>)
    where
        F: Fn(MessageRequest) -> RequestHandlerFuture + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.request_handler.lock() {
            *guard = Some(Arc::new(move |req| handler(req)));
        }
    }

    /// Create a new chat client with a specific TLS configuration
    fn with_tls_config(api_key: impl Into<String>, tls_config: TlsConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .danger_accept_invalid_certs(!tls_config.cert_verification);

        if let Some(version) = tls_config.min_tls_version {
            builder = builder.min_tls_version(version);
        }

        let http_client = builder.build().expect("Failed to create HTTP client");

        Self {
            http_client,
            api_key: SecureApiKey::new(api_key),
            base_url: "https://api.anthropic.com/v1".to_string(),
            default_model: ChatModel::Haiku,
            default_max_tokens: None,
            request_handler: Arc::new(Mutex::new(None)),
        }
    }

    /// Set a default model to use for requests
    pub fn with_model(mut self, model: ChatModel) -> Self {
        self.default_model = model;
        self
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a default max_tokens value for all requests
    pub fn with_default_max_tokens(mut self, max_tokens: u32) -> AnalysisResult<Self> {
        if max_tokens == 0 {
            return Err(AnalysisError::ValidationError(
                "max_tokens must be greater than 0".into(),
            ));
        }
        self.default_max_tokens = Some(max_tokens);
        Ok(self)
    }

    /// Create a message builder for constructing a request
    pub fn message(&self) -> MessageBuilder {
        MessageBuilder::from_client(Arc::new(self.clone()))
    }

    /// Create a new chat client backed by a mock API for testing
    pub fn with_mock_api<T>(api_key: impl Into<String>, mock_api: T) -> Self
    where
        T: Into<Arc<dyn MockApiHandler>> + Send + Sync + 'static,
    {
        let client = Self::new(api_key);

        let mock_handler = mock_api.into();
        client.set_request_handler(Box::new(move |request: MessageRequest| {
            let mock = mock_handler.clone();
            mock.process_request(request)
        }));

        client
    }
}
