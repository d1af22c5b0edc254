use async_trait::async_trait;
use chat_widget::{ChatError, ChatTransport};
use gloo_net::http::Request;
use shared_types::{ApiError, ChatRequest, ChatResponse};

/// `fetch`-backed transport for `POST /api/chat`
#[derive(Debug, Clone)]
pub struct GlooTransport {
    endpoint: String,
}

impl GlooTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl ChatTransport for GlooTransport {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        let response = Request::post(&self.endpoint)
            .json(request)
            .map_err(|e| ChatError::Encode(format!("{e}")))?
            .send()
            .await
            .map_err(|e| ChatError::Transport(format!("{e}")))?;

        dioxus_logger::tracing::debug!("Server response status: {}", response.status());

        if !response.ok() {
            let status = response.status();
            // Backend error bodies only go to the log
            if let Ok(body) = response.json::<ApiError>().await {
                dioxus_logger::tracing::warn!("Chat endpoint returned {}: {}", status, body.error);
            }
            return Err(ChatError::Http { status });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ChatError::Decode(format!("{e}")))
    }
}
