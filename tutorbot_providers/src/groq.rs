use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::RETRY_AFTER};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};
use tutorbot_core::{CompletionRequest, LLMProvider, LLMResponse, ProviderError, Usage};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq chat-completion client (OpenAI-compatible wire format).
#[derive(Clone)]
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating GroqProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: GROQ_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn build_body(request: &CompletionRequest) -> serde_json::Value {
        let params = &request.params;
        json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
            "top_p": params.top_p,
            "frequency_penalty": params.frequency_penalty,
            "presence_penalty": params.presence_penalty,
            "stop": params.stop,
        })
    }

    fn classify_transport(err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_connect() {
            ProviderError::Connection(err.to_string())
        } else {
            ProviderError::InvalidResponse(err.to_string())
        }
    }

    fn parse_response(response: &serde_json::Value) -> Result<LLMResponse, ProviderError> {
        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ProviderError::InvalidResponse("missing content".to_string()))?
            .to_string();

        let usage = response["usage"].as_object().map(|u| Usage {
            prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
            completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
                .unwrap_or(0),
            total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        });

        Ok(LLMResponse { content, usage })
    }
}

#[async_trait]
impl LLMProvider for GroqProvider {
    async fn chat(&self, request: &CompletionRequest) -> anyhow::Result<LLMResponse> {
        info!(
            "Sending request to Groq API: model={}, messages={}",
            request.model,
            request.messages.len()
        );

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&Self::build_body(request));
        if let Some(timeout) = request.params.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::classify_transport(&e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(ProviderError::RateLimited { retry_after }.into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| Self::classify_transport(&e))?;
        debug!("Groq response: {body}");

        let parsed = Self::parse_response(&body)?;
        info!("Received response from Groq API");
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_reads_usage() {
        let body = json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
        });
        let parsed = GroqProvider::parse_response(&body).unwrap();
        assert_eq!(parsed.content, "hello");
        assert_eq!(
            parsed.usage,
            Some(Usage {
                prompt_tokens: 5,
                completion_tokens: 2,
                total_tokens: 7,
            })
        );
    }

    #[test]
    fn parse_response_without_content_is_invalid() {
        let body = json!({"choices": []});
        let err = GroqProvider::parse_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
