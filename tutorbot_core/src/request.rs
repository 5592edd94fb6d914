//! Completion request types shared by providers and the bot adapter.

use std::time::Duration;

use crate::ChatMessage;

/// Output cap sent with every request.
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

/// Stop sequence sent with every request.
pub const DEFAULT_STOP_SEQUENCE: &str = "\n\n\n";

/// Sentinel some models emit at the end of generation; stripped from replies.
pub const END_OF_TEXT: &str = "<|endoftext|>";

/// Fixed sampling parameters attached to each completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Vec<String>,
    /// Client-side request timeout. `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: vec![DEFAULT_STOP_SEQUENCE.to_string()],
            timeout: None,
        }
    }
}

/// Everything a provider needs to produce one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub params: GenerationParams,
}

impl CompletionRequest {
    #[must_use]
    pub const fn new(model: String, messages: Vec<ChatMessage>, params: GenerationParams) -> Self {
        Self {
            model,
            messages,
            params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let params = GenerationParams::default();
        assert!((params.temperature - 0.9).abs() < f32::EPSILON);
        assert_eq!(params.max_tokens, 1200);
        assert_eq!(params.stop, vec!["\n\n\n".to_string()]);
        assert!(params.timeout.is_none());
    }
}
