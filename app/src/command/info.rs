use tutorbot_config::Config;

/// Strategy for displaying configuration information.
///
/// Prints the API key (masked), generation parameters, retry policy and
/// Telegram settings.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== tutorbot Configuration ===\n");

        println!("Provider:");
        println!("  Groq API Key: {}", mask_secret(&config.providers.groq.api_key));
        if let Some(ref base_url) = config.providers.groq.base_url {
            println!("  Base URL: {base_url}");
        }
        println!();

        let params = config.generation_params();
        println!("Bot:");
        println!("  Model: {}", config.bot.model);
        println!("  Temperature: {}", params.temperature);
        println!("  Max Tokens: {}", params.max_tokens);
        println!("  Top P: {}", params.top_p);
        println!("  Frequency Penalty: {}", params.frequency_penalty);
        println!("  Presence Penalty: {}", params.presence_penalty);
        match params.timeout {
            Some(timeout) => println!("  Request Timeout: {}s", timeout.as_secs()),
            None => println!("  Request Timeout: (client default)"),
        }
        println!("  Retry Policy: {:?}", config.bot.retry_policy);
        if let Some(ref prompt) = config.bot.system_prompt {
            println!("  System Prompt: {}", truncate(prompt, 60));
        }
        println!();

        println!("Telegram:");
        println!("  Enabled: {}", config.telegram.enabled);
        let token = if config.telegram.token.is_empty() {
            "(not set)".to_string()
        } else {
            mask_secret(&config.telegram.token)
        };
        println!("  Token: {token}");
        if config.telegram.allow_from.is_empty() {
            println!("  Allow From: (empty - all users allowed)");
        } else {
            println!("  Allow From: {}", config.telegram.allow_from.join(", "));
        }

        Ok(())
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_long_secrets() {
        assert_eq!(mask_secret("gsk_abcdefghijkl"), "gsk_...ijkl");
        assert_eq!(mask_secret("short"), "***");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("你好世界你好世界", 5), "你好...");
    }
}
