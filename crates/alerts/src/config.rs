//! Bot configuration.

/// Configuration for the Telegram bot surface.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Channel that receives a copy of every analysis with at least one
    /// usable quote, e.g. `@upsurechanel`. `None` disables re-posting.
    pub channel: Option<String>,
    /// Bot handle shown in the message footer, without the `@`.
    pub signature: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            channel: None,
            signature: "braitsure_bot".to_string(),
        }
    }
}

impl BotConfig {
    /// Set the broadcast channel, accepting the handle with or without `@`.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        let channel = channel.into();
        self.channel = Some(if channel.starts_with('@') {
            channel
        } else {
            format!("@{channel}")
        });
        self
    }
}
