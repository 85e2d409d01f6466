//! Telegram bot handlers.

use crate::config::BotConfig;
use crate::format::{format_brl, format_results};
use braitsure_engine::SimulationService;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),
}

/// Bot commands.
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Comandos disponíveis:")]
pub enum Command {
    #[command(description = "registra o chat e mostra a ajuda")]
    Start,
    #[command(description = "simula a operação para um valor em BRL. Uso: /cotap 5000")]
    Cotap(String),
    #[command(description = "define o preço de venda na Picnic. Uso: /setpicnic 5.28")]
    Setpicnic(String),
    #[command(description = "mostra esta mensagem de ajuda")]
    Help,
}

/// Parse an operator-typed positive amount, accepting a decimal comma.
fn parse_positive(value: &str) -> Option<f64> {
    let parsed: f64 = value.trim().replace(',', ".").parse().ok()?;
    (parsed.is_finite() && parsed > 0.0).then_some(parsed)
}

/// Telegram bot wrapper.
pub struct BraitsureBot {
    bot: Bot,
    service: Arc<SimulationService>,
    config: BotConfig,
}

impl BraitsureBot {
    /// Create a new bot with the given token.
    pub fn new(token: &str, service: Arc<SimulationService>, config: BotConfig) -> Self {
        Self {
            bot: Bot::new(token),
            service,
            config,
        }
    }

    /// Run the bot command handler.
    pub async fn run(self: Arc<Self>) {
        let bot = self.bot.clone();
        let handler = Update::filter_message().filter_command::<Command>().endpoint(
            move |bot: Bot, msg: Message, cmd: Command| {
                let this = Arc::clone(&self);
                async move { this.handle_command(bot, msg, cmd).await }
            },
        );

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }

    async fn handle_command(
        &self,
        bot: Bot,
        msg: Message,
        cmd: Command,
    ) -> Result<(), TelegramError> {
        match cmd {
            Command::Start | Command::Help => {
                bot.send_message(msg.chat.id, self.help_text())
                    .parse_mode(ParseMode::Markdown)
                    .await?;
            }
            Command::Cotap(value) => self.handle_cotap(&bot, &msg, &value).await?,
            Command::Setpicnic(value) => self.handle_setpicnic(&bot, &msg, &value).await?,
        }
        Ok(())
    }

    fn help_text(&self) -> String {
        let channel = self
            .config
            .channel
            .as_deref()
            .unwrap_or("(nenhum canal configurado)");
        format!(
            "*Bem-vindo ao Bot de Simulação de Arbitragem USDT/BRL!*\n\n\
             Você pode usar os comandos em um chat privado ou em um grupo. \
             Análises com cotações válidas também são postadas em {channel}.\n\n\
             {}",
            Command::descriptions()
        )
    }

    async fn handle_cotap(&self, bot: &Bot, msg: &Message, value: &str) -> Result<(), TelegramError> {
        let Some(amount) = parse_positive(value) else {
            bot.send_message(msg.chat.id, "Valor inválido. Use, por exemplo: `/cotap 5000`")
                .parse_mode(ParseMode::Markdown)
                .await?;
            return Ok(());
        };

        bot.send_message(
            msg.chat.id,
            format!(
                "🔍 Analisando cotações para *{}*... Por favor, aguarde.",
                format_brl(amount)
            ),
        )
        .parse_mode(ParseMode::Markdown)
        .await?;

        let results = match self.service.simulate(amount).await {
            Ok(results) => results,
            Err(e) => {
                bot.send_message(msg.chat.id, format!("Valor rejeitado: {e}"))
                    .await?;
                return Ok(());
            }
        };

        let message = format_results(
            &results,
            amount,
            self.service.resale_price(),
            &self.config.signature,
        );
        bot.send_message(msg.chat.id, &message)
            .parse_mode(ParseMode::Markdown)
            .await?;

        info!(chat_id = %msg.chat.id, amount, "simulation delivered");
        self.repost_to_channel(bot, msg, &results, &message).await;
        Ok(())
    }

    /// Re-post the analysis to the configured channel when at least one
    /// exchange produced a quote and the command did not come from the
    /// channel itself.
    async fn repost_to_channel(
        &self,
        bot: &Bot,
        msg: &Message,
        results: &[braitsure_core::SimulationResult],
        message: &str,
    ) {
        let Some(channel) = &self.config.channel else {
            return;
        };
        if !results.iter().any(|r| r.buy_price.is_some()) {
            return;
        }
        let from_channel = msg
            .chat
            .username()
            .is_some_and(|name| channel.trim_start_matches('@').eq_ignore_ascii_case(name));
        if from_channel {
            return;
        }

        if let Err(e) = bot
            .send_message(channel.clone(), message)
            .parse_mode(ParseMode::Markdown)
            .await
        {
            error!(channel = channel.as_str(), error = %e, "failed to post to channel");
        }
    }

    async fn handle_setpicnic(
        &self,
        bot: &Bot,
        msg: &Message,
        value: &str,
    ) -> Result<(), TelegramError> {
        let Some(price) = parse_positive(value) else {
            bot.send_message(msg.chat.id, "Preço inválido. Use, por exemplo: `/setpicnic 5.28`")
                .parse_mode(ParseMode::Markdown)
                .await?;
            return Ok(());
        };

        match self.service.set_resale_price(price) {
            Ok(()) => {
                bot.send_message(
                    msg.chat.id,
                    format!(
                        "✅ Preço de venda na Picnic *temporariamente* atualizado para *{}*. \
                         O valor é resetado a cada reinicialização do servidor.",
                        format_brl(price)
                    ),
                )
                .parse_mode(ParseMode::Markdown)
                .await?;
            }
            Err(e) => {
                bot.send_message(msg.chat.id, format!("Preço rejeitado: {e}"))
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("5000"), Some(5000.0));
        assert_eq!(parse_positive(" 5.28 "), Some(5.28));
        assert_eq!(parse_positive("5,28"), Some(5.28));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-10"), None);
        assert_eq!(parse_positive("abc"), None);
        assert_eq!(parse_positive("NaN"), None);
        assert_eq!(parse_positive("inf"), None);
    }
}
