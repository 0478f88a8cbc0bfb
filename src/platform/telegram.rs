use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, UpdateKind};
use tracing::{debug, info};

use crate::config::Config;
use crate::handlers;
use crate::platform::{Inbound, InboundKind, Replier};
use crate::router::Router;

impl From<&Update> for Inbound {
    fn from(update: &Update) -> Self {
        let (kind, message) = match &update.kind {
            UpdateKind::Message(m) => (InboundKind::Message, Some(m)),
            UpdateKind::EditedMessage(m) => (InboundKind::EditedMessage, Some(m)),
            UpdateKind::ChannelPost(m) => (InboundKind::ChannelPost, Some(m)),
            UpdateKind::EditedChannelPost(m) => (InboundKind::EditedChannelPost, Some(m)),
            _ => (InboundKind::Other, None),
        };

        Inbound {
            update_id: update.id.0,
            kind,
            chat_id: message.map(|m| m.chat.id.0),
            sender_id: message.and_then(|m| m.from.as_ref()).map(|u| u.id.0),
            text: message.and_then(|m| m.text()).map(str::to_string),
        }
    }
}

/// [`Replier`] backed by the Telegram Bot API
pub struct TelegramReplier {
    bot: Bot,
}

impl TelegramReplier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Replier for TelegramReplier {
    async fn reply(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> ResponseResult<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(mode) = parse_mode {
            request = request.parse_mode(mode);
        }
        request.await?;
        Ok(())
    }
}

/// Start the bot and poll until Ctrl-C.
pub async fn run(config: &Config) -> Result<()> {
    let bot = Bot::new(&config.token);

    let me = bot
        .get_me()
        .await
        .context("Failed to fetch bot identity (is TOKEN valid?)")?;
    let username = me.user.username.clone();
    info!("Authorized as @{}", username.as_deref().unwrap_or("<unknown>"));

    let router = Arc::new(Router::new(username));
    debug!("Registered routes: {:?}", router.routes());

    let handler = dptree::entry().endpoint(handle_update);

    info!("Starting Telegram polling...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        .error_handler(LoggingErrorHandler::with_custom_text("dispatcher"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Polling stopped");
    Ok(())
}

async fn handle_update(bot: Bot, update: Update, router: Arc<Router>) -> ResponseResult<()> {
    let inbound = Inbound::from(&update);
    let replier = TelegramReplier::new(bot);
    handlers::dispatch(&router, &replier, &inbound).await;
    Ok(())
}
