pub mod telegram;

use async_trait::async_trait;
use teloxide::prelude::ResponseResult;
use teloxide::types::ParseMode;

/// Which kind of platform event an [`Inbound`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    /// Anything that is not a message (callback queries, polls, ...)
    Other,
}

/// An inbound update, stripped down to what the handlers look at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub update_id: u32,
    pub kind: InboundKind,
    /// Chat the reply should go to
    pub chat_id: Option<i64>,
    /// Sending user, absent for channel posts
    pub sender_id: Option<u64>,
    /// The message text, absent for media and non-message updates
    pub text: Option<String>,
}

/// Outbound side of the bot: send one text reply to a chat.
///
/// Implemented over the live Bot API in [`telegram::TelegramReplier`].
#[async_trait]
pub trait Replier: Send + Sync {
    async fn reply(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> ResponseResult<()>;
}
