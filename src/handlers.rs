use teloxide::types::ParseMode;
use teloxide::RequestError;
use thiserror::Error;
use tracing::{info, warn};

use crate::platform::{Inbound, InboundKind, Replier};
use crate::router::{Route, Router};

/// Reply sent for `/start`, rendered bold by the client.
pub const GREETING: &str = "<b>Hello World!</b>";

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("update carries no new message to reply to")]
    MissingContext,
    #[error("failed to deliver reply: {0}")]
    Delivery(#[from] RequestError),
}

/// What the error handler gets alongside the failing update
#[derive(Debug)]
pub struct DispatchContext {
    pub route: Route,
    pub error: HandlerError,
}

/// Chat of the new message the update carries. Edits and channel posts
/// have no such message.
fn reply_chat(inbound: &Inbound) -> Result<i64, HandlerError> {
    match inbound.kind {
        InboundKind::Message => inbound.chat_id.ok_or(HandlerError::MissingContext),
        _ => Err(HandlerError::MissingContext),
    }
}

/// Greet the user who issued `/start`.
pub async fn start<R: Replier + ?Sized>(
    replier: &R,
    inbound: &Inbound,
) -> Result<(), HandlerError> {
    let chat_id = reply_chat(inbound)?;
    replier.reply(chat_id, GREETING, Some(ParseMode::Html)).await?;
    Ok(())
}

/// Send the message text back unchanged.
///
/// A missing text is sent as an empty string; the platform rejects it and
/// the failure ends up in [`error_handling`].
pub async fn echo<R: Replier + ?Sized>(
    replier: &R,
    inbound: &Inbound,
) -> Result<(), HandlerError> {
    let chat_id = reply_chat(inbound)?;
    let text = inbound.text.as_deref().unwrap_or_default();
    replier.reply(chat_id, text, None).await?;
    Ok(())
}

/// Log a failed dispatch. Never fails.
pub fn error_handling(inbound: &Inbound, context: &DispatchContext) {
    warn!(
        update_id = inbound.update_id,
        route = ?context.route,
        "Update {:?} caused error {:?}",
        inbound,
        context
    );
}

/// Route one update, run its handler and report any failure.
///
/// Returns the route that handled the update. Errors never propagate, so
/// the caller can move straight on to the next update.
pub async fn dispatch<R: Replier + ?Sized>(
    router: &Router,
    replier: &R,
    inbound: &Inbound,
) -> Option<Route> {
    let route = router.route(inbound)?;

    let result = match route {
        Route::Start => {
            info!(
                "/start from user {:?} in chat {:?}",
                inbound.sender_id, inbound.chat_id
            );
            start(replier, inbound).await
        }
        Route::Echo => echo(replier, inbound).await,
    };

    if let Err(error) = result {
        error_handling(inbound, &DispatchContext { route, error });
    }

    Some(route)
}
