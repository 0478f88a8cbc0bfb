//! Ordered handler registration.
//!
//! Each inbound update is tested against the registered routes in order and
//! goes to the first one that matches.

use tracing::debug;

use crate::platform::Inbound;

/// Command that triggers the greeting.
pub const START_COMMAND: &str = "start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/start` command
    Start,
    /// Any other text message
    Echo,
}

impl Route {
    fn matches(&self, inbound: &Inbound, bot_username: Option<&str>) -> bool {
        let Some(text) = inbound.text.as_deref() else {
            return false;
        };
        match self {
            Route::Start => is_command(text, START_COMMAND, bot_username),
            Route::Echo => true,
        }
    }
}

/// A bot command split out of message text. Arguments are not kept.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    pub mention: Option<&'a str>,
}

/// Split `/name@mention args` into name and mention. Returns `None` for
/// plain text.
pub fn parse_command(text: &str) -> Option<ParsedCommand<'_>> {
    let rest = text.strip_prefix('/')?;
    let head = rest.split(char::is_whitespace).next().unwrap_or_default();
    if head.is_empty() {
        return None;
    }
    let (name, mention) = match head.split_once('@') {
        Some((name, mention)) => (name, Some(mention)),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    Some(ParsedCommand { name, mention })
}

/// Whether `text` is the command `command`, addressed to this bot if a
/// mention is present. Comparison is case-insensitive.
pub fn is_command(text: &str, command: &str, bot_username: Option<&str>) -> bool {
    let Some(parsed) = parse_command(text) else {
        return false;
    };
    if !parsed.name.eq_ignore_ascii_case(command) {
        return false;
    }
    match (parsed.mention, bot_username) {
        (None, _) => true,
        (Some(mention), Some(own)) => mention.eq_ignore_ascii_case(own),
        (Some(_), None) => false,
    }
}

pub struct Router {
    bot_username: Option<String>,
    routes: Vec<Route>,
}

impl Router {
    /// Register the handlers: `/start` first, then echo.
    pub fn new(bot_username: Option<String>) -> Self {
        Self {
            bot_username,
            routes: vec![Route::Start, Route::Echo],
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// First registered route matching `inbound`, if any.
    pub fn route(&self, inbound: &Inbound) -> Option<Route> {
        let username = self.bot_username.as_deref();
        let found = self
            .routes
            .iter()
            .copied()
            .find(|route| route.matches(inbound, username));

        if found.is_none() {
            debug!(
                "No route for update {} ({:?})",
                inbound.update_id, inbound.kind
            );
        }
        found
    }
}
