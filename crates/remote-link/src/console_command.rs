use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Host controls typed on the console as `:`-prefixed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// `:link on|off`: flip and persist the device-link preference.
    Link(bool),
    /// `:load <video_id>`: open a video locally.
    Load(String),
    /// `:resume`: simulate the player view coming back to the foreground.
    Resume,
    /// `:status`: print link and player state.
    Status,
    /// `:quit`: shut down.
    Quit,
}

impl ConsoleCommand {
    /// Parse a console line, including its leading `:`.
    #[track_caller]
    pub(crate) fn parse(line: &str) -> AppResult<Self> {
        let body = line.trim().strip_prefix(':').unwrap_or(line).trim();
        let mut parts = body.split_whitespace();
        let verb = parts.next().unwrap_or_default();
        let argument = parts.next();

        if parts.next().is_some() {
            return Err(invalid(format!("Too many arguments in '{}'", body)));
        }

        match (verb, argument) {
            ("link", Some("on")) => Ok(ConsoleCommand::Link(true)),
            ("link", Some("off")) => Ok(ConsoleCommand::Link(false)),
            ("link", _) => Err(invalid("Usage: :link on|off".to_string())),
            ("load", Some(video_id)) => Ok(ConsoleCommand::Load(video_id.to_string())),
            ("load", None) => Err(invalid("Usage: :load <video_id>".to_string())),
            ("resume", None) => Ok(ConsoleCommand::Resume),
            ("status", None) => Ok(ConsoleCommand::Status),
            ("quit", None) => Ok(ConsoleCommand::Quit),
            _ => Err(invalid(format!("Unknown command '{}'", body))),
        }
    }
}

#[track_caller]
fn invalid(reason: String) -> AppError {
    AppError::InvalidConsoleCommand {
        reason,
        location: ErrorLocation::from(Location::caller()),
    }
}
