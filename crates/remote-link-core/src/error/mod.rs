use error_location::ErrorLocation;
use thiserror::Error;

/// Remote-link errors with source location tracking.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The inbound command channel failed.
    #[error("Remote channel failed: {reason} {location}")]
    ChannelFailed {
        /// Description of the channel failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An inbound payload could not be decoded into a command.
    #[error("Invalid remote command: {reason} {location}")]
    InvalidCommand {
        /// Description of the decoding failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;
