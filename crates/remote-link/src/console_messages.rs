use remote_link_core::MessageSink;

use std::io::Write;

use tracing::warn;

/// [`MessageSink`] that writes to stderr.
pub struct ConsoleMessages;

impl MessageSink for ConsoleMessages {
    fn show_message(&self, message: &str) {
        warn!(message = %message, "User message");
        if let Err(e) = writeln!(std::io::stderr().lock(), "{}", message) {
            warn!(error = ?e, "Failed to write user message");
        }
    }
}
