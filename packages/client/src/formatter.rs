//! Message formatting utilities for client display.

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Banner printed before connecting
    pub fn format_hello() -> &'static str {
        "Hello from gochat-client!"
    }

    /// Format one line received from the server
    ///
    /// The leading `\r` overwrites the prompt the line interrupted.
    pub fn format_incoming(line: &str) -> String {
        format!("\r<< {}", line)
    }

    /// Format the notice shown when the server closes the connection
    pub fn format_server_down(reason: &str) -> String {
        format!("\rServer down: {}", reason)
    }

    pub fn format_exiting() -> &'static str {
        "Exiting..."
    }

    pub fn format_goodbye() -> &'static str {
        "Successful exit. Have a nice day."
    }
}
