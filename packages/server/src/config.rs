//! Server configuration.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 4096;
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 256;
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_millis(1000);
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_millis(5000);

/// Runtime settings for [`crate::ui::Server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Longest accepted input line in bytes, newline excluded
    pub max_line_length: usize,
    /// Lines that may wait for a slow receiver before further lines to it are dropped
    pub outbound_queue_capacity: usize,
    /// How long a closing session may take to flush queued output
    pub flush_timeout: Duration,
    /// How long shutdown waits for live sessions to finish
    pub drain_timeout: Duration,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }
}
