use log::{debug, info};

/// Diagnostic sink tagged with the name of the component that owns it.
#[derive(Debug, Clone)]
pub struct LogManager {
    source: String,
}

impl LogManager {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.source, message);
    }

    pub fn trace(&self, message: &str) {
        debug!("[{}] {}", self.source, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("telemcore")
    }
}
