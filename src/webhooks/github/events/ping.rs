use serde::Deserialize;

/// Sent by GitHub once, right after a webhook is created.
#[derive(Debug, Deserialize)]
pub struct PingEvent {
    pub zen: String,
    pub hook_id: u64,
}
