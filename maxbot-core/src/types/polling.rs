//! Long-polling request parameters and the page of updates returned.

use super::update::{Update, UpdateType};

/// Parameters of one `GET /updates` call. Construct with [`PollRequest::new`] to get clamped values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollRequest {
    /// Last marker returned by the server; `None` on the first call.
    pub marker: Option<i64>,
    pub limit: u32,
    pub timeout_secs: u32,
    /// Restrict delivered update types; empty means all.
    pub types: Vec<UpdateType>,
}

impl PollRequest {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const MAX_LIMIT: u32 = 1000;
    pub const DEFAULT_TIMEOUT_SECS: u32 = 30;
    pub const MAX_TIMEOUT_SECS: u32 = 90;

    /// Builds a request with `limit` clamped to 1..=1000 and `timeout_secs` to 0..=90.
    pub fn new(marker: Option<i64>, limit: u32, timeout_secs: u32, types: Vec<UpdateType>) -> Self {
        Self {
            marker,
            limit: limit.clamp(1, Self::MAX_LIMIT),
            timeout_secs: timeout_secs.min(Self::MAX_TIMEOUT_SECS),
            types,
        }
    }

    /// Comma-separated `types` parameter, or `None` when not filtering.
    pub fn types_param(&self) -> Option<String> {
        if self.types.is_empty() {
            return None;
        }
        Some(
            self.types
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

impl Default for PollRequest {
    fn default() -> Self {
        Self::new(None, Self::DEFAULT_LIMIT, Self::DEFAULT_TIMEOUT_SECS, Vec::new())
    }
}

/// Updates returned by one poll plus the marker to echo next time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateBatch {
    pub updates: Vec<Update>,
    pub marker: Option<i64>,
}
