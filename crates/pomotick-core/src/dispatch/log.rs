//! Dispatch result logging.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of dispatching a single effect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Effect kind, e.g. "notify"
    pub effect: String,
    pub status: DispatchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchStatus {
    Delivered,
    /// Primary channel failed and the fallback was delivered instead
    Fallback { reason: String },
    /// Failed with no fallback; never retried
    Dropped { reason: String },
    /// Not a dispatcher concern, or disabled by settings
    Skipped { reason: String },
}

/// Log of one dispatched batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchLog {
    pub dispatched_at: DateTime<Utc>,
    pub results: Vec<DispatchResult>,
}

impl DispatchLog {
    pub fn new(results: Vec<DispatchResult>) -> Self {
        Self {
            dispatched_at: Utc::now(),
            results,
        }
    }

    pub fn delivered_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.status == DispatchStatus::Delivered)
            .count()
    }

    pub fn fallback_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, DispatchStatus::Fallback { .. }))
            .count()
    }

    pub fn dropped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, DispatchStatus::Dropped { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, DispatchStatus::Skipped { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_counts() {
        let log = DispatchLog::new(vec![
            DispatchResult {
                effect: "notify".to_string(),
                status: DispatchStatus::Delivered,
            },
            DispatchResult {
                effect: "play_cue".to_string(),
                status: DispatchStatus::Fallback {
                    reason: "no audio device".to_string(),
                },
            },
            DispatchResult {
                effect: "vibrate".to_string(),
                status: DispatchStatus::Dropped {
                    reason: "unsupported".to_string(),
                },
            },
        ]);

        assert_eq!(log.delivered_count(), 1);
        assert_eq!(log.fallback_count(), 1);
        assert_eq!(log.dropped_count(), 1);
        assert_eq!(log.skipped_count(), 0);
    }
}
