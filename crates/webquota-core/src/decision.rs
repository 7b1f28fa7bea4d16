//! Decision values returned by the allocator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a request was satisfied or denied for lack of space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaOutcome {
    Granted,
    OutOfSpace,
}

/// The decided quota plus how it was reached.
///
/// For database requests `quota` is the origin's new quota; on denial it is
/// the unchanged current quota. For app cache requests it is the new cache
/// ceiling, or `0` on denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaDecision {
    pub quota: i64,
    pub outcome: QuotaOutcome,
}

impl QuotaDecision {
    pub const fn granted(quota: i64) -> Self {
        Self {
            quota,
            outcome: QuotaOutcome::Granted,
        }
    }

    pub const fn out_of_space(quota: i64) -> Self {
        Self {
            quota,
            outcome: QuotaOutcome::OutOfSpace,
        }
    }

    pub fn is_granted(&self) -> bool {
        self.outcome == QuotaOutcome::Granted
    }
}

impl fmt::Display for QuotaDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome {
            QuotaOutcome::Granted => write!(f, "granted {}", self.quota),
            QuotaOutcome::OutOfSpace => write!(f, "out of space ({})", self.quota),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_outcome_in_snake_case() {
        let json = serde_json::to_string(&QuotaDecision::out_of_space(7)).unwrap();
        assert_eq!(json, r#"{"quota":7,"outcome":"out_of_space"}"#);
    }
}
