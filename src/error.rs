use std::fmt;

use crate::gacha::config::ConfigError;
use crate::gacha::trial::StopPolicy;

/// Failures of a trial or batch. All of them are detected before the first pull,
/// except cancellation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    InvalidConfiguration(ConfigError),
    /// The stop policy can never be satisfied and no pull cap bounds the trial.
    UnboundedTrial {
        policy: StopPolicy,
        reason: &'static str,
    },
    Cancelled {
        completed: usize,
        total: usize,
    },
    /// A report was requested for a batch of zero trials.
    EmptyBatch,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(err) => write!(f, "invalid configuration: {err}"),
            Self::UnboundedTrial { policy, reason } => {
                write!(f, "trial would never stop ({policy}): {reason}")
            }
            Self::Cancelled { completed, total } => {
                write!(f, "batch cancelled after {completed} of {total} trials")
            }
            Self::EmptyBatch => f.write_str("batch has no trials to report on"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfiguration(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfiguration(err)
    }
}
