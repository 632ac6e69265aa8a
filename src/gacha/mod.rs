pub mod config;
pub mod engine;
pub mod rng;
pub mod state;
pub mod trial;

pub use config::{ConfigError, FourStarGuaranteeModel, PullConfiguration, DEFAULT_PITY_MULTIPLIER};
pub use engine::{hard_pity_reached, pull, Outcome};
pub use rng::{entropy_seed, stream_seed, Rng};
pub use state::RateState;
pub use trial::{
    check_termination, run_trial, run_trial_unchecked, FourStarSource, OutcomeCounts,
    StopPolicy, TrialPlan, TrialResult,
};
