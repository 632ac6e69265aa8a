//! Trial runner: pull repeatedly from one starting state until a stop policy holds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::gacha::config::{FourStarGuaranteeModel, PullConfiguration};
use crate::gacha::engine::{pull, Outcome};
use crate::gacha::rng::Rng;
use crate::gacha::state::RateState;

/// Which 4★ a [StopPolicy::FourStarCopies] trial is chasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FourStarSource {
    /// One of the featured 4★ items on this banner.
    Featured,
    /// One specific item of the standard (off-banner) 4★ pool.
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum StopPolicy {
    /// Stop once this many featured 5★ have been drawn.
    CountTarget(u32),
    /// Stop after exactly this many pulls.
    PullBudget(u32),
    /// Stop once this many copies of one specific 4★ have been drawn.
    FourStarCopies { copies: u32, source: FourStarSource },
}

impl StopPolicy {
    fn is_satisfied(&self, total_pulls: u32, counts: &OutcomeCounts, target_copies: u32) -> bool {
        match *self {
            Self::CountTarget(target) => counts.featured5 >= target,
            Self::PullBudget(budget) => total_pulls >= budget,
            Self::FourStarCopies { copies, .. } => target_copies >= copies,
        }
    }
}

impl fmt::Display for StopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountTarget(n) => write!(f, "{n} featured 5*"),
            Self::PullBudget(n) => write!(f, "{n} pulls"),
            Self::FourStarCopies { copies, source } => match source {
                FourStarSource::Featured => write!(f, "{copies} copies of a featured 4*"),
                FourStarSource::Standard => write!(f, "{copies} copies of an off-banner 4*"),
            },
        }
    }
}

/// A stop policy plus an optional hard ceiling on pulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialPlan {
    pub policy: StopPolicy,
    #[serde(default)]
    pub pull_cap: Option<u32>,
}

impl TrialPlan {
    pub fn new(policy: StopPolicy) -> Self {
        Self {
            policy,
            pull_cap: None,
        }
    }

    pub fn with_pull_cap(self, cap: u32) -> Self {
        Self {
            pull_cap: Some(cap),
            ..self
        }
    }
}

impl From<StopPolicy> for TrialPlan {
    fn from(policy: StopPolicy) -> Self {
        Self::new(policy)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub standard3: u32,
    pub standard4: u32,
    pub featured4: u32,
    pub standard5: u32,
    pub featured5: u32,
}

impl OutcomeCounts {
    #[inline]
    pub fn record(&mut self, outcome: Outcome) {
        *self.slot(outcome) += 1;
    }

    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Standard3 => self.standard3,
            Outcome::Standard4 => self.standard4,
            Outcome::Featured4 => self.featured4,
            Outcome::Standard5 => self.standard5,
            Outcome::Featured5 => self.featured5,
        }
    }

    pub fn total(&self) -> u32 {
        Outcome::ALL.iter().map(|o| self.get(*o)).sum()
    }

    fn slot(&mut self, outcome: Outcome) -> &mut u32 {
        match outcome {
            Outcome::Standard3 => &mut self.standard3,
            Outcome::Standard4 => &mut self.standard4,
            Outcome::Featured4 => &mut self.featured4,
            Outcome::Standard5 => &mut self.standard5,
            Outcome::Featured5 => &mut self.featured5,
        }
    }
}

/// Summary of one finished trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    pub total_pulls: u32,
    pub counts: OutcomeCounts,
    /// Copies of the chased 4★ under [StopPolicy::FourStarCopies]; 0 otherwise.
    pub target_copies: u32,
    /// True when the pull cap ended the trial before the policy was satisfied.
    pub capped: bool,
}

/// True when every pull from zero 5★ pity is a 5★, so the 4★ band is never
/// reached once the first 5★ resets the counter.
fn five_star_every_pull(config: &PullConfiguration) -> bool {
    let at_zero_pity = if config.soft_pity_start_5star == 0 {
        config.base_5star_chance + config.pity_increment_5star
    } else {
        config.base_5star_chance
    };
    config.hard_pity_cap == Some(1) || at_zero_pity >= 100.0
}

/// Reject plans that could pull forever.
pub fn check_termination(config: &PullConfiguration, plan: &TrialPlan) -> Result<(), SimError> {
    if plan.pull_cap.is_some() {
        return Ok(());
    }
    let unbounded = |reason| {
        Err(SimError::UnboundedTrial {
            policy: plan.policy,
            reason,
        })
    };
    match plan.policy {
        StopPolicy::PullBudget(_) => Ok(()),
        StopPolicy::CountTarget(0) | StopPolicy::FourStarCopies { copies: 0, .. } => Ok(()),
        StopPolicy::CountTarget(_) => {
            let five_reachable = config.base_5star_chance > 0.0
                || config.pity_increment_5star > 0.0
                || config.hard_pity_cap.is_some();
            if five_reachable {
                Ok(())
            } else {
                unbounded("5* chance is zero with no soft or hard pity")
            }
        }
        StopPolicy::FourStarCopies { source, .. } => {
            let four_reachable = !five_star_every_pull(config)
                && (config.base_4star_chance > 0.0 || config.pity_increment_4star > 0.0);
            if !four_reachable {
                return unbounded("4* can never be drawn");
            }
            match source {
                FourStarSource::Featured
                    if config.four_star_featured_odds <= 0.0
                        && config.four_star_guarantee_model == FourStarGuaranteeModel::None =>
                {
                    unbounded("featured 4* odds are zero and there is no 4* guarantee")
                }
                FourStarSource::Standard if config.four_star_featured_odds >= 100.0 => {
                    unbounded("every 4* is featured")
                }
                _ => Ok(()),
            }
        }
    }
}

/// Validate, then run one trial.
pub fn run_trial(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    rng: &mut Rng,
) -> Result<TrialResult, SimError> {
    config.validate()?;
    check_termination(config, plan)?;
    Ok(run_trial_unchecked(config, initial_state, plan, rng))
}

/// Run one trial without validation. Callers must have validated `config` and
/// `plan` (see [run_trial]); batches validate once up front.
pub fn run_trial_unchecked(
    config: &PullConfiguration,
    initial_state: RateState,
    plan: &TrialPlan,
    rng: &mut Rng,
) -> TrialResult {
    let mut state = initial_state;
    let mut counts = OutcomeCounts::default();
    let mut target_copies = 0u32;
    let mut total_pulls = 0u32;

    loop {
        if plan.policy.is_satisfied(total_pulls, &counts, target_copies) {
            return TrialResult {
                total_pulls,
                counts,
                target_copies,
                capped: false,
            };
        }
        if plan.pull_cap.is_some_and(|cap| total_pulls >= cap) {
            return TrialResult {
                total_pulls,
                counts,
                target_copies,
                capped: true,
            };
        }

        let (outcome, next) = pull(config, state, rng);
        state = next;
        counts.record(outcome);
        total_pulls += 1;

        if let StopPolicy::FourStarCopies { source, .. } = plan.policy {
            let hit = match (source, outcome) {
                (FourStarSource::Featured, Outcome::Featured4) => {
                    rng.chance(config.featured_4star_share())
                }
                (FourStarSource::Standard, Outcome::Standard4) => {
                    rng.chance(config.standard_4star_share())
                }
                _ => false,
            };
            if hit {
                target_copies += 1;
            }
        }
    }
}
