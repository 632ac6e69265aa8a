//! A full simulation run described in one file: banner, starting pity, stop
//! target, wallet and owned inventory.

pub mod validate;

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::economy::{BannerKind, Inventory, PurchaseOptions, PurchaseStrategy};
use crate::gacha::{PullConfiguration, RateState, StopPolicy, TrialPlan};

pub use validate::{validate_scenario, ValidationDiagnostic, ValidationReport, ValidationSeverity};

pub const DEFAULT_MULTI_RUN: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Pull until `target_number` featured 5★; report the pulls it took.
    #[default]
    ToNumber,
    /// Spend exactly `target_pulls`; report how many featured 5★ came out.
    ToPulls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartState {
    pub since_4star: u32,
    pub since_5star: u32,
    pub five_guarantee: bool,
    pub four_guarantee: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    /// Pulls already saved up (tickets plus jade / 160).
    pub saved_pulls: u64,
    /// First-purchase bonus bundles are still available.
    pub double_top_up: bool,
    /// Buy only the largest bundle.
    pub e_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub mode: RunMode,
    pub target_number: u32,
    pub target_pulls: u32,
    pub multi_run: usize,
    pub seed: Option<u64>,
    pub pull_cap: Option<u32>,
    pub banner_type: BannerKind,
    /// Explicit banner rates. Missing fields take the character banner values;
    /// a missing block takes the preset for `banner_type`.
    pub banner: Option<PullConfiguration>,
    pub start: StartState,
    pub wallet: Wallet,
    pub inventory: Inventory,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            mode: RunMode::ToNumber,
            target_number: 1,
            target_pulls: 100,
            multi_run: DEFAULT_MULTI_RUN,
            seed: None,
            pull_cap: None,
            banner_type: BannerKind::Character,
            banner: None,
            start: StartState::default(),
            wallet: Wallet::default(),
            inventory: Inventory::default(),
        }
    }
}

impl Scenario {
    pub fn config(&self) -> PullConfiguration {
        match (&self.banner, self.banner_type) {
            (Some(banner), _) => banner.clone(),
            (None, BannerKind::Character) => PullConfiguration::character_banner(),
            (None, BannerKind::LightCone) => PullConfiguration::light_cone_banner(),
        }
    }

    pub fn plan(&self) -> TrialPlan {
        let policy = match self.mode {
            RunMode::ToNumber => StopPolicy::CountTarget(self.target_number),
            RunMode::ToPulls => StopPolicy::PullBudget(self.target_pulls),
        };
        TrialPlan {
            policy,
            pull_cap: self.pull_cap,
        }
    }

    pub fn initial_state(&self, config: &PullConfiguration) -> RateState {
        RateState::seeded(
            config,
            self.start.since_4star,
            self.start.since_5star,
            self.start.five_guarantee,
            self.start.four_guarantee,
        )
    }

    pub fn purchase_options(&self) -> PurchaseOptions {
        let strategy = if self.wallet.e_mode {
            PurchaseStrategy::MostEfficient
        } else {
            PurchaseStrategy::LeastExpensive
        };
        PurchaseOptions::new(self.wallet.double_top_up, strategy)
    }
}

#[derive(Debug)]
pub enum ScenarioError {
    Read(io::Error),
    Parse(String),
    UnsupportedFormat(String),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "unable to read scenario: {err}"),
            Self::Parse(msg) => write!(f, "unable to parse scenario: {msg}"),
            Self::UnsupportedFormat(ext) => {
                write!(f, "unsupported scenario format '{ext}' (expected .yaml, .yml or .json)")
            }
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ScenarioError {
    fn from(err: io::Error) -> Self {
        Self::Read(err)
    }
}

pub fn scenario_from_yaml(raw: &str) -> Result<Scenario, ScenarioError> {
    serde_yaml::from_str(raw).map_err(|err| ScenarioError::Parse(err.to_string()))
}

pub fn scenario_from_json(raw: &str) -> Result<Scenario, ScenarioError> {
    serde_json::from_str(raw).map_err(|err| ScenarioError::Parse(err.to_string()))
}

/// Load a `.yaml`/`.yml` or `.json` scenario file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => scenario_from_yaml(&fs::read_to_string(path)?),
        "json" => scenario_from_json(&fs::read_to_string(path)?),
        _ => Err(ScenarioError::UnsupportedFormat(ext)),
    }
}
