//! Pre-flight checks of a scenario: hard errors that would stop a run and
//! warnings about inputs that run but probably do not mean what was intended.

use std::fmt;

use crate::economy::StardustRules;
use crate::gacha::check_termination;
use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

pub fn validate_scenario(scenario: &Scenario) -> ValidationReport {
    let mut report = ValidationReport::default();
    let config = scenario.config();

    if let Err(err) = config.validate() {
        report.push(
            ValidationSeverity::Error,
            format!("banner.{}", err.field()),
            err.to_string(),
        );
    } else if let Err(err) = check_termination(&config, &scenario.plan()) {
        report.push(ValidationSeverity::Error, "mode", err.to_string());
    }

    if scenario.multi_run == 0 {
        report.push(ValidationSeverity::Error, "multi_run", "must run at least one trial");
    } else if scenario.multi_run < 2 {
        report.push(
            ValidationSeverity::Warning,
            "multi_run",
            "a single trial has no standard deviation",
        );
    }

    if let Some(cap) = config.hard_pity_cap {
        if scenario.start.since_5star >= cap {
            report.push(
                ValidationSeverity::Warning,
                "start.since_5star",
                format!(
                    "{} is at or past the hard-pity cap {cap}; the first pull is a forced 5*",
                    scenario.start.since_5star
                ),
            );
        }
        if config.soft_pity_start_5star >= cap {
            report.push(
                ValidationSeverity::Warning,
                "banner.soft_pity_start_5star",
                format!(
                    "soft pity starts at {} but the hard-pity cap is {cap}; soft pity never applies",
                    config.soft_pity_start_5star
                ),
            );
        }
    }

    let rules = StardustRules::default();
    let inv = &scenario.inventory;
    if inv.e6_4stars > inv.owned_4stars {
        report.push(
            ValidationSeverity::Warning,
            "inventory.e6_4stars",
            format!("{} E6 4* but only {} owned", inv.e6_4stars, inv.owned_4stars),
        );
    }
    if inv.owned_4stars > rules.standard_4star_roster {
        report.push(
            ValidationSeverity::Warning,
            "inventory.owned_4stars",
            format!(
                "{} owned but the standard roster has {}",
                inv.owned_4stars, rules.standard_4star_roster
            ),
        );
    }
    if inv.e6_5stars > inv.owned_standard_5stars {
        report.push(
            ValidationSeverity::Warning,
            "inventory.e6_5stars",
            format!(
                "{} E6 5* but only {} owned",
                inv.e6_5stars, inv.owned_standard_5stars
            ),
        );
    }
    if !inv.owned_featured.is_empty()
        && inv.owned_featured.len() != config.featured_4star_count as usize
    {
        report.push(
            ValidationSeverity::Warning,
            "inventory.owned_featured",
            format!(
                "{} entries for {} featured 4*",
                inv.owned_featured.len(),
                config.featured_4star_count
            ),
        );
    }

    if scenario.seed.is_none() {
        report.push(
            ValidationSeverity::Info,
            "seed",
            "no seed; results will differ between runs",
        );
    }

    report
}
