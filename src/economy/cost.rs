//! Currency cost of buying pulls with a greedy bundle selection.
//!
//! Money is kept in integer cents so repeated purchases never drift.

use std::fmt;
use std::io;
use std::path::Path;

use serde::Serialize;

pub const JADE_PER_PULL: u64 = 160;

/// A purchasable jade bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bundle {
    pub jade: u64,
    pub price_cents: u64,
    /// Buy this regular bundle when at least this much jade is still missing.
    pub buy_at_missing: u64,
}

/// Regular bundles, most expensive first.
pub const REGULAR_BUNDLES: [Bundle; 6] = [
    Bundle { jade: 8080, price_cents: 9999, buy_at_missing: 7760 },
    Bundle { jade: 3880, price_cents: 4999, buy_at_missing: 3734 },
    Bundle { jade: 2240, price_cents: 2999, buy_at_missing: 2180 },
    Bundle { jade: 1090, price_cents: 1499, buy_at_missing: 990 },
    Bundle { jade: 330, price_cents: 499, buy_at_missing: 300 },
    Bundle { jade: 60, price_cents: 99, buy_at_missing: 0 },
];

/// First-purchase bonus bundles, cheapest first. Each can be bought once.
pub const FIRST_TOP_UP_BUNDLES: [Bundle; 6] = [
    Bundle { jade: 120, price_cents: 99, buy_at_missing: 0 },
    Bundle { jade: 600, price_cents: 499, buy_at_missing: 0 },
    Bundle { jade: 1960, price_cents: 1499, buy_at_missing: 0 },
    Bundle { jade: 3960, price_cents: 2999, buy_at_missing: 0 },
    Bundle { jade: 6560, price_cents: 4999, buy_at_missing: 0 },
    Bundle { jade: 12960, price_cents: 9999, buy_at_missing: 0 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStrategy {
    /// Pick the smallest regular bundle worth buying for what is still missing.
    LeastExpensive,
    /// Only buy the largest regular bundle (best jade per dollar), even if it overshoots.
    MostEfficient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseOptions {
    /// First-purchase bonus bundles are still available.
    pub first_top_up: bool,
    pub strategy: PurchaseStrategy,
}

impl PurchaseOptions {
    pub fn new(first_top_up: bool, strategy: PurchaseStrategy) -> Self {
        Self {
            first_top_up,
            strategy,
        }
    }
}

/// Amount of money in cents, displayed as dollars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Cents(pub u64);

impl Cents {
    pub fn dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("${}.{:02}", self.0 / 100, self.0 % 100);
        f.pad(&text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Purchase {
    pub bundle: Bundle,
    pub first_top_up: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchasePlan {
    pub pulls: u64,
    pub jade_needed: u64,
    pub jade_purchased: u64,
    pub cost: Cents,
    pub leftover_jade: u64,
    pub purchases: Vec<Purchase>,
}

/// Pulls still to buy after spending saved ones.
pub fn missing_pulls(total_pulls: u64, saved_pulls: u64) -> u64 {
    total_pulls.saturating_sub(saved_pulls)
}

/// Missing pulls for a fractional (mean) pull count, rounded up.
pub fn missing_pulls_f64(total_pulls: f64, saved_pulls: u64) -> u64 {
    (total_pulls - saved_pulls as f64).max(0.0).ceil() as u64
}

pub fn plan_purchase(pulls: u64, options: PurchaseOptions) -> PurchasePlan {
    let jade_needed = pulls * JADE_PER_PULL;
    let mut purchased = 0u64;
    let mut cost = 0u64;
    let mut purchases = Vec::new();

    let mut buy = |bundle: Bundle, first_top_up: bool, purchased: &mut u64| {
        *purchased += bundle.jade;
        cost += bundle.price_cents;
        purchases.push(Purchase {
            bundle,
            first_top_up,
        });
    };

    if options.first_top_up {
        for bundle in FIRST_TOP_UP_BUNDLES {
            if purchased >= jade_needed {
                break;
            }
            buy(bundle, true, &mut purchased);
        }
    }

    while purchased < jade_needed {
        let missing = jade_needed - purchased;
        let bundle = match options.strategy {
            PurchaseStrategy::MostEfficient => REGULAR_BUNDLES[0],
            PurchaseStrategy::LeastExpensive => REGULAR_BUNDLES
                .iter()
                .copied()
                .find(|b| missing >= b.buy_at_missing)
                .unwrap_or(REGULAR_BUNDLES[REGULAR_BUNDLES.len() - 1]),
        };
        buy(bundle, false, &mut purchased);
    }

    PurchasePlan {
        pulls,
        jade_needed,
        jade_purchased: purchased,
        cost: Cents(cost),
        leftover_jade: purchased - jade_needed,
        purchases,
    }
}

/// Jade and dollar costs of `pulls` under every purchase option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostRow {
    pub pulls: u64,
    pub jade: u64,
    pub least_expensive: f64,
    pub least_expensive_double: f64,
    pub most_efficient: f64,
    pub most_efficient_double: f64,
}

pub fn cost_row(pulls: u64) -> CostRow {
    let dollars = |first_top_up, strategy| {
        plan_purchase(pulls, PurchaseOptions::new(first_top_up, strategy))
            .cost
            .dollars()
    };
    CostRow {
        pulls,
        jade: pulls * JADE_PER_PULL,
        least_expensive: dollars(false, PurchaseStrategy::LeastExpensive),
        least_expensive_double: dollars(true, PurchaseStrategy::LeastExpensive),
        most_efficient: dollars(false, PurchaseStrategy::MostEfficient),
        most_efficient_double: dollars(true, PurchaseStrategy::MostEfficient),
    }
}

/// Rows for 10..=2000 pulls in steps of 10.
pub fn cost_table() -> Vec<CostRow> {
    (10..=2000).step_by(10).map(cost_row).collect()
}

pub fn write_cost_table<W: io::Write>(rows: &[CostRow], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_cost_table_file(path: impl AsRef<Path>) -> Result<usize, csv::Error> {
    let rows = cost_table();
    let file = std::fs::File::create(path)?;
    write_cost_table(&rows, file)?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn least(first_top_up: bool) -> PurchaseOptions {
        PurchaseOptions::new(first_top_up, PurchaseStrategy::LeastExpensive)
    }

    #[test]
    fn one_pull_buys_smallest_bundles() {
        let plan = plan_purchase(1, least(false));
        assert_eq!(plan.jade_needed, 160);
        assert_eq!(plan.purchases.len(), 3);
        assert_eq!(plan.cost, Cents(297));
        assert_eq!(plan.leftover_jade, 20);
    }

    #[test]
    fn ten_pulls_use_threshold_tiers() {
        let plan = plan_purchase(10, least(false));
        assert_eq!(plan.cost, Cents(1499 + 499 + 3 * 99));
        assert_eq!(plan.leftover_jade, 0);
    }

    #[test]
    fn first_top_up_buys_bonus_bundles_cheapest_first() {
        let plan = plan_purchase(1, least(true));
        assert_eq!(plan.cost, Cents(99 + 499));
        assert_eq!(plan.leftover_jade, 560);
        assert!(plan.purchases.iter().all(|p| p.first_top_up));
    }

    #[test]
    fn most_efficient_overshoots_with_large_bundle() {
        let plan = plan_purchase(1, PurchaseOptions::new(false, PurchaseStrategy::MostEfficient));
        assert_eq!(plan.cost, Cents(9999));
        assert_eq!(plan.leftover_jade, 8080 - 160);
    }

    #[test]
    fn zero_pulls_cost_nothing() {
        let plan = plan_purchase(0, least(true));
        assert_eq!(plan.cost, Cents(0));
        assert!(plan.purchases.is_empty());
    }

    #[test]
    fn bonus_bundles_are_each_bought_once() {
        let plan = plan_purchase(400, least(true));
        let bonus = plan.purchases.iter().filter(|p| p.first_top_up).count();
        assert_eq!(bonus, FIRST_TOP_UP_BUNDLES.len());
        assert!(plan.jade_purchased >= plan.jade_needed);
    }

    #[test]
    fn missing_pulls_rounds_mean_up() {
        assert_eq!(missing_pulls(90, 100), 0);
        assert_eq!(missing_pulls(90, 10), 80);
        assert_eq!(missing_pulls_f64(93.41, 10), 84);
        assert_eq!(missing_pulls_f64(5.0, 10), 0);
    }

    #[test]
    fn cents_display_as_dollars() {
        assert_eq!(Cents(2295).to_string(), "$22.95");
        assert_eq!(Cents(5).to_string(), "$0.05");
    }

    #[test]
    fn cost_table_spans_ten_to_two_thousand() {
        let rows = cost_table();
        assert_eq!(rows.len(), 200);
        assert_eq!(rows[0].pulls, 10);
        assert_eq!(rows[199].pulls, 2000);
        assert!((rows[0].least_expensive - 22.95).abs() < 1e-9);
    }

    #[test]
    fn cost_table_csv_header() {
        let mut buf = Vec::new();
        write_cost_table(&cost_table()[..1], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(
            "pulls,jade,least_expensive,least_expensive_double,most_efficient,most_efficient_double\n"
        ));
    }
}
