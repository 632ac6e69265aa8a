//! Money and secondary-currency estimates derived from a batch.

pub mod cost;
pub mod stardust;

pub use cost::{
    cost_row, cost_table, missing_pulls, missing_pulls_f64, plan_purchase, write_cost_table,
    write_cost_table_file, Bundle, Cents, CostRow, Purchase, PurchaseOptions, PurchasePlan,
    PurchaseStrategy, FIRST_TOP_UP_BUNDLES, JADE_PER_PULL, REGULAR_BUNDLES,
};
pub use stardust::{
    estimate_stardust, rounded_counts, BannerKind, Inventory, StardustEstimate, StardustRules,
    DUST_PER_PULL,
};
