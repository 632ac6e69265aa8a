//! Monte Carlo simulation of gacha pulls with soft pity, hard pity and a
//! featured-item guarantee, plus cost and stardust estimates on top.

pub mod batch;
pub mod cli;
pub mod economy;
pub mod error;
pub mod gacha;
pub mod parallel;
pub mod report;
pub mod scenario;
pub mod tables;

pub use error::SimError;
