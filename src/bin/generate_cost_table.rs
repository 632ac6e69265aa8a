//! Write the dollar cost of 10..=2000 pulls under every purchase option to a CSV file.
//!
//! Usage: cargo run --bin generate_cost_table [path]   (default: cost_table.csv)

use warpsim::economy::write_cost_table_file;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "cost_table.csv".to_string());
    let rows = write_cost_table_file(&path)?;
    println!("wrote {rows} rows to {path}");
    Ok(())
}
