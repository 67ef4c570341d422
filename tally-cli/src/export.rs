//! CSV export of a selected view.

use anyhow::{Context, Result};
use std::io::Write;
use tally_core::Expense;

pub const HEADER: [&str; 5] = ["id", "date", "title", "amount", "category"];

pub fn write_csv<W: Write>(out: W, items: &[Expense]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER).context("write csv header")?;
    for e in items {
        let date = e.date.format("%Y-%m-%d").to_string();
        let amount = e.amount.to_string();
        wtr.write_record([
            e.id.as_str(),
            date.as_str(),
            e.title.as_str(),
            amount.as_str(),
            e.category.name(),
        ])
        .with_context(|| format!("write csv row for {}", e.id))?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}
