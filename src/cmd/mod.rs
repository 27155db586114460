pub mod brackets;
pub mod compare;
pub mod income;
pub mod products;

use crate::tax::IncomeYear;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Income year given on the command line (e.g., 2023 for revenus 2023)
pub(crate) fn income_year(year: i32) -> anyhow::Result<IncomeYear> {
    Ok(IncomeYear::from_year(year)?)
}

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}
