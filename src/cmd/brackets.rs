//! Brackets command - the income tax scale, decote and high income contribution

use crate::cmd::income::bracket_range;
use crate::cmd::{income_year, render_table};
use crate::money::{format_eur_whole, format_rate};
use crate::tax::france::{DecoteParams, TaxBracket, HIGH_INCOME_BRACKETS};
use crate::utils::write_csv;
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct BracketsCommand {
    /// Income year (e.g., 2023 for the scale applied in 2024)
    #[arg(short, long, default_value_t = 2023)]
    year: i32,

    /// Output the scale as CSV instead of formatted tables
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct BracketRow {
    #[tabled(rename = "Taxable income (per part)")]
    #[serde(rename = "taxable_income_per_part")]
    range: String,
    #[tabled(rename = "Rate")]
    #[serde(rename = "rate_pct")]
    rate: String,
}

#[derive(Debug, Clone, Tabled)]
struct HighIncomeRow {
    #[tabled(rename = "Income")]
    range: String,
    #[tabled(rename = "Single")]
    single: String,
    #[tabled(rename = "Couple")]
    couple: String,
}

impl BracketsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = income_year(self.year)?;
        let rows = bracket_rows(year.brackets());

        if self.csv {
            let rows = year.brackets().iter().zip(rows).map(|(bracket, row)| BracketRow {
                range: row.range,
                rate: bracket.rate.normalize().to_string(),
            });
            return write_csv(rows, io::stdout());
        }

        println!();
        println!("INCOME TAX SCALE ({})", year);
        println!();
        println!("{}", render_table(&rows));
        println!();
        print_decote(year.decote());
        println!();
        println!("HIGH INCOME CONTRIBUTION");
        println!("{}", render_table(&high_income_rows()));
        println!();
        Ok(())
    }
}

fn bracket_rows(brackets: &[TaxBracket]) -> Vec<BracketRow> {
    let mut previous: Option<Decimal> = None;
    brackets
        .iter()
        .map(|bracket| {
            let range = match (previous, bracket.upper_limit) {
                (None, Some(upper)) => format!("Up to {}", format_eur_whole(upper)),
                (Some(lower), Some(upper)) => format!(
                    "From {} to {}",
                    format_eur_whole(lower + Decimal::ONE),
                    format_eur_whole(upper)
                ),
                (Some(lower), None) => format!("Over {}", format_eur_whole(lower)),
                (None, None) => "All income".to_string(),
            };
            previous = bracket.upper_limit;
            BracketRow {
                range,
                rate: format_rate(bracket.rate),
            }
        })
        .collect()
}

fn high_income_rows() -> Vec<HighIncomeRow> {
    let mut previous = (Decimal::ZERO, Decimal::ZERO);
    HIGH_INCOME_BRACKETS
        .iter()
        .map(|bracket| {
            let row = HighIncomeRow {
                range: format!(
                    "{} | {}",
                    bracket_range(previous.0, bracket.limit_single),
                    bracket_range(previous.1, bracket.limit_couple)
                ),
                single: format_rate(bracket.rate_single),
                couple: format_rate(bracket.rate_couple),
            };
            previous = (
                bracket.limit_single.unwrap_or(previous.0),
                bracket.limit_couple.unwrap_or(previous.1),
            );
            row
        })
        .collect()
}

fn print_decote(decote: &DecoteParams) {
    println!("DECOTE");
    println!(
        "  Single: {} - {:.2} % of gross tax, when gross tax <= {}",
        format_eur_whole(decote.forfait_single),
        decote.rate * Decimal::ONE_HUNDRED,
        format_eur_whole(decote.threshold_single)
    );
    println!(
        "  Couple: {} - {:.2} % of gross tax, when gross tax <= {}",
        format_eur_whole(decote.forfait_couple),
        decote.rate * Decimal::ONE_HUNDRED,
        format_eur_whole(decote.threshold_couple)
    );
}
