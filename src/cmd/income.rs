//! Income command - household income tax with decote and high income contribution

use crate::cmd::{income_year, render_table};
use crate::money::{format_eur, format_eur_whole, format_parts, format_rate, format_rate_2dp, plain};
use crate::tax::income::{assess, BracketSlice, FamilyStatus, Household, IncomeTaxReport};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

#[derive(Args, Debug)]
pub struct IncomeCommand {
    /// Net taxable income (revenu net imposable) in euros
    #[arg(short, long)]
    income: Decimal,

    /// Household status
    #[arg(short, long, value_enum, default_value_t = StatusArg::Single)]
    status: StatusArg,

    /// Number of dependent children
    #[arg(short, long, default_value_t = 0)]
    children: u32,

    /// Holder of a disability card
    #[arg(long)]
    disabled: bool,

    /// Veteran (ancien combattant)
    #[arg(long)]
    veteran: bool,

    /// Income year (e.g., 2023 for income earned in 2023, taxed in 2024)
    #[arg(short, long, default_value_t = 2023)]
    year: i32,

    /// Show the tax due on each bracket
    #[arg(long)]
    details: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StatusArg {
    /// Single, divorced or widowed
    #[default]
    Single,
    /// Married or in a civil partnership (PACS)
    Couple,
}

impl From<StatusArg> for FamilyStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Single => FamilyStatus::Single,
            StatusArg::Couple => FamilyStatus::Couple,
        }
    }
}

#[derive(Debug, Serialize)]
struct IncomeOutput {
    income_year: i32,
    income: String,
    status: String,
    parts: String,
    gross_tax: String,
    decote: String,
    high_income_contribution: String,
    net_tax: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    effective_rate_pct: Option<String>,
    marginal_rate_pct: String,
    brackets: Vec<SliceRow>,
}

/// Tax on one bracket, for a single part
#[derive(Debug, Clone, Tabled, Serialize)]
struct SliceRow {
    #[tabled(rename = "Bracket")]
    bracket: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Taxable (per part)")]
    taxable: String,
    #[tabled(rename = "Tax (per part)")]
    tax: String,
}

impl IncomeCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = income_year(self.year)?;
        let household = Household {
            status: self.status.into(),
            children: self.children,
            disabled: self.disabled,
            veteran: self.veteran,
        };

        let report = assess(self.income, &household, year)?;
        log::info!(
            "Income {} over {} parts: net tax {}",
            report.income,
            report.parts,
            report.net_tax
        );

        if self.json {
            print_json(&report)
        } else {
            self.print_summary(&report);
            Ok(())
        }
    }

    fn print_summary(&self, report: &IncomeTaxReport) {
        println!();
        println!("INCOME TAX ({})", report.year);
        println!();
        println!(
            "  Income: {} | Household: {} | Parts: {}",
            format_eur(report.income),
            status_name(report.household.status),
            format_parts(report.parts)
        );
        println!("  Gross tax: {}", format_eur(report.gross_tax));
        println!("  Decote: {}", format_eur(report.decote));
        println!(
            "  High income contribution: {}",
            format_eur(report.high_income_contribution)
        );
        println!("  Net tax: {}", format_eur(report.net_tax));
        println!(
            "  Effective rate: {} | Marginal rate: {}",
            report
                .effective_rate
                .map_or("n/a".to_string(), format_rate_2dp),
            format_rate(report.marginal_rate)
        );
        println!();

        if self.details {
            println!("{}", render_table(&slice_rows(&report.slices)));
            println!();
        }
    }
}

fn print_json(report: &IncomeTaxReport) -> anyhow::Result<()> {
    let output = IncomeOutput {
        income_year: report.year.0,
        income: plain(report.income),
        status: status_name(report.household.status).to_string(),
        parts: report.parts.normalize().to_string(),
        gross_tax: plain(report.gross_tax),
        decote: plain(report.decote),
        high_income_contribution: plain(report.high_income_contribution),
        net_tax: plain(report.net_tax),
        effective_rate_pct: report.effective_rate.map(plain),
        marginal_rate_pct: report.marginal_rate.normalize().to_string(),
        brackets: slice_rows(&report.slices),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn status_name(status: FamilyStatus) -> &'static str {
    match status {
        FamilyStatus::Single => "single",
        FamilyStatus::Couple => "couple",
    }
}

fn slice_rows(slices: &[BracketSlice]) -> Vec<SliceRow> {
    slices
        .iter()
        .map(|s| SliceRow {
            bracket: bracket_range(s.lower_limit, s.upper_limit),
            rate: format_rate(s.rate),
            taxable: format_eur(s.taxable),
            tax: format_eur(s.tax),
        })
        .collect()
}

/// "0 € - 11 294 €", "177 106 € +"
pub(crate) fn bracket_range(lower: Decimal, upper: Option<Decimal>) -> String {
    match upper {
        Some(upper) => format!("{} - {}", format_eur_whole(lower), format_eur_whole(upper)),
        None => format!("{} +", format_eur_whole(lower)),
    }
}
