//! Compare command - cost of a purchase made personally vs. through the company

use crate::cmd::income_year;
use crate::money::{format_eur, format_rate, plain};
use crate::tax::france::BNC_SOCIAL_RATE;
use crate::tax::income::marginal_rate_for_income;
use crate::tax::purchase::{self, compare, Channel, Product, PurchaseComparison, PurchaseInput, RemunerationType};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Product from the catalog
    #[arg(short, long, value_enum, default_value_t = ProductArg::Iphone)]
    product: ProductArg,

    /// TTC price in euros (required for `other`)
    #[arg(long)]
    price: Option<Decimal>,

    /// VAT rate in percent (defaults to the product's rate)
    #[arg(long)]
    vat_rate: Option<Decimal>,

    /// Annual declared income, used to find the marginal tax rate
    #[arg(short, long, default_value = "70000")]
    income: Decimal,

    /// Household parts for the marginal tax rate
    #[arg(long, default_value = "1")]
    parts: Decimal,

    /// How the income is paid out
    #[arg(short, long, value_enum, default_value_t = RemunerationArg::Bnc)]
    remuneration: RemunerationArg,

    /// Social contributions rate in percent, for salary and dividends
    #[arg(long, default_value = "45")]
    social_rate: Decimal,

    /// The company cannot recover VAT on the purchase
    #[arg(long)]
    no_vat_recovery: bool,

    /// Income year of the tax scale (e.g., 2023)
    #[arg(short, long, default_value_t = 2023)]
    year: i32,

    /// Show the step by step calculation
    #[arg(long)]
    details: bool,

    /// Explain what the comparison takes into account
    #[arg(long)]
    explain: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ProductArg {
    #[default]
    Iphone,
    Mac,
    Car,
    Restaurant,
    /// Any other purchase, priced with --price
    Other,
}

impl ProductArg {
    fn product(self) -> &'static Product {
        match self {
            ProductArg::Iphone => &purchase::IPHONE,
            ProductArg::Mac => &purchase::MAC,
            ProductArg::Car => &purchase::CAR,
            ProductArg::Restaurant => &purchase::RESTAURANT,
            ProductArg::Other => &purchase::OTHER,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RemunerationArg {
    Salary,
    Dividends,
    /// Self-employed professional income (bénéfices non commerciaux)
    #[default]
    Bnc,
}

impl From<RemunerationArg> for RemunerationType {
    fn from(arg: RemunerationArg) -> Self {
        match arg {
            RemunerationArg::Salary => RemunerationType::Salary,
            RemunerationArg::Dividends => RemunerationType::Dividends,
            RemunerationArg::Bnc => RemunerationType::Bnc,
        }
    }
}

#[derive(Debug, Serialize)]
struct ComparisonOutput {
    product: String,
    price_ttc: String,
    price_ht: String,
    vat: String,
    vat_rate_pct: String,
    declared_income: String,
    marginal_rate_pct: String,
    remuneration: String,
    vat_recovered: bool,
    personal_cost: String,
    company_base: String,
    company_rate_pct: String,
    tax_savings: String,
    company_cost: String,
    gain: String,
    recommended: String,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = income_year(self.year)?;
        let product = self.product.product();
        let (price_ttc, vat_rate) = product.resolve(self.price, self.vat_rate)?;
        let marginal_rate = marginal_rate_for_income(self.income, self.parts, year.brackets())?;

        let input = PurchaseInput {
            price_ttc,
            vat_rate,
            marginal_rate,
            social_contributions_rate: self.social_rate,
            remuneration: self.remuneration.into(),
            can_recover_vat: !self.no_vat_recovery,
        };
        let comparison = compare(&input)?;
        log::info!(
            "{}: personal {} vs company {} ({} purchase recommended)",
            product.name,
            comparison.personal_cost.round_dp(2),
            comparison.company_cost.round_dp(2),
            comparison.recommended().label()
        );

        if self.json {
            return self.print_json(product, &comparison);
        }

        self.print_summary(product, &comparison);
        if self.details {
            println!("{}", breakdown(&comparison));
            println!();
        }
        if self.explain {
            println!("{}", EXPLANATION);
        }
        Ok(())
    }

    fn print_summary(&self, product: &Product, comparison: &PurchaseComparison) {
        let input = &comparison.input;
        println!();
        println!(
            "PURCHASE: {} at {} TTC (VAT {})",
            product.name,
            format_eur(input.price_ttc),
            format_rate(input.vat_rate)
        );
        println!(
            "  Declared income {} | Marginal rate {} | Paid as {}",
            format_eur(self.income),
            format_rate(input.marginal_rate),
            input.remuneration.label()
        );
        println!();
        println!("  {}", headline(comparison));
        println!("  Personal purchase cost: {}", format_eur(comparison.personal_cost));
        println!("  Company purchase cost: {}", format_eur(comparison.company_cost));
        println!();
    }

    fn print_json(&self, product: &Product, comparison: &PurchaseComparison) -> anyhow::Result<()> {
        let input = &comparison.input;
        let output = ComparisonOutput {
            product: product.name.to_string(),
            price_ttc: plain(input.price_ttc),
            price_ht: plain(comparison.price_ht),
            vat: plain(comparison.vat),
            vat_rate_pct: input.vat_rate.normalize().to_string(),
            declared_income: plain(self.income),
            marginal_rate_pct: input.marginal_rate.normalize().to_string(),
            remuneration: input.remuneration.label().to_lowercase(),
            vat_recovered: input.can_recover_vat,
            personal_cost: plain(comparison.personal_cost),
            company_base: plain(comparison.company_base),
            company_rate_pct: comparison.company_rate.normalize().to_string(),
            tax_savings: plain(comparison.tax_savings),
            company_cost: plain(comparison.company_cost),
            gain: plain(comparison.gain),
            recommended: comparison.recommended().label().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}

fn headline(comparison: &PurchaseComparison) -> String {
    let outcome = match comparison.recommended() {
        Channel::Company => "Gain",
        Channel::Personal => "Loss",
    };
    format!(
        "{} from buying through the company: {}",
        outcome,
        format_eur(comparison.gain.abs())
    )
}

/// Step by step calculation for both purchase channels
fn breakdown(comparison: &PurchaseComparison) -> String {
    let input = &comparison.input;
    let mut lines = Vec::new();

    if input.is_bnc() {
        lines.push("Personal purchase (BNC):".to_string());
        lines.push(format!("  - TTC cost: {}", format_eur(input.price_ttc)));
        lines.push(format!(
            "  - Income needed before tax and social charges: {}",
            format_eur(comparison.personal_cost)
        ));
        lines.push(format!("  - Marginal tax rate: {}", format_rate(input.marginal_rate)));
        lines.push(format!("  - BNC social charges rate: {}", format_rate(BNC_SOCIAL_RATE)));
    } else {
        lines.push("Personal purchase:".to_string());
        lines.push(format!("  - TTC cost: {}", format_eur(input.price_ttc)));
        lines.push(format!(
            "  - Income needed before tax: {}",
            format_eur(comparison.personal_cost)
        ));
        lines.push(format!("  - Marginal tax rate: {}", format_rate(input.marginal_rate)));
    }
    lines.push(format!("  - Real cost: {}", format_eur(comparison.personal_cost)));
    lines.push(String::new());

    lines.push("Company purchase:".to_string());
    if input.can_recover_vat {
        lines.push(format!(
            "  - HT price: {} (VAT recovered: {})",
            format_eur(comparison.price_ht),
            format_eur(comparison.vat)
        ));
    } else {
        lines.push(format!(
            "  - TTC price: {} (VAT not recovered)",
            format_eur(input.price_ttc)
        ));
    }
    lines.push(format!(
        "  - Tax and social charges saved: {} ({})",
        format_eur(comparison.tax_savings),
        format_rate(comparison.company_rate)
    ));
    lines.push(format!(
        "  - Final cost for the company: {}",
        format_eur(comparison.company_cost)
    ));
    lines.push(String::new());

    lines.push(format!(
        "Difference: {} in favour of the {} purchase",
        format_eur(comparison.gain.abs()),
        comparison.recommended().label()
    ));

    lines.join("\n")
}

const EXPLANATION: &str = "\
This compares the real cost of a personal purchase with its cost to the company.

For a personal purchase we consider:
  1. The gross income needed to pay for the purchase
  2. The marginal tax rate (the rate of the highest bracket reached)
  3. Social charges (for BNC)

For a company purchase we consider:
  1. VAT recovery, when applicable
  2. The income tax and social charges saved

The difference is the financial advantage of buying through the company or
personally. The calculation is simplified and ignores many tax rules; ask an
accountant for a full analysis.";
