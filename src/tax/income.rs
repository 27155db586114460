use crate::tax::france::{DecoteParams, IncomeYear, TaxBracket, HIGH_INCOME_BRACKETS};
use crate::tax::TaxError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FamilyStatus {
    #[default]
    Single,
    Couple,
}

/// The tax household, from which the number of parts is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Household {
    pub status: FamilyStatus,
    /// Dependent children
    pub children: u32,
    /// Holder of a disability card
    pub disabled: bool,
    /// Ancien combattant
    pub veteran: bool,
}

impl Household {
    pub fn single() -> Self {
        Household::default()
    }

    pub fn couple() -> Self {
        Household {
            status: FamilyStatus::Couple,
            ..Household::default()
        }
    }

    pub fn is_couple(&self) -> bool {
        self.status == FamilyStatus::Couple
    }

    /// Quotient familial: 1 part per adult, half a part per child and half a
    /// part for disability or veteran status (counted once).
    pub fn parts(&self) -> Decimal {
        let mut parts = match self.status {
            FamilyStatus::Single => dec!(1),
            FamilyStatus::Couple => dec!(2),
        };
        parts += Decimal::from(self.children) * dec!(0.5);
        if self.disabled || self.veteran {
            parts += dec!(0.5);
        }
        parts
    }
}

/// Tax due on one bracket, for a single part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketSlice {
    pub lower_limit: Decimal,
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Outcome of a full income tax assessment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxReport {
    pub year: IncomeYear,
    pub income: Decimal,
    pub household: Household,
    pub parts: Decimal,
    pub slices: Vec<BracketSlice>,
    pub gross_tax: Decimal,
    pub decote: Decimal,
    pub high_income_contribution: Decimal,
    pub net_tax: Decimal,
    /// `None` when there is no income to divide by
    pub effective_rate: Option<Decimal>,
    pub marginal_rate: Decimal,
}

/// Split the income of one part across the brackets, in ascending order.
pub fn bracket_slices(income_per_part: Decimal, brackets: &[TaxBracket]) -> Vec<BracketSlice> {
    let mut slices = Vec::with_capacity(brackets.len());
    let mut previous_limit = Decimal::ZERO;

    for bracket in brackets {
        let top = bracket
            .upper_limit
            .map_or(income_per_part, |limit| income_per_part.min(limit));
        let taxable = (top - previous_limit).max(Decimal::ZERO);
        let tax = taxable * bracket.rate / dec!(100);
        log::debug!(
            "Bracket {}..{:?} @ {}%: taxable={}, tax={}",
            previous_limit,
            bracket.upper_limit,
            bracket.rate,
            taxable,
            tax
        );
        slices.push(BracketSlice {
            lower_limit: previous_limit,
            upper_limit: bracket.upper_limit,
            rate: bracket.rate,
            taxable,
            tax,
        });
        match bracket.upper_limit {
            Some(limit) => previous_limit = limit,
            None => break,
        }
    }

    slices
}

/// Gross tax on `income` shared between `parts`
pub fn calculate_income_tax(
    income: Decimal,
    parts: Decimal,
    brackets: &[TaxBracket],
) -> Result<Decimal, TaxError> {
    let income_per_part = income_per_part(income, parts)?;
    let tax_per_part: Decimal = bracket_slices(income_per_part, brackets)
        .iter()
        .map(|s| s.tax)
        .sum();
    Ok(tax_per_part * parts)
}

/// Abatement on small tax liabilities. Zero once `tax` exceeds the threshold.
pub fn calculate_decote(tax: Decimal, is_couple: bool, params: &DecoteParams) -> Decimal {
    if tax <= params.threshold(is_couple) {
        (params.forfait(is_couple) - tax * params.rate).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Contribution on the whole household income above 250k (single) or 500k
/// (couple). Not affected by the number of parts.
pub fn calculate_high_income_contribution(income: Decimal, is_couple: bool) -> Decimal {
    let mut contribution = Decimal::ZERO;
    let mut previous_limit = Decimal::ZERO;

    for bracket in &HIGH_INCOME_BRACKETS {
        if income > previous_limit {
            let above = income - previous_limit;
            let taxable = bracket
                .limit(is_couple)
                .map_or(above, |limit| above.min(limit - previous_limit));
            contribution += taxable * bracket.rate(is_couple) / dec!(100);
        }
        match bracket.limit(is_couple) {
            Some(limit) => previous_limit = limit,
            None => break,
        }
    }

    contribution
}

/// Rate of the bracket containing `income_per_part`
pub fn marginal_rate(income_per_part: Decimal, brackets: &[TaxBracket]) -> Decimal {
    brackets
        .iter()
        .find(|b| b.upper_limit.is_none_or(|limit| income_per_part <= limit))
        .or_else(|| brackets.last())
        .map_or(Decimal::ZERO, |b| b.rate)
}

/// Marginal rate for a household income shared between `parts`
pub fn marginal_rate_for_income(
    income: Decimal,
    parts: Decimal,
    brackets: &[TaxBracket],
) -> Result<Decimal, TaxError> {
    Ok(marginal_rate(income_per_part(income, parts)?, brackets))
}

/// Net tax as a percentage of income
pub fn effective_rate(net_tax: Decimal, income: Decimal) -> Option<Decimal> {
    if income.is_zero() {
        None
    } else {
        Some(net_tax / income * dec!(100))
    }
}

fn income_per_part(income: Decimal, parts: Decimal) -> Result<Decimal, TaxError> {
    if parts <= Decimal::ZERO {
        return Err(TaxError::InvalidParts(parts));
    }
    Ok(income / parts)
}

/// Full assessment: gross tax, decote, high income contribution and rates.
pub fn assess(
    income: Decimal,
    household: &Household,
    year: IncomeYear,
) -> Result<IncomeTaxReport, TaxError> {
    let parts = household.parts();
    let is_couple = household.is_couple();
    let brackets = year.brackets();
    let per_part = income_per_part(income, parts)?;

    let slices = bracket_slices(per_part, brackets);
    let gross_tax = slices.iter().map(|s| s.tax).sum::<Decimal>() * parts;
    let decote = calculate_decote(gross_tax, is_couple, year.decote());
    let high_income_contribution = calculate_high_income_contribution(income, is_couple);
    let net_tax = (gross_tax - decote).max(Decimal::ZERO) + high_income_contribution;
    let marginal = marginal_rate(per_part, brackets);

    log::debug!(
        "Assessed income={} parts={}: gross={}, decote={}, cehr={}, net={}",
        income,
        parts,
        gross_tax,
        decote,
        high_income_contribution,
        net_tax
    );

    Ok(IncomeTaxReport {
        year,
        income,
        household: *household,
        parts,
        slices,
        gross_tax: gross_tax.round_dp(2),
        decote: decote.round_dp(2),
        high_income_contribution: high_income_contribution.round_dp(2),
        net_tax: net_tax.round_dp(2),
        effective_rate: effective_rate(net_tax, income).map(|r| r.round_dp(2)),
        marginal_rate: marginal,
    })
}
