//! Buying through the company vs. buying personally
//!
//! A personal purchase is paid from net income, so the real cost is the gross
//! income needed to be left with the TTC price after tax (and BNC social
//! charges). A company purchase is paid before tax, may recover VAT, and
//! lowers the profit that would otherwise have been taxed.

use crate::tax::france::BNC_SOCIAL_RATE;
use crate::tax::TaxError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub name: &'static str,
    /// TTC price, zero for a custom product
    pub price: Decimal,
    pub vat_rate: Decimal,
}

pub const IPHONE: Product = Product {
    name: "iPhone",
    price: dec!(1000),
    vat_rate: dec!(20),
};
pub const MAC: Product = Product {
    name: "Mac",
    price: dec!(2000),
    vat_rate: dec!(20),
};
pub const CAR: Product = Product {
    name: "Car",
    price: dec!(20000),
    vat_rate: dec!(20),
};
pub const RESTAURANT: Product = Product {
    name: "Restaurant",
    price: dec!(20),
    vat_rate: dec!(10),
};
pub const OTHER: Product = Product {
    name: "Other",
    price: dec!(0),
    vat_rate: dec!(20),
};

pub const PRODUCTS: [Product; 5] = [IPHONE, MAC, CAR, RESTAURANT, OTHER];

impl Product {
    /// Custom products carry no catalog price.
    pub fn is_custom(&self) -> bool {
        self.price.is_zero()
    }

    /// TTC price and VAT rate, with optional overrides.
    pub fn resolve(
        &self,
        price: Option<Decimal>,
        vat_rate: Option<Decimal>,
    ) -> Result<(Decimal, Decimal), TaxError> {
        let price = match price {
            Some(price) => price,
            None if self.is_custom() => return Err(TaxError::MissingPrice(self.name.to_string())),
            None => self.price,
        };
        Ok((price, vat_rate.unwrap_or(self.vat_rate)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemunerationType {
    Salary,
    Dividends,
    /// Self-employed professional income
    #[default]
    Bnc,
}

impl RemunerationType {
    pub fn label(&self) -> &'static str {
        match self {
            RemunerationType::Salary => "salary",
            RemunerationType::Dividends => "dividends",
            RemunerationType::Bnc => "BNC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseInput {
    pub price_ttc: Decimal,
    /// Percent
    pub vat_rate: Decimal,
    /// Percent, usually from the declared income
    pub marginal_rate: Decimal,
    /// Percent. Ignored for BNC, which uses the fixed BNC rate.
    pub social_contributions_rate: Decimal,
    pub remuneration: RemunerationType,
    pub can_recover_vat: bool,
}

impl PurchaseInput {
    pub fn is_bnc(&self) -> bool {
        self.remuneration == RemunerationType::Bnc
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Company,
    Personal,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Company => "company",
            Channel::Personal => "personal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseComparison {
    pub input: PurchaseInput,
    pub price_ht: Decimal,
    pub vat: Decimal,
    /// Rate deducted from gross income before the personal purchase
    pub personal_rate: Decimal,
    pub personal_cost: Decimal,
    /// HT if VAT is recovered, TTC otherwise
    pub company_base: Decimal,
    pub company_rate: Decimal,
    pub tax_savings: Decimal,
    pub company_cost: Decimal,
    /// Personal cost minus company cost
    pub gain: Decimal,
}

impl PurchaseComparison {
    pub fn recommended(&self) -> Channel {
        if self.gain >= Decimal::ZERO {
            Channel::Company
        } else {
            Channel::Personal
        }
    }
}

pub fn price_excluding_vat(price_ttc: Decimal, vat_rate: Decimal) -> Result<Decimal, TaxError> {
    if vat_rate < Decimal::ZERO {
        return Err(TaxError::InvalidVatRate(vat_rate));
    }
    Ok(price_ttc / (dec!(1) + vat_rate / dec!(100)))
}

/// Gross income needed to be left with `net` once `rate` percent is deducted
fn required_gross_income(net: Decimal, rate: Decimal) -> Result<Decimal, TaxError> {
    if rate >= dec!(100) {
        return Err(TaxError::RateTooHigh(rate));
    }
    Ok(net / (dec!(1) - rate / dec!(100)))
}

pub fn compare(input: &PurchaseInput) -> Result<PurchaseComparison, TaxError> {
    let price_ht = price_excluding_vat(input.price_ttc, input.vat_rate)?;
    let vat = input.price_ttc - price_ht;

    let personal_rate = if input.is_bnc() {
        input.marginal_rate + BNC_SOCIAL_RATE
    } else {
        input.marginal_rate
    };
    let personal_cost = required_gross_income(input.price_ttc, personal_rate)?;

    let company_base = if input.can_recover_vat {
        price_ht
    } else {
        input.price_ttc
    };
    let company_rate = if input.is_bnc() {
        input.marginal_rate + BNC_SOCIAL_RATE
    } else {
        input.marginal_rate + input.social_contributions_rate
    };
    let tax_savings = company_base * company_rate / dec!(100);
    let company_cost = company_base - tax_savings;
    let gain = personal_cost - company_cost;

    log::debug!(
        "Purchase {} TTC ({}% VAT, {}): personal={} @ {}%, company={} @ {}%, gain={}",
        input.price_ttc,
        input.vat_rate,
        input.remuneration.label(),
        personal_cost,
        personal_rate,
        company_cost,
        company_rate,
        gain
    );

    Ok(PurchaseComparison {
        input: *input,
        price_ht,
        vat,
        personal_rate,
        personal_cost,
        company_base,
        company_rate,
        tax_savings,
        company_cost,
        gain,
    })
}
