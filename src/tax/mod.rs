pub mod france;
pub mod income;
pub mod purchase;

pub use france::{IncomeYear, TaxBracket};
pub use income::{assess, FamilyStatus, Household, IncomeTaxReport};
pub use purchase::{compare, Channel, Product, PurchaseComparison, PurchaseInput, RemunerationType};

use rust_decimal::Decimal;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("household parts must be positive, got {0}")]
    InvalidParts(Decimal),
    #[error("VAT rate must not be negative, got {0}%")]
    InvalidVatRate(Decimal),
    #[error("combined tax and social rate of {0}% leaves no net income")]
    RateTooHigh(Decimal),
    #[error("no tax tables for income year {0}")]
    UnsupportedYear(i32),
    #[error("a price is required for product '{0}'")]
    MissingPrice(String),
}
