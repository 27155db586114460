//! French income tax and company-vs-personal purchase calculators.
//!
//! [`tax`] holds the arithmetic over the hard-coded yearly tables; [`cmd`]
//! is the command line presentation of each calculator.

pub mod cmd;
pub mod money;
pub mod tax;
pub mod utils;
