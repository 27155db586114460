use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::TaxError;

/// One slice of the progressive scale. `rate` is a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Upper bound of the slice, per part. `None` for the top slice.
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    const fn new(upper_limit: Decimal, rate: Decimal) -> Self {
        TaxBracket {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    const fn unbounded(rate: Decimal) -> Self {
        TaxBracket {
            upper_limit: None,
            rate,
        }
    }
}

/// Slice of the high income contribution (CEHR), with separate limits and
/// rates for single and couple households.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighIncomeBracket {
    pub limit_single: Option<Decimal>,
    pub limit_couple: Option<Decimal>,
    pub rate_single: Decimal,
    pub rate_couple: Decimal,
}

impl HighIncomeBracket {
    pub fn limit(&self, is_couple: bool) -> Option<Decimal> {
        if is_couple {
            self.limit_couple
        } else {
            self.limit_single
        }
    }

    pub fn rate(&self, is_couple: bool) -> Decimal {
        if is_couple {
            self.rate_couple
        } else {
            self.rate_single
        }
    }
}

/// Decote constants for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoteParams {
    pub threshold_single: Decimal,
    pub threshold_couple: Decimal,
    pub forfait_single: Decimal,
    pub forfait_couple: Decimal,
    /// Fraction of the gross tax subtracted from the forfait.
    pub rate: Decimal,
}

impl DecoteParams {
    pub fn threshold(&self, is_couple: bool) -> Decimal {
        if is_couple {
            self.threshold_couple
        } else {
            self.threshold_single
        }
    }

    pub fn forfait(&self, is_couple: bool) -> Decimal {
        if is_couple {
            self.forfait_couple
        } else {
            self.forfait_single
        }
    }
}

// Barème 2023 (revenus 2022)
const BRACKETS_2022: [TaxBracket; 5] = [
    TaxBracket::new(dec!(10777), dec!(0)),
    TaxBracket::new(dec!(27478), dec!(11)),
    TaxBracket::new(dec!(78570), dec!(30)),
    TaxBracket::new(dec!(168994), dec!(41)),
    TaxBracket::unbounded(dec!(45)),
];

// Barème 2024 (revenus 2023)
const BRACKETS_2023: [TaxBracket; 5] = [
    TaxBracket::new(dec!(11294), dec!(0)),
    TaxBracket::new(dec!(28797), dec!(11)),
    TaxBracket::new(dec!(82341), dec!(30)),
    TaxBracket::new(dec!(177106), dec!(41)),
    TaxBracket::unbounded(dec!(45)),
];

const DECOTE_2022: DecoteParams = DecoteParams {
    threshold_single: dec!(1841),
    threshold_couple: dec!(3045),
    forfait_single: dec!(833),
    forfait_couple: dec!(1378),
    rate: dec!(0.4525),
};

const DECOTE_2023: DecoteParams = DecoteParams {
    threshold_single: dec!(1929),
    threshold_couple: dec!(3191),
    forfait_single: dec!(873),
    forfait_couple: dec!(1444),
    rate: dec!(0.4525),
};

/// Contribution exceptionnelle sur les hauts revenus. Not indexed, so shared
/// by every year.
pub const HIGH_INCOME_BRACKETS: [HighIncomeBracket; 3] = [
    HighIncomeBracket {
        limit_single: Some(dec!(250000)),
        limit_couple: Some(dec!(500000)),
        rate_single: dec!(0),
        rate_couple: dec!(0),
    },
    HighIncomeBracket {
        limit_single: Some(dec!(500000)),
        limit_couple: Some(dec!(1000000)),
        rate_single: dec!(3),
        rate_couple: dec!(3),
    },
    HighIncomeBracket {
        limit_single: None,
        limit_couple: None,
        rate_single: dec!(4),
        rate_couple: dec!(4),
    },
];

/// Approximate social contribution rate on BNC profits, in percent.
pub const BNC_SOCIAL_RATE: Decimal = dec!(22);

/// The year the income was earned. Tax on it is assessed the following year,
/// so `IncomeYear(2023)` selects the 2024 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IncomeYear(pub i32);

impl IncomeYear {
    pub const SUPPORTED: [IncomeYear; 2] = [IncomeYear(2022), IncomeYear(2023)];

    pub fn from_year(year: i32) -> Result<Self, TaxError> {
        let year = IncomeYear(year);
        if Self::SUPPORTED.contains(&year) {
            Ok(year)
        } else {
            Err(TaxError::UnsupportedYear(year.0))
        }
    }

    /// Year the tax is assessed and paid.
    pub fn assessment_year(&self) -> i32 {
        self.0 + 1
    }

    /// Display as "revenus 2023 (barème 2024)"
    pub fn display(&self) -> String {
        format!("revenus {} (barème {})", self.0, self.assessment_year())
    }

    pub fn brackets(&self) -> &'static [TaxBracket] {
        match self.0 {
            2023.. => &BRACKETS_2023,
            _ => &BRACKETS_2022,
        }
    }

    pub fn decote(&self) -> &'static DecoteParams {
        match self.0 {
            2023.. => &DECOTE_2023,
            _ => &DECOTE_2022,
        }
    }
}

impl Default for IncomeYear {
    fn default() -> Self {
        IncomeYear(2023)
    }
}

impl std::fmt::Display for IncomeYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(brackets: &[TaxBracket]) {
        let (last, rest) = brackets.split_last().unwrap();
        assert_eq!(last.upper_limit, None);
        let limits: Vec<_> = rest.iter().map(|b| b.upper_limit.unwrap()).collect();
        assert!(limits.windows(2).all(|w| w[0] < w[1]), "{limits:?}");
        assert!(brackets.windows(2).all(|w| w[0].rate < w[1].rate));
    }

    #[test]
    fn bracket_tables_are_ascending_and_unbounded_at_top() {
        for year in IncomeYear::SUPPORTED {
            assert_well_formed(year.brackets());
        }
    }

    #[test]
    fn high_income_brackets_are_ascending() {
        for is_couple in [false, true] {
            let limits: Vec<_> = HIGH_INCOME_BRACKETS
                .iter()
                .map(|b| b.limit(is_couple))
                .collect();
            assert_eq!(limits.last(), Some(&None));
            assert!(limits[0] < limits[1]);
        }
    }

    #[test]
    fn revenus_2023_scale() {
        let brackets = IncomeYear(2023).brackets();
        assert_eq!(brackets[0].upper_limit, Some(dec!(11294)));
        assert_eq!(brackets[2].upper_limit, Some(dec!(82341)));
        assert_eq!(brackets[4].rate, dec!(45));
    }

    #[test]
    fn revenus_2022_scale() {
        let brackets = IncomeYear(2022).brackets();
        assert_eq!(brackets[0].upper_limit, Some(dec!(10777)));
        assert_eq!(brackets[3].upper_limit, Some(dec!(168994)));
    }

    #[test]
    fn decote_params_by_status() {
        let decote = IncomeYear(2023).decote();
        assert_eq!(decote.threshold(false), dec!(1929));
        assert_eq!(decote.threshold(true), dec!(3191));
        assert_eq!(decote.forfait(false), dec!(873));
        assert_eq!(decote.forfait(true), dec!(1444));
    }

    #[test]
    fn from_year_rejects_unknown_years() {
        assert_eq!(IncomeYear::from_year(2023), Ok(IncomeYear(2023)));
        assert_eq!(IncomeYear::from_year(2022), Ok(IncomeYear(2022)));
        assert_eq!(
            IncomeYear::from_year(2019),
            Err(TaxError::UnsupportedYear(2019))
        );
    }

    #[test]
    fn income_year_display() {
        assert_eq!(IncomeYear(2023).display(), "revenus 2023 (barème 2024)");
        assert_eq!(IncomeYear::default(), IncomeYear(2023));
    }
}
