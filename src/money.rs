use rust_decimal::Decimal;

/// Amount in euros, French style: "1 234,56 €"
pub fn format_eur(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (units, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{}{},{} €", sign, group_thousands(units), cents)
}

/// Whole euros, used for bracket limits: "177 106 €"
pub fn format_eur_whole(amount: Decimal) -> String {
    let units = amount.trunc().abs().to_string();
    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    format!("{}{} €", sign, group_thousands(&units))
}

pub fn format_rate(rate: Decimal) -> String {
    format!("{} %", rate.normalize())
}

pub fn format_rate_2dp(rate: Decimal) -> String {
    format!("{:.2} %", rate)
}

pub fn format_parts(parts: Decimal) -> String {
    if parts.fract() == Decimal::ZERO {
        format!("{}", parts.trunc())
    } else {
        format!("{:.1}", parts)
    }
}

/// Cents as a plain string for JSON/CSV output
pub fn plain(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_euros_with_grouping() {
        assert_eq!(format_eur(dec!(17988.53)), "17 988,53 €");
        assert_eq!(format_eur(dec!(1234567.891)), "1 234 567,89 €");
        assert_eq!(format_eur(dec!(0)), "0,00 €");
        assert_eq!(format_eur(dec!(999.999)), "1 000,00 €");
    }

    #[test]
    fn formats_negative_euros() {
        assert_eq!(format_eur(dec!(-1500.5)), "-1 500,50 €");
    }

    #[test]
    fn formats_whole_euros() {
        assert_eq!(format_eur_whole(dec!(177106)), "177 106 €");
        assert_eq!(format_eur_whole(dec!(999)), "999 €");
    }

    #[test]
    fn formats_rates_and_parts() {
        assert_eq!(format_rate(dec!(30)), "30 %");
        assert_eq!(format_rate(dec!(5.50)), "5.5 %");
        assert_eq!(format_rate_2dp(dec!(16.5724)), "16.57 %");
        assert_eq!(format_parts(dec!(2.0)), "2");
        assert_eq!(format_parts(dec!(2.5)), "2.5");
    }

    #[test]
    fn plain_amounts() {
        assert_eq!(plain(dec!(2083.3333333)), "2083.33");
        assert_eq!(plain(dec!(400)), "400.00");
    }
}
