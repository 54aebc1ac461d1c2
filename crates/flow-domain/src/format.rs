//! Formateo de montos y duraciones para las vistas.

use rust_decimal::{Decimal, RoundingStrategy};

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `₦5,100`: naira sin decimales, con separador de miles.
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}₦{}", group_thousands(&rounded.abs().trunc().to_string()))
}

/// `$3.40`: dólares con dos decimales.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.abs().trunc();
    let cents = ((rounded.abs() - whole) * Decimal::ONE_HUNDRED).trunc();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${}.{:0>2}", group_thousands(&whole.to_string()), cents.to_string())
}

/// `mm:ss` con ceros a la izquierda; los minutos no se acotan a 59.
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Teléfono enmascarado: `+1 555 *** 78`.
pub fn mask_phone(dial_code: &str, number: &str) -> String {
    let chars: Vec<char> = number.chars().collect();
    if chars.len() < 5 {
        return format!("{dial_code} {number}");
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{dial_code} {head} *** {tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naira_uses_thousand_separators() {
        assert_eq!(format_naira(Decimal::new(5100, 0)), "₦5,100");
        assert_eq!(format_naira(Decimal::new(1234567, 0)), "₦1,234,567");
        assert_eq!(format_naira(Decimal::new(999, 0)), "₦999");
        assert_eq!(format_naira(Decimal::new(15225, 1)), "₦1,523");
    }

    #[test]
    fn usd_has_two_decimals() {
        assert_eq!(format_usd(Decimal::new(5000, 0) / Decimal::new(1500, 0)), "$3.33");
        assert_eq!(format_usd(Decimal::new(34, 1)), "$3.40");
        assert_eq!(format_usd(Decimal::new(120, 0)), "$120.00");
    }

    #[test]
    fn durations_are_zero_padded() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(3600), "60:00");
    }

    #[test]
    fn phone_is_masked() {
        assert_eq!(mask_phone("+1", "5552345678"), "+1 555 *** 78");
        assert_eq!(mask_phone("+1", "123"), "+1 123");
    }
}
