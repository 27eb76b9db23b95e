//! Compact number display ("1.5M", "12.3k", "0.5").

const SUFFIXES: &[&str] = &["", "k", "M", "B", "T", "Qa", "Qi", "Sx"];

/// Format a matter amount for display.
///
/// - below 1000: integer part, or one decimal place below 10 when fractional
/// - otherwise: scaled by `1000^floor(digits / 3)` with a suffix, rounded to
///   3 significant figures and at most one decimal place
/// - beyond the suffix table: scientific notation with 2 fractional digits
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    if n < 1000.0 {
        if n < 10.0 && n.fract() != 0.0 {
            return format!("{:.1}", to_fixed(n, 1));
        }
        return format!("{}", n.floor());
    }

    let suffix_idx = digit_count(n) / 3;
    let Some(suffix) = SUFFIXES.get(suffix_idx) else {
        return exponential(n);
    };

    let scaled = n / 1000f64.powi(suffix_idx as i32);
    let mut short = round_significant(scaled, 3);
    if short.fract() != 0.0 {
        short = to_fixed(short, 1);
    }
    format!("{}{}", short, suffix)
}

/// Decimal digits in the integer part of `n` (n ≥ 1).
fn digit_count(n: f64) -> usize {
    let int_part = n.floor();
    if int_part < u128::MAX as f64 {
        (int_part as u128).to_string().len()
    } else {
        int_part.log10().floor() as usize + 1
    }
}

fn round_significant(x: f64, digits: i32) -> f64 {
    if x <= 0.0 {
        return x;
    }
    to_fixed(x, digits - 1 - decimal_exponent(x))
}

/// `e` of `x` written as `d.ddd × 10^e`.
fn decimal_exponent(x: f64) -> i32 {
    let s = format!("{:e}", x);
    s.split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

/// Round `x ≥ 0` to `digits` decimal places, judged on its exact binary
/// value, with exact halves rounded up (`1.45` is really `1.4499…` → `1.4`;
/// `1.25` is exact → `1.3`).
fn to_fixed(x: f64, digits: i32) -> f64 {
    let digits = digits.clamp(0, 15);
    let q = 2.0 * 10f64.powi(digits);
    let y = (x * q).round();
    // x == (奇数) / q ちょうどなら切り上げ
    if x.mul_add(q, -y) == 0.0 && y % 2.0 == 1.0 {
        return (y + 1.0) / q;
    }
    format!("{:.*}", digits as usize, x).parse().unwrap_or(x)
}

/// `1.23e+25` style.
fn exponential(n: f64) -> String {
    let s = format!("{:.2e}", n);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn small_fractions_keep_one_decimal() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(2.3), "2.3");
        assert_eq!(format_number(9.04), "9.0");
    }

    #[test]
    fn fractions_from_ten_up_are_floored() {
        assert_eq!(format_number(10.5), "10");
        assert_eq!(format_number(999.99), "999");
    }

    #[test]
    fn thousands_and_up() {
        assert_eq!(format_number(1000.0), "1k");
        assert_eq!(format_number(1500.0), "1.5k");
        assert_eq!(format_number(12_345.0), "12.3k");
        assert_eq!(format_number(1_500_000.0), "1.5M");
        assert_eq!(format_number(2_000_000_000.0), "2B");
        assert_eq!(format_number(7.5e12), "7.5T");
    }

    #[test]
    fn one_decimal_rounding_follows_exact_value() {
        // 1.45 は 1.4499… なので切り捨て
        assert_eq!(format_number(1450.0), "1.4k");
        assert_eq!(format_number(1_450_000.0), "1.4M");
        // 1.05 は 1.0500…04 なので切り上げ
        assert_eq!(format_number(1050.0), "1.1k");
        assert_eq!(format_number(12_500.0), "12.5k");
    }

    #[test]
    fn exact_halves_round_up() {
        assert_eq!(format_number(1250.0), "1.3k");
        assert_eq!(format_number(0.25), "0.3");
        assert_eq!(format_number(0.45), "0.5");
        assert_eq!(format_number(2.35), "2.4");
    }

    #[test]
    fn rounding_can_carry_into_next_digit() {
        assert_eq!(format_number(99_950.0), "100k");
        assert_eq!(format_number(9.96), "10.0");
    }

    #[test]
    fn six_digit_values_use_next_suffix() {
        // floor(6 / 3) = 2 → "M"
        assert_eq!(format_number(100_000.0), "0.1M");
        assert_eq!(format_number(999_999.0), "1M");
    }

    #[test]
    fn beyond_table_is_exponential() {
        assert_eq!(format_number(1.5e24), "1.50e+24");
        assert_eq!(format_number(2e30), "2.00e+30");
    }

    #[test]
    fn largest_suffix() {
        assert_eq!(format_number(3e21), "3Sx");
    }
}
