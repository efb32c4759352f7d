use num_traits::ToPrimitive;
use std::iter;

/// Groups the digits of a non-negative integer string in threes.
fn group_thousands(digits: &str) -> String {
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}

/// Rounds `x.abs()` to six decimals, splitting whole and fractional digits.
///
/// Works on the shortest decimal form of `x` and rounds halves up, so
/// `0.0000005` becomes `0.000001` even though the nearest `f64` sits just
/// below the half.
fn fixed_six(x: f64) -> (String, String) {
    let repr = x.abs().to_string();
    let (whole, frac) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits = whole
        .bytes()
        .chain(frac.bytes().chain(iter::repeat(b'0')).take(6))
        .map(|b| b - b'0')
        .collect::<Vec<_>>();

    if frac.as_bytes().get(6).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let text = digits.iter().map(|d| char::from(b'0' + d)).collect::<String>();
    let (whole, frac) = text.split_at(text.len() - 6);
    (whole.to_owned(), frac.to_owned())
}

/// Formats a result for display.
///
/// Values that survive a round trip through `i64` print as grouped integers
/// (`1,234`), everything else as grouped fixed-point with six decimals
/// (`1,234.500000`).
pub fn format_result(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_owned();
    }
    if x.is_infinite() {
        let inf = if x > 0.0 { "Infinity" } else { "-Infinity" };
        return inf.to_owned();
    }

    if let Some(int) = x.to_i64().filter(|i| *i as f64 == x) {
        let sign = if int < 0 { "-" } else { "" };
        return format!("{sign}{}", group_thousands(&int.unsigned_abs().to_string()));
    }

    let (whole, frac) = fixed_six(x);
    let sign = if x.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{frac}", group_thousands(&whole))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(7.0), "7");
        assert_eq!(format_result(512.0), "512");
        assert_eq!(format_result(1234.0), "1,234");
        assert_eq!(format_result(-1234567.0), "-1,234,567");
        assert_eq!(format_result(100000.0), "100,000");
    }

    #[test]
    fn fractions() {
        assert_eq!(format_result(0.5), "0.500000");
        assert_eq!(format_result(-2.25), "-2.250000");
        assert_eq!(format_result(1234.5), "1,234.500000");
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(format_result(0.0000005), "0.000001");
        assert_eq!(format_result(0.0078125), "0.007813");
        assert_eq!(format_result(-0.0078125), "-0.007813");
        assert_eq!(format_result(0.0000004), "0.000000");
    }

    #[test]
    fn rounding_carries_into_whole_part() {
        assert_eq!(format_result(0.9999999), "1.000000");
        assert_eq!(format_result(999999.9999999), "1,000,000.000000");
    }

    #[test]
    fn out_of_i64_range() {
        assert_eq!(format_result(1e20), "100,000,000,000,000,000,000.000000");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_result(f64::NAN), "NaN");
        assert_eq!(format_result(f64::INFINITY), "Infinity");
        assert_eq!(format_result(f64::NEG_INFINITY), "-Infinity");
    }
}
