//! Utility functions to round and format numbers for display.
//!
//! Rounding is a presentation concern only. The root finder and the samplers work with exact
//! `f64` values; these helpers are applied at the very end, when a number is about to be shown.

use super::solve::RootSet;

/// The default number of significant digits shown for a number.
pub const DISPLAY_DIGITS: usize = 12;

/// Magnitudes below this are shown as exactly `0`.
pub const DISPLAY_ZERO: f64 = 1e-12;

/// The default maximum number of numeric solutions listed before the list is truncated.
pub const MAX_SOLUTIONS_DISPLAY: usize = 20;

/// Rounds `x` to the given number of significant digits, snapping tiny magnitudes to zero.
///
/// Non-finite values are returned unchanged.
pub fn round_for_display(x: f64, significant_digits: usize) -> f64 {
    if !x.is_finite() {
        return x;
    }
    if x.abs() < DISPLAY_ZERO {
        return 0.0;
    }

    // an f64 carries at most 17 significant decimal digits
    let digits = significant_digits.clamp(1, 17);
    format!("{:.*e}", digits - 1, x).parse().unwrap_or(x)
}

/// Returns true if the given number is small or large enough that it should be formatted in
/// scientific notation.
fn should_use_scientific(n: f64) -> bool {
    let abs = n.abs();
    abs != 0.0 && (abs < 1e-6 || abs >= 1e12)
}

/// Formats a number for display, rounded to [`DISPLAY_DIGITS`] significant digits.
pub fn format_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    } else if x.is_infinite() {
        return format!("{}∞", if x.is_sign_negative() { "-" } else { "" });
    }

    let rounded = round_for_display(x, DISPLAY_DIGITS);
    if rounded == 0.0 {
        // also catches -0.0
        "0".to_string()
    } else if should_use_scientific(rounded) {
        format!("{:e}", rounded)
    } else {
        format!("{}", rounded)
    }
}

/// Formats a set of numeric solutions for `variable`, such as `x ≈ {-2, 2}`.
///
/// At most `max` solutions are listed; any beyond that are replaced by `…`. Solutions that only
/// become equal after rounding are listed once. Returns [`None`] if there are no solutions, in
/// which case the caller decides how to report that no numeric solution was found.
pub fn format_roots(variable: &str, roots: &RootSet, max: usize) -> Option<String> {
    let mut shown: Vec<String> = Vec::new();
    for root in roots.iter() {
        let s = format_number(root);
        if !shown.contains(&s) {
            shown.push(s);
        }
    }

    match shown.len() {
        0 => None,
        1 => Some(format!("{} ≈ {}", variable, shown[0])),
        len => {
            if len > max {
                shown.truncate(max);
                shown.push("…".to_string());
            }
            Some(format!("{} ≈ {{{}}}", variable, shown.join(", ")))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding() {
        assert_eq!(round_for_display(0.1 + 0.2, DISPLAY_DIGITS), 0.3);
        assert_eq!(round_for_display(1.999_999_999_999_9, DISPLAY_DIGITS), 2.0);
        assert_eq!(round_for_display(3e-13, DISPLAY_DIGITS), 0.0);
        assert_eq!(round_for_display(-3e-13, DISPLAY_DIGITS), 0.0);
        assert_eq!(round_for_display(123.456, 4), 123.5);
        assert!(round_for_display(f64::NAN, DISPLAY_DIGITS).is_nan());
        assert_eq!(round_for_display(f64::INFINITY, DISPLAY_DIGITS), f64::INFINITY);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1e-13), "0");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(2.5e-7), "2.5e-7");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn root_lists() {
        let none = RootSet::from_candidates(Vec::new(), 1e-7);
        assert_eq!(format_roots("x", &none, MAX_SOLUTIONS_DISPLAY), None);

        let one = RootSet::from_candidates(vec![2.000_000_000_000_01], 1e-7);
        assert_eq!(format_roots("x", &one, MAX_SOLUTIONS_DISPLAY).as_deref(), Some("x ≈ 2"));

        let two = RootSet::from_candidates(vec![2.0, -2.0], 1e-7);
        assert_eq!(format_roots("t", &two, MAX_SOLUTIONS_DISPLAY).as_deref(), Some("t ≈ {-2, 2}"));

        let many = RootSet::from_candidates((0..5).map(f64::from).collect(), 1e-7);
        assert_eq!(format_roots("x", &many, 3).as_deref(), Some("x ≈ {0, 1, 2, …}"));
    }
}
