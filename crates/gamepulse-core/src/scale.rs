//! Scale conversions and unit-aware value parsing for range controls
//!
//! Range controls work in a linear position space `[0, 1]`. Filter values live
//! in a domain that is either linear (scores, percentages, prices) or
//! logarithmic (player counts, owners, reviews), where the interesting
//! differences sit at the low end.

use serde::{Deserialize, Serialize};

/// How a range control maps positions onto its value domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    Linear,
    Log,
}

/// Unit used when rendering a value back into a text input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Player counts, owners, reviews (compact K/M/B)
    Count,
    /// US dollars
    Currency,
    Percent,
    Hours,
    Days,
    /// Unitless score
    Score,
}

/// log10(0) is undefined, so the log domain never starts below 1.
const LOG_FLOOR: f64 = 1.0;

/// Clamp `value` into `[lo, hi]`.
///
/// NaN clamps to `lo`. Unlike `f64::clamp` this never panics.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Convert a control position in `[0, 1]` into a domain value.
///
/// Positions at or beyond the ends return the domain bounds exactly.
pub fn position_to_value(position: f64, domain_min: f64, domain_max: f64, scale: Scale) -> f64 {
    debug_assert!(
        domain_max > domain_min,
        "range domain must be non-empty: {domain_min}..{domain_max}"
    );
    if position.is_nan() || position <= 0.0 {
        return domain_min;
    }
    if position >= 1.0 {
        return domain_max;
    }

    match scale {
        Scale::Linear => domain_min + position * (domain_max - domain_min),
        Scale::Log => {
            let (lo, hi) = log_bounds(domain_min, domain_max);
            10f64.powf(lo + position * (hi - lo))
        }
    }
}

/// Convert a domain value into a control position in `[0, 1]`.
pub fn value_to_position(value: f64, domain_min: f64, domain_max: f64, scale: Scale) -> f64 {
    debug_assert!(
        domain_max > domain_min,
        "range domain must be non-empty: {domain_min}..{domain_max}"
    );
    let position = match scale {
        Scale::Linear => (value - domain_min) / (domain_max - domain_min),
        Scale::Log => {
            let (lo, hi) = log_bounds(domain_min, domain_max);
            (value.max(LOG_FLOOR).log10() - lo) / (hi - lo)
        }
    };
    clamp(position, 0.0, 1.0)
}

fn log_bounds(domain_min: f64, domain_max: f64) -> (f64, f64) {
    debug_assert!(
        domain_max > domain_min.max(LOG_FLOOR),
        "log domain must extend above {LOG_FLOOR}: {domain_min}..{domain_max}"
    );
    (domain_min.max(LOG_FLOOR).log10(), domain_max.log10())
}

/// Parse user-typed values like `"1.2m"`, `"$19.99"`, `"50%"` or `"12,500"`.
///
/// Currency symbols, thousands separators and whitespace are stripped. A
/// trailing `k`/`m`/`b` (any case) multiplies by 1e3/1e6/1e9; a trailing `%`
/// is accepted and ignored. Returns `None` for empty or unparsable text.
pub fn parse_smart_value(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ',' | '_') && !c.is_whitespace())
        .collect();
    let last = cleaned.chars().last()?;

    let multiplier = match last.to_ascii_lowercase() {
        'k' => Some(1e3),
        'm' => Some(1e6),
        'b' => Some(1e9),
        '%' => Some(1.0),
        _ => None,
    };
    let (number, multiplier) = match multiplier {
        // The suffix is ASCII, so dropping one byte stays on a char boundary.
        Some(m) => (&cleaned[..cleaned.len() - 1], m),
        None => (cleaned.as_str(), 1.0),
    };

    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value * multiplier)
}

/// Compact display: `1.5B`, `2.3M`, `12.0K`, otherwise the plain number.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format_plain(value)
    }
}

/// Render a value for a range control's text input.
pub fn format_with_unit(value: f64, unit: Unit) -> String {
    match unit {
        Unit::Count => format_compact(value),
        Unit::Currency if value.fract() == 0.0 => format!("${}", format_plain(value)),
        Unit::Currency => format!("${:.2}", value),
        Unit::Percent => format!("{}%", format_plain(value)),
        Unit::Hours | Unit::Days | Unit::Score => format_plain(value),
    }
}

/// Round to `digits` significant digits, so dragged values stay short in URLs.
pub fn round_significant(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let shift = digits as i32 - 1 - magnitude;
    if shift >= 0 {
        let factor = 10f64.powi(shift);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-shift);
        (value / factor).round() * factor
    }
}

fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_linear_endpoints_are_exact() {
        assert_eq!(position_to_value(0.0, -100.0, 500.0, Scale::Linear), -100.0);
        assert_eq!(position_to_value(1.0, -100.0, 500.0, Scale::Linear), 500.0);
        assert_eq!(position_to_value(-0.5, -100.0, 500.0, Scale::Linear), -100.0);
        assert_eq!(position_to_value(1.5, -100.0, 500.0, Scale::Linear), 500.0);
        assert_eq!(position_to_value(0.5, 0.0, 100.0, Scale::Linear), 50.0);
    }

    #[test]
    fn test_log_endpoints_and_midpoint() {
        assert_eq!(position_to_value(0.0, 0.0, 1_000_000.0, Scale::Log), 0.0);
        assert_eq!(position_to_value(1.0, 0.0, 1_000_000.0, Scale::Log), 1_000_000.0);
        // Floor of 1 makes the midpoint 10^3
        let mid = position_to_value(0.5, 0.0, 1_000_000.0, Scale::Log);
        assert!((mid - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_inverse_round_trip() {
        let domains = [(1.0, 1_000_000.0), (0.5, 100.0), (10.0, 250.0)];
        for scale in [Scale::Linear, Scale::Log] {
            for (lo, hi) in domains {
                for step in 0..=100 {
                    let position = step as f64 / 100.0;
                    let value = position_to_value(position, lo, hi, scale);
                    let back = value_to_position(value, lo, hi, scale);
                    assert!(
                        (back - position).abs() < EPSILON,
                        "{scale:?} {lo}..{hi}: {position} -> {value} -> {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_value_to_position_clamps() {
        assert_eq!(value_to_position(-5.0, 0.0, 100.0, Scale::Linear), 0.0);
        assert_eq!(value_to_position(500.0, 0.0, 100.0, Scale::Linear), 1.0);
        assert_eq!(value_to_position(0.0, 0.0, 1000.0, Scale::Log), 0.0);
    }

    #[test]
    fn test_clamp_idempotent() {
        for x in [-10.0, 0.0, 3.5, 100.0, 250.0, f64::NAN] {
            let once = clamp(x, 0.0, 100.0);
            assert_eq!(clamp(once, 0.0, 100.0), once);
        }
        assert_eq!(clamp(42.0, 0.0, 100.0), 42.0);
        assert_eq!(clamp(f64::NAN, 0.0, 100.0), 0.0);
    }

    #[test]
    fn test_parse_smart_value() {
        assert_eq!(parse_smart_value("1.2m"), Some(1_200_000.0));
        assert_eq!(parse_smart_value("1.2M"), Some(1_200_000.0));
        assert_eq!(parse_smart_value("$19.99"), Some(19.99));
        assert_eq!(parse_smart_value("12,500"), Some(12_500.0));
        assert_eq!(parse_smart_value("5k"), Some(5_000.0));
        assert_eq!(parse_smart_value("2b"), Some(2_000_000_000.0));
        assert_eq!(parse_smart_value("50%"), Some(50.0));
        assert_eq!(parse_smart_value(" -10 "), Some(-10.0));
        assert_eq!(parse_smart_value(""), None);
        assert_eq!(parse_smart_value("   "), None);
        assert_eq!(parse_smart_value("abc"), None);
        assert_eq!(parse_smart_value("k"), None);
        assert_eq!(parse_smart_value("inf"), None);
        assert_eq!(parse_smart_value("NaN"), None);
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(1_500_000_000.0), "1.5B");
        assert_eq!(format_compact(2_340_000.0), "2.3M");
        assert_eq!(format_compact(1_000.0), "1.0K");
        assert_eq!(format_compact(999.0), "999");
        assert_eq!(format_compact(12.5), "12.5");
        assert_eq!(format_compact(-25_000.0), "-25.0K");
    }

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(1_258.925_411_794_167_5, 3), 1_260.0);
        assert_eq!(round_significant(33.333_333, 3), 33.3);
        assert_eq!(round_significant(30.000_000_000_000_004, 3), 30.0);
        assert_eq!(round_significant(-12.345, 3), -12.3);
        assert_eq!(round_significant(0.0, 3), 0.0);
        assert_eq!(round_significant(1_000_000.0, 3), 1_000_000.0);
    }

    #[test]
    fn test_format_with_unit_parses_back() {
        let cases = [
            (19.99, Unit::Currency),
            (20.0, Unit::Currency),
            (50.0, Unit::Percent),
            (1_500.0, Unit::Count),
            (80.0, Unit::Score),
        ];
        for (value, unit) in cases {
            let text = format_with_unit(value, unit);
            assert_eq!(parse_smart_value(&text), Some(value), "{text}");
        }
        assert_eq!(format_with_unit(20.0, Unit::Currency), "$20");
        assert_eq!(format_with_unit(30.0, Unit::Days), "30");
    }
}
