//! Per-diem arithmetic: day count and total from the form inputs.

use chrono::NaiveDate;

use crate::format::{format_currency, parse_iso_date};

/// Shown in the calculated fields while a date is missing
pub const CALCULATION_PLACEHOLDER: &str = "Calculado automaticamente";

/// Days covered by a per-diem, counting both ends. Never less than one.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerDiemCalculation {
    pub days: i64,
    pub daily_rate: f64,
    pub total: f64,
}

impl PerDiemCalculation {
    pub fn new(start: NaiveDate, end: NaiveDate, daily_rate: f64) -> Self {
        let days = day_count(start, end);
        Self {
            days,
            daily_rate,
            total: days as f64 * daily_rate,
        }
    }

    /// Build from raw form values. `None` when either date is missing or invalid;
    /// an unparseable rate counts as zero.
    pub fn from_inputs(start: &str, end: &str, rate: &str) -> Option<Self> {
        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        let rate = rate.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0);
        Some(Self::new(start, end, rate))
    }
}

/// Text held by the two read-only calculated fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedDisplay {
    pub days: String,
    pub total: String,
}

impl Default for DerivedDisplay {
    fn default() -> Self {
        Self {
            days: CALCULATION_PLACEHOLDER.to_string(),
            total: CALCULATION_PLACEHOLDER.to_string(),
        }
    }
}

impl DerivedDisplay {
    pub fn from_inputs(start: &str, end: &str, rate: &str) -> Self {
        match PerDiemCalculation::from_inputs(start, end, rate) {
            Some(calc) => Self {
                days: format!("{} dia(s)", calc.days),
                total: format_currency(calc.total),
            },
            None => Self::default(),
        }
    }

    pub fn is_calculated(&self) -> bool {
        self.days != CALCULATION_PLACEHOLDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_counts_as_one() {
        assert_eq!(day_count(date(2024, 1, 10), date(2024, 1, 10)), 1);
    }

    #[test]
    fn test_inclusive_range() {
        assert_eq!(day_count(date(2024, 1, 10), date(2024, 1, 12)), 3);
        assert_eq!(day_count(date(2024, 2, 28), date(2024, 3, 1)), 3);
        assert_eq!(day_count(date(2023, 12, 31), date(2024, 1, 1)), 2);
    }

    #[test]
    fn test_day_count_is_at_least_one_for_every_ordering() {
        let start = date(2024, 5, 20);
        for offset in -10i64..=40 {
            let end = start + chrono::Duration::days(offset);
            let days = day_count(start, end);
            assert!(days >= 1);
            if offset >= 0 {
                assert_eq!(days, offset + 1);
            }
        }
    }

    #[test]
    fn test_total_is_days_times_rate() {
        let calc = PerDiemCalculation::from_inputs("2024-01-10", "2024-01-12", "150").unwrap();
        assert_eq!(calc.days, 3);
        assert_eq!(calc.total, 450.0);
        for rate in [0.0, 12.5, 99.99, 150.0] {
            let calc = PerDiemCalculation::new(date(2024, 3, 1), date(2024, 3, 7), rate);
            assert_eq!(calc.total, calc.days as f64 * rate);
        }
    }

    #[test]
    fn test_invalid_rate_counts_as_zero() {
        let calc = PerDiemCalculation::from_inputs("2024-01-10", "2024-01-10", "abc").unwrap();
        assert_eq!(calc.total, 0.0);
    }

    #[test]
    fn test_display_placeholder_when_date_missing() {
        let display = DerivedDisplay::from_inputs("2024-01-10", "", "150");
        assert_eq!(display, DerivedDisplay::default());
        assert!(!display.is_calculated());
    }

    #[test]
    fn test_display_values() {
        let display = DerivedDisplay::from_inputs("2024-01-10", "2024-01-12", "150");
        assert_eq!(display.days, "3 dia(s)");
        assert_eq!(display.total, "R$ 450.00");
    }
}
