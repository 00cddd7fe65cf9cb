use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const MONTH_NAMES_PT_BR: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// A calendar month. `month` is always in `1..=12`; the year is unbounded.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    // field order matters for Ord: year first
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Validates loosely typed input coming from JavaScript: the month must be
    /// an integral number in `1..=12` and the year a finite, non-zero integer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_js_numbers(month: f64, year: f64) -> Option<Self> {
        if !month.is_finite() || month.fract() != 0.0 {
            return None;
        }
        if !year.is_finite() || year == 0.0 || year.fract() != 0.0 {
            return None;
        }
        if year < f64::from(i32::MIN) || year > f64::from(i32::MAX) {
            return None;
        }
        if !(1.0..=12.0).contains(&month) {
            return None;
        }
        Self::new(month as u32, year as i32)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// Moves by `months`, rolling the year over past January/December.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn shift(self, months: i32) -> Self {
        let zero_based = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = zero_based.div_euclid(12);
        let month = zero_based.rem_euclid(12) + 1;
        Self {
            year: i32::try_from(year).unwrap_or(if months < 0 { i32::MIN } else { i32::MAX }),
            month: month as u32,
        }
    }

    pub fn prev(self) -> Self {
        self.shift(-1)
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES_PT_BR[(self.month - 1) as usize]
    }

    /// `"Outubro/2026"`, the label shown by the navigation display.
    pub fn label(self) -> String {
        format!("{}/{}", self.month_name(), self.year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(month: u32, year: i32) -> Period {
        Period::new(month, year).expect("valid period")
    }

    #[test]
    fn prev_from_january_rolls_back_a_year() {
        assert_eq!(period(1, 2026).prev(), period(12, 2025));
    }

    #[test]
    fn next_from_december_rolls_forward_a_year() {
        assert_eq!(period(12, 2025).next(), period(1, 2026));
    }

    #[test]
    fn shift_handles_multi_year_jumps() {
        assert_eq!(period(3, 2026).shift(-27), period(12, 2023));
        assert_eq!(period(11, 2026).shift(14), period(1, 2028));
        assert_eq!(period(7, 2026).shift(0), period(7, 2026));
    }

    #[test]
    fn new_rejects_months_outside_calendar() {
        assert!(Period::new(0, 2026).is_none());
        assert!(Period::new(13, 2026).is_none());
    }

    #[test]
    fn js_numbers_must_be_integral_month_and_truthy_year() {
        assert_eq!(Period::from_js_numbers(5.0, 2026.0), Some(period(5, 2026)));
        assert!(Period::from_js_numbers(0.0, 2026.0).is_none());
        assert!(Period::from_js_numbers(13.0, 2026.0).is_none());
        assert!(Period::from_js_numbers(2.5, 2026.0).is_none());
        assert!(Period::from_js_numbers(6.0, 0.0).is_none());
        assert!(Period::from_js_numbers(6.0, f64::NAN).is_none());
        assert!(Period::from_js_numbers(f64::INFINITY, 2026.0).is_none());
    }

    #[test]
    fn label_uses_portuguese_month_names() {
        assert_eq!(period(3, 2026).label(), "Março/2026");
        assert_eq!(period(12, 1999).month_name(), "Dezembro");
        assert_eq!(period(4, 2026).to_string(), "04/2026");
    }

    #[test]
    fn ordering_compares_year_before_month() {
        assert!(period(12, 2025) < period(1, 2026));
        assert!(period(2, 2026) > period(1, 2026));
    }
}
