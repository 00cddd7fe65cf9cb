use chrono::{
  DateTime,
  NaiveDate,
  NaiveDateTime,
  TimeZone
};
use chrono_tz::Tz;
use rust_decimal::{
  Decimal,
  RoundingStrategy
};

/// Separators and currency symbol of a
/// number locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
  pub decimal_separator: char,
  pub group_separator:   char,
  pub currency_symbol:   &'static str
}

pub const PT_BR: NumberLocale =
  NumberLocale {
    decimal_separator: ',',
    group_separator:   '.',
    currency_symbol:   "R$"
  };

const CURRENCY_GAP: char = '\u{a0}';
const CURRENCY_FRACTION_DIGITS: u32 =
  2;
const MAX_NUMBER_FRACTION_DIGITS: u32 =
  3;
const MS_PER_DAY: i64 = 86_400_000;

pub const INVALID_DATE: &str =
  "Invalid Date";

/// `1234.5` → `"R$ 1.234,50"` (with a
/// non-breaking space).
#[must_use]
pub fn format_currency(
  value: f64
) -> String {
  format_currency_with(&PT_BR, value)
}

#[must_use]
pub fn format_currency_with(
  locale: &NumberLocale,
  value: f64
) -> String {
  if value.is_nan() {
    return format!(
      "{}{CURRENCY_GAP}NaN",
      locale.currency_symbol
    );
  }
  if value.is_infinite() {
    let sign =
      if value < 0.0 { "-" } else { "" };
    return format!(
      "{sign}{}{CURRENCY_GAP}∞",
      locale.currency_symbol
    );
  }

  let fixed = fixed_digits(
    value.abs(),
    CURRENCY_FRACTION_DIGITS
  );
  let body =
    localize_fixed(locale, &fixed);
  let sign = if value < 0.0
    && !is_zero_text(&fixed)
  {
    "-"
  } else {
    ""
  };

  format!(
    "{sign}{}{CURRENCY_GAP}{body}",
    locale.currency_symbol
  )
}

/// `1000` → `"1.000"`. Keeps at most
/// three fraction digits and trims
/// trailing zeros.
#[must_use]
pub fn format_number(
  value: f64
) -> String {
  format_number_with(&PT_BR, value)
}

#[must_use]
pub fn format_number_with(
  locale: &NumberLocale,
  value: f64
) -> String {
  if value.is_nan() {
    return "NaN".to_string();
  }
  if value.is_infinite() {
    return if value < 0.0 {
      "-∞".to_string()
    } else {
      "∞".to_string()
    };
  }

  let fixed = fixed_digits(
    value.abs(),
    MAX_NUMBER_FRACTION_DIGITS
  );
  let trimmed = if fixed.contains('.') {
    fixed
      .trim_end_matches('0')
      .trim_end_matches('.')
  } else {
    fixed.as_str()
  };
  let body =
    localize_fixed(locale, trimmed);

  if value < 0.0
    && !is_zero_text(trimmed)
  {
    format!("-{body}")
  } else {
    body
  }
}

/// `value` with exactly `digits`
/// fraction digits, halves rounded away
/// from zero like `Intl.NumberFormat`.
fn fixed_digits(
  value: f64,
  digits: u32
) -> String {
  let width = digits as usize;
  match Decimal::from_f64_retain(value) {
    | Some(exact) => {
      let rounded = exact
        .round_dp_with_strategy(
          digits,
          RoundingStrategy::MidpointAwayFromZero
        );
      format!("{rounded:.width$}")
    }
    // beyond Decimal's range there are
    // no fraction digits left to round
    | None => format!("{value:.width$}")
  }
}

fn localize_fixed(
  locale: &NumberLocale,
  fixed: &str
) -> String {
  let (int_part, frac_part) =
    match fixed.split_once('.') {
      | Some((int_part, frac)) => {
        (int_part, Some(frac))
      }
      | None => (fixed, None)
    };

  let mut out = group_digits(
    int_part,
    locale.group_separator
  );
  if let Some(frac) = frac_part {
    out.push(locale.decimal_separator);
    out.push_str(frac);
  }
  out
}

fn group_digits(
  digits: &str,
  separator: char
) -> String {
  let len = digits.len();
  let mut out = String::with_capacity(
    len + len / 3
  );
  for (idx, ch) in
    digits.chars().enumerate()
  {
    if idx > 0 && (len - idx) % 3 == 0
    {
      out.push(separator);
    }
    out.push(ch);
  }
  out
}

fn is_zero_text(fixed: &str) -> bool {
  fixed
    .chars()
    .all(|ch| ch == '0' || ch == '.')
}

/// Parses the date strings the pages
/// hand around into wall-clock time in
/// `tz`. Plain dates are calendar dates
/// and are not shifted.
pub fn parse_local_datetime(
  raw: &str,
  tz: &Tz
) -> Option<NaiveDateTime> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }

  if let Ok(date) =
    NaiveDate::parse_from_str(
      raw, "%Y-%m-%d"
    )
  {
    return date.and_hms_opt(0, 0, 0);
  }

  if let Ok(dt) =
    DateTime::parse_from_rfc3339(raw)
  {
    return Some(
      dt.with_timezone(tz).naive_local()
    );
  }

  for fmt in [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M"
  ] {
    if let Ok(naive) =
      NaiveDateTime::parse_from_str(
        raw, fmt
      )
    {
      return tz
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.naive_local())
        .or(Some(naive));
    }
  }

  tracing::debug!(
    raw,
    "unrecognized date input"
  );
  None
}

/// `"2026-10-18"` → `"18/10/2026"`.
pub fn format_date(
  raw: &str,
  tz: &Tz
) -> Option<String> {
  parse_local_datetime(raw, tz).map(
    |dt| dt.format("%d/%m/%Y").to_string()
  )
}

/// `"2026-10-18T14:05:09"` →
/// `"18/10/2026, 14:05:09"`.
pub fn format_date_time(
  raw: &str,
  tz: &Tz
) -> Option<String> {
  parse_local_datetime(raw, tz).map(
    |dt| {
      dt.format("%d/%m/%Y, %H:%M:%S")
        .to_string()
    }
  )
}

#[must_use]
pub fn today_iso(
  today: NaiveDate
) -> String {
  today.format("%Y-%m-%d").to_string()
}

/// Whole days from `from` to `to`,
/// rounded up.
pub fn days_difference(
  from: &str,
  to: &str,
  tz: &Tz
) -> Option<i64> {
  let from =
    parse_local_datetime(from, tz)?;
  let to = parse_local_datetime(to, tz)?;
  let ms = (to - from).num_milliseconds();

  Some(if ms >= 0 {
    (ms + MS_PER_DAY - 1) / MS_PER_DAY
  } else {
    ms / MS_PER_DAY
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAO_PAULO: Tz =
    chrono_tz::America::Sao_Paulo;

  #[test]
  fn currency_uses_brazilian_separators()
  {
    assert_eq!(
      format_currency(1234.5),
      "R$\u{a0}1.234,50"
    );
    assert_eq!(
      format_currency(0.0),
      "R$\u{a0}0,00"
    );
    assert_eq!(
      format_currency(1_234_567.891),
      "R$\u{a0}1.234.567,89"
    );
  }

  #[test]
  fn negative_currency_puts_sign_before_symbol()
  {
    assert_eq!(
      format_currency(-300.25),
      "-R$\u{a0}300,25"
    );
    assert_eq!(
      format_currency(-0.001),
      "R$\u{a0}0,00"
    );
  }

  #[test]
  fn exact_halves_round_away_from_zero()
  {
    assert_eq!(
      format_currency(0.125),
      "R$\u{a0}0,13"
    );
    assert_eq!(
      format_currency(-2.675),
      "-R$\u{a0}2,67"
    );
    assert_eq!(
      format_currency(-0.125),
      "-R$\u{a0}0,13"
    );
    assert_eq!(format_number(0.0625), "0,063");
    assert_eq!(format_number(1.5), "1,5");
  }

  #[test]
  fn number_groups_thousands_and_trims_fraction()
  {
    assert_eq!(format_number(1000.0), "1.000");
    assert_eq!(format_number(999.0), "999");
    assert_eq!(
      format_number(1234.5678),
      "1.234,568"
    );
    assert_eq!(format_number(2.50), "2,5");
    assert_eq!(
      format_number(-1_000_000.0),
      "-1.000.000"
    );
  }

  #[test]
  fn plain_dates_are_not_shifted_by_timezone()
  {
    assert_eq!(
      format_date("2026-10-01", &SAO_PAULO)
        .as_deref(),
      Some("01/10/2026")
    );
  }

  #[test]
  fn rfc3339_dates_convert_into_configured_zone()
  {
    assert_eq!(
      format_date_time(
        "2026-03-01T02:30:00Z",
        &SAO_PAULO
      )
      .as_deref(),
      Some("28/02/2026, 23:30:00")
    );
  }

  #[test]
  fn naive_date_times_are_wall_clock() {
    assert_eq!(
      format_date_time(
        "2026-07-04T09:15:00",
        &SAO_PAULO
      )
      .as_deref(),
      Some("04/07/2026, 09:15:00")
    );
  }

  #[test]
  fn garbage_dates_are_rejected() {
    assert_eq!(
      format_date("not a date", &SAO_PAULO),
      None
    );
    assert_eq!(
      format_date("", &SAO_PAULO),
      None
    );
  }

  #[test]
  fn day_difference_rounds_up() {
    assert_eq!(
      days_difference(
        "2026-10-01",
        "2026-10-18",
        &SAO_PAULO
      ),
      Some(17)
    );
    assert_eq!(
      days_difference(
        "2026-10-01",
        "2026-10-01T06:00:00",
        &SAO_PAULO
      ),
      Some(1)
    );
    assert_eq!(
      days_difference(
        "2026-10-18",
        "2026-10-01",
        &SAO_PAULO
      ),
      Some(-17)
    );
  }

  #[test]
  fn today_iso_is_year_month_day() {
    let today =
      NaiveDate::from_ymd_opt(2026, 1, 9)
        .expect("valid date");
    assert_eq!(today_iso(today), "2026-01-09");
  }
}
