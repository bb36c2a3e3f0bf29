use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How precisely the client pinned their launch date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchDatePrecision {
    /// Full calendar date given.
    ExactDay,
    /// Month only, or an early/mid/late part of a month.
    ApproximateMonth,
    /// "ASAP" and friends; resolves to the intake date.
    Asap,
    /// Quarter; year completed from the intake date when omitted.
    Quarter,
    /// Explicitly undecided ("flexible", "TBD").
    Negotiable,
    /// Free text we could not interpret.
    Unknown,
}

/// Normalized client launch date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLaunchDate {
    pub date: Option<NaiveDate>,
    pub precision: LaunchDatePrecision,
    pub interpretation_note: Option<String>,
}

lazy_static! {
    static ref EXACT_DATE_RE: Regex = Regex::new(r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})").unwrap();
    static ref ASAP_RE: Regex =
        Regex::new(r"(?i)\b(asap|immediately|right away|as soon as possible)\b").unwrap();
    static ref QUARTER_RE: Regex =
        Regex::new(r"(?i)(?:(\d{4})\s*[-/ ]?\s*)?\bq([1-4])\b(?:\s*[-/ ,]?\s*(\d{4}))?").unwrap();
    static ref MONTH_RE: Regex = Regex::new(
        r"(?i)\b(?:(early|mid|late)[\s-]+)?(january|february|march|april|may|june|july|august|september|october|november|december)\b(?:\s*,?\s*(\d{4}))?"
    )
    .unwrap();
    static ref NEGOTIABLE_RE: Regex =
        Regex::new(r"(?i)\b(flexible|negotiable|tbd|to be decided|undecided|not sure)\b").unwrap();
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Normalize free-text launch-date input against the intake date.
///
/// - "ASAP" / "immediately": the intake date itself
/// - `YYYY-MM-DD` / `YYYY/MM/DD`: that exact day
/// - "Q3" / "2027 Q1" / "Q2 2027": first day of the quarter; a missing year is
///   completed from the intake date, rolling into next year for past quarters
/// - "September" / "late September 2026": day 1, or 5/15/25 for
///   early/mid/late; past months without a year roll into next year
/// - "flexible" / "TBD": negotiable, no date
/// - anything else: Unknown, no date (empty input yields None)
pub fn normalize_launch_date(
    raw: &str,
    base_intake_at: DateTime<Utc>,
) -> Option<NormalizedLaunchDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let base_date = base_intake_at.date_naive();

    if ASAP_RE.is_match(trimmed) {
        return Some(NormalizedLaunchDate {
            date: Some(base_date),
            precision: LaunchDatePrecision::Asap,
            interpretation_note: None,
        });
    }

    if let Some(caps) = EXACT_DATE_RE.captures(trimmed) {
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let month: u32 = caps.get(2)?.as_str().parse().ok()?;
        let day: u32 = caps.get(3)?.as_str().parse().ok()?;
        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        return Some(NormalizedLaunchDate {
            date: Some(date),
            precision: LaunchDatePrecision::ExactDay,
            interpretation_note: None,
        });
    }

    if let Some(caps) = QUARTER_RE.captures(trimmed) {
        let explicit_year = caps
            .get(1)
            .or_else(|| caps.get(3))
            .and_then(|m| m.as_str().parse::<i32>().ok());
        let quarter: u32 = caps.get(2)?.as_str().parse().ok()?;
        let month = match quarter {
            1 => 1,
            2 => 4,
            3 => 7,
            4 => 10,
            _ => return None,
        };

        let mut year = explicit_year.unwrap_or(base_date.year());
        // A bare quarter that already ended this year means next year.
        if explicit_year.is_none() && month + 2 < base_date.month() {
            year += 1;
        }

        let date = NaiveDate::from_ymd_opt(year, month, 1)?;
        let interpretation_note = explicit_year
            .is_none()
            .then(|| format!("year assumed from intake date {}", base_date));

        return Some(NormalizedLaunchDate {
            date: Some(date),
            precision: LaunchDatePrecision::Quarter,
            interpretation_note,
        });
    }

    if let Some(caps) = MONTH_RE.captures(trimmed) {
        let day = match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(part) if part == "early" => 5,
            Some(part) if part == "mid" => 15,
            Some(part) if part == "late" => 25,
            _ => 1,
        };
        let month = month_number(caps.get(2)?.as_str())?;
        let explicit_year = caps.get(3).and_then(|m| m.as_str().parse::<i32>().ok());

        let mut year = explicit_year.unwrap_or(base_date.year());
        if explicit_year.is_none() && month < base_date.month() {
            year += 1;
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        return Some(NormalizedLaunchDate {
            date: Some(date),
            precision: LaunchDatePrecision::ApproximateMonth,
            interpretation_note: None,
        });
    }

    if NEGOTIABLE_RE.is_match(trimmed) {
        return Some(NormalizedLaunchDate {
            date: None,
            precision: LaunchDatePrecision::Negotiable,
            interpretation_note: Some("launch date negotiable/unspecified".into()),
        });
    }

    Some(NormalizedLaunchDate {
        date: None,
        precision: LaunchDatePrecision::Unknown,
        interpretation_note: Some("could not normalize launch date".into()),
    })
}
