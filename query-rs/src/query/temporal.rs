//! Temporal resolution
//!
//! Extracts a start/end date window from an utterance. Resolution is a
//! layered pipeline evaluated in strict order, first stage to produce a
//! result wins:
//!
//! 1. Named-range registry ("last week", "past 3 months", "2 days ago", ...)
//! 2. Compound "between X and Y" / "from X to Y"
//! 3. Literal/relative date scan with disambiguation
//!
//! Every output satisfies `start <= end` whenever both bounds are set.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use regex::{Captures, Regex};
use tracing::trace;

use crate::error::Result;

use super::types::{DateRange, DateRefKind, DateReference};

/// Generator for one named-range registry entry
type RangeHandler = fn(&Captures, DateTime<Utc>) -> Option<DateRange>;

/// Ordered named-range registry, evaluated first-match-wins.
///
/// Keep multi-word entries ("last few weeks") ahead of their parametric
/// cousins so the more specific phrasing wins.
const NAMED_RANGES: &[(&str, RangeHandler)] = &[
    (r"\blast\s+week\b", range_last_week),
    (r"\bthis\s+week\b", range_this_week),
    (r"\blast\s+month\b", range_last_month),
    (r"\bthis\s+month\b", range_this_month),
    (r"\blast\s+year\b", range_last_year),
    (r"\bthis\s+year\b", range_this_year),
    (r"\blast\s+quarter\b", range_last_quarter),
    (r"\blast\s+few\s+weeks\b", range_few_weeks),
    (r"\blast\s+few\s+months\b", range_few_months),
    (r"\b(?:last|past|previous)\s+(\d+)\s+days?\b", range_n_days),
    (r"\b(?:last|past|previous)\s+(\d+)\s+weeks?\b", range_n_weeks),
    (r"\b(?:last|past|previous)\s+(\d+)\s+months?\b", range_n_months),
    (r"\b(?:last|past|previous)\s+(\d+)\s+years?\b", range_n_years),
    (r"\brecent(?:ly)?\b", range_recent),
    (r"\b(\d+)\s+days?\s+ago\b", range_days_ago),
    (r"\b(\d+)\s+weeks?\s+ago\b", range_weeks_ago),
    (r"\b(\d+)\s+months?\s+ago\b", range_months_ago),
    (r"\btoday\b", range_today),
    (r"\byesterday\b", range_yesterday),
    (
        r"\b(sunday|monday|tuesday|wednesday|thursday|friday|saturday)\b",
        range_weekday,
    ),
];

const MONTH_NAMES: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

/// Temporal resolver
pub struct TemporalResolver {
    named: Vec<(Regex, RangeHandler)>,
    compound_re: Regex,
    iso_re: Regex,
    us_long_re: Regex,
    us_short_re: Regex,
    month_re: Regex,
    rel_day_re: Regex,
    rel_period_re: Regex,
    rel_ago_re: Regex,
    end_dir_re: Regex,
    start_dir_re: Regex,
}

impl TemporalResolver {
    pub fn new() -> Result<Self> {
        let mut named = Vec::with_capacity(NAMED_RANGES.len());
        for (pattern, handler) in NAMED_RANGES {
            named.push((Regex::new(pattern)?, *handler));
        }

        Ok(Self {
            named,
            compound_re: Regex::new(r"\b(?:between|from)\s+(.+?)\s+(?:and|to)\s+(.+)")?,
            iso_re: Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b")?,
            us_long_re: Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4})\b")?,
            us_short_re: Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{2})\b")?,
            month_re: Regex::new(&format!(
                r"\b({MONTH_NAMES})\b\.?(?:\s+(\d{{1,2}})(?:st|nd|rd|th)?\b)?(?:,?\s+(\d{{4}})\b)?"
            ))?,
            rel_day_re: Regex::new(r"\b(today|yesterday)\b")?,
            rel_period_re: Regex::new(r"\b(?:last|this)\s+(?:week|month|year)\b")?,
            rel_ago_re: Regex::new(r"\b(\d+)\s+(day|week|month)s?\s+ago\b")?,
            end_dir_re: Regex::new(
                r"\b(?:before|until|up\s+to|earlier\s+than|prior\s+to)\s*$",
            )?,
            start_dir_re: Regex::new(
                r"\b(?:after|since|from|later\s+than|newer\s+than)\s*$",
            )?,
        })
    }

    /// Resolve the date window an utterance refers to, if any.
    pub fn resolve(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        if let Some(range) = self.resolve_named(text, now) {
            trace!(?range, "resolved named range");
            return Some(range);
        }
        if let Some(range) = self.resolve_compound(text, now) {
            trace!(?range, "resolved compound range");
            return Some(range);
        }
        self.resolve_scan(text, now)
    }

    /// Stage 1: named-range registry, first match wins
    fn resolve_named(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        for (pattern, handler) in &self.named {
            if let Some(caps) = pattern.captures(text) {
                if let Some(range) = handler(&caps, now) {
                    return Some(range);
                }
            }
        }
        None
    }

    /// Stage 2: "between X and Y" / "from X to Y".
    ///
    /// Each side is re-scanned with the literal date patterns only. If
    /// either side yields nothing the whole compound is abandoned.
    fn resolve_compound(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        let caps = self.compound_re.captures(text)?;
        let first = self.earliest_literal(caps.get(1)?.as_str(), now)?;
        let second = self.earliest_literal(caps.get(2)?.as_str(), now)?;

        let start = ref_start(&first);
        let end = ref_end(&second)?;
        if start <= end {
            Some(DateRange::closed(start, end))
        } else {
            // reversed compound input, keep the bounds ordered
            Some(DateRange::closed(ref_start(&second), ref_end(&first)?))
        }
    }

    /// Stage 3: collect every literal and relative date mention, then
    /// disambiguate.
    fn resolve_scan(&self, text: &str, now: DateTime<Utc>) -> Option<DateRange> {
        let mut refs = self.scan_literal(text, now);
        refs.extend(self.scan_relative(text, now));

        match refs.len() {
            0 => None,
            1 => self.resolve_single(text, &refs[0]),
            _ => {
                refs.sort_by_key(|r| r.instant);
                let earliest = refs.first()?;
                let latest = refs.last()?;
                Some(DateRange::closed(ref_start(earliest), ref_end(latest)?))
            }
        }
    }

    /// Disambiguate exactly one date mention using the direction keyword
    /// immediately preceding it, if any.
    fn resolve_single(&self, text: &str, r: &DateReference) -> Option<DateRange> {
        let prefix = &text[..r.offset.min(text.len())];
        if self.end_dir_re.is_match(prefix) {
            return Some(DateRange::ending(ref_end(r)?));
        }
        if self.start_dir_re.is_match(prefix) {
            return Some(DateRange::starting(ref_start(r)));
        }
        match r.kind {
            DateRefKind::Relative => Some(DateRange::starting(ref_start(r))),
            // month-only expands to the full month, a specific day to
            // exactly that day
            _ => Some(DateRange::closed(ref_start(r), ref_end(r)?)),
        }
    }

    /// Scan for absolute numeric dates and month-name references.
    ///
    /// Matches are collected left to right per pattern; a mention whose
    /// span overlaps an already-collected one is dropped.
    fn scan_literal(&self, text: &str, now: DateTime<Utc>) -> Vec<DateReference> {
        let mut refs: Vec<DateReference> = Vec::new();
        let mut spans: Vec<(usize, usize)> = Vec::new();

        let push = |refs: &mut Vec<DateReference>,
                    spans: &mut Vec<(usize, usize)>,
                    span: (usize, usize),
                    r: Option<DateReference>| {
            if let Some(r) = r {
                if !spans.iter().any(|s| span.0 < s.1 && s.0 < span.1) {
                    spans.push(span);
                    refs.push(r);
                }
            }
        };

        for caps in self.iso_re.captures_iter(text) {
            let m = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let r = numeric_date_ref(&caps, 1, 2, 3, m);
            push(&mut refs, &mut spans, (m.start(), m.end()), r);
        }

        for caps in self.us_long_re.captures_iter(text) {
            let m = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let r = numeric_date_ref(&caps, 3, 1, 2, m);
            push(&mut refs, &mut spans, (m.start(), m.end()), r);
        }

        for caps in self.us_short_re.captures_iter(text) {
            let m = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            // two-digit years are read as 2000+yy
            let r = caps
                .get(3)
                .and_then(|y| y.as_str().parse::<i32>().ok())
                .and_then(|y| {
                    let month = caps.get(1)?.as_str().parse::<u32>().ok()?;
                    let day = caps.get(2)?.as_str().parse::<u32>().ok()?;
                    let date = NaiveDate::from_ymd_opt(2000 + y, month, day)?;
                    day_ref(date, m.as_str(), m.start())
                });
            push(&mut refs, &mut spans, (m.start(), m.end()), r);
        }

        for caps in self.month_re.captures_iter(text) {
            let m = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let r = self.month_ref(&caps, m, now);
            push(&mut refs, &mut spans, (m.start(), m.end()), r);
        }

        refs
    }

    /// Build a reference from one month-name capture: optional day,
    /// optional year (defaults to the year of `now`).
    fn month_ref(
        &self,
        caps: &Captures,
        m: regex::Match<'_>,
        now: DateTime<Utc>,
    ) -> Option<DateReference> {
        let month = month_number(caps.get(1)?.as_str())?;
        let day = caps.get(2).and_then(|d| d.as_str().parse::<u32>().ok());
        let year = caps
            .get(3)
            .and_then(|y| y.as_str().parse::<i32>().ok())
            .unwrap_or_else(|| now.year());

        match day {
            Some(day) => {
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                day_ref(date, m.as_str(), m.start())
            }
            None => {
                let date = month_start(year, month)?;
                Some(DateReference {
                    instant: day_start(date)?,
                    matched: m.as_str().to_string(),
                    offset: m.start(),
                    kind: DateRefKind::Month,
                    is_month_only: true,
                })
            }
        }
    }

    /// Scan for single relative anchors ("yesterday", "last month",
    /// "2 weeks ago"). Anchored at the start of the period they name.
    fn scan_relative(&self, text: &str, now: DateTime<Utc>) -> Vec<DateReference> {
        let today = now.date_naive();
        let mut refs = Vec::new();

        for m in self.rel_day_re.find_iter(text) {
            let date = match m.as_str() {
                "yesterday" => today.checked_sub_days(Days::new(1)),
                _ => Some(today),
            };
            if let Some(r) = date.and_then(|d| relative_ref(d, m.as_str(), m.start())) {
                refs.push(r);
            }
        }

        for m in self.rel_period_re.find_iter(text) {
            let range = self.resolve_named(m.as_str(), now);
            let start = range.and_then(|r| r.start);
            if let Some(start) = start {
                if let Some(r) = relative_ref(start.date_naive(), m.as_str(), m.start()) {
                    refs.push(r);
                }
            }
        }

        for caps in self.rel_ago_re.captures_iter(text) {
            let m = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let n = match caps.get(1).and_then(|n| n.as_str().parse::<u64>().ok()) {
                Some(n) => n,
                None => continue,
            };
            let unit = caps.get(2).map(|u| u.as_str()).unwrap_or("day");
            let date = match unit {
                "week" => n
                    .checked_mul(7)
                    .and_then(|d| today.checked_sub_days(Days::new(d)))
                    .and_then(week_start),
                "month" => u32::try_from(n)
                    .ok()
                    .and_then(|n| today.checked_sub_months(Months::new(n)))
                    .and_then(|d| month_start(d.year(), d.month())),
                _ => today.checked_sub_days(Days::new(n)),
            };
            if let Some(r) = date.and_then(|d| relative_ref(d, m.as_str(), m.start())) {
                refs.push(r);
            }
        }

        refs
    }

    /// First literal reference (by position) inside one compound side
    fn earliest_literal(&self, side: &str, now: DateTime<Utc>) -> Option<DateReference> {
        self.scan_literal(side, now)
            .into_iter()
            .min_by_key(|r| r.offset)
    }
}

// ---------------------------------------------------------------------------
// Calendar helpers
// ---------------------------------------------------------------------------

fn day_start(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_milli_opt(0, 0, 0, 0)?.and_utc())
}

fn day_end(date: NaiveDate) -> Option<DateTime<Utc>> {
    Some(date.and_hms_milli_opt(23, 59, 59, 999)?.and_utc())
}

fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next?.checked_sub_days(Days::new(1))
}

/// Sunday on or before the given date
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    let dow = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(dow))
}

fn single_day(date: NaiveDate) -> Option<DateRange> {
    Some(DateRange::closed(day_start(date)?, day_end(date)?))
}

fn month_range(year: i32, month: u32) -> Option<DateRange> {
    Some(DateRange::closed(
        day_start(month_start(year, month)?)?,
        day_end(month_end(year, month)?)?,
    ))
}

/// `start-of(today - n) ..= end-of(today)`
fn trailing_days(now: DateTime<Utc>, n: u64) -> Option<DateRange> {
    let today = now.date_naive();
    let start = today.checked_sub_days(Days::new(n))?;
    Some(DateRange::closed(day_start(start)?, day_end(today)?))
}

fn month_number(name: &str) -> Option<u32> {
    let key = if name.starts_with("sep") { "sep" } else { name.get(..3)? };
    match key {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "sunday" => Some(Weekday::Sun),
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// DateReference constructors and expansion
// ---------------------------------------------------------------------------

fn day_ref(date: NaiveDate, matched: &str, offset: usize) -> Option<DateReference> {
    Some(DateReference {
        instant: day_start(date)?,
        matched: matched.to_string(),
        offset,
        kind: DateRefKind::Specific,
        is_month_only: false,
    })
}

fn relative_ref(date: NaiveDate, matched: &str, offset: usize) -> Option<DateReference> {
    Some(DateReference {
        instant: day_start(date)?,
        matched: matched.to_string(),
        offset,
        kind: DateRefKind::Relative,
        is_month_only: false,
    })
}

fn numeric_date_ref(
    caps: &Captures,
    year_group: usize,
    month_group: usize,
    day_group: usize,
    m: regex::Match<'_>,
) -> Option<DateReference> {
    let year = caps.get(year_group)?.as_str().parse::<i32>().ok()?;
    let month = caps.get(month_group)?.as_str().parse::<u32>().ok()?;
    let day = caps.get(day_group)?.as_str().parse::<u32>().ok()?;
    day_ref(NaiveDate::from_ymd_opt(year, month, day)?, m.as_str(), m.start())
}

/// Start bound of a reference: first of the month for month-only
/// mentions, start of day otherwise. References are already anchored
/// there, so this is the stored instant.
fn ref_start(r: &DateReference) -> DateTime<Utc> {
    r.instant
}

/// End bound of a reference: end of the month for month-only mentions,
/// end of day otherwise.
fn ref_end(r: &DateReference) -> Option<DateTime<Utc>> {
    let date = r.instant.date_naive();
    if r.is_month_only {
        day_end(month_end(date.year(), date.month())?)
    } else {
        day_end(date)
    }
}

// ---------------------------------------------------------------------------
// Named-range generators
// ---------------------------------------------------------------------------

fn range_last_week(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let start = week_start(now.date_naive())?.checked_sub_days(Days::new(7))?;
    let end = start.checked_add_days(Days::new(6))?;
    Some(DateRange::closed(day_start(start)?, day_end(end)?))
}

fn range_this_week(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let today = now.date_naive();
    Some(DateRange::closed(day_start(week_start(today)?)?, day_end(today)?))
}

fn range_last_month(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let (year, month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    month_range(year, month)
}

fn range_this_month(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let today = now.date_naive();
    Some(DateRange::closed(
        day_start(month_start(today.year(), today.month())?)?,
        day_end(today)?,
    ))
}

fn range_last_year(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let year = now.year() - 1;
    Some(DateRange::closed(
        day_start(NaiveDate::from_ymd_opt(year, 1, 1)?)?,
        day_end(NaiveDate::from_ymd_opt(year, 12, 31)?)?,
    ))
}

fn range_this_year(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let today = now.date_naive();
    Some(DateRange::closed(
        day_start(NaiveDate::from_ymd_opt(today.year(), 1, 1)?)?,
        day_end(today)?,
    ))
}

fn range_last_quarter(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let quarter = (now.month() - 1) / 3;
    let (year, first_month) = if quarter == 0 {
        (now.year() - 1, 10)
    } else {
        (now.year(), (quarter - 1) * 3 + 1)
    };
    Some(DateRange::closed(
        day_start(month_start(year, first_month)?)?,
        day_end(month_end(year, first_month + 2)?)?,
    ))
}

fn range_few_weeks(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    trailing_days(now, 21)
}

fn range_few_months(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    trailing_days(now, 90)
}

fn range_recent(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    trailing_days(now, 7)
}

fn captured_number(caps: &Captures) -> Option<u64> {
    caps.get(1)?.as_str().parse::<u64>().ok()
}

fn range_n_days(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    trailing_days(now, captured_number(caps)?)
}

fn range_n_weeks(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    trailing_days(now, captured_number(caps)?.checked_mul(7)?)
}

fn range_n_months(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let n = u32::try_from(captured_number(caps)?).ok()?;
    let today = now.date_naive();
    let start = today.checked_sub_months(Months::new(n))?;
    Some(DateRange::closed(day_start(start)?, day_end(today)?))
}

fn range_n_years(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let n = u32::try_from(captured_number(caps)?)
        .ok()?
        .checked_mul(12)?;
    let today = now.date_naive();
    let start = today.checked_sub_months(Months::new(n))?;
    Some(DateRange::closed(day_start(start)?, day_end(today)?))
}

/// "N days ago" is the single calendar day at `now - N days`, not a
/// window ending now.
fn range_days_ago(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let date = now
        .date_naive()
        .checked_sub_days(Days::new(captured_number(caps)?))?;
    single_day(date)
}

/// "N weeks ago" is the calendar week (Sun..Sat) containing
/// `now - N weeks`
fn range_weeks_ago(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let days = captured_number(caps)?.checked_mul(7)?;
    let target = now.date_naive().checked_sub_days(Days::new(days))?;
    let start = week_start(target)?;
    let end = start.checked_add_days(Days::new(6))?;
    Some(DateRange::closed(day_start(start)?, day_end(end)?))
}

/// "N months ago" is the calendar month containing `now - N months`
fn range_months_ago(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let n = u32::try_from(captured_number(caps)?).ok()?;
    let target = now.date_naive().checked_sub_months(Months::new(n))?;
    month_range(target.year(), target.month())
}

fn range_today(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    single_day(now.date_naive())
}

fn range_yesterday(_caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    single_day(now.date_naive().checked_sub_days(Days::new(1))?)
}

/// Bare weekday names resolve to the most recent strictly-past
/// occurrence, as a full single day.
fn range_weekday(caps: &Captures, now: DateTime<Utc>) -> Option<DateRange> {
    let target = parse_weekday(caps.get(1)?.as_str())?;
    let today = now.date_naive();
    let delta = (today.weekday().num_days_from_sunday() + 7
        - target.num_days_from_sunday())
        % 7;
    let delta = if delta == 0 { 7 } else { u64::from(delta) };
    single_day(today.checked_sub_days(Days::new(delta))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn resolver() -> TemporalResolver {
        TemporalResolver::new().unwrap()
    }

    /// Friday, 2024-03-15 12:00 UTC
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn ymd_start(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        day_start(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    fn ymd_end(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        day_end(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn test_last_week_is_previous_sunday_to_saturday() {
        let range = resolver().resolve("emails from last week", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 3)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 9)));
    }

    #[test]
    fn test_this_week_runs_through_today() {
        let range = resolver().resolve("this week", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 10)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 15)));
    }

    #[test]
    fn test_last_month_handles_leap_february() {
        let range = resolver().resolve("emails received last month", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 2, 1)));
        assert_eq!(range.end, Some(ymd_end(2024, 2, 29)));
    }

    #[test]
    fn test_last_month_in_january_wraps_year() {
        let january = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let range = resolver().resolve("last month", january).unwrap();
        assert_eq!(range.start, Some(ymd_start(2023, 12, 1)));
        assert_eq!(range.end, Some(ymd_end(2023, 12, 31)));
    }

    #[test]
    fn test_last_quarter_from_q1() {
        let range = resolver().resolve("last quarter", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2023, 10, 1)));
        assert_eq!(range.end, Some(ymd_end(2023, 12, 31)));
    }

    #[test]
    fn test_last_year_and_this_year() {
        let r = resolver();
        let last = r.resolve("last year", now()).unwrap();
        assert_eq!(last.start, Some(ymd_start(2023, 1, 1)));
        assert_eq!(last.end, Some(ymd_end(2023, 12, 31)));

        let this = r.resolve("this year", now()).unwrap();
        assert_eq!(this.start, Some(ymd_start(2024, 1, 1)));
        assert_eq!(this.end, Some(ymd_end(2024, 3, 15)));
    }

    #[test]
    fn test_parametric_last_n_days() {
        let range = resolver().resolve("emails from the past 5 days", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 10)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 15)));
    }

    #[test]
    fn test_parametric_last_n_weeks_and_months() {
        let r = resolver();
        let weeks = r.resolve("last 2 weeks", now()).unwrap();
        assert_eq!(weeks.start, Some(ymd_start(2024, 3, 1)));
        assert_eq!(weeks.end, Some(ymd_end(2024, 3, 15)));

        let months = r.resolve("previous 3 months", now()).unwrap();
        assert_eq!(months.start, Some(ymd_start(2023, 12, 15)));
        assert_eq!(months.end, Some(ymd_end(2024, 3, 15)));
    }

    #[test]
    fn test_recent_defaults_to_seven_days() {
        let range = resolver().resolve("recent emails", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 8)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 15)));
    }

    #[test]
    fn test_last_few_weeks_and_months() {
        let r = resolver();
        let weeks = r.resolve("last few weeks", now()).unwrap();
        assert_eq!(weeks.start, Some(ymd_start(2024, 2, 23)));

        let months = r.resolve("last few months", now()).unwrap();
        assert_eq!(months.start, Some(ymd_start(2023, 12, 16)));
    }

    #[test]
    fn test_days_ago_is_a_single_day() {
        let range = resolver().resolve("3 days ago", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 12)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 12)));
    }

    #[test]
    fn test_weeks_ago_is_the_containing_calendar_week() {
        // 2 weeks before Fri 2024-03-15 is Fri 2024-03-01, whose week
        // is Sun 2024-02-25 .. Sat 2024-03-02
        let range = resolver().resolve("2 weeks ago", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 2, 25)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 2)));
    }

    #[test]
    fn test_months_ago_is_the_containing_calendar_month() {
        let range = resolver().resolve("2 months ago", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 1, 1)));
        assert_eq!(range.end, Some(ymd_end(2024, 1, 31)));
    }

    #[test]
    fn test_today_and_yesterday() {
        let r = resolver();
        let today = r.resolve("emails received today", now()).unwrap();
        assert_eq!(today.start, Some(ymd_start(2024, 3, 15)));
        assert_eq!(today.end, Some(ymd_end(2024, 3, 15)));

        let yesterday = r.resolve("yesterday", now()).unwrap();
        assert_eq!(yesterday.start, Some(ymd_start(2024, 3, 14)));
        assert_eq!(yesterday.end, Some(ymd_end(2024, 3, 14)));
    }

    #[test]
    fn test_weekday_is_most_recent_past_occurrence() {
        let r = resolver();
        let monday = r.resolve("emails from monday", now()).unwrap();
        assert_eq!(monday.start, Some(ymd_start(2024, 3, 11)));

        // today is a Friday, so "friday" means a week back
        let friday = r.resolve("friday", now()).unwrap();
        assert_eq!(friday.start, Some(ymd_start(2024, 3, 8)));
    }

    #[test]
    fn test_compound_between_month_days() {
        let range = resolver()
            .resolve("received between january 1 and january 31", now())
            .unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 1, 1)));
        assert_eq!(range.end, Some(ymd_end(2024, 1, 31)));
    }

    #[test]
    fn test_compound_from_month_to_month() {
        let range = resolver().resolve("from january to march", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 1, 1)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 31)));
    }

    #[test]
    fn test_compound_reversed_is_reordered() {
        let range = resolver().resolve("between march and january", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 1, 1)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 31)));
    }

    #[test]
    fn test_compound_with_undated_side_falls_through() {
        // "from sarah to bob" has no date on either side
        assert!(resolver().resolve("emails from sarah to bob", now()).is_none());
    }

    #[test]
    fn test_single_month_expands_to_full_month() {
        let range = resolver().resolve("received in march", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 1)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 31)));
    }

    #[test]
    fn test_single_specific_day_expands_to_that_day() {
        let range = resolver().resolve("emails on january 5", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 1, 5)));
        assert_eq!(range.end, Some(ymd_end(2024, 1, 5)));
    }

    #[test]
    fn test_month_with_day_and_year() {
        let range = resolver().resolve("january 5, 2023", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2023, 1, 5)));
        assert_eq!(range.end, Some(ymd_end(2023, 1, 5)));
    }

    #[test]
    fn test_iso_and_us_dates() {
        let r = resolver();
        let iso = r.resolve("on 2024-01-05", now()).unwrap();
        assert_eq!(iso.start, Some(ymd_start(2024, 1, 5)));

        let us = r.resolve("on 01/05/2024", now()).unwrap();
        assert_eq!(us.start, Some(ymd_start(2024, 1, 5)));

        let short = r.resolve("on 01/05/24", now()).unwrap();
        assert_eq!(short.start, Some(ymd_start(2024, 1, 5)));
    }

    #[test]
    fn test_directional_before_gives_end_only() {
        let range = resolver().resolve("emails before 03/10/2024", now()).unwrap();
        assert!(range.start.is_none());
        assert_eq!(range.end, Some(ymd_end(2024, 3, 10)));
    }

    #[test]
    fn test_directional_until_month_ends_at_month_end() {
        let range = resolver().resolve("until march", now()).unwrap();
        assert!(range.start.is_none());
        assert_eq!(range.end, Some(ymd_end(2024, 3, 31)));
    }

    #[test]
    fn test_directional_since_gives_start_only() {
        let range = resolver().resolve("since 2024-03-10", now()).unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 10)));
        assert!(range.end.is_none());
    }

    #[test]
    fn test_sender_from_does_not_bind_a_distant_date() {
        // "from" two clauses earlier must not turn the month into a
        // start-only bound
        let range = resolver()
            .resolve("emails from sarah received in march", now())
            .unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 3, 1)));
        assert_eq!(range.end, Some(ymd_end(2024, 3, 31)));
    }

    #[test]
    fn test_two_references_sort_chronologically() {
        let range = resolver()
            .resolve("emails 2024-01-10 or 2024-01-05", now())
            .unwrap();
        assert_eq!(range.start, Some(ymd_start(2024, 1, 5)));
        assert_eq!(range.end, Some(ymd_end(2024, 1, 10)));
    }

    #[test]
    fn test_no_temporal_content() {
        assert!(resolver().resolve("emails about budget", now()).is_none());
        assert!(resolver().resolve("", now()).is_none());
    }

    #[test]
    fn test_invalid_dates_are_absorbed() {
        // 45th day does not parse; no half-built range escapes
        assert!(resolver().resolve("on 13/45/2024", now()).is_none());
    }

    #[test]
    fn test_start_never_exceeds_end() {
        let r = resolver();
        for text in [
            "last week",
            "this month",
            "3 days ago",
            "between march and january",
            "from 2024-02-01 to 2024-01-01",
            "emails 01/05/2024 and 2023-12-25",
            "in march",
        ] {
            if let Some(range) = r.resolve(text, now()) {
                if let (Some(start), Some(end)) = (range.start, range.end) {
                    assert!(start <= end, "reversed range for {text:?}");
                }
            }
        }
    }
}
