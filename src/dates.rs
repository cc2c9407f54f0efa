// File: ./src/dates.rs
// Date input parsing for `date` properties.
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Parse a date input relative to the current instant.
///
/// Accepted forms: `yyyy-mm-dd` with an optional time part (space or `T`
/// separated), the partials `yyyy`, `yyyy-mm` and `mm-dd`, a bare time of
/// day (`hh:mm:ss` or `hh:mm`, meaning today), and signed offsets such as
/// `2w`, `-3d` or `1w2d12h`.
pub fn parse_date_input(raw: &str) -> Option<DateTime<Utc>> {
    parse_date_input_at(raw, Utc::now())
}

/// Same as [`parse_date_input`] with an explicit reference instant, so
/// partials and offsets are deterministic.
pub fn parse_date_input_at(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let val = raw.trim();
    if val.is_empty() {
        return None;
    }

    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(val, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(val, "%Y-%m-%d") {
        return midnight(date);
    }

    // Bare time of day means today.
    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(time) = NaiveTime::parse_from_str(val, fmt) {
            return Some(Utc.from_utc_datetime(&now.date_naive().and_time(time)));
        }
    }

    if let Some(offset) = parse_offset(val) {
        return now.checked_add_signed(offset);
    }

    parse_partial(val, now)
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

/// `yyyy`, `yyyy-mm` and `mm-dd` partials, filled in from the reference
/// instant.
fn parse_partial(val: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let parts: Vec<&str> = val.split('-').collect();
    match parts.as_slice() {
        [year] if year.len() == 4 => {
            let y: i32 = year.parse().ok()?;
            midnight(NaiveDate::from_ymd_opt(y, 1, 1)?)
        }
        [year, month] if year.len() == 4 => {
            let y: i32 = year.parse().ok()?;
            let m: u32 = month.parse().ok()?;
            midnight(NaiveDate::from_ymd_opt(y, m, 1)?)
        }
        [month, day] if month.len() <= 2 => {
            let m: u32 = month.parse().ok()?;
            let d: u32 = day.parse().ok()?;
            midnight(NaiveDate::from_ymd_opt(now.year(), m, d)?)
        }
        _ => None,
    }
}

/// A signed run of `<amount><unit>` pairs: `2w`, `-3d`, `1w2d12h`.
/// Units are seconds, minutes, hours, days, weeks and years.
fn parse_offset(val: &str) -> Option<Duration> {
    let (negative, rest) = match val.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, val.strip_prefix('+').unwrap_or(val)),
    };
    if rest.is_empty() {
        return None;
    }

    let mut total = Duration::zero();
    let mut digits = String::new();
    let mut pairs = 0;
    for c in rest.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if digits.is_empty() {
            return None;
        }
        let amount: i64 = digits.parse().ok()?;
        digits.clear();
        let step = match c.to_ascii_lowercase() {
            's' => Duration::try_seconds(amount)?,
            'm' => Duration::try_minutes(amount)?,
            'h' => Duration::try_hours(amount)?,
            'd' => Duration::try_days(amount)?,
            'w' => Duration::try_weeks(amount)?,
            'y' => Duration::try_days(amount.checked_mul(365)?)?,
            _ => return None,
        };
        total = total.checked_add(&step)?;
        pairs += 1;
    }
    // Trailing digits without a unit, or no pairs at all: not an offset.
    if pairs == 0 || !digits.is_empty() {
        return None;
    }
    Some(if negative { -total } else { total })
}
