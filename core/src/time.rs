use anyhow::{anyhow, Result};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Strict `YYYY-MM-DD` parsing. Dates carry no time or zone, so sorting and
/// comparisons never shift across midnight.
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }
    NaiveDate::parse_from_str(input, ISO_DATE_FORMAT)
        .map_err(|e| anyhow!("Could not parse date '{}': {}", input, e))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Resolves the shorthand accepted on the command line to a calendar date.
///
/// Accepts `today`/`tod`, `tomorrow`/`tom`, `eow` (coming Sunday), `eom`,
/// relative `+Nd`/`+Nw`/`+Nm`, weekdays (`fri` = next Friday, `2:fri` = the
/// one after) and plain ISO dates.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return add_days(today, 1),
        "eow" => {
            let days_to_sunday = (7 - today.weekday().num_days_from_sunday() as u64) % 7;
            return add_days(today, days_to_sunday);
        }
        "eom" => {
            let first = today.with_day(1).ok_or_else(|| anyhow!("Invalid date"))?;
            let next_month = first
                .checked_add_months(Months::new(1))
                .ok_or_else(|| anyhow!("Date out of range"))?;
            return next_month
                .checked_sub_days(Days::new(1))
                .ok_or_else(|| anyhow!("Date out of range"));
        }
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw, +Nm)
    if let Some(rest) = input.strip_prefix('+') {
        let (num_str, unit) = match rest.char_indices().last() {
            Some((i, _)) if i > 0 => rest.split_at(i),
            _ => return Err(anyhow!("Invalid relative format: {}", input)),
        };
        let count: u32 = num_str
            .parse()
            .map_err(|_| anyhow!("Invalid relative format: {}", input))?;

        return match unit {
            "d" => add_days(today, count as u64),
            "w" => add_days(today, count as u64 * 7),
            // chrono clamps to the last day of shorter months (Jan 31 + 1m -> Feb 28)
            "m" => today
                .checked_add_months(Months::new(count))
                .ok_or_else(|| anyhow!("Date out of range")),
            _ => Err(anyhow!("Unknown unit in relative time: {}", unit)),
        };
    }

    // 3. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target_weekday) = parse_weekday_str(day_str) {
            let mut days_needed = target_weekday.num_days_from_sunday() as u64 + 7
                - today.weekday().num_days_from_sunday() as u64;
            if days_needed > 7 {
                days_needed -= 7;
            }
            let days_needed = (count - 1)
                .checked_mul(7)
                .and_then(|weeks| weeks.checked_add(days_needed))
                .ok_or_else(|| anyhow!("Date out of range"))?;
            return add_days(today, days_needed);
        }
    }

    // 4. Fallback to ISO
    parse_iso_date(input)
}

/// Fails when the result falls outside chrono's calendar.
fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days)).ok_or_else(|| anyhow!("Date out of range"))
}

fn parse_weekday_token(input: &str) -> Option<(u64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => match count.parse::<u64>() {
            Ok(n) if n >= 1 => Some((n, day)),
            _ => None,
        },
        // Just "fri" means 1:fri
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
