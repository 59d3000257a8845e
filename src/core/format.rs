//! Duration formatting and parsing.

use std::time::Duration;

use crate::error::PomoError;

/// Format a duration as MM:SS.
///
/// Minutes are not wrapped into hours, so an hour and a bit renders as `61:01`.
#[must_use]
pub fn format_mmss(d: Duration) -> String {
    let total_seconds = d.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Parse a duration string like "25", "25m", "1h30m", "90s".
///
/// A bare number is taken as minutes. Zero and negative values are rejected.
///
/// # Errors
///
/// Returns `PomoError::Parse` if the string is malformed, and
/// `PomoError::Config` if it describes a non-positive duration.
pub fn parse_duration(s: &str) -> Result<Duration, PomoError> {
    let s = s.trim().to_lowercase();

    // Try parsing as just a number (assume minutes)
    if let Ok(minutes) = s.parse::<i64>() {
        return positive_seconds(minutes.saturating_mul(60), &s);
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
            continue;
        }

        if current_num.is_empty() {
            return Err(PomoError::Parse(format!("invalid duration '{s}'")));
        }

        let num: i64 = current_num
            .parse()
            .map_err(|_| PomoError::Parse(format!("invalid duration '{s}'")))?;
        current_num.clear();

        let unit = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err(PomoError::Parse(format!("unknown unit '{c}' in '{s}'"))),
        };
        total_seconds = total_seconds.saturating_add(num.saturating_mul(unit));
    }

    // Handle trailing number without unit (assume minutes)
    if !current_num.is_empty() {
        let num: i64 = current_num
            .parse()
            .map_err(|_| PomoError::Parse(format!("invalid duration '{s}'")))?;
        total_seconds = total_seconds.saturating_add(num.saturating_mul(60));
    }

    if s.is_empty() {
        return Err(PomoError::Parse("empty duration".to_string()));
    }

    positive_seconds(total_seconds, &s)
}

fn positive_seconds(seconds: i64, input: &str) -> Result<Duration, PomoError> {
    match u64::try_from(seconds) {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(PomoError::Config(format!(
            "duration must be positive, got '{input}'"
        ))),
    }
}
