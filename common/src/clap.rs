use chrono::Duration;

use crate::Error;

/// Parse a duration from the command line, e.g. `90s`, `30m`, `1h` or `7d`.
///
/// Durations must be strictly positive since they are used for things like time-to-live values
/// where zero would produce something that has already expired.
pub fn parse_duration(s: &str) -> Result<Duration, Error> {
    let s = s.trim();

    let Some(unit) = s.chars().last() else {
        return Err(Error::InvalidDuration(s.to_owned()));
    };

    let amount = &s[..s.len() - unit.len_utf8()];

    let amount = amount
        .parse::<i64>()
        .map_err(|_| Error::InvalidDuration(s.to_owned()))?;

    if amount <= 0 {
        return Err(Error::NonPositiveDuration(s.to_owned()));
    }

    let duration = match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        _ => return Err(Error::InvalidDuration(s.to_owned())),
    };

    duration.ok_or_else(|| Error::DurationOutOfRange(s.to_owned()))
}
