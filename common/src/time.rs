use chrono::{DateTime, Utc};
use std::{
    env, fs,
    path::Path,
    time::{Duration, SystemTime},
};

pub const FAKETIME_TIMESTAMP_FILE_ENV: &str = "FAKETIME_TIMESTAMP_FILE";

fn read_fake_time(path: impl AsRef<Path>) -> anyhow::Result<DateTime<Utc>> {
    // Get the time that has elapsed since the fake time was set
    let file_modified = fs::metadata(&path)?.modified()?;
    let system_now = SystemTime::now();

    let duration_since_modified = system_now
        .duration_since(file_modified)
        .unwrap_or(Duration::from_secs(0));

    let duration = chrono::Duration::from_std(duration_since_modified)?;

    let time = fs::read_to_string(&path)?;
    let time = DateTime::parse_from_rfc3339(time.trim())?;

    Ok((time + duration).with_timezone(&Utc))
}

/// The current time.
///
/// Token expiry is computed from this, so in debug builds it can be moved around for testing
/// against a real cluster: if `FAKETIME_TIMESTAMP_FILE` points at a file containing an RFC3339
/// timestamp then the time is read from that file, plus however long it has been since the file
/// was last written. Writing a new timestamp to the file moves the clock again.
#[cfg(debug_assertions)]
pub fn now() -> DateTime<Utc> {
    if let Ok(path) = env::var(FAKETIME_TIMESTAMP_FILE_ENV) {
        match read_fake_time(&path) {
            Ok(time) => return time,
            Err(err) => {
                tracing::warn!(
                    "Failed to read fake time from {}, using system clock: {}",
                    path,
                    err
                );
            }
        }
    }

    Utc::now()
}

#[cfg(not(debug_assertions))]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn reads_time_from_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "2024-01-01T00:00:00Z")?;

        let time = read_fake_time(file.path())?;

        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(time >= expected);
        // Only the time since the file was written is added
        assert!(time - expected < chrono::Duration::minutes(1));

        Ok(())
    }

    #[test]
    fn offsets_are_converted_to_utc() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "2024-01-01T02:00:00+02:00")?;

        let time = read_fake_time(file.path())?;

        assert!(time >= Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(time < Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap());

        Ok(())
    }

    #[test]
    fn garbage_file_is_an_error() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "yesterday")?;

        assert!(read_fake_time(file.path()).is_err());

        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_fake_time("/this/path/does/not/exist").is_err());
    }
}
