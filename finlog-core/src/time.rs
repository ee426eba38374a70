//! Time utilities: the calendar date "today" in a given timezone.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Today's date in an IANA tz like "Europe/Moscow".
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    date_in(Utc::now(), tz)
}

/// Calendar date of the UTC instant `now` as seen in `tz`.
pub fn date_in(now: DateTime<Utc>, tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now.with_timezone(&tz).date_naive())
}
