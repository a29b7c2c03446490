use time::{Date, OffsetDateTime, format_description::well_known::Iso8601};

/// Calendar days are stored as the unix timestamp of their UTC midnight.
pub fn date_to_timestamp(date: Date) -> u64 {
    date.midnight().assume_utc().unix_timestamp() as u64
}

pub fn timestamp_to_date(timestamp: u64) -> crate::Result<Date> {
    Ok(OffsetDateTime::from_unix_timestamp(timestamp as i64)?.date())
}

pub fn now() -> u64 {
    OffsetDateTime::now_utc().unix_timestamp() as u64
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> crate::Result<Date> {
    Date::parse(value.trim(), &Iso8601::DATE)
        .map_err(|e| crate::Error::Server(format!("invalid date '{value}': {e}")))
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}
