use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub fn now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}

/// Renders a stored unix timestamp for the wire.
pub fn to_rfc3339(timestamp: i64) -> crate::Result<String> {
    let date = OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| crate::Error::Unknown(e.into()))?;

    date.format(&Rfc3339)
        .map_err(|e| crate::Error::Unknown(e.into()))
}
