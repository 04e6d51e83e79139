use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};

/// Current time, formatted the way rows store it.
pub(crate) fn now_stamp() -> String {
    format_stamp(Utc::now())
}

pub(crate) fn format_stamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_stamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("corrupt timestamp '{}'", raw))?;
    Ok(parsed.with_timezone(&Utc))
}
