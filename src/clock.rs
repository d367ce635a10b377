use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt::Write;
use tracing::warn;

use crate::storage::{DEFAULT_TIMEZONE, DEFAULT_TIME_FORMAT};

/// Footer clock with a strftime pattern and time zone checked once up front.
#[derive(Debug, Clone)]
pub struct Clock {
    format: String,
    timezone: Tz,
}

impl Clock {
    pub fn new(format: &str, timezone: &str) -> Self {
        let timezone = parse_timezone(timezone).unwrap_or_else(|| {
            warn!("Unknown timezone {:?}, using {}", timezone, DEFAULT_TIMEZONE);
            default_timezone()
        });

        // Some items (e.g. `%Z`) only fail once they are rendered, so try it.
        let sample = Utc::now().with_timezone(&timezone);
        let format = if format_time(format, &sample).is_some() {
            format.to_string()
        } else {
            warn!("Invalid time format {:?}, using default", format);
            DEFAULT_TIME_FORMAT.to_string()
        };

        Self { format, timezone }
    }

    pub fn now(&self) -> String {
        self.render(Utc::now())
    }

    pub fn render(&self, instant: DateTime<Utc>) -> String {
        let local = instant.with_timezone(&self.timezone);
        format_time(&self.format, &local)
            .or_else(|| format_time(DEFAULT_TIME_FORMAT, &local))
            .unwrap_or_default()
    }
}

fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

fn default_timezone() -> Tz {
    parse_timezone(DEFAULT_TIMEZONE).unwrap_or(Tz::UTC)
}

fn format_time(format: &str, time: &DateTime<Tz>) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", time.format(format)).ok()?;
    Some(out)
}
