//! Wall-clock stamps for relayed lines.

use chrono::{DateTime, Local, TimeZone};

/// Format the current local time as the `HH:MM` stamp carried by chat and
/// presence lines.
pub fn clock_stamp() -> String {
    stamp_at(&Local::now())
}

/// Format a specific instant as an `HH:MM` stamp.
pub fn stamp_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M").to_string()
}

/// Format the current local date as the transcript day banner, e.g.
/// `---2024/06/01---`.
pub fn date_banner() -> String {
    banner_at(&Local::now())
}

/// Format a specific date as a transcript day banner.
pub fn banner_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("---%Y/%m/%d---").to_string()
}
