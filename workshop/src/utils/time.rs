//! 时间工具函数: 时段与营业日解析
//!
//! Appointment dates are plain calendar days (`NaiveDate`); nothing here
//! converts through a timestamp, so no time zone can shift the weekday.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::core::{WorkshopError, WorkshopResult};

/// 解析时间字符串 (HH:MM)
pub fn parse_time(time: &str) -> WorkshopResult<NaiveTime> {
    shared::util::hhmm::parse(time)
        .map_err(|_| WorkshopError::validation(format!("Invalid time format: {}", time)))
}

/// 解析时间字符串 (HH:MM)，失败返回 `fallback`
pub fn parse_time_or(time: &str, fallback: NaiveTime) -> NaiveTime {
    parse_time(time).unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse time '{}': {}, falling back to {}",
            time,
            e,
            fallback.format("%H:%M")
        );
        fallback
    })
}

/// 解析营业日列表，如 "1,2,3,4,5" (0=Sunday .. 6=Saturday)
pub fn parse_working_days(days: &str) -> WorkshopResult<BTreeSet<u8>> {
    days.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<u8>()
                .ok()
                .filter(|n| *n <= 6)
                .ok_or_else(|| WorkshopError::validation(format!("Invalid weekday index: {}", d)))
        })
        .collect()
}

/// Weekday index of a calendar day, 0 = Sunday .. 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
