//! Business Hours Model (营业时间)

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Administrator-owned booking window
///
/// `working_days` holds weekday indices, 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    #[serde(with = "crate::util::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "crate::util::hhmm")]
    pub end: NaiveTime,
    pub working_days: BTreeSet<u8>,
}

impl BusinessHours {
    pub fn new(
        start: NaiveTime,
        end: NaiveTime,
        working_days: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            start,
            end,
            working_days: working_days.into_iter().collect(),
        }
    }

    /// Merge a partial update into a copy of this configuration
    pub fn merged(&self, update: &BusinessHoursUpdate) -> Self {
        Self {
            start: update.start.unwrap_or(self.start),
            end: update.end.unwrap_or(self.end),
            working_days: update
                .working_days
                .clone()
                .unwrap_or_else(|| self.working_days.clone()),
        }
    }
}

impl Default for BusinessHours {
    /// 08:00-17:00, Monday to Saturday
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            working_days: (1..=6).collect(),
        }
    }
}

/// Update business hours payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursUpdate {
    #[serde(default, with = "crate::util::hhmm::option")]
    pub start: Option<NaiveTime>,
    #[serde(default, with = "crate::util::hhmm::option")]
    pub end: Option<NaiveTime>,
    #[serde(default)]
    pub working_days: Option<BTreeSet<u8>>,
}
