//! Workday and holiday countdown calculation.
//!
//! MIT License
//!
//! Copyright (c) 2026 66f94eae
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy
//! of this software and associated documentation files (the "Software"), to deal
//! in the Software without restriction, including without limitation the rights
//! to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//! copies of the Software, and to permit persons to whom the Software is
//! furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all
//! copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//! IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//! AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//! LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//! OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//! SOFTWARE.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use crate::{
    error::FetchError,
    holiday::{Calendar, CalendarSource},
};

/// Weekday labels indexed by days from Sunday
const WEEKDAY_LABELS: [&str; 7] = ["周日", "周一", "周二", "周三", "周四", "周五", "周六"];

/// Calendar key format (MM-DD)
const KEY_FMT: &str = "%m-%d";

/// Today's work status and distances to the weekend and the next holiday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkInfo {
    /// `false` only when today is listed as a rest day
    pub is_workday: bool,
    /// Localized weekday name, e.g. "周三"
    pub weekday_label: &'static str,
    /// Days until Saturday, `0` on Saturday and Sunday
    pub days_to_weekend: u32,
    /// Name of the nearest upcoming holiday, empty when none is known
    pub nearest_holiday_name: String,
    /// Days until that holiday, `0` when it is today
    pub days_to_nearest_holiday: i64,
}

/// Returns the weekday label and the days left until the weekend
///
/// Saturday and Sunday count as the weekend itself and yield `0`.
pub fn weekday_and_days_to_weekend(date: NaiveDate) -> (&'static str, u32) {
    let weekday = date.weekday();
    let index = weekday.num_days_from_sunday();
    let days_to_weekend = match weekday {
        Weekday::Sat | Weekday::Sun => 0,
        _ => Weekday::Sat.num_days_from_sunday() - index,
    };
    (WEEKDAY_LABELS[index as usize], days_to_weekend)
}

/// Computes today's work information from the holiday calendars
///
/// # Arguments
/// * `now` - Local wall-clock time
/// * `source` - Provider of yearly exception calendars
///
/// # Errors
/// * Any `FetchError` of the current-year calendar, including a non-zero
///   api code. A failing next-year lookup is not an error.
///
/// # Note
/// * Only days listed as rest days count as days off. An unlisted Saturday
///   or Sunday is reported as a workday.
pub async fn compute_work_info(
    now: NaiveDateTime,
    source: &dyn CalendarSource,
) -> Result<WorkInfo, FetchError> {
    let today = now.date();
    let today_key = now.format(KEY_FMT).to_string();

    let calendar = source.fetch_year(today.year()).await?.into_checked()?;

    let (weekday_label, days_to_weekend) = weekday_and_days_to_weekend(today);

    let is_workday = !calendar
        .get(&today_key)
        .is_some_and(|record| record.is_rest_day);

    let mut nearest = nearest_rest_day(&calendar, Some(today));

    if nearest.is_none() {
        let next_year = today.year() + 1;
        match source.fetch_year(next_year).await.and_then(Calendar::into_checked) {
            Ok(next) => nearest = nearest_rest_day(&next, None),
            Err(e) => {
                tracing::warn!(year = next_year, error = %e, "next year calendar unavailable")
            }
        }
    }

    let (nearest_holiday_name, days_to_nearest_holiday) = match nearest {
        Some((date, name)) => (name, (date - today).num_days().max(0)),
        None => (String::new(), 0),
    };

    let info = WorkInfo {
        is_workday,
        weekday_label,
        days_to_weekend,
        nearest_holiday_name,
        days_to_nearest_holiday,
    };
    tracing::info!(?info, "work info computed");

    Ok(info)
}

/// Finds the earliest rest day, optionally ignoring dates before `from`
///
/// Equal dates resolve to the lexicographically smallest name.
fn nearest_rest_day(calendar: &Calendar, from: Option<NaiveDate>) -> Option<(NaiveDate, String)> {
    calendar
        .rest_days()
        .filter_map(|record| match record.parsed_date() {
            Some(date) => Some((date, record)),
            None => {
                tracing::debug!(
                    date = %record.date,
                    name = %record.name,
                    "skipping malformed date"
                );
                None
            }
        })
        .filter(|(date, _)| from.is_none_or(|from| *date >= from))
        .min_by(|(a_date, a), (b_date, b)| a_date.cmp(b_date).then_with(|| a.name.cmp(&b.name)))
        .map(|(date, record)| (date, record.name.clone()))
}

impl fmt::Display for WorkInfo {
    /// Renders the report as a single sentence
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = vec![
            format!("今天是{}", self.weekday_label),
            if self.is_workday { "今天上班" } else { "今天休息" }.to_string(),
        ];

        if self.days_to_weekend > 0 {
            segments.push(format!("距离周末还有{}天", self.days_to_weekend));
        }

        if self.nearest_holiday_name.is_empty() {
            segments.push("暂无后续节假日信息".to_string());
        } else {
            segments.push(format!(
                "距离最近节假日（{}）还有{}天",
                self.nearest_holiday_name, self.days_to_nearest_holiday
            ));
        }

        write!(f, "{}。", segments.join("，"))
    }
}
