//! Holiday calendar source backed by the remote holiday api.
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

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::{conf::Api, error::FetchError};

/// Date format used by the `date` field of a record
const DATE_FMT: &str = "%Y-%m-%d";

/// Exception status of a single calendar day
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct HolidayRecord {
    /// `true` for a day off, `false` for a compensatory workday
    #[serde(rename = "holiday", default)]
    pub is_rest_day: bool,
    /// Holiday name
    #[serde(default)]
    pub name: String,
    /// ISO date, `YYYY-MM-DD`, empty when absent
    #[serde(default)]
    pub date: String,
}

impl HolidayRecord {
    /// Parses the record's `date` field, `None` when malformed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FMT).ok()
    }
}

/// One year of exception days as returned by the api
///
/// Only days that deviate from the plain Monday-Friday pattern are listed.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Calendar {
    /// Api status code, `0` on success
    pub code: i64,
    /// Exception days keyed by `MM-DD`
    #[serde(rename = "holiday", default, deserialize_with = "nullable_map")]
    pub days: BTreeMap<String, HolidayRecord>,
}

impl Calendar {
    /// Builds a successful calendar from its exception days
    #[cfg(test)]
    pub fn from_days(days: impl IntoIterator<Item = (String, HolidayRecord)>) -> Self {
        Calendar {
            code: 0,
            days: days.into_iter().collect(),
        }
    }

    /// Returns the calendar unless its status code signals failure
    pub fn into_checked(self) -> Result<Self, FetchError> {
        match self.code {
            0 => Ok(self),
            code => Err(FetchError::Status(code)),
        }
    }

    /// Looks up the record for a `MM-DD` key
    pub fn get(&self, key: &str) -> Option<&HolidayRecord> {
        self.days.get(key)
    }

    /// Iterates over rest-day records only
    pub fn rest_days(&self) -> impl Iterator<Item = &HolidayRecord> {
        self.days.values().filter(|record| record.is_rest_day)
    }
}

/// Treats an explicit `null` exception map the same as a missing one
fn nullable_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, HolidayRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, HolidayRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything able to produce the exception calendar of a year
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn fetch_year(&self, year: i32) -> Result<Calendar, FetchError>;
}

/// Calendar source querying `{base_url}/{year}` over http
#[derive(Debug, Clone)]
pub struct HolidayApi {
    base_url: String,
    http: Client,
}

impl HolidayApi {
    /// Creates an api client from the `[api]` configuration section
    ///
    /// # Errors
    /// * `FetchError::Transport` if the http client cannot be initialized
    pub fn new(api: &Api) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(api.user_agent());
        if let Some(timeout) = api.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(HolidayApi {
            base_url: api.base_url().trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    fn year_url(&self, year: i32) -> String {
        format!("{}/{}", self.base_url, year)
    }
}

#[async_trait]
impl CalendarSource for HolidayApi {
    async fn fetch_year(&self, year: i32) -> Result<Calendar, FetchError> {
        let url = self.year_url(year);
        tracing::debug!(%url, year, "fetching holiday calendar");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let body = resp.text().await?;
        let calendar: Calendar = serde_json::from_str(&body)?;
        tracing::debug!(
            year,
            code = calendar.code,
            days = calendar.days.len(),
            "holiday calendar received"
        );

        Ok(calendar)
    }
}
