//! Configuration module for the workday report.
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

use std::time::Duration;

use serde::{de::{Error, Visitor}, Deserialize};

/// Holiday api queried when no `base_url` is configured
pub const DEFAULT_BASE_URL: &str = "https://holiday.ailcc.com/api/holiday/year";

/// User agent sent when none is configured
const DEFAULT_USER_AGENT: &str = concat!("workinfo/", env!("CARGO_PKG_VERSION"));

/// Main configuration structure for the application.
///
/// Every section is optional, an empty file (or no file at all) yields
/// the built-in defaults.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Conf {
    /// Remote holiday api settings
    #[serde(default)]
    api: Api,
    /// Terminal behaviour
    #[serde(default)]
    display: Display,
}

/// Remote holiday api settings.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Api {
    /// Url prefix, the year is appended as the last path segment
    base_url: Option<String>,
    /// Whole-request timeout, no timeout when absent
    /// Deserialized from strings like "500ms", "10s", "2m" or integer seconds
    #[serde(default, deserialize_with = "deserialize_timeout")]
    timeout: Option<Duration>,
    /// User agent header value
    user_agent: Option<String>,
}

/// Terminal behaviour settings.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct Display {
    /// Show the loading spinner while fetching
    spinner: Option<bool>,
    /// Wait for acknowledgment before exiting
    wait: Option<bool>,
}

impl Conf {
    /// Returns the `[api]` section
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Whether the loading spinner is enabled (default `true`)
    pub fn spinner(&self) -> bool {
        self.display.spinner.unwrap_or(true)
    }

    /// Whether to wait for acknowledgment before exiting (default `true`)
    pub fn wait(&self) -> bool {
        self.display.wait.unwrap_or(true)
    }
}

impl Api {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

/// Deserializes a timeout given as a duration string or whole seconds.
///
/// # Supported Formats
/// * Milliseconds: "500ms"
/// * Seconds: "10s" or a bare integer `10`
/// * Minutes: "2m"
fn deserialize_timeout<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_any(TimeoutVisitor).map(Some)
}

/// Error message format for timeout deserialization errors.
const ERR_FMT: &str = "a timeout like '500ms', '10s', '2m' or a whole number of seconds";

/// Visitor for deserializing timeouts into `Duration`.
struct TimeoutVisitor;

impl<'a> Visitor<'a> for TimeoutVisitor {
    type Value = Duration;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "{}", &ERR_FMT)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        non_zero(Duration::from_secs(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match u64::try_from(v) {
            Ok(secs) => self.visit_u64(secs),
            Err(_) => Err(Error::invalid_value(serde::de::Unexpected::Signed(v), &ERR_FMT)),
        }
    }

    /// Processes a string representation of a timeout.
    ///
    /// # Examples
    /// * "500ms" → 500 milliseconds
    /// * "10s" → 10 seconds
    /// * "2m" → 120 seconds
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let v = v.trim();
        let split = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
        let (amount, unit) = v.split_at(split);

        let Ok(amount) = amount.parse::<u64>() else {
            return Err(Error::invalid_value(serde::de::Unexpected::Str(v), &ERR_FMT));
        };

        let duration = match unit.trim() {
            "ms" => Duration::from_millis(amount),
            "" | "s" => Duration::from_secs(amount),
            "m" => Duration::from_secs(amount.saturating_mul(60)),
            _ => return Err(Error::invalid_value(serde::de::Unexpected::Str(v), &ERR_FMT)),
        };
        non_zero(duration)
    }
}

/// Rejects a zero timeout, which would fail every request immediately.
fn non_zero<E>(duration: Duration) -> Result<Duration, E>
where
    E: serde::de::Error,
{
    if duration.is_zero() {
        return Err(Error::invalid_value(
            serde::de::Unexpected::Unsigned(0),
            &"a timeout greater than zero",
        ));
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Result<Conf, toml::de::Error> {
        toml::from_str(toml)
    }

    #[test]
    fn empty_file_uses_defaults() {
        let conf = parse("").unwrap();

        assert_eq!(conf.api().base_url(), DEFAULT_BASE_URL);
        assert_eq!(conf.api().timeout(), None);
        assert!(conf.api().user_agent().starts_with("workinfo/"));
        assert!(conf.spinner());
        assert!(conf.wait());
    }

    #[test]
    fn full_file_overrides_defaults() {
        let conf = parse(
            r#"
            [api]
            base_url = "http://localhost:9000/year"
            timeout = "2m"
            user_agent = "tester"

            [display]
            spinner = false
            wait = false
            "#,
        )
        .unwrap();

        assert_eq!(conf.api().base_url(), "http://localhost:9000/year");
        assert_eq!(conf.api().timeout(), Some(Duration::from_secs(120)));
        assert_eq!(conf.api().user_agent(), "tester");
        assert!(!conf.spinner());
        assert!(!conf.wait());
    }

    #[test]
    fn timeout_accepts_each_unit() {
        let cases = [
            ("timeout = \"500ms\"", Duration::from_millis(500)),
            ("timeout = \"10s\"", Duration::from_secs(10)),
            ("timeout = \"7\"", Duration::from_secs(7)),
            ("timeout = 15", Duration::from_secs(15)),
        ];

        for (line, expected) in cases {
            let conf = parse(&format!("[api]\n{line}")).unwrap();
            assert_eq!(conf.api().timeout(), Some(expected), "{line}");
        }
    }

    #[test]
    fn timeout_rejects_garbage() {
        let lines = [
            "timeout = \"soon\"",
            "timeout = \"10h\"",
            "timeout = -3",
            "timeout = 0",
            "timeout = \"0ms\"",
        ];
        for line in lines {
            assert!(parse(&format!("[api]\n{line}")).is_err(), "{line}");
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("[api]\nbase = \"http://x\"").is_err());
        assert!(parse("[other]\nkey = 1").is_err());
    }
}
