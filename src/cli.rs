//! Command-line interface parser for the workday report.
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

use std::{fs::File, io::Read};

use clap::{builder::TypedValueParser, Parser};

use crate::conf::Conf;

/// Command-line interface structure
#[derive(Parser)]
#[command(
    version(env!("CARGO_PKG_VERSION")),
    author(env!("CARGO_PKG_AUTHORS")),
    about(env!("CARGO_PKG_DESCRIPTION")),
    long_about = "Reports whether today is a workday, how many days are left \
                 until the weekend and until the next public holiday."
)]
pub struct Cli {
    /// Configuration file path
    ///
    /// Optional TOML file overriding the holiday api endpoint,
    /// request timeout and terminal behaviour.
    #[arg(
        long,
        short,
        value_parser = ConfParser,
        help = "Path to TOML configuration file"
    )]
    conf: Option<Conf>,

    /// Exit right after printing instead of waiting for Enter
    #[arg(long)]
    no_wait: bool,
}

impl Cli {
    /// Returns the parsed configuration, defaults when no file was given
    pub fn conf(&self) -> Conf {
        self.conf.clone().unwrap_or_default()
    }

    /// Whether to wait for acknowledgment before exiting
    pub fn wait(&self) -> bool {
        !self.no_wait && self.conf.as_ref().is_none_or(Conf::wait)
    }
}

/// Custom parser for configuration file loading
#[derive(Clone)]
struct ConfParser;

impl TypedValueParser for ConfParser {
    type Value = Conf;

    /// Parses configuration file path and loads the configuration
    ///
    /// # Errors
    /// * File not found or permission denied
    /// * Invalid TOML format
    /// * Unknown keys or invalid values
    fn parse_ref(
        &self,
        _cmd: &clap::Command,
        _arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let Some(file_path) = value.to_str() else {
            return Err(clap::Error::new(clap::error::ErrorKind::DisplayHelp));
        };

        // Open configuration file
        let mut file = File::open(file_path).map_err(|e| {
            let error_msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("Configuration file '{}' not found", file_path),
                std::io::ErrorKind::PermissionDenied => format!("Permission denied for '{}'", file_path),
                _ => format!("Cannot access configuration file '{}': {}", file_path, e),
            };
            clap::Error::raw(clap::error::ErrorKind::InvalidValue, error_msg)
        })?;

        // Read file contents
        let mut config_content = String::new();
        file.read_to_string(&mut config_content).map_err(|e| {
            clap::Error::raw(
                clap::error::ErrorKind::InvalidValue,
                format!("Failed to read configuration file '{}': {}", file_path, e)
            )
        })?;

        // Parse TOML configuration
        toml::from_str(&config_content).map_err(|e| {
            clap::Error::raw(
                clap::error::ErrorKind::InvalidValue,
                format!("Invalid configuration in '{}': {}", file_path, e)
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn conf_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn no_arguments_uses_defaults_and_waits() {
        let cli = Cli::try_parse_from(["workinfo"]).unwrap();

        assert!(cli.wait());
        assert_eq!(cli.conf().api().base_url(), crate::conf::DEFAULT_BASE_URL);
    }

    #[test]
    fn no_wait_flag_disables_pause() {
        let cli = Cli::try_parse_from(["workinfo", "--no-wait"]).unwrap();
        assert!(!cli.wait());
    }

    #[test]
    fn loads_configuration_file() {
        let file = conf_file(
            "[api]\nbase_url = \"http://127.0.0.1:1/year\"\n[display]\nwait = false\n",
        );
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["workinfo", "-c", path]).unwrap();

        assert_eq!(cli.conf().api().base_url(), "http://127.0.0.1:1/year");
        assert!(!cli.wait());
    }

    #[test]
    fn missing_configuration_file_is_reported() {
        let err = Cli::try_parse_from(["workinfo", "--conf", "/definitely/not/here.toml"])
            .err()
            .unwrap();

        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn invalid_configuration_is_reported() {
        let file = conf_file("[api]\ntimeout = \"forever\"\n");
        let path = file.path().to_str().unwrap();

        let err = Cli::try_parse_from(["workinfo", "-c", path]).err().unwrap();

        assert!(err.to_string().contains("Invalid configuration"));
    }
}
