//! Daily workday and holiday countdown report.
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

use std::io::IsTerminal;

use chrono::Local;
use clap::Parser;
use holiday::HolidayApi;
use pause::Pause;
use spinner::Spinner;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod conf;
mod error;
mod holiday;
mod pause;
mod spinner;
mod workinfo;

/// Main entry point for the workday report
///
/// # Usage Examples
/// ```bash
/// # Report for today using the public holiday api
/// workinfo
///
/// # Use a custom endpoint and exit without waiting
/// workinfo -c config.toml --no-wait
///
/// # Show request diagnostics
/// RUST_LOG=workinfo=debug workinfo
/// ```
#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse command-line arguments
    let cli = cli::Cli::parse();
    let conf = cli.conf();

    let api = match HolidayApi::new(conf.api()) {
        Ok(api) => api,
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let spinner = (conf.spinner() && std::io::stdout().is_terminal())
        .then(|| Spinner::start(std::io::stdout()));

    let now = Local::now().naive_local();
    let result = workinfo::compute_work_info(now, &api).await;

    // Line must be cleared before anything else is printed
    if let Some(spinner) = spinner {
        spinner.stop().await;
    }

    match result {
        Ok(info) => println!("{}", info),
        Err(e) => {
            // Exits without the acknowledgment pause
            println!("Error: {}", e);
            std::process::exit(1);
        }
    }

    if cli.wait() {
        Pause::detect().wait();
    }
}
