//! Waits for the user before the terminal window closes.
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

use std::{
    io::{BufRead, Write},
    process::Command,
};

/// Prompt shown by the line-reading backend
const PROMPT: &str = "按 Enter 键退出...";

/// How to wait for user acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Delegate to the platform's pause facility (`cmd /c pause`)
    Platform,
    /// Print a prompt and read one line
    ReadLine,
}

impl Pause {
    /// Picks the backend for the running platform
    pub fn detect() -> Self {
        if cfg!(windows) {
            Pause::Platform
        } else {
            Pause::ReadLine
        }
    }

    /// Blocks until the user acknowledges
    ///
    /// Failures are logged and otherwise ignored, the program is about to
    /// exit anyway.
    pub fn wait(self) {
        let result = match self {
            Pause::Platform => Command::new("cmd").args(["/c", "pause"]).status().map(drop),
            Pause::ReadLine => {
                let stdin = std::io::stdin();
                read_line(&mut stdin.lock(), &mut std::io::stdout())
            }
        };

        if let Err(e) = result {
            tracing::debug!(backend = ?self, error = %e, "pause failed");
        }
    }
}

/// Writes the prompt and consumes one line of input
fn read_line<R, W>(input: &mut R, out: &mut W) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{PROMPT}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn read_line_prompts_and_consumes_one_line() {
        let mut input = Cursor::new(b"\nleft over\n".to_vec());
        let mut out = Vec::new();

        read_line(&mut input, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
        assert_eq!(input.position(), 1);
    }

    #[test]
    fn read_line_returns_on_eof() {
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();

        assert!(read_line(&mut input, &mut out).is_ok());
    }

    #[test]
    fn detect_matches_platform() {
        let expected = if cfg!(windows) { Pause::Platform } else { Pause::ReadLine };
        assert_eq!(Pause::detect(), expected);
    }
}
