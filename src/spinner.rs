//! Terminal loading indicator.
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

use std::{io::Write, time::Duration};

use tokio::{sync::oneshot, task::JoinHandle};

/// Braille animation frames
const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Delay between two frames
const FRAME_INTERVAL: Duration = Duration::from_millis(80);
/// Carriage return followed by "erase to end of line"
const CLEAR_LINE: &str = "\r\x1b[K";

/// Animated "loading" line drawn by a background task
pub struct Spinner {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Spinner {
    /// Starts drawing on the given writer
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<W>(mut out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let (stop, mut stopped) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(FRAME_INTERVAL);
            let mut frame = 0usize;
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let _ = write!(out, "\r{} 加载中...", FRAMES[frame % FRAMES.len()]);
                        let _ = out.flush();
                        frame += 1;
                    }
                }
            }
            let _ = write!(out, "{CLEAR_LINE}");
            let _ = out.flush();
        });

        Spinner { stop, task }
    }

    /// Signals the task to stop and waits until the line is cleared
    pub async fn stop(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            tracing::debug!(error = %e, "spinner task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Writer sharing its buffer with the test
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[tokio::test]
    async fn stop_clears_line_before_returning() {
        let out = Shared::default();
        let spinner = Spinner::start(out.clone());

        tokio::time::sleep(FRAME_INTERVAL * 3).await;
        spinner.stop().await;

        let drawn = out.contents();
        assert!(drawn.contains("加载中..."));
        assert!(drawn.ends_with(CLEAR_LINE));
    }

    #[tokio::test]
    async fn nothing_is_written_after_stop() {
        let out = Shared::default();
        let spinner = Spinner::start(out.clone());
        spinner.stop().await;

        let at_stop = out.contents();
        tokio::time::sleep(FRAME_INTERVAL * 2).await;

        assert_eq!(out.contents(), at_stop);
        assert!(at_stop.ends_with(CLEAR_LINE));
    }
}
