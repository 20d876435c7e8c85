//! Continuously refreshing CPU/memory view.
//!
//! Each frame prints the load average, CPU gauge and memory gauge, then
//! moves the cursor back to the first of those lines so the next frame
//! overwrites them in place. The cursor stays hidden while the loop runs
//! and is shown again however the loop ends.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::{cursor, execute, queue};
use tracing::{debug, info};

use super::{Inspector, write_heading};
use crate::collector::FileSystem;

/// Lines drawn per frame.
const FRAME_LINES: u16 = 3;

/// Stop conditions for the live loop.
#[derive(Debug, Clone)]
pub struct LiveView {
    stop: Arc<AtomicBool>,
    iterations: Option<u64>,
}

impl LiveView {
    /// Runs until `stop` is set.
    pub fn new(stop: Arc<AtomicBool>) -> Self {
        Self {
            stop,
            iterations: None,
        }
    }

    /// Stops after `limit` frames even if `stop` is never set.
    pub fn with_iterations(mut self, limit: Option<u64>) -> Self {
        self.iterations = limit;
        self
    }

    /// Flag that ends the loop when set, e.g. from a signal handler.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    fn should_continue(&self, rendered: u64) -> bool {
        !self.stop.load(Ordering::SeqCst) && self.iterations.is_none_or(|limit| rendered < limit)
    }
}

/// Hides the terminal cursor until dropped.
pub struct HiddenCursor<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> HiddenCursor<'a, W> {
    pub fn hide(out: &'a mut W) -> io::Result<Self> {
        execute!(out, cursor::Hide)?;
        Ok(Self { out })
    }

    /// Writer to draw on while the cursor is hidden.
    pub fn out(&mut self) -> &mut W {
        self.out
    }
}

impl<W: Write> Drop for HiddenCursor<'_, W> {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, cursor::Show) {
            debug!(error = %e, "failed to restore cursor");
        }
    }
}

impl<F: FileSystem + Clone> Inspector<F> {
    /// Redraws load average and usage gauges until `live` says stop.
    ///
    /// Each frame takes one sample interval. Returns the number of frames
    /// drawn.
    pub fn render_live<W: Write>(&mut self, out: &mut W, live: &LiveView) -> io::Result<u64> {
        write_heading(out, "Live CPU/Memory View")?;

        let mut screen = HiddenCursor::hide(out)?;
        let mut rendered = 0;
        while live.should_continue(rendered) {
            self.write_load_line(screen.out())?;
            self.write_cpu_line(screen.out())?;
            self.write_memory_line(screen.out())?;
            queue!(screen.out(), cursor::MoveUp(FRAME_LINES))?;
            write!(screen.out(), "\r")?;
            screen.out().flush()?;
            rendered += 1;
        }

        if rendered > 0 {
            // Leave the last frame on screen.
            queue!(screen.out(), cursor::MoveToNextLine(FRAME_LINES))?;
        }
        info!(frames = rendered, "live view stopped");
        Ok(rendered)
    }
}
