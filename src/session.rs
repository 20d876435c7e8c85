//! Session controller: mount point checks and section ordering.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use thiserror::Error;
use tracing::{debug, info};

use crate::collector::FileSystem;
use crate::report::{Inspector, LiveView};
use crate::view::ViewSelection;

/// Errors that end a session before or during rendering.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("cannot access proc mount point {}: {source}", path.display())]
    MountPoint { path: PathBuf, source: io::Error },

    #[error("proc mount point {} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// Checks that `path` names an existing directory.
pub fn resolve_mount(path: &Path) -> Result<PathBuf, InspectError> {
    let meta = std::fs::metadata(path).map_err(|source| InspectError::MountPoint {
        path: path.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(InspectError::NotADirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

/// Makes `path` the working directory, so collectors can use `.` as root.
pub fn enter_mount(path: &Path) -> Result<(), InspectError> {
    let path = resolve_mount(path)?;
    std::env::set_current_dir(&path).map_err(|source| InspectError::MountPoint {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "entered proc mount point");
    Ok(())
}

/// One run of the inspector over the selected sections.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub views: ViewSelection,
    /// Frame limit for the live view; `None` runs until stopped.
    pub live_iterations: Option<u64>,
}

impl Session {
    pub fn new(views: ViewSelection) -> Self {
        Self {
            views,
            live_iterations: None,
        }
    }

    pub fn with_live_iterations(mut self, limit: Option<u64>) -> Self {
        self.live_iterations = limit;
        self
    }

    /// Whether interrupts should stop the live loop instead of ending the
    /// process. Static reports keep the default SIGINT behavior.
    pub fn handles_interrupt(&self) -> bool {
        self.views.live
    }

    /// Renders the selected sections in order: live, system, hardware, tasks.
    pub fn run<F, W>(
        &self,
        inspector: &mut Inspector<F>,
        out: &mut W,
        stop: Arc<AtomicBool>,
    ) -> Result<(), InspectError>
    where
        F: FileSystem + Clone,
        W: Write,
    {
        info!(views = %self.views, "rendering report");

        if self.views.live {
            let live = LiveView::new(stop).with_iterations(self.live_iterations);
            inspector.render_live(out, &live)?;
        }
        if self.views.system {
            inspector.render_system(out)?;
        }
        if self.views.hardware {
            inspector.render_hardware(out)?;
        }
        if self.views.tasks {
            inspector.render_tasks(out)?;
        }
        out.flush()?;

        let diagnostics = inspector.diagnostics();
        if !diagnostics.is_empty() {
            info!(failures = diagnostics.len(), "some fields could not be read");
        }
        Ok(())
    }
}
