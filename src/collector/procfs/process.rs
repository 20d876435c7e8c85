//! Task collector for per-process fields from `<pid>/status`.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ExtractError;
use super::reader::{LineBuf, open_lines};
use super::rules::{TASK_NAME, TASK_NAME_WIDTH, TASK_PID, TASK_STATE, TASK_THREADS};
use crate::collector::traits::FileSystem;
use crate::util::UserResolver;

/// One row of the task table. Fields whose label was absent stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TaskRecord {
    pub pid: Option<String>,
    pub state: Option<String>,
    /// Truncated to [`TASK_NAME_WIDTH`] characters.
    pub name: Option<String>,
    pub threads: Option<String>,
    pub user: Option<String>,
}

impl TaskRecord {
    /// Names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.pid.is_none() {
            missing.push(TASK_PID.field);
        }
        if self.state.is_none() {
            missing.push(TASK_STATE.field);
        }
        if self.name.is_none() {
            missing.push(TASK_NAME.field);
        }
        if self.threads.is_none() {
            missing.push(TASK_THREADS.field);
        }
        if self.user.is_none() {
            missing.push("task user");
        }
        missing
    }
}

/// Result of one pass over the task directories.
#[derive(Debug, Default)]
pub struct TaskScan {
    /// Tasks whose status file could be read, in directory order.
    pub tasks: Vec<TaskRecord>,
    /// Tasks listed but unreadable by the time their status was opened.
    pub failures: Vec<ExtractError>,
    /// Labels absent from otherwise readable status files.
    pub missing: Vec<ExtractError>,
}

/// Collects task information from `<pid>/status` files.
#[derive(Debug, Clone)]
pub struct ProcessCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    users: UserResolver,
}

impl<F: FileSystem> ProcessCollector<F> {
    /// Creates a new task collector, loading the account database once.
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        let users = UserResolver::load(&fs);
        Self::with_users(fs, proc_path, users)
    }

    pub fn with_users(fs: F, proc_path: impl Into<PathBuf>, users: UserResolver) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            users,
        }
    }

    /// Task directories under the proc root, with their IDs.
    ///
    /// An entry is a task when its name is all ASCII digits and not zero.
    /// The returned path is the listed entry itself, never rebuilt from the ID.
    pub fn task_dirs(&self) -> Result<Vec<(u32, PathBuf)>, ExtractError> {
        let entries = self
            .fs
            .read_dir(&self.proc_path)
            .map_err(|source| ExtractError::ListDir {
                path: self.proc_path.clone(),
                source,
            })?;

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let pid = task_id(entry.file_name()?.to_str()?)?;
                Some((pid, entry))
            })
            .collect())
    }

    /// IDs of the listed tasks.
    pub fn task_ids(&self) -> Result<Vec<u32>, ExtractError> {
        Ok(self.task_dirs()?.into_iter().map(|(pid, _)| pid).collect())
    }

    /// Reads every listed task in a single pass.
    ///
    /// Tasks that exit between listing and reading end up in `failures`,
    /// so the number of `tasks` always equals the rows a caller renders.
    pub fn scan(&self) -> Result<TaskScan, ExtractError> {
        let mut scan = TaskScan::default();
        let mut buf = LineBuf::new();
        for (pid, dir) in self.task_dirs()? {
            let path = dir.join("status");
            match self.read_status(&path, &mut buf) {
                Ok(task) => {
                    for field in task.missing_fields() {
                        scan.missing.push(ExtractError::MissingField {
                            path: path.clone(),
                            field,
                        });
                    }
                    scan.tasks.push(task);
                }
                Err(e) => {
                    debug!(pid, error = %e, "skipping task");
                    scan.failures.push(e);
                }
            }
        }
        Ok(scan)
    }

    /// Reads one task's status file into a record.
    ///
    /// `buf` is reused across calls so a full scan allocates one line buffer.
    pub fn collect_task(&self, pid: u32, buf: &mut LineBuf) -> Result<TaskRecord, ExtractError> {
        let path = self.proc_path.join(pid.to_string()).join("status");
        self.read_status(&path, buf)
    }

    fn read_status(&self, path: &Path, buf: &mut LineBuf) -> Result<TaskRecord, ExtractError> {
        let mut reader = open_lines(&self.fs, path)?;
        let mut task = TaskRecord::default();

        loop {
            let n = reader.read_line(buf).map_err(|source| ExtractError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if n == 0 {
                break;
            }
            let line = buf.as_str();
            fill(&mut task.name, TASK_NAME.extract(line).map(truncate_name));
            fill(&mut task.state, TASK_STATE.extract(line).map(str::to_string));
            fill(&mut task.pid, TASK_PID.extract(line).map(str::to_string));
            fill(&mut task.threads, TASK_THREADS.extract(line).map(str::to_string));
        }

        task.user = self.owner(path);
        Ok(task)
    }

    fn owner(&self, path: &Path) -> Option<String> {
        match self.fs.owner_uid(path) {
            Ok(uid) => Some(self.users.resolve(uid)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "owner lookup failed");
                None
            }
        }
    }
}

/// Parses a directory entry name as a task ID.
fn task_id(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse::<u32>().ok().filter(|&pid| pid != 0)
}

/// Keeps the first value found for a field.
fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}

fn truncate_name(name: &str) -> String {
    name.chars().take(TASK_NAME_WIDTH).collect()
}
