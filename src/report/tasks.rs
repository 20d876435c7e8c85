use std::io::{self, Write};

use super::{Inspector, write_heading};
use crate::collector::{ExtractError, FileSystem, TaskRecord};

const TABLE_HEADER: &str =
    "  PID |        State |                 Task Name |            User | Tasks";
const TABLE_RULE: &str =
    "------+--------------+---------------------------+-----------------+-------";

impl<F: FileSystem + Clone> Inspector<F> {
    /// Running-task count followed by one table row per readable task.
    ///
    /// Tasks are read in a single pass, so the banner count always equals
    /// the number of rows. Row order follows the directory listing.
    pub fn render_tasks<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        write_heading(out, "Task Information")?;

        let tasks = self.scan_tasks();
        writeln!(out, "Tasks Running: {}", tasks.len())?;
        writeln!(out)?;
        writeln!(out, "{}", TABLE_HEADER)?;
        writeln!(out, "{}", TABLE_RULE)?;
        for task in &tasks {
            write_task_row(out, task)?;
        }
        Ok(())
    }

    fn scan_tasks(&mut self) -> Vec<TaskRecord> {
        let Some(scan) = self.diagnostics.settle("tasks", self.processes.scan()) else {
            return Vec::new();
        };
        for error in scan.failures {
            self.diagnostics.record("task", error);
        }
        for error in scan.missing {
            let field = match &error {
                ExtractError::MissingField { field, .. } => *field,
                _ => "task",
            };
            self.diagnostics.record(field, error);
        }
        scan.tasks
    }
}

fn write_task_row<W: Write>(out: &mut W, task: &TaskRecord) -> io::Result<()> {
    writeln!(
        out,
        "{:>5} | {:>12} | {:>25} | {:>15} | {:>5} ",
        task.pid.as_deref().unwrap_or(""),
        task.state.as_deref().unwrap_or(""),
        task.name.as_deref().unwrap_or(""),
        task.user.as_deref().unwrap_or(""),
        task.threads.as_deref().unwrap_or(""),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::collector::MockFs;
    use crate::report::Inspector;

    fn render(inspector: &mut Inspector<MockFs>) -> String {
        let mut out = Vec::new();
        inspector.render_tasks(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn rows(text: &str) -> HashSet<String> {
        text.lines().skip(6).map(str::to_string).collect()
    }

    #[test]
    fn test_render_tasks_layout() {
        let mut inspector = Inspector::new(MockFs::typical_system(), "/proc");
        let text = render(&mut inspector);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Task Information");
        assert_eq!(lines[1], "----------------");
        assert_eq!(lines[2], "Tasks Running: 4");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], super::TABLE_HEADER);
        assert_eq!(lines[5], super::TABLE_RULE);
        assert_eq!(lines.len(), 10);

        let expected: HashSet<String> = [
            "    1 |     sleeping |                   systemd |            root |     1 ",
            " 1234 |     sleeping |                      bash |            user |     1 ",
            " 2048 |      running |                rpc-worker |          nobody |    12 ",
            " 4000 |       zombie |                   defunct |            user |     1 ",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();
        assert_eq!(rows(&text), expected);
        assert!(inspector.diagnostics().is_empty());
    }

    #[test]
    fn test_rows_are_stable_across_runs() {
        let mut inspector = Inspector::new(MockFs::typical_system(), "/proc");
        let first = rows(&render(&mut inspector));
        let second = rows(&render(&mut inspector));
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_threads_renders_blank_column() {
        let mut inspector = Inspector::new(MockFs::sparse_system(), "/proc");
        let text = render(&mut inspector);

        assert!(text.contains("Tasks Running: 1\n"));
        assert!(text.contains("   10 |         idle |                 nothreads |            root |       \n"));

        let diagnostics = inspector.diagnostics();
        assert_eq!(diagnostics.count("task threads"), 1);
        assert_eq!(diagnostics.count("task"), 1);
    }

    #[test]
    fn test_unlistable_directory_renders_empty_table() {
        let mut inspector = Inspector::new(MockFs::new(), "/proc");
        let text = render(&mut inspector);

        assert!(text.contains("Tasks Running: 0\n"));
        assert_eq!(text.lines().count(), 6);
        assert_eq!(inspector.diagnostics().count("tasks"), 1);
    }
}
