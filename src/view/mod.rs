//! Report section selection.

use std::fmt;

/// Which report sections run.
///
/// Live view is exclusive: when `live` is set every other flag is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSelection {
    pub hardware: bool,
    pub live: bool,
    pub system: bool,
    pub tasks: bool,
}

impl Default for ViewSelection {
    /// System, hardware and task sections; no live view.
    fn default() -> Self {
        Self {
            hardware: true,
            live: false,
            system: true,
            tasks: true,
        }
    }
}

impl ViewSelection {
    /// Only the live view.
    pub fn live_only() -> Self {
        Self {
            hardware: false,
            live: true,
            system: false,
            tasks: false,
        }
    }

    /// Combines requested flags into a selection.
    ///
    /// `all` or no flags at all yields the default set; `live` overrides
    /// everything else.
    pub fn from_flags(all: bool, hardware: bool, live: bool, system: bool, tasks: bool) -> Self {
        if live {
            return Self::live_only();
        }
        if all || !(hardware || system || tasks) {
            return Self::default();
        }
        Self {
            hardware,
            live: false,
            system,
            tasks,
        }
    }

    /// Returns `true` if nothing would be rendered.
    pub fn is_empty(&self) -> bool {
        !(self.hardware || self.live || self.system || self.tasks)
    }
}

impl fmt::Display for ViewSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = [
            (self.live, "live"),
            (self.system, "system"),
            (self.hardware, "hardware"),
            (self.tasks, "tasks"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect();
        f.write_str(&names.join(" "))
    }
}
