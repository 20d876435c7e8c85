use tracing::debug;

use crate::collector::ExtractError;

/// A field that was left blank in the rendered report.
#[derive(Debug)]
pub struct Failure {
    pub field: &'static str,
    pub error: ExtractError,
}

/// Ledger of extraction failures accumulated while rendering.
///
/// The report text degrades to blanks or zeros; this ledger is how callers
/// find out which fields were affected.
#[derive(Debug, Default)]
pub struct Diagnostics {
    failures: Vec<Failure>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwraps `result`, recording the error and returning `None` on failure.
    pub fn settle<T>(&mut self, field: &'static str, result: Result<T, ExtractError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.record(field, error);
                None
            }
        }
    }

    pub fn record(&mut self, field: &'static str, error: ExtractError) {
        debug!(field, error = %error, "field left blank");
        self.failures.push(Failure { field, error });
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// How many failures were recorded for `field`.
    pub fn count(&self, field: &str) -> usize {
        self.failures.iter().filter(|f| f.field == field).count()
    }

    pub fn clear(&mut self) {
        self.failures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn missing(field: &'static str) -> ExtractError {
        ExtractError::MissingField {
            path: PathBuf::from("/proc/meminfo"),
            field,
        }
    }

    #[test]
    fn test_settle_passes_values_through() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(diagnostics.settle("memory total", Ok(5)), Some(5));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_settle_records_errors() {
        let mut diagnostics = Diagnostics::new();
        let value: Option<u64> = diagnostics.settle("memory active", Err(missing("memory active")));
        assert_eq!(value, None);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.count("memory active"), 1);
        assert_eq!(diagnostics.count("memory total"), 0);

        diagnostics.clear();
        assert!(diagnostics.is_empty());
    }
}
