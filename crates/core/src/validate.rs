//! Validation report shared by the form-facing validators.

/// Outcome of validating loosely-typed input.
///
/// Errors are human-readable and meant to be surfaced inline next to the
/// offending field. Validators collect every failure instead of stopping at
/// the first one, and never fail through `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    errors: Vec<String>,
    sanitized: Option<T>,
}

impl<T> Validated<T> {
    /// A passing report carrying the sanitized value.
    pub fn valid(value: T) -> Self {
        Self {
            errors: Vec::new(),
            sanitized: Some(value),
        }
    }

    /// A failing report; `errors` must be non-empty.
    pub fn invalid(errors: Vec<String>) -> Self {
        debug_assert!(!errors.is_empty());
        Self {
            errors,
            sanitized: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn sanitized(&self) -> Option<&T> {
        self.sanitized.as_ref()
    }

    pub fn into_sanitized(self) -> Option<T> {
        self.sanitized
    }

    /// Split the report into the sanitized value or its error messages.
    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self.sanitized {
            Some(value) => Ok(value),
            None => Err(self.errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_report_carries_the_sanitized_value() {
        let report = Validated::valid(7u64);
        assert!(report.is_valid());
        assert_eq!(report.into_sanitized(), Some(7));
    }

    #[test]
    fn invalid_report_has_errors_and_no_value() {
        let report: Validated<u64> = Validated::invalid(vec!["Missing item id".to_string()]);
        assert!(!report.is_valid());
        assert_eq!(report.errors(), ["Missing item id"]);
        assert!(report.sanitized().is_none());
    }
}
