use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ValidationError, Violation};
use crate::types::CatalogDocument;

use super::rules;

pub(crate) static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\-\.]+$").expect("valid"));

pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }

    pub fn validate_catalog(&mut self, doc: &CatalogDocument) {
        rules::catalog::validate_catalog(self, doc);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn validate_name(&mut self, path: &str, name: &str) {
        if name.is_empty() {
            self.push(path, "must not be empty");
        } else if !NAME_RE.is_match(name) {
            self.push(path, "must match regex [A-Za-z0-9_\\-\\.]+");
        }
    }
}
