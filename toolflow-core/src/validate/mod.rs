mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::CatalogDocument;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for CatalogDocument {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_catalog(self)
    }
}

/// Structural checks on a catalog. Cross-references between steps and tools are checked
/// when workflows are created against a registry.
pub fn validate_catalog(doc: &CatalogDocument) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_catalog(doc);
    v.finish()
}
