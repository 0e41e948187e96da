//! Errors raised while registering rules.

use crate::domain::model::ModelType;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = RulesError> = std::result::Result<T, E>;

/// Error returned when a rule cannot be registered.
///
/// A failed registration never touches the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The field name matches no attribute, method or schema field of the model
    #[error(
        "Could not create rule: field_name {field_name} of rule {codename} does not exist in model {model}"
    )]
    NonexistentFieldName {
        field_name: String,
        codename: String,
        model: ModelType,
    },

    /// The bound method cannot be called with a single extra argument
    #[error("method {field_name} from rule {codename} in model {model} has too many parameters.")]
    TooManyParameters {
        field_name: String,
        codename: String,
        model: ModelType,
        params: usize,
    },
}

impl RulesError {
    pub fn is_nonexistent_field(&self) -> bool {
        matches!(self, RulesError::NonexistentFieldName { .. })
    }

    /// Codename of the rule that failed to register.
    pub fn codename(&self) -> &str {
        match self {
            RulesError::NonexistentFieldName { codename, .. }
            | RulesError::TooManyParameters { codename, .. } => codename,
        }
    }

    pub fn model(&self) -> &ModelType {
        match self {
            RulesError::NonexistentFieldName { model, .. }
            | RulesError::TooManyParameters { model, .. } => model,
        }
    }
}
