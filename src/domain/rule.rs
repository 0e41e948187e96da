//! Rule descriptors and registration requests.
//!
//! A [`RulePermission`] is the stored, immutable record of one rule bound to
//! a model. A [`RuleRegistration`] carries the caller's input before defaults
//! are applied and the bound field is validated.

use crate::domain::model::ModelType;

/// An authorization rule bound to a model.
///
/// Fields are stored exactly as given. Defaults (`field_name` falling back
/// to the codename, `view_param_pk` falling back to the model's primary key
/// attribute) are applied by the registry before construction.
///
/// # Example
/// ```
/// use model_rules::{ModelType, RulePermission};
///
/// let rule = RulePermission::new(
///     "can_edit",
///     ModelType::new("blog", "Post"),
///     "is_author",
///     "post_id",
///     "Authors may edit their own posts",
/// );
///
/// assert_eq!(rule.codename(), "can_edit");
/// assert_eq!(rule.field_name(), "is_author");
/// assert_eq!(rule.view_param_pk(), "post_id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulePermission {
    codename: String,
    model_type: ModelType,
    field_name: String,
    view_param_pk: String,
    description: String,
}

impl RulePermission {
    pub fn new(
        codename: impl Into<String>,
        model_type: ModelType,
        field_name: impl Into<String>,
        view_param_pk: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            codename: codename.into(),
            model_type,
            field_name: field_name.into(),
            view_param_pk: view_param_pk.into(),
            description: description.into(),
        }
    }

    /// Name of the rule, unique within its model.
    pub fn codename(&self) -> &str {
        &self.codename
    }

    /// Model the rule belongs to.
    pub fn model_type(&self) -> &ModelType {
        &self.model_type
    }

    /// Member of the model that implements the check.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// View parameter carrying the instance's primary key.
    pub fn view_param_pk(&self) -> &str {
        &self.view_param_pk
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Input for [`RuleRegistry::register`](crate::RuleRegistry::register).
///
/// Only the codename is required; everything else falls back to a default.
///
/// # Example
/// ```
/// use model_rules::RuleRegistration;
///
/// let registration = RuleRegistration::new("can_edit")
///     .field_name("is_author")
///     .description("Authors may edit their own posts");
///
/// assert_eq!(registration.codename(), "can_edit");
/// assert_eq!(registration.field_name_or_codename(), "is_author");
/// assert!(!registration.overwrite_allowed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleRegistration {
    codename: String,
    #[cfg_attr(feature = "serde", serde(default))]
    field_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    view_param_pk: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    allow_overwrite: bool,
}

impl RuleRegistration {
    pub fn new(codename: impl Into<String>) -> Self {
        Self {
            codename: codename.into(),
            field_name: None,
            view_param_pk: None,
            description: String::new(),
            allow_overwrite: false,
        }
    }

    /// Bind the rule to a member other than the one named like the codename.
    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Override the view parameter used to resolve the primary key.
    pub fn view_param_pk(mut self, view_param_pk: impl Into<String>) -> Self {
        self.view_param_pk = Some(view_param_pk.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark a re-registration as intentional.
    ///
    /// Replacing an existing rule is always permitted. This flag only
    /// silences the warning that is otherwise logged when it happens.
    pub fn allow_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }

    pub fn codename(&self) -> &str {
        &self.codename
    }

    /// The explicit field name, or the codename when none was given.
    pub fn field_name_or_codename(&self) -> &str {
        self.field_name.as_deref().unwrap_or(&self.codename)
    }

    pub fn overwrite_allowed(&self) -> bool {
        self.allow_overwrite
    }

    /// Apply defaults and build the descriptor.
    pub(crate) fn into_permission(self, model_type: ModelType, pk_attname: &str) -> RulePermission {
        let field_name = self.field_name.unwrap_or_else(|| self.codename.clone());
        let view_param_pk = self
            .view_param_pk
            .unwrap_or_else(|| pk_attname.to_string());

        RulePermission {
            codename: self.codename,
            model_type,
            field_name,
            view_param_pk,
            description: self.description,
        }
    }
}
