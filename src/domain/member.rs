//! Members a rule can be bound to.
//!
//! A rule's `field_name` resolves to one of two things on its model:
//! - a class member (a plain attribute/property, or an invocable predicate)
//! - a declared schema field (a persisted column)
//!
//! Predicates are only accepted when they can be called with the receiver
//! plus at most one caller-supplied argument (usually the user being
//! authorized).

/// Maximum number of declared parameters a predicate may take, receiver included.
pub const MAX_PREDICATE_PARAMS: usize = 2;

/// How a class member is accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Plain attribute or computed property, read without arguments.
    Value,
    /// Method returning a boolean verdict.
    Predicate {
        /// Declared parameter count, including the receiver
        params: usize,
    },
}

/// A resolved class member (attribute, property or method).
///
/// # Example
/// ```
/// use model_rules::MemberHandle;
///
/// let is_owner = MemberHandle::predicate("is_owner", 2);
/// assert!(is_owner.is_invocable());
/// assert_eq!(is_owner.parameter_count(), 2);
///
/// let published = MemberHandle::value("is_published");
/// assert!(!published.is_invocable());
/// assert_eq!(published.parameter_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberHandle {
    name: String,
    kind: MemberKind,
}

impl MemberHandle {
    /// A plain attribute or property.
    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Value,
        }
    }

    /// A method declaring `params` parameters, receiver included.
    pub fn predicate(name: impl Into<String>, params: usize) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Predicate { params },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Whether the member must be called rather than read.
    pub fn is_invocable(&self) -> bool {
        matches!(self.kind, MemberKind::Predicate { .. })
    }

    /// Declared parameter count. Always 0 for values.
    pub fn parameter_count(&self) -> usize {
        match self.kind {
            MemberKind::Value => 0,
            MemberKind::Predicate { params } => params,
        }
    }
}

/// A declared, persisted schema field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    name: String,
    attname: String,
}

impl SchemaField {
    /// A field whose attribute name equals its declared name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            attname: name.clone(),
            name,
        }
    }

    /// A field stored under a different attribute name (e.g. `author` -> `author_id`).
    pub fn with_attname(name: impl Into<String>, attname: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attname: attname.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the attribute holding the raw column value.
    pub fn attname(&self) -> &str {
        &self.attname
    }
}

/// The member a rule's `field_name` resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundField {
    /// Attribute, property or method of the model class
    Member(MemberHandle),
    /// Declared schema field
    Field(SchemaField),
}

impl BoundField {
    pub fn is_invocable(&self) -> bool {
        match self {
            BoundField::Member(member) => member.is_invocable(),
            BoundField::Field(_) => false,
        }
    }

    pub fn parameter_count(&self) -> usize {
        match self {
            BoundField::Member(member) => member.parameter_count(),
            BoundField::Field(_) => 0,
        }
    }

    /// True unless this is a predicate taking more than [`MAX_PREDICATE_PARAMS`].
    pub fn has_compatible_signature(&self) -> bool {
        !self.is_invocable() || self.parameter_count() <= MAX_PREDICATE_PARAMS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_never_invocable() {
        let bound = BoundField::Member(MemberHandle::value("is_public"));
        assert!(!bound.is_invocable());
        assert_eq!(bound.parameter_count(), 0);
        assert!(bound.has_compatible_signature());
    }

    #[test]
    fn test_schema_field_is_never_invocable() {
        let bound = BoundField::Field(SchemaField::with_attname("owner", "owner_id"));
        assert!(!bound.is_invocable());
        assert!(bound.has_compatible_signature());
    }

    #[test]
    fn test_predicate_signature_limit() {
        for params in 0..=MAX_PREDICATE_PARAMS {
            let bound = BoundField::Member(MemberHandle::predicate("check", params));
            assert!(bound.has_compatible_signature(), "params = {}", params);
        }

        let bound = BoundField::Member(MemberHandle::predicate("check", 3));
        assert!(bound.is_invocable());
        assert!(!bound.has_compatible_signature());
    }

    #[test]
    fn test_schema_field_attname_defaults_to_name() {
        let field = SchemaField::new("title");
        assert_eq!(field.name(), "title");
        assert_eq!(field.attname(), "title");
    }
}
