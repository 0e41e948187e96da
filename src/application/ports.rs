//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports.

use crate::domain::member::{MemberHandle, SchemaField};
use crate::domain::model::ModelType;
use crate::domain::rule::RulePermission;
use std::fmt::Debug;

/// Port for model metadata.
///
/// This abstraction isolates ORM-specific introspection from the
/// registration algorithm. Infrastructure provides a declarative
/// implementation (`ModelSchema`); host applications can implement it
/// directly on top of their own model metadata.
pub trait ModelMeta: Send + Sync + Debug {
    /// Identity of the model.
    fn model_type(&self) -> ModelType;

    /// Attribute name of the model's primary key (e.g. `id`).
    fn pk_attname(&self) -> &str;

    /// Look up an attribute, property or method of the model class.
    ///
    /// # Returns
    /// The resolved member, or None if the class has no member of that name
    fn resolve_member(&self, name: &str) -> Option<MemberHandle>;

    /// Look up a declared schema field by name.
    ///
    /// # Returns
    /// The field, or None if the model declares no such field
    fn field_by_name(&self, name: &str) -> Option<SchemaField>;
}

impl<T: ModelMeta + ?Sized> ModelMeta for &T {
    fn model_type(&self) -> ModelType {
        (**self).model_type()
    }

    fn pk_attname(&self) -> &str {
        (**self).pk_attname()
    }

    fn resolve_member(&self, name: &str) -> Option<MemberHandle> {
        (**self).resolve_member(name)
    }

    fn field_by_name(&self, name: &str) -> Option<SchemaField> {
        (**self).field_by_name(name)
    }
}

/// Port for concurrent rule storage.
///
/// Rules are partitioned by model type, then keyed by codename.
/// Infrastructure provides concrete implementations (ShardedRuleStorage).
pub trait RuleStorage: Send + Sync + Debug {
    /// Insert a rule under `(rule.model_type(), rule.codename())`.
    ///
    /// The existence check and the insert happen atomically for the model.
    ///
    /// # Returns
    /// The rule previously stored under the same key, if any
    fn upsert(&self, rule: RulePermission) -> Option<RulePermission>;

    /// Get a copy of the rule stored for a model and codename.
    fn get(&self, model: &ModelType, codename: &str) -> Option<RulePermission>;

    /// Check whether a rule exists for a model and codename.
    fn contains(&self, model: &ModelType, codename: &str) -> bool {
        self.get(model, codename).is_some()
    }

    /// All rules registered for a model, in no particular order.
    fn rules_for(&self, model: &ModelType) -> Vec<RulePermission>;

    /// Every model type with at least one rule.
    fn models(&self) -> Vec<ModelType>;

    /// Total number of rules across all models.
    fn len(&self) -> usize;

    /// Check if the storage holds no rules.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
