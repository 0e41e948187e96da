//! Central registry of authorization rules.
//!
//! The registry maps each model type to its rules by codename. Rules are
//! validated against the model's metadata before they are stored, so every
//! descriptor that can be looked up is bound to a member that exists and can
//! be invoked with at most one caller-supplied argument.

use crate::application::metrics::Metrics;
use crate::application::ports::{ModelMeta, RuleStorage};
use crate::domain::error::{Result, RulesError};
use crate::domain::member::BoundField;
use crate::domain::model::ModelType;
use crate::domain::rule::{RulePermission, RuleRegistration};
use crate::infrastructure::storage::ShardedRuleStorage;
use tracing::{debug, warn};

/// Resolve a field name against a model.
///
/// Class members (attributes, properties, methods) take precedence over
/// declared schema fields.
pub fn resolve_bound_field<M>(model: &M, field_name: &str) -> Option<BoundField>
where
    M: ModelMeta + ?Sized,
{
    model
        .resolve_member(field_name)
        .map(BoundField::Member)
        .or_else(|| model.field_by_name(field_name).map(BoundField::Field))
}

/// Registry managing all rule descriptors.
///
/// Generic over the storage implementation. The default,
/// [`ShardedRuleStorage`], supports concurrent registration and lookup.
///
/// # Example
/// ```
/// use model_rules::{ModelSchema, RuleRegistration, RuleRegistry};
///
/// let post = ModelSchema::builder("blog", "Post")
///     .field("title")
///     .method("is_author", 2)
///     .build()
///     .unwrap();
///
/// let registry = RuleRegistry::new();
/// registry
///     .register(&post, RuleRegistration::new("can_edit").field_name("is_author"))
///     .unwrap();
///
/// let rule = registry.get("can_edit", post.model()).unwrap();
/// assert_eq!(rule.field_name(), "is_author");
/// assert_eq!(rule.view_param_pk(), "id");
/// assert!(registry.get("can_delete", post.model()).is_none());
/// ```
#[derive(Debug)]
pub struct RuleRegistry<S = ShardedRuleStorage>
where
    S: RuleStorage,
{
    storage: S,
    metrics: Metrics,
    warn_on_overwrite: bool,
}

impl RuleRegistry<ShardedRuleStorage> {
    /// Create an empty registry backed by sharded in-memory storage.
    pub fn new() -> Self {
        Self::with_storage(ShardedRuleStorage::new())
    }

    /// Create a builder for configuring a registry.
    pub fn builder() -> RuleRegistryBuilder<ShardedRuleStorage> {
        RuleRegistryBuilder::new()
    }
}

impl Default for RuleRegistry<ShardedRuleStorage> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> RuleRegistry<S>
where
    S: RuleStorage,
{
    /// Create an empty registry over the given storage.
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage,
            metrics: Metrics::new(),
            warn_on_overwrite: true,
        }
    }

    /// Validate a rule against its model and store it.
    ///
    /// `field_name` defaults to the codename and `view_param_pk` to the
    /// model's primary key attribute name. Registering a codename that
    /// already exists for the model replaces the previous rule and logs a
    /// warning, unless the registration allows the overwrite.
    ///
    /// # Errors
    /// - `RulesError::NonexistentFieldName` if the field name resolves to
    ///   neither a member nor a schema field of the model
    /// - `RulesError::TooManyParameters` if it resolves to a method taking
    ///   more than the receiver and one argument
    ///
    /// The registry is left untouched on error.
    pub fn register<M>(&self, model: &M, registration: RuleRegistration) -> Result<()>
    where
        M: ModelMeta + ?Sized,
    {
        let model_type = model.model_type();

        if let Err(err) = validate(model, &model_type, &registration) {
            debug!(
                codename = registration.codename(),
                model = %model_type,
                error = %err,
                "rule registration rejected"
            );
            self.metrics.record_rejected();
            return Err(err);
        }

        let overwrite_allowed = registration.overwrite_allowed();
        let rule = registration.into_permission(model_type, model.pk_attname());
        let codename = rule.codename().to_string();
        let model_type = rule.model_type().clone();

        let previous = self.storage.upsert(rule);
        self.metrics.record_registered();

        if previous.is_some() {
            self.metrics.record_overwritten();
            if self.warn_on_overwrite && !overwrite_allowed {
                warn!(
                    codename = %codename,
                    model = %model_type,
                    "Careful rule {} being overwritten, make sure it has not been registered twice",
                    codename
                );
            } else {
                debug!(codename = %codename, model = %model_type, "rule replaced");
            }
        } else {
            debug!(codename = %codename, model = %model_type, "rule registered");
        }

        Ok(())
    }

    /// Look up a rule by codename for a model.
    ///
    /// Returns None when no such rule was registered.
    pub fn get(&self, codename: &str, model: &ModelType) -> Option<RulePermission> {
        let rule = self.storage.get(model, codename);
        self.metrics.record_lookup(rule.is_some());
        rule
    }

    /// Check whether a rule is registered, without touching lookup metrics.
    pub fn contains(&self, codename: &str, model: &ModelType) -> bool {
        self.storage.contains(model, codename)
    }

    /// All rules registered for a model, sorted by codename.
    pub fn rules_for(&self, model: &ModelType) -> Vec<RulePermission> {
        let mut rules = self.storage.rules_for(model);
        rules.sort_by(|a, b| a.codename().cmp(b.codename()));
        rules
    }

    /// Every model with at least one rule, sorted.
    pub fn models(&self) -> Vec<ModelType> {
        let mut models = self.storage.models();
        models.sort();
        models
    }

    /// Get the number of registered rules across all models.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get the registry's metrics.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Get the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn validate<M>(model: &M, model_type: &ModelType, registration: &RuleRegistration) -> Result<()>
where
    M: ModelMeta + ?Sized,
{
    let field_name = registration.field_name_or_codename();

    let bound = resolve_bound_field(model, field_name).ok_or_else(|| {
        RulesError::NonexistentFieldName {
            field_name: field_name.to_string(),
            codename: registration.codename().to_string(),
            model: model_type.clone(),
        }
    })?;

    if !bound.has_compatible_signature() {
        return Err(RulesError::TooManyParameters {
            field_name: field_name.to_string(),
            codename: registration.codename().to_string(),
            model: model_type.clone(),
            params: bound.parameter_count(),
        });
    }

    Ok(())
}

/// Builder for constructing a `RuleRegistry`.
#[derive(Debug)]
pub struct RuleRegistryBuilder<S> {
    storage: S,
    warn_on_overwrite: bool,
}

impl RuleRegistryBuilder<ShardedRuleStorage> {
    fn new() -> Self {
        Self {
            storage: ShardedRuleStorage::new(),
            warn_on_overwrite: true,
        }
    }
}

impl<S> RuleRegistryBuilder<S>
where
    S: RuleStorage,
{
    /// Use a custom storage backend.
    pub fn with_storage<T: RuleStorage>(self, storage: T) -> RuleRegistryBuilder<T> {
        RuleRegistryBuilder {
            storage,
            warn_on_overwrite: self.warn_on_overwrite,
        }
    }

    /// Log overwrites at `warn` (default) or only at `debug`.
    ///
    /// Turning warnings off is meant for test setups that re-register rules
    /// on purpose.
    pub fn with_overwrite_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_overwrite = enabled;
        self
    }

    pub fn build(self) -> RuleRegistry<S> {
        RuleRegistry {
            storage: self.storage,
            metrics: Metrics::new(),
            warn_on_overwrite: self.warn_on_overwrite,
        }
    }
}
