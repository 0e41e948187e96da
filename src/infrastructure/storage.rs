//! Storage implementations for registered rules.
//!
//! Provides concurrent, sharded storage partitioned by model type.

use crate::application::ports::RuleStorage;
use crate::domain::model::ModelType;
use crate::domain::rule::RulePermission;
use ahash::RandomState;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

type RulesByCodename = HashMap<String, RulePermission>;

/// Thread-safe sharded rule storage backed by DashMap.
///
/// The outer map is keyed by model type; each entry holds that model's
/// rules by codename. Writes lock a single shard, so registering rules for
/// one model never blocks lookups on models living in other shards.
#[derive(Debug, Default)]
pub struct ShardedRuleStorage {
    map: DashMap<ModelType, RulesByCodename, RandomState>,
}

impl ShardedRuleStorage {
    /// Create a new sharded storage instance.
    pub fn new() -> Self {
        Self {
            map: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Number of models with at least one rule.
    pub fn model_count(&self) -> usize {
        self.map.len()
    }
}

impl Clone for ShardedRuleStorage {
    fn clone(&self) -> Self {
        let new_storage = Self::new();
        for entry in self.map.iter() {
            new_storage
                .map
                .insert(entry.key().clone(), entry.value().clone());
        }
        new_storage
    }
}

impl RuleStorage for ShardedRuleStorage {
    fn upsert(&self, rule: RulePermission) -> Option<RulePermission> {
        let mut rules = self.map.entry(rule.model_type().clone()).or_default();
        rules.insert(rule.codename().to_string(), rule)
    }

    fn get(&self, model: &ModelType, codename: &str) -> Option<RulePermission> {
        self.map
            .get(model)
            .and_then(|rules| rules.get(codename).cloned())
    }

    fn contains(&self, model: &ModelType, codename: &str) -> bool {
        self.map
            .get(model)
            .is_some_and(|rules| rules.contains_key(codename))
    }

    fn rules_for(&self, model: &ModelType) -> Vec<RulePermission> {
        self.map
            .get(model)
            .map(|rules| rules.values().cloned().collect())
            .unwrap_or_default()
    }

    fn models(&self) -> Vec<ModelType> {
        self.map.iter().map(|entry| entry.key().clone()).collect()
    }

    fn len(&self) -> usize {
        self.map.iter().map(|entry| entry.value().len()).sum()
    }
}

// Implement RuleStorage for Arc<ShardedRuleStorage> so one storage can back several registries
impl RuleStorage for Arc<ShardedRuleStorage> {
    fn upsert(&self, rule: RulePermission) -> Option<RulePermission> {
        (**self).upsert(rule)
    }

    fn get(&self, model: &ModelType, codename: &str) -> Option<RulePermission> {
        (**self).get(model, codename)
    }

    fn contains(&self, model: &ModelType, codename: &str) -> bool {
        (**self).contains(model, codename)
    }

    fn rules_for(&self, model: &ModelType) -> Vec<RulePermission> {
        (**self).rules_for(model)
    }

    fn models(&self) -> Vec<ModelType> {
        (**self).models()
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(model: &ModelType, codename: &str, field_name: &str) -> RulePermission {
        RulePermission::new(codename, model.clone(), field_name, "id", "")
    }

    #[test]
    fn test_basic_operations() {
        let storage = ShardedRuleStorage::new();
        let post = ModelType::new("blog", "Post");

        assert!(storage.upsert(rule(&post, "can_view", "is_public")).is_none());
        assert!(storage.upsert(rule(&post, "can_edit", "is_author")).is_none());

        assert_eq!(
            storage.get(&post, "can_view").unwrap().field_name(),
            "is_public"
        );
        assert!(storage.get(&post, "can_delete").is_none());
        assert!(storage.contains(&post, "can_edit"));

        assert_eq!(storage.len(), 2);
        assert_eq!(storage.model_count(), 1);
        assert!(!storage.is_empty());
    }

    #[test]
    fn test_upsert_returns_previous() {
        let storage = ShardedRuleStorage::new();
        let post = ModelType::new("blog", "Post");

        storage.upsert(rule(&post, "can_view", "is_public"));
        let previous = storage.upsert(rule(&post, "can_view", "is_visible"));

        assert_eq!(previous.unwrap().field_name(), "is_public");
        assert_eq!(
            storage.get(&post, "can_view").unwrap().field_name(),
            "is_visible"
        );
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_models_are_partitions() {
        let storage = ShardedRuleStorage::new();
        let post = ModelType::new("blog", "Post");
        let comment = ModelType::new("blog", "Comment");

        storage.upsert(rule(&post, "can_view", "is_public"));
        storage.upsert(rule(&comment, "can_view", "is_approved"));

        assert_eq!(
            storage.get(&post, "can_view").unwrap().field_name(),
            "is_public"
        );
        assert_eq!(
            storage.get(&comment, "can_view").unwrap().field_name(),
            "is_approved"
        );
        assert_eq!(storage.rules_for(&post).len(), 1);
        assert!(storage
            .rules_for(&ModelType::new("blog", "Tag"))
            .is_empty());

        let mut models = storage.models();
        models.sort();
        assert_eq!(models, vec![comment, post]);
    }

    #[test]
    fn test_clone_is_independent() {
        let storage = ShardedRuleStorage::new();
        let post = ModelType::new("blog", "Post");
        storage.upsert(rule(&post, "can_view", "is_public"));

        let copy = storage.clone();
        copy.upsert(rule(&post, "can_edit", "is_author"));

        assert_eq!(storage.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_concurrent_access() {
        use std::thread;

        let storage = Arc::new(ShardedRuleStorage::new());
        let mut handles = vec![];

        for i in 0..10 {
            let storage_clone = Arc::clone(&storage);
            let handle = thread::spawn(move || {
                let model = ModelType::new("app", format!("Model{}", i));
                for j in 0..100 {
                    storage_clone.upsert(rule(&model, &format!("rule_{}", j), "field"));
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(storage.len(), 1000);
        assert_eq!(storage.model_count(), 10);
    }
}
