//! Model type identity.
//!
//! A `ModelType` names a persisted entity the same way the ORM does: an
//! application label plus a model name. It is the partition key of the rule
//! registry, so two rules with the same codename on different models never
//! collide.

use std::fmt;

/// Identity of a model class.
///
/// # Example
/// ```
/// use model_rules::ModelType;
///
/// let post = ModelType::new("blog", "Post");
/// assert_eq!(post.label(), "blog.Post");
/// assert_eq!(post.to_string(), "blog.Post");
/// assert_ne!(post, ModelType::new("forum", "Post"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelType {
    app_label: String,
    model_name: String,
}

impl ModelType {
    /// Create a model identity from its application label and model name.
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model_name: model_name.into(),
        }
    }

    /// Application the model belongs to.
    pub fn app_label(&self) -> &str {
        &self.app_label
    }

    /// Class name of the model.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Dotted `app_label.ModelName` form.
    pub fn label(&self) -> String {
        format!("{}.{}", self.app_label, self.model_name)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_includes_app_label() {
        let a = ModelType::new("blog", "Post");
        let b = ModelType::new("forum", "Post");
        let c = ModelType::new("blog", "Post");

        assert_ne!(a, b);
        assert_eq!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_accessors() {
        let model = ModelType::new("shop", "Order");
        assert_eq!(model.app_label(), "shop");
        assert_eq!(model.model_name(), "Order");
        assert_eq!(model.label(), "shop.Order");
    }
}
