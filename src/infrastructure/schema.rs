//! Declarative model metadata.
//!
//! `ModelSchema` implements the [`ModelMeta`] port from data declared up
//! front: schema fields, properties and methods with their parameter
//! counts. Applications whose models are not backed by runtime reflection
//! describe them once at startup and register rules against the result.

use crate::application::ports::ModelMeta;
use crate::domain::member::{MemberHandle, SchemaField};
use crate::domain::model::ModelType;
use std::collections::BTreeMap;
use thiserror::Error;

/// Name of the primary key added when none is declared.
pub const AUTO_PK: &str = "id";

/// Error returned when building a `ModelSchema` fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Two fields or members share a name
    #[error("name {name} is declared more than once in model {model}")]
    DuplicateName { name: String, model: ModelType },
    /// A field or member was declared with an empty name
    #[error("empty field or member name in model {model}")]
    EmptyName { model: ModelType },
    /// `primary_key` was called more than once
    #[error("model {model} declares primary key {second} after {first}")]
    DuplicatePrimaryKey {
        first: String,
        second: String,
        model: ModelType,
    },
}

/// Model metadata built from declarations.
///
/// # Example
/// ```
/// use model_rules::{ModelMeta, ModelSchema};
///
/// let comment = ModelSchema::builder("blog", "Comment")
///     .field("body")
///     .foreign_key("author")
///     .property("is_approved")
///     .method("is_author", 2)
///     .build()
///     .unwrap();
///
/// assert_eq!(comment.pk_attname(), "id");
/// assert_eq!(comment.field_by_name("author").unwrap().attname(), "author_id");
/// assert!(comment.resolve_member("is_author").unwrap().is_invocable());
/// assert!(comment.resolve_member("body").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ModelSchema {
    model_type: ModelType,
    pk: SchemaField,
    fields: BTreeMap<String, SchemaField>,
    members: BTreeMap<String, MemberHandle>,
}

impl ModelSchema {
    /// Start declaring a model.
    pub fn builder(
        app_label: impl Into<String>,
        model_name: impl Into<String>,
    ) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            model_type: ModelType::new(app_label, model_name),
            pk: None,
            extra_pk: None,
            declarations: Vec::new(),
        }
    }

    /// Identity of the described model.
    pub fn model(&self) -> &ModelType {
        &self.model_type
    }

    pub fn primary_key(&self) -> &SchemaField {
        &self.pk
    }

    /// Declared schema fields, primary key included, sorted by name.
    pub fn fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.values()
    }

    /// Declared properties and methods, sorted by name.
    pub fn members(&self) -> impl Iterator<Item = &MemberHandle> {
        self.members.values()
    }
}

impl ModelMeta for ModelSchema {
    fn model_type(&self) -> ModelType {
        self.model_type.clone()
    }

    fn pk_attname(&self) -> &str {
        self.pk.attname()
    }

    fn resolve_member(&self, name: &str) -> Option<MemberHandle> {
        self.members.get(name).cloned()
    }

    fn field_by_name(&self, name: &str) -> Option<SchemaField> {
        self.fields.get(name).cloned()
    }
}

#[derive(Debug)]
enum Declaration {
    Field(SchemaField),
    Member(MemberHandle),
}

impl Declaration {
    fn name(&self) -> &str {
        match self {
            Declaration::Field(field) => field.name(),
            Declaration::Member(member) => member.name(),
        }
    }
}

/// Builder for constructing a `ModelSchema`.
#[derive(Debug)]
pub struct ModelSchemaBuilder {
    model_type: ModelType,
    pk: Option<SchemaField>,
    extra_pk: Option<String>,
    declarations: Vec<Declaration>,
}

impl ModelSchemaBuilder {
    /// Declare the primary key field.
    ///
    /// Without this call the model gets an implicit `id` primary key.
    /// A model has exactly one primary key, so calling this twice makes
    /// `build` fail.
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        let field = SchemaField::new(name);
        if self.pk.is_some() {
            self.extra_pk.get_or_insert_with(|| field.name().to_string());
            return self;
        }
        self.pk = Some(field.clone());
        self.declarations.push(Declaration::Field(field));
        self
    }

    /// Declare a schema field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.declarations
            .push(Declaration::Field(SchemaField::new(name)));
        self
    }

    /// Declare a relation field, stored under `<name>_id`.
    pub fn foreign_key(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let attname = format!("{}_id", name);
        self.declarations
            .push(Declaration::Field(SchemaField::with_attname(name, attname)));
        self
    }

    /// Declare a plain attribute or computed property.
    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.declarations
            .push(Declaration::Member(MemberHandle::value(name)));
        self
    }

    /// Declare a method with `params` parameters, receiver included.
    pub fn method(mut self, name: impl Into<String>, params: usize) -> Self {
        self.declarations
            .push(Declaration::Member(MemberHandle::predicate(name, params)));
        self
    }

    /// Build the schema.
    ///
    /// # Errors
    /// Returns `SchemaError::EmptyName` for an empty name and
    /// `SchemaError::DuplicateName` if a name is declared twice, including
    /// a field named like the implicit primary key. Returns
    /// `SchemaError::DuplicatePrimaryKey` if `primary_key` was called twice.
    pub fn build(self) -> Result<ModelSchema, SchemaError> {
        if let (Some(first), Some(second)) = (&self.pk, self.extra_pk) {
            return Err(SchemaError::DuplicatePrimaryKey {
                first: first.name().to_string(),
                second,
                model: self.model_type,
            });
        }

        let mut declarations = self.declarations;
        let pk = match self.pk {
            Some(pk) => pk,
            None => {
                let pk = SchemaField::new(AUTO_PK);
                declarations.insert(0, Declaration::Field(pk.clone()));
                pk
            }
        };

        let mut fields = BTreeMap::new();
        let mut members = BTreeMap::new();

        for declaration in declarations {
            let name = declaration.name().to_string();
            if name.is_empty() {
                return Err(SchemaError::EmptyName {
                    model: self.model_type,
                });
            }
            if fields.contains_key(&name) || members.contains_key(&name) {
                return Err(SchemaError::DuplicateName {
                    name,
                    model: self.model_type,
                });
            }
            match declaration {
                Declaration::Field(field) => {
                    fields.insert(name, field);
                }
                Declaration::Member(member) => {
                    members.insert(name, member);
                }
            }
        }

        Ok(ModelSchema {
            model_type: self.model_type,
            pk,
            fields,
            members,
        })
    }
}
