//! The JSON shape a generation call asks the model to return.

use std::sync::Arc;

use schemars::{
    gen::SchemaSettings,
    schema::{RootSchema, Schema, SchemaObject},
    JsonSchema,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::error;

/// Doc text lifted from a response struct by `#[response_schema]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaDocs {
    pub description: Option<&'static str>,
    /// `(property name, doc)` pairs, property names already renamed.
    pub fields: &'static [(&'static str, &'static str)],
}

/// A response type's schema, built once and shared.
#[derive(Clone, Debug)]
pub struct SchemaHandle {
    name: &'static str,
    rust_type: &'static str,
    document: Arc<Value>,
}

impl SchemaHandle {
    /// Generate the schema for `T`, titled `name`, with `docs` filling any
    /// description schemars left empty.
    pub fn build<T: JsonSchema>(
        name: &'static str,
        rust_type: &'static str,
        docs: SchemaDocs,
    ) -> Self {
        let mut root = inline_root_schema::<T>();
        annotate(&mut root.schema, name, docs);

        let document = serde_json::to_value(&root).unwrap_or_else(|err| {
            error!(schema = name, error = %err, "Response schema could not be serialized");
            Value::Object(Map::new())
        });

        Self {
            name,
            rust_type,
            document: Arc::new(document),
        }
    }

    pub fn schema_name(&self) -> &'static str {
        self.name
    }

    pub fn type_name(&self) -> &'static str {
        self.rust_type
    }

    /// Full draft-07 document, `$schema` key included.
    pub fn schema_json(&self) -> &Value {
        &self.document
    }

    /// The document as sent to the model. Some providers reject `$schema`.
    pub fn wire_schema(&self) -> Value {
        let mut wire = self.schema_json().clone();
        if let Some(object) = wire.as_object_mut() {
            object.remove("$schema");
        }
        wire
    }
}

/// Types whose JSON shape is requested from the model.
///
/// Implemented through `#[response_schema]`.
pub trait ResponseSchema: DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static SchemaHandle;
}

/// Draft-07 root schema with nested types written out in place, so the
/// model never has to follow a `$ref`.
pub fn inline_root_schema<T: JsonSchema>() -> RootSchema {
    SchemaSettings::draft07()
        .with(|settings| settings.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>()
}

fn annotate(root: &mut SchemaObject, name: &'static str, docs: SchemaDocs) {
    let metadata = root.metadata();
    metadata.title = Some(name.to_string());
    if metadata.description.is_none() {
        metadata.description = docs.description.map(str::to_string);
    }

    let Some(object) = root.object.as_mut() else {
        return;
    };
    for (property, doc) in docs.fields {
        if let Some(Schema::Object(property_schema)) = object.properties.get_mut(*property) {
            property_schema
                .metadata()
                .description
                .get_or_insert_with(|| doc.to_string());
        }
    }
}
