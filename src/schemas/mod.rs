pub mod schema;
pub mod validation;

pub use schema::{inline_root_schema, ResponseSchema, SchemaDocs, SchemaHandle};
pub use validation::{schema_violations, validate_payload};
