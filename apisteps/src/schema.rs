use crate::error::Error;
use jsonschema::JSONSchema;
use reqwest::Url;
use serde_json::{json, Value};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    thread,
};

const FILE_PREFIX: &str = "file://";
const ID_KEYWORD: &str = "$id";

pub trait SchemaValidator: Debug {
    /// `schema` is whatever the validator understands: schema text, an URL, a path.
    fn validate(&self, document: &str, schema: &str) -> Result<(), Error>;
}

/// Validates against a schema passed as JSON text.
#[derive(Debug, Default)]
pub struct RawSchemaValidator;

impl RawSchemaValidator {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaValidator for RawSchemaValidator {
    fn validate(&self, document: &str, schema: &str) -> Result<(), Error> {
        let schema: Value = serde_json::from_str(schema)
            .map_err(|e| Error::Deserialization(format!("invalid JSON schema: {}", e)))?;

        validate_against(document, &schema)
    }
}

/// Validates against a schema referenced by an URL or a path. Relative paths
/// that do not exist as given are looked up in the schema directory.
#[derive(Debug, Default)]
pub struct ReferenceSchemaValidator {
    schema_dir: Option<PathBuf>,
}

impl ReferenceSchemaValidator {
    pub fn new<P: Into<PathBuf>>(schema_dir: Option<P>) -> Self {
        Self {
            schema_dir: schema_dir.map(Into::into),
        }
    }

    fn resolve_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference.strip_prefix(FILE_PREFIX).unwrap_or(reference));

        match &self.schema_dir {
            Some(dir) if path.is_relative() && !path.exists() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl SchemaValidator for ReferenceSchemaValidator {
    fn validate(&self, document: &str, reference: &str) -> Result<(), Error> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            let schema = json!({ "$ref": reference });

            return validate_off_runtime(document, &schema, reference);
        }

        let path = self.resolve_path(reference);
        let mut schema: Value = serde_json::from_str(&fs::read_to_string(&path)?).map_err(|e| {
            Error::Deserialization(format!("invalid JSON schema in {}: {}", path.display(), e))
        })?;

        // relative `$ref`s resolve against the schema's own location
        if let Value::Object(fields) = &mut schema {
            if !fields.contains_key(ID_KEYWORD) {
                let url = Url::from_file_path(fs::canonicalize(&path)?).map_err(|_| {
                    Error::InvalidArgument(format!(
                        "{} can not be expressed as a file URL",
                        path.display()
                    ))
                })?;
                fields.insert(ID_KEYWORD.to_string(), Value::String(url.to_string()));
            }
        }

        validate_off_runtime(document, &schema, reference)
    }
}

/// Referenced schemas are fetched by a blocking client, keep it off the async runtime.
fn validate_off_runtime(document: &str, schema: &Value, reference: &str) -> Result<(), Error> {
    thread::scope(|scope| scope.spawn(|| validate_against(document, schema)).join()).unwrap_or_else(
        |_| {
            Err(Error::SchemaValidation(format!(
                "resolving {} panicked",
                reference
            )))
        },
    )
}

fn validate_against(document: &str, schema: &Value) -> Result<(), Error> {
    let instance: Value = serde_json::from_str(document)
        .map_err(|e| Error::Deserialization(format!("document is not JSON: {}", e)))?;
    let compiled = JSONSchema::compile(schema)
        .map_err(|e| Error::SchemaValidation(format!("schema does not compile: {}", e)))?;

    let violations: Vec<String> = match compiled.validate(&instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|e| format!("{} at \"{}\"", e, e.instance_path))
            .collect(),
    };

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::SchemaValidation(violations.join("; ")))
    }
}
