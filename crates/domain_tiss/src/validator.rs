//! Schema Validator
//!
//! Validates candidate TISS documents against the XSD file on disk. The
//! validator fails closed: every problem, including a missing or broken
//! schema, comes back as an invalid [`ValidationOutcome`] rather than an
//! error.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::xsd::Schema;

/// Reported when validation runs before a schema has been provisioned
pub const SCHEMA_NOT_FOUND: &str = "TISS XSD schema file not found";

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Result of validating one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }

    fn single(error: impl Into<String>) -> Self {
        Self::invalid(vec![error.into()])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaStatus {
    Loaded,
    NotFound,
    Error,
}

/// Description of the schema file currently on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaInfo {
    pub status: SchemaStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_namespace: Option<String>,
    /// Prefix to URI; the default namespace is keyed by the empty string
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub namespaces: BTreeMap<String, String>,
    /// Names of the top-level `xs:element` declarations
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub root_elements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SchemaInfo {
    fn not_found() -> Self {
        Self::without_details(SchemaStatus::NotFound, "XSD schema file not found")
    }

    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self::without_details(SchemaStatus::Error, message)
    }

    fn without_details(status: SchemaStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            file_path: None,
            file_size: None,
            target_namespace: None,
            namespaces: BTreeMap::new(),
            root_elements: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.status == SchemaStatus::Loaded
    }
}

/// Validates XML against the schema at a fixed path
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema_path: PathBuf,
}

impl SchemaValidator {
    pub fn new(schema_path: impl Into<PathBuf>) -> Self {
        Self {
            schema_path: schema_path.into(),
        }
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    pub fn schema_exists(&self) -> bool {
        self.schema_path.is_file()
    }

    /// Validates a document held in memory.
    ///
    /// Errors are, in order of precedence: the schema file is missing, the
    /// schema does not compile, the document is not well-formed, and finally
    /// one `Line N: ...` entry per structural violation.
    pub fn validate(&self, xml: &str) -> ValidationOutcome {
        let schema = match self.load() {
            Ok(schema) => schema,
            Err(outcome) => return outcome,
        };

        let outcome = match schema.validate(xml) {
            Ok(diagnostics) if diagnostics.is_empty() => ValidationOutcome::valid(),
            Ok(diagnostics) => {
                ValidationOutcome::invalid(diagnostics.iter().map(ToString::to_string).collect())
            }
            Err(e) => ValidationOutcome::single(format!("XML syntax error: {e}")),
        };
        debug!(
            is_valid = outcome.is_valid,
            error_count = outcome.errors.len(),
            "TISS document validated"
        );
        outcome
    }

    /// Reads a document from disk and validates it
    pub fn validate_file(&self, path: impl AsRef<Path>) -> ValidationOutcome {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(xml) => self.validate(&xml),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                ValidationOutcome::single(format!("XML file not found: {}", path.display()))
            }
            Err(e) => ValidationOutcome::single(format!("Error reading XML file: {e}")),
        }
    }

    /// True when the schema file exists and compiles
    pub fn is_schema_usable(&self) -> bool {
        self.load().is_ok()
    }

    /// Describes the schema file without compiling it
    pub fn schema_info(&self) -> SchemaInfo {
        if !self.schema_exists() {
            return SchemaInfo::not_found();
        }

        let text = match std::fs::read_to_string(&self.schema_path) {
            Ok(text) => text,
            Err(e) => return SchemaInfo::error(e.to_string()),
        };
        let doc = match roxmltree::Document::parse(&text) {
            Ok(doc) => doc,
            Err(e) => return SchemaInfo::error(e.to_string()),
        };
        let root = doc.root_element();

        let namespaces = root
            .namespaces()
            .filter(|ns| ns.uri() != XML_NAMESPACE)
            .map(|ns| (ns.name().unwrap_or_default().to_string(), ns.uri().to_string()))
            .collect();
        let root_elements = root
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "element")
            .filter_map(|n| n.attribute("name"))
            .map(str::to_string)
            .collect();

        SchemaInfo {
            status: SchemaStatus::Loaded,
            file_path: Some(self.schema_path.display().to_string()),
            file_size: std::fs::metadata(&self.schema_path).ok().map(|m| m.len()),
            target_namespace: Some(
                root.attribute("targetNamespace").unwrap_or_default().to_string(),
            ),
            namespaces,
            root_elements,
            message: None,
        }
    }

    fn load(&self) -> Result<Schema, ValidationOutcome> {
        if !self.schema_exists() {
            return Err(ValidationOutcome::single(SCHEMA_NOT_FOUND));
        }
        let parse_error = |e: &dyn std::fmt::Display| {
            ValidationOutcome::single(format!("XSD schema parse error: {e}"))
        };
        let text = std::fs::read_to_string(&self.schema_path).map_err(|e| parse_error(&e))?;
        Schema::parse(&text).map_err(|e| parse_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback_schema::FALLBACK_XSD;
    use tempfile::TempDir;

    fn validator_with(schema: &str) -> (TempDir, SchemaValidator) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schema.xsd");
        std::fs::write(&path, schema).unwrap();
        (dir, SchemaValidator::new(path))
    }

    #[test]
    fn test_missing_schema_fails_closed() {
        let dir = TempDir::new().unwrap();
        let validator = SchemaValidator::new(dir.path().join("absent.xsd"));

        let outcome = validator.validate("<a/>");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors, vec![SCHEMA_NOT_FOUND.to_string()]);
        assert_eq!(validator.schema_info().status, SchemaStatus::NotFound);
        assert!(!validator.is_schema_usable());
    }

    #[test]
    fn test_broken_schema_reports_parse_error() {
        let (_dir, validator) = validator_with("<xs:schema");
        let outcome = validator.validate("<a/>");
        assert!(!outcome.is_valid);
        assert!(outcome.errors[0].starts_with("XSD schema parse error:"));
        assert_eq!(validator.schema_info().status, SchemaStatus::Error);
    }

    #[test]
    fn test_malformed_xml_reports_syntax_error() {
        let (_dir, validator) = validator_with(FALLBACK_XSD);
        let outcome = validator.validate("<ans:mensagemTISS><unclosed>");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("XML syntax error:"));
    }

    #[test]
    fn test_schema_info_for_fallback() {
        let (_dir, validator) = validator_with(FALLBACK_XSD);
        let info = validator.schema_info();

        assert!(info.is_loaded());
        assert_eq!(info.target_namespace.as_deref(), Some(crate::TISS_NAMESPACE));
        assert_eq!(info.root_elements, vec!["mensagemTISS".to_string()]);
        assert_eq!(info.namespaces.get("ans").map(String::as_str), Some(crate::TISS_NAMESPACE));
        assert_eq!(info.file_size, Some(FALLBACK_XSD.len() as u64));
    }

    #[test]
    fn test_validate_file_missing() {
        let (dir, validator) = validator_with(FALLBACK_XSD);
        let missing = dir.path().join("nope.xml");
        let outcome = validator.validate_file(&missing);
        assert_eq!(outcome.errors, vec![format!("XML file not found: {}", missing.display())]);
    }
}
