//! XML Schema subset engine
//!
//! Compiles the parts of XSD 1.0 that TISS message schemas are built from
//! and validates instance documents against them.
//!
//! # Supported constructs
//!
//! - global and local `xs:element` with `name`, `type`, `ref`, `minOccurs`,
//!   `maxOccurs` and `form`
//! - named and anonymous `xs:complexType` holding `xs:sequence` or
//!   `xs:choice` (nestable) followed by `xs:attribute` declarations
//! - `xs:simpleType` restrictions with `enumeration`, `length`, `minLength`
//!   and `maxLength` facets
//! - the built-ins listed in [`Builtin`]
//!
//! Anything else, including `xs:include` and `xs:import`, fails compilation
//! with [`SchemaError::Unsupported`].

mod builtins;
mod model;
mod validate;

pub use builtins::Builtin;
pub use model::{QName, Schema, SchemaError};
pub use validate::Diagnostic;
