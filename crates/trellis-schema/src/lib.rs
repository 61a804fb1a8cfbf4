//! Trellis Schema Engine
//!
//! Canonicalization and compatibility checking for the JSON-Schema-like
//! fragments that describe component props. The engine answers one question:
//! can a data source producing values of shape `checked` feed a component
//! input requiring shape `reference`?
//!
//! The pipeline has three stages:
//!
//! - [`resolver::ReferencesResolver`]: inlines `$ref` pointers through a
//!   host-supplied [`resolver::SchemaSource`], with a recursion depth cap
//! - [`canonical::canonicalize`]: reduces a fragment to a normalized,
//!   comparably-equal form (authoring quirks fixed, irrelevant keys dropped,
//!   multi-type schemas expanded into `anyOf`, keys sorted)
//! - [`compat::is_compatible`]: the reference-anchored compatibility verdict
//!
//! All functions are total and side-effect free: undecidable or malformed
//! input degrades to "incompatible" rather than raising, favoring safe
//! exclusion over silent misconfiguration.

pub mod canonical;
pub mod compat;
pub mod resolver;
mod scalar;

pub use canonical::canonicalize;
pub use compat::is_compatible;
pub use resolver::{InMemoryDefinitions, ReferencesResolver, SchemaSource};
