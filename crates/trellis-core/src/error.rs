//! Error types for Trellis core operations.
//!
//! Boundary conversions from host-supplied JSON values are the only fallible
//! operations in this crate; tree transformations themselves are total.

use thiserror::Error;

/// Errors raised while interpreting a host-supplied value as a render node.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The value handed over by the host is not a JSON object, so it cannot
    /// carry properties or children.
    #[error("expected a render object, found {found}")]
    NotAnObject {
        /// JSON type name of the offending value.
        found: &'static str,
    },
}

/// Errors raised while resolving prop or slot names against a component.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// A source referenced a prop or slot name the component does not define.
    #[error("component '{component}' has no prop or slot named '{name}'")]
    UnknownProp {
        /// Identifier of the component that was queried.
        component: String,
        /// The unresolved prop or slot name.
        name: String,
    },
}
