//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`] wrapping the
//! error conditions of the underlying layers.

use thiserror::Error;

use trellis_core::{ComponentError, NodeError};

/// The main error type for Trellis operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrellisError {
    /// A host value could not be interpreted as a render node.
    #[error("render value error: {0}")]
    Node(#[from] NodeError),

    /// A prop or slot name could not be resolved against a component.
    #[error("component error: {0}")]
    Component(#[from] ComponentError),
}
