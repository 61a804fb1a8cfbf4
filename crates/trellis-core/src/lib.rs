//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types for the Trellis
//! component-composition engine. It includes:
//!
//! - **Render nodes**: A discriminated render-tree model ([`node::RenderNode`])
//!   that replaces the host framework's prefix-sniffing mapping convention
//!   with an explicit node kind and separate property/child maps
//! - **Attributes**: An ordered attribute bag with class handling
//!   ([`attributes::Attributes`])
//! - **Registries**: Read-only lookup context for theme hooks and element
//!   types ([`registry`] module), passed explicitly instead of reached
//!   through ambient singletons
//! - **Components**: Prop and slot definitions for composed components
//!   ([`component`] module)

pub mod attributes;
pub mod component;
pub mod error;
pub mod node;
pub mod registry;

pub use attributes::Attributes;
pub use component::{ComponentDefinition, PropDefinition, PropKind};
pub use error::{ComponentError, NodeError};
pub use node::{Child, NodeKind, RenderNode, PROPERTY_PREFIX};
pub use registry::{ElementInfo, ElementRegistry, ThemeHookInfo, ThemeRegistry};
