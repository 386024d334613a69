//! Generic hierarchical navigation menus.
//!
//! A menu definition names a record model and, by field-name indirection,
//! which of its attributes act as identifier, title, URI and children
//! collection. The resolver walks that description into a tree of display
//! nodes.

pub mod definition;
pub mod resolver;

pub use definition::{MenuDefinition, MenuDefinitionRegistry};
pub use resolver::{MenuNode, MenuResolution, MenuTreeResolver};
