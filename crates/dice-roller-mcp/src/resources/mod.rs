//! MCP resource implementations.

pub mod registry;
pub mod roll;
pub mod templates;

pub use registry::ResourceRegistry;
