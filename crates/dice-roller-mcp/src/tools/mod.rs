//! MCP tool implementations.

pub mod registry;
pub mod roll_dice;

pub use registry::ToolRegistry;
