//! dice-roller MCP server — roll NdS dice through MCP resources and tools.

pub mod config;
pub mod context;
pub mod protocol;
pub mod repl;
pub mod resources;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use context::DiceContext;
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
