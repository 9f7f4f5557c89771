//! Stdio transport — reads JSON-RPC from stdin, writes to stdout.

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::protocol::ProtocolHandler;
use crate::types::{McpError, McpResult};

use super::framing;

/// Stdio transport for desktop MCP clients.
pub struct StdioTransport {
    handler: ProtocolHandler,
}

impl StdioTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self { handler }
    }

    /// Run the transport loop — reads from stdin, writes to stdout.
    pub async fn run(&self) -> McpResult<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC until `input` reaches EOF.
    pub async fn serve<R, W>(&self, input: R, mut output: W) -> McpResult<()>
    where
        R: tokio::io::AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();

        tracing::info!("Stdio transport started");

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            if bytes_read == 0 {
                tracing::info!("EOF on stdin, shutting down");
                break;
            }

            let parsed = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => framing::parse_message(line),
                Err(e) => Err(McpError::ParseError(format!("Invalid UTF-8: {e}"))),
            };

            let framed = match parsed {
                Ok(msg) => match self.handler.handle_message(msg).await {
                    Some(response) => framing::frame_message(&response)?,
                    None => continue,
                },
                Err(e) => {
                    tracing::warn!("Parse error: {e}");
                    framing::frame_parse_error(&e)?
                }
            };

            output.write_all(framed.as_bytes()).await?;
            output.flush().await?;
        }

        Ok(())
    }
}
