// ABOUTME: Line-delimited JSON-RPC transport over stdin/stdout for MCP clients
// ABOUTME: Reads one request per line and writes one response line per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Runcalc Contributors

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};

use super::mcp_request_processor::McpRequestProcessor;

/// Handles stdio transport for MCP communication
pub struct StdioTransport {
    processor: McpRequestProcessor,
}

impl StdioTransport {
    /// Creates a new stdio transport over a request processor
    #[must_use]
    pub const fn new(processor: McpRequestProcessor) -> Self {
        Self { processor }
    }

    /// Serve stdin/stdout until stdin reaches EOF
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        self.serve(BufReader::new(io::stdin()), io::stdout()).await
    }

    /// Serve line-delimited JSON-RPC from `reader`, writing responses to `writer`
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.processor.handle_message(&line).await else {
                continue;
            };

            let response_json = serde_json::to_string(&response)
                .map_err(|e| AppError::internal(format!("JSON serialization failed: {e}")))?;
            debug!("Sending MCP response: {}", response_json);

            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        info!("stdin closed, stopping MCP stdio transport");
        Ok(())
    }
}
