// stdio transport: newline-delimited JSON-RPC on stdin/stdout

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::{error_response, McpServer, RpcError};

/// Serve MCP on the process stdin/stdout until stdin closes
pub async fn serve_stdio(server: McpServer) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();
    serve(server, reader, writer).await
}

/// Read one message per line and write one response per line
pub async fn serve<R, W>(server: McpServer, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read MCP message")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(line) {
            Ok(incoming) => server.handle_message(incoming).await,
            Err(e) => {
                tracing::debug!(error = %e, "Rejecting malformed JSON-RPC line");
                Some(error_response(
                    Value::Null,
                    RpcError::parse_error(format!("Parse error: {}", e)),
                ))
            }
        };

        if let Some(response) = response {
            let mut out = serde_json::to_vec(&response).context("Failed to serialize MCP response")?;
            out.push(b'\n');
            writer
                .write_all(&out)
                .await
                .context("Failed to write MCP response")?;
            writer.flush().await.context("Failed to flush stdout")?;
        }
    }

    tracing::info!("stdin closed, stopping MCP server");
    Ok(())
}
