use etphone::logging;
use etphone::mcp_server::{parse_error, McpServer};
use serde_json::Value;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init("warn");

    let server = McpServer::new();
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    info!("etphone MCP server listening on stdio");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(request) => match server.respond(request).await {
                Some(response) => response,
                None => continue,
            },
            Err(err) => {
                warn!(error = %err, "unparseable request");
                parse_error()
            }
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
