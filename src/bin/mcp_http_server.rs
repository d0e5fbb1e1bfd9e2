use clap::Parser;
use etphone::logging;
use etphone::mcp_server::McpServer;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::net::SocketAddr;
use tracing::info;
use warp::http::StatusCode;
use warp::{Filter, Reply};

/// MCP endpoint for Ethiopian phone number classification over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, env = "ETPHONE_MCP_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Browser origin allowed to call the endpoint (repeatable). None by default
    #[arg(long, env = "ETPHONE_MCP_ALLOW_ORIGIN", value_delimiter = ',')]
    allow_origin: Vec<String>,
}

async fn handle_mcp_request(request: Value, server: McpServer) -> Result<warp::reply::Response, Infallible> {
    match server.respond(request).await {
        Some(response) => Ok(warp::reply::json(&response).into_response()),
        // Notifications are accepted without a body
        None => Ok(warp::reply::with_status(warp::reply(), StatusCode::ACCEPTED).into_response()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init("info");

    if let Some(origin) = args.allow_origin.iter().find(|o| !o.contains("://")) {
        anyhow::bail!("invalid origin {:?}, expected scheme://host[:port]", origin);
    }

    // Reachable from browsers and other hosts, so no local file reads
    let server = McpServer::without_file_access();

    let cors = warp::cors()
        .allow_origins(args.allow_origin.iter().map(String::as_str))
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["POST", "OPTIONS"]);

    let mcp_route = warp::path("mcp")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(move |request: Value| {
            let server = server.clone();
            async move { handle_mcp_request(request, server).await }
        });

    let health_route = warp::path("health").and(warp::get()).map(|| {
        warp::reply::json(&json!({
            "status": "ok",
            "service": "etphone-mcp"
        }))
    });

    let routes = mcp_route.or(health_route).with(cors);

    info!(addr = %args.addr, "MCP HTTP server starting");
    info!("health check: http://{}/health", args.addr);
    info!("MCP endpoint: http://{}/mcp", args.addr);

    warp::serve(routes).run(args.addr).await;
    Ok(())
}
