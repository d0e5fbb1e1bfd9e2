use serde_json::{json, Value};
use std::fs;
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::analyze_text;
use crate::filter::{parse_list, FilterError, Filters};
use crate::{classify, PhoneInput};

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Unknown method: {0}")]
    UnknownMethod(String),
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("{0}")]
    InvalidParams(String),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("Error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl McpError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i64 {
        match self {
            McpError::UnknownMethod(_) | McpError::UnknownTool(_) => -32601,
            McpError::InvalidParams(_) | McpError::Filter(_) => -32602,
            McpError::Io { .. } => -32603,
        }
    }

    pub fn to_json(&self, id: Value) -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        })
    }
}

/// Parse error response for a request that was not valid JSON.
pub fn parse_error() -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": Value::Null,
        "error": {
            "code": -32700,
            "message": "Parse error"
        }
    })
}

#[derive(Clone)]
pub struct McpServer {
    allow_file_access: bool,
}

impl Default for McpServer {
    fn default() -> Self {
        Self::new()
    }
}

impl McpServer {
    pub fn new() -> Self {
        Self { allow_file_access: true }
    }

    /// A server without the `analyze_file` tool, for transports reachable by
    /// other hosts or browsers.
    pub fn without_file_access() -> Self {
        Self { allow_file_access: false }
    }

    pub async fn handle_request(&self, request: Value) -> Result<Value, McpError> {
        let method = request["method"].as_str().unwrap_or("");
        debug!(method, "handling request");

        match method {
            "initialize" => Ok(self.handle_initialize()),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tool_call(&request["params"]),
            _ => Err(McpError::UnknownMethod(method.to_string())),
        }
    }

    /// Runs a request and wraps the outcome in a JSON-RPC envelope carrying
    /// the request id. Notifications (requests without an `id`) get no
    /// response at all.
    pub async fn respond(&self, request: Value) -> Option<Value> {
        let Some(id) = request.get("id").cloned() else {
            let method = request["method"].as_str().unwrap_or("");
            if !method.starts_with("notifications/") {
                if let Err(err) = self.handle_request(request.clone()).await {
                    warn!(code = err.code(), error = %err, "notification failed");
                }
            } else {
                debug!(method, "notification received");
            }
            return None;
        };

        let response = match self.handle_request(request).await {
            Ok(mut response) => {
                if let Some(obj) = response.as_object_mut() {
                    obj.insert("jsonrpc".to_string(), json!("2.0"));
                    if !id.is_null() {
                        obj.insert("id".to_string(), id);
                    }
                }
                response
            }
            Err(err) => {
                warn!(code = err.code(), error = %err, "request failed");
                err.to_json(id)
            }
        };
        Some(response)
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "result": {
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "etphone",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        let filter_properties = json!({
            "types": {
                "description": "Phone types to accept: all, mobile, fixedLine, special, shortCode (array or comma-separated). Default: mobile, fixedLine",
                "type": ["array", "string"],
                "items": { "type": "string" }
            },
            "providers": {
                "description": "Providers to accept: all, ethioTelecom, safaricom (array or comma-separated). Default: all",
                "type": ["array", "string"],
                "items": { "type": "string" }
            }
        });

        let mut classify_properties = json!({
            "phone": {
                "type": ["string", "integer"],
                "description": "Phone number to classify"
            }
        });
        let mut analyze_text_properties = json!({
            "text": {
                "type": "string",
                "description": "Text to scan for phone numbers"
            }
        });
        let mut analyze_file_properties = json!({
            "file_path": {
                "type": "string",
                "description": "Path to the file to scan for phone numbers"
            }
        });
        for properties in [&mut classify_properties, &mut analyze_text_properties, &mut analyze_file_properties] {
            if let (Some(target), Some(filters)) = (properties.as_object_mut(), filter_properties.as_object()) {
                target.extend(filters.clone());
            }
        }

        let mut tools = json!({
            "result": {
                "tools": [
                    {
                        "name": "classify_phone",
                        "description": "Validate an Ethiopian phone number and report its provider and type",
                        "inputSchema": {
                            "type": "object",
                            "properties": classify_properties,
                            "required": ["phone"]
                        }
                    },
                    {
                        "name": "analyze_text",
                        "description": "Find and classify Ethiopian phone numbers in text",
                        "inputSchema": {
                            "type": "object",
                            "properties": analyze_text_properties,
                            "required": ["text"]
                        }
                    }
                ]
            }
        });

        if self.allow_file_access {
            if let Some(tools) = tools["result"]["tools"].as_array_mut() {
                tools.push(json!({
                    "name": "analyze_file",
                    "description": "Find and classify Ethiopian phone numbers in a local file",
                    "inputSchema": {
                        "type": "object",
                        "properties": analyze_file_properties,
                        "required": ["file_path"]
                    }
                }));
            }
        }

        tools
    }

    fn handle_tool_call(&self, params: &Value) -> Result<Value, McpError> {
        let tool_name = params["name"]
            .as_str()
            .ok_or_else(|| McpError::InvalidParams("Missing tool name".to_string()))?;

        let arguments = &params["arguments"];
        debug!(tool = tool_name, "calling tool");

        match tool_name {
            "classify_phone" => self.classify_phone(arguments),
            "analyze_text" => self.analyze_text(arguments),
            "analyze_file" if self.allow_file_access => self.analyze_file(arguments),
            _ => Err(McpError::UnknownTool(tool_name.to_string())),
        }
    }

    fn classify_phone(&self, args: &Value) -> Result<Value, McpError> {
        let phone: PhoneInput = match &args["phone"] {
            Value::Null => return Err(McpError::InvalidParams("phone is required".to_string())),
            value => serde_json::from_value(value.clone())
                .map_err(|_| McpError::InvalidParams("phone must be a string or a non-negative integer".to_string()))?,
        };
        let filters = filters_from_args(args)?;

        let classification = classify(phone.clone(), &filters);
        let text = match (&classification.phone_number, classification.provider, classification.phone_type) {
            (Some(number), Some(provider), Some(phone_type)) => {
                format!("{} is a valid {} {} number", number, provider, phone_type)
            }
            _ => format!("{} is not a valid phone number for the requested types and providers", phone),
        };

        Ok(json!({
            "result": {
                "content": [{
                    "type": "text",
                    "text": text
                }],
                "data": classification
            }
        }))
    }

    fn analyze_text(&self, args: &Value) -> Result<Value, McpError> {
        let text = args["text"]
            .as_str()
            .ok_or_else(|| McpError::InvalidParams("text is required".to_string()))?;
        let filters = filters_from_args(args)?;

        Ok(report_response(analyze_text(text, &filters), "text input"))
    }

    fn analyze_file(&self, args: &Value) -> Result<Value, McpError> {
        let file_path = args["file_path"]
            .as_str()
            .ok_or_else(|| McpError::InvalidParams("file_path is required".to_string()))?;
        let filters = filters_from_args(args)?;

        let content = fs::read_to_string(file_path).map_err(|source| McpError::Io {
            path: file_path.to_string(),
            source,
        })?;

        Ok(report_response(analyze_text(&content, &filters), file_path))
    }
}

fn report_response(report: crate::extraction::TextReport, source: &str) -> Value {
    let mut summary = format!(
        "Analysis of {} complete: {} lines, {} candidate numbers, {} valid\n",
        source, report.lines_processed, report.candidates, report.valid
    );
    for (provider, count) in &report.providers {
        summary.push_str(&format!("- {}: {}\n", provider, count));
    }
    for (phone_type, count) in &report.phone_types {
        summary.push_str(&format!("- {}: {}\n", phone_type, count));
    }

    json!({
        "result": {
            "content": [{
                "type": "text",
                "text": summary
            }],
            "data": report
        }
    })
}

/// Reads `types` and `providers` from tool arguments. Either may be an array
/// of tokens or a comma-separated string; absent means the default.
fn filters_from_args(args: &Value) -> Result<Filters, McpError> {
    let mut filters = Filters::default();

    if let Some(types) = tokens(&args["types"], "types")? {
        filters.types = parse_list(&types)?;
    }
    if let Some(providers) = tokens(&args["providers"], "providers")? {
        filters.providers = parse_list(&providers)?;
    }

    Ok(filters)
}

fn tokens(value: &Value, field: &str) -> Result<Option<String>, McpError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| McpError::InvalidParams(format!("{} must contain only strings", field)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Some(items.join(","))),
        _ => Err(McpError::InvalidParams(format!("{} must be an array or a string", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(server: &McpServer, name: &str, arguments: Value) -> Result<Value, McpError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        });
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(server.handle_request(request))
    }

    #[test]
    fn test_tools_list() {
        let server = McpServer::new();
        let tools = server.handle_tools_list();
        let names: Vec<&str> = tools["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();

        assert_eq!(names, vec!["classify_phone", "analyze_text", "analyze_file"]);
        assert!(tools["result"]["tools"][0]["inputSchema"]["properties"]["types"].is_object());
    }

    #[test]
    fn test_classify_phone_tool() {
        let server = McpServer::new();
        let response = call(&server, "classify_phone", json!({ "phone": "+251911234567" })).unwrap();

        assert_eq!(
            response["result"]["data"],
            json!({
                "isValid": true,
                "phoneNumber": "+251911234567",
                "provider": "Ethio telecom",
                "phoneType": "Mobile"
            })
        );
    }

    #[test]
    fn test_classify_phone_tool_with_filters() {
        let server = McpServer::new();
        let response = call(
            &server,
            "classify_phone",
            json!({ "phone": 5678, "types": ["all"], "providers": "ethioTelecom" }),
        )
        .unwrap();

        assert_eq!(response["result"]["data"]["phoneType"], "Special");
        assert_eq!(response["result"]["data"]["phoneNumber"], "5678");
    }

    #[test]
    fn test_invalid_arguments() {
        let server = McpServer::new();

        let missing = call(&server, "classify_phone", json!({})).unwrap_err();
        assert_eq!(missing.code(), -32602);

        let bad_filter = call(&server, "classify_phone", json!({ "phone": "991", "types": ["landline"] })).unwrap_err();
        assert!(matches!(bad_filter, McpError::Filter(FilterError::UnknownType(_))));

        let unknown = call(&server, "dial", json!({})).unwrap_err();
        assert_eq!(unknown.code(), -32601);
    }

    #[test]
    fn test_analyze_text_tool() {
        let server = McpServer::new();
        let response = call(
            &server,
            "analyze_text",
            json!({ "text": "reach me on 0911234567 or 0711234567" }),
        )
        .unwrap();

        assert_eq!(response["result"]["data"]["candidates"], 2);
        assert_eq!(response["result"]["data"]["valid"], 2);
    }

    #[test]
    fn test_analyze_missing_file() {
        let server = McpServer::new();
        let err = call(&server, "analyze_file", json!({ "file_path": "/nonexistent/etphone.txt" })).unwrap_err();
        assert_eq!(err.code(), -32603);
    }

    #[test]
    fn test_respond_wraps_id() {
        let server = McpServer::new();
        let rt = tokio::runtime::Runtime::new().unwrap();

        let ok = rt.block_on(server.respond(json!({ "id": 7, "method": "initialize" }))).unwrap();
        assert_eq!(ok["id"], 7);
        assert_eq!(ok["jsonrpc"], "2.0");
        assert_eq!(ok["result"]["serverInfo"]["name"], "etphone");

        let err = rt.block_on(server.respond(json!({ "id": "a", "method": "nope" }))).unwrap();
        assert_eq!(err["id"], "a");
        assert_eq!(err["error"]["code"], -32601);
    }

    #[test]
    fn test_notifications_get_no_response() {
        let server = McpServer::new();
        let rt = tokio::runtime::Runtime::new().unwrap();

        let initialized = json!({ "jsonrpc": "2.0", "method": "notifications/initialized" });
        assert!(rt.block_on(server.respond(initialized)).is_none());

        let unknown = json!({ "jsonrpc": "2.0", "method": "nope" });
        assert!(rt.block_on(server.respond(unknown)).is_none());

        // An explicit null id is still a request
        let null_id = json!({ "jsonrpc": "2.0", "id": null, "method": "nope" });
        let response = rt.block_on(server.respond(null_id)).unwrap();
        assert_eq!(response["error"]["code"], -32601);
    }

    #[test]
    fn test_file_access_can_be_disabled() {
        let server = McpServer::without_file_access();
        let names: Vec<String> = server.handle_tools_list()["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["classify_phone", "analyze_text"]);

        let err = call(&server, "analyze_file", json!({ "file_path": "/etc/hosts" })).unwrap_err();
        assert!(matches!(err, McpError::UnknownTool(_)));
    }
}
