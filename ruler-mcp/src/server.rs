//! Request dispatch and the stdio read loop

use std::io::{self, BufRead, Write};
use serde_json::{json, Value as JsonValue};
use ruler_units::UNITS;
use crate::config::ServerConfig;
use crate::protocol::{
    McpError, McpRequest, McpResponse, INTERNAL_ERROR, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION,
};
use crate::tools::{ToolContext, ToolRegistry};

const UNITS_URI: &str = "ruler://units";

pub struct Server {
    tools: ToolRegistry,
    ctx: ToolContext,
}

impl Server {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            tools: ToolRegistry::default(),
            ctx: ToolContext { parse_policy: config.parse_policy },
        }
    }

    /// Read requests line by line until EOF, writing one response line
    /// per request that carries an id.
    pub fn serve<R: BufRead, W: Write>(&self, mut reader: R, mut writer: W) -> io::Result<()> {
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                tracing::info!("client disconnected (EOF)");
                return Ok(());
            }

            if let Some(response) = self.handle_line(&line) {
                writeln!(writer, "{}", response)?;
                writer.flush()?;
            }
        }
    }

    /// Handle one raw line. `None` for blank lines and notifications.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        tracing::debug!(bytes = line.len(), "received");

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => {
                let response = self.handle_request(&request);
                // Notifications (no id) get no response
                if request.id.is_none() {
                    tracing::debug!(method = %request.method, "notification processed");
                    return None;
                }
                response
            }
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                McpResponse::from_result(None, Err(McpError::parse_error(e)))
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize response");
                let fallback = json!({
                    "jsonrpc": "2.0",
                    "id": response.id,
                    "error": { "code": INTERNAL_ERROR, "message": "Internal error" }
                });
                Some(fallback.to_string())
            }
        }
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        tracing::debug!(method = %request.method, "processing");

        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params),

            // Resources
            "resources/list" => handle_resources_list(),
            "resources/read" => handle_resources_read(&request.params),

            _ => Err(McpError::method_not_found(&request.method)),
        };

        McpResponse::from_result(request.id.clone(), result)
    }

    fn handle_tools_list(&self) -> Result<JsonValue, McpError> {
        let tools: Vec<JsonValue> = self.tools.list().iter().map(|m| m.to_json()).collect();
        Ok(json!({ "tools": tools }))
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        let tool = self.tools.get(name)
            .ok_or_else(|| McpError::invalid_params(format!("Unknown tool: {}", name)))?;

        tracing::info!(tool = name, "tool call");
        tool.call(&args, &self.ctx)
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Echo the client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    tracing::info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Length conversion between centimeters, meters, millimeters and feet"
        },
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "subscribe": false, "listChanged": false }
        },
        "instructions": "Use 'convert' with value/from/to (or a query like \"100 cm -> m\"). Use 'list_units' to see the supported units. Results are rounded to 2 decimal places."
    }))
}

fn handle_resources_list() -> Result<JsonValue, McpError> {
    Ok(json!({
        "resources": [{
            "uri": UNITS_URI,
            "name": "units",
            "description": "Supported length units and their scale factors",
            "mimeType": "text/markdown"
        }]
    }))
}

fn handle_resources_read(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let uri = params.as_ref()
        .and_then(|p| p.get("uri"))
        .and_then(|u| u.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing uri parameter"))?;

    if uri != UNITS_URI {
        return Err(McpError::invalid_params(format!("Unknown resource: {}", uri))
            .with_data(json!({ "available": [UNITS_URI] })));
    }

    Ok(json!({
        "contents": [{
            "uri": uri,
            "mimeType": "text/markdown",
            "text": units_markdown()
        }]
    }))
}

fn units_markdown() -> String {
    let mut out = String::from("| Unit | Symbol | Meters per unit |\n|---|---|---|\n");
    for def in UNITS.defs() {
        out.push_str(&format!("| {} | {} | {} |\n", def.label, def.symbol, def.factor));
    }
    out
}
