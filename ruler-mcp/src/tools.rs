//! Tools exposed over MCP

use std::collections::HashMap;
use std::sync::Arc;
use serde_json::{json, Value as JsonValue};
use ruler_core::RulerError;
use ruler_units::{
    parse_query, parse_unit, result_message, ConversionEngine, ConversionRequest, ParsePolicy,
    UnitError, UNITS,
};
use crate::protocol::McpError;

/// Metadata about a tool argument
#[derive(Debug, Clone)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
    pub optional: bool,
}

impl ArgMeta {
    pub const fn optional(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: true }
    }
}

/// Metadata for a tool
#[derive(Debug, Clone)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgMeta],
}

impl ToolMeta {
    /// JSON Schema for the tool's arguments
    pub fn input_schema(&self) -> JsonValue {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for arg in self.args {
            properties.insert(
                arg.name.to_string(),
                json!({ "type": arg.typ, "description": arg.description }),
            );
            if !arg.optional {
                required.push(arg.name);
            }
        }
        json!({ "type": "object", "properties": properties, "required": required })
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }
}

/// Settings shared by every tool call
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolContext {
    pub parse_policy: ParsePolicy,
}

/// A callable tool.
///
/// Bad arguments are protocol errors; failures of the conversion itself
/// come back as an `Ok` result flagged with `isError`.
pub trait Tool: Send + Sync {
    fn meta(&self) -> ToolMeta;
    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, McpError>;
}

/// Tools by name
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    pub fn with_tool<T: Tool + 'static>(mut self, t: T) -> Self {
        let name = t.meta().name.to_string();
        self.tools.insert(name, Arc::new(t));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// Metadata of every tool, sorted by name
    pub fn list(&self) -> Vec<ToolMeta> {
        let mut metas: Vec<ToolMeta> = self.tools.values().map(|t| t.meta()).collect();
        metas.sort_by_key(|m| m.name);
        metas
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
            .with_tool(ListUnits)
            .with_tool(Convert)
    }
}

/// Tool result carrying a structured error
pub fn tool_error(err: RulerError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": err.to_string() }],
        "error": err,
        "isError": true
    })
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 0] = [];

impl Tool for ListUnits {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "list_units",
            description: "List the supported length units in display order, with symbol and meters per unit.",
            args: &LIST_UNITS_ARGS,
        }
    }

    fn call(&self, _args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, McpError> {
        let lines: Vec<String> = UNITS
            .defs()
            .iter()
            .map(|d| format!("{} ({}): {} m", d.label, d.symbol, d.factor))
            .collect();

        Ok(json!({
            "content": [{ "type": "text", "text": lines.join("\n") }],
            "units": UNITS.defs(),
        }))
    }
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 5] = [
    ArgMeta::optional("value", "string", "Value to convert, e.g. \"12.5\". Empty or non-numeric counts as 0 unless strict."),
    ArgMeta::optional("from", "string", "Source unit: cm, m, mm, ft (or their names)"),
    ArgMeta::optional("to", "string", "Target unit: cm, m, mm, ft (or their names)"),
    ArgMeta::optional("query", "string", "Alternative to value/from/to, e.g. \"100 cm -> m\""),
    ArgMeta::optional("strict", "boolean", "Reject non-numeric values instead of treating them as 0"),
];

impl Tool for Convert {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "convert",
            description: "Convert a length between centimeters, meters, millimeters and feet. Results are rounded to 2 decimal places.",
            args: &CONVERT_ARGS,
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, McpError> {
        let policy = match args.get("strict") {
            None | Some(JsonValue::Null) => ctx.parse_policy,
            Some(JsonValue::Bool(true)) => ParsePolicy::Strict,
            Some(JsonValue::Bool(false)) => ParsePolicy::Lenient,
            Some(other) => {
                return Err(McpError::invalid_params(format!("strict must be a boolean, got {}", other)));
            }
        };

        let request = match args.get("query").and_then(|v| v.as_str()) {
            Some(query) => parse_query(query)
                .map(|(raw, from, to)| ConversionRequest::new(raw, from, to)),
            None => {
                let raw = value_arg(args)?;
                let from = text_arg(args, "from")?;
                let to = text_arg(args, "to")?;
                resolve_units(raw, from, to)
            }
        };

        let request = match request {
            Ok(r) => r,
            Err(e) => return Ok(tool_error(e.into())),
        };

        match ConversionEngine::new(policy).run(&request) {
            Ok(result) => {
                let text = result_message(&request.raw_input, result.from, &result.display, result.to);
                Ok(json!({
                    "content": [{ "type": "text", "text": text }],
                    "result": result,
                    "isError": false
                }))
            }
            Err(e) => {
                tracing::warn!(error = %e, raw = %request.raw_input, "conversion failed");
                Ok(tool_error(e.into()))
            }
        }
    }
}

fn resolve_units(raw: String, from: &str, to: &str) -> Result<ConversionRequest, UnitError> {
    Ok(ConversionRequest::new(raw, parse_unit(from)?, parse_unit(to)?))
}

/// The value may come as a JSON string or number; absent means empty input.
fn value_arg(args: &JsonValue) -> Result<String, McpError> {
    match args.get("value") {
        None | Some(JsonValue::Null) => Ok(String::new()),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(McpError::invalid_params(format!("value must be a string or number, got {}", other))),
    }
}

fn text_arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, McpError> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", name)))
}
