mod posts;

use postboard_core::filter::SortOption;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Wrap any serializable tool output as pretty JSON text content
pub fn json_tool_result<T: Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data)
        .map_err(|e| JsonRpcError::internal(format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "postboard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

/// Tools exposed over MCP, in the order `tools/list` reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostsTool {
    List,
    Facets,
}

impl PostsTool {
    pub const ALL: [PostsTool; 2] = [PostsTool::List, PostsTool::Facets];

    pub fn name(&self) -> &'static str {
        match self {
            PostsTool::List => "posts_list",
            PostsTool::Facets => "posts_facets",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    fn description(&self) -> &'static str {
        match self {
            PostsTool::List => "List posts from the DummyJSON posts API with optional text search, category and user filters, a like-count range and a sort order. Returns the matching posts with total and matched counts.",
            PostsTool::Facets => "List the categories (tags) and user ids that appear in the posts, i.e. the values accepted by the posts_list filters.",
        }
    }

    fn input_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();

        if *self == PostsTool::List {
            let sort_names: Vec<&str> = SortOption::ALL.iter().map(SortOption::as_str).collect();
            let sort_help: Vec<String> = SortOption::ALL
                .iter()
                .map(|s| format!("{} ({})", s.as_str(), s.label()))
                .collect();

            properties.insert(
                "search".to_string(),
                serde_json::json!({
                    "type": "string",
                    "description": "Case-insensitive text matched against post titles and bodies"
                }),
            );
            properties.insert(
                "categories".to_string(),
                serde_json::json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Keep posts tagged with any of these categories (see posts_facets)"
                }),
            );
            properties.insert(
                "users".to_string(),
                serde_json::json!({
                    "type": "array",
                    "items": { "type": "integer" },
                    "description": "Keep posts written by any of these user ids (see posts_facets)"
                }),
            );
            for (key, bound) in [("min_likes", "Minimum"), ("max_likes", "Maximum")] {
                properties.insert(
                    key.to_string(),
                    serde_json::json!({
                        "type": ["number", "string"],
                        "description": format!("{bound} likes, inclusive. Decimals truncate toward zero; non-numeric values are ignored.")
                    }),
                );
            }
            properties.insert(
                "sort".to_string(),
                serde_json::json!({
                    "type": "string",
                    "description": format!("Sort order, API order when omitted: {}", sort_help.join(", ")),
                    "enum": sort_names
                }),
            );
        }

        properties.insert(
            "api_url".to_string(),
            serde_json::json!({
                "type": "string",
                "description": "Override the posts API endpoint"
            }),
        );

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": []
        })
    }

    fn definition(&self) -> Tool {
        Tool {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let result = ToolsList {
        tools: PostsTool::ALL.iter().map(PostsTool::definition).collect(),
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))?;

    let tool = PostsTool::from_name(&params.name)
        .ok_or_else(|| JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)))?;
    log::debug!("calling {}", tool.name());

    match tool {
        PostsTool::List => posts::handle_posts_list(params.arguments, global).await,
        PostsTool::Facets => posts::handle_posts_facets(params.arguments, global).await,
    }
}
