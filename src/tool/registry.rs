// ABOUTME: Implements the Registry - a thread-safe container for the tools
// ABOUTME: a server advertises and dispatches to.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::Tool;
use crate::mcp::McpToolInfo;

/// A thread-safe registry of tools.
#[derive(Default)]
pub struct Registry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    pub async fn register<T: Tool + 'static>(&self, tool: T) {
        self.register_arc(Arc::new(tool)).await;
    }

    /// Register a tool from an Arc. Replaces any tool with the same name.
    pub async fn register_arc(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().await;
        tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(name).cloned()
    }

    /// List all tool names, sorted alphabetically.
    pub async fn list(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut names: Vec<_> = tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered tools.
    pub async fn count(&self) -> usize {
        let tools = self.tools.read().await;
        tools.len()
    }

    /// Describe all tools for `tools/list`, sorted by name.
    pub async fn to_infos(&self) -> Vec<McpToolInfo> {
        let tools = self.tools.read().await;
        let mut infos: Vec<_> = tools
            .values()
            .map(|t| McpToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.schema(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            tools: Arc::clone(&self.tools),
        }
    }
}
