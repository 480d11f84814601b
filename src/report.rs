//! Console Report Formatting
//!
//! Turns a discovered capability list into the human-readable report the
//! CLI prints: indexed names with descriptions, followed by each tool's
//! pretty-printed input schema. Pure formatting; printing stays in main.

use crate::discovery::Tool;
use std::fmt::Write;

/// Render the capability report for a discovery result
pub fn render_capability_report(tools: &[Tool]) -> String {
    if tools.is_empty() {
        return "Server advertised no capabilities.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Available tools ({}):", tools.len());
    for tool in tools {
        let _ = writeln!(out, "  - {}: {}", tool.name, tool.description);
    }

    let _ = writeln!(out, "\n----- DETAILED INPUT SCHEMAS -----");
    for (index, tool) in tools.iter().enumerate() {
        let _ = writeln!(out, "\n[{}] {}: {}", index + 1, tool.name, tool.description);
        let _ = writeln!(out, "Input Schema:");
        let schema = serde_json::to_string_pretty(&tool.input_schema)
            .unwrap_or_else(|_| tool.input_schema.to_string());
        let _ = writeln!(out, "{}", schema);
    }

    out
}
