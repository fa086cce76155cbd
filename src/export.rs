//! Export utilities for assembled prompt trees
//!
//! Plain-text outline and DOT graph output for the `tree` subcommand.

use crate::model::{LoadedTree, PromptRecord};
use std::collections::HashSet;

/// Configuration for DOT export
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Include the prompts' nodes as leaf shapes
    pub show_nodes: bool,
    /// Include ids in labels
    pub show_ids: bool,
    /// Orientation: "TB" (top-bottom), "LR" (left-right)
    pub rankdir: String,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            show_nodes: true,
            show_ids: true,
            rankdir: "TB".to_string(),
        }
    }
}

/// Escape a string for DOT labels
fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Truncate a string to max characters
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn prompt_label(prompt: &PromptRecord, show_ids: bool) -> String {
    if show_ids {
        format!("[{}] {}", prompt.id, prompt.title)
    } else {
        prompt.title.clone()
    }
}

/// Indented outline of the tree, in summary order
pub fn tree_to_text(tree: &LoadedTree) -> String {
    let mut out = String::new();
    let summary = &tree.summary;

    out.push_str(&format!("Project: {}\n", summary.project));
    if !summary.main_request.is_empty() {
        out.push_str(&format!("Main request: {}\n", summary.main_request));
    }
    if !summary.final_integration.is_empty() {
        out.push_str(&format!("Final integration: {}\n", summary.final_integration));
    }
    out.push('\n');

    if tree.prompts.is_empty() {
        out.push_str("(no prompts)\n");
        return out;
    }

    for prompt in &tree.prompts {
        if prompt.has_nodes() {
            out.push_str(&format!(
                "{} ({})\n",
                prompt_label(prompt, true),
                prompt.nodes.len()
            ));
        } else {
            out.push_str(&format!("{}\n", prompt_label(prompt, true)));
        }
        for node in &prompt.nodes {
            match &node.action {
                Some(action) => out.push_str(&format!("    - {}: {}\n", node.name, action)),
                None => out.push_str(&format!("    - {}\n", node.name)),
            }
        }
    }

    out
}

/// Convert an assembled tree to DOT format
///
/// Prompts link to their parent prompt when the parent is part of the tree.
pub fn tree_to_dot(tree: &LoadedTree, config: &DotConfig) -> String {
    let mut dot = String::new();

    dot.push_str("digraph PromptTree {\n");
    dot.push_str(&format!("  rankdir={};\n", config.rankdir));
    dot.push_str("  node [fontname=\"Arial\" fontsize=10];\n");
    if !tree.summary.project.is_empty() {
        dot.push_str(&format!(
            "  label=\"{}\";\n  labelloc=t;\n",
            escape_dot(&tree.summary.project)
        ));
    }
    dot.push('\n');

    let present: HashSet<_> = tree.prompts.iter().map(|p| &p.id).collect();

    for prompt in &tree.prompts {
        dot.push_str(&format!(
            "  \"p{}\" [label=\"{}\" shape=box style=filled fillcolor=\"#E6E6FA\"];\n",
            escape_dot(prompt.id.as_str()),
            escape_dot(&truncate(&prompt_label(prompt, config.show_ids), 60))
        ));

        if config.show_nodes {
            for node in &prompt.nodes {
                dot.push_str(&format!(
                    "  \"n{}\" [label=\"{}\" shape=ellipse];\n",
                    escape_dot(node.id.as_str()),
                    escape_dot(&truncate(&node.name, 40))
                ));
                dot.push_str(&format!(
                    "  \"p{}\" -> \"n{}\" [style=dashed];\n",
                    escape_dot(prompt.id.as_str()),
                    escape_dot(node.id.as_str())
                ));
            }
        }
    }

    dot.push('\n');
    for prompt in &tree.prompts {
        if let Some(parent) = prompt.parent_prompt_id.as_ref().filter(|p| present.contains(p)) {
            dot.push_str(&format!(
                "  \"p{}\" -> \"p{}\";\n",
                escape_dot(parent.as_str()),
                escape_dot(prompt.id.as_str())
            ));
        }
    }

    dot.push_str("}\n");
    dot
}
