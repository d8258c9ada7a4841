// `cmdpath tree`: show the command tree with aliases and usage.

use clap::Args;
use serde::Serialize;

use cmdpath_core::{CommandMap, Resolver};

use crate::exit_code::ExitCode;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct TreeArgs {}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TreeNode {
    pub name: String,
    pub aliases: Vec<String>,
    pub usage: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

pub fn run(resolver: &Resolver, format: OutputFormat, _args: TreeArgs) -> anyhow::Result<ExitCode> {
    let nodes = build_nodes(resolver.commands());
    output::print_output(format, &nodes, |nodes| format_human(nodes))?;
    Ok(ExitCode::Success)
}

fn build_nodes(commands: &CommandMap) -> Vec<TreeNode> {
    commands
        .iter()
        .map(|(name, command)| TreeNode {
            name: name.to_string(),
            aliases: command.aliases().to_vec(),
            usage: command.usage(name),
            children: command.sub().map(build_nodes).unwrap_or_default(),
        })
        .collect()
}

fn format_human(nodes: &[TreeNode]) -> String {
    let mut lines = Vec::new();
    for node in nodes {
        render_tree_node(&mut lines, node, 0);
    }
    lines.join("\n")
}

fn render_tree_node(lines: &mut Vec<String>, node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let prefix = if depth == 0 { "" } else { "├─ " };
    let aliases = if node.aliases.is_empty() {
        String::new()
    } else {
        format!(" (aliases: {})", node.aliases.join(", "))
    };
    lines.push(format!("{indent}{prefix}{}{aliases}", node.usage));
    for child in &node.children {
        render_tree_node(lines, child, depth + 1);
    }
}
