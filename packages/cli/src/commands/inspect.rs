use super::open_document;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::ComponentNode;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Document JSON file
    pub input: PathBuf,

    /// Show props and styles of each node
    #[arg(short, long)]
    pub details: bool,
}

pub fn inspect(args: InspectArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = open_document(&args.input, &config)?;
    let document = store.document();

    println!("📄 {}", args.input.display().to_string().bright_white().bold());
    println!(
        "   {} root components, {} nodes",
        document.components.len(),
        document.node_count()
    );
    println!();

    let mut lines = Vec::new();
    for (i, node) in document.components.iter().enumerate() {
        let last = i + 1 == document.components.len();
        render_node(node, "", last, true, args.details, &mut lines);
    }
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

/// Render one node and its subtree as tree-drawing lines
fn render_node(
    node: &ComponentNode,
    prefix: &str,
    last: bool,
    root: bool,
    details: bool,
    lines: &mut Vec<String>,
) {
    let branch = match (root, last) {
        (true, _) => "",
        (false, true) => "└─ ",
        (false, false) => "├─ ",
    };
    lines.push(format!(
        "{}{}{} {}",
        prefix,
        branch,
        node.id.bold(),
        format!("({})", node.type_id).dimmed()
    ));

    let child_prefix = match (root, last) {
        (true, _) => prefix.to_string(),
        (false, true) => format!("{}   ", prefix),
        (false, false) => format!("{}│  ", prefix),
    };

    if details {
        for (key, value) in &node.props {
            lines.push(format!("{}  {} {}={}", child_prefix, "·".dimmed(), key.cyan(), value));
        }
        for (property, value) in &node.styles {
            lines.push(format!("{}  {} {}: {}", child_prefix, "·".dimmed(), property.magenta(), value));
        }
    }

    for (i, child) in node.children.iter().enumerate() {
        let last_child = i + 1 == node.children.len();
        render_node(child, &child_prefix, last_child, false, details, lines);
    }
}
