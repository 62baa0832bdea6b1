use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{ComponentNode, Document};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Number of undo steps to keep
    #[arg(long)]
    pub max_history: Option<usize>,

    /// Also write an example page to this file
    #[arg(long)]
    pub example: Option<PathBuf>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagecraft project...".bright_blue().bold());

    let mut config = Config::default();
    if let Some(max_history) = args.max_history {
        config.editor.max_history = max_history.max(1);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    if let Some(example) = &args.example {
        let example_path = PathBuf::from(cwd).join(example);
        if example_path.exists() && !args.force {
            println!("  {} {} exists, skipped", "⚠️".yellow(), example.display());
        } else {
            example_page().save(&example_path)?;
            println!("  {} Created {}", "✓".green(), example.display());
        }
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());

    Ok(())
}

fn example_page() -> Document {
    let hero = ComponentNode::new("hero", "section")
        .with_style("padding", "48px")
        .with_child(ComponentNode::new("hero-title", "heading").with_prop("text", "Hello, world"))
        .with_child(
            ComponentNode::new("hero-cta", "button")
                .with_prop("label", "Get started")
                .with_style("background", "#3366FF"),
        );

    Document::with_components(vec![hero])
}
