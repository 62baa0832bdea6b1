use super::{open_document, write_document};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{DocumentStore, Mutation};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Document JSON file
    pub input: PathBuf,

    /// JSON array of mutations to apply in order
    #[arg(short, long)]
    pub script: PathBuf,

    /// Output file (defaults to overwriting the input)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Undo this many steps after applying the script
    #[arg(long, default_value_t = 0)]
    pub undo: usize,

    /// Skip mutations that fail instead of aborting
    #[arg(short, long)]
    pub keep_going: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut store = open_document(&args.input, &config)?;

    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read {}", args.script.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid mutation script {}", args.script.display()))?;

    println!("🛠  {} {} mutations", "Applying".green().bold(), mutations.len());
    println!("   Document: {}", args.input.display());
    println!();

    let failed = run_script(&mut store, mutations, args.keep_going)?;

    let mut undone = 0;
    while undone < args.undo && store.undo() {
        undone += 1;
    }
    if undone > 0 {
        println!("   {} {} step(s)", "↶ Undid".yellow(), undone);
    }

    let out = args.out.as_ref().unwrap_or(&args.input);
    write_document(out, store.document(), &config)?;

    let history = store.history();
    println!();
    println!(
        "✨ {} Wrote {}",
        if failed > 0 { "Done".yellow().bold() } else { "Done".green().bold() },
        out.display()
    );
    println!("   History entries: {}", history.len());
    println!("   Can undo: {}  Can redo: {}", store.can_undo(), store.can_redo());
    if failed > 0 {
        println!("   {} {}", "Skipped:".red(), failed);
    }

    Ok(())
}

/// Apply each mutation; returns how many were skipped
fn run_script(store: &mut DocumentStore, mutations: Vec<Mutation>, keep_going: bool) -> Result<usize> {
    let mut failed = 0;

    for (i, mutation) in mutations.into_iter().enumerate() {
        let name = mutation.name();
        let node_id = mutation.node_id().to_string();

        match store.apply(mutation) {
            Ok(commit) => {
                println!("   {} #{} {} {}", "✓".green(), i, name, node_id.dimmed());
                if let Some(created) = commit.created_id {
                    println!("       created {}", created.bright_white());
                }
            }
            Err(err) if keep_going => {
                println!("   {} #{} {} {}: {}", "✗".red(), i, name, node_id.dimmed(), err);
                failed += 1;
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("Mutation #{} ({}) failed", i, name)));
            }
        }
    }

    Ok(failed)
}
