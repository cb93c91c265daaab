//! Vaultgraph CLI — render a note vault as a styled graph.
//!
//! Usage:
//!   vaultgraph render <vault-dir> [--rules file] [--focus id --depth n]
//!   vaultgraph check-rules <file>

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;
use vaultgraph::{render_vault, FsVault, Restriction, RuleSet};

#[derive(Parser)]
#[command(name = "vaultgraph", version, about = "Graph view engine for linked note vaults")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Materialize a vault, apply styling rules, and print the graph as JSON
    Render {
        /// Vault root directory
        vault: PathBuf,
        /// File of styling rules, one `condition => action(value)` per line
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Restrict the output to this node's neighborhood
        #[arg(long)]
        focus: Option<String>,
        /// Hop distance for --focus
        #[arg(long, default_value_t = 1)]
        depth: usize,
    },
    /// Parse a rules file and report malformed lines
    CheckRules {
        /// File of styling rules
        file: PathBuf,
    },
}

fn cmd_render(vault: PathBuf, rules: Option<PathBuf>, focus: Option<String>, depth: usize) -> i32 {
    let vault = match FsVault::open(&vault) {
        Ok(vault) => vault,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let rule_set = match rules {
        Some(path) => {
            let text = match std::fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Error: failed to read {}: {}", path.display(), e);
                    return 1;
                }
            };
            let (rule_set, diagnostics) = RuleSet::parse_with_diagnostics(&text);
            // Malformed lines never block rendering
            for diagnostic in &diagnostics {
                warn!(%diagnostic, "skipped malformed rule line");
            }
            rule_set
        }
        None => RuleSet::default(),
    };

    let full = render_vault(&vault, &rule_set);
    let view = match focus {
        Some(focal_id) => {
            Restriction::new().restrict(&full.nodes, &full.edges, &focal_id, depth)
        }
        None => full,
    };

    match serde_json::to_string_pretty(&view) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_check_rules(file: PathBuf) -> i32 {
    let text = match std::fs::read_to_string(&file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", file.display(), e);
            return 1;
        }
    };

    let (rule_set, diagnostics) = RuleSet::parse_with_diagnostics(&text);
    println!("{} rule(s) parsed", rule_set.len());
    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }
    if diagnostics.is_empty() {
        0
    } else {
        1
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Render {
            vault,
            rules,
            focus,
            depth,
        } => cmd_render(vault, rules, focus, depth),
        Commands::CheckRules { file } => cmd_check_rules(file),
    };
    std::process::exit(code);
}
