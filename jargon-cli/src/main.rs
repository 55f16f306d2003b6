//! Jargon CLI
//!
//! Loads an element tree from a JSON fixture, runs a selector against it,
//! and prints the matches. Optional flags apply collection operations to
//! the result.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use jargon_dom::{DomTree, FixtureNode, label, render_tree};
use jargon_select::{Collection, Matches, query};
use owo_colors::OwoColorize;

/// Jargon: query a JSON element tree with a CSS selector
#[derive(Parser, Debug)]
#[command(name = "jargon")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Every element with class "bar" under a div
    jargon tree.json 'div .bar'

    # Direct children only, then test the matches
    jargon tree.json 'ul > li' --has-class active

    # Descend from the matches with a class or attribute selector
    jargon tree.json '#nav' --by-class item
    jargon tree.json '#nav' --by-attribute 'a[href]'

    # Show the loaded tree first
    jargon tree.json p --print-tree
"#)]
struct Cli {
    /// JSON file holding an array of fixture nodes
    #[arg(value_name = "TREE")]
    tree: PathBuf,

    /// Selector to run against the whole tree
    #[arg(value_name = "SELECTOR")]
    selector: String,

    /// Test whether each match has this tag name
    #[arg(long, value_name = "NAME")]
    has_name: Option<String>,

    /// Test whether each match carries this class
    #[arg(long, value_name = "CLASS")]
    has_class: Option<String>,

    /// Test whether each match satisfies this selector
    #[arg(long, value_name = "SELECTOR")]
    has_selector: Option<String>,

    /// Find descendants of the matches with a class selector
    #[arg(long, value_name = "SELECTOR")]
    by_class: Option<String>,

    /// Find descendants of the matches with an attribute selector
    #[arg(long, value_name = "SELECTOR")]
    by_attribute: Option<String>,

    /// Print the loaded tree before querying
    #[arg(long)]
    print_tree: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let tree = load_tree(&cli.tree)?;

    if cli.print_tree {
        println!("=== Tree ===");
        print!("{}", render_tree(&tree, tree.root()));
        println!();
    }

    let found = query(&tree, &cli.selector);
    print_collection(&format!("query '{}'", cli.selector), &found);

    if let Some(ref name) = cli.has_name {
        print_matches(&format!("has_name '{name}'"), &found.has_name(name));
    }
    if let Some(ref class) = cli.has_class {
        print_matches(&format!("has_class '{class}'"), &found.has_class(class));
    }
    if let Some(ref selector) = cli.has_selector {
        print_matches(
            &format!("has_selector '{selector}'"),
            &found.has_selector(selector),
        );
    }
    if let Some(ref selector) = cli.by_class {
        print_collection(&format!("by_class '{selector}'"), &found.by_class(selector));
    }
    if let Some(ref selector) = cli.by_attribute {
        print_collection(
            &format!("by_attribute '{selector}'"),
            &found.by_attribute(selector),
        );
    }

    Ok(())
}

/// Read and build a tree from a JSON fixture file
fn load_tree(path: &Path) -> Result<DomTree> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let nodes: Vec<FixtureNode> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {} as a JSON tree", path.display()))?;
    Ok(DomTree::from_fixture(&nodes))
}

fn print_collection(heading: &str, collection: &Collection<'_>) {
    println!("=== {heading}: {} element(s) ===", collection.len());
    for (index, node) in collection.iter().enumerate() {
        println!(
            "  {} {}",
            format!("[{index}]").dimmed(),
            label(collection.tree(), node).green()
        );
    }
}

fn print_matches(heading: &str, matches: &Matches) {
    println!("=== {heading} ===");
    match matches {
        Matches::Single(result) => println!("  {}", paint(*result)),
        Matches::Many(results) => {
            for (index, result) in results.iter().enumerate() {
                println!("  {} {}", format!("[{index}]").dimmed(), paint(*result));
            }
        }
    }
}

fn paint(result: bool) -> String {
    if result {
        "true".green().to_string()
    } else {
        "false".red().to_string()
    }
}
