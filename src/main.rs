// src/main.rs
use std::path::PathBuf;

use clap::Parser;
use md_section_tree::storage::{StorageManager, DEFAULT_STORAGE_ROOT};
use md_section_tree::utils::{self, AppError};

/// Builds a JSON section tree from the headings of a Markdown file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Markdown (.md) file
    input_file: PathBuf,

    /// Output path (default: <input stem>_tree.json next to the input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base name for the legacy layout: <storage-root>/<basename>_vector_index/section_tree_md_only.json
    #[arg(long)]
    basename: Option<String>,

    /// Root directory for the legacy --basename layout
    #[arg(long, default_value = DEFAULT_STORAGE_ROOT)]
    storage_root: PathBuf,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides this
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (RUST_LOG, else -v count)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting with args: {:?}", args);

    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    // 3. Read the input document
    if !args.input_file.exists() {
        return Err(AppError::InputNotFound(args.input_file.clone()));
    }
    let text = std::fs::read_to_string(&args.input_file)?;
    tracing::info!("Read {} ({} bytes)", args.input_file.display(), text.len());

    // 4. Extract headings and build the tree
    let headings = md_section_tree::extract(&text);
    let tree = md_section_tree::build(headings);

    // 5. Pick the output location and save
    let storage = StorageManager::new(&args.storage_root);
    let out_path = storage.resolve_output_path(
        &args.input_file,
        args.output.as_deref(),
        args.basename.as_deref(),
    );
    storage.write_json_tree(&tree, &out_path)?;

    tracing::info!(
        "Found {} headings ({} top-level)",
        tree.descendant_count(),
        tree.children.len()
    );
    Ok(())
}
