use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Parser;

use glimpse::cli::{CliArgs, ModeArg};
use glimpse::config::PreviewConfig;
use glimpse::messages::{EditMsg, Msg};
use glimpse::model::{AppModel, PreviewSurface};
use glimpse::runtime::Runtime;
use glimpse::store::{ListKind, SavedEntry, WorkspaceStore};

fn main() -> Result<()> {
    glimpse::tracing::init();
    let args = CliArgs::parse();

    if args.history || args.favorites {
        let store = WorkspaceStore::load();
        let list = if args.favorites {
            ListKind::Favorites
        } else {
            ListKind::History
        };
        print_list(list, store.list(list));
        return Ok(());
    }

    let text = match &args.path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let config = PreviewConfig::load();
    write_default_config(&config);
    let store = if args.no_save {
        WorkspaceStore::in_memory()
    } else {
        WorkspaceStore::load()
    };
    let mut runtime = Runtime::new(AppModel::new(config, store));

    if args.mode != ModeArg::Auto {
        runtime.dispatch(Msg::Edit(EditMsg::SetDetectMode(args.mode.detect_mode())));
    }
    runtime.dispatch(Msg::set_content(text));
    // One-shot rendering skips the interactive quiet period
    runtime.flush_debounce();

    tracing::info!(kind = ?runtime.model.kind(), chars = runtime.model.char_count(), "rendered");

    match &runtime.model.preview {
        PreviewSurface::Empty => println!("(empty input)"),
        PreviewSurface::Diagram { markup } => println!("{}", markup),
        PreviewSurface::Markdown { html } => println!("{}", html),
        PreviewSurface::Plain { text } => println!("{}", text),
        PreviewSurface::Tree(tree) => {
            for line in tree.visible_lines() {
                println!("{}", line);
            }
        }
        PreviewSurface::Error { message } => bail!("Render failed: {}", message),
    }

    Ok(())
}

/// First run: write the defaults out so users have a file to edit
fn write_default_config(config: &PreviewConfig) {
    let Some(path) = glimpse::config_paths::config_file() else {
        return;
    };
    if path.exists() {
        return;
    }
    if let Err(e) = config.save() {
        tracing::warn!("Could not write default config: {}", e);
    }
}

fn print_list(list: ListKind, entries: &[SavedEntry]) {
    if entries.is_empty() {
        println!("{} is empty", list.label());
        return;
    }
    for entry in entries {
        println!(
            "{:>14}  {:<10}  {:<12}  {}",
            entry.id,
            entry.kind.label(),
            entry.time_ago(),
            entry.display_title()
        );
    }
}
