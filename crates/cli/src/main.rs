//! Scratchpad host binary.
//!
//! Reads one input, mounts a panel per built-in transform, applies the
//! requested option edits, toggles and promotes, then prints every panel.

mod args;
mod render;

use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use scratchpad_panel::{FileStore, InputCell, MemoryStore, PanelCollection, PanelStore, PromoteOutcome};
use scratchpad_transform::{builtins, parse_value_for_tag};
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::args::Args;
use crate::render::render_panel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	setup_tracing(args.verbose);

	let text = read_input(&args).await?;
	let store: Arc<dyn PanelStore> = match args.store_path() {
		Some(path) => {
			let store = FileStore::open(path);
			info!(path = %store.path().display(), "using panel store");
			Arc::new(store)
		}
		None => Arc::new(MemoryStore::new()),
	};

	let registry = builtins::registry()?;
	let input = InputCell::with_text(text);
	let panels = PanelCollection::new(&registry, input.clone(), store);

	for set in &args.sets {
		let panel = panels.get(&set.transform).with_context(|| format!("unknown transform '{}'", set.transform))?;
		let def = panel
			.options()
			.get(&set.key)
			.cloned()
			.with_context(|| format!("transform '{}' has no option '{}'", set.transform, set.key))?;
		let value = parse_value_for_tag(&set.value, def.tag()).map_err(anyhow::Error::msg)?;
		panel.set_option(&set.key, value)?;
	}

	for name in &args.toggle {
		let panel = panels.get(name).with_context(|| format!("unknown transform '{name}'"))?;
		let closed = panel.toggle_closed();
		info!(transform = %name, closed, "toggled panel");
	}

	panels.settled().await;

	for name in &args.promote {
		let panel = panels.get(name).with_context(|| format!("unknown transform '{name}'"))?;
		match panel.promote().await {
			PromoteOutcome::Promoted(_) => info!(transform = %name, "promoted"),
			PromoteOutcome::Rejected(message) => bail!("cannot promote '{name}': {message}"),
		}
		panels.settled().await;
	}

	for view in panels.views() {
		if !args.only.is_empty() && !args.only.contains(&view.name) {
			continue;
		}
		print!("{}", render_panel(&view));
	}

	if !args.promote.is_empty() {
		println!("== input");
		println!("{}", input.read());
	}

	Ok(())
}

async fn read_input(args: &Args) -> anyhow::Result<String> {
	match &args.input {
		Some(path) => tokio::fs::read_to_string(path)
			.await
			.with_context(|| format!("reading {}", path.display())),
		None => {
			let mut text = String::new();
			tokio::io::stdin().read_to_string(&mut text).await.context("reading stdin")?;
			Ok(text)
		}
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("scratchpad=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).init();
}
