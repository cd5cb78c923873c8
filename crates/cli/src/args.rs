use std::path::PathBuf;

use clap::Parser;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "scratchpad")]
#[command(about = "Preview every text transform over one input, side by side")]
pub struct Args {
	/// File to read the input from (stdin when omitted)
	#[arg(short, long, value_name = "FILE")]
	pub input: Option<PathBuf>,

	/// JSON file remembering which panels are closed
	#[arg(long, value_name = "FILE")]
	pub store: Option<PathBuf>,

	/// Set a panel option before evaluating
	#[arg(long = "set", value_name = "TRANSFORM.KEY=VALUE", value_parser = parse_assignment)]
	pub sets: Vec<Assignment>,

	/// Toggle a panel's closed state (persisted)
	#[arg(long, value_name = "TRANSFORM")]
	pub toggle: Vec<String>,

	/// Promote a panel's output into the input; repeat to chain
	#[arg(long, value_name = "TRANSFORM")]
	pub promote: Vec<String>,

	/// Only print these panels
	#[arg(long, value_name = "TRANSFORM")]
	pub only: Vec<String>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}

impl Args {
	/// Store location, defaulting to the user config directory.
	pub fn store_path(&self) -> Option<PathBuf> {
		self.store
			.clone()
			.or_else(|| dirs::config_dir().map(|dir| dir.join("scratchpad").join("panels.json")))
	}
}

/// One `--set transform.key=value` assignment; the value is parsed later
/// against the option's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
	pub transform: String,
	pub key: String,
	pub value: String,
}

pub fn parse_assignment(raw: &str) -> Result<Assignment, String> {
	let (target, value) = raw.split_once('=').ok_or_else(|| format!("expected TRANSFORM.KEY=VALUE, got '{raw}'"))?;
	let (transform, key) = target
		.split_once('.')
		.ok_or_else(|| format!("expected TRANSFORM.KEY before '=', got '{target}'"))?;
	if transform.is_empty() || key.is_empty() {
		return Err(format!("empty transform or key in '{raw}'"));
	}
	Ok(Assignment {
		transform: transform.to_string(),
		key: key.to_string(),
		value: value.to_string(),
	})
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn command_is_well_formed() {
		Args::command().debug_assert();
	}

	#[test]
	fn parses_assignments() {
		assert_eq!(
			parse_assignment("quotes.style=double"),
			Ok(Assignment {
				transform: "quotes".into(),
				key: "style".into(),
				value: "double".into(),
			})
		);
		// Only the first '=' splits, so values may contain more.
		assert_eq!(parse_assignment("replace.find=a=b").unwrap().value, "a=b");
		assert!(parse_assignment("quotes.style").is_err());
		assert!(parse_assignment("style=double").is_err());
		assert!(parse_assignment(".style=double").is_err());
	}

	#[test]
	fn repeatable_flags_keep_order() {
		let args = Args::try_parse_from(["scratchpad", "--promote", "curld", "--promote", "quotes", "--set", "replace.all=off"]).unwrap();
		assert_eq!(args.promote, ["curld", "quotes"]);
		assert_eq!(args.sets.len(), 1);
		assert!(!args.verbose);
	}
}
