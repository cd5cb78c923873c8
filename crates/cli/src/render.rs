use std::fmt::Write;

use scratchpad_panel::PanelView;
use scratchpad_transform::OptionValue;

/// Formats one panel as plain text.
pub fn render_panel(view: &PanelView) -> String {
	let mut out = String::new();
	let state = match (view.preview_disabled, view.closed) {
		(true, _) => " [preview disabled]",
		(false, true) => " [closed]",
		(false, false) => "",
	};
	let _ = writeln!(out, "== {}{state}", view.name);

	for option in &view.options {
		let value = match &option.value {
			OptionValue::Bool(v) => v.to_string(),
			OptionValue::Int(v) => v.to_string(),
			OptionValue::String(v) => format!("{v:?}"),
		};
		if option.radios.is_empty() {
			let _ = writeln!(out, "   {}: {value}", option.label);
		} else {
			let choices: Vec<_> = option.radios.iter().map(|r| r.value.as_str()).collect();
			let _ = writeln!(out, "   {}: {value} ({})", option.label, choices.join("|"));
		}
	}

	if let Some(tooltip) = &view.promote.tooltip {
		let _ = writeln!(out, "   ! {tooltip}");
	}

	if view.output.visible {
		if view.output.is_error {
			let _ = writeln!(out, "   ! {}", view.output.text);
		} else if view.output.text.is_empty() {
			let _ = writeln!(out, "(empty)");
		} else {
			let _ = writeln!(out, "{}", view.output.text);
		}
	}
	out
}
