/// Execution classes used for task spawning and observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Live preview evaluations triggered by input or option changes.
	Preview,
	/// Evaluations requested through an explicit promote.
	Promote,
}

impl TaskClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Preview => "preview",
			Self::Promote => "promote",
		}
	}
}
