/// Kind of one breathing phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
	BreatheIn,
	Hold,
	BreatheOut,
}

impl PhaseKind {
	/// Locale dictionary key for this phase's label
	pub fn label_key(&self) -> &'static str {
		match self {
			PhaseKind::BreatheIn => "phase.breathe_in",
			PhaseKind::Hold => "phase.hold",
			PhaseKind::BreatheOut => "phase.breathe_out",
		}
	}
}

/// Technique navigation direction
#[derive(Debug, Clone, Copy)]
pub enum NavDirection {
	Next,
	Prev,
}
