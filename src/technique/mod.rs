use crate::shapes::ShapeKind;
use crate::types::PhaseKind;

/// One named sub-interval of a breathing cycle
#[derive(Debug, Clone, Copy)]
pub struct Phase {
	pub kind: PhaseKind,
	/// Default duration in seconds
	pub secs: f32,
}

const fn phase(kind: PhaseKind, secs: f32) -> Phase {
	Phase { kind, secs }
}

/// A named breathing pattern: phase sequence, default durations, visual shape.
/// Immutable; selected from [`CATALOG`].
#[derive(Debug, Clone, Copy)]
pub struct Technique {
	pub id: &'static str,
	/// Locale dictionary key for the display name
	pub name_key: &'static str,
	pub shape: ShapeKind,
	pub phases: &'static [Phase],
}

impl Technique {
	pub fn phase_count(&self) -> usize {
		self.phases.len()
	}

	pub fn default_durations(&self) -> Vec<f32> {
		self.phases.iter().map(|p| p.secs).collect()
	}

	pub fn phase_kinds(&self) -> Vec<PhaseKind> {
		self.phases.iter().map(|p| p.kind).collect()
	}
}

use PhaseKind::{BreatheIn as In, BreatheOut as Out, Hold};

/// The fixed technique catalog, in carousel order
pub static CATALOG: &[Technique] = &[
	Technique {
		id: "square",
		name_key: "technique.square",
		shape: ShapeKind::Square,
		phases: &[
			phase(In, 4.0),
			phase(Hold, 4.0),
			phase(Out, 4.0),
			phase(Hold, 4.0),
		],
	},
	Technique {
		id: "triangle",
		name_key: "technique.triangle",
		shape: ShapeKind::Triangle,
		phases: &[phase(In, 4.0), phase(Hold, 4.0), phase(Out, 4.0)],
	},
	Technique {
		id: "hexagon",
		name_key: "technique.hexagon",
		shape: ShapeKind::Hexagon,
		phases: &[
			phase(In, 4.0),
			phase(Hold, 2.0),
			phase(Hold, 2.0),
			phase(Out, 4.0),
			phase(Hold, 2.0),
			phase(Hold, 2.0),
		],
	},
	Technique {
		id: "octagon",
		name_key: "technique.octagon",
		shape: ShapeKind::Octagon,
		phases: &[
			phase(In, 4.0),
			phase(Hold, 2.0),
			phase(Hold, 2.0),
			phase(Hold, 2.0),
			phase(Out, 4.0),
			phase(Hold, 2.0),
			phase(Hold, 2.0),
			phase(Hold, 2.0),
		],
	},
	Technique {
		id: "star",
		name_key: "technique.star",
		shape: ShapeKind::Star,
		phases: &[
			phase(In, 4.0),
			phase(Hold, 4.0),
			phase(Out, 4.0),
			phase(Hold, 2.0),
			phase(Hold, 2.0),
		],
	},
	Technique {
		id: "circle",
		name_key: "technique.circle",
		shape: ShapeKind::Circle,
		phases: &[phase(In, 5.0), phase(Hold, 2.0), phase(Out, 5.0)],
	},
	Technique {
		id: "heart",
		name_key: "technique.heart",
		shape: ShapeKind::Heart,
		phases: &[phase(In, 5.0), phase(Hold, 5.0), phase(Out, 5.0)],
	},
	Technique {
		id: "flower",
		name_key: "technique.flower",
		shape: ShapeKind::Flower,
		phases: &[
			phase(In, 4.0),
			phase(Hold, 4.0),
			phase(Out, 4.0),
			phase(Hold, 4.0),
		],
	},
	Technique {
		// 4-7-8 relaxing breath
		id: "lungs",
		name_key: "technique.lungs",
		shape: ShapeKind::Lungs,
		phases: &[phase(In, 4.0), phase(Hold, 7.0), phase(Out, 8.0)],
	},
	Technique {
		id: "infinity",
		name_key: "technique.infinity",
		shape: ShapeKind::Infinity,
		phases: &[phase(In, 5.0), phase(Out, 5.0)],
	},
];

/// Wrap an arbitrary index into catalog range
pub fn wrap_index(index: isize) -> usize {
	let len = CATALOG.len() as isize;
	(index.rem_euclid(len)) as usize
}

pub fn get(index: usize) -> &'static Technique {
	&CATALOG[wrap_index(index as isize)]
}
