use crate::types::PhaseKind;
use eframe::egui::Pos2;

pub mod outline;
pub mod path;

/// Visual shape attached to a technique. Dispatch is a plain match; every
/// renderer is a pure function of (phase kinds, phase index, progress, size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
	Square,
	Triangle,
	Hexagon,
	Octagon,
	Star,
	Circle,
	Heart,
	Flower,
	Lungs,
	Infinity,
}

impl ShapeKind {
	/// For path shapes: number of equal-length outline slices the indicator
	/// covers, one per phase. None for pulse shapes.
	pub fn edge_count(&self) -> Option<usize> {
		match self {
			ShapeKind::Square => Some(4),
			ShapeKind::Triangle => Some(3),
			ShapeKind::Hexagon => Some(6),
			ShapeKind::Octagon => Some(8),
			ShapeKind::Star => Some(5),
			ShapeKind::Infinity => Some(2),
			_ => None,
		}
	}

	pub fn is_path(&self) -> bool {
		self.edge_count().is_some()
	}
}

/// Visual transform produced by a renderer for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
	/// Moving indicator position, for path shapes
	pub indicator: Option<Pos2>,
	/// Outline scale factor, for pulse shapes (1.0 for path shapes)
	pub scale: f32,
}

/// Pulse scale range, as a fraction of the drawing size
pub const MIN_SCALE: f32 = 0.6;
pub const MAX_SCALE: f32 = 1.0;

/// Render one frame. At progress 0 the transform equals the shape's value at
/// the start of the current phase; at progress 1 it equals the value at the
/// start of the next phase.
pub fn render(
	shape: ShapeKind,
	kinds: &[PhaseKind],
	phase_idx: usize,
	progress: f32,
	size: f32,
) -> Transform {
	let n = kinds.len().max(1);
	let phase_idx = phase_idx % n;
	let progress = progress.clamp(0.0, 1.0);

	if shape.is_path() {
		let t = (phase_idx as f32 + progress) / n as f32;
		Transform {
			indicator: Some(path::position(shape, t, size)),
			scale: 1.0,
		}
	} else {
		let anchors = scale_anchors(kinds);
		let eased = ease(progress);
		let v = lerp(anchors[phase_idx], anchors[phase_idx + 1], eased);
		Transform {
			indicator: None,
			scale: MIN_SCALE + v * (MAX_SCALE - MIN_SCALE),
		}
	}
}

/// Normalized scale value (0..1) at the start of each phase, plus the cycle
/// endpoint: entry `i` is the value at the start of phase `i`, entry `n` the
/// value the cycle returns to. Inhale ends at 1, exhale at 0, hold keeps the
/// value it started with, so a hold after exhale stays frozen at the minimum.
pub fn scale_anchors(kinds: &[PhaseKind]) -> Vec<f32> {
	let mut anchors = Vec::with_capacity(kinds.len() + 1);
	anchors.push(match kinds.first() {
		Some(PhaseKind::BreatheOut) => 1.0,
		_ => 0.0,
	});
	for kind in kinds {
		let prev = *anchors.last().unwrap_or(&0.0);
		anchors.push(match kind {
			PhaseKind::BreatheIn => 1.0,
			PhaseKind::BreatheOut => 0.0,
			PhaseKind::Hold => prev,
		});
	}
	anchors
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
	a + (b - a) * t
}

/// Smoothstep; endpoints are exact so the anchor contract holds
fn ease(t: f32) -> f32 {
	t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::technique::CATALOG;
	use PhaseKind::{BreatheIn as In, BreatheOut as Out, Hold};

	const SIZE: f32 = 100.0;

	#[test]
	fn square_pattern_anchors() {
		let anchors = scale_anchors(&[In, Hold, Out, Hold]);
		assert_eq!(anchors, vec![0.0, 1.0, 1.0, 0.0, 0.0]);
	}

	#[test]
	fn anchors_are_cyclically_consistent_for_every_technique() {
		for t in CATALOG {
			let anchors = scale_anchors(&t.phase_kinds());
			assert_eq!(anchors.first(), anchors.last(), "{}", t.id);
		}
	}

	#[test]
	fn pulse_scale_meets_phase_anchors() {
		let kinds = [In, Hold, Out, Hold];
		let scale = |idx, p| render(ShapeKind::Circle, &kinds, idx, p, SIZE).scale;
		// Inhale start -> min, end -> max
		assert!((scale(0, 0.0) - MIN_SCALE).abs() < 1e-6);
		assert!((scale(0, 1.0) - MAX_SCALE).abs() < 1e-6);
		// Hold is frozen at the inhale-end extremum
		assert!((scale(1, 0.5) - MAX_SCALE).abs() < 1e-6);
		// Hold after exhale is frozen at the minimum
		assert!((scale(3, 0.5) - MIN_SCALE).abs() < 1e-6);
	}

	#[test]
	fn transforms_are_continuous_across_phase_boundaries() {
		for technique in CATALOG {
			let kinds = technique.phase_kinds();
			let n = kinds.len();
			for i in 0..n {
				let end = render(technique.shape, &kinds, i, 1.0, SIZE);
				let next = render(technique.shape, &kinds, (i + 1) % n, 0.0, SIZE);
				if let (Some(a), Some(b)) = (end.indicator, next.indicator) {
					assert!((a - b).length() < 1e-3, "{} phase {}", technique.id, i);
				}
				assert!(
					(end.scale - next.scale).abs() < 1e-5,
					"{} phase {}",
					technique.id,
					i
				);
			}
		}
	}

	#[test]
	fn path_shapes_report_matching_slice_counts() {
		assert_eq!(ShapeKind::Square.edge_count(), Some(4));
		assert_eq!(ShapeKind::Star.edge_count(), Some(5));
		assert!(!ShapeKind::Heart.is_path());
		assert!(ShapeKind::Infinity.is_path());
	}
}
