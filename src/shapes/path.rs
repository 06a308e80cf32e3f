use super::ShapeKind;
use eframe::egui::{Pos2, pos2};
use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI, TAU};

/// Inner-to-outer radius ratio of the five-pointed star
const STAR_INNER: f32 = 0.45;

/// Closed outline ring of a path shape, centered on the origin, circumradius
/// `size`. Regular polygons have equal edges, so walking the ring by arc
/// length hits one vertex per phase boundary; the star ring alternates outer
/// and inner vertices (ten equal segments, two per phase).
pub fn ring(shape: ShapeKind, size: f32) -> Vec<Pos2> {
	match shape {
		// Axis-aligned box, top-left corner first, clockwise
		ShapeKind::Square => {
			let half = size * FRAC_1_SQRT_2;
			vec![
				pos2(-half, -half),
				pos2(half, -half),
				pos2(half, half),
				pos2(-half, half),
			]
		}
		ShapeKind::Triangle => regular_polygon(3, size, 0.0),
		ShapeKind::Hexagon => regular_polygon(6, size, 0.0),
		// Flat-topped
		ShapeKind::Octagon => regular_polygon(8, size, PI / 8.0),
		ShapeKind::Star => (0..10)
			.map(|i| {
				let radius = if i % 2 == 0 { size } else { size * STAR_INNER };
				let angle = -FRAC_PI_2 + i as f32 * TAU / 10.0;
				pos2(angle.cos() * radius, angle.sin() * radius)
			})
			.collect(),
		_ => Vec::new(),
	}
}

/// Indicator position at normalized path parameter `t` (full outline = 1),
/// wrapping outside [0, 1)
pub fn position(shape: ShapeKind, t: f32, size: f32) -> Pos2 {
	match shape {
		ShapeKind::Infinity => lemniscate(t, size),
		_ => point_along(&ring(shape, size), t),
	}
}

fn regular_polygon(n: usize, radius: f32, offset: f32) -> Vec<Pos2> {
	(0..n)
		.map(|i| {
			let angle = -FRAC_PI_2 + offset + i as f32 * TAU / n as f32;
			pos2(angle.cos() * radius, angle.sin() * radius)
		})
		.collect()
}

/// Walk a closed ring by arc length
fn point_along(ring: &[Pos2], t: f32) -> Pos2 {
	if ring.is_empty() {
		return pos2(0.0, 0.0);
	}
	let total: f32 = (0..ring.len())
		.map(|i| (ring[(i + 1) % ring.len()] - ring[i]).length())
		.sum();
	if total <= 0.0 {
		return ring[0];
	}

	let mut remaining = t.rem_euclid(1.0) * total;
	for i in 0..ring.len() {
		let a = ring[i];
		let b = ring[(i + 1) % ring.len()];
		let len = (b - a).length();
		if remaining <= len {
			let f = if len > 0.0 { remaining / len } else { 0.0 };
			return a + (b - a) * f;
		}
		remaining -= len;
	}
	ring[0]
}

/// Lemniscate of Bernoulli, starting at the crossing point. One lobe per
/// phase; the curve is periodic so the two-phase cycle closes on itself.
pub fn lemniscate(t: f32, size: f32) -> Pos2 {
	let theta = t.rem_euclid(1.0) * TAU + FRAC_PI_2;
	let denom = 1.0 + theta.sin().powi(2);
	pos2(
		size * theta.cos() / denom,
		size * theta.sin() * theta.cos() / denom,
	)
}
