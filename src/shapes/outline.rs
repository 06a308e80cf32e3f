use super::{ShapeKind, path};
use eframe::egui::{Pos2, pos2};
use std::f32::consts::TAU;

const SAMPLES: usize = 128;

/// Drawable outline of a shape: one or more closed polylines centered on the
/// origin, sized to circumradius `size`. Lungs are two lobes, a flower is a
/// petalled rose; path shapes return their vertex ring.
pub fn outline(shape: ShapeKind, size: f32) -> Vec<Vec<Pos2>> {
	match shape {
		ShapeKind::Square
		| ShapeKind::Triangle
		| ShapeKind::Hexagon
		| ShapeKind::Octagon
		| ShapeKind::Star => vec![path::ring(shape, size)],
		ShapeKind::Infinity => vec![sample(|t| path::lemniscate(t, size))],
		ShapeKind::Circle => vec![sample(|t| {
			let a = t * TAU;
			pos2(a.cos() * size, a.sin() * size)
		})],
		ShapeKind::Heart => vec![sample(|t| heart_point(t, size))],
		ShapeKind::Flower => vec![sample(|t| {
			let a = t * TAU;
			let r = size * (0.72 + 0.28 * (6.0 * a).cos());
			pos2(a.cos() * r, a.sin() * r)
		})],
		ShapeKind::Lungs => vec![
			lung_lobe(size, -1.0),
			lung_lobe(size, 1.0),
		],
	}
}

fn sample(f: impl Fn(f32) -> Pos2) -> Vec<Pos2> {
	(0..SAMPLES).map(|i| f(i as f32 / SAMPLES as f32)).collect()
}

/// Classic sextic heart curve, normalized to circumradius `size`
fn heart_point(t: f32, size: f32) -> Pos2 {
	let a = t * TAU;
	let x = 16.0 * a.sin().powi(3);
	let y = 13.0 * a.cos() - 5.0 * (2.0 * a).cos() - 2.0 * (3.0 * a).cos() - (4.0 * a).cos();
	// y flipped for screen coordinates
	pos2(x / 17.0 * size, -y / 17.0 * size)
}

/// One lung lobe: a tilted ellipse, mirrored by `side` (-1 left, +1 right)
fn lung_lobe(size: f32, side: f32) -> Vec<Pos2> {
	let center = pos2(side * size * 0.45, size * 0.08);
	let (rx, ry) = (size * 0.36, size * 0.62);
	let tilt = side * 0.22;
	sample(|t| {
		let a = t * TAU;
		let (x, y) = (rx * a.cos(), ry * a.sin());
		pos2(
			center.x + x * tilt.cos() - y * tilt.sin(),
			center.y + x * tilt.sin() + y * tilt.cos(),
		)
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_shape_has_a_drawable_outline() {
		for shape in [
			ShapeKind::Square,
			ShapeKind::Triangle,
			ShapeKind::Hexagon,
			ShapeKind::Octagon,
			ShapeKind::Star,
			ShapeKind::Circle,
			ShapeKind::Heart,
			ShapeKind::Flower,
			ShapeKind::Lungs,
			ShapeKind::Infinity,
		] {
			let rings = outline(shape, 100.0);
			assert!(!rings.is_empty(), "{shape:?}");
			for ring in &rings {
				assert!(ring.len() >= 3, "{shape:?}");
			}
		}
	}

	#[test]
	fn lungs_are_two_mirrored_lobes() {
		let rings = outline(ShapeKind::Lungs, 100.0);
		assert_eq!(rings.len(), 2);
		let mean_x = |ring: &[Pos2]| ring.iter().map(|p| p.x).sum::<f32>() / ring.len() as f32;
		assert!(mean_x(&rings[0]) < 0.0);
		assert!(mean_x(&rings[1]) > 0.0);
	}

	#[test]
	fn outlines_stay_within_the_requested_size() {
		for shape in [ShapeKind::Circle, ShapeKind::Heart, ShapeKind::Flower] {
			for ring in outline(shape, 100.0) {
				for p in ring {
					assert!(p.to_vec2().length() <= 101.0, "{shape:?}: {p:?}");
				}
			}
		}
	}
}
