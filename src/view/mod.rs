use crate::locale::{LocaleManager, Strings};
use crate::reactor::{Event, LocaleEvent, SessionEvent};
use crate::session::BreathingSession;
use crate::shapes::{self, outline};
use crate::technique::Technique;
use crate::types::{NavDirection, PhaseKind};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::time::Duration;

/// Duration preset picker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preset {
	Default,
	Calm,
	Custom,
}

pub struct ViewManager {
	preset: Preset,
	/// Per-phase slider values for the custom preset
	custom_secs: Vec<f32>,
	/// Technique the sliders were last synced against
	synced_technique: usize,
}

impl ViewManager {
	pub fn new() -> Self {
		Self {
			preset: Preset::Default,
			custom_secs: Vec::new(),
			synced_technique: usize::MAX,
		}
	}

	/// Main render function; all user intent leaves as events
	pub fn render(
		&mut self,
		ctx: &egui::Context,
		session: &BreathingSession,
		locale: &LocaleManager,
	) -> Vec<Event> {
		let mut events = Vec::new();
		let strings = locale.strings();

		self.sync_sliders(session);

		let is_typing = ctx.memory(|m| m.focused().is_some());
		if !is_typing {
			self.handle_keyboard_input(ctx, &mut events);
		}

		self.render_top_panel(ctx, session, locale, &strings, &mut events);
		self.render_hud_panel(ctx, session, &strings, &mut events);
		self.render_canvas(ctx, session, &strings, &mut events);

		// Keep the shape animating between timer ticks
		if session.is_running() {
			ctx.request_repaint_after(Duration::from_millis(16));
		}

		events
	}

	/// Refresh custom sliders from the session when the technique changes
	fn sync_sliders(&mut self, session: &BreathingSession) {
		let index = session.technique_index();
		if self.synced_technique != index || self.custom_secs.len() != session.durations().len() {
			self.custom_secs = session.durations().to_vec();
			for s in &mut self.custom_secs {
				*s = s.clamp(2.0, 10.0);
			}
			self.synced_technique = index;
			self.preset = Preset::Default;
		}
	}

	fn handle_keyboard_input(&mut self, ctx: &egui::Context, events: &mut Vec<Event>) {
		if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
			events.push(Event::Session(SessionEvent::TogglePlay));
		}
		if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
			events.push(Event::Session(SessionEvent::Navigate(NavDirection::Next)));
		}
		if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
			events.push(Event::Session(SessionEvent::Navigate(NavDirection::Prev)));
		}
		if ctx.input(|i| i.key_pressed(egui::Key::R)) {
			events.push(Event::Session(SessionEvent::Reset));
		}
	}

	fn render_top_panel(
		&mut self,
		ctx: &egui::Context,
		session: &BreathingSession,
		locale: &LocaleManager,
		strings: &Strings<'_>,
		events: &mut Vec<Event>,
	) {
		let technique = session.technique();

		egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
			ui.horizontal(|ui| {
				if ui.button("◀").clicked() {
					events.push(Event::Session(SessionEvent::Navigate(NavDirection::Prev)));
				}
				ui.heading(strings.get(technique.name_key));
				if ui.button("▶").clicked() {
					events.push(Event::Session(SessionEvent::Navigate(NavDirection::Next)));
				}

				ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
					let active_name = locale
						.languages()
						.find(|(code, _)| *code == locale.active())
						.map(|(_, name)| name.to_owned())
						.unwrap_or_default();
					egui::ComboBox::from_id_salt("language")
						.selected_text(active_name)
						.show_ui(ui, |ui| {
							for (code, name) in locale.languages() {
								if ui
									.selectable_label(code == locale.active(), name)
									.clicked()
								{
									events.push(Event::Locale(LocaleEvent::SetLanguage {
										code: code.to_owned(),
									}));
								}
							}
						});
					ui.label(strings.get("ui.language"));
				});
			});

			ui.horizontal(|ui| {
				ui.label(strings.get("ui.durations"));
				self.render_preset_picker(ui, session, strings, events);
			});

			if self.preset == Preset::Custom {
				ui.horizontal_wrapped(|ui| {
					for (i, phase) in technique.phases.iter().enumerate() {
						ui.add(
							egui::Slider::new(&mut self.custom_secs[i], 2.0..=10.0)
								.text(strings.get(phase.kind.label_key()))
								.suffix("s"),
						);
					}
					if ui.button(strings.get("ui.apply")).clicked() {
						events.push(Event::Session(SessionEvent::SetDurations {
							secs: self.custom_secs.clone(),
						}));
					}
				});
			}
			ui.add_space(2.0);
		});
	}

	fn render_preset_picker(
		&mut self,
		ui: &mut egui::Ui,
		session: &BreathingSession,
		strings: &Strings<'_>,
		events: &mut Vec<Event>,
	) {
		let technique = session.technique();
		let label = match self.preset {
			Preset::Default => strings.get("ui.preset.default"),
			Preset::Calm => strings.get("ui.preset.calm"),
			Preset::Custom => strings.get("ui.preset.custom"),
		};
		egui::ComboBox::from_id_salt("duration_preset")
			.selected_text(label)
			.show_ui(ui, |ui| {
				if ui
					.selectable_label(self.preset == Preset::Default, strings.get("ui.preset.default"))
					.clicked() && self.preset != Preset::Default
				{
					self.preset = Preset::Default;
					events.push(Event::Session(SessionEvent::SetDurations {
						secs: technique.default_durations(),
					}));
				}
				if ui
					.selectable_label(self.preset == Preset::Calm, strings.get("ui.preset.calm"))
					.clicked() && self.preset != Preset::Calm
				{
					self.preset = Preset::Calm;
					events.push(Event::Session(SessionEvent::SetDurations {
						secs: calm_durations(technique),
					}));
				}
				if ui
					.selectable_label(self.preset == Preset::Custom, strings.get("ui.preset.custom"))
					.clicked()
				{
					self.preset = Preset::Custom;
				}
			});
	}

	fn render_hud_panel(
		&mut self,
		ctx: &egui::Context,
		session: &BreathingSession,
		strings: &Strings<'_>,
		events: &mut Vec<Event>,
	) {
		egui::TopBottomPanel::bottom("hud_panel").show(ctx, |ui| {
			ui.add_space(4.0);
			ui.horizontal(|ui| {
				let play_label = if session.is_running() {
					strings.get("ui.pause")
				} else {
					strings.get("ui.play")
				};
				if ui.button(play_label).clicked() {
					events.push(Event::Session(SessionEvent::TogglePlay));
				}
				if ui.button(strings.get("ui.reset")).clicked() {
					events.push(Event::Session(SessionEvent::Reset));
				}

				ui.separator();
				ui.label(format!(
					"{}: {}",
					strings.get("ui.time"),
					format_mmss(session.elapsed_secs())
				));
				ui.separator();
				ui.label(format!("{}: {}", strings.get("ui.cycles"), session.cycles()));
			});
			ui.add_space(4.0);
		});
	}

	fn render_canvas(
		&mut self,
		ctx: &egui::Context,
		session: &BreathingSession,
		strings: &Strings<'_>,
		_events: &mut Vec<Event>,
	) {
		egui::CentralPanel::default().show(ctx, |ui| {
			let rect = ui.available_rect_before_wrap();
			let painter = ui.painter_at(rect);
			let center = rect.center();
			let size = rect.width().min(rect.height()) * 0.36;

			let technique = session.technique();
			let kinds = technique.phase_kinds();
			let phase_kind = kinds[session.phase_index() % technique.phase_count()];
			let color = phase_color(phase_kind);

			let transform = shapes::render(
				technique.shape,
				&kinds,
				session.phase_index(),
				session.progress(),
				size,
			);

			// Shape outline, scaled by the pulse factor
			for ring in outline::outline(technique.shape, size) {
				let points: Vec<Pos2> = ring
					.iter()
					.map(|p| center + p.to_vec2() * transform.scale)
					.collect();
				painter.add(egui::Shape::closed_line(points, Stroke::new(3.0, color)));
			}

			// Moving indicator for path shapes
			if let Some(indicator) = transform.indicator {
				let pos = center + indicator.to_vec2();
				painter.circle_filled(pos, size * 0.045, color);
				painter.circle_stroke(
					pos,
					size * 0.07,
					Stroke::new(1.5, color.gamma_multiply(0.5)),
				);
			}

			// Centered phase label with countdown and progress ring
			let font_size = (size * 0.16).max(16.0);
			draw_outlined_text(
				&painter,
				center,
				strings.get(phase_kind.label_key()),
				FontId::proportional(font_size),
				color,
			);
			draw_outlined_text(
				&painter,
				center + egui::vec2(0.0, font_size * 1.1),
				&session.phase_remaining_secs().to_string(),
				FontId::monospace(font_size * 0.8),
				Color32::WHITE,
			);
			draw_progress_arc(
				&painter,
				center,
				font_size * 2.2,
				session.progress(),
				color,
			);

			if !session.is_running() {
				draw_outlined_text(
					&painter,
					egui::pos2(center.x, rect.bottom() - font_size),
					strings.get("ui.press_play"),
					FontId::proportional((font_size * 0.6).max(12.0)),
					Color32::LIGHT_GRAY,
				);
			}
		});
	}
}

impl Default for ViewManager {
	fn default() -> Self {
		Self::new()
	}
}

fn phase_color(kind: PhaseKind) -> Color32 {
	match kind {
		PhaseKind::BreatheIn => Color32::LIGHT_BLUE,
		PhaseKind::Hold => Color32::from_rgb(235, 200, 90),
		PhaseKind::BreatheOut => Color32::LIGHT_GREEN,
	}
}

/// Relaxing preset: long inhale, no hold, longer exhale
fn calm_durations(technique: &Technique) -> Vec<f32> {
	technique
		.phases
		.iter()
		.map(|p| match p.kind {
			PhaseKind::BreatheIn => 6.0,
			PhaseKind::Hold => 0.0,
			PhaseKind::BreatheOut => 7.0,
		})
		.collect()
}

/// Session time as `M:SS`
fn format_mmss(secs: u64) -> String {
	format!("{}:{:02}", secs / 60, secs % 60)
}

fn draw_outlined_text(
	painter: &egui::Painter,
	pos: Pos2,
	text: &str,
	font_id: FontId,
	color: Color32,
) {
	let stroke = (font_id.size * 0.05).max(1.0);
	let offsets = [
		egui::vec2(-stroke, -stroke),
		egui::vec2(stroke, -stroke),
		egui::vec2(-stroke, stroke),
		egui::vec2(stroke, stroke),
	];
	for offset in offsets {
		painter.text(
			pos + offset,
			Align2::CENTER_CENTER,
			text,
			font_id.clone(),
			Color32::BLACK,
		);
	}
	painter.text(pos, Align2::CENTER_CENTER, text, font_id, color);
}

/// Thin arc around the phase label showing intra-phase progress
fn draw_progress_arc(
	painter: &egui::Painter,
	center: Pos2,
	radius: f32,
	progress: f32,
	color: Color32,
) {
	let progress = progress.clamp(0.0, 1.0);
	if progress <= 0.0 {
		return;
	}
	let steps = (progress * 64.0).ceil().max(2.0) as usize;
	let points: Vec<Pos2> = (0..=steps)
		.map(|i| {
			let angle = -FRAC_PI_2 + progress * TAU * i as f32 / steps as f32;
			center + egui::vec2(angle.cos() * radius, angle.sin() * radius)
		})
		.collect();
	painter.add(egui::Shape::line(points, Stroke::new(2.0, color)));
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::technique::CATALOG;

	#[test]
	fn session_time_formats_as_minutes_and_padded_seconds() {
		assert_eq!(format_mmss(0), "0:00");
		assert_eq!(format_mmss(9), "0:09");
		assert_eq!(format_mmss(65), "1:05");
		assert_eq!(format_mmss(600), "10:00");
	}

	#[test]
	fn calm_preset_drops_holds_entirely() {
		let triangle = CATALOG.iter().find(|t| t.id == "triangle").unwrap();
		assert_eq!(calm_durations(triangle), vec![6.0, 0.0, 7.0]);
	}

	#[test]
	fn calm_preset_always_sums_positive() {
		for t in CATALOG {
			assert!(calm_durations(t).iter().sum::<f32>() > 0.0, "{}", t.id);
		}
	}
}
