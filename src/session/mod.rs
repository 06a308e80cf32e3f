use crate::reactor::{ComponentResponse, Event, SessionEvent};
use crate::technique::{self, Technique};
use crate::types::NavDirection;
use std::time::{Duration, Instant};

/// Nominal phase-progress tick interval. Actual progress is always computed
/// from measured wall-clock deltas, never from this constant.
const PROGRESS_TICK: Duration = Duration::from_millis(100);
const SECOND_TICK: Duration = Duration::from_secs(1);

/// The breathing cycle clock: advances phase index and intra-phase progress
/// while running, counts completed cycles and whole session seconds.
///
/// Both timers are self-rescheduling scheduler events stamped with
/// `timer_epoch`; pause, reset and technique switches bump the epoch so any
/// tick still in flight is dead on arrival.
pub struct BreathingSession {
	technique_idx: usize,
	/// Active per-phase durations in seconds; defaults or a user override
	durations: Vec<f32>,
	phase_idx: usize,
	/// Seconds elapsed inside the current phase
	phase_elapsed: f32,
	running: bool,
	elapsed_secs: u64,
	cycles: u32,
	timer_epoch: u64,
	last_tick: Option<Instant>,
}

impl BreathingSession {
	pub fn new() -> Self {
		let technique = technique::get(0);
		Self {
			technique_idx: 0,
			durations: technique.default_durations(),
			phase_idx: 0,
			phase_elapsed: 0.0,
			running: false,
			elapsed_secs: 0,
			cycles: 0,
			timer_epoch: 0,
			last_tick: None,
		}
	}

	pub fn handle(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::Session(SessionEvent::Play) => self.play(),
			Event::Session(SessionEvent::Pause) => {
				self.pause();
				ComponentResponse::none()
			}
			Event::Session(SessionEvent::TogglePlay) => {
				if self.running {
					ComponentResponse::emit(Event::Session(SessionEvent::Pause))
				} else {
					ComponentResponse::emit(Event::Session(SessionEvent::Play))
				}
			}
			Event::Session(SessionEvent::Reset) => {
				self.reset();
				ComponentResponse::none()
			}
			Event::Session(SessionEvent::ProgressTick { epoch }) => self.on_progress_tick(*epoch),
			Event::Session(SessionEvent::SecondTick { epoch }) => self.on_second_tick(*epoch),
			Event::Session(SessionEvent::SetDurations { secs }) => {
				self.set_durations(secs);
				ComponentResponse::none()
			}
			Event::Session(SessionEvent::SelectTechnique { index }) => {
				self.switch_technique(technique::wrap_index(*index as isize));
				ComponentResponse::none()
			}
			Event::Session(SessionEvent::Navigate(direction)) => {
				let step = match direction {
					NavDirection::Next => 1,
					NavDirection::Prev => -1,
				};
				self.switch_technique(technique::wrap_index(self.technique_idx as isize + step));
				ComponentResponse::none()
			}
			_ => ComponentResponse::none(),
		}
	}

	fn play(&mut self) -> ComponentResponse {
		if self.running {
			return ComponentResponse::none();
		}
		self.running = true;
		self.timer_epoch += 1;
		self.last_tick = Some(Instant::now());

		let epoch = self.timer_epoch;
		ComponentResponse::schedule(
			Event::Session(SessionEvent::ProgressTick { epoch }),
			PROGRESS_TICK,
		)
		.and_schedule(Event::Session(SessionEvent::SecondTick { epoch }), SECOND_TICK)
	}

	/// Stop both timers; phase index and progress are preserved.
	fn pause(&mut self) {
		self.running = false;
		self.timer_epoch += 1;
		self.last_tick = None;
	}

	fn reset(&mut self) {
		self.pause();
		self.phase_idx = 0;
		self.phase_elapsed = 0.0;
		self.elapsed_secs = 0;
		self.cycles = 0;
	}

	fn on_progress_tick(&mut self, epoch: u64) -> ComponentResponse {
		if epoch != self.timer_epoch || !self.running {
			return ComponentResponse::none();
		}
		let now = Instant::now();
		if let Some(prev) = self.last_tick {
			self.advance((now - prev).as_secs_f32());
		}
		self.last_tick = Some(now);
		ComponentResponse::schedule(
			Event::Session(SessionEvent::ProgressTick { epoch }),
			PROGRESS_TICK,
		)
	}

	fn on_second_tick(&mut self, epoch: u64) -> ComponentResponse {
		if epoch != self.timer_epoch || !self.running {
			return ComponentResponse::none();
		}
		self.elapsed_secs += 1;
		ComponentResponse::schedule(
			Event::Session(SessionEvent::SecondTick { epoch }),
			SECOND_TICK,
		)
	}

	/// Accumulate `dt` seconds of running time into the phase clock.
	///
	/// Overflow carries into the next phase, so driving the clock with ticks
	/// summing to exactly one phase duration lands on the next phase boundary
	/// with zero remainder. Zero-duration phases are skipped on the same call;
	/// `set_durations` guarantees the table sums to a positive value, so the
	/// carry loop terminates.
	pub fn advance(&mut self, dt: f32) {
		if !dt.is_finite() || dt < 0.0 {
			return;
		}
		self.phase_elapsed += dt;
		loop {
			let dur = self.durations[self.phase_idx];
			if self.phase_elapsed < dur {
				break;
			}
			self.phase_elapsed -= dur;
			self.phase_idx = (self.phase_idx + 1) % self.durations.len();
			if self.phase_idx == 0 {
				self.cycles += 1;
			}
		}
	}

	/// Replace the active duration table, then implicit reset. Negative or
	/// non-finite entries clamp to zero (zero phases are skipped while
	/// running); a table of the wrong length or summing to zero is rejected.
	fn set_durations(&mut self, secs: &[f32]) {
		if secs.len() != self.durations.len() {
			log::warn!(
				"Duration table length {} does not match {} phases, ignoring",
				secs.len(),
				self.durations.len()
			);
			return;
		}
		let clamped: Vec<f32> = secs
			.iter()
			.map(|s| if s.is_finite() { s.max(0.0) } else { 0.0 })
			.collect();
		if clamped.iter().sum::<f32>() <= 0.0 {
			log::warn!("Duration table sums to zero, ignoring");
			return;
		}
		self.durations = clamped;
		self.reset();
	}

	fn switch_technique(&mut self, index: usize) {
		if index != self.technique_idx {
			log::debug!("Switching technique to '{}'", technique::get(index).id);
		}
		self.technique_idx = index;
		self.durations = technique::get(index).default_durations();
		self.reset();
	}

	// Accessors for the view

	pub fn technique(&self) -> &'static Technique {
		technique::get(self.technique_idx)
	}

	pub fn technique_index(&self) -> usize {
		self.technique_idx
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn phase_index(&self) -> usize {
		self.phase_idx
	}

	/// Normalized position within the current phase, in [0, 1]
	pub fn progress(&self) -> f32 {
		let dur = self.durations[self.phase_idx];
		if dur > 0.0 {
			(self.phase_elapsed / dur).clamp(0.0, 1.0)
		} else {
			0.0
		}
	}

	pub fn durations(&self) -> &[f32] {
		&self.durations
	}

	pub fn elapsed_secs(&self) -> u64 {
		self.elapsed_secs
	}

	pub fn cycles(&self) -> u32 {
		self.cycles
	}

	/// Whole seconds left in the current phase, for the countdown label
	pub fn phase_remaining_secs(&self) -> u64 {
		let dur = self.durations[self.phase_idx];
		(dur - self.phase_elapsed).max(0.0).ceil() as u64
	}
}

impl Default for BreathingSession {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::technique::CATALOG;

	fn started() -> BreathingSession {
		let mut s = BreathingSession::new();
		s.handle(&Event::Session(SessionEvent::Play));
		s
	}

	fn select(s: &mut BreathingSession, id: &str) {
		let index = CATALOG.iter().position(|t| t.id == id).unwrap();
		s.handle(&Event::Session(SessionEvent::SelectTechnique { index }));
	}

	#[test]
	fn ticks_summing_to_one_phase_land_on_the_boundary() {
		// Square: [in 4, hold 4, out 4, hold 4]. 32 ticks of 125ms sum to
		// exactly one phase; 0.125 is binary-exact so no tolerance is needed.
		let mut s = started();
		assert_eq!(s.technique().id, "square");
		for _ in 0..32 {
			s.advance(0.125);
		}
		assert_eq!(s.phase_index(), 1);
		assert!(s.progress() < 1e-4, "progress = {}", s.progress());
	}

	#[test]
	fn uneven_ticks_carry_overflow_into_the_next_phase() {
		let mut s = started();
		s.advance(4.25);
		assert_eq!(s.phase_index(), 1);
		// 0.25s into a 4s hold
		assert!((s.progress() - 0.0625).abs() < 1e-5);
	}

	#[test]
	fn cycle_count_increments_only_on_wrap_to_phase_zero() {
		let mut s = started();
		s.advance(15.875);
		assert_eq!(s.phase_index(), 3);
		assert_eq!(s.cycles(), 0);
		s.advance(0.125);
		assert_eq!(s.phase_index(), 0);
		assert_eq!(s.cycles(), 1);
		s.advance(16.0);
		assert_eq!(s.cycles(), 2);
	}

	#[test]
	fn pause_freezes_state_and_kills_stale_ticks() {
		let mut s = started();
		let stale_epoch = s.timer_epoch;
		s.advance(5.0);
		let (phase, progress) = (s.phase_index(), s.progress());
		s.handle(&Event::Session(SessionEvent::Pause));
		assert!(!s.is_running());

		// A tick from the pre-pause timer generation must mutate nothing
		// and must not reschedule itself.
		let response = s.handle(&Event::Session(SessionEvent::ProgressTick {
			epoch: stale_epoch,
		}));
		assert!(response.events.is_empty() && response.scheduled.is_empty());
		assert_eq!(s.phase_index(), phase);
		assert_eq!(s.progress(), progress);

		// Resume picks up from the preserved state
		s.handle(&Event::Session(SessionEvent::Play));
		assert!(s.is_running());
		assert_eq!(s.phase_index(), phase);
		assert_eq!(s.progress(), progress);
	}

	#[test]
	fn play_schedules_both_timers() {
		let mut s = BreathingSession::new();
		let response = s.handle(&Event::Session(SessionEvent::Play));
		assert_eq!(response.scheduled.len(), 2);
		// Playing again must not spawn a second timer pair
		let response = s.handle(&Event::Session(SessionEvent::Play));
		assert!(response.scheduled.is_empty());
	}

	#[test]
	fn reset_zeroes_everything() {
		let mut s = started();
		s.advance(23.0);
		s.handle(&Event::Session(SessionEvent::SecondTick {
			epoch: s.timer_epoch,
		}));
		s.handle(&Event::Session(SessionEvent::Reset));
		assert!(!s.is_running());
		assert_eq!(s.phase_index(), 0);
		assert_eq!(s.progress(), 0.0);
		assert_eq!(s.elapsed_secs(), 0);
		assert_eq!(s.cycles(), 0);
	}

	#[test]
	fn zero_duration_phase_is_skipped_on_the_same_tick() {
		let mut s = BreathingSession::new();
		select(&mut s, "triangle");
		s.handle(&Event::Session(SessionEvent::SetDurations {
			secs: vec![6.0, 0.0, 7.0],
		}));
		s.handle(&Event::Session(SessionEvent::Play));
		s.advance(6.0);
		// The zero-length hold never becomes the resting phase
		assert_eq!(s.phase_index(), 2);
		assert!(s.progress() < 1e-4);
		s.advance(7.0);
		assert_eq!(s.phase_index(), 0);
		assert_eq!(s.cycles(), 1);
	}

	#[test]
	fn set_durations_is_an_implicit_reset() {
		let mut s = started();
		s.advance(9.0);
		s.handle(&Event::Session(SessionEvent::SetDurations {
			secs: vec![2.0, 2.0, 2.0, 2.0],
		}));
		assert!(!s.is_running());
		assert_eq!(s.phase_index(), 0);
		assert_eq!(s.progress(), 0.0);
		assert_eq!(s.durations(), &[2.0, 2.0, 2.0, 2.0]);
	}

	#[test]
	fn invalid_duration_tables_are_rejected() {
		let mut s = started();
		let before = s.durations().to_vec();
		s.handle(&Event::Session(SessionEvent::SetDurations {
			secs: vec![1.0, 2.0],
		}));
		assert_eq!(s.durations(), before.as_slice());
		s.handle(&Event::Session(SessionEvent::SetDurations {
			secs: vec![0.0, 0.0, 0.0, 0.0],
		}));
		assert_eq!(s.durations(), before.as_slice());
		// Negative entries clamp to zero but the table is accepted
		s.handle(&Event::Session(SessionEvent::SetDurations {
			secs: vec![3.0, -1.0, 3.0, 3.0],
		}));
		assert_eq!(s.durations(), &[3.0, 0.0, 3.0, 3.0]);
	}

	#[test]
	fn navigation_wraps_across_the_catalog() {
		let mut s = BreathingSession::new();
		s.handle(&Event::Session(SessionEvent::Navigate(NavDirection::Prev)));
		assert_eq!(s.technique_index(), CATALOG.len() - 1);
		s.handle(&Event::Session(SessionEvent::Navigate(NavDirection::Next)));
		assert_eq!(s.technique_index(), 0);
	}

	#[test]
	fn switching_technique_restores_defaults_and_resets() {
		let mut s = started();
		s.advance(5.0);
		select(&mut s, "lungs");
		assert_eq!(s.technique().id, "lungs");
		assert_eq!(s.durations(), &[4.0, 7.0, 8.0]);
		assert_eq!(s.phase_index(), 0);
		assert_eq!(s.cycles(), 0);
		assert!(!s.is_running());
	}

	#[test]
	fn out_of_range_selection_wraps() {
		let mut s = BreathingSession::new();
		s.handle(&Event::Session(SessionEvent::SelectTechnique {
			index: CATALOG.len() + 2,
		}));
		assert_eq!(s.technique_index(), 2);
	}

	#[test]
	fn second_tick_counts_whole_seconds_and_reschedules() {
		let mut s = started();
		let epoch = s.timer_epoch;
		for _ in 0..65 {
			let response = s.handle(&Event::Session(SessionEvent::SecondTick { epoch }));
			assert_eq!(response.scheduled.len(), 1);
		}
		assert_eq!(s.elapsed_secs(), 65);
	}
}
