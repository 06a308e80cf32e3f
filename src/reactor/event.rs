use crate::types::NavDirection;
use std::time::Duration;

#[derive(Clone, Debug)]
pub enum Event {
	Session(SessionEvent),
	Locale(LocaleEvent),
}

impl Event {
	pub fn priority(&self) -> Priority {
		match self {
			Event::Session(SessionEvent::ProgressTick { .. }) => Priority::Tick,
			Event::Session(SessionEvent::SecondTick { .. }) => Priority::Tick,
			Event::Session(_) => Priority::Interact,
			Event::Locale(_) => Priority::Normal,
		}
	}
}

/// User interactions are handled before self-rescheduled timer ticks so a
/// pause issued this frame kills a tick queued in the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
	Interact = 0,
	Normal = 1,
	Tick = 2,
}

impl Priority {
	pub fn as_index(&self) -> usize {
		*self as usize
	}
}

#[derive(Clone, Debug)]
pub enum SessionEvent {
	Play,
	Pause,
	TogglePlay,
	Reset,
	/// Phase-progress timer fired. Stale when `epoch` no longer matches.
	ProgressTick {
		epoch: u64,
	},
	/// Session-seconds timer fired, one per second of running time.
	SecondTick {
		epoch: u64,
	},
	/// Replace the active per-phase duration table (implicit reset)
	SetDurations {
		secs: Vec<f32>,
	},
	/// Jump to a catalog technique by index (wrapped into range)
	SelectTechnique {
		index: usize,
	},
	/// Step to the neighbouring technique, wrapping across the catalog
	Navigate(NavDirection),
}

#[derive(Clone, Debug)]
pub enum LocaleEvent {
	SetLanguage { code: String },
}

/// Response from component.handle()
#[derive(Default)]
pub struct ComponentResponse {
	/// Events to dispatch immediately
	pub events: Vec<Event>,
	/// Events to schedule (event, delay)
	pub scheduled: Vec<(Event, Duration)>,
}

impl ComponentResponse {
	pub fn none() -> Self {
		Self::default()
	}

	pub fn emit(event: Event) -> Self {
		Self {
			events: vec![event],
			scheduled: vec![],
		}
	}

	pub fn schedule(event: Event, delay: Duration) -> Self {
		Self {
			events: vec![],
			scheduled: vec![(event, delay)],
		}
	}

	pub fn and_schedule(mut self, event: Event, delay: Duration) -> Self {
		self.scheduled.push((event, delay));
		self
	}
}
