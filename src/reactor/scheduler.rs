use super::event::Event;
use super::queue::EventQueue;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

struct Pending {
	due: Instant,
	event: Event,
}

impl PartialEq for Pending {
	fn eq(&self, other: &Self) -> bool {
		self.due == other.due
	}
}

impl Eq for Pending {}

impl PartialOrd for Pending {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Pending {
	// Min-heap on due time
	fn cmp(&self, other: &Self) -> Ordering {
		other.due.cmp(&self.due)
	}
}

/// Time-ordered event source; ticks for both session timers live here.
pub struct Scheduler {
	pending: BinaryHeap<Pending>,
}

impl Scheduler {
	pub fn new() -> Self {
		Self {
			pending: BinaryHeap::new(),
		}
	}

	/// Schedule an event to fire after `delay`
	pub fn schedule(&mut self, event: Event, delay: Duration) {
		self.pending.push(Pending {
			due: Instant::now() + delay,
			event,
		});
	}

	/// Drain every due event into the queue
	pub fn tick(&mut self, queue: &mut EventQueue) {
		let now = Instant::now();
		while self.pending.peek().is_some_and(|p| p.due <= now) {
			if let Some(p) = self.pending.pop() {
				queue.push(p.event);
			}
		}
	}

	/// Soonest due time among pending events, if any
	pub fn next_due(&self) -> Option<Instant> {
		self.pending.peek().map(|p| p.due)
	}
}

impl Default for Scheduler {
	fn default() -> Self {
		Self::new()
	}
}
