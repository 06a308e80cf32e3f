use super::event::Event;
use std::collections::VecDeque;

/// Priority event queue with 3 priority levels
pub struct EventQueue {
	queues: [VecDeque<Event>; 3],
}

impl EventQueue {
	pub fn new() -> Self {
		Self {
			queues: [
				VecDeque::new(), // Interact
				VecDeque::new(), // Normal
				VecDeque::new(), // Tick
			],
		}
	}

	/// Push an event to the appropriate priority queue
	pub fn push(&mut self, event: Event) {
		let priority = event.priority();
		self.queues[priority.as_index()].push_back(event);
	}

	/// Pop the highest priority event available
	pub fn pop(&mut self) -> Option<Event> {
		self.queues.iter_mut().find_map(|q| q.pop_front())
	}

	pub fn is_empty(&self) -> bool {
		self.queues.iter().all(|q| q.is_empty())
	}
}

impl Default for EventQueue {
	fn default() -> Self {
		Self::new()
	}
}
