pub mod event;
pub mod queue;
pub mod scheduler;

pub use event::{ComponentResponse, Event, LocaleEvent, SessionEvent};
pub use queue::EventQueue;
pub use scheduler::Scheduler;

use crate::locale::LocaleManager;
use crate::session::BreathingSession;
use crate::view::ViewManager;
use eframe::egui;

pub struct Reactor {
	queue: EventQueue,
	scheduler: Scheduler,

	pub session: BreathingSession,
	pub locale: LocaleManager,
	pub view: ViewManager,
}

impl Reactor {
	pub fn new(_ctx: &egui::Context) -> Self {
		log::info!("Initializing components");
		Self {
			queue: EventQueue::new(),
			scheduler: Scheduler::new(),
			session: BreathingSession::new(),
			locale: LocaleManager::new(),
			view: ViewManager::new(),
		}
	}

	fn process_response(&mut self, response: ComponentResponse) {
		for e in response.events {
			self.queue.push(e);
		}
		for (e, d) in response.scheduled {
			self.scheduler.schedule(e, d);
		}
	}

	pub fn tick(&mut self, ctx: &egui::Context) {
		// Move due timer events into the queue
		self.scheduler.tick(&mut self.queue);

		// Process the queue until empty
		let mut iterations = 0;
		while let Some(event) = self.queue.pop() {
			log::trace!("Processing event: {:?}", event);
			let response = self.route(&event);
			self.process_response(response);

			iterations += 1;
			if iterations > 1000 {
				log::warn!("Event loop exceeded 1000 iterations, breaking");
				break;
			}
		}

		// Render, then process any events the UI produced
		let events = self.view.render(ctx, &self.session, &self.locale);
		for event in events {
			log::trace!("Processing render event: {:?}", event);
			let response = self.route(&event);
			self.process_response(response);
		}

		// Events produced during rendering are processed next frame
		if !self.queue.is_empty() {
			ctx.request_repaint();
		}

		// Wake up for the next scheduled timer event
		if let Some(due) = self.scheduler.next_due() {
			ctx.request_repaint_after(due.saturating_duration_since(std::time::Instant::now()));
		}
	}

	fn route(&mut self, event: &Event) -> ComponentResponse {
		match event {
			Event::Session(_) => self.session.handle(event),
			Event::Locale(_) => self.locale.handle(event),
		}
	}
}

impl eframe::App for Reactor {
	fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
		self.tick(ctx);
	}
}
