#![windows_subsystem = "windows"]

mod locale;
mod reactor;
mod session;
mod shapes;
mod technique;
mod types;
mod view;

use reactor::Reactor;

fn main() -> eframe::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let native_options = eframe::NativeOptions {
		viewport: eframe::egui::ViewportBuilder::default()
			.with_inner_size([900.0, 720.0])
			.with_min_inner_size([480.0, 480.0]),
		..Default::default()
	};

	eframe::run_native(
		"Respira",
		native_options,
		Box::new(|cc| Ok(Box::new(Reactor::new(&cc.egui_ctx)))),
	)
}
