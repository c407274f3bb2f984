use colored::Colorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);
const CLEAR_LINE: &str = "\r\x1b[2K";

pub fn data_received(body: &str) {
	println!("{}", "Data received for analysis.".cyan());
	println!("{}", format!("Result:\n{}\n", body).green());
	println!("{}", "Waiting for AI response...".yellow());
}

pub fn response_received() {
	println!("{}", "✔ AI response received!\n".green());
}

pub fn error(message: &str) {
	eprintln!("{}", message.red());
}

/// Transient stderr spinner shown while the request is in flight.
pub struct Spinner {
	running: Arc<AtomicBool>,
	handle: thread::JoinHandle<()>,
}

impl Spinner {
	pub fn start() -> Self {
		let running = Arc::new(AtomicBool::new(true));
		let flag = running.clone();
		let handle = thread::spawn(move || {
			let mut stderr = io::stderr();
			let mut frame = 0usize;
			while flag.load(Ordering::Relaxed) {
				let _ = write!(stderr, "\r{}", FRAMES[frame % FRAMES.len()]);
				let _ = stderr.flush();
				frame += 1;
				thread::sleep(FRAME_INTERVAL);
			}
			let _ = write!(stderr, "{}", CLEAR_LINE);
			let _ = stderr.flush();
		});
		Spinner { running, handle }
	}

	pub fn stop(self) {
		self.running.store(false, Ordering::Relaxed);
		let _ = self.handle.join();
	}
}
