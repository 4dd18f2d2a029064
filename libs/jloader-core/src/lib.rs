mod flags;
mod name;
mod storage;
mod ty;

pub use flags::*;
pub use name::*;
pub use storage::*;
pub use ty::*;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable that overrides the default log level.
pub const LOG_ENV: &str = "JLOADER_LOG";

static START: Once = Once::new();

/// Installs the global tracing subscriber. Safe to call more than once.
pub fn init() {
	START.call_once(|| {
		let level = std::env::var(LOG_ENV)
			.ok()
			.and_then(|value| value.parse::<Level>().ok())
			.unwrap_or(Level::INFO);

		let filter = filter::Targets::new()
			.with_default(level)
			.with_target("jloader_reader", Level::INFO.min(level));
		let layered = tracing_subscriber::registry()
			.with(tracing_subscriber::fmt::layer())
			.with(filter);

		// Another subscriber (e.g. a test harness) may already be installed.
		let _ = layered.try_init();
	});
}
