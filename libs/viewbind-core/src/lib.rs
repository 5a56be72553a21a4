mod name;
mod storage;

pub use name::*;
use std::sync::Once;
pub use storage::*;
use tracing::Level;
use tracing_subscriber::filter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Resource identifier carried by `#[bind_view(..)]` and passed to `find_view_by_id`.
pub type ViewId = u32;

static START: Once = Once::new();

/// Installs the global tracing subscriber. Only the first call has an effect.
pub fn init(level: Level) {
	START.call_once(|| {
		let filter = filter::Targets::new()
			.with_default(level)
			.with_target("syn", Level::WARN);
		let result = tracing_subscriber::registry()
			.with(tracing_subscriber::fmt::layer().with_target(false))
			.with(filter)
			.try_init();

		if let Err(error) = result {
			eprintln!("tracing subscriber already installed: {error}");
		}
	});
}
