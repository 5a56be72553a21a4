use crate::ui::{window_owner, View, Window};
use viewbind_macro::BindViews;

/// Same name as `screens::Header`, different bindings.
#[derive(BindViews, Debug, Default)]
pub struct Header {
	pub window: Window,
	#[bind_view(7)]
	title: Option<View>,
	#[bind_view(8)]
	pub subtitle: Option<View>,
}

impl Header {
	pub fn new(window: Window) -> Header {
		Header {
			window,
			..Header::default()
		}
	}

	pub fn title(&self) -> Option<&View> {
		self.title.as_ref()
	}
}

window_owner!(Header);

include!(concat!(env!("OUT_DIR"), "/viewbind/settings/Header_ViewBinder.rs"));
