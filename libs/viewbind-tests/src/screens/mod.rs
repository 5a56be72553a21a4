use crate::ui::{window_owner, View, Window};
use viewbind_macro::BindViews;

pub mod login;

#[derive(BindViews, Debug, Default)]
pub struct Header {
	pub window: Window,
	#[bind_view(7)]
	pub title: Option<View>,
}

window_owner!(Header);

/// Has views but no bindings.
#[derive(Debug, Default)]
pub struct About {
	pub window: Window,
	pub body: Option<View>,
}

include!(concat!(env!("OUT_DIR"), "/viewbind/screens/Header_ViewBinder.rs"));
