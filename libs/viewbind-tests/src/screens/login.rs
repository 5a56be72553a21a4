use crate::ui::{window_owner, View, Window};
use viewbind_macro::BindViews;

#[derive(BindViews, Debug, Default)]
pub struct LoginScreen {
	pub window: Window,
	#[bind_view(101)]
	pub email_field: Option<View>,
	#[bind_view(102)]
	pub submit_button: Option<View>,
	pub title: String,
}

window_owner!(LoginScreen);

include!(concat!(env!("OUT_DIR"), "/viewbind/screens/login/LoginScreen_ViewBinder.rs"));
