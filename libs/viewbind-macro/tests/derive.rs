use viewbind_macro::BindViews;

#[derive(Debug, Default, PartialEq)]
struct View(u32);

#[derive(BindViews, Default)]
struct LoginScreen {
	#[bind_view(101)]
	email_field: Option<View>,
	#[bind_view(102)]
	submit_button: Option<View>,
	title: String,
}

#[derive(BindViews, Default)]
struct Header(#[bind_view(7)] Option<View>);

#[test]
fn derive_leaves_the_struct_alone() {
	let screen = LoginScreen {
		title: "Log in".to_string(),
		..LoginScreen::default()
	};
	assert_eq!(screen.email_field, None);
	assert_eq!(screen.submit_button, None);
	assert_eq!(screen.title, "Log in");

	assert_eq!(Header::default().0, None);
}
