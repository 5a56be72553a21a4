use crate::screens::login::LoginScreen;
use crate::screens::{About, Header};
use crate::settings;
use crate::ui::{window_owner, View, Window};
use std::any::type_name;
use tracing::Level;
use viewbind_macro::BindViews;
use viewbind_runtime::{bind_instance, BindError, BindOutcome, ResolveError, Resolver};

/// Exists only in test builds.
#[derive(BindViews, Debug, Default)]
pub struct Dialog {
	pub window: Window,
	#[bind_view(5)]
	pub ok_button: Option<View>,
}

window_owner!(Dialog);

include!(concat!(env!("OUT_DIR"), "/viewbind/tests/Dialog_ViewBinder.rs"));

fn setup() -> viewbind_runtime::Registry {
	viewbind_core::init(Level::DEBUG);
	crate::registry().unwrap()
}

#[test]
fn every_owner_is_registered() {
	let registry = setup();
	assert_eq!(registry.len(), 4);

	for name in [
		type_name::<Dialog>(),
		type_name::<LoginScreen>(),
		type_name::<Header>(),
		type_name::<settings::Header>(),
	] {
		assert!(registry.contains(&format!("{name}_ViewBinder")), "{name}");
	}
}

#[test]
fn login_screen_binds_in_declaration_order() -> eyre::Result<()> {
	let registry = setup();
	let mut screen = LoginScreen {
		window: Window::with_views([101, 102]),
		title: "Log in".to_string(),
		..LoginScreen::default()
	};

	let outcome = bind_instance(&registry, &mut screen)?;
	assert!(matches!(
		outcome,
		BindOutcome::Bound { binder } if binder == format!("{}_ViewBinder", type_name::<LoginScreen>())
	));
	assert_eq!(screen.window.lookups(), vec![101, 102]);
	assert_eq!(screen.email_field, Some(View { id: 101 }));
	assert_eq!(screen.submit_button, Some(View { id: 102 }));
	assert_eq!(screen.title, "Log in");
	Ok(())
}

#[test]
fn same_named_owners_bind_independently() -> eyre::Result<()> {
	let registry = setup();

	let mut screens = Header {
		window: Window::with_views([7, 8]),
		..Header::default()
	};
	let mut settings = settings::Header::new(Window::with_views([7, 8]));

	assert!(bind_instance(&registry, &mut screens)?.is_bound());
	assert!(bind_instance(&registry, &mut settings)?.is_bound());

	assert_eq!(screens.window.lookups(), vec![7]);
	assert_eq!(settings.window.lookups(), vec![7, 8]);
	assert_eq!(settings.title(), Some(&View { id: 7 }));
	assert_eq!(settings.subtitle, Some(View { id: 8 }));
	Ok(())
}

#[test]
fn owners_without_bindings_are_skipped() -> eyre::Result<()> {
	let registry = setup();
	let mut about = About {
		window: Window::with_views([1]),
		..About::default()
	};

	let outcome = bind_instance(&registry, &mut about)?;
	assert!(matches!(
		outcome,
		BindOutcome::Skipped(ResolveError::BinderNotFound { .. })
	));
	assert!(about.window.lookups().is_empty());
	assert_eq!(about.body, None);
	Ok(())
}

#[test]
fn missing_views_fail_the_bind() {
	let registry = setup();
	let mut screen = LoginScreen {
		window: Window::with_views([101]),
		..LoginScreen::default()
	};

	let error = bind_instance(&registry, &mut screen).unwrap_err();
	assert!(matches!(
		error,
		BindError::ViewNotFound {
			member: "submit_button",
			id: 102,
			..
		}
	));
	assert_eq!(screen.email_field, Some(View { id: 101 }));
	assert_eq!(screen.submit_button, None);
}

#[test]
fn cached_resolver_binds_repeatedly() -> eyre::Result<()> {
	let resolver = Resolver::cached(setup());

	for _ in 0..3 {
		let mut screen = LoginScreen {
			window: Window::with_views([101, 102]),
			..LoginScreen::default()
		};
		assert!(resolver.bind_instance(&mut screen)?.is_bound());
		assert_eq!(screen.window.lookups(), vec![101, 102]);
	}
	Ok(())
}

#[test]
fn test_only_owners_bind() -> eyre::Result<()> {
	let registry = setup();
	let mut dialog = Dialog {
		window: Window::with_views([5]),
		..Dialog::default()
	};

	assert!(bind_instance(&registry, &mut dialog)?.is_bound());
	assert_eq!(dialog.ok_button, Some(View { id: 5 }));
	Ok(())
}
