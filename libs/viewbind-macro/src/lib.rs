extern crate proc_macro;

mod check;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Makes `#[bind_view(id)]` legal on the fields of a struct and checks its arguments.
///
/// Expands to nothing. The binder itself is generated by the build script. Only
/// `bind_view` is registered; builds that scan for another attribute name need
/// their own helper-attribute registration.
#[proc_macro_derive(BindViews, attributes(bind_view))]
pub fn bind_views(item: TokenStream) -> TokenStream {
	let input = parse_macro_input!(item as DeriveInput);
	match check::check(&input) {
		Ok(()) => TokenStream::new(),
		Err(error) => error.to_compile_error().into(),
	}
}
