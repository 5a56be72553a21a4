use ahash::AHashSet;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Member};
use viewbind_reader::{attribute_value, is_binding_attribute, DEFAULT_ATTRIBUTE};

/// Every binding attribute in `input` must sit on a field of a non-generic struct,
/// once per field, with a view id as its only argument.
pub fn check(input: &DeriveInput) -> syn::Result<()> {
	let mut errors = Errors::default();

	for attr in bindings(&input.attrs) {
		errors.push(attr, "attribute is not on a struct field");
	}

	match &input.data {
		Data::Struct(data) => check_fields(input, &data.fields, &mut errors),
		Data::Enum(data) => {
			for variant in &data.variants {
				let fields = variant.fields.iter().flat_map(|field| bindings(&field.attrs));
				for attr in bindings(&variant.attrs).chain(fields) {
					errors.push(attr, "attribute is not on a struct field");
				}
			}
		}
		Data::Union(data) => {
			for field in &data.fields.named {
				for attr in bindings(&field.attrs) {
					errors.push(attr, "attribute is not on a struct field");
				}
			}
		}
	}

	errors.finish()
}

fn check_fields(input: &DeriveInput, fields: &Fields, errors: &mut Errors) {
	let generic = !input.generics.params.is_empty();
	let mut seen = AHashSet::new();

	for (index, field) in fields.iter().enumerate() {
		let member = match &field.ident {
			Some(ident) => Member::Named(ident.clone()),
			None => Member::from(index),
		};

		for attr in bindings(&field.attrs) {
			if generic {
				errors.push(attr, format!("owner `{}` has generic parameters", input.ident));
				continue;
			}

			match attribute_value(attr).map(|value| value.view_id()) {
				None => errors.push(attr, "attribute has no identifier"),
				Some(Err(reason)) => errors.push(attr, reason),
				Some(Ok(_)) if !seen.insert(member.clone()) => {
					errors.push(attr, "field is bound more than once")
				}
				Some(Ok(_)) => {}
			}
		}
	}
}

fn bindings(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
	attrs
		.iter()
		.filter(|attr| is_binding_attribute(attr, DEFAULT_ATTRIBUTE))
}

#[derive(Default)]
struct Errors(Option<syn::Error>);

impl Errors {
	fn push(&mut self, attr: &Attribute, message: impl std::fmt::Display) {
		let error = syn::Error::new(attr.span(), message);
		match &mut self.0 {
			Some(errors) => errors.combine(error),
			None => self.0 = Some(error),
		}
	}

	fn finish(self) -> syn::Result<()> {
		match self.0 {
			Some(error) => Err(error),
			None => Ok(()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use syn::parse_quote;

	fn messages(input: DeriveInput) -> Vec<String> {
		match check(&input) {
			Ok(()) => vec![],
			Err(error) => error.into_iter().map(|error| error.to_string()).collect(),
		}
	}

	#[test]
	fn accepts_plain_bindings() {
		let input: DeriveInput = parse_quote! {
			struct LoginScreen {
				#[bind_view(101)]
				email_field: Option<View>,
				#[bind_view(0x66)]
				submit_button: Option<View>,
				title: String,
			}
		};
		assert!(messages(input).is_empty());

		let input: DeriveInput = parse_quote! {
			struct Header(#[bind_view(7)] Option<View>, #[bind_view(8)] Option<View>);
		};
		assert!(messages(input).is_empty());
	}

	#[test]
	fn rejects_bad_identifiers() {
		let input: DeriveInput = parse_quote! {
			struct Broken {
				#[bind_view]
				a: Option<View>,
				#[bind_view(-1)]
				b: Option<View>,
				#[bind_view("id")]
				c: Option<View>,
				#[bind_view(1)]
				#[bind_view(2)]
				d: Option<View>,
			}
		};
		let messages = messages(input);
		assert_eq!(messages.len(), 4);
		assert_eq!(messages[0], "attribute has no identifier");
		assert_eq!(messages[1], "identifier -1 is negative");
		assert_eq!(messages[3], "field is bound more than once");
	}

	#[test]
	fn rejects_misplaced_and_generic() {
		let input: DeriveInput = parse_quote! {
			#[bind_view(1)]
			enum Choice {
				A(#[bind_view(2)] Option<View>),
			}
		};
		assert_eq!(messages(input).len(), 2);

		let input: DeriveInput = parse_quote! {
			struct Holder<T> {
				#[bind_view(1)]
				view: Option<T>,
			}
		};
		assert_eq!(
			messages(input),
			vec!["owner `Holder` has generic parameters".to_string()]
		);
	}
}
