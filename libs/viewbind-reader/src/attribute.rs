use crate::RawValue;
use quote::ToTokens;
use syn::{Attribute, Expr, Lit, Meta, UnOp};

/// Whether `attr` is the binding attribute, matching on the last path segment so
/// that `bind_view` and `viewbind::bind_view` are both recognised.
pub fn is_binding_attribute(attr: &Attribute, name: &str) -> bool {
	attr.path()
		.segments
		.last()
		.map_or(false, |segment| segment.ident == name)
}

/// Reads the argument of a binding attribute.
///
/// `#[bind_view(101)]` and `#[bind_view = 101]` both yield `Int(101)`; a bare
/// `#[bind_view]` or an empty `#[bind_view()]` yields `None`.
pub fn attribute_value(attr: &Attribute) -> Option<RawValue> {
	match &attr.meta {
		Meta::Path(_) => None,
		Meta::List(list) => {
			if list.tokens.is_empty() {
				return None;
			}

			match list.parse_args::<Expr>() {
				Ok(expr) => Some(expr_value(&expr)),
				Err(_) => Some(RawValue::Other(list.tokens.to_string())),
			}
		}
		Meta::NameValue(value) => Some(expr_value(&value.value)),
	}
}

fn expr_value(expr: &Expr) -> RawValue {
	match expr {
		Expr::Lit(lit) => match &lit.lit {
			Lit::Int(int) => match int.base10_parse::<i128>() {
				Ok(value) => RawValue::Int(value),
				Err(_) => RawValue::Other(int.to_string()),
			},
			other => RawValue::Other(other.to_token_stream().to_string()),
		},
		Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => match expr_value(&unary.expr) {
			RawValue::Int(value) => RawValue::Int(-value),
			RawValue::Other(_) => RawValue::Other(expr.to_token_stream().to_string()),
		},
		Expr::Paren(paren) => expr_value(&paren.expr),
		Expr::Group(group) => expr_value(&group.expr),
		other => RawValue::Other(other.to_token_stream().to_string()),
	}
}
