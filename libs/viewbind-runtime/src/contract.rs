use crate::BindError;
use std::any::type_name;
use viewbind_core::ViewId;

/// The widget system's lookup, implemented by every type that owns bound views.
pub trait FindViewById {
	type View;

	fn find_view_by_id(&self, id: ViewId) -> Option<Self::View>;
}

/// Implemented by every generated `<Owner>_ViewBinder` for its owner.
pub trait ViewBinder<T: ?Sized> {
	/// Assigns every bound field of `target`, in declaration order.
	fn bind(&self, target: &mut T) -> Result<(), BindError>;
}

/// Looks up `id` on `target` and converts the view into the field's type.
///
/// Called by generated code once per bound field.
pub fn find_view<T, V>(target: &T, id: ViewId, member: &'static str) -> Result<V, BindError>
where
	T: FindViewById + ?Sized,
	V: From<T::View>,
{
	match target.find_view_by_id(id) {
		Some(view) => Ok(V::from(view)),
		None => Err(BindError::ViewNotFound {
			owner: type_name::<T>(),
			member,
			id,
		}),
	}
}
