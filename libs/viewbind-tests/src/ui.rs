use std::cell::RefCell;
use viewbind_core::ViewId;
use viewbind_runtime::FindViewById;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct View {
	pub id: ViewId,
}

/// A flat view tree that remembers every lookup made against it.
#[derive(Debug, Default)]
pub struct Window {
	views: Vec<View>,
	lookups: RefCell<Vec<ViewId>>,
}

impl Window {
	pub fn with_views(ids: impl IntoIterator<Item = ViewId>) -> Window {
		Window {
			views: ids.into_iter().map(|id| View { id }).collect(),
			lookups: RefCell::default(),
		}
	}

	pub fn lookups(&self) -> Vec<ViewId> {
		self.lookups.borrow().clone()
	}
}

impl FindViewById for Window {
	type View = View;

	fn find_view_by_id(&self, id: ViewId) -> Option<View> {
		self.lookups.borrow_mut().push(id);
		self.views.iter().find(|view| view.id == id).cloned()
	}
}

/// Delegates view lookups to a `window` field.
macro_rules! window_owner {
	($owner:ty) => {
		impl ::viewbind_runtime::FindViewById for $owner {
			type View = $crate::ui::View;

			fn find_view_by_id(&self, id: ::viewbind_core::ViewId) -> Option<$crate::ui::View> {
				::viewbind_runtime::FindViewById::find_view_by_id(&self.window, id)
			}
		}
	};
}

pub(crate) use window_owner;
