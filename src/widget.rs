//! The editable-widget capability boundary.
//!
//! The model composes N single-region editing widgets into one logical
//! document but never owns them: the rendering layer creates and destroys
//! widget instances, and the model only holds a weak handle it can use to
//! push selection, decoration, and focus updates while the widget is still
//! mounted.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::model::selection::{Position, Selection};

/// The single-region text-editing primitive assumed by the chunk document.
/// Implemented by the rendering layer; the model drives it through
/// [`WidgetHandle`].
pub trait EditorWidget {
    /// Replace the widget's selection with the model's
    fn set_selection(&mut self, selection: Selection);
    /// Remove every text-mark decoration
    fn clear_marks(&mut self);
    /// Decorate a range with the error style. Positions are widget-local
    /// and 0-based; the caller has already translated coordinate spaces.
    fn mark_error(&mut self, from: Position, to: Position);
    /// Give the widget keyboard focus
    fn focus(&mut self);
}

/// Weak back-reference from a chunk to the widget rendering it.
///
/// Relation plus lookup, never ownership: the handle upgrades to `None`
/// once the rendering layer unmounts the widget, and every model access
/// must tolerate that.
#[derive(Clone, Default)]
pub struct WidgetHandle(Option<Weak<RefCell<dyn EditorWidget>>>);

impl WidgetHandle {
    /// A handle for a chunk with no widget mounted
    pub fn unmounted() -> Self {
        Self(None)
    }

    /// Attach to a widget owned by the rendering layer
    pub fn mounted(widget: &Rc<RefCell<dyn EditorWidget>>) -> Self {
        Self(Some(Rc::downgrade(widget)))
    }

    /// Look up the widget, if it is still mounted
    pub fn upgrade(&self) -> Option<Rc<RefCell<dyn EditorWidget>>> {
        self.0.as_ref()?.upgrade()
    }

    pub fn is_mounted(&self) -> bool {
        self.upgrade().is_some()
    }
}

impl fmt::Debug for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mounted() {
            f.write_str("WidgetHandle(mounted)")
        } else {
            f.write_str("WidgetHandle(unmounted)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct NullWidget;

    impl EditorWidget for NullWidget {
        fn set_selection(&mut self, _selection: Selection) {}
        fn clear_marks(&mut self) {}
        fn mark_error(&mut self, _from: Position, _to: Position) {}
        fn focus(&mut self) {}
    }

    #[test]
    fn test_unmounted_handle_upgrades_to_none() {
        assert!(WidgetHandle::unmounted().upgrade().is_none());
    }

    #[test]
    fn test_handle_dies_with_owner() {
        let owner: Rc<RefCell<dyn EditorWidget>> = Rc::new(RefCell::new(NullWidget));
        let handle = WidgetHandle::mounted(&owner);
        assert!(handle.is_mounted());

        drop(owner);
        assert!(handle.upgrade().is_none());
    }
}
