//! Mutable access to entities which carry a back-reference to their owning file.

use std::{fmt, ops::Deref};

use crate::soundfont::SoundFontId;

// -------------------------------------------------------------------------------------------------

/// Mutable borrow of an attached preset, instrument, sample or zone.
///
/// Dereferences to the borrowed entity for reading. Mutations go through the guard's own
/// setters, which mirror the entity's setters, so the entity itself can never be moved out of
/// or swapped within its owner. When dropped, the parent file reference of the entity and all
/// its children is stamped again.
pub struct AttachedMut<'a, T> {
    target: &'a mut T,
    parent: Option<SoundFontId>,
    reattach: fn(&mut T, Option<SoundFontId>),
}

impl<'a, T> AttachedMut<'a, T> {
    pub(crate) fn new(
        target: &'a mut T,
        parent: Option<SoundFontId>,
        reattach: fn(&mut T, Option<SoundFontId>),
    ) -> Self {
        Self {
            target,
            parent,
            reattach,
        }
    }

    /// The borrowed entity. Must not be handed out of the crate.
    pub(crate) fn target_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T> Deref for AttachedMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T> Drop for AttachedMut<'_, T> {
    fn drop(&mut self) {
        (self.reattach)(self.target, self.parent);
    }
}

impl<T: fmt::Debug> fmt::Debug for AttachedMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedMut")
            .field("target", &self.target)
            .field("parent", &self.parent)
            .finish()
    }
}
