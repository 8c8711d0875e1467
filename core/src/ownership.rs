//! Exclusive pointer ownership
//!
//! A control listens to exactly one finger at a time. The first qualifying
//! press claims it and every other pointer is ignored until that finger is
//! released.

use std::num::TryFromIntError;
use tactile_shared::PointerId;

/// Which pointer, if any, currently owns a control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerOwnership {
    owner: Option<PointerId>,
}

impl PointerOwnership {
    pub const fn new() -> Self {
        Self { owner: None }
    }

    /// Claim the control for `id`.
    ///
    /// Returns false (and leaves the owner unchanged) if already owned.
    pub fn claim(&mut self, id: PointerId) -> bool {
        if self.owner.is_some() {
            return false;
        }
        self.owner = Some(id);
        true
    }

    /// Release ownership, returning the previous owner
    pub fn release(&mut self) -> Option<PointerId> {
        self.owner.take()
    }

    pub fn owner(&self) -> Option<PointerId> {
        self.owner
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_owned_by(&self, id: PointerId) -> bool {
        self.owner == Some(id)
    }

    /// Owner as the host's integer index (`-1` when unowned)
    pub fn index(&self) -> Result<i32, TryFromIntError> {
        PointerId::raw_index(self.owner)
    }
}
