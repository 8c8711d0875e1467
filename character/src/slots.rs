//! Fixed-capacity profile lists
//!
//! Slot numbers start at 1 (slot 0 means "none" in the state register), so
//! slot `k` holds list element `k - 1`.

use smallvec::SmallVec;
use std::sync::Arc;

use crate::error::{CharacterError, ProfileKind};

/// Slots addressable by a 4-bit register field
pub const MAX_PROFILES: usize = 15;

/// Shared, read-only profiles addressed by slot number
#[derive(Debug, Clone)]
pub struct ProfileSlots<P> {
    kind: ProfileKind,
    profiles: SmallVec<[Arc<P>; MAX_PROFILES]>,
}

impl<P> ProfileSlots<P> {
    pub fn new(kind: ProfileKind) -> Self {
        Self {
            kind,
            profiles: SmallVec::new(),
        }
    }

    /// Replace the whole list. Too long a list is rejected and the current
    /// list kept.
    pub fn assign(&mut self, profiles: Vec<Arc<P>>) -> Result<(), CharacterError> {
        if profiles.len() > MAX_PROFILES {
            tracing::warn!(
                kind = %self.kind,
                count = profiles.len(),
                "rejecting profile list, keeping previous"
            );
            return Err(CharacterError::TooManyProfiles {
                kind: self.kind,
                count: profiles.len(),
            });
        }
        self.profiles = profiles.into_iter().collect();
        Ok(())
    }

    /// Append one profile, returning its slot
    pub fn push(&mut self, profile: Arc<P>) -> Result<u8, CharacterError> {
        if self.profiles.len() >= MAX_PROFILES {
            return Err(CharacterError::TooManyProfiles {
                kind: self.kind,
                count: self.profiles.len() + 1,
            });
        }
        self.profiles.push(profile);
        Ok(self.profiles.len() as u8)
    }

    pub fn get(&self, slot: u8) -> Option<&P> {
        let index = usize::from(slot).checked_sub(1)?;
        self.profiles.get(index).map(Arc::as_ref)
    }

    /// Like [`ProfileSlots::get`] but reporting a missing slot as an error
    pub fn require(&self, slot: u8) -> Result<&P, CharacterError> {
        self.get(slot).ok_or(CharacterError::MissingProfile {
            kind: self.kind,
            slot,
        })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// `(slot, profile)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &P)> {
        self.profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (i as u8 + 1, p.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(n: usize) -> Vec<Arc<u32>> {
        (0..n as u32).map(Arc::new).collect()
    }

    #[test]
    fn test_slot_k_is_element_k_minus_one() {
        let mut s = ProfileSlots::new(ProfileKind::Grounded);
        s.assign(slots(3)).unwrap();
        assert_eq!(s.get(0), None);
        assert_eq!(s.get(1), Some(&0));
        assert_eq!(s.get(3), Some(&2));
        assert_eq!(s.get(4), None);
    }

    #[test]
    fn test_oversized_list_keeps_previous() {
        let mut s = ProfileSlots::new(ProfileKind::Jumping);
        s.assign(slots(2)).unwrap();
        let err = s.assign(slots(16)).unwrap_err();
        assert!(matches!(err, CharacterError::TooManyProfiles { count: 16, .. }));
        assert_eq!(s.len(), 2);

        s.assign(slots(15)).unwrap();
        assert_eq!(s.get(15), Some(&14));
    }

    #[test]
    fn test_push_until_full() {
        let mut s = ProfileSlots::new(ProfileKind::Grounded);
        for expected in 1..=15u8 {
            assert_eq!(s.push(Arc::new(0u32)).unwrap(), expected);
        }
        assert!(s.push(Arc::new(0u32)).is_err());
    }

    #[test]
    fn test_require_reports_slot() {
        let s: ProfileSlots<u32> = ProfileSlots::new(ProfileKind::Jumping);
        let err = s.require(2).unwrap_err();
        assert_eq!(err.to_string(), "no jumping profile in slot 2");
    }
}
