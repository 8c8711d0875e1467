//! Host lifecycle notifications
//!
//! The host translates its own scene notifications into these values and
//! forwards them to each control. Controls never depend on a specific
//! engine's notification constants.

use glam::Vec2;

/// Lifecycle notification delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifecycle {
    /// Control became part of the active scene
    EnterTree,
    /// Control is leaving the active scene
    ExitTree,
    /// Simulation paused
    Paused,
    /// Simulation resumed
    Unpaused,
    /// Visibility in the scene changed (true = visible)
    VisibilityChanged(bool),
    /// Control rectangle changed size
    Resized(Vec2),
}

impl Lifecycle {
    /// Notifications that suspend a control without hiding it.
    ///
    /// Releases caused by these are reported after the matching `Unpaused`.
    pub fn is_suspend(self) -> bool {
        matches!(self, Lifecycle::ExitTree | Lifecycle::Paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspend_kinds() {
        assert!(Lifecycle::ExitTree.is_suspend());
        assert!(Lifecycle::Paused.is_suspend());
        assert!(!Lifecycle::Unpaused.is_suspend());
        assert!(!Lifecycle::VisibilityChanged(false).is_suspend());
        assert!(!Lifecycle::Resized(Vec2::ONE).is_suspend());
    }
}
