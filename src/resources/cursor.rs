use bevy::prelude::*;

/// Cursor visibility captured when the character spawned.
///
/// The `Option` enforces the 1:1 pairing between capture and restore: a
/// second spawn while captured keeps the original snapshot, and a despawn
/// without a capture restores nothing.
#[derive(Resource, Default)]
pub struct CursorSnapshot(Option<bool>);

impl CursorSnapshot {
    /// Store the pre-capture visibility. Returns false (and keeps the
    /// existing snapshot) if a capture is already outstanding.
    pub fn capture(&mut self, visible: bool) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(visible);
        true
    }

    /// Take the stored visibility back out, ending the capture.
    pub fn restore(&mut self) -> Option<bool> {
        self.0.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_restore_pairing() {
        let mut snapshot = CursorSnapshot::default();

        assert!(snapshot.capture(true));
        // A nested capture must not clobber the original state.
        assert!(!snapshot.capture(false));

        assert_eq!(snapshot.restore(), Some(true));
        // Restore fires exactly once per capture.
        assert_eq!(snapshot.restore(), None);
    }

    #[test]
    fn test_restore_without_capture_is_noop() {
        let mut snapshot = CursorSnapshot::default();
        assert_eq!(snapshot.restore(), None);
    }

    #[test]
    fn test_recapture_after_restore() {
        let mut snapshot = CursorSnapshot::default();
        assert!(snapshot.capture(false));
        assert_eq!(snapshot.restore(), Some(false));
        assert!(snapshot.capture(true));
        assert_eq!(snapshot.restore(), Some(true));
    }
}
