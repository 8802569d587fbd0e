//! Round-trip bookkeeping
//!
//! Each launched edit gets a correlation id the host echoes back with the
//! result bundle, so a thawed registry can match results to the edit that
//! requested them even across process recreation. Snapshot layout is also
//! fixed here: one sub-bundle per editor tag under `<tag>.state`, plus a
//! reserved `pending` map from tag to outstanding correlation id.

/// Sentinel for "no id was carried over"; hosts that cannot preserve ids pass
/// this and matching falls back to the sole pending edit, if there is one.
pub const NO_CORRELATION: i64 = i64::MIN;

/// Snapshot key holding the tag-to-correlation-id map.
pub const KEY_PENDING: &str = "pending";

/// Suffix appended to an editor tag to form its snapshot key.
pub const STATE_SUFFIX: &str = ".state";

pub fn state_key(tag: &str) -> String {
    format!("{tag}{STATE_SUFFIX}")
}

/// Monotonic correlation id allocator. Starts at 1 so [`NO_CORRELATION`] and
/// zero are never handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationIds {
    next: i64,
}

impl Default for CorrelationIds {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrelationIds {
    pub fn new() -> Self {
        CorrelationIds { next: 1 }
    }

    pub fn allocate(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// After a thaw, restored pending ids must never collide with freshly
    /// allocated ones.
    pub fn ensure_above(&mut self, id: i64) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut ids = CorrelationIds::new();
        assert_eq!(ids.allocate(), 1);
        assert_eq!(ids.allocate(), 2);
        assert_eq!(ids.allocate(), 3);
    }

    #[test]
    fn ensure_above_skips_restored_ids() {
        let mut ids = CorrelationIds::new();
        ids.ensure_above(41);
        assert_eq!(ids.allocate(), 42);
    }

    #[test]
    fn ensure_above_never_rewinds() {
        let mut ids = CorrelationIds::new();
        assert_eq!(ids.allocate(), 1);
        assert_eq!(ids.allocate(), 2);
        ids.ensure_above(1);
        assert_eq!(ids.allocate(), 3);
    }

    #[test]
    fn state_key_appends_the_suffix() {
        assert_eq!(state_key("text"), "text.state");
    }
}
