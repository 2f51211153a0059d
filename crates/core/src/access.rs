//! Owner-based access policy.
//!
//! Every record belongs to exactly one user. A caller may read or write a
//! record only when it owns it. Lookups that fail the check are reported as
//! "not found", exactly like an identifier that does not exist.

use fintrack_shared::UserId;

/// A record with a single owning user.
pub trait Owned {
    /// Returns the owner of the record.
    fn owner(&self) -> UserId;
}

/// Returns `true` when `caller` owns `record`.
#[must_use]
pub fn is_owner<T: Owned + ?Sized>(record: &T, caller: UserId) -> bool {
    record.owner() == caller
}

/// Restricts a looked-up record to the caller's own records.
///
/// A record owned by someone else is treated exactly like a missing one.
#[must_use]
pub fn visible_to<T: Owned>(record: Option<T>, caller: UserId) -> Option<T> {
    record.filter(|r| is_owner(r, caller))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note(UserId);

    impl Owned for Note {
        fn owner(&self) -> UserId {
            self.0
        }
    }

    #[test]
    fn test_owner_is_granted() {
        let alice = UserId::new();
        assert!(is_owner(&Note(alice), alice));
        assert!(visible_to(Some(Note(alice)), alice).is_some());
    }

    #[test]
    fn test_other_user_is_denied() {
        let alice = UserId::new();
        let bob = UserId::new();
        assert!(!is_owner(&Note(alice), bob));
        assert!(visible_to(Some(Note(alice)), bob).is_none());
    }

    #[test]
    fn test_missing_record_stays_missing() {
        assert!(visible_to::<Note>(None, UserId::new()).is_none());
    }
}
