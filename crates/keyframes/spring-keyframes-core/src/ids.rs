//! Timeline tokens and their allocator.

use serde::{Deserialize, Serialize};

/// Identifies one started timeline of a subject. Finished-notifications carry
/// the token so stale ones can be told apart from the current timeline.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimelineToken(pub u32);

/// Monotonic allocator for [`TimelineToken`].
#[derive(Default, Debug, Clone)]
pub struct TokenAllocator {
    next: u32,
}

impl TokenAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> TimelineToken {
        let token = TimelineToken(self.next);
        self.next = self.next.wrapping_add(1);
        token
    }
}
