//! Shared security primitives for the swap ledger
//!
//! Provides the reentrancy guard wrapped around mutating ledger calls and the
//! creation counter that decorrelates swap ids.

/// Reentrancy guard preventing nested calls into protected functions.
///
/// A ledger operation acquires the guard before executing state-changing
/// logic and releases it on completion. Any nested call attempt fails.
#[derive(Debug, Clone)]
pub struct ReentrancyGuard {
    locked: bool,
}

impl ReentrancyGuard {
    /// Create a new unlocked guard.
    pub fn new() -> Self {
        Self { locked: false }
    }

    /// Acquire the guard. Returns `true` if successfully acquired.
    /// Returns `false` if already locked (reentrancy attempt).
    pub fn acquire(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Release the guard.
    pub fn release(&mut self) {
        self.locked = false;
    }

    /// Check if currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Default for ReentrancyGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Monotonic creation counter.
///
/// Each successful swap creation consumes one value, so two swaps with
/// identical parameters still hash to different ids.
#[derive(Debug, Clone)]
pub struct CreationCounter {
    next: u64,
}

impl CreationCounter {
    /// Start counting at zero.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Resume counting from a known value.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Value the next creation will use, without consuming it.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Consume the current value.
    ///
    /// Only called once a creation has fully succeeded; a failed creation
    /// leaves the counter where it was.
    pub fn advance(&mut self) -> u64 {
        let current = self.next;
        self.next = self.next.wrapping_add(1);
        current
    }
}

impl Default for CreationCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- ReentrancyGuard tests ---

    #[test]
    fn test_reentrancy_guard_acquire_release() {
        let mut guard = ReentrancyGuard::new();
        assert!(!guard.is_locked());
        assert!(guard.acquire());
        assert!(guard.is_locked());
        guard.release();
        assert!(!guard.is_locked());
    }

    #[test]
    fn test_reentrancy_guard_double_acquire_fails() {
        let mut guard = ReentrancyGuard::new();
        assert!(guard.acquire());
        assert!(!guard.acquire(), "Second acquire must fail");
    }

    // --- CreationCounter tests ---

    #[test]
    fn test_counter_advances_monotonically() {
        let mut counter = CreationCounter::new();
        assert_eq!(counter.advance(), 0);
        assert_eq!(counter.advance(), 1);
        assert_eq!(counter.peek(), 2);
    }

    #[test]
    fn test_counter_peek_does_not_consume() {
        let counter = CreationCounter::starting_at(41);
        assert_eq!(counter.peek(), 41);
        assert_eq!(counter.peek(), 41);
    }
}
