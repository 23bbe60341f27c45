//! Element id generation.
//!
//! Ids only need to be unique within one render pass, so the counter lives
//! in a value threaded through the build call rather than in process-wide
//! state. Two builds with fresh generators produce identical ids.

/// Monotonic `"{prefix}-{n}"` id source for one render pass.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Return `"{prefix}-{n}"` and advance the counter.
    pub fn next(&mut self, prefix: &str) -> String {
        let id = format!("{}-{}", prefix, self.next);
        self.next += 1;
        id
    }

    /// Restart numbering at 1.
    pub fn reset(&mut self) {
        self.next = 1;
    }

    /// How many ids have been handed out since the last reset.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}
