//! Debounce for the outgoing "stop typing" signal.
//!
//! Each keystroke starts a new generation. A timer armed for generation `n`
//! only fires if no later keystroke happened and nothing cancelled it, so a
//! burst of keystrokes yields exactly one `stop_typing` after the last one.

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypingDebounce {
    generation: u64,
    pending: bool,
}

impl TypingDebounce {
    /// Register a keystroke; returns the generation the new timer must carry.
    pub fn keystroke(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        self.generation
    }

    /// A timer armed for `generation` elapsed. Returns `true` if it is the
    /// live timer, in which case `stop_typing` must be sent.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.pending && generation == self.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Drop the live timer without firing. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.pending, false)
    }
}
