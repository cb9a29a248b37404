use std::time::Duration;

/// Trailing-edge debounce via generation tokens.
///
/// Each `arm` bumps the generation and returns the new token; the caller
/// schedules a timer carrying it. When the timer fires, the token is only
/// honored if no later `arm` or `cancel` happened in the meantime, so at
/// most one pending token is ever live.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    generation: u64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Start a new debounce round, superseding any pending one.
    pub fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Invalidate any pending token without arming a new round.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.generation == token
    }
}
