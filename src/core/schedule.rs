/// A handle to a pending delayed task that can be withdrawn before it runs.
pub trait Cancel {
    fn cancel(self);
}

/// Single-slot delayed task: arming always cancels whatever was pending.
///
/// Each arm bumps a generation counter that is handed to the scheduler, and
/// the task reports it back through [`Debounce::fire`]. A fire whose
/// generation is not the latest one is stale and ignored, so at most one
/// armed task ever takes effect.
pub struct Debounce<H: Cancel> {
    pending: Option<H>,
    generation: u64,
}

impl<H: Cancel> Default for Debounce<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Cancel> Debounce<H> {
    pub const fn new() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }

    /// Cancel any pending task and schedule a new one.
    ///
    /// `schedule` receives the generation the task must report when it runs.
    /// If it cannot schedule (returns `None`) nothing is left pending.
    pub fn arm<F>(&mut self, schedule: F) -> u64
    where
        F: FnOnce(u64) -> Option<H>,
    {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.pending = schedule(self.generation);
        self.generation
    }

    /// Called by the task when it runs. Returns `true` exactly once for the
    /// latest armed generation.
    pub fn fire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.pending.take().is_some()
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
