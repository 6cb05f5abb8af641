/// Single-shot "load more" trigger
///
/// Watches the last mounted group. When that group scrolls near the
/// viewport the trigger fires exactly once and must be re-armed on the new
/// last group before it can fire again. Once the catalog runs out it is
/// disarmed for good.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase<G> {
    /// Nothing mounted yet
    Idle,
    /// Watching this group
    Armed(G),
    /// Fired for this group; waiting for the next batch to be mounted
    Fired(G),
    /// End of catalog, never fires again
    Disarmed,
}

#[derive(Debug, Clone)]
pub struct LoadTrigger<G> {
    phase: TriggerPhase<G>,
}

impl<G: Copy + PartialEq + std::fmt::Debug> LoadTrigger<G> {
    pub fn new() -> Self {
        Self {
            phase: TriggerPhase::Idle,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> TriggerPhase<G> {
        self.phase
    }

    /// The group being watched, if the trigger is armed
    pub fn watching(&self) -> Option<G> {
        match self.phase {
            TriggerPhase::Armed(group) => Some(group),
            _ => None,
        }
    }

    /// Watch `group`, replacing any earlier watch. Ignored once disarmed.
    pub fn arm(&mut self, group: G) {
        if self.phase == TriggerPhase::Disarmed {
            return;
        }
        tracing::trace!(?group, "load trigger armed");
        self.phase = TriggerPhase::Armed(group);
    }

    /// Feed one viewport observation. Returns the watched group the first
    /// time it is reported near the viewport while armed.
    pub fn observe(&mut self, near_end: bool) -> Option<G> {
        match self.phase {
            TriggerPhase::Armed(group) if near_end => {
                tracing::trace!(?group, "load trigger fired");
                self.phase = TriggerPhase::Fired(group);
                Some(group)
            }
            _ => None,
        }
    }

    /// Stop watching permanently
    pub fn disarm(&mut self) {
        tracing::debug!("load trigger disarmed, catalog exhausted");
        self.phase = TriggerPhase::Disarmed;
    }
}

/// Whether the bottom of the visible area is within `margin` pixels of the
/// end of the content (where the last group sits).
pub fn near_end(offset_y: f32, viewport_height: f32, content_height: f32, margin: f32) -> bool {
    content_height - (offset_y + viewport_height) <= margin
}
