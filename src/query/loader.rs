use log::{debug, info};
use serde::Serialize;

/// Fetch state the loader consults before triggering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadStatus {
    pub has_next_page: bool,
    pub is_fetching_next_page: bool,
    /// The last request failed; only an explicit load clears it
    pub has_error: bool,
}

impl LoadStatus {
    fn allows_fetch(self) -> bool {
        self.has_next_page && !self.is_fetching_next_page && !self.has_error
    }
}

/// Whether the sentinel currently counts as in view
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentinelState {
    /// Not intersecting, or intersecting while the guard held the fetch back
    Idle,
    /// A fetch was triggered for the current stay in view
    Triggering,
}

/// The sentinel being watched and the fetch trigger it was observed under
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub sentinel: String,
    pub generation: u64,
}

/// Triggers the next page fetch when the sentinel element scrolls into view.
///
/// Hosts report the visible ratio of the sentinel; a report above the
/// threshold moves the loader from `Idle` to `Triggering` and asks for one
/// fetch. The loader only leaves `Triggering` once the sentinel drops back
/// below the threshold, or when [`VisibilityLoader::settled`] re-arms it.
#[derive(Serialize, Clone, Debug)]
pub struct VisibilityLoader {
    threshold: f64,
    supported: bool,
    subscription: Option<Subscription>,
    state: SentinelState,
}

impl VisibilityLoader {
    /// Creates a loader firing once more than `threshold` of the sentinel is
    /// visible. A threshold of 0 fires on any visible pixel.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            supported: true,
            subscription: None,
            state: SentinelState::Idle,
        }
    }

    /// A loader for a host without visibility sensing, it never triggers
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(0.0)
        }
    }

    pub fn is_supported(&self) -> bool {
        self.supported
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn state(&self) -> SentinelState {
        self.state
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    /// Starts watching `sentinel` on behalf of the trigger identified by `generation`.
    /// Returns false when the host cannot sense visibility.
    pub fn observe(&mut self, sentinel: &str, generation: u64) -> bool {
        if !self.supported {
            return false;
        }

        self.subscription = Some(Subscription {
            sentinel: sentinel.to_string(),
            generation,
        });
        self.state = SentinelState::Idle;
        true
    }

    /// Stops watching, later reports are ignored
    pub fn unobserve(&mut self) {
        self.subscription = None;
        self.state = SentinelState::Idle;
    }

    /// Moves the subscription to a new fetch trigger.
    ///
    /// Unobserves and observes the same sentinel again so no report is ever
    /// acted on for the old trigger. Returns whether anything changed.
    pub fn resubscribe(&mut self, generation: u64) -> bool {
        let Some(current) = self.subscription.clone() else {
            return false;
        };
        if current.generation == generation {
            return false;
        }

        info!(
            "Re-observing sentinel '{}' for trigger {} (was {})",
            current.sentinel, generation, current.generation
        );
        self.unobserve();
        self.observe(&current.sentinel, generation)
    }

    /// Handles a visibility report for the sentinel.
    ///
    /// Returns true exactly when the caller must fetch the next page: the
    /// report is for the current trigger, the sentinel crossed into view and
    /// the status allows a fetch. A failed request blocks the loader until
    /// something else fetches successfully.
    pub fn report(&mut self, ratio: f64, generation: u64, status: LoadStatus) -> bool {
        let Some(subscription) = &self.subscription else {
            return false;
        };
        if subscription.generation != generation {
            debug!(
                "Ignoring sentinel report for stale trigger {} (current {})",
                generation, subscription.generation
            );
            return false;
        }

        let visible = if self.threshold == 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        };

        match (self.state, visible) {
            (SentinelState::Idle, true) => {
                if status.allows_fetch() {
                    self.state = SentinelState::Triggering;
                    true
                } else {
                    false
                }
            }
            (SentinelState::Triggering, false) => {
                self.state = SentinelState::Idle;
                false
            }
            _ => false,
        }
    }

    /// Re-arms the loader after a triggered fetch resolved, so a sentinel
    /// that is still in view triggers again on its next report
    pub fn settled(&mut self) {
        self.state = SentinelState::Idle;
    }
}
