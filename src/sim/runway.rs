//! A runway bundles its advisory config with the priority resource that
//! governs actual availability.

use crate::domain::{RunwayConfig, RunwayMode, RunwayStatus};
use crate::sim::resource::PriorityResource;

pub struct Runway {
    pub config: RunwayConfig,
    pub resource: PriorityResource,
}

impl Runway {
    pub fn new(config: RunwayConfig) -> Self {
        Self {
            config,
            resource: PriorityResource::new(),
        }
    }

    /// Whether this runway is a candidate for `needed` traffic: its
    /// advisory status must be `Available` and its mode must serve
    /// `needed`. Runtime availability (closures) is governed entirely by
    /// the resource holder, not by `status` — see the crate's spec §4.3.
    pub fn serves(&self, needed: RunwayMode) -> bool {
        self.config.status == RunwayStatus::Available && self.config.mode.serves(needed)
    }
}
