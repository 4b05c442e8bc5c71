//! Boss domain: per-attack state components.
//!
//! Each attack with state beyond its trigger table gets its own small
//! component; the UI reads these fields directly.

mod electric;
mod gravity;
mod poison;

pub use electric::ElectricWheel;
pub use gravity::GravitySpinner;
pub use poison::PoisonSkill;

pub(crate) use electric::tick_electric_wheel;
pub(crate) use gravity::tick_gravity_spinner;
pub(crate) use poison::tick_poison;

use bevy::prelude::*;

/// Slash usage counter shown on the HUD. Wraps when the rolled limit is hit.
#[derive(Component, Debug)]
pub struct SlashTally {
    pub counter: u32,
    pub counter_limit: u32,
}

impl Default for SlashTally {
    fn default() -> Self {
        Self {
            counter: 0,
            counter_limit: 3,
        }
    }
}

impl SlashTally {
    /// Records one slash; returns true when the tally just wrapped.
    pub fn record(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.counter_limit {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_wraps_at_the_limit() {
        let mut tally = SlashTally {
            counter: 0,
            counter_limit: 3,
        };
        assert!(!tally.record());
        assert!(!tally.record());
        assert!(tally.record());
        assert_eq!(tally.counter, 0);
    }
}
