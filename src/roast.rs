/*
 *  roast.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Read-only seam to the temperature-sensing subsystem
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::sync::{Arc, Mutex};

/// Current readings from the probe subsystem.
///
/// `bt`/`et` are the bean and environment temperatures; the matching
/// `ror_*` fields carry their rates of rise. Temperatures start as NaN
/// ("sensor not yet reporting"), which the temperature block renders as a
/// bare label.
#[derive(Debug, Clone)]
pub struct RoastSnapshot {
    pub bt: f64,
    pub et: f64,
    pub ror_bt: f64,
    pub ror_et: f64,
    pub unit: String,
}

impl Default for RoastSnapshot {
    fn default() -> Self {
        Self {
            bt: f64::NAN,
            et: f64::NAN,
            ror_bt: 0.0,
            ror_et: 0.0,
            unit: "C".to_string(),
        }
    }
}

/// Sensor collaborator: pulled synchronously at each content refresh.
pub trait RoastSource {
    fn snapshot(&self) -> RoastSnapshot;
}

/// Shared snapshot cell.
///
/// The probe subsystem (or the demo feeder) writes it from its own task;
/// the controller only ever reads a copy, so the lock is held for the
/// duration of a clone and nothing more.
#[derive(Debug, Clone, Default)]
pub struct SharedRoast {
    inner: Arc<Mutex<RoastSnapshot>>,
}

impl SharedRoast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published readings.
    pub fn publish(&self, snapshot: RoastSnapshot) {
        *self.inner.lock().unwrap() = snapshot;
    }
}

impl RoastSource for SharedRoast {
    fn snapshot(&self) -> RoastSnapshot {
        self.inner.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_not_reporting() {
        let snap = RoastSnapshot::default();
        assert!(snap.bt.is_nan());
        assert!(snap.et.is_nan());
        assert_eq!(snap.unit, "C");
    }

    #[test]
    fn published_readings_are_visible_to_clones() {
        let shared = SharedRoast::new();
        let reader = shared.clone();

        shared.publish(RoastSnapshot {
            bt: 201.5,
            et: 228.0,
            ror_bt: 7.2,
            ror_et: 12.4,
            unit: "C".to_string(),
        });

        let snap = reader.snapshot();
        assert_eq!(snap.bt, 201.5);
        assert_eq!(snap.ror_et, 12.4);
    }
}
