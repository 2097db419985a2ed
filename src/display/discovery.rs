/*
 *  display/discovery.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  One-shot bus scan that locates the panel without a fixed wiring map
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

use log::{debug, info};

use crate::constants::{
    BUS_CLOCK_HZ, OLED_ADDRESS_PRIMARY, OLED_ADDRESS_SECONDARY, REWIRE_SETTLE, STARTUP_SETTLE,
};
use crate::display::traits::{PanelDriver, PinPair};

/// Wiring candidates, probed in this order. The list is small, static, and
/// order-sensitive; boards ship with any of these four layouts.
pub const PIN_CANDIDATES: [PinPair; 4] = [
    PinPair::new(8, 9),
    PinPair::new(6, 7),
    PinPair::new(4, 5),
    PinPair::new(2, 3),
];

/// Address candidates per wiring: the configured default first, then the two
/// vendor defaults. The default is probed even when it duplicates one of
/// them.
pub fn address_candidates(default_address: u8) -> [u8; 3] {
    [default_address, OLED_ADDRESS_PRIMARY, OLED_ADDRESS_SECONDARY]
}

/// Scan every (wiring, address) combination in order and return the first
/// address that ACKs a zero-byte write, together with nothing else: the scan
/// short-circuits, so a wrong address on the right wiring is retried before
/// the next wiring is considered.
///
/// Each wiring attempt tears the bus down first; stale state from a failed
/// attempt must not leak into the next one. The settle pauses after bus
/// reconfiguration are load-bearing on real hardware.
pub fn scan<P: PanelDriver>(panel: &mut P, default_address: u8) -> Option<u8> {
    panel.bus_reset();
    panel.settle(STARTUP_SETTLE);

    for pins in PIN_CANDIDATES {
        panel.bus_reset();
        if let Err(err) = panel.rewire(pins) {
            debug!("no bus on SDA={} SCL={}: {}", pins.sda, pins.scl, err);
            continue;
        }
        if let Err(err) = panel.set_bus_clock(BUS_CLOCK_HZ) {
            debug!("bus clock request failed: {}", err);
        }
        panel.settle(REWIRE_SETTLE);

        for address in address_candidates(default_address) {
            if panel.probe(address) {
                info!(
                    "OLED found at 0x{:02X} on SDA={} SCL={}",
                    address, pins.sda, pins.scl
                );
                return Some(address);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::drivers::mock::MockPanel;

    #[test]
    fn first_responder_wins_in_order() {
        let mut panel = MockPanel::new();
        panel.respond_at(PIN_CANDIDATES[1], 0x3D);
        panel.respond_at(PIN_CANDIDATES[2], 0x3C);

        assert_eq!(scan(&mut panel, 0x3A), Some(0x3D));

        let ops = panel.state();
        let ops = ops.lock().unwrap();
        // pins 0 exhausted all three addresses, pins 1 stopped at its hit
        assert_eq!(
            ops.probes,
            vec![
                (PIN_CANDIDATES[0], 0x3A),
                (PIN_CANDIDATES[0], 0x3C),
                (PIN_CANDIDATES[0], 0x3D),
                (PIN_CANDIDATES[1], 0x3A),
                (PIN_CANDIDATES[1], 0x3C),
                (PIN_CANDIDATES[1], 0x3D),
            ]
        );
        assert_eq!(ops.rewires, vec![PIN_CANDIDATES[0], PIN_CANDIDATES[1]]);
    }

    #[test]
    fn configured_default_probed_first() {
        let mut panel = MockPanel::new();
        panel.respond_at(PIN_CANDIDATES[0], 0x3A);
        panel.respond_at(PIN_CANDIDATES[0], 0x3D);

        assert_eq!(scan(&mut panel, 0x3A), Some(0x3A));
    }

    #[test]
    fn silent_bus_exhausts_every_combination() {
        let mut panel = MockPanel::new();

        assert_eq!(scan(&mut panel, 0x3C), None);

        let ops = panel.state();
        let ops = ops.lock().unwrap();
        assert_eq!(ops.probes.len(), 12);
        assert_eq!(ops.rewires.len(), 4);
        assert_eq!(ops.clock_requests, vec![BUS_CLOCK_HZ; 4]);
        // initial settle plus one per rewire
        assert_eq!(ops.settles.len(), 5);
    }
}
