/*
 *  display/controller.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Adaptive display controller: presence gate, render scheduler, control
 *  surface
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

use std::time::Instant;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};
use log::{debug, info, warn};

use crate::constants::{
    ADDRESS_DWELL, BT_BLOCK_Y, ET_BLOCK_Y, INDICATOR_CENTER_X, INDICATOR_CENTER_Y,
    INDICATOR_RADIUS, INVERSION_DURATION, INVERSION_INTERVAL, REFRESH_INTERVAL, TITLE_DWELL,
};
use crate::display::components::{header, splash, temperature};
use crate::display::discovery;
use crate::display::error::DisplayError;
use crate::display::traits::PanelDriver;
use crate::net::AddressSource;
use crate::roast::{RoastSnapshot, RoastSource};

/// Display controller for the roast monitor's OLED panel.
///
/// Owns all display state exclusively. Discovery runs once, latches the
/// presence gate, and every later operation silently degrades to a no-op
/// when the gate is down; a missing panel is an operating mode, not a
/// fault.
///
/// Steady state is driven by [`tick`](DisplayController::tick): a
/// non-blocking pass over three independently timed machines (burn-in
/// inversion, 1 Hz content refresh, title/address toggle) sharing a single
/// monotonic `now`.
pub struct DisplayController<P: PanelDriver> {
    panel: P,
    roast: Box<dyn RoastSource + Send>,
    net: Box<dyn AddressSource + Send>,

    title: String,
    present: bool,
    address: u8,

    inverted: bool,
    last_inversion_toggle: Instant,
    showing_address: bool,
    last_address_toggle: Instant,
    last_refresh: Option<Instant>,
    rotation: u16,

    snapshot: RoastSnapshot,
    resolved_address: String,
}

impl<P: PanelDriver> DisplayController<P> {
    pub fn new(
        panel: P,
        roast: Box<dyn RoastSource + Send>,
        net: Box<dyn AddressSource + Send>,
        address: u8,
    ) -> Self {
        let now = Instant::now();
        Self {
            panel,
            roast,
            net,
            title: format!("CROASTER V{}", env!("CARGO_PKG_VERSION")),
            present: false,
            address,
            inverted: false,
            last_inversion_toggle: now,
            showing_address: false,
            last_address_toggle: now,
            last_refresh: None,
            rotation: 0,
            snapshot: RoastSnapshot::default(),
            resolved_address: String::new(),
        }
    }

    /// One-shot panel discovery.
    ///
    /// Scans the ordered (wiring, address) candidates; the first responder
    /// fixes the working address. When nothing answers, the result of a bare
    /// bus check is taken as the verdict and the address stays at its
    /// configured default. Either way the presence gate is latched for the
    /// process lifetime.
    pub fn discover(&mut self) -> bool {
        match discovery::scan(&mut self.panel, self.address) {
            Some(address) => {
                self.address = address;
                self.present = true;
            }
            None => {
                self.present = self.panel.bus_check();
                if self.present {
                    debug!(
                        "no candidate answered, bare bus check passed; keeping 0x{:02X}",
                        self.address
                    );
                }
            }
        }

        if !self.present {
            info!("no display found");
        }
        self.present
    }

    /// Discover, bring the panel up, and optionally run the splash.
    ///
    /// An attach failure after a successful probe collapses into the absent
    /// state rather than an error.
    pub fn begin(&mut self, show_splash: bool) -> Result<(), DisplayError> {
        if !self.discover() {
            return Ok(());
        }

        if let Err(err) = self.panel.attach(self.address) {
            warn!("panel initialization failed: {}", err);
            self.present = false;
            return Ok(());
        }
        info!("panel initialized at 0x{:02X}", self.address);

        self.panel.clear_buffer();
        if show_splash {
            self.splash()?;
        }
        Ok(())
    }

    /// Run the blocking startup animation. No-op when absent.
    pub fn splash(&mut self) -> Result<(), DisplayError> {
        if !self.present {
            return Ok(());
        }
        splash::run_splash(&mut self.panel)
    }

    /// One cooperative scheduler pass.
    ///
    /// `now` must be monotonically non-decreasing across calls. Zero or more
    /// of the three machines may fire in the same pass; each resets its own
    /// timer to `now` when it does, so cadence drifts relative to `now`
    /// rather than wall-clock boundaries.
    pub fn tick(&mut self, now: Instant) {
        if !self.present {
            return;
        }

        // burn-in mitigation: asymmetric normal/inverted phases
        let inversion_window = if self.inverted {
            INVERSION_DURATION
        } else {
            INVERSION_INTERVAL
        };
        if now.saturating_duration_since(self.last_inversion_toggle) >= inversion_window {
            self.inverted = !self.inverted;
            self.last_inversion_toggle = now;
            if let Err(err) = self.panel.set_invert(self.inverted) {
                warn!("inversion toggle failed: {}", err);
            }
            debug!(
                "{}",
                if self.inverted {
                    "display inverted to prevent burn-in"
                } else {
                    "display reverted to normal"
                }
            );
        }

        // content refresh: the only clear/redraw/flush path
        let refresh_due = self
            .last_refresh
            .map_or(true, |last| now.saturating_duration_since(last) >= REFRESH_INTERVAL);
        if refresh_due {
            self.last_refresh = Some(now);
            self.snapshot = self.roast.snapshot();
            self.resolved_address = self.net.resolved_address();
            if let Err(err) = self.redraw() {
                warn!("content refresh failed: {}", err);
            }
        }

        // header toggle: flips the flag only; visible at the next refresh
        let dwell = if self.showing_address {
            ADDRESS_DWELL
        } else {
            TITLE_DWELL
        };
        if now.saturating_duration_since(self.last_address_toggle) >= dwell {
            self.showing_address = !self.showing_address;
            self.last_address_toggle = now;
        }
    }

    fn redraw(&mut self) -> Result<(), DisplayError> {
        let (width, _) = self.panel.dimensions();

        self.panel.clear_buffer();

        header::draw_header(
            &mut self.panel,
            &self.title,
            &self.resolved_address,
            self.showing_address,
        )
        .map_err(|_| DisplayError::Drawing("header".to_string()))?;

        temperature::draw_temperature(
            &mut self.panel,
            "BT",
            self.snapshot.bt,
            self.snapshot.ror_bt,
            &self.snapshot.unit,
            BT_BLOCK_Y,
            width,
        )
        .map_err(|_| DisplayError::Drawing("bean temperature".to_string()))?;

        temperature::draw_temperature(
            &mut self.panel,
            "ET",
            self.snapshot.et,
            self.snapshot.ror_et,
            &self.snapshot.unit,
            ET_BLOCK_Y,
            width,
        )
        .map_err(|_| DisplayError::Drawing("environment temperature".to_string()))?;

        self.panel.flush()
    }

    /// Toggle orientation between the two supported states and flush
    /// immediately. No-op when absent.
    pub fn rotate_screen(&mut self) {
        if !self.present {
            return;
        }

        self.rotation = if self.rotation > 0 { 0 } else { 180 };

        let result = self
            .panel
            .set_rotation(self.rotation)
            .and_then(|_| self.panel.flush());
        if let Err(err) = result {
            warn!("screen rotation failed: {}", err);
        }
    }

    /// Fill or clear the at-a-glance activity dot and flush immediately.
    /// No-op when absent.
    pub fn set_indicator(&mut self, lit: bool) {
        if !self.present {
            return;
        }

        let color = if lit { BinaryColor::On } else { BinaryColor::Off };
        let result = Circle::with_center(
            Point::new(INDICATOR_CENTER_X, INDICATOR_CENTER_Y),
            INDICATOR_RADIUS * 2 + 1,
        )
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(&mut self.panel)
        .map_err(|_| DisplayError::Drawing("indicator".to_string()))
        .and_then(|_| self.panel.flush());
        if let Err(err) = result {
            warn!("indicator update failed: {}", err);
        }
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn bus_address(&self) -> u8 {
        self.address
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn showing_address(&self) -> bool {
        self.showing_address
    }

    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    /// Read access to the panel backend, used by tests to inspect the mock.
    pub fn panel(&self) -> &P {
        &self.panel
    }
}
