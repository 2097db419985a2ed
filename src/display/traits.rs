/*
 *  display/traits.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Core trait definition for the panel/bus capability
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

use std::time::Duration;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::display::error::DisplayError;

/// One candidate wiring of the panel: the GPIO lines carrying I2C data
/// and clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinPair {
    pub sda: u8,
    pub scl: u8,
}

impl PinPair {
    pub const fn new(sda: u8, scl: u8) -> Self {
        Self { sda, scl }
    }
}

/// Panel capabilities and metadata.
#[derive(Debug, Clone)]
pub struct PanelCapabilities {
    /// Panel width in pixels
    pub width: u32,

    /// Panel height in pixels
    pub height: u32,

    /// Whether the controller supports color inversion
    pub supports_invert: bool,

    /// Whether the controller supports hardware rotation
    pub supports_rotation: bool,
}

/// Hardware abstraction every panel backend must implement.
///
/// The trait spans two layers because discovery has to talk to the raw bus
/// before any panel controller exists:
///
/// * bus primitives (rewire, clock, zero-byte probe, settle) used only by
///   the one-shot discovery pass;
/// * panel primitives (attach, clear, flush, invert, rotation) used by the
///   render path once a responder has been found.
///
/// Drawing goes through `embedded_graphics::DrawTarget` on the implementor's
/// internal framebuffer; `flush` pushes that buffer to the hardware.
pub trait PanelDriver: DrawTarget<Color = BinaryColor> {
    /// Returns the capabilities of this panel
    fn capabilities(&self) -> &PanelCapabilities;

    /// Returns the panel dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    /// Tear down any live bus handle.
    ///
    /// Discovery calls this before every rewire so stale bus state from a
    /// failed attempt cannot leak into the next one.
    fn bus_reset(&mut self);

    /// Bring the bus up on the given wiring candidate.
    fn rewire(&mut self, pins: PinPair) -> Result<(), DisplayError>;

    /// Request a bus clock rate.
    ///
    /// Backends on platforms with a fixed bus clock accept and record the
    /// request without error.
    fn set_bus_clock(&mut self, hz: u32) -> Result<(), DisplayError>;

    /// Address a zero-byte write to `address`; true means the device ACKed.
    fn probe(&mut self, address: u8) -> bool;

    /// Bare transmission status check, used as the last resort when no
    /// candidate combination answered.
    fn bus_check(&mut self) -> bool;

    /// Hardware settling pause after a bus reconfiguration.
    fn settle(&mut self, pause: Duration);

    /// Bring up the panel controller at a discovered address.
    fn attach(&mut self, address: u8) -> Result<(), DisplayError>;

    /// Clear the in-memory framebuffer. No bus traffic.
    fn clear_buffer(&mut self);

    /// Push the framebuffer to the panel.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Set panel color inversion (if supported).
    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let _ = inverted;
        Err(DisplayError::Unsupported)
    }

    /// Set panel orientation; only 0 and 180 degrees are meaningful here.
    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        if degrees != 0 && degrees != 180 {
            return Err(DisplayError::InvalidRotation(degrees));
        }
        Err(DisplayError::Unsupported)
    }
}
