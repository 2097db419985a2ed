/*
 *  display/drivers/mock.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock panel backend for testing without hardware
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
use std::time::Duration;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::traits::{PanelCapabilities, PanelDriver, PinPair};

/// Mock panel for tests and CI.
///
/// Every bus and panel operation is recorded in a shared [`MockOps`] so tests
/// can inspect what happened after the panel has been moved into the
/// controller. Wirings that should ACK a probe are declared up front with
/// [`MockPanel::respond_at`]. Settle pauses are recorded, never slept, so the
/// blocking discovery and splash phases run instantly under test.
#[derive(Debug, Clone)]
pub struct MockPanel {
    framebuffer: FrameBuffer,
    capabilities: PanelCapabilities,
    responders: Vec<(PinPair, u8)>,
    wiring: Option<PinPair>,
    ops: Arc<Mutex<MockOps>>,
}

/// Recorded operations, shared for inspection in tests.
#[derive(Debug, Default)]
pub struct MockOps {
    /// Every (wiring, address) probe in issue order
    pub probes: Vec<(PinPair, u8)>,

    /// Every wiring the bus was brought up on
    pub rewires: Vec<PinPair>,

    /// Requested bus clock rates
    pub clock_requests: Vec<u32>,

    /// Recorded settle pauses
    pub settles: Vec<Duration>,

    /// Number of bus teardowns
    pub bus_resets: usize,

    /// Address the panel was attached at, if any
    pub attached: Option<u8>,

    /// Number of attach calls
    pub attach_count: usize,

    /// Number of flushes to the panel
    pub flush_count: usize,

    /// Number of framebuffer clears
    pub clear_count: usize,

    /// Number of bare bus checks
    pub bus_checks: usize,

    /// Last inversion state set, plus full history
    pub last_invert: Option<bool>,
    pub invert_history: Vec<bool>,

    /// Last rotation set, plus full history
    pub last_rotation: Option<u16>,
    pub rotation_history: Vec<u16>,

    /// Result the bare bus check reports (for the no-responder fallback)
    pub bus_check_result: bool,

    /// Simulated failures
    pub fail_attach: bool,
    pub fail_flush: bool,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::with_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
            capabilities: PanelCapabilities {
                width,
                height,
                supports_invert: true,
                supports_rotation: true,
            },
            responders: Vec::new(),
            wiring: None,
            ops: Arc::new(Mutex::new(MockOps::default())),
        }
    }

    /// Declare that a device ACKs probes at this wiring and address.
    pub fn respond_at(&mut self, pins: PinPair, address: u8) {
        self.responders.push((pins, address));
    }

    /// Make the bare bus check succeed (the no-responder fallback path).
    pub fn set_bus_check_result(&mut self, result: bool) {
        self.ops.lock().unwrap().bus_check_result = result;
    }

    /// Make the next attach fail.
    pub fn fail_attach(&mut self) {
        self.ops.lock().unwrap().fail_attach = true;
    }

    /// Shared handle to the recorded operations.
    pub fn state(&self) -> Arc<Mutex<MockOps>> {
        Arc::clone(&self.ops)
    }

    /// Read access to the framebuffer for pixel-level assertions.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelDriver for MockPanel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn bus_reset(&mut self) {
        self.wiring = None;
        self.ops.lock().unwrap().bus_resets += 1;
    }

    fn rewire(&mut self, pins: PinPair) -> Result<(), DisplayError> {
        self.wiring = Some(pins);
        self.ops.lock().unwrap().rewires.push(pins);
        Ok(())
    }

    fn set_bus_clock(&mut self, hz: u32) -> Result<(), DisplayError> {
        self.ops.lock().unwrap().clock_requests.push(hz);
        Ok(())
    }

    fn probe(&mut self, address: u8) -> bool {
        let Some(wiring) = self.wiring else {
            return false;
        };
        self.ops.lock().unwrap().probes.push((wiring, address));
        self.responders.contains(&(wiring, address))
    }

    fn bus_check(&mut self) -> bool {
        let mut ops = self.ops.lock().unwrap();
        ops.bus_checks += 1;
        ops.bus_check_result
    }

    fn settle(&mut self, pause: Duration) {
        self.ops.lock().unwrap().settles.push(pause);
    }

    fn attach(&mut self, address: u8) -> Result<(), DisplayError> {
        let mut ops = self.ops.lock().unwrap();
        ops.attach_count += 1;
        if ops.fail_attach {
            return Err(DisplayError::Init("simulated attach failure".to_string()));
        }
        ops.attached = Some(address);
        Ok(())
    }

    fn clear_buffer(&mut self) {
        self.framebuffer.reset();
        self.ops.lock().unwrap().clear_count += 1;
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut ops = self.ops.lock().unwrap();
        if ops.fail_flush {
            return Err(DisplayError::I2c("simulated flush failure".to_string()));
        }
        ops.flush_count += 1;
        Ok(())
    }

    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let mut ops = self.ops.lock().unwrap();
        ops.last_invert = Some(inverted);
        ops.invert_history.push(inverted);
        Ok(())
    }

    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        if degrees != 0 && degrees != 180 {
            return Err(DisplayError::InvalidRotation(degrees));
        }
        let mut ops = self.ops.lock().unwrap();
        ops.last_rotation = Some(degrees);
        ops.rotation_history.push(degrees);
        Ok(())
    }
}

impl DrawTarget for MockPanel {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        DrawTarget::clear(&mut self.framebuffer, color)
    }
}

impl OriginDimensions for MockPanel {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Circle, PrimitiveStyle};

    #[test]
    fn probe_without_wiring_never_acks() {
        let mut panel = MockPanel::new();
        panel.respond_at(PinPair::new(8, 9), 0x3C);
        assert!(!panel.probe(0x3C));
    }

    #[test]
    fn probe_acks_only_declared_combination() {
        let mut panel = MockPanel::new();
        panel.respond_at(PinPair::new(8, 9), 0x3C);

        panel.rewire(PinPair::new(8, 9)).unwrap();
        assert!(panel.probe(0x3C));
        assert!(!panel.probe(0x3D));

        panel.rewire(PinPair::new(6, 7)).unwrap();
        assert!(!panel.probe(0x3C));
    }

    #[test]
    fn records_panel_operations() {
        let mut panel = MockPanel::new();
        panel.attach(0x3C).unwrap();
        panel.set_invert(true).unwrap();
        panel.set_rotation(180).unwrap();
        panel.flush().unwrap();

        let ops = panel.state();
        let ops = ops.lock().unwrap();
        assert_eq!(ops.attached, Some(0x3C));
        assert_eq!(ops.last_invert, Some(true));
        assert_eq!(ops.last_rotation, Some(180));
        assert_eq!(ops.flush_count, 1);
    }

    #[test]
    fn rejects_unsupported_rotation() {
        let mut panel = MockPanel::new();
        assert!(panel.set_rotation(90).is_err());
    }

    #[test]
    fn simulated_flush_failure() {
        let mut panel = MockPanel::new();

        panel.state().lock().unwrap().fail_flush = true;
        assert!(panel.flush().is_err());

        panel.state().lock().unwrap().fail_flush = false;
        assert!(panel.flush().is_ok());
    }

    #[test]
    fn drawing_lands_in_framebuffer() {
        let mut panel = MockPanel::new();
        Circle::with_center(Point::new(64, 32), 20)
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut panel)
            .unwrap();
        assert!(panel.framebuffer().on_count() > 0);

        panel.clear_buffer();
        assert_eq!(panel.framebuffer().on_count(), 0);
    }
}
