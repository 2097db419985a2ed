/*
 *  display/drivers/ssd1306.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  SSD1306 OLED panel backend over Linux I2C
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

use std::thread;
use std::time::Duration;

use embedded_hal::i2c::I2c;
use linux_embedded_hal::I2cdev;
use ssd1306::{
    I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*, size::DisplaySize128x64,
};

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use log::{debug, info};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::traits::{PanelCapabilities, PanelDriver, PinPair};

type Panel128x64 =
    Ssd1306<I2CInterface<I2cdev>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// SSD1306 panel backend.
///
/// Lives in two phases. During discovery it holds a raw `I2cdev` handle and
/// answers bus-level probes; `attach` then consumes that handle to bring up
/// the ssd1306 driver at the discovered address. Drawing always lands in the
/// local framebuffer and `flush` pushes it out.
pub struct Ssd1306Panel {
    framebuffer: FrameBuffer,
    capabilities: PanelCapabilities,
    bus: Option<I2cdev>,
    wiring: Option<PinPair>,
    last_probe: Option<u8>,
    display: Option<Panel128x64>,
}

/// Map a wiring candidate to the I2C adapter serving those GPIOs.
///
/// (2,3) is the hardware bus on BCM2/BCM3 (`/dev/i2c-1`); the other
/// candidates are `i2c-gpio` overlay buses declared on those pins in
/// config.txt, which the kernel registers as numbered adapters.
fn adapter_for(pins: PinPair) -> Option<&'static str> {
    match (pins.sda, pins.scl) {
        (2, 3) => Some("/dev/i2c-1"),
        (8, 9) => Some("/dev/i2c-3"),
        (6, 7) => Some("/dev/i2c-4"),
        (4, 5) => Some("/dev/i2c-5"),
        _ => None,
    }
}

impl Ssd1306Panel {
    pub fn new() -> Self {
        Self {
            framebuffer: FrameBuffer::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
            capabilities: PanelCapabilities {
                width: DISPLAY_WIDTH,
                height: DISPLAY_HEIGHT,
                supports_invert: true,
                supports_rotation: true,
            },
            bus: None,
            wiring: None,
            last_probe: None,
            display: None,
        }
    }
}

impl Default for Ssd1306Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelDriver for Ssd1306Panel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn bus_reset(&mut self) {
        self.bus = None;
        self.wiring = None;
    }

    fn rewire(&mut self, pins: PinPair) -> Result<(), DisplayError> {
        let path = adapter_for(pins).ok_or_else(|| {
            DisplayError::I2c(format!("no adapter for SDA={} SCL={}", pins.sda, pins.scl))
        })?;

        let bus = I2cdev::new(path)
            .map_err(|e| DisplayError::I2c(format!("failed to open {}: {}", path, e)))?;

        debug!("bus up on {} (SDA={} SCL={})", path, pins.sda, pins.scl);
        self.bus = Some(bus);
        self.wiring = Some(pins);
        Ok(())
    }

    fn set_bus_clock(&mut self, hz: u32) -> Result<(), DisplayError> {
        // The kernel fixes the clock per adapter (i2c_gpio_delay_us for the
        // overlay buses); the request is recorded, not applied.
        debug!("bus clock {} Hz requested, platform-fixed", hz);
        Ok(())
    }

    fn probe(&mut self, address: u8) -> bool {
        self.last_probe = Some(address);
        match self.bus.as_mut() {
            Some(bus) => bus.write(address, &[]).is_ok(),
            None => false,
        }
    }

    fn bus_check(&mut self) -> bool {
        match self.last_probe {
            Some(address) => self.probe(address),
            None => false,
        }
    }

    fn settle(&mut self, pause: Duration) {
        thread::sleep(pause);
    }

    fn attach(&mut self, address: u8) -> Result<(), DisplayError> {
        let bus = self
            .bus
            .take()
            .ok_or_else(|| DisplayError::Init("no live bus to attach on".to_string()))?;

        let interface = I2CDisplayInterface::new_custom_address(bus, address);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display
            .init()
            .map_err(|e| DisplayError::Init(format!("{:?}", e)))?;

        info!(
            "SSD1306 initialized at 0x{:02X} ({}x{})",
            address, self.capabilities.width, self.capabilities.height
        );
        self.display = Some(display);
        Ok(())
    }

    fn clear_buffer(&mut self) {
        self.framebuffer.reset();
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let display = self.display.as_mut().ok_or(DisplayError::NotAttached)?;

        for y in 0..self.framebuffer.height() {
            for x in 0..self.framebuffer.width() {
                display.set_pixel(x, y, self.framebuffer.is_on(x, y));
            }
        }

        display.flush().map_err(DisplayError::from)
    }

    fn set_invert(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let display = self.display.as_mut().ok_or(DisplayError::NotAttached)?;
        display.set_invert(inverted).map_err(DisplayError::from)
    }

    fn set_rotation(&mut self, degrees: u16) -> Result<(), DisplayError> {
        let rotation = match degrees {
            0 => DisplayRotation::Rotate0,
            180 => DisplayRotation::Rotate180,
            _ => return Err(DisplayError::InvalidRotation(degrees)),
        };

        let display = self.display.as_mut().ok_or(DisplayError::NotAttached)?;
        display.set_rotation(rotation).map_err(DisplayError::from)
    }
}

impl DrawTarget for Ssd1306Panel {
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

impl OriginDimensions for Ssd1306Panel {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}
