/*
 *  display/framebuffer.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Monochrome framebuffer backing every panel backend
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

use core::convert::Infallible;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// In-memory monochrome framebuffer.
///
/// Drawing lands here; the owning driver pushes the contents to the panel
/// on `flush`. Out-of-bounds pixels are dropped silently, matching panel
/// clipping behavior.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    buf: Vec<BinaryColor>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buf: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reset every pixel to Off.
    pub fn reset(&mut self) {
        self.buf.fill(BinaryColor::Off);
    }

    /// Pixel at (x, y); None when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.buf.get((y * self.width + x) as usize).copied()
    }

    /// True when the pixel at (x, y) is lit.
    pub fn is_on(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y) == Some(BinaryColor::On)
    }

    /// Number of lit pixels across the whole buffer.
    pub fn on_count(&self) -> usize {
        self.buf.iter().filter(|&&p| p == BinaryColor::On).count()
    }

    /// Number of lit pixels inside a rectangular region (clipped to bounds).
    pub fn on_count_in(&self, x: u32, y: u32, w: u32, h: u32) -> usize {
        let mut count = 0;
        for yy in y..(y + h).min(self.height) {
            for xx in x..(x + w).min(self.width) {
                if self.is_on(xx, yy) {
                    count += 1;
                }
            }
        }
        count
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.index(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn starts_blank() {
        let fb = FrameBuffer::new(128, 64);
        assert_eq!(fb.on_count(), 0);
        assert_eq!(fb.pixel(0, 0), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(128, 0), None);
    }

    #[test]
    fn draws_and_resets() {
        let mut fb = FrameBuffer::new(128, 64);
        Line::new(Point::new(0, 0), Point::new(9, 0))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.on_count(), 10);
        assert!(fb.is_on(5, 0));

        fb.reset();
        assert_eq!(fb.on_count(), 0);
    }

    #[test]
    fn clips_out_of_bounds() {
        let mut fb = FrameBuffer::new(16, 16);
        Line::new(Point::new(10, 10), Point::new(40, 10))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut fb)
            .unwrap();
        // only the in-bounds span landed
        assert_eq!(fb.on_count(), 6);
    }
}
