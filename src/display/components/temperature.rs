/*
 *  display/components/temperature.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Temperature block: label, large right-aligned reading, rate-of-rise line
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

use arrayvec::ArrayString;
use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::constants::{LARGE_CHAR_WIDTH, RATE_LINE_OFFSET};

/// Format a reading as `123.4C`. None when the sensor is not reporting.
pub fn format_temperature(temp: f64, unit: &str) -> Option<ArrayString<16>> {
    if !temp.is_finite() {
        return None;
    }
    let mut text = ArrayString::new();
    let _ = write!(text, "{:.1}{}", temp, unit);
    Some(text)
}

/// Format a rate-of-rise figure.
///
/// Small positive rates are the ones operators watch, so [0, 10) keeps one
/// decimal place; everything else rounds to a whole number.
pub fn format_rate(rate: f64) -> ArrayString<8> {
    let mut text = ArrayString::new();
    if (0.0..10.0).contains(&rate) {
        let _ = write!(text, "{:.1}", rate);
    } else {
        let _ = write!(text, "{}", rate.round() as i64);
    }
    text
}

/// Draw one temperature block at vertical cursor `y`.
///
/// A non-finite temperature renders the label alone: no reading, no rate
/// line. The reading is right-aligned off the panel width and the large
/// font's fixed character advance.
pub fn draw_temperature<D>(
    target: &mut D,
    label: &str,
    temp: f64,
    rate: f64,
    unit: &str,
    y: i32,
    panel_width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

    Text::with_baseline(label, Point::new(0, y), small, Baseline::Top).draw(target)?;

    let Some(reading) = format_temperature(temp, unit) else {
        return Ok(());
    };

    let x = panel_width as i32 - LARGE_CHAR_WIDTH * reading.len() as i32;
    Text::with_baseline(&reading, Point::new(x.max(0), y), large, Baseline::Top).draw(target)?;

    if rate.is_finite() {
        let rate_text = format_rate(rate);
        Text::with_baseline(
            &rate_text,
            Point::new(0, y + RATE_LINE_OFFSET),
            small,
            Baseline::Top,
        )
        .draw(target)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::FrameBuffer;

    #[test]
    fn temperature_formatting() {
        assert_eq!(format_temperature(203.25, "C").unwrap().as_str(), "203.2C");
        assert_eq!(format_temperature(82.0, "F").unwrap().as_str(), "82.0F");
        assert!(format_temperature(f64::NAN, "C").is_none());
        assert!(format_temperature(f64::INFINITY, "C").is_none());
    }

    #[test]
    fn rate_keeps_one_decimal_in_low_band() {
        assert_eq!(format_rate(7.0).as_str(), "7.0");
        assert_eq!(format_rate(0.0).as_str(), "0.0");
        assert_eq!(format_rate(9.94).as_str(), "9.9");
    }

    #[test]
    fn rate_rounds_outside_low_band() {
        assert_eq!(format_rate(12.4).as_str(), "12");
        assert_eq!(format_rate(12.5).as_str(), "13");
        assert_eq!(format_rate(-3.2).as_str(), "-3");
        assert_eq!(format_rate(10.0).as_str(), "10");
    }

    #[test]
    fn valid_reading_renders_all_three_lines() {
        let mut fb = FrameBuffer::new(128, 64);
        draw_temperature(&mut fb, "BT", 201.5, 7.2, "C", 16, 128).unwrap();

        // label
        assert!(fb.on_count_in(0, 16, 14, 10) > 0);
        // large reading hugs the right edge
        assert!(fb.on_count_in(64, 16, 64, 20) > 0);
        // rate line below the label
        assert!(fb.on_count_in(0, 30, 24, 10) > 0);
    }

    #[test]
    fn nan_reading_renders_label_only() {
        let mut fb = FrameBuffer::new(128, 64);
        draw_temperature(&mut fb, "BT", f64::NAN, 7.2, "C", 16, 128).unwrap();

        assert!(fb.on_count_in(0, 16, 14, 10) > 0);
        // nothing right of the label, no rate line
        assert_eq!(fb.on_count_in(40, 16, 88, 20), 0);
        assert_eq!(fb.on_count_in(0, 30, 128, 10), 0);
    }
}
