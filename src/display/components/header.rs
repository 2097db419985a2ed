/*
 *  display/components/header.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Header bar: battery-style placeholder glyph plus title or address
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

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::constants::{
    BATTERY_GLYPH_HEIGHT, BATTERY_GLYPH_WIDTH, BATTERY_GLYPH_X, BATTERY_GLYPH_Y, BATTERY_NUB_HEIGHT,
    BATTERY_NUB_WIDTH, BATTERY_NUB_X, BATTERY_NUB_Y,
};

/// Pick the header text: the resolved address when the toggle asks for it,
/// falling back to the title whenever the address is empty. The header is
/// never rendered blank.
pub fn header_text<'a>(title: &'a str, address: &'a str, showing_address: bool) -> &'a str {
    if showing_address && !address.is_empty() {
        address
    } else {
        title
    }
}

/// Draw the header bar into `target`.
pub fn draw_header<D>(
    target: &mut D,
    title: &str,
    address: &str,
    showing_address: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    // TODO battery level
    Rectangle::new(
        Point::new(BATTERY_GLYPH_X, BATTERY_GLYPH_Y),
        Size::new(BATTERY_GLYPH_WIDTH, BATTERY_GLYPH_HEIGHT),
    )
    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
    .draw(target)?;

    Rectangle::new(
        Point::new(BATTERY_NUB_X, BATTERY_NUB_Y),
        Size::new(BATTERY_NUB_WIDTH, BATTERY_NUB_HEIGHT),
    )
    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
    .draw(target)?;

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    Text::with_baseline(
        header_text(title, address, showing_address),
        Point::zero(),
        style,
        Baseline::Top,
    )
    .draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::framebuffer::FrameBuffer;

    #[test]
    fn text_selection_follows_toggle() {
        assert_eq!(header_text("CROASTER V1", "10.0.0.9", false), "CROASTER V1");
        assert_eq!(header_text("CROASTER V1", "10.0.0.9", true), "10.0.0.9");
    }

    #[test]
    fn empty_address_falls_back_to_title() {
        assert_eq!(header_text("CROASTER V1", "", true), "CROASTER V1");
    }

    #[test]
    fn draws_glyph_and_text() {
        let mut fb = FrameBuffer::new(128, 64);
        draw_header(&mut fb, "CROASTER V1", "", false).unwrap();

        // battery glyph outline occupies its corner
        assert!(fb.on_count_in(113, 0, 15, 7) > 0);
        // title pixels at the top-left
        assert!(fb.on_count_in(0, 0, 70, 10) > 0);
    }
}
