/*
 *  display/components/splash.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  One-shot startup animation: concentric rings out, alternating rings in
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

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle};

use crate::constants::{SPLASH_FRAME_DELAY, SPLASH_GROW_STEP, SPLASH_HOLD, SPLASH_SHRINK_STEP};
use crate::display::error::DisplayError;
use crate::display::traits::PanelDriver;

/// Run the blocking startup animation.
///
/// Intentionally synchronous: it finishes before the scheduler is ever
/// ticked, and its total duration is bounded by the frame steps and the two
/// holds.
pub fn run_splash<P: PanelDriver>(panel: &mut P) -> Result<(), DisplayError> {
    let (width, height) = panel.dimensions();
    let center = Point::new(width as i32 / 2, height as i32 / 2);
    let max_radius = width.max(height) as i32 / 2;

    panel.clear_buffer();
    let mut radius = 0;
    while radius < max_radius {
        Circle::with_center(center, radius as u32 * 2)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(panel)
            .map_err(|_| DisplayError::Drawing("splash ring".to_string()))?;
        panel.flush()?;
        panel.settle(SPLASH_FRAME_DELAY);
        radius += SPLASH_GROW_STEP;
    }
    panel.settle(SPLASH_HOLD);

    // Filled discs drawn largest-to-smallest with alternating color, so each
    // pass leaves a ring of the previous shade behind.
    panel.clear_buffer();
    let mut radius = max_radius;
    let mut lit = true;
    while radius > 0 {
        let color = if lit { BinaryColor::On } else { BinaryColor::Off };
        Circle::with_center(center, radius as u32 * 2)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(panel)
            .map_err(|_| DisplayError::Drawing("splash disc".to_string()))?;
        panel.flush()?;
        panel.settle(SPLASH_FRAME_DELAY);
        lit = !lit;
        radius -= SPLASH_SHRINK_STEP;
    }
    panel.settle(SPLASH_HOLD);

    Ok(())
}
