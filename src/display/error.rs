/*
 *  display/error.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error types for the display subsystem
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

use thiserror::Error;

/// Unified error type for all panel operations.
///
/// A missing panel is deliberately NOT represented here: absence is an
/// operating mode latched by the presence gate, not an error.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// I2C communication error
    #[error("I2C communication error: {0}")]
    I2c(String),

    /// Panel bring-up failed after a successful probe
    #[error("panel initialization failed: {0}")]
    Init(String),

    /// An operation that needs an attached panel was called before attach
    #[error("no panel attached")]
    NotAttached,

    /// Operation the panel hardware cannot perform
    #[error("operation not supported by this panel")]
    Unsupported,

    /// Orientation outside the two supported states
    #[error("invalid rotation angle: {0} (must be 0 or 180)")]
    InvalidRotation(u16),

    /// Drawing operation failed
    #[error("drawing error: {0}")]
    Drawing(String),

    /// Error surfaced by the display-interface layer
    #[error("display interface error: {0:?}")]
    Interface(display_interface::DisplayError),
}

// display_interface::DisplayError doesn't implement std::error::Error,
// so it is wrapped by value rather than chained as a source.
impl From<display_interface::DisplayError> for DisplayError {
    fn from(err: display_interface::DisplayError) -> Self {
        DisplayError::Interface(err)
    }
}

impl From<linux_embedded_hal::I2CError> for DisplayError {
    fn from(err: linux_embedded_hal::I2CError) -> Self {
        DisplayError::I2c(format!("{:?}", err))
    }
}
