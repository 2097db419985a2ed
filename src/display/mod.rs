/*
 *  display/mod.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem: discovery, controller, render primitives, backends
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

// Core trait definitions
pub mod error;
pub mod framebuffer;
pub mod traits;

// Discovery pass and steady-state controller
pub mod controller;
pub mod discovery;

// Render primitives
pub mod components;

// Panel backends
pub mod drivers;

// Re-exports for convenience
pub use controller::DisplayController;
pub use drivers::{MockPanel, Ssd1306Panel};
pub use error::DisplayError;
pub use traits::{PanelCapabilities, PanelDriver, PinPair};
