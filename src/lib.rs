/*
 *  lib.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Adaptive display controller for the croaster roast monitor: bus
 *  auto-discovery, presence-gated rendering, and a cooperative render
 *  scheduler for a 128x64 OLED panel.
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

pub mod config;
pub mod constants;
pub mod display;
pub mod net;
pub mod roast;

pub use display::{
    DisplayController, DisplayError, MockPanel, PanelCapabilities, PanelDriver, PinPair,
    Ssd1306Panel,
};
pub use net::{AddressSource, LocalIpSource, StaticAddress};
pub use roast::{RoastSnapshot, RoastSource, SharedRoast};
