/*
 *  net.rs
 *
 *  croaster-display - eyes on the roast
 *  (c) 2020-26 Stuart Hunter
 *
 *  Read-only seam to the network-address provider
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

use local_ip_address::local_ip;

/// Address collaborator: pulled synchronously at each content refresh.
/// An empty string means "no address resolved"; the header falls back to
/// the device title.
pub trait AddressSource {
    fn resolved_address(&self) -> String;
}

/// Resolves the host's primary local IP.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalIpSource;

impl AddressSource for LocalIpSource {
    fn resolved_address(&self) -> String {
        local_ip().map(|ip| ip.to_string()).unwrap_or_default()
    }
}

/// Fixed address, for tests and bench setups.
#[derive(Debug, Clone, Default)]
pub struct StaticAddress(pub String);

impl AddressSource for StaticAddress {
    fn resolved_address(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_address_echoes_its_value() {
        let source = StaticAddress("192.168.4.20".to_string());
        assert_eq!(source.resolved_address(), "192.168.4.20");
    }

    #[test]
    fn empty_static_address_stays_empty() {
        assert_eq!(StaticAddress::default().resolved_address(), "");
    }
}
