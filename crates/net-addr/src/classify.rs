// Copyright (C) 2025-present The RouteWeaver Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Coarse address classification: what kind of address a prefix names and
//! which topological scope it belongs to.
//!
//! [`NetAddr::classify`](crate::NetAddr::classify) dispatches here per
//! address family after handling the default-route special case.

use bitflags::bitflags;
use std::net::{Ipv4Addr, Ipv6Addr};

bitflags! {
    /// Bitmask combining one address-kind flag with one scope flag.
    ///
    /// [`AddressClass::empty()`] means the address is outside every
    /// recognized range (e.g. IPv4 class E) and cannot be classified.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct AddressClass: u8 {
        /// An ordinary unicast host/network address.
        const HOST = 0x01;
        /// A multicast group address.
        const MULTICAST = 0x02;
        /// The IPv4 limited-broadcast address.
        const BROADCAST = 0x04;

        /// Scope: never leaves the node (loopback).
        const SCOPE_HOST = 0x10;
        /// Scope: valid on a single link only.
        const SCOPE_LINK = 0x20;
        /// Scope: valid within a site (private/ULA ranges).
        const SCOPE_SITE = 0x40;
        /// Scope: globally routable.
        const SCOPE_UNIVERSE = 0x80;
    }
}

/// Classifies a bare IPv4 address.
///
/// Class A-C unicast splits into loopback (host scope), RFC1918 private
/// (site scope), and everything else (universe). Class D is multicast,
/// 255.255.255.255 is the link-scoped limited broadcast, and the remainder
/// (0.0.0.0/8 beyond the zero address itself, class E) is unclassifiable.
pub fn classify_ipv4(addr: Ipv4Addr) -> AddressClass {
    let first = addr.octets()[0];
    if first > 0 && first <= 0xdf {
        if addr.is_loopback() {
            AddressClass::HOST | AddressClass::SCOPE_HOST
        } else if addr.is_private() {
            AddressClass::HOST | AddressClass::SCOPE_SITE
        } else {
            AddressClass::HOST | AddressClass::SCOPE_UNIVERSE
        }
    } else if (0xe0..=0xef).contains(&first) {
        AddressClass::MULTICAST | AddressClass::SCOPE_UNIVERSE
    } else if addr.is_broadcast() {
        AddressClass::BROADCAST | AddressClass::SCOPE_LINK
    } else {
        AddressClass::empty()
    }
}

/// Classifies a bare IPv6 address.
///
/// Global unicast (2000::/3) is universe scope; fe80::/10 link scope;
/// unique-local fc00::/7 and the deprecated site-local fec0::/10 are site
/// scope. Multicast scope comes from the ff00::/8 scope nibble. Addresses
/// outside every recognized range classify as empty.
pub fn classify_ipv6(addr: Ipv6Addr) -> AddressClass {
    let first = addr.segments()[0];
    if (first & 0xe000) == 0x2000 {
        AddressClass::HOST | AddressClass::SCOPE_UNIVERSE
    } else if (first & 0xffc0) == 0xfe80 {
        AddressClass::HOST | AddressClass::SCOPE_LINK
    } else if (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfec0 {
        AddressClass::HOST | AddressClass::SCOPE_SITE
    } else if (first & 0xff00) == 0xff00 {
        let scope = match first & 0x000f {
            0x1 => AddressClass::SCOPE_HOST,
            0x2 => AddressClass::SCOPE_LINK,
            0x5 => AddressClass::SCOPE_SITE,
            _ => AddressClass::SCOPE_UNIVERSE,
        };
        AddressClass::MULTICAST | scope
    } else if addr.is_loopback() {
        AddressClass::HOST | AddressClass::SCOPE_HOST
    } else {
        AddressClass::empty()
    }
}
