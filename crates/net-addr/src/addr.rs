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

//! Polymorphic network address/prefix types.
//!
//! [`NetAddr`] is the universal key type of the routing system: an IPv4 or
//! IPv6 prefix, optionally qualified with an MPLS/VPN Route Distinguisher
//! [RFC4364](https://datatracker.ietf.org/doc/html/rfc4364). Routing tables,
//! protocol updates, and policy filters all key off this type, so the
//! comparison order, host-bit normalization, and containment tests defined
//! here must stay bit-exact.
//!
//! Construction performs no validation; values decoded from the wire stay as
//! received until checked with [`NetAddr::is_valid`] and canonicalized with
//! [`NetAddr::normalize`].

use crate::{
    classify::{classify_ipv4, classify_ipv6, AddressClass},
    text::TruncatingWriter,
};
use ipnet::{IpNet, Ipv4Net, Ipv6Net, PrefixLenError};
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::Write,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
};
use strum_macros::{Display, FromRepr};

/// Variant tag of a [`NetAddr`].
///
/// The numeric ordinals are part of the comparison contract: addresses of
/// different kinds order by this tag before any field is looked at, so the
/// assignment below must never be reshuffled.
#[repr(u8)]
#[derive(
    FromRepr, Display, Hash, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize,
    Deserialize,
)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum NetAddrKind {
    Ipv4 = 1,
    Ipv6 = 2,
    VpnIpv4 = 3,
    VpnIpv6 = 4,
}

/// Error type used in `TryFrom<u8>` for [`NetAddrKind`].
/// The value carried is the undefined value being parsed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct UndefinedNetAddrKind(pub u8);

impl From<NetAddrKind> for u8 {
    fn from(kind: NetAddrKind) -> Self {
        kind as u8
    }
}

impl TryFrom<u8> for NetAddrKind {
    type Error = UndefinedNetAddrKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match Self::from_repr(value) {
            Some(val) => Ok(val),
            None => Err(UndefinedNetAddrKind(value)),
        }
    }
}

impl NetAddrKind {
    /// Number of bytes of the canonical byte encoding of this kind: one
    /// prefix-length octet plus the address bytes plus, for VPN kinds, the
    /// 8-byte Route Distinguisher.
    pub const fn encoded_len(&self) -> usize {
        match self {
            Self::Ipv4 => 5,
            Self::Ipv6 => 17,
            Self::VpnIpv4 => 13,
            Self::VpnIpv6 => 25,
        }
    }

    /// Maximum valid prefix length for this kind.
    pub const fn max_prefix_len(&self) -> u8 {
        match self {
            Self::Ipv4 | Self::VpnIpv4 => 32,
            Self::Ipv6 | Self::VpnIpv6 => 128,
        }
    }

    /// Exact upper bound on the length of the canonical text rendering,
    /// in bytes.
    pub const fn max_text_len(&self) -> usize {
        match self {
            // "255.255.255.255/32"
            Self::Ipv4 => 18,
            // "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff/128"
            Self::Ipv6 => 43,
            // "4294967295:4294967295 255.255.255.255/32"
            Self::VpnIpv4 => 40,
            // "4294967295:4294967295 ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff/128"
            Self::VpnIpv6 => 65,
        }
    }

    /// True for the kinds whose embedded prefix is an IPv4 address.
    pub const fn is_ipv4(&self) -> bool {
        matches!(self, Self::Ipv4 | Self::VpnIpv4)
    }

    /// True for the kinds whose embedded prefix is an IPv6 address.
    pub const fn is_ipv6(&self) -> bool {
        matches!(self, Self::Ipv6 | Self::VpnIpv6)
    }
}

/// Route Distinguisher (RD): an opaque 8-byte value qualifying a prefix so
/// overlapping VPN address spaces stay distinct
/// [RFC4364](https://datatracker.ietf.org/doc/html/rfc4364).
///
/// No internal structure is imposed here; the two 32-bit halves are split
/// out only for the conventional `high:low` display form.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct RouteDistinguisher(u64);

impl RouteDistinguisher {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn from_parts(high: u32, low: u32) -> Self {
        Self(((high as u64) << 32) | low as u64)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Upper 32 bits.
    pub const fn high(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Lower 32 bits.
    pub const fn low(&self) -> u32 {
        self.0 as u32
    }
}

impl From<u64> for RouteDistinguisher {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for RouteDistinguisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.high(), self.low())
    }
}

/// Returns the IPv4 network mask covering the first `len` bits. Lengths of
/// 32 or more yield the all-ones mask.
const fn ipv4_mask(len: u8) -> u32 {
    if len == 0 {
        0
    } else if len >= 32 {
        u32::MAX
    } else {
        u32::MAX << (32 - len)
    }
}

/// Returns the IPv6 network mask covering the first `len` bits. Lengths of
/// 128 or more yield the all-ones mask.
const fn ipv6_mask(len: u8) -> u128 {
    if len == 0 {
        0
    } else if len >= 128 {
        u128::MAX
    } else {
        u128::MAX << (128 - len)
    }
}

/// Plain IPv4 prefix.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct Ipv4NetAddr {
    prefix: Ipv4Addr,
    length: u8,
}

impl Ipv4NetAddr {
    pub const fn new(prefix: Ipv4Addr, length: u8) -> Self {
        Self { prefix, length }
    }

    pub const fn prefix(&self) -> Ipv4Addr {
        self.prefix
    }

    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Zeroes every bit of the prefix address beyond the prefix length.
    /// Idempotent; the length is left untouched.
    pub fn normalize(self) -> Self {
        Self {
            prefix: Ipv4Addr::from(u32::from(self.prefix) & ipv4_mask(self.length)),
            length: self.length,
        }
    }

    /// True when `addr` falls inside this prefix. Masks on the fly, so the
    /// prefix need not be normalized first.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        (u32::from(addr) ^ u32::from(self.prefix)) & ipv4_mask(self.length) == 0
    }

    /// The network mask derived from the prefix length, e.g. `255.255.255.0`
    /// for a /24.
    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(ipv4_mask(self.length))
    }
}

impl From<Ipv4Net> for Ipv4NetAddr {
    fn from(net: Ipv4Net) -> Self {
        Self::new(net.addr(), net.prefix_len())
    }
}

impl TryFrom<Ipv4NetAddr> for Ipv4Net {
    type Error = PrefixLenError;

    fn try_from(addr: Ipv4NetAddr) -> Result<Self, Self::Error> {
        Ipv4Net::new(addr.prefix, addr.length)
    }
}

impl std::fmt::Display for Ipv4NetAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.prefix, self.length)
    }
}

/// Plain IPv6 prefix.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct Ipv6NetAddr {
    prefix: Ipv6Addr,
    length: u8,
}

impl Ipv6NetAddr {
    pub const fn new(prefix: Ipv6Addr, length: u8) -> Self {
        Self { prefix, length }
    }

    pub const fn prefix(&self) -> Ipv6Addr {
        self.prefix
    }

    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Zeroes every bit of the prefix address beyond the prefix length.
    /// Idempotent; the length is left untouched.
    pub fn normalize(self) -> Self {
        Self {
            prefix: Ipv6Addr::from(u128::from(self.prefix) & ipv6_mask(self.length)),
            length: self.length,
        }
    }

    /// True when `addr` falls inside this prefix. Masks on the fly, so the
    /// prefix need not be normalized first.
    pub fn contains(&self, addr: Ipv6Addr) -> bool {
        (u128::from(addr) ^ u128::from(self.prefix)) & ipv6_mask(self.length) == 0
    }

    /// The network mask derived from the prefix length.
    pub fn mask(&self) -> Ipv6Addr {
        Ipv6Addr::from(ipv6_mask(self.length))
    }
}

impl From<Ipv6Net> for Ipv6NetAddr {
    fn from(net: Ipv6Net) -> Self {
        Self::new(net.addr(), net.prefix_len())
    }
}

impl TryFrom<Ipv6NetAddr> for Ipv6Net {
    type Error = PrefixLenError;

    fn try_from(addr: Ipv6NetAddr) -> Result<Self, Self::Error> {
        Ipv6Net::new(addr.prefix, addr.length)
    }
}

impl std::fmt::Display for Ipv6NetAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.prefix, self.length)
    }
}

/// IPv4 prefix qualified with a Route Distinguisher (MPLS/VPN).
///
/// The address arithmetic lives on the embedded [`Ipv4NetAddr`]; this struct
/// only adds the distinguisher, so VPN and plain prefixes of the same family
/// share one masking implementation.
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct VpnIpv4NetAddr {
    rd: RouteDistinguisher,
    network: Ipv4NetAddr,
}

impl VpnIpv4NetAddr {
    pub const fn new(rd: RouteDistinguisher, network: Ipv4NetAddr) -> Self {
        Self { rd, network }
    }

    pub const fn rd(&self) -> RouteDistinguisher {
        self.rd
    }

    pub const fn network(&self) -> Ipv4NetAddr {
        self.network
    }

    pub const fn prefix(&self) -> Ipv4Addr {
        self.network.prefix()
    }

    pub const fn length(&self) -> u8 {
        self.network.length()
    }

    /// Canonicalizes the embedded prefix; the distinguisher is untouched.
    pub fn normalize(self) -> Self {
        Self {
            rd: self.rd,
            network: self.network.normalize(),
        }
    }
}

impl std::fmt::Display for VpnIpv4NetAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.rd, self.network)
    }
}

/// IPv6 prefix qualified with a Route Distinguisher (MPLS/VPN).
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct VpnIpv6NetAddr {
    rd: RouteDistinguisher,
    network: Ipv6NetAddr,
}

impl VpnIpv6NetAddr {
    pub const fn new(rd: RouteDistinguisher, network: Ipv6NetAddr) -> Self {
        Self { rd, network }
    }

    pub const fn rd(&self) -> RouteDistinguisher {
        self.rd
    }

    pub const fn network(&self) -> Ipv6NetAddr {
        self.network
    }

    pub const fn prefix(&self) -> Ipv6Addr {
        self.network.prefix()
    }

    pub const fn length(&self) -> u8 {
        self.network.length()
    }

    /// Canonicalizes the embedded prefix; the distinguisher is untouched.
    pub fn normalize(self) -> Self {
        Self {
            rd: self.rd,
            network: self.network.normalize(),
        }
    }
}

impl std::fmt::Display for VpnIpv6NetAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.rd, self.network)
    }
}

/// A network address: the key type every routing table entry, protocol
/// update, and policy filter is indexed by.
///
/// The variant set is closed; every operation matches it exhaustively so a
/// future family addition is caught at compile time rather than by a default
/// arm at runtime.
///
/// ```rust
/// use routeweaver_net_addr::{Ipv4NetAddr, NetAddr};
/// use std::net::Ipv4Addr;
///
/// let net = NetAddr::from(Ipv4NetAddr::new(Ipv4Addr::new(192, 0, 2, 0), 24));
/// assert_eq!(net.to_string(), "192.0.2.0/24");
/// assert!(net.contains_addr(Ipv4Addr::new(192, 0, 2, 5).into()));
/// ```
#[derive(Hash, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub enum NetAddr {
    Ipv4(Ipv4NetAddr),
    Ipv6(Ipv6NetAddr),
    VpnIpv4(VpnIpv4NetAddr),
    VpnIpv6(VpnIpv6NetAddr),
}

impl NetAddr {
    pub const fn kind(&self) -> NetAddrKind {
        match self {
            Self::Ipv4(_) => NetAddrKind::Ipv4,
            Self::Ipv6(_) => NetAddrKind::Ipv6,
            Self::VpnIpv4(_) => NetAddrKind::VpnIpv4,
            Self::VpnIpv6(_) => NetAddrKind::VpnIpv6,
        }
    }

    /// The embedded prefix address, without the VPN qualification.
    pub const fn prefix(&self) -> IpAddr {
        match self {
            Self::Ipv4(n) => IpAddr::V4(n.prefix()),
            Self::Ipv6(n) => IpAddr::V6(n.prefix()),
            Self::VpnIpv4(n) => IpAddr::V4(n.prefix()),
            Self::VpnIpv6(n) => IpAddr::V6(n.prefix()),
        }
    }

    pub const fn prefix_len(&self) -> u8 {
        match self {
            Self::Ipv4(n) => n.length(),
            Self::Ipv6(n) => n.length(),
            Self::VpnIpv4(n) => n.length(),
            Self::VpnIpv6(n) => n.length(),
        }
    }

    /// The Route Distinguisher of VPN-qualified variants.
    pub const fn rd(&self) -> Option<RouteDistinguisher> {
        match self {
            Self::Ipv4(_) | Self::Ipv6(_) => None,
            Self::VpnIpv4(n) => Some(n.rd()),
            Self::VpnIpv6(n) => Some(n.rd()),
        }
    }

    pub const fn is_ipv4(&self) -> bool {
        self.kind().is_ipv4()
    }

    pub const fn is_ipv6(&self) -> bool {
        self.kind().is_ipv6()
    }

    /// True iff the prefix length is within the family's bound. Deliberately
    /// length-only: host bits beyond the length and the distinguisher are
    /// not inspected.
    pub fn is_valid(&self) -> bool {
        self.prefix_len() <= self.kind().max_prefix_len()
    }

    /// Returns the canonical form: every bit of the prefix address beyond
    /// the prefix length zeroed. Length and distinguisher are preserved.
    pub fn normalize(&self) -> Self {
        match self {
            Self::Ipv4(n) => Self::Ipv4(n.normalize()),
            Self::Ipv6(n) => Self::Ipv6(n.normalize()),
            Self::VpnIpv4(n) => Self::VpnIpv4(n.normalize()),
            Self::VpnIpv6(n) => Self::VpnIpv6(n.normalize()),
        }
    }

    /// The family-appropriate network mask derived from the prefix length.
    pub fn prefix_mask(&self) -> IpAddr {
        match self {
            Self::Ipv4(n) => IpAddr::V4(n.mask()),
            Self::Ipv6(n) => IpAddr::V6(n.mask()),
            Self::VpnIpv4(n) => IpAddr::V4(n.network().mask()),
            Self::VpnIpv6(n) => IpAddr::V6(n.network().mask()),
        }
    }

    /// Coarse classification of the prefix address.
    ///
    /// The all-zeros address (the default route) is always a host address of
    /// universe scope, checked before any family rule. Everything else
    /// delegates to the per-family classifier; the prefix length and the
    /// distinguisher never influence the outcome.
    pub fn classify(&self) -> AddressClass {
        match self.prefix() {
            IpAddr::V4(a) => {
                if a.is_unspecified() {
                    AddressClass::HOST | AddressClass::SCOPE_UNIVERSE
                } else {
                    classify_ipv4(a)
                }
            }
            IpAddr::V6(a) => {
                if a.is_unspecified() {
                    AddressClass::HOST | AddressClass::SCOPE_UNIVERSE
                } else {
                    classify_ipv6(a)
                }
            }
        }
    }

    /// True when `addr` falls inside this prefix. A point of the wrong
    /// address family never matches, regardless of VPN qualification; no
    /// error is raised. Neither side needs to be normalized.
    pub fn contains_addr(&self, addr: IpAddr) -> bool {
        match (self, addr) {
            (Self::Ipv4(n), IpAddr::V4(a)) => n.contains(a),
            (Self::Ipv6(n), IpAddr::V6(a)) => n.contains(a),
            (Self::VpnIpv4(n), IpAddr::V4(a)) => n.network().contains(a),
            (Self::VpnIpv6(n), IpAddr::V6(a)) => n.network().contains(a),
            _ => false,
        }
    }

    /// True when every address covered by `other` is also covered by `self`.
    ///
    /// Both sides must have the identical variant kind: a VPN prefix is
    /// never contained in a plain prefix of the same family. Matching kinds
    /// then reduce to a length check plus a point test on `other`'s prefix
    /// address (the distinguisher itself is not compared, mirroring how
    /// tables treat RDs as part of the key, not of the topology).
    pub fn contains(&self, other: &NetAddr) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        self.prefix_len() <= other.prefix_len() && self.contains_addr(other.prefix())
    }

    /// snprintf-like bounded rendering: writes at most `buf.len()` bytes of
    /// the canonical text form and returns the length the full rendering
    /// requires. A return value larger than `buf.len()` means the output was
    /// truncated. Never writes out of bounds.
    ///
    /// A buffer of [`NetAddrKind::max_text_len`] bytes is always large
    /// enough.
    pub fn format_into(&self, buf: &mut [u8]) -> usize {
        let mut writer = TruncatingWriter::new(buf);
        // Rendering is pure ASCII and the writer never errors.
        let _ = write!(writer, "{self}");
        writer.required()
    }
}

impl std::fmt::Display for NetAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ipv4(n) => std::fmt::Display::fmt(n, f),
            Self::Ipv6(n) => std::fmt::Display::fmt(n, f),
            Self::VpnIpv4(n) => std::fmt::Display::fmt(n, f),
            Self::VpnIpv6(n) => std::fmt::Display::fmt(n, f),
        }
    }
}

/// Total order used for table indexing: variant kind first, then (for VPN
/// kinds) the distinguisher, then the prefix address numerically, then the
/// prefix length. Two prefixes differing only in length are ordered, never
/// equal.
impl Ord for NetAddr {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Ipv4(a), Self::Ipv4(b)) => a.cmp(b),
            (Self::Ipv6(a), Self::Ipv6(b)) => a.cmp(b),
            (Self::VpnIpv4(a), Self::VpnIpv4(b)) => a.cmp(b),
            (Self::VpnIpv6(a), Self::VpnIpv6(b)) => a.cmp(b),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for NetAddr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Ipv4NetAddr> for NetAddr {
    fn from(addr: Ipv4NetAddr) -> Self {
        Self::Ipv4(addr)
    }
}

impl From<Ipv6NetAddr> for NetAddr {
    fn from(addr: Ipv6NetAddr) -> Self {
        Self::Ipv6(addr)
    }
}

impl From<VpnIpv4NetAddr> for NetAddr {
    fn from(addr: VpnIpv4NetAddr) -> Self {
        Self::VpnIpv4(addr)
    }
}

impl From<VpnIpv6NetAddr> for NetAddr {
    fn from(addr: VpnIpv6NetAddr) -> Self {
        Self::VpnIpv6(addr)
    }
}

impl From<IpNet> for NetAddr {
    fn from(net: IpNet) -> Self {
        match net {
            IpNet::V4(net) => Self::Ipv4(net.into()),
            IpNet::V6(net) => Self::Ipv6(net.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ip4(prefix: &str, length: u8) -> NetAddr {
        NetAddr::Ipv4(Ipv4NetAddr::new(Ipv4Addr::from_str(prefix).unwrap(), length))
    }

    fn ip6(prefix: &str, length: u8) -> NetAddr {
        NetAddr::Ipv6(Ipv6NetAddr::new(Ipv6Addr::from_str(prefix).unwrap(), length))
    }

    fn vpn4(rd: u64, prefix: &str, length: u8) -> NetAddr {
        NetAddr::VpnIpv4(VpnIpv4NetAddr::new(
            RouteDistinguisher::new(rd),
            Ipv4NetAddr::new(Ipv4Addr::from_str(prefix).unwrap(), length),
        ))
    }

    fn vpn6(rd: u64, prefix: &str, length: u8) -> NetAddr {
        NetAddr::VpnIpv6(VpnIpv6NetAddr::new(
            RouteDistinguisher::new(rd),
            Ipv6NetAddr::new(Ipv6Addr::from_str(prefix).unwrap(), length),
        ))
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            NetAddrKind::Ipv4,
            NetAddrKind::Ipv6,
            NetAddrKind::VpnIpv4,
            NetAddrKind::VpnIpv6,
        ] {
            assert_eq!(NetAddrKind::try_from(u8::from(kind)), Ok(kind));
        }
        assert_eq!(NetAddrKind::try_from(0), Err(UndefinedNetAddrKind(0)));
        assert_eq!(NetAddrKind::try_from(5), Err(UndefinedNetAddrKind(5)));
    }

    #[test]
    fn test_metadata() {
        assert_eq!(NetAddrKind::Ipv4.encoded_len(), 5);
        assert_eq!(NetAddrKind::Ipv6.encoded_len(), 17);
        assert_eq!(NetAddrKind::VpnIpv4.encoded_len(), 13);
        assert_eq!(NetAddrKind::VpnIpv6.encoded_len(), 25);

        assert_eq!(NetAddrKind::Ipv4.max_prefix_len(), 32);
        assert_eq!(NetAddrKind::Ipv6.max_prefix_len(), 128);
        assert_eq!(NetAddrKind::VpnIpv4.max_prefix_len(), 32);
        assert_eq!(NetAddrKind::VpnIpv6.max_prefix_len(), 128);
    }

    #[test]
    fn test_max_text_len_is_exact() {
        let widest = [
            ip4("255.255.255.255", 32),
            ip6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", 128),
            vpn4(u64::MAX, "255.255.255.255", 32),
            vpn6(u64::MAX, "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", 128),
        ];
        for net in widest {
            assert_eq!(net.to_string().len(), net.kind().max_text_len());
        }
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(ip4("192.0.2.0", 24).to_string(), "192.0.2.0/24");
        assert_eq!(ip6("2001:db8::", 32).to_string(), "2001:db8::/32");
        assert_eq!(ip4("0.0.0.0", 0).to_string(), "0.0.0.0/0");
    }

    #[test]
    fn test_format_vpn() {
        let rd = (1u64 << 32) | 2;
        assert_eq!(vpn4(rd, "10.0.0.0", 8).to_string(), "1:2 10.0.0.0/8");
        assert_eq!(
            vpn6(rd, "2001:db8::", 32).to_string(),
            "1:2 2001:db8::/32"
        );
    }

    #[test]
    fn test_format_never_exceeds_max_text_len() {
        let nets = [
            ip4("255.255.255.255", 32),
            ip4("0.0.0.0", 0),
            ip6("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", 128),
            ip6("::", 0),
            vpn4(u64::MAX, "255.255.255.255", 32),
            vpn6(u64::MAX, "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff", 128),
        ];
        for net in nets {
            assert!(net.to_string().len() <= net.kind().max_text_len());
        }
    }

    #[test]
    fn test_format_into() {
        let net = ip4("192.0.2.0", 24);
        let mut buf = [0u8; 64];
        let n = net.format_into(&mut buf);
        assert_eq!(n, 12);
        assert_eq!(&buf[..n], b"192.0.2.0/24");
    }

    #[test]
    fn test_format_into_signals_truncation() {
        let net = ip4("192.0.2.0", 24);
        let mut buf = [0u8; 8];
        let n = net.format_into(&mut buf);
        assert_eq!(n, 12);
        assert_eq!(&buf, b"192.0.2.");

        // A zero-length buffer still reports the required length.
        assert_eq!(net.format_into(&mut []), 12);
    }

    #[test]
    fn test_compare_orders_by_kind_first() {
        // Kind ordinal dominates regardless of the numeric address values.
        let v4 = ip4("255.255.255.255", 32);
        let v6 = ip6("::", 0);
        let p4 = vpn4(0, "0.0.0.0", 0);
        let p6 = vpn6(0, "::", 0);
        assert!(v4 < v6);
        assert!(v6 < p4);
        assert!(p4 < p6);
    }

    #[test]
    fn test_compare_same_kind() {
        assert!(ip4("10.0.0.0", 8) < ip4("192.0.2.0", 24));
        // Address ties break on length, shorter first.
        assert!(ip4("10.0.0.0", 8) < ip4("10.0.0.0", 16));
        assert!(ip6("2001:db8::", 32) < ip6("2001:db9::", 32));
        // VPN kinds compare the distinguisher before the prefix.
        assert!(vpn4(1, "192.0.2.0", 24) < vpn4(2, "10.0.0.0", 8));
        assert!(vpn4(1, "10.0.0.0", 8) < vpn4(1, "192.0.2.0", 24));
        assert!(vpn6(1, "2001:db8::", 32) < vpn6(1, "2001:db8::", 48));
    }

    #[test]
    fn test_compare_is_total_order() {
        let sample = [
            ip4("0.0.0.0", 0),
            ip4("10.0.0.0", 8),
            ip4("10.0.0.0", 16),
            ip4("192.0.2.0", 24),
            ip6("::", 0),
            ip6("2001:db8::", 32),
            ip6("2001:db8::", 48),
            vpn4(0, "10.0.0.0", 8),
            vpn4(u64::MAX, "10.0.0.0", 8),
            vpn6(7, "2001:db8::", 32),
            vpn6(7, "2001:db8::", 64),
        ];
        for a in &sample {
            assert_eq!(a.cmp(a), Ordering::Equal);
            for b in &sample {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in &sample {
                    if a.cmp(b) != Ordering::Greater && b.cmp(c) != Ordering::Greater {
                        assert_ne!(a.cmp(c), Ordering::Greater);
                    }
                }
            }
        }
    }

    #[test]
    fn test_validate_bounds() {
        assert!(ip4("10.0.0.0", 0).is_valid());
        assert!(ip4("10.0.0.0", 32).is_valid());
        assert!(!ip4("10.0.0.0", 33).is_valid());
        assert!(ip6("2001:db8::", 128).is_valid());
        assert!(!ip6("2001:db8::", 129).is_valid());
        assert!(vpn4(1, "10.0.0.0", 32).is_valid());
        assert!(!vpn4(1, "10.0.0.0", 129).is_valid());
        assert!(vpn6(1, "2001:db8::", 128).is_valid());
        assert!(!vpn6(1, "2001:db8::", 255).is_valid());
    }

    #[test]
    fn test_normalize_zeroes_host_bits() {
        assert_eq!(ip4("192.0.2.37", 24).normalize(), ip4("192.0.2.0", 24));
        assert_eq!(
            ip6("2001:db8::dead:beef", 32).normalize(),
            ip6("2001:db8::", 32)
        );
        // Host route: nothing to mask away.
        assert_eq!(ip4("192.0.2.37", 32).normalize(), ip4("192.0.2.37", 32));
        assert_eq!(ip4("192.0.2.37", 0).normalize(), ip4("0.0.0.0", 0));
    }

    #[test]
    fn test_normalize_preserves_rd_and_length() {
        let net = vpn4(42, "172.16.5.9", 12);
        let norm = net.normalize();
        assert_eq!(norm, vpn4(42, "172.16.0.0", 12));
        assert_eq!(norm.rd(), Some(RouteDistinguisher::new(42)));
        assert_eq!(norm.prefix_len(), 12);
    }

    #[test]
    fn test_normalize_idempotent() {
        let nets = [
            ip4("192.0.2.37", 24),
            ip6("2001:db8::1", 48),
            vpn4(9, "10.1.2.3", 16),
            vpn6(9, "fe80::1", 10),
        ];
        for net in nets {
            assert_eq!(net.normalize().normalize(), net.normalize());
        }
    }

    #[test]
    fn test_contains_addr() {
        let net = ip4("192.0.2.0", 24);
        assert!(net.contains_addr(Ipv4Addr::from_str("192.0.2.5").unwrap().into()));
        assert!(!net.contains_addr(Ipv4Addr::from_str("192.0.3.5").unwrap().into()));

        let net = ip6("2001:db8::", 32);
        assert!(net.contains_addr(Ipv6Addr::from_str("2001:db8::1").unwrap().into()));
        assert!(!net.contains_addr(Ipv6Addr::from_str("2001:db9::1").unwrap().into()));
    }

    #[test]
    fn test_contains_addr_family_mismatch() {
        let v4net = ip4("192.0.2.0", 24);
        let v6net = ip6("::ffff:c000:200", 120);
        assert!(!v4net.contains_addr(Ipv6Addr::from_str("2001:db8::1").unwrap().into()));
        assert!(!v6net.contains_addr(Ipv4Addr::from_str("192.0.2.1").unwrap().into()));
        // VPN qualification does not change the family rule.
        assert!(!vpn4(1, "192.0.2.0", 24)
            .contains_addr(Ipv6Addr::from_str("2001:db8::1").unwrap().into()));
        assert!(vpn4(1, "192.0.2.0", 24)
            .contains_addr(Ipv4Addr::from_str("192.0.2.1").unwrap().into()));
    }

    #[test]
    fn test_contains_addr_unnormalized_net() {
        // Host bits in the stored prefix are masked on the fly.
        let net = ip4("192.0.2.37", 24);
        assert!(net.contains_addr(Ipv4Addr::from_str("192.0.2.5").unwrap().into()));
    }

    #[test]
    fn test_contains_prefix() {
        let outer = ip4("192.0.2.0", 24);
        let inner = ip4("192.0.2.128", 25);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_contains_prefix_reflexive() {
        let nets = [
            ip4("192.0.2.0", 24),
            ip6("2001:db8::", 32),
            vpn4(3, "10.0.0.0", 8),
            vpn6(3, "2001:db8::", 32),
        ];
        for net in nets {
            assert!(net.contains(&net));
        }
    }

    #[test]
    fn test_contains_prefix_requires_matching_kind() {
        let plain = ip4("10.0.0.0", 8);
        let vpn = vpn4(1, "10.0.0.0", 16);
        assert!(!plain.contains(&vpn));
        assert!(!vpn.contains(&plain));
        assert!(!ip4("0.0.0.0", 0).contains(&ip6("::", 0)));
    }

    #[test]
    fn test_contains_prefix_longer_never_contains_shorter() {
        let sample = [
            ip4("10.0.0.0", 8),
            ip4("10.0.0.0", 16),
            ip4("10.0.0.0", 24),
            ip6("2001:db8::", 32),
            ip6("2001:db8::", 64),
        ];
        for a in &sample {
            for b in &sample {
                if a.contains(b) && a != b {
                    assert!(a.prefix_len() < b.prefix_len());
                }
            }
        }
    }

    #[test]
    fn test_prefix_mask() {
        assert_eq!(
            ip4("192.0.2.0", 24).prefix_mask(),
            IpAddr::V4(Ipv4Addr::from_str("255.255.255.0").unwrap())
        );
        assert_eq!(
            ip4("0.0.0.0", 0).prefix_mask(),
            IpAddr::V4(Ipv4Addr::from_str("0.0.0.0").unwrap())
        );
        assert_eq!(
            vpn6(1, "2001:db8::", 32).prefix_mask(),
            IpAddr::V6(Ipv6Addr::from_str("ffff:ffff::").unwrap())
        );
    }

    #[test]
    fn test_route_distinguisher_parts() {
        let rd = RouteDistinguisher::from_parts(1, 2);
        assert_eq!(rd.value(), (1u64 << 32) | 2);
        assert_eq!(rd.high(), 1);
        assert_eq!(rd.low(), 2);
        assert_eq!(rd.to_string(), "1:2");
        assert_eq!(
            RouteDistinguisher::new(u64::MAX).to_string(),
            "4294967295:4294967295"
        );
    }

    #[test]
    fn test_ipnet_conversions() {
        let net = Ipv4Net::from_str("192.0.2.0/24").unwrap();
        let addr = Ipv4NetAddr::from(net);
        assert_eq!(addr, Ipv4NetAddr::new(Ipv4Addr::new(192, 0, 2, 0), 24));
        assert_eq!(Ipv4Net::try_from(addr), Ok(net));

        // Out-of-range lengths are representable here but not in ipnet.
        let bogus = Ipv4NetAddr::new(Ipv4Addr::new(192, 0, 2, 0), 33);
        assert!(Ipv4Net::try_from(bogus).is_err());

        let net = IpNet::from_str("2001:db8::/32").unwrap();
        assert_eq!(NetAddr::from(net), ip6("2001:db8::", 32));
    }

    #[test]
    fn test_serde_round_trip() {
        let nets = [
            ip4("192.0.2.0", 24),
            ip6("2001:db8::", 32),
            vpn4(42, "10.0.0.0", 8),
            vpn6(42, "2001:db8::", 32),
        ];
        for net in nets {
            let json = serde_json::to_string(&net).unwrap();
            let back: NetAddr = serde_json::from_str(&json).unwrap();
            assert_eq!(back, net);
        }
    }
}
