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

//! Polymorphic network address/prefix types used as the universal key type
//! across the routing system: plain IPv4/IPv6 prefixes and their
//! MPLS/VPN-qualified forms, with canonical text rendering, a total
//! comparison order, validation, host-bit normalization, scope
//! classification, and prefix-containment tests.
//!
//! ```rust
//! use routeweaver_net_addr::{Ipv4NetAddr, NetAddr, RouteDistinguisher, VpnIpv4NetAddr};
//! use std::net::Ipv4Addr;
//!
//! let net = NetAddr::from(Ipv4NetAddr::new(Ipv4Addr::new(192, 0, 2, 37), 24));
//! assert!(net.is_valid());
//! assert_eq!(net.normalize().to_string(), "192.0.2.0/24");
//!
//! let vpn = NetAddr::from(VpnIpv4NetAddr::new(
//!     RouteDistinguisher::from_parts(1, 2),
//!     Ipv4NetAddr::new(Ipv4Addr::new(10, 0, 0, 0), 8),
//! ));
//! assert_eq!(vpn.to_string(), "1:2 10.0.0.0/8");
//! // Kind ordinal dominates the order, so plain prefixes sort before VPN.
//! assert!(net < vpn);
//! ```

#![deny(missing_debug_implementations)]
#![deny(rust_2018_idioms)]
#![deny(unreachable_pub)]
#![deny(unused_allocation)]
#![deny(unused_assignments)]
#![deny(unused_comparisons)]
#![deny(clippy::clone_on_ref_ptr)]
#![forbid(unsafe_code)]

pub mod addr;
pub mod classify;
mod text;

pub use addr::{
    Ipv4NetAddr, Ipv6NetAddr, NetAddr, NetAddrKind, RouteDistinguisher, UndefinedNetAddrKind,
    VpnIpv4NetAddr, VpnIpv6NetAddr,
};
pub use classify::{classify_ipv4, classify_ipv6, AddressClass};
