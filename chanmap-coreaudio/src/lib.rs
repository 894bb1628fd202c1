// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel-map negotiation for CoreAudio channel layouts.
//!
//! CoreAudio describes the speaker arrangement of a device with an `AudioChannelLayout`: a layout
//! tag naming a well-known arrangement, a channel bitmap, or a list of per-channel labels. This
//! crate resolves such layouts, matches them against a catalog of standard layouts, and derives
//! the [`ChannelMap`](chanmap_core::map::ChannelMap) an output pipeline should use.
//!
//! The entry point is [`negotiate::Negotiator`]. A device supplies its layout metadata by
//! implementing [`negotiate::DeviceLayouts`].

pub mod bitmap;
pub mod builder;
pub mod catalog;
pub mod diag;
pub mod label;
pub mod layout;
pub mod negotiate;
pub mod table;
pub mod tag;

pub use negotiate::{negotiate, DeviceLayouts, NegotiateOptions, Negotiated, Negotiator};
