// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform-neutral speaker roles and channel maps.
//!
//! A [`ChannelMap`](map::ChannelMap) is the artifact handed to an audio output pipeline: an
//! ordered list of [`SpeakerRole`](role::SpeakerRole)s, one per channel. Platform crates translate
//! their native layout descriptions into channel maps.

pub mod errors;
pub mod map;
pub mod role;
