// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use smallvec::SmallVec;

use crate::role::SpeakerRole;

/// An ordered list of speaker roles, one per audio channel.
///
/// The position of a role in the map is the position of the channel in an audio frame. A map is
/// usually free of duplicates, but a degenerate platform layout may produce one. Such maps are
/// kept as-is since the channel order must still match the device's physical routing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelMap {
    roles: SmallVec<[SpeakerRole; 8]>,
}

impl ChannelMap {
    /// Create an empty channel map.
    pub fn new() -> Self {
        ChannelMap { roles: SmallVec::new() }
    }

    /// Create a channel map from a slice of roles.
    pub fn from_roles(roles: &[SpeakerRole]) -> Self {
        ChannelMap { roles: SmallVec::from_slice(roles) }
    }

    /// Get the default channel map for a channel count.
    ///
    /// Counts of 1 through 8 select mono, stereo, and the standard surround progression up-to
    /// 7.1. Larger counts extend the 7.1 map with discrete channels. A count of 0 yields an
    /// empty map.
    pub fn default_for_count(count: usize) -> Self {
        let base: &[SpeakerRole] = match count {
            0 => &[],
            1 => layouts::CHANNEL_MAP_MONO,
            2 => layouts::CHANNEL_MAP_STEREO,
            3 => layouts::CHANNEL_MAP_2P1,
            4 => layouts::CHANNEL_MAP_4P0,
            5 => layouts::CHANNEL_MAP_5P0,
            6 => layouts::CHANNEL_MAP_5P1,
            7 => layouts::CHANNEL_MAP_6P1,
            _ => layouts::CHANNEL_MAP_7P1,
        };

        let mut map = ChannelMap::from_roles(base);

        // Anything past 7.1 has no conventional position.
        for idx in map.len()..count {
            map.push(SpeakerRole::Discrete(idx.min(usize::from(u16::MAX)) as u16));
        }

        map
    }

    /// Append a role to the end of the map.
    pub fn push(&mut self, role: SpeakerRole) {
        self.roles.push(role);
    }

    /// Get the number of channels.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if the map has no channels.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Get the roles as a slice.
    pub fn roles(&self) -> &[SpeakerRole] {
        &self.roles
    }

    /// Get an iterator over the roles in channel order.
    pub fn iter(&self) -> impl Iterator<Item = &SpeakerRole> + '_ {
        self.roles.iter()
    }

    /// Get the channel index of the first channel with the given role.
    pub fn position(&self, role: SpeakerRole) -> Option<usize> {
        self.roles.iter().position(|&r| r == role)
    }

    /// Returns `true` if any positional role appears more than once.
    pub fn is_degenerate(&self) -> bool {
        self.duplicates().next().is_some()
    }

    /// Get an iterator over positional roles that repeat an earlier channel's role.
    ///
    /// Unknown and discrete roles are never reported.
    pub fn duplicates(&self) -> impl Iterator<Item = (usize, SpeakerRole)> + '_ {
        self.roles.iter().enumerate().filter_map(move |(i, role)| {
            if role.is_positional() && self.roles[..i].contains(role) {
                Some((i, *role))
            }
            else {
                None
            }
        })
    }
}

impl From<Vec<SpeakerRole>> for ChannelMap {
    fn from(roles: Vec<SpeakerRole>) -> Self {
        ChannelMap { roles: SmallVec::from_vec(roles) }
    }
}

impl FromIterator<SpeakerRole> for ChannelMap {
    fn from_iter<I: IntoIterator<Item = SpeakerRole>>(iter: I) -> Self {
        ChannelMap { roles: iter.into_iter().collect() }
    }
}

impl fmt::Display for ChannelMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.roles.iter().map(|role| role.to_string()).collect::<Vec<_>>().join(",");

        write!(f, "[{}]", list)
    }
}

pub mod layouts {
    //! Canonical channel orders for common speaker configurations.
    //!
    //! These orders are used whenever a channel map must be produced without any help from the
    //! device, and they are the orders that standard native layouts are collapsed to.
    use super::SpeakerRole::*;
    use super::SpeakerRole;

    /// Monophonic audio.
    pub const CHANNEL_MAP_MONO: &[SpeakerRole] = &[FrontCenter];

    /// Stereophonic audio.
    pub const CHANNEL_MAP_STEREO: &[SpeakerRole] = &[FrontLeft, FrontRight];

    /// Stereophonic audio with low-frequency effects.
    pub const CHANNEL_MAP_2P1: &[SpeakerRole] = &[FrontLeft, FrontRight, Lfe];

    /// Quadraphonic audio with back channels.
    pub const CHANNEL_MAP_QUAD: &[SpeakerRole] = &[FrontLeft, FrontRight, BackLeft, BackRight];

    /// 4.0 audio.
    pub const CHANNEL_MAP_4P0: &[SpeakerRole] = &[FrontLeft, FrontRight, FrontCenter, BackCenter];

    /// 5.0 audio.
    pub const CHANNEL_MAP_5P0: &[SpeakerRole] =
        &[FrontLeft, FrontRight, FrontCenter, BackLeft, BackRight];

    /// 5.1 audio.
    pub const CHANNEL_MAP_5P1: &[SpeakerRole] =
        &[FrontLeft, FrontRight, FrontCenter, Lfe, BackLeft, BackRight];

    /// 6.1 audio.
    pub const CHANNEL_MAP_6P1: &[SpeakerRole] =
        &[FrontLeft, FrontRight, FrontCenter, Lfe, BackLeft, BackRight, BackCenter];

    /// 7.1 audio.
    pub const CHANNEL_MAP_7P1: &[SpeakerRole] =
        &[FrontLeft, FrontRight, FrontCenter, Lfe, BackLeft, BackRight, SideLeft, SideRight];
}
