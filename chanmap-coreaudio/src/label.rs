// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

/// A CoreAudio channel label (`AudioChannelLabel`).
///
/// The label vocabulary is owned by the platform and grows over time, therefore any `u32` is a
/// valid label. Only the labels required for channel-map negotiation are given names here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelLabel(pub u32);

impl ChannelLabel {
    /// The channel is present but carries no audio.
    pub const UNUSED: ChannelLabel = ChannelLabel(0);
    pub const LEFT: ChannelLabel = ChannelLabel(1);
    pub const RIGHT: ChannelLabel = ChannelLabel(2);
    pub const CENTER: ChannelLabel = ChannelLabel(3);
    pub const LFE_SCREEN: ChannelLabel = ChannelLabel(4);
    pub const LEFT_SURROUND: ChannelLabel = ChannelLabel(5);
    pub const RIGHT_SURROUND: ChannelLabel = ChannelLabel(6);
    pub const LEFT_CENTER: ChannelLabel = ChannelLabel(7);
    pub const RIGHT_CENTER: ChannelLabel = ChannelLabel(8);
    pub const CENTER_SURROUND: ChannelLabel = ChannelLabel(9);
    pub const LEFT_SURROUND_DIRECT: ChannelLabel = ChannelLabel(10);
    pub const RIGHT_SURROUND_DIRECT: ChannelLabel = ChannelLabel(11);
    pub const TOP_CENTER_SURROUND: ChannelLabel = ChannelLabel(12);
    pub const VERTICAL_HEIGHT_LEFT: ChannelLabel = ChannelLabel(13);
    pub const VERTICAL_HEIGHT_CENTER: ChannelLabel = ChannelLabel(14);
    pub const VERTICAL_HEIGHT_RIGHT: ChannelLabel = ChannelLabel(15);
    pub const TOP_BACK_LEFT: ChannelLabel = ChannelLabel(16);
    pub const TOP_BACK_CENTER: ChannelLabel = ChannelLabel(17);
    pub const TOP_BACK_RIGHT: ChannelLabel = ChannelLabel(18);
    pub const REAR_SURROUND_LEFT: ChannelLabel = ChannelLabel(33);
    pub const REAR_SURROUND_RIGHT: ChannelLabel = ChannelLabel(34);
    pub const LEFT_WIDE: ChannelLabel = ChannelLabel(35);
    pub const RIGHT_WIDE: ChannelLabel = ChannelLabel(36);
    pub const LFE2: ChannelLabel = ChannelLabel(37);
    /// Matrix-encoded left total.
    pub const LEFT_TOTAL: ChannelLabel = ChannelLabel(38);
    /// Matrix-encoded right total.
    pub const RIGHT_TOTAL: ChannelLabel = ChannelLabel(39);
    pub const MONO: ChannelLabel = ChannelLabel(42);
    pub const LEFT_TOP_MIDDLE: ChannelLabel = ChannelLabel(49);
    pub const RIGHT_TOP_MIDDLE: ChannelLabel = ChannelLabel(51);
    /// The channel is described by its coordinates rather than a label.
    pub const USE_COORDINATES: ChannelLabel = ChannelLabel(100);
    pub const HEADPHONES_LEFT: ChannelLabel = ChannelLabel(301);
    pub const HEADPHONES_RIGHT: ChannelLabel = ChannelLabel(302);
    /// The first discrete channel. Discrete channel `n` is `DISCRETE_0 | n`.
    pub const DISCRETE_0: ChannelLabel = ChannelLabel(1 << 16);
    /// The channel's label is unknown.
    pub const UNKNOWN: ChannelLabel = ChannelLabel(0xffff_ffff);

    /// Get the label of the discrete channel with the given index.
    pub const fn discrete(index: u16) -> ChannelLabel {
        ChannelLabel(ChannelLabel::DISCRETE_0.0 | index as u32)
    }

    /// If the label is a discrete channel label, get the discrete channel index.
    pub fn discrete_index(&self) -> Option<u16> {
        if self.0 >> 16 == 1 {
            Some(self.0 as u16)
        }
        else {
            None
        }
    }
}

impl From<u32> for ChannelLabel {
    fn from(value: u32) -> Self {
        ChannelLabel(value)
    }
}

impl fmt::Display for ChannelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.discrete_index() {
            Some(idx) => write!(f, "discrete {}", idx),
            None if *self == ChannelLabel::UNKNOWN => write!(f, "unknown"),
            None => write!(f, "{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelLabel;

    #[test]
    fn verify_discrete_labels() {
        assert_eq!(ChannelLabel::discrete(0), ChannelLabel::DISCRETE_0);
        assert_eq!(ChannelLabel::discrete(5).0, 0x1_0005);
        assert_eq!(ChannelLabel::discrete(65535).discrete_index(), Some(65535));

        assert_eq!(ChannelLabel::LEFT.discrete_index(), None);
        assert_eq!(ChannelLabel::UNKNOWN.discrete_index(), None);
        assert_eq!(ChannelLabel(0x2_0000).discrete_index(), None);
    }

    #[test]
    fn verify_display() {
        assert_eq!(ChannelLabel::discrete(3).to_string(), "discrete 3");
        assert_eq!(ChannelLabel::UNKNOWN.to_string(), "unknown");
        assert_eq!(ChannelLabel::LFE2.to_string(), "37");
    }
}
