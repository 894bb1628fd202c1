// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use bitflags::bitflags;

use crate::label::ChannelLabel;

bitflags! {
    /// A CoreAudio channel bitmap (`AudioChannelBitmap`).
    ///
    /// Bit `n` of the bitmap corresponds to the channel label `n + 1`. Channels of a bitmap layout
    /// are ordered by ascending bit.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ChannelBitmap: u32 {
        const LEFT                   = 1 << 0;
        const RIGHT                  = 1 << 1;
        const CENTER                 = 1 << 2;
        const LFE_SCREEN             = 1 << 3;
        const LEFT_SURROUND          = 1 << 4;
        const RIGHT_SURROUND         = 1 << 5;
        const LEFT_CENTER            = 1 << 6;
        const RIGHT_CENTER           = 1 << 7;
        const CENTER_SURROUND        = 1 << 8;
        const LEFT_SURROUND_DIRECT   = 1 << 9;
        const RIGHT_SURROUND_DIRECT  = 1 << 10;
        const TOP_CENTER_SURROUND    = 1 << 11;
        const VERTICAL_HEIGHT_LEFT   = 1 << 12;
        const VERTICAL_HEIGHT_CENTER = 1 << 13;
        const VERTICAL_HEIGHT_RIGHT  = 1 << 14;
        const TOP_BACK_LEFT          = 1 << 15;
        const TOP_BACK_CENTER        = 1 << 16;
        const TOP_BACK_RIGHT         = 1 << 17;
    }
}

impl ChannelBitmap {
    /// The number of labels representable by a bitmap.
    const NUM_BITS: u32 = 18;

    /// Get the bitmap bit for a channel label, if the label is representable by a bitmap.
    pub fn from_label(label: ChannelLabel) -> Option<ChannelBitmap> {
        match label.0 {
            1..=ChannelBitmap::NUM_BITS => ChannelBitmap::from_bits(1 << (label.0 - 1)),
            _ => None,
        }
    }

    /// Get the channel count.
    pub fn count(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Get an iterator over the channel labels of the bitmap in channel order.
    pub fn labels(&self) -> impl Iterator<Item = ChannelLabel> + '_ {
        self.iter().map(|bit| ChannelLabel(bit.bits().trailing_zeros() + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::ChannelBitmap;
    use crate::label::ChannelLabel;

    #[test]
    fn verify_bitmap_labels() {
        let bitmap = ChannelBitmap::LFE_SCREEN
            | ChannelBitmap::RIGHT
            | ChannelBitmap::LEFT
            | ChannelBitmap::TOP_BACK_RIGHT;

        assert_eq!(bitmap.count(), 4);
        assert_eq!(
            bitmap.labels().collect::<Vec<_>>(),
            vec![
                ChannelLabel::LEFT,
                ChannelLabel::RIGHT,
                ChannelLabel::LFE_SCREEN,
                ChannelLabel::TOP_BACK_RIGHT
            ]
        );
    }

    #[test]
    fn verify_from_label() {
        assert_eq!(ChannelBitmap::from_label(ChannelLabel::LEFT), Some(ChannelBitmap::LEFT));
        assert_eq!(
            ChannelBitmap::from_label(ChannelLabel::TOP_BACK_RIGHT),
            Some(ChannelBitmap::TOP_BACK_RIGHT)
        );
        assert_eq!(ChannelBitmap::from_label(ChannelLabel::UNUSED), None);
        assert_eq!(ChannelBitmap::from_label(ChannelLabel::LEFT_WIDE), None);
        assert_eq!(ChannelBitmap::from_label(ChannelLabel::UNKNOWN), None);

        for bit in 1..=18 {
            let label = ChannelLabel(bit);
            let bitmap = ChannelBitmap::from_label(label).unwrap();
            assert_eq!(bitmap.labels().collect::<Vec<_>>(), vec![label]);
        }
    }
}
