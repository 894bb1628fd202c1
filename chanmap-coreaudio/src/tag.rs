// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::label::ChannelLabel;

/// A CoreAudio channel layout tag (`AudioChannelLayoutTag`).
///
/// The upper 16 bits identify the layout and the lower 16 bits hold its channel count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutTag(pub u32);

macro_rules! tag {
    ($id:expr, $count:expr) => {
        LayoutTag(($id << 16) | $count)
    };
}

impl LayoutTag {
    /// The layout is described by its channel descriptions.
    pub const USE_CHANNEL_DESCRIPTIONS: LayoutTag = LayoutTag(0);
    /// The layout is described by its channel bitmap.
    pub const USE_CHANNEL_BITMAP: LayoutTag = tag!(1, 0);

    pub const MONO: LayoutTag = tag!(100, 1);
    pub const STEREO: LayoutTag = tag!(101, 2);
    pub const STEREO_HEADPHONES: LayoutTag = tag!(102, 2);
    pub const QUADRAPHONIC: LayoutTag = tag!(108, 4);
    pub const PENTAGONAL: LayoutTag = tag!(109, 5);
    pub const HEXAGONAL: LayoutTag = tag!(110, 6);
    pub const OCTAGONAL: LayoutTag = tag!(111, 8);
    pub const MPEG_3_0_A: LayoutTag = tag!(113, 3);
    pub const MPEG_3_0_B: LayoutTag = tag!(114, 3);
    pub const MPEG_4_0_A: LayoutTag = tag!(115, 4);
    pub const MPEG_4_0_B: LayoutTag = tag!(116, 4);
    pub const MPEG_5_0_A: LayoutTag = tag!(117, 5);
    pub const MPEG_5_0_B: LayoutTag = tag!(118, 5);
    pub const MPEG_5_0_C: LayoutTag = tag!(119, 5);
    pub const MPEG_5_0_D: LayoutTag = tag!(120, 5);
    pub const MPEG_5_1_A: LayoutTag = tag!(121, 6);
    pub const MPEG_5_1_B: LayoutTag = tag!(122, 6);
    pub const MPEG_5_1_C: LayoutTag = tag!(123, 6);
    pub const MPEG_5_1_D: LayoutTag = tag!(124, 6);
    pub const MPEG_6_1_A: LayoutTag = tag!(125, 7);
    pub const MPEG_7_1_A: LayoutTag = tag!(126, 8);
    pub const MPEG_7_1_B: LayoutTag = tag!(127, 8);
    pub const MPEG_7_1_C: LayoutTag = tag!(128, 8);
    pub const EMAGIC_DEFAULT_7_1: LayoutTag = tag!(129, 8);
    pub const ITU_2_1: LayoutTag = tag!(131, 3);
    pub const ITU_2_2: LayoutTag = tag!(132, 4);
    pub const DVD_4: LayoutTag = tag!(133, 3);
    pub const DVD_5: LayoutTag = tag!(134, 4);
    pub const DVD_6: LayoutTag = tag!(135, 5);
    pub const DVD_10: LayoutTag = tag!(136, 4);
    pub const DVD_11: LayoutTag = tag!(137, 5);
    pub const DVD_18: LayoutTag = tag!(138, 5);
    pub const AUDIO_UNIT_6_0: LayoutTag = tag!(139, 6);
    pub const AUDIO_UNIT_7_0: LayoutTag = tag!(140, 7);
    pub const AAC_6_0: LayoutTag = tag!(141, 6);
    pub const AAC_6_1: LayoutTag = tag!(142, 7);
    pub const AAC_7_0: LayoutTag = tag!(143, 7);
    pub const AAC_OCTAGONAL: LayoutTag = tag!(144, 8);
    pub const AUDIO_UNIT_7_0_FRONT: LayoutTag = tag!(148, 7);
    pub const AAC_7_1_B: LayoutTag = tag!(183, 8);

    /// Discrete channels in order. The lower 16 bits hold the channel count.
    pub const DISCRETE_IN_ORDER: LayoutTag = tag!(147, 0);
    /// A layout of unknown channels. The lower 16 bits hold the channel count.
    pub const UNKNOWN: LayoutTag = tag!(0xffff, 0);

    /// Create a discrete-in-order layout tag for `count` channels.
    pub const fn discrete_in_order(count: u16) -> LayoutTag {
        LayoutTag(LayoutTag::DISCRETE_IN_ORDER.0 | count as u32)
    }

    /// Create an unknown layout tag for `count` channels.
    pub const fn unknown(count: u16) -> LayoutTag {
        LayoutTag(LayoutTag::UNKNOWN.0 | count as u32)
    }

    /// Get the layout identifier (the upper 16 bits of the tag).
    pub fn id(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Get the channel count encoded in the tag.
    pub fn channel_count(&self) -> usize {
        usize::from(self.0 as u16)
    }

    /// Returns `true` if the tag is a discrete-in-order layout tag.
    pub fn is_discrete_in_order(&self) -> bool {
        self.id() == LayoutTag::DISCRETE_IN_ORDER.id()
    }

    /// Returns `true` if the tag is an unknown layout tag.
    pub fn is_unknown(&self) -> bool {
        self.id() == LayoutTag::UNKNOWN.id()
    }

    /// Get the channel labels of a standard layout tag, in channel order.
    ///
    /// Returns `None` for tags that do not name a fixed layout. This includes the
    /// self-describing, discrete-in-order, and unknown tags.
    pub fn labels(&self) -> Option<&'static [ChannelLabel]> {
        TAG_LAYOUTS.iter().find(|(tag, _)| tag == self).map(|&(_, labels)| labels)
    }
}

/// Channel orders of the standard layout tags.
const TAG_LAYOUTS: &[(LayoutTag, &[ChannelLabel])] = &[
    (LayoutTag::MONO, layouts::MONO),
    (LayoutTag::STEREO, layouts::STEREO),
    (LayoutTag::STEREO_HEADPHONES, layouts::STEREO_HEADPHONES),
    (LayoutTag::QUADRAPHONIC, layouts::QUADRAPHONIC),
    (LayoutTag::PENTAGONAL, layouts::PENTAGONAL),
    (LayoutTag::HEXAGONAL, layouts::HEXAGONAL),
    (LayoutTag::OCTAGONAL, layouts::OCTAGONAL),
    (LayoutTag::MPEG_3_0_A, layouts::MPEG_3_0_A),
    (LayoutTag::MPEG_3_0_B, layouts::MPEG_3_0_B),
    (LayoutTag::MPEG_4_0_A, layouts::MPEG_4_0_A),
    (LayoutTag::MPEG_4_0_B, layouts::MPEG_4_0_B),
    (LayoutTag::MPEG_5_0_A, layouts::MPEG_5_0_A),
    (LayoutTag::MPEG_5_0_B, layouts::MPEG_5_0_B),
    (LayoutTag::MPEG_5_0_C, layouts::MPEG_5_0_C),
    (LayoutTag::MPEG_5_0_D, layouts::MPEG_5_0_D),
    (LayoutTag::MPEG_5_1_A, layouts::MPEG_5_1_A),
    (LayoutTag::MPEG_5_1_B, layouts::MPEG_5_1_B),
    (LayoutTag::MPEG_5_1_C, layouts::MPEG_5_1_C),
    (LayoutTag::MPEG_5_1_D, layouts::MPEG_5_1_D),
    (LayoutTag::MPEG_6_1_A, layouts::MPEG_6_1_A),
    (LayoutTag::MPEG_7_1_A, layouts::MPEG_7_1_A),
    (LayoutTag::MPEG_7_1_B, layouts::MPEG_7_1_B),
    (LayoutTag::MPEG_7_1_C, layouts::MPEG_7_1_C),
    (LayoutTag::EMAGIC_DEFAULT_7_1, layouts::EMAGIC_DEFAULT_7_1),
    (LayoutTag::ITU_2_1, layouts::ITU_2_1),
    (LayoutTag::ITU_2_2, layouts::ITU_2_2),
    (LayoutTag::DVD_4, layouts::DVD_4),
    (LayoutTag::DVD_5, layouts::DVD_5),
    (LayoutTag::DVD_6, layouts::DVD_6),
    (LayoutTag::DVD_10, layouts::DVD_10),
    (LayoutTag::DVD_11, layouts::DVD_11),
    (LayoutTag::DVD_18, layouts::DVD_18),
    (LayoutTag::AUDIO_UNIT_6_0, layouts::AUDIO_UNIT_6_0),
    (LayoutTag::AUDIO_UNIT_7_0, layouts::AUDIO_UNIT_7_0),
    (LayoutTag::AUDIO_UNIT_7_0_FRONT, layouts::AUDIO_UNIT_7_0_FRONT),
    (LayoutTag::AAC_6_0, layouts::AAC_6_0),
    (LayoutTag::AAC_6_1, layouts::AAC_6_1),
    (LayoutTag::AAC_7_0, layouts::AAC_7_0),
    (LayoutTag::AAC_OCTAGONAL, layouts::AAC_OCTAGONAL),
    (LayoutTag::AAC_7_1_B, layouts::AAC_7_1_B),
];

pub mod layouts {
    //! Channel orders of the CoreAudio standard layout tags.
    //!
    //! Many tags only differ in the order of their channels. Each constant lists the labels in the
    //! order the channels appear in an audio frame.
    use crate::label::ChannelLabel;

    const L: ChannelLabel = ChannelLabel::LEFT;
    const R: ChannelLabel = ChannelLabel::RIGHT;
    const C: ChannelLabel = ChannelLabel::CENTER;
    const LFE: ChannelLabel = ChannelLabel::LFE_SCREEN;
    const LS: ChannelLabel = ChannelLabel::LEFT_SURROUND;
    const RS: ChannelLabel = ChannelLabel::RIGHT_SURROUND;
    const LC: ChannelLabel = ChannelLabel::LEFT_CENTER;
    const RC: ChannelLabel = ChannelLabel::RIGHT_CENTER;
    const CS: ChannelLabel = ChannelLabel::CENTER_SURROUND;
    const RLS: ChannelLabel = ChannelLabel::REAR_SURROUND_LEFT;
    const RRS: ChannelLabel = ChannelLabel::REAR_SURROUND_RIGHT;
    const LW: ChannelLabel = ChannelLabel::LEFT_WIDE;
    const RW: ChannelLabel = ChannelLabel::RIGHT_WIDE;

    pub const MONO: &[ChannelLabel] = &[ChannelLabel::MONO];
    pub const STEREO: &[ChannelLabel] = &[L, R];
    pub const STEREO_HEADPHONES: &[ChannelLabel] =
        &[ChannelLabel::HEADPHONES_LEFT, ChannelLabel::HEADPHONES_RIGHT];
    pub const QUADRAPHONIC: &[ChannelLabel] = &[L, R, LS, RS];
    pub const PENTAGONAL: &[ChannelLabel] = &[L, R, LS, RS, C];
    pub const HEXAGONAL: &[ChannelLabel] = &[L, R, LS, RS, C, CS];
    pub const OCTAGONAL: &[ChannelLabel] = &[L, R, LS, RS, C, CS, LW, RW];
    pub const MPEG_3_0_A: &[ChannelLabel] = &[L, R, C];
    pub const MPEG_3_0_B: &[ChannelLabel] = &[C, L, R];
    pub const MPEG_4_0_A: &[ChannelLabel] = &[L, R, C, CS];
    pub const MPEG_4_0_B: &[ChannelLabel] = &[C, L, R, CS];
    pub const MPEG_5_0_A: &[ChannelLabel] = &[L, R, C, LS, RS];
    pub const MPEG_5_0_B: &[ChannelLabel] = &[L, R, LS, RS, C];
    pub const MPEG_5_0_C: &[ChannelLabel] = &[L, C, R, LS, RS];
    pub const MPEG_5_0_D: &[ChannelLabel] = &[C, L, R, LS, RS];
    pub const MPEG_5_1_A: &[ChannelLabel] = &[L, R, C, LFE, LS, RS];
    pub const MPEG_5_1_B: &[ChannelLabel] = &[L, R, LS, RS, C, LFE];
    pub const MPEG_5_1_C: &[ChannelLabel] = &[L, C, R, LS, RS, LFE];
    pub const MPEG_5_1_D: &[ChannelLabel] = &[C, L, R, LS, RS, LFE];
    pub const MPEG_6_1_A: &[ChannelLabel] = &[L, R, C, LFE, LS, RS, CS];
    pub const MPEG_7_1_A: &[ChannelLabel] = &[L, R, C, LFE, LS, RS, LC, RC];
    pub const MPEG_7_1_B: &[ChannelLabel] = &[C, LC, RC, L, R, LS, RS, LFE];
    pub const MPEG_7_1_C: &[ChannelLabel] = &[L, R, C, LFE, LS, RS, RLS, RRS];
    pub const EMAGIC_DEFAULT_7_1: &[ChannelLabel] = &[L, R, LS, RS, C, LFE, LC, RC];
    pub const ITU_2_1: &[ChannelLabel] = &[L, R, CS];
    pub const ITU_2_2: &[ChannelLabel] = &[L, R, LS, RS];
    pub const DVD_4: &[ChannelLabel] = &[L, R, LFE];
    pub const DVD_5: &[ChannelLabel] = &[L, R, LFE, CS];
    pub const DVD_6: &[ChannelLabel] = &[L, R, LFE, LS, RS];
    pub const DVD_10: &[ChannelLabel] = &[L, R, C, LFE];
    pub const DVD_11: &[ChannelLabel] = &[L, R, C, LFE, CS];
    pub const DVD_18: &[ChannelLabel] = &[L, R, LS, RS, LFE];
    pub const AUDIO_UNIT_6_0: &[ChannelLabel] = &[L, R, LS, RS, C, CS];
    pub const AUDIO_UNIT_7_0: &[ChannelLabel] = &[L, R, LS, RS, C, RLS, RRS];
    pub const AUDIO_UNIT_7_0_FRONT: &[ChannelLabel] = &[L, R, LS, RS, C, LC, RC];
    pub const AAC_6_0: &[ChannelLabel] = &[C, L, R, LS, RS, CS];
    pub const AAC_6_1: &[ChannelLabel] = &[C, L, R, LS, RS, CS, LFE];
    pub const AAC_7_0: &[ChannelLabel] = &[C, L, R, LS, RS, RLS, RRS];
    pub const AAC_OCTAGONAL: &[ChannelLabel] = &[C, L, R, LS, RS, RLS, RRS, CS];
    pub const AAC_7_1_B: &[ChannelLabel] = &[C, L, R, LS, RS, RLS, RRS, LFE];

    const D0: ChannelLabel = ChannelLabel::discrete(0);
    const D1: ChannelLabel = ChannelLabel::discrete(1);
    const D2: ChannelLabel = ChannelLabel::discrete(2);
    const D3: ChannelLabel = ChannelLabel::discrete(3);
    const D4: ChannelLabel = ChannelLabel::discrete(4);
    const D5: ChannelLabel = ChannelLabel::discrete(5);
    const D6: ChannelLabel = ChannelLabel::discrete(6);
    const D7: ChannelLabel = ChannelLabel::discrete(7);

    // Channel orders for the discrete-in-order entries of the standard catalog.
    pub const DISCRETE_1: &[ChannelLabel] = &[D0];
    pub const DISCRETE_2: &[ChannelLabel] = &[D0, D1];
    pub const DISCRETE_3: &[ChannelLabel] = &[D0, D1, D2];
    pub const DISCRETE_4: &[ChannelLabel] = &[D0, D1, D2, D3];
    pub const DISCRETE_5: &[ChannelLabel] = &[D0, D1, D2, D3, D4];
    pub const DISCRETE_6: &[ChannelLabel] = &[D0, D1, D2, D3, D4, D5];
    pub const DISCRETE_7: &[ChannelLabel] = &[D0, D1, D2, D3, D4, D5, D6];
    pub const DISCRETE_8: &[ChannelLabel] = &[D0, D1, D2, D3, D4, D5, D6, D7];
}

impl fmt::Display for LayoutTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<<16|{}", self.id(), self.channel_count())
    }
}
