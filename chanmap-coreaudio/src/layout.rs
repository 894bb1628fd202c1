// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use chanmap_core::errors::{layout_unavailable_error, unsupported_tag_error, Result};
use smallvec::SmallVec;

use crate::bitmap::ChannelBitmap;
use crate::label::ChannelLabel;
use crate::tag::LayoutTag;

/// An ordered list of native channel labels, one per channel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutDescriptor {
    labels: SmallVec<[ChannelLabel; 8]>,
}

impl LayoutDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        LayoutDescriptor { labels: SmallVec::new() }
    }

    /// Create a descriptor from a slice of labels.
    pub fn from_labels(labels: &[ChannelLabel]) -> Self {
        LayoutDescriptor { labels: SmallVec::from_slice(labels) }
    }

    /// Create a descriptor of `count` discrete channels in order.
    pub fn discrete(count: u16) -> Self {
        (0..count).map(ChannelLabel::discrete).collect()
    }

    /// Get the number of channels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if the descriptor has no channels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Get the labels as a slice.
    pub fn labels(&self) -> &[ChannelLabel] {
        &self.labels
    }

    /// Get an iterator over the labels in channel order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelLabel> + '_ {
        self.labels.iter()
    }
}

impl From<Vec<ChannelLabel>> for LayoutDescriptor {
    fn from(labels: Vec<ChannelLabel>) -> Self {
        LayoutDescriptor { labels: SmallVec::from_vec(labels) }
    }
}

impl FromIterator<ChannelLabel> for LayoutDescriptor {
    fn from_iter<I: IntoIterator<Item = ChannelLabel>>(iter: I) -> Self {
        LayoutDescriptor { labels: iter.into_iter().collect() }
    }
}

impl fmt::Display for LayoutDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.labels.iter().map(|label| label.to_string()).collect::<Vec<_>>().join(",");

        write!(f, "[{}]", list)
    }
}

/// The description of a single channel of a channel layout (`AudioChannelDescription`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelDescription {
    /// The channel label.
    pub label: ChannelLabel,
    /// Flags describing the coordinate system of `coordinates`.
    pub flags: u32,
    /// Speaker coordinates. Only meaningful for [`ChannelLabel::USE_COORDINATES`].
    pub coordinates: [f32; 3],
}

impl ChannelDescription {
    /// Create a channel description with a label and no coordinates.
    pub fn new(label: ChannelLabel) -> Self {
        ChannelDescription { label, flags: 0, coordinates: [0.0; 3] }
    }
}

/// A CoreAudio channel layout (`AudioChannelLayout`) as reported by a device.
///
/// The layout is described by exactly one of its fields, as selected by the tag:
///
///  * [`LayoutTag::USE_CHANNEL_DESCRIPTIONS`] selects `descriptions`,
///  * [`LayoutTag::USE_CHANNEL_BITMAP`] selects `bitmap`,
///  * any other tag describes the layout by itself.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioChannelLayout {
    /// The layout tag.
    pub tag: LayoutTag,
    /// The channel bitmap. Only meaningful for [`LayoutTag::USE_CHANNEL_BITMAP`].
    pub bitmap: ChannelBitmap,
    /// The per-channel descriptions. Only meaningful for
    /// [`LayoutTag::USE_CHANNEL_DESCRIPTIONS`].
    pub descriptions: Vec<ChannelDescription>,
}

impl AudioChannelLayout {
    /// Create a layout described by a layout tag.
    pub fn from_tag(tag: LayoutTag) -> Self {
        AudioChannelLayout { tag, bitmap: ChannelBitmap::empty(), descriptions: Vec::new() }
    }

    /// Create a layout described by a channel bitmap.
    pub fn from_bitmap(bitmap: ChannelBitmap) -> Self {
        AudioChannelLayout { tag: LayoutTag::USE_CHANNEL_BITMAP, bitmap, descriptions: Vec::new() }
    }

    /// Create a layout described by a list of channel labels.
    pub fn from_labels(labels: &[ChannelLabel]) -> Self {
        AudioChannelLayout {
            tag: LayoutTag::USE_CHANNEL_DESCRIPTIONS,
            bitmap: ChannelBitmap::empty(),
            descriptions: labels.iter().map(|&label| ChannelDescription::new(label)).collect(),
        }
    }

    /// Resolve the layout into a descriptor with one label per channel.
    ///
    /// Standard layout tags are expanded to their channel order. Returns an error if the layout is
    /// empty or its tag is not known.
    pub fn descriptor(&self) -> Result<LayoutDescriptor> {
        let descriptor = match self.tag {
            LayoutTag::USE_CHANNEL_DESCRIPTIONS => {
                self.descriptions.iter().map(|desc| desc.label).collect()
            }
            LayoutTag::USE_CHANNEL_BITMAP => self.bitmap.labels().collect(),
            tag if tag.is_discrete_in_order() => LayoutDescriptor::discrete(tag.0 as u16),
            tag if tag.is_unknown() => {
                LayoutDescriptor::from(vec![ChannelLabel::UNKNOWN; tag.channel_count()])
            }
            tag => match tag.labels() {
                Some(labels) => LayoutDescriptor::from_labels(labels),
                None => return unsupported_tag_error(tag.0),
            },
        };

        if descriptor.is_empty() {
            return layout_unavailable_error("layout has no channels");
        }

        Ok(descriptor)
    }
}
