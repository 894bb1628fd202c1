// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `builder` module converts layout descriptors to channel maps, and back.

use chanmap_core::errors::Result;
use chanmap_core::map::ChannelMap;
use chanmap_core::role::SpeakerRole;

use log::warn;

use crate::catalog::LayoutCatalog;
use crate::layout::{AudioChannelLayout, LayoutDescriptor};
use crate::negotiate::Warning;
use crate::table::{label_from_role, role_from_label};

/// Build a channel map from a layout descriptor.
///
/// The map has exactly one role per label, in the same order. Labels that are not recognized are
/// replaced with [`SpeakerRole::Unknown`] so that a single odd channel does not void the map.
pub fn build_map(descriptor: &LayoutDescriptor) -> ChannelMap {
    build_map_with_warnings(descriptor, &mut Vec::new())
}

/// Build a channel map from a layout descriptor, recording every degradation in `warnings`.
pub fn build_map_with_warnings(
    descriptor: &LayoutDescriptor,
    warnings: &mut Vec<Warning>,
) -> ChannelMap {
    let map = descriptor
        .iter()
        .enumerate()
        .map(|(index, &label)| match role_from_label(label) {
            Ok(role) => role,
            Err(err) => {
                warn!("channel {}: {}, using placeholder role", index, err);
                warnings.push(Warning::UnknownLabel { index, label });
                SpeakerRole::Unknown
            }
        })
        .collect::<ChannelMap>();

    // Degenerate layouts are kept, the channel order must still match the device.
    for (index, role) in map.duplicates() {
        warn!("channel {}: speaker role {} repeated in {}", index, role, map);
        warnings.push(Warning::DuplicateRole { index, role });
    }

    map
}

/// Build a layout descriptor from a channel map.
///
/// Fails with [`Error::NoNativeEquivalent`](chanmap_core::errors::Error::NoNativeEquivalent) if
/// any role of the map cannot be expressed with a native label.
pub fn build_descriptor(map: &ChannelMap) -> Result<LayoutDescriptor> {
    map.iter().map(|&role| label_from_role(role)).collect()
}

/// Build the native layout to request from a device for a channel map.
///
/// If a catalog entry has exactly the channel order of the map, the layout is described by that
/// entry's tag. Otherwise, it is described channel-by-channel.
pub fn native_layout_for_map(
    map: &ChannelMap,
    catalog: &LayoutCatalog<'_>,
) -> Result<AudioChannelLayout> {
    let descriptor = build_descriptor(map)?;

    let layout = match catalog.find(&descriptor) {
        Some(entry) if entry.has_order(descriptor.labels()) => {
            AudioChannelLayout::from_tag(entry.tag)
        }
        _ => AudioChannelLayout::from_labels(descriptor.labels()),
    };

    Ok(layout)
}
