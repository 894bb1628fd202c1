// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layout dumps for diagnostics.

use log::{log, log_enabled, Level};

use crate::layout::{AudioChannelLayout, LayoutDescriptor};
use crate::table::role_from_label;

/// Log the raw contents of a layout at `level`.
pub fn log_layout(level: Level, layout: &AudioChannelLayout) {
    if !log_enabled!(level) {
        return;
    }

    log!(
        level,
        "layout: tag: {}, bitmap: {:#x}, descriptions: {}",
        layout.tag,
        layout.bitmap.bits(),
        layout.descriptions.len(),
    );

    for (i, desc) in layout.descriptions.iter().enumerate() {
        let [x, y, z] = desc.coordinates;

        log!(
            level,
            "  #{}: label: {}, flags: {:#x}, coordinates: {}, {}, {}",
            i,
            desc.label,
            desc.flags,
            x,
            y,
            z
        );
    }
}

/// Log a resolved layout at `level`, one channel per line with the role its label maps to.
pub fn log_descriptor(level: Level, descriptor: &LayoutDescriptor) {
    if !log_enabled!(level) {
        return;
    }

    log!(level, "descriptor: {} channels", descriptor.len());

    for (i, &label) in descriptor.iter().enumerate() {
        match role_from_label(label) {
            Ok(role) => log!(level, "  #{}: {} => {}", i, label, role),
            Err(err) => log!(level, "  #{}: {} => {}", i, label, err),
        }
    }
}
