// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `table` module translates between CoreAudio channel labels and speaker roles.

use std::collections::HashMap;

use chanmap_core::errors::{no_native_equivalent_error, unknown_label_error, Result};
use chanmap_core::role::SpeakerRole;

use lazy_static::lazy_static;

use crate::label::ChannelLabel;

/// Bijective label to role mappings.
const LABEL_TABLE: &[(ChannelLabel, SpeakerRole)] = &[
    (ChannelLabel::LEFT, SpeakerRole::FrontLeft),
    (ChannelLabel::RIGHT, SpeakerRole::FrontRight),
    (ChannelLabel::CENTER, SpeakerRole::FrontCenter),
    (ChannelLabel::LFE_SCREEN, SpeakerRole::Lfe),
    (ChannelLabel::LEFT_SURROUND, SpeakerRole::BackLeft),
    (ChannelLabel::RIGHT_SURROUND, SpeakerRole::BackRight),
    (ChannelLabel::LEFT_CENTER, SpeakerRole::FrontLeftCenter),
    (ChannelLabel::RIGHT_CENTER, SpeakerRole::FrontRightCenter),
    (ChannelLabel::CENTER_SURROUND, SpeakerRole::BackCenter),
    (ChannelLabel::LEFT_SURROUND_DIRECT, SpeakerRole::SideLeft),
    (ChannelLabel::RIGHT_SURROUND_DIRECT, SpeakerRole::SideRight),
    (ChannelLabel::TOP_CENTER_SURROUND, SpeakerRole::TopCenter),
    (ChannelLabel::VERTICAL_HEIGHT_LEFT, SpeakerRole::TopFrontLeft),
    (ChannelLabel::VERTICAL_HEIGHT_CENTER, SpeakerRole::TopFrontCenter),
    (ChannelLabel::VERTICAL_HEIGHT_RIGHT, SpeakerRole::TopFrontRight),
    (ChannelLabel::TOP_BACK_LEFT, SpeakerRole::TopBackLeft),
    (ChannelLabel::TOP_BACK_CENTER, SpeakerRole::TopBackCenter),
    (ChannelLabel::TOP_BACK_RIGHT, SpeakerRole::TopBackRight),
    // Labels outside the channel bitmap.
    (ChannelLabel::REAR_SURROUND_LEFT, SpeakerRole::SurroundDirectLeft),
    (ChannelLabel::REAR_SURROUND_RIGHT, SpeakerRole::SurroundDirectRight),
    (ChannelLabel::LEFT_WIDE, SpeakerRole::WideLeft),
    (ChannelLabel::RIGHT_WIDE, SpeakerRole::WideRight),
    (ChannelLabel::LFE2, SpeakerRole::Lfe2),
    (ChannelLabel::LEFT_TOP_MIDDLE, SpeakerRole::TopSideLeft),
    (ChannelLabel::RIGHT_TOP_MIDDLE, SpeakerRole::TopSideRight),
    (ChannelLabel::HEADPHONES_LEFT, SpeakerRole::DownmixLeft),
    (ChannelLabel::HEADPHONES_RIGHT, SpeakerRole::DownmixRight),
    (ChannelLabel::UNKNOWN, SpeakerRole::Unknown),
];

/// Labels that resolve to a role whose canonical label is a different one.
const LABEL_ALIASES: &[(ChannelLabel, SpeakerRole)] =
    &[(ChannelLabel::MONO, SpeakerRole::FrontCenter)];

lazy_static! {
    static ref LABEL_TO_ROLE: HashMap<ChannelLabel, SpeakerRole> =
        LABEL_TABLE.iter().chain(LABEL_ALIASES).copied().collect();
    static ref ROLE_TO_LABEL: HashMap<SpeakerRole, ChannelLabel> =
        LABEL_TABLE.iter().map(|&(label, role)| (role, label)).collect();
}

/// Get the bijective label to role mappings.
///
/// Discrete labels are not listed since they map algorithmically to
/// [`SpeakerRole::Discrete`].
pub fn entries() -> &'static [(ChannelLabel, SpeakerRole)] {
    LABEL_TABLE
}

/// Get the speaker role of a native channel label.
///
/// Returns [`Error::UnknownLabel`](chanmap_core::errors::Error::UnknownLabel) if the label is not
/// known. The caller decides whether to drop the channel or substitute a placeholder role.
pub fn role_from_label(label: ChannelLabel) -> Result<SpeakerRole> {
    if let Some(idx) = label.discrete_index() {
        return Ok(SpeakerRole::Discrete(idx));
    }

    match LABEL_TO_ROLE.get(&label) {
        Some(&role) => Ok(role),
        None => unknown_label_error(label.0),
    }
}

/// Get the native channel label of a speaker role.
///
/// Returns [`Error::NoNativeEquivalent`](chanmap_core::errors::Error::NoNativeEquivalent) if
/// CoreAudio has no label for the role.
pub fn label_from_role(role: SpeakerRole) -> Result<ChannelLabel> {
    if let SpeakerRole::Discrete(idx) = role {
        return Ok(ChannelLabel::discrete(idx));
    }

    match ROLE_TO_LABEL.get(&role) {
        Some(&label) => Ok(label),
        None => no_native_equivalent_error(role),
    }
}

/// Get the label a role is canonically expressed with, resolving aliases such as `MONO`.
///
/// Labels that are not aliases are returned unchanged.
pub fn canonical_label(label: ChannelLabel) -> ChannelLabel {
    match LABEL_ALIASES.iter().find(|(alias, _)| *alias == label) {
        Some((_, role)) => ROLE_TO_LABEL.get(role).copied().unwrap_or(label),
        None => label,
    }
}

/// Returns `true` if the label is known and names a speaker position.
pub fn is_positional(label: ChannelLabel) -> bool {
    matches!(role_from_label(label), Ok(role) if role.is_positional())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanmap_core::errors::Error;

    #[test]
    fn verify_label_round_trip() {
        for &(label, role) in entries() {
            assert_eq!(role_from_label(label), Ok(role));
            assert_eq!(label_from_role(role_from_label(label).unwrap()), Ok(label));
        }

        for idx in [0, 1, 7, 255, u16::MAX] {
            let label = ChannelLabel::discrete(idx);
            assert_eq!(label_from_role(role_from_label(label).unwrap()), Ok(label));
        }
    }

    #[test]
    fn verify_table_is_bijective() {
        for (i, &(label_a, role_a)) in LABEL_TABLE.iter().enumerate() {
            for &(label_b, role_b) in &LABEL_TABLE[i + 1..] {
                assert_ne!(label_a, label_b);
                assert_ne!(role_a, role_b);
            }
        }
    }

    #[test]
    fn verify_aliases() {
        assert_eq!(role_from_label(ChannelLabel::MONO), Ok(SpeakerRole::FrontCenter));
        assert_eq!(label_from_role(SpeakerRole::FrontCenter), Ok(ChannelLabel::CENTER));
    }

    #[test]
    fn verify_canonical_labels() {
        assert_eq!(canonical_label(ChannelLabel::MONO), ChannelLabel::CENTER);
        assert_eq!(canonical_label(ChannelLabel::CENTER), ChannelLabel::CENTER);
        assert_eq!(canonical_label(ChannelLabel::LEFT_TOTAL), ChannelLabel::LEFT_TOTAL);
        assert_eq!(canonical_label(ChannelLabel::discrete(4)), ChannelLabel::discrete(4));
    }

    #[test]
    fn verify_unknown_labels() {
        for label in [
            ChannelLabel::UNUSED,
            ChannelLabel::LEFT_TOTAL,
            ChannelLabel::USE_COORDINATES,
            ChannelLabel(0x2_0000),
            ChannelLabel(19),
        ] {
            assert_eq!(role_from_label(label), Err(Error::UnknownLabel(label.0)));
            assert!(!is_positional(label));
        }

        assert_eq!(role_from_label(ChannelLabel::UNKNOWN), Ok(SpeakerRole::Unknown));
        assert!(!is_positional(ChannelLabel::UNKNOWN));
        assert!(!is_positional(ChannelLabel::discrete(0)));
        assert!(is_positional(ChannelLabel::LEFT_WIDE));
    }

    #[test]
    fn verify_no_native_equivalent() {
        for role in [
            SpeakerRole::BottomFrontCenter,
            SpeakerRole::BottomFrontLeft,
            SpeakerRole::BottomFrontRight,
        ] {
            assert_eq!(label_from_role(role), Err(Error::NoNativeEquivalent(role)));
        }

        // Every other positional role has a native label.
        for role in &SpeakerRole::POSITIONAL[..25] {
            assert!(label_from_role(*role).is_ok(), "{}", role);
        }
        for role in &SpeakerRole::POSITIONAL[28..] {
            assert!(label_from_role(*role).is_ok(), "{}", role);
        }
    }
}
