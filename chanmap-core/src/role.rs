// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::str::FromStr;

use crate::errors::{invalid_configuration_error, Error};

/// The semantic position of a single audio channel.
///
/// Speaker roles are independent of any platform's channel label vocabulary and are used as the
/// common language of a [`ChannelMap`](crate::map::ChannelMap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpeakerRole {
    /// Front-left (left) channel.
    FrontLeft,
    /// Front-right (right) channel.
    FrontRight,
    /// Front-center (center) channel. Mono audio is carried on this channel.
    FrontCenter,
    /// Low-frequency effects channel.
    Lfe,
    /// Back-left channel.
    ///
    /// Apple calls this channel "left surround".
    BackLeft,
    /// Back-right channel.
    ///
    /// Apple calls this channel "right surround".
    BackRight,
    /// Front left-of-center channel.
    FrontLeftCenter,
    /// Front right-of-center channel.
    FrontRightCenter,
    /// Back-center channel.
    ///
    /// Apple calls this channel "center surround".
    BackCenter,
    /// Side-left channel.
    ///
    /// Apple calls this channel "left surround direct".
    SideLeft,
    /// Side-right channel.
    ///
    /// Apple calls this channel "right surround direct".
    SideRight,
    /// Top-center channel.
    TopCenter,
    /// Top-front left channel.
    ///
    /// Apple calls this channel "vertical height left".
    TopFrontLeft,
    /// Top-front center channel.
    TopFrontCenter,
    /// Top-front right channel.
    TopFrontRight,
    /// Top-back left channel.
    TopBackLeft,
    /// Top-back center channel.
    TopBackCenter,
    /// Top-back right channel.
    TopBackRight,
    /// Surround-direct left channel.
    ///
    /// Apple calls this channel "rear surround left".
    SurroundDirectLeft,
    /// Surround-direct right channel.
    ///
    /// Apple calls this channel "rear surround right".
    SurroundDirectRight,
    /// Front-left wide channel.
    WideLeft,
    /// Front-right wide channel.
    WideRight,
    /// Low-frequency effects channel 2.
    Lfe2,
    /// Top-side left channel.
    TopSideLeft,
    /// Top-side right channel.
    TopSideRight,
    /// Bottom-front center channel.
    BottomFrontCenter,
    /// Bottom-front left channel.
    BottomFrontLeft,
    /// Bottom-front right channel.
    BottomFrontRight,
    /// Stereo downmix left channel.
    ///
    /// Apple calls this channel "headphones left".
    DownmixLeft,
    /// Stereo downmix right channel.
    ///
    /// Apple calls this channel "headphones right".
    DownmixRight,
    /// A discrete and independent channel with no speaker position.
    Discrete(u16),
    /// The channel's role could not be determined.
    Unknown,
}

impl SpeakerRole {
    /// All roles that describe a speaker position, in canonical order.
    pub const POSITIONAL: [SpeakerRole; 30] = [
        SpeakerRole::FrontLeft,
        SpeakerRole::FrontRight,
        SpeakerRole::FrontCenter,
        SpeakerRole::Lfe,
        SpeakerRole::BackLeft,
        SpeakerRole::BackRight,
        SpeakerRole::FrontLeftCenter,
        SpeakerRole::FrontRightCenter,
        SpeakerRole::BackCenter,
        SpeakerRole::SideLeft,
        SpeakerRole::SideRight,
        SpeakerRole::TopCenter,
        SpeakerRole::TopFrontLeft,
        SpeakerRole::TopFrontCenter,
        SpeakerRole::TopFrontRight,
        SpeakerRole::TopBackLeft,
        SpeakerRole::TopBackCenter,
        SpeakerRole::TopBackRight,
        SpeakerRole::SurroundDirectLeft,
        SpeakerRole::SurroundDirectRight,
        SpeakerRole::WideLeft,
        SpeakerRole::WideRight,
        SpeakerRole::Lfe2,
        SpeakerRole::TopSideLeft,
        SpeakerRole::TopSideRight,
        SpeakerRole::BottomFrontCenter,
        SpeakerRole::BottomFrontLeft,
        SpeakerRole::BottomFrontRight,
        SpeakerRole::DownmixLeft,
        SpeakerRole::DownmixRight,
    ];

    /// Returns `true` if the role names a speaker position.
    pub fn is_positional(&self) -> bool {
        !matches!(self, SpeakerRole::Discrete(_) | SpeakerRole::Unknown)
    }

    /// Get the short name of a positional role, or `None` for discrete and unknown roles.
    pub fn short_name(&self) -> Option<&'static str> {
        let name = match self {
            SpeakerRole::FrontLeft => "FL",
            SpeakerRole::FrontRight => "FR",
            SpeakerRole::FrontCenter => "FC",
            SpeakerRole::Lfe => "LFE",
            SpeakerRole::BackLeft => "BL",
            SpeakerRole::BackRight => "BR",
            SpeakerRole::FrontLeftCenter => "FLC",
            SpeakerRole::FrontRightCenter => "FRC",
            SpeakerRole::BackCenter => "BC",
            SpeakerRole::SideLeft => "SL",
            SpeakerRole::SideRight => "SR",
            SpeakerRole::TopCenter => "TC",
            SpeakerRole::TopFrontLeft => "TFL",
            SpeakerRole::TopFrontCenter => "TFC",
            SpeakerRole::TopFrontRight => "TFR",
            SpeakerRole::TopBackLeft => "TBL",
            SpeakerRole::TopBackCenter => "TBC",
            SpeakerRole::TopBackRight => "TBR",
            SpeakerRole::SurroundDirectLeft => "SDL",
            SpeakerRole::SurroundDirectRight => "SDR",
            SpeakerRole::WideLeft => "WL",
            SpeakerRole::WideRight => "WR",
            SpeakerRole::Lfe2 => "LFE2",
            SpeakerRole::TopSideLeft => "TSL",
            SpeakerRole::TopSideRight => "TSR",
            SpeakerRole::BottomFrontCenter => "BFC",
            SpeakerRole::BottomFrontLeft => "BFL",
            SpeakerRole::BottomFrontRight => "BFR",
            SpeakerRole::DownmixLeft => "DL",
            SpeakerRole::DownmixRight => "DR",
            SpeakerRole::Discrete(_) | SpeakerRole::Unknown => return None,
        };

        Some(name)
    }
}

impl fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerRole::Discrete(idx) => write!(f, "D{}", idx),
            SpeakerRole::Unknown => write!(f, "NA"),
            positional => f.write_str(positional.short_name().unwrap_or("???")),
        }
    }
}

impl FromStr for SpeakerRole {
    type Err = Error;

    /// Parses the short name produced by `Display`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();

        if upper == "NA" {
            return Ok(SpeakerRole::Unknown);
        }

        if let Some(idx) = upper.strip_prefix('D').and_then(|rest| rest.parse::<u16>().ok()) {
            return Ok(SpeakerRole::Discrete(idx));
        }

        SpeakerRole::POSITIONAL
            .iter()
            .find(|role| role.short_name() == Some(upper.as_str()))
            .copied()
            .map_or_else(|| invalid_configuration_error("unknown speaker role name"), Ok)
    }
}
