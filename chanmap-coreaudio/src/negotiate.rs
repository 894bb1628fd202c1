// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `negotiate` module derives the active channel map of a device.
//!
//! Negotiation never fails because of the device. Missing, unusable, or mismatched layout
//! metadata degrades the result, down to a synthesized default map, and every degradation is
//! reported as a [`Warning`] alongside the map.

use std::fmt;
use std::mem;

use chanmap_core::errors::{invalid_configuration_error, layout_unavailable_error, Error, Result};
use chanmap_core::map::ChannelMap;
use chanmap_core::role::SpeakerRole;

use log::{debug, info, warn, Level};

use crate::builder::build_map_with_warnings;
use crate::catalog::LayoutCatalog;
use crate::diag::log_layout;
use crate::label::ChannelLabel;
use crate::layout::{AudioChannelLayout, LayoutDescriptor};
use crate::table::label_from_role;
use crate::tag::LayoutTag;

/// The layout metadata queries a device must answer.
///
/// Implemented by the device layer. Both queries may fail, in which case negotiation moves on to
/// the next source of layout information.
pub trait DeviceLayouts {
    /// Get the device's preferred channel layout.
    fn preferred_layout(&self) -> Result<AudioChannelLayout>;

    /// Get the pair of device channels preferred for stereo playback.
    fn preferred_stereo_pair(&self) -> Result<StereoPair> {
        layout_unavailable_error("no preferred stereo channels")
    }
}

/// The pair of device channels that carry stereo audio. Channels are numbered from 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StereoPair {
    pub left: u32,
    pub right: u32,
}

impl StereoPair {
    /// Build the layout implied by the pair.
    ///
    /// The layout spans every device channel up-to the higher of the two channels. Channels other
    /// than the pair are labelled unknown.
    pub fn layout(&self) -> Result<AudioChannelLayout> {
        let max_channel = self.left.max(self.right);

        if self.left == 0 || self.right == 0 || self.left == self.right {
            return layout_unavailable_error("invalid stereo channel pair");
        }

        if max_channel > u32::from(u16::MAX) {
            return layout_unavailable_error("stereo channel out of range");
        }

        let mut labels = vec![ChannelLabel::UNKNOWN; max_channel as usize];
        labels[self.left as usize - 1] = ChannelLabel::LEFT;
        labels[self.right as usize - 1] = ChannelLabel::RIGHT;

        Ok(AudioChannelLayout::from_labels(&labels))
    }
}

/// The source of layout information a channel map was derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapSource {
    /// The device's preferred channel layout.
    Preferred,
    /// The device's preferred stereo channel pair.
    StereoPair,
    /// A default layout synthesized from the channel count alone.
    Fallback,
}

impl fmt::Display for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapSource::Preferred => write!(f, "preferred layout"),
            MapSource::StereoPair => write!(f, "stereo pair layout"),
            MapSource::Fallback => write!(f, "fallback layout"),
        }
    }
}

/// A degradation that occurred while negotiating a channel map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A channel's label was not recognized and the channel was assigned the unknown role.
    UnknownLabel { index: usize, label: ChannelLabel },
    /// A channel repeats the speaker role of an earlier channel.
    DuplicateRole { index: usize, role: SpeakerRole },
    /// The layout could not be obtained from the device, or could not be interpreted.
    LayoutUnavailable { source: MapSource, error: Error },
    /// The layout does not have the requested number of channels.
    ChannelCountMismatch { source: MapSource, reported: usize, desired: usize },
    /// No device layout was usable and a default layout was synthesized.
    FallbackSynthesized { channels: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownLabel { index, label } => {
                write!(f, "channel {} has unknown label {}", index, label)
            }
            Warning::DuplicateRole { index, role } => {
                write!(f, "channel {} repeats speaker role {}", index, role)
            }
            Warning::LayoutUnavailable { source, error } => {
                write!(f, "{} unavailable: {}", source, error)
            }
            Warning::ChannelCountMismatch { source, reported, desired } => {
                write!(f, "{} has {} channels, {} requested", source, reported, desired)
            }
            Warning::FallbackSynthesized { channels } => {
                write!(f, "synthesized default layout for {} channels", channels)
            }
        }
    }
}

/// `NegotiateOptions` is a common set of options that all negotiations use.
#[derive(Copy, Clone, Debug)]
pub struct NegotiateOptions {
    /// Collapse device layouts that match a standard layout to the standard layout's channel
    /// order.
    pub canonicalize: bool,
    /// Consult the device's preferred stereo channel pair when its preferred layout is unusable.
    pub use_stereo_pair: bool,
}

impl Default for NegotiateOptions {
    fn default() -> Self {
        NegotiateOptions { canonicalize: true, use_stereo_pair: true }
    }
}

/// The outcome of a negotiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Negotiated {
    /// The active channel map.
    pub map: ChannelMap,
    /// The standard layout tag with exactly the channel order of `map`, if there is one.
    pub tag: Option<LayoutTag>,
    /// The source the map was derived from.
    pub source: MapSource,
    /// Degradations encountered along the way.
    pub warnings: Vec<Warning>,
}

impl Negotiated {
    /// Returns `true` if the map is not an exact interpretation of the device's preferred layout.
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Derives channel maps from device layout metadata.
#[derive(Copy, Clone, Debug)]
pub struct Negotiator<'a> {
    catalog: LayoutCatalog<'a>,
    options: NegotiateOptions,
}

impl Negotiator<'static> {
    /// Create a negotiator that matches against the built-in catalog.
    pub fn new(options: NegotiateOptions) -> Self {
        Negotiator { catalog: LayoutCatalog::standard(), options }
    }
}

impl Default for Negotiator<'static> {
    fn default() -> Self {
        Negotiator::new(Default::default())
    }
}

impl<'a> Negotiator<'a> {
    /// Create a negotiator that matches against a custom catalog.
    pub fn with_catalog(catalog: LayoutCatalog<'a>, options: NegotiateOptions) -> Self {
        Negotiator { catalog, options }
    }

    /// Get the options.
    pub fn options(&self) -> &NegotiateOptions {
        &self.options
    }

    /// Negotiate the channel map of a device for a channel count.
    ///
    /// The device's preferred layout is used if it has `channel_count` channels, then its
    /// preferred stereo pair, and if neither is usable, the default layout for `channel_count`.
    /// The only error is a `channel_count` that no layout can have.
    pub fn negotiate(
        &self,
        device: &dyn DeviceLayouts,
        channel_count: usize,
    ) -> Result<Negotiated> {
        if channel_count == 0 {
            return invalid_configuration_error("channel count must be positive");
        }

        if channel_count > usize::from(u16::MAX) {
            return invalid_configuration_error("channel count exceeds the layout limit");
        }

        let mut warnings = Vec::new();

        let preferred = device.preferred_layout();

        if let Some(negotiated) =
            self.try_source(MapSource::Preferred, preferred, channel_count, &mut warnings)
        {
            return Ok(negotiated);
        }

        if self.options.use_stereo_pair {
            let stereo = device.preferred_stereo_pair().and_then(|pair| pair.layout());

            if let Some(negotiated) =
                self.try_source(MapSource::StereoPair, stereo, channel_count, &mut warnings)
            {
                return Ok(negotiated);
            }
        }

        Ok(self.fallback(channel_count, warnings))
    }

    /// Negotiate a channel map from an already fetched preferred layout.
    ///
    /// A `layout` of `None` means the device did not report one.
    pub fn negotiate_layout(
        &self,
        layout: Option<&AudioChannelLayout>,
        channel_count: usize,
    ) -> Result<Negotiated> {
        self.negotiate(&FetchedLayout(layout), channel_count)
    }

    /// Get every channel map the device's layout metadata supports, most preferred first.
    ///
    /// The list is empty if the device exposes no usable layout.
    pub fn supported_maps(&self, device: &dyn DeviceLayouts) -> Vec<ChannelMap> {
        let mut warnings = Vec::new();
        let mut maps: Vec<ChannelMap> = Vec::new();

        let mut sources = vec![(MapSource::Preferred, device.preferred_layout())];

        if self.options.use_stereo_pair {
            let stereo = device.preferred_stereo_pair().and_then(|pair| pair.layout());
            sources.push((MapSource::StereoPair, stereo));
        }

        for (source, layout) in sources {
            if let Some(descriptor) = self.resolve(source, layout, &mut warnings) {
                let (descriptor, _) = self.canonicalize(descriptor);
                let map = build_map_with_warnings(&descriptor, &mut warnings);

                if !maps.contains(&map) {
                    maps.push(map);
                }
            }
        }

        maps
    }

    fn try_source(
        &self,
        source: MapSource,
        layout: Result<AudioChannelLayout>,
        channel_count: usize,
        warnings: &mut Vec<Warning>,
    ) -> Option<Negotiated> {
        let descriptor = self.resolve(source, layout, warnings)?;

        if descriptor.len() != channel_count {
            info!("{} has {} channels, {} requested", source, descriptor.len(), channel_count);

            warnings.push(Warning::ChannelCountMismatch {
                source,
                reported: descriptor.len(),
                desired: channel_count,
            });
            return None;
        }

        let (descriptor, tag) = self.canonicalize(descriptor);
        let map = build_map_with_warnings(&descriptor, warnings);

        info!("negotiated channel map {} from {}", map, source);

        Some(Negotiated { map, tag, source, warnings: mem::take(warnings) })
    }

    fn resolve(
        &self,
        source: MapSource,
        layout: Result<AudioChannelLayout>,
        warnings: &mut Vec<Warning>,
    ) -> Option<LayoutDescriptor> {
        let descriptor = layout.and_then(|layout| {
            debug!("{}:", source);
            log_layout(Level::Debug, &layout);
            layout.descriptor()
        });

        match descriptor {
            Ok(descriptor) => Some(descriptor),
            Err(error) => {
                info!("{} unavailable: {}", source, error);
                warnings.push(Warning::LayoutUnavailable { source, error });
                None
            }
        }
    }

    fn canonicalize(&self, descriptor: LayoutDescriptor) -> (LayoutDescriptor, Option<LayoutTag>) {
        match self.catalog.find(&descriptor) {
            Some(entry) if self.options.canonicalize => {
                debug!("layout {} matches standard layout {}", descriptor, entry.name);
                (entry.descriptor(), Some(entry.tag))
            }
            Some(entry) if entry.has_order(descriptor.labels()) => (descriptor, Some(entry.tag)),
            _ => (descriptor, None),
        }
    }

    fn fallback(&self, channel_count: usize, mut warnings: Vec<Warning>) -> Negotiated {
        warn!("no usable device layout, using the default layout for {} channels", channel_count);

        warnings.push(Warning::FallbackSynthesized { channels: channel_count });

        let descriptor = fallback_descriptor(channel_count);

        // The default orders are already canonical, only look for a tag.
        let tag = self
            .catalog
            .find(&descriptor)
            .filter(|entry| entry.has_order(descriptor.labels()))
            .map(|entry| entry.tag);

        let map = build_map_with_warnings(&descriptor, &mut warnings);

        info!("negotiated channel map {} from {}", map, MapSource::Fallback);

        Negotiated { map, tag, source: MapSource::Fallback, warnings }
    }
}

/// Negotiate the channel map of a device for a channel count using the default options.
pub fn negotiate(device: &dyn DeviceLayouts, channel_count: usize) -> Result<Negotiated> {
    Negotiator::default().negotiate(device, channel_count)
}

/// Get the descriptor of the default layout for a channel count.
///
/// Follows mono, stereo, and the standard surround progression up-to 7.1. Channels beyond 7.1
/// are discrete.
pub fn fallback_descriptor(channel_count: usize) -> LayoutDescriptor {
    ChannelMap::default_for_count(channel_count)
        .iter()
        .map(|&role| label_from_role(role).unwrap_or(ChannelLabel::UNKNOWN))
        .collect()
}

/// A preferred layout that was fetched ahead of negotiation.
struct FetchedLayout<'a>(Option<&'a AudioChannelLayout>);

impl DeviceLayouts for FetchedLayout<'_> {
    fn preferred_layout(&self) -> Result<AudioChannelLayout> {
        match self.0 {
            Some(layout) => Ok(layout.clone()),
            None => layout_unavailable_error("device reported no layout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::ChannelBitmap;
    use chanmap_core::map::layouts;

    struct MockDevice {
        layout: Result<AudioChannelLayout>,
        pair: Result<StereoPair>,
    }

    impl MockDevice {
        fn new(layout: Option<AudioChannelLayout>, pair: Option<StereoPair>) -> Self {
            MockDevice {
                layout: layout.ok_or(Error::DeviceLayoutUnavailable("no layout")),
                pair: pair.ok_or(Error::DeviceLayoutUnavailable("no stereo pair")),
            }
        }
    }

    impl DeviceLayouts for MockDevice {
        fn preferred_layout(&self) -> Result<AudioChannelLayout> {
            self.layout.clone()
        }

        fn preferred_stereo_pair(&self) -> Result<StereoPair> {
            self.pair.clone()
        }
    }

    fn reordered_5p1() -> AudioChannelLayout {
        AudioChannelLayout::from_labels(&[
            ChannelLabel::CENTER,
            ChannelLabel::LEFT,
            ChannelLabel::RIGHT,
            ChannelLabel::LEFT_SURROUND,
            ChannelLabel::RIGHT_SURROUND,
            ChannelLabel::LFE_SCREEN,
        ])
    }

    #[test]
    fn verify_no_layout_falls_back() {
        let device = MockDevice::new(None, None);
        let negotiated = negotiate(&device, 2).unwrap();

        assert_eq!(negotiated.map.roles(), layouts::CHANNEL_MAP_STEREO);
        assert_eq!(negotiated.source, MapSource::Fallback);
        assert_eq!(negotiated.tag, Some(LayoutTag::STEREO));
        assert_eq!(
            negotiated.warnings,
            vec![
                Warning::LayoutUnavailable {
                    source: MapSource::Preferred,
                    error: Error::DeviceLayoutUnavailable("no layout"),
                },
                Warning::LayoutUnavailable {
                    source: MapSource::StereoPair,
                    error: Error::DeviceLayoutUnavailable("no stereo pair"),
                },
                Warning::FallbackSynthesized { channels: 2 },
            ]
        );
        assert!(negotiated.is_degraded());
    }

    #[test]
    fn verify_reordered_layout_canonicalized() {
        let device = MockDevice::new(Some(reordered_5p1()), None);
        let negotiated = negotiate(&device, 6).unwrap();

        assert_eq!(negotiated.map.roles(), layouts::CHANNEL_MAP_5P1);
        assert_eq!(negotiated.source, MapSource::Preferred);
        assert_eq!(negotiated.tag, Some(LayoutTag::MPEG_5_1_A));
        assert!(negotiated.warnings.is_empty());
    }

    #[test]
    fn verify_reordered_layout_kept() {
        let options = NegotiateOptions { canonicalize: false, ..Default::default() };
        let negotiated =
            Negotiator::new(options).negotiate_layout(Some(&reordered_5p1()), 6).unwrap();

        assert_eq!(
            negotiated.map.roles(),
            &[
                SpeakerRole::FrontCenter,
                SpeakerRole::FrontLeft,
                SpeakerRole::FrontRight,
                SpeakerRole::BackLeft,
                SpeakerRole::BackRight,
                SpeakerRole::Lfe,
            ]
        );
        assert_eq!(negotiated.tag, None);

        // An exact order match still reports the tag.
        let layout = AudioChannelLayout::from_tag(LayoutTag::MPEG_5_1_A);
        let negotiated = Negotiator::new(options).negotiate_layout(Some(&layout), 6).unwrap();

        assert_eq!(negotiated.tag, Some(LayoutTag::MPEG_5_1_A));
    }

    #[test]
    fn verify_invalid_channel_count() {
        let device = MockDevice::new(Some(reordered_5p1()), None);

        assert!(matches!(negotiate(&device, 0), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(negotiate(&device, 1 << 16), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn verify_stereo_pair_layout() {
        let device = MockDevice::new(
            Some(AudioChannelLayout::from_tag(LayoutTag::STEREO)),
            Some(StereoPair { left: 3, right: 4 }),
        );
        let negotiated = negotiate(&device, 4).unwrap();

        assert_eq!(
            negotiated.map.roles(),
            &[
                SpeakerRole::Unknown,
                SpeakerRole::Unknown,
                SpeakerRole::FrontLeft,
                SpeakerRole::FrontRight,
            ]
        );
        assert_eq!(negotiated.source, MapSource::StereoPair);
        assert_eq!(negotiated.tag, None);
        assert_eq!(
            negotiated.warnings,
            vec![Warning::ChannelCountMismatch {
                source: MapSource::Preferred,
                reported: 2,
                desired: 4,
            }]
        );
    }

    #[test]
    fn verify_stereo_pair_disabled() {
        let device = MockDevice::new(None, Some(StereoPair { left: 1, right: 2 }));
        let options = NegotiateOptions { use_stereo_pair: false, ..Default::default() };
        let negotiated = Negotiator::new(options).negotiate(&device, 2).unwrap();

        assert_eq!(negotiated.source, MapSource::Fallback);
        assert_eq!(negotiated.warnings.len(), 2);
    }

    #[test]
    fn verify_invalid_stereo_pairs() {
        assert!(StereoPair { left: 0, right: 1 }.layout().is_err());
        assert!(StereoPair { left: 2, right: 2 }.layout().is_err());
        assert!(StereoPair { left: 1, right: 70_000 }.layout().is_err());

        let layout = StereoPair { left: 2, right: 1 }.layout().unwrap();

        assert_eq!(
            layout.descriptor(),
            Ok(LayoutDescriptor::from_labels(&[ChannelLabel::RIGHT, ChannelLabel::LEFT]))
        );
    }

    #[test]
    fn verify_bitmap_and_tag_layouts() {
        let bitmap = ChannelBitmap::LEFT
            | ChannelBitmap::RIGHT
            | ChannelBitmap::CENTER
            | ChannelBitmap::LFE_SCREEN
            | ChannelBitmap::LEFT_SURROUND
            | ChannelBitmap::RIGHT_SURROUND;

        let layout = AudioChannelLayout::from_bitmap(bitmap);
        let negotiated = Negotiator::default().negotiate_layout(Some(&layout), 6).unwrap();

        assert_eq!(negotiated.map.roles(), layouts::CHANNEL_MAP_5P1);

        let layout = AudioChannelLayout::from_tag(LayoutTag::MPEG_5_1_D);
        let negotiated = Negotiator::default().negotiate_layout(Some(&layout), 6).unwrap();

        assert_eq!(negotiated.map.roles(), layouts::CHANNEL_MAP_5P1);
        assert_eq!(negotiated.tag, Some(LayoutTag::MPEG_5_1_A));
    }

    #[test]
    fn verify_unsupported_tag_falls_back() {
        let layout = AudioChannelLayout::from_tag(LayoutTag((250 << 16) | 2));
        let negotiated = Negotiator::default().negotiate_layout(Some(&layout), 2).unwrap();

        assert_eq!(negotiated.source, MapSource::Fallback);
        assert_eq!(
            negotiated.warnings[0],
            Warning::LayoutUnavailable {
                source: MapSource::Preferred,
                error: Error::UnsupportedLayoutTag((250 << 16) | 2),
            }
        );
    }

    #[test]
    fn verify_discrete_layout() {
        let layout = AudioChannelLayout::from_tag(LayoutTag::discrete_in_order(3));
        let negotiated = Negotiator::default().negotiate_layout(Some(&layout), 3).unwrap();

        assert_eq!(
            negotiated.map.roles(),
            &[SpeakerRole::Discrete(0), SpeakerRole::Discrete(1), SpeakerRole::Discrete(2)]
        );
        assert_eq!(negotiated.tag, Some(LayoutTag::discrete_in_order(3)));
    }

    #[test]
    fn verify_mono_layouts() {
        let negotiated = Negotiator::default().negotiate_layout(None, 1).unwrap();

        assert_eq!(negotiated.map.roles(), layouts::CHANNEL_MAP_MONO);
        assert_eq!(negotiated.tag, Some(LayoutTag::MONO));

        for label in [ChannelLabel::CENTER, ChannelLabel::MONO] {
            let layout = AudioChannelLayout::from_labels(&[label]);
            let negotiated = Negotiator::default().negotiate_layout(Some(&layout), 1).unwrap();

            assert_eq!(negotiated.map.roles(), layouts::CHANNEL_MAP_MONO);
            assert_eq!(negotiated.tag, Some(LayoutTag::MONO));
            assert!(negotiated.warnings.is_empty());
        }
    }

    #[test]
    fn verify_7p1_layouts() {
        // The default 7.1 uses side channels which no standard tag carries.
        let negotiated = Negotiator::default().negotiate_layout(None, 8).unwrap();

        assert_eq!(negotiated.map.roles(), layouts::CHANNEL_MAP_7P1);
        assert_eq!(negotiated.tag, None);

        // Rear surround channels keep their own roles.
        let layout = AudioChannelLayout::from_tag(LayoutTag::MPEG_7_1_C);
        let negotiated = Negotiator::default().negotiate_layout(Some(&layout), 8).unwrap();

        assert_eq!(
            &negotiated.map.roles()[6..],
            &[SpeakerRole::SurroundDirectLeft, SpeakerRole::SurroundDirectRight]
        );
        assert_eq!(negotiated.tag, Some(LayoutTag::MPEG_7_1_C));
    }

    #[test]
    fn verify_fallback_beyond_7p1() {
        let negotiated = Negotiator::default().negotiate_layout(None, 10).unwrap();

        assert_eq!(negotiated.map.len(), 10);
        assert_eq!(&negotiated.map.roles()[..8], layouts::CHANNEL_MAP_7P1);
        assert_eq!(negotiated.map.roles()[8], SpeakerRole::Discrete(8));
        assert_eq!(negotiated.map.roles()[9], SpeakerRole::Discrete(9));
        assert_eq!(negotiated.tag, None);
    }

    #[test]
    fn verify_fallback_descriptor() {
        assert_eq!(
            fallback_descriptor(3),
            LayoutDescriptor::from_labels(&[
                ChannelLabel::LEFT,
                ChannelLabel::RIGHT,
                ChannelLabel::LFE_SCREEN,
            ])
        );
        assert!(fallback_descriptor(0).is_empty());
    }

    #[test]
    fn verify_supported_maps() {
        let device =
            MockDevice::new(Some(reordered_5p1()), Some(StereoPair { left: 1, right: 2 }));

        assert_eq!(
            Negotiator::default().supported_maps(&device),
            vec![
                ChannelMap::from_roles(layouts::CHANNEL_MAP_5P1),
                ChannelMap::from_roles(layouts::CHANNEL_MAP_STEREO),
            ]
        );

        // A stereo pair that matches the preferred layout is not repeated.
        let device = MockDevice::new(
            Some(AudioChannelLayout::from_tag(LayoutTag::STEREO)),
            Some(StereoPair { left: 1, right: 2 }),
        );

        assert_eq!(Negotiator::default().supported_maps(&device).len(), 1);

        let device = MockDevice::new(None, None);

        assert!(Negotiator::default().supported_maps(&device).is_empty());
    }

    #[test]
    fn verify_warning_display() {
        let warning = Warning::ChannelCountMismatch {
            source: MapSource::Preferred,
            reported: 2,
            desired: 6,
        };

        assert_eq!(warning.to_string(), "preferred layout has 2 channels, 6 requested");
        assert_eq!(
            Warning::FallbackSynthesized { channels: 2 }.to_string(),
            "synthesized default layout for 2 channels"
        );
    }
}
