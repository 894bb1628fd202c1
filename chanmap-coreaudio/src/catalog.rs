// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `catalog` module matches arbitrary layouts against a catalog of standard layouts.
//!
//! Devices often report a well-known speaker configuration with a quirky channel order, or
//! describe it channel-by-channel instead of with a tag. Matching such a layout against the
//! catalog collapses it to the catalog entry's canonical channel order.

use smallvec::SmallVec;

use crate::bitmap::ChannelBitmap;
use crate::label::ChannelLabel;
use crate::layout::LayoutDescriptor;
use crate::table;
use crate::tag::{layouts, LayoutTag};

/// A well-known channel layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StandardLayout {
    /// The layout tag.
    pub tag: LayoutTag,
    /// A human readable name.
    pub name: &'static str,
    /// The channel labels in channel order.
    pub labels: &'static [ChannelLabel],
}

impl StandardLayout {
    /// Get the number of channels.
    pub fn channel_count(&self) -> usize {
        self.labels.len()
    }

    /// Get the layout as a descriptor.
    pub fn descriptor(&self) -> LayoutDescriptor {
        LayoutDescriptor::from_labels(self.labels)
    }

    /// Returns `true` if the layout has exactly the given channel order. Label aliases compare
    /// equal to their canonical label.
    pub fn has_order(&self, labels: &[ChannelLabel]) -> bool {
        self.labels.len() == labels.len()
            && self
                .labels
                .iter()
                .zip(labels)
                .all(|(&a, &b)| table::canonical_label(a) == table::canonical_label(b))
    }
}

macro_rules! standard {
    ($tag:ident, $name:expr) => {
        StandardLayout { tag: LayoutTag::$tag, name: $name, labels: layouts::$tag }
    };
    ($tag:expr, $name:expr, $labels:expr) => {
        StandardLayout { tag: $tag, name: $name, labels: $labels }
    };
}

/// The built-in catalog, ordered most-common-first.
///
/// Each label set appears once, so every layout that matches an entry is collapsed to that
/// entry's channel order. The discrete layouts come last and only match layouts without any
/// positional channel.
pub const STANDARD_LAYOUTS: &[StandardLayout] = &[
    standard!(MONO, "mono"),
    standard!(STEREO, "stereo"),
    standard!(STEREO_HEADPHONES, "headphones"),
    standard!(DVD_4, "2.1"),
    standard!(MPEG_3_0_A, "3.0"),
    standard!(ITU_2_1, "3.0(back)"),
    standard!(QUADRAPHONIC, "quad"),
    standard!(MPEG_4_0_A, "4.0"),
    standard!(DVD_10, "3.1"),
    standard!(DVD_5, "3.1(back)"),
    standard!(MPEG_5_0_A, "5.0"),
    standard!(MPEG_5_1_A, "5.1"),
    standard!(DVD_11, "4.1"),
    standard!(DVD_6, "4.1(quad)"),
    standard!(HEXAGONAL, "6.0"),
    standard!(MPEG_6_1_A, "6.1"),
    standard!(AUDIO_UNIT_7_0, "7.0"),
    standard!(AUDIO_UNIT_7_0_FRONT, "7.0(front)"),
    standard!(MPEG_7_1_C, "7.1(rear)"),
    standard!(MPEG_7_1_A, "7.1(wide)"),
    standard!(OCTAGONAL, "octagonal"),
    standard!(AAC_OCTAGONAL, "octagonal(aac)"),
    standard!(LayoutTag::discrete_in_order(1), "discrete 1", layouts::DISCRETE_1),
    standard!(LayoutTag::discrete_in_order(2), "discrete 2", layouts::DISCRETE_2),
    standard!(LayoutTag::discrete_in_order(3), "discrete 3", layouts::DISCRETE_3),
    standard!(LayoutTag::discrete_in_order(4), "discrete 4", layouts::DISCRETE_4),
    standard!(LayoutTag::discrete_in_order(5), "discrete 5", layouts::DISCRETE_5),
    standard!(LayoutTag::discrete_in_order(6), "discrete 6", layouts::DISCRETE_6),
    standard!(LayoutTag::discrete_in_order(7), "discrete 7", layouts::DISCRETE_7),
    standard!(LayoutTag::discrete_in_order(8), "discrete 8", layouts::DISCRETE_8),
];

/// The rule that selects a winner when several catalog entries share a label set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// The first matching entry in catalog order wins.
    #[default]
    CatalogOrder,
    /// An entry with exactly the same channel order wins, otherwise the first matching entry in
    /// catalog order.
    PreferSameOrder,
}

/// An ordered catalog of standard layouts.
#[derive(Copy, Clone, Debug)]
pub struct LayoutCatalog<'a> {
    entries: &'a [StandardLayout],
    tie_break: TieBreak,
}

impl LayoutCatalog<'static> {
    /// Get the built-in catalog.
    pub fn standard() -> Self {
        LayoutCatalog { entries: STANDARD_LAYOUTS, tie_break: TieBreak::CatalogOrder }
    }
}

impl Default for LayoutCatalog<'static> {
    fn default() -> Self {
        LayoutCatalog::standard()
    }
}

impl<'a> LayoutCatalog<'a> {
    /// Create a catalog from entries ordered by descending priority.
    pub fn new(entries: &'a [StandardLayout], tie_break: TieBreak) -> Self {
        LayoutCatalog { entries, tie_break }
    }

    /// Replace the tie-break rule.
    pub fn with_tie_break(self, tie_break: TieBreak) -> Self {
        LayoutCatalog { tie_break, ..self }
    }

    /// Get the entries in priority order.
    pub fn entries(&self) -> &'a [StandardLayout] {
        self.entries
    }

    /// Get the tie-break rule.
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Get the first entry with the given tag.
    pub fn by_tag(&self, tag: LayoutTag) -> Option<&'a StandardLayout> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }

    /// Find the standard layout that best matches a descriptor.
    ///
    /// Entries with the same channel count and the same multiset of labels match exactly, and the
    /// tie-break rule chooses among them. Failing that, a descriptor without a single positional
    /// channel matches the first discrete-in-order entry with the same channel count. Returns
    /// `None` if nothing matches, which is an expected outcome for nonstandard layouts.
    pub fn find(&self, descriptor: &LayoutDescriptor) -> Option<&'a StandardLayout> {
        if descriptor.is_empty() {
            return None;
        }

        let key = MatchKey::new(descriptor.labels());

        let mut exact = self
            .entries
            .iter()
            .filter(|entry| entry.channel_count() == descriptor.len())
            .filter(|entry| MatchKey::new(entry.labels) == key);

        let found = match self.tie_break {
            TieBreak::CatalogOrder => exact.next(),
            TieBreak::PreferSameOrder => {
                let mut first = None;

                for entry in exact {
                    if entry.has_order(descriptor.labels()) {
                        return Some(entry);
                    }
                    first.get_or_insert(entry);
                }

                first
            }
        };

        if found.is_some() {
            return found;
        }

        // Without any positional channel, the channel count is the only thing left to match on.
        if !descriptor.iter().any(|&label| table::is_positional(label)) {
            return self.entries.iter().find(|entry| {
                entry.tag.is_discrete_in_order() && entry.channel_count() == descriptor.len()
            });
        }

        None
    }
}

/// Find the standard layout in the built-in catalog that best matches a descriptor.
pub fn find_standard_layout(descriptor: &LayoutDescriptor) -> Option<&'static StandardLayout> {
    LayoutCatalog::standard().find(descriptor)
}

/// An order-independent representation of a list of labels.
#[derive(PartialEq, Eq)]
enum MatchKey {
    /// All labels are distinct and representable by a channel bitmap.
    Bitmap(ChannelBitmap),
    /// The sorted label codes.
    Sorted(SmallVec<[u32; 8]>),
}

impl MatchKey {
    /// Aliases are keyed by their canonical label.
    fn new(labels: &[ChannelLabel]) -> MatchKey {
        let mut bitmap = ChannelBitmap::empty();

        for &label in labels {
            match ChannelBitmap::from_label(table::canonical_label(label)) {
                Some(bit) if !bitmap.contains(bit) => bitmap.insert(bit),
                _ => {
                    let mut sorted = labels
                        .iter()
                        .map(|&label| table::canonical_label(label).0)
                        .collect::<SmallVec<_>>();
                    sorted.sort_unstable();
                    return MatchKey::Sorted(sorted);
                }
            }
        }

        MatchKey::Bitmap(bitmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    #[test]
    fn verify_catalog_self_consistency() {
        for entry in STANDARD_LAYOUTS {
            assert_eq!(find_standard_layout(&entry.descriptor()), Some(entry), "{}", entry.name);
        }
    }

    #[test]
    fn verify_catalog_entries() {
        for (i, a) in STANDARD_LAYOUTS.iter().enumerate() {
            assert_eq!(a.tag.channel_count(), a.channel_count(), "{}", a.name);

            if !a.tag.is_discrete_in_order() {
                assert_eq!(a.tag.labels(), Some(a.labels), "{}", a.name);
            }

            for b in &STANDARD_LAYOUTS[i + 1..] {
                assert_ne!(a.tag, b.tag);
                assert!(MatchKey::new(a.labels) != MatchKey::new(b.labels), "{}", b.name);
            }
        }
    }

    #[test]
    fn verify_shuffled_layouts_match() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);

        for entry in STANDARD_LAYOUTS {
            for _ in 0..8 {
                let mut labels = entry.labels.to_vec();
                labels.shuffle(&mut rng);

                let found = find_standard_layout(&LayoutDescriptor::from(labels));
                assert_eq!(found, Some(entry), "{}", entry.name);
            }
        }
    }

    #[test]
    fn verify_reordered_5p1() {
        for tag in [
            LayoutTag::MPEG_5_1_A,
            LayoutTag::MPEG_5_1_B,
            LayoutTag::MPEG_5_1_C,
            LayoutTag::MPEG_5_1_D,
        ] {
            let descriptor = LayoutDescriptor::from_labels(tag.labels().unwrap());
            let found = find_standard_layout(&descriptor).map(|entry| entry.tag);
            assert_eq!(found, Some(LayoutTag::MPEG_5_1_A));
        }
    }

    #[test]
    fn verify_unmatched() {
        assert_eq!(find_standard_layout(&LayoutDescriptor::new()), None);

        // Wrong channel count.
        let descriptor = LayoutDescriptor::from_labels(&[
            ChannelLabel::LEFT,
            ChannelLabel::RIGHT,
            ChannelLabel::LEFT,
        ]);
        assert_eq!(find_standard_layout(&descriptor), None);

        // A stereo pair embedded in a larger device.
        let descriptor = LayoutDescriptor::from_labels(&[
            ChannelLabel::UNKNOWN,
            ChannelLabel::LEFT,
            ChannelLabel::RIGHT,
            ChannelLabel::UNKNOWN,
        ]);
        assert_eq!(find_standard_layout(&descriptor), None);

        // Too many channels for any catalog entry.
        assert_eq!(find_standard_layout(&LayoutDescriptor::discrete(9)), None);
    }

    #[test]
    fn verify_mono_aliases_match() {
        for label in [ChannelLabel::MONO, ChannelLabel::CENTER] {
            let found = find_standard_layout(&LayoutDescriptor::from_labels(&[label])).unwrap();

            assert_eq!(found.tag, LayoutTag::MONO);
            assert!(found.has_order(&[label]));
        }

        // Both labels name the same speaker.
        let descriptor = LayoutDescriptor::from_labels(&[ChannelLabel::MONO, ChannelLabel::CENTER]);
        assert_eq!(find_standard_layout(&descriptor), None);
    }

    #[test]
    fn verify_discrete_match() {
        let descriptor = LayoutDescriptor::from_labels(&[
            ChannelLabel::UNKNOWN,
            ChannelLabel::UNUSED,
            ChannelLabel::discrete(7),
        ]);

        let found = find_standard_layout(&descriptor).unwrap();
        assert_eq!(found.tag, LayoutTag::discrete_in_order(3));
        assert_eq!(found.descriptor(), LayoutDescriptor::discrete(3));
    }

    #[test]
    fn verify_matching_is_deterministic() {
        let descriptor = LayoutDescriptor::from_labels(layouts::MPEG_7_1_B);

        let first = find_standard_layout(&descriptor);
        for _ in 0..16 {
            assert_eq!(find_standard_layout(&descriptor), first);
        }
        assert_eq!(first.map(|entry| entry.tag), Some(LayoutTag::MPEG_7_1_A));
    }

    #[test]
    fn verify_tie_break() {
        const ENTRIES: &[StandardLayout] = &[
            standard!(MPEG_5_1_A, "5.1"),
            standard!(MPEG_5_1_B, "5.1(b)"),
            standard!(MPEG_5_1_D, "5.1(d)"),
        ];

        let device = LayoutDescriptor::from_labels(layouts::MPEG_5_1_D);
        let quirky = LayoutDescriptor::from_labels(layouts::MPEG_5_1_C);

        let catalog = LayoutCatalog::new(ENTRIES, TieBreak::CatalogOrder);
        assert_eq!(catalog.find(&device).map(|entry| entry.name), Some("5.1"));

        let catalog = catalog.with_tie_break(TieBreak::PreferSameOrder);
        assert_eq!(catalog.tie_break(), TieBreak::PreferSameOrder);
        assert_eq!(catalog.find(&device).map(|entry| entry.name), Some("5.1(d)"));
        assert_eq!(catalog.find(&quirky).map(|entry| entry.name), Some("5.1"));
    }

    #[test]
    fn verify_by_tag() {
        let catalog = LayoutCatalog::standard();

        assert_eq!(catalog.by_tag(LayoutTag::STEREO).map(|entry| entry.name), Some("stereo"));
        assert_eq!(catalog.by_tag(LayoutTag::MPEG_5_1_D), None);
    }
}
