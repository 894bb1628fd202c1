// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::result;

use crate::role::SpeakerRole;

/// `Error` provides an enumeration of all possible errors reported by Chanmap.
///
/// Every variant except [`Error::InvalidConfiguration`] is recoverable. Negotiation absorbs them
/// and degrades to a less precise channel map rather than failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The native channel label is not known to the label table.
    UnknownLabel(u32),
    /// The speaker role cannot be expressed by any native channel label.
    NoNativeEquivalent(SpeakerRole),
    /// The native layout tag is neither a known standard layout nor a self-describing layout.
    UnsupportedLayoutTag(u32),
    /// The device did not provide usable layout metadata.
    DeviceLayoutUnavailable(&'static str),
    /// The request contradicts itself and no channel map can be derived from it.
    InvalidConfiguration(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::UnknownLabel(label) => {
                write!(f, "unknown channel label: {:#x}", label)
            }
            Error::NoNativeEquivalent(role) => {
                write!(f, "no native channel label for speaker role: {}", role)
            }
            Error::UnsupportedLayoutTag(tag) => {
                write!(f, "unsupported layout tag: {:#x}", tag)
            }
            Error::DeviceLayoutUnavailable(msg) => {
                write!(f, "device layout unavailable: {}", msg)
            }
            Error::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {}", msg)
            }
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an unknown label error.
pub fn unknown_label_error<T>(label: u32) -> Result<T> {
    Err(Error::UnknownLabel(label))
}

/// Convenience function to create a no native equivalent error.
pub fn no_native_equivalent_error<T>(role: SpeakerRole) -> Result<T> {
    Err(Error::NoNativeEquivalent(role))
}

/// Convenience function to create an unsupported layout tag error.
pub fn unsupported_tag_error<T>(tag: u32) -> Result<T> {
    Err(Error::UnsupportedLayoutTag(tag))
}

/// Convenience function to create a device layout unavailable error.
pub fn layout_unavailable_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::DeviceLayoutUnavailable(desc))
}

/// Convenience function to create an invalid configuration error.
pub fn invalid_configuration_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::InvalidConfiguration(desc))
}
