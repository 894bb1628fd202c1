// Chanmap
// Copyright (c) 2026 The Project Chanmap Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use chanmap_core::errors::{invalid_configuration_error, layout_unavailable_error, Result};
use chanmap_core::role::SpeakerRole;
use chanmap_coreaudio::bitmap::ChannelBitmap;
use chanmap_coreaudio::diag::{log_descriptor, log_layout};
use chanmap_coreaudio::label::ChannelLabel;
use chanmap_coreaudio::layout::AudioChannelLayout;
use chanmap_coreaudio::negotiate::{
    DeviceLayouts, NegotiateOptions, Negotiated, Negotiator, StereoPair,
};
use chanmap_coreaudio::table::label_from_role;
use chanmap_coreaudio::tag::LayoutTag;

use clap::{Arg, ArgMatches};
use log::{error, info, Level, LevelFilter};

/// A device whose layout metadata was given on the command line.
struct ProbeDevice {
    layout: Option<AudioChannelLayout>,
    pair: Option<StereoPair>,
}

impl DeviceLayouts for ProbeDevice {
    fn preferred_layout(&self) -> Result<AudioChannelLayout> {
        match &self.layout {
            Some(layout) => Ok(layout.clone()),
            None => layout_unavailable_error("no layout given"),
        }
    }

    fn preferred_stereo_pair(&self) -> Result<StereoPair> {
        match self.pair {
            Some(pair) => Ok(pair),
            None => layout_unavailable_error("no stereo pair given"),
        }
    }
}

fn main() {
    let args = clap::Command::new("Chanmap Probe")
        .version("1.0")
        .about("Negotiate a channel map for a CoreAudio channel layout")
        .arg(
            Arg::new("labels")
                .long("labels")
                .short('l')
                .value_name("LABELS")
                .help("Comma separated channel labels, as label codes or speaker names (e.g. FL)")
                .conflicts_with_all(&["tag", "bitmap"]),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .short('t')
                .value_name("TAG")
                .help("A layout tag")
                .conflicts_with_all(&["labels", "bitmap"]),
        )
        .arg(
            Arg::new("bitmap")
                .long("bitmap")
                .short('b')
                .value_name("BITMAP")
                .help("A channel bitmap")
                .conflicts_with_all(&["labels", "tag"]),
        )
        .arg(
            Arg::new("stereo-pair")
                .long("stereo-pair")
                .short('s')
                .value_name("LEFT,RIGHT")
                .help("The device channels preferred for stereo, numbered from 1"),
        )
        .arg(
            Arg::new("channels")
                .long("channels")
                .short('c')
                .value_name("COUNT")
                .help("The number of channels to negotiate, defaults to the layout's count"),
        )
        .arg(
            Arg::new("no-canonicalize")
                .long("no-canonicalize")
                .help("Keep the device's channel order for standard layouts"),
        )
        .arg(
            Arg::new("no-stereo-pair")
                .long("no-stereo-pair")
                .help("Do not consult the stereo pair if the layout is unusable"),
        )
        .arg(Arg::new("verbose").long("verbose").short('v').help("Log layout diagnostics"))
        .get_matches();

    init_logger(args.is_present("verbose"));

    // For any error, return an exit code -1. Otherwise return the exit code provided.
    let code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            -1
        }
    };

    std::process::exit(code)
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();

    builder.filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Warn });

    // An explicit filter always wins.
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.init();
}

fn run(args: &ArgMatches) -> Result<i32> {
    let layout = if let Some(labels) = args.value_of("labels") {
        Some(AudioChannelLayout::from_labels(&parse_labels(labels)?))
    }
    else if let Some(tag) = args.value_of("tag") {
        Some(AudioChannelLayout::from_tag(LayoutTag(parse_number(tag)?)))
    }
    else if let Some(bitmap) = args.value_of("bitmap") {
        let bits = parse_number(bitmap)?;
        Some(AudioChannelLayout::from_bitmap(ChannelBitmap::from_bits_truncate(bits)))
    }
    else {
        None
    };

    let pair = match args.value_of("stereo-pair") {
        Some(pair) => Some(parse_stereo_pair(pair)?),
        None => None,
    };

    let device = ProbeDevice { layout, pair };

    // Without an explicit count, ask for as many channels as the layout has.
    let channels = match args.value_of("channels") {
        Some(count) => parse_number(count)? as usize,
        None => match device.layout.as_ref().map(|layout| layout.descriptor()) {
            Some(Ok(descriptor)) => descriptor.len(),
            _ => 2,
        },
    };

    let options = NegotiateOptions {
        canonicalize: !args.is_present("no-canonicalize"),
        use_stereo_pair: !args.is_present("no-stereo-pair"),
    };

    if let Some(layout) = &device.layout {
        log_layout(Level::Info, layout);

        if let Ok(descriptor) = layout.descriptor() {
            log_descriptor(Level::Debug, &descriptor);
        }
    }

    let negotiator = Negotiator::new(options);

    let negotiated = negotiator.negotiate(&device, channels)?;

    print_negotiated(&negotiated);

    let supported = negotiator.supported_maps(&device);

    info!("device supports {} channel map(s)", supported.len());

    print_blank();
    print_header("Supported Maps");

    for (idx, map) in supported.iter().enumerate() {
        println!("| [{:0>2}] {}", idx + 1, map);
    }

    print_blank();

    Ok(0)
}

fn print_negotiated(negotiated: &Negotiated) {
    print_blank();
    print_header("Negotiated");
    print_pair("Channel Map:", &negotiated.map);
    print_pair("Channel(s):", &negotiated.map.len());
    print_pair("Source:", &negotiated.source);

    match negotiated.tag {
        Some(tag) => print_pair("Layout Tag:", &tag),
        None => print_pair("Layout Tag:", &"*None*"),
    }

    if !negotiated.warnings.is_empty() {
        print_blank();
        print_header("Warnings");

        for (idx, warning) in negotiated.warnings.iter().enumerate() {
            println!("| [{:0>2}] {}", idx + 1, warning);
        }
    }
}

fn print_pair<T>(key: &str, value: &T)
where
    T: std::fmt::Display,
{
    println!("|     {:<16} {}", key, value)
}

fn print_header(title: &str) {
    println!("| // {} //", title)
}

fn print_blank() {
    println!("|")
}

/// Parse a decimal or `0x` prefixed hexadecimal number.
fn parse_number(value: &str) -> Result<u32> {
    let value = value.trim();

    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse::<u32>(),
    };

    match parsed {
        Ok(number) => Ok(number),
        Err(_) => invalid_configuration_error("malformed number"),
    }
}

/// Parse a comma separated list of label codes or speaker names.
fn parse_labels(value: &str) -> Result<Vec<ChannelLabel>> {
    value
        .split(',')
        .map(|item| match parse_number(item) {
            Ok(code) => Ok(ChannelLabel(code)),
            Err(_) => label_from_role(SpeakerRole::from_str(item.trim())?),
        })
        .collect()
}

fn parse_stereo_pair(value: &str) -> Result<StereoPair> {
    match value.split_once(',') {
        Some((left, right)) => {
            Ok(StereoPair { left: parse_number(left)?, right: parse_number(right)? })
        }
        None => invalid_configuration_error("stereo pair must be LEFT,RIGHT"),
    }
}
