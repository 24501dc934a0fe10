// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use chaosgame::{
    Config, Construction, Driver, Drawing, FrameSink, IntervalTicker, Raster, Rule, Session,
};
use clap::{App, Arg, ArgMatches};
use failure::format_err;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const SHAPE: &str = "shape";
const RULE: &str = "rule";
const ANTIALIAS: &str = "antialias";
const VARIED: &str = "varied";
const TICKS: &str = "ticks";
const INTERVAL: &str = "interval";
const BATCH: &str = "batch";
const SEED: &str = "seed";
const SNAPSHOT_EVERY: &str = "snapshot-every";
const LIST: &str = "list";

fn args<'a>() -> ArgMatches<'a> {
    App::new("chaosgame")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Chaos game renderer.  Press Enter to stop early.")
        .arg(
            Arg::with_name(OUTPUT)
                .required_unless(LIST)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("600x600")
                .validator(|s| {
                    validate_pair::<u16>(&s, 'x', "Could not parse output image size")?;
                    match parse_pair::<u16>(&s, 'x') {
                        Some((0, _)) | Some((_, 0)) => {
                            Err("Image size must be at least 1x1".to_string())
                        }
                        _ => Ok(()),
                    }
                })
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(SHAPE)
                .long(SHAPE)
                .short("p")
                .takes_value(true)
                .default_value("triangle")
                .help("Polygon to play on (see --list)"),
        )
        .arg(
            Arg::with_name(RULE)
                .long(RULE)
                .short("r")
                .takes_value(true)
                .default_value("vector-center")
                .help("Jump rule (see --list)"),
        )
        .arg(
            Arg::with_name(ANTIALIAS)
                .long(ANTIALIAS)
                .short("a")
                .help("Anti-aliased drawing instead of one black pixel per point"),
        )
        .arg(
            Arg::with_name(VARIED)
                .long(VARIED)
                .short("v")
                .help("Random step length on every jump instead of a fixed one"),
        )
        .arg(
            Arg::with_name(TICKS)
                .long(TICKS)
                .short("t")
                .takes_value(true)
                .default_value("300")
                .validator(|s| {
                    validate_range(
                        &s,
                        1u64,
                        10_000_000,
                        "Could not parse tick count",
                        "Tick count must be between 1 and 10000000",
                    )
                })
                .help("Number of ticks to run for"),
        )
        .arg(
            Arg::with_name(INTERVAL)
                .long(INTERVAL)
                .short("i")
                .takes_value(true)
                .default_value("30")
                .validator(|s| {
                    validate_range(
                        &s,
                        0u64,
                        60_000,
                        "Could not parse interval",
                        "Interval must be between 0 and 60000 milliseconds",
                    )
                })
                .help("Milliseconds between ticks"),
        )
        .arg(
            Arg::with_name(BATCH)
                .long(BATCH)
                .short("b")
                .takes_value(true)
                .default_value("100")
                .validator(|s| {
                    validate_range(
                        &s,
                        1usize,
                        10_000_000,
                        "Could not parse batch size",
                        "Batch size must be between 1 and 10000000",
                    )
                })
                .help("Points per tick"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        0u64,
                        std::u64::MAX,
                        "Could not parse seed",
                        "Seed out of range",
                    )
                })
                .help("Seed for a reproducible run"),
        )
        .arg(
            Arg::with_name(SNAPSHOT_EVERY)
                .long(SNAPSHOT_EVERY)
                .short("e")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1u64,
                        std::u64::MAX,
                        "Could not parse snapshot interval",
                        "Snapshot interval must be at least 1",
                    )
                })
                .help("Also write a numbered frame every N ticks"),
        )
        .arg(
            Arg::with_name(LIST)
                .long(LIST)
                .short("l")
                .help("List the shapes and rules, then exit"),
        )
        .get_matches()
}

fn parsed<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    let value = matches
        .value_of(name)
        .ok_or_else(|| format_err!("Missing value for --{}", name))?;
    T::from_str(value).map_err(|_| format_err!("Could not parse --{} '{}'", name, value))
}

/// Writes numbered copies of the frame every so many ticks, and
/// reports progress.
struct SnapshotSink {
    output: PathBuf,
    every: Option<u64>,
    frames: u64,
}

impl SnapshotSink {
    fn snapshot_path(&self, tick: u64) -> PathBuf {
        let stem = self
            .output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "frame".to_string());
        let name = match self.output.extension() {
            Some(ext) => format!("{}-{:06}.{}", stem, tick, ext.to_string_lossy()),
            None => format!("{}-{:06}", stem, tick),
        };
        self.output.with_file_name(name)
    }
}

impl FrameSink for SnapshotSink {
    fn present(&mut self, frame: &Raster, points: u64) -> Result<(), failure::Error> {
        let tick = self.frames;
        self.frames += 1;
        if let Some(every) = self.every {
            if tick > 0 && tick % every == 0 {
                let path = self.snapshot_path(tick);
                frame.save(&path)?;
                info!("{} points, wrote {}", points, path.display());
            }
        }
        Ok(())
    }
}

fn list(config: &Config) {
    println!("shapes:");
    for name in config.shapes.names() {
        if let Ok(spec) = config.shapes.get(name) {
            println!("  {:<12} {} vertices", name, spec.vertex_count);
        }
    }
    println!("rules:");
    for rule in Rule::all() {
        println!("  {:<20} {}", rule.name(), rule.label());
    }
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let (width, height): (usize, usize) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair(s, 'x'))
        .ok_or_else(|| format_err!("Error parsing image dimensions"))?;

    let config = Config {
        width,
        height,
        interval: Duration::from_millis(parsed(matches, INTERVAL)?),
        batch: parsed(matches, BATCH)?,
        drawing: Drawing::from_simple(!matches.is_present(ANTIALIAS)),
        construction: Construction::from_simple(!matches.is_present(VARIED)),
        shape: parsed(matches, SHAPE)?,
        rule: parsed(matches, RULE)?,
        ..Config::default()
    };

    if matches.is_present(LIST) {
        list(&config);
        return Ok(());
    }

    let output = PathBuf::from(parsed::<String>(matches, OUTPUT)?);
    let rng = match matches.value_of(SEED) {
        Some(_) => StdRng::seed_from_u64(parsed(matches, SEED)?),
        None => StdRng::from_entropy(),
    };
    let ticks: u64 = parsed(matches, TICKS)?;
    let every = match matches.value_of(SNAPSHOT_EVERY) {
        Some(_) => Some(parsed(matches, SNAPSHOT_EVERY)?),
        None => None,
    };

    let (interval, batch) = (config.interval, config.batch);
    let mut session = Session::new(config, rng)?;
    session.start_configured()?;

    let (ticker, stop) = IntervalTicker::new(interval);
    thread::spawn(move || {
        if let Some(Ok(_)) = io::stdin().lock().lines().next() {
            stop.stop();
        }
    });

    let mut sink = SnapshotSink {
        output: output.clone(),
        every,
        frames: 0,
    };
    Driver::new(ticker.with_limit(ticks), batch).run(&mut session, &mut sink)?;

    write_image(&output, session.raster())?;
    println!("{} points", session.point_count());
    Ok(())
}

fn write_image(path: &Path, raster: &Raster) -> Result<(), failure::Error> {
    raster.save(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
