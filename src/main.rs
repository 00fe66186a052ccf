extern crate rand;
extern crate env_logger;
#[macro_use] extern crate log;
#[macro_use] extern crate clap;

use std::{io, num, process};
use std::io::Write;
use std::fs::File;

use clap::{App, Arg, ArgMatches};
use rand::Rng;

mod common;
mod svg;

use common::{Point, Segment, ParsePointError};
use svg::{Color, ParseColorError, Stroke, StrokeStyle, SvgWriter};

fn main() {
    env_logger::init();
    match run() {
        Ok(()) =>
            info!("graceful shutdown"),
        Err(e) => {
            error!("fatal error: {:?}", e);
            process::exit(1);
        },
    }
}

#[derive(Debug)]
enum Error {
    MissingParameter(&'static str),
    InvalidPoint { arg: &'static str, error: ParsePointError, },
    InvalidNumber { arg: &'static str, error: Number, },
    InvalidColor { arg: &'static str, error: ParseColorError, },
    Svg(SvgError),
}

#[derive(Debug)]
enum Number {
    Int(num::ParseIntError),
    Float(num::ParseFloatError),
    NotPositive(f64),
    OutOfRange { value: u32, min: u32, max: u32, },
}

#[derive(Debug)]
enum SvgError {
    Create { file: String, error: io::Error, },
    Write { file: String, error: io::Error, },
}

const DEFAULT_EXTENT: &str = "640";
const MAX_STROKE_WIDTH: u32 = 20;
const MAX_DASH_INTERVAL: u32 = 10;
const STROKE_ARGS: &[&str] = &["stroke-width", "stroke-color", "stroke-style", "dash", "space"];

fn app<'a, 'b>() -> App<'a, 'b> {
    app_from_crate!()
        .arg(Arg::with_name("from")
             .short("f")
             .long("from")
             .value_name("X,Y")
             .help("Segment first endpoint")
             .allow_hyphen_values(true)
             .takes_value(true))
        .arg(Arg::with_name("to")
             .short("t")
             .long("to")
             .value_name("X,Y")
             .help("Segment second endpoint")
             .allow_hyphen_values(true)
             .takes_value(true))
        .arg(Arg::with_name("random")
             .short("r")
             .long("random")
             .value_name("COUNT")
             .help("Generate COUNT segments with random endpoints")
             .conflicts_with_all(&["from", "to"])
             .takes_value(true))
        .arg(Arg::with_name("extent")
             .short("e")
             .long("extent")
             .value_name("SIZE")
             .help("Random endpoints are drawn from [0, SIZE) on both axes, also the SVG canvas size")
             .default_value(DEFAULT_EXTENT)
             .allow_hyphen_values(true)
             .takes_value(true))
        .arg(Arg::with_name("svg")
             .short("s")
             .long("svg")
             .value_name("FILE")
             .help("Also write segments as SVG lines to FILE")
             .takes_value(true))
        .arg(Arg::with_name("stroke-width")
             .long("stroke-width")
             .value_name("WIDTH")
             .help("SVG stroke width, 0 to 20")
             .default_value("2")
             .takes_value(true))
        .arg(Arg::with_name("stroke-color")
             .long("stroke-color")
             .value_name("R,G,B[,A]")
             .help("SVG stroke color, channels within [0, 1]")
             .default_value("0,0,0,1")
             .takes_value(true))
        .arg(Arg::with_name("stroke-style")
             .long("stroke-style")
             .value_name("STYLE")
             .help("SVG stroke style")
             .possible_values(&["plain", "dashed"])
             .default_value("plain")
             .takes_value(true))
        .arg(Arg::with_name("dash")
             .long("dash")
             .value_name("LENGTH")
             .help("Dashed stroke plain interval, 1 to 10")
             .default_value("4")
             .takes_value(true))
        .arg(Arg::with_name("space")
             .long("space")
             .value_name("LENGTH")
             .help("Dashed stroke space interval, 1 to 10")
             .default_value("4")
             .takes_value(true))
}

fn run() -> Result<(), Error> {
    let matches = app().get_matches();
    let segments = build_segments(&matches)?;
    for arg in ignored_args(&matches) {
        warn!("--{} has no effect with the given arguments", arg);
    }

    let mut svg = if let Some(file) = matches.value_of("svg") {
        let extent = parse_extent(&matches)?;
        let stroke = parse_stroke(&matches)?;
        debug!("writing svg to {} with {:?}", file, stroke);
        let out = File::create(file)
            .map_err(|error| Error::Svg(SvgError::Create { file: file.to_string(), error, }))?;
        let writer = SvgWriter::begin(io::BufWriter::new(out), extent, &stroke)
            .map_err(|error| Error::Svg(SvgError::Write { file: file.to_string(), error, }))?;
        Some((file, writer))
    } else {
        None
    };

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    for segment in segments {
        if segment.is_degenerate() {
            warn!("degenerate segment: both endpoints are {}", segment.a);
        } else {
            info!("segment built: {:?}", segment);
        }
        if let Err(error) = writeln!(stdout, "{}", segment) {
            // stdout closed (e.g. piped into `head`)
            debug!("stop printing segments: {:?}", error);
            break;
        }
        if let Some((ref file, ref mut writer)) = svg {
            writer.line(&segment)
                .map_err(|error| Error::Svg(SvgError::Write { file: file.to_string(), error, }))?;
        }
    }

    if let Some((file, writer)) = svg {
        let lines = writer.lines();
        writer.finish()
            .map_err(|error| Error::Svg(SvgError::Write { file: file.to_string(), error, }))?;
        info!("{} segments written to {}", lines, file);
    }

    Ok(())
}

fn build_segments(matches: &ArgMatches) -> Result<Box<dyn Iterator<Item = Segment>>, Error> {
    if let Some(count) = matches.value_of("random") {
        let count: usize = count.parse()
            .map_err(|e| Error::InvalidNumber { arg: "random", error: Number::Int(e), })?;
        let extent = parse_extent(matches)?;
        debug!("generating {} random segments within extent {}", count, extent);
        return Ok(Box::new(random_segments(rand::thread_rng(), count, extent)));
    }

    match (matches.value_of("from"), matches.value_of("to")) {
        (None, None) => {
            debug!("no endpoints given, using default segment");
            Ok(Box::new(Some(Segment::default()).into_iter()))
        },
        (Some(from), Some(to)) => {
            let a = parse_point("from", from)?;
            let b = parse_point("to", to)?;
            Ok(Box::new(Some(Segment::new(a, b)).into_iter()))
        },
        (Some(..), None) =>
            Err(Error::MissingParameter("to")),
        (None, Some(..)) =>
            Err(Error::MissingParameter("from")),
    }
}

/// Explicitly given arguments that nothing reads: `--extent` without `--random` or `--svg`,
/// stroke options without `--svg`.
fn ignored_args(matches: &ArgMatches) -> Vec<&'static str> {
    let mut ignored = Vec::new();
    let svg = matches.is_present("svg");
    if matches.occurrences_of("extent") > 0 && !svg && !matches.is_present("random") {
        ignored.push("extent");
    }
    if !svg {
        ignored.extend(STROKE_ARGS.iter().cloned().filter(|arg| matches.occurrences_of(*arg) > 0));
    }
    ignored
}

fn parse_point(arg: &'static str, value: &str) -> Result<Point, Error> {
    value.parse()
        .map_err(|error| Error::InvalidPoint { arg, error, })
}

fn parse_extent(matches: &ArgMatches) -> Result<f64, Error> {
    let extent = matches.value_of("extent")
        .ok_or(Error::MissingParameter("extent"))?;
    let extent: f64 = extent.parse()
        .map_err(|e| Error::InvalidNumber { arg: "extent", error: Number::Float(e), })?;
    if extent.is_finite() && extent > 0. {
        Ok(extent)
    } else {
        Err(Error::InvalidNumber { arg: "extent", error: Number::NotPositive(extent), })
    }
}

fn parse_bounded(matches: &ArgMatches, arg: &'static str, min: u32, max: u32) -> Result<u32, Error> {
    let value = matches.value_of(arg)
        .ok_or(Error::MissingParameter(arg))?;
    let value: u32 = value.parse()
        .map_err(|e| Error::InvalidNumber { arg, error: Number::Int(e), })?;
    if value < min || value > max {
        return Err(Error::InvalidNumber { arg, error: Number::OutOfRange { value, min, max, }, });
    }
    Ok(value)
}

fn parse_stroke(matches: &ArgMatches) -> Result<Stroke, Error> {
    let width = parse_bounded(matches, "stroke-width", 0, MAX_STROKE_WIDTH)?;
    let color: Color = matches.value_of("stroke-color")
        .ok_or(Error::MissingParameter("stroke-color"))?
        .parse()
        .map_err(|error| Error::InvalidColor { arg: "stroke-color", error, })?;
    let style = match matches.value_of("stroke-style") {
        Some("dashed") =>
            StrokeStyle::Dashed {
                dash: parse_bounded(matches, "dash", 1, MAX_DASH_INTERVAL)?,
                space: parse_bounded(matches, "space", 1, MAX_DASH_INTERVAL)?,
            },
        _ =>
            StrokeStyle::Plain,
    };
    Ok(Stroke { width, color, style, })
}

fn random_segments<R>(mut rng: R, count: usize, extent: f64) -> impl Iterator<Item = Segment> where R: Rng {
    (0 .. count)
        .map(move |_| {
            let a = random_point(&mut rng, extent);
            let b = random_point(&mut rng, extent);
            Segment::new(a, b)
        })
}

fn random_point<R>(rng: &mut R, extent: f64) -> Point where R: Rng {
    Point {
        x: rng.gen_range(0., extent),
        y: rng.gen_range(0., extent),
    }
}
