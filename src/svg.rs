use std::{fmt, io, num};
use std::io::Write;
use std::str::FromStr;

use common::Segment;

/// RGBA stroke color, every channel within `[0, 1]`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Color {
        Color { r: 0., g: 0., b: 0., a: 1., }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ParseColorError {
    ComponentsCount(usize),
    Channel(num::ParseFloatError),
    OutOfRange(f64),
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses `"R,G,B"` or `"R,G,B,A"`, alpha defaults to opaque.
    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        let mut channels = Vec::with_capacity(4);
        for channel in s.split(',') {
            let value: f64 = channel.trim().parse()
                .map_err(ParseColorError::Channel)?;
            if !(value >= 0. && value <= 1.) {
                return Err(ParseColorError::OutOfRange(value));
            }
            channels.push(value);
        }
        match &channels[..] {
            &[r, g, b] =>
                Ok(Color { r, g, b, a: 1., }),
            &[r, g, b, a] =>
                Ok(Color { r, g, b, a, }),
            other =>
                Err(ParseColorError::ComponentsCount(other.len())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let byte = |channel: f64| (channel * 255.).round() as u8;
        write!(f, "rgb({},{},{})", byte(self.r), byte(self.g), byte(self.b))
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum StrokeStyle {
    Plain,
    Dashed { dash: u32, space: u32, },
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stroke {
    pub width: u32,
    pub color: Color,
    pub style: StrokeStyle,
}

impl Default for Stroke {
    fn default() -> Stroke {
        Stroke {
            width: 2,
            color: Color::default(),
            style: StrokeStyle::Plain,
        }
    }
}

/// Streams segments into an SVG document as `<line>` elements sharing one stroke group.
pub struct SvgWriter<W> where W: Write {
    out: W,
    lines: usize,
}

impl<W> SvgWriter<W> where W: Write {
    pub fn begin(mut out: W, size: f64, stroke: &Stroke) -> io::Result<SvgWriter<W>> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
            size,
        )?;
        write!(
            out,
            r#"<g fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
            stroke.color,
            stroke.color.a,
            stroke.width,
        )?;
        if let StrokeStyle::Dashed { dash, space, } = stroke.style {
            write!(out, r#" stroke-dasharray="{} {}""#, dash, space)?;
        }
        writeln!(out, ">")?;
        Ok(SvgWriter { out, lines: 0, })
    }

    pub fn line(&mut self, segment: &Segment) -> io::Result<()> {
        writeln!(
            self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            segment.a.x,
            segment.a.y,
            segment.b.x,
            segment.b.y,
        )?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.out, "</g>")?;
        writeln!(self.out, "</svg>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
