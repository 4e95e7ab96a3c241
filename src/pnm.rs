//! Plain-text Netpbm codec.
//!
//! Decodes and encodes the three ASCII encodings — PBM (`P1`), PGM (`P2`),
//! PPM (`P3`) — to and from the shared [`Canvas`] model. Input is
//! whitespace-tokenized with `#` comments skipped through end of line;
//! a body must supply exactly `width * height * channels` sample values,
//! each within the declared maximum. The raw binary variants (`P4`–`P6`)
//! are not supported.
//!
//! Encoding reproduces the classic layout: magic line, `width height`
//! line, max-intensity line for gray/color, then one text row per pixel
//! row.

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::canvas::{Bitmap, Canvas, Graymap, Pixmap};
use crate::color::Rgb8;
use crate::sample::Sample;

// ============================================================================
// ParseError
// ============================================================================

/// Errors produced while reading or decoding plain-text Netpbm data.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The magic number is missing or names an unsupported format.
    #[error("unsupported magic number {0:?}")]
    BadMagic(String),

    /// The header or body ended before the expected token.
    #[error("missing {0}")]
    MissingToken(&'static str),

    /// A token could not be parsed as the expected value.
    #[error("malformed {what} token {token:?}")]
    BadValue { what: &'static str, token: String },

    /// Declared dimensions must both be positive.
    #[error("image dimensions must be positive, got {width}x{height}")]
    BadDimensions { width: u32, height: u32 },

    /// The max-intensity header field must be in `1..=255`.
    #[error("max intensity must be in 1..=255, got {0}")]
    BadMaxValue(u32),

    /// A sample value exceeds the declared maximum.
    #[error("sample value {value} exceeds the declared maximum {max}")]
    ValueOutOfRange { value: u32, max: u8 },

    /// Non-whitespace input remains after the final sample.
    #[error("trailing data after the last of {0} samples")]
    TrailingGarbage(usize),
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Whitespace-delimited tokens with `#` comments skipped to end of line.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn next(&mut self) -> Option<&'a str> {
        loop {
            self.rest = self.rest.trim_start();
            if let Some(comment) = self.rest.strip_prefix('#') {
                self.rest = match comment.find('\n') {
                    Some(nl) => &comment[nl + 1..],
                    None => "",
                };
                continue;
            }
            if self.rest.is_empty() {
                return None;
            }
            let end = self
                .rest
                .find(|c: char| c.is_ascii_whitespace())
                .unwrap_or(self.rest.len());
            let (token, rest) = self.rest.split_at(end);
            self.rest = rest;
            return Some(token);
        }
    }

    fn expect(&mut self, what: &'static str) -> Result<&'a str, ParseError> {
        self.next().ok_or(ParseError::MissingToken(what))
    }

    fn number(&mut self, what: &'static str) -> Result<u32, ParseError> {
        let token = self.expect(what)?;
        token.parse().map_err(|_| ParseError::BadValue {
            what,
            token: token.to_string(),
        })
    }
}

// ============================================================================
// Header
// ============================================================================

struct Header {
    width: u32,
    height: u32,
    max: u8,
}

impl Header {
    fn samples(&self, channels: usize) -> usize {
        self.width as usize * self.height as usize * channels
    }
}

fn decode_header<S: Sample>(tokens: &mut Tokens<'_>) -> Result<Header, ParseError> {
    let magic = tokens.expect("magic number")?;
    if magic != S::MAGIC {
        return Err(ParseError::BadMagic(magic.to_string()));
    }
    let width = tokens.number("width")?;
    let height = tokens.number("height")?;
    if width == 0 || height == 0 {
        return Err(ParseError::BadDimensions { width, height });
    }
    let max = if S::HAS_MAX {
        let max = tokens.number("max intensity")?;
        if max == 0 || max > 255 {
            return Err(ParseError::BadMaxValue(max));
        }
        max as u8
    } else {
        1
    };
    debug!("decoded {} header: {}x{}, max {}", S::MAGIC, width, height, max);
    Ok(Header { width, height, max })
}

fn finish(mut tokens: Tokens<'_>, samples: usize) -> Result<(), ParseError> {
    match tokens.next() {
        Some(_) => Err(ParseError::TrailingGarbage(samples)),
        None => Ok(()),
    }
}

fn intensity(tokens: &mut Tokens<'_>, what: &'static str, max: u8) -> Result<u8, ParseError> {
    let value = tokens.number(what)?;
    if value > max as u32 {
        return Err(ParseError::ValueOutOfRange { value, max });
    }
    Ok(value as u8)
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode a plain-text PBM (`P1`) bitmap. Samples must be `0` or `1`.
pub fn decode_bitmap(input: &str) -> Result<Bitmap, ParseError> {
    let mut tokens = Tokens::new(input);
    let header = decode_header::<bool>(&mut tokens)?;
    let count = header.samples(1);

    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        let token = tokens.expect("bitmap sample")?;
        match token {
            "0" => data.push(false),
            "1" => data.push(true),
            _ => {
                return Err(ParseError::BadValue {
                    what: "bitmap sample",
                    token: token.to_string(),
                })
            }
        }
    }
    finish(tokens, count)?;
    Ok(Canvas::from_raw(header.width, header.height, 1, data))
}

/// Decode a plain-text PGM (`P2`) graymap.
pub fn decode_graymap(input: &str) -> Result<Graymap, ParseError> {
    let mut tokens = Tokens::new(input);
    let header = decode_header::<u8>(&mut tokens)?;
    let count = header.samples(1);

    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        data.push(intensity(&mut tokens, "gray sample", header.max)?);
    }
    finish(tokens, count)?;
    Ok(Canvas::from_raw(header.width, header.height, header.max, data))
}

/// Decode a plain-text PPM (`P3`) pixmap.
pub fn decode_pixmap(input: &str) -> Result<Pixmap, ParseError> {
    let mut tokens = Tokens::new(input);
    let header = decode_header::<Rgb8>(&mut tokens)?;
    let count = header.samples(1);

    let mut data = Vec::with_capacity(count);
    for _ in 0..count {
        let r = intensity(&mut tokens, "red sample", header.max)?;
        let g = intensity(&mut tokens, "green sample", header.max)?;
        let b = intensity(&mut tokens, "blue sample", header.max)?;
        data.push(Rgb8::new(r, g, b));
    }
    finish(tokens, count * 3)?;
    Ok(Canvas::from_raw(header.width, header.height, header.max, data))
}

// ============================================================================
// Image (magic dispatch)
// ============================================================================

/// A decoded image of any of the three plain-text formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Bitmap(Bitmap),
    Graymap(Graymap),
    Pixmap(Pixmap),
}

impl Image {
    /// Encode back into the matching plain-text format.
    pub fn encode(&self) -> String {
        match self {
            Image::Bitmap(c) => encode_bitmap(c),
            Image::Graymap(c) => encode_graymap(c),
            Image::Pixmap(c) => encode_pixmap(c),
        }
    }

    /// Encode and write to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        fs::write(path, self.encode())?;
        Ok(())
    }
}

/// Decode any plain-text Netpbm image, dispatching on the magic number.
pub fn decode(input: &str) -> Result<Image, ParseError> {
    let magic = Tokens::new(input).expect("magic number")?;
    match magic {
        "P1" => decode_bitmap(input).map(Image::Bitmap),
        "P2" => decode_graymap(input).map(Image::Graymap),
        "P3" => decode_pixmap(input).map(Image::Pixmap),
        other => Err(ParseError::BadMagic(other.to_string())),
    }
}

/// Read and decode an image file.
pub fn load(path: impl AsRef<Path>) -> Result<Image, ParseError> {
    let path = path.as_ref();
    debug!("loading {}", path.display());
    let text = fs::read_to_string(path)?;
    decode(&text)
}

// ============================================================================
// Encoding
// ============================================================================

fn header_text<S: Sample>(canvas: &Canvas<S>) -> String {
    let mut out = String::new();
    out.push_str(S::MAGIC);
    out.push('\n');
    out.push_str(&format!("{} {}\n", canvas.width(), canvas.height()));
    if S::HAS_MAX {
        out.push_str(&format!("{}\n", canvas.max_value()));
    }
    out
}

/// Encode a bitmap as plain-text PBM (`P1`).
pub fn encode_bitmap(canvas: &Bitmap) -> String {
    let mut out = header_text(canvas);
    for y in 0..canvas.height() {
        for &bit in canvas.row(y) {
            out.push_str(if bit { "1 " } else { "0 " });
        }
        out.push('\n');
    }
    out
}

/// Encode a graymap as plain-text PGM (`P2`).
pub fn encode_graymap(canvas: &Graymap) -> String {
    let mut out = header_text(canvas);
    for y in 0..canvas.height() {
        for &v in canvas.row(y) {
            out.push_str(&format!("{} ", v));
        }
        out.push('\n');
    }
    out
}

/// Encode a pixmap as plain-text PPM (`P3`).
pub fn encode_pixmap(canvas: &Pixmap) -> String {
    let mut out = header_text(canvas);
    for y in 0..canvas.height() {
        for &px in canvas.row(y) {
            out.push_str(&format!("{} {} {} ", px.r, px.g, px.b));
        }
        out.push('\n');
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_decode_bitmap() {
        let text = "P1\n# a comment\n3 2\n1 0 1\n0 1 0\n";
        let b = decode_bitmap(text).unwrap();
        assert_eq!(b.size(), (3, 2));
        assert_eq!(b.row(0), &[true, false, true]);
        assert_eq!(b.row(1), &[false, true, false]);
    }

    #[test_log::test]
    fn test_decode_graymap() {
        let text = "P2\n2 2\n15\n0 7\n15 3\n";
        let g = decode_graymap(text).unwrap();
        assert_eq!(g.max_value(), 15);
        assert_eq!(g.row(0), &[0, 7]);
        assert_eq!(g.row(1), &[15, 3]);
    }

    #[test]
    fn test_decode_pixmap() {
        let text = "P3\n2 1\n255\n255 0 0  0 0 255\n";
        let p = decode_pixmap(text).unwrap();
        assert_eq!(p.at(0, 0).unwrap(), Rgb8::new(255, 0, 0));
        assert_eq!(p.at(1, 0).unwrap(), Rgb8::new(0, 0, 255));
    }

    #[test]
    fn test_comments_anywhere_in_header() {
        let text = "P2 # magic\n# dims\n2 # width\n1\n# max next\n9\n4 5\n";
        let g = decode_graymap(text).unwrap();
        assert_eq!(g.size(), (2, 1));
        assert_eq!(g.row(0), &[4, 5]);
    }

    #[test]
    fn test_bad_magic() {
        assert!(matches!(
            decode_graymap("P3\n1 1\n255\n0 0 0\n"),
            Err(ParseError::BadMagic(_))
        ));
        assert!(matches!(decode("P6\n1 1\n255\n"), Err(ParseError::BadMagic(_))));
        assert!(matches!(decode(""), Err(ParseError::MissingToken(_))));
    }

    #[test]
    fn test_bad_dimensions() {
        assert!(matches!(
            decode_graymap("P2\n0 4\n255\n"),
            Err(ParseError::BadDimensions { .. })
        ));
    }

    #[test]
    fn test_bad_max() {
        assert!(matches!(
            decode_graymap("P2\n1 1\n0\n0\n"),
            Err(ParseError::BadMaxValue(0))
        ));
        assert!(matches!(
            decode_graymap("P2\n1 1\n300\n0\n"),
            Err(ParseError::BadMaxValue(300))
        ));
    }

    #[test]
    fn test_short_body() {
        assert!(matches!(
            decode_graymap("P2\n2 2\n9\n1 2 3\n"),
            Err(ParseError::MissingToken("gray sample"))
        ));
    }

    #[test]
    fn test_trailing_garbage() {
        assert!(matches!(
            decode_graymap("P2\n1 1\n9\n3 7\n"),
            Err(ParseError::TrailingGarbage(_))
        ));
    }

    #[test]
    fn test_sample_over_max() {
        assert!(matches!(
            decode_graymap("P2\n1 1\n9\n10\n"),
            Err(ParseError::ValueOutOfRange { value: 10, max: 9 })
        ));
        assert!(decode_pixmap("P3\n1 1\n9\n1 2 10\n").is_err());
    }

    #[test]
    fn test_bitmap_rejects_non_binary_sample() {
        assert!(matches!(
            decode_bitmap("P1\n1 1\n2\n"),
            Err(ParseError::BadValue { .. })
        ));
    }

    #[test]
    fn test_malformed_number() {
        assert!(matches!(
            decode_graymap("P2\nwide 2\n9\n"),
            Err(ParseError::BadValue { what: "width", .. })
        ));
    }

    #[test]
    fn test_encode_layouts() {
        let mut b = Bitmap::new(2, 2, 0).unwrap();
        b.set(0, 0, true).unwrap();
        assert_eq!(encode_bitmap(&b), "P1\n2 2\n1 0 \n0 0 \n");

        let mut g = Graymap::new(2, 1, 15).unwrap();
        g.set(1, 0, 7).unwrap();
        assert_eq!(encode_graymap(&g), "P2\n2 1\n15\n0 7 \n");

        let mut p = Pixmap::new(1, 1, 255).unwrap();
        p.set(0, 0, Rgb8::new(1, 2, 3)).unwrap();
        assert_eq!(encode_pixmap(&p), "P3\n1 1\n255\n1 2 3 \n");
    }

    #[test]
    fn test_decode_encode_round_trip() {
        let text = "P3\n2 2\n255\n1 2 3 4 5 6 \n7 8 9 10 11 12 \n";
        let img = decode(text).unwrap();
        assert_eq!(img.encode(), text);
    }

    #[test]
    fn test_dispatch_matches_magic() {
        assert!(matches!(decode("P1\n1 1\n0\n"), Ok(Image::Bitmap(_))));
        assert!(matches!(decode("P2\n1 1\n9\n0\n"), Ok(Image::Graymap(_))));
        assert!(matches!(decode("P3\n1 1\n9\n0 0 0\n"), Ok(Image::Pixmap(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load("/nonexistent/image.ppm"),
            Err(ParseError::Io(_))
        ));
    }
}
