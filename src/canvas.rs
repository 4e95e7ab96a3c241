//! The shared pixel-grid container.
//!
//! `Canvas<S>` holds a rectangular row-major grid of samples and is the
//! single surface every transform and rasterizer operates on. The three
//! Netpbm variants are instantiations over the sample kind: [`Bitmap`],
//! [`Graymap`], [`Pixmap`].
//!
//! Accessors come in two strictness levels:
//!
//! - [`at`](Canvas::at) / [`set`](Canvas::set) check bounds and fail with
//!   [`Error::OutOfBounds`] — the external accessor contract;
//! - [`plot`](Canvas::plot) / [`hline`](Canvas::hline) clip silently, for
//!   rasterizers whose shapes may legitimately graze the canvas edge.
//!
//! A canvas never grows. Writes outside the grid through the strict
//! accessors are errors, through the clipping layer they are dropped.

use crate::color::Rgb8;
use crate::error::{Error, Result};
use crate::sample::Sample;

/// Bitmap canvas (PBM, `P1`): boolean samples, `true` is black.
pub type Bitmap = Canvas<bool>;

/// Graymap canvas (PGM, `P2`): one intensity per pixel.
pub type Graymap = Canvas<u8>;

/// Pixmap canvas (PPM, `P3`): one RGB triple per pixel.
pub type Pixmap = Canvas<Rgb8>;

// ============================================================================
// Canvas
// ============================================================================

/// Rectangular row-major sample grid with a fixed maximum intensity.
///
/// Owns its pixel storage exclusively; `Clone` deep-copies every row.
/// Dimensions are fixed for the canvas's lifetime except across
/// [`rotate_90_clockwise`](Canvas::rotate_90_clockwise), which swaps them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas<S: Sample> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) max_value: u8,
    pub(crate) data: Vec<S>,
}

impl<S: Sample> Canvas<S> {
    /// Create a zero-valued canvas.
    ///
    /// Gray and color canvases need `max_value >= 1`; the bitmap kind has
    /// no max intensity and ignores the argument (stored as 1).
    pub fn new(width: u32, height: u32, max_value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGeometry(
                "canvas dimensions must be positive",
            ));
        }
        if S::HAS_MAX && max_value == 0 {
            return Err(Error::InvalidGeometry("max intensity must be positive"));
        }
        Ok(Self {
            width,
            height,
            max_value: if S::HAS_MAX { max_value } else { 1 },
            data: vec![S::default(); width as usize * height as usize],
        })
    }

    /// Wrap already-validated sample storage. Codec-internal constructor.
    pub(crate) fn from_raw(width: u32, height: u32, max_value: u8, data: Vec<S>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            max_value,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Maximum intensity a channel may carry. Always 1 for bitmaps.
    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    /// Intensity channels per pixel: 1 for bitmap/graymap, 3 for pixmap.
    pub fn channel_depth(&self) -> usize {
        S::CHANNELS
    }

    /// Magic number of the plain-text encoding for this canvas kind.
    pub fn magic(&self) -> &'static str {
        S::MAGIC
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns `true` if (x, y) lies inside the grid.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height
    }

    /// Sample at (x, y).
    pub fn at(&self, x: i32, y: i32) -> Result<S> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.data[self.index(x as u32, y as u32)])
    }

    /// Replace the sample at (x, y).
    ///
    /// Out-of-bounds writes fail; the grid never grows to absorb them.
    pub fn set(&mut self, x: i32, y: i32, value: S) -> Result<()> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let i = self.index(x as u32, y as u32);
        self.data[i] = value;
        Ok(())
    }

    /// Row `y` as a slice of `width` samples.
    ///
    /// Panics if `y >= height`; use [`at`](Canvas::at) for fallible access.
    pub fn row(&self, y: u32) -> &[S] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Mutable row access. Same contract as [`row`](Canvas::row).
    pub fn row_mut(&mut self, y: u32) -> &mut [S] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = self.index(0, y);
        let w = self.width as usize;
        &mut self.data[start..start + w]
    }

    /// Clipping write: out-of-bounds plots are dropped, not errors.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, value: S) {
        if self.contains(x, y) {
            let i = self.index(x as u32, y as u32);
            self.data[i] = value;
        }
    }

    /// Horizontal span at row `y` from `x1` to `x2`, either order.
    ///
    /// Clamped to the row; a no-op when the row or the whole span is
    /// outside the canvas.
    pub fn hline(&mut self, y: i32, x1: i32, x2: i32, value: S) {
        if y < 0 || y as u32 >= self.height {
            return;
        }
        let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        if hi < 0 || lo >= self.width as i32 {
            return;
        }
        let lo = lo.max(0) as u32;
        let hi = hi.min(self.width as i32 - 1) as u32;
        let start = self.index(lo, y as u32);
        let len = (hi - lo + 1) as usize;
        for s in &mut self.data[start..start + len] {
            *s = value;
        }
    }
}

// ============================================================================
// Bitmap derivation
// ============================================================================

impl Graymap {
    /// Derive a bitmap by thresholding at `max_value / 2` (truncating).
    ///
    /// A bit is set iff the intensity is strictly greater than the
    /// threshold, so with `max_value = 10` an intensity of 5 stays clear
    /// and 6 is set.
    pub fn to_bitmap(&self) -> Bitmap {
        self.to_bitmap_with_threshold(self.max_value / 2)
    }

    /// Derive a bitmap with an explicit threshold (strictly-greater rule).
    pub fn to_bitmap_with_threshold(&self, threshold: u8) -> Bitmap {
        let data = self.data.iter().map(|&v| v > threshold).collect();
        Bitmap::from_raw(self.width, self.height, 1, data)
    }
}

// ============================================================================
// Tests
// ============================================================================
