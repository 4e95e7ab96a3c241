//! In-place geometric transforms.
//!
//! All four operate on any sample kind. They are pure relabelings of the
//! grid; only rotation allocates, since the rotated grid has swapped
//! dimensions.

use crate::canvas::Canvas;
use crate::sample::Sample;

impl<S: Sample> Canvas<S> {
    /// Replace every sample with its complement relative to the max
    /// intensity: `v -> max - v` per channel, boolean NOT for bitmaps.
    pub fn invert(&mut self) {
        let max = self.max_value;
        for s in self.data.iter_mut() {
            *s = s.invert(max);
        }
    }

    /// Reverse each row left to right. Odd widths leave the center column.
    pub fn flip_horizontal(&mut self) {
        let w = self.width as usize;
        for row in self.data.chunks_exact_mut(w) {
            row.reverse();
        }
    }

    /// Reverse the row order top to bottom. Odd heights leave the center row.
    pub fn flip_vertical(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        for y in 0..h / 2 {
            for x in 0..w {
                self.data.swap(y * w + x, (h - 1 - y) * w + x);
            }
        }
    }

    /// Rotate the grid 90° clockwise.
    ///
    /// The sample at `(x, y)` moves to `(height - 1 - y, x)` in the rotated
    /// grid; the canvas's own width and height swap.
    pub fn rotate_90_clockwise(&mut self) {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut rotated = vec![S::default(); w * h];
        for y in 0..h {
            for x in 0..w {
                // rotated grid is h wide: row x, column h-1-y
                rotated[x * h + (h - 1 - y)] = self.data[y * w + x];
            }
        }
        self.data = rotated;
        std::mem::swap(&mut self.width, &mut self.height);
    }
}

// ============================================================================
// Tests
// ============================================================================
