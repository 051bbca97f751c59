//! Histogram and color-space box primitives for the quantizer

use crate::color::Rgb;

const SIGBITS: u32 = 5;
const RSHIFT: u32 = 8 - SIGBITS;
const SIDE: usize = 1 << SIGBITS;

#[inline]
fn cell(r: usize, g: usize, b: usize) -> usize {
    (r << (2 * SIGBITS)) | (g << SIGBITS) | b
}

/// Pixel counts per reduced-precision color cell.
pub(super) struct Histogram {
    counts: Vec<u32>,
}

impl Histogram {
    pub(super) fn from_pixels(pixels: &[Rgb]) -> Self {
        let mut counts = vec![0u32; SIDE * SIDE * SIDE];
        for p in pixels {
            let idx = cell(
                (p.r >> RSHIFT) as usize,
                (p.g >> RSHIFT) as usize,
                (p.b >> RSHIFT) as usize,
            );
            counts[idx] += 1;
        }
        Self { counts }
    }

    #[inline]
    fn get(&self, r: usize, g: usize, b: usize) -> u32 {
        self.counts[cell(r, g, b)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Red,
    Green,
    Blue,
}

/// An axis-aligned box of histogram cells, inclusive on both ends.
///
/// Boxes are always shrunk to the populated cells they contain, so a box
/// with non-zero width on some axis has population at both ends of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VBox {
    lo: [usize; 3],
    hi: [usize; 3],
    count: u32,
}

impl VBox {
    /// Smallest box containing every populated cell, or `None` when empty.
    pub(super) fn enclosing(histogram: &Histogram) -> Option<Self> {
        Self::fit(histogram, [0, 0, 0], [SIDE - 1, SIDE - 1, SIDE - 1])
    }

    fn fit(histogram: &Histogram, lo: [usize; 3], hi: [usize; 3]) -> Option<Self> {
        let mut min = [usize::MAX; 3];
        let mut max = [0usize; 3];
        let mut count = 0u32;

        for r in lo[0]..=hi[0] {
            for g in lo[1]..=hi[1] {
                for b in lo[2]..=hi[2] {
                    let n = histogram.get(r, g, b);
                    if n == 0 {
                        continue;
                    }
                    count += n;
                    for (axis, v) in [r, g, b].into_iter().enumerate() {
                        min[axis] = min[axis].min(v);
                        max[axis] = max[axis].max(v);
                    }
                }
            }
        }

        (count > 0).then_some(Self {
            lo: min,
            hi: max,
            count,
        })
    }

    pub(super) fn count(&self) -> u32 {
        self.count
    }

    pub(super) fn volume(&self) -> u64 {
        (0..3).map(|a| (self.hi[a] - self.lo[a] + 1) as u64).product()
    }

    pub(super) fn is_splittable(&self) -> bool {
        (0..3).any(|a| self.hi[a] > self.lo[a])
    }

    fn widest_axis(&self) -> Axis {
        let width = |a: usize| self.hi[a] - self.lo[a];
        let (r, g, b) = (width(0), width(1), width(2));
        if r >= g && r >= b {
            Axis::Red
        } else if g >= b {
            Axis::Green
        } else {
            Axis::Blue
        }
    }

    /// Population of the slab of this box at `pos` along `axis`.
    fn slab_count(&self, histogram: &Histogram, axis: Axis, pos: usize) -> u32 {
        let mut lo = self.lo;
        let mut hi = self.hi;
        let a = axis as usize;
        lo[a] = pos;
        hi[a] = pos;

        let mut n = 0;
        for r in lo[0]..=hi[0] {
            for g in lo[1]..=hi[1] {
                for b in lo[2]..=hi[2] {
                    n += histogram.get(r, g, b);
                }
            }
        }
        n
    }

    /// Split at the population median of the widest axis.
    ///
    /// Returns `None` for boxes that cover a single cell.
    pub(super) fn split(&self, histogram: &Histogram) -> Option<(VBox, VBox)> {
        if !self.is_splittable() {
            return None;
        }

        let axis = self.widest_axis();
        let a = axis as usize;
        let half = self.count / 2;

        let mut cumulative = 0u32;
        let mut cut = self.hi[a];
        for pos in self.lo[a]..=self.hi[a] {
            cumulative += self.slab_count(histogram, axis, pos);
            if cumulative > half {
                cut = pos;
                break;
            }
        }
        // Both ends of a fitted axis are populated, so cutting just before
        // `hi` still leaves something on each side.
        if cut >= self.hi[a] {
            cut = self.hi[a] - 1;
        }

        let mut left_hi = self.hi;
        left_hi[a] = cut;
        let mut right_lo = self.lo;
        right_lo[a] = cut + 1;

        let left = Self::fit(histogram, self.lo, left_hi)?;
        let right = Self::fit(histogram, right_lo, self.hi)?;
        Some((left, right))
    }

    /// Population-weighted mean color of the cells in this box.
    pub(super) fn average(&self, histogram: &Histogram) -> Rgb {
        let mult = (1u32 << RSHIFT) as f64;
        let mut sum = [0f64; 3];
        let mut total = 0f64;

        for r in self.lo[0]..=self.hi[0] {
            for g in self.lo[1]..=self.hi[1] {
                for b in self.lo[2]..=self.hi[2] {
                    let n = histogram.get(r, g, b) as f64;
                    if n == 0.0 {
                        continue;
                    }
                    total += n;
                    sum[0] += n * (r as f64 + 0.5) * mult;
                    sum[1] += n * (g as f64 + 0.5) * mult;
                    sum[2] += n * (b as f64 + 0.5) * mult;
                }
            }
        }

        let channel = |i: usize| -> u8 {
            let v = if total > 0.0 {
                sum[i] / total
            } else {
                (self.lo[i] + self.hi[i] + 1) as f64 * mult / 2.0
            };
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(channel(0), channel(1), channel(2))
    }
}
