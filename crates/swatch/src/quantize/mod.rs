//! Modified median cut quantization (MMCQ)
//!
//! Pixels are bucketed into a 5-bit-per-channel histogram. Boxes over that
//! histogram are repeatedly split at the population median of their widest
//! axis. The first 75 % of the requested colors are produced by splitting the
//! most populous box; the rest by splitting the box with the largest
//! population × volume, which pulls out small but distinct color regions.

mod vbox;

use crate::color::Rgb;
use vbox::{Histogram, VBox};

/// Fraction of the target produced in the population-ordered phase.
const POPULATION_PHASE: f32 = 0.75;

/// Upper bound on split attempts per phase.
const MAX_ITERATIONS: usize = 1000;

/// A representative color of one final box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedColor {
    pub rgb: Rgb,
    pub population: u32,
}

/// Reduce `pixels` to at most `max_colors` representative colors.
///
/// Returns colors ordered by descending population. An empty input yields
/// an empty result.
pub fn quantize(pixels: &[Rgb], max_colors: usize) -> Vec<QuantizedColor> {
    if pixels.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let histogram = Histogram::from_pixels(pixels);
    let Some(root) = VBox::enclosing(&histogram) else {
        return Vec::new();
    };

    let mut boxes = vec![root];
    let population_target = ((max_colors as f32) * POPULATION_PHASE).ceil() as usize;

    split_until(&mut boxes, &histogram, population_target.max(1), |b| {
        b.count() as u64
    });
    split_until(&mut boxes, &histogram, max_colors, |b| {
        b.count() as u64 * b.volume()
    });

    let mut colors: Vec<QuantizedColor> = boxes
        .iter()
        .map(|b| QuantizedColor {
            rgb: b.average(&histogram),
            population: b.count(),
        })
        .collect();
    colors.sort_by(|a, b| b.population.cmp(&a.population));
    colors
}

/// Split the highest-priority splittable box until `target` boxes exist or
/// nothing is left to split.
fn split_until<F>(boxes: &mut Vec<VBox>, histogram: &Histogram, target: usize, priority: F)
where
    F: Fn(&VBox) -> u64,
{
    for _ in 0..MAX_ITERATIONS {
        if boxes.len() >= target {
            return;
        }

        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_splittable())
            .max_by_key(|(_, b)| priority(b))
            .map(|(i, _)| i);

        let Some(index) = candidate else {
            return;
        };

        let parent = boxes.swap_remove(index);
        let Some((left, right)) = parent.split(histogram) else {
            boxes.push(parent);
            return;
        };
        boxes.push(left);
        boxes.push(right);
    }
}
