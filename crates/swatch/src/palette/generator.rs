//! Role generator: assigns quantized colors to swatch roles
//!
//! Each role is a window over HSL saturation and lightness plus a target
//! point inside it. Every candidate color inside the window is scored by a
//! weighted mean of how close it sits to the target saturation, how close to
//! the target lightness, and how populous it is relative to the most
//! populous color. The best-scoring color wins the role; a color wins at
//! most one role.

use super::palette::{Palette, Swatch, SwatchRole};
use crate::color::{Hsl, Rgb};
use crate::quantize::QuantizedColor;

const TARGET_DARK_LUMA: f32 = 0.26;
const MAX_DARK_LUMA: f32 = 0.45;
const MIN_LIGHT_LUMA: f32 = 0.55;
const TARGET_LIGHT_LUMA: f32 = 0.74;
const MIN_NORMAL_LUMA: f32 = 0.3;
const TARGET_NORMAL_LUMA: f32 = 0.5;
const MAX_NORMAL_LUMA: f32 = 0.7;
const TARGET_MUTED_SATURATION: f32 = 0.3;
const MAX_MUTED_SATURATION: f32 = 0.4;
const TARGET_VIBRANT_SATURATION: f32 = 1.0;
const MIN_VIBRANT_SATURATION: f32 = 0.35;

const WEIGHT_SATURATION: f32 = 3.0;
const WEIGHT_LUMA: f32 = 6.5;
const WEIGHT_POPULATION: f32 = 0.5;

/// Saturation/lightness window and target point for one role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleTarget {
    pub target_luma: f32,
    pub min_luma: f32,
    pub max_luma: f32,
    pub target_saturation: f32,
    pub min_saturation: f32,
    pub max_saturation: f32,
}

impl RoleTarget {
    pub fn for_role(role: SwatchRole) -> Self {
        let (target_luma, min_luma, max_luma) = match role {
            SwatchRole::Vibrant | SwatchRole::Muted => {
                (TARGET_NORMAL_LUMA, MIN_NORMAL_LUMA, MAX_NORMAL_LUMA)
            }
            SwatchRole::LightVibrant | SwatchRole::LightMuted => {
                (TARGET_LIGHT_LUMA, MIN_LIGHT_LUMA, 1.0)
            }
            SwatchRole::DarkVibrant | SwatchRole::DarkMuted => {
                (TARGET_DARK_LUMA, 0.0, MAX_DARK_LUMA)
            }
        };
        let (target_saturation, min_saturation, max_saturation) = match role {
            SwatchRole::Vibrant | SwatchRole::LightVibrant | SwatchRole::DarkVibrant => {
                (TARGET_VIBRANT_SATURATION, MIN_VIBRANT_SATURATION, 1.0)
            }
            SwatchRole::Muted | SwatchRole::LightMuted | SwatchRole::DarkMuted => {
                (TARGET_MUTED_SATURATION, 0.0, MAX_MUTED_SATURATION)
            }
        };

        Self {
            target_luma,
            min_luma,
            max_luma,
            target_saturation,
            min_saturation,
            max_saturation,
        }
    }

    fn accepts(&self, hsl: Hsl) -> bool {
        hsl.s >= self.min_saturation
            && hsl.s <= self.max_saturation
            && hsl.l >= self.min_luma
            && hsl.l <= self.max_luma
    }

    fn score(&self, hsl: Hsl, population: u32, max_population: u32) -> f32 {
        let relative_population = if max_population == 0 {
            0.0
        } else {
            population as f32 / max_population as f32
        };

        weighted_mean(&[
            (invert_diff(hsl.s, self.target_saturation), WEIGHT_SATURATION),
            (invert_diff(hsl.l, self.target_luma), WEIGHT_LUMA),
            (relative_population, WEIGHT_POPULATION),
        ])
    }
}

fn invert_diff(value: f32, target: f32) -> f32 {
    1.0 - (value - target).abs()
}

fn weighted_mean(values: &[(f32, f32)]) -> f32 {
    let (sum, weights) = values
        .iter()
        .fold((0.0, 0.0), |(s, w), &(v, weight)| (s + v * weight, w + weight));
    if weights == 0.0 {
        0.0
    } else {
        sum / weights
    }
}

/// Selection order: normal, light, dark for vibrant, then the same for muted.
const SELECTION_ORDER: [SwatchRole; 6] = [
    SwatchRole::Vibrant,
    SwatchRole::LightVibrant,
    SwatchRole::DarkVibrant,
    SwatchRole::Muted,
    SwatchRole::LightMuted,
    SwatchRole::DarkMuted,
];

/// Build a palette from quantized colors.
pub fn generate(colors: &[QuantizedColor]) -> Palette {
    let candidates: Vec<(QuantizedColor, Hsl)> =
        colors.iter().map(|c| (*c, Hsl::from(c.rgb))).collect();
    let max_population = colors.iter().map(|c| c.population).max().unwrap_or(0);

    let mut palette = Palette::default();
    let mut taken: Vec<Rgb> = Vec::with_capacity(SELECTION_ORDER.len());

    for role in SELECTION_ORDER {
        let target = RoleTarget::for_role(role);
        let best = candidates
            .iter()
            .filter(|(c, hsl)| target.accepts(*hsl) && !taken.contains(&c.rgb))
            .map(|(c, hsl)| (c, target.score(*hsl, c.population, max_population)))
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((color, _)) = best {
            taken.push(color.rgb);
            palette.set(role, Swatch::new(color.rgb, color.population));
        }
    }

    fill_vibrant_family(&mut palette);
    palette
}

/// Derive missing vibrant roles from their siblings by re-targeting
/// lightness. Derived swatches have zero population.
fn fill_vibrant_family(palette: &mut Palette) {
    let derive = |source: Swatch, luma: f32| -> Swatch {
        let hsl = Hsl::from(source.rgb).with_lightness(luma);
        Swatch::new(Rgb::from(hsl), 0)
    };

    let no_vibrant = palette.get(SwatchRole::Vibrant).is_none()
        && palette.get(SwatchRole::DarkVibrant).is_none()
        && palette.get(SwatchRole::LightVibrant).is_none();
    if no_vibrant {
        if let Some(&dark_muted) = palette.get(SwatchRole::DarkMuted) {
            palette.set(SwatchRole::DarkVibrant, derive(dark_muted, TARGET_DARK_LUMA));
        }
        if let Some(&light_muted) = palette.get(SwatchRole::LightMuted) {
            palette.set(
                SwatchRole::LightVibrant,
                derive(light_muted, TARGET_LIGHT_LUMA),
            );
        }
    }

    if palette.get(SwatchRole::Vibrant).is_none() {
        let sibling = palette
            .get(SwatchRole::DarkVibrant)
            .or_else(|| palette.get(SwatchRole::LightVibrant))
            .copied();
        if let Some(sibling) = sibling {
            palette.set(SwatchRole::Vibrant, derive(sibling, TARGET_NORMAL_LUMA));
        }
    }

    if let Some(&vibrant) = palette.get(SwatchRole::Vibrant) {
        if palette.get(SwatchRole::DarkVibrant).is_none() {
            palette.set(SwatchRole::DarkVibrant, derive(vibrant, TARGET_DARK_LUMA));
        }
        if palette.get(SwatchRole::LightVibrant).is_none() {
            palette.set(SwatchRole::LightVibrant, derive(vibrant, TARGET_LIGHT_LUMA));
        }
    }
}
