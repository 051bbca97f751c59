//! Turns an extracted palette into CSS backgrounds for the color layers.

use std::sync::Arc;
use swatch::{Palette, Rgb, SwatchRole};

use crate::models::{
    Background, ColorStop, ComposedLayers, CssColor, LinearGradient, StrategyKind,
};

const FALLBACK_DARK: CssColor = CssColor::Hex("#000");
const FALLBACK_NAVY: CssColor = CssColor::Hex("#1a1a2e");

/// Maps an extraction outcome to color layer backgrounds.
///
/// `None` means extraction failed; implementations return their fixed
/// fallback in that case.
pub trait GradientStrategy: Send + Sync {
    fn compose(&self, palette: Option<&Palette>) -> ComposedLayers;
}

/// Build the strategy for a variant's strategy kind.
pub fn strategy_for(kind: StrategyKind) -> Arc<dyn GradientStrategy> {
    match kind {
        StrategyKind::NamedRole => Arc::new(NamedRoleStrategy),
        StrategyKind::BrightnessSort { angle_deg, wash } => {
            Arc::new(BrightnessSortStrategy::new(angle_deg, wash))
        }
    }
}

/// A color picked by walking a role preference chain.
struct RoleChain {
    roles: [SwatchRole; 3],
    default: Rgb,
}

impl RoleChain {
    fn resolve(&self, palette: &Palette) -> Rgb {
        palette.first_of(&self.roles).unwrap_or(self.default)
    }
}

const PRIMARY: RoleChain = RoleChain {
    roles: [SwatchRole::DarkVibrant, SwatchRole::Vibrant, SwatchRole::Muted],
    default: Rgb::new(20, 20, 40),
};

const SECONDARY: RoleChain = RoleChain {
    roles: [SwatchRole::DarkMuted, SwatchRole::Muted, SwatchRole::DarkVibrant],
    default: Rgb::new(0, 0, 0),
};

const ACCENT: RoleChain = RoleChain {
    roles: [
        SwatchRole::Vibrant,
        SwatchRole::LightVibrant,
        SwatchRole::LightMuted,
    ],
    default: Rgb::new(40, 40, 60),
};

/// Vertical three-stop gradient: accent at the top, primary in the middle,
/// secondary at the bottom.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedRoleStrategy;

impl NamedRoleStrategy {
    const ANGLE_DEG: f32 = 180.0;

    /// Resolve `(primary, secondary, accent)` from the role chains.
    pub fn pick(palette: &Palette) -> (Rgb, Rgb, Rgb) {
        (
            PRIMARY.resolve(palette),
            SECONDARY.resolve(palette),
            ACCENT.resolve(palette),
        )
    }
}

impl GradientStrategy for NamedRoleStrategy {
    fn compose(&self, palette: Option<&Palette>) -> ComposedLayers {
        let color = match palette {
            Some(palette) => {
                let (primary, secondary, accent) = Self::pick(palette);
                LinearGradient::new(
                    Self::ANGLE_DEG,
                    vec![
                        ColorStop::new(CssColor::Rgb(accent), 0),
                        ColorStop::new(CssColor::Rgb(primary), 50),
                        ColorStop::new(CssColor::Rgb(secondary), 100),
                    ],
                )
            }
            None => LinearGradient::new(
                Self::ANGLE_DEG,
                vec![
                    ColorStop::new(FALLBACK_NAVY, 0),
                    ColorStop::new(FALLBACK_DARK, 100),
                ],
            ),
        };

        ComposedLayers {
            color: Background::Linear(color),
            wash: None,
        }
    }
}

/// Diagonal gradient from the darkest through the middle swatch by
/// luminance. With `wash`, the lightest swatch goes to a separate layer
/// fading upward to transparent; without it, it becomes a third stop.
#[derive(Debug, Clone, Copy)]
pub struct BrightnessSortStrategy {
    angle_deg: f32,
    wash: bool,
}

/// Darkest, middle and lightest colors of a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessPick {
    pub dark: Rgb,
    pub mid: Rgb,
    pub light: Rgb,
}

impl BrightnessSortStrategy {
    pub fn new(angle_deg: f32, wash: bool) -> Self {
        Self { angle_deg, wash }
    }

    /// Sort the palette's colors by ascending luminance and pick the ends and
    /// the element at `len / 2`. `None` for an empty palette.
    pub fn pick(palette: &Palette) -> Option<BrightnessPick> {
        let mut colors = palette.colors();
        if colors.is_empty() {
            return None;
        }
        // stable: equal luminance keeps canonical role order
        colors.sort_by(|a, b| a.luminance().total_cmp(&b.luminance()));

        Some(BrightnessPick {
            dark: colors[0],
            mid: colors[colors.len() / 2],
            light: colors[colors.len() - 1],
        })
    }

    fn fallback(&self) -> ComposedLayers {
        ComposedLayers {
            color: Background::Linear(LinearGradient::new(
                self.angle_deg,
                vec![
                    ColorStop::new(FALLBACK_DARK, 0),
                    ColorStop::new(FALLBACK_NAVY, 100),
                ],
            )),
            wash: self.wash.then_some(Background::None),
        }
    }
}

impl GradientStrategy for BrightnessSortStrategy {
    fn compose(&self, palette: Option<&Palette>) -> ComposedLayers {
        let Some(BrightnessPick { dark, mid, light }) = palette.and_then(Self::pick) else {
            return self.fallback();
        };

        if self.wash {
            ComposedLayers {
                color: Background::Linear(LinearGradient::new(
                    self.angle_deg,
                    vec![
                        ColorStop::new(CssColor::Rgb(dark), 0),
                        ColorStop::new(CssColor::Rgb(mid), 100),
                    ],
                )),
                wash: Some(Background::Linear(LinearGradient::new(
                    0.0,
                    vec![
                        ColorStop::new(CssColor::Rgb(light), 0),
                        ColorStop::new(CssColor::Transparent(light), 100),
                    ],
                ))),
            }
        } else {
            ComposedLayers {
                color: Background::Linear(LinearGradient::new(
                    self.angle_deg,
                    vec![
                        ColorStop::new(CssColor::Rgb(dark), 0),
                        ColorStop::new(CssColor::Rgb(mid), 50),
                        ColorStop::new(CssColor::Rgb(light), 100),
                    ],
                )),
                wash: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch::Swatch;

    fn swatch(r: u8, g: u8, b: u8) -> Swatch {
        Swatch::new(Rgb::new(r, g, b), 100)
    }

    #[test]
    fn test_named_role_full_palette() {
        let palette = Palette::default()
            .with(SwatchRole::Vibrant, swatch(200, 50, 50))
            .with(SwatchRole::DarkVibrant, swatch(80, 20, 20))
            .with(SwatchRole::DarkMuted, swatch(30, 30, 30));

        let layers = NamedRoleStrategy.compose(Some(&palette));
        assert_eq!(
            layers.color.to_string(),
            "linear-gradient(180deg, rgb(200,50,50) 0%, rgb(80,20,20) 50%, rgb(30,30,30) 100%)"
        );
        assert!(layers.wash.is_none());
    }

    #[test]
    fn test_named_role_chain_fallthrough() {
        // Only LightMuted and Muted present
        let palette = Palette::default()
            .with(SwatchRole::Muted, swatch(100, 110, 120))
            .with(SwatchRole::LightMuted, swatch(210, 200, 190));

        let (primary, secondary, accent) = NamedRoleStrategy::pick(&palette);
        assert_eq!(primary, Rgb::new(100, 110, 120));
        assert_eq!(secondary, Rgb::new(100, 110, 120));
        assert_eq!(accent, Rgb::new(210, 200, 190));
    }

    #[test]
    fn test_named_role_defaults_for_empty_palette() {
        let layers = NamedRoleStrategy.compose(Some(&Palette::default()));
        assert_eq!(
            layers.color.to_string(),
            "linear-gradient(180deg, rgb(40,40,60) 0%, rgb(20,20,40) 50%, rgb(0,0,0) 100%)"
        );
    }

    #[test]
    fn test_named_role_failure() {
        let layers = NamedRoleStrategy.compose(None);
        assert_eq!(
            layers.color.to_string(),
            "linear-gradient(180deg, #1a1a2e 0%, #000 100%)"
        );
    }

    #[test]
    fn test_brightness_pick_odd_count() {
        let palette = Palette::default()
            .with(SwatchRole::Vibrant, swatch(255, 255, 255))
            .with(SwatchRole::DarkVibrant, swatch(0, 0, 0))
            .with(SwatchRole::Muted, swatch(128, 128, 128));

        let pick = BrightnessSortStrategy::pick(&palette).unwrap();
        assert_eq!(pick.dark, Rgb::new(0, 0, 0));
        assert_eq!(pick.mid, Rgb::new(128, 128, 128));
        assert_eq!(pick.light, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_brightness_pick_even_count_takes_upper_middle() {
        let palette = Palette::default()
            .with(SwatchRole::Vibrant, swatch(10, 10, 10))
            .with(SwatchRole::DarkVibrant, swatch(40, 40, 40))
            .with(SwatchRole::Muted, swatch(90, 90, 90))
            .with(SwatchRole::LightMuted, swatch(200, 200, 200));

        let pick = BrightnessSortStrategy::pick(&palette).unwrap();
        assert_eq!(pick.mid, Rgb::new(90, 90, 90));
    }

    #[test]
    fn test_brightness_single_swatch() {
        let palette = Palette::default().with(SwatchRole::Muted, swatch(60, 70, 80));
        let pick = BrightnessSortStrategy::pick(&palette).unwrap();
        assert_eq!(pick.dark, pick.mid);
        assert_eq!(pick.mid, pick.light);
    }

    #[test]
    fn test_dual_gradient_layers() {
        let palette = Palette::default()
            .with(SwatchRole::Vibrant, swatch(255, 255, 255))
            .with(SwatchRole::DarkVibrant, swatch(0, 0, 0))
            .with(SwatchRole::Muted, swatch(128, 128, 128));

        let layers = BrightnessSortStrategy::new(72.0, true).compose(Some(&palette));
        assert_eq!(
            layers.color.to_string(),
            "linear-gradient(72deg, rgb(0,0,0) 0%, rgb(128,128,128) 100%)"
        );
        assert_eq!(
            layers.wash.unwrap().to_string(),
            "linear-gradient(0deg, rgb(255,255,255) 0%, rgba(255,255,255, 0) 100%)"
        );
    }

    #[test]
    fn test_vanilla_gradient_layers() {
        let palette = Palette::default()
            .with(SwatchRole::Vibrant, swatch(255, 255, 255))
            .with(SwatchRole::DarkVibrant, swatch(0, 0, 0))
            .with(SwatchRole::Muted, swatch(128, 128, 128));

        let layers = BrightnessSortStrategy::new(60.64, false).compose(Some(&palette));
        assert_eq!(
            layers.color.to_string(),
            "linear-gradient(60.64deg, rgb(0,0,0) 0%, rgb(128,128,128) 50%, rgb(255,255,255) 100%)"
        );
        assert!(layers.wash.is_none());
    }

    #[test]
    fn test_brightness_fallbacks() {
        let dual = BrightnessSortStrategy::new(72.0, true);
        for layers in [dual.compose(None), dual.compose(Some(&Palette::default()))] {
            assert_eq!(
                layers.color.to_string(),
                "linear-gradient(72deg, #000 0%, #1a1a2e 100%)"
            );
            assert_eq!(layers.wash, Some(Background::None));
        }

        let vanilla = BrightnessSortStrategy::new(60.64, false).compose(None);
        assert_eq!(
            vanilla.color.to_string(),
            "linear-gradient(60.64deg, #000 0%, #1a1a2e 100%)"
        );
        assert!(vanilla.wash.is_none());
    }

    #[test]
    fn test_strategy_for_kind() {
        let strategy = strategy_for(StrategyKind::BrightnessSort {
            angle_deg: 72.0,
            wash: true,
        });
        assert!(strategy.compose(None).wash.is_some());

        let strategy = strategy_for(StrategyKind::NamedRole);
        assert!(strategy.compose(None).wash.is_none());
    }
}
