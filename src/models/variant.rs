use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Image rendition used for the full-screen backdrop.
pub const BACKDROP_SIZE: &str = "w1280";

/// Image rendition used for result thumbnails.
pub const THUMBNAIL_SIZE: &str = "w342";

/// Page variant: decides result cap, thumbnail source, layers and the
/// gradient strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Blurred copy of the image behind the sharp foreground, no palette
    Blur,
    /// Three-stop vertical gradient from named palette roles
    NamedRole,
    /// Brightness-sorted diagonal gradient plus a vertical wash layer
    #[default]
    DualGradient,
    /// Brightness-sorted three-stop diagonal gradient
    VanillaGradient,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Blur,
        Variant::NamedRole,
        Variant::DualGradient,
        Variant::VanillaGradient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Blur => "blur",
            Variant::NamedRole => "named-role",
            Variant::DualGradient => "dual-gradient",
            Variant::VanillaGradient => "vanilla-gradient",
        }
    }

    pub fn profile(self) -> VariantProfile {
        match self {
            Variant::Blur => VariantProfile {
                variant: self,
                result_cap: 6,
                thumbnail: ThumbnailSource::Poster,
                sample_size: None,
                strategy: None,
                blur_layer: true,
            },
            Variant::NamedRole => VariantProfile {
                variant: self,
                result_cap: 6,
                thumbnail: ThumbnailSource::Poster,
                sample_size: Some("w342"),
                strategy: Some(StrategyKind::NamedRole),
                blur_layer: false,
            },
            Variant::DualGradient => VariantProfile {
                variant: self,
                result_cap: 10,
                thumbnail: ThumbnailSource::Backdrop,
                sample_size: Some("w185"),
                strategy: Some(StrategyKind::BrightnessSort {
                    angle_deg: 72.0,
                    wash: true,
                }),
                blur_layer: false,
            },
            Variant::VanillaGradient => VariantProfile {
                variant: self,
                result_cap: 10,
                thumbnail: ThumbnailSource::Backdrop,
                sample_size: Some("w185"),
                strategy: Some(StrategyKind::BrightnessSort {
                    angle_deg: 60.64,
                    wash: false,
                }),
                blur_layer: false,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown variant: {0} (expected blur, named-role, dual-gradient or vanilla-gradient)")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Which image a result card uses as its thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailSource {
    Poster,
    Backdrop,
}

/// Gradient strategy selected by a variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StrategyKind {
    /// Accent, primary and secondary picked by role preference chains
    NamedRole,
    /// Darkest, middle and lightest swatch by luminance
    BrightnessSort {
        angle_deg: f32,
        /// Split the lightest color into its own wash layer
        wash: bool,
    },
}

/// Resolved settings for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariantProfile {
    pub variant: Variant,
    /// Maximum number of result cards
    pub result_cap: usize,
    pub thumbnail: ThumbnailSource,
    /// Smaller rendition sampled for palette extraction
    pub sample_size: Option<&'static str>,
    pub strategy: Option<StrategyKind>,
    pub blur_layer: bool,
}

impl VariantProfile {
    pub fn has_color_layer(&self) -> bool {
        self.strategy.is_some()
    }

    pub fn has_wash_layer(&self) -> bool {
        matches!(
            self.strategy,
            Some(StrategyKind::BrightnessSort { wash: true, .. })
        )
    }
}
