//! Palette, swatch and role types

use std::fmt;

use crate::color::Rgb;

/// Perceptual role a swatch plays in a palette.
///
/// [`SwatchRole::ALL`] lists the roles in their canonical order, which is also
/// the iteration order of [`Palette::iter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwatchRole {
    Vibrant,
    DarkVibrant,
    LightVibrant,
    Muted,
    DarkMuted,
    LightMuted,
}

impl SwatchRole {
    /// All roles in canonical order.
    pub const ALL: [SwatchRole; 6] = [
        SwatchRole::Vibrant,
        SwatchRole::DarkVibrant,
        SwatchRole::LightVibrant,
        SwatchRole::Muted,
        SwatchRole::DarkMuted,
        SwatchRole::LightMuted,
    ];

    /// Kebab-case name, e.g. `dark-vibrant`.
    pub fn name(self) -> &'static str {
        match self {
            SwatchRole::Vibrant => "vibrant",
            SwatchRole::DarkVibrant => "dark-vibrant",
            SwatchRole::LightVibrant => "light-vibrant",
            SwatchRole::Muted => "muted",
            SwatchRole::DarkMuted => "dark-muted",
            SwatchRole::LightMuted => "light-muted",
        }
    }

    fn index(self) -> usize {
        match self {
            SwatchRole::Vibrant => 0,
            SwatchRole::DarkVibrant => 1,
            SwatchRole::LightVibrant => 2,
            SwatchRole::Muted => 3,
            SwatchRole::DarkMuted => 4,
            SwatchRole::LightMuted => 5,
        }
    }
}

impl fmt::Display for SwatchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One representative color and the number of sampled pixels it stands for.
///
/// Swatches derived from another role (rather than found in the image) carry
/// a population of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub rgb: Rgb,
    pub population: u32,
}

impl Swatch {
    #[inline]
    pub fn new(rgb: Rgb, population: u32) -> Self {
        Self { rgb, population }
    }
}

/// Mapping from [`SwatchRole`] to an optional [`Swatch`].
///
/// Palettes are assembled once and then only read.
///
/// ```
/// use swatch::{Palette, Rgb, Swatch, SwatchRole};
///
/// let palette = Palette::default()
///     .with(SwatchRole::Muted, Swatch::new(Rgb::new(90, 90, 100), 12));
///
/// assert_eq!(palette.len(), 1);
/// assert_eq!(
///     palette.first_of(&[SwatchRole::DarkMuted, SwatchRole::Muted]),
///     Some(Rgb::new(90, 90, 100))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    swatches: [Option<Swatch>; 6],
}

impl Palette {
    /// Return a copy of this palette with `role` set to `swatch`.
    pub fn with(mut self, role: SwatchRole, swatch: Swatch) -> Self {
        self.swatches[role.index()] = Some(swatch);
        self
    }

    pub(crate) fn set(&mut self, role: SwatchRole, swatch: Swatch) {
        self.swatches[role.index()] = Some(swatch);
    }

    pub fn get(&self, role: SwatchRole) -> Option<&Swatch> {
        self.swatches[role.index()].as_ref()
    }

    pub fn rgb(&self, role: SwatchRole) -> Option<Rgb> {
        self.get(role).map(|s| s.rgb)
    }

    /// First present color along a preference chain.
    pub fn first_of(&self, chain: &[SwatchRole]) -> Option<Rgb> {
        chain.iter().find_map(|&role| self.rgb(role))
    }

    /// Present swatches in canonical role order.
    pub fn iter(&self) -> impl Iterator<Item = (SwatchRole, &Swatch)> + '_ {
        SwatchRole::ALL
            .iter()
            .filter_map(move |&role| self.get(role).map(|s| (role, s)))
    }

    /// Colors of all present swatches in canonical role order.
    pub fn colors(&self) -> Vec<Rgb> {
        self.iter().map(|(_, s)| s.rgb).collect()
    }

    pub fn len(&self) -> usize {
        self.swatches.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(SwatchRole, Swatch)> for Palette {
    fn from_iter<I: IntoIterator<Item = (SwatchRole, Swatch)>>(iter: I) -> Self {
        let mut palette = Palette::default();
        for (role, swatch) in iter {
            palette.set(role, swatch);
        }
        palette
    }
}
