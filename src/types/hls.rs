//! HLS conversion and lightness offsets.
//!
//! The conversion follows the classic `colorsys` formulation operation for
//! operation, and converting back truncates each channel. Generated theme
//! files are compared byte for byte against earlier releases, so the float
//! arithmetic here must not be reordered or "simplified".

use std::fmt;

use super::Colour;

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRD: f64 = 2.0 / 3.0;

/// Hue, lightness and saturation, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub hue: f64,
    pub lightness: f64,
    pub saturation: f64,
}

impl Hls {
    /// Convert an RGB colour to HLS.
    pub fn from_colour(colour: Colour) -> Self {
        let r = f64::from(colour.r) / 255.0;
        let g = f64::from(colour.g) / 255.0;
        let b = f64::from(colour.b) / 255.0;

        let maxc = r.max(g).max(b);
        let minc = r.min(g).min(b);
        let sumc = maxc + minc;
        let rangec = maxc - minc;
        let lightness = sumc / 2.0;

        if minc == maxc {
            return Self {
                hue: 0.0,
                lightness,
                saturation: 0.0,
            };
        }

        let saturation = if lightness <= 0.5 {
            rangec / sumc
        } else {
            rangec / (2.0 - maxc - minc)
        };

        let rc = (maxc - r) / rangec;
        let gc = (maxc - g) / rangec;
        let bc = (maxc - b) / rangec;
        let hue = if r == maxc {
            bc - gc
        } else if g == maxc {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self {
            hue: (hue / 6.0).rem_euclid(1.0),
            lightness,
            saturation,
        }
    }

    /// Convert back to RGB, truncating each channel.
    pub fn to_colour(self) -> Colour {
        let (r, g, b) = if self.saturation == 0.0 {
            (self.lightness, self.lightness, self.lightness)
        } else {
            let m2 = if self.lightness <= 0.5 {
                self.lightness * (1.0 + self.saturation)
            } else {
                self.lightness + self.saturation - (self.lightness * self.saturation)
            };
            let m1 = 2.0 * self.lightness - m2;
            (
                channel(m1, m2, self.hue + ONE_THIRD),
                channel(m1, m2, self.hue),
                channel(m1, m2, self.hue - ONE_THIRD),
            )
        };

        Colour::rgb(truncate(r), truncate(g), truncate(b))
    }
}

fn channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        return m1 + (m2 - m1) * hue * 6.0;
    }
    if hue < 0.5 {
        return m2;
    }
    if hue < TWO_THIRD {
        return m1 + (m2 - m1) * (TWO_THIRD - hue) * 6.0;
    }
    m1
}

/// Scale a unit channel to a byte, truncating toward zero and clamping.
fn truncate(value: f64) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

/// A colour together with its HLS representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourSpec {
    colour: Colour,
    hls: Hls,
}

impl ColourSpec {
    pub fn new(colour: Colour) -> Self {
        Self {
            colour,
            hls: Hls::from_colour(colour),
        }
    }

    /// Parse a hex colour.
    pub fn from_hex(s: &str) -> crate::error::Result<Self> {
        Colour::from_hex(s).map(Self::new)
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Shift lightness by `offset` steps on a 0–255 scale.
    ///
    /// Lightness saturates at black and white. A zero offset returns the
    /// colour unchanged.
    pub fn with_lightness_offset(&self, offset: i32) -> ColourSpec {
        if offset == 0 {
            return *self;
        }

        let lightness = (self.hls.lightness + f64::from(offset) / 255.0).clamp(0.0, 1.0);
        let shifted = Hls {
            lightness,
            ..self.hls
        };
        ColourSpec::new(shifted.to_colour())
    }

    /// The offset that moves this colour's lightness onto `other`'s.
    pub fn offset_to(&self, other: &ColourSpec) -> i32 {
        ((other.hls.lightness - self.hls.lightness) * 255.0).round() as i32
    }

    pub fn to_hex(&self) -> String {
        self.colour.to_hex()
    }
}

impl From<Colour> for ColourSpec {
    fn from(colour: Colour) -> Self {
        Self::new(colour)
    }
}

impl fmt::Display for ColourSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.colour.fmt(f)
    }
}
