//! Color values and continuous/qualitative color scales.
//!
//! Scales are lists of evenly spaced RGB stops. Sampling interpolates linearly
//! between neighbouring stops, so `sample(n)` on a qualitative palette yields
//! `n` distinct colors even when `n` exceeds the palette size.

use serde::{Serialize, Serializer};

/// An RGB color with floating-point channels in `0.0..=255.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Border color for selected map regions.
    pub const ORANGE: Rgb = Rgb::new(255.0, 165.0, 0.0);

    /// Neutral border color for unselected map regions (`#444`).
    pub const DARK_GRAY: Rgb = Rgb::new(68.0, 68.0, 68.0);

    /// Channels rounded and clamped to bytes.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A color scale made of evenly spaced stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    name: &'static str,
    stops: Vec<Rgb>,
}

const SET3: [Rgb; 12] = [
    Rgb::new(141.0, 211.0, 199.0),
    Rgb::new(255.0, 255.0, 179.0),
    Rgb::new(190.0, 186.0, 218.0),
    Rgb::new(251.0, 128.0, 114.0),
    Rgb::new(128.0, 177.0, 211.0),
    Rgb::new(253.0, 180.0, 98.0),
    Rgb::new(179.0, 222.0, 105.0),
    Rgb::new(252.0, 205.0, 229.0),
    Rgb::new(217.0, 217.0, 217.0),
    Rgb::new(188.0, 128.0, 189.0),
    Rgb::new(204.0, 235.0, 197.0),
    Rgb::new(255.0, 237.0, 111.0),
];

const BLUES: [Rgb; 9] = [
    Rgb::new(247.0, 251.0, 255.0),
    Rgb::new(222.0, 235.0, 247.0),
    Rgb::new(198.0, 219.0, 239.0),
    Rgb::new(158.0, 202.0, 225.0),
    Rgb::new(107.0, 174.0, 214.0),
    Rgb::new(66.0, 146.0, 198.0),
    Rgb::new(33.0, 113.0, 181.0),
    Rgb::new(8.0, 81.0, 156.0),
    Rgb::new(8.0, 48.0, 107.0),
];

impl ColorScale {
    /// Qualitative 12-color palette used for category colors.
    pub fn set3() -> Self {
        Self {
            name: "Set3",
            stops: SET3.to_vec(),
        }
    }

    /// Sequential light-to-dark blue scale used by the choropleth.
    pub fn blues() -> Self {
        Self {
            name: "Blues",
            stops: BLUES.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    /// Color at position `t` in `[0, 1]` (clamped).
    pub fn at(&self, t: f64) -> Rgb {
        match self.stops.len() {
            0 => Rgb::new(0.0, 0.0, 0.0),
            1 => self.stops[0],
            n => {
                let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
                let scaled = t * (n - 1) as f64;
                let lo = (scaled.floor() as usize).min(n - 2);
                self.stops[lo].lerp(self.stops[lo + 1], scaled - lo as f64)
            }
        }
    }

    /// `count` colors sampled at evenly spaced positions from 0 to 1.
    pub fn sample(&self, count: usize) -> Vec<Rgb> {
        match count {
            0 => Vec::new(),
            1 => vec![self.at(0.0)],
            _ => (0..count)
                .map(|i| self.at(i as f64 / (count - 1) as f64))
                .collect(),
        }
    }
}
