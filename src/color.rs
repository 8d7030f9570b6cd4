//! 8-bit RGB colors and the rounding rule shared by every derivation step

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB color with channels in `0..=255`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Round each channel to nearest and clamp into `0..=255`
    ///
    /// Rounding is half away from zero, so 127.5 becomes 128.
    pub fn from_channels(channels: [f64; 3]) -> Self {
        Self {
            r: quantize(channels[0]),
            g: quantize(channels[1]),
            b: quantize(channels[2]),
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as reals, for accumulation
    pub fn channels(self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// HSV saturation in `0..=100`
    pub fn saturation(self) -> f64 {
        let (_, s, _) = self.to_hsv();
        s * 100.0
    }

    /// HSV value (brightness) in `0..=100`
    pub fn brightness(self) -> f64 {
        let (_, _, v) = self.to_hsv();
        v * 100.0
    }

    /// Keep the hue, replace HSV saturation and brightness (both `0..=100`)
    pub fn with_saturation_brightness(self, saturation: f64, brightness: f64) -> Self {
        let (h, _, _) = self.to_hsv();
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let v = (brightness / 100.0).clamp(0.0, 1.0);
        Self::from_hsv(h, s, v)
    }

    /// Hue in degrees, saturation and value in `0..=1`
    fn to_hsv(self) -> (f64, f64, f64) {
        let [r, g, b] = self.channels().map(|c| c / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let s = if max == 0.0 { 0.0 } else { delta / max };

        (h, s, max)
    }

    fn from_hsv(h: f64, s: f64, v: f64) -> Self {
        let c = v * s;
        let sector = (h / 60.0).rem_euclid(6.0);
        let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match sector as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::from_channels([(r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0])
    }
}

#[inline]
fn quantize(value: f64) -> u8 {
    // NaN saturates to 0 through the `as` cast
    value.round().clamp(0.0, 255.0) as u8
}

/// Channel-wise accumulator for additive composition and weighted sums
///
/// Values stay unbounded until [`ColorSum::finish`], so composition clamps
/// once after all terms are in rather than per term.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorSum([f64; 3]);

impl ColorSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, color: Rgb) {
        self.add_weighted(color, 1.0);
    }

    pub fn add_weighted(&mut self, color: Rgb, weight: f64) {
        for (acc, channel) in self.0.iter_mut().zip(color.channels()) {
            *acc += weight * channel;
        }
    }

    /// Start from explicit channel values, e.g. per-channel averages
    pub fn from_channels(channels: [f64; 3]) -> Self {
        Self(channels)
    }

    /// Unclamped channel values
    pub fn channels(&self) -> [f64; 3] {
        self.0
    }

    pub fn finish(self) -> Rgb {
        Rgb::from_channels(self.0)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_array()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_rounds_and_clamps() {
        let color = Rgb::from_channels([127.5, 300.0, -4.0]);
        assert_eq!(color, Rgb::new(128, 255, 0));
    }

    #[test]
    fn test_from_channels_nan_is_black() {
        assert_eq!(Rgb::from_channels([f64::NAN; 3]), Rgb::BLACK);
    }

    #[test]
    fn test_sum_clamps_after_all_terms() {
        let mut sum = ColorSum::new();
        sum.add(Rgb::new(200, 0, 0));
        sum.add(Rgb::new(200, 0, 0));
        sum.add(Rgb::new(200, 0, 0));

        assert_eq!(sum.channels(), [600.0, 0.0, 0.0]);
        assert_eq!(sum.finish(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_sum_from_channel_averages() {
        let sum = ColorSum::from_channels([127.5, 300.0, -4.0]);
        assert_eq!(sum.channels(), [127.5, 300.0, -4.0]);
        assert_eq!(sum.finish(), Rgb::new(128, 255, 0));
    }

    #[test]
    fn test_weighted_sum() {
        let mut sum = ColorSum::new();
        sum.add_weighted(Rgb::new(100, 0, 200), 0.5);
        sum.add_weighted(Rgb::new(0, 50, 100), 0.5);
        assert_eq!(sum.finish(), Rgb::new(50, 25, 150));
    }

    #[test]
    fn test_hsv_components() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(red.saturation(), 100.0);
        assert_eq!(red.brightness(), 100.0);

        let gray = Rgb::new(128, 128, 128);
        assert_eq!(gray.saturation(), 0.0);
    }

    #[test]
    fn test_with_saturation_brightness_keeps_hue() {
        let red = Rgb::new(255, 0, 0);
        assert_eq!(red.with_saturation_brightness(100.0, 50.0), Rgb::new(128, 0, 0));
        assert_eq!(red.with_saturation_brightness(0.0, 100.0), Rgb::new(255, 255, 255));

        let green = Rgb::new(0, 255, 0);
        assert_eq!(green.with_saturation_brightness(50.0, 100.0), Rgb::new(128, 255, 128));
    }

    #[test]
    fn test_serde_as_triple() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::new(1, 2, 3));
    }
}
