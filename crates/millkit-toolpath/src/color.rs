//! Display colors for toolpaths.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel values exactly as stored in a file
#[derive(Deserialize)]
struct RawColor {
    r: f32,
    g: f32,
    b: f32,
}

/// Clamp into `[0, 1]`; NaN becomes 0
fn channel(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColor")]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
}

impl Color {
    /// Create a color, clamping every channel into `[0, 1]`
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    pub fn r(&self) -> f32 {
        self.r
    }

    pub fn g(&self) -> f32 {
        self.g
    }

    pub fn b(&self) -> f32 {
        self.b
    }

    /// Each channel sampled independently and uniformly from `[0, 1)`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }

    pub fn as_tuple(&self) -> (f32, f32, f32) {
        (self.r, self.g, self.b)
    }
}

impl From<RawColor> for Color {
    fn from(raw: RawColor) -> Self {
        Self::new(raw.r, raw.g, raw.b)
    }
}

impl From<(f32, f32, f32)> for Color {
    fn from((r, g, b): (f32, f32, f32)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_is_seed_deterministic() {
        let a = Color::random(&mut StdRng::seed_from_u64(42));
        let b = Color::random(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        for value in [a.r(), a.g(), a.b()] {
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Color::new(1.5, -0.2, 0.5), Color::new(1.0, 0.0, 0.5));
        assert_eq!(Color::new(f32::NAN, 0.0, 0.0).as_tuple(), (0.0, 0.0, 0.0));
        let c = Color::new(f32::INFINITY, f32::NEG_INFINITY, 0.25);
        assert_eq!(c.as_tuple(), (1.0, 0.0, 0.25));
    }

    #[test]
    fn test_deserialize_clamps() {
        let c: Color = serde_json::from_str(r#"{"r":2.0,"g":-1.0,"b":0.5}"#).unwrap();
        assert_eq!(c, Color::new(1.0, 0.0, 0.5));
        assert_eq!(serde_json::to_string(&c).unwrap(), r#"{"r":1.0,"g":0.0,"b":0.5}"#);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Color::new(1.0, 0.0, 0.5).to_string(), "#ff0080");
    }
}
