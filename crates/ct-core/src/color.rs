//! Display colours derived from contagion state.
//!
//! Colours are part of the per-tick snapshot so the rendering host never has
//! to know the colour-phase rules.

/// 8-bit RGB triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation from `self` (at `t = 0`) to `other` (at `t = 1`).
    /// `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// `#rrggbb` form for web-style hosts.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// Clean agents.
pub const SUSCEPTIBLE: Rgb = Rgb::new(0x00, 0xc8, 0xff);

/// Colour assigned at the moment of infection.
pub const FRESH_INFECTION: Rgb = Rgb::new(0xff, 0x00, 0x00);

/// Colour reached once an infection is older than the colour phase.
pub const TERMINAL_INFECTION: Rgb = Rgb::new(0x8b, 0x00, 0x8b);
