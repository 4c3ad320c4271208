//! Gauge configuration: dial layout, stroke styling and the color
//! policy applied to the value arc.

use std::time::Duration;

use bon::Builder;

use crate::error::{GaugeError, Result};

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse `#rgb` or `#rrggbb` CSS hex notation.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        match digits.len() {
            3 => {
                let mut nibbles = digits.chars().map(|c| c.to_digit(16));
                let r = nibbles.next()?? as u8;
                let g = nibbles.next()?? as u8;
                let b = nibbles.next()?? as u8;
                Some(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }
}

/// Maps a numeric domain onto an ordered list of color stops. The
/// lookup is a discrete step function, not an interpolated gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
    pub colors: Vec<String>,
}

impl ColorRange {
    pub fn new(min: f64, max: f64, colors: Vec<String>) -> Self {
        Self { min, max, colors }
    }

    /// Fail fast on configurations that would divide by zero or leave
    /// the gauge with no color to render.
    pub fn validate(&self) -> Result<()> {
        if !(self.min < self.max) {
            return Err(GaugeError::InvalidColorBounds {
                min: self.min,
                max: self.max,
            });
        }
        if self.colors.is_empty() {
            return Err(GaugeError::EmptyColorStops);
        }
        Ok(())
    }

    /// Position of `value` inside the domain, clamped to [0, 1].
    pub fn position(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Color stop governing `value`. Values outside the domain clamp
    /// to the nearest endpoint stop.
    pub fn color_at(&self, value: f64) -> &str {
        let index = (self.position(value) * self.colors.len() as f64).floor() as usize;
        &self.colors[index.min(self.colors.len() - 1)]
    }
}

/// Stroke color policy for the value arc: exactly one of a fixed color
/// or a range-driven gradient governs the stroke at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum GaugeStyle {
    Fixed(String),
    Range(ColorRange),
}

impl GaugeStyle {
    pub fn validate(&self) -> Result<()> {
        match self {
            GaugeStyle::Fixed(_) => Ok(()),
            GaugeStyle::Range(range) => range.validate(),
        }
    }

    /// Stroke color for `value`. Recomputed per animation frame when a
    /// range is active, so the color sweeps along with the arc.
    pub fn stroke_for(&self, value: f64) -> &str {
        match self {
            GaugeStyle::Fixed(color) => color,
            GaugeStyle::Range(range) => range.color_at(value),
        }
    }

    /// Percentage of the dial span covered by `value`. With a range the
    /// value is mapped through the domain bounds; without one the raw
    /// value is already a 0..100 percentage. Deliberately unclamped,
    /// callers pre-normalize.
    pub fn arc_percentage(&self, value: f64) -> f64 {
        match self {
            GaugeStyle::Fixed(_) => value,
            GaugeStyle::Range(range) => (value - range.min) / (range.max - range.min) * 100.0,
        }
    }
}

#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    // Dial geometry, in a normalized 100x100 viewport
    #[builder(default = 45.0)]
    pub radius: f64,
    #[builder(default = 135.0)]
    pub dial_start_angle: f64,
    #[builder(default = 45.0)]
    pub dial_end_angle: f64,

    // Rendered viewport height; width follows the viewBox aspect
    #[builder(default = 230)]
    pub svg_height: u32,

    // Stroke styling
    #[builder(default = "#666".to_string())]
    pub dial_color: String,
    #[builder(default = 3.0)]
    pub dial_stroke_width: f64,
    #[builder(default = 6.0)]
    pub value_stroke_width: f64,
    #[builder(default = GaugeStyle::Fixed("#39ff14".to_string()))]
    pub style: GaugeStyle,

    // Value transition
    #[builder(default = Duration::from_secs(1))]
    pub animation_duration: Duration,
}

impl GaugeConfig {
    pub fn validate(&self) -> Result<()> {
        for angle in [self.dial_start_angle, self.dial_end_angle] {
            if !angle.is_finite() {
                return Err(GaugeError::NonFiniteAngle(angle));
            }
        }
        if (self.dial_start_angle - self.dial_end_angle).abs() >= 360.0 {
            return Err(GaugeError::ZeroSpanAngle {
                start: self.dial_start_angle,
                end: self.dial_end_angle,
            });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(GaugeError::InvalidRadius(self.radius));
        }
        if self.animation_duration.is_zero() {
            return Err(GaugeError::ZeroDuration);
        }
        self.style.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nine_stops() -> ColorRange {
        let colors = (0..9).map(|i| format!("#c{}", i)).collect();
        ColorRange::new(30.0, 80.0, colors)
    }

    #[test]
    fn color_lookup_steps_through_stops() {
        let range = nine_stops();
        // 55 sits at position 0.5: floor(0.5 * 9) = stop 4.
        assert_eq!(range.color_at(55.0), "#c4");
        assert_eq!(range.color_at(30.0), "#c0");
        assert_eq!(range.color_at(80.0), "#c8");
    }

    #[test]
    fn out_of_domain_values_clamp_to_endpoint_stops() {
        let range = nine_stops();
        assert_eq!(range.color_at(-100.0), "#c0");
        assert_eq!(range.color_at(1000.0), "#c8");
    }

    #[test]
    fn arc_percentage_maps_through_range_bounds() {
        let style = GaugeStyle::Range(nine_stops());
        assert_eq!(style.arc_percentage(30.0), 0.0);
        assert_eq!(style.arc_percentage(80.0), 100.0);
        assert_eq!(style.arc_percentage(55.0), 50.0);
        // Without a range the raw value is the percentage.
        assert_eq!(GaugeStyle::Fixed("#129".into()).arc_percentage(37.5), 37.5);
    }

    #[test]
    fn degenerate_range_bounds_are_rejected() {
        let equal = ColorRange::new(50.0, 50.0, vec!["#fff".into()]);
        assert_eq!(
            equal.validate(),
            Err(GaugeError::InvalidColorBounds {
                min: 50.0,
                max: 50.0
            })
        );
        let inverted = ColorRange::new(80.0, 30.0, vec!["#fff".into()]);
        assert!(inverted.validate().is_err());
        let empty = ColorRange::new(0.0, 100.0, Vec::new());
        assert_eq!(empty.validate(), Err(GaugeError::EmptyColorStops));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(GaugeConfig::builder().build().validate().is_ok());
    }

    #[test]
    fn full_circle_dial_has_no_span_left() {
        let config = GaugeConfig::builder()
            .dial_start_angle(0.0)
            .dial_end_angle(360.0)
            .build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::ZeroSpanAngle { .. })
        ));
    }

    #[test]
    fn hex_color_parsing() {
        assert_eq!(Color::from_hex("#39ff14"), Some(Color::new(0x39, 0xff, 0x14)));
        assert_eq!(Color::from_hex("#666"), Some(Color::new(0x66, 0x66, 0x66)));
        assert_eq!(Color::from_hex("#129"), Some(Color::new(0x11, 0x22, 0x99)));
        assert_eq!(Color::from_hex("red"), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }
}
