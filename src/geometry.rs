//! Arc geometry: percentage-to-angle mapping, Cartesian conversion and
//! SVG path emission.
//!
//! All angles are in degrees with 0 along the positive x axis and
//! positive rotation clockwise (SVG screen coordinates, y down). The
//! gauge lives in a normalized 100x100 viewport centered at (50, 50).

/// Viewport center shared by every arc.
pub const CENTER_X: f64 = 50.0;
pub const CENTER_Y: f64 = 50.0;

/// Static dial layout: circle radius plus the angular window the value
/// arc sweeps through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    pub radius: f64,
    pub dial_start_angle: f64,
    pub dial_end_angle: f64,
}

impl GaugeGeometry {
    /// Total sweep available to the value arc. The default 135..45 dial
    /// yields 270 degrees.
    pub fn span_angle(&self) -> f64 {
        360.0 - (self.dial_start_angle - self.dial_end_angle).abs()
    }

    /// End angle of the value arc for a 0..100 percentage.
    pub fn value_end_angle(&self, percentage: f64) -> f64 {
        self.dial_start_angle + sweep_angle(percentage, self.span_angle())
    }

    /// Path description of the static dial arc.
    pub fn dial_path(&self) -> String {
        arc_path(self.radius, self.dial_start_angle, self.dial_end_angle)
    }

    /// Path description of the value arc at the given percentage.
    pub fn value_path(&self, percentage: f64) -> String {
        arc_path(
            self.radius,
            self.dial_start_angle,
            self.value_end_angle(percentage),
        )
    }
}

/// An arc on the dial circle, exposed so rasterizing hosts can draw the
/// same geometry the SVG path strings describe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Sweep angle covered by `percentage` of `span` degrees.
pub fn sweep_angle(percentage: f64, span: f64) -> f64 {
    percentage * span / 100.0
}

/// Point on the circle of `radius` around (`cx`, `cy`) at `angle`
/// degrees, rounded to 3 decimal places.
pub fn cartesian(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (
        round3(cx + radius * rad.cos()),
        round3(cy + radius * rad.sin()),
    )
}

/// SVG large-arc-flag for the clockwise sweep from `start_angle` to
/// `end_angle`: 1 exactly when the sweep, normalized to [0, 360),
/// exceeds 180 degrees. One rule for both the dial and the value arc.
pub fn large_arc_flag(start_angle: f64, end_angle: f64) -> u8 {
    let sweep = (end_angle - start_angle).rem_euclid(360.0);
    u8::from(sweep > 180.0)
}

/// `M sx sy A r r 0 flag 1 ex ey` — move to the start point, then a
/// clockwise elliptical arc of `radius` to the end point.
pub fn arc_path(radius: f64, start_angle: f64, end_angle: f64) -> String {
    let (sx, sy) = cartesian(CENTER_X, CENTER_Y, radius, start_angle);
    let (ex, ey) = cartesian(CENTER_X, CENTER_Y, radius, end_angle);
    let flag = large_arc_flag(start_angle, end_angle);
    format!("M {} {} A {} {} 0 {} 1 {} {}", sx, sy, radius, radius, flag, ex, ey)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: GaugeGeometry = GaugeGeometry {
        radius: 45.0,
        dial_start_angle: 135.0,
        dial_end_angle: 45.0,
    };

    #[test]
    fn default_dial_spans_270_degrees() {
        assert_eq!(DEFAULT.span_angle(), 270.0);
    }

    #[test]
    fn sweep_angle_is_linear_in_percentage() {
        assert_eq!(sweep_angle(0.0, 270.0), 0.0);
        assert_eq!(sweep_angle(100.0, 270.0), 270.0);
        assert_eq!(sweep_angle(50.0, 270.0), 135.0);
        assert_eq!(sweep_angle(25.0, 180.0), 45.0);
    }

    #[test]
    fn half_value_ends_at_bottom_of_circle() {
        // 135 + 50 * 270 / 100 = 270 degrees, straight up in screen
        // coordinates: (50 + 45*cos(270), 50 + 45*sin(270)) = (50, 5).
        let end = DEFAULT.value_end_angle(50.0);
        assert_eq!(end, 270.0);
        let (x, y) = cartesian(CENTER_X, CENTER_Y, DEFAULT.radius, end);
        assert_eq!((x, y), (50.0, 5.0));
    }

    #[test]
    fn cartesian_rounds_to_three_decimals() {
        let (x, y) = cartesian(50.0, 50.0, 45.0, 135.0);
        assert_eq!((x, y), (18.18, 81.82));
    }

    #[test]
    fn large_arc_flag_flips_past_180() {
        assert_eq!(large_arc_flag(135.0, 135.0), 0);
        assert_eq!(large_arc_flag(135.0, 225.0), 0);
        assert_eq!(large_arc_flag(0.0, 180.0), 0);
        assert_eq!(large_arc_flag(0.0, 180.5), 1);
        assert_eq!(large_arc_flag(135.0, 405.0), 1);
    }

    #[test]
    fn dial_and_value_arcs_share_one_flag_rule() {
        // The 135..45 dial is a 270 degree clockwise sweep, so it must
        // carry flag 1 even though the raw angular difference is 90.
        assert_eq!(large_arc_flag(135.0, 45.0), 1);
        // A value arc covering the same sweep agrees.
        assert_eq!(large_arc_flag(135.0, DEFAULT.value_end_angle(100.0)), 1);
        // Below half span both stay minor arcs.
        assert_eq!(large_arc_flag(135.0, DEFAULT.value_end_angle(40.0)), 0);
    }

    #[test]
    fn dial_path_matches_worked_example() {
        assert_eq!(
            DEFAULT.dial_path(),
            "M 18.18 81.82 A 45 45 0 1 1 81.82 81.82"
        );
    }

    #[test]
    fn value_path_at_zero_is_a_degenerate_arc_at_start() {
        let d = DEFAULT.value_path(0.0);
        assert_eq!(d, "M 18.18 81.82 A 45 45 0 0 1 18.18 81.82");
    }
}
