//! Animated radial SVG gauge renderer.
//!
//! A [`Gauge`] owns a small SVG subtree: a static dial arc drawn at
//! construction, plus a value arc and text label created lazily on the
//! first value update. [`Gauge::set_value`] starts an eased transition
//! toward the new value; the host drives the animation by calling
//! [`Gauge::tick`] once per frame from whatever scheduling primitive it
//! has (a render loop, a timer, a display refresh callback).
//!
//! ```no_run
//! use std::time::Instant;
//! use svgauge::{Gauge, GaugeConfig};
//!
//! let mut gauge = Gauge::new(GaugeConfig::builder().build()).unwrap();
//! gauge.set_value(62.5, Instant::now()).unwrap();
//! while gauge.tick(Instant::now()) {
//!     // hand the markup to the host, then wait for the next frame
//!     let _markup = gauge.svg();
//! }
//! ```

pub mod animate;
pub mod config;
pub mod error;
pub mod geometry;
pub mod svg;

pub use animate::{ease_in_out_cubic, linear, Animation, EasingFn, Frame};
pub use config::{Color, ColorRange, GaugeConfig, GaugeStyle};
pub use error::{GaugeError, Result};
pub use geometry::{ArcSpec, GaugeGeometry};
pub use svg::SvgElement;

use std::time::Instant;

// Child order inside the owned <svg> element. The dial exists from
// construction; the value path and label follow once the layer wakes.
const VALUE_CHILD: usize = 1;
const LABEL_CHILD: usize = 2;

/// Radial gauge renderer. One inbound data channel (value + style at
/// construction), no outbound events; the rendered SVG is the output.
#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    geometry: GaugeGeometry,
    svg: SvgElement,
    state: GaugeState,
}

#[derive(Debug, Clone, Copy)]
struct GaugeState {
    /// Last settled value, the baseline every new animation starts from.
    last_value: f64,
    layer: ValueLayer,
    animation: Option<RunningAnimation>,
}

/// The value arc and label do not exist until the first update. The
/// two states are explicit so no nullable element references float
/// around between frames.
#[derive(Debug, Clone, Copy)]
enum ValueLayer {
    Dormant,
    Active { displayed_value: f64 },
}

#[derive(Debug, Clone, Copy)]
struct RunningAnimation {
    animation: Animation,
    started: Instant,
}

impl Gauge {
    /// Validates the configuration and draws the static dial arc. The
    /// value arc and label are created on the first [`set_value`].
    ///
    /// [`set_value`]: Gauge::set_value
    pub fn new(config: GaugeConfig) -> Result<Self> {
        config.validate()?;
        let geometry = GaugeGeometry {
            radius: config.radius,
            dial_start_angle: config.dial_start_angle,
            dial_end_angle: config.dial_end_angle,
        };
        let mut svg = SvgElement::new("svg")
            .with_attr("height", config.svg_height.to_string())
            .with_attr("viewBox", "0 0 100 100")
            .with_attr("class", "gauge");
        svg.append(
            SvgElement::new("path")
                .with_attr("class", "dial")
                .with_attr("fill", "none")
                .with_attr("stroke", config.dial_color.clone())
                .with_attr("stroke-width", config.dial_stroke_width.to_string())
                .with_attr("d", geometry.dial_path()),
        );
        Ok(Self {
            config,
            geometry,
            svg,
            state: GaugeState {
                last_value: 0.0,
                layer: ValueLayer::Dormant,
                animation: None,
            },
        })
    }

    /// Start an eased transition from the last settled value toward
    /// `value`. Any in-flight animation is cancelled first, before any
    /// other state changes, so a stale frame can never overwrite a
    /// newer target. Non-finite values are rejected at the boundary;
    /// NaN inside the easing math would never recover.
    pub fn set_value(&mut self, value: f64, now: Instant) -> Result<()> {
        if !value.is_finite() {
            log::warn!("rejected non-finite gauge value {value}");
            return Err(GaugeError::NonFiniteValue(value));
        }
        self.state.animation = None;
        self.wake_value_layer();
        self.state.animation = Some(RunningAnimation {
            animation: Animation::new(
                self.state.last_value,
                value,
                self.config.animation_duration,
                ease_in_out_cubic,
            ),
            started: now,
        });
        Ok(())
    }

    /// Advance the in-flight animation to `now`: updates the value
    /// arc's path and stroke, and the label text (one decimal place).
    /// Returns `true` while an animation remains in flight so the host
    /// knows to schedule another frame. Settles `last_value` and clears
    /// the animation when progress reaches 1.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(running) = self.state.animation else {
            return false;
        };
        let frame = running
            .animation
            .sample(now.saturating_duration_since(running.started));
        self.apply_frame(frame.value);
        if frame.done {
            self.state.last_value = running.animation.target();
            self.state.animation = None;
        }
        !frame.done
    }

    /// Serialized SVG markup of the whole gauge.
    pub fn svg(&self) -> String {
        self.svg.to_string()
    }

    /// The owned SVG subtree, for hosts that splice elements into a
    /// larger document.
    pub fn svg_element(&self) -> &SvgElement {
        &self.svg
    }

    /// Geometry of the static dial arc.
    pub fn dial_arc(&self) -> ArcSpec {
        ArcSpec {
            radius: self.geometry.radius,
            start_angle: self.geometry.dial_start_angle,
            end_angle: self.geometry.dial_end_angle,
        }
    }

    /// Geometry of the value arc, `None` until the first value update
    /// has been rendered.
    pub fn value_arc(&self) -> Option<ArcSpec> {
        let value = self.displayed_value()?;
        let percentage = self.config.style.arc_percentage(value);
        Some(ArcSpec {
            radius: self.geometry.radius,
            start_angle: self.geometry.dial_start_angle,
            end_angle: self.geometry.value_end_angle(percentage),
        })
    }

    /// Value currently shown by the arc and label, which trails the
    /// target while an animation is in flight.
    pub fn displayed_value(&self) -> Option<f64> {
        match self.state.layer {
            ValueLayer::Dormant => None,
            ValueLayer::Active { displayed_value } => Some(displayed_value),
        }
    }

    /// Stroke color of the value arc at the currently displayed value.
    pub fn displayed_color(&self) -> Option<&str> {
        self.displayed_value()
            .map(|value| self.config.style.stroke_for(value))
    }

    pub fn last_value(&self) -> f64 {
        self.state.last_value
    }

    pub fn is_animating(&self) -> bool {
        self.state.animation.is_some()
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn geometry(&self) -> GaugeGeometry {
        self.geometry
    }

    /// Dormant -> Active transition: appends the value path and label
    /// to the subtree, both rendered at the current baseline value.
    fn wake_value_layer(&mut self) {
        if matches!(self.state.layer, ValueLayer::Active { .. }) {
            return;
        }
        let baseline = self.state.last_value;
        let percentage = self.config.style.arc_percentage(baseline);
        let stroke = self.config.style.stroke_for(baseline).to_string();
        self.svg.append(
            SvgElement::new("path")
                .with_attr("class", "value")
                .with_attr("fill", "none")
                .with_attr("stroke", stroke)
                .with_attr("stroke-width", self.config.value_stroke_width.to_string())
                .with_attr("d", self.geometry.value_path(percentage)),
        );
        let mut label = SvgElement::new("text")
            .with_attr("class", "value-text")
            .with_attr("x", "50")
            .with_attr("y", "60")
            .with_attr("text-anchor", "middle");
        label.set_text(format!("{:.1}", baseline));
        self.svg.append(label);
        self.state.layer = ValueLayer::Active {
            displayed_value: baseline,
        };
    }

    fn apply_frame(&mut self, value: f64) {
        let percentage = self.config.style.arc_percentage(value);
        let d = self.geometry.value_path(percentage);
        let stroke = self.config.style.stroke_for(value).to_string();
        if let Some(path) = self.svg.child_mut(VALUE_CHILD) {
            path.set_attr("d", d);
            path.set_attr("stroke", stroke);
        }
        if let Some(label) = self.svg.child_mut(LABEL_CHILD) {
            label.set_text(format!("{:.1}", value));
        }
        if let ValueLayer::Active { displayed_value } = &mut self.state.layer {
            *displayed_value = value;
        }
    }
}
