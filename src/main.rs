//! Preview window for the gauge: rasterizes the dial and value arcs
//! into a `pixels` framebuffer and drives the animation from the
//! window's redraw loop. Values arrive on stdin (one number per line)
//! or wander randomly while stdin is silent.

use std::env;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use rand::Rng;
use rusttype::{point, Font, PositionedGlyph, Scale};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use svgauge::{ArcSpec, Color, ColorRange, Gauge, GaugeConfig, GaugeStyle};

/// Latest stdin value scaled by 1000; u32::MAX means none received yet.
static PIPE_VALUE: AtomicU32 = AtomicU32::new(u32::MAX);

const WINDOW_WIDTH: usize = 460;
const WINDOW_HEIGHT: usize = 460;
const TARGET_FPS: f64 = 60.0;
/// Frames between wandering-target changes when stdin is silent.
const RETARGET_FRAMES: u32 = 180;

fn default_stops() -> Vec<String> {
    ["#2ecc71", "#f1c40f", "#e67e22", "#e74c3c"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Parse --range x y / --color c / --title t / --font path
    let mut title = "svgauge".to_string();
    let mut range: Option<(f64, f64)> = None;
    let mut fixed_color: Option<String> = None;
    let mut font_path: Option<String> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--range" => {
                if let (Some(x), Some(y)) = (args.next(), args.next()) {
                    if let (Ok(x), Ok(y)) = (x.parse::<f64>(), y.parse::<f64>()) {
                        range = Some((x.min(y), x.max(y)));
                    }
                }
            }
            "--color" => fixed_color = args.next(),
            "--title" => {
                if let Some(t) = args.next() {
                    title = t;
                }
            }
            "--font" => font_path = args.next(),
            other => log::warn!("ignoring unknown argument {other}"),
        }
    }

    let (domain_min, domain_max) = range.unwrap_or((0.0, 100.0));
    let style = match (range, fixed_color) {
        (Some((min, max)), _) => GaugeStyle::Range(ColorRange::new(min, max, default_stops())),
        (None, Some(color)) => GaugeStyle::Fixed(color),
        (None, None) => GaugeStyle::Fixed("#39ff14".to_string()),
    };
    let mut gauge = Gauge::new(GaugeConfig::builder().style(style).build())?;

    let font = load_font(font_path.as_deref());

    // Reader thread feeding the atomic mailbox, one value per line.
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(Result::ok) {
            if let Ok(value) = line.trim().parse::<f64>() {
                if value.is_finite() {
                    PIPE_VALUE.store((value * 1000.0).round() as u32, Ordering::Relaxed);
                }
            }
        }
    });

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&title)
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64))
        .with_resizable(false)
        .build(&event_loop)?;
    let window = std::sync::Arc::new(window);
    let window_clone = window.clone();

    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let frame_duration = Duration::from_secs_f64(1.0 / TARGET_FPS);
    let mut last_frame = Instant::now();
    let mut last_piped = u32::MAX;
    let mut frames_until_retarget = 0u32;

    log::info!("showing gauge '{title}' over {domain_min}..{domain_max}");

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    let _ = pixels.resize_buffer(new_size.width, new_size.height);
                    let _ = pixels.resize_surface(new_size.width, new_size.height);
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let piped = PIPE_VALUE.load(Ordering::Relaxed);
                    if piped != u32::MAX && piped != last_piped {
                        last_piped = piped;
                        let value = piped as f64 / 1000.0;
                        if let Err(err) = gauge.set_value(value, now) {
                            log::warn!("dropping piped value: {err}");
                        }
                    } else if piped == u32::MAX {
                        // No feed attached: wander between random targets.
                        if frames_until_retarget == 0 {
                            let mut rng = rand::rng();
                            let target = rng.random_range(domain_min..domain_max);
                            let _ = gauge.set_value(target, now);
                            frames_until_retarget = RETARGET_FRAMES;
                        } else {
                            frames_until_retarget -= 1;
                        }
                    }

                    gauge.tick(now);
                    render_gauge(pixels.frame_mut(), fb_width, fb_height, &gauge, font.as_ref());
                    let _ = pixels.render();
                }
                _ => {}
            },
            Event::AboutToWait => {
                let elapsed = last_frame.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
                last_frame = Instant::now();
                window_clone.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}

fn load_font(path: Option<&str>) -> Option<Font<'static>> {
    let path = match path {
        Some(path) => path,
        None => {
            log::info!("no --font given, label text disabled");
            return None;
        }
    };
    match std::fs::read(path) {
        Ok(bytes) => {
            let font = Font::try_from_vec(bytes);
            if font.is_none() {
                log::warn!("could not parse font file {path}");
            }
            font
        }
        Err(err) => {
            log::warn!("could not read font file {path}: {err}");
            None
        }
    }
}

// ============================================================================
// RASTERIZATION
// ============================================================================

fn render_gauge(
    frame: &mut [u8],
    width: usize,
    height: usize,
    gauge: &Gauge,
    font: Option<&Font>,
) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&[0x11, 0x11, 0x11, 0xff]);
    }

    // Map the gauge's 100x100 viewBox onto the framebuffer, centered.
    let scale = width.min(height) as f64 / 100.0;
    let ox = (width as f64 - 100.0 * scale) / 2.0;
    let oy = (height as f64 - 100.0 * scale) / 2.0;

    let config = gauge.config();
    let dial_color = Color::from_hex(&config.dial_color).unwrap_or(Color::new(0x66, 0x66, 0x66));
    draw_arc_stroke(
        frame,
        width,
        height,
        &gauge.dial_arc(),
        config.dial_stroke_width,
        scale,
        ox,
        oy,
        dial_color,
    );

    if let Some(arc) = gauge.value_arc() {
        let value_color = gauge
            .displayed_color()
            .and_then(Color::from_hex)
            .unwrap_or(Color::new(0x39, 0xff, 0x14));
        draw_arc_stroke(
            frame,
            width,
            height,
            &arc,
            config.value_stroke_width,
            scale,
            ox,
            oy,
            value_color,
        );
    }

    if let (Some(font), Some(value)) = (font, gauge.displayed_value()) {
        let label = format!("{:.1}", value);
        let x = (ox + 50.0 * scale) as i32;
        let y = (oy + 60.0 * scale) as i32;
        let font_scale = Scale::uniform((13.0 * scale) as f32);
        draw_text(frame, width, height, x, y, &label, font, font_scale, (0xee, 0xee, 0xee));
    }
}

/// Anti-aliased annulus stroke along the arc, clockwise from its start
/// angle to its end angle, stroke centered on the arc radius.
#[allow(clippy::too_many_arguments)]
fn draw_arc_stroke(
    frame: &mut [u8],
    width: usize,
    height: usize,
    arc: &ArcSpec,
    stroke_width: f64,
    scale: f64,
    ox: f64,
    oy: f64,
    color: Color,
) {
    let sweep = (arc.end_angle - arc.start_angle).rem_euclid(360.0);
    if sweep == 0.0 {
        return;
    }
    let tau = 2.0 * std::f64::consts::PI;
    let start = arc.start_angle.to_radians().rem_euclid(tau);
    let end = arc.end_angle.to_radians().rem_euclid(tau);

    let cx = ox + 50.0 * scale;
    let cy = oy + 50.0 * scale;
    let r = arc.radius * scale;
    let half = stroke_width * scale / 2.0;

    let min_x = ((cx - r - half - 1.0).floor() as i32).max(0);
    let max_x = ((cx + r + half + 1.0).ceil() as i32).min(width as i32 - 1);
    let min_y = ((cy - r - half - 1.0).floor() as i32).max(0);
    let max_y = ((cy + r + half + 1.0).ceil() as i32).min(height as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let mut angle = dy.atan2(dx);
            if angle < 0.0 {
                angle += tau;
            }
            let in_arc = if start <= end {
                angle >= start && angle <= end
            } else {
                angle >= start || angle <= end
            };
            if !in_arc {
                continue;
            }
            let aa = (1.0 - ((dist - r).abs() - half).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(frame, width, x as usize, y as usize, color, aa as f32);
            }
        }
    }
}

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let (r, g, b) = color.as_tuple();
        let src = [r as f32, g as f32, b as f32];
        let a = alpha.clamp(0.0, 1.0);
        let out = [
            (src[0] * a + frame[idx] as f32 * (1.0 - a)).round() as u8,
            (src[1] * a + frame[idx + 1] as f32 * (1.0 - a)).round() as u8,
            (src[2] * a + frame[idx + 2] as f32 * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    frame: &mut [u8],
    width: usize,
    height: usize,
    x: i32,
    y: i32,
    text: &str,
    font: &Font,
    scale: Scale,
    color: (u8, u8, u8),
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x - width_px / 2;
    let offset_y = y - height_px / 2;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if px >= 0 && px < width as i32 && py >= 0 && py < height as i32 {
                    set_pixel(
                        frame,
                        width,
                        px as usize,
                        py as usize,
                        Color::new(color.0, color.1, color.2),
                        v,
                    );
                }
            });
        }
    }
}
