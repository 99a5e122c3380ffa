//! Canvas2D frame renderer.
//!
//! One call paints a complete frame in a fixed layer order, later layers
//! occluding earlier ones: background, parallax starfield, atmosphere
//! glow, sphere body, grid, highlighted outline, day/night terminator,
//! decorative orbit rings.

use std::f64::consts::{FRAC_PI_2, TAU};

use runtime::FrameTiming;
use scene::{GlobeStyle, INDIA_OUTLINE, Star, visible_outline};
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

/// Fixed colors of the dark-space theme.
#[derive(Debug, Copy, Clone)]
struct Palette {
    background_top: &'static str,
    background_bottom: &'static str,
    star: &'static str,
    grid: &'static str,
    highlight_fill: &'static str,
    highlight_stroke_near: &'static str,
    highlight_stroke_far: &'static str,
}

const PALETTE: Palette = Palette {
    background_top: "#020611",
    background_bottom: "#031523",
    star: "rgba(255,255,255,0.75)",
    grid: "rgba(89, 214, 255, 0.12)",
    highlight_fill: "rgba(30, 220, 255, 0.16)",
    highlight_stroke_near: "rgba(131, 255, 240, 0.8)",
    highlight_stroke_far: "rgba(0, 116, 255, 0.6)",
};

pub fn render_frame(
    ctx: &CanvasRenderingContext2d,
    timing: FrameTiming,
    width: f64,
    height: f64,
    stars: &[Star],
    style: &GlobeStyle,
) {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = style.sphere_radius(width, height);
    let rotation = timing.rotation_rad;

    ctx.clear_rect(0.0, 0.0, width, height);
    draw_background(ctx, width, height);
    draw_starfield(ctx, timing.elapsed_ms, width, height, stars, style);
    draw_atmosphere(ctx, center_x, center_y, radius);
    draw_sphere(ctx, center_x, center_y, radius);
    draw_grid(ctx, rotation, center_x, center_y, radius, style);
    draw_highlight(ctx, rotation, radius, center_x, center_y);
    draw_terminator(
        ctx,
        style.terminator_angle(rotation, timing.elapsed_ms),
        center_x,
        center_y,
        radius,
    );
    draw_orbit_rings(ctx, rotation * style.ring_spin, center_x, center_y, radius, style);
}

fn draw_background(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    let gradient = ctx.create_linear_gradient(0.0, 0.0, width, height);
    let _ = gradient.add_color_stop(0.0, PALETTE.background_top);
    let _ = gradient.add_color_stop(1.0, PALETTE.background_bottom);
    ctx_set_fill_gradient(ctx, &gradient);
    ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_starfield(
    ctx: &CanvasRenderingContext2d,
    elapsed_ms: f64,
    width: f64,
    height: f64,
    stars: &[Star],
    style: &GlobeStyle,
) {
    let [dx, dy] = style.parallax_offset(elapsed_ms, width, height);
    ctx.save();
    let _ = ctx.translate(dx, dy);
    ctx_set_fill_style(ctx, PALETTE.star);
    for star in stars {
        ctx.begin_path();
        ctx.set_global_alpha(star.brightness);
        let _ = ctx.arc(star.x, star.y, star.radius, 0.0, TAU);
        ctx.fill();
    }
    ctx.restore();
    ctx.set_global_alpha(1.0);
}

fn draw_atmosphere(ctx: &CanvasRenderingContext2d, center_x: f64, center_y: f64, radius: f64) {
    let Ok(gradient) =
        ctx.create_radial_gradient(center_x, center_y, radius * 0.9, center_x, center_y, radius * 1.3)
    else {
        return;
    };
    let _ = gradient.add_color_stop(0.0, "rgba(0, 180, 255, 0.0)");
    let _ = gradient.add_color_stop(0.8, "rgba(0, 200, 255, 0.08)");
    let _ = gradient.add_color_stop(1.0, "rgba(89, 214, 255, 0.22)");
    ctx.begin_path();
    let _ = ctx.arc(center_x, center_y, radius * 1.25, 0.0, TAU);
    ctx_set_fill_gradient(ctx, &gradient);
    ctx.fill();
}

fn draw_sphere(ctx: &CanvasRenderingContext2d, center_x: f64, center_y: f64, radius: f64) {
    let Ok(gradient) = ctx.create_radial_gradient(
        center_x - radius * 0.2,
        center_y - radius * 0.2,
        radius * 0.2,
        center_x,
        center_y,
        radius * 1.1,
    ) else {
        return;
    };
    let _ = gradient.add_color_stop(0.0, "#3bc4ff");
    let _ = gradient.add_color_stop(0.4, "#0b6894");
    let _ = gradient.add_color_stop(0.75, "#052742");
    let _ = gradient.add_color_stop(1.0, "#020f1d");
    ctx.begin_path();
    let _ = ctx.arc(center_x, center_y, radius, 0.0, TAU);
    ctx_set_fill_gradient(ctx, &gradient);
    ctx.fill();
}

fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    rotation: f64,
    center_x: f64,
    center_y: f64,
    radius: f64,
    style: &GlobeStyle,
) {
    ctx.save();
    let _ = ctx.translate(center_x, center_y);
    ctx_set_stroke_style(ctx, PALETTE.grid);
    ctx.set_line_width(radius * 0.004);

    for i in 1..style.lat_bands {
        let lat = (i as f64 / style.lat_bands as f64) * FRAC_PI_2;
        let sin_lat = lat.sin();
        let band_radius = (1.0 - sin_lat * sin_lat).sqrt() * radius;
        let offset_y = sin_lat * radius;
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, offset_y, band_radius, radius * 0.03, 0.0, 0.0, TAU);
        ctx.stroke();
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, -offset_y, band_radius, radius * 0.03, 0.0, 0.0, TAU);
        ctx.stroke();
    }

    // Stylized meridian sweep: center-out spokes whose length and opacity
    // follow the facing direction of each meridian.
    for j in 0..style.lon_bands {
        let lon = (j as f64 / style.lon_bands as f64) * TAU;
        let facing = (lon + rotation).cos();
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.line_to((lon + rotation).sin() * radius, 0.0);
        ctx_set_stroke_style(
            ctx,
            &format!("rgba(89, 214, 255, {})", 0.08 + facing.max(0.0) * 0.18),
        );
        ctx.stroke();
    }

    ctx.restore();
}

fn draw_highlight(
    ctx: &CanvasRenderingContext2d,
    rotation: f64,
    radius: f64,
    center_x: f64,
    center_y: f64,
) {
    let Some(path) = visible_outline(&INDIA_OUTLINE, rotation, radius) else {
        return;
    };

    ctx.save();
    let _ = ctx.translate(center_x, center_y);
    ctx.begin_path();
    for (i, [x, y]) in path.iter().enumerate() {
        if i == 0 {
            ctx.move_to(*x, *y);
        } else {
            ctx.line_to(*x, *y);
        }
    }
    ctx.close_path();
    ctx_set_fill_style(ctx, PALETTE.highlight_fill);
    ctx.fill();

    ctx.set_line_width(radius * 0.01);
    let gradient = ctx.create_linear_gradient(-radius, -radius, radius, radius);
    let _ = gradient.add_color_stop(0.0, PALETTE.highlight_stroke_near);
    let _ = gradient.add_color_stop(1.0, PALETTE.highlight_stroke_far);
    ctx_set_stroke_gradient(ctx, &gradient);
    ctx.stroke();
    ctx.restore();
}

fn draw_terminator(
    ctx: &CanvasRenderingContext2d,
    angle: f64,
    center_x: f64,
    center_y: f64,
    radius: f64,
) {
    let gradient = ctx.create_linear_gradient(
        center_x + angle.cos() * radius,
        center_y + angle.sin() * radius,
        center_x - angle.cos() * radius,
        center_y - angle.sin() * radius,
    );
    let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0.05)");
    let _ = gradient.add_color_stop(0.5, "rgba(0, 0, 0, 0.15)");
    let _ = gradient.add_color_stop(1.0, "rgba(0, 0, 0, 0.75)");
    ctx.begin_path();
    let _ = ctx.arc(center_x, center_y, radius, 0.0, TAU);
    ctx_set_fill_gradient(ctx, &gradient);
    ctx.fill();
}

fn draw_orbit_rings(
    ctx: &CanvasRenderingContext2d,
    spin: f64,
    center_x: f64,
    center_y: f64,
    radius: f64,
    style: &GlobeStyle,
) {
    ctx.save();
    let _ = ctx.translate(center_x, center_y);
    let _ = ctx.rotate(spin);
    ctx.set_global_alpha(0.09);
    ctx.set_line_width(radius * 0.0025);
    for i in 0..style.orbit_rings {
        let ring_radius = radius * (1.1 + i as f64 * 0.12);
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, ring_radius, 0.0, TAU);
        ctx_set_stroke_style(
            ctx,
            &format!("rgba(89, 214, 255, {})", 0.3 - i as f64 * 0.04),
        );
        ctx.stroke();
    }
    ctx.restore();
}

fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

fn ctx_set_fill_gradient(ctx: &CanvasRenderingContext2d, gradient: &CanvasGradient) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str("fillStyle"), gradient.as_ref());
}

fn ctx_set_stroke_gradient(ctx: &CanvasRenderingContext2d, gradient: &CanvasGradient) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        gradient.as_ref(),
    );
}
