use wasm_bindgen::prelude::*;
use common::{GameStatus, Position, Settings, Snapshot};

const START_SCREEN_FILL: &str = "rgba(52, 152, 219, 0.1)";
const OVERLAY_FILL: &str = "rgba(0, 0, 0, 0.45)";
const EYE_COLOR: &str = "#1b1b1b";
const HEAD_LIGHTEN: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parses `#rrggbb` / `rrggbb`.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Rgb {
        r: ((value >> 16) & 0xff) as u8,
        g: ((value >> 8) & 0xff) as u8,
        b: (value & 0xff) as u8,
    })
}

/// Brightens every channel by `amount`, saturating at 255.
pub fn lighten(color: Rgb, amount: u8) -> Rgb {
    Rgb {
        r: color.r.saturating_add(amount),
        g: color.g.saturating_add(amount),
        b: color.b.saturating_add(amount),
    }
}

/// Colours used to draw a frame, derived from the presentation part of [`Settings`].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub food: String,
    pub snake: String,
    pub snake_head: String,
}

impl Palette {
    pub fn from_settings(settings: &Settings) -> Self {
        let snake_head = match hex_to_rgb(&settings.snake_color) {
            Some(rgb) => {
                let head = lighten(rgb, HEAD_LIGHTEN);
                format!("rgb({},{},{})", head.r, head.g, head.b)
            }
            None => settings.snake_color.clone(),
        };
        Palette {
            food: settings.food_color.clone(),
            snake: settings.snake_color.clone(),
            snake_head,
        }
    }
}

/// Pixel offsets of the two eyes inside the head cell, facing away from the neck.
pub fn eye_offsets(head: Position, neck: Position, cell_size: f64) -> [(f64, f64); 2] {
    let eye = (cell_size * 0.2).max(4.0);
    let near = 2.0;
    let far = cell_size - eye - 2.0;
    if head.x > neck.x {
        [(far, eye), (far, cell_size - eye * 2.0)]
    } else if head.x < neck.x {
        [(near, eye), (near, cell_size - eye * 2.0)]
    } else if head.y > neck.y {
        [(eye, far), (cell_size - eye * 2.0, far)]
    } else {
        [(eye, near), (cell_size - eye * 2.0, near)]
    }
}

/// Renders a snapshot (as produced by `WebGame::snapshot_json`) onto a canvas.
#[wasm_bindgen]
pub fn render_game(snapshot_json: &str, canvas: web_sys::HtmlCanvasElement, settings_json: &str) -> Result<(), JsValue> {
    let snapshot: Snapshot = serde_json::from_str(snapshot_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse snapshot: {}", e)))?;
    let settings = Settings::from_json(settings_json)
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    draw_frame(&canvas, &snapshot, &Palette::from_settings(&settings))
}

pub fn draw_frame(canvas: &web_sys::HtmlCanvasElement, snapshot: &Snapshot, palette: &Palette) -> Result<(), JsValue> {
    let context = canvas
        .get_context("2d")
        .map_err(|_| JsValue::from_str("Failed to get 2d context"))?
        .ok_or_else(|| JsValue::from_str("2d context is null"))?;

    let ctx = context
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("Failed to cast to 2d context"))?;

    let canvas_width = canvas.width() as f64;
    let canvas_height = canvas.height() as f64;
    let cell_size = snapshot.cell_size_px as f64;

    ctx.clear_rect(0.0, 0.0, canvas_width, canvas_height);

    if snapshot.status == GameStatus::NotStarted {
        draw_checkerboard(&ctx, snapshot.grid_extent, cell_size);
        return Ok(());
    }

    // Food
    let food_x = snapshot.food.x as f64 * cell_size;
    let food_y = snapshot.food.y as f64 * cell_size;
    ctx.set_fill_style(&JsValue::from_str(&palette.food));
    ctx.begin_path();
    ctx.arc(
        food_x + cell_size / 2.0,
        food_y + cell_size / 2.0,
        cell_size / 2.0,
        0.0,
        2.0 * std::f64::consts::PI,
    )?;
    ctx.fill();

    // Body first so the head is drawn on top
    ctx.set_fill_style(&JsValue::from_str(&palette.snake));
    for segment in snapshot.segments.iter().skip(1) {
        ctx.fill_rect(segment.x as f64 * cell_size, segment.y as f64 * cell_size, cell_size, cell_size);
    }

    if let Some(head) = snapshot.segments.first() {
        let head_x = head.x as f64 * cell_size;
        let head_y = head.y as f64 * cell_size;
        ctx.set_fill_style(&JsValue::from_str(&palette.snake_head));
        ctx.fill_rect(head_x, head_y, cell_size, cell_size);

        if let Some(neck) = snapshot.segments.get(1) {
            let eye = (cell_size * 0.2).max(4.0);
            ctx.set_fill_style(&JsValue::from_str(EYE_COLOR));
            for (dx, dy) in eye_offsets(*head, *neck, cell_size) {
                ctx.fill_rect(head_x + dx, head_y + dy, eye, eye);
            }
        }
    }

    if snapshot.status == GameStatus::Over {
        ctx.set_fill_style(&JsValue::from_str(OVERLAY_FILL));
        ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

        ctx.set_fill_style(&JsValue::from_str("#ffffff"));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font("bold 42px sans-serif");
        ctx.fill_text("Game Over", canvas_width / 2.0, canvas_height / 2.0 - 24.0)?;
        ctx.set_font("24px sans-serif");
        ctx.fill_text(
            &format!("Score: {}", snapshot.score),
            canvas_width / 2.0,
            canvas_height / 2.0 + 24.0,
        )?;
    }

    Ok(())
}

fn draw_checkerboard(ctx: &web_sys::CanvasRenderingContext2d, grid_extent: u32, cell_size: f64) {
    ctx.set_fill_style(&JsValue::from_str(START_SCREEN_FILL));
    for i in 0..grid_extent {
        for j in 0..grid_extent {
            if (i + j) % 2 == 0 {
                ctx.fill_rect(i as f64 * cell_size, j as f64 * cell_size, cell_size, cell_size);
            }
        }
    }
}
