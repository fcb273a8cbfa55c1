use std::path::Path as FsPath;

use glam::Vec2;
use home_layout::prelude::*;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Maps plan coordinates to image pixels.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// Plan-space point drawn at the top-left of the content area.
    pub origin: Vec2,
    /// Pixels per plan unit.
    pub scale: f32,
    /// Blank border in pixels.
    pub padding: u32,
    pub background: [u8; 3],
    pub wall_color: [u8; 3],
    /// Multiplier applied to marker radii and stroke widths.
    pub line_scale: u32,
}

impl RenderConfig {
    /// Fits `extent` plan units starting at `origin` into the image.
    pub fn new(image_size: (u32, u32), origin: Vec2, extent: Vec2) -> Self {
        let padding = 24;
        let usable = Vec2::new(
            image_size.0.saturating_sub(2 * padding) as f32,
            image_size.1.saturating_sub(2 * padding) as f32,
        );
        let scale = (usable / extent.max(Vec2::ONE)).min_element();
        Self {
            image_size,
            origin,
            scale,
            padding,
            background: [250, 250, 250],
            wall_color: [55, 65, 81],
            line_scale: 1,
        }
    }

    /// Fits the bounding box of all rooms into the image.
    pub fn fit_rooms(image_size: (u32, u32), rooms: &[Room]) -> Self {
        if rooms.is_empty() {
            return Self::new(image_size, Vec2::ZERO, Vec2::ONE);
        }
        let (min, max) = rooms.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), r| (min.min(r.bounds.min()), max.max(r.bounds.max())),
        );
        Self::new(image_size, min, max - min)
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_line_scale(mut self, line_scale: u32) -> Self {
        self.line_scale = line_scale.max(1);
        self
    }

    fn to_px(&self, p: Vec2) -> Vec2 {
        (p - self.origin) * self.scale + Vec2::splat(self.padding as f32)
    }
}

/// Renders rooms, connections and component markers of a layout.
pub fn render_layout_to_png<C: ComponentKind>(
    rooms: &[Room],
    result: &LayoutResult<C>,
    config: &RenderConfig,
    out: impl AsRef<FsPath>,
) -> anyhow::Result<()> {
    let mut canvas = Canvas::new(config);
    canvas.rooms(rooms);

    for conn in &result.connections {
        let stroke = conn.category.stroke(conn.capacity);
        canvas.path(&conn.path, stroke);
    }
    for component in &result.components {
        let marker = component.component.marker();
        canvas.marker(component.position, marker);
    }

    canvas.save(out.as_ref())?;
    info!(
        "Wrote {} ({} components, {} connections).",
        out.as_ref().display(),
        result.stats.components,
        result.stats.connections
    );
    Ok(())
}

/// Renders a generated floor plan with doors, windows and the staircase.
pub fn render_floor_plan_to_png(
    plan: &GeneratedFloorPlan,
    config: &RenderConfig,
    out: impl AsRef<FsPath>,
) -> anyhow::Result<()> {
    let mut canvas = Canvas::new(config);
    canvas.rooms(&plan.rooms);

    if let Some(stairs) = &plan.staircase {
        canvas.outline(&stairs.bounds, [120, 113, 108], 1);
    }
    for door in &plan.doors {
        canvas.fill(&door.bounds, [180, 83, 9]);
    }
    for window in &plan.windows {
        canvas.fill(&window.bounds, [56, 189, 248]);
    }

    canvas.save(out.as_ref())?;
    info!("Wrote {}.", out.as_ref().display());
    Ok(())
}

struct Canvas<'a> {
    config: &'a RenderConfig,
    image: RgbImage,
}

impl<'a> Canvas<'a> {
    fn new(config: &'a RenderConfig) -> Self {
        let (w, h) = config.image_size;
        Self {
            config,
            image: RgbImage::from_pixel(w, h, Rgb(config.background)),
        }
    }

    fn save(&self, out: &FsPath) -> anyhow::Result<()> {
        self.image.save(out)?;
        Ok(())
    }

    fn rooms(&mut self, rooms: &[Room]) {
        for room in rooms {
            let fill = room
                .color
                .as_deref()
                .and_then(parse_hex)
                .unwrap_or_else(|| category_fill(room.category));
            self.fill(&room.bounds, fill);
        }
        for room in rooms {
            self.outline(&room.bounds, self.config.wall_color, 2);
        }
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 3]) {
        let (w, h) = self.config.image_size;
        if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
            self.image.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    fn fill_px(&mut self, min: Vec2, max: Vec2, color: [u8; 3]) {
        let (x0, y0) = (min.x.round() as i64, min.y.round() as i64);
        let (x1, y1) = (max.x.round() as i64, max.y.round() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.put(x, y, color);
            }
        }
    }

    fn fill(&mut self, rect: &Rect, color: [u8; 3]) {
        let min = self.config.to_px(rect.min());
        let max = self.config.to_px(rect.max());
        self.fill_px(min, max, color);
    }

    fn outline(&mut self, rect: &Rect, color: [u8; 3], width: u32) {
        let (min, max) = (rect.min(), rect.max());
        let corners = [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
            min,
        ];
        let stroke = Stroke {
            color,
            width,
            dashed: false,
        };
        for pair in corners.windows(2) {
            self.segment(pair[0], pair[1], stroke);
        }
    }

    fn path(&mut self, path: &Path, stroke: Stroke) {
        for (a, b) in path.segments() {
            self.segment(a, b, stroke);
        }
    }

    /// Draws a segment as a run of square brushes; dashes are 8 px on, 5 px off.
    fn segment(&mut self, a: Vec2, b: Vec2, stroke: Stroke) {
        let (a, b) = (self.config.to_px(a), self.config.to_px(b));
        let half = (stroke.width * self.config.line_scale) as f32 / 2.0;
        let steps = a.distance(b).ceil().max(1.0) as usize;
        for i in 0..=steps {
            if stroke.dashed && i % 13 >= 8 {
                continue;
            }
            let p = a.lerp(b, i as f32 / steps as f32);
            self.fill_px(p - half, p + half - 1.0, stroke.color);
        }
    }

    fn marker(&mut self, at: Vec2, marker: Marker) {
        let c = self.config.to_px(at);
        let r = (marker.radius * self.config.line_scale) as i64;
        let (cx, cy) = (c.x.round() as i64, c.y.round() as i64);
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 <= r * r {
                    let color = if d2 >= (r - 1) * (r - 1) {
                        [255, 255, 255]
                    } else {
                        marker.color
                    };
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }
}

fn category_fill(category: RoomCategory) -> [u8; 3] {
    match category {
        RoomCategory::Living => [254, 243, 199],
        RoomCategory::Bedroom => [219, 234, 254],
        RoomCategory::Kitchen => [254, 226, 226],
        RoomCategory::Bathroom | RoomCategory::PowderRoom => [204, 251, 241],
        RoomCategory::Utility => [229, 231, 235],
        RoomCategory::Entrance => [237, 233, 254],
        RoomCategory::Office => [220, 252, 231],
        RoomCategory::Dining => [255, 237, 213],
        RoomCategory::Corridor => [243, 244, 246],
    }
}

/// Parses `#rrggbb`.
fn parse_hex(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
