//! Render surface backed by a ratatui braille canvas.

use std::f64::consts::TAU;

use mechwatch_core::{ColorTheme, Point, Transform};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Context, Line as CanvasLine},
};

use crate::dial::{DIAL_ID, DIAL_RADIUS};
use crate::surface::{Primitive, RenderSurface};
use crate::tilt::Tilt;
use crate::train::PINION_ID;

/// Segments used to outline a disk.
const DISK_SEGMENTS: u32 = 32;

/// Margin around the dial ring, in face units.
const VIEW_MARGIN: f64 = 6.0;

/// Primitives registered under one handle.
#[derive(Debug, Clone)]
struct Node {
    handle: String,
    primitives: Vec<Primitive>,
    transform: Transform,
}

/// Retained scene of handles, drawn back-to-front in registration order with
/// the hands always on top.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    nodes: Vec<Node>,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last transform written to `handle`.
    pub fn transform(&self, handle: &str) -> Option<Transform> {
        self.node(handle).map(|node| node.transform)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, handle: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.handle == handle)
    }

    /// Draw the scene into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: ColorTheme, tilt: Tilt) {
        let (x_bounds, y_bounds) = view_bounds(area, DIAL_RADIUS + VIEW_MARGIN);

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                // Hands go on their own top layer so gear strokes never recolour them.
                for node in self.nodes.iter().filter(|node| !is_hand(&node.handle)) {
                    self.draw_node(ctx, node, theme, tilt);
                }
                ctx.layer();
                for node in self.nodes.iter().filter(|node| is_hand(&node.handle)) {
                    self.draw_node(ctx, node, theme, tilt);
                }
            });

        frame.render_widget(canvas, area);
    }

    fn draw_node(&self, ctx: &mut Context, node: &Node, theme: ColorTheme, tilt: Tilt) {
        let Some(color) = role_color(&node.handle, theme) else {
            return;
        };
        for primitive in &node.primitives {
            let outline = match primitive {
                Primitive::Polygon(points) => points.clone(),
                Primitive::Disk { center, radius } => disk_outline(*center, *radius),
            };
            let projected: Vec<Point> = outline
                .into_iter()
                .map(|p| tilt.project(node.transform.apply(p)))
                .collect();
            draw_closed(ctx, &projected, color);
        }
    }
}

impl RenderSurface for CanvasSurface {
    fn register(&mut self, handle: &str, primitives: Vec<Primitive>) {
        if let Some(node) = self.nodes.iter_mut().find(|node| node.handle == handle) {
            node.primitives = primitives;
            return;
        }
        self.nodes.push(Node {
            handle: handle.to_string(),
            primitives,
            transform: Transform::IDENTITY,
        });
    }

    fn contains(&self, handle: &str) -> bool {
        self.node(handle).is_some()
    }

    fn set_transform(&mut self, handle: &str, transform: Transform) {
        if let Some(node) = self.nodes.iter_mut().find(|node| node.handle == handle) {
            node.transform = transform;
        }
    }

    fn remove(&mut self, handle: &str) {
        self.nodes.retain(|node| node.handle != handle);
    }
}

/// Canvas bounds that show `extent` in every direction without stretching.
///
/// Braille dots are two per cell across and four per cell down, which is
/// close to square on common terminal fonts.
pub fn view_bounds(area: Rect, extent: f64) -> ([f64; 2], [f64; 2]) {
    let dots_x = f64::from(area.width.max(1)) * 2.0;
    let dots_y = f64::from(area.height.max(1)) * 4.0;
    let aspect = dots_x / dots_y;

    let (half_x, half_y) = if aspect >= 1.0 {
        (extent * aspect, extent)
    } else {
        (extent, extent / aspect)
    };
    ([-half_x, half_x], [-half_y, half_y])
}

fn is_hand(handle: &str) -> bool {
    handle.starts_with("hand-")
}

/// Stroke colour for a handle; `None` for the pinion, which drives the train unseen.
fn role_color(handle: &str, theme: ColorTheme) -> Option<Color> {
    match handle {
        DIAL_ID => Some(Color::DarkGray),
        PINION_ID => None,
        h if is_hand(h) => Some(Color::White),
        _ => Some(theme.color()),
    }
}

fn disk_outline(center: Point, radius: f64) -> Vec<Point> {
    (0..DISK_SEGMENTS)
        .map(|i| center + Point::polar(radius, f64::from(i) * TAU / f64::from(DISK_SEGMENTS)))
        .collect()
}

/// Stroke a closed outline. The face is y-down, the canvas y-up.
fn draw_closed(ctx: &mut Context, points: &[Point], color: Color) {
    let Some(&first) = points.first() else {
        return;
    };
    for (a, b) in points.iter().zip(points.iter().skip(1).chain(std::iter::once(&first))) {
        ctx.draw(&CanvasLine::new(a.x, -a.y, b.x, -b.y, color));
    }
}
