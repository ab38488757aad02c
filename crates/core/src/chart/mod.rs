pub mod anim;
pub mod pie;
pub mod row;
pub mod svg;
pub mod theme;

use serde::Serialize;
use theme::Color;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point on a circle; 0° is three o'clock and angles grow clockwise (y points down).
    pub fn on_circle(center: Point, radius: f64, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self {
            x: center.x + radius * rad.cos(),
            y: center.y + radius * rad.sin(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            color,
            anchor: TextAnchor::Start,
            bold: false,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A stroked arc segment of a ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcStroke {
    pub center: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub width: f64,
    pub color: Color,
}

/// Drawing surface the widgets and charts paint onto.
pub trait Canvas {
    fn arc(&mut self, arc: &ArcStroke);

    fn rounded_rect(&mut self, rect: Rect, corner_radius: f64, fill: Color);

    fn circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<(Color, f64)>);

    fn text(&mut self, at: Point, text: &str, style: &TextStyle);

    /// Rotates everything drawn until the matching [`Canvas::pop_transform`].
    fn push_rotation(&mut self, degrees: f64, pivot: Point);

    fn pop_transform(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Arc(ArcStroke),
    RoundedRect {
        rect: Rect,
        corner_radius: f64,
        fill: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
        stroke: Option<(Color, f64)>,
    },
    Text {
        at: Point,
        text: String,
        style: TextStyle,
    },
    PushRotation {
        degrees: f64,
        pivot: Point,
    },
    PopTransform,
}

/// Canvas that records draw calls instead of painting them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arcs(&self) -> impl Iterator<Item = &ArcStroke> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Arc(arc) => Some(arc),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::RoundedRect { rect, .. } => Some(rect),
            _ => None,
        })
    }

    /// Paints the recorded ops onto another canvas, in order.
    pub fn replay(&self, canvas: &mut dyn Canvas) {
        for op in &self.ops {
            match op {
                DrawOp::Arc(arc) => canvas.arc(arc),
                DrawOp::RoundedRect {
                    rect,
                    corner_radius,
                    fill,
                } => canvas.rounded_rect(*rect, *corner_radius, *fill),
                DrawOp::Circle {
                    center,
                    radius,
                    fill,
                    stroke,
                } => canvas.circle(*center, *radius, *fill, *stroke),
                DrawOp::Text { at, text, style } => canvas.text(*at, text, style),
                DrawOp::PushRotation { degrees, pivot } => canvas.push_rotation(*degrees, *pivot),
                DrawOp::PopTransform => canvas.pop_transform(),
            }
        }
    }
}

impl Canvas for DisplayList {
    fn arc(&mut self, arc: &ArcStroke) {
        self.ops.push(DrawOp::Arc(*arc));
    }

    fn rounded_rect(&mut self, rect: Rect, corner_radius: f64, fill: Color) {
        self.ops.push(DrawOp::RoundedRect {
            rect,
            corner_radius,
            fill,
        });
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<(Color, f64)>) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            fill,
            stroke,
        });
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            at,
            text: text.to_string(),
            style: *style,
        });
    }

    fn push_rotation(&mut self, degrees: f64, pivot: Point) {
        self.ops.push(DrawOp::PushRotation { degrees, pivot });
    }

    fn pop_transform(&mut self) {
        self.ops.push(DrawOp::PopTransform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_grow_clockwise_from_three_oclock() {
        let c = Point::new(10.0, 10.0);
        let east = Point::on_circle(c, 5.0, 0.0);
        let south = Point::on_circle(c, 5.0, 90.0);
        assert!((east.x - 15.0).abs() < 1e-9 && (east.y - 10.0).abs() < 1e-9);
        assert!((south.x - 10.0).abs() < 1e-9 && (south.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn replay_reproduces_the_recorded_ops() {
        let mut recorded = DisplayList::new();
        recorded.push_rotation(30.0, Point::new(1.0, 1.0));
        recorded.text(Point::new(2.0, 3.0), "75", &TextStyle::new(12.0, Color::TRANSPARENT));
        recorded.pop_transform();

        let mut copy = DisplayList::new();
        recorded.replay(&mut copy);
        assert_eq!(copy.ops, recorded.ops);
    }
}
