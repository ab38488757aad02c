use super::theme::Color;
use super::{ArcStroke, Canvas, Point, Rect, TextAnchor, TextStyle};
use std::fmt::Write;

/// Sweeps at or above this are drawn as a closed ring; SVG arcs cannot span a full turn.
const FULL_TURN_DEG: f64 = 359.999;

#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    background: Option<Color>,
    body: String,
    open_groups: usize,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            body: String::new(),
            open_groups: 0,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Closes any unbalanced groups and returns the document.
    pub fn finish(mut self) -> String {
        while self.open_groups > 0 {
            self.pop_transform();
        }

        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(self.width),
            h = num(self.height),
        );
        if let Some(bg) = self.background {
            let _ = writeln!(
                out,
                r#"<rect x="0" y="0" width="100%" height="100%"{}/>"#,
                fill_attrs(bg)
            );
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Canvas for SvgCanvas {
    fn arc(&mut self, arc: &ArcStroke) {
        if arc.sweep_deg <= 0.0 || arc.radius <= 0.0 {
            return;
        }

        if arc.sweep_deg >= FULL_TURN_DEG {
            let _ = writeln!(
                self.body,
                r#"<circle cx="{}" cy="{}" r="{}" fill="none"{}/>"#,
                num(arc.center.x),
                num(arc.center.y),
                num(arc.radius),
                stroke_attrs(arc.color, arc.width),
            );
            return;
        }

        let start = Point::on_circle(arc.center, arc.radius, arc.start_deg);
        let end = Point::on_circle(arc.center, arc.radius, arc.start_deg + arc.sweep_deg);
        let large_arc = u8::from(arc.sweep_deg > 180.0);
        let _ = writeln!(
            self.body,
            r#"<path d="M {} {} A {r} {r} 0 {large_arc} 1 {} {}" fill="none"{}/>"#,
            num(start.x),
            num(start.y),
            num(end.x),
            num(end.y),
            stroke_attrs(arc.color, arc.width),
            r = num(arc.radius),
        );
    }

    fn rounded_rect(&mut self, rect: Rect, corner_radius: f64, fill: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let r = corner_radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let _ = writeln!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}"{}/>"#,
            num(rect.x),
            num(rect.y),
            num(rect.width),
            num(rect.height),
            fill_attrs(fill),
            r = num(r),
        );
    }

    fn circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<(Color, f64)>) {
        if radius <= 0.0 {
            return;
        }
        let stroke = stroke
            .map(|(color, width)| stroke_attrs(color, width))
            .unwrap_or_default();
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
            num(center.x),
            num(center.y),
            num(radius),
            fill_attrs(fill),
            stroke,
        );
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = if style.bold { r#" font-weight="bold""# } else { "" };
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}" font-family="serif" font-size="{}" text-anchor="{anchor}"{weight}{}>{}</text>"#,
            num(at.x),
            num(at.y),
            num(style.size),
            fill_attrs(style.color),
            escape(text),
        );
    }

    fn push_rotation(&mut self, degrees: f64, pivot: Point) {
        self.open_groups += 1;
        let _ = writeln!(
            self.body,
            r#"<g transform="rotate({} {} {})">"#,
            num(degrees),
            num(pivot.x),
            num(pivot.y)
        );
    }

    fn pop_transform(&mut self) {
        if self.open_groups == 0 {
            return;
        }
        self.open_groups -= 1;
        self.body.push_str("</g>\n");
    }
}

/// Two decimals, trailing zeros trimmed.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn fill_attrs(color: Color) -> String {
    if color.alpha >= 1.0 {
        format!(r#" fill="{}""#, color.hex())
    } else {
        format!(r#" fill="{}" fill-opacity="{}""#, color.hex(), num(color.alpha))
    }
}

fn stroke_attrs(color: Color, width: f64) -> String {
    let mut out = format!(r#" stroke="{}" stroke-width="{}""#, color.hex(), num(width));
    if color.alpha < 1.0 {
        let _ = write!(out, r#" stroke-opacity="{}""#, num(color.alpha));
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
