use super::anim::{Animation, AnimationSpec, Easing};
use super::theme::{feed_component_color, Color, Palette};
use super::{ArcStroke, Canvas, Point, TextAnchor, TextStyle};
use crate::domain::feed::{format_quantity, FeedComponent, FeedDetails};
use crate::locale::{MessageKey, Strings};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieStyle {
    /// Side of the square the ring is drawn in.
    pub size: f64,
    pub ring_width: f64,
    pub anim_duration_ms: u64,
    pub show_labels_in_arcs: bool,
    pub rotate_on_entry: bool,
    pub label_size: f64,
}

impl Default for PieStyle {
    fn default() -> Self {
        Self {
            size: 225.0,
            ring_width: 65.0,
            anim_duration_ms: 700,
            show_labels_in_arcs: true,
            rotate_on_entry: true,
            label_size: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArcSegment {
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl ArcSegment {
    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }
}

/// Animated size and rotation of the ring at some point of the entry animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieFrame {
    pub size: f64,
    pub rotation_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub value: String,
    #[serde(skip)]
    pub color: Color,
}

/// Ring chart of a handful of proportional quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    slices: Vec<PieSlice>,
    style: PieStyle,
}

impl PieChart {
    pub fn new(slices: Vec<PieSlice>) -> Self {
        Self {
            slices,
            style: PieStyle::default(),
        }
    }

    pub fn with_style(mut self, style: PieStyle) -> Self {
        self.style = style;
        self
    }

    /// Concentrate, green fodder and dry roughage, labelled in the active language.
    pub fn from_feed_details(details: &FeedDetails, strings: &Strings) -> Self {
        let slices = details
            .components()
            .into_iter()
            .map(|(component, value)| PieSlice {
                label: strings.get(component_key(component)).to_string(),
                value,
                color: feed_component_color(component),
            })
            .collect();
        Self::new(slices)
    }

    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    pub fn style(&self) -> &PieStyle {
        &self.style
    }

    /// Sum of the drawable (finite, non-negative) values.
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| drawable(s.value)).sum()
    }

    /// Nothing to apportion: every sweep is zero and a neutral ring is drawn.
    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }

    pub fn sweep_angles(&self) -> Vec<f64> {
        let total = self.total();
        self.slices
            .iter()
            .map(|s| {
                if total > 0.0 {
                    360.0 * drawable(s.value) / total
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Consecutive arcs starting at 0°.
    pub fn segments(&self) -> Vec<ArcSegment> {
        let mut start = 0.0;
        self.sweep_angles()
            .into_iter()
            .map(|sweep| {
                let seg = ArcSegment {
                    start_deg: start,
                    sweep_deg: sweep,
                };
                start += sweep;
                seg
            })
            .collect()
    }

    /// Centre line radius of the settled ring.
    pub fn ring_radius(&self) -> f64 {
        (self.style.size - self.style.ring_width).max(0.0) / 2.0
    }

    /// Where a segment's value label sits: its angular midpoint on the ring's centre line.
    pub fn label_anchor(&self, center: Point, segment: &ArcSegment) -> Point {
        Point::on_circle(center, self.ring_radius(), segment.mid_deg())
    }

    fn size_animation(&self) -> Animation {
        Animation::new(
            0.0,
            self.style.size,
            AnimationSpec::tween(self.style.anim_duration_ms, Easing::LinearOutSlowIn),
        )
    }

    fn rotation_animation(&self) -> Animation {
        let to = if self.style.rotate_on_entry { 360.0 } else { 0.0 };
        Animation::new(
            0.0,
            to,
            AnimationSpec::tween(self.style.anim_duration_ms, Easing::FastOutSlowIn),
        )
    }

    pub fn frame(&self, elapsed_ms: u64) -> PieFrame {
        PieFrame {
            size: self.size_animation().value_at(elapsed_ms),
            rotation_deg: self.rotation_animation().value_at(elapsed_ms) % 360.0,
        }
    }

    pub fn is_settled(&self, elapsed_ms: u64) -> bool {
        self.size_animation().is_finished(elapsed_ms)
            && self.rotation_animation().is_finished(elapsed_ms)
    }

    /// Rows of the values panel under the chart. Whole quantities drop their decimals.
    pub fn legend(&self) -> Vec<LegendEntry> {
        self.slices
            .iter()
            .map(|s| LegendEntry {
                label: s.label.clone(),
                value: format!("{} Kg", format_quantity(s.value)),
                color: s.color,
            })
            .collect()
    }

    /// Colour swatch and name of every slice, in equal columns across `width`.
    /// Returns the height of the row.
    pub fn draw_labels(
        &self,
        canvas: &mut dyn Canvas,
        origin: Point,
        width: f64,
        palette: &Palette,
    ) -> f64 {
        const ROW_HEIGHT: f64 = 28.0;
        if self.slices.is_empty() {
            return 0.0;
        }
        let column = width / self.slices.len() as f64;
        let style = TextStyle::new(13.0, palette.on_surface);
        for (i, slice) in self.slices.iter().enumerate() {
            let left = origin.x + column * i as f64;
            let mid = origin.y + ROW_HEIGHT / 2.0;
            canvas.circle(Point::new(left + 8.0, mid), 6.0, slice.color, None);
            canvas.text(Point::new(left + 20.0, mid + 4.5), &slice.label, &style);
        }
        ROW_HEIGHT
    }

    /// Paints the ring inside the `style.size` square at `origin`.
    pub fn draw(&self, canvas: &mut dyn Canvas, origin: Point, elapsed_ms: u64, palette: &Palette) {
        let frame = self.frame(elapsed_ms);
        if frame.size <= 0.0 {
            return;
        }

        let scale = frame.size / self.style.size;
        let center = Point::new(origin.x + self.style.size / 2.0, origin.y + self.style.size / 2.0);
        let radius = self.ring_radius() * scale;
        let width = self.style.ring_width * scale;

        let rotated = frame.rotation_deg != 0.0;
        if rotated {
            canvas.push_rotation(frame.rotation_deg, center);
        }

        if self.is_empty() {
            canvas.arc(&ArcStroke {
                center,
                radius,
                start_deg: 0.0,
                sweep_deg: 360.0,
                width,
                color: palette.outline.with_alpha(0.3),
            });
        } else {
            let label_style = TextStyle::new(self.style.label_size * scale, palette.on_surface)
                .anchor(TextAnchor::Middle)
                .bold();

            for (slice, segment) in self.slices.iter().zip(self.segments()) {
                if segment.sweep_deg <= 0.0 {
                    continue;
                }
                canvas.arc(&ArcStroke {
                    center,
                    radius,
                    start_deg: segment.start_deg,
                    sweep_deg: segment.sweep_deg,
                    width,
                    color: slice.color,
                });

                if self.style.show_labels_in_arcs {
                    let at = Point::on_circle(center, radius, segment.mid_deg());
                    canvas.text(at, &format_kg(slice.value), &label_style);
                }
            }
        }

        if rotated {
            canvas.pop_transform();
        }
    }
}

pub fn format_kg(value: f64) -> String {
    format!("{value:.2} Kg")
}

fn drawable(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn component_key(component: FeedComponent) -> MessageKey {
    match component {
        FeedComponent::Concentrate => MessageKey::Concentrate,
        FeedComponent::GreenFodder => MessageKey::GreenFodder,
        FeedComponent::DryRoughage => MessageKey::DryRoughage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::DisplayList;
    use crate::locale::Language;

    fn chart(values: &[f64]) -> PieChart {
        PieChart::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| PieSlice {
                    label: format!("s{i}"),
                    value: *v,
                    color: Color::from_argb(0xFF000000),
                })
                .collect(),
        )
    }

    #[test]
    fn sweeps_are_proportional_and_sum_to_a_full_turn() {
        let pie = chart(&[20.0, 30.0, 50.0]);
        assert_eq!(pie.sweep_angles(), vec![72.0, 108.0, 180.0]);
        let segments = pie.segments();
        assert_eq!(segments[1].start_deg, 72.0);
        assert_eq!(segments[2].start_deg, 180.0);
        assert_eq!(segments[2].mid_deg(), 270.0);
    }

    #[test]
    fn zero_total_yields_zero_sweeps_and_a_neutral_ring() {
        let pie = chart(&[0.0, 0.0, 0.0]);
        assert!(pie.is_empty());
        assert_eq!(pie.sweep_angles(), vec![0.0, 0.0, 0.0]);

        let mut canvas = DisplayList::new();
        pie.draw(&mut canvas, Point::default(), 10_000, &Palette::light());
        let arcs: Vec<_> = canvas.arcs().collect();
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].sweep_deg, 360.0);
        assert_eq!(canvas.texts().count(), 0);
    }

    #[test]
    fn negative_and_nan_values_do_not_take_space() {
        let pie = chart(&[f64::NAN, -4.0, 10.0]);
        assert_eq!(pie.sweep_angles(), vec![0.0, 0.0, 360.0]);
    }

    #[test]
    fn entry_animation_settles_to_full_size_without_rotation() {
        let pie = chart(&[1.0, 1.0]);
        let start = pie.frame(0);
        assert_eq!(start.size, 0.0);
        let mid = pie.frame(350);
        assert!(mid.size > 0.0 && mid.size < 225.0);
        assert!(mid.rotation_deg > 0.0);

        let settled = pie.frame(700);
        assert_eq!(settled.size, 225.0);
        assert_eq!(settled.rotation_deg, 0.0);
        assert!(pie.is_settled(700));
    }

    #[test]
    fn settled_draw_matches_segments_and_labels_midpoints() {
        let pie = chart(&[20.0, 30.0, 50.0]);
        let mut canvas = DisplayList::new();
        let origin = Point::new(10.0, 20.0);
        pie.draw(&mut canvas, origin, 700, &Palette::light());

        let arcs: Vec<_> = canvas.arcs().copied().collect();
        assert_eq!(arcs.len(), 3);
        for (arc, seg) in arcs.iter().zip(pie.segments()) {
            assert_eq!(arc.start_deg, seg.start_deg);
            assert_eq!(arc.sweep_deg, seg.sweep_deg);
            assert_eq!(arc.radius, pie.ring_radius());
            assert_eq!(arc.width, 65.0);
        }

        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts, vec!["20.00 Kg", "30.00 Kg", "50.00 Kg"]);

        // No rotation group once settled.
        assert!(!canvas
            .ops
            .iter()
            .any(|op| matches!(op, crate::chart::DrawOp::PushRotation { .. })));

        let center = Point::new(10.0 + 112.5, 20.0 + 112.5);
        let anchor = pie.label_anchor(center, &pie.segments()[2]);
        assert!((anchor.x - center.x).abs() < 1e-9);
        assert!((anchor.y - (center.y - pie.ring_radius())).abs() < 1e-9);
    }

    #[test]
    fn label_row_names_every_slice_with_its_colour() {
        let pie = chart(&[1.5, 0.0, 2.0]);
        let mut canvas = DisplayList::new();
        let height = pie.draw_labels(&mut canvas, Point::new(0.0, 10.0), 300.0, &Palette::light());
        assert_eq!(height, 28.0);

        let texts: Vec<_> = canvas.texts().collect();
        assert_eq!(texts, vec!["s0", "s1", "s2"]);
        let swatches: Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                crate::chart::DrawOp::Circle { center, .. } => Some(center.x),
                _ => None,
            })
            .collect();
        assert_eq!(swatches, vec![8.0, 108.0, 208.0]);
        assert_eq!(pie.legend()[0].value, "1.5 Kg");
    }

    #[test]
    fn feed_details_become_localised_slices() {
        let details = FeedDetails {
            concentrate: 2.0,
            green_fodder: 10.0,
            dry_roughage: 3.0,
        };
        let pie = PieChart::from_feed_details(&details, &Strings::new(Language::English));
        let labels: Vec<_> = pie.slices().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Concentrate", "Green Fodder", "Dry Roughage"]);
        assert_eq!(pie.total(), 15.0);
        assert_eq!(pie.legend()[1].value, "10 Kg");
    }
}
