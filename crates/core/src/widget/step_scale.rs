use crate::chart::anim::{Animation, AnimationSpec, Easing};
use crate::chart::theme::Palette;
use crate::chart::{Canvas, Point, Rect, TextAnchor, TextStyle};

/// Index of `selected` in `values`; unknown values sit on step 0.
pub fn position_for_value<T: PartialEq>(values: &[T], selected: &T) -> usize {
    let last = values.len().saturating_sub(1);
    values
        .iter()
        .position(|v| v == selected)
        .unwrap_or(0)
        .min(last)
}

/// Value under a continuous slider `position`, rounded to the nearest step and clamped.
pub fn value_for_position<T>(values: &[T], position: f64) -> Option<&T> {
    values.get(step_for_position(values.len(), position))
}

fn step_for_position(len: usize, position: f64) -> usize {
    let last = len.saturating_sub(1);
    if !position.is_finite() || position <= 0.0 {
        return 0;
    }
    (position.round() as usize).min(last)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderStyle {
    pub height: f64,
    pub corner_radius: f64,
    pub thumb_radius: f64,
    /// Horizontal inset of the first and last step centres.
    pub inset: f64,
    pub thumb_ms: u64,
    pub label_ms: u64,
    pub label_size: f64,
    pub selected_label_size: f64,
}

impl Default for SliderStyle {
    fn default() -> Self {
        Self {
            height: 96.0,
            corner_radius: 24.0,
            thumb_radius: 30.0,
            inset: 36.0,
            thumb_ms: 100,
            label_ms: 500,
            label_size: 16.0,
            selected_label_size: 22.0,
        }
    }
}

/// Discrete slider over an ordered list of labels.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSlider {
    labels: Vec<String>,
    selected: usize,
    previous: usize,
    style: SliderStyle,
}

impl StepSlider {
    pub fn new(labels: Vec<String>, selected: &str) -> Self {
        let index = labels
            .iter()
            .position(|l| l == selected)
            .unwrap_or(0)
            .min(labels.len().saturating_sub(1));
        Self {
            labels,
            selected: index,
            previous: index,
            style: SliderStyle::default(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of gaps between steps; zero for one or no labels.
    pub fn step_count(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.labels.get(self.selected).map(String::as_str)
    }

    pub fn fraction_for_index(&self, index: usize) -> f64 {
        match self.step_count() {
            0 => 0.0,
            steps => index.min(steps) as f64 / steps as f64,
        }
    }

    /// Moves the thumb to `position` (in steps) and returns the label it snapped to.
    pub fn drag_to(&mut self, position: f64) -> Option<&str> {
        self.previous = self.selected;
        self.selected = step_for_position(self.labels.len(), position);
        self.selected_label()
    }

    /// Thumb position in steps, `elapsed_ms` after the last drag.
    pub fn thumb_position(&self, elapsed_ms: u64) -> f64 {
        Animation::new(
            self.previous as f64,
            self.selected as f64,
            AnimationSpec::tween(self.style.thumb_ms, Easing::LinearOutSlowIn),
        )
        .value_at(elapsed_ms)
    }

    pub fn label_size(&self, index: usize, elapsed_ms: u64) -> f64 {
        let size_for = |i: usize| {
            if i == self.selected {
                self.style.selected_label_size
            } else {
                self.style.label_size
            }
        };
        let from = if index == self.previous {
            self.style.selected_label_size
        } else {
            self.style.label_size
        };
        Animation::new(
            from,
            size_for(index),
            AnimationSpec::tween(self.style.label_ms, Easing::Linear),
        )
        .value_at(elapsed_ms)
    }

    fn step_x(&self, origin: Point, width: f64, steps: f64) -> f64 {
        let track = (width - 2.0 * self.style.inset).max(0.0);
        let fraction = match self.step_count() {
            0 => 0.0,
            n => (steps / n as f64).clamp(0.0, 1.0),
        };
        origin.x + self.style.inset + fraction * track
    }

    pub fn height(&self) -> f64 {
        self.style.height
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        origin: Point,
        width: f64,
        elapsed_ms: u64,
        palette: &Palette,
    ) {
        canvas.rounded_rect(
            Rect::new(origin.x, origin.y, width, self.style.height),
            self.style.corner_radius,
            palette.primary_container.with_alpha(0.4),
        );

        let cy = origin.y + self.style.height / 2.0;
        let thumb_x = self.step_x(origin, width, self.thumb_position(elapsed_ms));
        canvas.circle(
            Point::new(thumb_x, cy),
            self.style.thumb_radius,
            palette.primary.with_alpha(0.1),
            Some((palette.surface, 3.0)),
        );

        for (i, label) in self.labels.iter().enumerate() {
            let size = self.label_size(i, elapsed_ms);
            let color = if i == self.selected {
                palette.primary
            } else {
                palette.secondary.with_alpha(0.4)
            };
            canvas.text(
                Point::new(self.step_x(origin, width, i as f64), cy + size / 3.0),
                label,
                &TextStyle::new(size, color).anchor(TextAnchor::Middle).bold(),
            );
        }
    }
}
