use crate::chart::anim::{Animation, AnimationSpec, Easing};
use crate::chart::theme::Palette;
use crate::chart::{Canvas, Point, Rect, TextAnchor, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchStyle {
    pub height: f64,
    pub corner_radius: f64,
    pub selected_scale: f64,
    pub unselected_scale: f64,
    pub duration_ms: u64,
    pub text_size: f64,
}

impl Default for SwitchStyle {
    fn default() -> Self {
        Self {
            height: 64.0,
            corner_radius: 40.0,
            selected_scale: 1.0,
            unselected_scale: 0.7,
            duration_ms: 300,
            text_size: 14.0,
        }
    }
}

/// Row of equally wide, mutually exclusive options with a sliding highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiOptionSwitch {
    options: Vec<String>,
    selected: usize,
    previous: usize,
    style: SwitchStyle,
}

impl MultiOptionSwitch {
    pub fn new(options: Vec<String>, selected: usize) -> Self {
        let selected = selected.min(options.len().saturating_sub(1));
        Self {
            options,
            selected,
            previous: selected,
            style: SwitchStyle::default(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Selects `index` and returns it, or `None` when it is out of range.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.options.len() {
            return None;
        }
        self.previous = self.selected;
        self.selected = index;
        Some(index)
    }

    pub fn height(&self) -> f64 {
        self.style.height
    }

    pub fn segment_width(&self, width: f64) -> f64 {
        if self.options.is_empty() {
            0.0
        } else {
            width / self.options.len() as f64
        }
    }

    fn tween(&self, from: f64, to: f64) -> Animation {
        Animation::new(
            from,
            to,
            AnimationSpec::tween(self.style.duration_ms, Easing::FastOutSlowIn),
        )
    }

    /// Highlight behind the selected option, sliding from the previous one.
    pub fn highlight(&self, origin: Point, width: f64, elapsed_ms: u64) -> Rect {
        let segment = self.segment_width(width);
        let x = self
            .tween(self.previous as f64 * segment, self.selected as f64 * segment)
            .value_at(elapsed_ms);
        Rect::new(origin.x + x, origin.y, segment, self.style.height)
    }

    pub fn option_scale(&self, index: usize, elapsed_ms: u64) -> f64 {
        let scale_for = |selected: bool| {
            if selected {
                self.style.selected_scale
            } else {
                self.style.unselected_scale
            }
        };
        self.tween(scale_for(index == self.previous), scale_for(index == self.selected))
            .value_at(elapsed_ms)
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        origin: Point,
        width: f64,
        elapsed_ms: u64,
        palette: &Palette,
    ) {
        if self.options.is_empty() {
            return;
        }
        canvas.rounded_rect(
            Rect::new(origin.x, origin.y, width, self.style.height),
            self.style.corner_radius,
            palette.secondary_container,
        );
        canvas.rounded_rect(
            self.highlight(origin, width, elapsed_ms),
            self.style.corner_radius,
            palette.primary_container,
        );

        let segment = self.segment_width(width);
        for (i, option) in self.options.iter().enumerate() {
            let size = self.style.text_size * self.option_scale(i, elapsed_ms);
            let color = if i == self.selected {
                palette.primary
            } else {
                palette.secondary
            };
            canvas.text(
                Point::new(
                    origin.x + segment * (i as f64 + 0.5),
                    origin.y + self.style.height / 2.0 + size / 3.0,
                ),
                option,
                &TextStyle::new(size, color).anchor(TextAnchor::Middle),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::DisplayList;

    fn availability() -> MultiOptionSwitch {
        MultiOptionSwitch::new(vec!["High".into(), "Moderate".into(), "Low".into()], 0)
    }

    #[test]
    fn select_emits_in_range_indices_only() {
        let mut switch = availability();
        assert_eq!(switch.select(2), Some(2));
        assert_eq!(switch.selected(), 2);
        assert_eq!(switch.select(3), None);
        assert_eq!(switch.selected(), 2);
    }

    #[test]
    fn segments_are_equal_and_highlight_slides() {
        let mut switch = availability();
        assert_eq!(switch.segment_width(300.0), 100.0);
        switch.select(2);

        assert_eq!(switch.highlight(Point::default(), 300.0, 0).x, 0.0);
        let mid = switch.highlight(Point::default(), 300.0, 150).x;
        assert!(mid > 0.0 && mid < 200.0);
        let done = switch.highlight(Point::default(), 300.0, 300);
        assert_eq!(done, Rect::new(200.0, 0.0, 100.0, 64.0));

        assert_eq!(switch.option_scale(2, 300), 1.0);
        assert_eq!(switch.option_scale(0, 300), 0.7);
        assert_eq!(switch.option_scale(1, 0), 0.7);
    }

    #[test]
    fn out_of_range_initial_selection_is_clamped() {
        let switch = MultiOptionSwitch::new(vec!["Intensive".into(), "Semi-intensive".into()], 5);
        assert_eq!(switch.selected(), 1);

        let mut canvas = DisplayList::new();
        switch.draw(&mut canvas, Point::default(), 200.0, 0, &Palette::light());
        assert_eq!(canvas.texts().collect::<Vec<_>>(), vec!["Intensive", "Semi-intensive"]);
    }

    #[test]
    fn draw_paints_the_track_under_the_highlight() {
        let switch = availability();
        let mut canvas = DisplayList::new();
        switch.draw(&mut canvas, Point::new(16.0, 40.0), 300.0, 300, &Palette::light());
        let rects: Vec<_> = canvas.rects().copied().collect();
        assert_eq!(rects[0], Rect::new(16.0, 40.0, 300.0, 64.0));
        assert_eq!(rects[1], Rect::new(16.0, 40.0, 100.0, 64.0));
    }
}
