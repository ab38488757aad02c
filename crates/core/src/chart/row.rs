use super::anim::{Animation, AnimationSpec, Spring};
use super::theme::{Color, Palette};
use super::{Canvas, Point, Rect, TextAnchor, TextStyle};
use crate::domain::feed::{ExpectedDailyGain, HusbandrySystem};
use crate::locale::{MessageKey, Strings};
use serde::Serialize;

/// Which bars each bucket shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarDisplay {
    Both,
    /// Compact layouts keep one bar per bucket, picked by the system switch.
    Single(HusbandrySystem),
}

impl BarDisplay {
    pub fn shows(&self, system: HusbandrySystem) -> bool {
        match self {
            BarDisplay::Both => true,
            BarDisplay::Single(only) => *only == system,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowBar {
    pub system: HusbandrySystem,
    pub value: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub label: String,
    pub bars: Vec<RowBar>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub thickness: f64,
    pub spacing: f64,
    pub group_height: f64,
    /// Added to `groups * group_height`, split evenly above and below.
    pub extra_height: f64,
    pub label_width: f64,
    pub right_padding: f64,
    pub corner_radius: f64,
    pub stagger_ms: u64,
    pub spring: Spring,
    pub text_size: f64,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            thickness: 32.0,
            spacing: 4.0,
            group_height: 80.0,
            extra_height: 100.0,
            label_width: 64.0,
            right_padding: 72.0,
            corner_radius: 8.0,
            stagger_ms: 10,
            spring: Spring::medium_bouncy_low(),
            text_size: 14.0,
        }
    }
}

/// Settled position of one visible bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayout {
    pub group: usize,
    pub system: HusbandrySystem,
    pub value: f64,
    pub rect: Rect,
    #[serde(skip)]
    pub color: Color,
}

/// Horizontal bars per body-weight bucket, bucket order as in the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RowChart {
    groups: Vec<RowGroup>,
    display: BarDisplay,
    style: RowStyle,
}

impl RowChart {
    pub fn new(groups: Vec<RowGroup>) -> Self {
        Self {
            groups,
            display: BarDisplay::Both,
            style: RowStyle::default(),
        }
    }

    pub fn from_gain(gain: &ExpectedDailyGain, palette: &Palette) -> Self {
        let groups = gain
            .buckets()
            .iter()
            .map(|bucket| RowGroup {
                label: bucket.body_weight.to_string(),
                bars: HusbandrySystem::ALL
                    .iter()
                    .map(|system| RowBar {
                        system: *system,
                        value: f64::from(bucket.gain(*system)),
                        color: system_color(*system, palette),
                    })
                    .collect(),
            })
            .collect();
        Self::new(groups)
    }

    pub fn with_display(mut self, display: BarDisplay) -> Self {
        self.display = display;
        self
    }

    pub fn with_style(mut self, style: RowStyle) -> Self {
        self.style = style;
        self
    }

    pub fn groups(&self) -> &[RowGroup] {
        &self.groups
    }

    pub fn display(&self) -> BarDisplay {
        self.display
    }

    pub fn height(&self) -> f64 {
        self.groups.len() as f64 * self.style.group_height + self.style.extra_height
    }

    fn visible_bars<'g>(&self, group: &'g RowGroup) -> Vec<&'g RowBar> {
        group
            .bars
            .iter()
            .filter(|bar| self.display.shows(bar.system))
            .collect()
    }

    /// Largest visible value; bar lengths are relative to it.
    pub fn max_value(&self) -> f64 {
        self.groups
            .iter()
            .flat_map(|g| self.visible_bars(g))
            .map(|bar| bar.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Settled layout for a chart `width` wide with its top-left corner at `origin`.
    pub fn layout(&self, origin: Point, width: f64) -> Vec<BarLayout> {
        let track = (width - self.style.label_width - self.style.right_padding).max(0.0);
        let max = self.max_value();
        let top = origin.y + self.style.extra_height / 2.0;

        let mut out = Vec::new();
        for (gi, group) in self.groups.iter().enumerate() {
            let bars = self.visible_bars(group);
            let stack = bars.len() as f64 * self.style.thickness
                + bars.len().saturating_sub(1) as f64 * self.style.spacing;
            let group_top =
                top + gi as f64 * self.style.group_height + (self.style.group_height - stack) / 2.0;

            for (bi, bar) in bars.into_iter().enumerate() {
                let length = if max > 0.0 && bar.value.is_finite() {
                    track * bar.value.max(0.0) / max
                } else {
                    0.0
                };
                out.push(BarLayout {
                    group: gi,
                    system: bar.system,
                    value: bar.value,
                    rect: Rect::new(
                        origin.x + self.style.label_width,
                        group_top + bi as f64 * (self.style.thickness + self.style.spacing),
                        length,
                        self.style.thickness,
                    ),
                    color: bar.color,
                });
            }
        }
        out
    }

    fn bar_animation(&self, index: usize, length: f64) -> Animation {
        Animation::new(0.0, length, AnimationSpec::Spring(self.style.spring))
            .delayed(index as u64 * self.style.stagger_ms)
    }

    /// Layout `elapsed_ms` into the entry animation; bars grow with a per-index stagger.
    pub fn layout_at(&self, origin: Point, width: f64, elapsed_ms: u64) -> Vec<BarLayout> {
        self.layout(origin, width)
            .into_iter()
            .enumerate()
            .map(|(i, mut bar)| {
                bar.rect.width = self.bar_animation(i, bar.rect.width).value_at(elapsed_ms).max(0.0);
                bar
            })
            .collect()
    }

    pub fn settle_ms(&self) -> u64 {
        let bars = self.groups.iter().map(|g| self.visible_bars(g).len()).sum::<usize>();
        self.bar_animation(bars.saturating_sub(1), 1.0).end_ms()
    }

    /// `"<system> - 410 gm"` lines per bucket, both systems regardless of display mode.
    pub fn overlay_lines(&self, strings: &Strings) -> Vec<(String, Vec<String>)> {
        self.groups
            .iter()
            .map(|group| {
                let lines = group
                    .bars
                    .iter()
                    .map(|bar| {
                        format!(
                            "{} - {} {}",
                            strings.get(system_short_key(bar.system)),
                            bar.value,
                            strings.get(MessageKey::Grams)
                        )
                    })
                    .collect();
                (group.label.clone(), lines)
            })
            .collect()
    }

    pub fn draw(
        &self,
        canvas: &mut dyn Canvas,
        origin: Point,
        width: f64,
        elapsed_ms: u64,
        palette: &Palette,
        strings: &Strings,
    ) {
        canvas.rounded_rect(
            Rect::new(origin.x, origin.y, width, self.height()),
            24.0,
            palette.primary.with_alpha(0.1),
        );

        let label_style = TextStyle::new(self.style.text_size, palette.on_surface)
            .anchor(TextAnchor::End);
        for (gi, group) in self.groups.iter().enumerate() {
            let y = origin.y
                + self.style.extra_height / 2.0
                + gi as f64 * self.style.group_height
                + self.style.group_height / 2.0
                + self.style.text_size / 3.0;
            canvas.text(
                Point::new(origin.x + self.style.label_width - 8.0, y),
                &group.label,
                &label_style,
            );
        }

        let value_style = TextStyle::new(self.style.text_size, palette.secondary);
        let grams = strings.get(MessageKey::Grams);
        for bar in self.layout_at(origin, width, elapsed_ms) {
            canvas.rounded_rect(bar.rect, self.style.corner_radius, bar.color);
            canvas.text(
                Point::new(
                    bar.rect.x + bar.rect.width + 6.0,
                    bar.rect.y + bar.rect.height / 2.0 + self.style.text_size / 3.0,
                ),
                &format!("{} {grams}", bar.value),
                &value_style,
            );
        }
    }
}

pub fn system_color(system: HusbandrySystem, palette: &Palette) -> Color {
    match system {
        HusbandrySystem::Intensive => palette.primary,
        HusbandrySystem::SemiIntensive => palette.inverse_primary,
    }
}

pub(crate) fn system_short_key(system: HusbandrySystem) -> MessageKey {
    match system {
        HusbandrySystem::Intensive => MessageKey::Intensive,
        HusbandrySystem::SemiIntensive => MessageKey::SemiIntensive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::DisplayList;
    use crate::domain::feed::GainBucket;
    use crate::locale::Language;

    fn gain() -> ExpectedDailyGain {
        ExpectedDailyGain::new(vec![
            GainBucket { body_weight: 75, intensive: 410, semi_intensive: 350 },
            GainBucket { body_weight: 100, intensive: 430, semi_intensive: 370 },
            GainBucket { body_weight: 150, intensive: 490, semi_intensive: 420 },
            GainBucket { body_weight: 200, intensive: 540, semi_intensive: 460 },
        ])
    }

    #[test]
    fn bars_are_proportional_to_the_largest_visible_value() {
        let chart = RowChart::from_gain(&gain(), &Palette::light());
        assert_eq!(chart.max_value(), 540.0);
        assert_eq!(chart.height(), 4.0 * 80.0 + 100.0);

        let width = 64.0 + 72.0 + 540.0;
        let bars = chart.layout(Point::default(), width);
        assert_eq!(bars.len(), 8);
        let longest = bars.iter().map(|b| b.rect.width).fold(0.0, f64::max);
        assert_eq!(longest, 540.0);
        assert_eq!(bars[0].rect.width, 410.0);
        assert_eq!(bars[1].rect.width, 350.0);
    }

    #[test]
    fn bucket_order_follows_the_dataset() {
        let chart = RowChart::from_gain(&gain(), &Palette::light());
        let labels: Vec<_> = chart.groups().iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["75", "100", "150", "200"]);

        let bars = chart.layout(Point::default(), 600.0);
        assert!(bars.windows(2).all(|w| w[0].rect.y < w[1].rect.y));
        assert!(bars.windows(2).all(|w| w[0].group <= w[1].group));
    }

    #[test]
    fn single_display_rescales_to_the_chosen_system() {
        let chart = RowChart::from_gain(&gain(), &Palette::light())
            .with_display(BarDisplay::Single(HusbandrySystem::SemiIntensive));
        assert_eq!(chart.max_value(), 460.0);
        let bars = chart.layout(Point::default(), 64.0 + 72.0 + 460.0);
        assert_eq!(bars.len(), 4);
        assert!(bars.iter().all(|b| b.system == HusbandrySystem::SemiIntensive));
        assert_eq!(bars[3].rect.width, 460.0);
    }

    #[test]
    fn all_zero_values_have_zero_length() {
        let zero = ExpectedDailyGain::new(vec![GainBucket {
            body_weight: 75,
            intensive: 0,
            semi_intensive: 0,
        }]);
        let chart = RowChart::from_gain(&zero, &Palette::light());
        assert_eq!(chart.max_value(), 0.0);
        assert!(chart
            .layout(Point::default(), 300.0)
            .iter()
            .all(|b| b.rect.width == 0.0));
    }

    #[test]
    fn entry_animation_staggers_and_settles_on_the_layout() {
        let chart = RowChart::from_gain(&gain(), &Palette::light());
        let settled = chart.layout(Point::default(), 600.0);

        let start = chart.layout_at(Point::default(), 600.0, 0);
        assert!(start.iter().all(|b| b.rect.width == 0.0));

        // The last bar is still waiting for its delay while the first has started.
        let early = chart.layout_at(Point::default(), 600.0, 40);
        assert!(early[0].rect.width > 0.0);
        assert_eq!(early[7].rect.width, 0.0);

        let done = chart.layout_at(Point::default(), 600.0, chart.settle_ms());
        assert_eq!(done, settled);
    }

    #[test]
    fn overlay_lists_both_systems_per_bucket() {
        let chart = RowChart::from_gain(&gain(), &Palette::light())
            .with_display(BarDisplay::Single(HusbandrySystem::Intensive));
        let lines = chart.overlay_lines(&Strings::new(Language::English));
        assert_eq!(lines[0].0, "75");
        assert_eq!(
            lines[0].1,
            vec!["Intensive - 410 gm".to_string(), "Semi-intensive - 350 gm".to_string()]
        );
    }

    #[test]
    fn draw_emits_background_labels_and_bars() {
        let chart = RowChart::from_gain(&gain(), &Palette::light());
        let mut canvas = DisplayList::new();
        chart.draw(
            &mut canvas,
            Point::default(),
            600.0,
            chart.settle_ms(),
            &Palette::light(),
            &Strings::new(Language::English),
        );
        // background + 8 bars
        assert_eq!(canvas.rects().count(), 9);
        let texts: Vec<_> = canvas.texts().collect();
        assert!(texts.contains(&"150"));
        assert!(texts.contains(&"540 gm"));
    }
}
