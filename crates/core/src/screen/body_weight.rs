use super::view::{ChartView, RowOverlay, ScreenView, SliderView, SwitchView};
use super::{draw_heading, draw_placeholder, home, ScreenContext, PADDING, SECTION_GAP};
use crate::chart::row::{BarDisplay, RowChart};
use crate::chart::theme::Palette;
use crate::chart::{Canvas, Point, Rect, TextAnchor, TextStyle};
use crate::domain::feed::{AnimalId, DisplayType, FeedRecommendation, HusbandrySystem};
use crate::locale::{MessageKey, Strings};
use crate::lookup::{find_by_body_weight, resolve_gain};
use crate::selection::BodyWeightSelection;
use crate::storage::PreferenceStore;
use crate::widget::step_scale::{position_for_value, value_for_position, StepSlider};
use crate::widget::switch::MultiOptionSwitch;

fn system_key(system: HusbandrySystem) -> MessageKey {
    match system {
        HusbandrySystem::Intensive => MessageKey::IntensiveSystem,
        HusbandrySystem::SemiIntensive => MessageKey::SemiIntensiveSystem,
    }
}

/// Body weight slider, husbandry system switch and the expected daily gain bars.
#[derive(Debug)]
pub struct BodyWeightScreen<'a> {
    animal: AnimalId,
    records: &'a [FeedRecommendation],
    selection: BodyWeightSelection,
    slider: StepSlider,
    switch: MultiOptionSwitch,
}

impl<'a> BodyWeightScreen<'a> {
    pub fn open(
        animal: AnimalId,
        records: &'a [FeedRecommendation],
        store: &dyn PreferenceStore,
        strings: &Strings,
    ) -> anyhow::Result<Self> {
        let selection = BodyWeightSelection::load(store, animal, records)?;
        let labels = records.iter().map(|r| r.key.label()).collect();
        let slider = StepSlider::new(labels, &selection.body_weight.to_string());
        let switch = MultiOptionSwitch::new(
            HusbandrySystem::ALL
                .iter()
                .map(|s| strings.get(system_key(*s)).to_string())
                .collect(),
            selection.system.index(),
        );
        Ok(Self {
            animal,
            records,
            selection,
            slider,
            switch,
        })
    }

    pub fn animal(&self) -> AnimalId {
        self.animal
    }

    pub fn selection(&self) -> BodyWeightSelection {
        self.selection
    }

    fn body_weights(&self) -> Vec<u32> {
        self.records.iter().filter_map(FeedRecommendation::body_weight).collect()
    }

    pub fn slider_moved(&mut self, position: f64, store: &mut dyn PreferenceStore) -> Option<u32> {
        let value = *value_for_position(&self.body_weights(), position)?;
        self.slider.drag_to(position);
        self.selection.body_weight = value;
        self.selection.save_body_weight(store, self.animal);
        Some(value)
    }

    pub fn set_body_weight(&mut self, value: u32, store: &mut dyn PreferenceStore) {
        let position = position_for_value(&self.body_weights(), &value);
        self.slider.drag_to(position as f64);
        self.selection.body_weight = value;
        self.selection.save_body_weight(store, self.animal);
    }

    pub fn select_system(
        &mut self,
        index: usize,
        store: &mut dyn PreferenceStore,
    ) -> Option<HusbandrySystem> {
        let system = HusbandrySystem::from_index(self.switch.select(index)?)?;
        self.selection.system = system;
        self.selection.save_system(store, self.animal);
        Some(system)
    }

    pub fn recommendation(&self) -> Option<&'a FeedRecommendation> {
        find_by_body_weight(self.records, self.selection.body_weight)
    }

    /// Gain for the selected weight and system, when the record's table has that bucket.
    pub fn selected_gain(&self) -> Option<u32> {
        self.recommendation().and_then(|r| {
            resolve_gain(r, self.selection.body_weight, self.selection.system)
        })
    }

    pub fn row_chart(&self, palette: &Palette, compact: bool) -> Option<RowChart> {
        let gain = self.recommendation()?.expected_daily_gain.as_ref()?;
        if gain.is_empty() {
            return None;
        }
        let display = if compact {
            BarDisplay::Single(self.selection.system)
        } else {
            BarDisplay::Both
        };
        Some(RowChart::from_gain(gain, palette).with_display(display))
    }

    pub fn view(&self, ctx: &ScreenContext) -> ScreenView {
        let strings = &ctx.strings;
        let heading = strings.get(MessageKey::ExpectedDailyGainGmDay).to_string();
        let compact = ctx.layout.is_compact();
        let chart = match self.row_chart(&ctx.palette, compact) {
            Some(rows) => ChartView::Rows {
                heading,
                compact,
                selected_gain: self
                    .selected_gain()
                    .map(|g| format!("{g} {}", strings.get(MessageKey::Grams))),
                overlay: rows
                    .overlay_lines(strings)
                    .into_iter()
                    .map(|(bucket, lines)| RowOverlay { bucket, lines })
                    .collect(),
            },
            None => ChartView::Placeholder {
                heading,
                message: strings.get(MessageKey::NoData).to_string(),
            },
        };

        ScreenView {
            animal: self.animal,
            title: home::animal_name(self.animal, strings),
            display_type: DisplayType::BodyWeight,
            slider: SliderView {
                heading: strings.get(MessageKey::BodyWeightKg).to_string(),
                labels: self.slider.labels().to_vec(),
                selected_index: self.slider.selected_index(),
                selected_value: self.selection.body_weight.to_string(),
            },
            switch: SwitchView {
                heading: strings.get(MessageKey::HusbandrySystem).to_string(),
                options: self.switch.options().to_vec(),
                selected: self.switch.selected(),
            },
            chart,
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &ScreenContext, elapsed_ms: u64) -> f64 {
        let strings = &ctx.strings;
        let palette = &ctx.palette;
        let width = ctx.layout.content_width();

        let mut y = draw_heading(canvas, ctx, PADDING, &home::animal_name(self.animal, strings), 26.0);

        y = draw_heading(canvas, ctx, y + 8.0, strings.get(MessageKey::BodyWeightKg), 20.0);
        self.slider.draw(canvas, Point::new(PADDING, y), width, elapsed_ms, palette);
        y += self.slider.height() + SECTION_GAP;

        y = draw_heading(canvas, ctx, y, strings.get(MessageKey::HusbandrySystem), 20.0);
        self.switch.draw(canvas, Point::new(PADDING, y), width, elapsed_ms, palette);
        y += self.switch.height() + SECTION_GAP;

        y = draw_heading(canvas, ctx, y, strings.get(MessageKey::ExpectedDailyGainGmDay), 20.0);
        if let Some(gain) = self.selected_gain() {
            let text = format!("{gain} {}", strings.get(MessageKey::Grams));
            y = draw_gain_badge(canvas, ctx, y, &text);
        }
        match self.row_chart(palette, ctx.layout.is_compact()) {
            Some(rows) => {
                rows.draw(canvas, Point::new(PADDING, y), width, elapsed_ms, palette, strings);
                y + rows.height() + PADDING
            }
            None => draw_placeholder(canvas, ctx, y, strings.get(MessageKey::NoData)) + PADDING,
        }
    }
}

/// Pill with the gain of the selected weight and system, centred on the screen.
fn draw_gain_badge(canvas: &mut dyn Canvas, ctx: &ScreenContext, y: f64, text: &str) -> f64 {
    const HEIGHT: f64 = 32.0;
    let width = 24.0 + text.chars().count() as f64 * 9.0;
    canvas.rounded_rect(
        Rect::new((ctx.layout.width - width) / 2.0, y, width, HEIGHT),
        HEIGHT / 2.0,
        ctx.palette.primary,
    );
    canvas.text(
        Point::new(ctx.layout.width / 2.0, y + HEIGHT / 2.0 + 5.0),
        text,
        &TextStyle::new(15.0, ctx.palette.on_primary)
            .anchor(TextAnchor::Middle)
            .bold(),
    );
    y + HEIGHT + 12.0
}
