use super::view::{ChartView, ScreenView, SliderView, SwitchView};
use super::{draw_heading, draw_placeholder, home, ScreenContext, PADDING, SECTION_GAP};
use crate::chart::pie::PieChart;
use crate::chart::theme::availability_color;
use crate::chart::{Canvas, Point, TextAnchor, TextStyle};
use crate::domain::feed::{
    format_milk_yield, AnimalId, DisplayType, FeedDetails, FeedRecommendation, FodderAvailability,
};
use crate::locale::{MessageKey, Strings};
use crate::lookup::{find_by_milk_yield, resolve_feed_details};
use crate::selection::MilkYieldSelection;
use crate::storage::{PrefKey, PrefValue, PreferenceStore};
use crate::widget::step_scale::{position_for_value, value_for_position, StepSlider};
use crate::widget::switch::MultiOptionSwitch;

pub fn availability_key(availability: FodderAvailability) -> MessageKey {
    match availability {
        FodderAvailability::High => MessageKey::High,
        FodderAvailability::Moderate => MessageKey::Moderate,
        FodderAvailability::Low => MessageKey::Low,
    }
}

/// Milk yield slider, fodder availability switch and the daily ration pie.
#[derive(Debug)]
pub struct MilkYieldScreen<'a> {
    animal: AnimalId,
    records: &'a [FeedRecommendation],
    selection: MilkYieldSelection,
    slider: StepSlider,
    switch: MultiOptionSwitch,
    values_expanded: bool,
}

impl<'a> MilkYieldScreen<'a> {
    pub fn open(
        animal: AnimalId,
        records: &'a [FeedRecommendation],
        store: &dyn PreferenceStore,
        strings: &Strings,
    ) -> anyhow::Result<Self> {
        let selection = MilkYieldSelection::load(store, animal, records)?;
        let labels = records.iter().map(|r| r.key.label()).collect();
        let slider = StepSlider::new(labels, &format_milk_yield(selection.milk_yield));
        let switch = MultiOptionSwitch::new(
            FodderAvailability::ALL
                .iter()
                .map(|a| strings.get(availability_key(*a)).to_string())
                .collect(),
            selection.availability.index(),
        );
        Ok(Self {
            animal,
            records,
            selection,
            slider,
            switch,
            values_expanded: store.get_bool(&PrefKey::ValuesExpanded, false),
        })
    }

    pub fn animal(&self) -> AnimalId {
        self.animal
    }

    pub fn selection(&self) -> MilkYieldSelection {
        self.selection
    }

    pub fn values_expanded(&self) -> bool {
        self.values_expanded
    }

    fn milk_yields(&self) -> Vec<f64> {
        self.records.iter().filter_map(FeedRecommendation::milk_yield).collect()
    }

    pub fn slider_moved(&mut self, position: f64, store: &mut dyn PreferenceStore) -> Option<f64> {
        let value = *value_for_position(&self.milk_yields(), position)?;
        self.slider.drag_to(position);
        self.selection.milk_yield = value;
        self.selection.save_milk_yield(store, self.animal);
        Some(value)
    }

    /// Selects `value` directly; a value not on the list keeps the slider at step 0.
    pub fn set_milk_yield(&mut self, value: f64, store: &mut dyn PreferenceStore) {
        let position = position_for_value(&self.milk_yields(), &value);
        self.slider.drag_to(position as f64);
        self.selection.milk_yield = value;
        self.selection.save_milk_yield(store, self.animal);
    }

    pub fn select_availability(
        &mut self,
        index: usize,
        store: &mut dyn PreferenceStore,
    ) -> Option<FodderAvailability> {
        let availability = *FodderAvailability::ALL.get(self.switch.select(index)?)?;
        self.selection.availability = availability;
        self.selection.save_availability(store, self.animal);
        Some(availability)
    }

    pub fn toggle_values(&mut self, store: &mut dyn PreferenceStore) -> bool {
        self.values_expanded = !self.values_expanded;
        store.set(PrefKey::ValuesExpanded, PrefValue::Bool(self.values_expanded));
        self.values_expanded
    }

    pub fn recommendation(&self) -> Option<&'a FeedRecommendation> {
        find_by_milk_yield(self.records, self.selection.milk_yield)
    }

    pub fn feed_details(&self) -> Option<FeedDetails> {
        self.recommendation()
            .and_then(|r| resolve_feed_details(r, self.selection.availability))
    }

    pub fn pie(&self, strings: &Strings) -> Option<PieChart> {
        self.feed_details()
            .map(|details| PieChart::from_feed_details(&details, strings))
    }

    pub fn view(&self, ctx: &ScreenContext) -> ScreenView {
        let strings = &ctx.strings;
        let heading = strings.get(MessageKey::FeedRecommendationPerDay).to_string();
        let chart = match self.pie(strings) {
            Some(pie) => ChartView::Pie {
                heading,
                sweep_angles: pie.sweep_angles(),
                values_expanded: self.values_expanded,
                legend: pie.legend(),
            },
            None => ChartView::Placeholder {
                heading,
                message: strings.get(MessageKey::NoData).to_string(),
            },
        };

        ScreenView {
            animal: self.animal,
            title: home::animal_name(self.animal, strings),
            display_type: DisplayType::MilkYield,
            slider: SliderView {
                heading: strings.get(MessageKey::MilkYieldLitDay).to_string(),
                labels: self.slider.labels().to_vec(),
                selected_index: self.slider.selected_index(),
                selected_value: format_milk_yield(self.selection.milk_yield),
            },
            switch: SwitchView {
                heading: strings.get(MessageKey::GreenFodderAvailability).to_string(),
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

        y = draw_heading(canvas, ctx, y + 8.0, strings.get(MessageKey::MilkYieldLitDay), 20.0);
        self.slider.draw(canvas, Point::new(PADDING, y), width, elapsed_ms, palette);
        y += self.slider.height() + SECTION_GAP;

        y = draw_heading(canvas, ctx, y, strings.get(MessageKey::GreenFodderAvailability), 20.0);
        self.switch.draw(canvas, Point::new(PADDING, y), width, elapsed_ms, palette);
        let segment = self.switch.segment_width(width);
        for (i, availability) in FodderAvailability::ALL.iter().enumerate() {
            let alpha = if i == self.switch.selected() { 1.0 } else { 0.6 };
            canvas.circle(
                Point::new(PADDING + segment * (i as f64 + 0.5), y + self.switch.height() + 8.0),
                4.0,
                availability_color(*availability).with_alpha(alpha),
                None,
            );
        }
        y += self.switch.height() + SECTION_GAP;

        y = draw_heading(canvas, ctx, y, strings.get(MessageKey::FeedRecommendationPerDay), 20.0);
        let Some(pie) = self.pie(strings) else {
            return draw_placeholder(canvas, ctx, y, strings.get(MessageKey::NoData)) + PADDING;
        };

        y += pie.draw_labels(canvas, Point::new(PADDING, y), width, palette) + 8.0;

        let size = pie.style().size;
        pie.draw(
            canvas,
            Point::new((ctx.layout.width - size) / 2.0, y),
            elapsed_ms,
            palette,
        );
        y += size + 16.0;

        if self.values_expanded {
            let text_style = TextStyle::new(15.0, palette.on_surface);
            let left = ctx.layout.width / 2.0 - 80.0;
            for entry in pie.legend() {
                canvas.circle(Point::new(left, y + 10.0), 6.0, entry.color, None);
                canvas.text(
                    Point::new(left + 14.0, y + 15.0),
                    &format!("{}: {}", entry.label, entry.value),
                    &text_style,
                );
                y += 26.0;
            }
        }
        let toggle = if self.values_expanded {
            MessageKey::HideValues
        } else {
            MessageKey::ShowValues
        };
        canvas.text(
            Point::new(ctx.layout.width / 2.0, y + 15.0),
            strings.get(toggle),
            &TextStyle::new(14.0, palette.secondary).anchor(TextAnchor::Middle),
        );
        y += 26.0;
        y + PADDING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::theme::Palette;
    use crate::chart::DisplayList;
    use crate::dataset::{load_bundled, load_dataset};
    use crate::locale::Language;
    use crate::screen::Layout;
    use crate::storage::memory::MemoryStore;
    use crate::storage::PrefField;

    fn ctx() -> ScreenContext {
        ScreenContext {
            strings: Strings::new(Language::English),
            palette: Palette::light(),
            layout: Layout::default(),
        }
    }

    #[test]
    fn opens_on_the_highest_yield_with_high_availability() {
        let dataset = load_bundled().unwrap();
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        let store = MemoryStore::new();
        let screen = MilkYieldScreen::open(AnimalId(0), records, &store, &ctx().strings).unwrap();

        let view = screen.view(&ctx());
        assert_eq!(view.slider.selected_value, "20.0");
        assert_eq!(view.slider.selected_index, records.len() - 1);
        assert_eq!(view.switch.options, vec!["High", "Moderate", "Low"]);
        assert!(matches!(view.chart, ChartView::Pie { .. }));
    }

    #[test]
    fn slider_and_switch_drive_the_lookup_and_persist() {
        let dataset = load_bundled().unwrap();
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        let mut store = MemoryStore::new();
        let mut screen = MilkYieldScreen::open(AnimalId(0), records, &store, &ctx().strings).unwrap();

        assert_eq!(screen.slider_moved(0.3, &mut store), Some(5.0));
        assert_eq!(screen.select_availability(2, &mut store), Some(FodderAvailability::Low));
        assert_eq!(
            screen.feed_details(),
            Some(FeedDetails {
                concentrate: 4.0,
                green_fodder: 6.0,
                dry_roughage: 7.0,
            })
        );
        assert_eq!(screen.select_availability(3, &mut store), None);

        let key = PrefKey::selection(AnimalId(0), PrefField::MilkYield);
        assert_eq!(store.get(&key), Some(PrefValue::Float(5.0)));
        let key = PrefKey::selection(AnimalId(0), PrefField::FodderAvailability);
        assert_eq!(store.get(&key), Some(PrefValue::Text("LOW".into())));
    }

    #[test]
    fn missing_availability_renders_a_placeholder() {
        let dataset = load_dataset(
            r#"{"0": [{"milk_yield": 5, "green_fodder_availability": {"high": {"concentrate": 2, "green_fodder": 10, "dry_roughage": 3}}}]}"#,
        )
        .unwrap();
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        let mut store = MemoryStore::new();
        let mut screen = MilkYieldScreen::open(AnimalId(0), records, &store, &ctx().strings).unwrap();

        assert_eq!(
            screen.feed_details(),
            Some(FeedDetails {
                concentrate: 2.0,
                green_fodder: 10.0,
                dry_roughage: 3.0,
            })
        );
        screen.select_availability(2, &mut store);
        assert_eq!(screen.feed_details(), None);
        assert!(screen.view(&ctx()).chart.is_placeholder());

        let mut canvas = DisplayList::new();
        screen.draw(&mut canvas, &ctx(), 0);
        assert!(canvas.texts().any(|t| t == "No recommendation for this selection"));
        assert_eq!(canvas.arcs().count(), 0);
    }

    #[test]
    fn unknown_persisted_yield_is_kept_and_misses() {
        let dataset = load_bundled().unwrap();
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        let mut store = MemoryStore::new();
        store.set(
            PrefKey::selection(AnimalId(0), PrefField::MilkYield),
            PrefValue::Float(6.0),
        );
        let screen = MilkYieldScreen::open(AnimalId(0), records, &store, &ctx().strings).unwrap();
        let view = screen.view(&ctx());
        assert_eq!(view.slider.selected_index, 0);
        assert_eq!(view.slider.selected_value, "6.0");
        assert!(view.chart.is_placeholder());
    }

    #[test]
    fn collapsed_screen_still_names_the_components() {
        let dataset = load_bundled().unwrap();
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        let store = MemoryStore::new();
        let screen = MilkYieldScreen::open(AnimalId(0), records, &store, &ctx().strings).unwrap();
        assert!(!screen.values_expanded());

        let mut canvas = DisplayList::new();
        screen.draw(&mut canvas, &ctx(), 1_000);
        let texts: Vec<_> = canvas.texts().collect();
        for name in ["Concentrate", "Green Fodder", "Dry Roughage", "Show values"] {
            assert!(texts.contains(&name), "{name} missing from {texts:?}");
        }
        assert!(!texts.iter().any(|t| t.starts_with("Concentrate: ")));
    }

    #[test]
    fn values_panel_toggles_and_persists() {
        let dataset = load_bundled().unwrap();
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        let mut store = MemoryStore::new();
        let mut screen = MilkYieldScreen::open(AnimalId(0), records, &store, &ctx().strings).unwrap();
        assert!(!screen.values_expanded());

        assert!(screen.toggle_values(&mut store));
        let mut canvas = DisplayList::new();
        screen.draw(&mut canvas, &ctx(), 1_000);
        assert!(canvas.texts().any(|t| t.starts_with("Concentrate: ")));
        assert!(canvas.texts().any(|t| t == "Hide values"));
        assert!(!canvas.texts().any(|t| t == "Show values"));

        let reopened = MilkYieldScreen::open(AnimalId(0), records, &store, &ctx().strings).unwrap();
        assert!(reopened.values_expanded());
    }
}
