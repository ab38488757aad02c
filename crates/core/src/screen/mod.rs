//! Details screens: selection state, lookups and charts wired together.
//!
//! A screen is opened for one animal, restores its selection from a [`PreferenceStore`], and
//! reacts to [`ScreenEvent`]s. Every event that changes the selection is persisted immediately.
//! Rendering is pure: [`DetailsScreen::view`] for a data snapshot, [`DetailsScreen::render_svg`]
//! for a picture.

pub mod body_weight;
pub mod home;
pub mod milk_yield;
pub mod view;

use crate::chart::svg::SvgCanvas;
use crate::chart::theme::Palette;
use crate::chart::{Canvas, DisplayList, Point, TextAnchor, TextStyle};
use crate::dataset::Dataset;
use crate::domain::feed::{AnimalId, DisplayType};
use crate::locale::Strings;
use crate::storage::PreferenceStore;
use anyhow::Context;
use body_weight::BodyWeightScreen;
use milk_yield::MilkYieldScreen;
use view::ScreenView;

/// Widths below this show one bar per bucket on the body-weight chart.
pub const COMPACT_WIDTH: f64 = 480.0;

const PADDING: f64 = 16.0;
const SECTION_GAP: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub force_compact: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 720.0,
            force_compact: false,
        }
    }
}

impl Layout {
    pub fn is_compact(&self) -> bool {
        self.force_compact || self.width < COMPACT_WIDTH
    }

    fn content_width(&self) -> f64 {
        (self.width - 2.0 * PADDING).max(0.0)
    }
}

/// Everything a screen needs to present itself.
#[derive(Debug, Clone, Copy)]
pub struct ScreenContext {
    pub strings: Strings,
    pub palette: Palette,
    pub layout: Layout,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenEvent {
    /// Slider released at a continuous position, in steps.
    SliderMoved(f64),
    OptionSelected(usize),
    SetMilkYield(f64),
    SetBodyWeight(u32),
    ToggleValues,
}

#[derive(Debug)]
pub enum DetailsScreen<'a> {
    MilkYield(MilkYieldScreen<'a>),
    BodyWeight(BodyWeightScreen<'a>),
}

impl<'a> DetailsScreen<'a> {
    pub fn open(
        dataset: &'a Dataset,
        animal: AnimalId,
        store: &dyn PreferenceStore,
        strings: &Strings,
    ) -> anyhow::Result<Self> {
        let records = dataset
            .recommendations(animal)
            .with_context(|| format!("animal {animal} is not in the dataset"))?;
        let display_type = dataset
            .display_type(animal)
            .with_context(|| format!("animal {animal} has no recommendations"))?;

        let screen = match display_type {
            DisplayType::MilkYield => {
                DetailsScreen::MilkYield(MilkYieldScreen::open(animal, records, store, strings)?)
            }
            DisplayType::BodyWeight => {
                DetailsScreen::BodyWeight(BodyWeightScreen::open(animal, records, store, strings)?)
            }
        };
        tracing::info!(%animal, ?display_type, records = records.len(), "details screen opened");
        Ok(screen)
    }

    pub fn animal(&self) -> AnimalId {
        match self {
            DetailsScreen::MilkYield(s) => s.animal(),
            DetailsScreen::BodyWeight(s) => s.animal(),
        }
    }

    pub fn display_type(&self) -> DisplayType {
        match self {
            DetailsScreen::MilkYield(_) => DisplayType::MilkYield,
            DetailsScreen::BodyWeight(_) => DisplayType::BodyWeight,
        }
    }

    pub fn handle(
        &mut self,
        event: ScreenEvent,
        store: &mut dyn PreferenceStore,
    ) -> anyhow::Result<()> {
        tracing::debug!(animal = %self.animal(), ?event, "screen event");
        match (self, event) {
            (DetailsScreen::MilkYield(s), ScreenEvent::SliderMoved(position)) => {
                s.slider_moved(position, store);
            }
            (DetailsScreen::BodyWeight(s), ScreenEvent::SliderMoved(position)) => {
                s.slider_moved(position, store);
            }
            (DetailsScreen::MilkYield(s), ScreenEvent::OptionSelected(index)) => {
                s.select_availability(index, store)
                    .with_context(|| format!("no fodder availability option {index}"))?;
            }
            (DetailsScreen::BodyWeight(s), ScreenEvent::OptionSelected(index)) => {
                s.select_system(index, store)
                    .with_context(|| format!("no husbandry system option {index}"))?;
            }
            (DetailsScreen::MilkYield(s), ScreenEvent::SetMilkYield(value)) => {
                anyhow::ensure!(value.is_finite(), "milk yield must be a finite number");
                s.set_milk_yield(value, store);
            }
            (DetailsScreen::BodyWeight(s), ScreenEvent::SetBodyWeight(value)) => {
                s.set_body_weight(value, store);
            }
            (DetailsScreen::MilkYield(s), ScreenEvent::ToggleValues) => {
                s.toggle_values(store);
            }
            (screen, event) => {
                anyhow::bail!(
                    "{event:?} does not apply to a {:?} screen",
                    screen.display_type()
                );
            }
        }
        Ok(())
    }

    pub fn view(&self, ctx: &ScreenContext) -> ScreenView {
        match self {
            DetailsScreen::MilkYield(s) => s.view(ctx),
            DetailsScreen::BodyWeight(s) => s.view(ctx),
        }
    }

    /// Paints the screen and returns the height used.
    pub fn draw(&self, canvas: &mut dyn Canvas, ctx: &ScreenContext, elapsed_ms: u64) -> f64 {
        match self {
            DetailsScreen::MilkYield(s) => s.draw(canvas, ctx, elapsed_ms),
            DetailsScreen::BodyWeight(s) => s.draw(canvas, ctx, elapsed_ms),
        }
    }

    /// Frame `elapsed_ms` after the screen opened, as an SVG document.
    pub fn render_svg(&self, ctx: &ScreenContext, elapsed_ms: u64) -> String {
        let mut list = DisplayList::new();
        let height = self.draw(&mut list, ctx, elapsed_ms);
        let mut svg = SvgCanvas::new(ctx.layout.width, height).with_background(ctx.palette.surface);
        list.replay(&mut svg);
        svg.finish()
    }
}

/// Centred section heading; returns the y below it.
fn draw_heading(canvas: &mut dyn Canvas, ctx: &ScreenContext, y: f64, text: &str, size: f64) -> f64 {
    canvas.text(
        Point::new(ctx.layout.width / 2.0, y + size),
        text,
        &TextStyle::new(size, ctx.palette.primary)
            .anchor(TextAnchor::Middle)
            .bold(),
    );
    y + size + 14.0
}

fn draw_placeholder(canvas: &mut dyn Canvas, ctx: &ScreenContext, y: f64, message: &str) -> f64 {
    canvas.text(
        Point::new(ctx.layout.width / 2.0, y + 24.0),
        message,
        &TextStyle::new(16.0, ctx.palette.outline).anchor(TextAnchor::Middle),
    );
    y + 48.0
}
