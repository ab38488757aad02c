use anyhow::Context;
use feedchart_core::chart::theme::Palette;
use feedchart_core::dataset::Dataset;
use feedchart_core::domain::feed::{AnimalId, DisplayType, FodderAvailability, HusbandrySystem};
use feedchart_core::locale::{self, Language, MessageKey, Strings};
use feedchart_core::screen::home::animal_entries;
use feedchart_core::screen::{DetailsScreen, Layout, ScreenContext, ScreenEvent};
use feedchart_core::storage::PreferenceStore;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Animal id from `feedchart animals`.
    #[arg(long)]
    pub animal: u32,

    /// Slider position in steps; rounded to the nearest step.
    #[arg(long, conflicts_with_all = ["milk_yield", "body_weight"])]
    pub position: Option<f64>,

    #[arg(long, conflicts_with = "body_weight")]
    pub milk_yield: Option<f64>,

    #[arg(long)]
    pub body_weight: Option<u32>,

    /// high, moderate or low.
    #[arg(long)]
    pub availability: Option<String>,

    /// intensive or semi-intensive.
    #[arg(long)]
    pub system: Option<String>,

    /// One bar per bucket regardless of width.
    #[arg(long)]
    pub compact: bool,

    /// Flip the persisted values panel of the pie chart.
    #[arg(long)]
    pub toggle_values: bool,

    #[arg(long, default_value_t = 720.0)]
    pub width: f64,

    /// Write the rendered screen to this SVG file.
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Animation time of the rendered frame.
    #[arg(long, default_value_t = 5_000)]
    pub elapsed_ms: u64,

    #[arg(long)]
    pub json: bool,
}

pub fn animals(dataset: &Dataset, strings: &Strings, json: bool) -> anyhow::Result<String> {
    let entries = animal_entries(dataset, strings);
    if json {
        return serde_json::to_string_pretty(&entries).context("serialize animals failed");
    }

    let mut out = String::new();
    writeln!(out, "{}", strings.get(MessageKey::AppTitle))?;
    writeln!(out, "{}", strings.get(MessageKey::ChooseAnimal))?;
    for e in &entries {
        writeln!(
            out,
            "  {}  {:<16} {} .. {}  {}",
            e.id, e.name, e.range.0, e.range.1, e.description
        )?;
    }
    Ok(out)
}

pub fn show(
    dataset: &Dataset,
    store: &mut dyn PreferenceStore,
    strings: &Strings,
    palette: Palette,
    args: &ShowArgs,
) -> anyhow::Result<String> {
    let animal = AnimalId(args.animal);
    let mut screen = DetailsScreen::open(dataset, animal, store, strings)?;

    for event in events(args, screen.display_type())? {
        screen.handle(event, store)?;
    }

    let ctx = ScreenContext {
        strings: *strings,
        palette,
        layout: Layout {
            width: args.width,
            force_compact: args.compact,
        },
    };

    if let Some(path) = &args.svg {
        let doc = screen.render_svg(&ctx, args.elapsed_ms);
        std::fs::write(path, doc).with_context(|| format!("write {} failed", path.display()))?;
        tracing::info!(%animal, path = %path.display(), "screen written");
    }

    let view = screen.view(&ctx);
    if args.json {
        serde_json::to_string_pretty(&view).context("serialize screen failed")
    } else {
        Ok(view.to_string())
    }
}

/// Flags as screen events, in the order a user would produce them.
fn events(args: &ShowArgs, display_type: DisplayType) -> anyhow::Result<Vec<ScreenEvent>> {
    anyhow::ensure!(args.width > 0.0, "--width must be positive");
    match display_type {
        DisplayType::MilkYield => anyhow::ensure!(
            args.system.is_none() && args.body_weight.is_none(),
            "--system and --body-weight need a body-weight animal"
        ),
        DisplayType::BodyWeight => anyhow::ensure!(
            args.availability.is_none() && args.milk_yield.is_none() && !args.toggle_values,
            "--availability, --milk-yield and --toggle-values need a milk-yield animal"
        ),
    }

    let mut out = Vec::new();
    if let Some(position) = args.position {
        out.push(ScreenEvent::SliderMoved(position));
    }
    if let Some(value) = args.milk_yield {
        out.push(ScreenEvent::SetMilkYield(value));
    }
    if let Some(value) = args.body_weight {
        out.push(ScreenEvent::SetBodyWeight(value));
    }
    if let Some(raw) = args.availability.as_deref() {
        let availability: FodderAvailability = raw.parse()?;
        out.push(ScreenEvent::OptionSelected(availability.index()));
    }
    if let Some(raw) = args.system.as_deref() {
        let system: HusbandrySystem = raw.parse()?;
        out.push(ScreenEvent::OptionSelected(system.index()));
    }
    if args.toggle_values {
        out.push(ScreenEvent::ToggleValues);
    }
    Ok(out)
}

/// Prints the active language, or persists `code` as the new one.
pub fn language(
    store: &mut dyn PreferenceStore,
    fallback: Language,
    code: Option<&str>,
) -> anyhow::Result<String> {
    let Some(code) = code else {
        let current = locale::load_language(store, fallback);
        let mut out = String::new();
        writeln!(out, "{}:", Strings::new(current).get(MessageKey::LanguageLabel))?;
        for l in Language::ALL {
            let marker = if l == current { "*" } else { " " };
            writeln!(out, "{marker} {}  {}", l.code(), l.display_name())?;
        }
        return Ok(out);
    };

    let language = Language::from_code(code)
        .with_context(|| format!("unsupported language {code:?} (expected en, hi or kn)"))?;
    locale::save_language(store, language);
    Ok(format!("{}\n", language.display_name()))
}
