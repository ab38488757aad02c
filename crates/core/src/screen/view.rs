use crate::chart::pie::LegendEntry;
use crate::domain::feed::{AnimalId, DisplayType};
use serde::Serialize;
use std::fmt;

/// Plain snapshot of what a details screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    pub animal: AnimalId,
    pub title: String,
    pub display_type: DisplayType,
    pub slider: SliderView,
    pub switch: SwitchView,
    pub chart: ChartView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderView {
    pub heading: String,
    pub labels: Vec<String>,
    pub selected_index: usize,
    /// The selected value itself, which may be missing from `labels`.
    pub selected_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchView {
    pub heading: String,
    pub options: Vec<String>,
    pub selected: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowOverlay {
    pub bucket: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartView {
    Pie {
        heading: String,
        sweep_angles: Vec<f64>,
        values_expanded: bool,
        legend: Vec<LegendEntry>,
    },
    Rows {
        heading: String,
        compact: bool,
        selected_gain: Option<String>,
        overlay: Vec<RowOverlay>,
    },
    Placeholder {
        heading: String,
        message: String,
    },
}

impl ChartView {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ChartView::Placeholder { .. })
    }
}

impl fmt::Display for ScreenView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;

        writeln!(f, "{}", self.slider.heading)?;
        let steps: Vec<String> = self
            .slider
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i == self.slider.selected_index {
                    format!("[{label}]")
                } else {
                    label.clone()
                }
            })
            .collect();
        writeln!(f, "  {}", steps.join("  "))?;
        if !self.slider.labels.contains(&self.slider.selected_value) {
            writeln!(f, "  selected: {}", self.slider.selected_value)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.switch.heading)?;
        let options: Vec<String> = self
            .switch
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| if i == self.switch.selected { format!("(*) {o}") } else { format!("( ) {o}") })
            .collect();
        writeln!(f, "  {}", options.join("  "))?;
        writeln!(f)?;

        match &self.chart {
            ChartView::Pie {
                heading,
                values_expanded,
                legend,
                ..
            } => {
                writeln!(f, "{heading}")?;
                if *values_expanded {
                    for entry in legend {
                        writeln!(f, "  {}: {}", entry.label, entry.value)?;
                    }
                } else {
                    let parts: Vec<&str> = legend.iter().map(|e| e.label.as_str()).collect();
                    writeln!(f, "  {}", parts.join(" / "))?;
                }
            }
            ChartView::Rows {
                heading,
                selected_gain,
                overlay,
                ..
            } => {
                writeln!(f, "{heading}")?;
                if let Some(gain) = selected_gain {
                    writeln!(f, "  => {gain}")?;
                }
                for row in overlay {
                    writeln!(f, "  {:>5}  {}", row.bucket, row.lines.join("  |  "))?;
                }
            }
            ChartView::Placeholder { heading, message } => {
                writeln!(f, "{heading}")?;
                writeln!(f, "  {message}")?;
            }
        }
        Ok(())
    }
}
