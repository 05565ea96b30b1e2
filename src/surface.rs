use crate::heatmap::{DayCell, HeatmapGrid, Week};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayElement {
    pub class: Option<&'static str>,
    pub title: String,
    pub hidden: bool,
}

impl DayElement {
    pub fn class_attr(&self) -> String {
        match self.class {
            Some(class) => format!("day {class}"),
            None => "day".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekColumn {
    pub days: Vec<DayElement>,
}

/// Somewhere a rendered heatmap can be shown.
pub trait DisplaySurface {
    /// Replaces everything currently shown with `columns`.
    fn replace(&mut self, columns: Vec<WeekColumn>);
}

/// In-memory heatmap container. Starts empty and keeps its last contents until the
/// next successful render.
#[derive(Debug, Clone, Default)]
pub struct HeatmapContainer {
    columns: Vec<WeekColumn>,
}

impl HeatmapContainer {
    pub fn columns(&self) -> &[WeekColumn] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl DisplaySurface for HeatmapContainer {
    fn replace(&mut self, columns: Vec<WeekColumn>) {
        self.columns = columns;
    }
}

pub fn render_heatmap<S: DisplaySurface + ?Sized>(grid: &HeatmapGrid, surface: &mut S) {
    surface.replace(grid.weeks.iter().map(week_column).collect());
}

pub fn bucket_class(bucket: u8) -> Option<&'static str> {
    match bucket {
        1 => Some("heat-1"),
        2 => Some("heat-2"),
        3 => Some("heat-3"),
        4 => Some("heat-4"),
        _ => None,
    }
}

fn week_column(week: &Week) -> WeekColumn {
    WeekColumn {
        days: week.days.iter().map(day_element).collect(),
    }
}

fn day_element(cell: &DayCell) -> DayElement {
    DayElement {
        class: bucket_class(cell.bucket),
        title: cell.tooltip(),
        hidden: !cell.visible,
    }
}
