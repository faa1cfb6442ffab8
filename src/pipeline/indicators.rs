pub const DEFAULT_BAR_WIDTH: usize = 20;

const FILLED_CELL: &str = "█";
const EMPTY_CELL: &str = "░";

/// Number of filled cells: floor(percentage / 100 * width), never above width.
pub fn filled_cells(percentage: f64, width: usize) -> usize {
    let filled = (percentage.clamp(0.0, 100.0) / 100.0 * width as f64).floor();
    (filled as usize).min(width)
}

pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = filled_cells(percentage, width);
    format!(
        "{}{}",
        FILLED_CELL.repeat(filled),
        EMPTY_CELL.repeat(width - filled)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Complete,
    High,
    Medium,
    Low,
    Critical,
}

impl StatusLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            StatusLevel::Complete
        } else if percentage >= 75.0 {
            StatusLevel::High
        } else if percentage >= 50.0 {
            StatusLevel::Medium
        } else if percentage >= 25.0 {
            StatusLevel::Low
        } else {
            StatusLevel::Critical
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            StatusLevel::Complete => "✅",
            StatusLevel::High => "🟢",
            StatusLevel::Medium => "🟡",
            StatusLevel::Low => "🟠",
            StatusLevel::Critical => "🔴",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
    NoHistory,
}

impl Trend {
    pub fn between(current: f64, previous: Option<f64>) -> Self {
        match previous {
            None => Trend::NoHistory,
            Some(prev) if current > prev => Trend::Up,
            Some(prev) if current < prev => Trend::Down,
            Some(_) => Trend::Flat,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Trend::Up => "📈",
            Trend::Down => "📉",
            Trend::Flat => "➡️",
            Trend::NoHistory => "📊",
        }
    }
}
