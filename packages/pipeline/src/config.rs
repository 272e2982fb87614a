//! Pipeline configuration loaded from environment variables.

use anyhow::{ensure, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use uuid::Uuid;

/// Category columns of the production keyword sheet, in column order.
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "Business",
    "Finance",
    "Education & Learning",
    "Technology",
    "Festivals & occasions",
    "Fashion & beauty",
    "Travel, Lifestyle & Nature",
    "Home Design & Real Estate",
    "Food & Drink",
];

/// Layout of the keyword sheet backing the work queue.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    /// Ordered category list; data column `i` belongs to `categories[i]`.
    pub categories: Vec<String>,
    /// Row holding the category headers.
    pub category_row: u32,
    /// First data row.
    pub start_row: u32,
    /// Rows fetched per probe when scanning for the next non-empty row.
    pub scan_window: u32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            category_row: 3,
            start_row: 5,
            scan_window: 50,
        }
    }
}

/// Knobs for the run controller and the per-step retry substrate.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Transient retries per pipeline step, beyond the first attempt.
    pub step_retries: u32,
    /// Base delay between step retries, doubled per attempt.
    pub retry_base_delay: Duration,
    /// Worker ID for this instance, used in logs.
    pub worker_id: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            step_retries: 2,
            retry_base_delay: Duration::from_millis(500),
            worker_id: format!("drain-{}", Uuid::new_v4()),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: SheetLayout,
    pub runner: RunnerConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to the
    /// production sheet defaults.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let mut layout = SheetLayout::default();
        if let Ok(raw) = env::var("SHEET_CATEGORIES") {
            layout.categories = raw
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
        }
        if let Ok(raw) = env::var("SHEET_CATEGORY_ROW") {
            layout.category_row = raw.parse().context("SHEET_CATEGORY_ROW must be a row number")?;
        }
        if let Ok(raw) = env::var("SHEET_START_ROW") {
            layout.start_row = raw.parse().context("SHEET_START_ROW must be a row number")?;
        }
        if let Ok(raw) = env::var("SHEET_SCAN_WINDOW") {
            layout.scan_window = raw.parse().context("SHEET_SCAN_WINDOW must be a number")?;
        }
        ensure!(!layout.categories.is_empty(), "SHEET_CATEGORIES must not be empty");
        ensure!(
            layout.start_row > layout.category_row,
            "SHEET_START_ROW must come after SHEET_CATEGORY_ROW"
        );
        ensure!(layout.scan_window > 0, "SHEET_SCAN_WINDOW must be at least 1");

        let mut runner = RunnerConfig::default();
        if let Ok(raw) = env::var("STEP_RETRIES") {
            runner.step_retries = raw.parse().context("STEP_RETRIES must be a number")?;
        }

        Ok(Self { layout, runner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_production_sheet() {
        let layout = SheetLayout::default();
        assert_eq!(layout.categories.len(), 9);
        assert_eq!(layout.category_row, 3);
        assert_eq!(layout.start_row, 5);
        assert_eq!(layout.scan_window, 50);
    }

    #[test]
    fn default_runner_has_bounded_retries() {
        let runner = RunnerConfig::default();
        assert_eq!(runner.step_retries, 2);
        assert!(runner.worker_id.starts_with("drain-"));
    }
}
