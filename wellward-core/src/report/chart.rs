//! Projection of aggregates into chart-ready series.
//!
//! Two shapes cover every chart: a percentage breakdown (pie) and a
//! seven-point Monday-to-Sunday line. Both are plain data the front end
//! renders verbatim; colors come from a static table keyed by category
//! name, never computed.

use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Weekday axis labels, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Fallback color for categories missing from the table.
const DEFAULT_COLOR: &str = "#90a4ae";

/// Display color for a breakdown category.
pub fn category_color(label: &str) -> &'static str {
    match label {
        // Mood scale
        "Very Happy" => "#4caf50",
        "Happy" => "#8bc34a",
        "Neutral" => "#ffc107",
        "Sad" => "#ff9800",
        "Very Sad" => "#f44336",
        // Task statuses
        "Created" => "#9e9e9e",
        "Started" => "#03a9f4",
        "In Progress" => "#3f51b5",
        "Completed" => "#4caf50",
        // Games
        "Secret Word" => "#ab47bc",
        "Reaction Test" => "#26a69a",
        _ => DEFAULT_COLOR,
    }
}

/// One slice of a percentage-breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    /// Share of the total, rounded to one decimal place
    pub percentage: f64,
    /// Display color from the static category table
    pub color: &'static str,
}

/// Percentage of `part` in `total`, rounded to one decimal place.
///
/// Defined as exactly 0 when the total is 0, so an empty breakdown is
/// still well-formed.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Project labeled counts into a breakdown series.
///
/// Every category keeps a slice even at zero count; percentages sum to
/// 100 up to rounding drift, or to exactly 0 for an all-zero input.
pub fn breakdown<L: AsRef<str>>(counts: &[(L, usize)]) -> Vec<PieSlice> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    counts
        .iter()
        .map(|(label, n)| PieSlice {
            label: label.as_ref().to_string(),
            percentage: percentage(*n, total),
            color: category_color(label.as_ref()),
        })
        .collect()
}

/// A seven-point Monday..Sunday line series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSeries {
    /// One value per weekday, Monday first; absent days are 0
    pub points: [f64; 7],
}

impl WeekSeries {
    pub fn labels() -> [&'static str; 7] {
        WEEKDAY_LABELS
    }

    /// Value for one weekday.
    pub fn get(&self, weekday: Weekday) -> f64 {
        self.points[weekday.num_days_from_monday() as usize]
    }

    /// Whether every point is zero.
    pub fn is_flat_zero(&self) -> bool {
        self.points.iter().all(|p| *p == 0.0)
    }
}

/// Fill a week series from a per-weekday map, zeroing absent days.
pub fn week_series<V: Into<f64> + Copy>(totals: &HashMap<Weekday, V>) -> WeekSeries {
    let mut points = [0.0; 7];
    for (weekday, value) in totals {
        points[weekday.num_days_from_monday() as usize] = (*value).into();
    }
    WeekSeries { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_to_one_decimal() {
        assert_eq!(percentage(1, 3), 33.3);
        assert_eq!(percentage(2, 3), 66.7);
        assert_eq!(percentage(1, 1), 100.0);
        assert_eq!(percentage(0, 5), 0.0);
    }

    #[test]
    fn zero_total_defines_percentage_as_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        let slices = breakdown(&[("Happy", 0), ("Sad", 0)]);
        assert!(slices.iter().all(|s| s.percentage == 0.0));
        assert_eq!(slices.len(), 2);
    }

    #[test]
    fn breakdown_sums_to_one_hundred_within_drift() {
        let slices = breakdown(&[("Created", 1), ("Started", 1), ("Completed", 1)]);
        let sum: f64 = slices.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.5, "sum was {}", sum);
    }

    #[test]
    fn breakdown_keeps_zero_count_categories() {
        let slices = breakdown(&[("Created", 2), ("Completed", 0)]);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].percentage, 100.0);
        assert_eq!(slices[1].percentage, 0.0);
    }

    #[test]
    fn colors_come_from_the_static_table() {
        let slices = breakdown(&[("Completed", 1), ("Never Heard Of It", 1)]);
        assert_eq!(slices[0].color, "#4caf50");
        assert_eq!(slices[1].color, DEFAULT_COLOR);
    }

    #[test]
    fn week_series_always_has_seven_points() {
        let mut totals: HashMap<Weekday, f64> = HashMap::new();
        totals.insert(Weekday::Mon, 5.5);
        totals.insert(Weekday::Sun, 2.0);

        let series = week_series(&totals);
        assert_eq!(series.points.len(), 7);
        assert_eq!(series.get(Weekday::Mon), 5.5);
        assert_eq!(series.get(Weekday::Sun), 2.0);
        // Absent days are zero, not missing.
        assert_eq!(series.get(Weekday::Tue), 0.0);
        assert_eq!(series.get(Weekday::Sat), 0.0);
    }

    #[test]
    fn empty_map_projects_to_a_flat_zero_series() {
        let totals: HashMap<Weekday, f64> = HashMap::new();
        let series = week_series(&totals);
        assert!(series.is_flat_zero());
        assert_eq!(series.points, [0.0; 7]);
    }

    #[test]
    fn score_maps_project_through_into_f64() {
        let mut totals: HashMap<Weekday, u32> = HashMap::new();
        totals.insert(Weekday::Wed, 55);
        let series = week_series(&totals);
        assert_eq!(series.get(Weekday::Wed), 55.0);
    }
}
