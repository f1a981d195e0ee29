//! Bar chart of produced quantity and yield per person.
//!
//! The chart is handed to the page as a Chart.js configuration object; the
//! page only embeds it.

use serde::Serialize;
use serde_json::{Value, json};

use crate::sheets::Dataset;

pub const PRODUCED_SERIES: &str = "Produced quantity";
pub const YIELD_SERIES: &str = "Yield";

/// One bar series. Field names follow Chart.js.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: &'static str,
    pub border_color: &'static str,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub datasets: Vec<Series>,
}

impl ChartSpec {
    /// `None` when there is nothing to plot (header-only sheet).
    pub fn from_dataset(dataset: &Dataset) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }
        let labels = dataset.rows.iter().map(|row| row.person.to_string()).collect();
        let produced = dataset.rows.iter().map(|row| row.produced.number()).collect();
        let yield_ratio = dataset.rows.iter().map(|row| row.yield_ratio.number()).collect();

        Some(Self {
            labels,
            datasets: vec![
                Series {
                    label: PRODUCED_SERIES.to_string(),
                    data: produced,
                    background_color: "rgba(75, 192, 192, 0.2)",
                    border_color: "rgba(75, 192, 192, 1)",
                    border_width: 1,
                },
                Series {
                    label: YIELD_SERIES.to_string(),
                    data: yield_ratio,
                    background_color: "rgba(255, 99, 132, 0.2)",
                    border_color: "rgba(255, 99, 132, 1)",
                    border_width: 1,
                },
            ],
        })
    }

    pub fn series(&self, label: &str) -> Option<&Series> {
        self.datasets.iter().find(|series| series.label == label)
    }

    /// Full Chart.js config. NaN values serialize as `null` (a gap in the bar).
    pub fn to_config(&self) -> Value {
        json!({
            "type": "bar",
            "data": self,
            "options": {
                "scales": { "y": { "beginAtZero": true } }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dataset() -> Dataset {
        Dataset::from_values(&[
            vec![json!("Mes"), json!("Nombre")],
            vec![
                json!("Enero"),
                json!("Ana"),
                json!("P1"),
                json!("100"),
                json!("120"),
                json!("0.83"),
                json!("0.02"),
            ],
        ])
    }

    #[test]
    fn two_named_series_over_person_labels() {
        let chart = ChartSpec::from_dataset(&dataset()).unwrap();
        assert_eq!(chart.labels, vec!["Ana".to_string()]);
        assert_eq!(chart.series(PRODUCED_SERIES).unwrap().data, vec![100.0]);
        assert_eq!(chart.series(YIELD_SERIES).unwrap().data, vec![0.83]);
    }

    #[test]
    fn header_only_has_no_chart() {
        let header_only = Dataset::from_values(&[vec![json!("Mes")]]);
        assert!(ChartSpec::from_dataset(&header_only).is_none());
    }

    #[test]
    fn config_uses_chartjs_field_names() {
        let config = ChartSpec::from_dataset(&dataset()).unwrap().to_config();
        assert_eq!(config["type"], "bar");
        assert_eq!(config["data"]["labels"][0], "Ana");
        assert_eq!(
            config["data"]["datasets"][0]["backgroundColor"],
            "rgba(75, 192, 192, 0.2)"
        );
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
    }

    #[test]
    fn unparseable_numbers_become_null() {
        let short = Dataset::from_values(&[vec![], vec![json!("Enero"), json!("Ana")]]);
        let config = ChartSpec::from_dataset(&short).unwrap().to_config();
        assert!(config["data"]["datasets"][0]["data"][0].is_null());
    }
}
