//! Terminal chart of recent sessions.
//!
//! Each metric is min-max normalized across the selected sessions so the bars
//! show relative movement, not absolute values. Caffeine is left out since
//! minutes-since-intake is not a performance measure.

use serde::{Deserialize, Serialize};

use crate::session::{Metric, SessionRecord};

/// Metrics shown on the chart, in display order.
pub const CHART_METRICS: [Metric; 9] = [
    Metric::ArithmeticDuration,
    Metric::ArithmeticErrors,
    Metric::ReactionTime,
    Metric::Stroop,
    Metric::TwoBack,
    Metric::WordPair,
    Metric::Sleepiness,
    Metric::SleepQuality,
    Metric::Stress,
];

/// Keeps a constant metric from dividing by zero.
const RANGE_EPSILON: f64 = 1e-5;

const BAR_WIDTH: usize = 30;

/// Normalized values of one metric across the charted sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: Metric,
    /// One value per session, oldest first, each in [0, 1)
    pub values: Vec<f64>,
}

/// Min-max normalized view of the last N sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionChart {
    /// Session labels, oldest first
    pub labels: Vec<String>,
    pub series: Vec<MetricSeries>,
}

impl SessionChart {
    /// Chart the last `sessions` records.
    pub fn from_records(records: &[SessionRecord], sessions: usize) -> Self {
        let start = records.len().saturating_sub(sessions);
        let selected = &records[start..];

        let labels = selected
            .iter()
            .map(|r| r.timestamp.format("%Y-%m-%d %H:%M").to_string())
            .collect();

        let series = CHART_METRICS
            .iter()
            .map(|&metric| {
                let raw: Vec<f64> = selected.iter().map(|r| r.value(metric)).collect();
                MetricSeries {
                    metric,
                    values: min_max_normalize(&raw),
                }
            })
            .collect();

        Self { labels, series }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Render as an ASCII bar chart, one block per metric.
    pub fn render_ascii(&self) -> String {
        if self.is_empty() {
            return "No sessions to chart.\n".to_string();
        }

        let mut output = format!("\nLast {} Session(s):\n", self.labels.len());
        output.push_str(&"─".repeat(50));
        output.push('\n');

        for series in &self.series {
            output.push_str(&format!("{}\n", series.metric.column()));
            for (label, value) in self.labels.iter().zip(&series.values) {
                let bar_length = ((value * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);
                output.push_str(&format!(
                    "  {} {}{} {:.0}%\n",
                    label,
                    "█".repeat(bar_length),
                    " ".repeat(BAR_WIDTH - bar_length),
                    value * 100.0
                ));
            }
        }

        output.push_str(&"─".repeat(50));
        output.push_str("\nBars are relative to the charted sessions (min = 0%).\n");
        output
    }
}

fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min + RANGE_EPSILON;
    values.iter().map(|v| (v - min) / range).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::record_at;

    #[test]
    fn keeps_only_the_last_sessions() {
        let records: Vec<_> = (1..=7).map(|day| record_at(day, 9)).collect();
        let chart = SessionChart::from_records(&records, 5);
        assert_eq!(chart.labels.len(), 5);
        assert_eq!(chart.labels[0], "2024-05-03 09:00");
        assert_eq!(chart.series.len(), CHART_METRICS.len());
    }

    #[test]
    fn metrics_are_min_max_normalized() {
        let mut records: Vec<_> = (1..=3).map(|day| record_at(day, 9)).collect();
        records[0].arithmetic_duration_seconds = 10.0;
        records[1].arithmetic_duration_seconds = 15.0;
        records[2].arithmetic_duration_seconds = 20.0;

        let chart = SessionChart::from_records(&records, 5);
        let arith = &chart.series[0];
        assert_eq!(arith.metric, Metric::ArithmeticDuration);
        assert_eq!(arith.values[0], 0.0);
        assert!((arith.values[1] - 0.5).abs() < 1e-5);
        assert!(arith.values[2] < 1.0 && arith.values[2] > 0.99);
    }

    #[test]
    fn constant_metric_is_all_zero() {
        let records: Vec<_> = (1..=3).map(|day| record_at(day, 9)).collect();
        let chart = SessionChart::from_records(&records, 3);
        for series in &chart.series {
            assert!(series.values.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn render_has_a_block_per_metric() {
        let records: Vec<_> = (1..=2).map(|day| record_at(day, 9)).collect();
        let text = SessionChart::from_records(&records, 5).render_ascii();
        for metric in CHART_METRICS {
            assert!(text.contains(&format!("{}\n", metric.column())));
        }
        assert!(!text.contains("caffeine_min"));
    }

    #[test]
    fn empty_chart_renders_notice() {
        let chart = SessionChart::from_records(&[], 5);
        assert!(chart.is_empty());
        assert_eq!(chart.render_ascii(), "No sessions to chart.\n");
    }
}
