//! Chart trace construction for the rendering collaborator
//!
//! The benchmark never renders anything itself; it hands the plotting
//! library plain trace objects (ordered keys, ordered values, display
//! metadata). These structs serialize to the JSON shape such libraries
//! consume directly.

use crate::models::RunRecord;
use serde::Serialize;

/// Marker styling for scatter traces
#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: u32,
}

/// Per-measurement scatter trace: one marker per operation key.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    /// Operation keys in confirmation order
    pub x: Vec<String>,
    /// Round-trip durations in milliseconds
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    /// Hover labels, one per point
    pub text: Vec<String>,
    pub mode: &'static str,
    pub name: String,
    pub marker: Marker,
}

/// Box-plot trace over the duration distribution.
#[derive(Debug, Clone, Serialize)]
pub struct BoxTrace {
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub name: String,
    pub boxpoints: &'static str,
}

/// Histogram trace over the duration distribution.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramTrace {
    pub x: Vec<f64>,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub name: String,
}

/// Violin trace over the duration distribution.
#[derive(Debug, Clone, Serialize)]
pub struct ViolinTrace {
    pub y: Vec<f64>,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub name: String,
}

/// Axis title wrapper matching the plotting library's nesting
#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
}

/// Layout metadata for the measurement chart.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: String,
    pub xaxis: Axis,
    pub yaxis: Axis,
}

/// Build the scatter trace from ordered keys and durations.
pub fn scatter_trace(keys: Vec<String>, values: Vec<f64>) -> ScatterTrace {
    let text = values.iter().map(|v| format!("{}", v)).collect();
    ScatterTrace {
        x: keys,
        y: values,
        trace_type: "scatter",
        text,
        mode: "markers",
        name: "Latency (ms)".to_string(),
        marker: Marker { size: 12 },
    }
}

/// Build the box-plot trace from durations.
pub fn box_trace(values: Vec<f64>) -> BoxTrace {
    BoxTrace {
        y: values,
        trace_type: "box",
        name: "Latency (ms)".to_string(),
        boxpoints: "outliers",
    }
}

/// Build the histogram trace from durations.
pub fn histogram_trace(values: Vec<f64>) -> HistogramTrace {
    HistogramTrace {
        x: values,
        trace_type: "histogram",
        name: "Latency (ms)".to_string(),
    }
}

/// Build the violin trace from durations.
pub fn violin_trace(values: Vec<f64>) -> ViolinTrace {
    ViolinTrace {
        y: values,
        trace_type: "violin",
        name: "Latency (ms)".to_string(),
    }
}

/// Standard layout for the measurement chart.
pub fn layout(title: &str) -> Layout {
    Layout {
        title: title.to_string(),
        xaxis: Axis {
            title: AxisTitle {
                text: "Runs".to_string(),
            },
        },
        yaxis: Axis {
            title: AxisTitle {
                text: "Latency (ms)".to_string(),
            },
        },
    }
}

/// Everything the rendering collaborator needs for one run.
#[derive(Debug, Clone, Serialize)]
pub struct ChartBundle {
    pub scatter: ScatterTrace,
    pub box_plot: BoxTrace,
    pub histogram: HistogramTrace,
    pub violin: ViolinTrace,
    pub layout: Layout,
}

impl ChartBundle {
    /// Assemble all traces from a finished run record.
    pub fn from_record(record: &RunRecord) -> Self {
        let keys = record.duration_keys();
        let values = record.duration_values();
        Self {
            scatter: scatter_trace(keys, values.clone()),
            box_plot: box_trace(values.clone()),
            histogram: histogram_trace(values.clone()),
            violin: violin_trace(values),
            layout: layout("Measurements"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SizeClass;

    fn sample_record() -> RunRecord {
        let mut record = RunRecord::new("room".to_string(), SizeClass::Zero);
        record.finalize(
            vec![("0".to_string(), 12), ("1".to_string(), 18)],
            vec![],
            vec![2, 3],
        );
        record
    }

    #[test]
    fn test_scatter_trace_shape() {
        let trace = scatter_trace(vec!["0".to_string(), "1".to_string()], vec![12.0, 18.0]);
        assert_eq!(trace.x, vec!["0", "1"]);
        assert_eq!(trace.y, vec![12.0, 18.0]);
        assert_eq!(trace.trace_type, "scatter");
        assert_eq!(trace.mode, "markers");
        assert_eq!(trace.text.len(), 2);
    }

    #[test]
    fn test_trace_type_field_renames() {
        let json = serde_json::to_value(box_trace(vec![1.0])).unwrap();
        assert_eq!(json["type"], "box");
        let json = serde_json::to_value(histogram_trace(vec![1.0])).unwrap();
        assert_eq!(json["type"], "histogram");
        let json = serde_json::to_value(violin_trace(vec![1.0])).unwrap();
        assert_eq!(json["type"], "violin");
    }

    #[test]
    fn test_layout_axis_titles() {
        let layout = layout("Measurements");
        assert_eq!(layout.xaxis.title.text, "Runs");
        assert_eq!(layout.yaxis.title.text, "Latency (ms)");
    }

    #[test]
    fn test_bundle_from_record() {
        let bundle = ChartBundle::from_record(&sample_record());
        assert_eq!(bundle.scatter.x, vec!["0", "1"]);
        assert_eq!(bundle.box_plot.y, vec![12.0, 18.0]);
        assert_eq!(bundle.histogram.x, vec![12.0, 18.0]);
        assert_eq!(bundle.violin.y, vec![12.0, 18.0]);
    }
}
