use std::path::PathBuf;

use gradepoint_analysis::{Marker, query::Clamped};
use gradepoint_stats::{
    density::DensityPoint, descriptive::DescriptiveStats, histogram::HistogramBin,
    sample::FilterReport,
};
use serde::Serialize;

use crate::util::{Dataset, DatasetArg, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// GPA to place on the density curve
    #[arg(long, default_value_t = 3.0)]
    value: f64,
    /// Percentile to find the required GPA for
    #[arg(long, default_value_t = 90.0)]
    target_percentile: f64,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct Report<'a> {
    column: &'a str,
    filter: FilterReport,
    summary: &'a DescriptiveStats,
    bandwidth: f64,
    histogram: &'a [HistogramBin],
    curve: &'a [DensityPoint],
    reference_markers: &'a [Marker],
    user_marker: Clamped<Marker>,
    target: Clamped<f64>,
}

impl<'a> Report<'a> {
    fn new(
        dataset: &'a Dataset,
        value: f64,
        target_percentile: f64,
    ) -> anyhow::Result<Self> {
        let analysis = &dataset.analysis;
        Ok(Self {
            column: &dataset.column,
            filter: dataset.filter,
            summary: analysis.summary(),
            bandwidth: analysis.density().bandwidth(),
            histogram: &analysis.histogram().bins,
            curve: analysis.curve(),
            reference_markers: analysis.reference_markers(),
            user_marker: analysis.marker_at(value)?,
            target: analysis.value_at(target_percentile)?,
        })
    }
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        dataset,
        value,
        target_percentile,
        output,
    } = arg;

    let dataset = dataset.load()?;
    let report = Report::new(&dataset, *value, *target_percentile)?;
    eprintln!(
        "Analysed {} grade points from column '{}'",
        report.summary.count, report.column
    );
    Output::save_json(&report, output.clone())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use gradepoint_analysis::{GpaAnalysis, config::AnalysisConfig};
    use gradepoint_stats::sample::Sample;

    use super::*;

    fn dataset(values: Vec<f64>) -> Dataset {
        let sample = Sample::new(values).unwrap();
        let len = sample.len();
        Dataset {
            column: "gpa".to_owned(),
            filter: FilterReport {
                kept: len,
                non_numeric: 1,
                out_of_range: 0,
            },
            analysis: GpaAnalysis::new(sample, &AnalysisConfig::default()).unwrap(),
        }
    }

    #[test]
    fn test_report_json_shape() {
        let dataset = dataset(vec![2.5, 2.9, 3.1, 3.1, 3.4, 3.8]);
        let report = Report::new(&dataset, 5.0, 50.0).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["column"], "gpa");
        assert_eq!(json["filter"]["non_numeric"], 1);
        assert_eq!(json["summary"]["count"], 6);
        assert_eq!(json["histogram"].as_array().unwrap().len(), 40);
        assert_eq!(json["curve"].as_array().unwrap().len(), 500);
        assert_eq!(json["reference_markers"].as_array().unwrap().len(), 3);
        assert_eq!(json["user_marker"]["clamped"], true);
        assert_eq!(json["user_marker"]["effective"], 4.0);
        assert_eq!(json["user_marker"]["result"]["percentile"], 100.0);
        assert_eq!(json["target"]["result"], 3.1);
    }

    #[test]
    fn test_nan_query_is_rejected() {
        let dataset = dataset(vec![1.0, 2.0]);
        assert!(Report::new(&dataset, f64::NAN, 50.0).is_err());
    }
}
