use std::{io, path::PathBuf};

use anyhow::Context;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of students to generate
    #[arg(long, default_value_t = 500)]
    count: usize,
    /// Mean of the GPA distribution
    #[arg(long, default_value_t = 3.0)]
    mean: f64,
    /// Standard deviation of the GPA distribution
    #[arg(long, default_value_t = 0.5)]
    std_dev: f64,
    /// Fraction of cells written as blank or out-of-range grades
    #[arg(long, default_value_t = 0.02)]
    invalid_ratio: f64,
    /// Seed for a reproducible file
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct GradeModel {
    normal: Normal<f64>,
    invalid_ratio: f64,
}

impl GradeModel {
    fn new(mean: f64, std_dev: f64, invalid_ratio: f64) -> anyhow::Result<Self> {
        anyhow::ensure!(
            (0.0..=1.0).contains(&invalid_ratio),
            "invalid ratio must be in [0, 1], got {invalid_ratio}"
        );
        let normal = Normal::new(mean, std_dev)
            .with_context(|| format!("Invalid GPA distribution: mean {mean}, std dev {std_dev}"))?;
        Ok(Self {
            normal,
            invalid_ratio,
        })
    }

    /// One `gpa` cell: a grade point rounded to hundredths, or an invalid
    /// cell that the analysis will filter out.
    ///
    /// Invalid cells are blank or out of range, never text, so the column
    /// stays numeric.
    fn cell<R>(&self, rng: &mut R) -> String
    where
        R: Rng + ?Sized,
    {
        if rng.random_bool(self.invalid_ratio) {
            if rng.random_bool(0.5) {
                String::new()
            } else {
                format!("{:.2}", rng.random_range(4.01..10.0))
            }
        } else {
            let gpa = self.normal.sample(rng).clamp(0.0, 4.0);
            format!("{:.2}", (gpa * 100.0).round() / 100.0)
        }
    }
}

fn write_grades<W, R>(writer: W, model: &GradeModel, count: usize, rng: &mut R) -> csv::Result<()>
where
    W: io::Write,
    R: Rng + ?Sized,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["student_id", "gpa"])?;
    for id in 1..=count {
        let cell = model.cell(rng);
        writer.write_record([format!("S{id:05}"), cell])?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        count,
        mean,
        std_dev,
        invalid_ratio,
        seed,
        output,
    } = arg;

    let model = GradeModel::new(*mean, *std_dev, *invalid_ratio)?;
    let mut rng = match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(*seed),
        None => Pcg64Mcg::from_rng(&mut rand::rng()),
    };

    let output = Output::from_output_path(output.clone())?;
    let display_path = output.display_path();
    write_grades(output, &model, *count, &mut rng)
        .with_context(|| format!("Failed to write grades to {display_path}"))?;
    eprintln!("Generated {count} students to {display_path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use gradepoint_stats::sample::SampleFilter;

    use super::*;
    use crate::util::parse_csv_table;

    fn generate(model: &GradeModel, count: usize, seed: u64) -> Vec<u8> {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let mut buf = Vec::new();
        write_grades(&mut buf, model, count, &mut rng).unwrap();
        buf
    }

    #[test]
    fn test_generated_file_is_analysable() {
        let model = GradeModel::new(3.0, 0.5, 0.1).unwrap();
        let buf = generate(&model, 300, 42);
        let table = parse_csv_table(buf.as_slice()).unwrap();

        let column = table.numeric_column(None).unwrap();
        assert_eq!(column.name, "gpa");
        assert_eq!(column.values.len(), 300);

        let (sample, report) = column.sample(&SampleFilter::GRADE_POINTS).unwrap();
        assert_eq!(report.total(), 300);
        assert!(report.kept > 200);
        assert!(report.non_numeric + report.out_of_range > 0);
        assert!(sample.min() >= 0.0 && sample.max() <= 4.0);
    }

    #[test]
    fn test_same_seed_same_file() {
        let model = GradeModel::new(2.8, 0.6, 0.05).unwrap();
        assert_eq!(generate(&model, 50, 7), generate(&model, 50, 7));
        assert_ne!(generate(&model, 50, 7), generate(&model, 50, 8));
    }

    #[test]
    fn test_no_invalid_cells_when_ratio_is_zero() {
        let model = GradeModel::new(3.0, 0.5, 0.0).unwrap();
        let buf = generate(&model, 100, 1);
        let table = parse_csv_table(buf.as_slice()).unwrap();
        let (_, report) = table
            .numeric_column(Some("gpa"))
            .unwrap()
            .sample(&SampleFilter::GRADE_POINTS)
            .unwrap();
        assert_eq!(report.kept, 100);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(GradeModel::new(3.0, 0.5, 1.5).is_err());
        assert!(GradeModel::new(3.0, -0.5, 0.0).is_err());
    }
}
