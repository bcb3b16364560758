use std::path::PathBuf;

use gradepoint_analysis::table::Column;
use gradepoint_stats::sample::SampleFilter;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ColumnsArg {
    /// Path to the CSV file holding the grades
    path: PathBuf,
}

pub(crate) fn run(arg: &ColumnsArg) -> anyhow::Result<()> {
    let table = util::read_csv_table(&arg.path)?;
    let mut found = false;
    for column in table.numeric_columns() {
        found = true;
        println!("{}", describe(column));
    }
    if !found {
        eprintln!("No numeric columns found!");
    }
    Ok(())
}

fn describe(column: &Column) -> String {
    let cells = column.values.len();
    let blank = column.values.iter().filter(|v| v.is_missing()).count();
    let (_, report) = SampleFilter::GRADE_POINTS.apply(&column.values);
    format!(
        "{}\t{cells} cells, {blank} blank, {} grade points in [0, 4]",
        column.name, report.kept
    )
}
