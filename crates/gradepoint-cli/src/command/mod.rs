use clap::{Parser, Subcommand};

use self::{
    columns::ColumnsArg, generate::GenerateArg, percentile::PercentileArg, report::ReportArg,
    value_at::ValueAtArg,
};

mod columns;
mod generate;
mod percentile;
mod report;
mod value_at;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List the numeric columns of a grades file
    Columns(#[clap(flatten)] ColumnsArg),
    /// Write the full distribution report as JSON
    Report(#[clap(flatten)] ReportArg),
    /// Percentile rank of a GPA
    Percentile(#[clap(flatten)] PercentileArg),
    /// GPA needed to reach a target percentile
    ValueAt(#[clap(flatten)] ValueAtArg),
    /// Generate a synthetic grades file
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Columns(arg) => columns::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Percentile(arg) => percentile::run(&arg)?,
        Mode::ValueAt(arg) => value_at::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}
