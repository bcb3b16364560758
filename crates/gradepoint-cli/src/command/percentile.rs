use gradepoint_analysis::query::Clamped;

use crate::util::DatasetArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PercentileArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Your GPA (clamped into [0, 4])
    #[arg(long)]
    value: f64,
}

pub(crate) fn run(arg: &PercentileArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let rank = dataset.analysis.percentile_of(arg.value)?;
    if rank.clamped {
        tracing::warn!(
            requested = rank.requested,
            effective = rank.effective,
            "GPA is outside [0, 4]; using the nearest bound"
        );
    }
    println!("{}", message(&rank));
    Ok(())
}

fn message(rank: &Clamped<f64>) -> String {
    format!(
        "Your GPA of {:.2} is in the {:.2}th percentile.",
        rank.effective, rank.result
    )
}
