use gradepoint_analysis::query::Clamped;

use crate::util::DatasetArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ValueAtArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Target percentile (clamped into [0, 100])
    #[arg(long, default_value_t = 90.0)]
    percentile: f64,
}

pub(crate) fn run(arg: &ValueAtArg) -> anyhow::Result<()> {
    let dataset = arg.dataset.load()?;
    let needed = dataset.analysis.value_at(arg.percentile)?;
    if needed.clamped {
        tracing::warn!(
            requested = needed.requested,
            effective = needed.effective,
            "percentile is outside [0, 100]; using the nearest bound"
        );
    }
    println!("{}", message(&needed));
    Ok(())
}

fn message(needed: &Clamped<f64>) -> String {
    format!(
        "To be in the {:.1}th percentile, you'd need a GPA of at least {:.2}.",
        needed.effective, needed.result
    )
}
