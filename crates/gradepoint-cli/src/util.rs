use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use gradepoint_analysis::{GpaAnalysis, config::AnalysisConfig, table::Table};
use gradepoint_stats::{
    density::Bandwidth,
    percentiles::TieConvention,
    sample::{FilterReport, SampleFilter},
};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read one sheet of grades from a CSV file
///
/// The first record is the header row. Rows may be shorter than the header;
/// missing trailing cells count as blank.
pub fn read_csv_table<P>(path: P) -> anyhow::Result<Table>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    parse_csv_table(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

pub fn parse_csv_table<R>(reader: R) -> anyhow::Result<Table>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let headers = reader
        .headers()?
        .iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();
    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(Table::from_rows(
        headers,
        records.iter().map(csv::StringRecord::iter),
    ))
}

/// Parse a bandwidth argument: `scott`, `silverman` or a positive number
pub fn parse_bandwidth(arg: &str) -> Result<Bandwidth, String> {
    match arg.trim().to_ascii_lowercase().as_str() {
        "scott" => Ok(Bandwidth::Scott),
        "silverman" => Ok(Bandwidth::Silverman),
        other => match other.parse::<f64>() {
            Ok(h) if h.is_finite() && h > 0.0 => Ok(Bandwidth::Fixed(h)),
            _ => Err(format!(
                "expected `scott`, `silverman` or a positive number, got `{arg}`"
            )),
        },
    }
}

/// Dataset selection and analysis settings shared by the analysis commands
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DatasetArg {
    /// Path to the CSV file holding the grades
    pub path: PathBuf,
    /// Column holding the grade points (defaults to the first numeric column)
    #[arg(long)]
    pub column: Option<String>,
    /// Analysis settings file (JSON); the flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Density bandwidth: `scott`, `silverman` or a fixed width in grade points
    #[arg(long, value_parser = parse_bandwidth)]
    pub bandwidth: Option<Bandwidth>,
    /// Tie handling for percentile ranks: Rank, Mean, Weak or Strict
    #[arg(long)]
    pub ties: Option<TieConvention>,
    /// Number of points on the density curve
    #[arg(long)]
    pub grid_points: Option<usize>,
}

/// An analysed column together with how it was obtained
#[derive(Debug, Clone)]
pub struct Dataset {
    pub column: String,
    pub filter: FilterReport,
    pub analysis: GpaAnalysis,
}

impl DatasetArg {
    pub fn load_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => read_json_file("analysis config", path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(bandwidth) = self.bandwidth {
            config.bandwidth = bandwidth;
        }
        if let Some(ties) = self.ties {
            config.ties = ties;
        }
        if let Some(grid_points) = self.grid_points {
            config.grid_points = grid_points;
        }
        Ok(config)
    }

    pub fn load(&self) -> anyhow::Result<Dataset> {
        let config = self.load_config()?;
        let table = read_csv_table(&self.path)?;
        let column = table
            .numeric_column(self.column.as_deref())
            .with_context(|| format!("No usable grade column in {}", self.path.display()))?;
        let (sample, filter) = column
            .sample(&SampleFilter::GRADE_POINTS)
            .with_context(|| format!("Column '{}' has no grade points in [0, 4]", column.name))?;
        warn_skipped(&column.name, &filter);
        let analysis = GpaAnalysis::new(sample, &config)?;
        Ok(Dataset {
            column: column.name.clone(),
            filter,
            analysis,
        })
    }
}

fn warn_skipped(column: &str, filter: &FilterReport) {
    if filter.kept < filter.total() {
        tracing::warn!(
            column,
            non_numeric = filter.non_numeric,
            out_of_range = filter.out_of_range,
            "skipped cells that are not grade points"
        );
    }
}
