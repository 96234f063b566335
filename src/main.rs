use clap::{ArgAction, Args, Parser, Subcommand};
use endpoint_seq::Result;
use endpoint_seq::config::{AggregatorConfig, KeyOrder, RawConfig};
use endpoint_seq::diagnostics::{self, TracingObserver};
use endpoint_seq::generate::{GeneratorConfig, LogLineGenerator};
use endpoint_seq::log::open_log;
use endpoint_seq::model::{AggregationResult, SequenceAggregator};
use endpoint_seq::render;

use anyhow::{Context, bail};
use std::io::{self, BufRead, BufWriter, Write};
use std::time::Duration;
use tracing::info;

const DEMO_LINES: u64 = 1000;

#[derive(Parser)]
#[command(name = "endpoint-seq")]
#[command(about = "Most frequent per-user endpoint sequence in an access log", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate an access log (file path, or "-" for stdin) and print the report.
    Report {
        #[arg(long)]
        log: String,

        #[command(flatten)]
        agg: AggregateArgs,
    },

    /// Print synthetic access-log lines to stdout (unbounded without --count).
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,

        #[arg(long, default_value = " : ")]
        delimiter: String,
    },

    /// Generate lines in-process (1000 unless --count) and report on them.
    Demo {
        #[command(flatten)]
        generator: GeneratorArgs,

        #[command(flatten)]
        agg: AggregateArgs,
    },
}

#[derive(Args)]
struct AggregateArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<String>,

    /// Number of consecutive endpoints per sequence.
    #[arg(long, allow_negative_numbers = true)]
    seqlen: Option<i64>,

    /// Field separator (default " : ").
    #[arg(long)]
    delimiter: Option<String>,

    /// Treat --delimiter as a regular expression (`=false` overrides the config file).
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    delimiter_regex: Option<bool>,

    /// Endpoint order inside a sequence key.
    #[arg(long, value_enum)]
    order: Option<KeyOrder>,

    /// Stop after this many input lines.
    #[arg(long)]
    limit: Option<usize>,

    /// Also list the N most frequent sequences.
    #[arg(long, default_value_t = 0)]
    top: usize,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct GeneratorArgs {
    #[arg(long)]
    count: Option<u64>,

    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Probability that a line is deliberately malformed.
    #[arg(long, default_value_t = 0.0)]
    malformed_rate: f64,

    /// Microseconds to sleep before each line.
    #[arg(long, default_value_t = 0)]
    pace_us: u64,
}

impl AggregateArgs {
    fn build_config(&self) -> Result<AggregatorConfig> {
        let file = match &self.config {
            Some(path) => RawConfig::from_json_file(path)?,
            None => RawConfig::default(),
        };
        Ok(file.merge(self.flag_overrides()).validate_and_build()?)
    }

    fn flag_overrides(&self) -> RawConfig {
        RawConfig {
            seqlen: self.seqlen,
            delimiter: self.delimiter.clone(),
            delimiter_regex: self.delimiter_regex,
            order: self.order,
        }
    }
}

impl GeneratorArgs {
    fn build(&self, default_count: Option<u64>, delimiter: String) -> Result<LogLineGenerator> {
        let config = GeneratorConfig {
            count: self.count.or(default_count),
            seed: self.seed,
            malformed_rate: self.malformed_rate,
            pace: (self.pace_us > 0).then(|| Duration::from_micros(self.pace_us)),
            delimiter,
        };
        Ok(LogLineGenerator::new(config)?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_tracing(cli.verbose)?;

    match cli.cmd {
        Commands::Report { log, agg } => {
            // 1) Validate configuration before touching the input.
            let config = agg.build_config()?;
            info!(
                log = %log,
                seqlen = config.seqlen.get(),
                delimiter = %config.delimiter,
                "aggregating"
            );

            // 2) Stream lines through the aggregator.
            let reader = open_log(&log)?;
            let result = aggregate(reader.split(b'\n'), &config, agg.limit)?;

            // 3) Report.
            print_report(&result, &config, &agg)?;
        }
        Commands::Generate {
            generator,
            delimiter,
        } => {
            let paced = generator.pace_us > 0;
            let lines = generator.build(None, delimiter)?;
            write_lines(lines, paced)?;
        }
        Commands::Demo { generator, agg } => {
            let config = agg.build_config()?;
            if config.delimiter.is_pattern() {
                bail!("demo needs a literal --delimiter to generate lines with");
            }
            let lines = generator.build(Some(DEMO_LINES), config.delimiter.as_str().to_string())?;
            info!(seqlen = config.seqlen.get(), "aggregating generated log");

            let result = aggregate(lines.map(Ok), &config, agg.limit)?;
            print_report(&result, &config, &agg)?;
        }
    }

    Ok(())
}

fn aggregate<I>(
    lines: I,
    config: &AggregatorConfig,
    limit: Option<usize>,
) -> Result<AggregationResult>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    let mut observer = TracingObserver::default();
    let mut aggregator = SequenceAggregator::with_observer(config.clone(), &mut observer);

    for (lineno, line) in lines.take(limit.unwrap_or(usize::MAX)).enumerate() {
        let line = line.with_context(|| format!("read input line {}", lineno + 1))?;
        // Malformed lines are counted and reported through the observer.
        let _ = aggregator.ingest_line(line);
    }

    let result = aggregator.finish();
    info!(
        records = result.records,
        skipped = result.skipped,
        users = result.user_windows.len(),
        sequences = result.frequency_table.len(),
        leader_changes = observer.leader_changes,
        "aggregation finished"
    );
    Ok(result)
}

fn print_report(
    result: &AggregationResult,
    config: &AggregatorConfig,
    args: &AggregateArgs,
) -> Result<()> {
    let view = render::build_report_view(result, config, args.top);
    if args.json {
        println!("{}", render::render_json_report(&view)?);
    } else {
        print!("{}", render::render_text_report(&view));
    }
    Ok(())
}

/// Paced output is flushed per line so consumers see it as it is produced.
fn write_lines(lines: LogLineGenerator, flush_each: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for line in lines {
        let mut written = out.write_all(&line).and_then(|_| out.write_all(b"\n"));
        if flush_each {
            written = written.and_then(|_| out.flush());
        }
        match written {
            Ok(()) => {}
            // Downstream closed the pipe (e.g. `| head`): stop quietly.
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(()),
            Err(e) => return Err(e).context("write generated line"),
        }
    }
    match out.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e).context("flush stdout"),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report_flags(extra: &[&str]) -> RawConfig {
        let argv = ["endpoint-seq", "report", "--log", "-"]
            .into_iter()
            .chain(extra.iter().copied());
        match Cli::try_parse_from(argv).unwrap().cmd {
            Commands::Report { agg, .. } => agg.flag_overrides(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn delimiter_regex_flag_is_tri_state() {
        assert_eq!(report_flags(&[]).delimiter_regex, None);
        assert_eq!(report_flags(&["--delimiter-regex"]).delimiter_regex, Some(true));
        assert_eq!(report_flags(&["--delimiter-regex=true"]).delimiter_regex, Some(true));
        assert_eq!(report_flags(&["--delimiter-regex=false"]).delimiter_regex, Some(false));
    }

    #[test]
    fn delimiter_regex_false_overrides_file() {
        let file = RawConfig {
            delimiter: Some(" : ".into()),
            delimiter_regex: Some(true),
            ..RawConfig::default()
        };
        let config = file
            .clone()
            .merge(report_flags(&["--delimiter-regex=false"]))
            .validate_and_build()
            .unwrap();
        assert!(!config.delimiter.is_pattern());

        let config = file.merge(report_flags(&[])).validate_and_build().unwrap();
        assert!(config.delimiter.is_pattern());
    }
}
