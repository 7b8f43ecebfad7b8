use chaining::{config::RunConfig, infer, Flow, Session};
use clap::Parser;
use std::io::{BufRead as _, Write as _};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "kb")]
#[command(about = "Forward-chaining over propositional definite clauses", long_about = None)]
struct Cli {
    /// Rule file to load before the first prompt
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Scan rules in parallel once a rule set has at least this many
    #[arg(long, conflicts_with = "sequential")]
    parallel_threshold: Option<usize>,

    /// Never scan rules in parallel
    #[arg(long)]
    sequential: bool,

    #[arg(long, default_value = chaining::config::DEFAULT_PROMPT)]
    prompt: String,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        let mut engine = infer::Config::default();
        if self.sequential {
            engine.parallel_threshold = None;
        } else if let Some(threshold) = self.parallel_threshold {
            engine.parallel_threshold = Some(threshold);
        }
        RunConfig { engine, prompt: self.prompt.clone() }
    }
}

fn main() -> anyhow::Result<()> {
    // stderr, so logs never interleave with the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.run_config();
    tracing::debug!(?config, "starting");

    let mut session = Session::new(&config);
    let mut out = std::io::stdout().lock();
    if let Some(path) = &cli.rules {
        session.load(path, &mut out)?;
        writeln!(out)?;
    }

    let mut lines = std::io::stdin().lock().lines();
    loop {
        write!(out, "{}", config.prompt)?;
        out.flush()?;
        let Some(line) = lines.next() else {
            // EOF behaves like `quit`
            writeln!(out)?;
            break;
        };
        if let Flow::Exit = session.execute(&line?, &mut out)? {
            break;
        }
    }
    Ok(())
}
