//! career-recommender CLI
//!
//! Recommend careers for a description of interests and skills.

use std::{
    io::{self, BufRead, Read, Write},
    num::NonZeroUsize,
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use career_recommender::{error::Result, Config, Hits, IndexHandle};

#[derive(Parser)]
#[command(name = "career-recommender", version, about = "Recommend careers from a description of your interests")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Corpus CSV with `Career` and `Description` columns
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// More log output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// No log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend careers for TEXT (read from stdin when omitted)
    Recommend {
        /// Number of careers to show
        #[arg(short = 'k', long)]
        top_k: Option<NonZeroUsize>,

        /// Show similarity scores
        #[arg(long)]
        scores: bool,

        text: Vec<String>,
    },
    /// Summarize the corpus and its vocabulary
    Inspect {
        /// Number of most common terms to list
        #[arg(long, default_value_t = 10)]
        terms: usize,
    },
    /// Read one description per line and recommend for each,
    /// picking up corpus file changes between queries
    Interactive {
        #[arg(short = 'k', long)]
        top_k: Option<NonZeroUsize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,career_recommender=debug",
        _ => "debug,career_recommender=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &cli.corpus {
        config.corpus.path = path.clone();
    }
    debug!(?config, "loaded configuration");

    let handle = IndexHandle::open_with_threshold(&config.corpus.path, config.ranking.parallel_threshold)?;

    match &cli.command {
        Commands::Recommend { top_k, scores, text } => {
            let query = if text.is_empty() {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                text.join(" ")
            };
            recommend(&handle, &query, top_k.unwrap_or(config.ranking.top_k), *scores)
        }
        Commands::Inspect { terms } => inspect(&handle, *terms),
        Commands::Interactive { top_k } => interactive(
            &handle,
            io::stdin().lock(),
            &mut io::stdout().lock(),
            top_k.unwrap_or(config.ranking.top_k),
        ),
    }
}

fn recommend(handle: &IndexHandle, query: &str, top_k: NonZeroUsize, scores: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if query.trim().is_empty() {
        writeln!(out, "Please describe your interests and skills before asking for a recommendation.")?;
        return Ok(());
    }
    let hits = handle.load().rank_hits(query, top_k);
    print_hits(&mut out, &hits, scores)
}

fn print_hits(out: &mut impl Write, hits: &Hits, scores: bool) -> Result<()> {
    if hits.clone().nonzero().is_empty() {
        writeln!(out, "None of the careers matched your description; showing catalog order.")?;
    } else {
        writeln!(out, "Based on your input, we recommend the following careers:")?;
    }
    if scores {
        write!(out, "{hits}")?;
    } else {
        for hit in hits.iter() {
            writeln!(out, "- {}", hit.name)?;
        }
    }
    Ok(())
}

fn inspect(handle: &IndexHandle, terms: usize) -> Result<()> {
    let index = handle.load();
    let mut out = io::stdout().lock();
    let empty_rows = index.matrix().iter().filter(|row| row.is_zero()).count();
    writeln!(out, "corpus:      {}", handle.path().display())?;
    writeln!(out, "careers:     {}", index.doc_num())?;
    writeln!(out, "vocabulary:  {}", index.vocabulary().len())?;
    writeln!(out, "empty rows:  {empty_rows}")?;

    let mut common: Vec<(&str, u32)> = index.vocabulary().iter().collect();
    common.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    if terms > 0 && !common.is_empty() {
        writeln!(out, "most common terms (documents):")?;
        for (term, df) in common.into_iter().take(terms) {
            writeln!(out, "  {term:<20} {df}")?;
        }
    }
    Ok(())
}

fn interactive(handle: &IndexHandle, input: impl BufRead, out: &mut impl Write, top_k: NonZeroUsize) -> Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        // keep serving the previous snapshot when the file is broken mid-edit
        if let Err(err) = handle.refresh() {
            warn!(error = %err, "corpus refresh failed");
        }
        if line.trim().is_empty() {
            writeln!(out, "Please describe your interests and skills before asking for a recommendation.")?;
        } else {
            let hits = handle.load().rank_hits(&line, top_k);
            print_hits(out, &hits, false)?;
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}
