//! advex CLI - adversarial robustness evaluation workflow.

use advex::{
    load_records, report, Harness, Lexicon, ModelId, Perturber, Result, RunConfig, StaticLexicon,
};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "advex")]
#[command(
    author,
    version,
    about = "Adversarial robustness evaluation for language models",
    long_about = r#"
advex - adversarial robustness evaluation workflow

PIPELINE:
  dataset -> sampled records -> synonym perturbation -> stub responses
          -> placeholder metrics -> report (console / CSV / JSON / SVG)

Responses are simulated from fixed templates and the metrics are coarse
placeholders (word overlap, length ratio, one random value). The point is
the reproducible workflow, not the numbers: a seeded run replays exactly.

EXAMPLES:
  advex run --data data.csv --samples 5 --seed 42 --out results.csv
  advex run --data data.csv --model PaLM --charts out/
  advex perturb "The quick brown fox" --prob 1.0 --seed 7
  advex synonyms happy
  advex info
"#
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full workflow over a dataset
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Perturb a single text and print the result
    #[command(visible_alias = "p")]
    Perturb(PerturbArgs),

    /// Print the synonym candidates for a word
    #[command(visible_alias = "s")]
    Synonyms(SynonymsArgs),

    /// Print build and lexicon information
    Info,
}

#[derive(Args)]
struct RunArgs {
    /// Dataset path (delimited text with `id` and `clean_text` columns)
    #[arg(short, long)]
    data: PathBuf,

    /// Number of records to sample (clamped to the dataset size)
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Per-token replacement probability in [0, 1]
    #[arg(short, long)]
    prob: Option<f64>,

    /// Stub model identifier (GPT-3, PaLM, Custom)
    #[arg(short, long)]
    model: Option<String>,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write per-sample results as CSV
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write per-sample results as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Directory for the bar and radar chart SVGs
    #[arg(long)]
    charts: Option<PathBuf>,

    /// Custom synonym table (TSV) instead of the built-in one
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// JSON run-config file; explicit flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress the console summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Args)]
struct PerturbArgs {
    /// Text to perturb
    text: String,

    /// Per-token replacement probability in [0, 1]
    #[arg(short, long, default_value_t = 0.3)]
    prob: f64,

    /// RNG seed for a reproducible perturbation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Custom synonym table (TSV) instead of the built-in one
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

#[derive(Args)]
struct SynonymsArgs {
    /// Word to look up
    word: String,

    /// Custom synonym table (TSV) instead of the built-in one
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Perturb(args) => cmd_perturb(args),
        Commands::Synonyms(args) => cmd_synonyms(args),
        Commands::Info => cmd_info(),
    };
    if let Err(e) = outcome {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(n) = args.samples {
        config = config.with_sample_count(n);
    }
    if let Some(p) = args.prob {
        config = config.with_replacement_probability(p);
    }
    if let Some(name) = &args.model {
        let model = name.parse::<ModelId>().unwrap_or(ModelId::Unrecognized);
        if model == ModelId::Unrecognized {
            log::warn!(
                "unrecognized model id '{}'; responses will be the sentinel string",
                name
            );
        }
        config = config.with_model_id(model);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let records = load_records(&args.data)?;
    let results = match &args.lexicon {
        Some(path) => {
            let lexicon = StaticLexicon::from_path(path)?;
            Harness::with_lexicon(config, &lexicon).run(&records)?
        }
        None => Harness::new(config).run(&records)?,
    };

    if !args.quiet {
        print!("{}", report::render_summary(&results));
    }
    if let Some(path) = &args.out {
        report::write_csv(&results, path)?;
        println!("Results saved to '{}'", path.display());
    }
    if let Some(path) = &args.json {
        std::fs::write(path, report::to_json(&results)?)?;
        println!("Results saved to '{}'", path.display());
    }
    if let Some(dir) = &args.charts {
        std::fs::create_dir_all(dir)?;
        let bar = dir.join("adversarial_metrics_bar.svg");
        let radar = dir.join("adversarial_metrics_radar.svg");
        report::write_bar_chart(&results, &bar)?;
        report::write_radar_chart(&results, &radar)?;
        println!("Charts saved to '{}' and '{}'", bar.display(), radar.display());
    }
    Ok(())
}

fn cmd_perturb(args: PerturbArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let perturber = Perturber::new(args.prob);
    let output = match &args.lexicon {
        Some(path) => {
            let lexicon = StaticLexicon::from_path(path)?;
            perturber.perturb(&args.text, &lexicon, &mut rng)
        }
        None => perturber.perturb(&args.text, StaticLexicon::builtin(), &mut rng),
    };
    println!("{}", output);
    Ok(())
}

fn cmd_synonyms(args: SynonymsArgs) -> Result<()> {
    let synonyms = match &args.lexicon {
        Some(path) => StaticLexicon::from_path(path)?.synonyms(&args.word),
        None => StaticLexicon::builtin().synonyms(&args.word),
    };
    if synonyms.is_empty() {
        eprintln!("no synonyms found for '{}'", args.word);
    } else {
        for synonym in synonyms {
            println!("{}", synonym);
        }
    }
    Ok(())
}

fn cmd_info() -> Result<()> {
    println!("advex {}", env!("CARGO_PKG_VERSION"));
    println!("built-in lexicon: {} headwords", StaticLexicon::builtin().len());
    println!(
        "defaults: samples=5 prob=0.3 model=GPT-3 (seed from entropy unless --seed)"
    );
    Ok(())
}
