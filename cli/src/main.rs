//! kocorpus CLI - Korean transcript corpus extraction tool
//!
//! A command-line tool for ranking sentences and words from Korean transcripts.

use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use kocorpus::{CorpusConfig, KoCorpus, Pipeline, PromptTemplate, RankedCorpus};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Ranked Korean learning corpora from speech transcripts
#[derive(Parser)]
#[command(
    name = "kocorpus",
    author = "iyulab",
    version,
    about = "Extract ranked sentences and words from Korean transcripts",
    long_about = "kocorpus - Korean transcript corpus extraction tool.\n\n\
                  Segments a transcript, filters profanity, stopwords and names,\n\
                  and ranks accepted sentences and lemmas by frequency.\n\n\
                  Usage:\n  \
                  kocorpus extract <transcript> -c kocorpus.toml\n  \
                  kocorpus segment <transcript>\n  \
                  kocorpus normalize <text>\n\n\
                  Use '-' as the transcript to read from stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank sentences and words from a transcript
    Extract {
        /// Transcript file path ('-' for stdin)
        input: PathBuf,

        #[command(flatten)]
        resources: ResourceArgs,

        /// Output JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Output compact JSON (no indentation)
        #[arg(long, requires = "json")]
        compact: bool,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the sentence candidates of a transcript
    Segment {
        /// Transcript file path ('-' for stdin)
        input: PathBuf,

        /// Configuration file (TOML) for the minimum sentence length
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the normalized form of a text
    Normalize {
        /// Text to normalize ('-' for stdin)
        text: String,
    },

    /// Render the material generator prompt for a transcript
    Prompt {
        /// Transcript file path ('-' for stdin)
        input: PathBuf,

        /// Prompt template file
        #[arg(short, long)]
        template: PathBuf,

        #[command(flatten)]
        resources: ResourceArgs,

        /// Output the prompt messages as JSON
        #[arg(long)]
        json: bool,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

/// Resource and limit overrides shared by pipeline commands
#[derive(Args, Clone, Default)]
struct ResourceArgs {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Profanity list
    #[arg(long)]
    profanities: Option<PathBuf>,

    /// Stopword list
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Common name list
    #[arg(long)]
    names: Option<PathBuf>,

    /// Tagged lexicon for the dictionary analyzer
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Number of ranked sentences
    #[arg(short, long)]
    sentences: Option<usize>,

    /// Number of ranked words
    #[arg(short, long)]
    words: Option<usize>,
}

impl ResourceArgs {
    /// Loads the configuration file (if any) and applies overrides.
    fn to_config(&self) -> kocorpus::Result<CorpusConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(path) = &self.profanities {
            config.resources.profanities = path.clone();
        }
        if let Some(path) = &self.stopwords {
            config.resources.stopwords = path.clone();
        }
        if let Some(path) = &self.names {
            config.resources.common_names = path.clone();
        }
        if let Some(path) = &self.lexicon {
            config.resources.lexicon = Some(path.clone());
        }
        if let Some(limit) = self.sentences {
            config.pipeline.sentence_limit = limit;
        }
        if let Some(limit) = self.words {
            config.pipeline.word_limit = limit;
        }

        Ok(config)
    }

    fn build_pipeline(&self) -> kocorpus::Result<Pipeline> {
        KoCorpus::new().with_config(self.to_config()?).build()
    }
}

fn load_config(path: Option<&Path>) -> kocorpus::Result<CorpusConfig> {
    match path {
        Some(path) => CorpusConfig::load(path),
        None => Ok(CorpusConfig::default()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Extract {
            input,
            resources,
            json,
            compact,
            output,
        } => {
            let pb = create_spinner("Loading resources...");
            let pipeline = resources.build_pipeline()?;

            pb.set_message("Reading transcript...");
            let transcript = read_input(&input)?;

            pb.set_message("Ranking sentences and words...");
            let corpus = pipeline.run(&transcript);
            pb.finish_and_clear();

            if json {
                write_output(output.as_ref(), &corpus.to_json(!compact)?)?;
            } else {
                write_output(output.as_ref(), &render_report(&corpus))?;
            }

            if let Some(path) = output {
                println!(
                    "{} Ranked corpus written: {}",
                    "✓".green().bold(),
                    path.display()
                );
            }

            if corpus.is_empty() {
                log::warn!(
                    "No sentence passed the filters ({} candidates)",
                    corpus.stats.candidates
                );
            }
        }

        Commands::Segment { input, config } => {
            let min_chars = load_config(config.as_deref())?.pipeline.min_sentence_chars;
            let transcript = read_input(&input)?;
            let sentences = kocorpus::segment::segment_with(&transcript, min_chars);
            log::info!("{} sentence candidates", sentences.len());

            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for sentence in &sentences {
                writeln!(handle, "{}", sentence)?;
            }
        }

        Commands::Normalize { text } => {
            let text = if text == "-" {
                read_stdin()?
            } else {
                text
            };
            println!("{}", kocorpus::normalize(&text));
        }

        Commands::Prompt {
            input,
            template,
            resources,
            json,
            output,
        } => {
            let pb = create_spinner("Loading resources...");
            let template = PromptTemplate::load(&template)?;
            let pipeline = resources.build_pipeline()?;

            pb.set_message("Ranking sentences and words...");
            let transcript = read_input(&input)?;
            let corpus = pipeline.run(&transcript);
            let prompt = template.render(&corpus)?;
            pb.finish_and_clear();

            let content = if json {
                serde_json::to_string_pretty(&prompt)?
            } else {
                format!(
                    "{}\n{}\n\n{}\n{}",
                    "[system]".cyan().bold(),
                    prompt.system,
                    "[user]".cyan().bold(),
                    prompt.user
                )
            };
            write_output(output.as_ref(), &content)?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn render_report(corpus: &RankedCorpus) -> String {
    let mut report = String::new();

    report.push_str(&format!("{}\n", "Ranked Sentences".cyan().bold()));
    report.push_str(&format!("{}\n", "─".repeat(40)));
    for (rank, sentence) in corpus.sentences.iter().enumerate() {
        report.push_str(&format!("{:>3}. {} ({})\n", rank + 1, sentence.item, sentence.count));
    }

    report.push_str(&format!("\n{}\n", "Ranked Words".cyan().bold()));
    report.push_str(&format!("{}\n", "─".repeat(40)));
    for (rank, word) in corpus.words.iter().enumerate() {
        report.push_str(&format!("{:>3}. {} ({})\n", rank + 1, word.item.bold(), word.count));
    }

    let stats = &corpus.stats;
    report.push_str(&format!("\n{}\n", "Statistics".cyan().bold()));
    report.push_str(&format!("{}\n", "─".repeat(40)));
    report.push_str(&format!("{}: {}\n", "Candidates".bold(), stats.candidates));
    report.push_str(&format!("{}: {}\n", "Accepted".bold(), stats.accepted));
    report.push_str(&format!(
        "{}: {} (profanity {}, analysis {}, empty parse {}, too few lemmas {})",
        "Rejected".bold(),
        stats.rejected(),
        stats.rejected_profanity,
        stats.rejected_analysis,
        stats.rejected_malformed,
        stats.rejected_too_few_lemmas
    ));

    report
}

fn print_version() {
    println!("{} {}", "kocorpus".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Ranked Korean learning corpora from speech transcripts");
    println!();
    if cfg!(feature = "lindera") {
        println!("Analyzers: lexicon, ko-dic (lindera)");
    } else {
        println!("Analyzers: lexicon");
    }
}

/// Reads a transcript from a file, or stdin for `-`.
fn read_input(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let transcript = if path == Path::new("-") {
        read_stdin()?
    } else {
        kocorpus::read_transcript(path)?
    };
    if transcript.trim().is_empty() {
        return Err(kocorpus::Error::EmptyTranscript.into());
    }
    Ok(transcript)
}

fn read_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
