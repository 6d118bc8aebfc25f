use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use imlo::checker::suggestions::Metric;
use imlo::cli::output::{self, OutputFormat};
use imlo::config::Overrides;
use imlo::{dict, is_cyrillic, is_latin, transliterate, Config, Matcher, Orchestrator, Script};
use std::fs::OpenOptions;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "imlo")]
#[command(version, about = "Uzbek spelling assistant for Cyrillic and Latin text", long_about = None)]
struct Cli {
    /// Word list to check against (one word per line, or a prebuilt .fst)
    #[arg(short, long, global = true, env = "IMLO_WORD_LIST")]
    word_list: Option<PathBuf>,

    /// Configuration file [default: ./.imlo.toml]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Maximum suggestions per lookup pass
    #[arg(long, global = true)]
    max_suggestions: Option<usize>,

    /// Minimum similarity (0.0-1.0) for a suggestion
    #[arg(long, global = true)]
    cutoff: Option<f64>,

    /// Similarity metric (levenshtein, jaro_winkler, sorensen_dice)
    #[arg(long, global = true)]
    metric: Option<Metric>,

    /// Pattern to ignore (regex)
    #[arg(long, global = true)]
    ignore_pattern: Vec<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Check the spelling of words (reads stdin when no text is given)
    Check {
        /// Text to check
        #[arg(value_name = "TEXT")]
        text: Vec<String>,

        /// Output format (text, json)
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,

        /// Exit with code 0 even if misspellings are found
        #[arg(long)]
        no_fail: bool,
    },
    /// Answer messages read line by line from stdin
    Chat {
        /// Name used when greeting on /start
        #[arg(long, env = "USER", default_value = "do'stim")]
        name: String,
    },
    /// Transliterate text between Cyrillic and Latin
    Translit {
        /// Target script (cyrillic, latin)
        #[arg(short, long)]
        to: Script,

        /// Text to transliterate (reads stdin when omitted)
        #[arg(value_name = "TEXT")]
        text: Vec<String>,
    },
    /// Report which scripts a text is written in
    Script {
        #[arg(value_name = "TEXT", required = true)]
        text: Vec<String>,
    },
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// Compile a word list (one word per line) into an .fst dictionary
    Build {
        /// Plain text word list
        input: PathBuf,

        /// Output file [default: <input>.fst]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the active dictionary and matching settings
    Info,
    /// Print dictionary words
    Words {
        /// Only words starting with this prefix
        prefix: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "imlo", &mut io::stdout());
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("No command specified. Use --help for usage information.");
    };

    // Load configuration
    let config = Config::load(Overrides {
        word_list: cli.word_list,
        max_suggestions: cli.max_suggestions,
        cutoff: cli.cutoff,
        metric: cli.metric,
        ignore_patterns: cli.ignore_pattern,
        config_file: cli.config,
    })?;

    init_logging(&cli.log_level, config.log_file.as_deref())?;

    let use_color = !cli.no_color && io::stdout().is_terminal();
    if !use_color {
        colored::control::set_override(false);
    }

    match command {
        Commands::Check {
            text,
            format,
            no_fail,
        } => {
            let message = text_or_stdin(text)?;
            let orchestrator = Orchestrator::new(Matcher::from_config(&config)?, &config);
            let reply = orchestrator.reply(&message);

            output::print_reply(&reply, use_color, &format)?;
            if matches!(format, OutputFormat::Text) && !reply.is_empty() {
                output::print_check_summary(reply.misspelled(), reply.reports.len(), reply.script, use_color);
            }

            // Exit with appropriate code
            if reply.misspelled() > 0 && !no_fail {
                std::process::exit(1);
            }
        }
        Commands::Chat { name } => {
            let orchestrator = Orchestrator::new(Matcher::from_config(&config)?, &config);
            run_chat(&orchestrator, &name, use_color)?;
        }
        Commands::Translit { to, text } => {
            let text = text_or_stdin(text)?;
            println!("{}", transliterate(text.trim_end(), to));
        }
        Commands::Script { text } => {
            let text = text.join(" ");
            output::print_script_verdict(&text, is_cyrillic(&text), is_latin(&text), use_color);
        }
        Commands::Dict { action } => handle_dict(action, &config, use_color)?,
    }

    Ok(())
}

fn handle_dict(action: DictCommands, config: &Config, colored: bool) -> Result<()> {
    match action {
        DictCommands::Build { input, output } => {
            dict::manager::build_dictionary(&input, output.as_deref(), colored)?;
        }
        DictCommands::Info => {
            let matcher = Matcher::from_config(config)?;
            dict::manager::show_info(config, matcher.dictionary(), colored);
        }
        DictCommands::Words { prefix } => {
            let matcher = Matcher::from_config(config)?;
            dict::manager::list_words(matcher.dictionary(), prefix.as_deref());
        }
    }
    Ok(())
}

/// One reply per input line until EOF or `/quit`.
fn run_chat(orchestrator: &Orchestrator, name: &str, colored: bool) -> Result<()> {
    let interactive = io::stdin().is_terminal();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    info!(user = %name, "chat session started");
    if interactive {
        println!("Type a message to check it, /start to be greeted, /quit to leave.");
    }

    loop {
        if interactive {
            print!("> ");
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if matches!(message, "/quit" | "/exit") {
            break;
        }

        if let Some(answer) = orchestrator.respond(message, name) {
            for reply_line in answer.lines() {
                writeln!(stdout, "{}", output::paint_line(reply_line, colored))?;
            }
            writeln!(stdout)?;
        }
    }

    info!(user = %name, "chat session ended");
    Ok(())
}

fn text_or_stdin(text: Vec<String>) -> Result<String> {
    if !text.is_empty() {
        return Ok(text.join(" "));
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read text from stdin")?;
    Ok(input)
}

fn init_logging(level: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();

    Ok(())
}
