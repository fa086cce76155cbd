use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use prompt_explorer::api::{created_id, HttpApi, PromptApi};
use prompt_explorer::assembler::{hydrate_prompt, load_tree};
use prompt_explorer::config::{Config, LogConfig, API_URL_ENV};
use prompt_explorer::export::{tree_to_dot, tree_to_text, DotConfig};
use prompt_explorer::model::{format_timestamp, Id, NewNode, NewNote, NewPrompt, PromptRecord};
use prompt_explorer::tui;

#[derive(Parser, Debug)]
#[command(name = "prompt-explorer")]
#[command(author, version, about = "Browse a prompt tree: projects, prompts, nodes and notes")]
struct Cli {
    /// Base URL of the prompt API (overrides PROMPT_EXPLORER_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive browser (default)
    Tui,

    /// Load the whole tree and print it
    Tree {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = TreeFormat::Text)]
        format: TreeFormat,

        /// Leave nodes out of DOT output
        #[arg(long)]
        no_nodes: bool,
    },

    /// Show one prompt with its nodes
    Show {
        /// Prompt ID
        id: String,
    },

    /// List a prompt's notes, newest first
    Notes {
        /// Prompt ID
        id: String,
    },

    /// Add a note to a prompt
    Note {
        /// Prompt ID
        id: String,

        /// Note text
        content: String,
    },

    /// Create a child prompt under a parent prompt
    AddPrompt {
        /// Parent prompt ID
        parent_id: String,

        /// Title of the new prompt
        #[arg(short, long)]
        title: String,

        /// Description of the new prompt
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Add a node to a prompt
    AddNode {
        /// Prompt ID
        prompt_id: String,

        /// Node name
        #[arg(short, long)]
        name: String,

        /// What the node does
        #[arg(short, long)]
        action: Option<String>,
    },

    /// Generate shell completion script
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TreeFormat {
    Text,
    Json,
    Dot,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);

    if let Command::Completion { shell } = command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "prompt-explorer", &mut io::stdout());
        return;
    }

    let interactive = matches!(command, Command::Tui);
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let config = config.with_overrides(std::env::var(API_URL_ENV).ok(), cli.api_url);
    init_logging(interactive, &config.log);

    if let Some(e) = config_error {
        if interactive {
            warn!(error = %e, "ignoring unusable config file");
        } else {
            fail(e);
        }
    }

    let result = if interactive {
        tui::run(config).await
    } else {
        run_command(command, &config).await
    };

    if let Err(e) = result {
        fail(e);
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    std::process::exit(1);
}

/// Subcommands log to stderr. The TUI owns the terminal, so it logs to the
/// configured file or nowhere.
fn init_logging(interactive: bool, log: &LogConfig) {
    let default_level = if interactive { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if !interactive {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
        return;
    }

    let file = log
        .file
        .as_ref()
        .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());
    match file {
        Some(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
}

async fn run_command(command: Command, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpApi::new(&config.api)?;

    match command {
        Command::Tree { format, no_nodes } => {
            let tree = load_tree(&api, config.hydration_limit()).await?;
            match format {
                TreeFormat::Text => print!("{}", tree_to_text(&tree)),
                TreeFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
                TreeFormat::Dot => {
                    let dot_config = DotConfig {
                        show_nodes: !no_nodes,
                        ..Default::default()
                    };
                    print!("{}", tree_to_dot(&tree, &dot_config));
                }
            }
        }

        Command::Show { id } => {
            let record = hydrate_prompt(&api, &Id::new(id)).await?;
            print_prompt(&record);
        }

        Command::Notes { id } => {
            let notes = api.fetch_notes(&Id::new(id)).await?;
            if notes.is_empty() {
                println!("{}", "No notes yet.".dimmed());
            }
            for note in notes {
                println!("{}", format_timestamp(&note.created_at).dimmed());
                println!("{}\n", note.content);
            }
        }

        Command::Note { id, content } => {
            if content.trim().is_empty() {
                return Err("note content is empty".into());
            }
            let payload = api.add_note(&Id::new(id), &NewNote { content }).await?;
            report_created("note", created_id(&payload));
        }

        Command::AddPrompt {
            parent_id,
            title,
            description,
        } => {
            let prompt = NewPrompt { title, description };
            let payload = api.add_prompt(&Id::new(parent_id), &prompt).await?;
            report_created("prompt", created_id(&payload));
        }

        Command::AddNode {
            prompt_id,
            name,
            action,
        } => {
            let node = NewNode {
                name,
                action: action.filter(|a| !a.trim().is_empty()),
            };
            let payload = api.add_node(&Id::new(prompt_id), &node).await?;
            report_created("node", created_id(&payload));
        }

        Command::Tui | Command::Completion { .. } => {}
    }

    Ok(())
}

fn report_created(kind: &str, id: Option<Id>) {
    match id {
        Some(id) => println!("{} {} {}", "Created".green(), kind, id),
        None => println!("{} {}", "Created".green(), kind),
    }
}

fn print_prompt(record: &PromptRecord) {
    println!("{} {}", format!("[{}]", record.id).dimmed(), record.title.bold());
    if let Some(parent) = &record.parent_prompt_id {
        println!("{} {}", "Parent:".dimmed(), parent);
    }
    if !record.description.is_empty() {
        println!("\n{}", record.description);
    }
    println!("\n{} ({})", "Nodes".cyan(), record.nodes.len());
    if record.nodes.is_empty() {
        println!("  {}", "No nodes for this prompt".dimmed());
    }
    for node in &record.nodes {
        match &node.action {
            Some(action) => println!("  - {}: {}", node.name, action),
            None => println!("  - {}", node.name),
        }
    }
}
