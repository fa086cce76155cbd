//! Prompt Explorer - browse prompt trees served by a prompt API
//!
//! A prompt tree is a project with an ordered list of prompts. Each prompt
//! has a title, a description, an optional parent prompt and a list of
//! nodes; notes can be appended to any prompt.
//!
//! # Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `api` | One async call per endpoint, envelope unwrapping, field normalization |
//! | `assembler` | Summary + per-prompt hydration into one ordered list |
//! | `export` | Text outline and DOT output |
//! | `config` | `.prompt-explorer/config.toml` plus overrides |
//! | `tui` | Interactive terminal browser |
//!
//! # Quick Start
//!
//! ```no_run
//! use prompt_explorer::{assembler, Config, HttpApi};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let api = HttpApi::new(&config.api)?;
//! let tree = assembler::load_tree(&api, config.hydration_limit()).await?;
//! println!("{}: {} prompts", tree.summary.project, tree.prompts.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod assembler;
pub mod config;
pub mod export;
pub mod model;
pub mod tui;

pub use api::{ApiError, HttpApi, PromptApi};
pub use config::Config;
pub use export::{tree_to_dot, tree_to_text, DotConfig};
pub use model::{Id, LoadedTree, NodeRecord, NoteRecord, PromptRecord, TreeSummary};
