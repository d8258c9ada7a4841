// CLI subcommand dispatch and command-tree loading.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use tracing::debug;

use cmdpath_core::{Resolver, ResolverOptions};

use crate::config::{self, GlobalConfig};
use crate::exit_code::ExitCode;
use crate::output::OutputFormat;

pub mod resolve;
pub mod tree;

/// Where the command tree comes from and how to resolve against it.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Command definitions file (TOML). Defaults to `commands` in
    /// `~/.cmdpath/config.toml`.
    #[arg(long, global = true)]
    pub commands: Option<PathBuf>,

    /// Config file to read instead of `~/.cmdpath/config.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Match command names and aliases ignoring case.
    #[arg(long, global = true)]
    pub case_insensitive: bool,

    /// Quote character for input tokenizing (repeatable).
    #[arg(long = "quote", value_name = "CHAR", global = true)]
    pub quotes: Vec<char>,

    /// Force JSON output.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve input against the command tree
    Resolve(resolve::ResolveArgs),
    /// Show the command tree with aliases and usage
    Tree(tree::TreeArgs),
}

pub fn run(source: &SourceArgs, cmd: Command) -> anyhow::Result<ExitCode> {
    let format = OutputFormat::detect(source.json);
    let resolver = load_resolver(source)?;
    match cmd {
        Command::Resolve(args) => resolve::run(&resolver, format, args),
        Command::Tree(args) => tree::run(&resolver, format, args),
    }
}

/// Build the resolver from flags, falling back to the global config.
pub fn load_resolver(source: &SourceArgs) -> anyhow::Result<Resolver> {
    let (config, config_dir) = match &source.config {
        Some(path) => {
            let config = GlobalConfig::load_from(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            (config, path.parent().map(Path::to_path_buf))
        }
        None => (GlobalConfig::load(), config::global_dir()),
    };

    let definitions = source
        .commands
        .clone()
        .or_else(|| config_dir.and_then(|dir| config.commands_path(&dir)))
        .context(
            "no command definitions: pass --commands or set `commands` in ~/.cmdpath/config.toml",
        )?;

    let options = merge_options(config.resolver, source);
    load_definitions(&definitions, options)
}

fn merge_options(mut options: ResolverOptions, source: &SourceArgs) -> ResolverOptions {
    if source.case_insensitive {
        options.case_sensitive = false;
    }
    if !source.quotes.is_empty() {
        options.quotes = source.quotes.clone();
    }
    options
}

pub fn load_definitions(path: &Path, options: ResolverOptions) -> anyhow::Result<Resolver> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read command definitions {}", path.display()))?;
    let resolver = Resolver::from_toml_str(&contents, options)
        .with_context(|| format!("failed to load command definitions {}", path.display()))?;
    debug!(
        path = %path.display(),
        commands = resolver.commands().len(),
        "command definitions loaded"
    );
    Ok(resolver)
}
