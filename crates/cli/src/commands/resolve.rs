// `cmdpath resolve`: resolve input against the command tree.

use std::io::{self, BufRead};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use cmdpath_core::{tokenize, ArgumentMap, Command, LookupResult, Resolver};

use crate::exit_code::ExitCode;
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Input to resolve. Several values are joined with spaces before
    /// tokenizing, so quote inside shell quotes: `'say "hi there"'`.
    #[arg(required_unless_present = "stdin")]
    pub input: Vec<String>,

    /// Read one input per line from stdin; blank lines are skipped.
    #[arg(long, conflicts_with = "input")]
    pub stdin: bool,

    /// Match the command path only, without argument matching.
    #[arg(long)]
    pub no_args: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResolutionReport {
    Success {
        command: String,
        usage: String,
        path_used: Vec<String>,
        path_dangling: Vec<String>,
        arguments: ArgumentMap,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    NotFound {
        missing: String,
        similar: Vec<String>,
        path_used: Vec<String>,
        path_dangling: Vec<String>,
    },
    MissingArguments {
        command: String,
        usage: String,
        missing: Vec<String>,
        path_used: Vec<String>,
        path_dangling: Vec<String>,
    },
}

impl ResolutionReport {
    pub fn from_result(result: &LookupResult<'_>) -> Self {
        match result {
            LookupResult::Success { name, command, path_used, path_dangling, arguments } => {
                Self::Success {
                    command: name.to_string(),
                    usage: full_usage(path_used, name, command),
                    path_used: path_used.clone(),
                    path_dangling: path_dangling.clone(),
                    arguments: arguments.clone(),
                    data: command.data().cloned(),
                }
            }
            LookupResult::NotFound { missing, similar, path_used, path_dangling } => {
                Self::NotFound {
                    missing: missing.clone(),
                    similar: similar.clone(),
                    path_used: path_used.clone(),
                    path_dangling: path_dangling.clone(),
                }
            }
            LookupResult::MissingArguments { name, command, missing, path_used, path_dangling } => {
                Self::MissingArguments {
                    command: name.to_string(),
                    usage: full_usage(path_used, name, command),
                    missing: missing.iter().map(|argument| argument.name().to_string()).collect(),
                    path_used: path_used.clone(),
                    path_dangling: path_dangling.clone(),
                }
            }
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Success { .. } => ExitCode::Success,
            Self::NotFound { .. } => ExitCode::NotFound,
            Self::MissingArguments { .. } => ExitCode::MissingArguments,
        }
    }
}

/// Usage prefixed with the parent commands that led to `name`.
fn full_usage(path_used: &[String], name: &str, command: &Command) -> String {
    let parents = &path_used[..path_used.len().saturating_sub(1)];
    let usage = command.usage(name);
    parents
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(usage.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run(
    resolver: &Resolver,
    format: OutputFormat,
    args: ResolveArgs,
) -> anyhow::Result<ExitCode> {
    let resolve_arguments = !args.no_args;

    if !args.stdin {
        let input = args.input.join(" ");
        let report = resolve_line(resolver, &input, resolve_arguments)?;
        output::print_output(format, &report, format_human)?;
        return Ok(report.exit_code());
    }

    resolve_lines(resolver, io::stdin().lock(), resolve_arguments, |outcome| match outcome {
        Ok(report) => output::print_output(format, report, format_human),
        Err(error) => {
            output::print_anyhow_error(format, error);
            Ok(())
        }
    })
}

/// Resolve each non-blank line of `reader`. A line that fails to resolve is
/// reported through `emit` and folded into the exit code; later lines still run.
fn resolve_lines<R, F>(
    resolver: &Resolver,
    reader: R,
    resolve_arguments: bool,
    mut emit: F,
) -> anyhow::Result<ExitCode>
where
    R: BufRead,
    F: FnMut(&anyhow::Result<ResolutionReport>) -> io::Result<()>,
{
    let mut exit_code = ExitCode::Success;
    for line in reader.lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = resolve_line(resolver, &line, resolve_arguments);
        emit(&outcome)?;
        let code = match &outcome {
            Ok(report) => report.exit_code(),
            Err(error) => ExitCode::from_error(error),
        };
        exit_code = exit_code.combine(code);
    }
    Ok(exit_code)
}

pub fn resolve_line(
    resolver: &Resolver,
    input: &str,
    resolve_arguments: bool,
) -> anyhow::Result<ResolutionReport> {
    let tokens = tokenize(input, &resolver.options().quotes);
    let result = resolver
        .resolve(&tokens, resolve_arguments)
        .with_context(|| format!("failed to resolve `{input}`"))?;
    Ok(ResolutionReport::from_result(&result))
}

fn format_human(report: &ResolutionReport) -> String {
    match report {
        ResolutionReport::Success { command, usage, arguments, path_dangling, .. } => {
            let mut lines = vec![format!("{command}: {usage}")];
            for (name, value) in arguments.iter() {
                lines.push(format!("  {name} = {}", value.unwrap_or("<none>")));
            }
            if !path_dangling.is_empty() {
                lines.push(format!("  dangling: {}", path_dangling.join(" ")));
            }
            lines.join("\n")
        }
        ResolutionReport::NotFound { missing, similar, .. } => {
            if similar.is_empty() {
                format!("unknown command `{missing}`")
            } else {
                format!("unknown command `{missing}`, did you mean: {}?", similar.join(", "))
            }
        }
        ResolutionReport::MissingArguments { command, usage, missing, .. } => {
            format!("`{command}` is missing: {}\n  usage: {usage}", missing.join(", "))
        }
    }
}
