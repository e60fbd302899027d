//! Top-level CLI definition and dispatch.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::classifier::{ExplainLevel, classify_with_trace};
use crate::cli::interactive;
use crate::cli::report::{
    ClassifyPayload, DescribePayload, FlowPayload, TablePayload, format_classify_report, to_json,
};
use crate::core::errors::{Result, TdcError};
use crate::core::profile::{Observation, ProfileBuilder, UsageProfile, parse_answer};
use crate::taxonomy::{Category, describe, render};

/// Test-double classifier: names the double a test actually uses, with the
/// reasoning and the reference content behind the verdict.
#[derive(Debug, Parser)]
#[command(name = "tdc", version, about)]
pub struct Cli {
    /// Emit a machine-readable JSON payload instead of the human rendering.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify a test double from the five usage observations.
    Classify(ClassifyArgs),
    /// Describe one category from the reference table.
    Describe {
        /// Category name (dummy, stub, fake, spy, mock), case-insensitive.
        category: String,
    },
    /// Print the full reference comparison table.
    Table,
    /// Print the decision flow the classifier follows.
    Flow,
    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `tdc classify`.
///
/// Each observation can be answered with its flag; anything left
/// unanswered is read from stdin (with question prompts when stdin is a
/// terminal). Alternatively `--profile` supplies a complete profile as
/// JSON and the flags do not apply.
#[derive(Debug, clap::Args)]
pub struct ClassifyArgs {
    /// Read a complete profile as JSON from a file, or from stdin with `-`.
    #[arg(long, value_name = "PATH", conflicts_with_all = [
        "passed_but_unused",
        "configured_returns",
        "simplified_implementation",
        "tracks_invocations",
        "preset_expectations",
    ])]
    pub profile: Option<PathBuf>,

    /// Is the double only passed along, with no call on it mattering? (yes/no)
    #[arg(long, value_name = "YES|NO")]
    pub passed_but_unused: Option<String>,

    /// Was the double programmed with canned return values? (yes/no)
    #[arg(long, value_name = "YES|NO")]
    pub configured_returns: Option<String>,

    /// Does the double re-implement the real logic in simplified form? (yes/no)
    #[arg(long, value_name = "YES|NO")]
    pub simplified_implementation: Option<String>,

    /// Does the test assert afterwards on the calls received? (yes/no)
    #[arg(long, value_name = "YES|NO")]
    pub tracks_invocations: Option<String>,

    /// Were preset expectations verified as a unit at the end? (yes/no)
    #[arg(long, value_name = "YES|NO")]
    pub preset_expectations: Option<String>,

    /// Explain level for the verdict: l0 (verdict only) through l3 (full
    /// rule walk plus reference entry).
    #[arg(long, value_enum, default_value = "l1")]
    pub explain: ExplainLevel,
}

impl ClassifyArgs {
    /// The raw flag token answering an observation, if one was given.
    fn flag_answer(&self, observation: Observation) -> Option<&str> {
        let token = match observation {
            Observation::PassedButUnused => &self.passed_but_unused,
            Observation::ConfiguredReturns => &self.configured_returns,
            Observation::SimplifiedRealImplementation => &self.simplified_implementation,
            Observation::TracksInvocations => &self.tracks_invocations,
            Observation::PresetExpectationsVerifiedAtEnd => &self.preset_expectations,
        };
        token.as_deref()
    }
}

/// Dispatch CLI commands.
///
/// # Errors
/// Returns boundary errors (invalid answer tokens, incomplete or malformed
/// profiles, unknown category names) and IO failures. Classification
/// itself cannot fail: every complete profile produces a verdict.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Classify(args) => run_classify(args, cli.json),
        Command::Describe { category } => run_describe(category, cli.json),
        Command::Table => {
            if cli.json {
                println!("{}", to_json(&TablePayload::new()));
            } else {
                print!("{}", render::format_reference_table());
            }
            Ok(())
        }
        Command::Flow => {
            if cli.json {
                println!("{}", to_json(&FlowPayload::new()));
            } else {
                print!("{}", render::format_decision_flow());
            }
            Ok(())
        }
        Command::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(*shell, &mut command, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

fn run_classify(args: &ClassifyArgs, json: bool) -> Result<()> {
    let profile = resolve_profile(args)?;
    let record = classify_with_trace(&profile);

    if json {
        println!("{}", to_json(&ClassifyPayload::new(record)));
    } else {
        print!("{}", format_classify_report(&record, args.explain));
    }
    Ok(())
}

fn run_describe(name: &str, json: bool) -> Result<()> {
    let category = Category::from_name(name)?;
    if json {
        println!("{}", to_json(&DescribePayload::new(category)));
    } else {
        print!("{}", render::format_entry(describe(category)));
    }
    Ok(())
}

/// Assemble the profile from `--profile`, or from flags plus the answer
/// stream. All completeness and vocabulary checks happen here, before the
/// classifier ever sees the profile.
fn resolve_profile(args: &ClassifyArgs) -> Result<UsageProfile> {
    if let Some(path) = &args.profile {
        return load_profile(path);
    }

    let mut builder = ProfileBuilder::new();
    for observation in Observation::ALL {
        if let Some(token) = args.flag_answer(*observation) {
            builder.answer(*observation, parse_answer(token)?);
        }
    }
    interactive::complete_from_stdin(builder)
}

fn load_profile(path: &Path) -> Result<UsageProfile> {
    let raw = if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|source| TdcError::io("<stdin>", source))?;
        raw
    } else {
        std::fs::read_to_string(path).map_err(|source| TdcError::io(path, source))?
    };
    UsageProfile::from_json(&raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
