use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ttn_merge::ConflictPolicy;

#[derive(Parser)]
#[command(
    name = "ttn",
    about = "Translation tree normalizer — one consistent store instead of four fix-up scripts",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a translation document (strict parse, ambiguity detection)
    Check(CheckArgs),
    /// Rewrite a document in canonical form
    Fmt(FmtArgs),
    /// Set one or more dotted keys in a document
    Set(SetArgs),
    /// Merge a patch document into a store
    Apply(ApplyArgs),
    /// Compare two translation documents
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Document to validate
    pub file: PathBuf,
}

#[derive(Args)]
pub struct FmtArgs {
    /// Document to canonicalize
    pub file: PathBuf,

    /// Save the result back to the file instead of printing it
    #[arg(long)]
    pub write: bool,
}

#[derive(Args)]
pub struct SetArgs {
    /// Document to modify
    pub file: PathBuf,

    /// Assignments of the form KEY.PATH=VALUE
    #[arg(required = true)]
    pub assignments: Vec<String>,

    /// Conflict policy for leaf-vs-branch disagreements
    #[arg(long, value_enum, default_value_t = PolicyArg::Reject)]
    pub policy: PolicyArg,

    /// Save the result back to the file instead of printing it
    #[arg(long)]
    pub write: bool,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Document to modify
    pub file: PathBuf,

    /// Patch document whose top-level entries are merged in
    #[arg(long)]
    pub patch: PathBuf,

    /// Conflict policy for leaf-vs-branch disagreements
    #[arg(long, value_enum, default_value_t = PolicyArg::Reject)]
    pub policy: PolicyArg,

    /// Save the result back to the file instead of printing it
    #[arg(long)]
    pub write: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    /// The old (reference) document
    pub old: PathBuf,
    /// The new document
    pub new: PathBuf,

    /// Only report keys present on one side
    #[arg(long)]
    pub missing_only: bool,
}

/// CLI spelling of the merge conflict policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyArg {
    /// Abort on any conflict, leaving the document untouched
    Reject,
    /// Replace conflicting leaves with branches
    OverwriteWithBranch,
    /// Replace conflicting branches with leaves
    OverwriteWithLeaf,
    /// Keep whatever already exists
    PreferExisting,
}

impl From<PolicyArg> for ConflictPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Reject => Self::Reject,
            PolicyArg::OverwriteWithBranch => Self::OverwriteWithBranch,
            PolicyArg::OverwriteWithLeaf => Self::OverwriteWithLeaf,
            PolicyArg::PreferExisting => Self::PreferExisting,
        }
    }
}
