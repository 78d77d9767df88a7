use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use ttn_codec::{deserialize, serialize};
use ttn_diff::{diff_trees, TreeChange};
use ttn_merge::{merge, Assignment, ConflictReport, MergeError, Resolution};
use ttn_tree::{KeyPath, TranslationNode};

use crate::cli::*;
use crate::store;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Check(args) => cmd_check(args, cli.format),
        Command::Fmt(args) => cmd_fmt(args),
        Command::Set(args) => cmd_set(args, cli.format),
        Command::Apply(args) => cmd_apply(args, cli.format),
        Command::Diff(args) => cmd_diff(args, cli.format),
    }
}

fn load_tree(path: &Path) -> anyhow::Result<TranslationNode> {
    let text = store::load(path)?;
    deserialize(&text).with_context(|| format!("parsing {}", path.display()))
}

fn cmd_check(args: CheckArgs, format: OutputFormat) -> anyhow::Result<()> {
    let tree = load_tree(&args.file)?;
    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "file": args.file.display().to_string(),
                "leaves": tree.leaf_count(),
            });
            println!("{summary}");
        }
        OutputFormat::Text => {
            println!(
                "{} {}: {} translation(s), no ambiguity",
                "✓".green().bold(),
                args.file.display(),
                tree.leaf_count()
            );
        }
    }
    Ok(())
}

fn cmd_fmt(args: FmtArgs) -> anyhow::Result<()> {
    let tree = load_tree(&args.file)?;
    let text = serialize(&tree);
    if args.write {
        store::save(&args.file, &text)?;
        println!("{} formatted {}", "✓".green().bold(), args.file.display());
    } else {
        print!("{text}");
    }
    Ok(())
}

/// Parse a `key.path=value` argument into a leaf assignment.
fn parse_assignment(text: &str) -> anyhow::Result<Assignment> {
    let Some((key, value)) = text.split_once('=') else {
        bail!("assignment `{text}` is missing `=`");
    };
    let path = KeyPath::parse(key).with_context(|| format!("in assignment `{text}`"))?;
    Ok(Assignment::leaf(path, value))
}

fn cmd_set(args: SetArgs, format: OutputFormat) -> anyhow::Result<()> {
    let tree = load_tree(&args.file)?;
    let assignments = args
        .assignments
        .iter()
        .map(|a| parse_assignment(a))
        .collect::<anyhow::Result<Vec<_>>>()?;
    apply_and_emit(&args.file, &tree, &assignments, args.policy, args.write, format)
}

/// Turn a patch document's top-level entries into assignments.
fn patch_assignments(patch: &TranslationNode) -> Vec<Assignment> {
    match patch {
        TranslationNode::Branch(children) => children
            .iter()
            .filter_map(|(key, value)| {
                // Branch keys are single valid segments by construction.
                KeyPath::from_segments([key.as_str()])
                    .ok()
                    .map(|path| Assignment::new(path, value.clone()))
            })
            .collect(),
        TranslationNode::Leaf(_) => Vec::new(),
    }
}

fn cmd_apply(args: ApplyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let tree = load_tree(&args.file)?;
    let patch = load_tree(&args.patch)?;
    let assignments = patch_assignments(&patch);
    apply_and_emit(&args.file, &tree, &assignments, args.policy, args.write, format)
}

fn apply_and_emit(
    file: &Path,
    tree: &TranslationNode,
    assignments: &[Assignment],
    policy: PolicyArg,
    write: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let (merged, report) = match merge(tree, assignments, policy.into()) {
        Ok(result) => result,
        Err(err @ MergeError::Conflict(_)) => {
            emit_report(err.report(), format);
            // Atomic: the document on disk is untouched.
            return Err(err.into());
        }
    };
    emit_report(&report, format);

    let text = serialize(&merged);
    if write {
        store::save(file, &text)?;
        println!(
            "{} {}: {} assignment(s) merged, {} conflict(s)",
            "✓".green().bold(),
            file.display(),
            assignments.len(),
            report.len()
        );
    } else {
        print!("{text}");
    }
    Ok(())
}

// The report goes to stderr so a non-`--write` run still pipes a clean
// document through stdout.
fn emit_report(report: &ConflictReport, format: OutputFormat) {
    if report.is_empty() {
        return;
    }
    match format {
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::to_string_pretty(report).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            eprintln!("{} conflict(s):", report.len());
            for entry in &report.entries {
                let marker = match entry.resolution {
                    Resolution::Rejected => "✗".red().bold(),
                    Resolution::OverwroteWithBranch | Resolution::OverwroteWithLeaf => {
                        "~".yellow()
                    }
                    Resolution::KeptExisting => "=".blue(),
                };
                eprintln!("  {marker} {entry}");
            }
        }
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let old = load_tree(&args.old)?;
    let new = load_tree(&args.new)?;
    let mut diff = diff_trees(&old, &new);
    if args.missing_only {
        diff.changes.retain(|c| {
            matches!(c, TreeChange::Added { .. } | TreeChange::Removed { .. })
        });
    }

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&diff).unwrap_or_default()
            );
        }
        OutputFormat::Text => {
            for change in &diff.changes {
                match change {
                    TreeChange::Added { path, .. } => {
                        println!("{} {}", "+".green(), path)
                    }
                    TreeChange::Removed { path, .. } => {
                        println!("{} {}", "-".red(), path)
                    }
                    TreeChange::Modified { path, old, new } => {
                        println!("{} {}: {} -> {}", "~".yellow(), path, old, new)
                    }
                    TreeChange::KindChanged {
                        path,
                        old_kind,
                        new_kind,
                    } => println!(
                        "{} {}: {} vs {}",
                        "!".magenta().bold(),
                        path,
                        old_kind,
                        new_kind
                    ),
                }
            }
            println!(
                "{} added, {} removed, {} changed, {} kind mismatch(es)",
                diff.additions(),
                diff.removals(),
                diff.modifications(),
                diff.kind_changes()
            );
        }
    }
    Ok(())
}
