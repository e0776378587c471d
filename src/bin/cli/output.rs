//! Report rendering for the docoracle binary.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use docoracle_rs::{AnalysisReport, EquivalenceMatch, UnresolvedReason};

use crate::cli::args::OutputFormat;

const SENTENCE_WIDTH: usize = 60;

#[derive(Tabled)]
struct MatchRow {
    member: String,
    sentence: String,
    reference: String,
    oracle: String,
}

/// Render a full analysis report in the requested format
pub fn render_report(
    report: &AnalysisReport,
    format: OutputFormat,
    colored: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        OutputFormat::Table => {
            // Only sentences that declare an equivalence are worth a row
            let rows: Vec<MatchRow> = report
                .members
                .iter()
                .flat_map(|member| {
                    member
                        .matches
                        .iter()
                        .filter(|m| m.is_detected())
                        .map(move |m| match_row(&member.signature, m, colored))
                })
                .collect();

            let mut out = String::new();
            if rows.is_empty() {
                out.push_str("No equivalences found.\n");
            } else {
                let mut table = Table::new(rows);
                table.with(TableStyle::rounded());
                out.push_str(&table.to_string());
                out.push('\n');
            }

            for member in report.members.iter().filter(|m| m.error.is_some()) {
                let error = member.error.as_deref().unwrap_or_default();
                let line = format!("failed {}: {}", member.signature, error);
                if colored {
                    out.push_str(&line.red().to_string());
                } else {
                    out.push_str(&line);
                }
                out.push('\n');
            }

            let summary = &report.summary;
            let line = format!(
                "{} members, {} sentences, {} equivalences, {} oracles ({:.1}% resolved), {} failed",
                summary.members,
                summary.sentences,
                summary.detected,
                summary.resolved,
                summary.resolution_rate() * 100.0,
                summary.failed_members,
            );
            if colored {
                out.push_str(&line.dimmed().to_string());
            } else {
                out.push_str(&line);
            }
            out.push('\n');
            Ok(out)
        }
    }
}

/// Render one member's translation
pub fn render_matches(
    signature: &str,
    matches: &[EquivalenceMatch],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(matches)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(matches)?),
        OutputFormat::Table => {
            if matches.is_empty() {
                return Ok(format!("{} has no comment to translate\n", signature));
            }
            let rows: Vec<MatchRow> = matches
                .iter()
                .map(|m| match_row(signature, m, true))
                .collect();
            let mut table = Table::new(rows);
            table.with(TableStyle::rounded());
            Ok(format!("{}\n", table))
        }
    }
}

/// Write rendered output to a file, or stdout when no path is given
pub fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn match_row(signature: &str, m: &EquivalenceMatch, colored: bool) -> MatchRow {
    let oracle = match m.oracle() {
        Some(oracle) if colored => oracle.bright_green().to_string(),
        Some(oracle) => oracle.to_string(),
        None => {
            let reason = m.unresolved_reason().map(reason_label).unwrap_or("-");
            if colored {
                reason.yellow().to_string()
            } else {
                reason.to_string()
            }
        }
    };

    MatchRow {
        member: signature.to_string(),
        sentence: truncate(m.sentence(), SENTENCE_WIDTH),
        reference: m.method_signature().to_string(),
        oracle,
    }
}

fn reason_label(reason: &UnresolvedReason) -> &'static str {
    match reason {
        UnresolvedReason::NoEquivalence => "no equivalence",
        UnresolvedReason::NoGuard => "no guard clause",
        UnresolvedReason::EmptyGuardTranslation => "guard not translated",
        UnresolvedReason::NoSubjectMatch => "no matching member",
        UnresolvedReason::NoCompatibleOverload => "no compatible overload",
        UnresolvedReason::StructurallyInvalid(_) => "ill-typed oracle",
        UnresolvedReason::ValidationRejected => "rejected by validator",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docoracle_rs::model::equivalence::MethodReference;

    #[test]
    fn long_sentences_are_truncated() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn unresolved_rows_show_the_reason() {
        let m = EquivalenceMatch::detected(
            "Same as frobnicate()",
            MethodReference::new("frobnicate", vec![]),
            false,
            false,
        )
        .unresolved(UnresolvedReason::NoSubjectMatch);
        let row = match_row("A#b()", &m, false);
        assert_eq!(row.oracle, "no matching member");
        assert_eq!(row.reference, "frobnicate()");
    }
}
