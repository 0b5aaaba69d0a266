//! Human-readable rendering of reports, anomaly summaries and endpoint lists.

use std::io::{self, Write};

use specdrift_core::config::SummaryConfig;
use specdrift_core::model::{AnomalySummary, DecisionType, DriftReport};
use termcolor::{Color, ColorSpec, WriteColor};

fn colored<W: WriteColor>(w: &mut W, color: Color, bold: bool, text: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
    write!(w, "{text}")?;
    w.reset()
}

fn heading<W: WriteColor>(w: &mut W, text: &str) -> io::Result<()> {
    w.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(w, "{text}")?;
    w.reset()
}

fn decision_color(d: DecisionType) -> Color {
    match d {
        DecisionType::UpdateSpec => Color::Yellow,
        DecisionType::ApiBug => Color::Red,
        DecisionType::NeedsReview => Color::Blue,
    }
}

/// Truncate to `max` characters, appending `...` when anything was cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

/// Left-aligned columns separated by two spaces.
pub fn table<W: Write>(w: &mut W, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &width)| format!("{c:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(w, "{}", line(header.to_vec()))?;
    writeln!(
        w,
        "{}",
        widths.iter().map(|n| "-".repeat(*n)).collect::<Vec<_>>().join("  ")
    )?;
    for row in rows {
        writeln!(w, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

pub fn anomalies<W: WriteColor>(
    w: &mut W,
    summary: &AnomalySummary,
    cfg: &SummaryConfig,
) -> io::Result<()> {
    heading(w, &format!("Anomalies ({})", summary.total_count))?;
    let rows: Vec<Vec<String>> = summary
        .anomalies
        .iter()
        .take(cfg.max_rendered_anomalies)
        .map(|a| {
            vec![
                a.anomaly_type.to_string(),
                a.json_path.clone(),
                truncate(&a.message, cfg.max_message_len),
            ]
        })
        .collect();
    table(w, &["Type", "Path", "Message"], &rows)?;
    let hidden = summary.anomalies.len().saturating_sub(cfg.max_rendered_anomalies);
    if hidden > 0 {
        writeln!(w, "... and {hidden} more")?;
    }
    Ok(())
}

pub fn report<W: WriteColor>(w: &mut W, report: &DriftReport, cfg: &SummaryConfig) -> io::Result<()> {
    if !report.has_drift {
        colored(w, Color::Green, true, "No drift detected")?;
        writeln!(w)?;
        writeln!(w, "The API response matches the OpenAPI specification.")?;
        return Ok(());
    }

    if let Some(decision) = &report.llm_decision {
        heading(w, "Decision")?;
        colored(
            w,
            decision_color(decision.decision),
            true,
            decision.decision.as_str(),
        )?;
        writeln!(w)?;
        writeln!(w, "Confidence: {:.0}%", decision.confidence * 100.0)?;
        writeln!(
            w,
            "Auto-update recommended: {}",
            if report.auto_update_recommended { "Yes" } else { "No" }
        )?;

        if !decision.proposed_changes.is_empty() {
            writeln!(w)?;
            heading(w, "Proposed Changes")?;
            let rows: Vec<Vec<String>> = decision
                .proposed_changes
                .iter()
                .map(|c| {
                    vec![
                        c.change_type.to_string(),
                        c.json_path.clone(),
                        c.reason.clone(),
                        if c.backward_compatible { "yes" } else { "no" }.to_string(),
                    ]
                })
                .collect();
            table(w, &["Type", "Path", "Reason", "Compatible"], &rows)?;
        }

        if !decision.notes_for_humans.is_empty() {
            writeln!(w)?;
            heading(w, "Notes")?;
            for note in &decision.notes_for_humans {
                writeln!(w, "  - {note}")?;
            }
        }
    }

    if let Some(summary) = &report.anomaly_summary {
        writeln!(w)?;
        anomalies(w, summary, cfg)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use specdrift_core::diff::summarize;
    use specdrift_core::model::{Anomaly, AnomalyType};
    use termcolor::Buffer;

    fn text(buf: Buffer) -> String {
        String::from_utf8(buf.into_inner()).unwrap()
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate("short", 60), "short");
        assert_eq!(truncate(&"m".repeat(61), 60), format!("{}...", "m".repeat(60)));
    }

    #[test]
    fn anomaly_table_is_limited() {
        let list: Vec<Anomaly> = (0..12)
            .map(|i| {
                Anomaly::new(
                    AnomalyType::AdditionalField,
                    format!("$.f{i}"),
                    "Field not documented in schema",
                    "1",
                    format!("Undocumented field 'f{i}' found at $"),
                )
            })
            .collect();
        let summary = summarize(list, json!({}));
        let mut buf = Buffer::no_color();
        anomalies(&mut buf, &summary, &SummaryConfig::default()).unwrap();
        let out = text(buf);
        assert!(out.starts_with("Anomalies (12)\n"));
        assert!(out.contains("$.f9 "));
        assert!(!out.contains("$.f10"));
        assert!(out.contains("... and 2 more"));
    }

    #[test]
    fn clean_report() {
        let r = specdrift_core::decision::no_drift_report("GET /x", "a.yaml", "t");
        let mut buf = Buffer::no_color();
        report(&mut buf, &r, &SummaryConfig::default()).unwrap();
        assert!(text(buf).starts_with("No drift detected\n"));
    }
}
