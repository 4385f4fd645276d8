use super::RatedPackage;
use crate::Result;
use crate::engine::{MetricResult, NetScoreResult};
use crate::metrics::{MetricCategory, MetricDef};
use core::fmt::Write;
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

pub fn generate<W: Write>(packages: &[RatedPackage], use_colors: bool, writer: &mut W) -> Result<()> {
    for (index, package) in packages.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
            writeln!(writer, "═══════════════════════════════════════")?;
            writeln!(writer)?;
        }

        match &package.outcome {
            Ok(rating) => write_rating(&package.identifier, rating, use_colors, writer)?,
            Err(e) => {
                let status = "could not be rated";
                if use_colors {
                    writeln!(writer, "{} {}: {e}", package.identifier, status.red().bold())?;
                } else {
                    writeln!(writer, "{} {status}: {e}", package.identifier)?;
                }
            }
        }
    }

    Ok(())
}

fn write_rating<W: Write>(identifier: &str, rating: &NetScoreResult, use_colors: bool, writer: &mut W) -> Result<()> {
    let net_score = paint_score(rating.net_score, use_colors);
    writeln!(
        writer,
        "{identifier} is rated {net_score} ({:.3}s)",
        rating.latency.as_secs_f64()
    )?;

    let max_name_len = rating.metrics.iter().map(|m| m.name.as_str().len()).max().unwrap_or(0);

    for category in MetricCategory::iter() {
        let in_category: Vec<&MetricResult> = rating
            .metrics
            .iter()
            .filter(|m| MetricDef::find(m.name).is_some_and(|def| def.category == category))
            .collect();

        if in_category.is_empty() {
            continue;
        }

        writeln!(writer)?;
        if use_colors {
            writeln!(writer, "{}", category.to_string().bold())?;
        } else {
            writeln!(writer, "{category}")?;
        }

        for metric in in_category {
            write!(
                writer,
                "  {:<width$} : {} ({:.3}s)",
                metric.name.as_str(),
                paint_score(metric.score, use_colors),
                metric.latency.as_secs_f64(),
                width = max_name_len
            )?;

            if let Some(failure) = &metric.failure {
                let note = format!("{}: {}", failure.kind, failure.message);
                if use_colors {
                    write!(writer, "  {}", note.yellow())?;
                } else {
                    write!(writer, "  {note}")?;
                }
            }

            writeln!(writer)?;
        }
    }

    Ok(())
}

fn paint_score(score: f64, use_colors: bool) -> String {
    let text = format!("{score:.3}");
    if !use_colors {
        return text;
    }

    if score >= 0.7 {
        text.green().bold().to_string()
    } else if score >= 0.4 {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}
