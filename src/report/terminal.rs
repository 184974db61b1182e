use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::report::{Outcome, Status};

/// Render a colored terminal summary of the run.
pub fn render(outcomes: &[Outcome], destdir: &Path, quiet: bool) {
    let written = count(outcomes, Status::Written);
    let skipped = count(outcomes, Status::Skipped);
    let failed = count(outcomes, Status::Failed);

    if quiet {
        println!(
            "Total: {}  Written: {}  Skipped: {}  Failed: {}",
            outcomes.len(),
            written.to_string().green(),
            skipped.to_string().yellow(),
            failed.to_string().red(),
        );
        return;
    }

    println!("\n {} v{}", "rpkgbuild".bold(), env!("CARGO_PKG_VERSION"));
    println!(" Output: {}\n", destdir.display());

    if !outcomes.is_empty() {
        println!("{}", table(outcomes));
    }

    println!(
        "\n {} written   {} skipped   {} failed\n",
        written.to_string().green().bold(),
        skipped.to_string().yellow().bold(),
        failed.to_string().red().bold(),
    );

    for outcome in outcomes.iter().filter(|o| o.status == Status::Failed) {
        println!(
            " {} {}: {}",
            "[ERROR]".red().bold(),
            outcome.package,
            outcome.detail.as_deref().unwrap_or("unknown error")
        );
    }
}

fn table(outcomes: &[Outcome]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("Repository").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Native").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for outcome in outcomes {
        let (status, color) = match outcome.status {
            Status::Written => ("✓ written", Color::Green),
            Status::Skipped => ("⤼ skipped", Color::Yellow),
            Status::Failed => ("✗ failed", Color::Red),
        };

        table.add_row(vec![
            Cell::new(&outcome.package),
            Cell::new(outcome.version.as_deref().unwrap_or("-")),
            Cell::new(outcome.repository.as_deref().unwrap_or("-")),
            Cell::new(outcome.license.as_deref().unwrap_or("-")),
            Cell::new(if outcome.native { "yes" } else { "" }).set_alignment(CellAlignment::Center),
            Cell::new(status)
                .fg(color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    table
}

fn count(outcomes: &[Outcome], status: Status) -> usize {
    outcomes.iter().filter(|o| o.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_outcome() {
        let outcomes = vec![
            Outcome {
                package: "rlang".into(),
                version: Some("1.1.0".into()),
                repository: Some("CRAN".into()),
                license: Some("MIT".into()),
                native: true,
                status: Status::Written,
                detail: None,
            },
            Outcome::failed("absent", "absent not found in Bioconductor".into()),
        ];
        let rendered = table(&outcomes).to_string();
        assert!(rendered.contains("rlang"));
        assert!(rendered.contains("1.1.0"));
        assert!(rendered.contains("absent"));
        assert_eq!(count(&outcomes, Status::Failed), 1);
        assert_eq!(count(&outcomes, Status::Skipped), 0);
    }
}
