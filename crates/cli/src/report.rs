use crate::pipeline::GenerationResult;
use console::style;
use resgen_core::{Outcome, RunSummary};

/// Rows of the summary table, in display order
pub fn summary_rows(summary: &RunSummary) -> [(&'static str, usize); 4] {
    [
        ("New Resources", summary.created),
        ("Skipped Resources", summary.skipped),
        ("Overwritten Resources", summary.overwritten),
        ("Total Resources", summary.total),
    ]
}

/// Plain-text `Type | Count` table
pub fn render_table(summary: &RunSummary) -> String {
    let rows = summary_rows(summary);
    let counts: Vec<String> = rows.iter().map(|(_, count)| count.to_string()).collect();

    let type_width = rows
        .iter()
        .map(|(label, _)| label.len())
        .chain(std::iter::once("Type".len()))
        .max()
        .unwrap_or(0);
    let count_width = counts
        .iter()
        .map(String::len)
        .chain(std::iter::once("Count".len()))
        .max()
        .unwrap_or(0);

    let border = format!("+-{}-+-{}-+", "-".repeat(type_width), "-".repeat(count_width));
    let mut lines = vec![
        border.clone(),
        format!("| {:<type_width$} | {:<count_width$} |", "Type", "Count"),
        border.clone(),
    ];
    for ((label, _), count) in rows.iter().zip(&counts) {
        lines.push(format!("| {:<type_width$} | {:<count_width$} |", label, count));
    }
    lines.push(border);

    lines.join("\n")
}

pub fn print_progress(result: &GenerationResult) {
    match result.outcome {
        Outcome::Created | Outcome::Overwritten => {
            println!("{}", style(format!("Generated resource for model: {}", result.model)).green());
        }
        Outcome::Skipped => {
            println!("{}", style(format!("Existing resource for model: {}", result.model)).yellow());
        }
    }
}

/// Errors and warnings first, then the counts table
pub fn print_summary(summary: &RunSummary) {
    for warning in &summary.warnings {
        println!("{}", style(warning).yellow());
    }
    for error in &summary.errors {
        eprintln!("{}", style(error).red());
    }

    println!("................");
    println!("{}", render_table(summary));

    if summary.failed > 0 {
        println!(
            "{}",
            style(format!("{} model(s) could not be processed", summary.failed)).red()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table() {
        let summary = RunSummary {
            created: 2,
            overwritten: 0,
            skipped: 1,
            failed: 1,
            total: 4,
            ..RunSummary::default()
        };

        let expected = "\
+-----------------------+-------+
| Type                  | Count |
+-----------------------+-------+
| New Resources         | 2     |
| Skipped Resources     | 1     |
| Overwritten Resources | 0     |
| Total Resources       | 4     |
+-----------------------+-------+";
        assert_eq!(render_table(&summary), expected);
    }

    #[test]
    fn test_summary_rows_order() {
        let summary = RunSummary::new(7);
        let labels: Vec<_> = summary_rows(&summary).iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec!["New Resources", "Skipped Resources", "Overwritten Resources", "Total Resources"]
        );
    }
}
