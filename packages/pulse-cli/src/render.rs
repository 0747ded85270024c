//! Terminal rendering for analysis results.

use analysis::{Finding, Priority, PriorityCounts, ResultsView};
use colored::Colorize;

/// Print the run summary, global counts, and the filtered findings.
pub fn print_results(view: &ResultsView) {
    let Some(run) = view.run() else {
        println!("{}", "No analysis has been run yet.".dimmed());
        return;
    };

    println!("{}", run.summary.bold());
    println!(
        "{} pages scanned in {}\n",
        run.total_pages.to_string().bold(),
        run.completion_time
    );

    print_counts(&view.priority_counts());

    let visible = view.visible_findings();
    if visible.is_empty() {
        println!("{}", "No findings match the active filters.".dimmed());
        return;
    }

    for finding in visible {
        print_finding(finding);
    }
}

fn print_counts(counts: &PriorityCounts) {
    println!(
        "{}  {}  {}\n",
        format!("high: {}", counts.high).red(),
        format!("medium: {}", counts.medium).yellow(),
        format!("low: {}", counts.low).green(),
    );
}

fn print_finding(finding: &Finding) {
    let priority = match finding.priority {
        Priority::High => finding.priority.as_str().red().bold(),
        Priority::Medium => finding.priority.as_str().yellow().bold(),
        Priority::Low => finding.priority.as_str().green().bold(),
    };

    println!(
        "[{priority}] {} {}",
        finding.page_title.bold(),
        finding.page_url.dimmed()
    );
    println!("  {}", finding.suggestion);
    println!(
        "  {} · {} effort · {}",
        finding.category.cyan(),
        finding.effort,
        finding.impact
    );
    if let Some(improvement) = &finding.estimated_improvement {
        println!("  estimated improvement: {}", improvement.green());
    }
    println!();
}
