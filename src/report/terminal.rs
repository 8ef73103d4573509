use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::analyzer::LOW_CONFIDENCE_THRESHOLD;
use crate::license::classifier::{classify, normalize};
use crate::models::{AnalysisResult, EnrichedDependency, LicenseCategory, PackageManager, RiskLevel};

/// Render a colored terminal report.
pub fn render(
    deps: &[EnrichedDependency],
    analysis: &AnalysisResult,
    path: &Path,
    package_manager: PackageManager,
    verbose: bool,
    quiet: bool,
) {
    if quiet {
        println!(
            "Total: {}  Risk: {}  Conflicts: {}",
            deps.len(),
            colored_risk(analysis.risk_level),
            analysis.conflicts.len(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "license-scanner".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {} ({})\n", path.display(), package_manager);

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Total dependencies : {}", deps.len())
    );
    println!(
        " │  {:<48} │",
        format!("Risk level         : {}", colored_risk(analysis.risk_level))
    );
    println!(
        " │  {:<48} │",
        format!("Top licenses       : {}", summarize_licenses(analysis))
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if !analysis.conflicts.is_empty() {
        println!(" {} License conflicts:\n", "[CONFLICT]".red().bold());
        for conflict in &analysis.conflicts {
            println!("   {} {}", "✗".red(), conflict);
        }
        println!();
    }

    println!(" {} Recommendations:\n", "[ADVICE]".cyan().bold());
    for rec in &analysis.recommendations {
        println!("   {}", rec);
    }
    println!();

    let rows: Vec<&EnrichedDependency> = if verbose {
        deps.iter().collect()
    } else {
        deps.iter().filter(|d| needs_attention(d)).collect()
    };

    if rows.is_empty() {
        return;
    }

    if verbose {
        println!(" {} All dependencies:\n", "[DEPS]".bold());
    } else {
        println!(
            " {} Dependencies requiring attention:\n",
            "[WARN]".yellow().bold()
        );
    }
    render_table(&rows);
    println!();
}

/// Non-permissive, or detected with low confidence.
pub fn needs_attention(dep: &EnrichedDependency) -> bool {
    classify(&normalize(&dep.license)) != LicenseCategory::Permissive
        || dep.confidence < LOW_CONFIDENCE_THRESHOLD
}

fn colored_risk(risk: RiskLevel) -> ColoredString {
    let label = risk.to_string().to_uppercase();
    match risk {
        RiskLevel::Low => label.green().bold(),
        RiskLevel::Medium => label.yellow().bold(),
        RiskLevel::High => label.red().bold(),
    }
}

fn render_table(deps: &[&EnrichedDependency]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Name").add_attribute(Attribute::Bold),
            Cell::new("Version").add_attribute(Attribute::Bold),
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Confidence").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

    for dep in deps {
        let license = normalize(&dep.license);
        let category = classify(&license);

        let category_color = match category {
            LicenseCategory::Permissive => Color::Green,
            LicenseCategory::WeakCopyleft => Color::Yellow,
            LicenseCategory::StrongCopyleft => Color::Red,
            LicenseCategory::Proprietary => Color::Magenta,
            LicenseCategory::Unknown => Color::DarkGrey,
        };

        let confidence_color = if dep.confidence < LOW_CONFIDENCE_THRESHOLD {
            Color::Yellow
        } else {
            Color::Reset
        };

        table.add_row(vec![
            Cell::new(&dep.name),
            Cell::new(&dep.version),
            Cell::new(&license),
            Cell::new(category.to_string()).fg(category_color),
            Cell::new(format!("{:.1}", dep.confidence))
                .fg(confidence_color)
                .set_alignment(CellAlignment::Right),
            Cell::new(dep.source.to_string()),
        ]);
    }

    println!("{}", table);
}

/// Three most common licenses, most frequent first.
fn summarize_licenses(analysis: &AnalysisResult) -> String {
    let mut pairs: Vec<(&String, &usize)> = analysis.license_counts.iter().collect();
    // stable sort keeps ties in alphabetical order
    pairs.sort_by(|a, b| b.1.cmp(a.1));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(lic, cnt)| format!("{} ({})", lic, cnt))
        .collect();

    if summary.is_empty() {
        "none".to_string()
    } else {
        summary.join(", ")
    }
}
