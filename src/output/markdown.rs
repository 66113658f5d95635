//! Markdown report generation
//!
//! This module renders the background research findings as a
//! human-readable markdown document.

use crate::research::ResearchReport;
use crate::ScrapeError;
use std::fs;
use std::path::Path;

/// Writes the research report to `output_path`
///
/// # Arguments
///
/// * `report` - The collected research findings
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(ScrapeError)` - Failed to create directories or write the file
pub fn write_research_report(report: &ResearchReport, output_path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(output_path, format_research_report(report))?;
    Ok(())
}

/// Formats research findings as markdown
///
/// Each section carries an explicit note when its probe failed.
pub fn format_research_report(report: &ResearchReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Background Research: {}\n\n", report.host));
    md.push_str(&format!("- **Seed URL**: {}\n", report.seed_url));
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str("- **Checks**: robots.txt, technologies used, domain registration\n");
    md.push_str("- Sitemaps are not examined\n\n");

    // robots.txt
    md.push_str("## robots.txt\n\n");
    match &report.robots {
        Some(robots) => {
            md.push_str(&format!(
                "- **Seed path allowed for `{}`**: {}\n",
                report.user_agent,
                if robots.seed_allowed { "yes" } else { "no" }
            ));
            if let Some(delay) = robots.crawl_delay {
                md.push_str(&format!("- **Crawl-delay**: {} seconds\n", delay));
            }
            md.push_str("\n```text\n");
            md.push_str(robots.content.trim_end());
            md.push_str("\n```\n\n");
        }
        None => md.push_str("Could not retrieve robots.txt\n\n"),
    }

    // Technologies
    md.push_str("## Technologies Used\n\n");
    match &report.technologies {
        Some(tech) if !tech.is_empty() => {
            md.push_str("| Category | Technologies |\n");
            md.push_str("|----------|--------------|\n");
            for (category, names) in tech {
                md.push_str(&format!("| {} | {} |\n", category, names.join(", ")));
            }
            md.push('\n');
        }
        Some(_) => md.push_str("No technologies could be determined\n\n"),
        None => md.push_str("Could not retrieve information about the technologies used\n\n"),
    }

    // WHOIS
    md.push_str("## Domain Owner\n\n");
    match &report.whois {
        Some(whois) => {
            md.push_str(&format!("Registrable domain: `{}`\n\n", report.domain));
            md.push_str("```text\n");
            md.push_str(whois.trim_end());
            md.push_str("\n```\n");
        }
        None => md.push_str("Could not retrieve domain owner information\n"),
    }

    md
}
