mod csv;
mod html;
mod json;
mod markdown;
mod text;

pub use csv::generate_csv_report;
pub use html::generate_html_report;
pub use json::{generate_json_report, generate_json_summary, JsonSummary};
pub use markdown::generate_markdown_report;
pub use text::generate_text_report;

use crate::error::Result;
use crate::types::{ScheduleRequest, ScheduleResponse};
use std::fs;
use std::path::Path;

/// Output format for reports (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
    Csv,
    Html,
}

impl OutputFormat {
    pub fn parse_list(s: &str) -> Vec<OutputFormat> {
        if s.eq_ignore_ascii_case("all") {
            return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text, OutputFormat::Csv, OutputFormat::Html];
        }
        s.split(',')
            .filter_map(|part| match part.trim().to_ascii_lowercase().as_str() {
                "json" => Some(OutputFormat::Json),
                "markdown" | "md" => Some(OutputFormat::Markdown),
                "text" | "txt" => Some(OutputFormat::Text),
                "csv" => Some(OutputFormat::Csv),
                "html" => Some(OutputFormat::Html),
                _ => None,
            })
            .collect()
    }
}

/// Render every requested format and write each to `output_dir`.
pub fn generate_reports(
    request: &ScheduleRequest,
    response: &ScheduleResponse,
    output_dir: &Path,
    formats: &[OutputFormat],
    generated_at: &str,
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(request, response, generated_at)?;
                fs::write(output_dir.join("schedule.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(request, response);
                fs::write(output_dir.join("schedule.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(request, response);
                fs::write(output_dir.join("schedule.txt"), txt)?;
            }
            OutputFormat::Csv => {
                let csv = generate_csv_report(request, response)?;
                fs::write(output_dir.join("schedule.csv"), csv)?;
            }
            OutputFormat::Html => {
                let html = generate_html_report(request, response);
                fs::write(output_dir.join("schedule.html"), html)?;
            }
        }
    }

    Ok(())
}
