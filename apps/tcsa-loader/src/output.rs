//! Console rendering of an analysis run.
//!
//! Supports `human` (default) and `json` outputs. The JSON form lists the
//! static-analysis errors and a summary with the exit code.

use crate::config::OutputMode;
use crate::models::{BuildError, ErrorLevel};
use crate::report::ErrorReport;
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: OutputMode) -> bool {
    output != OutputMode::Json && utils::colors_enabled()
}

fn level_tag(level: ErrorLevel, color: bool) -> String {
    let tag = format!("⟦{}⟧", level.as_str().to_ascii_lowercase());
    if !color {
        return tag;
    }
    match level {
        ErrorLevel::High => tag.red().bold().to_string(),
        ErrorLevel::Medium => tag.yellow().bold().to_string(),
        ErrorLevel::Low => tag.blue().bold().to_string(),
    }
}

fn level_icon(level: ErrorLevel, color: bool) -> String {
    let icon = match level {
        ErrorLevel::High => "✖",
        ErrorLevel::Medium => "▲",
        ErrorLevel::Low => "◆",
    };
    if !color {
        return icon.to_string();
    }
    match level {
        ErrorLevel::High => icon.red().to_string(),
        ErrorLevel::Medium => icon.yellow().to_string(),
        ErrorLevel::Low => icon.blue().to_string(),
    }
}

fn format_error(e: &BuildError, color: bool) -> String {
    let place = format!("{}:{}", e.location.file_name, e.location.line);
    let place = if color {
        place.bold().to_string()
    } else {
        place
    };
    format!(
        "{} {} {} ❲{}❳ — {}",
        level_icon(e.error_level, color),
        level_tag(e.error_level, color),
        place,
        e.code,
        e.description
    )
}

/// Print the run result in the requested format.
pub fn print_analysis(report: &ErrorReport, output: OutputMode, exit_code: i32) {
    match output {
        OutputMode::Json => match serde_json::to_string_pretty(&compose_analysis_json(report, exit_code)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", utils::error_prefix(), e),
        },
        OutputMode::Human => {
            let color = use_colors(output);
            for e in report.static_analyzer_errors() {
                println!("{}", format_error(e, color));
            }
            let summary = format!(
                "— Summary — solution={} project={} static_analysis={} other={}",
                report.solution_name(),
                report.project_name(),
                report.static_analyzer_errors().len(),
                report.other_errors().len()
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose the JSON console output (pure) for testing purposes.
pub fn compose_analysis_json(report: &ErrorReport, exit_code: i32) -> JsonVal {
    let items: Vec<_> = report
        .static_analyzer_errors()
        .iter()
        .map(|e| {
            json!({
                "level": e.error_level.as_str(),
                "code": e.code,
                "description": e.description,
                "project": e.location.project,
                "file": e.location.file_name,
                "line": e.location.line,
                "column": e.location.column,
            })
        })
        .collect();
    let count = |lvl: ErrorLevel| {
        report
            .static_analyzer_errors()
            .iter()
            .filter(|e| e.error_level == lvl)
            .count()
    };
    let summary = json!({
        "solution": report.solution_name(),
        "project": report.project_name(),
        "high": count(ErrorLevel::High),
        "medium": count(ErrorLevel::Medium),
        "other": report.other_errors().len(),
        "exit_code": exit_code,
    });
    json!({"static_analysis": items, "summary": summary})
}
