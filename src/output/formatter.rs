//! Output formatters: console, JSON, and Markdown renderings of an analysis report

use crate::config::OutputFormat;
use crate::error::{Result, ScreenerError};
use crate::output::report::AnalysisReport;
use crate::processing::analyzer::MatchVerdict;
use crate::processing::skills::SkillSet;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    show_preview: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter; always carries the run metadata header
pub struct MarkdownFormatter {
    show_preview: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

const PROGRESS_WIDTH: usize = 30;

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_preview: bool) -> Self {
        Self { use_colors, show_preview }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn verdict_color(verdict: MatchVerdict) -> Color {
        match verdict {
            MatchVerdict::Excellent => Color::Green,
            MatchVerdict::Good => Color::Yellow,
            MatchVerdict::Low => Color::Red,
        }
    }

    fn progress_bar(percentage: u8) -> String {
        let filled = (percentage as usize * PROGRESS_WIDTH) / 100;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(PROGRESS_WIDTH - filled))
    }

    fn format_skill_list(&self, skills: &SkillSet, color: Color, empty_note: &str) -> String {
        if skills.is_empty() {
            return format!("  {}\n", empty_note);
        }

        skills
            .iter()
            .map(|skill| format!("  • {}\n", self.colorize(skill, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME SCREENING REPORT", 1));
        output.push_str(&format!(
            "Job description: {}\nResume: {}\n",
            display_name(&report.metadata.jd_file),
            display_name(&report.metadata.resume_file)
        ));

        output.push_str(&self.format_header("Compatibility Score", 2));
        let color = Self::verdict_color(result.verdict);
        let score_text = format!("{:.2}%", result.similarity_score);
        output.push_str(&format!(
            "{} {}\n",
            if self.use_colors { score_text.color(color).bold().to_string() } else { score_text },
            Self::progress_bar(report.score_percentage())
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(result.verdict.headline(), color)
        ));

        output.push_str(&self.format_header("Matched Skills", 3));
        output.push_str(&self.format_skill_list(
            &result.matched_skills,
            Color::Green,
            "No job description skills found in the resume",
        ));

        output.push_str(&self.format_header("Missing Skills", 3));
        output.push_str(&self.format_skill_list(
            &result.missing_skills,
            Color::Red,
            "None: the resume covers every skill the job description lists",
        ));

        if let Some(coverage) = result.skill_gap().coverage() {
            output.push_str(&format!("\nSkill coverage: {:.1}%\n", coverage));
        }

        output.push_str(&self.format_header("Details", 3));
        output.push_str(&format!(
            "Resume length: {} characters | JD length: {} characters\n",
            result.preview.resume_length, result.preview.jd_length
        ));
        output.push_str(&format!(
            "Skill vocabulary: {} terms | Processing time: {}ms\n",
            report.metadata.vocabulary_size, report.metadata.processing_time_ms
        ));

        if self.show_preview {
            output.push_str(&self.format_header("Resume Preview (normalized)", 3));
            output.push_str(&result.preview.resume_snippet);
            if result.preview.truncated {
                output.push_str("...");
            }
            output.push('\n');
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(show_preview: bool) -> Self {
        Self { show_preview }
    }

    fn markdown_skill_list(skills: &SkillSet, empty_note: &str) -> String {
        if skills.is_empty() {
            return format!("_{}_\n\n", empty_note);
        }

        let mut list: String = skills.iter().map(|skill| format!("- `{}`\n", skill)).collect();
        list.push('\n');
        list
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Resume Screening Report\n\n");

        output.push_str(&format!(
            "**Generated:** {} | **Processing Time:** {}ms | **Version:** {}\n\n",
            chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
                .format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms,
            report.metadata.tool_version
        ));
        output.push_str(&format!(
            "**Job Description:** `{}` | **Resume:** `{}`\n\n",
            display_name(&report.metadata.jd_file),
            display_name(&report.metadata.resume_file)
        ));

        output.push_str("## Compatibility Score\n\n");
        output.push_str(&format!(
            "**{:.2}%** ({})\n\n> {}\n\n",
            result.similarity_score,
            result.verdict,
            result.verdict.headline()
        ));

        output.push_str("## Matched Skills\n\n");
        output.push_str(&Self::markdown_skill_list(&result.matched_skills, "none"));

        output.push_str("## Missing Skills\n\n");
        output.push_str(&Self::markdown_skill_list(&result.missing_skills, "none"));

        output.push_str("## Details\n\n");
        output.push_str("| Metric | Value |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Resume length | {} characters |\n", result.preview.resume_length));
        output.push_str(&format!("| JD length | {} characters |\n", result.preview.jd_length));
        if let Some(coverage) = result.skill_gap().coverage() {
            output.push_str(&format!("| Skill coverage | {:.1}% |\n", coverage));
        }
        output.push_str(&format!("| Skill vocabulary | {} terms |\n", report.metadata.vocabulary_size));

        if self.show_preview {
            output.push_str("\n## Resume Preview\n\n```text\n");
            output.push_str(&result.preview.resume_snippet);
            if result.preview.truncated {
                output.push_str("...");
            }
            output.push_str("\n```\n");
        }

        Ok(output)
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(false),
        }
    }

    pub fn with_options(use_colors: bool, show_preview: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_preview),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(show_preview),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content).map_err(|e| {
        ScreenerError::OutputFormatting(format!(
            "Failed to write report to {}: {}",
            file_path.display(),
            e
        ))
    })?;
    Ok(())
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::AnalysisEngine;
    use tempfile::TempDir;

    fn sample_report() -> AnalysisReport {
        let engine = AnalysisEngine::new(&Config::default()).unwrap();
        let result = engine
            .analyze_texts("python sql communication", "python java communication")
            .unwrap();
        AnalysisReport::new(result, "/tmp/jobs/jd.pdf", "/tmp/people/resume.docx", 12, 94)
    }

    #[test]
    fn test_console_report_without_colors() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("66.67%"));
        assert!(output.contains("Good match: review skills manually"));
        assert!(output.contains("• communication"));
        assert!(output.contains("• sql"));
        assert!(output.contains("Resume: resume.docx"));
        assert!(!output.contains("Resume Preview"));
    }

    #[test]
    fn test_console_preview_toggle() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();
        assert!(output.contains("Resume Preview"));
        assert!(output.contains("python java communication"));
    }

    #[test]
    fn test_json_report_fields() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["result"]["similarity_score"], 66.67);
        assert_eq!(value["result"]["missing_skills"], serde_json::json!(["sql"]));
        assert_eq!(
            value["result"]["matched_skills"],
            serde_json::json!(["communication", "python"])
        );
        assert_eq!(value["result"]["verdict"], "Good");
    }

    #[test]
    fn test_markdown_report() {
        let output = MarkdownFormatter::new(false)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.starts_with("# Resume Screening Report"));
        assert!(output.contains("**66.67%** (Good)"));
        assert!(output.contains("- `sql`"));
        assert!(output.contains("`jd.pdf`"));
    }

    #[test]
    fn test_markdown_always_has_metadata_header() {
        let output = ReportGenerator::with_options(false, true, true)
            .generate_report(&sample_report(), &OutputFormat::Markdown)
            .unwrap();

        assert!(output.contains("**Generated:**"));
        assert!(output.contains("**Version:**"));
        assert!(output.contains("**Resume:** `resume.docx`"));
        assert!(output.contains("## Resume Preview"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true);
        let report = sample_report();

        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.trim_start().starts_with('{'));

        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with('#'));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("result.md");

        save_report_to_file("# report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report");
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(ConsoleFormatter::progress_bar(0), format!("[{}]", "-".repeat(PROGRESS_WIDTH)));
        assert_eq!(ConsoleFormatter::progress_bar(100), format!("[{}]", "#".repeat(PROGRESS_WIDTH)));
    }
}
