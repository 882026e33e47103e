use colored::Colorize;

use crate::{Diagnostic, LabelStyle};

/// Renders a single diagnostic against its originating source, rustc-style.
pub struct DiagnosticFormatter<'a> {
    diagnostic: &'a Diagnostic,
    source: &'a str,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(diagnostic: &'a Diagnostic, source: &'a str) -> Self {
        Self { diagnostic, source }
    }

    pub fn format(&self) -> String {
        let mut out = format!("{}: {}\n", self.diagnostic.severity, self.diagnostic.message.bold());

        if let Some(label) = &self.diagnostic.label {
            let line_content = self.get_line_content(label.span.line);
            let gutter = format!("{:>4} | ", label.span.line);
            out.push_str(&format!("{}\n", gutter.dimmed()));
            out.push_str(&format!("{}{}\n", gutter.dimmed(), line_content));
            let underline = self.underline(label.span.column, label.span.length, label.style);
            out.push_str(&format!("{}{}\n", " ".repeat(gutter.len()), underline));
            if !label.message.is_empty() {
                out.push_str(&format!("{}{}\n", " ".repeat(gutter.len()), label.message.dimmed()));
            }
        }

        if let Some(note) = &self.diagnostic.note {
            out.push_str(&format!("{} {}\n", "note:".cyan().bold(), note));
        }
        if let Some(help) = &self.diagnostic.help {
            out.push_str(&format!("{} {}\n", "help:".green().bold(), help));
        }

        out
    }

    fn get_line_content(&self, line: u32) -> &'a str {
        self.source.lines().nth(line.saturating_sub(1) as usize).unwrap_or("")
    }

    fn underline(&self, column: u32, length: u32, style: LabelStyle) -> String {
        let pad = " ".repeat(column.saturating_sub(1) as usize);
        let marker = self.underline_char(style).to_string().repeat(length.max(1) as usize);
        let colored_marker = match style {
            LabelStyle::Primary => marker.red().bold().to_string(),
            LabelStyle::Secondary => marker.blue().to_string(),
        };
        format!("{pad}{colored_marker}")
    }

    fn underline_char(&self, style: LabelStyle) -> char {
        match style {
            LabelStyle::Primary => '^',
            LabelStyle::Secondary => '-',
        }
    }
}
