use super::color_enabled;
use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Info,
    Warning,
    Error,
}

impl Status {
    fn glyph(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Info => "ℹ",
            Status::Warning => "⚠",
            Status::Error => "✗",
        }
    }
}

/// Format one status line. Warnings and errors tint the message too.
pub fn render(status: Status, message: &str, color: bool) -> String {
    let glyph = status.glyph();
    if !color {
        return format!("{glyph} {message}");
    }
    match status {
        Status::Success => format!("{} {message}", glyph.green().bold()),
        Status::Info => format!("{} {message}", glyph.blue().bold()),
        Status::Warning => format!("{} {}", glyph.yellow().bold(), message.yellow()),
        Status::Error => format!("{} {}", glyph.red().bold(), message.red()),
    }
}

fn print(status: Status, message: &str) {
    eprintln!("{}", render(status, message, color_enabled()));
}

pub fn success(message: &str) {
    print(Status::Success, message);
}

pub fn info(message: &str) {
    print(Status::Info, message);
}

pub fn warning(message: &str) {
    print(Status::Warning, message);
}

pub fn error(message: &str) {
    print(Status::Error, message);
}
