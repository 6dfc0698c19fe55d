//! Result presenter. Styles the returned Markdown for the terminal and lists
//! the grounded sources. Stateless: render functions only.

use crate::domain::StudyGuide;
use crossterm::style::Stylize;

/// Classification of a markdown line for terminal styling. Line-oriented on
/// purpose: inline markup (bold, italics) is left as-is rather than parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading1,
    Heading2,
    Blockquote,
    TableRow,
    Plain,
}

pub fn classify_line(line: &str) -> LineKind {
    if line.starts_with("# ") {
        LineKind::Heading1
    } else if line.starts_with('#') {
        LineKind::Heading2
    } else if line.trim_start().starts_with('>') {
        LineKind::Blockquote
    } else if line.trim_start().starts_with('|') {
        LineKind::TableRow
    } else {
        LineKind::Plain
    }
}

/// Print the study guide: styled markdown, then the source list (nothing
/// extra when it is empty).
pub fn render_guide(guide: &StudyGuide) {
    println!();
    for line in guide.markdown.lines() {
        match classify_line(line) {
            LineKind::Heading1 => println!("{}", line.to_string().dark_yellow().bold()),
            LineKind::Heading2 => println!("{}", line.to_string().yellow().bold()),
            LineKind::Blockquote => println!("{}", line.to_string().green()),
            LineKind::TableRow => println!("{}", line.to_string().cyan()),
            LineKind::Plain => println!("{}", line),
        }
    }

    if !guide.sources.is_empty() {
        println!();
        println!("{}", "来源 (Sources):".dark_yellow().bold());
        for (i, uri) in guide.sources.iter().enumerate() {
            println!("  {}. {}", i + 1, uri.as_str().blue().underlined());
        }
    }
    println!();
}

/// Print the error banner. The reset action is offered by the session loop.
pub fn render_error(message: &str) {
    println!();
    println!("{} {}", "出错啦:".red().bold(), message.to_string().red());
    println!();
}
