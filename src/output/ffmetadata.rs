//! FFMETADATA1 rendering
//!
//! The document ffmpeg reads through `-f ffmetadata` to attach global tags
//! and chapters to the output container.

use std::fmt::Write;

use crate::domain::model::{Chapter, ChapterTimebase};

const HEADER: &str = ";FFMETADATA1";

/// Render the metadata document for `chapters`
pub fn render(title: Option<&str>, chapters: &[Chapter], timebase: ChapterTimebase) -> String {
    let mut doc = String::new();
    doc.push_str(HEADER);
    doc.push('\n');

    if let Some(title) = title {
        // Writing to a String cannot fail
        let _ = writeln!(doc, "title={}", escape(title));
    }

    for chapter in chapters {
        let _ = write!(
            doc,
            "\n[CHAPTER]\nTIMEBASE={}\nSTART={}\nEND={}\ntitle={}\n",
            timebase,
            timebase.to_ticks(chapter.start),
            timebase.to_ticks(chapter.end),
            escape(&chapter.title)
        );
    }

    doc
}

/// Escape `=`, `;`, `#`, `\` and newlines with a backslash
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '=' | ';' | '#' | '\\' | '\n') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
