//! Concat demuxer list rendering

use std::path::Path;

const HEADER: &str = "ffconcat version 1.0";

/// Render an `ffconcat` list referencing `files` in order
pub fn render<'a, I>(files: I) -> String
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut list = String::from(HEADER);
    list.push('\n');
    for file in files {
        list.push_str("file ");
        list.push_str(&quote(&file.to_string_lossy()));
        list.push('\n');
    }
    list
}

/// Single-quote a path for the concat demuxer; embedded quotes become `'\''`
fn quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_order() {
        let files = [Path::new("/v/b.mp4"), Path::new("/v/a.mp4")];
        assert_eq!(
            render(files),
            "ffconcat version 1.0\nfile '/v/b.mp4'\nfile '/v/a.mp4'\n"
        );
    }

    #[test]
    fn test_render_quotes_special_characters() {
        let files = [Path::new("/v/it's $HOME & more.mp4")];
        assert_eq!(
            render(files),
            "ffconcat version 1.0\nfile '/v/it'\\''s $HOME & more.mp4'\n"
        );
    }
}
