use crate::{
    format::format_argument,
    models::{escape_html, Frame},
};
use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

/// Inserted around arguments when a call has more than one of them.
const ARGUMENT_BREAK: &str = "<br />&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;";

/// Renders captured stack traces as numbered back-trace markup.
#[derive(Debug, Clone, Default)]
pub struct TraceRenderer {
    base_dir: Option<PathBuf>,
}

impl TraceRenderer {
    /// Create a renderer that shows call sites with their full path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that shows call sites relative to the current working directory.
    ///
    /// Falls back to full paths if the working directory cannot be determined.
    pub fn from_current_dir() -> Self {
        Self {
            base_dir: std::env::current_dir().ok(),
        }
    }

    /// Show call sites below `base_dir` relative to it.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Render `frames`, innermost first.
    ///
    /// Frames are numbered from `frames.len()` down to `1`. A final `#0 {main}` line stands for
    /// the program entry.
    pub fn render(&self, frames: &[Frame]) -> String {
        let mut rendered = String::new();
        for (i, frame) in frames.iter().enumerate() {
            let args: Vec<_> = frame.args().iter().map(format_argument).collect();
            let line_break = if args.len() > 1 { ARGUMENT_BREAK } else { "" };
            let _ = write!(
                rendered,
                "#{} <span class='function'>{}</span>({}{}{})",
                frames.len() - i,
                escape_html(frame.function()),
                line_break,
                args.join(format!(", {}", line_break).as_str()),
                line_break
            );
            if let Some(file) = frame.file() {
                rendered.push_str("<span class='comment'> called at </span>");
                rendered.push_str(&escape_html(&self.display_path(file)));
                if let Some(line) = frame.line() {
                    let _ = write!(rendered, " <span class='comment'>on line</span> {}", line);
                }
            }
            rendered.push_str("<br />\n");
        }
        rendered.push_str("#0 {main}");
        rendered
    }

    fn display_path(&self, file: &str) -> String {
        self.base_dir
            .as_deref()
            .and_then(|base| Path::new(file).strip_prefix(base).ok())
            .map(|relative| relative.display().to_string())
            .unwrap_or_else(|| file.to_string())
    }
}
