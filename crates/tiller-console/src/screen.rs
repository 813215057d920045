//! Screen implementations.

use std::io::Write;

use tiller_shell::Screen;

/// A screen that captures everything in memory.
///
/// Useful for unit tests and for embedders that render the buffer
/// themselves.
#[derive(Debug, Default)]
pub struct BufferScreen {
    lines: Vec<String>,
    errors: Vec<String>,
    path: Option<String>,
}

impl BufferScreen {
    /// Create an empty buffer screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output lines printed so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Error lines printed so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The most recently shown current-directory path.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Drop all captured output.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.errors.clear();
        self.path = None;
    }
}

impl Screen for BufferScreen {
    fn print_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn print_error(&mut self, line: &str) {
        self.errors.push(line.to_string());
    }

    fn show_path(&mut self, path: &str) {
        self.path = Some(path.to_string());
    }
}

/// A screen that writes lines to any `io::Write` sink.
///
/// Write failures are logged and otherwise swallowed; a console losing its
/// output sink has nowhere better to report to.
#[derive(Debug)]
pub struct WriterScreen<W: Write> {
    out: W,
}

impl<W: Write> WriterScreen<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{line}") {
            log::warn!("screen write failed: {e}");
        }
    }
}

impl<W: Write> Screen for WriterScreen<W> {
    fn print_line(&mut self, line: &str) {
        self.write_line(line);
    }

    fn print_error(&mut self, line: &str) {
        self.write_line(&format!("error: {line}"));
    }

    fn show_path(&mut self, path: &str) {
        self.write_line(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_screen_captures_lines_and_errors() {
        let mut screen = BufferScreen::new();
        screen.print_line("one");
        screen.print_error("bad");
        screen.show_path("/net");
        assert_eq!(screen.lines(), ["one"]);
        assert_eq!(screen.errors(), ["bad"]);
        assert_eq!(screen.path(), Some("/net"));
    }

    #[test]
    fn buffer_screen_clear_resets_everything() {
        let mut screen = BufferScreen::new();
        screen.print_line("one");
        screen.clear();
        assert!(screen.lines().is_empty());
        assert!(screen.path().is_none());
    }

    #[test]
    fn writer_screen_writes_lines() {
        let mut screen = WriterScreen::new(Vec::new());
        screen.print_line("hello");
        screen.print_error("oops");
        let out = String::from_utf8(screen.into_inner()).unwrap();
        assert_eq!(out, "hello\nerror: oops\n");
    }
}
