//! An interface to github actions workflow commands.

use std::fmt::Write;

/// Shows an error message directly in a github diff view on drop.
pub struct Error {
    file: String,
    line: usize,
    title: String,
    message: String,
}

impl Error {
    /// Set a line for this error. By default the message is shown at the top of the file.
    pub fn line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Create an error to be shown for the given file and with the given title.
pub fn error(file: impl std::fmt::Display, title: impl Into<String>) -> Error {
    Error {
        file: file.to_string(),
        line: 0,
        title: title.into(),
        message: String::new(),
    }
}

/// Whether we are running inside a github actions workflow.
pub fn enabled() -> bool {
    std::env::var_os("GITHUB_ACTION").is_some()
}

impl Write for Error {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.message.write_str(s)
    }
}

impl Error {
    /// The workflow command this error is shown with.
    pub fn command(&self) -> String {
        let Error {
            file,
            line,
            title,
            message,
        } = self;
        let message = message.trim();
        let message = if message.is_empty() {
            "::no message".into()
        } else {
            format!("::{}", escape_data(message))
        };
        format!(
            "::error file={file},line={line},title={}{message}",
            escape_property(title)
        )
    }
}

impl Drop for Error {
    fn drop(&mut self) {
        if enabled() {
            eprintln!("{}", self.command());
        }
    }
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\n', "%0A")
        .replace('\r', "%0D")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line() {
        let mut err = error("trace.txt", "check: failed").line(4);
        write!(err, "expected 8\ngot 9").unwrap();
        assert_eq!(
            err.command(),
            "::error file=trace.txt,line=4,title=check%3A failed::expected 8%0Agot 9"
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(escape_data("50%\nnext"), "50%25%0Anext");
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }
}
