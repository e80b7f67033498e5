//! Scoped actions: a label, progress dots, then OK or an error.

use std::fmt::Display;
use std::io::{Stdout, Write};

use super::{Sink, status};

/// A long-running step reported on a single line.
///
/// The label is printed when the action starts. When the action is dropped
/// it prints ` OK` unless an error was reported through it; if it is
/// dropped during a panic it reports the failure instead.
///
/// ```no_run
/// use clickclick::ui::Action;
///
/// let mut action = Action::new("Uploading files");
/// for _ in 0..3 {
///     action.progress();
/// }
/// // prints "Uploading files . . . OK"
/// ```
pub struct Action<W: Write = Stdout> {
    sink: Sink<W>,
    errors: Vec<String>,
    finished: bool,
}

impl Action<Stdout> {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self::with_sink(message, Sink::stdout())
    }

    /// Run `f` inside an action on stdout.
    ///
    /// An `Err` is reported as an exception on the action line and
    /// returned unchanged.
    pub fn run<T, E, F>(message: &str, f: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        Self::new(message).scope(f)
    }
}

impl<W: Write> Action<W> {
    pub fn with_sink(message: &str, mut sink: Sink<W>) -> Self {
        let _ = status::action_to(&mut sink, message);
        Self {
            sink,
            errors: Vec::new(),
            finished: false,
        }
    }

    /// Run `f` with this action, reporting an `Err` as an exception.
    pub fn scope<T, E, F>(mut self, f: F) -> Result<T, E>
    where
        E: Display,
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let result = f(&mut self);
        if let Err(e) = &result {
            self.fail(e);
        }
        result
    }

    /// Print a progress dot.
    pub fn progress(&mut self) {
        let _ = self.sink.write(" .", &console::Style::new());
        let _ = self.sink.flush();
    }

    /// Report an error; the action will not print OK when it ends.
    pub fn error(&mut self, message: &str) {
        let _ = status::error_to(&mut self.sink, message);
        self.errors.push(message.to_string());
    }

    /// Report a warning without failing the action.
    pub fn warning(&mut self, message: &str) {
        let _ = status::warning_to(&mut self.sink, message);
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// End the action with an exception marker.
    pub fn fail(&mut self, err: impl Display) {
        if !self.finished {
            self.finished = true;
            let _ = status::error_to(&mut self.sink, &format!("EXCEPTION OCCURRED: {err}"));
        }
    }

    /// End the action now, printing OK unless errors were reported.
    pub fn finish(mut self) {
        self.complete();
    }

    fn complete(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if self.errors.is_empty() {
            let _ = status::ok_to(&mut self.sink);
        }
    }
}

impl<W: Write> Drop for Action<W> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.fail("panicked");
        } else {
            self.complete();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prints_ok_when_dropped_cleanly() {
        let mut buf = Vec::new();
        {
            let mut action = Action::with_sink("Copying", Sink::plain(&mut buf));
            action.progress();
            action.progress();
        }
        assert_eq!(text(buf), "Copying . . OK\n");
    }

    #[test]
    fn reported_error_suppresses_ok() {
        let mut buf = Vec::new();
        {
            let mut action = Action::with_sink("Copying", Sink::plain(&mut buf));
            action.error("disk full");
            assert_eq!(action.errors(), ["disk full".to_string()]);
        }
        assert_eq!(text(buf), "Copying disk full\n");
    }

    #[test]
    fn warning_still_ends_ok() {
        let mut buf = Vec::new();
        Action::with_sink("Copying", Sink::plain(&mut buf)).warning("slow disk");
        assert_eq!(text(buf), "Copying slow disk\n OK\n");
    }

    #[test]
    fn scope_reports_err_as_exception() {
        let mut buf = Vec::new();
        let result: Result<(), String> =
            Action::with_sink("Copying", Sink::plain(&mut buf)).scope(|a| {
                a.progress();
                Err("permission denied".to_string())
            });
        assert!(result.is_err());
        assert_eq!(
            text(buf),
            "Copying . EXCEPTION OCCURRED: permission denied\n"
        );
    }

    #[test]
    fn scope_passes_value_through() {
        let mut buf = Vec::new();
        let result: Result<u32, String> =
            Action::with_sink("Counting", Sink::plain(&mut buf)).scope(|_| Ok(7));
        assert_eq!(result, Ok(7));
        assert_eq!(text(buf), "Counting OK\n");
    }

    #[test]
    fn panic_reports_exception() {
        let mut buf = Vec::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut action = Action::with_sink("Go", Sink::plain(&mut buf));
            action.progress();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(text(buf), "Go . EXCEPTION OCCURRED: panicked\n");
    }

    #[test]
    fn finish_prints_ok_once() {
        let mut buf = Vec::new();
        Action::with_sink("Saving", Sink::plain(&mut buf)).finish();
        assert_eq!(text(buf), "Saving OK\n");
    }
}
