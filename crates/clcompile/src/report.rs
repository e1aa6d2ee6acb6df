//! Console reporting.
//!
//! User-facing messages go through a [`Reporter`] so the session can be driven
//! without touching the real stdout/stderr.

pub trait Reporter {
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// `info: ...` on stdout, `error: ...` on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&mut self, message: &str) {
        println!("info: {message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}
