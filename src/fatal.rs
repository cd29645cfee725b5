//! Fatal error reporting.
//!
//! [`die`] is the single cross-cutting failure hook: it logs, prints the
//! message to stderr and aborts. It never returns and never unwinds.
//! [`OrDie`] lets callers that cannot handle allocator exhaustion keep the
//! "abort on failure" behavior at the call site.

use std::fmt::Display;

/// Print `message` and abort the process.
///
/// # Examples
///
/// ```no_run
/// use gf2core::die;
///
/// die("gf2core: something impossible happened");
/// ```
#[cold]
#[inline(never)]
pub fn die(message: &str) -> ! {
    log::error!("{message}");
    eprintln!("{message}");
    std::process::abort()
}

/// Unwrap a result or [`die`] with the error as diagnostic.
pub trait OrDie<T> {
    /// Return the success value, or abort the process after reporting the
    /// error prefixed with `context`.
    fn or_die(self, context: &str) -> T;
}

impl<T, E: Display> OrDie<T> for std::result::Result<T, E> {
    #[inline]
    fn or_die(self, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => die(&format!("{context}: {err}")),
        }
    }
}
