//! Operator-facing status lines on stderr.
//!
//! Each line is a glyph and a message, e.g. `✓ Build completed in 420ms`.
//! Anything finer grained goes through `tracing` instead.

mod status;
mod timing;

pub use status::{error, info, render, success, warning, Status};
pub use timing::format_duration;

use std::sync::OnceLock;

static COLOR: OnceLock<bool> = OnceLock::new();

/// Settle whether status lines and logs are colored for this process.
///
/// `--no-color` always wins; otherwise the environment and stderr decide.
/// Later calls return the first answer.
pub fn init(no_color: bool) -> bool {
    *COLOR.get_or_init(|| !no_color && detect_color())
}

/// The answer from [`init`], or fresh detection if it was never called.
pub fn color_enabled() -> bool {
    COLOR.get().copied().unwrap_or_else(detect_color)
}

/// `NO_COLOR` disables, then `FORCE_COLOR` enables, then the terminal decides.
fn detect_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_env_disables() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::remove_var("FORCE_COLOR");
        }
        assert!(!detect_color());
        unsafe { std::env::remove_var("NO_COLOR") };
    }

    #[test]
    #[serial]
    fn test_force_color_env_enables() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(detect_color());
        unsafe { std::env::remove_var("FORCE_COLOR") };
    }

    #[test]
    #[serial]
    fn test_no_color_beats_force_color() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!detect_color());
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
