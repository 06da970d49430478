//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Success/Done:   green  (closed status, saved files)
//!   - Warning/Active: yellow (in_progress, load diagnostics)
//!   - Error/Blocked:  red    (blocked status, cycles)
//!   - Info/Reference: cyan   (issue IDs, paths)
//!   - Muted:          dimmed (field labels)
//!   - Emphasis:       bold   (section headers)

use crate::domain::IssueStatus;
use colored::{ColoredString, Colorize};

use super::OutputConfig;

fn paint(text: &str, config: &OutputConfig, style: impl FnOnce(&str) -> ColoredString) -> String {
    if config.use_colors {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Green, for completed actions.
pub fn success(text: &str, config: &OutputConfig) -> String {
    paint(text, config, |t| t.green())
}

/// Red, for blocked issues and cycles.
pub fn error(text: &str, config: &OutputConfig) -> String {
    paint(text, config, |t| t.red())
}

/// Yellow, for diagnostics that do not stop the command.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    paint(text, config, |t| t.yellow())
}

/// Cyan, for IDs and paths.
pub fn info(text: &str, config: &OutputConfig) -> String {
    paint(text, config, |t| t.cyan())
}

/// Status name left-aligned to `width`, colored by status.
///
/// Padding is applied before coloring so ANSI codes do not count toward
/// the width.
pub(crate) fn colorize_status(status: IssueStatus, width: usize, config: &OutputConfig) -> String {
    let text = format!("{status:<width$}");
    match status {
        IssueStatus::Open => paint(&text, config, |t| t.white()),
        IssueStatus::InProgress => paint(&text, config, |t| t.yellow()),
        IssueStatus::Blocked => paint(&text, config, |t| t.red()),
        IssueStatus::Closed => paint(&text, config, |t| t.green()),
    }
}

pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    paint(text, config, |t| t.dimmed())
}

pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    paint(text, config, |t| t.bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::set_override;
    use std::sync::{Mutex, MutexGuard};

    static GLOBAL_STATE_MUTEX: Mutex<()> = Mutex::new(());

    struct ColorGuard<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl ColorGuard<'_> {
        fn new() -> Self {
            let guard = GLOBAL_STATE_MUTEX
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            set_override(true);
            Self { _guard: guard }
        }
    }

    impl Drop for ColorGuard<'_> {
        fn drop(&mut self) {
            set_override(false);
        }
    }

    fn with_colors_enabled<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ColorGuard::new();
        f()
    }

    #[test]
    fn status_colors_contain_ansi_codes() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(true);
            for status in IssueStatus::ALL {
                let text = colorize_status(status, 0, &config);
                assert!(text.contains(status.as_str()));
                assert!(text.contains("\x1b["), "{status} should have ANSI codes");
            }
        });
    }

    #[test]
    fn disabled_colors_return_plain_text() {
        let config = OutputConfig::new(false);
        assert_eq!(success("ok", &config), "ok");
        assert_eq!(error("bad", &config), "bad");
        assert_eq!(warning("hmm", &config), "hmm");
        assert_eq!(info("note", &config), "note");
        assert_eq!(bold("head", &config), "head");
        assert_eq!(dimmed("quiet", &config), "quiet");
        assert_eq!(colorize_status(IssueStatus::Blocked, 0, &config), "blocked");
        assert_eq!(colorize_status(IssueStatus::Open, 6, &config), "open  ");
    }

    #[test]
    fn semantic_helpers_wrap_text() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(true);
            let text = warning("careful", &config);
            assert!(text.contains("careful"));
            assert_ne!(text, "careful");
        });
    }
}
