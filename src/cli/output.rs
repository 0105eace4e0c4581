//! Colored terminal output with verbose and quiet modes.

use anstyle::{AnsiColor, Color, Style};
use std::io::{self, IsTerminal, Write};

const SECTION: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
const SUCCESS: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Green)));
const WARNING: Style = Style::new()
    .bold()
    .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const DIMMED: Style = Style::new().dimmed();

/// Styles used by `--help` and clap's own error messages.
pub fn cli_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .header(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .usage(
            Style::new()
                .bold()
                .underline()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
        .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .error(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .invalid(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}

/// Output manager for colored terminal output.
///
/// Progress goes to stdout, warnings to stderr. Colors are only emitted when
/// the stream is a terminal and `NO_COLOR` is unset.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color_stdout: bool,
    color_stderr: bool,
}

impl OutputManager {
    /// Creates a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let color_allowed = std::env::var_os("NO_COLOR").is_none();
        Self {
            verbose,
            quiet,
            color_stdout: color_allowed && io::stdout().is_terminal(),
            color_stderr: color_allowed && io::stderr().is_terminal(),
        }
    }

    /// Whether verbose messages are shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    fn paint(style: Style, text: &str, color: bool) -> String {
        if color {
            format!("{}{text}{}", style.render(), style.render_reset())
        } else {
            text.to_string()
        }
    }

    fn line(&self, style: Option<Style>, message: &str) -> io::Result<()> {
        let text = match style {
            Some(style) => Self::paint(style, message, self.color_stdout),
            None => message.to_string(),
        };
        writeln!(io::stdout().lock(), "{text}")
    }

    /// Print a message only in verbose mode
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        log::debug!("{message}");
        if self.is_verbose() {
            self.line(Some(DIMMED), &format!("  {message}"))?;
        }
        Ok(())
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(None, message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(Some(SUCCESS), &format!("✓ {message}"))
    }

    /// Print a warning to stderr
    pub fn warn(&self, message: &str) -> io::Result<()> {
        log::warn!("{message}");
        if self.quiet {
            return Ok(());
        }
        let text = Self::paint(WARNING, &format!("⚠ {message}"), self.color_stderr);
        writeln!(io::stderr().lock(), "{text}")
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(Some(SECTION), &format!("▸ {title}"))
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.line(None, &format!("    {message}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert!(OutputManager::new(true, false).is_verbose());
        assert!(!OutputManager::new(true, true).is_verbose());
        assert!(!OutputManager::new(false, false).is_verbose());
    }

    #[test]
    fn paint_wraps_only_when_colored() {
        assert_eq!(OutputManager::paint(SUCCESS, "done", false), "done");
        let colored = OutputManager::paint(SUCCESS, "done", true);
        assert!(colored.starts_with("\u{1b}["));
        assert!(colored.contains("done"));
        assert!(colored.ends_with("\u{1b}[0m"));
    }
}
