//! Terminal preferences for table output, resolved once at startup.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower `COLUMNS` values are ignored; tables are left unwrapped instead.
const MIN_TERM_WIDTH: usize = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

/// What the process environment says about the terminal.
#[derive(Clone, Debug, Default)]
struct Terminal {
    is_tty: bool,
    no_color: bool,
    columns: Option<String>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            is_tty: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok(),
        }
    }
}

impl UiPrefs {
    fn resolve(flags: &GlobalFlags, terminal: &Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let table_color = table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => terminal.is_tty && !terminal.no_color && !flags.quiet,
            };
        let term_width = terminal
            .columns
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= MIN_TERM_WIDTH);

        Self {
            table_color,
            term_width,
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(UiPrefs::resolve(flags, &Terminal::detect()));
}

/// Plain output until `init` has run.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Terminal, UiPrefs};
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet: false,
            verbose: false,
            color,
            api_url: None,
        }
    }

    fn tty(columns: Option<&str>) -> Terminal {
        Terminal {
            is_tty: true,
            no_color: false,
            columns: columns.map(str::to_string),
        }
    }

    #[test]
    fn auto_colors_tables_on_a_terminal_only() {
        let table = flags(OutputFormat::Table, ColorMode::Auto);
        assert!(UiPrefs::resolve(&table, &tty(None)).table_color);
        assert!(!UiPrefs::resolve(&table, &Terminal::default()).table_color);

        let no_color = Terminal {
            no_color: true,
            ..tty(None)
        };
        assert!(!UiPrefs::resolve(&table, &no_color).table_color);
    }

    #[test]
    fn json_is_never_colored() {
        let json = flags(OutputFormat::Json, ColorMode::Always);
        assert!(!UiPrefs::resolve(&json, &tty(None)).table_color);
    }

    #[test]
    fn always_overrides_a_pipe() {
        let table = flags(OutputFormat::Table, ColorMode::Always);
        assert!(UiPrefs::resolve(&table, &Terminal::default()).table_color);
    }

    #[test]
    fn columns_below_minimum_are_ignored() {
        let table = flags(OutputFormat::Table, ColorMode::Never);
        assert_eq!(UiPrefs::resolve(&table, &tty(Some("120"))).term_width, Some(120));
        assert_eq!(UiPrefs::resolve(&table, &tty(Some("20"))).term_width, None);
        assert_eq!(UiPrefs::resolve(&table, &tty(Some("wide"))).term_width, None);
    }
}
