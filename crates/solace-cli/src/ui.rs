use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Terminal presentation settings, resolved once per process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    /// Narrower terminals are ignored; tables then use their natural width.
    const MIN_WIDTH: usize = 40;

    #[must_use]
    pub fn resolve(
        flags: &GlobalFlags,
        stdout_is_tty: bool,
        no_color: bool,
        columns: Option<&str>,
    ) -> Self {
        let is_table = flags.format == OutputFormat::Table;
        let table_color = is_table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => stdout_is_tty && !no_color && !flags.quiet,
            };
        let term_width = columns
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= Self::MIN_WIDTH);

        Self {
            table_color,
            term_width,
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let columns = std::env::var("COLUMNS").ok();
    let prefs = UiPrefs::resolve(
        flags,
        std::io::stdout().is_terminal(),
        std::env::var_os("NO_COLOR").is_some(),
        columns.as_deref(),
    );
    let _ = UI_PREFS.set(prefs);
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::UiPrefs;
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet: false,
            verbose: false,
            color,
            config: None,
        }
    }

    #[test]
    fn auto_color_needs_a_terminal_and_no_no_color() {
        let table = flags(OutputFormat::Table, ColorMode::Auto);
        assert!(UiPrefs::resolve(&table, true, false, None).table_color);
        assert!(!UiPrefs::resolve(&table, false, false, None).table_color);
        assert!(!UiPrefs::resolve(&table, true, true, None).table_color);
    }

    #[test]
    fn color_applies_to_tables_only() {
        let json = flags(OutputFormat::Json, ColorMode::Always);
        assert!(!UiPrefs::resolve(&json, true, false, None).table_color);
        let table = flags(OutputFormat::Table, ColorMode::Always);
        assert!(UiPrefs::resolve(&table, false, true, None).table_color);
    }

    #[test]
    fn narrow_or_garbled_widths_are_ignored() {
        let table = flags(OutputFormat::Table, ColorMode::Never);
        assert_eq!(
            UiPrefs::resolve(&table, false, false, Some("120")).term_width,
            Some(120)
        );
        assert_eq!(UiPrefs::resolve(&table, false, false, Some("20")).term_width, None);
        assert_eq!(UiPrefs::resolve(&table, false, false, Some("wide")).term_width, None);
    }
}
