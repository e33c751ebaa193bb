//! Report configuration file.
//!
//! ```toml
//! [table]
//! compact = true
//! sort_rows = true
//! format_string = "%.3f"
//! default_value = "-"
//!
//! [latex]
//! transpose = false
//! decimal_places = 2
//! percentage_decimal_places = -1
//! alignment = "r"
//! row_id_replacements = [{ from = "org.example.task.", to = "" }]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use flextab_model::Table;
use flextab_report::{ColumnAlignment, LatexOptions, RowIdReplacement};

use crate::cli::{LatexArgs, TableArgs};

/// Settings shared by all commands that render a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub table: TableSettings,
    pub latex: LatexSettings,
}

/// Table-wide rendering flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    /// Split invariant columns out of the table body.
    pub compact: bool,
    /// Sort rows by ID instead of keeping insertion order.
    pub sort_rows: bool,
    /// printf-style cell format.
    pub format_string: Option<String>,
    /// Text rendered for cells without a value.
    pub default_value: Option<String>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            compact: true,
            sort_rows: true,
            format_string: None,
            default_value: None,
        }
    }
}

/// LaTeX writer settings. Negative rounding depths disable rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatexSettings {
    pub transpose: bool,
    pub decimal_places: i32,
    pub percentage_decimal_places: i32,
    pub alignment: ColumnAlignment,
    pub row_id_replacements: Vec<RowIdReplacement>,
}

impl Default for LatexSettings {
    fn default() -> Self {
        Self {
            transpose: false,
            decimal_places: -1,
            percentage_decimal_places: -1,
            alignment: ColumnAlignment::default(),
            row_id_replacements: Vec::new(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration file. Missing sections and keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parse {}", path.display()))?;
        info!(path = %path.display(), "loaded report configuration");
        Ok(config)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Apply command-line table flags on top of the file values.
    #[must_use]
    pub fn with_table_args(mut self, args: &TableArgs) -> Self {
        if args.no_compact {
            self.table.compact = false;
        }
        if args.no_sort {
            self.table.sort_rows = false;
        }
        if let Some(template) = &args.format_string {
            self.table.format_string = Some(template.clone());
        }
        if let Some(value) = &args.default_value {
            self.table.default_value = Some(value.clone());
        }
        self
    }

    /// Apply command-line LaTeX flags on top of the file values.
    pub fn with_latex_args(mut self, args: &LatexArgs) -> Result<Self> {
        if args.transpose {
            self.latex.transpose = true;
        }
        if let Some(places) = args.decimal_places {
            self.latex.decimal_places = places;
        }
        if let Some(places) = args.percentage_decimal_places {
            self.latex.percentage_decimal_places = places;
        }
        if let Some(alignment) = args.alignment {
            self.latex.alignment = alignment.into();
        }
        for replacement in &args.replacements {
            self.latex
                .row_id_replacements
                .push(parse_replacement(replacement)?);
        }
        Ok(self)
    }

    /// Configure a table's rendering flags.
    pub fn apply(&self, table: &mut Table<String>) -> Result<()> {
        table.set_compact(self.table.compact);
        table.set_sort_rows(self.table.sort_rows);
        match &self.table.format_string {
            Some(template) => table
                .set_format_string(template)
                .with_context(|| format!("invalid format string {template:?}"))?,
            None => table.clear_format_string(),
        }
        match &self.table.default_value {
            Some(value) => table.set_default_value(value.clone()),
            None => table.clear_default_value(),
        }
        Ok(())
    }

    pub fn latex_options(&self) -> LatexOptions {
        LatexOptions {
            transpose: self.latex.transpose,
            decimal_places: LatexOptions::rounding_depth(self.latex.decimal_places),
            percentage_decimal_places: LatexOptions::rounding_depth(
                self.latex.percentage_decimal_places,
            ),
            alignment: self.latex.alignment,
            row_id_replacements: self.latex.row_id_replacements.clone(),
        }
    }
}

fn parse_replacement(value: &str) -> Result<RowIdReplacement> {
    let (from, to) = value
        .split_once('=')
        .with_context(|| format!("replacement {value:?} is not FROM=TO"))?;
    anyhow::ensure!(!from.is_empty(), "replacement {value:?} has an empty FROM");
    Ok(RowIdReplacement::new(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AlignmentArg;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ReportConfig = toml::from_str("[latex]\ndecimal_places = 2\n").unwrap();
        assert!(config.table.compact);
        assert!(config.table.sort_rows);
        assert_eq!(config.latex.decimal_places, 2);
        assert_eq!(config.latex.percentage_decimal_places, -1);

        let options = config.latex_options();
        assert_eq!(options.decimal_places, Some(2));
        assert_eq!(options.percentage_decimal_places, None);
    }

    #[test]
    fn test_full_file() {
        let text = r#"
            [table]
            compact = false
            format_string = "%.1f"
            default_value = "n/a"

            [latex]
            transpose = true
            alignment = "c"
            row_id_replacements = [{ from = "org.example." }]
        "#;
        let config: ReportConfig = toml::from_str(text).unwrap();
        assert!(!config.table.compact);
        assert_eq!(config.table.default_value.as_deref(), Some("n/a"));
        assert_eq!(config.latex.alignment, ColumnAlignment::Center);
        assert_eq!(
            config.latex.row_id_replacements,
            [RowIdReplacement::strip("org.example.")]
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = ReportConfig::default();
        config.table.format_string = Some("%.2f".to_string());
        config.latex.row_id_replacements.push(RowIdReplacement::new("a", "b"));
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ReportConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_cli_flags_override_file() {
        let config = ReportConfig::default()
            .with_table_args(&TableArgs {
                no_compact: true,
                format_string: Some("%d".to_string()),
                ..TableArgs::default()
            })
            .with_latex_args(&LatexArgs {
                decimal_places: Some(3),
                alignment: Some(AlignmentArg::Right),
                replacements: vec!["long.prefix.=".to_string()],
                ..LatexArgs::default()
            })
            .unwrap();
        assert!(!config.table.compact);
        assert!(config.table.sort_rows);
        assert_eq!(config.table.format_string.as_deref(), Some("%d"));

        let options = config.latex_options();
        assert_eq!(options.decimal_places, Some(3));
        assert_eq!(options.alignment, ColumnAlignment::Right);
        assert_eq!(options.row_id_replacements, [RowIdReplacement::strip("long.prefix.")]);
    }

    #[test]
    fn test_bad_replacement() {
        let args = LatexArgs {
            replacements: vec!["no-separator".to_string()],
            ..LatexArgs::default()
        };
        assert!(ReportConfig::default().with_latex_args(&args).is_err());
    }

    #[test]
    fn test_apply_rejects_invalid_format_string() {
        let mut config = ReportConfig::default();
        config.table.format_string = Some("%q".to_string());
        let mut table = Table::new();
        assert!(config.apply(&mut table).is_err());
    }

    #[test]
    fn test_apply_sets_table_flags() {
        let mut config = ReportConfig::default();
        config.table.sort_rows = false;
        config.table.default_value = Some("-".to_string());
        let mut table = Table::new();
        config.apply(&mut table).unwrap();
        assert!(!table.is_sort_rows());
        assert_eq!(table.default_value().map(String::as_str), Some("-"));
    }
}
