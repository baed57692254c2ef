//! Template catalog.
//!
//! Templates are read from TOML, one table per template, each carrying an
//! array of placeholder tables:
//!
//! ```toml
//! [Commentary_Only]
//! placeholders = [
//!     { name = "Title", type = "text", x = 0.5, y = 0.3, w = 9, h = 0.8, role = "title" },
//!     { name = "Body", type = "text", x = 0.5, y = 1.3, w = 9, h = 5.5 },
//! ]
//! ```
//!
//! Template order follows the file. Placeholders with an unrecognized `type`
//! are dropped at load time and reported through [`TemplateCatalog::skipped`].

mod placeholder;

pub use placeholder::{
    DEFAULT_ROW_HEIGHT, FitMode, ImageOptions, PlaceholderKind, PlaceholderSpec, TableOptions,
    TextOptions,
};
pub(crate) use placeholder::RawPlaceholder;

use crate::error::{Error, Result};
use crate::warning::Warning;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// A named, ordered list of placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    name: String,
    placeholders: Vec<PlaceholderSpec>,
}

impl Template {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn placeholders(&self) -> &[PlaceholderSpec] {
        &self.placeholders
    }

    /// Look up a placeholder by name.
    pub fn placeholder(&self, name: &str) -> Option<&PlaceholderSpec> {
        self.placeholders.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Deserialize)]
struct RawTemplate {
    #[serde(default)]
    placeholders: Vec<RawPlaceholder>,
}

/// All templates known to a run.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    skipped: Vec<Warning>,
}

impl TemplateCatalog {
    /// Parse a catalog from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(s)?;
        let mut catalog = Self::default();

        for (name, value) in table {
            let raw: RawTemplate = value.try_into()?;
            let mut seen = HashSet::new();
            let mut placeholders = Vec::with_capacity(raw.placeholders.len());

            for entry in raw.placeholders {
                if !seen.insert(entry.name.clone()) {
                    return Err(Error::DuplicatePlaceholder {
                        template: name,
                        name: entry.name,
                    });
                }
                match entry.into_spec() {
                    Ok(spec) => placeholders.push(spec),
                    Err(warning) => catalog.skipped.push(warning),
                }
            }

            log::debug!("template '{}': {} placeholders", name, placeholders.len());
            catalog.templates.push(Template { name, placeholders });
        }

        Ok(catalog)
    }

    /// Load a catalog from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Template names in file order.
    pub fn template_names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    /// Placeholders of a template. Unknown names yield an empty slice.
    pub fn placeholders(&self, template: &str) -> &[PlaceholderSpec] {
        self.template(template)
            .map(Template::placeholders)
            .unwrap_or(&[])
    }

    pub fn contains(&self, template: &str) -> bool {
        self.template(template).is_some()
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn placeholder(&self, template: &str, name: &str) -> Option<&PlaceholderSpec> {
        self.template(template).and_then(|t| t.placeholder(name))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Entries dropped while loading.
    pub fn skipped(&self) -> &[Warning] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::TextRole;
    use crate::pptx::TextAlign;

    const CATALOG: &str = r#"
        [Title_And_Table]
        placeholders = [
            { name = "Title", type = "text", x = 0.5, y = 0.3, w = 9.0, h = 0.8, role = "title", align = "center" },
            { name = "Table_1", type = "table", x = 0.5, y = 1.3, w = 9.0, h = 5.0, columns = [1, 1, 2] },
        ]

        [Charts_Grid]
        placeholders = [
            { name = "Chart_1", type = "image", x = 0.5, y = 1.0, w = 4.4, h = 2.8, fit = "cover" },
            { name = "Chart_2", type = "image", x = 5.1, y = 1.0, w = 4.4, h = 2.8 },
        ]

        [Empty]
    "#;

    #[test]
    fn test_template_order_follows_file() {
        let catalog = TemplateCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(
            catalog.template_names(),
            vec!["Title_And_Table", "Charts_Grid", "Empty"]
        );
        assert_eq!(catalog.len(), 3);
        assert!(catalog.placeholders("Empty").is_empty());
    }

    #[test]
    fn test_placeholders_resolve() {
        let catalog = TemplateCatalog::from_toml_str(CATALOG).unwrap();
        let specs = catalog.placeholders("Title_And_Table");
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "Title");

        let PlaceholderKind::Text(options) = &specs[0].kind else {
            panic!("expected text");
        };
        assert_eq!(options.role, TextRole::Title);
        assert_eq!(options.align, TextAlign::Center);

        let PlaceholderKind::Table(options) = &specs[1].kind else {
            panic!("expected table");
        };
        assert_eq!(options.columns, Some(vec![1.0, 1.0, 2.0]));
        assert!(options.header);
    }

    #[test]
    fn test_unknown_template_is_empty() {
        let catalog = TemplateCatalog::from_toml_str(CATALOG).unwrap();
        assert!(catalog.placeholders("Nope").is_empty());
        assert!(!catalog.contains("Nope"));
        assert!(catalog.placeholder("Charts_Grid", "Chart_3").is_none());
    }

    #[test]
    fn test_kind_tag_round_trips() {
        let catalog = TemplateCatalog::from_toml_str(CATALOG).unwrap();
        let source: toml::Table = toml::from_str(CATALOG).unwrap();

        for template in catalog.template_names() {
            let raw = source[template]
                .get("placeholders")
                .and_then(|p| p.as_array())
                .cloned()
                .unwrap_or_default();
            for (spec, entry) in catalog.placeholders(template).iter().zip(raw) {
                assert_eq!(spec.kind.as_str(), entry["type"].as_str().unwrap());
            }
        }
    }

    #[test]
    fn test_duplicate_placeholder_is_fatal() {
        let result = TemplateCatalog::from_toml_str(
            r#"
            [Broken]
            placeholders = [
                { name = "A", type = "text", x = 0, y = 0, w = 1, h = 1 },
                { name = "A", type = "image", x = 0, y = 0, w = 1, h = 1 },
            ]
            "#,
        );
        assert!(matches!(
            result,
            Err(Error::DuplicatePlaceholder { ref template, ref name })
                if template == "Broken" && name == "A"
        ));
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let catalog = TemplateCatalog::from_toml_str(
            r#"
            [Mixed]
            placeholders = [
                { name = "Chart", type = "chart", x = 0, y = 0, w = 1, h = 1 },
                { name = "Body", type = "text", x = 0, y = 1, w = 1, h = 1 },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(catalog.placeholders("Mixed").len(), 1);
        assert_eq!(catalog.skipped().len(), 1);
        assert_eq!(catalog.skipped()[0].placeholder(), "Chart");
    }

    #[test]
    fn test_malformed_is_config_error() {
        let result = TemplateCatalog::from_toml_str(
            "[Bad]\nplaceholders = [{ name = \"A\", type = \"text\", x = \"left\", y = 0, w = 1, h = 1 }]\n",
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TemplateCatalog::load(dir.path().join("templates.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
