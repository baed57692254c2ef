//! Single-call deck generation.

use crate::assembler::SlideAssembler;
use crate::brand::BrandProfile;
use crate::catalog::TemplateCatalog;
use crate::config::Config;
use crate::content::ContentMap;
use crate::engine::PlacementEngine;
use crate::error::{Error, Result};
use crate::legacy::{LegacyTemplate, render_legacy};
use crate::pptx::Presentation;
use crate::warning::Warning;
use serde_json::Value;
use std::path::Path;

/// How a caller names the layout of a deck.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateRef {
    /// A template defined in the catalog
    Named(String),
    /// A legacy placeholder dictionary
    Legacy(LegacyTemplate),
}

impl TemplateRef {
    /// Interpret a JSON value: a string names a catalog template, an object
    /// with `placeholders` is a legacy template.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Self::Named(name)),
            Value::Object(map) if map.contains_key("placeholders") => {
                Ok(Self::Legacy(LegacyTemplate::from_value(Value::Object(map))?))
            },
            other => Err(Error::InvalidTemplateReference(other.to_string())),
        }
    }
}

impl From<&str> for TemplateRef {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for TemplateRef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<LegacyTemplate> for TemplateRef {
    fn from(template: LegacyTemplate) -> Self {
        Self::Legacy(template)
    }
}

/// Builds one-slide decks from a catalog and a brand profile.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    catalog: TemplateCatalog,
    brand: BrandProfile,
}

impl DeckBuilder {
    pub fn new(catalog: TemplateCatalog, brand: BrandProfile) -> Self {
        Self { catalog, brand }
    }

    /// Load the catalog and the brand profile named by `config`.
    ///
    /// A missing or malformed catalog is an error. The brand profile falls
    /// back to its defaults.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = TemplateCatalog::load(&config.templates)?;
        let brand = BrandProfile::load_or_default(&config.brand);
        log::debug!(
            "loaded {} templates from {}",
            catalog.len(),
            config.templates.display()
        );
        Ok(Self::new(catalog, brand))
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn brand(&self) -> &BrandProfile {
        &self.brand
    }

    /// Render a one-slide presentation in memory.
    pub fn build(
        &self,
        template: &TemplateRef,
        content: &ContentMap,
    ) -> Result<(Presentation, Vec<Warning>)> {
        let mut presentation = Presentation::new();

        let warnings = match template {
            TemplateRef::Named(name) => {
                if !self.catalog.contains(name) {
                    return Err(Error::InvalidTemplateReference(name.clone()));
                }
                SlideAssembler::new(&self.catalog, &self.brand).add_slide(
                    &mut presentation,
                    name,
                    content,
                )
            },
            TemplateRef::Legacy(legacy) => {
                log::warn!(
                    "legacy template dictionaries are deprecated, define a catalog template instead"
                );
                let engine = PlacementEngine::new(&self.brand);
                render_legacy(presentation.add_slide(), &engine, legacy, content)
            },
        };

        Ok((presentation, warnings))
    }

    /// Render and save a one-slide presentation to `output`.
    pub fn create_deck<P: AsRef<Path>>(
        &self,
        output: P,
        template: &TemplateRef,
        content: &ContentMap,
    ) -> Result<Vec<Warning>> {
        let output = output.as_ref();
        let (presentation, warnings) = self.build(template, content)?;
        presentation.save(output)?;
        log::info!("presentation created: {}", output.display());
        Ok(warnings)
    }
}

/// Load the default configuration and write one deck.
pub fn create_deck<P: AsRef<Path>>(
    output: P,
    template: &TemplateRef,
    content: &ContentMap,
) -> Result<Vec<Warning>> {
    DeckBuilder::from_config(&Config::default())?.create_deck(output, template, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Read;

    fn builder() -> DeckBuilder {
        let catalog = TemplateCatalog::from_toml_str(
            r#"
            [Commentary_Only]
            placeholders = [
                { name = "Title", type = "text", x = 0.5, y = 0.3, w = 9, h = 0.8, role = "title" },
                { name = "Body", type = "text", x = 0.5, y = 1.3, w = 9, h = 5.5 },
            ]
            "#,
        )
        .unwrap();
        DeckBuilder::new(catalog, BrandProfile::default())
    }

    #[test]
    fn test_shipped_config_loads() {
        let config = Config::in_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/config"));
        let builder = DeckBuilder::from_config(&config).unwrap();
        assert_eq!(
            builder.catalog().template_names(),
            vec!["Commentary_Only", "Charts_Grid", "Table_Only", "Title_And_Table"]
        );
        assert!(builder.catalog().skipped().is_empty());
        assert_eq!(builder.brand(), &BrandProfile::default());
    }

    #[test]
    fn test_missing_catalog_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = DeckBuilder::from_config(&Config::in_dir(dir.path()));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_template_ref_from_json() {
        assert_eq!(
            TemplateRef::from_json(json!("Commentary_Only")).unwrap(),
            TemplateRef::from("Commentary_Only")
        );
        assert!(matches!(
            TemplateRef::from_json(json!({ "placeholders": [] })).unwrap(),
            TemplateRef::Legacy(_)
        ));
        assert!(matches!(
            TemplateRef::from_json(json!({ "slides": [] })),
            Err(Error::InvalidTemplateReference(_))
        ));
        assert!(matches!(
            TemplateRef::from_json(json!(42)),
            Err(Error::InvalidTemplateReference(_))
        ));
    }

    #[test]
    fn test_unknown_name_fails_before_rendering() {
        let result = builder().build(&"Nope".into(), &ContentMap::new());
        assert!(matches!(result, Err(Error::InvalidTemplateReference(ref name)) if name == "Nope"));
    }

    #[test]
    fn test_named_build() {
        let content = ContentMap::new()
            .with("Title", "Weekly update")
            .with("Body", "All green.");
        let (pres, warnings) = builder().build(&"Commentary_Only".into(), &content).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(pres.slide_count(), 1);
        assert_eq!(pres.slides()[0].shape_count(), 2);
    }

    #[test]
    fn test_legacy_build() {
        let template = TemplateRef::from_json(json!({
            "placeholders": [{ "name": "Note", "type": "text", "left": 1, "top": 1, "cx": 6, "cy": 1 }]
        }))
        .unwrap();
        let content = ContentMap::new().with("Note", "From a legacy caller");
        let (pres, warnings) = builder().build(&template, &content).unwrap();
        assert!(warnings.is_empty());
        assert!(pres.slides()[0].shape_by_name("Note").is_some());
    }

    #[test]
    fn test_create_deck_writes_package() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("deck.pptx");
        let content = ContentMap::new().with("Title", "Saved & sound");

        let warnings = builder()
            .create_deck(&output, &"Commentary_Only".into(), &content)
            .unwrap();
        assert!(warnings.is_empty());

        let file = std::fs::File::open(&output).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut slide = String::new();
        archive
            .by_name("ppt/slides/slide1.xml")
            .unwrap()
            .read_to_string(&mut slide)
            .unwrap();
        assert!(slide.contains("Saved &amp; sound"));
    }
}
