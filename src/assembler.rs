//! Slide assembly: fills every placeholder of a named template.

use crate::brand::BrandProfile;
use crate::catalog::TemplateCatalog;
use crate::content::ContentMap;
use crate::engine::PlacementEngine;
use crate::pptx::{Presentation, Slide};
use crate::warning::Warning;

/// Walks a template's placeholders and hands each one to the placement
/// engine.
#[derive(Debug, Clone, Copy)]
pub struct SlideAssembler<'a> {
    catalog: &'a TemplateCatalog,
    engine: PlacementEngine<'a>,
}

impl<'a> SlideAssembler<'a> {
    pub fn new(catalog: &'a TemplateCatalog, brand: &'a BrandProfile) -> Self {
        Self {
            catalog,
            engine: PlacementEngine::new(brand),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        self.catalog
    }

    pub fn engine(&self) -> PlacementEngine<'a> {
        self.engine
    }

    /// Render `template` onto an existing slide.
    ///
    /// An unknown template adds nothing. Content for names the template does
    /// not declare is ignored.
    pub fn apply(&self, slide: &mut Slide, template: &str, content: &ContentMap) -> Vec<Warning> {
        let placeholders = self.catalog.placeholders(template);
        if placeholders.is_empty() {
            log::debug!("template '{}' has no placeholders", template);
        }

        placeholders
            .iter()
            .filter_map(|spec| self.engine.place(slide, spec, content.get(&spec.name)))
            .collect()
    }

    /// Append a blank slide to `presentation` and render `template` onto it.
    pub fn add_slide(
        &self,
        presentation: &mut Presentation,
        template: &str,
        content: &ContentMap,
    ) -> Vec<Warning> {
        let slide = presentation.add_slide();
        self.apply(slide, template, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::png_file;

    const CATALOG: &str = r#"
        [Report]
        placeholders = [
            { name = "Title", type = "text", x = 0.5, y = 0.3, w = 9, h = 0.8, role = "title" },
            { name = "Chart_1", type = "image", x = 0.5, y = 1.2, w = 4.4, h = 2.8 },
            { name = "Chart_2", type = "image", x = 5.1, y = 1.2, w = 4.4, h = 2.8, fit = "cover" },
            { name = "Table_1", type = "table", x = 0.5, y = 4.2, w = 9, h = 2.5 },
        ]
    "#;

    #[test]
    fn test_one_failure_does_not_stop_siblings() {
        let catalog = TemplateCatalog::from_toml_str(CATALOG).unwrap();
        let brand = BrandProfile::default();
        let assembler = SlideAssembler::new(&catalog, &brand);
        let image = png_file(64, 48);

        let content = ContentMap::new()
            .with("Title", "Quarterly review")
            .with("Chart_1", "/nonexistent/q3.png")
            .with("Chart_2", image.path().to_string_lossy().into_owned())
            .with("Table_1", r#"[["Region","Revenue"],["EMEA","12"]]"#)
            .with("Unrelated", "ignored");

        let mut pres = Presentation::new();
        let warnings = assembler.add_slide(&mut pres, "Report", &content);

        assert_eq!(pres.slide_count(), 1);
        let slide = &pres.slides()[0];
        assert_eq!(slide.shape_count(), 3);
        assert!(slide.shape_by_name("Chart_1").is_none());
        assert!(slide.shape_by_name("Chart_2").is_some());
        assert!(slide.shape_by_name("Unrelated").is_none());

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].placeholder(), "Chart_1");
    }

    #[test]
    fn test_unknown_template_adds_blank_slide() {
        let catalog = TemplateCatalog::from_toml_str(CATALOG).unwrap();
        let brand = BrandProfile::default();
        let assembler = SlideAssembler::new(&catalog, &brand);

        let mut pres = Presentation::new();
        let warnings = assembler.add_slide(&mut pres, "Nope", &ContentMap::new());
        assert!(warnings.is_empty());
        assert_eq!(pres.slides()[0].shape_count(), 0);
    }

    #[test]
    fn test_missing_content_renders_empty_text() {
        let catalog = TemplateCatalog::from_toml_str(CATALOG).unwrap();
        let brand = BrandProfile::default();
        let assembler = SlideAssembler::new(&catalog, &brand);

        let mut pres = Presentation::new();
        let warnings = assembler.add_slide(&mut pres, "Report", &ContentMap::new());
        let slide = &pres.slides()[0];
        // Title renders empty, images warn, the table has no rows
        assert_eq!(slide.shape_count(), 1);
        assert_eq!(warnings.len(), 2);
    }
}
