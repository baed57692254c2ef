//! Ad-hoc placeholder dictionaries from older callers.
//!
//! A legacy template is a JSON object with a `placeholders` array whose
//! entries use loose, aliased keys (`left`/`l` for `x`, `cx` for `w`, and so
//! on). Each entry is translated into a [`PlaceholderSpec`] and rendered by
//! the regular [`PlacementEngine`]; the template catalog is not involved.
//!
//! New code should define templates in the catalog instead. This path is
//! kept for existing callers only.

use crate::catalog::{PlaceholderSpec, RawPlaceholder};
use crate::content::ContentMap;
use crate::engine::PlacementEngine;
use crate::error::Result;
use crate::pptx::Slide;
use crate::warning::Warning;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A legacy template: a bare list of loosely keyed placeholders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyTemplate {
    pub placeholders: Vec<LegacyPlaceholder>,
}

impl LegacyTemplate {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// One legacy placeholder, kept as the raw JSON object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LegacyPlaceholder(pub Map<String, Value>);

impl LegacyPlaceholder {
    fn number(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|k| match self.0.get(*k)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    fn string(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|k| match self.0.get(*k)? {
            Value::String(s) => Some(s.clone()),
            _ => None,
        })
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    fn numbers(&self, key: &str) -> Option<Vec<f64>> {
        self.0
            .get(key)?
            .as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }
}

/// Translate a legacy placeholder into a placeholder specification.
///
/// Coordinates fall back to x=1, y=1, w=4, h=1 inches; an explicit 0 is
/// kept. An unrecognized `type` is returned as a warning.
pub fn normalize(placeholder: &LegacyPlaceholder) -> std::result::Result<PlaceholderSpec, Warning> {
    let p = placeholder;
    let raw = RawPlaceholder {
        name: p.string(&["name"]).unwrap_or_default(),
        kind: p.string(&["type"]).unwrap_or_else(|| "text".to_string()),
        x: p.number(&["x", "left", "l"]).unwrap_or(1.0),
        y: p.number(&["y", "top", "t"]).unwrap_or(1.0),
        w: p.number(&["w", "cx"]).unwrap_or(4.0),
        h: p.number(&["h", "cy"]).unwrap_or(1.0),
        align: p.string(&["alignment", "align"]),
        valign: p.string(&["valign"]),
        font_size: p.number(&["font_size"]),
        bold: p.flag("bold"),
        fit: p.string(&["fit"]),
        header: p.flag("header"),
        zebra: p.flag("zebra"),
        row_height: p.number(&["row_height"]),
        columns: p.numbers("columns"),
        ..Default::default()
    };
    raw.into_spec()
}

/// Render a legacy template onto `slide` with the given engine.
pub fn render_legacy(
    slide: &mut Slide,
    engine: &PlacementEngine<'_>,
    template: &LegacyTemplate,
    content: &ContentMap,
) -> Vec<Warning> {
    log::debug!(
        "rendering legacy template with {} placeholders",
        template.placeholders.len()
    );
    template
        .placeholders
        .iter()
        .filter_map(|placeholder| match normalize(placeholder) {
            Ok(spec) => engine.place(slide, &spec, content.get(&spec.name)),
            Err(warning) => Some(warning),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::BrandProfile;
    use crate::catalog::{FitMode, ImageOptions, PlaceholderKind, TableOptions};
    use crate::pptx::TextAlign;
    use serde_json::json;

    fn legacy(value: Value) -> LegacyPlaceholder {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_aliases_resolve() {
        let spec = normalize(&legacy(json!({
            "name": "Body", "left": 2, "t": 1.5, "cx": 6, "cy": 3, "alignment": "right", "align": "center"
        })))
        .unwrap();
        assert_eq!((spec.x, spec.y, spec.w, spec.h), (2.0, 1.5, 6.0, 3.0));
        let PlaceholderKind::Text(options) = spec.kind else {
            panic!("expected text");
        };
        assert_eq!(options.align, TextAlign::Right);
    }

    #[test]
    fn test_fallbacks_and_zero() {
        let spec = normalize(&legacy(json!({ "name": "Body" }))).unwrap();
        assert_eq!((spec.x, spec.y, spec.w, spec.h), (1.0, 1.0, 4.0, 1.0));
        assert_eq!(spec.kind.as_str(), "text");

        let spec = normalize(&legacy(json!({ "name": "Edge", "x": 0, "y": 0 }))).unwrap();
        assert_eq!((spec.x, spec.y), (0.0, 0.0));
    }

    #[test]
    fn test_kind_options_pass_through() {
        let spec =
            normalize(&legacy(json!({ "name": "Pic", "type": "IMAGE", "fit": "cover" }))).unwrap();
        assert_eq!(spec.kind, PlaceholderKind::Image(ImageOptions { fit: FitMode::Cover }));

        let spec = normalize(&legacy(json!({
            "name": "Grid", "type": "table", "header": false, "row_height": 0.5, "columns": [3, 1]
        })))
        .unwrap();
        assert_eq!(
            spec.kind,
            PlaceholderKind::Table(TableOptions {
                header: false,
                row_height: 0.5,
                columns: Some(vec![3.0, 1.0]),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_unknown_type_warns() {
        let warning = normalize(&legacy(json!({ "name": "Chart", "type": "chart" }))).unwrap_err();
        assert!(matches!(warning, Warning::UnknownKind { ref kind, .. } if kind == "chart"));
    }

    #[test]
    fn test_render_legacy() {
        let template = LegacyTemplate::from_json_str(
            r#"{ "placeholders": [
                { "name": "Title", "type": "text", "x": 0.5, "y": 0.3, "cx": 9, "cy": 1 },
                { "name": "Chart", "type": "chart" },
                { "name": "Grid", "type": "table", "y": 2 }
            ] }"#,
        )
        .unwrap();
        let content = ContentMap::new()
            .with("Title", "Legacy deck")
            .with("Grid", vec![vec!["a", "b"], vec!["c", "d"]]);

        let brand = BrandProfile::default();
        let engine = PlacementEngine::new(&brand);
        let mut slide = Slide::new(256);
        let warnings = render_legacy(&mut slide, &engine, &template, &content);

        assert_eq!(slide.shape_count(), 2);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].placeholder(), "Chart");
    }
}
