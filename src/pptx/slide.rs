//! Slide model and slide-part XML generation.
use crate::error::Result;

use super::format::ImageFormat;
use super::shape::{Picture, Shape, ShapeKind, Table, TextBox};

/// A blank slide onto which shapes are appended.
#[derive(Debug, Clone)]
pub struct Slide {
    /// Slide ID (unique within the presentation)
    pub(crate) slide_id: u32,
    /// Shapes on the slide, in z-order
    pub(crate) shapes: Vec<Shape>,
}

impl Slide {
    /// Create a new empty slide.
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    // IDs: 1=shape tree, 2+=shapes
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 2) as u32
    }

    fn push(&mut self, kind: ShapeKind) -> u32 {
        let shape_id = self.next_shape_id();
        self.shapes.push(Shape::new(shape_id, kind));
        shape_id
    }

    /// Add a text box and return its shape ID.
    pub fn add_text_box(&mut self, text_box: TextBox) -> u32 {
        self.push(ShapeKind::TextBox(text_box))
    }

    /// Add a picture and return its shape ID.
    pub fn add_picture(&mut self, picture: Picture) -> u32 {
        self.push(ShapeKind::Picture(picture))
    }

    /// Add a table and return its shape ID.
    pub fn add_table(&mut self, table: Table) -> u32 {
        self.push(ShapeKind::Table(table))
    }

    /// Shapes on the slide, in the order they were added.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Get the number of shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Find a shape by the name it was given.
    pub fn shape_by_name(&self, name: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.name() == name)
    }

    /// Collect all images on the slide, in shape order.
    pub(crate) fn collect_images(&self) -> Vec<(&[u8], ImageFormat)> {
        self.shapes.iter().filter_map(Shape::image_data).collect()
    }

    /// Generate slide XML content.
    ///
    /// `image_rel_ids` holds one relationship ID per picture, in shape order.
    pub(crate) fn to_xml(&self, image_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Write group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        let mut image_counter = 0;
        for shape in &self.shapes {
            let rel_id = if matches!(shape.kind, ShapeKind::Picture(_)) {
                let rid = image_rel_ids.get(image_counter).map(String::as_str);
                image_counter += 1;
                rid
            } else {
                None
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pptx::shape::{Crop, Frame, Insets, Paragraph, TextAlign, TextAnchor, TextFormat};

    fn caption(name: &str) -> TextBox {
        TextBox {
            name: name.to_string(),
            frame: Frame::new(0, 0, 100, 100),
            paragraphs: vec![Paragraph {
                text: name.to_string(),
                align: TextAlign::Left,
                line_spacing: None,
            }],
            format: TextFormat::default(),
            anchor: TextAnchor::Top,
            insets: Insets::default(),
        }
    }

    #[test]
    fn test_shape_ids_are_sequential() {
        let mut slide = Slide::new(256);
        assert_eq!(slide.add_text_box(caption("a")), 2);
        assert_eq!(slide.add_text_box(caption("b")), 3);
        assert_eq!(slide.shape_count(), 2);
        assert_eq!(slide.shape_by_name("b").map(Shape::shape_id), Some(3));
        assert!(slide.shape_by_name("c").is_none());
    }

    #[test]
    fn test_pictures_get_rel_ids_in_order() {
        let mut slide = Slide::new(256);
        for name in ["left", "right"] {
            slide.add_picture(Picture {
                name: name.to_string(),
                frame: Frame::default(),
                data: vec![0x89, 0x50, 0x4E, 0x47],
                format: ImageFormat::Png,
                crop: Crop::default(),
                description: String::new(),
            });
        }
        slide.add_text_box(caption("note"));

        let xml = slide
            .to_xml(&["rId2".to_string(), "rId3".to_string()])
            .unwrap();
        let first = xml.find(r#"r:embed="rId2""#).unwrap();
        let second = xml.find(r#"r:embed="rId3""#).unwrap();
        assert!(first < second);
        assert_eq!(slide.collect_images().len(), 2);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.ends_with("</p:sld>"));
    }
}
