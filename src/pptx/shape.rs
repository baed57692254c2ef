//! Shape types and XML generation for slides.
use crate::common::RGBColor;
use crate::common::unit::{PERCENT_SCALE, fraction_to_percent, pt_to_centipoints};
use crate::common::xml::{escape_xml, strip_invalid_xml_chars};
use crate::error::Result;
use std::fmt::Write as FmtWrite;

pub use super::format::{ImageFormat, TextAlign, TextAnchor, TextFormat};

/// Position and size of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Frame {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    fn write_xfrm(&self, xml: &mut String, tag: &str) -> Result<()> {
        write!(
            xml,
            r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
            self.x, self.y, self.width, self.height
        )?;
        Ok(())
    }
}

/// Inner padding of a text body, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Insets {
    pub fn uniform(emu: i64) -> Self {
        Self {
            left: emu,
            top: emu,
            right: emu,
            bottom: emu,
        }
    }
}

/// One paragraph of a text box.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub align: TextAlign,
    /// Line spacing as a multiple of single spacing.
    pub line_spacing: Option<f64>,
}

/// A borderless text box with fixed geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub name: String,
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,
    pub format: TextFormat,
    pub anchor: TextAnchor,
    pub insets: Insets,
}

/// Fractions of the source image trimmed from each edge, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Crop {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Crop {
    pub fn is_empty(&self) -> bool {
        self.left == 0.0 && self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0
    }
}

/// A picture stretched into its frame, optionally cropped at the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub name: String,
    pub frame: Frame,
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub crop: Crop,
    pub description: String,
}

/// A table cell with its own run formatting and optional fill.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub text: String,
    pub format: TextFormat,
    pub fill: Option<RGBColor>,
}

/// A table row with a fixed height in EMUs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub height: i64,
    pub cells: Vec<TableCell>,
}

/// A DrawingML table inside a graphic frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub frame: Frame,
    /// Column widths in EMUs.
    pub columns: Vec<i64>,
    pub rows: Vec<TableRow>,
    pub first_row: bool,
    pub band_rows: bool,
    /// Insets applied to each cell's text body; cell margins are zeroed.
    pub cell_insets: Insets,
}

/// A shape on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Shape ID
    pub(crate) shape_id: u32,
    pub(crate) kind: ShapeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    TextBox(TextBox),
    Picture(Picture),
    Table(Table),
}

impl Shape {
    pub(crate) fn new(shape_id: u32, kind: ShapeKind) -> Self {
        Self { shape_id, kind }
    }

    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Shape name as written to `p:cNvPr/@name`.
    pub fn name(&self) -> &str {
        match &self.kind {
            ShapeKind::TextBox(t) => &t.name,
            ShapeKind::Picture(p) => &p.name,
            ShapeKind::Table(t) => &t.name,
        }
    }

    pub fn frame(&self) -> Frame {
        match &self.kind {
            ShapeKind::TextBox(t) => t.frame,
            ShapeKind::Picture(p) => p.frame,
            ShapeKind::Table(t) => t.frame,
        }
    }

    /// Get image data if this shape is a picture.
    pub(crate) fn image_data(&self) -> Option<(&[u8], ImageFormat)> {
        match &self.kind {
            ShapeKind::Picture(p) => Some((p.data.as_slice(), p.format)),
            _ => None,
        }
    }

    /// Generate XML for this shape.
    ///
    /// Pictures need the relationship ID of their media part; a placeholder is
    /// written when none is given so the XML stays inspectable in isolation.
    pub(crate) fn to_xml(&self, xml: &mut String, image_rel_id: Option<&str>) -> Result<()> {
        match &self.kind {
            ShapeKind::TextBox(text_box) => self.write_text_box(xml, text_box),
            ShapeKind::Picture(picture) => self.write_picture(xml, picture, image_rel_id),
            ShapeKind::Table(table) => self.write_table(xml, table),
        }
    }

    fn write_text_box(&self, xml: &mut String, text_box: &TextBox) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{}"/>"#,
            self.shape_id,
            escape_xml(&text_box.name)
        )?;
        xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr>");
        text_box.frame.write_xfrm(xml, "a:xfrm")?;
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        xml.push_str("<a:noFill/>");
        xml.push_str("<a:ln><a:noFill/></a:ln>");
        xml.push_str("</p:spPr>");

        xml.push_str("<p:txBody>");
        write_body_pr(xml, &text_box.insets, Some(text_box.anchor))?;
        xml.push_str("<a:lstStyle/>");
        if text_box.paragraphs.is_empty() {
            xml.push_str("<a:p>");
            write_run_props(xml, "a:endParaRPr", &text_box.format)?;
            xml.push_str("</a:p>");
        }
        for paragraph in &text_box.paragraphs {
            write_paragraph(xml, paragraph, &text_box.format)?;
        }
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");
        Ok(())
    }

    fn write_picture(
        &self,
        xml: &mut String,
        picture: &Picture,
        image_rel_id: Option<&str>,
    ) -> Result<()> {
        xml.push_str("<p:pic>");
        xml.push_str("<p:nvPicPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{}" descr="{}"/>"#,
            self.shape_id,
            escape_xml(&picture.name),
            escape_xml(&picture.description)
        )?;
        xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvPicPr>");

        xml.push_str("<p:blipFill>");
        let rid = image_rel_id.unwrap_or("rIdImagePlaceholder");
        write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)?;
        if !picture.crop.is_empty() {
            write!(
                xml,
                r#"<a:srcRect l="{}" t="{}" r="{}" b="{}"/>"#,
                fraction_to_percent(picture.crop.left),
                fraction_to_percent(picture.crop.top),
                fraction_to_percent(picture.crop.right),
                fraction_to_percent(picture.crop.bottom)
            )?;
        }
        xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
        xml.push_str("</p:blipFill>");

        xml.push_str("<p:spPr>");
        picture.frame.write_xfrm(xml, "a:xfrm")?;
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        xml.push_str("</p:spPr>");
        xml.push_str("</p:pic>");
        Ok(())
    }

    fn write_table(&self, xml: &mut String, table: &Table) -> Result<()> {
        xml.push_str("<p:graphicFrame>");
        xml.push_str("<p:nvGraphicFramePr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{}"/>"#,
            self.shape_id,
            escape_xml(&table.name)
        )?;
        xml.push_str(
            r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#,
        );
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGraphicFramePr>");
        table.frame.write_xfrm(xml, "p:xfrm")?;

        xml.push_str("<a:graphic>");
        xml.push_str(
            r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">"#,
        );
        xml.push_str("<a:tbl>");
        write!(
            xml,
            r#"<a:tblPr firstRow="{}" bandRow="{}"/>"#,
            u8::from(table.first_row),
            u8::from(table.band_rows)
        )?;

        xml.push_str("<a:tblGrid>");
        for width in &table.columns {
            write!(xml, r#"<a:gridCol w="{}"/>"#, width)?;
        }
        xml.push_str("</a:tblGrid>");

        for row in &table.rows {
            write!(xml, r#"<a:tr h="{}">"#, row.height)?;
            for cell in &row.cells {
                xml.push_str("<a:tc>");
                xml.push_str("<a:txBody>");
                write_body_pr(xml, &table.cell_insets, None)?;
                xml.push_str("<a:lstStyle/>");
                let paragraph = Paragraph {
                    text: cell.text.clone(),
                    align: TextAlign::Left,
                    line_spacing: None,
                };
                write_paragraph(xml, &paragraph, &cell.format)?;
                xml.push_str("</a:txBody>");
                xml.push_str(r#"<a:tcPr marL="0" marR="0" marT="0" marB="0">"#);
                if let Some(fill) = cell.fill {
                    write!(
                        xml,
                        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                        fill.to_hex()
                    )?;
                }
                xml.push_str("</a:tcPr>");
                xml.push_str("</a:tc>");
            }
            xml.push_str("</a:tr>");
        }

        xml.push_str("</a:tbl>");
        xml.push_str("</a:graphicData>");
        xml.push_str("</a:graphic>");
        xml.push_str("</p:graphicFrame>");
        Ok(())
    }
}

fn write_body_pr(xml: &mut String, insets: &Insets, anchor: Option<TextAnchor>) -> Result<()> {
    write!(
        xml,
        r#"<a:bodyPr wrap="square" lIns="{}" tIns="{}" rIns="{}" bIns="{}" rtlCol="0""#,
        insets.left, insets.top, insets.right, insets.bottom
    )?;
    if let Some(anchor) = anchor {
        write!(xml, r#" anchor="{}""#, anchor.as_ooxml())?;
    }
    xml.push_str("><a:noAutofit/></a:bodyPr>");
    Ok(())
}

fn write_paragraph(xml: &mut String, paragraph: &Paragraph, format: &TextFormat) -> Result<()> {
    xml.push_str("<a:p>");
    write!(xml, r#"<a:pPr algn="{}">"#, paragraph.align.as_ooxml())?;
    if let Some(spacing) = paragraph.line_spacing {
        write!(
            xml,
            r#"<a:lnSpc><a:spcPct val="{}"/></a:lnSpc>"#,
            (spacing * PERCENT_SCALE).round() as u32
        )?;
    }
    xml.push_str("</a:pPr>");

    let text = strip_invalid_xml_chars(&paragraph.text);
    if text.is_empty() {
        write_run_props(xml, "a:endParaRPr", format)?;
    } else {
        xml.push_str("<a:r>");
        write_run_props(xml, "a:rPr", format)?;
        write!(xml, "<a:t>{}</a:t>", escape_xml(&text))?;
        xml.push_str("</a:r>");
    }
    xml.push_str("</a:p>");
    Ok(())
}

fn write_run_props(xml: &mut String, tag: &str, format: &TextFormat) -> Result<()> {
    write!(xml, r#"<{} lang="en-US""#, tag)?;
    if let Some(size) = format.size {
        write!(xml, r#" sz="{}""#, pt_to_centipoints(size))?;
    }
    match format.bold {
        Some(true) => xml.push_str(r#" b="1""#),
        Some(false) => xml.push_str(r#" b="0""#),
        None => {},
    }
    xml.push_str(r#" dirty="0">"#);

    // Child order is fixed by the schema: fill before typeface.
    if let Some(color) = format.color {
        write!(xml, r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#, color.to_hex())?;
    }
    if let Some(ref font) = format.font {
        write!(xml, r#"<a:latin typeface="{}"/>"#, escape_xml(font))?;
    }
    write!(xml, "</{}>", tag)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_box(paragraphs: Vec<Paragraph>) -> Shape {
        Shape::new(
            2,
            ShapeKind::TextBox(TextBox {
                name: "Body".to_string(),
                frame: Frame::new(914400, 914400, 3657600, 914400),
                paragraphs,
                format: TextFormat {
                    font: Some("Calibri".to_string()),
                    size: Some(14.0),
                    bold: Some(true),
                    color: Some(RGBColor::new(0x1F, 0x29, 0x37)),
                },
                anchor: TextAnchor::Middle,
                insets: Insets::uniform(45720),
            }),
        )
    }

    #[test]
    fn test_text_box_xml() {
        let shape = text_box(vec![Paragraph {
            text: "Revenue & margin".to_string(),
            align: TextAlign::Center,
            line_spacing: Some(1.15),
        }]);
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();

        assert!(xml.contains(r#"<p:cNvPr id="2" name="Body"/>"#));
        assert!(xml.contains(r#"txBox="1""#));
        assert!(xml.contains(r#"anchor="ctr""#));
        assert!(xml.contains("<a:noAutofit/>"));
        assert!(xml.contains(r#"lIns="45720""#));
        assert!(xml.contains(r#"<a:pPr algn="ctr">"#));
        assert!(xml.contains(r#"<a:spcPct val="115000"/>"#));
        assert!(xml.contains(r#"sz="1400" b="1""#));
        assert!(xml.contains("<a:t>Revenue &amp; margin</a:t>"));
        assert!(xml.contains("<a:ln><a:noFill/></a:ln>"));
    }

    #[test]
    fn test_empty_text_box_still_has_paragraph() {
        let shape = text_box(Vec::new());
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains("<a:p><a:endParaRPr"));
        assert!(!xml.contains("<a:r>"));
    }

    #[test]
    fn test_picture_crop_written_as_src_rect() {
        let shape = Shape::new(
            3,
            ShapeKind::Picture(Picture {
                name: "Chart".to_string(),
                frame: Frame::new(0, 0, 100, 100),
                data: vec![0x89, 0x50, 0x4E, 0x47],
                format: ImageFormat::Png,
                crop: Crop {
                    left: 0.125,
                    top: 0.0,
                    right: 0.125,
                    bottom: 0.0,
                },
                description: "chart.png".to_string(),
            }),
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert!(xml.contains(r#"<a:srcRect l="12500" t="0" r="12500" b="0"/>"#));
    }

    #[test]
    fn test_uncropped_picture_has_no_src_rect() {
        let shape = Shape::new(
            3,
            ShapeKind::Picture(Picture {
                name: "Logo".to_string(),
                frame: Frame::new(0, 0, 100, 100),
                data: Vec::new(),
                format: ImageFormat::Png,
                crop: Crop::default(),
                description: String::new(),
            }),
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, Some("rId2")).unwrap();
        assert!(!xml.contains("srcRect"));
    }

    #[test]
    fn test_table_xml() {
        let header = TableCell {
            text: "Region".to_string(),
            format: TextFormat {
                bold: Some(true),
                ..Default::default()
            },
            fill: Some(RGBColor::new(0xE5, 0xE7, 0xEB)),
        };
        let body = TableCell {
            text: "EMEA".to_string(),
            ..Default::default()
        };
        let shape = Shape::new(
            4,
            ShapeKind::Table(Table {
                name: "Data".to_string(),
                frame: Frame::new(0, 0, 1000, 200),
                columns: vec![1000],
                rows: vec![
                    TableRow {
                        height: 100,
                        cells: vec![header],
                    },
                    TableRow {
                        height: 100,
                        cells: vec![body],
                    },
                ],
                first_row: true,
                band_rows: false,
                cell_insets: Insets::uniform(45720),
            }),
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, None).unwrap();
        assert!(xml.contains(r#"<a:tblPr firstRow="1" bandRow="0"/>"#));
        assert!(xml.contains(r#"<a:gridCol w="1000"/>"#));
        assert_eq!(xml.matches(r#"<a:tr h="100">"#).count(), 2);
        assert!(xml.contains(
            r#"<a:tcPr marL="0" marR="0" marT="0" marB="0"><a:solidFill><a:srgbClr val="E5E7EB"/>"#
        ));
        assert!(xml.contains("<a:t>EMEA</a:t>"));
    }
}
