//! Package writer for PPTX presentations.
//!
//! Serializes a [`Presentation`] into an OPC package: `[Content_Types].xml`,
//! package relationships, document properties, the presentation part with its
//! master/layout/theme, one part per slide, and the media those slides embed.

use crate::common::xml::escape_xml;
use crate::error::Result;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use super::presentation::Presentation;
use super::template;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const SLIDE_MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const SLIDE_LAYOUT_PART: &str = "ppt/slideLayouts/slideLayout1.xml";
const THEME_PART: &str = "ppt/theme/theme1.xml";
const PRES_PROPS_PART: &str = "ppt/presProps.xml";
const TABLE_STYLES_PART: &str = "ppt/tableStyles.xml";
const CORE_PROPS_PART: &str = "docProps/core.xml";
const APP_PROPS_PART: &str = "docProps/app.xml";

/// Package writer that serializes a presentation to a ZIP file.
pub struct PackageWriter;

impl PackageWriter {
    /// Write a presentation package to a file.
    pub fn write<P: AsRef<Path>>(path: P, presentation: &Presentation) -> Result<()> {
        let bytes = Self::to_bytes(presentation)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize a presentation package to bytes.
    pub fn to_bytes(presentation: &Presentation) -> Result<Vec<u8>> {
        let parts = Self::build_parts(presentation)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for part in &parts {
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.data)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Build every part of the package, `[Content_Types].xml` first.
    fn build_parts(presentation: &Presentation) -> Result<Vec<PackagePart>> {
        let mut parts = Vec::new();
        let mut content_types = ContentTypesItem::new();

        // Package relationships
        let mut pkg_rels = Relationships::new();
        pkg_rels.add(rt::OFFICE_DOCUMENT, PRESENTATION_PART);
        pkg_rels.add(rt::CORE_PROPERTIES, CORE_PROPS_PART);
        pkg_rels.add(rt::EXTENDED_PROPERTIES, APP_PROPS_PART);
        parts.push(PackagePart::new("_rels/.rels", pkg_rels.to_xml()?));

        // Document properties
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        parts.push(PackagePart::new(CORE_PROPS_PART, template::core_props_xml(&timestamp)));
        content_types.add_override(CORE_PROPS_PART, ct::OPC_CORE_PROPERTIES);
        parts.push(PackagePart::new(
            APP_PROPS_PART,
            template::app_props_xml(presentation.slide_count()),
        ));
        content_types.add_override(APP_PROPS_PART, ct::OFC_EXTENDED_PROPERTIES);

        // Presentation-level relationships; slides follow the fixed parts.
        let mut pres_rels = Relationships::new();
        pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        pres_rels.add(rt::THEME, "theme/theme1.xml");
        pres_rels.add(rt::PRES_PROPS, "presProps.xml");
        pres_rels.add(rt::TABLE_STYLES, "tableStyles.xml");
        let slide_rel_ids: Vec<String> = (1..=presentation.slide_count())
            .map(|n| pres_rels.add(rt::SLIDE, &format!("slides/slide{}.xml", n)))
            .collect();

        parts.push(PackagePart::new(
            PRESENTATION_PART,
            presentation.to_xml(&slide_rel_ids)?,
        ));
        content_types.add_override(PRESENTATION_PART, ct::PML_PRESENTATION_MAIN);
        parts.push(PackagePart::new(
            "ppt/_rels/presentation.xml.rels",
            pres_rels.to_xml()?,
        ));

        // Master, layout, theme and presentation properties
        let mut master_rels = Relationships::new();
        master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(rt::THEME, "../theme/theme1.xml");
        parts.push(PackagePart::new(SLIDE_MASTER_PART, template::slide_master_xml()));
        parts.push(PackagePart::new(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            master_rels.to_xml()?,
        ));
        content_types.add_override(SLIDE_MASTER_PART, ct::PML_SLIDE_MASTER);

        let mut layout_rels = Relationships::new();
        layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        parts.push(PackagePart::new(SLIDE_LAYOUT_PART, template::blank_layout_xml()));
        parts.push(PackagePart::new(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            layout_rels.to_xml()?,
        ));
        content_types.add_override(SLIDE_LAYOUT_PART, ct::PML_SLIDE_LAYOUT);

        parts.push(PackagePart::new(THEME_PART, template::theme_xml()));
        content_types.add_override(THEME_PART, ct::OFC_THEME);
        parts.push(PackagePart::new(PRES_PROPS_PART, template::pres_props_xml()));
        content_types.add_override(PRES_PROPS_PART, ct::PML_PRES_PROPS);
        parts.push(PackagePart::new(TABLE_STYLES_PART, template::table_styles_xml()));
        content_types.add_override(TABLE_STYLES_PART, ct::PML_TABLE_STYLES);

        // Media: identical image bytes share one part.
        let mut slide_rels: Vec<Relationships> = presentation
            .slides()
            .iter()
            .map(|_| {
                let mut rels = Relationships::new();
                rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
                rels
            })
            .collect();
        let mut image_rel_ids: Vec<Vec<String>> = vec![Vec::new(); presentation.slide_count()];
        let mut media_names: HashMap<&[u8], String> = HashMap::new();
        let mut media_parts = Vec::new();

        for (slide_index, data, format) in presentation.collect_all_images() {
            let next_index = media_names.len() + 1;
            let media_name = media_names
                .entry(data)
                .or_insert_with(|| {
                    let name = format!("ppt/media/image{}.{}", next_index, format.extension());
                    media_parts.push(PackagePart::new(&name, data.to_vec()));
                    name
                })
                .clone();
            content_types.add_default(format.extension(), format.mime_type());

            let target = format!("../{}", media_name.trim_start_matches("ppt/"));
            let rel_id = slide_rels[slide_index].add(rt::IMAGE, &target);
            image_rel_ids[slide_index].push(rel_id);
        }

        // Slides
        for (index, slide) in presentation.slides().iter().enumerate() {
            let number = index + 1;
            let partname = format!("ppt/slides/slide{}.xml", number);
            parts.push(PackagePart::new(&partname, slide.to_xml(&image_rel_ids[index])?));
            parts.push(PackagePart::new(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide_rels[index].to_xml()?,
            ));
            content_types.add_override(&partname, ct::PML_SLIDE);
        }
        parts.extend(media_parts);

        parts.insert(0, PackagePart::new("[Content_Types].xml", content_types.to_xml()?));
        Ok(parts)
    }
}

/// One named entry in the package.
#[derive(Debug)]
struct PackagePart {
    name: String,
    data: Vec<u8>,
}

impl PackagePart {
    fn new(name: &str, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.to_string(),
            data: data.into(),
        }
    }
}

/// Relationships of one source part, numbered `rId1`, `rId2`, ...
#[derive(Debug, Default)]
struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its ID.
    fn add(&mut self, rel_type: &'static str, target: &str) -> String {
        let rel_id = format!("rId{}", self.entries.len() + 1);
        self.entries
            .push((rel_id.clone(), rel_type, target.to_string()));
        rel_id
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(xml, r#"<Relationships xmlns="{}">"#, ns::OPC_RELATIONSHIPS)?;
        for (rel_id, rel_type, target) in &self.entries {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                rel_id,
                rel_type,
                escape_xml(target)
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// Helper for building [Content_Types].xml content.
///
/// Manages Default and Override elements for content type mapping.
struct ContentTypesItem {
    /// Default content types by extension
    defaults: BTreeMap<String, String>,
    /// Override content types by partname
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();

        // Add standard defaults
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), ct::XML.to_string());

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn add_default(&mut self, ext: &str, content_type: &str) {
        self.defaults
            .insert(ext.to_string(), content_type.to_string());
    }

    /// Partnames are stored zip-relative and written with a leading slash.
    fn add_override(&mut self, partname: &str, content_type: &str) {
        self.overrides
            .insert(format!("/{}", partname), content_type.to_string());
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(xml, r#"<Types xmlns="{}">"#, ns::OPC_CONTENT_TYPES)?;

        for (ext, content_type) in &self.defaults {
            write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            )?;
        }

        for (partname, content_type) in &self.overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            )?;
        }

        xml.push_str("</Types>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::pptx::format::{TextAlign, TextAnchor, TextFormat};
    use crate::pptx::shape::{
        Crop, Frame, ImageFormat, Insets, Paragraph, Picture, Table, TableCell, TableRow, TextBox,
    };
    use std::io::Read;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn picture(data: Vec<u8>) -> Picture {
        Picture {
            name: "Image".to_string(),
            frame: Frame::new(0, 0, 914400, 914400),
            data,
            format: ImageFormat::Png,
            crop: Crop::default(),
            description: String::new(),
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_content_types_xml() {
        let mut cti = ContentTypesItem::new();
        cti.add_default("png", "image/png");
        cti.add_override("ppt/slides/slide1.xml", ct::PML_SLIDE);

        let xml = cti.to_xml().unwrap();

        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Override PartName="/ppt/slides/slide1.xml""#));
    }

    #[test]
    fn test_relationship_ids_are_sequential() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rt::SLIDE_MASTER, "a.xml"), "rId1");
        assert_eq!(rels.add(rt::THEME, "b.xml"), "rId2");
        let xml = rels.to_xml().unwrap();
        assert!(xml.contains(r#"Id="rId2""#));
        assert!(xml.contains(r#"Target="b.xml""#));
    }

    #[test]
    fn test_package_contains_required_parts() {
        let mut pres = Presentation::new();
        pres.add_slide();
        pres.add_slide();
        let bytes = pres.to_bytes().unwrap();

        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for required in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(names.contains(&required), "missing {}", required);
        }

        let pres_xml = read_part(&bytes, "ppt/presentation.xml");
        assert!(pres_xml.contains(r#"<p:sldId id="256" r:id="rId5"/>"#));
        assert!(pres_xml.contains(r#"<p:sldId id="257" r:id="rId6"/>"#));

        let content_types = read_part(&bytes, "[Content_Types].xml");
        assert!(content_types.contains(r#"PartName="/ppt/slides/slide2.xml""#));
    }

    #[test]
    fn test_identical_images_share_media_part() {
        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(b"same image");

        let mut pres = Presentation::new();
        let slide = pres.add_slide();
        slide.add_picture(picture(data.clone()));
        slide.add_picture(picture(data));
        let mut other = PNG_MAGIC.to_vec();
        other.extend_from_slice(b"other image");
        pres.add_slide().add_picture(picture(other));

        let bytes = pres.to_bytes().unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let media: Vec<&str> = archive
            .file_names()
            .filter(|n| n.starts_with("ppt/media/"))
            .collect();
        assert_eq!(media.len(), 2);

        let rels = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert_eq!(rels.matches("../media/image1.png").count(), 2);
        let slide_xml = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide_xml.contains(r#"r:embed="rId2""#));
        assert!(slide_xml.contains(r#"r:embed="rId3""#));

        let content_types = read_part(&bytes, "[Content_Types].xml");
        assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
    }

    #[test]
    fn test_every_xml_part_is_well_formed() {
        let mut pres = Presentation::new();
        let slide = pres.add_slide();
        slide.add_text_box(TextBox {
            name: "Body <main>".to_string(),
            frame: Frame::new(457200, 457200, 8229600, 914400),
            paragraphs: vec![Paragraph {
                text: "Margins & \"quotes\"".to_string(),
                align: TextAlign::Justify,
                line_spacing: Some(1.15),
            }],
            format: TextFormat::default(),
            anchor: TextAnchor::Bottom,
            insets: Insets::uniform(45720),
        });
        slide.add_picture(Picture {
            crop: Crop {
                left: 0.25,
                right: 0.25,
                ..Crop::default()
            },
            ..picture(PNG_MAGIC.to_vec())
        });
        slide.add_table(Table {
            name: "Grid".to_string(),
            frame: Frame::new(0, 0, 914400, 548640),
            columns: vec![457200, 457200],
            rows: vec![TableRow {
                height: 274320,
                cells: vec![
                    TableCell {
                        text: "a".to_string(),
                        format: TextFormat::default(),
                        fill: Some(RGBColor::new(0xE5, 0xE7, 0xEB)),
                    },
                    TableCell::default(),
                ],
            }],
            first_row: true,
            band_rows: false,
            cell_insets: Insets::uniform(45720),
        });

        let bytes = pres.to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();

        for name in names.iter().filter(|n| n.ends_with(".xml") || n.ends_with(".rels")) {
            let mut content = String::new();
            archive
                .by_name(name)
                .unwrap()
                .read_to_string(&mut content)
                .unwrap();

            let mut reader = quick_xml::Reader::from_str(&content);
            reader.config_mut().check_end_names = true;
            loop {
                match reader.read_event() {
                    Ok(quick_xml::events::Event::Eof) => break,
                    Ok(_) => {},
                    Err(e) => panic!("{} is not well-formed: {}", name, e),
                }
            }
        }
    }
}
