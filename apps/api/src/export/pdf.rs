//! Single-page PDF assembly around a raster snapshot.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::export::ExportError;

/// A4 in points.
pub const PDF_PAGE_WIDTH_PT: i64 = 595;
pub const PDF_PAGE_HEIGHT_PT: i64 = 842;

const IMAGE_NAME: &str = "Im0";

/// Builds a one-page 595×842 document whose only content is `image`
/// stretched to fill the page.
pub fn assemble(image: &RgbImage, title: &str) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(image.as_raw())
        .map_err(|e| ExportError::Assembly(format!("image compression failed: {e}")))?;
    let compressed = encoder
        .finish()
        .map_err(|e| ExportError::Assembly(format!("image compression failed: {e}")))?;

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(image.width() as i64),
            "Height" => Object::Integer(image.height() as i64),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => Object::Integer(8),
            "Filter" => "FlateDecode",
        },
        compressed,
    ));

    // Unit image square scaled to the full page.
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Integer(PDF_PAGE_WIDTH_PT),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PDF_PAGE_HEIGHT_PT),
                    Object::Integer(0),
                    Object::Integer(0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| ExportError::Assembly(format!("content stream encoding failed: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(PDF_PAGE_WIDTH_PT),
        Object::Integer(PDF_PAGE_HEIGHT_PT),
    ];

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => media_box.clone(),
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(title),
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Assembly(format!("PDF serialization failed: {e}")))?;
    Ok(bytes)
}

/// PDF text string: PDFDocEncoding-compatible ASCII as a literal, anything
/// else as UTF-16BE with a byte order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}
