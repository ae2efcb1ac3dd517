// src/source/pdf.rs
use crate::utils::error::ConvertError;

/// Text lines of the report's first page, trimmed, blank lines dropped.
pub fn first_page_lines(pdf_bytes: &[u8]) -> Result<Vec<String>, ConvertError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ConvertError::Pdf(e.to_string()))?;

    let first = pages.into_iter().next().ok_or(ConvertError::NoPages)?;
    let lines = split_lines(&first);
    tracing::debug!("First page yielded {} text lines", lines.len());

    Ok(lines)
}

pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// One-page PDF with each entry of `lines` drawn on its own baseline.
#[cfg(test)]
pub(crate) fn make_test_pdf(lines: &[&str]) -> Vec<u8> {
    use lopdf::dictionary;
    use lopdf::{Document, Object, Stream};

    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut content = String::from("BT /F1 12 Tf 72 720 Td ");
    for line in lines {
        content.push_str(&format!("({}) Tj 0 -14 Td ", line));
    }
    content.push_str("ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let resources = dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    };

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Contents" => content_id,
        "Resources" => resources,
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    });

    if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
        dict.set("Parent", pages_id);
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
