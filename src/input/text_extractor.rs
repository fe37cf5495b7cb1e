//! Text extraction from PDF and DOCX documents

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::DocumentKind;
use log::debug;
use std::io::{Cursor, Read};
use std::panic;

const DOCX_BODY_PART: &str = "word/document.xml";
const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some documents that parse but reference missing resources
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| {
                ScreenerError::Extraction("PDF parser failed on malformed document".to_string())
            })?;

        let text = outcome.map_err(|e| {
            ScreenerError::Extraction(format!("Failed to extract text from PDF: {}", e))
        })?;
        Ok(text)
    }
}

/// Reads paragraph text out of the WordprocessingML body of a DOCX package
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

        let mut xml = String::new();
        {
            let mut body = archive.by_name(DOCX_BODY_PART).map_err(|e| {
                ScreenerError::Extraction(format!("DOCX package has no {}: {}", DOCX_BODY_PART, e))
            })?;
            body.read_to_string(&mut xml).map_err(|e| {
                ScreenerError::Extraction(format!("Failed to read {}: {}", DOCX_BODY_PART, e))
            })?;
        }

        let doc = roxmltree::Document::parse(&xml)?;
        let mut text = String::new();
        Self::collect_text(doc.root_element(), &mut text);

        Ok(text.trim_end().to_string())
    }
}

impl DocxExtractor {
    fn collect_text(node: roxmltree::Node, out: &mut String) {
        let in_wordml = node.tag_name().namespace() == Some(WORDML_NS);

        match (in_wordml, node.tag_name().name()) {
            (true, "t") => {
                if let Some(run_text) = node.text() {
                    out.push_str(run_text);
                }
            }
            (true, "tab") => out.push('\t'),
            (true, "br") | (true, "cr") => out.push('\n'),
            (true, "p") => {
                for child in node.children().filter(|c| c.is_element()) {
                    Self::collect_text(child, out);
                }
                out.push('\n');
            }
            _ => {
                for child in node.children().filter(|c| c.is_element()) {
                    Self::collect_text(child, out);
                }
            }
        }
    }
}

/// Extract text for the declared kind; empty output counts as a failed extraction
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String> {
    let text = match kind {
        DocumentKind::Pdf => PdfExtractor.extract(bytes)?,
        DocumentKind::Docx => DocxExtractor.extract(bytes)?,
    };

    if text.trim().is_empty() {
        return Err(ScreenerError::Extraction(format!(
            "{} document contains no extractable text",
            kind
        )));
    }

    debug!("Extracted {} characters from {} document", text.chars().count(), kind);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_docx(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
            WORDML_NS, body
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCX_BODY_PART, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    /// Single-page PDF with one Helvetica font registered as /F1
    fn build_pdf(content_stream: &str) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content_stream.len(),
                content_stream
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_pdf_text_layer_extracted() {
        let bytes = build_pdf("BT /F1 12 Tf 72 700 Td (Python SQL Power BI) Tj ET");

        let text = extract_text(DocumentKind::Pdf, &bytes).unwrap();
        assert!(text.contains("Python SQL Power BI"), "got {:?}", text);
    }

    #[test]
    fn test_pdf_without_text_layer() {
        let bytes = build_pdf("0 0 m 10 10 l S");

        let err = extract_text(DocumentKind::Pdf, &bytes).unwrap_err();
        assert!(err.is_extraction());
        assert!(err.to_string().contains("no extractable text"));
    }

    #[test]
    fn test_pdf_with_undeclared_font_is_extraction_error() {
        let bytes = build_pdf("BT /F9 12 Tf 72 700 Td (Python) Tj ET");

        let err = extract_text(DocumentKind::Pdf, &bytes).unwrap_err();
        assert!(err.is_extraction());
    }

    #[test]
    fn test_docx_paragraphs_in_order() {
        let bytes = build_docx(
            "<w:p><w:r><w:t>Senior Data Analyst</w:t></w:r></w:p>\
             <w:p><w:r><w:t xml:space=\"preserve\">Python, </w:t></w:r><w:r><w:t>SQL</w:t></w:r></w:p>",
        );

        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Senior Data Analyst\nPython, SQL");
    }

    #[test]
    fn test_docx_tabs_and_breaks() {
        let bytes = build_docx("<w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>Excel</w:t><w:br/><w:t>Tableau</w:t></w:r></w:p>");

        let text = DocxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "Skills\tExcel\nTableau");
    }

    #[test]
    fn test_docx_without_body_part() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/styles.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"<styles/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = DocxExtractor.extract(&bytes).unwrap_err();
        assert!(err.is_extraction());
    }

    #[test]
    fn test_not_a_zip_is_extraction_error() {
        let err = extract_text(DocumentKind::Docx, b"plain text pretending to be docx").unwrap_err();
        assert!(err.is_extraction());
    }

    #[test]
    fn test_invalid_pdf_is_extraction_error() {
        let err = extract_text(DocumentKind::Pdf, b"this is not a pdf at all").unwrap_err();
        assert!(err.is_extraction());
    }

    #[test]
    fn test_empty_docx_has_no_text() {
        let bytes = build_docx("<w:p></w:p>");
        let err = extract_text(DocumentKind::Docx, &bytes).unwrap_err();
        assert!(err.is_extraction());
        assert!(err.to_string().contains("no extractable text"));
    }
}
