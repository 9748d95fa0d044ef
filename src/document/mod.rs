//! PDF loading.
//!
//! [`load`] returns the text of every page joined together. A missing file, an
//! unreadable PDF and a PDF without any text (scanned or encrypted documents)
//! are errors; a single page that fails to extract is only logged.

mod pdf;

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use log::{info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("file '{}' not found", .0.display())]
    NotFound(PathBuf),
    #[error("error reading PDF {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },
    #[error("no text extracted from {}; the PDF might be image-based or encrypted", .0.display())]
    NoExtractableText(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub page_count: usize,
    pub text: String,
    /// 1-based numbers of the pages whose text could not be extracted.
    pub failed_pages: Vec<u32>,
}

impl Document {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub fn load(path: &Path) -> Result<Document, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    info!("opening PDF {}", path.display());
    let extracted = pdf::extract_pages(path).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, failed_pages) = assemble(extracted.pages);
    if text.is_empty() {
        return Err(DocumentError::NoExtractableText(path.to_path_buf()));
    }

    info!(
        "extracted {} characters from {} pages ({} failed)",
        text.chars().count(),
        extracted.page_count,
        failed_pages.len()
    );
    Ok(Document {
        path: path.to_path_buf(),
        page_count: extracted.page_count,
        text,
        failed_pages,
    })
}

/// Join page texts with newlines, skipping blank pages and recording failures.
fn assemble<E, I>(pages: I) -> (String, Vec<u32>)
where
    E: Display,
    I: IntoIterator<Item = (u32, Result<String, E>)>,
{
    let mut text = String::new();
    let mut failed = Vec::new();
    for (number, page) in pages {
        match page {
            Ok(page_text) if page_text.trim().is_empty() => {}
            Ok(page_text) => {
                text.push('\n');
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(err) => {
                warn!("error processing page {number}: {err}");
                failed.push(number);
            }
        }
    }
    (text.trim().to_string(), failed)
}

/// Small generated PDFs for tests elsewhere in the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::Path;

    use lopdf::{
        content::{Content, Operation},
        dictionary, Object, Stream,
    };

    /// One page per entry; an empty entry gives a page with no text.
    pub fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let operations = if text.is_empty() {
                vec![]
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages.len() as i64,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }
}
