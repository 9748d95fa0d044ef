use std::path::Path;

use log::{debug, warn};
use lopdf::Document;

/// Raw per-page extraction results, in page order.
pub struct PdfPages {
    pub page_count: usize,
    pub pages: Vec<(u32, Result<String, lopdf::Error>)>,
}

/// Parse the file and pull the text out of every page. Only a document that
/// cannot be parsed at all is an error; page failures are kept per page.
pub fn extract_pages(path: &Path) -> Result<PdfPages, lopdf::Error> {
    let document = Document::load(path)?;
    if document.is_encrypted() {
        warn!(
            "{} is encrypted, text extraction will probably fail",
            path.display()
        );
    }

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    debug!("{} has {} pages", path.display(), page_numbers.len());

    let pages = page_numbers
        .iter()
        .map(|&number| (number, document.extract_text(&[number])))
        .collect();

    Ok(PdfPages {
        page_count: page_numbers.len(),
        pages,
    })
}
