use std::ops::Range;

use crate::foundation::config::Pagination;

/// Breaks are moved up to avoid cutting content, but never above this fraction of a page.
const MIN_FILL: f64 = 0.8;

/// Split `height` rows into page slices of at most `page_height` rows.
///
/// With [`Pagination::MultiPage`] each cut is pulled up out of any `keep_together` span it would
/// land in, provided the page stays at least 80% full; otherwise the cut is made at the page
/// boundary. [`Pagination::ClipFirstPage`] returns only the first page and drops the rest.
pub fn paginate(
    height: u32,
    page_height: u32,
    keep_together: &[(u32, u32)],
    policy: Pagination,
) -> Vec<Range<u32>> {
    let page_height = page_height.max(1);
    if height == 0 {
        return vec![0..0];
    }
    if policy == Pagination::ClipFirstPage {
        return vec![0..height.min(page_height)];
    }

    let mut pages = Vec::new();
    let mut start = 0u32;
    while start < height {
        let hard = start.saturating_add(page_height);
        if hard >= height {
            pages.push(start..height);
            break;
        }
        let floor = start + (f64::from(page_height) * MIN_FILL) as u32;
        let mut cut = hard;
        while let Some(&(top, _)) = keep_together.iter().find(|(a, b)| *a < cut && cut < *b) {
            if top < floor || top <= start {
                cut = hard;
                break;
            }
            cut = top;
        }
        pages.push(start..cut);
        start = cut;
    }
    pages
}

#[cfg(test)]
#[path = "../../tests/unit/export/paginate.rs"]
mod tests;
