/// Position of the next page to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCursor {
    Offset(usize),
    Terminal,
}

impl PageCursor {
    pub fn offset(&self) -> Option<usize> {
        match self {
            PageCursor::Offset(offset) => Some(*offset),
            PageCursor::Terminal => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PageCursor::Terminal)
    }
}

/// Decides where the next page starts.
///
/// A page whose length equals `page_size` may be followed by more data; anything shorter (or a
/// missing page) is the last one. When the total is an exact multiple of `page_size` this costs one
/// extra fetch that comes back empty.
pub fn next_cursor<T>(last_page: Option<&[T]>, pages_retrieved: usize, page_size: usize) -> PageCursor {
    match last_page {
        Some(page) if page_size > 0 && page.len() == page_size => PageCursor::Offset(pages_retrieved * page_size),
        _ => PageCursor::Terminal,
    }
}

/// Cursor following a page that was fetched at `offset`.
pub fn cursor_after<T>(offset: usize, page: &[T], page_size: usize) -> PageCursor {
    match next_cursor(Some(page), 1, page_size) {
        PageCursor::Offset(step) => PageCursor::Offset(offset + step),
        PageCursor::Terminal => PageCursor::Terminal,
    }
}
