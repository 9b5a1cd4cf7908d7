// core/src/client/pagination.rs

use std::fmt;

/// Numbered buttons shown at once, not counting the first/last shortcuts.
pub const MAX_PAGE_BUTTONS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
  Page { number: u64, active: bool },
  Ellipsis,
}

impl PageItem {
  fn page(number: u64, current: u64) -> Self {
    PageItem::Page {
      number,
      active: number == current,
    }
  }
}

impl fmt::Display for PageItem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PageItem::Page { number, .. } => write!(f, "{number}"),
      PageItem::Ellipsis => f.write_str("..."),
    }
  }
}

/// Page buttons centred on `current`, with `1 ...` and `... total` added when
/// the window does not reach the ends.
///
/// `page_window(7, 12)` renders as `1 ... 5 6 7 8 9 ... 12`.
pub fn page_window(current: u64, total: u64) -> Vec<PageItem> {
  if total == 0 {
    return Vec::new();
  }
  let current = current.clamp(1, total);
  let mut start = current.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
  let end = (start + MAX_PAGE_BUTTONS - 1).min(total);
  if end - start + 1 < MAX_PAGE_BUTTONS {
    start = end.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1);
  }

  let mut items = Vec::with_capacity(MAX_PAGE_BUTTONS as usize + 4);
  if start > 1 {
    items.push(PageItem::page(1, current));
    if start > 2 {
      items.push(PageItem::Ellipsis);
    }
  }
  items.extend((start..=end).map(|number| PageItem::page(number, current)));
  if end < total {
    if end < total - 1 {
      items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::page(total, current));
  }
  items
}
