use crate::model::{LauncherItem, SectionId};

/// How many items of a section are visible at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Every item is visible; the section never scrolls.
    Full,
    Fixed(usize),
}

/// One row of the launcher: the full item list plus a sliding window over it.
#[derive(Debug, Clone)]
pub struct ListSection {
    id: SectionId,
    items: Vec<LauncherItem>,
    window: Window,
    offset: usize,
}

impl ListSection {
    pub fn new(id: SectionId, items: Vec<LauncherItem>, window: Window) -> Self {
        // A window must show at least one item.
        let window = match window {
            Window::Fixed(0) => Window::Fixed(1),
            other => other,
        };
        Self {
            id,
            items,
            window,
            offset: 0,
        }
    }

    pub fn unwindowed(id: SectionId, items: Vec<LauncherItem>) -> Self {
        Self::new(id, items, Window::Full)
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn items(&self) -> &[LauncherItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn window_size(&self) -> usize {
        match self.window {
            Window::Full => self.items.len(),
            Window::Fixed(size) => size,
        }
    }

    pub fn visible_items(&self) -> &[LauncherItem] {
        let start = self.offset.min(self.items.len());
        let end = (start + self.window_size()).min(self.items.len());
        &self.items[start..end]
    }

    pub fn scroll_forward(&mut self) -> bool {
        if self.offset + self.window_size() < self.items.len() {
            self.offset += 1;
            return true;
        }
        false
    }

    pub fn scroll_backward(&mut self) -> bool {
        if self.offset > 0 {
            self.offset -= 1;
            return true;
        }
        false
    }

    /// Highest valid window-relative cursor, `None` when the section is empty.
    pub fn max_cursor(&self) -> Option<usize> {
        self.window_size().min(self.items.len()).checked_sub(1)
    }

    pub fn item_at(&self, absolute_index: usize) -> Option<&LauncherItem> {
        self.items.get(absolute_index)
    }

    /// Replaces the backing list, pulling the window back in range if it shrank.
    pub fn set_items(&mut self, items: Vec<LauncherItem>) {
        self.items = items;
        self.clamp_offset();
    }

    fn max_offset(&self) -> usize {
        self.items.len().saturating_sub(self.window_size())
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}
