//! Selection state machine shared by the three launcher rows.
//!
//! The navigator tracks which section is active and a cursor relative to that
//! section's visible window. The absolute selection is always
//! `section.offset() + cursor`. Every transition is total: requests that cannot
//! be honoured leave the state untouched.

use tracing::debug;

use crate::input::Action;
use crate::model::{LauncherItem, SectionId};
use crate::section::ListSection;

/// An item confirmed by the user, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub section: SectionId,
    pub index: usize,
    pub item: LauncherItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Moved,
    Activate(Activation),
    Exit,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    sections: [ListSection; 3],
    active: SectionId,
    cursor: usize,
    exited: bool,
}

impl Navigator {
    pub fn new(platforms: ListSection, apps: ListSection, movies: ListSection) -> Self {
        Self {
            sections: [platforms, apps, movies],
            active: SectionId::Platforms,
            cursor: 0,
            exited: false,
        }
    }

    /// Pure transition: consumes the state and returns the next one.
    pub fn handle(mut self, action: Action) -> (Self, Outcome) {
        let outcome = self.apply(action);
        (self, outcome)
    }

    fn apply(&mut self, action: Action) -> Outcome {
        if self.exited {
            return Outcome::Unchanged;
        }

        let outcome = match action {
            Action::Up => self.move_section(-1),
            Action::Down => self.move_section(1),
            Action::Left => self.move_selection(-1),
            Action::Right => self.move_selection(1),
            Action::PageUp => self.page(false),
            Action::PageDown => self.page(true),
            Action::Enter => self
                .activation()
                .map_or(Outcome::Unchanged, Outcome::Activate),
            Action::Escape => {
                self.exited = true;
                Outcome::Exit
            }
        };

        debug!(
            ?action,
            section = ?self.active,
            cursor = self.cursor,
            offset = self.active_section().offset(),
            "navigation"
        );
        outcome
    }

    pub fn active_section_id(&self) -> SectionId {
        self.active
    }

    pub fn active_section(&self) -> &ListSection {
        self.section(self.active)
    }

    pub fn section(&self, id: SectionId) -> &ListSection {
        &self.sections[id.index()]
    }

    /// Window-relative cursor, `None` while the active section is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.active_section().max_cursor().map(|_| self.cursor)
    }

    /// Absolute index of the highlighted item in the active section.
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor()
            .map(|cursor| self.active_section().offset() + cursor)
    }

    pub fn is_selected(&self, section: SectionId, absolute_index: usize) -> bool {
        section == self.active && self.selected_index() == Some(absolute_index)
    }

    /// Swaps in a freshly loaded list, keeping offset and cursor in range.
    pub fn set_items(&mut self, id: SectionId, items: Vec<LauncherItem>) {
        self.sections[id.index()].set_items(items);
        if id == self.active {
            self.clamp_cursor();
        }
    }

    fn active_section_mut(&mut self) -> &mut ListSection {
        &mut self.sections[self.active.index()]
    }

    fn move_section(&mut self, delta: isize) -> Outcome {
        let target = self
            .active
            .index()
            .checked_add_signed(delta)
            .and_then(SectionId::from_index);

        match target {
            Some(section) => {
                self.active = section;
                self.cursor = 0;
                Outcome::Moved
            }
            None => Outcome::Unchanged,
        }
    }

    fn move_selection(&mut self, delta: isize) -> Outcome {
        let Some(max_cursor) = self.active_section().max_cursor() else {
            return Outcome::Unchanged;
        };

        if let Some(new_cursor) = self.cursor.checked_add_signed(delta) {
            if new_cursor <= max_cursor {
                self.cursor = new_cursor;
                return Outcome::Moved;
            }
        }

        // Past the window edge: slide the window and keep the cursor where it is.
        let shifted = if delta > 0 {
            self.active_section_mut().scroll_forward()
        } else {
            self.active_section_mut().scroll_backward()
        };

        if shifted {
            Outcome::Moved
        } else {
            Outcome::Unchanged
        }
    }

    fn page(&mut self, forward: bool) -> Outcome {
        if self.active == SectionId::Platforms {
            return Outcome::Unchanged;
        }

        let section = self.active_section_mut();
        let shifted = if forward {
            section.scroll_forward()
        } else {
            section.scroll_backward()
        };
        if !shifted {
            return Outcome::Unchanged;
        }

        self.clamp_cursor();
        Outcome::Moved
    }

    fn activation(&self) -> Option<Activation> {
        let index = self.selected_index()?;
        let item = self.active_section().item_at(index)?.clone();
        Some(Activation {
            section: self.active_section().id(),
            index,
            item,
        })
    }

    fn clamp_cursor(&mut self) {
        let max_cursor = self.active_section().max_cursor().unwrap_or(0);
        self.cursor = self.cursor.min(max_cursor);
    }
}

/// An empty navigator with no items in any section.
impl Default for Navigator {
    fn default() -> Self {
        Self::new(
            ListSection::unwindowed(SectionId::Platforms, Vec::new()),
            ListSection::unwindowed(SectionId::Apps, Vec::new()),
            ListSection::unwindowed(SectionId::Movies, Vec::new()),
        )
    }
}
