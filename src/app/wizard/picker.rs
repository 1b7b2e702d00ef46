//! Cursor and incremental-filter state shared by every selection screen
//!
//! A picker owns its entries plus the highlight cursor and the `/`-triggered
//! search query. It knows nothing about rendering; the render boundary reads
//! the visible rows and cursor back out. Entering search drops the highlight
//! until the query is accepted or cancelled, and while a search is active
//! every printable character belongs to the query.

use std::borrow::Cow;

use super::types::KeyAction;

/// Anything a picker can list
pub trait PickerEntry {
    /// Row label shown in the list
    fn label(&self) -> Cow<'_, str>;

    /// Text the incremental filter matches against; defaults to the label
    fn search_key(&self) -> Cow<'_, str> {
        self.label()
    }
}

impl PickerEntry for String {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// What a key press did to the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerReply {
    /// Consumed internally (cursor moved, query edited, ...)
    Handled,
    /// The highlighted entry was confirmed; index into the full entry list
    Committed(usize),
    /// Not a picker key; the screen decides what it means
    Ignored,
}

/// List state behind one selection screen
#[derive(Debug)]
pub struct Picker<T> {
    items: Vec<T>,
    visible: Vec<usize>,
    cursor: Option<usize>,
    searching: bool,
    query: String,
}

impl<T: PickerEntry> Picker<T> {
    pub fn new(items: Vec<T>) -> Self {
        let visible: Vec<usize> = (0..items.len()).collect();
        let cursor = (!items.is_empty()).then_some(0);
        Self {
            items,
            visible,
            cursor,
            searching: false,
            query: String::new(),
        }
    }

    /// Like [`Picker::new`], with the cursor on the first entry matching the
    /// predicate
    pub fn with_cursor_on(items: Vec<T>, predicate: impl Fn(&T) -> bool) -> Self {
        let mut picker = Self::new(items);
        if let Some(index) = picker.items.iter().position(predicate) {
            picker.cursor = Some(index);
        }
        picker
    }

    /// The highlighted entry, if any
    pub fn selected(&self) -> Option<&T> {
        self.selected_index().map(|index| &self.items[index])
    }

    /// Index of the highlighted entry within the full entry list
    pub fn selected_index(&self) -> Option<usize> {
        self.cursor
            .and_then(|cursor| self.visible.get(cursor))
            .copied()
    }

    /// Entry by index into the full list, as carried by
    /// [`PickerReply::Committed`]
    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Entries currently passing the filter, in list order
    pub fn visible_rows(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().map(|&index| &self.items[index])
    }

    /// Cursor position within the visible rows; `None` while a search query
    /// is being typed
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply one key press
    pub fn handle(&mut self, action: &KeyAction) -> PickerReply {
        if self.searching {
            match action {
                KeyAction::Cancel => self.exit_search(),
                KeyAction::Confirm => self.accept_search(),
                KeyAction::Char(c) => {
                    self.query.push(*c);
                    self.refilter();
                }
                KeyAction::Backspace => {
                    self.query.pop();
                    self.refilter();
                }
                // Navigation means nothing while typing a query.
                _ => {}
            }
            return PickerReply::Handled;
        }

        match action {
            KeyAction::Char('/') => {
                self.enter_search();
                PickerReply::Handled
            }
            KeyAction::Confirm | KeyAction::Char('l') => match self.selected_index() {
                Some(index) => PickerReply::Committed(index),
                None => PickerReply::Handled,
            },
            KeyAction::Down | KeyAction::Char('j') => {
                self.move_down();
                PickerReply::Handled
            }
            KeyAction::Up | KeyAction::Char('k') => {
                self.move_up();
                PickerReply::Handled
            }
            _ => PickerReply::Ignored,
        }
    }

    fn enter_search(&mut self) {
        self.searching = true;
        self.cursor = None;
    }

    /// Esc: drop the query and restore the full list
    fn exit_search(&mut self) {
        self.searching = false;
        self.query.clear();
        self.refilter();
        self.cursor = (!self.visible.is_empty()).then_some(0);
    }

    /// Enter: keep the narrowed list and return focus to it
    fn accept_search(&mut self) {
        self.searching = false;
        self.cursor = (!self.visible.is_empty()).then_some(0);
    }

    fn refilter(&mut self) {
        if self.query.is_empty() {
            self.visible = (0..self.items.len()).collect();
            return;
        }
        let query = self.query.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                item.search_key()
                    .to_lowercase()
                    .contains(&query)
                    .then_some(index)
            })
            .collect();
    }

    fn move_down(&mut self) {
        if let Some(cursor) = self.cursor {
            if cursor + 1 < self.visible.len() {
                self.cursor = Some(cursor + 1);
            }
        }
    }

    fn move_up(&mut self) {
        if let Some(cursor) = self.cursor {
            self.cursor = Some(cursor.saturating_sub(1));
        }
    }
}
