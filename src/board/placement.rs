use std::collections::BTreeMap;

use super::item::{CalendarItem, ItemId};

/// Day-of-month to the items shown on that day, in insertion order.
///
/// A day never maps to an empty list; removing the last item of a day drops
/// the day entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placements {
    days: BTreeMap<u32, Vec<CalendarItem>>,
}

impl Placements {
    pub fn new() -> Self {
        Placements::default()
    }

    pub fn items_of_day(&self, day: u32) -> &[CalendarItem] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_day(&self, day: u32) -> bool {
        self.days.contains_key(&day)
    }

    pub fn has_content(&self, day: u32, content: &str) -> bool {
        self.items_of_day(day)
            .iter()
            .any(|item| item.content == content)
    }

    pub fn find(&self, day: u32, id: &ItemId) -> Option<&CalendarItem> {
        self.items_of_day(day).iter().find(|item| &item.id == id)
    }

    /// Appends `item` unless the day already holds an item with equal
    /// content. Returns whether it was appended.
    pub fn insert_unique(&mut self, day: u32, item: CalendarItem) -> bool {
        if self.has_content(day, &item.content) {
            return false;
        }
        self.days.entry(day).or_insert_with(Vec::new).push(item);
        true
    }

    pub fn remove(&mut self, day: u32, id: &ItemId) -> Option<CalendarItem> {
        let items = self.days.get_mut(&day)?;
        let pos = items.iter().position(|item| &item.id == id)?;
        let removed = items.remove(pos);

        if items.is_empty() {
            self.days.remove(&day);
        }

        Some(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalendarItem> {
        self.days.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
