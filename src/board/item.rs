use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A content-bearing token that lives either in the source pool or on a day.
///
/// Two items with equal `content` count as duplicates when placed on the same
/// day but stay distinct entities, identity is carried by `id` alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarItem {
    pub id: ItemId,
    pub content: String,
}

impl CalendarItem {
    pub fn new(id: ItemId, content: &str) -> Self {
        CalendarItem {
            id,
            content: content.to_owned(),
        }
    }

    /// Same content, new identity.
    pub fn rematerialize(&self, ids: &mut dyn IdGenerator) -> Self {
        CalendarItem {
            id: ids.next_id(),
            content: self.content.clone(),
        }
    }
}

pub trait IdGenerator {
    fn next_id(&mut self) -> ItemId;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> ItemId {
        ItemId(Uuid::new_v4().to_string())
    }
}

/// Deterministic ids `<prefix>-0`, `<prefix>-1`, ...
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: &str) -> Self {
        SequentialIds {
            prefix: prefix.to_owned(),
            next: 0,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ItemId {
        let id = ItemId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
