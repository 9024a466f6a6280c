//! View state of the calendar widget and the operations that mutate it.
//!
//! A [`Board`] owns the displayed month, the pool of items that have not been
//! placed yet, the per-day placements and the item currently being dragged.
//! Every mutation is announced to the subscribed [`Observer`]s so a front end
//! can redraw.

pub mod item;
pub mod month;
pub mod placement;

pub use item::{CalendarItem, IdGenerator, ItemId, SequentialIds, UuidGenerator};
pub use month::{days_of_month, first_weekday_offset, GridCell, MonthIndex, WEEKDAY_LABELS};
pub use placement::Placements;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOrigin {
    /// Picked up from the source pool; `entry` is the id of the pool entry,
    /// which is consumed on drop.
    Pool { entry: ItemId },
    /// Picked up from a day of the grid. The item stays on that day.
    Day { day: u32 },
    /// Materialized from bare content without a backing pool entry.
    Detached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drag {
    pub item: CalendarItem,
    pub origin: DragOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Placed(ItemId),
    /// The day already held an item with the same content; the dragged item
    /// is gone.
    Duplicate,
    /// Nothing was being dragged.
    Idle,
    /// The day does not exist in the displayed month. The drag stays active.
    OutOfMonth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Month(MonthIndex),
    Pool,
    DragStarted(ItemId),
    Placed { day: u32, id: ItemId },
    Discarded { day: u32 },
    Deleted { day: u32, id: ItemId },
}

fn notify_all(observers: &[Box<dyn Observer>], change: Change) {
    for observer in observers {
        observer.notify(&change);
    }
}

pub trait Observer {
    fn notify(&self, change: &Change);
}

impl<F: Fn(&Change)> Observer for F {
    fn notify(&self, change: &Change) {
        self(change)
    }
}

pub struct Board {
    month: MonthIndex,
    pool: Vec<CalendarItem>,
    placements: Placements,
    drag: Option<Drag>,
    ids: Box<dyn IdGenerator>,
    observers: Vec<Box<dyn Observer>>,
}

impl Board {
    pub fn new<S: AsRef<str>>(month: MonthIndex, contents: &[S]) -> Self {
        Board::with_ids(month, contents, Box::new(UuidGenerator))
    }

    pub fn with_ids<S: AsRef<str>>(
        month: MonthIndex,
        contents: &[S],
        mut ids: Box<dyn IdGenerator>,
    ) -> Self {
        let pool = contents
            .iter()
            .map(|content| CalendarItem::new(ids.next_id(), content.as_ref()))
            .collect();

        Board {
            month,
            pool,
            placements: Placements::new(),
            drag: None,
            ids,
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    fn notify(&self, change: Change) {
        notify_all(&self.observers, change);
    }

    pub fn month(&self) -> MonthIndex {
        self.month
    }

    pub fn pool(&self) -> &[CalendarItem] {
        &self.pool
    }

    pub fn placements(&self) -> &Placements {
        &self.placements
    }

    pub fn items_of_day(&self, day: u32) -> &[CalendarItem] {
        self.placements.items_of_day(day)
    }

    pub fn drag(&self) -> Option<&Drag> {
        self.drag.as_ref()
    }

    pub fn cells(&self) -> Vec<GridCell> {
        self.month.cells()
    }

    pub fn goto(&mut self, month: MonthIndex) {
        self.month = month;
        self.notify(Change::Month(month));
    }

    pub fn prev_month(&mut self) {
        self.goto(self.month.prev());
    }

    pub fn next_month(&mut self) {
        self.goto(self.month.next());
    }

    pub fn add_to_pool(&mut self, content: &str) -> ItemId {
        let item = CalendarItem::new(self.ids.next_id(), content);
        let id = item.id.clone();
        self.pool.push(item);
        self.notify(Change::Pool);
        id
    }

    fn start_drag(&mut self, item: CalendarItem, origin: DragOrigin) -> &CalendarItem {
        log::debug!("Drag start: {}", item.id);
        let id = item.id.clone();
        let drag = self.drag.insert(Drag { item, origin });
        notify_all(&self.observers, Change::DragStarted(id));
        &drag.item
    }

    /// Picks up a fresh copy of the pool entry `entry`.
    pub fn drag_from_pool(&mut self, entry: &ItemId) -> Option<&CalendarItem> {
        let source = self.pool.iter().find(|item| &item.id == entry)?;
        let item = source.rematerialize(self.ids.as_mut());
        let origin = DragOrigin::Pool {
            entry: entry.clone(),
        };
        Some(self.start_drag(item, origin))
    }

    pub fn drag_content(&mut self, content: &str) -> &CalendarItem {
        let item = CalendarItem::new(self.ids.next_id(), content);
        self.start_drag(item, DragOrigin::Detached)
    }

    /// Picks up a placed item as-is, keeping its id.
    pub fn drag_from_day(&mut self, day: u32, id: &ItemId) -> Option<&CalendarItem> {
        let item = self.placements.find(day, id)?.clone();
        Some(self.start_drag(item, DragOrigin::Day { day }))
    }

    pub fn drop_on(&mut self, day: u32) -> DropOutcome {
        if self.drag.is_none() {
            return DropOutcome::Idle;
        }
        if !self.month.contains_day(day) {
            return DropOutcome::OutOfMonth;
        }
        let Drag { item, origin } = match self.drag.take() {
            Some(drag) => drag,
            None => return DropOutcome::Idle,
        };

        let placed = item.rematerialize(self.ids.as_mut());
        let placed_id = placed.id.clone();
        log::debug!("Drop: {} on day {}", placed_id, day);

        let outcome = if self.placements.insert_unique(day, placed) {
            self.notify(Change::Placed {
                day,
                id: placed_id.clone(),
            });
            DropOutcome::Placed(placed_id)
        } else {
            log::debug!("Discarding duplicate '{}' on day {}", item.content, day);
            self.notify(Change::Discarded { day });
            DropOutcome::Duplicate
        };

        if let DragOrigin::Pool { entry } = origin {
            let before = self.pool.len();
            self.pool.retain(|pooled| pooled.id != entry);
            if self.pool.len() != before {
                self.notify(Change::Pool);
            }
        }

        outcome
    }

    pub fn delete(&mut self, day: u32, id: &ItemId) -> Option<CalendarItem> {
        log::debug!("Delete: {}", id);
        let removed = self.placements.remove(day, id)?;
        self.notify(Change::Deleted {
            day,
            id: id.clone(),
        });
        Some(removed)
    }
}
