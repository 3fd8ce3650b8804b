use std::ops::Deref;

use crate::shape::Shape;

/// One slot of a [`ShapeCollection`]: an owned shape, or a hole left behind
/// when a shape was taken out.
pub type ShapeSlot = Option<Box<dyn Shape>>;

/// Ordered, heterogeneous sequence of exclusively owned shapes.
///
/// Slots keep their position when emptied with [`ShapeCollection::take`], so
/// the length counts holes too. Dereferences to the slot slice consumed by the
/// functions in [`crate::geometry`].
#[derive(Debug, Default)]
pub struct ShapeCollection {
    slots: Vec<ShapeSlot>,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ShapeCollection {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, shape: Box<dyn Shape>) {
        self.slots.push(Some(shape));
    }

    /// Borrow the shape at `index`; `None` for holes and out-of-range indices.
    pub fn get(&self, index: usize) -> Option<&dyn Shape> {
        self.slots.get(index)?.as_deref()
    }

    /// Move the shape out of its slot, leaving a hole in place.
    pub fn take(&mut self, index: usize) -> Option<Box<dyn Shape>> {
        self.slots.get_mut(index)?.take()
    }

    /// Number of present shapes, not counting holes.
    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn present(&self) -> impl Iterator<Item = &dyn Shape> + '_ {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    pub fn into_slots(self) -> Vec<ShapeSlot> {
        self.slots
    }
}

impl Deref for ShapeCollection {
    type Target = [ShapeSlot];

    fn deref(&self) -> &Self::Target {
        &self.slots
    }
}

impl FromIterator<Box<dyn Shape>> for ShapeCollection {
    fn from_iter<I: IntoIterator<Item = Box<dyn Shape>>>(iter: I) -> Self {
        ShapeCollection {
            slots: iter.into_iter().map(Some).collect(),
        }
    }
}

impl Extend<Box<dyn Shape>> for ShapeCollection {
    fn extend<I: IntoIterator<Item = Box<dyn Shape>>>(&mut self, iter: I) {
        self.slots.extend(iter.into_iter().map(Some));
    }
}

impl From<Vec<ShapeSlot>> for ShapeCollection {
    fn from(slots: Vec<ShapeSlot>) -> Self {
        ShapeCollection { slots }
    }
}
