use crate::common::SlotId;

#[derive(Debug)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

impl<T> Slot<T> {
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Vacant { generation } => *generation,
        }
    }
}

/// Generational arena handing out stable [`SlotId`]s.
///
/// Removing an entry never moves another one. A freed slot goes onto the free
/// list and is reused by a later insert under a bumped generation, so a stale
/// id for that slot no longer resolves.
///
/// Slot indices are `u32`, so a map holds at most `u32::MAX` slots.
#[derive(Debug)]
pub struct SlotMap<T> {
    /// Slot storage, indexed by `SlotId::index`
    slots: Vec<Slot<T>>,
    /// Vacant slot indices available for reuse
    free_list: Vec<u32>,
    /// Number of occupied slots
    len: usize,
    /// Upper bound on `slots.len()`
    max_slots: u32,
}

impl<T> SlotMap<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_limit(capacity, u32::MAX)
    }

    /// Creates a map that never grows past `max_slots` slots.
    pub fn with_limit(capacity: usize, max_slots: u32) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.min(max_slots as usize)),
            free_list: Vec::new(),
            len: 0,
            max_slots,
        }
    }

    /// Stores a value and returns its identifier, or `None` if every slot is
    /// occupied and the map is at its limit.
    pub fn insert(&mut self, value: T) -> Option<SlotId> {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            let generation = slot.generation().wrapping_add(1);
            *slot = Slot::Occupied { generation, value };
            self.len += 1;
            return Some(SlotId::new(index, generation));
        }

        let index = u32::try_from(self.slots.len())
            .ok()
            .filter(|&index| index < self.max_slots)?;
        self.slots.push(Slot::Occupied {
            generation: 0,
            value,
        });
        self.len += 1;
        Some(SlotId::new(index, 0))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.as_usize()) {
            Some(Slot::Occupied { generation, value }) if *generation == id.generation() => {
                Some(value)
            }
            _ => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Removes the value behind `id`, returning it if the id was live.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.as_usize())?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == id.generation() => {}
            _ => return None,
        }

        let vacant = Slot::Vacant {
            generation: id.generation(),
        };
        match std::mem::replace(slot, vacant) {
            Slot::Occupied { value, .. } => {
                self.free_list.push(id.index());
                self.len -= 1;
                Some(value)
            }
            Slot::Vacant { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
