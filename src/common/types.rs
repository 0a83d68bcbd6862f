use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier of a row slot inside a table's arena.
///
/// The generation distinguishes successive occupants of the same slot, so an
/// identifier taken before a delete never resolves to a row inserted later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn as_usize(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({}v{})", self.index, self.generation)
    }
}

/// Microseconds since the Unix epoch
pub type Timestamp = u64;

/// Returns the current wall-clock time as a [`Timestamp`].
pub fn now_micros() -> Timestamp {
    // A clock set before the epoch reads as 0; Row::update still advances
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as Timestamp)
        .unwrap_or(0)
}
