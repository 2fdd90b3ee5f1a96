use serde::Serialize;

/// Outcome of a binary search. `index` is -1 when the target is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub found: bool,
    pub index: i64,
}

impl SearchOutcome {
    pub fn found(index: usize) -> Self {
        Self {
            found: true,
            index: index as i64,
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            index: -1,
        }
    }
}
