//! Cursor state machine driving the simplification pass
//!
//! The pass walks vertex indices once. A successful merge keeps the cursor
//! where it is so the vertex, whose neighbourhood just changed, is examined
//! again; a failed search moves on. Vertices behind the cursor are never
//! revisited.

/// Geometry behind the scan: how to find and perform merges
pub trait MergeOracle {
    /// Length of the vertex array being scanned
    fn vertex_count(&self) -> usize;

    /// Neighbour of `vertex` to merge into it, if any
    fn find_merge(&mut self, vertex: usize) -> Option<usize>;

    /// Merge `end` into `start`, returning `false` if the mesh did not change
    fn merge(&mut self, start: usize, end: usize) -> bool;
}

/// Position of the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for a merge at this vertex
    Scanning(usize),
    /// A merge target was found and is about to be collapsed
    Merging { cursor: usize, target: usize },
    /// The cursor passed the last vertex
    Done,
}

impl ScanState {
    pub fn start() -> Self {
        ScanState::Scanning(0)
    }

    /// Advance the machine by one transition
    pub fn step<O: MergeOracle + ?Sized>(self, oracle: &mut O) -> Self {
        match self {
            ScanState::Scanning(cursor) if cursor >= oracle.vertex_count() => ScanState::Done,
            ScanState::Scanning(cursor) => match oracle.find_merge(cursor) {
                Some(target) => ScanState::Merging { cursor, target },
                None => ScanState::Scanning(cursor + 1),
            },
            ScanState::Merging { cursor, target } => {
                if oracle.merge(cursor, target) {
                    ScanState::Scanning(cursor)
                } else {
                    // a merge that changes nothing would be found again forever
                    ScanState::Scanning(cursor + 1)
                }
            }
            ScanState::Done => ScanState::Done,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ScanState::Done)
    }

    /// Vertex under the cursor, `None` once done
    pub fn cursor(&self) -> Option<usize> {
        match *self {
            ScanState::Scanning(cursor) | ScanState::Merging { cursor, .. } => Some(cursor),
            ScanState::Done => None,
        }
    }
}

/// Run the scan to completion, returning the number of merges that changed the mesh
pub fn run_scan<O: MergeOracle + ?Sized>(oracle: &mut O) -> usize {
    let mut state = ScanState::start();
    let mut merges = 0;

    while !state.is_done() {
        let next = state.step(oracle);
        if let (ScanState::Merging { cursor, .. }, ScanState::Scanning(retry)) = (state, next) {
            if retry == cursor {
                merges += 1;
            }
        }
        state = next;
    }

    merges
}
