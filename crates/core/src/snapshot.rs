use serde::Serialize;

/// Serializable view of a grid for observers and tests
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GridSnapshot {
    pub width: u16,
    pub height: u16,
    /// Raw element kinds, row-major from the bottom row (-1 = Empty)
    pub kinds: Vec<i32>,
    pub board_hash: u64,
    pub normalized: bool,
    pub collapsing: bool,
    pub complete: bool,
    pub moving: bool,
    pub live_elements: usize,
    pub pending_matches: usize,
}

impl GridSnapshot {
    /// FNV-1a 64-bit over the kinds, one byte each
    pub fn hash_kinds(kinds: &[i32]) -> u64 {
        let mut h: u64 = 0xcbf29ce484222325;
        for &k in kinds {
            h ^= (k as i8 as u8) as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
        h
    }

    pub fn kind_at(&self, x: u16, y: u16) -> Option<i32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.kinds
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Ready for input: nothing pending and nothing moving
    pub fn playable(&self) -> bool {
        self.normalized && !self.collapsing && !self.moving
    }
}

/// Snapshot of the active level within a cycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CycleSnapshot {
    pub level_index: usize,
    pub level_name: String,
    #[serde(flatten)]
    pub grid: GridSnapshot,
}
