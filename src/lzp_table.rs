/// # LZP Table
///
/// A direct mapped table of 2^N 16 bit cells indexed by a context hash.
/// Each cell packs a state machine state in its high byte and the symbol
/// that last followed the context in its low byte:
///
///  [state:8][predicted symbol:8]
///
/// Cells start out as 0xffb5, i.e. the reserved state 255 (which moves to
/// state 0 on its first update) predicting 0xb5. There is no collision
/// detection, contexts sharing a hash share a cell.

const CELL_INIT: u16 = 0xffb5;

pub struct LzpTable {
    cells:  Vec<u16>, // State and predicted symbol per hash
    mask:   usize,    // Number of cells - 1
}
impl LzpTable {
    pub fn new(mask_size: u32) -> LzpTable {
        assert!(mask_size < usize::BITS);
        LzpTable {
            cells:  vec![CELL_INIT; 1 << mask_size],
            mask:   (1 << mask_size) - 1,
        }
    }
    /// Returns (state, predicted symbol) for `hash`.
    pub fn get(&self, hash: usize) -> (u8, u8) {
        let cell = self.cells[hash & self.mask];
        ((cell >> 8) as u8, cell as u8)
    }
    pub fn set(&mut self, hash: usize, state: u8, symbol: u8) {
        self.cells[hash & self.mask] = ((state as u16) << 8) | symbol as u16;
    }
}
