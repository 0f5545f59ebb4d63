use std::sync::OnceLock;

use tracing::trace;

use crate::lg2::nlog2;

/// # LZP State Machine
///
/// Every LZP cell carries an 8 bit state summarizing how often the cell's
/// predicted symbol was recently right or wrong. The state is the row
/// index into a 256 x 2 transition table built once per process.
///
/// A state is identified by the tuple (misses, hits, h1, h0), where misses
/// and hits are capped adaptive counts and h1, h0 are the two most recent
/// outcomes (2 meaning "no outcome yet"). Generation starts at (0, 0, 2, 2)
/// and walks both outcomes depth first, handing out state numbers in visit
/// order. On a miss the miss count grows and the hit count is discounted,
/// on a hit the reverse. Discounting only kicks in once the opposing count
/// is large enough, which keeps young states distinct while letting old
/// ones forget. The walk reaches 255 states, state 255 is never entered.

const LIMIT_X: i32 = 20; // Cap on the miss count
const LIMIT_Y: i32 = 20; // Cap on the hit count
const SLOTS:   usize = ((LIMIT_X + 1) * (LIMIT_Y + 1) * 3 * 3) as usize;

static STATE_TABLE: OnceLock<StateTable> = OnceLock::new();

/// Returns the shared transition table, generating it on first use.
pub fn state_table() -> &'static StateTable {
    STATE_TABLE.get_or_init(|| {
        let table = StateTable::new();
        trace!(states = table.states(), "generated LZP state table");
        table
    })
}


pub struct StateTable {
    next:   [[u8; 2]; 256], // Next state indexed by [state][hit]
    states: usize,          // Number of reachable states
}
impl StateTable {
    pub fn new() -> StateTable {
        let mut gen = Generator {
            next:  [[0; 2]; 256],
            slots: vec![None; SLOTS],
            count: 0,
        };
        gen.visit(0, 0, 2, 2);
        StateTable {
            next:   gen.next,
            states: gen.count,
        }
    }
    /// State after observing a hit or a miss in `state`.
    pub fn next(&self, state: u8, hit: bool) -> u8 {
        self.next[state as usize][hit as usize]
    }
    pub fn states(&self) -> usize {
        self.states
    }
}
impl Default for StateTable {
    fn default() -> StateTable {
        StateTable::new()
    }
}

struct Generator {
    next:   [[u8; 2]; 256],
    slots:  Vec<Option<u8>>, // State number assigned to each tuple
    count:  usize,
}
impl Generator {
    fn visit(&mut self, x: i32, y: i32, h1: usize, h0: usize) -> u8 {
        let x = x.min(LIMIT_X);
        let y = y.min(LIMIT_Y);
        let slot = ((((y * (LIMIT_X + 1) + x) * 3) as usize + h1) * 3) + h0;
        if let Some(state) = self.slots[slot] {
            return state;
        }
        debug_assert!(self.count < 256);
        let state = self.count as u8;
        self.slots[slot] = Some(state);
        self.count += 1;

        let miss = self.visit(repeated(x, y), opposite(y), h0, 0);
        let hit  = self.visit(opposite(x), repeated(y, x), h0, 1);
        self.next[state as usize] = [miss, hit];
        state
    }
}

fn divisor(b: i32) -> i32 {
    (nlog2(b as u32) >> 3) + (nlog2(1950) >> 3) - (12 << 11)
}
// Count of the observed outcome after one more occurrence
fn repeated(a: i32, b: i32) -> i32 {
    if b > 0 && divisor(b) > 1200 {
        (a + 1) * 1950 / divisor(b)
    }
    else {
        a + 1
    }
}
// Count of the other outcome, discounted
fn opposite(b: i32) -> i32 {
    if b > 0 && divisor(b) > 1200 {
        b * 1950 / divisor(b)
    }
    else {
        b
    }
}
