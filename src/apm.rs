// Secondary Estimation ------------------------------------------------------------------------------------------------ Secondary Estimation
/// Maps an LZP cell state plus the last four match outcomes of the same
/// table to the probability (out of 2^15) that the cell's prediction is
/// right.
pub struct Apm {
    history:  usize,    // Last 4 outcomes, newest in bit 0, 1 = miss
    pr_map:   Vec<u16>, // 16 histories x 256 states
}
impl Apm {
    pub fn new() -> Apm {
        Apm {
            history:  0,
            pr_map:   vec![0x4000; 16 * 256],
        }
    }
    pub fn p(&self, state: u8) -> u16 {
        self.pr_map[(self.history << 8) + state as usize]
    }
    /// Moves the probability for `state` 1/128 of the way towards the
    /// observed outcome, then records the outcome.
    pub fn update(&mut self, state: u8, hit: bool) {
        let pr = &mut self.pr_map[(self.history << 8) + state as usize];
        if hit {
            *pr += ((0x8000 - *pr) & 0xff80) >> 7;
        }
        else {
            *pr -= (*pr & 0xff80) >> 7;
        }
        self.update_history(hit);
    }
    /// Records an outcome without touching any probability.
    pub fn update_history(&mut self, hit: bool) {
        self.history = ((self.history << 1) | !hit as usize) & 15;
    }
}
impl Default for Apm {
    fn default() -> Apm {
        Apm::new()
    }
}
// ----------------------------------------------------------------------------------------------------------------------------------------
