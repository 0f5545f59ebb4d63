/// # Literal Model
///
/// Adaptive frequency counts for symbols the LZP stage failed to predict,
/// conditioned on the previous one or two bytes. Every context keeps 256
/// per-symbol frequencies, 16 group sums (one per run of 16 symbols) and a
/// total, so a cumulative frequency costs at most 16 + 15 additions.
///
/// For every context these invariants hold between calls:
///
/// * each group sum equals the sum of its 16 symbol frequencies
/// * the total equals the sum of the 16 group sums
/// * every symbol frequency is positive and the total never exceeds the limit
///
/// When a bump pushes the total over the limit, every frequency in the
/// context is halved, rounding up.

pub struct LiteralModel {
    step:     u16,      // Increment per coded symbol
    limit:    u16,      // Largest total before rescaling
    single:   Vec<u16>, // 256 frequencies per context
    grouped:  Vec<u16>, // 16 group sums per context
    total:    Vec<u16>, // Sum of all frequencies per context
}
impl LiteralModel {
    pub fn new(order: u32, init: u32, step: u32, limit: u32) -> LiteralModel {
        let contexts = 1 << (8 * order);
        LiteralModel {
            step:     step as u16,
            limit:    limit as u16,
            single:   vec![init as u16; contexts << 8],
            grouped:  vec![(init * 16) as u16; contexts << 4],
            total:    vec![(init * 256) as u16; contexts],
        }
    }
    pub fn frequency(&self, cxt: usize, symbol: u8) -> u32 {
        self.single[(cxt << 8) | symbol as usize] as u32
    }
    pub fn total(&self, cxt: usize) -> u32 {
        self.total[cxt] as u32
    }
    /// Sum of the frequencies of all symbols below `symbol` in `cxt`.
    pub fn cumulative(&self, cxt: usize, symbol: u8) -> u32 {
        let group = symbol as usize >> 4;
        let below_groups: u32 = self.grouped[cxt << 4..(cxt << 4) + group]
            .iter().map(|&f| f as u32).sum();
        let start = (cxt << 8) | (group << 4);
        let below_in_group: u32 = self.single[start..(cxt << 8) | symbol as usize]
            .iter().map(|&f| f as u32).sum();
        below_groups + below_in_group
    }
    /// Finds the symbol whose cumulative interval contains `target`.
    /// Returns the symbol and its cumulative frequency, or None if
    /// `target` is not below the context total.
    pub fn find(&self, cxt: usize, target: u32) -> Option<(u8, u32)> {
        let mut rest = target;
        let group = self.grouped[cxt << 4..(cxt + 1) << 4].iter().position(|&f| {
            if rest < f as u32 { true } else { rest -= f as u32; false }
        })?;
        let start = (cxt << 8) | (group << 4);
        let index = self.single[start..start + 16].iter().position(|&f| {
            if rest < f as u32 { true } else { rest -= f as u32; false }
        })?;
        Some((((group << 4) | index) as u8, target - rest))
    }
    /// Removes `symbol` from its group sum and zeroes its frequency,
    /// returning the old frequency. The total is left alone, callers
    /// subtract the returned frequency themselves. Must be undone with
    /// [`LiteralModel::restore`] before the next update.
    pub fn exclude(&mut self, cxt: usize, symbol: u8) -> u32 {
        let index = (cxt << 8) | symbol as usize;
        let frequency = self.single[index];
        self.single[index] = 0;
        self.grouped[index >> 4] -= frequency;
        frequency as u32
    }
    pub fn restore(&mut self, cxt: usize, symbol: u8, frequency: u32) {
        let index = (cxt << 8) | symbol as usize;
        self.single[index] = frequency as u16;
        self.grouped[index >> 4] += frequency as u16;
    }
    /// Adds one step to `symbol`, rescaling the context if its total
    /// goes over the limit.
    pub fn bump(&mut self, cxt: usize, symbol: u8) {
        let index = (cxt << 8) | symbol as usize;
        self.single[index] += self.step;
        self.grouped[index >> 4] += self.step;
        self.total[cxt] += self.step;
        if self.total[cxt] > self.limit {
            self.rescale(cxt);
        }
    }
    fn rescale(&mut self, cxt: usize) {
        let single = &mut self.single[cxt << 8..(cxt + 1) << 8];
        for f in single.iter_mut() {
            *f -= (*f & 0xfffe) >> 1;
        }
        let mut total = 0;
        let grouped = &mut self.grouped[cxt << 4..(cxt + 1) << 4];
        for (group, chunk) in grouped.iter_mut().zip(single.chunks(16)) {
            *group = chunk.iter().sum();
            total += *group;
        }
        self.total[cxt] = total;
    }
}
