use crate::{
    apm::Apm,
    context::Context,
    fsm::{state_table, StateTable},
    literal::LiteralModel,
    lzp_table::LzpTable,
    options::CompressionOptions,
};


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Low,
    High,
}

/// One LZP table's guess for the next symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    pub side:    Side,
    pub hash:    usize,
    pub state:   u8,
    pub symbol:  u8,  // Predicted symbol
    pub pr:      u16, // Probability the prediction is right, out of 2^15
}

// An LZP table and the estimator turning its states into probabilities
struct Lzp {
    table:  LzpTable,
    apm:    Apm,
}
impl Lzp {
    fn new(mask_size: u32) -> Lzp {
        Lzp {
            table:  LzpTable::new(mask_size),
            apm:    Apm::new(),
        }
    }
    fn predict(&self, side: Side, hash: usize) -> Prediction {
        let (state, symbol) = self.table.get(hash);
        Prediction { side, hash, state, symbol, pr: self.apm.p(state) }
    }
}

// Model ---------------------------------------------------------------------------------------------------------------------------- Model
/// All adaptive state shared in lockstep by the encoder and decoder. Both
/// sides feed it the same symbols in the same order, so it never has to be
/// transmitted.
///
/// With two tables, only the table whose probability is higher (low wins
/// ties) has its outcome coded. The other one is reconciled after the
/// symbol is known: its history and cell are updated as if it had been
/// coded, but its probabilities are not trained.
pub struct Model {
    cxt:      Context,             // Recent bytes and hashes
    states:   &'static StateTable, // LZP cell state transitions
    low:      Lzp,                 // Shorter context table
    high:     Option<Lzp>,         // Longer context table, absent if it would mirror low
    literal:  LiteralModel,        // Fallback for mispredicted symbols
}
impl Model {
    pub fn new(options: &CompressionOptions) -> Model {
        Model::build(options, !options.only_low_lzp())
    }
    /// Model that keeps two tables even when the options make them
    /// identical.
    #[cfg(test)]
    pub(crate) fn with_dual_tables(options: &CompressionOptions) -> Model {
        Model::build(options, true)
    }
    fn build(options: &CompressionOptions, dual: bool) -> Model {
        Model {
            cxt:      Context::new(options),
            states:   state_table(),
            low:      Lzp::new(options.lzp_low_mask_size()),
            high:     if dual { Some(Lzp::new(options.lzp_high_mask_size())) } else { None },
            literal:  LiteralModel::new(
                          options.literal_coder_order(),
                          options.literal_coder_init(),
                          options.literal_coder_step(),
                          options.literal_coder_limit(),
                      ),
        }
    }
    #[cfg(test)]
    pub fn is_dual(&self) -> bool {
        self.high.is_some()
    }

    /// Returns the prediction whose outcome gets coded, plus the other
    /// table's prediction if there is one.
    pub fn predict(&self) -> (Prediction, Option<Prediction>) {
        match &self.high {
            None => (self.low.predict(Side::Low, self.cxt.hash_low()), None),
            Some(high) => {
                let (low_hash, high_hash) = self.cxt.hashes();
                let low = self.low.predict(Side::Low, low_hash);
                let high = high.predict(Side::High, high_hash);
                if low.pr >= high.pr {
                    (low, Some(high))
                }
                else {
                    (high, Some(low))
                }
            }
        }
    }

    fn lzp_mut(&mut self, side: Side) -> &mut Lzp {
        match (side, self.high.as_mut()) {
            (Side::High, Some(high)) => high,
            _ => &mut self.low,
        }
    }

    /// Updates the table whose outcome was coded.
    pub fn learn(&mut self, pr: &Prediction, symbol: u8) {
        let hit = symbol == pr.symbol;
        let next = self.states.next(pr.state, hit);
        let lzp = self.lzp_mut(pr.side);
        lzp.apm.update(pr.state, hit);
        lzp.table.set(pr.hash, next, symbol);
    }
    /// Updates the table whose outcome was not coded.
    pub fn reconcile(&mut self, pr: &Prediction, symbol: u8) {
        let hit = symbol == pr.symbol;
        let next = self.states.next(pr.state, hit);
        let lzp = self.lzp_mut(pr.side);
        lzp.apm.update_history(hit);
        lzp.table.set(pr.hash, next, symbol);
    }

    pub fn literal_context(&self) -> usize {
        self.cxt.literal()
    }
    pub fn literal_mut(&mut self) -> &mut LiteralModel {
        &mut self.literal
    }
    pub fn push(&mut self, symbol: u8) {
        self.cxt.push(symbol);
    }
}
// ----------------------------------------------------------------------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::*;

    fn small_options(dual: bool) -> CompressionOptions {
        if dual {
            CompressionOptions::new(3, 16, 6, 17, 1, 1, 60, 30000).unwrap()
        }
        else {
            CompressionOptions::new(4, 16, 4, 16, 1, 1, 60, 30000).unwrap()
        }
    }

    #[test]
    fn table_count_follows_options() {
        assert!(!Model::new(&small_options(false)).is_dual());
        assert!(Model::new(&small_options(true)).is_dual());
        assert!(Model::with_dual_tables(&small_options(false)).is_dual());
    }

    #[test]
    fn fresh_model_predicts_b5() {
        let model = Model::new(&small_options(true));
        let (coded, other) = model.predict();
        assert_eq!(coded.side, Side::Low);
        assert_eq!(coded.symbol, 0xb5);
        assert_eq!(coded.state, 0xff);
        assert_eq!(coded.pr, 0x4000);
        assert_eq!(other.map(|pr| pr.side), Some(Side::High));
    }

    #[test]
    fn learns_repeated_context() {
        let mut model = Model::new(&small_options(false));
        for &symbol in b"abcdabcd" {
            let (coded, _) = model.predict();
            model.learn(&coded, symbol);
            model.push(symbol);
        }
        // Context "abcd" was followed by 'a' the first time round
        let (coded, _) = model.predict();
        assert_eq!(coded.symbol, b'a');
        assert_eq!(coded.state, state_table().next(0xff, false));
    }

    #[test]
    fn reconcile_does_not_train_probabilities() {
        let mut model = Model::new(&small_options(true));
        let (_, other) = model.predict();
        let other = other.unwrap();
        model.reconcile(&other, other.symbol);
        let high = model.high.as_ref().unwrap();
        assert_eq!(high.table.get(other.hash), (0, 0xb5));
        // A hit leaves the history at 0, so the row read back is untouched
        assert_eq!(high.apm.p(0xff), 0x4000);
    }
}
