use crate::{
    buffered_io::{ByteReader, ByteWriter},
    coder::Chunk,
    error::Result,
    model::Model,
    options::CompressionOptions,
};

const RANGE_INIT: u32 = 0x7fff_ffff; // Initial range, 31 bits
const RANGE_MIN:  u32 = 0x0080_0000; // Normalize below this
const BUF_MASK:   u32 = 0x7fff_ffff;


// Encoder ------------------------------------------------------------------------------------------------------------------------ Encoder
/// Range encoder over a 31 bit window. Carries out of the window are
/// resolved with a one byte delay plus a count of pending 0xff bytes,
/// which all flip to 0x00 when a carry arrives.
///
/// Every symbol is preceded by a skewed "continue" flag costing almost
/// nothing, the stream ends with a single "stop" flag. After that each
/// symbol is an LZP match flag, followed by a literal when the flag says
/// the prediction missed.
pub struct Encoder<W: ByteWriter> {
    buffer:  u32,   // Low end of the range, 31 bits
    range:   u32,   // Width of the range
    ff_run:  u32,   // Pending 0xff bytes
    pending: u8,    // Delayed byte, may still receive a carry
    delay:   bool,  // Whether 'pending' holds a byte
    carry:   bool,  // Carry waiting for 'pending'
    model:   Model, // Shared with the decoder
    output:  W,
}
impl<W: ByteWriter> Encoder<W> {
    pub fn new(output: W, options: &CompressionOptions) -> Encoder<W> {
        Encoder::with_model(output, Model::new(options))
    }
    pub(crate) fn with_model(output: W, model: Model) -> Encoder<W> {
        Encoder {
            buffer:  0,
            range:   RANGE_INIT,
            ff_run:  0,
            pending: 0,
            delay:   false,
            carry:   false,
            model,
            output,
        }
    }

    fn output_byte(&mut self, byte: u8) -> Result<()> {
        if byte != 0xff {
            if self.delay {
                self.output.write_byte(self.pending + self.carry as u8)?;
            }
            let run_byte = if self.carry { 0x00 } else { 0xff };
            for _ in 0..self.ff_run {
                self.output.write_byte(run_byte)?;
            }
            self.ff_run  = 0;
            self.pending = byte;
            self.delay   = true;
            self.carry   = false;
        }
        else {
            self.ff_run += 1;
        }
        Ok(())
    }
    fn normalize(&mut self) -> Result<()> {
        while self.range < RANGE_MIN {
            self.output_byte((self.buffer >> 23) as u8)?;
            self.buffer = (self.buffer << 8) & BUF_MASK;
            self.range <<= 8;
        }
        Ok(())
    }
    fn add_with_carry(&mut self, value: u32) {
        self.buffer += value;
        if self.buffer > BUF_MASK {
            self.carry = true;
            self.buffer &= BUF_MASK;
        }
    }

    /// Code a flag that is true with probability pr / 2^15.
    fn encode_flag(&mut self, pr: u16, flag: bool) -> Result<()> {
        self.normalize()?;
        let split = (self.range >> 15) * pr as u32;
        if flag {
            self.range = split;
        }
        else {
            self.add_with_carry(split);
            self.range -= split;
        }
        Ok(())
    }
    /// Code a flag that is almost always true. False is only ever coded
    /// once, at the end of the stream.
    fn encode_skewed(&mut self, flag: bool) -> Result<()> {
        self.normalize()?;
        if flag {
            self.range -= 1;
        }
        else {
            self.add_with_carry(self.range - 1);
            self.range = 1;
        }
        Ok(())
    }
    /// Code `symbol` with the literal model, leaving out the symbol the
    /// LZP stage wrongly predicted.
    fn encode_literal(&mut self, symbol: u8, mispredicted: u8) -> Result<()> {
        self.normalize()?;
        let cxt = self.model.literal_context();
        let literal = self.model.literal_mut();
        let excluded = literal.exclude(cxt, mispredicted);
        let cumulative = literal.cumulative(cxt, symbol);
        let frequency = literal.frequency(cxt, symbol);
        let total = literal.total(cxt) - excluded;
        literal.restore(cxt, mispredicted, excluded);

        let unit = self.range / total;
        self.add_with_carry(unit * cumulative);
        self.range = unit * frequency;
        self.model.literal_mut().bump(cxt, symbol);
        Ok(())
    }
    fn encode_symbol(&mut self, symbol: u8) -> Result<()> {
        let (coded, other) = self.model.predict();
        let hit = symbol == coded.symbol;
        self.encode_flag(coded.pr, hit)?;
        if !hit {
            self.encode_literal(symbol, coded.symbol)?;
        }
        self.model.learn(&coded, symbol);
        if let Some(other) = other {
            self.model.reconcile(&other, symbol);
        }
        self.model.push(symbol);
        Ok(())
    }

    /// Encode up to `limit` symbols from `input`.
    pub fn encode<R: ByteReader>(&mut self, mut input: R, limit: u64) -> Result<Chunk> {
        for symbols in 0..limit {
            match input.read_byte()? {
                Some(symbol) => {
                    self.encode_skewed(true)?;
                    self.encode_symbol(symbol)?;
                }
                None => return Ok(Chunk { symbols, end: true }),
            }
        }
        Ok(Chunk { symbols: limit, end: false })
    }

    /// Code the stop flag and write out the final bytes. The last pending
    /// byte is left unwritten, it is always zero and the decoder never
    /// reads it.
    pub fn flush(mut self) -> Result<W> {
        self.encode_skewed(false)?;
        for _ in 0..5 {
            self.output_byte(((self.buffer >> 23) & 0xff) as u8)?;
            self.buffer = (self.buffer & 0x7f_ffff) << 8;
        }
        Ok(self.output)
    }
}
// ----------------------------------------------------------------------------------------------------------------------------------------
