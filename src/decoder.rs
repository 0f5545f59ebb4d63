use crate::{
    buffered_io::{ByteReader, ByteWriter},
    coder::Chunk,
    error::{Error, Result},
    model::Model,
    options::CompressionOptions,
};

const RANGE_INIT: u32 = 0x7fff_ffff;
const RANGE_MIN:  u32 = 0x0080_0000;


// Decoder ------------------------------------------------------------------------------------------------------------------------ Decoder
/// Mirror of the encoder. Input bytes are shifted right by one bit on the
/// way in since the encoder's window is 31 bits wide, the dropped low bit
/// becomes the high bit of the next byte.
pub struct Decoder<R: ByteReader> {
    buffer:    u32,   // Offset of the code value inside the range
    range:     u32,
    next_high: u8,    // Low bit of the previous input byte
    started:   bool,  // First 4 bytes read
    ended:     bool,  // Stop flag seen
    model:     Model,
    input:     R,
}
impl<R: ByteReader> Decoder<R> {
    pub fn new(input: R, options: &CompressionOptions) -> Decoder<R> {
        Decoder::with_model(input, Model::new(options))
    }
    pub(crate) fn with_model(input: R, model: Model) -> Decoder<R> {
        Decoder {
            buffer:    0,
            range:     RANGE_INIT,
            next_high: 0,
            started:   false,
            ended:     false,
            model,
            input,
        }
    }

    fn input_byte(&mut self) -> Result<u32> {
        let byte = self.input.read_byte()?.ok_or(Error::UnexpectedEof)?;
        let current = (byte >> 1) as u32 | (self.next_high as u32) << 7;
        self.next_high = byte & 1;
        Ok(current)
    }
    fn init(&mut self) -> Result<()> {
        for _ in 0..4 {
            self.buffer = (self.buffer << 8) + self.input_byte()?;
        }
        self.range = RANGE_INIT;
        self.started = true;
        Ok(())
    }
    fn normalize(&mut self) -> Result<()> {
        while self.range < RANGE_MIN {
            self.buffer = (self.buffer << 8) + self.input_byte()?;
            self.range <<= 8;
        }
        Ok(())
    }

    fn decode_flag(&mut self, pr: u16) -> Result<bool> {
        self.normalize()?;
        let split = (self.range >> 15) * pr as u32;
        if split > self.buffer {
            self.range = split;
            Ok(true)
        }
        else {
            self.range -= split;
            self.buffer -= split;
            Ok(false)
        }
    }
    fn decode_skewed(&mut self) -> Result<bool> {
        self.normalize()?;
        if self.buffer < self.range - 1 {
            self.range -= 1;
            Ok(true)
        }
        else {
            self.buffer = 0;
            self.range = 1;
            Ok(false)
        }
    }
    fn decode_literal(&mut self, mispredicted: u8) -> Result<u8> {
        self.normalize()?;
        let cxt = self.model.literal_context();
        let literal = self.model.literal_mut();
        let excluded = literal.exclude(cxt, mispredicted);
        let unit = self.range / (literal.total(cxt) - excluded);
        let found = literal.find(cxt, self.buffer / unit);
        literal.restore(cxt, mispredicted, excluded);
        let (symbol, cumulative) = found.ok_or(Error::CorruptStream)?;
        let frequency = literal.frequency(cxt, symbol);
        literal.bump(cxt, symbol);

        self.buffer -= cumulative * unit;
        self.range = unit * frequency;
        Ok(symbol)
    }
    fn decode_symbol(&mut self) -> Result<u8> {
        let (coded, other) = self.model.predict();
        let symbol = if self.decode_flag(coded.pr)? {
            coded.symbol
        }
        else {
            self.decode_literal(coded.symbol)?
        };
        self.model.learn(&coded, symbol);
        if let Some(other) = other {
            self.model.reconcile(&other, symbol);
        }
        self.model.push(symbol);
        Ok(symbol)
    }

    /// Decode up to `limit` symbols into `output`.
    pub fn decode<W: ByteWriter>(&mut self, mut output: W, limit: u64) -> Result<Chunk> {
        if !self.started {
            self.init()?;
        }
        if self.ended {
            return Ok(Chunk { symbols: 0, end: true });
        }
        for symbols in 0..limit {
            if !self.decode_skewed()? {
                self.ended = true;
                return Ok(Chunk { symbols, end: true });
            }
            output.write_byte(self.decode_symbol()?)?;
        }
        Ok(Chunk { symbols: limit, end: false })
    }
}
// ----------------------------------------------------------------------------------------------------------------------------------------
