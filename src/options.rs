use std::fmt;

use crate::{
    constant::*,
    error::OptionsError,
};


/// Validated compression parameters. Every instance satisfies:
///
/// * literal coder order is 1 or 2
/// * order < LZP low context length <= LZP high context length <= 8
/// * both LZP mask sizes lie in 15..=30
/// * literal coder init and step lie in 1..=127
/// * init * 256 <= literal coder limit <= 32767 - step
///
/// The only way to obtain one is through [`CompressionOptions::new`],
/// [`CompressionOptions::from_packed`], [`OptionsBuilder::build`] or
/// [`Default`], all of which enforce these rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionOptions {
    lzp_low_context_length:  u32,
    lzp_low_mask_size:       u32,
    lzp_high_context_length: u32,
    lzp_high_mask_size:      u32,
    literal_coder_order:     u32,
    literal_coder_init:      u32,
    literal_coder_step:      u32,
    literal_coder_limit:     u32,
}
impl CompressionOptions {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        lzp_low_context_length: u32, lzp_low_mask_size: u32,
        lzp_high_context_length: u32, lzp_high_mask_size: u32,
        literal_coder_order: u32, literal_coder_init: u32,
        literal_coder_step: u32, literal_coder_limit: u32,
    ) -> Result<CompressionOptions, OptionsError> {
        let options = CompressionOptions {
            lzp_low_context_length,
            lzp_low_mask_size,
            lzp_high_context_length,
            lzp_high_mask_size,
            literal_coder_order,
            literal_coder_init,
            literal_coder_step,
            literal_coder_limit,
        };
        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), OptionsError> {
        let order = self.literal_coder_order;
        if !(1..=2).contains(&order) {
            return Err(OptionsError::Order(order));
        }
        let (low, high) = (self.lzp_low_context_length, self.lzp_high_context_length);
        if low <= order {
            return Err(OptionsError::LowContext { low, order });
        }
        if high < low {
            return Err(OptionsError::HighContext { low, high });
        }
        if high > 8 {
            return Err(OptionsError::HighContextTooLong(high));
        }
        for mask_size in [self.lzp_low_mask_size, self.lzp_high_mask_size] {
            if !(15..=30).contains(&mask_size) {
                return Err(OptionsError::MaskSize(mask_size));
            }
        }
        if !(1..=127).contains(&self.literal_coder_init) {
            return Err(OptionsError::Init(self.literal_coder_init));
        }
        if !(1..=127).contains(&self.literal_coder_step) {
            return Err(OptionsError::Step(self.literal_coder_step));
        }
        let limit = self.literal_coder_limit;
        let min = self.literal_coder_init * 256;
        if limit < min {
            return Err(OptionsError::LimitTooSmall { limit, min });
        }
        let max = 32767 - self.literal_coder_step;
        if limit > max {
            return Err(OptionsError::LimitTooLarge { limit, max });
        }
        Ok(())
    }

    /// Unpacks options from their 64 bit header form, most significant
    /// field first:
    ///
    ///  [low length:8][low mask:8][high length:8][high mask:8]
    ///  [order - 1:1][init:7][step:8][limit:16]
    pub fn from_packed(packed: u64) -> Result<CompressionOptions, OptionsError> {
        let field = |shift: u32, mask: u64| ((packed >> shift) & mask) as u32;
        CompressionOptions::new(
            field(56, 0xff),
            field(48, 0xff),
            field(40, 0xff),
            field(32, 0xff),
            field(31, 0x01) + 1,
            field(24, 0x7f),
            field(16, 0xff),
            field(0, 0xffff),
        )
    }

    pub fn to_packed(&self) -> u64 {
        let low  = ((self.lzp_low_context_length << 8) | self.lzp_low_mask_size) as u64;
        let high = ((self.lzp_high_context_length << 8) | self.lzp_high_mask_size) as u64;
        let lit  = (((self.literal_coder_order - 1) << 15)
                 | (self.literal_coder_init << 8)
                 | self.literal_coder_step) as u64;
        let limit = self.literal_coder_limit as u64;
        (low << 48) | (high << 32) | (lit << 16) | limit
    }

    /// True when both LZP tables would see identical hashes, in which
    /// case only the low table is kept.
    pub fn only_low_lzp(&self) -> bool {
        self.lzp_low_context_length == self.lzp_high_context_length
        && self.lzp_low_mask_size == self.lzp_high_mask_size
    }

    pub fn lzp_low_context_length(&self) -> u32 { self.lzp_low_context_length }
    pub fn lzp_low_mask_size(&self) -> u32 { self.lzp_low_mask_size }
    pub fn lzp_high_context_length(&self) -> u32 { self.lzp_high_context_length }
    pub fn lzp_high_mask_size(&self) -> u32 { self.lzp_high_mask_size }
    pub fn literal_coder_order(&self) -> u32 { self.literal_coder_order }
    pub fn literal_coder_init(&self) -> u32 { self.literal_coder_init }
    pub fn literal_coder_step(&self) -> u32 { self.literal_coder_step }
    pub fn literal_coder_limit(&self) -> u32 { self.literal_coder_limit }
}
impl Default for CompressionOptions {
    fn default() -> CompressionOptions {
        CompressionOptions {
            lzp_low_context_length:  DEFAULT_LZP_LOW_CONTEXT_LENGTH,
            lzp_low_mask_size:       DEFAULT_LZP_LOW_MASK_SIZE,
            lzp_high_context_length: DEFAULT_LZP_HIGH_CONTEXT_LENGTH,
            lzp_high_mask_size:      DEFAULT_LZP_HIGH_MASK_SIZE,
            literal_coder_order:     DEFAULT_LITERAL_CODER_ORDER,
            literal_coder_init:      DEFAULT_LITERAL_CODER_INIT,
            literal_coder_step:      DEFAULT_LITERAL_CODER_STEP,
            literal_coder_limit:     DEFAULT_LITERAL_CODER_LIMIT,
        }
    }
}
impl fmt::Display for CompressionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LZP low context length:  {}", self.lzp_low_context_length)?;
        writeln!(f, "LZP low mask size:       {}", self.lzp_low_mask_size)?;
        writeln!(f, "LZP high context length: {}", self.lzp_high_context_length)?;
        writeln!(f, "LZP high mask size:      {}", self.lzp_high_mask_size)?;
        writeln!(f, "Literal coder order:     {}", self.literal_coder_order)?;
        writeln!(f, "Literal coder init:      {}", self.literal_coder_init)?;
        writeln!(f, "Literal coder step:      {}", self.literal_coder_step)?;
        write!(f,   "Literal coder limit:     {}", self.literal_coder_limit)
    }
}


/// Mutable staging area for options, validated on [`OptionsBuilder::build`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionsBuilder {
    options: CompressionOptions,
}
impl OptionsBuilder {
    pub fn new() -> OptionsBuilder {
        OptionsBuilder { options: CompressionOptions::default() }
    }
    pub fn lzp_low_context_length(&mut self, length: u32) -> &mut Self {
        self.options.lzp_low_context_length = length;
        self
    }
    pub fn lzp_low_mask_size(&mut self, size: u32) -> &mut Self {
        self.options.lzp_low_mask_size = size;
        self
    }
    pub fn lzp_high_context_length(&mut self, length: u32) -> &mut Self {
        self.options.lzp_high_context_length = length;
        self
    }
    pub fn lzp_high_mask_size(&mut self, size: u32) -> &mut Self {
        self.options.lzp_high_mask_size = size;
        self
    }
    pub fn literal_coder_order(&mut self, order: u32) -> &mut Self {
        self.options.literal_coder_order = order;
        self
    }
    pub fn literal_coder_init(&mut self, init: u32) -> &mut Self {
        self.options.literal_coder_init = init;
        self
    }
    pub fn literal_coder_step(&mut self, step: u32) -> &mut Self {
        self.options.literal_coder_step = step;
        self
    }
    pub fn literal_coder_limit(&mut self, limit: u32) -> &mut Self {
        self.options.literal_coder_limit = limit;
        self
    }
    pub fn build(&self) -> Result<CompressionOptions, OptionsError> {
        self.options.validate()?;
        Ok(self.options)
    }
}
impl Default for OptionsBuilder {
    fn default() -> OptionsBuilder {
        OptionsBuilder::new()
    }
}
