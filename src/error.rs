use std::io;

use thiserror::Error;


/// Reasons a set of compression options is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("literal coder order {0} is outside 1..=2")]
    Order(u32),
    #[error("LZP low context length {low} must be greater than the literal coder order {order}")]
    LowContext { low: u32, order: u32 },
    #[error("LZP high context length {high} is shorter than the low context length {low}")]
    HighContext { low: u32, high: u32 },
    #[error("LZP high context length {0} exceeds 8")]
    HighContextTooLong(u32),
    #[error("LZP mask size {0} is outside 15..=30")]
    MaskSize(u32),
    #[error("literal coder init {0} is outside 1..=127")]
    Init(u32),
    #[error("literal coder step {0} is outside 1..=127")]
    Step(u32),
    #[error("literal coder limit {limit} is below init * 256 ({min})")]
    LimitTooSmall { limit: u32, min: u32 },
    #[error("literal coder limit {limit} exceeds 32767 - step ({max})")]
    LimitTooLarge { limit: u32, max: u32 },
}

/// Errors returned while encoding or decoding a stream. None of them are
/// recoverable for the stream that produced them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("wrong stream header {found:#018x}, probably not a compressed stream")]
    BadHeader { found: u64 },
    #[error("unexpected end of stream")]
    UnexpectedEof,
    #[error("invalid compression options: {0}")]
    InvalidOptions(#[from] OptionsError),
    #[error("interval length has to be positive")]
    InvalidInterval,
    #[error("compressed stream is corrupt")]
    CorruptStream,
    #[error("not entire input was decoded")]
    TrailingData,
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
