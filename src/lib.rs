mod apm;
mod context;
mod decoder;
mod encoder;
mod fsm;
mod lg2;
mod literal;
mod lzp_table;
mod model;
mod progress;
mod error;
pub mod buffered_io;
pub mod coder;
pub mod config;
pub mod constant;
pub mod options;

use std::path::Path;

use tracing::{info, warn};

use crate::{
    buffered_io::{new_input, new_output, file_len, ByteReader, ByteWriter, Counter, Output},
    config::{Command, Config, IoArgs},
    constant::Version,
    progress::Progress,
};

pub use crate::{
    coder::{
        compress, decompress, encode, encode_raw, decode, decode_raw,
        peek_options, peek_options_headerless, Chunk,
    },
    decoder::Decoder,
    encoder::Encoder,
    error::{Error, OptionsError, Result},
    options::{CompressionOptions, OptionsBuilder},
};

/// Mode (Compress | Decompress)
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Lzp API. Runs the file level operation described by a command line
/// Config, reading stdin and writing stdout where no paths are given.
#[derive(Clone, Debug)]
pub struct Lzp {
    cfg: Config,
}
impl Lzp {
    /// Create an Lzp runner with an existing Config.
    pub fn new_with_cfg(cfg: Config) -> Lzp {
        Lzp { cfg }
    }

    /// Run the configured command.
    pub fn run(self) -> Result<()> {
        info!(version = %Version::current(), "lzp");
        match &self.cfg.command {
            Command::Encode { io, options } => self.encode_file(io, &options.build()?),
            Command::Decode { io } => self.decode_file(io),
            Command::ShowOptions { input } => {
                let options = self.show_options(input.as_deref())?;
                println!("{options}");
                Ok(())
            }
        }
    }

    fn encode_file(&self, io: &IoArgs, options: &CompressionOptions) -> Result<()> {
        info!(input = ?io.input, output = ?io.output, packed = options.to_packed(), "compressing");
        let in_size = io.input.as_deref().map(file_len).unwrap_or(0);
        let mut progress = Progress::new(in_size, self.cfg.quiet, Mode::Compress);
        let input = new_input(io.input.as_deref())?;
        let mut output = Counter::new(new_output(io.output.as_deref()));

        let mut report = |processed: u64| progress.update(processed);
        let result = encode(input, &mut output, Some(&mut report as &mut dyn FnMut(u64)), self.cfg.interval, options)
            .map(|_| ())
            .and_then(|()| Ok(output.flush_buffer()?));
        if let Err(err) = result {
            discard(output.into_inner());
            return Err(err);
        }

        progress.print_file_stats(progress.processed(), output.count());
        Ok(())
    }

    fn decode_file(&self, io: &IoArgs) -> Result<()> {
        info!(input = ?io.input, output = ?io.output, "decompressing");
        let mut progress = Progress::new(0, self.cfg.quiet, Mode::Decompress);
        let mut input = Counter::new(new_input(io.input.as_deref())?);
        let mut output = new_output(io.output.as_deref());

        let mut report = |processed: u64| progress.update(processed);
        let result = decode(&mut input, &mut output, Some(&mut report as &mut dyn FnMut(u64)), self.cfg.interval)
            .map(|_| ())
            .and_then(|()| match input.read_byte()? {
                Some(_) => Err(Error::TrailingData),
                None => Ok(output.flush_buffer()?),
            });
        if let Err(err) = result {
            discard(output);
            return Err(err);
        }

        progress.print_file_stats(input.count(), progress.processed());
        Ok(())
    }

    /// Read the options from a compressed file's header, or stdin's.
    pub fn show_options(&self, input: Option<&Path>) -> Result<CompressionOptions> {
        peek_options(new_input(input)?)
    }
}

// Failed runs leave no partial output file behind
fn discard(output: Output) {
    if let Err(err) = output.discard() {
        warn!("could not remove partial output: {err}");
    }
}
