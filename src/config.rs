use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    constant::*,
    error::OptionsError,
    options::{CompressionOptions, OptionsBuilder},
};


/// Command line configuration.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "lzp",
    version,
    about = "LZP compressor with an order-1/2 literal coder"
)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress and statistics output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log at info level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Symbols coded between progress reports.
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_INTERVAL,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compress a file or stdin.
    Encode {
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// Decompress a file or stdin.
    Decode {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Print the options stored in a compressed stream's header.
    ShowOptions {
        /// Compressed input, stdin if omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct IoArgs {
    /// Input file, stdin if omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file, stdout if omitted. Only created once there is
    /// something to write.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct OptionArgs {
    #[arg(long, default_value_t = DEFAULT_LZP_LOW_CONTEXT_LENGTH)]
    pub lzp_low_context_length: u32,
    #[arg(long, default_value_t = DEFAULT_LZP_LOW_MASK_SIZE)]
    pub lzp_low_mask_size: u32,
    #[arg(long, default_value_t = DEFAULT_LZP_HIGH_CONTEXT_LENGTH)]
    pub lzp_high_context_length: u32,
    #[arg(long, default_value_t = DEFAULT_LZP_HIGH_MASK_SIZE)]
    pub lzp_high_mask_size: u32,
    #[arg(long, default_value_t = DEFAULT_LITERAL_CODER_ORDER)]
    pub literal_coder_order: u32,
    #[arg(long, default_value_t = DEFAULT_LITERAL_CODER_INIT)]
    pub literal_coder_init: u32,
    #[arg(long, default_value_t = DEFAULT_LITERAL_CODER_STEP)]
    pub literal_coder_step: u32,
    #[arg(long, default_value_t = DEFAULT_LITERAL_CODER_LIMIT)]
    pub literal_coder_limit: u32,
}
impl OptionArgs {
    pub fn build(&self) -> Result<CompressionOptions, OptionsError> {
        OptionsBuilder::new()
            .lzp_low_context_length(self.lzp_low_context_length)
            .lzp_low_mask_size(self.lzp_low_mask_size)
            .lzp_high_context_length(self.lzp_high_context_length)
            .lzp_high_mask_size(self.lzp_high_mask_size)
            .literal_coder_order(self.literal_coder_order)
            .literal_coder_init(self.literal_coder_init)
            .literal_coder_step(self.literal_coder_step)
            .literal_coder_limit(self.literal_coder_limit)
            .build()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_defaults() {
        let cfg = Config::try_parse_from(["lzp", "encode"]).unwrap();
        assert!(!cfg.quiet);
        assert_eq!(cfg.interval, DEFAULT_INTERVAL);
        match cfg.command {
            Command::Encode { io, options } => {
                assert_eq!(io.input, None);
                assert_eq!(io.output, None);
                assert_eq!(options.build(), Ok(CompressionOptions::default()));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn encode_with_options() {
        let cfg = Config::try_parse_from([
            "lzp", "encode", "-i", "in.txt", "-o", "out.lzp",
            "--lzp-high-mask-size", "20", "--literal-coder-order", "1", "--interval", "100", "-q",
        ]).unwrap();
        assert!(cfg.quiet);
        assert_eq!(cfg.interval, 100);
        let Command::Encode { io, options } = cfg.command else {
            panic!("expected encode");
        };
        assert_eq!(io.input, Some(PathBuf::from("in.txt")));
        assert_eq!(io.output, Some(PathBuf::from("out.lzp")));
        let options = options.build().unwrap();
        assert_eq!(options.lzp_high_mask_size(), 20);
        assert_eq!(options.literal_coder_order(), 1);
    }

    #[test]
    fn invalid_options_fail_on_build() {
        let cfg = Config::try_parse_from(["lzp", "encode", "--lzp-low-mask-size", "40"]).unwrap();
        let Command::Encode { options, .. } = cfg.command else {
            panic!("expected encode");
        };
        assert_eq!(options.build(), Err(OptionsError::MaskSize(40)));
    }

    #[test]
    fn rejects_bad_command_lines() {
        assert!(Config::try_parse_from(["lzp"]).is_err());
        assert!(Config::try_parse_from(["lzp", "decode", "--interval", "0"]).is_err());
        assert!(Config::try_parse_from(["lzp", "decode", "-q", "-v"]).is_err());
        assert!(Config::try_parse_from(["lzp", "decode", "--lzp-low-mask-size", "20"]).is_err());
    }

    #[test]
    fn show_options_input() {
        let cfg = Config::try_parse_from(["lzp", "show-options", "-i", "a.lzp"]).unwrap();
        assert_eq!(cfg.command, Command::ShowOptions { input: Some(PathBuf::from("a.lzp")) });
    }
}
