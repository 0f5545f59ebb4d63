use std::time::Instant;

use tracing::info;

use crate::Mode;


/// Tracks the current file's compression or decompression progress.
#[derive(Copy, Clone, Debug)]
pub struct Progress {
    in_size:    u64,
    processed:  u64,
    time:       Instant,
    quiet:      bool,
    mode:       Mode,
}
impl Progress {
    /// Start a timer. `in_size` is the input length if known, 0 otherwise.
    pub fn new(in_size: u64, quiet: bool, mode: Mode) -> Progress {
        Progress {
            in_size,
            processed: 0,
            time: Instant::now(),
            quiet,
            mode,
        }
    }

    /// Record the number of symbols processed so far and print current stats.
    pub fn update(&mut self, processed: u64) {
        self.processed = processed;
        self.print_chunk_stats();
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    fn print_chunk_stats(&self) {
        if self.quiet {
            return;
        }
        match self.mode {
            Mode::Compress if self.in_size > 0 => {
                eprint!("\rCompressed {} of {} bytes ({:.2}%) (Time elapsed: {:.2?})",
                    self.processed, self.in_size,
                    (self.processed as f64 / self.in_size as f64) * 100.0,
                    self.time.elapsed());
            }
            Mode::Compress => {
                eprint!("\rCompressed {} bytes (Time elapsed: {:.2?})",
                    self.processed, self.time.elapsed());
            }
            Mode::Decompress => {
                eprint!("\rDecompressed {} bytes (Time elapsed: {:.2?})",
                    self.processed, self.time.elapsed());
            }
        }
    }

    /// Print final input and output sizes and time elapsed.
    pub fn print_file_stats(&self, in_size: u64, out_size: u64) {
        info!(in_size, out_size, elapsed = ?self.time.elapsed(), "done");
        if !self.quiet {
            eprintln!("\n{} bytes -> {} bytes in {:.2?}",
                in_size, out_size, self.time.elapsed());
        }
    }
}
