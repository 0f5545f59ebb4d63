//! Stream level entry points: header handling, chunked driving of the
//! encoder and decoder, and progress reporting.
//!
//! A full stream is the magic number, the packed options and the range
//! coded body, both header words big-endian. The raw variants skip the
//! header and leave agreeing on options to the caller.

use tracing::{debug, trace};

use crate::{
    buffered_io::{ByteReader, ByteWriter},
    constant::MAGIC,
    decoder::Decoder,
    encoder::Encoder,
    error::{Error, Result},
    options::CompressionOptions,
};


/// Outcome of coding one bounded run of symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub symbols: u64,  // Symbols coded in this run
    pub end:     bool, // Input or stream ended during this run
}

fn check_interval(interval: u64) -> Result<()> {
    if interval == 0 {
        return Err(Error::InvalidInterval);
    }
    Ok(())
}

/// Read the header of a full stream and return its options. On success
/// `input` is positioned at the start of the body.
pub fn peek_options<R: ByteReader>(mut input: R) -> Result<CompressionOptions> {
    let magic = input.read_u64()?.ok_or(Error::UnexpectedEof)?;
    if magic != MAGIC {
        return Err(Error::BadHeader { found: magic });
    }
    peek_options_headerless(input)
}

/// Read packed options not preceded by the magic number.
pub fn peek_options_headerless<R: ByteReader>(mut input: R) -> Result<CompressionOptions> {
    let packed = input.read_u64()?.ok_or(Error::UnexpectedEof)?;
    Ok(CompressionOptions::from_packed(packed)?)
}

/// Compress all of `input` into a full stream. `progress` receives the
/// running symbol count after every `interval` symbols and once more with
/// the final total.
pub fn encode<R, W>(
    input: R,
    mut output: W,
    progress: Option<&mut dyn FnMut(u64)>,
    interval: u64,
    options: &CompressionOptions,
) -> Result<W>
where
    R: ByteReader,
    W: ByteWriter,
{
    check_interval(interval)?;
    output.write_u64(MAGIC)?;
    output.write_u64(options.to_packed())?;
    encode_raw(input, output, progress, interval, options)
}

/// Compress all of `input` without writing a header.
pub fn encode_raw<R, W>(
    mut input: R,
    output: W,
    progress: Option<&mut dyn FnMut(u64)>,
    interval: u64,
    options: &CompressionOptions,
) -> Result<W>
where
    R: ByteReader,
    W: ByteWriter,
{
    check_interval(interval)?;
    debug!(packed = options.to_packed(), interval, "encoding");
    let mut encoder = Encoder::new(output, options);
    let total = drive(progress, interval, |limit| encoder.encode(&mut input, limit))?;
    debug!(total, "encoded");
    encoder.flush()
}

/// Decompress a full stream, reading its options from the header.
pub fn decode<R, W>(
    mut input: R,
    output: W,
    progress: Option<&mut dyn FnMut(u64)>,
    interval: u64,
) -> Result<W>
where
    R: ByteReader,
    W: ByteWriter,
{
    check_interval(interval)?;
    let options = peek_options(&mut input)?;
    decode_raw(input, output, progress, interval, &options)
}

/// Decompress a headerless body coded with `options`.
pub fn decode_raw<R, W>(
    input: R,
    mut output: W,
    progress: Option<&mut dyn FnMut(u64)>,
    interval: u64,
    options: &CompressionOptions,
) -> Result<W>
where
    R: ByteReader,
    W: ByteWriter,
{
    check_interval(interval)?;
    debug!(packed = options.to_packed(), interval, "decoding");
    let mut decoder = Decoder::new(input, options);
    let total = drive(progress, interval, |limit| decoder.decode(&mut output, limit))?;
    debug!(total, "decoded");
    Ok(output)
}

// Run `step` until it reports the end, counting symbols and reporting progress
fn drive<F>(mut progress: Option<&mut dyn FnMut(u64)>, interval: u64, mut step: F) -> Result<u64>
where
    F: FnMut(u64) -> Result<Chunk>,
{
    let mut total = 0;
    loop {
        let chunk = step(interval)?;
        total += chunk.symbols;
        trace!(total, "chunk done");
        if let Some(progress) = progress.as_mut() {
            progress(total);
        }
        if chunk.end {
            return Ok(total);
        }
    }
}

/// Compress `data` into a full stream in memory.
pub fn compress(data: &[u8], options: &CompressionOptions) -> Result<Vec<u8>> {
    encode(data, Vec::new(), None, u64::MAX, options)
}

/// Decompress a full stream held in memory. Bytes left over after the
/// stop flag are an error.
pub fn decompress(mut data: &[u8]) -> Result<Vec<u8>> {
    let output = decode(&mut data, Vec::new(), None, u64::MAX)?;
    if !data.is_empty() {
        return Err(Error::TrailingData);
    }
    Ok(output)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    fn hex(data: &[u8]) -> String {
        data.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn small_options() -> CompressionOptions {
        CompressionOptions::new(4, 16, 4, 16, 1, 1, 60, 30000).unwrap()
    }

    fn random_text(seed: u64, len: usize) -> Vec<u8> {
        let rng = fastrand::Rng::with_seed(seed);
        (0..len).map(|_| b"abcde "[rng.usize(..6)]).collect()
    }

    fn encode_with(model: Model, data: &[u8]) -> Vec<u8> {
        let mut encoder = Encoder::with_model(Vec::new(), model);
        let chunk = encoder.encode(data, u64::MAX).unwrap();
        assert_eq!(chunk, Chunk { symbols: data.len() as u64, end: true });
        encoder.flush().unwrap()
    }

    fn decode_with(model: Model, body: &[u8]) -> Vec<u8> {
        let mut input = body;
        let mut decoder = Decoder::with_model(&mut input, model);
        let mut out = Vec::new();
        let chunk = decoder.decode(&mut out, u64::MAX).unwrap();
        assert!(chunk.end);
        drop(decoder);
        assert!(input.is_empty(), "decoder left {} bytes", input.len());
        out
    }

    #[test]
    fn known_streams_with_default_options() {
        let options = CompressionOptions::default();
        let empty = compress(&[], &options).unwrap();
        assert_eq!(hex(&empty), "208bbb9f5b1298be0418081b813c7530fffffffc");
        assert_eq!(decompress(&empty).unwrap(), b"");

        let zeros = compress(&[0, 0, 0, 0], &options).unwrap();
        assert_eq!(hex(&zeros), "208bbb9f5b1298be0418081b813c7530800f8f7ffe");
        assert_eq!(decompress(&zeros).unwrap(), [0, 0, 0, 0]);

        let hello = compress(b"hello world", &options).unwrap();
        assert_eq!(
            hex(&hello),
            "208bbb9f5b1298be0418081b813c7530b48dc9182c2848d43e514511ea8641fe"
        );
        assert_eq!(decompress(&hello).unwrap(), b"hello world");

        let run = vec![b'A'; 100_000];
        let packed = compress(&run, &options).unwrap();
        assert_eq!(packed.len(), 115);
        assert_eq!(decompress(&packed).unwrap(), run);
    }

    #[test]
    fn single_and_dual_tables_round_trip() {
        let options = small_options();
        let data = random_text(11, 3000);

        let single = encode_with(Model::new(&options), &data);
        let dual = encode_with(Model::with_dual_tables(&options), &data);
        assert_eq!(decode_with(Model::new(&options), &single), data);
        assert_eq!(decode_with(Model::with_dual_tables(&options), &dual), data);
        // Both layouts compress the text
        assert!(single.len() < data.len() / 2);
        assert!(dual.len() < data.len() / 2);
    }

    #[test]
    fn chunks_split_on_interval() {
        let options = small_options();
        let mut encoder = Encoder::new(Vec::new(), &options);
        let mut input = &b"0123456789"[..];
        assert_eq!(encoder.encode(&mut input, 4).unwrap(), Chunk { symbols: 4, end: false });
        assert_eq!(encoder.encode(&mut input, 4).unwrap(), Chunk { symbols: 4, end: false });
        assert_eq!(encoder.encode(&mut input, 4).unwrap(), Chunk { symbols: 2, end: true });
        let body = encoder.flush().unwrap();

        let mut decoder = Decoder::new(&body[..], &options);
        let mut out = Vec::new();
        assert_eq!(decoder.decode(&mut out, 4).unwrap(), Chunk { symbols: 4, end: false });
        assert_eq!(decoder.decode(&mut out, 4).unwrap(), Chunk { symbols: 4, end: false });
        assert_eq!(decoder.decode(&mut out, 4).unwrap(), Chunk { symbols: 2, end: true });
        assert_eq!(decoder.decode(&mut out, 4).unwrap(), Chunk { symbols: 0, end: true });
        assert_eq!(out, b"0123456789");
    }

    #[test]
    fn zero_interval_writes_nothing() {
        let options = small_options();
        let mut out = Vec::new();
        let result = encode(&b"abc"[..], &mut out, None, 0, &options);
        assert!(matches!(result, Err(Error::InvalidInterval)));
        assert!(out.is_empty());

        let stream = compress(b"abc", &options).unwrap();
        let result = decode(&stream[..], &mut out, None, 0);
        assert!(matches!(result, Err(Error::InvalidInterval)));
        assert!(out.is_empty());
    }

    #[test]
    fn header_errors() {
        let options = small_options();
        let mut stream = compress(b"abc", &options).unwrap();
        assert_eq!(peek_options(&stream[..]).unwrap(), options);
        assert_eq!(peek_options_headerless(&stream[8..]).unwrap(), options);

        assert!(matches!(peek_options(&stream[..12]), Err(Error::UnexpectedEof)));
        assert!(matches!(peek_options(&stream[8..]), Err(Error::BadHeader { .. })));

        stream[15] = 0; // limit below init * 256
        stream[14] = 0;
        assert!(matches!(decompress(&stream), Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn truncated_and_padded_streams() {
        let options = small_options();
        let data = random_text(5, 500);
        let stream = compress(&data, &options).unwrap();
        assert!(matches!(decompress(&stream[..stream.len() - 1]), Err(Error::UnexpectedEof)));
        assert!(matches!(decompress(&stream[..16]), Err(Error::UnexpectedEof)));

        let mut padded = stream.clone();
        padded.push(0);
        assert!(matches!(decompress(&padded), Err(Error::TrailingData)));
    }
}
