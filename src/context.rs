use crate::options::CompressionOptions;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME:  u32 = 16_777_619;


/// The last 8 input bytes plus the hashing and literal context
/// derived from them.
pub struct Context {
    history:     u64,        // Last 8 bytes, newest in the low byte
    seeds:       [u32; 256], // FNV-1 state after the newest byte
    low_length:  u32,
    high_length: u32,
    low_mask:    u32,
    high_mask:   u32,
    order:       u32,
}
impl Context {
    pub fn new(options: &CompressionOptions) -> Context {
        let mut seeds = [0; 256];
        for (byte, seed) in seeds.iter_mut().enumerate() {
            *seed = (FNV_OFFSET.wrapping_mul(FNV_PRIME) ^ byte as u32).wrapping_mul(FNV_PRIME);
        }
        Context {
            history:     0,
            seeds,
            low_length:  options.lzp_low_context_length(),
            high_length: options.lzp_high_context_length(),
            low_mask:    (1 << options.lzp_low_mask_size()) - 1,
            high_mask:   (1 << options.lzp_high_mask_size()) - 1,
            order:       options.literal_coder_order(),
        }
    }
    pub fn push(&mut self, symbol: u8) {
        self.history = (self.history << 8) | symbol as u64;
    }
    /// Byte `n` back from the end of the input, 0 being the newest.
    pub fn byte(&self, n: u32) -> u8 {
        (self.history >> (8 * n)) as u8
    }
    /// Literal model context, newest byte in the high position for order 2.
    pub fn literal(&self) -> usize {
        match self.order {
            1 => self.byte(0) as usize,
            _ => ((self.byte(0) as usize) << 8) | self.byte(1) as usize,
        }
    }

    // FNV-1 over the newest low_length bytes, finished without the final
    // multiply. Returns the state and the number of bytes hashed.
    fn hash_low_raw(&self) -> (u32, u32) {
        let mut hash = self.seeds[self.byte(0) as usize];
        let mut i = 1;
        loop {
            hash ^= self.byte(i) as u32;
            i += 1;
            if i == self.low_length {
                break;
            }
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        (hash, i)
    }
    pub fn hash_low(&self) -> usize {
        (self.hash_low_raw().0 & self.low_mask) as usize
    }
    /// Low and high table hashes. The high hash continues the low one over
    /// the remaining high_length - low_length bytes.
    pub fn hashes(&self) -> (usize, usize) {
        let (mut hash, mut i) = self.hash_low_raw();
        let low = hash & self.low_mask;
        while i < self.high_length {
            hash = hash.wrapping_mul(FNV_PRIME);
            hash ^= self.byte(i) as u32;
            i += 1;
        }
        (low as usize, (hash & self.high_mask) as usize)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds() {
        let cxt = Context::new(&CompressionOptions::default());
        assert_eq!(cxt.seeds[0], 0x1176_97cd);
        assert_eq!(cxt.seeds[255], 0xd277_c7a0);
    }

    #[test]
    fn history_and_literal_context() {
        let mut cxt = Context::new(&CompressionOptions::default());
        assert_eq!(cxt.literal(), 0);
        cxt.push(b'a');
        cxt.push(b'b');
        assert_eq!(cxt.byte(0), b'b');
        assert_eq!(cxt.byte(1), b'a');
        assert_eq!(cxt.literal(), 25185);

        let options = CompressionOptions::new(4, 24, 8, 27, 1, 1, 60, 30000).unwrap();
        let mut cxt = Context::new(&options);
        cxt.push(b'a');
        cxt.push(b'b');
        assert_eq!(cxt.literal(), b'b' as usize);
    }

    #[test]
    fn known_hashes() {
        let mut cxt = Context::new(&CompressionOptions::default());
        cxt.push(b'a');
        cxt.push(b'b');
        assert_eq!(cxt.hashes(), (0xfa_0316, 0x424_9e76));
        assert_eq!(cxt.hash_low(), 0xfa_0316);
    }

    #[test]
    fn history_keeps_eight_bytes() {
        let options = CompressionOptions::new(8, 20, 8, 20, 2, 1, 60, 30000).unwrap();
        let mut a = Context::new(&options);
        let mut b = Context::new(&options);
        for symbol in 0..8 {
            a.push(symbol);
        }
        b.push(200);
        for symbol in 0..8 {
            b.push(symbol);
        }
        assert_eq!(a.hashes(), b.hashes());
        a.push(1);
        assert_ne!(a.hashes(), b.hashes());
    }
}
