use std::fmt;


// Magic Number
pub const MAGIC: u64 = 0x208b_bb9f_5b12_98be;

// Symbols coded between two progress reports
pub const DEFAULT_INTERVAL: u64 = 64 * 1024;

// Default compression options
pub const DEFAULT_LZP_LOW_CONTEXT_LENGTH:  u32 = 4;
pub const DEFAULT_LZP_LOW_MASK_SIZE:       u32 = 24;
pub const DEFAULT_LZP_HIGH_CONTEXT_LENGTH: u32 = 8;
pub const DEFAULT_LZP_HIGH_MASK_SIZE:      u32 = 27;
pub const DEFAULT_LITERAL_CODER_ORDER:     u32 = 2;
pub const DEFAULT_LITERAL_CODER_INIT:      u32 = 1;
pub const DEFAULT_LITERAL_CODER_STEP:      u32 = 60;
pub const DEFAULT_LITERAL_CODER_LIMIT:     u32 = 30000;


#[derive(Default, Debug, Clone, Copy)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}
impl Version {
    pub fn current() -> Version {
        Version {
            major: 0,
            minor: 1,
            patch: 0,
        }
    }
}
impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}
