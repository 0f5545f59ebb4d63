//! Base 2 logarithms used while generating the LZP state machine.

// ilog2 of every byte value, -1 for zero
const LG_TABLE: [i8; 256] = lg_table();

const fn lg_table() -> [i8; 256] {
    let mut table = [0i8; 256];
    table[0] = -1;
    let mut i = 2;
    while i < 256 {
        table[i] = 1 + table[i / 2];
        i += 1;
    }
    table
}

/// Floor of log2 of `value`, -1 for zero.
pub fn ilog2(value: u32) -> i32 {
    if value < 1 << 8 {
        LG_TABLE[value as usize] as i32
    }
    else if value < 1 << 16 {
        8 + LG_TABLE[(value >> 8) as usize] as i32
    }
    else if value < 1 << 24 {
        16 + LG_TABLE[(value >> 16) as usize] as i32
    }
    else {
        24 + LG_TABLE[(value >> 24) as usize] as i32
    }
}

/// Approximate log2 of `value` scaled by 2^14. The fractional part is
/// taken linearly from the bits below the leading one, so the result is
/// exact for powers of two. Defined for 0 < value < 2^15.
pub fn nlog2(value: u32) -> i32 {
    debug_assert!(value > 0 && value < 1 << 15);
    let ilog = ilog2(value);
    ((ilog - 1) << 14) + (value << (14 - ilog)) as i32
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ilog2_matches_bit_length() {
        assert_eq!(ilog2(0), -1);
        assert_eq!(ilog2(1), 0);
        assert_eq!(ilog2(2), 1);
        assert_eq!(ilog2(255), 7);
        assert_eq!(ilog2(256), 8);
        assert_eq!(ilog2(65535), 15);
        assert_eq!(ilog2(65536), 16);
        assert_eq!(ilog2(u32::MAX), 31);
        for shift in 0..32 {
            assert_eq!(ilog2(1 << shift), shift as i32);
        }
    }

    #[test]
    fn nlog2_fixed_point() {
        assert_eq!(nlog2(1), 0);
        assert_eq!(nlog2(2), 16384);
        assert_eq!(nlog2(3), 24576);
        assert_eq!(nlog2(1950), 178656);
        assert_eq!(nlog2(32767), 245759);
    }

    #[test]
    fn nlog2_is_monotonic() {
        let mut last = nlog2(1);
        for value in 2..1 << 15 {
            let next = nlog2(value);
            assert!(next > last, "nlog2({value}) = {next} <= {last}");
            last = next;
        }
    }
}
