//! Arithmetic in the finite field GF(2^8).
//!
//! Elements are bytes, addition is XOR and multiplication is carried out
//! through discrete log/exp tables built for the generator 3 modulo the
//! polynomial x^8 + x^4 + x^3 + x + 1 (0x11b). The `*4` variants work on
//! the four bytes of a `u32` as independent lanes.

/// x * 3 in GF(2^8).
const fn mul3(x: u8) -> u8 {
    let x2 = if x & 0x80 != 0 { (x << 1) ^ 0x1b } else { x << 1 };
    x ^ x2
}

/// `EXP[i] = 3^i` for `i` in `0..255`, `LOG[EXP[i]] = i`.
const TABLES: ([u8; 255], [u8; 256]) = {
    let mut exp = [0u8; 255];
    let mut log = [0u8; 256];
    let mut i = 0;
    let mut y: u8 = 1;
    while i < 255 {
        exp[i] = y;
        log[y as usize] = i as u8;
        y = mul3(y);
        i += 1;
    }
    (exp, log)
};

const EXP: [u8; 255] = TABLES.0;
const LOG: [u8; 256] = TABLES.1;

/// Product of two field elements.
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    EXP[(LOG[a as usize] as usize + LOG[b as usize] as usize) % 255]
}

/// Multiplicative inverse. `inv(0)` is 0 by convention.
#[inline]
pub fn inv(y: u8) -> u8 {
    if y == 0 {
        return 0;
    }
    EXP[(255 - LOG[y as usize] as usize) % 255]
}

/// Lane-wise product of the four bytes of `a` and `b`.
pub fn mul4(a: u32, b: u32) -> u32 {
    let a = a.to_le_bytes();
    let b = b.to_le_bytes();
    u32::from_le_bytes(std::array::from_fn(|i| mul(a[i], b[i])))
}

/// Lane-wise inverse of the four bytes of `x`.
pub fn inv4(x: u32) -> u32 {
    u32::from_le_bytes(x.to_le_bytes().map(inv))
}
