pub const SIGMA: usize = 6; // {0:$, 1:A, 2:C, 3:G, 4:T, 5:N}

/// Codes a k-mer may take at any position during a mismatch search.
pub const BASES: [u8; 5] = [1, 2, 3, 4, 5];

pub const CODE_N: u8 = 5;

#[inline]
pub fn to_alphabet(b: u8) -> u8 {
    if b == 0 { return 0; }
    match b.to_ascii_uppercase() {
        b'A' => 1,
        b'C' => 2,
        b'G' => 3,
        b'T' | b'U' => 4,
        _ => CODE_N, // map others to N
    }
}

#[inline]
pub fn from_alphabet(a: u8) -> u8 {
    match a {
        0 => b'$',
        1 => b'A',
        2 => b'C',
        3 => b'G',
        4 => b'T',
        _ => b'N',
    }
}

/// 将原始序列编码为字母表（不追加分隔符）。
pub fn encode(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| to_alphabet(b)).collect()
}

pub fn decode(codes: &[u8]) -> Vec<u8> {
    codes.iter().map(|&a| from_alphabet(a)).collect()
}

/// Complement of an encoded base. `N` and the separator map to themselves.
#[inline]
pub fn complement_code(a: u8) -> u8 {
    match a {
        1 => 4,
        2 => 3,
        3 => 2,
        4 => 1,
        other => other,
    }
}

/// Reverse complement of an encoded sequence.
pub fn revcomp_codes(codes: &[u8]) -> Vec<u8> {
    codes.iter().rev().map(|&a| complement_code(a)).collect()
}
