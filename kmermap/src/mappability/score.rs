use std::fmt::Display;

use super::params::OutputKind;

/// Element type of a score vector. The default value (zero) marks positions
/// without a score.
pub trait Score: Copy + Default + PartialEq + Display + Send + Sync + 'static {
    const KIND: OutputKind;
    /// Little-endian byte width of one value.
    const WIDTH: usize;

    /// Score of a k-mer with `count` occurrences (`count >= 1`).
    fn from_count(count: u64) -> Self;

    fn write_le(self, out: &mut Vec<u8>);

    fn is_defined(self) -> bool {
        self != Self::default()
    }
}

impl Score for f32 {
    const KIND: OutputKind = OutputKind::Mappability;
    const WIDTH: usize = 4;

    fn from_count(count: u64) -> Self {
        if count == 0 { 0.0 } else { 1.0 / count as f32 }
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl Score for u8 {
    const KIND: OutputKind = OutputKind::FrequencySmall;
    const WIDTH: usize = 1;

    fn from_count(count: u64) -> Self {
        count.min(u64::from(u8::MAX)) as u8
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self);
    }
}

impl Score for u16 {
    const KIND: OutputKind = OutputKind::FrequencyLarge;
    const WIDTH: usize = 2;

    fn from_count(count: u64) -> Self {
        count.min(u64::from(u16::MAX)) as u16
    }

    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

/// Per-position scores of one segment.
#[derive(Debug, Clone, PartialEq)]
pub enum MappabilityVector {
    Mappability(Vec<f32>),
    FrequencySmall(Vec<u8>),
    FrequencyLarge(Vec<u16>),
}

impl MappabilityVector {
    pub fn len(&self) -> usize {
        match self {
            Self::Mappability(v) => v.len(),
            Self::FrequencySmall(v) => v.len(),
            Self::FrequencyLarge(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether position `p` carries a score.
    pub fn is_defined(&self, p: usize) -> bool {
        match self {
            Self::Mappability(v) => v[p].is_defined(),
            Self::FrequencySmall(v) => v[p].is_defined(),
            Self::FrequencyLarge(v) => v[p].is_defined(),
        }
    }

    pub fn as_mappability(&self) -> Option<&[f32]> {
        match self {
            Self::Mappability(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_frequency_small(&self) -> Option<&[u8]> {
        match self {
            Self::FrequencySmall(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_frequency_large(&self) -> Option<&[u16]> {
        match self {
            Self::FrequencyLarge(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Vec<f32>> for MappabilityVector {
    fn from(v: Vec<f32>) -> Self {
        Self::Mappability(v)
    }
}

impl From<Vec<u8>> for MappabilityVector {
    fn from(v: Vec<u8>) -> Self {
        Self::FrequencySmall(v)
    }
}

impl From<Vec<u16>> for MappabilityVector {
    fn from(v: Vec<u16>) -> Self {
        Self::FrequencyLarge(v)
    }
}
