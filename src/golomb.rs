//! The Exp-Golomb code family: unsigned (`ue`), signed (`se`), truncated
//! (`te`) and mapped (`me`) variable-length decoders, plus
//! `rbsp_trailing_bits`.
//!
//! `ue`/`se` live as methods on [`crate::bitreader::BitReader`] (the teacher's
//! convention); `te`/`me` are free functions here since they need extra
//! parameters (`range_max`, `chroma_array_type`/prediction class) beyond the
//! reader itself.

use crate::bitreader::BitReader;
use crate::error::{AvcError, Result};

/// The macroblock prediction-mode class `me` needs to pick a coded-block-
/// pattern table: intra (I_NxN / Intra_4x4 / Intra_8x8) vs. everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CbpPredClass {
    Intra,
    Inter,
}

/// Truncated Exp-Golomb (`te(v)`). If `range_max > 1`, identical to `ue`;
/// otherwise a single bit, inverted (`0` decodes as `1`, `1` decodes as `0`).
pub fn te(reader: &mut BitReader, range_max: u32) -> Result<u32> {
    if range_max > 1 {
        reader.read_ue()
    } else {
        Ok(if reader.read_bit()? { 0 } else { 1 })
    }
}

/// Mapped Exp-Golomb (`me`): decode a `ue` codeNum, then look it up in one of
/// the two 48-entry Intra/Inter coded-block-pattern tables depending on
/// `chroma_array_type`.
pub fn me(reader: &mut BitReader, chroma_array_type: u8, pred_class: CbpPredClass) -> Result<u32> {
    let code_num = reader.read_ue()? as usize;
    let table = match chroma_array_type {
        1 | 2 => &CBP_TABLE_CHROMA_1_2,
        0 | 3 => &CBP_TABLE_CHROMA_0_3,
        other => {
            return Err(AvcError::InvalidCode(format!(
                "me: chroma_array_type {other} out of range"
            )))
        }
    };
    let entry = table.get(code_num).copied().flatten().ok_or_else(|| {
        AvcError::InvalidCode(format!(
            "me: codeNum {code_num} out of 0..{} for chroma_array_type {chroma_array_type}",
            table.len() - 1
        ))
    })?;
    Ok(match pred_class {
        CbpPredClass::Intra => entry.0 as u32,
        CbpPredClass::Inter => entry.1 as u32,
    })
}

/// `rbsp_trailing_bits`: a single `1` bit, then zero-padding to the next byte
/// boundary.
pub fn rbsp_trailing_bits(reader: &mut BitReader) -> Result<()> {
    let stop = reader.read_bit()?;
    if !stop {
        return Err(AvcError::InvalidCode(
            "rbsp_trailing_bits: missing stop bit".to_string(),
        ));
    }
    while !reader.is_byte_aligned() {
        if reader.read_bit()? {
            return Err(AvcError::InvalidCode(
                "rbsp_trailing_bits: non-zero padding bit".to_string(),
            ));
        }
    }
    Ok(())
}

/// Table 9-4, ChromaArrayType in {1, 2}: codeNum -> (Intra CBP, Inter CBP).
pub const CBP_TABLE_CHROMA_1_2: [Option<(u8, u8)>; 48] = [
    Some((47, 0)),
    Some((31, 16)),
    Some((15, 1)),
    Some((0, 2)),
    Some((23, 4)),
    Some((27, 8)),
    Some((29, 32)),
    Some((30, 3)),
    Some((7, 5)),
    Some((11, 10)),
    Some((13, 12)),
    Some((14, 15)),
    Some((39, 47)),
    Some((43, 7)),
    Some((45, 11)),
    Some((46, 13)),
    Some((16, 14)),
    Some((3, 6)),
    Some((5, 9)),
    Some((10, 31)),
    Some((12, 35)),
    Some((19, 37)),
    Some((21, 42)),
    Some((26, 44)),
    Some((28, 33)),
    Some((35, 34)),
    Some((37, 36)),
    Some((42, 40)),
    Some((44, 39)),
    Some((1, 43)),
    Some((2, 45)),
    Some((4, 46)),
    Some((8, 17)),
    Some((17, 18)),
    Some((18, 20)),
    Some((20, 24)),
    Some((24, 19)),
    Some((6, 21)),
    Some((9, 26)),
    Some((22, 28)),
    Some((25, 23)),
    Some((32, 27)),
    Some((33, 29)),
    Some((34, 30)),
    Some((36, 22)),
    Some((40, 25)),
    Some((38, 38)),
    Some((41, 41)),
];

/// Table 9-4, ChromaArrayType in {0, 3}: codeNum -> (Intra CBP, Inter CBP).
/// Only codeNum 0..=15 are defined (luma-only CBP tops out at 15); higher
/// indices are `None` and `me` reports `InvalidCode`.
pub const CBP_TABLE_CHROMA_0_3: [Option<(u8, u8)>; 48] = {
    let mut table: [Option<(u8, u8)>; 48] = [None; 48];
    table[0] = Some((15, 0));
    table[1] = Some((0, 1));
    table[2] = Some((7, 2));
    table[3] = Some((11, 4));
    table[4] = Some((13, 8));
    table[5] = Some((14, 3));
    table[6] = Some((3, 5));
    table[7] = Some((5, 10));
    table[8] = Some((10, 12));
    table[9] = Some((12, 15));
    table[10] = Some((1, 7));
    table[11] = Some((2, 11));
    table[12] = Some((4, 13));
    table[13] = Some((8, 14));
    table[14] = Some((6, 6));
    table[15] = Some((9, 9));
    table
};
