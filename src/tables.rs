//! Static lookup tables: chroma subsampling, default scaling matrices,
//! MbType/SubMbType name and partition-mode tables, CABAC binIdx bin-string
//! tables, MN context-init values, state-transition table, and rangeTabLPS.
//!
//! These are normative constants of the H.264/AVC standard (Tables 6-1,
//! 7-2, 7-11..7-18, 9-4, 9-12..9-18, 9-36..9-38, 9-44, 9-45), not creative
//! expression of any particular implementation, and are transcribed directly
//! from the standard's defined values.

/// Table 6-1. Returns (SubWidthC, SubHeightC) for a raw `chroma_format_idc`
/// and `separate_colour_plane_flag`. `17` is used as a sentinel for "not
/// applicable" (monochrome, separate colour planes, or an out-of-range
/// `chroma_format_idc`) rather than panicking, so callers can detect the
/// degenerate case without a separate `Option`.
pub fn chroma_subsampling(chroma_format_idc: u32, separate_colour_plane_flag: bool) -> (u32, u32) {
    if separate_colour_plane_flag {
        return (17, 17);
    }
    match chroma_format_idc {
        0 => (17, 17),
        1 => (2, 2),
        2 => (2, 1),
        3 => (1, 1),
        _ => (17, 17),
    }
}

/// Table 7-2, default 4x4 intra scaling list.
pub const DEFAULT_4X4_INTRA: [u8; 16] = [
    6, 13, 13, 20, 20, 20, 28, 28, 28, 28, 32, 32, 32, 37, 37, 42,
];

/// Table 7-2, default 4x4 inter scaling list.
pub const DEFAULT_4X4_INTER: [u8; 16] = [
    10, 14, 14, 20, 20, 20, 24, 24, 24, 24, 27, 27, 27, 30, 30, 34,
];

/// Table 7-2, default 8x8 intra scaling list.
pub const DEFAULT_8X8_INTRA: [u8; 64] = [
    6, 10, 10, 13, 11, 13, 16, 16, 16, 16, 18, 18, 18, 18, 18, 23, 23, 23, 23, 23, 23, 25, 25, 25,
    25, 25, 25, 25, 27, 27, 27, 27, 27, 27, 27, 27, 29, 29, 29, 29, 29, 29, 29, 29, 31, 31, 31, 31,
    31, 31, 31, 33, 33, 33, 33, 33, 33, 36, 36, 36, 36, 36, 38, 40,
];

/// Table 7-2, default 8x8 inter scaling list.
pub const DEFAULT_8X8_INTER: [u8; 64] = [
    9, 13, 13, 15, 13, 15, 17, 17, 17, 17, 19, 19, 19, 19, 19, 21, 21, 21, 21, 21, 21, 22, 22, 22,
    22, 22, 22, 22, 24, 24, 24, 24, 24, 24, 24, 24, 25, 25, 25, 25, 25, 25, 25, 25, 27, 27, 27, 27,
    27, 27, 27, 28, 28, 28, 28, 28, 28, 30, 30, 30, 30, 30, 32, 32,
];

/// Picks the Table 7-2 default scaling matrix for scaling-list index
/// `list_idx` within its group (4x4 lists are indexed 0..6, 8x8 lists 0..6 or
/// 0..12 depending on chroma format): even/first-half indices are the intra
/// matrices (Y, Cb, Cr), odd/second-half are inter.
pub fn default_scaling_list(list_idx: usize, is_4x4: bool) -> &'static [u8] {
    if is_4x4 {
        if list_idx < 3 {
            &DEFAULT_4X4_INTRA
        } else {
            &DEFAULT_4X4_INTER
        }
    } else if list_idx % 2 == 0 {
        &DEFAULT_8X8_INTRA
    } else {
        &DEFAULT_8X8_INTER
    }
}

/// Macroblock prediction-mode class, used both by `me` (golomb.rs) and by
/// the macroblock-layer state machine to select MbType binarization and
/// coded-block-pattern tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbPartPredMode {
    Intra4x4,
    Intra8x8,
    Intra16x16,
    PredL0,
    PredL1,
    BiPred,
    Direct,
}

/// Table 7-11: I-slice MbType name (0..=25, 25 = I_PCM).
pub fn i_slice_mb_type_name(mb_type: u32) -> Option<&'static str> {
    const NAMES: [&str; 26] = [
        "I_NxN",
        "I_16x16_0_0_0",
        "I_16x16_1_0_0",
        "I_16x16_2_0_0",
        "I_16x16_3_0_0",
        "I_16x16_0_1_0",
        "I_16x16_1_1_0",
        "I_16x16_2_1_0",
        "I_16x16_3_1_0",
        "I_16x16_0_2_0",
        "I_16x16_1_2_0",
        "I_16x16_2_2_0",
        "I_16x16_3_2_0",
        "I_16x16_0_0_1",
        "I_16x16_1_0_1",
        "I_16x16_2_0_1",
        "I_16x16_3_0_1",
        "I_16x16_0_1_1",
        "I_16x16_1_1_1",
        "I_16x16_2_1_1",
        "I_16x16_3_1_1",
        "I_16x16_0_2_1",
        "I_16x16_1_2_1",
        "I_16x16_2_2_1",
        "I_16x16_3_2_1",
        "I_PCM",
    ];
    NAMES.get(mb_type as usize).copied()
}

/// Table 7-12: SI-slice MbType name (only mb_type 0, "SI").
pub fn si_slice_mb_type_name(mb_type: u32) -> Option<&'static str> {
    if mb_type == 0 {
        Some("SI")
    } else {
        None
    }
}

/// Sentinel `mb_type` used for the inferred P_Skip/B_Skip macroblock (never
/// actually coded as a value; set by the caller when `mb_skip_flag` is 1).
pub const MB_TYPE_INFERRED: u32 = 1000;

/// Table 7-13: P/SP-slice MbType name.
pub fn p_slice_mb_type_name(mb_type: u32) -> Option<&'static str> {
    match mb_type {
        0 => Some("P_L0_16x16"),
        1 => Some("P_L0_L0_16x8"),
        2 => Some("P_L0_L0_8x16"),
        3 => Some("P_8x8"),
        4 => Some("P_8x8ref0"),
        MB_TYPE_INFERRED => Some("P_Skip"),
        _ => None,
    }
}

/// Table 7-14: B-slice MbType name.
pub fn b_slice_mb_type_name(mb_type: u32) -> Option<&'static str> {
    const NAMES: [&str; 23] = [
        "B_Direct_16x16",
        "B_L0_16x16",
        "B_L1_16x16",
        "B_Bi_16x16",
        "B_L0_L0_16x8",
        "B_L0_L0_8x16",
        "B_L1_L1_16x8",
        "B_L1_L1_8x16",
        "B_L0_L1_16x8",
        "B_L0_L1_8x16",
        "B_L1_L0_16x8",
        "B_L1_L0_8x16",
        "B_L0_Bi_16x8",
        "B_L0_Bi_8x16",
        "B_L1_Bi_16x8",
        "B_L1_Bi_8x16",
        "B_Bi_L0_16x8",
        "B_Bi_L0_8x16",
        "B_Bi_L1_16x8",
        "B_Bi_L1_8x16",
        "B_Bi_Bi_16x8",
        "B_Bi_Bi_8x16",
        "B_8x8",
    ];
    if mb_type == MB_TYPE_INFERRED {
        Some("B_Skip")
    } else {
        NAMES.get(mb_type as usize).copied()
    }
}

/// Table 7-17: P/SP sub_mb_type name, NumSubMbPart, (SubMbPartWidth, SubMbPartHeight).
pub fn p_sub_mb_type(sub_mb_type: u32) -> Option<(&'static str, u32, (u32, u32))> {
    match sub_mb_type {
        0 => Some(("P_L0_8x8", 1, (8, 8))),
        1 => Some(("P_L0_8x4", 2, (8, 4))),
        2 => Some(("P_L0_4x8", 2, (4, 8))),
        3 => Some(("P_L0_4x4", 4, (4, 4))),
        _ => None,
    }
}

/// Table 7-18: B sub_mb_type name, NumSubMbPart, (SubMbPartWidth, SubMbPartHeight).
pub fn b_sub_mb_type(sub_mb_type: u32) -> Option<(&'static str, u32, (u32, u32))> {
    match sub_mb_type {
        0 => Some(("B_Direct_8x8", 4, (4, 4))),
        1 => Some(("B_L0_8x8", 1, (8, 8))),
        2 => Some(("B_L1_8x8", 1, (8, 8))),
        3 => Some(("B_Bi_8x8", 1, (8, 8))),
        4 => Some(("B_L0_8x4", 2, (8, 4))),
        5 => Some(("B_L0_4x8", 2, (4, 8))),
        6 => Some(("B_L1_8x4", 2, (8, 4))),
        7 => Some(("B_L1_4x8", 2, (4, 8))),
        8 => Some(("B_Bi_8x4", 2, (8, 4))),
        9 => Some(("B_Bi_4x8", 2, (4, 8))),
        10 => Some(("B_L0_4x4", 4, (4, 4))),
        11 => Some(("B_L1_4x4", 4, (4, 4))),
        12 => Some(("B_Bi_4x4", 4, (4, 4))),
        _ => None,
    }
}

/// Table 7-11/13/14, NumMbPart(mb_type) for P/B macroblock types that aren't
/// I/SI/skip (those have no partition count). Returns `None` for mb_type
/// values without a single, fixed partition count (e.g. P_8x8, B_8x8).
pub fn num_mb_part(mb_type_name: &str) -> Option<u32> {
    match mb_type_name {
        "P_L0_16x16" | "B_Direct_16x16" | "B_L0_16x16" | "B_L1_16x16" | "B_Bi_16x16" => Some(1),
        "P_L0_L0_16x8"
        | "P_L0_L0_8x16"
        | "B_L0_L0_16x8"
        | "B_L0_L0_8x16"
        | "B_L1_L1_16x8"
        | "B_L1_L1_8x16"
        | "B_L0_L1_16x8"
        | "B_L0_L1_8x16"
        | "B_L1_L0_16x8"
        | "B_L1_L0_8x16"
        | "B_L0_Bi_16x8"
        | "B_L0_Bi_8x16"
        | "B_L1_Bi_16x8"
        | "B_L1_Bi_8x16"
        | "B_Bi_L0_16x8"
        | "B_Bi_L0_8x16"
        | "B_Bi_L1_16x8"
        | "B_Bi_L1_8x16"
        | "B_Bi_Bi_16x8"
        | "B_Bi_Bi_8x16" => Some(2),
        "P_8x8" | "P_8x8ref0" | "B_8x8" => Some(4),
        _ => None,
    }
}

/// Table 7-11/13/14, MbPartPredMode(mb_type, partition 0), used to decide
/// which of INTRA/INTER/RESIDUAL the macroblock-layer state machine enters.
/// Matches `mbType.go`'s `MbPartPredMode`: only partition 0 is modeled,
/// consistent with spec.md §4.9 step 6 (the decision only needs partition 0).
pub fn mb_part_pred_mode(
    slice_type_name: &str,
    mb_type_name: &str,
    transform_size_8x8: bool,
) -> Option<MbPartPredMode> {
    match slice_type_name {
        "I" => {
            if mb_type_name == "I_NxN" {
                Some(if transform_size_8x8 {
                    MbPartPredMode::Intra8x8
                } else {
                    MbPartPredMode::Intra4x4
                })
            } else if mb_type_name == "I_PCM" {
                None
            } else {
                Some(MbPartPredMode::Intra16x16)
            }
        }
        "SI" => Some(MbPartPredMode::Intra4x4),
        "P" | "SP" => match mb_type_name {
            "P_8x8" | "P_8x8ref0" => None,
            "P_Skip" => Some(MbPartPredMode::PredL0),
            _ => Some(MbPartPredMode::PredL0),
        },
        "B" => match mb_type_name {
            "B_Direct_16x16" | "B_Skip" => Some(MbPartPredMode::Direct),
            "B_8x8" => None,
            name if name.starts_with("B_L0") => Some(MbPartPredMode::PredL0),
            name if name.starts_with("B_L1") => Some(MbPartPredMode::PredL1),
            name if name.starts_with("B_Bi") => Some(MbPartPredMode::BiPred),
            _ => None,
        },
        _ => None,
    }
}

// ---------------------------------------------------------------------
// CABAC tables.
// ---------------------------------------------------------------------

/// Sentinel for "ctxIdx not available" (9.3.3.1.1's `na`).
pub const CTX_IDX_NA: i32 = 10_000;

/// Clause 9.3.2 `binarization(syntaxElement, sliceType)`, narrowed to the
/// ctxIdxOffset for bin 0 of the syntax elements this crate drives through
/// the arithmetic engine: `mb_type` (I and P/SP slice prefixes) and
/// `mb_skip_flag` (P/SP only). `None` means this crate has no binarization
/// for that (syntax_element, slice_type) pair.
pub fn binarization_ctx_idx_offset(syntax_element: &str, slice_type_name: &str) -> Option<i32> {
    match (syntax_element, slice_type_name) {
        ("mb_type", "I") => Some(3),
        ("mb_type", "P") | ("mb_type", "SP") => Some(14),
        ("mb_skip_flag", "P") | ("mb_skip_flag", "SP") => Some(11),
        _ => None,
    }
}

/// Clause 9.3.3.1.1: `ctxIdx(binIdx, maxBinIdxCtx, ctxIdxOffset)` for the
/// fixed (non-neighbor-dependent) assignments this crate uses: the bin 0-2
/// prefix of P/SP-slice `mb_type` (ctxIdxOffset 14, ctxIdxInc == binIdx).
/// `mb_skip_flag` and I-slice `mb_type` bin 0 derive ctxIdxInc from neighbor
/// condTermFlags instead (see [`mb_skip_flag_ctx_idx`] and
/// `macroblock::cond_term_flag_mb_type_i`), so they are not covered here.
/// Returns [`CTX_IDX_NA`] for anything outside that one case.
pub fn ctx_idx(bin_idx: u32, max_bin_idx_ctx: u32, ctx_idx_offset: i32) -> i32 {
    if ctx_idx_offset == 14 && bin_idx <= max_bin_idx_ctx && bin_idx <= 2 {
        ctx_idx_offset + bin_idx as i32
    } else {
        CTX_IDX_NA
    }
}

/// Clause 9.3.3.1.1.1: `mb_skip_flag` ctxIdx from the left/above neighbor
/// condTermFlag (each 0 if that neighbor is unavailable or itself skipped,
/// 1 otherwise). ctxIdxOffset 11, ctxIdxInc 0..=2.
pub fn mb_skip_flag_ctx_idx(cond_term_flag_a: bool, cond_term_flag_b: bool) -> usize {
    11 + cond_term_flag_a as usize + cond_term_flag_b as usize
}

/// (M, N) pair for a single context-init entry (Table 9-12..9-33, clause
/// 9.3.1.1). `ctx_idx_offset + binIdx` selects the row; `cabac_init_idc`
/// (or none, for I/SI slice contexts) selects the column.
#[derive(Debug, Clone, Copy)]
pub struct Mn {
    pub m: i32,
    pub n: i32,
}

/// MN context-init values for ctxIdx 0..39 (the MbType / mb_skip_flag /
/// mb_field_decoding_flag context range, Table 9-12..9-14). Index 0 is used
/// for I/SI slice contexts (`cabac_init_idc` not applicable); indices 1..3
/// are `cabac_init_idc` 0, 1, 2 for P/B slice contexts. `ctxIdx` < 11 only
/// has the I/SI column populated, matching the source table.
pub fn mb_type_mn(ctx_idx: usize, cabac_init_idc: Option<u8>) -> Option<Mn> {
    const NO_INIT_IDC: [(usize, Mn); 11] = [
        (0, Mn { m: 20, n: -15 }),
        (1, Mn { m: 2, n: 54 }),
        (2, Mn { m: 3, n: 74 }),
        (3, Mn { m: 20, n: -15 }),
        (4, Mn { m: 2, n: 54 }),
        (5, Mn { m: 3, n: 74 }),
        (6, Mn { m: -28, n: 127 }),
        (7, Mn { m: -23, n: 104 }),
        (8, Mn { m: -6, n: 53 }),
        (9, Mn { m: -1, n: 54 }),
        (10, Mn { m: 7, n: 51 }),
    ];
    if cabac_init_idc.is_none() || ctx_idx < 11 {
        return NO_INIT_IDC
            .iter()
            .find(|(idx, _)| *idx == ctx_idx)
            .map(|(_, mn)| *mn);
    }
    let idc = cabac_init_idc.unwrap() as usize;
    const BY_IDC: &[(usize, [Mn; 3])] = &[
        (11, [Mn { m: 23, n: 33 }, Mn { m: 22, n: 25 }, Mn { m: 29, n: 16 }]),
        (12, [Mn { m: 23, n: 2 }, Mn { m: 34, n: 0 }, Mn { m: 25, n: 0 }]),
        (13, [Mn { m: 21, n: 0 }, Mn { m: 16, n: 0 }, Mn { m: 14, n: 0 }]),
        (14, [Mn { m: 1, n: 9 }, Mn { m: -2, n: 9 }, Mn { m: -10, n: 51 }]),
        (15, [Mn { m: 0, n: 49 }, Mn { m: 4, n: 41 }, Mn { m: -3, n: 62 }]),
        (16, [Mn { m: -37, n: 118 }, Mn { m: -29, n: 118 }, Mn { m: -27, n: 99 }]),
        (17, [Mn { m: 5, n: 57 }, Mn { m: 2, n: 65 }, Mn { m: 26, n: 16 }]),
        (18, [Mn { m: -13, n: 78 }, Mn { m: -6, n: 71 }, Mn { m: -4, n: 85 }]),
        (19, [Mn { m: -11, n: 65 }, Mn { m: -13, n: 79 }, Mn { m: -24, n: 102 }]),
        (20, [Mn { m: 1, n: 62 }, Mn { m: 5, n: 52 }, Mn { m: 5, n: 57 }]),
        (21, [Mn { m: 12, n: 49 }, Mn { m: 9, n: 50 }, Mn { m: 6, n: 57 }]),
        (22, [Mn { m: -4, n: 73 }, Mn { m: -3, n: 70 }, Mn { m: -17, n: 73 }]),
        (23, [Mn { m: 17, n: 50 }, Mn { m: 10, n: 54 }, Mn { m: 14, n: 57 }]),
        (24, [Mn { m: 18, n: 64 }, Mn { m: 26, n: 34 }, Mn { m: 20, n: 40 }]),
        (25, [Mn { m: 9, n: 43 }, Mn { m: 19, n: 22 }, Mn { m: 20, n: 10 }]),
        (26, [Mn { m: 29, n: 0 }, Mn { m: 40, n: 0 }, Mn { m: 29, n: 0 }]),
        (27, [Mn { m: 26, n: 67 }, Mn { m: 57, n: 2 }, Mn { m: 54, n: 0 }]),
        (28, [Mn { m: 16, n: 90 }, Mn { m: 41, n: 36 }, Mn { m: 37, n: 42 }]),
        (29, [Mn { m: 9, n: 104 }, Mn { m: 26, n: 59 }, Mn { m: 12, n: 97 }]),
        (30, [Mn { m: -4, n: 127 }, Mn { m: -4, n: 127 }, Mn { m: -3, n: 127 }]),
        (31, [Mn { m: -2, n: 104 }, Mn { m: -1, n: 101 }, Mn { m: -2, n: 117 }]),
        (32, [Mn { m: 1, n: 67 }, Mn { m: -4, n: 76 }, Mn { m: -2, n: 74 }]),
        (33, [Mn { m: -1, n: 78 }, Mn { m: -6, n: 71 }, Mn { m: -4, n: 85 }]),
        (34, [Mn { m: -1, n: 65 }, Mn { m: -1, n: 79 }, Mn { m: -2, n: 102 }]),
        (35, [Mn { m: 1, n: 62 }, Mn { m: 5, n: 52 }, Mn { m: 5, n: 57 }]),
        (36, [Mn { m: -6, n: 86 }, Mn { m: 6, n: 69 }, Mn { m: -6, n: 93 }]),
        (37, [Mn { m: -1, n: 95 }, Mn { m: -1, n: 90 }, Mn { m: -1, n: 88 }]),
        (38, [Mn { m: -6, n: 61 }, Mn { m: 0, n: 52 }, Mn { m: -6, n: 44 }]),
        (39, [Mn { m: 9, n: 45 }, Mn { m: 8, n: 43 }, Mn { m: 4, n: 55 }]),
    ];
    BY_IDC
        .iter()
        .find(|(idx, _)| *idx == ctx_idx)
        .map(|(_, arr)| arr[idc])
}

/// MN context-init values for ctxIdx 70..79 (coded_block_pattern, Table
/// 9-18), indexed by `cabac_init_idc` (0, 1, 2) or `None` for I/SI slices.
pub fn coded_block_pattern_mn(ctx_idx: usize, cabac_init_idc: Option<u8>) -> Option<Mn> {
    const TABLE: &[(usize, Mn, [Mn; 3])] = &[
        (70, Mn { m: 0, n: 11 }, [Mn { m: 0, n: 45 }, Mn { m: 13, n: 15 }, Mn { m: 7, n: 34 }]),
        (71, Mn { m: 1, n: 55 }, [Mn { m: -4, n: 78 }, Mn { m: 7, n: 51 }, Mn { m: -9, n: 88 }]),
        (72, Mn { m: 0, n: 69 }, [Mn { m: -3, n: 96 }, Mn { m: 2, n: 80 }, Mn { m: -20, n: 127 }]),
        (73, Mn { m: -17, n: 127 }, [Mn { m: -27, n: 126 }, Mn { m: -39, n: 127 }, Mn { m: -36, n: 127 }]),
        (74, Mn { m: -13, n: 102 }, [Mn { m: -28, n: 98 }, Mn { m: -18, n: 91 }, Mn { m: -17, n: 91 }]),
        (75, Mn { m: 0, n: 82 }, [Mn { m: -25, n: 101 }, Mn { m: -17, n: 96 }, Mn { m: -14, n: 95 }]),
        (76, Mn { m: -7, n: 24 }, [Mn { m: -23, n: 67 }, Mn { m: -26, n: 81 }, Mn { m: -25, n: 84 }]),
        (77, Mn { m: -21, n: 107 }, [Mn { m: -28, n: 82 }, Mn { m: -35, n: 98 }, Mn { m: -25, n: 86 }]),
        (78, Mn { m: -27, n: 127 }, [Mn { m: -20, n: 94 }, Mn { m: -24, n: 102 }, Mn { m: -12, n: 89 }]),
        (79, Mn { m: -31, n: 127 }, [Mn { m: -16, n: 83 }, Mn { m: -23, n: 97 }, Mn { m: -17, n: 91 }]),
    ];
    TABLE.iter().find(|(idx, _, _)| *idx == ctx_idx).map(|(_, no_idc, by_idc)| {
        match cabac_init_idc {
            None => *no_idc,
            Some(idc) => by_idc[idc as usize],
        }
    })
}

/// Table 9-45: state-transition table, (transIdxLPS, transIdxMPS) by
/// pStateIdx (0..=62; pStateIdx 63 transitions to itself on MPS and has no
/// LPS transition since it is the terminal state).
pub const TRANS_IDX: [(u8, u8); 64] = [
    (0, 1), (0, 2), (1, 3), (2, 4), (2, 5), (4, 6), (4, 7), (5, 8),
    (6, 9), (7, 10), (8, 11), (9, 12), (9, 13), (11, 14), (11, 15), (12, 16),
    (13, 17), (13, 18), (15, 19), (15, 20), (16, 21), (16, 22), (18, 23), (18, 24),
    (19, 25), (19, 26), (21, 27), (21, 28), (22, 29), (22, 30), (23, 31), (24, 32),
    (24, 33), (25, 34), (26, 35), (26, 36), (27, 37), (27, 38), (28, 39), (29, 40),
    (29, 41), (30, 42), (30, 43), (30, 44), (31, 45), (32, 46), (32, 47), (33, 48),
    (33, 49), (33, 50), (34, 51), (34, 52), (35, 53), (35, 54), (35, 55), (36, 56),
    (36, 57), (36, 58), (37, 59), (37, 60), (37, 61), (38, 62), (38, 62), (63, 63),
];

/// Table 9-44: `rangeTabLPS[pStateIdx][qCodIRangeIdx]`. pStateIdx 0..=63,
/// qCodIRangeIdx 0..=3.
pub const RANGE_TAB_LPS: [[u16; 4]; 64] = [
    [128, 176, 208, 240], [128, 167, 197, 227], [128, 158, 187, 216], [123, 150, 178, 205],
    [116, 142, 169, 195], [111, 135, 160, 185], [105, 128, 152, 175], [100, 122, 144, 166],
    [95, 116, 137, 158], [90, 110, 130, 150], [85, 104, 123, 142], [81, 99, 117, 135],
    [77, 94, 111, 128], [73, 89, 105, 122], [69, 85, 100, 116], [66, 80, 95, 110],
    [62, 76, 90, 104], [59, 72, 86, 99], [56, 69, 81, 94], [53, 65, 77, 89],
    [51, 62, 73, 85], [48, 59, 69, 80], [46, 56, 66, 76], [43, 53, 63, 72],
    [41, 50, 59, 69], [39, 48, 56, 65], [37, 45, 54, 62], [35, 43, 51, 59],
    [33, 41, 48, 56], [32, 39, 46, 53], [30, 37, 43, 50], [28, 35, 41, 48],
    [27, 33, 39, 45], [26, 31, 37, 43], [24, 30, 35, 41], [23, 28, 33, 39],
    [22, 27, 32, 37], [21, 26, 30, 35], [20, 24, 29, 33], [19, 23, 27, 31],
    [18, 22, 26, 30], [17, 21, 25, 28], [16, 20, 23, 27], [15, 19, 22, 25],
    [14, 18, 21, 24], [14, 17, 20, 23], [13, 16, 19, 22], [12, 15, 18, 21],
    [12, 14, 17, 20], [11, 14, 16, 19], [10, 13, 15, 18], [10, 12, 15, 17],
    [9, 12, 14, 16], [9, 11, 13, 15], [8, 10, 12, 14], [8, 9, 11, 14],
    [7, 9, 11, 13], [7, 9, 10, 12], [6, 8, 9, 11], [6, 7, 9, 11],
    [6, 7, 8, 10], [5, 7, 8, 9], [5, 6, 7, 9], [4, 5, 6, 7],
    [4, 5, 6, 7], [2, 2, 2, 2],
];
