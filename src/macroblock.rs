//! Macroblock-layer parser (state machine), clause 7.3.5 / spec.md §4.9-4.10.
//!
//! `MB_PARSE -> {SKIP, I_PCM, INTRA, INTER, SUB_MB, RESIDUAL} -> MB_NEXT`,
//! terminal `END_OF_SLICE`. [`parse_slice_data`] dispatches by
//! `entropy_coding_mode_flag`: CAVLC ([`parse_slice_data_cavlc`]) is fully
//! driven by `ue`/`se`/`te`/`me`. CABAC ([`parse_slice_data_cabac`]) drives
//! `mb_skip_flag`, `mb_type` (I-slice I_NxN/I_PCM and P/SP-slice prefix) and
//! `end_of_slice_flag` through [`crate::cabac::CabacEngine::decode_decision`]
//! using [`crate::tables::ctx_idx`]/[`crate::tables::mb_skip_flag_ctx_idx`];
//! B slices, MBAFF, I_16x16/P_8x8ref0 suffix decoding, and anything past
//! mb_type (prediction modes, residual) raise `UnsupportedFeature` rather
//! than guessing at undecoded bins — see DESIGN.md for the scope decision.

use std::collections::HashMap;

use crate::bitreader::BitReader;
use crate::cabac::{self, CabacContext, CabacEngine};
use crate::config::ParserConfig;
use crate::error::{AvcError, Result};
use crate::golomb::{self, CbpPredClass};
use crate::pps::Pps;
use crate::slice::{SliceHeader, SliceType};
use crate::sps::Sps;
use crate::tables::{self, MbPartPredMode};
use serde::{Deserialize, Serialize};

/// A single parsed macroblock, as far as spec.md §4.1's field list goes:
/// raw mb_type, resolved name, I_PCM samples, transform size, CBP, QP
/// delta, intra modes, and per-partition ref_idx/mvd/sub_mb_type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacroblockData {
    pub mb_addr: u32,
    pub mb_skip_flag: bool,
    pub mb_field_decoding_flag: bool,
    pub mb_type: u32,
    pub mb_type_name: String,
    pub is_pcm: bool,
    pub pcm_luma_samples: Vec<u32>,
    pub pcm_chroma_samples: Vec<u32>,
    pub transform_size_8x8_flag: bool,
    pub coded_block_pattern: u32,
    pub mb_qp_delta: i32,
    pub prev_intra_pred_mode_flag: Vec<bool>,
    pub rem_intra_pred_mode: Vec<u32>,
    pub intra_chroma_pred_mode: u32,
    pub sub_mb_type: Vec<u32>,
    pub ref_idx_l0: Vec<u32>,
    pub ref_idx_l1: Vec<u32>,
    pub mvd_l0: Vec<[i32; 2]>,
    pub mvd_l1: Vec<[i32; 2]>,
}

/// Per-slice decode context threaded through the macroblock loop.
pub struct SliceContext<'a> {
    pub sps: &'a Sps,
    pub pps: &'a Pps,
    pub header: &'a SliceHeader,
    pub mbaff_frame_flag: bool,
    pub pic_width_in_mbs: u32,
    pub mb_to_slice_group_map: &'a [u32],
    pub cabac_engine: Option<CabacEngine>,
    pub cabac_contexts: Vec<CabacContext>,
    pub config: &'a ParserConfig,
}

/// Dispatches to the CAVLC or CABAC slice-data driver by
/// `entropy_coding_mode_flag`.
pub fn parse_slice_data(reader: &mut BitReader, ctx: &mut SliceContext) -> Result<Vec<MacroblockData>> {
    if ctx.pps.entropy_coding_mode_flag {
        parse_slice_data_cabac(reader, ctx)
    } else {
        parse_slice_data_cavlc(reader, ctx)
    }
}

/// Drives the slice-data loop, returning every macroblock parsed before
/// `END_OF_SLICE`. CAVLC only; see the module docs for the CABAC boundary.
pub fn parse_slice_data_cavlc(reader: &mut BitReader, ctx: &mut SliceContext) -> Result<Vec<MacroblockData>> {
    if ctx.pps.entropy_coding_mode_flag {
        return Err(AvcError::UnsupportedFeature(
            "CABAC macroblock-type binarization (Table 9-36..9-38) is not implemented".to_string(),
        ));
    }

    let mut macroblocks = Vec::new();
    // step 1: curr_mb_addr = first_mb_in_slice * (1 + mbaff_frame_flag).
    //
    // The reference this module is grounded on instead computes
    // `first_mb_in_slice * (1 * mbaff_frame_flag)`, which collapses to 0
    // whenever mbaff_frame_flag is 0 (the overwhelmingly common case) and
    // silently discards first_mb_in_slice. That is flagged in DESIGN.md as
    // a bug, not reproduced: a slice whose first_mb_in_slice is nonzero
    // must resume parsing at that macroblock, not address 0.
    let mut curr_mb_addr = ctx.header.first_mb_in_slice * (1 + ctx.mbaff_frame_flag as u32);
    let mut prev_mb_skipped = false;

    loop {
        let slice_group = ctx
            .mb_to_slice_group_map
            .get(curr_mb_addr as usize)
            .copied();
        if slice_group.is_none() {
            break;
        }

        let mut mb = MacroblockData {
            mb_addr: curr_mb_addr,
            ..Default::default()
        };

        if !ctx.header.slice_type.is_intra() {
            let mb_skip_run = reader.read_ue()?;
            for _ in 0..mb_skip_run {
                macroblocks.push(MacroblockData {
                    mb_addr: curr_mb_addr,
                    mb_skip_flag: true,
                    mb_type_name: skip_type_name(ctx.header.slice_type).to_string(),
                    ..Default::default()
                });
                curr_mb_addr = crate::slice_group::next_mb_address(curr_mb_addr, ctx.mb_to_slice_group_map);
            }
            if !reader.more_rbsp_data() {
                break;
            }
            mb.mb_addr = curr_mb_addr;
        }

        if ctx.mbaff_frame_flag
            && (curr_mb_addr % 2 == 0 || (curr_mb_addr % 2 == 1 && prev_mb_skipped))
        {
            mb.mb_field_decoding_flag = reader.read_flag()?;
        }

        let mb_type = reader.read_ue()?;
        mb.mb_type = mb_type;
        let mb_type_name = resolve_mb_type_name(ctx.header.slice_type, mb_type)?;
        mb.mb_type_name = mb_type_name.to_string();

        if mb_type_name == "I_PCM" {
            mb.is_pcm = true;
            reader.byte_align();
            for _ in 0..256 {
                mb.pcm_luma_samples.push(reader.read_bits(ctx.sps.bit_depth_luma() as u8)?);
            }
            if ctx.sps.chroma_array_type() != 0 {
                let (sub_w, sub_h) = tables::chroma_subsampling(
                    ctx.sps.chroma_format_idc as u32,
                    ctx.sps.separate_colour_plane_flag,
                );
                let mb_width_c = 16 / sub_w;
                let mb_height_c = 16 / sub_h;
                for _ in 0..(2 * mb_width_c * mb_height_c) {
                    mb.pcm_chroma_samples
                        .push(reader.read_bits(ctx.sps.bit_depth_chroma() as u8)?);
                }
            }
            macroblocks.push(mb);
            prev_mb_skipped = false;
            curr_mb_addr = crate::slice_group::next_mb_address(curr_mb_addr, ctx.mb_to_slice_group_map);
            if !reader.more_rbsp_data() {
                break;
            }
            continue;
        }

        let pred_mode = tables::mb_part_pred_mode(
            ctx.header.slice_type.name(),
            mb_type_name,
            false, // transform_size_8x8_flag resolved after this point; see step 6
        );

        match pred_mode {
            Some(MbPartPredMode::Intra4x4) | Some(MbPartPredMode::Intra8x8) => {
                parse_intra_prediction(reader, ctx, &mut mb, pred_mode.unwrap())?;
            }
            Some(MbPartPredMode::Intra16x16) => {
                if ctx.sps.chroma_array_type() == 1 || ctx.sps.chroma_array_type() == 2 {
                    mb.intra_chroma_pred_mode = reader.read_ue()?;
                }
            }
            Some(MbPartPredMode::Direct) => {
                // RESIDUAL path only; no per-partition ref_idx/mvd to read.
            }
            Some(_) => {
                parse_inter_prediction(reader, ctx, &mut mb, mb_type_name)?;
            }
            None => {
                // P_8x8 / P_8x8ref0 / B_8x8: sub-macroblock prediction.
                parse_sub_mb_prediction(reader, ctx, &mut mb, mb_type_name)?;
            }
        }

        parse_residual_header(reader, ctx, &mut mb, mb_type_name)?;

        macroblocks.push(mb);
        prev_mb_skipped = false;

        let end_of_slice = !reader.more_rbsp_data();
        curr_mb_addr = crate::slice_group::next_mb_address(curr_mb_addr, ctx.mb_to_slice_group_map);
        if end_of_slice {
            break;
        }
    }

    Ok(macroblocks)
}

/// Drives CABAC slice data (clause 7.3.4, 9.3) for the subset this crate
/// covers: `mb_skip_flag` and `mb_type` for P/SP slices, `mb_type` for I
/// slices (I_NxN and I_PCM only), I_PCM raw-sample reading with the
/// required arithmetic-engine reinitialization (clause 9.3.1.2), and
/// `end_of_slice_flag`. B slices and MBAFF are out of scope; any mb_type
/// needing bins this crate hasn't assigned a verified ctxIdx to (I_16x16
/// suffix, P_8x8/P_8x8ref0 suffix, anything past mb_type) raises
/// `UnsupportedFeature` rather than guessing at undecoded bits.
fn parse_slice_data_cabac(reader: &mut BitReader, ctx: &mut SliceContext) -> Result<Vec<MacroblockData>> {
    if ctx.header.slice_type.is_b() {
        return Err(AvcError::UnsupportedFeature(
            "CABAC B-slice macroblock decoding is not implemented".to_string(),
        ));
    }
    if ctx.header.slice_type == SliceType::Si {
        return Err(AvcError::UnsupportedFeature(
            "CABAC SI-slice mb_type binarization is not implemented".to_string(),
        ));
    }
    if ctx.mbaff_frame_flag {
        return Err(AvcError::UnsupportedFeature(
            "CABAC MBAFF macroblock-pair decoding is not implemented".to_string(),
        ));
    }

    reader.byte_align();
    let mut engine = CabacEngine::init(reader)?;
    let cabac_init_idc = if ctx.header.slice_type.is_intra() {
        None
    } else {
        Some(ctx.header.cabac_init_idc)
    };
    let mut contexts = cabac::init_contexts(ctx.header.qp(ctx.pps), cabac_init_idc);

    let mb_type_offset = tables::binarization_ctx_idx_offset("mb_type", ctx.header.slice_type.name())
        .ok_or_else(|| {
            AvcError::UnsupportedFeature(format!(
                "CABAC mb_type binarization for {} slices is not implemented",
                ctx.header.slice_type.name()
            ))
        })?;

    let mut macroblocks = Vec::new();
    let mut curr_mb_addr = ctx.header.first_mb_in_slice;
    let mut skipped: HashMap<u32, bool> = HashMap::new();
    let mut is_nxn: HashMap<u32, bool> = HashMap::new();
    let is_intra_slice = ctx.header.slice_type.is_intra();

    loop {
        if ctx.mb_to_slice_group_map.get(curr_mb_addr as usize).is_none() {
            break;
        }

        let (left, above) = neighbor_mb_addrs(curr_mb_addr, ctx.pic_width_in_mbs, ctx.header.first_mb_in_slice);
        let mut mb = MacroblockData {
            mb_addr: curr_mb_addr,
            ..Default::default()
        };

        if !is_intra_slice {
            let skip_ctx_idx = tables::mb_skip_flag_ctx_idx(
                cond_term_flag_skip(left, &skipped),
                cond_term_flag_skip(above, &skipped),
            );
            let skip = engine.decode_decision(reader, &mut contexts[skip_ctx_idx])?;
            skipped.insert(curr_mb_addr, skip);
            mb.mb_skip_flag = skip;

            if skip {
                mb.mb_type = tables::MB_TYPE_INFERRED;
                mb.mb_type_name = skip_type_name(ctx.header.slice_type).to_string();
                macroblocks.push(mb);
                let end_of_slice = engine.decode_terminate(reader)?;
                curr_mb_addr = crate::slice_group::next_mb_address(curr_mb_addr, ctx.mb_to_slice_group_map);
                if end_of_slice {
                    break;
                }
                continue;
            }
        }

        let bin0_ctx_idx = if is_intra_slice {
            mb_type_offset as usize
                + cond_term_flag_mb_type_i(left, &is_nxn) as usize
                + cond_term_flag_mb_type_i(above, &is_nxn) as usize
        } else {
            mb_type_offset as usize
        };

        let (mb_type, mb_type_name) =
            decode_mb_type_cabac(reader, &mut engine, &mut contexts, ctx.header.slice_type, bin0_ctx_idx)?;
        mb.mb_type = mb_type;
        mb.mb_type_name = mb_type_name.to_string();
        is_nxn.insert(curr_mb_addr, mb_type_name == "I_NxN");

        if mb_type_name == "I_PCM" {
            mb.is_pcm = true;
            // clause 9.3.1.2: raw PCM bytes are read byte-aligned, outside
            // the arithmetic engine, which is then reinitialized afterward.
            reader.byte_align();
            for _ in 0..256 {
                mb.pcm_luma_samples.push(reader.read_bits(ctx.sps.bit_depth_luma() as u8)?);
            }
            if ctx.sps.chroma_array_type() != 0 {
                let (sub_w, sub_h) = tables::chroma_subsampling(
                    ctx.sps.chroma_format_idc as u32,
                    ctx.sps.separate_colour_plane_flag,
                );
                let mb_width_c = 16 / sub_w;
                let mb_height_c = 16 / sub_h;
                for _ in 0..(2 * mb_width_c * mb_height_c) {
                    mb.pcm_chroma_samples
                        .push(reader.read_bits(ctx.sps.bit_depth_chroma() as u8)?);
                }
            }
            engine = CabacEngine::init(reader)?;
            macroblocks.push(mb);
            let end_of_slice = engine.decode_terminate(reader)?;
            curr_mb_addr = crate::slice_group::next_mb_address(curr_mb_addr, ctx.mb_to_slice_group_map);
            if end_of_slice {
                break;
            }
            continue;
        }

        return Err(AvcError::UnsupportedFeature(format!(
            "CABAC decoding past mb_type {mb_type_name} is not implemented"
        )));
    }

    ctx.cabac_engine = Some(engine);
    ctx.cabac_contexts = contexts;
    Ok(macroblocks)
}

/// Decodes `mb_type`'s first bins through the arithmetic engine: for I
/// slices, bin 0 (I_NxN vs not) then a terminate bin (I_PCM vs the I_16x16
/// suffix this crate doesn't decode); for P/SP slices, the 1-3 bit prefix
/// selecting among P_L0_16x16, P_L0_L0_16x8, P_L0_L0_8x16, P_8x8.
/// `bin0_ctx_idx` is the already-resolved ctxIdx for bin 0 (neighbor-derived
/// for I slices, fixed for P/SP).
fn decode_mb_type_cabac(
    reader: &mut BitReader,
    engine: &mut CabacEngine,
    contexts: &mut [CabacContext],
    slice_type: SliceType,
    bin0_ctx_idx: usize,
) -> Result<(u32, &'static str)> {
    if slice_type.is_intra() {
        let not_i_nxn = engine.decode_decision(reader, &mut contexts[bin0_ctx_idx])?;
        let mb_type = if !not_i_nxn {
            0
        } else if engine.decode_terminate(reader)? {
            25
        } else {
            return Err(AvcError::UnsupportedFeature(
                "CABAC I_16x16 mb_type suffix decoding is not implemented".to_string(),
            ));
        };
        let name = resolve_mb_type_name(slice_type, mb_type)?;
        return Ok((mb_type, name));
    }

    let bin0 = engine.decode_decision(reader, &mut contexts[bin0_ctx_idx])?;
    let mb_type = if bin0 {
        3
    } else {
        let bin1 = engine.decode_decision(reader, &mut contexts[bin0_ctx_idx + 1])?;
        let bin2 = engine.decode_decision(reader, &mut contexts[bin0_ctx_idx + 2])?;
        match (bin1, bin2) {
            (false, false) => 0,
            (true, true) => 1,
            (true, false) => 2,
            (false, true) => {
                return Err(AvcError::InvalidCode(
                    "CABAC P/SP mb_type prefix decoded an undefined bin pattern".to_string(),
                ))
            }
        }
    };
    let name = resolve_mb_type_name(slice_type, mb_type)?;
    Ok((mb_type, name))
}

/// Left/above neighbor macroblock addresses within the same slice,
/// available only when they fall on or after `first_mb_in_slice`. MBAFF is
/// out of scope for the CABAC driver, so pair addressing is not considered.
fn neighbor_mb_addrs(curr_mb_addr: u32, pic_width_in_mbs: u32, first_mb_in_slice: u32) -> (Option<u32>, Option<u32>) {
    let left = if curr_mb_addr % pic_width_in_mbs != 0 {
        let addr = curr_mb_addr - 1;
        (addr >= first_mb_in_slice).then_some(addr)
    } else {
        None
    };
    let above = if curr_mb_addr >= pic_width_in_mbs {
        let addr = curr_mb_addr - pic_width_in_mbs;
        (addr >= first_mb_in_slice).then_some(addr)
    } else {
        None
    };
    (left, above)
}

/// Clause 9.3.3.1.1.1: `mb_skip_flag` condTermFlag for one neighbor — 0 if
/// it is unavailable or itself skipped, 1 otherwise.
fn cond_term_flag_skip(neighbor: Option<u32>, skipped: &HashMap<u32, bool>) -> bool {
    match neighbor {
        None => false,
        Some(addr) => !skipped.get(&addr).copied().unwrap_or(true),
    }
}

/// Clause 9.3.3.1.1.3: I-slice `mb_type` bin 0 condTermFlag for one
/// neighbor — 0 if it is unavailable or itself I_NxN, 1 otherwise.
fn cond_term_flag_mb_type_i(neighbor: Option<u32>, is_nxn: &HashMap<u32, bool>) -> bool {
    match neighbor {
        None => false,
        Some(addr) => !is_nxn.get(&addr).copied().unwrap_or(true),
    }
}

fn skip_type_name(slice_type: SliceType) -> &'static str {
    if slice_type.is_b() {
        "B_Skip"
    } else {
        "P_Skip"
    }
}

fn resolve_mb_type_name(slice_type: SliceType, mb_type: u32) -> Result<&'static str> {
    let name = match slice_type {
        SliceType::I => tables::i_slice_mb_type_name(mb_type),
        SliceType::Si => tables::si_slice_mb_type_name(mb_type),
        SliceType::P | SliceType::Sp => tables::p_slice_mb_type_name(mb_type),
        SliceType::B => tables::b_slice_mb_type_name(mb_type),
    };
    name.ok_or_else(|| AvcError::InvalidCode(format!("mb_type {mb_type} out of range for slice type")))
}

/// Step 7: intra 4x4/8x8 prediction modes.
fn parse_intra_prediction(
    reader: &mut BitReader,
    ctx: &SliceContext,
    mb: &mut MacroblockData,
    mode: MbPartPredMode,
) -> Result<()> {
    let num_blocks = if mode == MbPartPredMode::Intra8x8 { 4 } else { 16 };
    for _ in 0..num_blocks {
        let flag = reader.read_flag()?;
        mb.prev_intra_pred_mode_flag.push(flag);
        if !flag {
            mb.rem_intra_pred_mode.push(reader.read_bits(3)?);
        }
    }
    if ctx.sps.chroma_array_type() == 1 || ctx.sps.chroma_array_type() == 2 {
        mb.intra_chroma_pred_mode = reader.read_ue()?;
    }
    Ok(())
}

/// Step 8: INTER (non-Direct, non-sub-partitioned) ref_idx/mvd.
fn parse_inter_prediction(
    reader: &mut BitReader,
    ctx: &SliceContext,
    mb: &mut MacroblockData,
    mb_type_name: &str,
) -> Result<()> {
    let num_parts = tables::num_mb_part(mb_type_name).unwrap_or(1);
    let pred_mode = tables::mb_part_pred_mode(ctx.header.slice_type.name(), mb_type_name, false);

    let l0_range_max = if ctx.header.num_ref_idx_l0_active_minus1 > 0 || ctx.mbaff_frame_flag {
        ctx.header.num_ref_idx_l0_active_minus1 + 1
    } else {
        1
    };
    let l1_range_max = if ctx.header.num_ref_idx_l1_active_minus1 > 0 || ctx.mbaff_frame_flag {
        ctx.header.num_ref_idx_l1_active_minus1 + 1
    } else {
        1
    };

    if !matches!(pred_mode, Some(MbPartPredMode::PredL1)) {
        for _ in 0..num_parts {
            mb.ref_idx_l0.push(golomb::te(reader, l0_range_max)?);
        }
    }
    if matches!(pred_mode, Some(MbPartPredMode::PredL1) | Some(MbPartPredMode::BiPred)) {
        for _ in 0..num_parts {
            mb.ref_idx_l1.push(golomb::te(reader, l1_range_max)?);
        }
    }
    if !matches!(pred_mode, Some(MbPartPredMode::PredL1)) {
        for _ in 0..num_parts {
            mb.mvd_l0.push([reader.read_se()?, reader.read_se()?]);
        }
    }
    if matches!(pred_mode, Some(MbPartPredMode::PredL1) | Some(MbPartPredMode::BiPred)) {
        for _ in 0..num_parts {
            mb.mvd_l1.push([reader.read_se()?, reader.read_se()?]);
        }
    }
    Ok(())
}

/// §4.10: five sequential passes over the 4 sub-macroblock partitions.
fn parse_sub_mb_prediction(
    reader: &mut BitReader,
    ctx: &SliceContext,
    mb: &mut MacroblockData,
    mb_type_name: &str,
) -> Result<()> {
    let is_b = ctx.header.slice_type.is_b();

    // Pass 1: sub_mb_type for each of the 4 partitions.
    for _ in 0..4 {
        mb.sub_mb_type.push(reader.read_ue()?);
    }

    let sub_modes: Vec<(&str, u32, (u32, u32))> = mb
        .sub_mb_type
        .iter()
        .map(|&t| {
            if is_b {
                tables::b_sub_mb_type(t)
            } else {
                tables::p_sub_mb_type(t)
            }
            .unwrap_or(("", 1, (8, 8)))
        })
        .collect();

    let l0_range_max = if ctx.header.num_ref_idx_l0_active_minus1 > 0 || ctx.mbaff_frame_flag {
        ctx.header.num_ref_idx_l0_active_minus1 + 1
    } else {
        1
    };
    let l1_range_max = if ctx.header.num_ref_idx_l1_active_minus1 > 0 || ctx.mbaff_frame_flag {
        ctx.header.num_ref_idx_l1_active_minus1 + 1
    } else {
        1
    };

    // Pass 2: ref_idx_l0.
    for (name, _, _) in &sub_modes {
        let is_l1_only = name.starts_with("B_L1");
        let is_direct = *name == "B_Direct_8x8";
        if !is_l1_only && !is_direct && mb_type_name != "P_8x8ref0" {
            mb.ref_idx_l0.push(golomb::te(reader, l0_range_max)?);
        }
    }
    // Pass 3: ref_idx_l1.
    for (name, _, _) in &sub_modes {
        let is_l0_only = name.starts_with("P_L0") || name.starts_with("B_L0");
        let is_direct = *name == "B_Direct_8x8";
        if !is_l0_only && !is_direct {
            mb.ref_idx_l1.push(golomb::te(reader, l1_range_max)?);
        }
    }
    // Pass 4: mvd_l0, one pair per sub-partition.
    for (name, num_sub_parts, _) in &sub_modes {
        let is_l1_only = name.starts_with("B_L1");
        let is_direct = *name == "B_Direct_8x8";
        if !is_l1_only && !is_direct {
            for _ in 0..*num_sub_parts {
                mb.mvd_l0.push([reader.read_se()?, reader.read_se()?]);
            }
        }
    }
    // Pass 5: mvd_l1.
    for (name, num_sub_parts, _) in &sub_modes {
        let is_l0_only = name.starts_with("P_L0") || name.starts_with("B_L0");
        let is_direct = *name == "B_Direct_8x8";
        if !is_l0_only && !is_direct {
            for _ in 0..*num_sub_parts {
                mb.mvd_l1.push([reader.read_se()?, reader.read_se()?]);
            }
        }
    }

    Ok(())
}

/// Step 10: RESIDUAL — coded_block_pattern, transform_size_8x8_flag, mb_qp_delta.
fn parse_residual_header(
    reader: &mut BitReader,
    ctx: &SliceContext,
    mb: &mut MacroblockData,
    mb_type_name: &str,
) -> Result<()> {
    let pred_mode = tables::mb_part_pred_mode(ctx.header.slice_type.name(), mb_type_name, false);
    let is_intra_16x16 = matches!(pred_mode, Some(MbPartPredMode::Intra16x16));

    let mut has_residual = is_intra_16x16;
    if !is_intra_16x16 {
        let pred_class = if mb_type_name == "I_NxN" {
            CbpPredClass::Intra
        } else {
            CbpPredClass::Inter
        };
        let cbp = golomb::me(reader, ctx.sps.chroma_array_type(), pred_class)?;
        mb.coded_block_pattern = cbp;
        has_residual = cbp > 0;

        let cbp_luma = cbp & 0xF;
        let no_sub_mb_part_size_less_than_8x8 = mb.sub_mb_type.iter().all(|&t| {
            if ctx.header.slice_type.is_b() {
                tables::b_sub_mb_type(t).map(|(_, n, _)| n == 1).unwrap_or(true)
            } else {
                tables::p_sub_mb_type(t).map(|(_, n, _)| n == 1).unwrap_or(true)
            }
        });
        let direct_ok = mb_type_name != "B_Direct_16x16" || ctx.sps.direct_8x8_inference_flag;

        if cbp_luma > 0
            && ctx.pps.transform_8x8_mode_flag
            && mb_type_name != "I_NxN"
            && no_sub_mb_part_size_less_than_8x8
            && direct_ok
        {
            mb.transform_size_8x8_flag = reader.read_flag()?;
        }
    }

    if has_residual || is_intra_16x16 {
        mb.mb_qp_delta = reader.read_se()?;
    }

    Ok(())
}
