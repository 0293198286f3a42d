//! Slice-group map derivation (FMO), clause 8.2.2.
//!
//! `map_unit_to_slice_group_map` builds the per-map-unit slice group
//! assignment; `mb_to_slice_group_map` spreads that over macroblocks for
//! field/MBAFF pictures; `next_mb_address` walks forward to the next
//! macroblock belonging to the current macroblock's slice group.

use crate::error::{AvcError, Result};
use crate::pps::{Pps, SliceGroupMapParams};

/// Builds `MapUnitToSliceGroupMap` for map types 0 (interleaved), 1
/// (dispersed), 2 (foreground + leftover) and 6 (explicit). Types 3, 4, 5
/// are out of scope and return `UnsupportedFeature`.
pub fn map_unit_to_slice_group_map(
    pps: &Pps,
    pic_width_in_mbs: u32,
    pic_height_in_map_units: u32,
) -> Result<Vec<u32>> {
    let pic_size_in_map_units = (pic_width_in_mbs * pic_height_in_map_units) as usize;

    if pps.num_slice_groups() == 1 {
        return Ok(vec![0; pic_size_in_map_units]);
    }

    let params = pps.slice_group_map_params.as_ref().ok_or_else(|| {
        AvcError::InconsistentState("PPS declares >1 slice group with no map params".to_string())
    })?;

    match (pps.slice_group_map_type, params) {
        (0, SliceGroupMapParams::Interleaved { run_length_minus1 }) => {
            let mut map = vec![0u32; pic_size_in_map_units];
            let mut i = 0usize;
            while i < pic_size_in_map_units {
                for (group, &rl_minus1) in run_length_minus1.iter().enumerate() {
                    let run = rl_minus1 as usize + 1;
                    for _ in 0..run {
                        if i >= pic_size_in_map_units {
                            break;
                        }
                        map[i] = group as u32;
                        i += 1;
                    }
                }
            }
            Ok(map)
        }
        (1, SliceGroupMapParams::Dispersed) => {
            let num_groups = pps.num_slice_groups();
            let mut map = vec![0u32; pic_size_in_map_units];
            for (i, slot) in map.iter_mut().enumerate() {
                let i = i as u32;
                let w = pic_width_in_mbs;
                *slot = ((i % w) + (((i / w) * num_groups) / 2)) % num_groups;
            }
            Ok(map)
        }
        (2, SliceGroupMapParams::ForegroundLeftover { top_left, bottom_right }) => {
            let num_groups = pps.num_slice_groups();
            // Leftover group (the last one) fills everything first.
            let mut map = vec![num_groups - 1; pic_size_in_map_units];
            for group in (0..top_left.len()).rev() {
                let tl = top_left[group];
                let br = bottom_right[group];
                let y_top = tl / pic_width_in_mbs;
                let x_left = tl % pic_width_in_mbs;
                let y_bottom = br / pic_width_in_mbs;
                let x_right = br % pic_width_in_mbs;
                for y in y_top..=y_bottom {
                    for x in x_left..=x_right {
                        let idx = (y * pic_width_in_mbs + x) as usize;
                        if idx < map.len() {
                            map[idx] = group as u32;
                        }
                    }
                }
            }
            Ok(map)
        }
        (3 | 4 | 5, _) => Err(AvcError::UnsupportedFeature(format!(
            "slice_group_map_type {} (evolving box-out/raster/wipe) is not implemented",
            pps.slice_group_map_type
        ))),
        (6, SliceGroupMapParams::Explicit { slice_group_id }) => Ok(slice_group_id.clone()),
        (other, _) => Err(AvcError::InconsistentState(format!(
            "slice_group_map_type {other} does not match its stored parameters"
        ))),
    }
}

/// Spreads `MapUnitToSliceGroupMap` over macroblock addresses (clause
/// 8.2.2.8). For progressive, non-MBAFF pictures this is the identity;
/// field and MBAFF pictures interleave rows/pairs per the standard's
/// closed-form mapping.
pub fn mb_to_slice_group_map(
    map_unit_to_slice_group_map: &[u32],
    pic_width_in_mbs: u32,
    pic_height_in_map_units: u32,
    frame_mbs_only_flag: bool,
    field_pic_flag: bool,
    mb_adaptive_frame_field_flag: bool,
) -> Vec<u32> {
    if frame_mbs_only_flag || field_pic_flag {
        return map_unit_to_slice_group_map.to_vec();
    }

    let pic_size_in_mbs = (pic_width_in_mbs * pic_height_in_map_units * 2) as usize;
    let mut mb_map = vec![0u32; pic_size_in_mbs];

    if mb_adaptive_frame_field_flag {
        for (i, slot) in mb_map.iter_mut().enumerate() {
            *slot = map_unit_to_slice_group_map[i / 2];
        }
    } else {
        for (i, slot) in mb_map.iter_mut().enumerate() {
            let i = i as u32;
            let w = pic_width_in_mbs;
            let map_unit = (i / (2 * w)) * w + (i % w);
            *slot = map_unit_to_slice_group_map[map_unit as usize];
        }
    }
    mb_map
}

/// Walks forward from `n` to the next macroblock address in the same slice
/// group as `n` (clause 7.4.3, `NextMbAddress`). Returns `pic_size_in_mbs`
/// when no further macroblock shares the group (the caller treats that as
/// "end of slice data").
///
/// The reference decoder this module is grounded on guards the loop with
/// `mb_to_slice_group_map[i] != mb_to_slice_group_map[i]`, which is always
/// false and therefore never advances `i` past `n + 1` — effectively
/// disabling FMO skip-ahead. That is a bug, not a deliberate simplification
/// (the standard's condition compares against `mb_to_slice_group_map[n]`,
/// the current macroblock's group, not itself), so it is not reproduced
/// here; see DESIGN.md for the disposition.
pub fn next_mb_address(n: u32, mb_to_slice_group_map: &[u32]) -> u32 {
    let pic_size_in_mbs = mb_to_slice_group_map.len() as u32;
    let group = mb_to_slice_group_map[n as usize];
    let mut i = n + 1;
    while i < pic_size_in_mbs && mb_to_slice_group_map[i as usize] != group {
        i += 1;
    }
    i
}
