//! H.264/AVC Picture Parameter Set (PPS) parsing.

use crate::bitreader::BitReader;
use crate::config::ParserConfig;
use crate::error::{AvcError, Result};
use crate::sps::{decode_scaling_list, ScalingList};
use serde::{Deserialize, Serialize};

/// Per-`slice_group_map_type` parameters (clause 7.3.2.2, Table 7-9/7-10).
/// Types 3, 4 and 5 ("box-out", "raster scan" and "wipe" change patterns)
/// are parsed (so the PPS bitstream stays in sync) but the resulting map is
/// not computed; `slice_group::map_unit_to_slice_group_map` reports
/// `UnsupportedFeature` for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SliceGroupMapParams {
    /// map_type 0, interleaved: run_length_minus1[i] per slice group.
    Interleaved { run_length_minus1: Vec<u32> },
    /// map_type 1, dispersed: no extra parameters.
    Dispersed,
    /// map_type 2, foreground + leftover: (top_left, bottom_right) per group,
    /// excluding the last (leftover) group.
    ForegroundLeftover { top_left: Vec<u32>, bottom_right: Vec<u32> },
    /// map_type 3/4/5, evolving box-out / raster / wipe. Parsed but not
    /// evaluated.
    Evolving {
        change_direction_flag: bool,
        change_rate_minus1: u32,
    },
    /// map_type 6, explicit: one slice_group_id per map unit.
    Explicit { slice_group_id: Vec<u32> },
}

/// Picture Parameter Set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pps {
    /// pic_parameter_set_id
    pub pic_parameter_set_id: u8,
    /// seq_parameter_set_id
    pub seq_parameter_set_id: u8,
    /// entropy_coding_mode_flag (0=CAVLC, 1=CABAC)
    pub entropy_coding_mode_flag: bool,
    /// bottom_field_pic_order_in_frame_present_flag
    pub bottom_field_pic_order_in_frame_present_flag: bool,
    /// num_slice_groups_minus1
    pub num_slice_groups_minus1: u32,
    /// slice_group_map_type
    pub slice_group_map_type: u32,
    /// Resolved parameters for `slice_group_map_type`, present only when
    /// `num_slice_groups_minus1 > 0`.
    pub slice_group_map_params: Option<SliceGroupMapParams>,
    /// num_ref_idx_l0_default_active_minus1
    pub num_ref_idx_l0_default_active_minus1: u32,
    /// num_ref_idx_l1_default_active_minus1
    pub num_ref_idx_l1_default_active_minus1: u32,
    /// weighted_pred_flag
    pub weighted_pred_flag: bool,
    /// weighted_bipred_idc
    pub weighted_bipred_idc: u8,
    /// pic_init_qp_minus26
    pub pic_init_qp_minus26: i32,
    /// pic_init_qs_minus26
    pub pic_init_qs_minus26: i32,
    /// chroma_qp_index_offset
    pub chroma_qp_index_offset: i32,
    /// deblocking_filter_control_present_flag
    pub deblocking_filter_control_present_flag: bool,
    /// constrained_intra_pred_flag
    pub constrained_intra_pred_flag: bool,
    /// redundant_pic_cnt_present_flag
    pub redundant_pic_cnt_present_flag: bool,
    /// transform_8x8_mode_flag (high profile)
    pub transform_8x8_mode_flag: bool,
    /// pic_scaling_matrix_present_flag
    pub pic_scaling_matrix_present_flag: bool,
    /// Resolved 4x4/8x8 scaling lists, mirroring `Sps::scaling_lists_4x4/8x8`.
    pub scaling_lists_4x4: Vec<Option<ScalingList>>,
    pub scaling_lists_8x8: Vec<Option<ScalingList>>,
    /// second_chroma_qp_index_offset
    pub second_chroma_qp_index_offset: i32,
}

impl Pps {
    /// Check if CABAC is used.
    pub fn is_cabac(&self) -> bool {
        self.entropy_coding_mode_flag
    }

    /// Get initial QP.
    pub fn initial_qp(&self) -> i32 {
        26 + self.pic_init_qp_minus26
    }

    /// Number of slice groups (`num_slice_groups_minus1 + 1`).
    pub fn num_slice_groups(&self) -> u32 {
        self.num_slice_groups_minus1 + 1
    }
}

/// Parse PPS from NAL unit payload using default defensive bounds.
pub fn parse_pps(data: &[u8]) -> Result<Pps> {
    parse_pps_with_config(data, &ParserConfig::default())
}

/// Parse PPS from NAL unit payload, applying `config`'s defensive bounds
/// instead of the hardcoded defaults.
pub fn parse_pps_with_config(data: &[u8], config: &ParserConfig) -> Result<Pps> {
    let mut reader = BitReader::new(data);

    let pic_parameter_set_id = reader.read_ue()? as u8;
    let seq_parameter_set_id = reader.read_ue()? as u8;
    let entropy_coding_mode_flag = reader.read_flag()?;
    let bottom_field_pic_order_in_frame_present_flag = reader.read_flag()?;

    let num_slice_groups_minus1 = reader.read_ue()?;
    let mut slice_group_map_type = 0;
    let mut slice_group_map_params = None;

    if num_slice_groups_minus1 > 0 {
        slice_group_map_type = reader.read_ue()?;

        slice_group_map_params = Some(match slice_group_map_type {
            0 => {
                // SECURITY: pre-size before indexed writes (the PPS's own
                // run_length_minus1 vector is sized here; nothing is written
                // by index before the vector has room for it).
                let mut run_length_minus1 = Vec::with_capacity(num_slice_groups_minus1 as usize + 1);
                for _ in 0..=num_slice_groups_minus1 {
                    run_length_minus1.push(reader.read_ue()?);
                }
                SliceGroupMapParams::Interleaved { run_length_minus1 }
            }
            1 => SliceGroupMapParams::Dispersed,
            2 => {
                let mut top_left = Vec::with_capacity(num_slice_groups_minus1 as usize);
                let mut bottom_right = Vec::with_capacity(num_slice_groups_minus1 as usize);
                for _ in 0..num_slice_groups_minus1 {
                    top_left.push(reader.read_ue()?);
                    bottom_right.push(reader.read_ue()?);
                }
                SliceGroupMapParams::ForegroundLeftover {
                    top_left,
                    bottom_right,
                }
            }
            3 | 4 | 5 => SliceGroupMapParams::Evolving {
                change_direction_flag: reader.read_flag()?,
                change_rate_minus1: reader.read_ue()?,
            },
            6 => {
                // SECURITY: bound pic_size_in_map_units_minus1 before it sizes
                // the slice_group_id vector below.
                let pic_size_in_map_units_minus1 = reader.read_ue()?;
                if pic_size_in_map_units_minus1 >= config.max_pic_dimension_in_mbs {
                    return Err(AvcError::InvalidPps(format!(
                        "pic_size_in_map_units_minus1 {} exceeds maximum {}",
                        pic_size_in_map_units_minus1, config.max_pic_dimension_in_mbs
                    )));
                }
                let bits = (32 - (num_slice_groups_minus1).leading_zeros()).max(1) as u8;
                let mut slice_group_id =
                    Vec::with_capacity(pic_size_in_map_units_minus1 as usize + 1);
                for _ in 0..=pic_size_in_map_units_minus1 {
                    slice_group_id.push(reader.read_bits(bits)?);
                }
                SliceGroupMapParams::Explicit { slice_group_id }
            }
            other => {
                return Err(AvcError::InvalidPps(format!(
                    "slice_group_map_type {other} out of range 0..=6"
                )))
            }
        });
    }

    let num_ref_idx_l0_default_active_minus1 = reader.read_ue()?;
    let num_ref_idx_l1_default_active_minus1 = reader.read_ue()?;
    let weighted_pred_flag = reader.read_flag()?;
    let weighted_bipred_idc = reader.read_bits(2)? as u8;
    let pic_init_qp_minus26 = reader.read_se()?;
    let pic_init_qs_minus26 = reader.read_se()?;
    let chroma_qp_index_offset = reader.read_se()?;
    let deblocking_filter_control_present_flag = reader.read_flag()?;
    let constrained_intra_pred_flag = reader.read_flag()?;
    let redundant_pic_cnt_present_flag = reader.read_flag()?;

    // Extended syntax for high profiles
    let mut transform_8x8_mode_flag = false;
    let mut pic_scaling_matrix_present_flag = false;
    let mut second_chroma_qp_index_offset = chroma_qp_index_offset;
    let mut scaling_lists_4x4 = Vec::new();
    let mut scaling_lists_8x8 = Vec::new();

    if reader.more_rbsp_data() {
        transform_8x8_mode_flag = reader.read_flag()?;
        pic_scaling_matrix_present_flag = reader.read_flag()?;

        if pic_scaling_matrix_present_flag {
            // clause 7.3.2.2: num lists depends on seq_scaling_matrix_present_flag
            // too, but the PPS alone does not carry that bit; callers that need
            // the exact Table 7-9 bound can recompute it from the active SPS.
            // Here we rely on more_rbsp_data() to stop when the bitstream runs out.
            let num_4x4 = 6;
            let num_8x8 = if transform_8x8_mode_flag { 2 } else { 0 };
            for i in 0..num_4x4 {
                if reader.read_flag()? {
                    scaling_lists_4x4.push(Some(decode_scaling_list(&mut reader, 16, i, true)?));
                } else {
                    scaling_lists_4x4.push(None);
                }
            }
            for i in 0..num_8x8 {
                if reader.read_flag()? {
                    scaling_lists_8x8.push(Some(decode_scaling_list(&mut reader, 64, i, false)?));
                } else {
                    scaling_lists_8x8.push(None);
                }
            }
        }

        second_chroma_qp_index_offset = reader.read_se()?;
    }

    Ok(Pps {
        pic_parameter_set_id,
        seq_parameter_set_id,
        entropy_coding_mode_flag,
        bottom_field_pic_order_in_frame_present_flag,
        num_slice_groups_minus1,
        slice_group_map_type,
        slice_group_map_params,
        num_ref_idx_l0_default_active_minus1,
        num_ref_idx_l1_default_active_minus1,
        weighted_pred_flag,
        weighted_bipred_idc,
        pic_init_qp_minus26,
        pic_init_qs_minus26,
        chroma_qp_index_offset,
        deblocking_filter_control_present_flag,
        constrained_intra_pred_flag,
        redundant_pic_cnt_present_flag,
        transform_8x8_mode_flag,
        pic_scaling_matrix_present_flag,
        scaling_lists_4x4,
        scaling_lists_8x8,
        second_chroma_qp_index_offset,
    })
}
