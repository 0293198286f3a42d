//! Picture Order Count computation, clause 8.2.1, types 0/1/2.
//!
//! `PocState` threads the per-type running values (`prevPicOrderCntMsb/Lsb`,
//! `prevFrameNum`, `prevFrameNumOffset`) across calls the way a decoder's
//! picture loop does; callers reset it at each IDR.

use crate::slice::SliceHeader;
use crate::sps::Sps;
use serde::{Deserialize, Serialize};

/// Top/bottom field order counts for one picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicOrderCnt {
    pub top: i32,
    pub bottom: i32,
}

/// Running POC state carried across pictures in a coded video sequence.
#[derive(Debug, Clone, Default)]
pub struct PocState {
    prev_pic_order_cnt_msb: i32,
    prev_pic_order_cnt_lsb: i32,
    prev_frame_num: u32,
    prev_frame_num_offset: i32,
}

impl PocState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset running state at an IDR picture, per clause 8.2.1 (prevPicOrderCntMsb/Lsb
    /// and prevFrameNumOffset are implicitly 0 for the picture after an IDR).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Computes (TopFieldOrderCnt, BottomFieldOrderCnt) for the current
    /// slice and advances the running state for the next call.
    pub fn compute(&mut self, sps: &Sps, header: &SliceHeader, is_idr: bool, nal_ref_idc: u8) -> PicOrderCnt {
        let poc = match sps.pic_order_cnt_type {
            0 => self.compute_type0(sps, header, is_idr, nal_ref_idc),
            1 => self.compute_type1(sps, header, is_idr, nal_ref_idc),
            _ => self.compute_type2(header, is_idr, nal_ref_idc),
        };
        self.prev_frame_num = header.frame_num;
        poc
    }

    fn compute_type0(&mut self, sps: &Sps, header: &SliceHeader, is_idr: bool, nal_ref_idc: u8) -> PicOrderCnt {
        let max_poc_lsb = 1i32 << (sps.log2_max_pic_order_cnt_lsb_minus4 + 4);

        let (prev_msb, prev_lsb) = if is_idr {
            (0, 0)
        } else {
            (self.prev_pic_order_cnt_msb, self.prev_pic_order_cnt_lsb)
        };

        let lsb = header.pic_order_cnt_lsb as i32;
        let msb = if lsb < prev_lsb && (prev_lsb - lsb) >= max_poc_lsb / 2 {
            prev_msb + max_poc_lsb
        } else if lsb > prev_lsb && (lsb - prev_lsb) > max_poc_lsb / 2 {
            prev_msb - max_poc_lsb
        } else {
            prev_msb
        };

        let top = if !header.field_pic_flag || !header.bottom_field_flag {
            Some(msb + lsb)
        } else {
            None
        };
        let bottom = if !header.field_pic_flag {
            top.unwrap() + header.delta_pic_order_cnt_bottom
        } else if header.bottom_field_flag {
            msb + lsb
        } else {
            top.unwrap()
        };

        if nal_ref_idc != 0 {
            self.prev_pic_order_cnt_msb = msb;
            self.prev_pic_order_cnt_lsb = lsb;
        }

        PicOrderCnt {
            top: top.unwrap_or(bottom),
            bottom,
        }
    }

    fn compute_type1(&mut self, sps: &Sps, header: &SliceHeader, is_idr: bool, nal_ref_idc: u8) -> PicOrderCnt {
        let max_frame_num = 1i32 << (sps.log2_max_frame_num_minus4 + 4);

        let prev_frame_num_offset = if is_idr { 0 } else { self.prev_frame_num_offset };
        let frame_num_offset = if is_idr {
            0
        } else if self.prev_frame_num > header.frame_num {
            prev_frame_num_offset + max_frame_num
        } else {
            prev_frame_num_offset
        };

        let abs_frame_num = if sps.num_ref_frames_in_pic_order_cnt_cycle != 0 {
            let v = frame_num_offset + header.frame_num as i32;
            if v > 0 {
                v
            } else {
                0
            }
        } else {
            0
        };
        let abs_frame_num = if nal_ref_idc == 0 && abs_frame_num > 0 {
            abs_frame_num - 1
        } else {
            abs_frame_num
        };

        let mut expected_delta_per_poc_cycle = 0i32;
        for &offset in &sps.offset_for_ref_frame {
            expected_delta_per_poc_cycle += offset;
        }

        let mut expected_poc = 0i32;
        if abs_frame_num > 0 {
            let num_cycles = sps.num_ref_frames_in_pic_order_cnt_cycle as i32;
            let poc_cycle_cnt = (abs_frame_num - 1) / num_cycles;
            let frame_num_in_poc_cycle = (abs_frame_num - 1) % num_cycles;

            expected_poc = poc_cycle_cnt * expected_delta_per_poc_cycle;
            for i in 0..=frame_num_in_poc_cycle {
                expected_poc += sps.offset_for_ref_frame[i as usize];
            }
        }
        if nal_ref_idc == 0 {
            expected_poc += sps.offset_for_non_ref_pic;
        }

        let top = if !header.field_pic_flag {
            Some(expected_poc + header.delta_pic_order_cnt[0])
        } else if !header.bottom_field_flag {
            Some(expected_poc + header.delta_pic_order_cnt[0])
        } else {
            None
        };

        let bottom = if !header.field_pic_flag {
            top.unwrap() + sps.offset_for_top_to_bottom_field + header.delta_pic_order_cnt[1]
        } else if header.bottom_field_flag {
            expected_poc + sps.offset_for_top_to_bottom_field + header.delta_pic_order_cnt[0]
        } else {
            top.unwrap()
        };

        self.prev_frame_num_offset = frame_num_offset;

        PicOrderCnt {
            top: top.unwrap_or(bottom),
            bottom,
        }
    }

    fn compute_type2(&mut self, header: &SliceHeader, is_idr: bool, nal_ref_idc: u8) -> PicOrderCnt {
        let prev_frame_num_offset = if is_idr { 0 } else { self.prev_frame_num_offset };
        // frame_num wrap isn't tracked for type 2 since it has no max_frame_num
        // dependency beyond the monotonic offset; mirrors clause 8.2.1.3.
        let frame_num_offset = if is_idr {
            0
        } else if self.prev_frame_num > header.frame_num {
            prev_frame_num_offset + (1 << 16)
        } else {
            prev_frame_num_offset
        };

        let temp_poc = if is_idr {
            0
        } else if nal_ref_idc == 0 {
            2 * (frame_num_offset + header.frame_num as i32) - 1
        } else {
            2 * (frame_num_offset + header.frame_num as i32)
        };

        self.prev_frame_num_offset = frame_num_offset;

        PicOrderCnt {
            top: temp_poc,
            bottom: temp_poc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slice::{DecRefPicMarking, RefPicListModification, SliceType};
    use crate::sps::ChromaFormat;

    fn base_sps(pic_order_cnt_type: u8) -> Sps {
        Sps {
            profile_idc: crate::sps::ProfileIdc::Main,
            constraint_set0_flag: false,
            constraint_set1_flag: false,
            constraint_set2_flag: false,
            constraint_set3_flag: false,
            constraint_set4_flag: false,
            constraint_set5_flag: false,
            level_idc: 30,
            seq_parameter_set_id: 0,
            chroma_format_idc: ChromaFormat::Yuv420,
            separate_colour_plane_flag: false,
            bit_depth_luma_minus8: 0,
            bit_depth_chroma_minus8: 0,
            qpprime_y_zero_transform_bypass_flag: false,
            seq_scaling_matrix_present_flag: false,
            scaling_lists_4x4: Vec::new(),
            scaling_lists_8x8: Vec::new(),
            log2_max_frame_num_minus4: 4,
            pic_order_cnt_type,
            log2_max_pic_order_cnt_lsb_minus4: 4,
            delta_pic_order_always_zero_flag: false,
            offset_for_non_ref_pic: 0,
            offset_for_top_to_bottom_field: 0,
            num_ref_frames_in_pic_order_cnt_cycle: 0,
            offset_for_ref_frame: Vec::new(),
            max_num_ref_frames: 4,
            gaps_in_frame_num_value_allowed_flag: false,
            pic_width_in_mbs_minus1: 9,
            pic_height_in_map_units_minus1: 5,
            frame_mbs_only_flag: true,
            mb_adaptive_frame_field_flag: false,
            direct_8x8_inference_flag: true,
            frame_cropping_flag: false,
            frame_crop_left_offset: 0,
            frame_crop_right_offset: 0,
            frame_crop_top_offset: 0,
            frame_crop_bottom_offset: 0,
            vui_parameters_present_flag: false,
            vui_parameters: None,
        }
    }

    fn base_header() -> SliceHeader {
        SliceHeader {
            first_mb_in_slice: 0,
            slice_type: SliceType::I,
            pic_parameter_set_id: 0,
            colour_plane_id: 0,
            frame_num: 0,
            field_pic_flag: false,
            bottom_field_flag: false,
            idr_pic_id: 0,
            pic_order_cnt_lsb: 0,
            delta_pic_order_cnt_bottom: 0,
            delta_pic_order_cnt: [0, 0],
            redundant_pic_cnt: 0,
            direct_spatial_mv_pred_flag: false,
            num_ref_idx_active_override_flag: false,
            num_ref_idx_l0_active_minus1: 0,
            num_ref_idx_l1_active_minus1: 0,
            ref_pic_list_modification_flag_l0: false,
            ref_pic_list_modification_flag_l1: false,
            ref_pic_list_modification_l0: RefPicListModification::default(),
            ref_pic_list_modification_l1: RefPicListModification::default(),
            dec_ref_pic_marking: DecRefPicMarking::default(),
            cabac_init_idc: 0,
            slice_qp_delta: 0,
            sp_for_switch_flag: false,
            slice_qs_delta: 0,
            disable_deblocking_filter_idc: 0,
            slice_alpha_c0_offset_div2: 0,
            slice_beta_offset_div2: 0,
            slice_group_change_cycle: 0,
        }
    }

    #[test]
    fn test_scenario_f_poc_type2_idr() {
        // Scenario F: POC type 2, IDR, frame_num=0, nal_ref_idc != 0,
        // field_pic_flag=false -> (TopFOC, BottomFOC) = (0, 0).
        let sps = base_sps(2);
        let header = base_header();
        let mut state = PocState::new();
        let poc = state.compute(&sps, &header, true, 1);
        assert_eq!(poc, PicOrderCnt { top: 0, bottom: 0 });
    }

    #[test]
    fn test_poc_type2_advances_by_two_for_ref_pictures() {
        let sps = base_sps(2);
        let mut state = PocState::new();
        let mut header = base_header();
        state.compute(&sps, &header, true, 1);
        header.frame_num = 1;
        let poc = state.compute(&sps, &header, false, 1);
        assert_eq!(poc, PicOrderCnt { top: 2, bottom: 2 });
    }

    #[test]
    fn test_poc_type0_resets_on_idr() {
        let sps = base_sps(0);
        let mut state = PocState::new();
        let mut header = base_header();
        header.pic_order_cnt_lsb = 4;
        let poc = state.compute(&sps, &header, true, 1);
        assert_eq!(poc.top, 4);
        assert_eq!(poc.bottom, 4);
    }

    #[test]
    fn test_poc_type1_full_cycle_accumulation() {
        let mut sps = base_sps(1);
        sps.num_ref_frames_in_pic_order_cnt_cycle = 2;
        sps.offset_for_ref_frame = vec![2, 4];
        let mut state = PocState::new();
        let mut header = base_header();
        state.compute(&sps, &header, true, 1);
        header.frame_num = 3;
        let poc = state.compute(&sps, &header, false, 1);
        // abs_frame_num = 3, poc_cycle_cnt = (3-1)/2 = 1, frame_num_in_cycle = 0
        // expected_poc = 1*(2+4) + offset_for_ref_frame[0] = 6 + 2 = 8
        assert_eq!(poc.top, 8);
    }
}
