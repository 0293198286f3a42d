//! Parser configuration: tunable bounds for the defensive limits enforced
//! while parsing untrusted SPS/VUI fields (`sps::parse_sps_with_config`)
//! and the PPS explicit slice-group map (`pps::parse_pps_with_config`).
//!
//! Every bound here mirrors a `// SECURITY:` check inlined in `sps.rs`/
//! `pps.rs`; the struct exists so callers parsing known-hostile input
//! (fuzzing harnesses, multi-tenant transcoding services) can tighten or
//! loosen them without patching the parser itself.

use serde::{Deserialize, Serialize};

/// Defensive parsing bounds. `Default` matches the constants hardcoded in
/// the original single-purpose parser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Max `bit_depth_{luma,chroma}_minus8` (clause 7.4.2.1.1 allows up to 6 -> 14-bit).
    pub max_bit_depth_minus8: u32,
    /// Max `num_ref_frames_in_pic_order_cnt_cycle`.
    pub max_ref_frames_in_cycle: u32,
    /// Max `max_num_ref_frames`.
    pub max_num_ref_frames: u32,
    /// Max `pic_width_in_mbs_minus1` / `pic_height_in_map_units_minus1`.
    pub max_pic_dimension_in_mbs: u32,
    /// Max VUI `chroma_sample_loc_type_{top,bottom}_field`.
    pub max_chroma_loc_type: u32,
    /// Max VUI `max_num_reorder_frames`.
    pub max_num_reorder_frames: u32,
    /// Max VUI `max_dec_frame_buffering`.
    pub max_dec_frame_buffering: u32,
    /// Max HRD `cpb_cnt_minus1`.
    pub max_cpb_count: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_bit_depth_minus8: 6,
            max_ref_frames_in_cycle: 255,
            max_num_ref_frames: 32,
            max_pic_dimension_in_mbs: 16384,
            max_chroma_loc_type: 64,
            max_num_reorder_frames: 16,
            max_dec_frame_buffering: 32,
            max_cpb_count: 32,
        }
    }
}
