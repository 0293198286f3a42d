//! H.264/AVC bitstream-to-syntax parser.
//!
//! Parses an Annex-B byte stream into NAL units, SPS/PPS parameter sets,
//! slice headers, the macroblock-layer syntax elements of each slice (CAVLC
//! fully, CABAC for the subset described in [`macroblock`]), and
//! per-picture order counts.
//!
//! # Example
//!
//! ```ignore
//! use avc_syntax::{start_reader, VideoStream};
//!
//! let data: &[u8] = &[/* AVC bitstream data */];
//! let mut stream = VideoStream::new();
//! start_reader(&mut stream, data)?;
//!
//! for nal in &stream.nal_units {
//!     println!("NAL type: {:?}", nal.nal_type());
//! }
//! # Ok::<(), avc_syntax::AvcError>(())
//! ```

pub mod bitreader;
pub mod cabac;
pub mod config;
pub mod error;
pub mod golomb;
pub mod macroblock;
pub mod nal;
pub mod poc;
pub mod pps;
pub mod sei;
pub mod slice;
pub mod slice_group;
pub mod sps;
pub mod stream;
pub mod tables;

pub use bitreader::{remove_emulation_prevention_bytes, BitReader};
pub use cabac::{CabacContext, CabacEngine};
pub use config::ParserConfig;
pub use error::{AvcError, Result};
pub use golomb::{me, te, CbpPredClass};
pub use macroblock::{MacroblockData, SliceContext};
pub use nal::{
    find_nal_units, parse_nal_header, parse_nal_units, NalExtension, NalUnit, NalUnitHeader,
    NalUnitType,
};
pub use poc::{PicOrderCnt, PocState};
pub use pps::{parse_pps_with_config, Pps, SliceGroupMapParams};
pub use sei::{parse_sei, SeiMessage, SeiPayloadType};
pub use slice::{
    parse_slice_header, parse_slice_header_from_reader, DecRefPicMarking, RefPicListModification,
    SliceHeader, SliceType,
};
pub use slice_group::{map_unit_to_slice_group_map, mb_to_slice_group_map, next_mb_address};
pub use sps::{parse_sps_with_config, ChromaFormat, ProfileIdc, Sps, VuiParameters};
pub use stream::{start_reader, ParsedSlice, VideoStream};
