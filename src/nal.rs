//! H.264/AVC NAL (Network Abstraction Layer) unit parsing.
//!
//! Covers NAL framing (start-code detection, emulation-prevention removal)
//! and the NAL unit header, including the SVC/MVC/3D-AVC extension headers
//! for `nal_unit_type` in {14, 20, 21}.

use crate::bitreader::{remove_emulation_prevention_bytes, BitReader};
use crate::error::{AvcError, Result};
use serde::{Deserialize, Serialize};

/// H.264/AVC NAL unit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum NalUnitType {
    /// Unspecified
    Unspecified = 0,
    /// Coded slice of a non-IDR picture
    NonIdrSlice = 1,
    /// Coded slice data partition A
    SliceDataA = 2,
    /// Coded slice data partition B
    SliceDataB = 3,
    /// Coded slice data partition C
    SliceDataC = 4,
    /// Coded slice of an IDR picture
    IdrSlice = 5,
    /// Supplemental enhancement information (SEI)
    Sei = 6,
    /// Sequence parameter set (SPS)
    Sps = 7,
    /// Picture parameter set (PPS)
    Pps = 8,
    /// Access unit delimiter
    Aud = 9,
    /// End of sequence
    EndOfSequence = 10,
    /// End of stream
    EndOfStream = 11,
    /// Filler data
    FillerData = 12,
    /// SPS extension
    SpsExtension = 13,
    /// Prefix NAL unit (carries an SVC/MVC extension header)
    PrefixNal = 14,
    /// Subset SPS
    SubsetSps = 15,
    /// Depth parameter set
    Dps = 16,
    /// Reserved (17-18)
    Reserved17 = 17,
    Reserved18 = 18,
    /// Coded slice of an auxiliary coded picture
    AuxSlice = 19,
    /// Coded slice extension (SVC/MVC)
    SliceExtension = 20,
    /// Coded slice extension for depth view (3D-AVC)
    SliceExtensionDepth = 21,
    /// Reserved (22-23)
    Reserved22 = 22,
    Reserved23 = 23,
    /// Unspecified (24-31)
    Unspecified24 = 24,
}

impl NalUnitType {
    /// Create from raw value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => NalUnitType::Unspecified,
            1 => NalUnitType::NonIdrSlice,
            2 => NalUnitType::SliceDataA,
            3 => NalUnitType::SliceDataB,
            4 => NalUnitType::SliceDataC,
            5 => NalUnitType::IdrSlice,
            6 => NalUnitType::Sei,
            7 => NalUnitType::Sps,
            8 => NalUnitType::Pps,
            9 => NalUnitType::Aud,
            10 => NalUnitType::EndOfSequence,
            11 => NalUnitType::EndOfStream,
            12 => NalUnitType::FillerData,
            13 => NalUnitType::SpsExtension,
            14 => NalUnitType::PrefixNal,
            15 => NalUnitType::SubsetSps,
            16 => NalUnitType::Dps,
            17 => NalUnitType::Reserved17,
            18 => NalUnitType::Reserved18,
            19 => NalUnitType::AuxSlice,
            20 => NalUnitType::SliceExtension,
            21 => NalUnitType::SliceExtensionDepth,
            22 => NalUnitType::Reserved22,
            23 => NalUnitType::Reserved23,
            _ => NalUnitType::Unspecified24,
        }
    }

    /// Check if this is a VCL (Video Coding Layer) NAL unit.
    pub fn is_vcl(&self) -> bool {
        matches!(
            self,
            NalUnitType::NonIdrSlice
                | NalUnitType::SliceDataA
                | NalUnitType::SliceDataB
                | NalUnitType::SliceDataC
                | NalUnitType::IdrSlice
                | NalUnitType::AuxSlice
                | NalUnitType::SliceExtension
                | NalUnitType::SliceExtensionDepth
        )
    }

    /// Check if this is a parameter set.
    pub fn is_parameter_set(&self) -> bool {
        matches!(
            self,
            NalUnitType::Sps
                | NalUnitType::Pps
                | NalUnitType::SpsExtension
                | NalUnitType::SubsetSps
        )
    }

    /// True if this NAL unit type carries an extension header (§4.4).
    pub fn has_extension_header(&self) -> bool {
        matches!(
            self,
            NalUnitType::PrefixNal | NalUnitType::SliceExtension | NalUnitType::SliceExtensionDepth
        )
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            NalUnitType::Unspecified => "Unspecified",
            NalUnitType::NonIdrSlice => "Non-IDR Slice",
            NalUnitType::SliceDataA => "Slice Data A",
            NalUnitType::SliceDataB => "Slice Data B",
            NalUnitType::SliceDataC => "Slice Data C",
            NalUnitType::IdrSlice => "IDR Slice",
            NalUnitType::Sei => "SEI",
            NalUnitType::Sps => "SPS",
            NalUnitType::Pps => "PPS",
            NalUnitType::Aud => "AUD",
            NalUnitType::EndOfSequence => "End of Sequence",
            NalUnitType::EndOfStream => "End of Stream",
            NalUnitType::FillerData => "Filler Data",
            NalUnitType::SpsExtension => "SPS Extension",
            NalUnitType::PrefixNal => "Prefix NAL",
            NalUnitType::SubsetSps => "Subset SPS",
            NalUnitType::Dps => "DPS",
            NalUnitType::Reserved17 | NalUnitType::Reserved18 => "Reserved",
            NalUnitType::AuxSlice => "Auxiliary Slice",
            NalUnitType::SliceExtension => "Slice Extension",
            NalUnitType::SliceExtensionDepth => "Slice Extension (Depth)",
            NalUnitType::Reserved22 | NalUnitType::Reserved23 => "Reserved",
            NalUnitType::Unspecified24 => "Unspecified",
        }
    }
}

/// SVC (`nal_unit_header_svc_extension`) header extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvcExtension {
    pub idr_flag: bool,
    pub priority_id: u8,
    pub no_inter_layer_pred_flag: bool,
    pub dependency_id: u8,
    pub quality_id: u8,
    pub temporal_id: u8,
    pub use_ref_base_pic_flag: bool,
    pub discardable_flag: bool,
    pub output_flag: bool,
    pub reserved_three_2bits: u8,
}

/// MVC (`nal_unit_header_mvc_extension`) header extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MvcExtension {
    pub non_idr_flag: bool,
    pub priority_id: u8,
    pub view_id: u16,
    pub temporal_id: u8,
    pub anchor_pic_flag: bool,
    pub inter_view_flag: bool,
    pub reserved_one_bit: bool,
}

/// 3D-AVC (`nal_unit_header_3davc_extension`) header extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avc3dExtension {
    pub view_idx: u8,
    pub depth_flag: bool,
    pub non_idr_flag: bool,
    pub temporal_id: u8,
    pub anchor_pic_flag: bool,
    pub inter_view_flag: bool,
}

/// The NAL header extension selected by `svc_extension_flag` /
/// `avc_3d_extension_flag` for `nal_unit_type` in {14, 20, 21}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NalExtension {
    Svc(SvcExtension),
    Mvc(MvcExtension),
    Avc3d(Avc3dExtension),
}

/// NAL unit header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NalUnitHeader {
    /// forbidden_zero_bit (should be 0)
    pub forbidden_zero_bit: bool,
    /// nal_ref_idc (0-3)
    pub nal_ref_idc: u8,
    /// nal_unit_type
    pub nal_unit_type: NalUnitType,
    /// SVC/MVC/3D-AVC extension header, present for types 14, 20, 21.
    pub extension: Option<NalExtension>,
}

/// Parsed NAL unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NalUnit {
    /// NAL unit header.
    pub header: NalUnitHeader,
    /// Byte offset in the original stream (start of NAL unit header).
    pub offset: usize,
    /// Size of the NAL unit in bytes (including header).
    pub size: usize,
    /// Payload after the header (and any extension header), with emulation
    /// prevention bytes removed.
    pub payload: Vec<u8>,
    /// Original payload (with emulation prevention bytes).
    pub raw_payload: Vec<u8>,
}

impl NalUnit {
    /// Get NAL unit type.
    pub fn nal_type(&self) -> NalUnitType {
        self.header.nal_unit_type
    }

    /// Check if this is a reference picture.
    pub fn is_reference(&self) -> bool {
        self.header.nal_ref_idc > 0
    }
}

/// Parse the NAL unit header (and extension header, if any) from a
/// `BitReader` positioned at the start of the NAL unit. Reads
/// `forbidden_zero_bit`(1) + `nal_ref_idc`(2) + `nal_unit_type`(5), then the
/// extension header per spec.md §4.4 when `nal_unit_type` is 14, 20, or 21.
pub fn parse_nal_header(reader: &mut BitReader) -> Result<NalUnitHeader> {
    let forbidden_zero_bit = reader.read_flag()?;
    let nal_ref_idc = reader.read_bits(2)? as u8;
    let nal_unit_type = NalUnitType::from_u8(reader.read_bits(5)? as u8);

    if forbidden_zero_bit {
        return Err(AvcError::InvalidNalUnit(
            "forbidden_zero_bit is set".to_string(),
        ));
    }

    let extension = if nal_unit_type.has_extension_header() {
        Some(parse_nal_extension(reader, nal_unit_type)?)
    } else {
        None
    };

    Ok(NalUnitHeader {
        forbidden_zero_bit,
        nal_ref_idc,
        nal_unit_type,
        extension,
    })
}

fn parse_nal_extension(reader: &mut BitReader, nal_unit_type: NalUnitType) -> Result<NalExtension> {
    if nal_unit_type == NalUnitType::SliceExtensionDepth {
        // avc_3d_extension_flag is implicit for type 21: always 3D-AVC.
        return parse_3davc_extension(reader);
    }
    let svc_extension_flag = reader.read_flag()?;
    if svc_extension_flag {
        parse_svc_extension(reader)
    } else {
        parse_mvc_extension(reader)
    }
}

fn parse_svc_extension(reader: &mut BitReader) -> Result<NalExtension> {
    let idr_flag = reader.read_flag()?;
    let priority_id = reader.read_bits(6)? as u8;
    let no_inter_layer_pred_flag = reader.read_flag()?;
    let dependency_id = reader.read_bits(3)? as u8;
    let quality_id = reader.read_bits(4)? as u8;
    let temporal_id = reader.read_bits(3)? as u8;
    let use_ref_base_pic_flag = reader.read_flag()?;
    let discardable_flag = reader.read_flag()?;
    let output_flag = reader.read_flag()?;
    let reserved_three_2bits = reader.read_bits(2)? as u8;
    Ok(NalExtension::Svc(SvcExtension {
        idr_flag,
        priority_id,
        no_inter_layer_pred_flag,
        dependency_id,
        quality_id,
        temporal_id,
        use_ref_base_pic_flag,
        discardable_flag,
        output_flag,
        reserved_three_2bits,
    }))
}

fn parse_mvc_extension(reader: &mut BitReader) -> Result<NalExtension> {
    let non_idr_flag = reader.read_flag()?;
    let priority_id = reader.read_bits(6)? as u8;
    let view_id = reader.read_bits(10)? as u16;
    let temporal_id = reader.read_bits(3)? as u8;
    let anchor_pic_flag = reader.read_flag()?;
    let inter_view_flag = reader.read_flag()?;
    let reserved_one_bit = reader.read_flag()?;
    Ok(NalExtension::Mvc(MvcExtension {
        non_idr_flag,
        priority_id,
        view_id,
        temporal_id,
        anchor_pic_flag,
        inter_view_flag,
        reserved_one_bit,
    }))
}

fn parse_3davc_extension(reader: &mut BitReader) -> Result<NalExtension> {
    let view_idx = reader.read_bits(8)? as u8;
    let depth_flag = reader.read_flag()?;
    let non_idr_flag = reader.read_flag()?;
    let temporal_id = reader.read_bits(3)? as u8;
    let anchor_pic_flag = reader.read_flag()?;
    let inter_view_flag = reader.read_flag()?;
    Ok(NalExtension::Avc3d(Avc3dExtension {
        view_idx,
        depth_flag,
        non_idr_flag,
        temporal_id,
        anchor_pic_flag,
        inter_view_flag,
    }))
}

/// Find NAL unit start codes in an Annex-B byte stream.
///
/// Returns offsets pointing to the first byte after each start code. A
/// start-code prefix is `00 00 01` or `00 00 00 01` — the three-byte form is
/// detected first; the source's `isStartCodeOnePrefix` check conflated "is a
/// start code" with "is the 4-byte form", which this implementation keeps
/// separate.
pub fn find_nal_units(data: &[u8]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut i = 0;

    while i < data.len() {
        if i + 2 < data.len() && data[i] == 0 && data[i + 1] == 0 {
            if data[i + 2] == 1 {
                positions.push(i + 3);
                i += 3;
                continue;
            } else if i + 3 < data.len() && data[i + 2] == 0 && data[i + 3] == 1 {
                positions.push(i + 4);
                i += 4;
                continue;
            }
        }
        i += 1;
    }

    positions
}

/// Parse all NAL units from an Annex-B byte stream.
pub fn parse_nal_units(data: &[u8]) -> Result<Vec<NalUnit>> {
    let positions = find_nal_units(data);
    let mut nal_units = Vec::new();

    for (idx, &start) in positions.iter().enumerate() {
        if start >= data.len() {
            continue;
        }

        let end = if idx + 1 < positions.len() {
            let next_start = positions[idx + 1];
            if next_start >= 4 && data[next_start - 4] == 0 {
                next_start - 4
            } else {
                next_start - 3
            }
        } else {
            data.len()
        };

        if start >= end {
            continue;
        }

        let nal_bytes = &data[start..end];
        let mut header_reader = BitReader::new(nal_bytes);
        let header = parse_nal_header(&mut header_reader)?;
        header_reader.byte_align();
        let header_bytes = header_reader.bit_position() / 8;

        let raw_payload = nal_bytes[header_bytes..].to_vec();
        let payload = remove_emulation_prevention_bytes(&raw_payload);

        let offset = if start >= 4 && data[start - 4] == 0 {
            start - 4
        } else {
            start - 3
        };

        nal_units.push(NalUnit {
            header,
            offset,
            size: end - offset,
            payload,
            raw_payload,
        });
    }

    Ok(nal_units)
}
