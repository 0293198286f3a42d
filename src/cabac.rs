//! CABAC (Context-Adaptive Binary Arithmetic Coding) core, clause 9.3.
//!
//! Covers the arithmetic decoding engine (9.3.3.2: [`CabacEngine::init`],
//! `decode_decision`, `decode_bypass`, `decode_terminate`) and context
//! variable management (9.3.1: [`init_contexts`]). Binarization
//! (9.3.2: [`crate::tables::binarization_ctx_idx_offset`]) and ctxIdx
//! derivation (9.3.3.1: [`crate::tables::ctx_idx`],
//! [`crate::tables::mb_skip_flag_ctx_idx`]) are resolved in
//! [`crate::tables`] for the syntax elements [`crate::macroblock`] drives
//! through this engine; see that module's docs for which ones.

use crate::bitreader::BitReader;
use crate::error::{AvcError, Result};
use crate::tables::{self, Mn, TRANS_IDX, RANGE_TAB_LPS};

/// One context variable: pStateIdx (0..=63) and valMPS.
#[derive(Debug, Clone, Copy, Default)]
pub struct CabacContext {
    pub p_state_idx: u8,
    pub val_mps: u8,
}

/// Total number of context variables this implementation tracks. The
/// standard's full ctxIdx space runs past 1024 once SI/SP and high-profile
/// extensions are counted; contexts beyond what `tables::mb_type_mn` and
/// `tables::coded_block_pattern_mn` cover are initialized with a neutral
/// (pStateIdx=0, valMps depends on sign) state rather than fabricated MN
/// values. See DESIGN.md for the scope decision.
pub const NUM_CONTEXTS: usize = 1024;

/// `preCtxState` clipping and valMPS/pStateIdx split, clause 9.3.1.1.
fn pre_ctx_state(mn: Mn, slice_qp_y: i32) -> CabacContext {
    let qp = slice_qp_y.clamp(0, 51);
    let pre_ctx_state = (((mn.m * qp) >> 4) + mn.n).clamp(1, 126);
    if pre_ctx_state <= 63 {
        CabacContext {
            p_state_idx: (63 - pre_ctx_state) as u8,
            val_mps: 0,
        }
    } else {
        CabacContext {
            p_state_idx: (pre_ctx_state - 64) as u8,
            val_mps: 1,
        }
    }
}

/// Initializes all tracked context variables for the current slice QP and
/// `cabac_init_idc` (clause 9.3.1.1). `cabac_init_idc` is `None` for I/SI
/// slices, where context index < 11 behaves as if cabac_init_idc were fixed.
pub fn init_contexts(slice_qp_y: i32, cabac_init_idc: Option<u8>) -> Vec<CabacContext> {
    let mut contexts = vec![CabacContext::default(); NUM_CONTEXTS];
    for (ctx_idx, slot) in contexts.iter_mut().enumerate() {
        if let Some(mn) = tables::mb_type_mn(ctx_idx, cabac_init_idc) {
            *slot = pre_ctx_state(mn, slice_qp_y);
        } else if let Some(mn) = tables::coded_block_pattern_mn(ctx_idx, cabac_init_idc) {
            *slot = pre_ctx_state(mn, slice_qp_y);
        }
    }
    contexts
}

/// The arithmetic decoding engine, clause 9.3.3.2.
pub struct CabacEngine {
    cod_i_range: u32,
    cod_i_offset: u32,
}

impl CabacEngine {
    /// `init_decoding_engine` (9.3.3.2.1): codIRange = 510, codIOffset read as
    /// the next 9 bits. Requires the bitstream to be byte-aligned beforehand
    /// (the caller handles `cabac_alignment_one_bit`).
    pub fn init(reader: &mut BitReader) -> Result<Self> {
        let cod_i_offset = reader.read_bits(9)?;
        if cod_i_offset == 510 || cod_i_offset == 511 {
            return Err(AvcError::InvalidCode(format!(
                "cabac init: codIOffset {cod_i_offset} is reserved"
            )));
        }
        Ok(Self {
            cod_i_range: 510,
            cod_i_offset,
        })
    }

    /// `DecodeDecision` (9.3.3.2.1): state transition, then renormalization.
    pub fn decode_decision(&mut self, reader: &mut BitReader, ctx: &mut CabacContext) -> Result<bool> {
        let q_cod_i_range_idx = ((self.cod_i_range >> 6) & 3) as usize;
        let cod_i_range_lps = RANGE_TAB_LPS[ctx.p_state_idx as usize][q_cod_i_range_idx] as u32;
        self.cod_i_range -= cod_i_range_lps;

        let bin_val;
        if self.cod_i_offset >= self.cod_i_range {
            bin_val = 1 - ctx.val_mps;
            self.cod_i_offset -= self.cod_i_range;
            self.cod_i_range = cod_i_range_lps;

            if ctx.p_state_idx == 0 {
                ctx.val_mps = 1 - ctx.val_mps;
            }
            ctx.p_state_idx = TRANS_IDX[ctx.p_state_idx as usize].0;
        } else {
            bin_val = ctx.val_mps;
            ctx.p_state_idx = TRANS_IDX[ctx.p_state_idx as usize].1;
        }

        self.renorm_d(reader)?;
        Ok(bin_val == 1)
    }

    /// `RenormD` (9.3.3.2.2): double codIRange/codIOffset until codIRange >= 256.
    fn renorm_d(&mut self, reader: &mut BitReader) -> Result<()> {
        while self.cod_i_range < 256 {
            self.cod_i_range <<= 1;
            self.cod_i_offset = (self.cod_i_offset << 1) | (reader.read_bit()? as u32);
        }
        Ok(())
    }

    /// `DecodeBypass` (9.3.3.2.3).
    pub fn decode_bypass(&mut self, reader: &mut BitReader) -> Result<bool> {
        self.cod_i_offset = (self.cod_i_offset << 1) | (reader.read_bit()? as u32);
        if self.cod_i_offset >= self.cod_i_range {
            self.cod_i_offset -= self.cod_i_range;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// `DecodeTerminate` (9.3.3.2.4).
    pub fn decode_terminate(&mut self, reader: &mut BitReader) -> Result<bool> {
        self.cod_i_range -= 2;
        if self.cod_i_offset >= self.cod_i_range {
            Ok(true)
        } else {
            self.renorm_d(reader)?;
            Ok(false)
        }
    }
}
