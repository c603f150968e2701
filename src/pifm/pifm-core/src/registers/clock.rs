use crate::constants::clock::*;

/// Clock sources selectable through the SRC field of CM_GPxCTL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockSource {
    Gnd,        // 0
    Oscillator, // 1 (19.2 MHz crystal)
    TestDebug0, // 2
    TestDebug1, // 3
    PllA,       // 4
    PllC,       // 5
    PllD,       // 6 (500 MHz)
    HdmiAux,    // 7
    Unknown(u8),
}

impl ClockSource {
    pub fn from_index(index: u32) -> Self {
        match index & CTL_SRC_MASK {
            0 => ClockSource::Gnd,
            1 => ClockSource::Oscillator,
            2 => ClockSource::TestDebug0,
            3 => ClockSource::TestDebug1,
            4 => ClockSource::PllA,
            5 => ClockSource::PllC,
            6 => ClockSource::PllD,
            7 => ClockSource::HdmiAux,
            other => ClockSource::Unknown(other as u8), // 8-15 all ground
        }
    }

    pub fn to_index(&self) -> u32 {
        match self {
            ClockSource::Gnd => 0,
            ClockSource::Oscillator => 1,
            ClockSource::TestDebug0 => 2,
            ClockSource::TestDebug1 => 3,
            ClockSource::PllA => 4,
            ClockSource::PllC => 5,
            ClockSource::PllD => 6,
            ClockSource::HdmiAux => 7,
            ClockSource::Unknown(index) => *index as u32 & CTL_SRC_MASK,
        }
    }
}

/// Noise shaping applied to the fractional divider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MashMode {
    Integer, // 0: DIVF ignored
    Stage1,
    Stage2,
    Stage3,
}

impl MashMode {
    pub fn from_index(index: u32) -> Self {
        match index & CTL_MASH_MASK {
            0 => MashMode::Integer,
            1 => MashMode::Stage1,
            2 => MashMode::Stage2,
            _ => MashMode::Stage3,
        }
    }

    pub fn to_index(&self) -> u32 {
        match self {
            MashMode::Integer => 0,
            MashMode::Stage1 => 1,
            MashMode::Stage2 => 2,
            MashMode::Stage3 => 3,
        }
    }
}

/// Decoded CM_GPxCTL register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockControl {
    pub source: ClockSource,
    pub enable: bool,
    pub kill: bool,
    pub busy: bool, // read-only in hardware, ignored when packing
    pub flip: bool,
    pub mash: MashMode,
}

impl ClockControl {
    /// Control word used for the transmitter: PLLD with enable and flip tied together
    pub fn transmitter(enabled: bool) -> Self {
        Self {
            source: ClockSource::PllD,
            enable: enabled,
            kill: false,
            busy: false,
            flip: enabled,
            mash: MashMode::Integer,
        }
    }

    /// Packs the fields and stamps the password into bits 24-31
    pub fn pack(&self) -> u32 {
        let mut value = (self.source.to_index() & CTL_SRC_MASK) << CTL_SRC_SHIFT;
        value |= (self.enable as u32) << CTL_ENAB_SHIFT;
        value |= (self.kill as u32) << CTL_KILL_SHIFT;
        value |= (self.flip as u32) << CTL_FLIP_SHIFT;
        value |= (self.mash.to_index() & CTL_MASH_MASK) << CTL_MASH_SHIFT;
        value | (CM_PASSWORD << PASSWORD_SHIFT)
    }

    pub fn unpack(raw: u32) -> Self {
        Self {
            source: ClockSource::from_index((raw >> CTL_SRC_SHIFT) & CTL_SRC_MASK),
            enable: (raw >> CTL_ENAB_SHIFT) & 1 != 0,
            kill: (raw >> CTL_KILL_SHIFT) & 1 != 0,
            busy: (raw >> CTL_BUSY_SHIFT) & 1 != 0,
            flip: (raw >> CTL_FLIP_SHIFT) & 1 != 0,
            mash: MashMode::from_index((raw >> CTL_MASH_SHIFT) & CTL_MASH_MASK),
        }
    }
}

/// CM_GPxDIV register: 12 integer bits, 12 fractional bits and the password
///
/// Only the low 24 bits set the output period. The integer part is the
/// period in units of the source clock; the fractional part dithers the
/// period so that it averages out to the full 24-bit value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockDivisor(u32);

impl ClockDivisor {
    /// Anything above bit 23 is dropped so it can never reach the password byte
    pub fn new(divisor: u32) -> Self {
        Self(divisor & DIV_MASK)
    }

    pub fn divisor(&self) -> u32 {
        self.0
    }

    pub fn integer(&self) -> u32 {
        (self.0 >> DIVI_SHIFT) & DIVI_MASK
    }

    pub fn fraction(&self) -> u32 {
        self.0 & DIVF_MASK
    }

    pub fn pack(&self) -> u32 {
        self.0 | (CM_PASSWORD << PASSWORD_SHIFT)
    }

    pub fn unpack(raw: u32) -> Self {
        Self::new(raw)
    }
}
