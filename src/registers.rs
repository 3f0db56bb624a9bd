//! Register map and field codes for the VEML6031X00.
//!
//! Every register on the VEML6031X00 is 16 bits wide, addressed by the offset
//! of its low byte. The configuration registers only use the low byte, and
//! pack several independent settings into it. Each of those settings is
//! described by a [`Field`], and each legal value of a field is an enum whose
//! discriminant is the code already shifted into position.

//
// Register Addresses
//

/// ALS_CONF_0 - integration time, trigger mode, interrupt enable and shutdown
pub const ALS_CONF_0: u8 = 0x00;
/// ALS_CONF_1 - IR channel shutdown, photodiode size, gain, persistence and calibration
pub const ALS_CONF_1: u8 = 0x01;
/// ALS high threshold window, low byte
pub const ALS_WH_L: u8 = 0x04;
/// ALS high threshold window, high byte
pub const ALS_WH_H: u8 = 0x05;
/// ALS low threshold window, low byte
pub const ALS_WL_L: u8 = 0x06;
/// ALS low threshold window, high byte
pub const ALS_WL_H: u8 = 0x07;
/// Ambient light data, low byte
pub const ALS_DATA_L: u8 = 0x10;
/// Ambient light data, high byte
pub const ALS_DATA_H: u8 = 0x11;
/// IR data, low byte
pub const IR_DATA_L: u8 = 0x12;
/// IR data, high byte
pub const IR_DATA_H: u8 = 0x13;
/// Device ID, low byte
pub const ID_L: u8 = 0x14;
/// Device ID, high byte
pub const ID_H: u8 = 0x15;
/// Interrupt status. Reading this register clears it.
pub const ALS_INT: u8 = 0x17;

/// The value the device reports in [`ID_L`]
pub const DEVICE_ID: u8 = 0x01;

//
// Field Descriptors
//

/// A group of bits within the low byte of a configuration register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    /// The register holding this field
    pub register: u8,
    /// The bits this field occupies
    pub mask: u8,
}

impl Field {
    /// Replace this field's bits in `current` with `code`, leaving every
    /// other bit untouched.
    ///
    /// Bits of `code` outside the mask are ignored.
    pub const fn apply(&self, current: u8, code: u8) -> u8 {
        (current & !self.mask) | (code & self.mask)
    }
}

/// ALS integration time. Use [`IntegrationTime`].
pub const ALS_IT: Field = Field {
    register: ALS_CONF_0,
    mask: 0b0111_0000,
};

/// Active force mode. Zero is auto (continuous) mode.
pub const ALS_AF: Field = Field {
    register: ALS_CONF_0,
    mask: 1 << 3,
};

/// Trigger a single measurement in active force mode. Self-clearing.
pub const ALS_TRIG: Field = Field {
    register: ALS_CONF_0,
    mask: 1 << 2,
};

/// Interrupt enable
pub const ALS_INT_EN: Field = Field {
    register: ALS_CONF_0,
    mask: 1 << 1,
};

/// Shutdown. Zero powers on the bandgap and LDO.
pub const SD: Field = Field {
    register: ALS_CONF_0,
    mask: 1 << 0,
};

/// ALS and IR channel shutdown. Zero powers the channels on.
pub const ALS_IR_SD: Field = Field {
    register: ALS_CONF_1,
    mask: 1 << 7,
};

/// Effective photodiode size. Use [`PhotodiodeSize`].
pub const PD_DIV4: Field = Field {
    register: ALS_CONF_1,
    mask: 1 << 6,
};

/// ALS gain. Use [`Gain`].
pub const ALS_GAIN: Field = Field {
    register: ALS_CONF_1,
    mask: 0b0001_1000,
};

/// Interrupt persistence. Use [`Persistence`].
pub const ALS_PERS: Field = Field {
    register: ALS_CONF_1,
    mask: 0b0000_0110,
};

/// Calibration enable. The datasheet requires this to be set once at start-up.
pub const ALS_CAL: Field = Field {
    register: ALS_CONF_1,
    mask: 1 << 0,
};

/// Set in [`ALS_INT`] when the high threshold was crossed
pub const ALS_IF_H: u8 = 1 << 1;
/// Set in [`ALS_INT`] when the low threshold was crossed
pub const ALS_IF_L: u8 = 1 << 2;

//
// Field Codes
//

/// ALS integration time.
///
/// Longer times give more resolution but a slower sample rate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntegrationTime {
    /// 3.125 ms
    Ms3_125 = 0b000 << 4,
    /// 6.25 ms
    Ms6_25 = 0b001 << 4,
    /// 12.5 ms
    Ms12_5 = 0b010 << 4,
    /// 25 ms
    Ms25 = 0b011 << 4,
    /// 50 ms
    Ms50 = 0b100 << 4,
    /// 100 ms
    Ms100 = 0b101 << 4,
    /// 200 ms
    Ms200 = 0b110 << 4,
    /// 400 ms
    Ms400 = 0b111 << 4,
}

impl IntegrationTime {
    /// Round a time in milliseconds down to the nearest supported
    /// integration time. Anything under 6 ms becomes 3.125 ms.
    pub const fn from_millis(ms: u16) -> IntegrationTime {
        match ms {
            400.. => IntegrationTime::Ms400,
            200.. => IntegrationTime::Ms200,
            100.. => IntegrationTime::Ms100,
            50.. => IntegrationTime::Ms50,
            25.. => IntegrationTime::Ms25,
            12.. => IntegrationTime::Ms12_5,
            6.. => IntegrationTime::Ms6_25,
            _ => IntegrationTime::Ms3_125,
        }
    }

    /// Decode the [`ALS_IT`] bits of a register value
    pub const fn from_bits(bits: u8) -> IntegrationTime {
        match bits & ALS_IT.mask {
            0x00 => IntegrationTime::Ms3_125,
            0x10 => IntegrationTime::Ms6_25,
            0x20 => IntegrationTime::Ms12_5,
            0x30 => IntegrationTime::Ms25,
            0x40 => IntegrationTime::Ms50,
            0x50 => IntegrationTime::Ms100,
            0x60 => IntegrationTime::Ms200,
            _ => IntegrationTime::Ms400,
        }
    }
}

/// ALS gain
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gain {
    /// x1
    X1 = 0b00 << 3,
    /// x2
    X2 = 0b01 << 3,
    /// x0.66
    TwoThirds = 0b10 << 3,
    /// x0.5
    Half = 0b11 << 3,
}

impl Gain {
    /// Decode the [`ALS_GAIN`] bits of a register value
    pub const fn from_bits(bits: u8) -> Gain {
        match bits & ALS_GAIN.mask {
            0x00 => Gain::X1,
            0x08 => Gain::X2,
            0x10 => Gain::TwoThirds,
            _ => Gain::Half,
        }
    }
}

/// Effective photodiode size.
///
/// The quarter-size photodiode is less sensitive but covers a wider range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhotodiodeSize {
    /// 4/4 of the photodiode
    Full = 0 << 6,
    /// 1/4 of the photodiode
    Quarter = 1 << 6,
}

impl PhotodiodeSize {
    /// Decode the [`PD_DIV4`] bit of a register value
    pub const fn from_bits(bits: u8) -> PhotodiodeSize {
        if bits & PD_DIV4.mask == 0 {
            PhotodiodeSize::Full
        } else {
            PhotodiodeSize::Quarter
        }
    }
}

/// How many consecutive out-of-window readings are needed before the
/// interrupt latches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Persistence {
    /// Every reading outside the window
    One = 0b00 << 1,
    /// 2 consecutive readings
    Two = 0b01 << 1,
    /// 4 consecutive readings
    Four = 0b10 << 1,
    /// 8 consecutive readings
    Eight = 0b11 << 1,
}

impl From<IntegrationTime> for u8 {
    fn from(value: IntegrationTime) -> u8 {
        value as u8
    }
}

impl From<Gain> for u8 {
    fn from(value: Gain) -> u8 {
        value as u8
    }
}

impl From<PhotodiodeSize> for u8 {
    fn from(value: PhotodiodeSize) -> u8 {
        value as u8
    }
}

impl From<Persistence> for u8 {
    fn from(value: Persistence) -> u8 {
        value as u8
    }
}
