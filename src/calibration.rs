//! Lux conversion factors for the VEML6031X00.
//!
//! The datasheet gives a lux-per-count resolution for every combination of
//! integration time, photodiode size and gain. The table is keyed by the raw
//! register codes, so it can be indexed straight from whatever was last
//! written to the device.

use crate::registers::{Gain, IntegrationTime, PhotodiodeSize};

//
// Public Types
//

/// A configuration with no entry in the lux table.
///
/// Each variant carries the raw register code that could not be found.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// No row for this integration time code
    UnknownIntegrationTime(u8),
    /// No row for this photodiode size code at the given integration time
    UnknownPhotodiodeSize(u8),
    /// No entry for this gain code at the given integration time and
    /// photodiode size
    UnknownGain(u8),
}

//
// Private Types
//

struct IntegrationTimeRow {
    integration_time: u8,
    photodiodes: &'static [PhotodiodeRow],
}

struct PhotodiodeRow {
    photodiode_size: u8,
    gains: &'static [(u8, f32)],
}

//
// Private Data
//

const X2: u8 = Gain::X2 as u8;
const X1: u8 = Gain::X1 as u8;
const TWO_THIRDS: u8 = Gain::TwoThirds as u8;
const HALF: u8 = Gain::Half as u8;

const QUARTER: u8 = PhotodiodeSize::Quarter as u8;
const FULL: u8 = PhotodiodeSize::Full as u8;

/// Build one integration time row, with the quarter photodiode first.
macro_rules! row {
    ($it:expr, [$q2:expr, $q1:expr, $qt:expr, $qh:expr], [$f2:expr, $f1:expr, $ft:expr, $fh:expr]) => {
        IntegrationTimeRow {
            integration_time: $it as u8,
            photodiodes: &[
                PhotodiodeRow {
                    photodiode_size: QUARTER,
                    gains: &[(X2, $q2), (X1, $q1), (TWO_THIRDS, $qt), (HALF, $qh)],
                },
                PhotodiodeRow {
                    photodiode_size: FULL,
                    gains: &[(X2, $f2), (X1, $f1), (TWO_THIRDS, $ft), (HALF, $fh)],
                },
            ],
        }
    };
}

// Gains in each row are ordered x2, x1, x2/3, x1/2.
static LUX_TABLE: [IntegrationTimeRow; 8] = [
    row!(
        IntegrationTime::Ms3_125,
        [1.7408, 3.4816, 5.2752, 6.9632],
        [0.4352, 0.8704, 1.3188, 1.7408]
    ),
    row!(
        IntegrationTime::Ms6_25,
        [0.8704, 1.7408, 2.6376, 3.4816],
        [0.2176, 0.4352, 0.6594, 0.8704]
    ),
    row!(
        IntegrationTime::Ms12_5,
        [0.4352, 0.8704, 1.3188, 1.7408],
        [0.1088, 0.2176, 0.3297, 0.4352]
    ),
    row!(
        IntegrationTime::Ms25,
        [0.2176, 0.4352, 0.6594, 0.8704],
        [0.0544, 0.1088, 0.1648, 0.2176]
    ),
    row!(
        IntegrationTime::Ms50,
        [0.1088, 0.2176, 0.3297, 0.4352],
        [0.0272, 0.0544, 0.0824, 0.1088]
    ),
    row!(
        IntegrationTime::Ms100,
        [0.0544, 0.1088, 0.1648, 0.2176],
        [0.0136, 0.0272, 0.0412, 0.0544]
    ),
    // The x1/2 quarter-photodiode value doesn't follow the pattern of its
    // neighbours (0.1088 would). Kept as published.
    row!(
        IntegrationTime::Ms200,
        [0.0272, 0.0544, 0.0824, 0.0188],
        [0.0068, 0.0136, 0.0206, 0.0272]
    ),
    row!(
        IntegrationTime::Ms400,
        [0.0136, 0.0272, 0.0412, 0.0544],
        [0.0034, 0.0068, 0.0103, 0.0136]
    ),
];

//
// Public Functions
//

/// Look up the lux-per-count multiplier for a set of raw register codes.
///
/// The codes are the pre-shifted values as found in the configuration
/// registers, e.g. `IntegrationTime::Ms100 as u8`. The integration time is
/// checked first, then the photodiode size, then the gain.
pub fn lux_multiplier(
    integration_time: u8,
    photodiode_size: u8,
    gain: u8,
) -> Result<f32, CalibrationError> {
    let row = LUX_TABLE
        .iter()
        .find(|row| row.integration_time == integration_time)
        .ok_or(CalibrationError::UnknownIntegrationTime(integration_time))?;
    let photodiode = row
        .photodiodes
        .iter()
        .find(|pd| pd.photodiode_size == photodiode_size)
        .ok_or(CalibrationError::UnknownPhotodiodeSize(photodiode_size))?;
    photodiode
        .gains
        .iter()
        .find(|(code, _)| *code == gain)
        .map(|(_, multiplier)| *multiplier)
        .ok_or(CalibrationError::UnknownGain(gain))
}

/// Convert a raw ambient count to lux.
pub fn raw_to_lux(
    raw: u16,
    integration_time: u8,
    photodiode_size: u8,
    gain: u8,
) -> Result<f32, CalibrationError> {
    let multiplier = lux_multiplier(integration_time, photodiode_size, gain)?;
    Ok(f32::from(raw) * multiplier)
}
