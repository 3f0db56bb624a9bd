//! Transaction builders and helpers shared by the VEML6031 tests

use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction};
use embedded_hal_mock::MockError;
use std::io::ErrorKind;
use veml6031::registers::{self, Field};
use veml6031::Veml6031;

/// Address of the VEML6031X00
pub const ADDR: u8 = 0x29;

/// ALS_CONF_0 after power-on reset (shut down)
pub const CONF_0_RESET: u16 = 0x0001;
/// ALS_CONF_1 after power-on reset (ALS and IR channels shut down)
pub const CONF_1_RESET: u16 = 0x0080;

/// ALS_CONF_0 once `Veml6031::new` has finished: powered on, 100 ms
pub const CONF_0_AFTER_INIT: u16 = 0x0050;
/// ALS_CONF_1 once `Veml6031::new` has finished: channels on, quarter
/// photodiode, x1 gain, persistence 1, calibration enabled
pub const CONF_1_AFTER_INIT: u16 = 0x0041;

/// The bus reads `value` back from `register`
pub fn read_at(addr: u8, register: u8, value: u16) -> Transaction {
    Transaction::write_read(addr, vec![register], value.to_le_bytes().to_vec())
}

/// The bus reads `value` back from `register` at [`ADDR`]
pub fn read(register: u8, value: u16) -> Transaction {
    read_at(ADDR, register, value)
}

/// The driver writes `value` to `register`
pub fn write_at(addr: u8, register: u8, value: u16) -> Transaction {
    let [low, high] = value.to_le_bytes();
    Transaction::write(addr, vec![register, low, high])
}

/// The driver writes `value` to `register` at [`ADDR`]
pub fn write(register: u8, value: u16) -> Transaction {
    write_at(ADDR, register, value)
}

/// A read-modify-write of the low byte of `register`, from `before` to `after`
pub fn modify_at(addr: u8, register: u8, before: u16, after: u16) -> Vec<Transaction> {
    vec![
        read_at(addr, register, before),
        read_at(addr, register, before),
        write_at(addr, register, after),
    ]
}

/// A read-modify-write at [`ADDR`]
pub fn modify(register: u8, before: u16, after: u16) -> Vec<Transaction> {
    modify_at(ADDR, register, before, after)
}

/// Turn a transaction into one that fails on the bus
pub fn failing(transaction: Transaction) -> Transaction {
    transaction.with_error(MockError::Io(ErrorKind::Other))
}

/// Set a field in a simulated register and record the read-modify-write
fn set_field(log: &mut Vec<Transaction>, addr: u8, register: &mut u16, field: Field, code: u8) {
    let [low, high] = register.to_le_bytes();
    let after = u16::from_le_bytes([field.apply(low, code), high]);
    log.extend(modify_at(addr, field.register, *register, after));
    *register = after;
}

/// Every transaction `Veml6031::new` performs, given the configuration
/// registers as they are found on the device
pub fn init_transactions_at(addr: u8, mut conf_0: u16, mut conf_1: u16) -> Vec<Transaction> {
    let mut log = vec![read_at(addr, registers::ID_L, 0x0001)];
    set_field(&mut log, addr, &mut conf_0, registers::SD, 0);
    set_field(&mut log, addr, &mut conf_1, registers::ALS_IR_SD, 0);
    set_field(&mut log, addr, &mut conf_1, registers::ALS_CAL, 1);
    set_field(&mut log, addr, &mut conf_0, registers::ALS_IT, 0x50);
    log.push(write_at(addr, registers::ALS_WH_L, 0xFFFF));
    log.push(write_at(addr, registers::ALS_WL_L, 0x0000));
    set_field(&mut log, addr, &mut conf_1, registers::ALS_GAIN, 0x00);
    set_field(&mut log, addr, &mut conf_1, registers::PD_DIV4, 0x40);
    log.push(read_at(addr, registers::ALS_INT, 0x0000));
    log
}

/// The start-up sequence for a freshly reset device at [`ADDR`]
pub fn init_transactions() -> Vec<Transaction> {
    init_transactions_at(ADDR, CONF_0_RESET, CONF_1_RESET)
}

/// Create an initialised driver whose bus expects `extra` once start-up is done
///
/// Returns the driver and a clone of the mock that shares its expectations.
pub fn create_mock_sensor(extra: &[Transaction]) -> (Veml6031<I2cMock>, I2cMock) {
    let mut expectations = init_transactions();
    expectations.extend_from_slice(extra);
    let mock = I2cMock::new(&expectations);
    let handle = mock.clone();
    let sensor = Veml6031::new(mock, ADDR).expect("Failed to create mock sensor");
    (sensor, handle)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}
