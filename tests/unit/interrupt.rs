//! Unit tests for the threshold interrupt

use crate::common::{create_mock_sensor, modify, read, CONF_0_AFTER_INIT};
use veml6031::{registers, InterruptStatus};

#[test]
fn test_enable_and_disable_interrupt() {
    let mut expectations = Vec::new();
    expectations.extend(modify(registers::ALS_CONF_0, CONF_0_AFTER_INIT, 0x0052));
    expectations.extend(modify(registers::ALS_CONF_0, 0x0052, CONF_0_AFTER_INIT));
    let (mut sensor, mut handle) = create_mock_sensor(&expectations);

    sensor.enable_interrupt().unwrap();
    sensor.disable_interrupt().unwrap();

    handle.done();
}

#[test]
fn test_interrupt_latch_and_clear() {
    // The device clears ALS_INT every time it is read
    let expectations = [
        read(registers::ALS_INT, 0x0000),
        read(registers::ALS_INT, 0x0002),
        read(registers::ALS_INT, 0x0000),
        read(registers::ALS_INT, 0x0004),
        read(registers::ALS_INT, 0x0000),
    ];
    let (mut sensor, mut handle) = create_mock_sensor(&expectations);

    let statuses: Vec<InterruptStatus> = (0..5)
        .map(|_| sensor.read_and_clear_interrupt_status().unwrap())
        .collect();
    assert_eq!(
        statuses,
        [
            InterruptStatus::None,
            InterruptStatus::High,
            InterruptStatus::None,
            InterruptStatus::Low,
            InterruptStatus::None,
        ]
    );

    handle.done();
}
