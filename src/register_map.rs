#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterMap {
    /// Start of the controller input report.
    ControlData = 0x00,
    /// First step of the unencrypted init sequence.
    Init1 = 0xF0,
    /// Disables encryption when written with `INIT_2_VALUE`.
    Init2 = 0xFB,
    /// Six byte extension identifier.
    Identity = 0xFA,
}

pub const INIT_1_VALUE: u8 = 0x55;
pub const INIT_2_VALUE: u8 = 0x00;

pub const IDENTITY_SIZE: usize = 6;
