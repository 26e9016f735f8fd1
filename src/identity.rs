use crate::register_map::IDENTITY_SIZE;

/// Controller attached to the extension port
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExtensionType {
    NoController,
    UnknownController,
    Nunchuk,
    ClassicController,
    GuitarController,
    DrumController,
    DjTurntableController,
}

impl ExtensionType {
    /// Decode the bytes read from the identity register
    pub fn from_identity(id: &[u8; IDENTITY_SIZE]) -> Self {
        if id.iter().all(|&b| b == 0xFF) {
            return Self::NoController;
        }

        match id {
            [0x00, 0x00, 0xA4, 0x20, 0x00, 0x00] => Self::Nunchuk,
            [_, 0x00, 0xA4, 0x20, 0x01, 0x01] => Self::ClassicController,
            [0x00, 0x00, 0xA4, 0x20, 0x01, 0x03] => Self::GuitarController,
            [0x01, 0x00, 0xA4, 0x20, 0x01, 0x03] => Self::DrumController,
            [0x03, 0x00, 0xA4, 0x20, 0x01, 0x03] => Self::DjTurntableController,
            _ => Self::UnknownController,
        }
    }

    pub fn is_connected(self) -> bool {
        self != Self::NoController
    }
}
