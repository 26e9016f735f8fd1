use core::fmt;

use crate::angle;
use crate::calibration::AccelCalibration;
use crate::field_map::{BitField, ByteField, FieldMap, SplitByteField};
use crate::frame::RawFrame;
use crate::identity::ExtensionType;
use crate::layout::{DeviceDecoder, DeviceLayout};

pub const FRAME_SIZE: usize = 6;

pub type NunchukFrame = RawFrame<FRAME_SIZE>;

// byte 0   joystick X
// byte 1   joystick Y
// byte 2   accel X [9:2]
// byte 3   accel Y [9:2]
// byte 4   accel Z [9:2]
// byte 5   accel Z [1:0] | accel Y [1:0] | accel X [1:0] | C | Z
//          bits 7..6       bits 5..4       bits 3..2      1   0
pub struct Maps;

impl Maps {
    pub const JOY_X: ByteField = ByteField::new(0);
    pub const JOY_Y: ByteField = ByteField::new(1);

    pub const ACCEL_X: SplitByteField = SplitByteField::new(2, 5, 2, 2);
    pub const ACCEL_Y: SplitByteField = SplitByteField::new(3, 5, 2, 4);
    pub const ACCEL_Z: SplitByteField = SplitByteField::new(4, 5, 2, 6);

    pub const BUTTON_C: BitField = BitField::new(5, 1);
    pub const BUTTON_Z: BitField = BitField::new(5, 0);

    pub const ALL: [FieldMap; 7] = [
        FieldMap::Byte(Self::JOY_X),
        FieldMap::Byte(Self::JOY_Y),
        FieldMap::Split(Self::ACCEL_X),
        FieldMap::Split(Self::ACCEL_Y),
        FieldMap::Split(Self::ACCEL_Z),
        FieldMap::Bit(Self::BUTTON_C),
        FieldMap::Bit(Self::BUTTON_Z),
    ];
}

const _: () = <NunchukData as DeviceDecoder<FRAME_SIZE>>::LAYOUT_FITS;
const _: () = assert!(
    Maps::ACCEL_X.lsb_mask() & Maps::ACCEL_Y.lsb_mask() == 0
        && Maps::ACCEL_X.lsb_mask() & Maps::ACCEL_Z.lsb_mask() == 0
        && Maps::ACCEL_Y.lsb_mask() & Maps::ACCEL_Z.lsb_mask() == 0,
    "accelerometer low bits overlap"
);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NunchukField {
    JoyX,
    JoyY,
    AccelX,
    AccelY,
    AccelZ,
    ButtonC,
    ButtonZ,
}

pub struct NunchukLayout;

impl DeviceLayout for NunchukLayout {
    const FRAME_SIZE: usize = FRAME_SIZE;
    const EXPECTED_TYPE: ExtensionType = ExtensionType::Nunchuk;

    type Field = NunchukField;

    const FIELDS: &'static [NunchukField] = &[
        NunchukField::JoyX,
        NunchukField::JoyY,
        NunchukField::AccelX,
        NunchukField::AccelY,
        NunchukField::AccelZ,
        NunchukField::ButtonC,
        NunchukField::ButtonZ,
    ];

    const MAPS: &'static [FieldMap] = &Maps::ALL;

    fn index(field: NunchukField) -> usize {
        field as usize
    }

    fn name(field: NunchukField) -> &'static str {
        match field {
            NunchukField::JoyX => "joy_x",
            NunchukField::JoyY => "joy_y",
            NunchukField::AccelX => "accel_x",
            NunchukField::AccelY => "accel_y",
            NunchukField::AccelZ => "accel_z",
            NunchukField::ButtonC => "button_c",
            NunchukField::ButtonZ => "button_z",
        }
    }
}

/// Raw 10-bit accelerometer readings
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) z: u16,
}

impl Acceleration {
    pub fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn z(&self) -> u16 {
        self.z
    }
}

/// Decoded view over the latest report, every accessor re-reads the frame
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NunchukData {
    frame: NunchukFrame,
    calibration: AccelCalibration,
}

impl NunchukData {
    pub fn new(frame: NunchukFrame) -> Self {
        Self {
            frame,
            calibration: AccelCalibration::default(),
        }
    }

    pub fn with_calibration(self, calibration: AccelCalibration) -> Self {
        Self {
            frame: self.frame,
            calibration,
        }
    }

    pub fn calibration(&self) -> &AccelCalibration {
        &self.calibration
    }

    pub(crate) fn set_calibration(&mut self, calibration: AccelCalibration) {
        self.calibration = calibration;
    }

    pub(crate) fn set_frame(&mut self, frame: NunchukFrame) {
        self.frame = frame;
    }

    /// 0-255
    pub fn joy_x(&self) -> u8 {
        Maps::JOY_X.extract(&self.frame)
    }

    pub fn joy_y(&self) -> u8 {
        Maps::JOY_Y.extract(&self.frame)
    }

    /// 0-1023
    pub fn accel_x(&self) -> u16 {
        Maps::ACCEL_X.extract(&self.frame)
    }

    pub fn accel_y(&self) -> u16 {
        Maps::ACCEL_Y.extract(&self.frame)
    }

    pub fn accel_z(&self) -> u16 {
        Maps::ACCEL_Z.extract(&self.frame)
    }

    pub fn acceleration(&self) -> Acceleration {
        Acceleration::new(self.accel_x(), self.accel_y(), self.accel_z())
    }

    pub fn button_c(&self) -> bool {
        Maps::BUTTON_C.extract(&self.frame)
    }

    pub fn button_z(&self) -> bool {
        Maps::BUTTON_Z.extract(&self.frame)
    }

    /// Degrees, -180.0 to 180.0
    pub fn roll_angle(&self) -> f32 {
        angle::roll(&self.calibration, self.accel_x(), self.accel_z())
    }

    /// Degrees, -180.0 to 180.0
    pub fn pitch_angle(&self) -> f32 {
        angle::pitch(&self.calibration, self.accel_y(), self.accel_z())
    }
}

impl DeviceDecoder<FRAME_SIZE> for NunchukData {
    type Layout = NunchukLayout;

    fn frame(&self) -> &NunchukFrame {
        &self.frame
    }
}

impl fmt::Display for NunchukData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let button = |pressed: bool| if pressed { '*' } else { ' ' };

        write!(
            f,
            "Nunchuk - Joy:({:3}, {:3}) | Accel:({:4}, {:4}, {:4}) | Buttons: C:{} Z:{}",
            self.joy_x(),
            self.joy_y(),
            self.accel_x(),
            self.accel_y(),
            self.accel_z(),
            button(self.button_c()),
            button(self.button_z()),
        )
    }
}
