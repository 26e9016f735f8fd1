#![no_std]

#[cfg(test)]
extern crate std;

pub mod angle;
pub mod calibration;
pub mod field_map;
pub mod frame;
pub mod identity;
pub mod layout;
pub mod nunchuk;
pub mod register_map;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

pub use calibration::{estimate_calibration, AccelCalibration};
pub use field_map::{BitField, ByteField, FieldMap, SplitByteField};
pub use frame::RawFrame;
pub use identity::ExtensionType;
pub use layout::{DeviceDecoder, DeviceLayout};
pub use nunchuk::{Acceleration, NunchukData, NunchukField, NunchukFrame, NunchukLayout};
use register_map::{RegisterMap, IDENTITY_SIZE, INIT_1_VALUE, INIT_2_VALUE};

const I2C_ADDR: SevenBitAddress = 0x52;

/// Wait between setting the register pointer and reading it back
const DEFAULT_CONVERSION_DELAY_US: u32 = 175;

pub struct Nunchuk<T> {
    dev: T,
    data: NunchukData,
    connected_type: ExtensionType,
    retries: u8,
    conversion_delay_us: u32,
}

impl<T> Nunchuk<T>
where
    T: I2c,
{
    pub fn new(dev: T) -> Self {
        Self {
            dev,
            data: NunchukData::default(),
            connected_type: ExtensionType::NoController,
            retries: 0,
            conversion_delay_us: DEFAULT_CONVERSION_DELAY_US,
        }
    }

    /// Calibration used for roll and pitch
    pub fn with_calibration(mut self, calibration: AccelCalibration) -> Self {
        self.data.set_calibration(calibration);
        self
    }

    /// Extra attempts for every bus transaction before giving up
    pub fn with_retries(self, retries: u8) -> Self {
        Self { retries, ..self }
    }

    /// Some clone controllers need longer than the default 175us to prepare a report
    pub fn with_conversion_delay_us(self, conversion_delay_us: u32) -> Self {
        Self {
            conversion_delay_us,
            ..self
        }
    }

    pub fn set_calibration(&mut self, calibration: AccelCalibration) {
        self.data.set_calibration(calibration);
    }

    /// Give back the bus
    pub fn release(self) -> T {
        self.dev
    }

    /// Latest decoded report, the last good frame if a poll failed
    pub fn data(&self) -> &NunchukData {
        &self.data
    }

    pub fn frame(&self) -> &NunchukFrame {
        self.data.frame()
    }

    pub fn connected_type(&self) -> ExtensionType {
        self.connected_type
    }

    pub fn is_connected(&self) -> bool {
        self.connected_type == NunchukLayout::EXPECTED_TYPE
    }

    /// Unencrypted init handshake
    pub async fn initialize(&mut self, delay: &mut impl DelayNs) -> Result<(), T::Error> {
        self.write_register(RegisterMap::Init1, INIT_1_VALUE).await?;

        delay.delay_ms(10).await;

        self.write_register(RegisterMap::Init2, INIT_2_VALUE).await?;

        delay.delay_ms(20).await;

        #[cfg(feature = "defmt")]
        defmt::trace!("Extension handshake done");

        Ok(())
    }

    /// Read the identity register and decode the controller type
    pub async fn identify(&mut self, delay: &mut impl DelayNs) -> Result<ExtensionType, T::Error> {
        let mut id = [0; IDENTITY_SIZE];

        self.read_registers(RegisterMap::Identity, &mut id, delay)
            .await?;

        let extension_type = ExtensionType::from_identity(&id);

        #[cfg(feature = "defmt")]
        defmt::debug!("Identity {:x} -> {}", id, extension_type);

        Ok(extension_type)
    }

    /// Initialize, identify and check that a Nunchuk answered
    pub async fn connect(&mut self, delay: &mut impl DelayNs) -> Result<bool, T::Error> {
        match self.try_connect(delay).await {
            Ok(extension_type) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Connected type: {}", extension_type);

                self.connected_type = extension_type;

                Ok(self.is_connected())
            }
            Err(e) => {
                self.connected_type = ExtensionType::NoController;

                Err(e)
            }
        }
    }

    async fn try_connect(&mut self, delay: &mut impl DelayNs) -> Result<ExtensionType, T::Error> {
        self.initialize(delay).await?;
        self.identify(delay).await
    }

    /// Poll a new control report, on error the previous frame is kept
    pub async fn update(&mut self, delay: &mut impl DelayNs) -> Result<&NunchukData, T::Error> {
        let mut frame = [0; nunchuk::FRAME_SIZE];

        match self
            .read_registers(RegisterMap::ControlData, &mut frame, delay)
            .await
        {
            Ok(()) => {
                self.data.set_frame(frame.into());

                Ok(&self.data)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Control data read failed, keeping last frame");

                self.connected_type = ExtensionType::NoController;

                Err(e)
            }
        }
    }

    pub async fn write_register(
        &mut self,
        register: RegisterMap,
        value: u8,
    ) -> Result<(), T::Error> {
        let mut attempt = 0;

        loop {
            match self.dev.write(I2C_ADDR, &[register as u8, value]).await {
                Err(_) if attempt < self.retries => {
                    attempt += 1;

                    #[cfg(feature = "defmt")]
                    defmt::trace!("Retrying write of {} [{}/{}]", register, attempt, self.retries);
                }
                result => return result,
            }
        }
    }

    /// Set the register pointer, wait for the controller, then read `buf.len()` bytes
    pub async fn read_registers(
        &mut self,
        register: RegisterMap,
        buf: &mut [u8],
        delay: &mut impl DelayNs,
    ) -> Result<(), T::Error> {
        let mut attempt = 0;

        loop {
            match self.read_registers_once(register, buf, delay).await {
                Err(_) if attempt < self.retries => {
                    attempt += 1;

                    #[cfg(feature = "defmt")]
                    defmt::trace!("Retrying read of {} [{}/{}]", register, attempt, self.retries);
                }
                result => return result,
            }
        }
    }

    async fn read_registers_once(
        &mut self,
        register: RegisterMap,
        buf: &mut [u8],
        delay: &mut impl DelayNs,
    ) -> Result<(), T::Error> {
        self.dev.write(I2C_ADDR, &[register as u8]).await?;

        delay.delay_us(self.conversion_delay_us).await;

        self.dev.read(I2C_ADDR, buf).await
    }
}
