use core::ops::AddAssign;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::nunchuk::Acceleration;
use crate::Nunchuk;

/// Zero-gravity and one-gravity raw accelerometer readings
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelCalibration {
    zero_g: u16,
    one_g: u16,
}

impl AccelCalibration {
    /// Axis with no acceleration along it
    pub const DEFAULT_ZERO_G: u16 = 511;
    /// Axis aligned with gravity
    pub const DEFAULT_ONE_G: u16 = 716;

    /// Panics when both readings are equal
    pub const fn new(zero_g: u16, one_g: u16) -> Self {
        assert!(zero_g != one_g, "one-g reading must differ from zero-g");

        Self { zero_g, one_g }
    }

    /// `None` on equal readings
    pub const fn checked(zero_g: u16, one_g: u16) -> Option<Self> {
        if zero_g == one_g {
            None
        } else {
            Some(Self { zero_g, one_g })
        }
    }

    pub const fn zero_g(&self) -> u16 {
        self.zero_g
    }

    pub const fn one_g(&self) -> u16 {
        self.one_g
    }

    /// Signed acceleration in g
    pub fn normalize(&self, raw: u16) -> f32 {
        let span = f32::from(self.one_g) - f32::from(self.zero_g);

        (f32::from(raw) - f32::from(self.zero_g)) / span
    }
}

impl Default for AccelCalibration {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ZERO_G, Self::DEFAULT_ONE_G)
    }
}

struct CalibrationData {
    x: u32,
    y: u32,
    z: u32,
}

impl CalibrationData {
    const SAMPLE_COUNT: u32 = 64;

    fn new() -> Self {
        Self { x: 0, y: 0, z: 0 }
    }

    /// Zero-g from the X/Y means, one-g from the Z mean
    fn estimate(&self) -> Option<AccelCalibration> {
        let zero_g = (self.x + self.y) / (2 * Self::SAMPLE_COUNT);
        let one_g = self.z / Self::SAMPLE_COUNT;

        AccelCalibration::checked(zero_g as u16, one_g as u16)
    }
}

impl AddAssign<Acceleration> for CalibrationData {
    fn add_assign(&mut self, rhs: Acceleration) {
        self.x += u32::from(rhs.x());
        self.y += u32::from(rhs.y());
        self.z += u32::from(rhs.z());
    }
}

/// Estimate calibration from a controller lying flat and still.
/// Install the result with [`Nunchuk::set_calibration`].
pub async fn estimate_calibration<T>(
    dev: &mut Nunchuk<T>,
    delay: &mut impl DelayNs,
) -> Result<Option<AccelCalibration>, T::Error>
where
    T: I2c,
{
    #[cfg(feature = "defmt")]
    defmt::trace!("Accel calibration started");

    let mut calibration_data = CalibrationData::new();

    for _sample_index in 0..CalibrationData::SAMPLE_COUNT {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "Processing samples [{}/{}]",
            _sample_index,
            CalibrationData::SAMPLE_COUNT
        );

        dev.update(delay).await?;

        calibration_data += dev.data().acceleration();

        delay.delay_ms(10).await;
    }

    let calibration = calibration_data.estimate();

    #[cfg(feature = "defmt")]
    defmt::trace!("Estimated calibration: {:?}", calibration);

    Ok(calibration)
}
