use core::fmt;

use crate::field_map::{all_fit, FieldMap};
use crate::frame::RawFrame;
use crate::identity::ExtensionType;

/// Named field table for one device type
pub trait DeviceLayout {
    /// Bytes in one control report
    const FRAME_SIZE: usize;

    /// Type a connected device must identify as, comparison is up to the caller
    const EXPECTED_TYPE: ExtensionType;

    type Field: Copy + fmt::Debug + 'static;

    /// Every field, in the same order as `MAPS`
    const FIELDS: &'static [Self::Field];

    const MAPS: &'static [FieldMap];

    /// Position of `field` in `FIELDS` and `MAPS`
    fn index(field: Self::Field) -> usize;

    fn name(field: Self::Field) -> &'static str;

    fn map(field: Self::Field) -> FieldMap {
        Self::MAPS[Self::index(field)]
    }
}

/// Reads fields of a [`DeviceLayout`] out of the frame currently held.
///
/// Pairing a layout with a frame it does not fit is a build error:
///
/// ```compile_fail
/// use nunchuk_async::{DeviceDecoder, NunchukField, NunchukLayout, RawFrame};
///
/// struct Short(RawFrame<2>);
///
/// impl DeviceDecoder<2> for Short {
///     type Layout = NunchukLayout;
///
///     fn frame(&self) -> &RawFrame<2> {
///         &self.0
///     }
/// }
///
/// let short = Short(RawFrame::new([1, 2]));
/// let _ = short.read(NunchukField::AccelZ);
/// ```
///
/// ```
/// use nunchuk_async::{DeviceDecoder, NunchukField, NunchukLayout, RawFrame};
///
/// struct Report(RawFrame<6>);
///
/// impl DeviceDecoder<6> for Report {
///     type Layout = NunchukLayout;
///
///     fn frame(&self) -> &RawFrame<6> {
///         &self.0
///     }
/// }
///
/// let report = Report(RawFrame::new([1, 2, 0, 0, 0xFF, 0b1100_0000]));
/// assert_eq!(report.read(NunchukField::AccelZ), 1023);
/// ```
pub trait DeviceDecoder<const N: usize> {
    type Layout: DeviceLayout;

    /// Fails const evaluation when the layout does not fit a frame of `N` bytes
    const LAYOUT_FITS: () = assert!(
        <Self::Layout as DeviceLayout>::FRAME_SIZE == N
            && <Self::Layout as DeviceLayout>::MAPS.len()
                == <Self::Layout as DeviceLayout>::FIELDS.len()
            && all_fit(<Self::Layout as DeviceLayout>::MAPS, N),
        "layout does not fit the decoder frame"
    );

    /// Most recent successfully fetched frame
    fn frame(&self) -> &RawFrame<N>;

    fn expected_type(&self) -> ExtensionType {
        <Self::Layout as DeviceLayout>::EXPECTED_TYPE
    }

    /// Extract one field as an unsigned integer
    fn read(&self, field: <Self::Layout as DeviceLayout>::Field) -> u16 {
        let () = Self::LAYOUT_FITS;

        <Self::Layout as DeviceLayout>::map(field).extract(self.frame())
    }

    /// Write `name: value` for every field, one per line
    fn write_fields<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for &field in <Self::Layout as DeviceLayout>::FIELDS {
            writeln!(
                out,
                "{}: {}",
                <Self::Layout as DeviceLayout>::name(field),
                self.read(field)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_map::{BitField, SplitByteField};
    use std::string::String;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    enum PadField {
        Wide,
        Fire,
    }

    struct PadLayout;

    impl DeviceLayout for PadLayout {
        const FRAME_SIZE: usize = 2;
        const EXPECTED_TYPE: ExtensionType = ExtensionType::UnknownController;

        type Field = PadField;

        const FIELDS: &'static [PadField] = &[PadField::Wide, PadField::Fire];
        const MAPS: &'static [FieldMap] = &[
            FieldMap::Split(SplitByteField::new(0, 1, 4, 4)),
            FieldMap::Bit(BitField::new(1, 0)),
        ];

        fn index(field: PadField) -> usize {
            field as usize
        }

        fn name(field: PadField) -> &'static str {
            match field {
                PadField::Wide => "wide",
                PadField::Fire => "fire",
            }
        }
    }

    struct Pad(RawFrame<2>);

    impl DeviceDecoder<2> for Pad {
        type Layout = PadLayout;

        fn frame(&self) -> &RawFrame<2> {
            &self.0
        }
    }

    const _: () = <Pad as DeviceDecoder<2>>::LAYOUT_FITS;

    #[test]
    fn test_read_uses_layout_table() {
        let pad = Pad(RawFrame::new([0x12, 0xA1]));

        // 0x12 << 4 | 0xA
        assert_eq!(pad.read(PadField::Wide), 0x12A);
        assert_eq!(pad.read(PadField::Fire), 1);
        assert_eq!(PadLayout::map(PadField::Fire), FieldMap::Bit(BitField::new(1, 0)));
        assert_eq!(pad.expected_type(), ExtensionType::UnknownController);
    }

    #[test]
    fn test_write_fields_follows_field_order() {
        let pad = Pad(RawFrame::new([0x00, 0x30]));
        let mut out = String::new();

        pad.write_fields(&mut out).unwrap();

        assert_eq!(out, "wide: 3\nfire: 0\n");
    }
}
