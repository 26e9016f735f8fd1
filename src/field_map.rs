use crate::frame::RawFrame;

/// Value stored in a whole byte
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ByteField {
    byte_index: usize,
}

impl ByteField {
    pub const fn new(byte_index: usize) -> Self {
        Self { byte_index }
    }

    pub const fn byte_index(&self) -> usize {
        self.byte_index
    }

    pub const fn fits(&self, frame_size: usize) -> bool {
        self.byte_index < frame_size
    }

    #[inline]
    pub const fn extract<const N: usize>(&self, frame: &RawFrame<N>) -> u8 {
        frame.bytes()[self.byte_index]
    }
}

/// Single bit flag inside a byte
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    byte_index: usize,
    bit_index: u8,
}

impl BitField {
    /// Panics on a bit index past 7, a build error in `const` context
    pub const fn new(byte_index: usize, bit_index: u8) -> Self {
        assert!(bit_index < 8, "bit index out of range");

        Self {
            byte_index,
            bit_index,
        }
    }

    pub const fn byte_index(&self) -> usize {
        self.byte_index
    }

    pub const fn bit_index(&self) -> u8 {
        self.bit_index
    }

    pub const fn fits(&self, frame_size: usize) -> bool {
        self.byte_index < frame_size
    }

    #[inline]
    pub const fn extract<const N: usize>(&self, frame: &RawFrame<N>) -> bool {
        (frame.bytes()[self.byte_index] >> self.bit_index) & 1 != 0
    }
}

/// `(frame[msb] << count) | ((frame[lsb_source] >> offset) & ((1 << count) - 1))`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SplitByteField {
    msb_byte_index: usize,
    lsb_source_byte_index: usize,
    lsb_bit_count: u8,
    lsb_bit_offset: u8,
}

impl SplitByteField {
    /// Panics when the low bits do not fit inside one byte
    pub const fn new(
        msb_byte_index: usize,
        lsb_source_byte_index: usize,
        lsb_bit_count: u8,
        lsb_bit_offset: u8,
    ) -> Self {
        assert!(lsb_bit_count > 0, "split field needs at least one low bit");
        assert!(
            lsb_bit_offset as u16 + lsb_bit_count as u16 <= 8,
            "low bits exceed the source byte"
        );

        Self {
            msb_byte_index,
            lsb_source_byte_index,
            lsb_bit_count,
            lsb_bit_offset,
        }
    }

    pub const fn msb_byte_index(&self) -> usize {
        self.msb_byte_index
    }

    pub const fn lsb_source_byte_index(&self) -> usize {
        self.lsb_source_byte_index
    }

    pub const fn lsb_bit_count(&self) -> u8 {
        self.lsb_bit_count
    }

    pub const fn lsb_bit_offset(&self) -> u8 {
        self.lsb_bit_offset
    }

    /// Bits in the reconstructed value
    pub const fn width(&self) -> u8 {
        8 + self.lsb_bit_count
    }

    /// Largest value this field can hold
    pub const fn max_value(&self) -> u16 {
        ((1u32 << self.width()) - 1) as u16
    }

    /// Status byte bits owned by this field
    pub const fn lsb_mask(&self) -> u8 {
        (((1u16 << self.lsb_bit_count) - 1) as u8) << self.lsb_bit_offset
    }

    pub const fn fits(&self, frame_size: usize) -> bool {
        self.msb_byte_index < frame_size && self.lsb_source_byte_index < frame_size
    }

    #[inline]
    pub const fn extract<const N: usize>(&self, frame: &RawFrame<N>) -> u16 {
        let bytes = frame.bytes();
        let msb = bytes[self.msb_byte_index] as u16;
        let low_mask = (1u16 << self.lsb_bit_count) - 1;
        let lsb = ((bytes[self.lsb_source_byte_index] as u16) >> self.lsb_bit_offset) & low_mask;

        (msb << self.lsb_bit_count) | lsb
    }
}

/// Location of a named field inside a frame
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldMap {
    Byte(ByteField),
    Bit(BitField),
    Split(SplitByteField),
}

impl FieldMap {
    pub const fn fits(&self, frame_size: usize) -> bool {
        match self {
            Self::Byte(f) => f.fits(frame_size),
            Self::Bit(f) => f.fits(frame_size),
            Self::Split(f) => f.fits(frame_size),
        }
    }

    /// Bit flags read as 0 or 1
    #[inline]
    pub const fn extract<const N: usize>(&self, frame: &RawFrame<N>) -> u16 {
        match self {
            Self::Byte(f) => f.extract(frame) as u16,
            Self::Bit(f) => f.extract(frame) as u16,
            Self::Split(f) => f.extract(frame),
        }
    }
}

impl From<ByteField> for FieldMap {
    fn from(value: ByteField) -> Self {
        Self::Byte(value)
    }
}

impl From<BitField> for FieldMap {
    fn from(value: BitField) -> Self {
        Self::Bit(value)
    }
}

impl From<SplitByteField> for FieldMap {
    fn from(value: SplitByteField) -> Self {
        Self::Split(value)
    }
}

/// Whether every map fits a frame of `frame_size` bytes, for `const` assertions
pub const fn all_fit(maps: &[FieldMap], frame_size: usize) -> bool {
    let mut i = 0;

    while i < maps.len() {
        if !maps[i].fits(frame_size) {
            return false;
        }
        i += 1;
    }

    true
}
