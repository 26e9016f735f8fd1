use core::ops::Index;

/// One device read, all zeros until filled
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> RawFrame<N> {
    pub const SIZE: usize = N;

    pub const fn new(bytes: [u8; N]) -> Self {
        Self { bytes }
    }

    pub const fn zeroed() -> Self {
        Self { bytes: [0; N] }
    }

    pub const fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }
}

impl<const N: usize> Default for RawFrame<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> From<[u8; N]> for RawFrame<N> {
    fn from(value: [u8; N]) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> Index<usize> for RawFrame<N> {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bytes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frame_is_zeroed() {
        let frame = RawFrame::<6>::default();
        assert_eq!(frame.bytes(), &[0; 6]);
        assert_eq!(RawFrame::<6>::SIZE, 6);
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let frame: RawFrame<2> = [0xAA, 0x55].into();
        assert_eq!(frame.get(1), Some(0x55));
        assert_eq!(frame.get(2), None);
        assert_eq!(frame[0], 0xAA);
    }
}
