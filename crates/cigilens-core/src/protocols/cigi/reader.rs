use std::ops::Range;

/// Bounds-checked byte access over one framed sub-packet.
///
/// Reads return `None` when the declared size leaves the field outside the
/// buffer. A short read here is field-level data (the null-value rule
/// records it), not a parse failure, so a packet that declares too small a
/// size still decodes as far as its bytes go.
pub struct CigiReader<'a> {
    payload: &'a [u8],
}

impl<'a> CigiReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.payload.get(offset).copied()
    }

    pub fn read_i8(&self, offset: usize) -> Option<i8> {
        self.read_u8(offset).map(|v| v as i8)
    }

    pub fn read_u16_be(&self, offset: usize) -> Option<u16> {
        self.read_array::<2>(offset).map(u16::from_be_bytes)
    }

    pub fn read_u32_be(&self, offset: usize) -> Option<u32> {
        self.read_array::<4>(offset).map(u32::from_be_bytes)
    }

    pub fn read_f32_be(&self, offset: usize) -> Option<f32> {
        self.read_array::<4>(offset).map(f32::from_be_bytes)
    }

    pub fn read_f64_be(&self, offset: usize) -> Option<f64> {
        self.read_array::<8>(offset).map(f64::from_be_bytes)
    }

    /// Extract `width` bits starting at `lsb` from the byte at `offset`.
    pub fn read_bits(&self, offset: usize, lsb: u8, width: u8) -> Option<u8> {
        let byte = self.read_u8(offset)?;
        let mask = ((1u16 << width) - 1) as u8;
        Some((byte >> lsb) & mask)
    }

    pub fn read_slice(&self, range: Range<usize>) -> Option<&'a [u8]> {
        self.payload.get(range)
    }

    pub fn read_tail(&self, offset: usize) -> Option<&'a [u8]> {
        self.payload.get(offset..)
    }

    fn read_array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        let end = offset.checked_add(N)?;
        let bytes = self.payload.get(offset..end)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Some(array)
    }
}

#[cfg(test)]
mod tests {
    use super::CigiReader;

    #[test]
    fn reads_are_big_endian() {
        let payload = [0x01, 0x18, 0x12, 0x34, 0x00, 0x00, 0x00, 0x05];
        let reader = CigiReader::new(&payload);
        assert_eq!(reader.read_u16_be(2), Some(0x1234));
        assert_eq!(reader.read_u32_be(4), Some(5));
    }

    #[test]
    fn reads_past_the_end_are_none() {
        let payload = [0u8; 8];
        let reader = CigiReader::new(&payload);
        assert_eq!(reader.read_u8(8), None);
        assert_eq!(reader.read_u32_be(6), None);
        assert_eq!(reader.read_f64_be(4), None);
        assert_eq!(reader.read_slice(4..12), None);
    }

    #[test]
    fn bit_extraction() {
        // 0b0010_0101: two-bit field at lsb 0 = 1, flag at lsb 2 = 1,
        // four-bit field at lsb 4 = 2.
        let payload = [0, 0, 0, 0, 0b0010_0101, 0, 0, 0];
        let reader = CigiReader::new(&payload);
        assert_eq!(reader.read_bits(4, 0, 2), Some(1));
        assert_eq!(reader.read_bits(4, 2, 1), Some(1));
        assert_eq!(reader.read_bits(4, 3, 1), Some(0));
        assert_eq!(reader.read_bits(4, 4, 4), Some(2));
    }

    #[test]
    fn tail_read() {
        let payload = [201, 12, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        let reader = CigiReader::new(&payload);
        assert_eq!(reader.read_tail(4), Some(&payload[4..]));
        assert_eq!(reader.read_tail(13), None);
    }
}
