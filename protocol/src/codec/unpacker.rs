//! Cursor-based reader for packed data, the inverse of [`super::Packer`].

use super::error::CodecError;
use crate::config::MAX_VARINT_LEN;

/// A value that can be read back from its packed representation.
pub trait Unpack: Sized {
    /// Reads one value from `unpacker`, advancing it.
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError>;
}

/// Reads packed values from a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Unpacker<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Unpacker<'a> {
    /// Starts reading at the beginning of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(CodecError::UnexpectedEof { needed, remaining });
        }
        let slice = &self.input[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads one byte.
    pub fn unpack_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Reads a little-endian `u16`.
    pub fn unpack_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian `u32`.
    pub fn unpack_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// Reads a little-endian `u64`.
    pub fn unpack_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    /// Reads an unsigned LEB128 varint of at most ten bytes.
    ///
    /// Only the minimal encoding is accepted: a final group of zero after a
    /// continuation byte is [`CodecError::NonCanonicalVarInt`].
    pub fn unpack_varint(&mut self) -> Result<u64, CodecError> {
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.unpack_u8()?;
            if i > 0 && byte == 0 {
                return Err(CodecError::NonCanonicalVarInt);
            }
            let group = u64::from(byte & 0x7f);
            let shift = 7 * i as u32;
            // The tenth group only has room for the top bit.
            if shift == 63 && group > 1 {
                return Err(CodecError::VarIntOverflow);
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(CodecError::VarIntOverflow)
    }

    /// Reads a varint that must fit in a `u32`.
    pub fn unpack_varuint32(&mut self) -> Result<u32, CodecError> {
        let value = self.unpack_varint()?;
        u32::try_from(value).map_err(|_| CodecError::VarIntOverflow)
    }

    fn unpack_len(&mut self) -> Result<usize, CodecError> {
        let len = self.unpack_varint()?;
        usize::try_from(len).map_err(|_| CodecError::VarIntOverflow)
    }

    /// Reads a varint-length-prefixed byte string.
    pub fn unpack_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.unpack_len()?;
        Ok(self.take(len)?.to_vec())
    }

    /// Reads a varint-length-prefixed UTF-8 string.
    pub fn unpack_string(&mut self) -> Result<String, CodecError> {
        let bytes = self.unpack_bytes()?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Reads `varint(count)` followed by `count` values.
    pub fn unpack_array<T: Unpack>(&mut self) -> Result<Vec<T>, CodecError> {
        let count = self.unpack_len()?;
        // Every element takes at least one byte, so a count larger than the
        // remaining input is bounded before allocating.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(T::unpack(self)?);
        }
        Ok(items)
    }

    /// Fails with [`CodecError::TrailingBytes`] unless all input was consumed.
    pub fn finish(self) -> Result<(), CodecError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(CodecError::TrailingBytes(n)),
        }
    }
}

impl Unpack for String {
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        unpacker.unpack_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Packer;

    #[test]
    fn reads_fixed_width_little_endian() {
        let bytes = [0xab, 0x02, 0x01, 0x04, 0x03, 0x02, 0x01];
        let mut u = Unpacker::new(&bytes);
        assert_eq!(u.unpack_u8().unwrap(), 0xab);
        assert_eq!(u.unpack_u16().unwrap(), 0x0102);
        assert_eq!(u.unpack_u32().unwrap(), 0x0102_0304);
        u.finish().unwrap();
    }

    #[test]
    fn reads_varints_written_by_packer() {
        let values = [0u64, 127, 128, 300, 1 << 35, u64::MAX];
        let mut packer = Packer::new();
        for v in values {
            packer.pack_varint(v);
        }
        let bytes = packer.into_bytes();
        let mut u = Unpacker::new(&bytes);
        for v in values {
            assert_eq!(u.unpack_varint().unwrap(), v);
        }
        assert_eq!(u.remaining(), 0);
    }

    #[test]
    fn varint_overflow_is_rejected() {
        let bytes = [0xff; 11];
        let err = Unpacker::new(&bytes).unpack_varint().unwrap_err();
        assert!(matches!(err, CodecError::VarIntOverflow));

        let mut tenth_too_big = [0xff; 10];
        tenth_too_big[9] = 0x02;
        let err = Unpacker::new(&tenth_too_big).unpack_varint().unwrap_err();
        assert!(matches!(err, CodecError::VarIntOverflow));
    }

    #[test]
    fn varuint32_rejects_wider_values() {
        let mut packer = Packer::new();
        packer.pack_varint(u64::from(u32::MAX));
        packer.pack_varint((1 << 32) + 5);
        let bytes = packer.into_bytes();
        let mut u = Unpacker::new(&bytes);
        assert_eq!(u.unpack_varuint32().unwrap(), u32::MAX);
        assert!(matches!(
            u.unpack_varuint32(),
            Err(CodecError::VarIntOverflow)
        ));
    }

    #[test]
    fn redundant_varint_groups_are_rejected() {
        for bytes in [&[0x80, 0x00][..], &[0x81, 0x80, 0x00], &[0xff, 0x00]] {
            let err = Unpacker::new(bytes).unpack_varint().unwrap_err();
            assert!(
                matches!(err, CodecError::NonCanonicalVarInt),
                "{bytes:02x?} should be rejected"
            );
        }
        // A lone zero is the canonical encoding of 0.
        assert_eq!(Unpacker::new(&[0x00]).unpack_varint().unwrap(), 0);
    }

    #[test]
    fn short_input_reports_eof() {
        let bytes = [0x01, 0x02];
        let err = Unpacker::new(&bytes).unpack_u32().unwrap_err();
        match err {
            CodecError::UnexpectedEof { needed, remaining } => {
                assert_eq!(needed, 4);
                assert_eq!(remaining, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bytes_length_past_end_is_eof() {
        let bytes = [0x05, 0x01, 0x02];
        let err = Unpacker::new(&bytes).unpack_bytes().unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof { .. }));
    }

    #[test]
    fn invalid_utf8_string_is_rejected() {
        let bytes = [0x02, 0xc3, 0x28];
        let err = Unpacker::new(&bytes).unpack_string().unwrap_err();
        assert!(matches!(err, CodecError::InvalidUtf8(_)));
    }

    #[test]
    fn huge_array_count_fails_without_allocating() {
        let mut packer = Packer::new();
        packer.pack_varint(u32::MAX as u64);
        let bytes = packer.into_bytes();
        let err = Unpacker::new(&bytes).unpack_array::<String>().unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedEof { .. }));
    }

    #[test]
    fn finish_reports_trailing_bytes() {
        let bytes = [0x00, 0x01, 0x02];
        let mut u = Unpacker::new(&bytes);
        u.unpack_u8().unwrap();
        assert!(matches!(u.finish(), Err(CodecError::TrailingBytes(2))));
    }
}
