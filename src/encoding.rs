use bytes::{
    Bytes,
    BytesMut,
};

use crate::errs::DecodeError;

/// A shared trait for encoding and decoding elements in and out of binary
/// formats. The encoded form does not need to be self-delimiting; the
/// container records each element's length.
pub trait BinaryMarshaller: Sized {
    /// Encode the element into a byte array.
    fn encode(&self) -> Bytes;
    /// Decode a byte array produced by [`encode`](Self::encode).
    fn decode(src: Bytes) -> Result<Self, DecodeError>;
    /// The size of the encoded element in bytes.
    fn encoded_size(&self) -> usize;
}

fn fixed<const N: usize>(src: &Bytes) -> Result<[u8; N], DecodeError> {
    src[..].try_into().map_err(|_| {
        DecodeError::Value(format!("expected {} bytes, found {}", N, src.len()))
    })
}

macro_rules! int_marshaller {
    ($($t:ty),* $(,)?) => {
        $(
            impl BinaryMarshaller for $t {
                #[inline]
                fn encode(&self) -> Bytes {
                    Bytes::copy_from_slice(&self.to_le_bytes())
                }

                #[inline]
                fn decode(src: Bytes) -> Result<Self, DecodeError> {
                    Ok(<$t>::from_le_bytes(fixed(&src)?))
                }

                #[inline]
                fn encoded_size(&self) -> usize {
                    size_of::<$t>()
                }
            }
        )*
    };
}

int_marshaller!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

// usize is pinned to 8 bytes so images move between targets
impl BinaryMarshaller for usize {
    fn encode(&self) -> Bytes {
        (*self as u64).encode()
    }

    fn decode(src: Bytes) -> Result<Self, DecodeError> {
        let v = u64::decode(src)?;
        usize::try_from(v).map_err(|_| DecodeError::Value(format!("{} overflows usize", v)))
    }

    fn encoded_size(&self) -> usize {
        size_of::<u64>()
    }
}

impl BinaryMarshaller for bool {
    fn encode(&self) -> Bytes {
        Bytes::copy_from_slice(&[*self as u8])
    }

    fn decode(src: Bytes) -> Result<Self, DecodeError> {
        match fixed::<1>(&src)? {
            | [0] => Ok(false),
            | [1] => Ok(true),
            | [b] => Err(DecodeError::Value(format!("invalid bool byte {}", b))),
        }
    }

    fn encoded_size(&self) -> usize {
        1
    }
}

impl BinaryMarshaller for char {
    fn encode(&self) -> Bytes {
        (*self as u32).encode()
    }

    fn decode(src: Bytes) -> Result<Self, DecodeError> {
        let v = u32::decode(src)?;
        char::from_u32(v).ok_or_else(|| DecodeError::Value(format!("invalid char {:#x}", v)))
    }

    fn encoded_size(&self) -> usize {
        size_of::<u32>()
    }
}

impl BinaryMarshaller for String {
    fn encode(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    fn decode(src: Bytes) -> Result<Self, DecodeError> {
        String::from_utf8(src.to_vec()).map_err(|e| DecodeError::Value(e.to_string()))
    }

    fn encoded_size(&self) -> usize {
        self.len()
    }
}

impl BinaryMarshaller for Vec<u8> {
    fn encode(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }

    fn decode(src: Bytes) -> Result<Self, DecodeError> {
        Ok(src.to_vec())
    }

    fn encoded_size(&self) -> usize {
        self.len()
    }
}

impl BinaryMarshaller for Bytes {
    fn encode(&self) -> Bytes {
        self.clone()
    }

    fn decode(src: Bytes) -> Result<Self, DecodeError> {
        Ok(src)
    }

    fn encoded_size(&self) -> usize {
        self.len()
    }
}

impl BinaryMarshaller for BytesMut {
    fn encode(&self) -> Bytes {
        Bytes::copy_from_slice(self)
    }

    fn decode(src: Bytes) -> Result<Self, DecodeError> {
        Ok(BytesMut::from(&src[..]))
    }

    fn encoded_size(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::BinaryMarshaller;
    use crate::errs::DecodeError;

    #[test]
    fn test_ints_are_little_endian() {
        assert_eq!(&0x0102u16.encode()[..], &[0x02, 0x01]);
        assert_eq!((-1i32).encoded_size(), 4);
        assert_eq!(i64::decode((-42i64).encode()), Ok(-42));
    }

    #[test]
    fn test_wrong_width() {
        assert!(matches!(
            u32::decode(Bytes::from_static(&[1, 2])),
            Err(DecodeError::Value(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(String::decode(Bytes::from_static(&[0xff, 0xfe])).is_err());
    }

    #[test]
    fn test_invalid_bool_and_char() {
        assert!(bool::decode(Bytes::from_static(&[2])).is_err());
        assert!(char::decode(0xD800u32.encode()).is_err());
        assert_eq!(char::decode('λ'.encode()), Ok('λ'));
    }
}
