use byteorder::{ByteOrder, LittleEndian};

/// A value with a fixed little-endian layout in guest linear memory.
///
/// `write_to` must fill all `SIZE` bytes, zeroing any padding, so that no
/// stale guest bytes survive inside a packed struct.
pub trait ValueType: Sized {
    /// Size in bytes of the guest layout, padding included.
    const SIZE: usize;

    /// Packs `self` into `bytes`; `bytes.len() == Self::SIZE`.
    fn write_to(&self, bytes: &mut [u8]);

    /// Unpacks a value from `bytes`; `bytes.len() == Self::SIZE`.
    fn read_from(bytes: &[u8]) -> Self;
}

impl ValueType for u8 {
    const SIZE: usize = 1;

    fn write_to(&self, bytes: &mut [u8]) {
        bytes[0] = *self;
    }

    fn read_from(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

macro_rules! impl_value_type_for_int {
    ($($ty:ty => $size:expr, $write:ident, $read:ident;)*) => {
        $(
            impl ValueType for $ty {
                const SIZE: usize = $size;

                fn write_to(&self, bytes: &mut [u8]) {
                    LittleEndian::$write(bytes, *self)
                }

                fn read_from(bytes: &[u8]) -> Self {
                    LittleEndian::$read(bytes)
                }
            }
        )*
    };
}

impl_value_type_for_int! {
    u16 => 2, write_u16, read_u16;
    u32 => 4, write_u32, read_u32;
    u64 => 8, write_u64, read_u64;
    i64 => 8, write_i64, read_i64;
}
