// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enum and flag codec support.
//!
//! Enums are carried on the wire as their declared integer representation,
//! nothing more. [`fbe_enum!`] declares the enum together with the
//! repr conversions and all four codec impls, so schema enums stay one
//! declaration per type. Unknown discriminants are a decode error.
//!
//! Flag types are declared with the `bitflags` crate as usual;
//! [`impl_fbe_flags!`] then wires the codec impls on top of
//! `bits()`/`from_bits_retain()`. Unknown bits are retained on decode,
//! so a peer with a newer flag set round-trips losslessly.

/// Declare a wire enum with an explicit integer representation.
///
/// Generates the enum itself, `from_repr`/`to_repr` conversions, and the
/// codec impls for both layouts, all delegating to the repr type.
///
/// ```
/// use fbe::fbe_enum;
///
/// fbe_enum! {
///     /// Order side.
///     pub enum Side: u8 {
///         Buy = 0,
///         Sell = 1,
///     }
/// }
///
/// assert_eq!(Side::from_repr(1), Some(Side::Sell));
/// assert_eq!(Side::from_repr(7), None);
/// ```
#[macro_export]
macro_rules! fbe_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ty {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr($repr)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Map a wire discriminant back to a variant.
            pub fn from_repr(value: $repr) -> Option<Self> {
                match value {
                    $(v if v == $value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The wire discriminant of this variant.
            pub fn to_repr(self) -> $repr {
                self as $repr
            }
        }

        impl $crate::codec::FinalEncode for $name {
            const STATIC_SIZE: usize =
                <$repr as $crate::codec::FinalEncode>::STATIC_SIZE;

            fn encode_final(
                &self,
                buf: &mut $crate::buffer::WriteBuffer,
                offset: usize,
            ) -> $crate::error::Result<usize> {
                self.to_repr().encode_final(buf, offset)
            }
        }

        impl $crate::codec::FinalDecode for $name {
            const STATIC_SIZE: usize =
                <$repr as $crate::codec::FinalDecode>::STATIC_SIZE;

            fn decode_final(
                buf: &$crate::buffer::ReadBuffer,
                offset: usize,
            ) -> $crate::error::Result<(Self, usize)> {
                let (raw, used) =
                    <$repr as $crate::codec::FinalDecode>::decode_final(buf, offset)?;
                match Self::from_repr(raw) {
                    Some(value) => Ok((value, used)),
                    None => Err($crate::error::Error::Format {
                        reason: format!(
                            "unknown {} discriminant {}",
                            stringify!($name),
                            raw
                        ),
                    }),
                }
            }
        }

        impl $crate::codec::StandardEncode for $name {
            const FIXED_SIZE: usize =
                <$repr as $crate::codec::StandardEncode>::FIXED_SIZE;

            fn encode_standard(
                &self,
                buf: &mut $crate::buffer::WriteBuffer,
                offset: usize,
            ) -> $crate::error::Result<usize> {
                self.to_repr().encode_standard(buf, offset)
            }
        }

        impl $crate::codec::StandardDecode for $name {
            const FIXED_SIZE: usize =
                <$repr as $crate::codec::StandardDecode>::FIXED_SIZE;

            fn decode_standard(
                buf: &$crate::buffer::ReadBuffer,
                offset: usize,
            ) -> $crate::error::Result<(Self, usize)> {
                let (raw, used) =
                    <$repr as $crate::codec::StandardDecode>::decode_standard(buf, offset)?;
                match Self::from_repr(raw) {
                    Some(value) => Ok((value, used)),
                    None => Err($crate::error::Error::Format {
                        reason: format!(
                            "unknown {} discriminant {}",
                            stringify!($name),
                            raw
                        ),
                    }),
                }
            }
        }
    };
}

/// Wire the codec impls onto a `bitflags`-declared type.
///
/// The type encodes as its underlying bits; decode uses
/// `from_bits_retain`, so bits this build does not know about survive a
/// round trip instead of being silently dropped.
#[macro_export]
macro_rules! impl_fbe_flags {
    ($name:ty, $repr:ty) => {
        impl $crate::codec::FinalEncode for $name {
            const STATIC_SIZE: usize =
                <$repr as $crate::codec::FinalEncode>::STATIC_SIZE;

            fn encode_final(
                &self,
                buf: &mut $crate::buffer::WriteBuffer,
                offset: usize,
            ) -> $crate::error::Result<usize> {
                self.bits().encode_final(buf, offset)
            }
        }

        impl $crate::codec::FinalDecode for $name {
            const STATIC_SIZE: usize =
                <$repr as $crate::codec::FinalDecode>::STATIC_SIZE;

            fn decode_final(
                buf: &$crate::buffer::ReadBuffer,
                offset: usize,
            ) -> $crate::error::Result<(Self, usize)> {
                let (raw, used) =
                    <$repr as $crate::codec::FinalDecode>::decode_final(buf, offset)?;
                Ok((<$name>::from_bits_retain(raw), used))
            }
        }

        impl $crate::codec::StandardEncode for $name {
            const FIXED_SIZE: usize =
                <$repr as $crate::codec::StandardEncode>::FIXED_SIZE;

            fn encode_standard(
                &self,
                buf: &mut $crate::buffer::WriteBuffer,
                offset: usize,
            ) -> $crate::error::Result<usize> {
                self.bits().encode_standard(buf, offset)
            }
        }

        impl $crate::codec::StandardDecode for $name {
            const FIXED_SIZE: usize =
                <$repr as $crate::codec::StandardDecode>::FIXED_SIZE;

            fn decode_standard(
                buf: &$crate::buffer::ReadBuffer,
                offset: usize,
            ) -> $crate::error::Result<(Self, usize)> {
                let (raw, used) =
                    <$repr as $crate::codec::StandardDecode>::decode_standard(buf, offset)?;
                Ok((<$name>::from_bits_retain(raw), used))
            }
        }
    };
}
