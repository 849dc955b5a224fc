//! 96-bit scaled decimals.
//!
//! The proxy carries four 32-bit words: `i0`..`i2` hold the magnitude from
//! least to most significant, `i3` holds the flags (scale in bits 16..24,
//! sign in bit 31). All other flag bits must be zero.

use super::{ExtendedScalar, ScalarValue};
use crate::error::{Error, FormatError, Result};
use crate::proto;
use crate::registry::{ExtendedType, Primitive};
use rust_decimal::Decimal;

const SCALE_SHIFT: u32 = 16;
const SCALE_MASK: u32 = 0x00FF_0000;
const SIGN_MASK: u32 = 0x8000_0000;
const MAX_SCALE: u32 = 28;

impl ExtendedScalar for Decimal {
    const TYPE: ExtendedType = ExtendedType::Decimal;

    type Proxy = proto::Decimal;

    fn zero() -> Self {
        Decimal::ZERO
    }

    fn to_proxy(&self) -> Self::Proxy {
        let magnitude = self.mantissa().unsigned_abs();
        let mut flags = self.scale() << SCALE_SHIFT;
        if self.is_sign_negative() {
            flags |= SIGN_MASK;
        }
        proto::Decimal {
            i0: magnitude as u32 as i32,
            i1: (magnitude >> 32) as u32 as i32,
            i2: (magnitude >> 64) as u32 as i32,
            i3: flags as i32,
        }
    }

    fn from_proxy(proxy: &Self::Proxy) -> Result<Self> {
        let flags = proxy.i3 as u32;
        if flags & !(SCALE_MASK | SIGN_MASK) != 0 {
            return Err(Error::invalid_shape(
                Self::TYPE,
                format!("reserved flag bits set in {flags:#010x}"),
            ));
        }
        let scale = (flags & SCALE_MASK) >> SCALE_SHIFT;
        if scale > MAX_SCALE {
            return Err(Error::out_of_range(
                Self::TYPE,
                format!("scale {scale} exceeds {MAX_SCALE}"),
            ));
        }
        Ok(Decimal::from_parts(
            proxy.i0 as u32,
            proxy.i1 as u32,
            proxy.i2 as u32,
            flags & SIGN_MASK != 0,
            scale,
        ))
    }

    fn decompose(&self) -> Vec<Primitive> {
        let proxy = self.to_proxy();
        [proxy.i0, proxy.i1, proxy.i2, proxy.i3]
            .into_iter()
            .map(Primitive::Int32)
            .collect()
    }

    fn recompose(primitives: &[Primitive]) -> Result<Self> {
        match primitives {
            [Primitive::Int32(i0), Primitive::Int32(i1), Primitive::Int32(i2), Primitive::Int32(i3)] => {
                Self::from_proxy(&proto::Decimal {
                    i0: *i0,
                    i1: *i1,
                    i2: *i2,
                    i3: *i3,
                })
            }
            _ => Err(Error::invalid_shape(Self::TYPE, "expected four int32 values")),
        }
    }

    fn to_canonical_text(&self) -> String {
        self.to_string()
    }

    fn parse_canonical_text(text: &str) -> std::result::Result<Self, FormatError> {
        let trimmed = text.trim();
        Decimal::from_str_exact(trimmed)
            .or_else(|e| {
                if trimmed.contains(['e', 'E']) {
                    Decimal::from_scientific(trimmed)
                } else {
                    Err(e)
                }
            })
            .map_err(|e| FormatError::new(text, format!("not a valid decimal ({e})")))
    }

    fn into_value(self) -> ScalarValue {
        ScalarValue::Decimal(self)
    }
}
