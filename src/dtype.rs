use std::fmt;

use num_traits::{CheckedAdd, Zero};
use serde::{Deserialize, Serialize};

/// Element type tag carried by every tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    F32,
    F64,
    I32,
    I64,
    U8,
    U32,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::U8 => 1,
            DType::F32 | DType::I32 | DType::U32 => 4,
            DType::F64 | DType::I64 => 8,
        }
    }

    /// Whether this is a floating-point type. Integer gradients are
    /// accumulated with overflow checks instead of IEEE arithmetic.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U32 => "u32",
        };
        f.write_str(s)
    }
}

/// Rust scalar types a [`Tensor`](crate::Tensor) can hold.
pub trait Element:
    Copy + Zero + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    const DTYPE: DType;

    /// Sum used for gradient accumulation; `None` when an integer sum overflows.
    fn accumulate(self, rhs: Self) -> Option<Self>;
}

macro_rules! float_element {
    ($ty:ty, $dtype:ident) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            fn accumulate(self, rhs: Self) -> Option<Self> {
                Some(self + rhs)
            }
        }
    };
}

macro_rules! int_element {
    ($ty:ty, $dtype:ident) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            fn accumulate(self, rhs: Self) -> Option<Self> {
                CheckedAdd::checked_add(&self, &rhs)
            }
        }
    };
}

float_element!(f32, F32);
float_element!(f64, F64);
int_element!(i32, I32);
int_element!(i64, I64);
int_element!(u8, U8);
int_element!(u32, U32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_tags() {
        assert_eq!(<f32 as Element>::DTYPE, DType::F32);
        assert_eq!(<i64 as Element>::DTYPE, DType::I64);
        assert_eq!(DType::U8.size_in_bytes(), 1);
        assert!(DType::F64.is_float());
        assert!(!DType::I32.is_float());
        assert_eq!(DType::U32.to_string(), "u32");
    }

    #[test]
    fn test_accumulate_checks_integer_overflow() {
        assert_eq!(200u8.accumulate(55), Some(255));
        assert_eq!(200u8.accumulate(200), None);
        assert_eq!(i32::MIN.accumulate(-1), None);
        assert_eq!(f32::MAX.accumulate(f32::MAX), Some(f32::INFINITY));
    }
}
