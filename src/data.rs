//! Serialisable form of a tensor.
//!
//! Only values, shape and the tracking flag are stored. Loading goes back
//! through the constructor, so a tracked tensor comes back with a fresh zero
//! gradient and rank-1 payloads are promoted like any other input.
//!
//! ```
//! use neuranet::{Tensor, TensorData};
//!
//! let t = Tensor::<f32>::new(vec![1.0, 2.0, 3.0], true).unwrap();
//! let data = t.to_tensor_data();
//! assert_eq!(data.shape, vec![1, 3]);
//! let back = Tensor::from_tensor_data(data).unwrap();
//! assert_eq!(back, t);
//! ```

use ndarray::{ArrayD, IxDyn};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::tensor::Tensor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorData<A> {
    pub shape: Vec<usize>,
    pub dtype: DType,
    /// Elements in row-major order.
    pub data: Vec<A>,
    #[serde(default)]
    pub requires_grad: bool,
}

impl<A: Element> Tensor<A> {
    pub fn to_tensor_data(&self) -> TensorData<A> {
        TensorData {
            shape: self.shape().to_vec(),
            dtype: A::DTYPE,
            data: self.data().iter().copied().collect(),
            requires_grad: self.requires_grad(),
        }
    }

    pub fn from_tensor_data(data: TensorData<A>) -> Result<Self> {
        if data.dtype != A::DTYPE {
            return Err(Error::construction(format!(
                "dtype mismatch: payload is {}, tensor is {}",
                data.dtype,
                A::DTYPE
            )));
        }
        let array = ArrayD::from_shape_vec(IxDyn(&data.shape), data.data)
            .map_err(|e| Error::construction(format!("shape {:?}: {}", data.shape, e)))?;
        Tensor::new(array, data.requires_grad)
    }
}

impl<A: Element + Serialize> Serialize for Tensor<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_tensor_data().serialize(serializer)
    }
}

impl<'de, A: Element + Deserialize<'de>> Deserialize<'de> for Tensor<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let data = TensorData::<A>::deserialize(deserializer)?;
        Tensor::from_tensor_data(data).map_err(D::Error::custom)
    }
}
