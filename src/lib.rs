//! # neuranet
//!
//! Tensor type for the neuranet neural-network library.
//!
//! - [`Tensor`]: dense array of rank two or more with an optional gradient buffer
//! - [`TensorInput`]: the kinds of value a tensor can be built from
//! - [`TensorOptions`]: construction settings
//! - [`TensorData`]: serde representation
//! - [`DType`] / [`Element`]: supported element types
//!
//! ```
//! use neuranet::{Error, Tensor};
//!
//! let w = Tensor::<f64>::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], true)?;
//! assert_eq!(w.grad().unwrap().shape(), &[2, 2]);
//!
//! let err = Tensor::<f64>::new(42.0f64, false).unwrap_err();
//! assert!(matches!(err, Error::InvalidInputType { .. }));
//! # Ok::<(), neuranet::Error>(())
//! ```

mod autograd;
pub mod data;
pub mod dtype;
pub mod error;
pub mod input;
pub mod options;
pub mod tensor;

pub use data::TensorData;
pub use dtype::{DType, Element};
pub use error::{Error, Result};
pub use input::{Nested, TensorInput};
pub use options::TensorOptions;
pub use tensor::Tensor;
