use std::fmt;
use std::ops::Index;

use ndarray::{ArrayD, ArrayViewD, IxDyn};

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::input::TensorInput;
use crate::options::TensorOptions;

/// A dense array of rank two or more, optionally tracking a gradient.
///
/// Rank-1 input becomes a single row, so `[1, 2, 3]` has shape `(1, 3)`:
///
/// ```
/// use neuranet::Tensor;
///
/// let a = Tensor::<i32>::new(vec![1, 2, 3], false).unwrap();
/// assert_eq!(a.shape(), &[1, 3]);
/// assert_eq!(a.transpose().shape(), &[3, 1]);
/// assert_eq!(a.to_string(), "Tensor([[1, 2, 3]])");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<A: Element> {
    data: ArrayD<A>,
    requires_grad: bool,
    grad: Option<Box<Tensor<A>>>,
}

impl<A: Element> Tensor<A> {
    /// Build a tensor from a sequence, dense array or another tensor.
    ///
    /// Fails with [`Error::InvalidInputType`] for any other kind of input.
    /// When `requires_grad` is set, a zero gradient of the same shape is attached.
    pub fn new(input: impl Into<TensorInput<A>>, requires_grad: bool) -> Result<Self> {
        let input = input.into();
        log::trace!("building {} tensor from {}", A::DTYPE, input.kind());
        let data = input.into_array()?;
        Self::from_array(data, requires_grad)
    }

    /// Same as [`Tensor::new`] with gradient tracking off.
    pub fn from_input(input: impl Into<TensorInput<A>>) -> Result<Self> {
        Self::new(input, false)
    }

    pub fn with_options(input: impl Into<TensorInput<A>>, options: &TensorOptions) -> Result<Self> {
        Self::new(input, options.requires_grad)
    }

    /// All-zero untracked tensor. Shapes of rank below two are promoted the
    /// same way constructor input is.
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::from_array(ArrayD::zeros(IxDyn(shape)), false)
    }

    pub(crate) fn from_array(data: ArrayD<A>, requires_grad: bool) -> Result<Self> {
        let data = promote_rank(data)?;
        let grad = if requires_grad {
            log::debug!(
                "allocating zero gradient of shape {:?} ({} bytes)",
                data.shape(),
                data.len() * A::DTYPE.size_in_bytes()
            );
            if !A::DTYPE.is_float() {
                log::debug!("{} gradients accumulate with overflow checks", A::DTYPE);
            }
            Some(Box::new(Tensor::untracked(ArrayD::zeros(data.raw_dim()))))
        } else {
            None
        };
        Ok(Tensor {
            data,
            requires_grad,
            grad,
        })
    }

    /// Wrap a buffer that already has rank >= 2.
    fn untracked(data: ArrayD<A>) -> Self {
        debug_assert!(data.ndim() >= 2);
        Tensor {
            data,
            requires_grad: false,
            grad: None,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dtype(&self) -> DType {
        A::DTYPE
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn grad(&self) -> Option<&Tensor<A>> {
        self.grad.as_deref()
    }

    pub(crate) fn grad_mut(&mut self) -> Option<&mut Tensor<A>> {
        self.grad.as_deref_mut()
    }

    pub fn data(&self) -> ArrayViewD<'_, A> {
        self.data.view()
    }

    pub(crate) fn data_mut(&mut self) -> &mut ArrayD<A> {
        &mut self.data
    }

    /// Consume the tensor, dropping any gradient.
    pub fn into_data(self) -> ArrayD<A> {
        self.data
    }

    pub fn get(&self, index: &[usize]) -> Option<&A> {
        self.data.get(index)
    }

    /// Transposed view of the buffer (axes reversed).
    pub fn t(&self) -> ArrayViewD<'_, A> {
        self.data.t()
    }

    /// Owned transpose. The result does not track gradients.
    pub fn transpose(&self) -> Tensor<A> {
        Tensor::untracked(self.data.t().to_owned())
    }
}

/// Rank 1 becomes `(1, n)`; rank 0 is treated as length 1 and becomes `(1, 1)`.
fn promote_rank<A: Element>(data: ArrayD<A>) -> Result<ArrayD<A>> {
    let rows = match data.ndim() {
        0 | 1 => data.len(),
        _ => return Ok(data),
    };
    log::trace!("promoting rank-{} input to shape [1, {}]", data.ndim(), rows);
    let data = if data.is_standard_layout() {
        data
    } else {
        data.as_standard_layout().into_owned()
    };
    data.into_shape(IxDyn(&[1, rows]))
        .map_err(|e| Error::construction(e.to_string()))
}

impl<A: Element> TryFrom<TensorInput<A>> for Tensor<A> {
    type Error = Error;

    fn try_from(input: TensorInput<A>) -> Result<Self> {
        Tensor::from_input(input)
    }
}

impl<A: Element> Index<&[usize]> for Tensor<A> {
    type Output = A;

    fn index(&self, index: &[usize]) -> &A {
        &self.data[index]
    }
}

impl<A: Element> fmt::Display for Tensor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({})", self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, array, Array3, ShapeBuilder};

    #[test]
    fn test_row_promotion() {
        let t = Tensor::<i32>::new(vec![1, 2, 3], false).unwrap();
        assert_eq!(t.shape(), &[1, 3]);
        assert_eq!(t.data(), array![[1, 2, 3]].into_dyn());
        assert!(t.grad().is_none());
        assert!(!t.requires_grad());
    }

    #[test]
    fn test_matrix_with_grad() {
        let t = Tensor::<f64>::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], true).unwrap();
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t[&[1, 0][..]], 3.0);
        let grad = t.grad().unwrap();
        assert_eq!(grad.shape(), &[2, 2]);
        assert!(grad.data().iter().all(|&g| g == 0.0));
        assert!(!grad.requires_grad());
        assert!(grad.grad().is_none());
    }

    #[test]
    fn test_higher_rank_passes_through() {
        let a = Array3::<u8>::zeros((2, 3, 4));
        let t = Tensor::new(a, false).unwrap();
        assert_eq!(t.shape(), &[2, 3, 4]);
        assert_eq!(t.ndim(), 3);
    }

    #[test]
    fn test_scalar_array_becomes_one_by_one() {
        let t = Tensor::new(arr0(5i64), false).unwrap();
        assert_eq!(t.shape(), &[1, 1]);
        assert_eq!(t.get(&[0, 0]), Some(&5));
    }

    #[test]
    fn test_reversed_vector_is_promoted() {
        let mut a = array![1.0f32, 2.0, 3.0];
        a.invert_axis(ndarray::Axis(0));
        let t = Tensor::new(a, false).unwrap();
        assert_eq!(t.data(), array![[3.0f32, 2.0, 1.0]].into_dyn());
    }

    #[test]
    fn test_transpose() {
        let t = Tensor::<i32>::new([1, 2, 3], true).unwrap();
        assert_eq!(t.t().shape(), &[3, 1]);
        let tt = t.transpose();
        assert_eq!(tt.data(), array![[1], [2], [3]].into_dyn());
        assert!(!tt.requires_grad());
        assert!(tt.grad().is_none());
    }

    #[test]
    fn test_column_major_input_keeps_values() {
        let a = ndarray::Array2::from_shape_vec((2, 2).f(), vec![1, 3, 2, 4]).unwrap();
        let t = Tensor::<i32>::new(a, false).unwrap();
        assert_eq!(t.data(), array![[1, 2], [3, 4]].into_dyn());
    }

    #[test]
    fn test_from_tensor_drops_source_grad() {
        let src = Tensor::<f32>::new(vec![1.0, 2.0], true).unwrap();
        let copy = Tensor::new(&src, false).unwrap();
        assert!(copy.grad().is_none());
        let moved = Tensor::new(src, true).unwrap();
        assert_eq!(moved.grad().unwrap().shape(), &[1, 2]);
    }

    #[test]
    fn test_zeros_promotes() {
        let t = Tensor::<f32>::zeros(&[4]).unwrap();
        assert_eq!(t.shape(), &[1, 4]);
        assert_eq!(t.dtype(), DType::F32);
    }

    #[test]
    fn test_display() {
        let t = Tensor::<i32>::new([[1, 2], [3, 4]], false).unwrap();
        assert_eq!(t.to_string(), "Tensor([[1, 2],\n [3, 4]])");
    }
}
