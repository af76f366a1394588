//! Gradient buffer hooks.
//!
//! Nothing here is invoked automatically: there is no graph to walk yet, so
//! callers hand contributions to [`Tensor::accumulate_grad`] themselves.

use num_traits::Zero;

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::tensor::Tensor;

impl<A: Element> Tensor<A> {
    /// Add `incoming` elementwise into this tensor's gradient.
    ///
    /// A tensor used several times receives the sum of all contributions.
    /// Integer sums that would overflow fail with [`Error::GradOverflow`] and
    /// leave the gradient unchanged.
    pub fn accumulate_grad(&mut self, incoming: &Tensor<A>) -> Result<()> {
        let grad = self.grad_mut().ok_or(Error::GradNotTracked)?;
        if grad.shape() != incoming.shape() {
            return Err(Error::ShapeMismatch {
                expected: grad.shape().to_vec(),
                got: incoming.shape().to_vec(),
            });
        }
        log::trace!("accumulating gradient of shape {:?}", incoming.shape());
        let summed: Option<Vec<A>> = grad
            .data()
            .iter()
            .zip(incoming.data().iter())
            .map(|(&g, &x)| g.accumulate(x))
            .collect();
        let summed = summed.ok_or(Error::GradOverflow { dtype: A::DTYPE })?;
        grad.data_mut()
            .iter_mut()
            .zip(summed)
            .for_each(|(g, s)| *g = s);
        Ok(())
    }

    /// Reset the gradient to zeros. Untracked tensors are left alone.
    pub fn zero_grad(&mut self) {
        if let Some(grad) = self.grad_mut() {
            grad.data_mut().map_inplace(|g| *g = A::zero());
        }
    }
}
