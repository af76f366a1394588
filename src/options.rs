use serde::{Deserialize, Serialize};

/// Construction settings for [`Tensor::with_options`](crate::Tensor::with_options).
///
/// ```
/// use neuranet::{Tensor, TensorOptions};
///
/// let opts = TensorOptions::default().with_requires_grad(true);
/// let t = Tensor::<f32>::with_options(vec![1.0, 2.0], &opts).unwrap();
/// assert!(t.grad().is_some());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorOptions {
    #[serde(default)]
    pub requires_grad: bool,
}

impl TensorOptions {
    pub fn with_requires_grad(mut self, requires_grad: bool) -> Self {
        self.requires_grad = requires_grad;
        self
    }
}
