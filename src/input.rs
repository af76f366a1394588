//! Values accepted by the tensor constructors.
//!
//! A [`TensorInput`] is one of three kinds: an existing tensor, an ordered
//! (possibly nested) sequence, or a dense array. Everything else converts to
//! [`TensorInput::Unsupported`], which the constructor rejects with
//! [`Error::InvalidInputType`].

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};

use ndarray::{Array2, ArrayBase, ArrayD, Data, Dimension, IxDyn};

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::tensor::Tensor;

/// A node of a nested sequence: either a scalar or another sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<A> {
    Leaf(A),
    List(Vec<Nested<A>>),
}

impl<A> Nested<A> {
    /// One level of leaves.
    pub fn row(values: Vec<A>) -> Self {
        Nested::List(values.into_iter().map(Nested::Leaf).collect())
    }
}

#[derive(Debug, Clone)]
pub enum TensorInput<A: Element> {
    Tensor(Tensor<A>),
    /// Top-level items of an ordered sequence.
    Sequence(Vec<Nested<A>>),
    Array(ArrayD<A>),
    Unsupported { type_name: &'static str },
}

impl<A: Element> TensorInput<A> {
    /// Short name of the input kind, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            TensorInput::Tensor(_) => "tensor",
            TensorInput::Sequence(_) => "sequence",
            TensorInput::Array(_) => "array",
            TensorInput::Unsupported { type_name } => *type_name,
        }
    }

    /// Turn the input into a dense buffer. The kind is checked first; no shape
    /// normalisation happens here.
    pub(crate) fn into_array(self) -> Result<ArrayD<A>> {
        match self {
            TensorInput::Tensor(t) => Ok(t.into_data()),
            TensorInput::Sequence(items) => sequence_to_array(&items),
            TensorInput::Array(a) => Ok(a),
            TensorInput::Unsupported { type_name } => Err(Error::InvalidInputType {
                type_name: type_name.to_string(),
            }),
        }
    }
}

/// Shape implied by following the first element down each level.
fn infer_shape<A>(items: &[Nested<A>]) -> Vec<usize> {
    let mut shape = vec![items.len()];
    let mut level = items;
    while let Some(Nested::List(inner)) = level.first() {
        shape.push(inner.len());
        level = inner;
    }
    shape
}

fn flatten_into<A: Copy>(
    items: &[Nested<A>],
    shape: &[usize],
    depth: usize,
    out: &mut Vec<A>,
) -> Result<()> {
    if items.len() != shape[depth] {
        return Err(Error::construction(format!(
            "ragged sequence: expected {} items at depth {}, found {}",
            shape[depth],
            depth,
            items.len()
        )));
    }
    let innermost = depth + 1 == shape.len();
    for item in items {
        match item {
            Nested::Leaf(v) if innermost => out.push(*v),
            Nested::List(inner) if !innermost => flatten_into(inner, shape, depth + 1, out)?,
            _ => {
                return Err(Error::construction(format!(
                    "ragged sequence: mixed scalars and sequences at depth {}",
                    depth
                )))
            }
        }
    }
    Ok(())
}

fn sequence_to_array<A: Element>(items: &[Nested<A>]) -> Result<ArrayD<A>> {
    // The shape only follows the first element down, so nothing is sized from
    // it until every level has been checked against it.
    let shape = infer_shape(items);
    let mut flat = Vec::new();
    flatten_into(items, &shape, 0, &mut flat)?;
    ArrayD::from_shape_vec(IxDyn(&shape), flat).map_err(|e| Error::construction(e.to_string()))
}

impl<A: Element> From<Tensor<A>> for TensorInput<A> {
    fn from(t: Tensor<A>) -> Self {
        TensorInput::Tensor(t)
    }
}

impl<A: Element> From<&Tensor<A>> for TensorInput<A> {
    fn from(t: &Tensor<A>) -> Self {
        TensorInput::Tensor(t.clone())
    }
}

impl<A: Element> From<Nested<A>> for TensorInput<A> {
    fn from(n: Nested<A>) -> Self {
        match n {
            Nested::List(items) => TensorInput::Sequence(items),
            Nested::Leaf(_) => TensorInput::Unsupported {
                type_name: type_name::<A>(),
            },
        }
    }
}

impl<A: Element> From<Vec<A>> for TensorInput<A> {
    fn from(v: Vec<A>) -> Self {
        TensorInput::Sequence(v.into_iter().map(Nested::Leaf).collect())
    }
}

impl<A: Element> From<&[A]> for TensorInput<A> {
    fn from(v: &[A]) -> Self {
        TensorInput::from(v.to_vec())
    }
}

impl<A: Element, const N: usize> From<[A; N]> for TensorInput<A> {
    fn from(v: [A; N]) -> Self {
        TensorInput::from(v.to_vec())
    }
}

impl<A: Element> From<Vec<Vec<A>>> for TensorInput<A> {
    fn from(rows: Vec<Vec<A>>) -> Self {
        TensorInput::Sequence(rows.into_iter().map(Nested::row).collect())
    }
}

impl<A: Element, const N: usize> From<Vec<[A; N]>> for TensorInput<A> {
    fn from(rows: Vec<[A; N]>) -> Self {
        TensorInput::Sequence(rows.into_iter().map(|r| Nested::row(r.to_vec())).collect())
    }
}

impl<A: Element, const N: usize, const M: usize> From<[[A; N]; M]> for TensorInput<A> {
    fn from(rows: [[A; N]; M]) -> Self {
        TensorInput::Sequence(rows.into_iter().map(|r| Nested::row(r.to_vec())).collect())
    }
}

impl<A: Element> From<Vec<Vec<Vec<A>>>> for TensorInput<A> {
    fn from(planes: Vec<Vec<Vec<A>>>) -> Self {
        TensorInput::Sequence(
            planes
                .into_iter()
                .map(|plane| Nested::List(plane.into_iter().map(Nested::row).collect()))
                .collect(),
        )
    }
}

impl<A, S, D> From<ArrayBase<S, D>> for TensorInput<A>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn from(a: ArrayBase<S, D>) -> Self {
        TensorInput::Array(a.into_owned().into_dyn())
    }
}

impl<A: Element> From<nalgebra::DMatrix<A>> for TensorInput<A> {
    fn from(m: nalgebra::DMatrix<A>) -> Self {
        let a = Array2::from_shape_fn(m.shape(), |(i, j)| m[(i, j)]);
        TensorInput::Array(a.into_dyn())
    }
}

// Kinds the constructor rejects; they still convert so the caller gets a typed
// error naming what was passed.

macro_rules! unsupported {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<A: Element> From<$ty> for TensorInput<A> {
                fn from(_: $ty) -> Self {
                    TensorInput::Unsupported { type_name: type_name::<$ty>() }
                }
            }
        )*
    };
}

unsupported!(f32, f64, i32, i64, u8, u32, usize, bool, char, String);

impl<'a, A: Element> From<&'a str> for TensorInput<A> {
    fn from(_: &'a str) -> Self {
        TensorInput::Unsupported { type_name: "&str" }
    }
}

impl<A: Element, K, V, H> From<HashMap<K, V, H>> for TensorInput<A> {
    fn from(_: HashMap<K, V, H>) -> Self {
        TensorInput::Unsupported {
            type_name: type_name::<HashMap<K, V, H>>(),
        }
    }
}

impl<A: Element, K, V> From<BTreeMap<K, V>> for TensorInput<A> {
    fn from(_: BTreeMap<K, V>) -> Self {
        TensorInput::Unsupported {
            type_name: type_name::<BTreeMap<K, V>>(),
        }
    }
}
