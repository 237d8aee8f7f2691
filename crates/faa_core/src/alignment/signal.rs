//! Borrowed sample views accepted by the searches.
//!
//! Plain slices and vectors are always valid. ndarray inputs are checked for
//! dimensionality and contiguity before any computation starts.

use ndarray::{ArrayBase, Data, Dimension};

use super::types::{AlignError, AlignResult};

/// Something that can lend a dense, single-channel `f32` signal.
pub trait Samples {
    /// Borrow the samples as a contiguous slice.
    fn samples(&self) -> AlignResult<&[f32]>;
}

impl Samples for [f32] {
    fn samples(&self) -> AlignResult<&[f32]> {
        Ok(self)
    }
}

impl Samples for Vec<f32> {
    fn samples(&self) -> AlignResult<&[f32]> {
        Ok(self.as_slice())
    }
}

impl<const N: usize> Samples for [f32; N] {
    fn samples(&self) -> AlignResult<&[f32]> {
        Ok(self.as_slice())
    }
}

impl<S, D> Samples for ArrayBase<S, D>
where
    S: Data<Elem = f32>,
    D: Dimension,
{
    fn samples(&self) -> AlignResult<&[f32]> {
        if self.ndim() != 1 {
            return Err(AlignError::InvalidInput(format!(
                "signal must be one-dimensional, got {} dimensions",
                self.ndim()
            )));
        }
        self.as_slice().ok_or_else(|| {
            AlignError::InvalidInput("signal must be contiguous in memory".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2, s, Array1};

    #[test]
    fn slices_and_vectors_pass_through() {
        let v = vec![1.0f32, 2.0, 3.0];
        assert_eq!(v.samples().unwrap(), &[1.0, 2.0, 3.0]);
        assert_eq!(v.as_slice().samples().unwrap().len(), 3);
        assert_eq!([0.5f32; 4].samples().unwrap().len(), 4);
    }

    #[test]
    fn contiguous_view_is_accepted() {
        let a: Array1<f32> = arr1(&[1.0, 2.0, 3.0, 4.0]);
        let view = a.slice(s![1..3]);
        assert_eq!(view.samples().unwrap(), &[2.0, 3.0]);
    }

    #[test]
    fn strided_view_is_rejected() {
        let a: Array1<f32> = Array1::linspace(0.0, 1.0, 10);
        let strided = a.slice(s![..;2]);
        let err = strided.samples().unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(_)));
    }

    #[test]
    fn multi_dimensional_array_is_rejected() {
        let a = arr2(&[[1.0f32, 2.0], [3.0, 4.0]]);
        assert!(a.samples().is_err());
    }
}
