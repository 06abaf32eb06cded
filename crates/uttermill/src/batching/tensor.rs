//! # Dense Tensors
//!
//! Row-major, fixed-shape buffers handed to the model layer.

/// A dense rank-3 tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor3<V> {
    dims: [usize; 3],
    data: Vec<V>,
}

impl<V: Copy> Tensor3<V> {
    /// A tensor of shape `dims` with every entry set to `value`.
    pub fn filled(
        dims: [usize; 3],
        value: V,
    ) -> Self {
        Self {
            dims,
            data: vec![value; dims[0] * dims[1] * dims[2]],
        }
    }

    /// The shape.
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    /// The flat row-major buffer.
    pub fn data(&self) -> &[V] {
        &self.data
    }

    fn offset(
        &self,
        i: usize,
        j: usize,
    ) -> usize {
        assert!(
            i < self.dims[0] && j < self.dims[1],
            "index ({i}, {j}) out of bounds for {:?}",
            self.dims
        );
        (i * self.dims[1] + j) * self.dims[2]
    }

    /// Get entry ``[i, j, k]``.
    pub fn get(
        &self,
        i: usize,
        j: usize,
        k: usize,
    ) -> V {
        assert!(k < self.dims[2], "index {k} out of bounds for {:?}", self.dims);
        self.data[self.offset(i, j) + k]
    }

    /// The innermost row ``[i, j, ..]``.
    pub fn row(
        &self,
        i: usize,
        j: usize,
    ) -> &[V] {
        let start = self.offset(i, j);
        &self.data[start..start + self.dims[2]]
    }

    /// The innermost row ``[i, j, ..]``, mutably.
    pub fn row_mut(
        &mut self,
        i: usize,
        j: usize,
    ) -> &mut [V] {
        let start = self.offset(i, j);
        let width = self.dims[2];
        &mut self.data[start..start + width]
    }

    /// Swap the two outer axes: ``[i, j, k] -> [j, i, k]``.
    pub fn swap_outer_axes(&self) -> Self {
        let [d0, d1, d2] = self.dims;
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..d1 {
            for i in 0..d0 {
                data.extend_from_slice(self.row(i, j));
            }
        }
        Self {
            dims: [d1, d0, d2],
            data,
        }
    }

    /// Nested vectors, outermost axis first.
    pub fn to_nested(&self) -> Vec<Vec<Vec<V>>> {
        (0..self.dims[0])
            .map(|i| (0..self.dims[1]).map(|j| self.row(i, j).to_vec()).collect())
            .collect()
    }
}

/// A dense rank-2 tensor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tensor2<V> {
    dims: [usize; 2],
    data: Vec<V>,
}

impl<V: Copy> Tensor2<V> {
    /// A tensor of shape `dims` with every entry set to `value`.
    pub fn filled(
        dims: [usize; 2],
        value: V,
    ) -> Self {
        Self {
            dims,
            data: vec![value; dims[0] * dims[1]],
        }
    }

    /// The shape.
    pub fn dims(&self) -> [usize; 2] {
        self.dims
    }

    /// The flat row-major buffer.
    pub fn data(&self) -> &[V] {
        &self.data
    }

    /// Get entry ``[i, j]``.
    pub fn get(
        &self,
        i: usize,
        j: usize,
    ) -> V {
        self.row(i)[j]
    }

    /// Set entry ``[i, j]``.
    pub fn set(
        &mut self,
        i: usize,
        j: usize,
        value: V,
    ) {
        let width = self.dims[1];
        self.data[i * width..(i + 1) * width][j] = value;
    }

    /// Row ``[i, ..]``.
    pub fn row(
        &self,
        i: usize,
    ) -> &[V] {
        let width = self.dims[1];
        &self.data[i * width..(i + 1) * width]
    }

    /// Nested vectors, outermost axis first.
    pub fn to_nested(&self) -> Vec<Vec<V>> {
        (0..self.dims[0]).map(|i| self.row(i).to_vec()).collect()
    }
}
