//! Homogeneous transformation matrices for placing scene elements
use approx::{AbsDiffEq, RelativeEq};
use log::trace;
use nalgebra::{DMatrix, DVector, Dyn, Matrix4, MatrixView, MatrixViewMut, Point2, Vector3, U1};

use crate::error::{Axis, Error, Result};

/// Borrowed view of one matrix row
pub type RowView<'a> = MatrixView<'a, f64, U1, Dyn, U1, Dyn>;
/// Mutable view of one matrix row
pub type RowViewMut<'a> = MatrixViewMut<'a, f64, U1, Dyn, U1, Dyn>;

/// A dense `f64` matrix whose shape is fixed at construction.
///
/// The named factories produce 4x4 matrices in homogeneous form, meant to be
/// applied to column vectors: `a.multiply(&b)` applies `b` first, then `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: DMatrix<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::Dimension { rows, cols });
        }
        Ok(Self {
            data: DMatrix::zeros(rows, cols),
        })
    }

    /// Create a matrix from row literals. Every row must match the first row's width.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.is_empty() || cols == 0 {
            return Err(Error::Dimension {
                rows: rows.len(),
                cols,
            });
        }

        let mut values = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::RaggedRows {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            values.extend_from_slice(row);
        }

        Ok(Self {
            data: DMatrix::from_row_slice(rows.len(), cols, &values),
        })
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.shape()
    }

    pub fn row(&self, index: usize) -> Result<RowView<'_>> {
        self.check_row(index)?;
        Ok(self.data.row(index))
    }

    pub fn row_mut(&mut self, index: usize) -> Result<RowViewMut<'_>> {
        self.check_row(index)?;
        Ok(self.data.row_mut(index))
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_row(row)?;
        self.check_col(col)?;
        Ok(self.data[(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_row(row)?;
        self.check_col(col)?;
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(Error::shape_mismatch(
                "matrix multiply",
                (self.cols(), other.cols()),
                other.shape(),
            ));
        }
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    /// Matrix-vector product `self * vector`
    pub fn multiply_vector(&self, vector: &[f64]) -> Result<Vec<f64>> {
        if self.cols() != vector.len() {
            return Err(Error::length_mismatch(
                "matrix-vector multiply",
                self.cols(),
                vector.len(),
            ));
        }
        let product = &self.data * DVector::from_column_slice(vector);
        Ok(product.iter().copied().collect())
    }

    /// Transform a 2D point through homogeneous coordinates.
    ///
    /// The point is lifted to `(x, y, 0, 1)`, multiplied, and divided by the
    /// resulting `w`. Requires four columns and at least four rows.
    pub fn transform_point(&self, point: &Point2<f64>) -> Result<Point2<f64>> {
        self.check_homogeneous()?;
        Ok(self.project(point))
    }

    /// Transform every vertex of a polygon, preserving order
    pub fn transform_polygon(&self, points: &[Point2<f64>]) -> Result<Vec<Point2<f64>>> {
        self.check_homogeneous()?;
        Ok(points.iter().map(|point| self.project(point)).collect())
    }

    pub fn identity(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::Dimension { rows: 0, cols: 0 });
        }
        Ok(Self {
            data: DMatrix::identity(size, size),
        })
    }

    /// Create a translation matrix
    pub fn translate(tx: f64, ty: f64, tz: f64) -> Self {
        trace!("translate({tx}, {ty}, {tz})");
        Matrix4::new_translation(&Vector3::new(tx, ty, tz)).into()
    }

    /// Create a scale matrix
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        trace!("scale({sx}, {sy}, {sz})");
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)).into()
    }

    /// Rotation about the X axis, angle in degrees
    #[rustfmt::skip]
    pub fn rotate_x(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   -s,  0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
        .into()
    }

    /// Rotation about the Y axis, angle in degrees
    #[rustfmt::skip]
    pub fn rotate_y(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
            -s,  0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
        .into()
    }

    /// Rotation about the Z axis, angle in degrees
    #[rustfmt::skip]
    pub fn rotate_z(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Matrix4::new(
            c,   -s,  0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
        .into()
    }

    fn project(&self, point: &Point2<f64>) -> Point2<f64> {
        let lifted = DVector::from_column_slice(&[point.x, point.y, 0.0, 1.0]);
        let h = &self.data * lifted;
        Point2::new(h[0] / h[3], h[1] / h[3])
    }

    fn check_homogeneous(&self) -> Result<()> {
        if self.cols() != 4 || self.rows() < 4 {
            return Err(Error::shape_mismatch("point transform", (4, 4), self.shape()));
        }
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index >= self.rows() {
            return Err(Error::IndexOutOfRange {
                axis: Axis::Row,
                index,
                len: self.rows(),
            });
        }
        Ok(())
    }

    fn check_col(&self, index: usize) -> Result<()> {
        if index >= self.cols() {
            return Err(Error::IndexOutOfRange {
                axis: Axis::Column,
                index,
                len: self.cols(),
            });
        }
        Ok(())
    }
}

impl From<Matrix4<f64>> for Matrix {
    fn from(m: Matrix4<f64>) -> Self {
        Self {
            data: DMatrix::from_column_slice(4, 4, m.as_slice()),
        }
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.shape() == other.shape() && self.data.abs_diff_eq(&other.data, epsilon)
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.shape() == other.shape() && self.data.relative_eq(&other.data, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const TOL: f64 = 1e-9;

    fn sample_3x3() -> Matrix {
        Matrix::from_rows(&[[2.0, -1.0, 0.5], [0.0, 3.0, 4.0], [1.5, 7.0, -2.0]]).unwrap()
    }

    #[test]
    fn test_new_is_zero_filled() {
        let m = Matrix::new(2, 3).unwrap();
        assert_eq!(m.shape(), (2, 3));
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(m.get(r, c).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Matrix::new(0, 3),
            Err(Error::Dimension { rows: 0, cols: 3 })
        );
        assert!(matches!(Matrix::new(3, 0), Err(Error::Dimension { .. })));
        assert!(matches!(Matrix::identity(0), Err(Error::Dimension { .. })));
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get(0, 2).unwrap(), 3.0);
        assert_eq!(m.get(1, 0).unwrap(), 4.0);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]];
        assert_eq!(
            Matrix::from_rows(&rows),
            Err(Error::RaggedRows {
                row: 2,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_from_rows_empty() {
        let empty: [[f64; 0]; 0] = [];
        assert!(matches!(Matrix::from_rows(&empty), Err(Error::Dimension { .. })));
        let blank: [[f64; 0]; 2] = [[], []];
        assert!(matches!(Matrix::from_rows(&blank), Err(Error::Dimension { rows: 2, cols: 0 })));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample_3x3();
        let mut copy = original.clone();
        copy.set(0, 0, 99.0).unwrap();
        assert_eq!(original.get(0, 0).unwrap(), 2.0);
        assert_eq!(copy.get(0, 0).unwrap(), 99.0);
    }

    #[test]
    fn test_row_access() {
        let mut m = sample_3x3();
        let row = m.row(1).unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[2], 4.0);

        m.row_mut(2).unwrap()[1] = -8.0;
        assert_eq!(m.get(2, 1).unwrap(), -8.0);
    }

    #[test]
    fn test_row_out_of_range() {
        let mut m = sample_3x3();
        let expected = Error::IndexOutOfRange {
            axis: Axis::Row,
            index: 5,
            len: 3,
        };
        assert_eq!(m.row(5).unwrap_err(), expected);
        assert_eq!(m.row_mut(5).unwrap_err(), expected);
        assert!(m.get(3, 0).is_err());
    }

    #[test]
    fn test_column_out_of_range() {
        let mut m = Matrix::new(2, 2).unwrap();
        assert_eq!(
            m.set(0, 2, 1.0),
            Err(Error::IndexOutOfRange {
                axis: Axis::Column,
                index: 2,
                len: 2
            })
        );
    }

    #[test]
    fn test_multiply_values() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
        let expected = Matrix::from_rows(&[[19.0, 22.0], [43.0, 50.0]]).unwrap();
        assert_eq!(a.multiply(&b).unwrap(), expected);
    }

    #[test]
    fn test_multiply_rectangular_shape() {
        let a = Matrix::from_rows(&[[1.0, 0.0, 2.0], [0.0, 1.0, 3.0]]).unwrap();
        let b = Matrix::from_rows(&[[1.0], [1.0], [1.0]]).unwrap();
        let product = a.multiply(&b).unwrap();
        assert_eq!(product.shape(), (2, 1));
        assert_eq!(product.get(0, 0).unwrap(), 3.0);
        assert_eq!(product.get(1, 0).unwrap(), 4.0);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(4, 2).unwrap();
        let err = a.multiply(&b).unwrap_err();
        assert!(matches!(err, Error::DimensionMismatch { .. }));
        assert_eq!(
            err.to_string(),
            "Dimension mismatch in matrix multiply: expected 3x2, found 4x2"
        );
    }

    #[test]
    fn test_multiply_vector() {
        let m = sample_3x3();
        let v = m.multiply_vector(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v, vec![1.5, 18.0, 9.5]);

        assert!(matches!(
            m.multiply_vector(&[1.0, 2.0]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_identity_idempotent() {
        for n in 1..=6 {
            let id = Matrix::identity(n).unwrap();
            assert_eq!(id.multiply(&id).unwrap(), id);
        }
    }

    #[test]
    fn test_identity_laws() {
        let m = sample_3x3();
        let id = Matrix::identity(3).unwrap();
        assert_eq!(id.multiply(&m).unwrap(), m);
        assert_eq!(m.multiply(&id).unwrap(), m);
    }

    #[test]
    fn test_translations_compose_additively() {
        let a = Matrix::translate(1.0, -2.0, 3.5);
        let b = Matrix::translate(4.0, 0.25, -1.0);
        let composed = a.multiply(&b).unwrap();
        assert_abs_diff_eq!(composed, Matrix::translate(5.0, -1.75, 2.5), epsilon = TOL);
    }

    #[test]
    fn test_factory_entries() {
        let t = Matrix::translate(7.0, 8.0, 9.0);
        assert_eq!(t.get(0, 3).unwrap(), 7.0);
        assert_eq!(t.get(1, 3).unwrap(), 8.0);
        assert_eq!(t.get(2, 3).unwrap(), 9.0);
        assert_eq!(t.get(3, 3).unwrap(), 1.0);

        let s = Matrix::scale(2.0, 3.0, 4.0);
        assert_eq!(s.get(0, 0).unwrap(), 2.0);
        assert_eq!(s.get(1, 1).unwrap(), 3.0);
        assert_eq!(s.get(2, 2).unwrap(), 4.0);
        assert_eq!(s.get(3, 3).unwrap(), 1.0);

        let (sin, cos) = 30f64.to_radians().sin_cos();
        let rx = Matrix::rotate_x(30.0);
        assert_eq!(rx.get(1, 1).unwrap(), cos);
        assert_eq!(rx.get(1, 2).unwrap(), -sin);
        assert_eq!(rx.get(2, 1).unwrap(), sin);
        assert_eq!(rx.get(0, 0).unwrap(), 1.0);

        let ry = Matrix::rotate_y(30.0);
        assert_eq!(ry.get(0, 2).unwrap(), sin);
        assert_eq!(ry.get(2, 0).unwrap(), -sin);
        assert_eq!(ry.get(1, 1).unwrap(), 1.0);

        let rz = Matrix::rotate_z(30.0);
        assert_eq!(rz.get(0, 1).unwrap(), -sin);
        assert_eq!(rz.get(1, 0).unwrap(), sin);
        assert_eq!(rz.get(2, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_transform_point_identity() {
        let id = Matrix::identity(4).unwrap();
        let p = id.transform_point(&Point2::new(3.25, -7.5)).unwrap();
        assert_relative_eq!(p, Point2::new(3.25, -7.5), epsilon = TOL);
    }

    #[test]
    fn test_transform_point_translate() {
        let t = Matrix::translate(10.0, -4.0, 0.0);
        let p = t.transform_point(&Point2::new(1.0, 2.0)).unwrap();
        assert_relative_eq!(p, Point2::new(11.0, -2.0), epsilon = TOL);
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let p = Matrix::rotate_z(90.0)
            .transform_point(&Point2::new(1.0, 0.0))
            .unwrap();
        assert_abs_diff_eq!(p, Point2::new(0.0, 1.0), epsilon = TOL);
    }

    #[test]
    fn test_rotate_then_translate() {
        let m = Matrix::translate(10.0, 0.0, 0.0)
            .multiply(&Matrix::rotate_z(90.0))
            .unwrap();
        let p = m.transform_point(&Point2::new(1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(p, Point2::new(10.0, 1.0), epsilon = TOL);
    }

    #[test]
    fn test_transform_point_divides_by_w() {
        let mut m = Matrix::identity(4).unwrap();
        m.set(3, 3, 2.0).unwrap();
        let p = m.transform_point(&Point2::new(6.0, -4.0)).unwrap();
        assert_relative_eq!(p, Point2::new(3.0, -2.0), epsilon = TOL);
    }

    #[test]
    fn test_transform_point_wrong_shape() {
        let m = Matrix::identity(3).unwrap();
        assert!(matches!(
            m.transform_point(&Point2::new(1.0, 1.0)),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(m.transform_polygon(&[Point2::origin()]).is_err());
    }

    #[test]
    fn test_transform_polygon_preserves_order() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        let m = Matrix::scale(2.0, 3.0, 1.0);
        let out = m.transform_polygon(&square).unwrap();
        assert_eq!(out.len(), square.len());
        for (before, after) in square.iter().zip(&out) {
            assert_relative_eq!(*after, Point2::new(before.x * 2.0, before.y * 3.0), epsilon = TOL);
        }
        assert!(m.transform_polygon(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_approx_rejects_shape_difference() {
        let a = Matrix::new(2, 2).unwrap();
        let b = Matrix::new(2, 3).unwrap();
        assert!(!a.abs_diff_eq(&b, 1.0));
    }
}
