//! Mathematical utilities for planar frame analysis

pub mod sparse;

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector};

pub use sparse::{FactorError, SparseMatrixBuilder, SymmetricSolver};

pub type Mat3 = Matrix3<f64>;

/// 6x6 matrix for two-node member stiffness
pub type Mat6 = SMatrix<f64, 6, 6>;
/// 6-element vector for member end forces/displacements
pub type Vec6 = SVector<f64, 6>;
/// 3-element vector for a single node (Ux, Uy, Rz)
pub type Vec3 = SVector<f64, 3>;
/// 3x6 shape function matrix mapping end displacements to (u, v, theta) at a station
pub type ShapeMat = SMatrix<f64, 3, 6>;

/// Three-point Gauss-Legendre rule on [-1, 1], exact for quintics
const GAUSS_3: [(f64, f64); 3] = [
    (-0.7745966692414834, 0.5555555555555556),
    (0.0, 0.8888888888888888),
    (0.7745966692414834, 0.5555555555555556),
];

/// Direction cosines and length of the segment from `i` to `j`
pub fn direction_cosines(i: &[f64; 2], j: &[f64; 2]) -> (f64, f64, f64) {
    let dx = j[0] - i[0];
    let dy = j[1] - i[1];
    let length = (dx * dx + dy * dy).sqrt();

    if length < 1e-10 {
        panic!("member has zero length");
    }

    (dx / length, dy / length, length)
}

/// Compute the transformation matrix for a planar two-node member
///
/// # Arguments
/// * `cos` - cosine of the member angle with the global X axis
/// * `sin` - sine of the member angle
///
/// # Returns
/// 6x6 transformation matrix from global to local coordinates
pub fn member_transformation_matrix(cos: f64, sin: f64) -> Mat6 {
    let r = node_rotation_matrix_cs(cos, sin);

    let mut t = Mat6::zeros();
    for block in 0..2 {
        let offset = block * 3;
        for row in 0..3 {
            for col in 0..3 {
                t[(offset + row, offset + col)] = r[(row, col)];
            }
        }
    }

    t
}

/// 3x3 rotation for a node-local frame at angle `rotation` (radians)
///
/// Maps global (Ux, Uy, Rz) into the rotated frame; the transpose maps back.
pub fn node_rotation_matrix(rotation: f64) -> Mat3 {
    node_rotation_matrix_cs(rotation.cos(), rotation.sin())
}

fn node_rotation_matrix_cs(cos: f64, sin: f64) -> Mat3 {
    Mat3::new(
        cos, sin, 0.0,
        -sin, cos, 0.0,
        0.0, 0.0, 1.0,
    )
}

/// Local stiffness matrix for a planar frame member
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `a` - Cross-sectional area
/// * `i` - Moment of inertia about the bending axis
/// * `length` - Member length
///
/// # Returns
/// 6x6 local stiffness matrix ordered (Ux_i, Uy_i, Rz_i, Ux_j, Uy_j, Rz_j)
pub fn frame_local_stiffness(e: f64, a: f64, i: f64, length: f64) -> Mat6 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let ei_l3 = e * i / l3;
    let ei_l2 = e * i / l2;
    let ei_l = e * i / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at i
        ea_l,   0.0,          0.0,         -ea_l,  0.0,          0.0,
        // Row 1: shear at i
        0.0,    12.0*ei_l3,   6.0*ei_l2,   0.0,    -12.0*ei_l3,  6.0*ei_l2,
        // Row 2: moment at i
        0.0,    6.0*ei_l2,    4.0*ei_l,    0.0,    -6.0*ei_l2,   2.0*ei_l,
        // Row 3: axial at j
        -ea_l,  0.0,          0.0,         ea_l,   0.0,          0.0,
        // Row 4: shear at j
        0.0,    -12.0*ei_l3,  -6.0*ei_l2,  0.0,    12.0*ei_l3,   -6.0*ei_l2,
        // Row 5: moment at j
        0.0,    6.0*ei_l2,    2.0*ei_l,    0.0,    -6.0*ei_l2,   4.0*ei_l,
    ];

    Mat6::from_row_slice(&data)
}

/// Local stiffness matrix for a planar truss (axial-only) member
pub fn truss_local_stiffness(e: f64, a: f64, length: f64) -> Mat6 {
    spring_local_stiffness(e * a / length)
}

/// Local stiffness matrix for an axial spring between two nodes
pub fn spring_local_stiffness(k: f64) -> Mat6 {
    let mut m = Mat6::zeros();
    m[(0, 0)] = k;
    m[(0, 3)] = -k;
    m[(3, 0)] = -k;
    m[(3, 3)] = k;
    m
}

/// Apply static condensation for released DOFs
///
/// # Arguments
/// * `k` - Full stiffness matrix
/// * `releases` - Boolean array indicating which DOFs are released
pub fn apply_releases(k: &Mat6, releases: &[bool; 6]) -> Mat6 {
    let unreleased: Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if !released { Some(i) } else { None })
        .collect();

    let released: Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if released { Some(i) } else { None })
        .collect();

    if released.is_empty() {
        return *k;
    }

    let n1 = unreleased.len();
    let n2 = released.len();

    // Partition into k11, k12, k21, k22
    let mut k11 = DMatrix::zeros(n1, n1);
    let mut k12 = DMatrix::zeros(n1, n2);
    let mut k21 = DMatrix::zeros(n2, n1);
    let mut k22 = DMatrix::zeros(n2, n2);

    for (i, &ui) in unreleased.iter().enumerate() {
        for (j, &uj) in unreleased.iter().enumerate() {
            k11[(i, j)] = k[(ui, uj)];
        }
        for (j, &rj) in released.iter().enumerate() {
            k12[(i, j)] = k[(ui, rj)];
        }
    }

    for (i, &ri) in released.iter().enumerate() {
        for (j, &uj) in unreleased.iter().enumerate() {
            k21[(i, j)] = k[(ri, uj)];
        }
        for (j, &rj) in released.iter().enumerate() {
            k22[(i, j)] = k[(ri, rj)];
        }
    }

    // Static condensation: k_cond = k11 - k12 * inv(k22) * k21
    let k22_inv = match k22.clone().try_inverse() {
        Some(inv) => inv,
        None => return *k,
    };

    let k_condensed = &k11 - &k12 * &k22_inv * &k21;

    // Expand back to 6x6 with zeros for released DOFs
    let mut k_result = Mat6::zeros();

    for (i, &ui) in unreleased.iter().enumerate() {
        for (j, &uj) in unreleased.iter().enumerate() {
            k_result[(ui, uj)] = k_condensed[(i, j)];
        }
    }

    k_result
}

/// Apply static condensation to a fixed-end force vector for released DOFs
///
/// fer_condensed = fer1 - k12 * inv(k22) * fer2, with zeros at released DOFs.
pub fn apply_fer_releases(fer: &Vec6, k: &Mat6, releases: &[bool; 6]) -> Vec6 {
    let unreleased: Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if !released { Some(i) } else { None })
        .collect();

    let released: Vec<usize> = releases
        .iter()
        .enumerate()
        .filter_map(|(i, &released)| if released { Some(i) } else { None })
        .collect();

    if released.is_empty() {
        return *fer;
    }

    let n1 = unreleased.len();
    let n2 = released.len();

    let mut k12 = DMatrix::zeros(n1, n2);
    let mut k22 = DMatrix::zeros(n2, n2);

    for (i, &ui) in unreleased.iter().enumerate() {
        for (j, &rj) in released.iter().enumerate() {
            k12[(i, j)] = k[(ui, rj)];
        }
    }

    for (i, &ri) in released.iter().enumerate() {
        for (j, &rj) in released.iter().enumerate() {
            k22[(i, j)] = k[(ri, rj)];
        }
    }

    let mut fer1 = DVector::zeros(n1);
    let mut fer2 = DVector::zeros(n2);

    for (i, &ui) in unreleased.iter().enumerate() {
        fer1[i] = fer[ui];
    }
    for (i, &ri) in released.iter().enumerate() {
        fer2[i] = fer[ri];
    }

    let k22_inv = match k22.clone().try_inverse() {
        Some(inv) => inv,
        None => return *fer,
    };

    let fer_condensed = &fer1 - &k12 * &k22_inv * &fer2;

    let mut fer_result = Vec6::zeros();

    for (i, &ui) in unreleased.iter().enumerate() {
        fer_result[ui] = fer_condensed[i];
    }
    // Released DOFs remain zero

    fer_result
}

/// Hermite shape functions for a planar frame member at station `x`
///
/// Returns the 3x6 matrix n(x) with rows (u, v, theta) over the end
/// displacement vector (Ux_i, Uy_i, Rz_i, Ux_j, Uy_j, Rz_j). Moment
/// releases switch the transverse rows to the reduced interpolants with
/// a zero column at the released rotation.
pub fn frame_shape_functions(x: f64, length: f64, start_release: bool, end_release: bool) -> ShapeMat {
    let l = length;
    let s = x / l;
    let s2 = s * s;
    let s3 = s2 * s;

    let mut n = ShapeMat::zeros();

    // Axial interpolation is linear regardless of releases
    n[(0, 0)] = 1.0 - s;
    n[(0, 3)] = s;

    match (start_release, end_release) {
        (false, false) => {
            n[(1, 1)] = 1.0 - 3.0 * s2 + 2.0 * s3;
            n[(1, 2)] = l * (s - 2.0 * s2 + s3);
            n[(1, 4)] = 3.0 * s2 - 2.0 * s3;
            n[(1, 5)] = l * (s3 - s2);

            n[(2, 1)] = 6.0 * (s2 - s) / l;
            n[(2, 2)] = 1.0 - 4.0 * s + 3.0 * s2;
            n[(2, 4)] = 6.0 * (s - s2) / l;
            n[(2, 5)] = 3.0 * s2 - 2.0 * s;
        }
        (true, false) => {
            n[(1, 1)] = 1.0 - 1.5 * s + 0.5 * s3;
            n[(1, 4)] = 1.5 * s - 0.5 * s3;
            n[(1, 5)] = l * (0.5 * s3 - 0.5 * s);

            n[(2, 1)] = (1.5 * s2 - 1.5) / l;
            n[(2, 4)] = (1.5 - 1.5 * s2) / l;
            n[(2, 5)] = 1.5 * s2 - 0.5;
        }
        (false, true) => {
            n[(1, 1)] = 1.0 - 1.5 * s2 + 0.5 * s3;
            n[(1, 2)] = l * (s - 1.5 * s2 + 0.5 * s3);
            n[(1, 4)] = 1.5 * s2 - 0.5 * s3;

            n[(2, 1)] = (1.5 * s2 - 3.0 * s) / l;
            n[(2, 2)] = 1.0 - 3.0 * s + 1.5 * s2;
            n[(2, 4)] = (3.0 * s - 1.5 * s2) / l;
        }
        (true, true) => {
            n[(1, 1)] = 1.0 - s;
            n[(1, 4)] = s;

            n[(2, 1)] = -1.0 / l;
            n[(2, 4)] = 1.0 / l;
        }
    }

    n
}

/// Fixed-end forces for a concentrated load on a fully fixed member
///
/// # Arguments
/// * `fx`, `fy`, `mz` - Load components in member-local coordinates
/// * `a` - Distance from the start node to the load
/// * `length` - Member length
pub fn fer_point_load(fx: f64, fy: f64, mz: f64, a: f64, length: f64) -> Vec6 {
    let l = length;
    let b = l - a;
    let l2 = l * l;
    let l3 = l2 * l;
    let s = a / l;

    let mut fer = Vec6::zeros();

    fer[0] = -fx * b / l;
    fer[3] = -fx * a / l;

    fer[1] = -fy * b * b * (3.0 * a + b) / l3 + 6.0 * mz * a * b / l3;
    fer[2] = -fy * a * b * b / l2 - mz * (1.0 - 4.0 * s + 3.0 * s * s);
    fer[4] = -fy * a * a * (a + 3.0 * b) / l3 - 6.0 * mz * a * b / l3;
    fer[5] = fy * a * a * b / l2 - mz * s * (3.0 * s - 2.0);

    fer
}

/// Fixed-end forces for a linearly varying distributed load on a fully
/// fixed member
///
/// The load acts on [a, b] with intensities (wx1, wy1) at `a` and
/// (wx2, wy2) at `b`, in member-local coordinates per unit length.
/// Consistent nodal loads are integrated with a Gauss rule that is exact
/// for the cubic-times-linear integrand; the fixed-end forces are their
/// negatives.
pub fn fer_linear_load(
    wx1: f64,
    wy1: f64,
    wx2: f64,
    wy2: f64,
    a: f64,
    b: f64,
    length: f64,
) -> Vec6 {
    let span = b - a;
    if span <= 0.0 {
        return Vec6::zeros();
    }

    let jac = span / 2.0;
    let mid = (a + b) / 2.0;

    let mut feq = Vec6::zeros();
    for (point, weight) in GAUSS_3 {
        let x = mid + point * jac;
        let t = (x - a) / span;
        let wx = wx1 + (wx2 - wx1) * t;
        let wy = wy1 + (wy2 - wy1) * t;

        let n = frame_shape_functions(x, length, false, false);
        for k in 0..6 {
            feq[k] += weight * jac * (n[(0, k)] * wx + n[(1, k)] * wy);
        }
    }

    -feq
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transformation_matrix_horizontal() {
        let (c, s, l) = direction_cosines(&[0.0, 0.0], &[10.0, 0.0]);
        let t = member_transformation_matrix(c, s);

        assert_relative_eq!(l, 10.0, epsilon = 1e-12);
        assert_relative_eq!(t[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(1, 1)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(t[(2, 2)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transformation_matrix_orthogonal() {
        let (c, s, _) = direction_cosines(&[1.0, 2.0], &[4.0, 6.0]);
        let t = member_transformation_matrix(c, s);

        let product = t.transpose() * t;
        for i in 0..6 {
            for j in 0..6 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_frame_stiffness_symmetry() {
        let k = frame_local_stiffness(200e9, 0.01, 2e-4, 8.0);

        for i in 0..6 {
            for j in 0..6 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_release_zeroes_row_and_column() {
        let k = frame_local_stiffness(200e9, 0.01, 2e-4, 8.0);
        let released = apply_releases(&k, &[false, false, false, false, false, true]);

        for i in 0..6 {
            assert_eq!(released[(5, i)], 0.0);
            assert_eq!(released[(i, 5)], 0.0);
        }

        // Condensed bending block collapses to the propped stiffness 3EI/L^3
        let ei = 200e9 * 2e-4;
        assert_relative_eq!(released[(1, 1)], 3.0 * ei / 512.0, epsilon = 1.0);
    }

    #[test]
    fn test_fer_uniform_full_span() {
        let w = -5.0e3;
        let l = 6.0;
        let fer = fer_linear_load(0.0, w, 0.0, w, 0.0, l, l);

        assert_relative_eq!(fer[1], -w * l / 2.0, epsilon = 1e-6);
        assert_relative_eq!(fer[2], -w * l * l / 12.0, epsilon = 1e-6);
        assert_relative_eq!(fer[4], -w * l / 2.0, epsilon = 1e-6);
        assert_relative_eq!(fer[5], w * l * l / 12.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fer_point_load_midspan() {
        let p = -10.0e3;
        let l = 4.0;
        let fer = fer_point_load(0.0, p, 0.0, l / 2.0, l);

        assert_relative_eq!(fer[1], -p / 2.0, epsilon = 1e-6);
        assert_relative_eq!(fer[2], -p * l / 8.0, epsilon = 1e-6);
        assert_relative_eq!(fer[4], -p / 2.0, epsilon = 1e-6);
        assert_relative_eq!(fer[5], p * l / 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_fer_releases_propped_uniform() {
        let w = -5.0e3;
        let l = 6.0;
        let k = frame_local_stiffness(200e9, 0.01, 2e-4, l);
        let fer = fer_linear_load(0.0, w, 0.0, w, 0.0, l, l);

        let condensed = apply_fer_releases(&fer, &k, &[false, false, false, false, false, true]);

        // Propped cantilever carries 5wL/8 at the fixed end, 3wL/8 at the prop
        assert_relative_eq!(condensed[1], -w * l * 5.0 / 8.0, epsilon = 1e-6);
        assert_relative_eq!(condensed[2], -w * l * l / 8.0, epsilon = 1e-6);
        assert_relative_eq!(condensed[4], -w * l * 3.0 / 8.0, epsilon = 1e-6);
        assert_eq!(condensed[5], 0.0);
    }

    #[test]
    fn test_shape_functions_interpolate_ends() {
        let l = 5.0;
        let n0 = frame_shape_functions(0.0, l, false, false);
        let nl = frame_shape_functions(l, l, false, false);

        assert_relative_eq!(n0[(0, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(n0[(1, 1)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(n0[(2, 2)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(nl[(0, 3)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(nl[(1, 4)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(nl[(2, 5)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_released_shape_functions_drop_hinge_rotation() {
        let l = 5.0;
        let n = frame_shape_functions(2.0, l, true, false);

        // The released start rotation contributes nothing anywhere
        assert_eq!(n[(1, 2)], 0.0);
        assert_eq!(n[(2, 2)], 0.0);

        // End conditions still interpolate
        let n0 = frame_shape_functions(0.0, l, true, false);
        let nl = frame_shape_functions(l, l, true, false);
        assert_relative_eq!(n0[(1, 1)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(nl[(1, 4)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(nl[(2, 5)], 1.0, epsilon = 1e-12);
    }
}
