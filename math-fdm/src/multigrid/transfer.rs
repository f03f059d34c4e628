//! Inter-grid transfer operators
//!
//! Both operators are separable: the 3D weight of a fine/coarse cell pair is
//! the product of per-axis weights.
//!
//! - [`restrict`]: fine -> coarse with the 1D kernel (1/8, 3/8, 3/8, 1/8)
//!   centred on fine cells `2c` and `2c + 1`
//! - [`correct`]: coarse -> fine, adding the interpolated coarse field with
//!   the 1D kernel (1/4, 3/4, 3/4, 1/4)
//!
//! Taps that fall outside the fine grid are clamped to the nearest fine cell,
//! so odd resolutions and flat (extent 1) axes need no special casing.

use crate::grid::{FdmVector, Size3};
use crate::parallel::parallel_rows_mut;

const RESTRICTION_KERNEL: [f64; 4] = [0.125, 0.375, 0.375, 0.125];
const CORRECTION_KERNEL: [f64; 4] = [0.25, 0.75, 0.75, 0.25];

type Taps = Vec<(usize, f64)>;

/// Fine cells feeding coarse cell `c` along one axis
fn fine_taps(c: usize, coarse_n: usize, fine_n: usize) -> [usize; 4] {
    let last = fine_n - 1;
    let lo = if c > 0 { 2 * c - 1 } else { 2 * c };
    let hi = if c + 1 < coarse_n { 2 * c + 2 } else { 2 * c + 1 };
    [lo, 2 * c, 2 * c + 1, hi].map(|f| f.min(last))
}

/// Add `weight` to `index`, merging with an existing tap
fn push_tap(taps: &mut Taps, index: usize, weight: f64) {
    match taps.iter_mut().find(|(i, _)| *i == index) {
        Some((_, w)) => *w += weight,
        None => taps.push((index, weight)),
    }
}

/// Per-axis restriction weights, indexed by coarse cell
fn restriction_taps(fine_n: usize, coarse_n: usize) -> Vec<Taps> {
    (0..coarse_n)
        .map(|c| {
            let mut taps = Taps::with_capacity(4);
            for (f, w) in fine_taps(c, coarse_n, fine_n).into_iter().zip(RESTRICTION_KERNEL) {
                push_tap(&mut taps, f, w);
            }
            taps
        })
        .collect()
}

/// Per-axis correction weights, indexed by fine cell
///
/// The scatter pattern of the correction kernel is inverted into a gather.
/// Weights reaching a fine cell are renormalised to sum to one, so clamped
/// boundary taps still interpolate a constant field exactly.
fn correction_taps(fine_n: usize, coarse_n: usize) -> Vec<Taps> {
    let mut taps = vec![Taps::with_capacity(2); fine_n];
    for c in 0..coarse_n {
        for (f, w) in fine_taps(c, coarse_n, fine_n).into_iter().zip(CORRECTION_KERNEL) {
            push_tap(&mut taps[f], c, w);
        }
    }
    for cell in &mut taps {
        let total: f64 = cell.iter().map(|(_, w)| w).sum();
        if total > 0.0 {
            cell.iter_mut().for_each(|(_, w)| *w /= total);
        }
    }
    taps
}

fn assert_coarsening(fine: Size3, coarse: Size3) {
    assert_eq!(
        fine.coarsened(),
        coarse,
        "Coarse resolution must be the fine resolution halved (rounding up)"
    );
}

/// Restrict a fine-level field onto the next coarser level
///
/// Every coarse value is a weighted average of up to 4x4x4 fine values; the
/// weights of one coarse cell sum to one.
pub fn restrict(finer: &FdmVector, coarser: &mut FdmVector) {
    let (fs, cs) = (finer.size(), coarser.size());
    assert_coarsening(fs, cs);

    let tx = restriction_taps(fs.x, cs.x);
    let ty = restriction_taps(fs.y, cs.y);
    let tz = restriction_taps(fs.z, cs.z);
    let fine = finer.as_slice();

    parallel_rows_mut(coarser.as_slice_mut(), cs.x, |r, row| {
        let (j, k) = (r % cs.y, r / cs.y);
        for (i, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for &(fk, wz) in &tz[k] {
                for &(fj, wy) in &ty[j] {
                    let base = fs.index(0, fj, fk);
                    let w = wy * wz;
                    for &(fi, wx) in &tx[i] {
                        sum += w * wx * fine[base + fi];
                    }
                }
            }
            *out = sum;
        }
    });
}

/// Interpolate a coarse-level field and add it onto the next finer level
pub fn correct(coarser: &FdmVector, finer: &mut FdmVector) {
    let (fs, cs) = (finer.size(), coarser.size());
    assert_coarsening(fs, cs);

    let tx = correction_taps(fs.x, cs.x);
    let ty = correction_taps(fs.y, cs.y);
    let tz = correction_taps(fs.z, cs.z);
    let coarse = coarser.as_slice();

    parallel_rows_mut(finer.as_slice_mut(), fs.x, |r, row| {
        let (j, k) = (r % fs.y, r / fs.y);
        for (i, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for &(ck, wz) in &tz[k] {
                for &(cj, wy) in &ty[j] {
                    let base = cs.index(0, cj, ck);
                    let w = wy * wz;
                    for &(ci, wx) in &tx[i] {
                        sum += w * wx * coarse[base + ci];
                    }
                }
            }
            *out += sum;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_restriction_weights_sum_to_one() {
        for (fine_n, coarse_n) in [(8, 4), (7, 4), (5, 3), (2, 1), (1, 1)] {
            for taps in restriction_taps(fine_n, coarse_n) {
                let total: f64 = taps.iter().map(|(_, w)| w).sum();
                assert_relative_eq!(total, 1.0, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_restriction_interior_kernel() {
        let taps = restriction_taps(8, 4);
        assert_eq!(taps[1], vec![(1, 0.125), (2, 0.375), (3, 0.375), (4, 0.125)]);
        // Left boundary folds the missing tap onto cell 0
        assert_eq!(taps[0], vec![(0, 0.5), (1, 0.375), (2, 0.125)]);
    }

    #[test]
    fn test_correction_interior_kernel() {
        let taps = correction_taps(8, 4);
        // Fine cell 3 sits between coarse cells 1 (near) and 2 (far)
        assert_eq!(taps[3], vec![(1, 0.75), (2, 0.25)]);
        for cell in &taps {
            let total: f64 = cell.iter().map(|(_, w)| w).sum();
            assert_relative_eq!(total, 1.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_restrict_constant_field() {
        for fine_size in [Size3::new_2d(8, 8), Size3::new(7, 5, 3), Size3::new_1d(9)] {
            let fine = FdmVector::from_elem(fine_size, 2.5);
            let mut coarse = FdmVector::new(fine_size.coarsened());
            restrict(&fine, &mut coarse);
            for v in coarse.iter() {
                assert_relative_eq!(*v, 2.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_restrict_linear_field_interior() {
        let fine = FdmVector::from_fn(Size3::new_1d(16), |i, _, _| i as f64);
        let mut coarse = FdmVector::new(Size3::new_1d(8));
        restrict(&fine, &mut coarse);
        // Interior coarse cell c averages to the midpoint 2c + 0.5
        for c in 1..7 {
            assert_relative_eq!(coarse[(c, 0, 0)], 2.0 * c as f64 + 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_correct_adds_constant() {
        for fine_size in [Size3::new_2d(8, 6), Size3::new(5, 3, 7)] {
            let coarse = FdmVector::from_elem(fine_size.coarsened(), 1.5);
            let mut fine = FdmVector::from_elem(fine_size, 1.0);
            correct(&coarse, &mut fine);
            for v in fine.iter() {
                assert_relative_eq!(*v, 2.5, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_correct_interpolates_between_coarse_cells() {
        let coarse = FdmVector::from_fn(Size3::new_1d(4), |i, _, _| i as f64);
        let mut fine = FdmVector::new(Size3::new_1d(8));
        correct(&coarse, &mut fine);
        assert_relative_eq!(fine[(2, 0, 0)], 0.75 * 1.0 + 0.25 * 0.0);
        assert_relative_eq!(fine[(3, 0, 0)], 0.75 * 1.0 + 0.25 * 2.0);
    }

    #[test]
    #[should_panic(expected = "Coarse resolution must be the fine resolution halved")]
    fn test_restrict_rejects_wrong_coarse_size() {
        let fine = FdmVector::new_2d(8, 8);
        let mut coarse = FdmVector::new_2d(3, 4);
        restrict(&fine, &mut coarse);
    }
}
