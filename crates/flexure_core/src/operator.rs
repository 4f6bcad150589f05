//! Sparse assembly of the pentadiagonal operator A from its five
//! diagonals, plus the NaN-poison check (`spec.md` 4.5 / 4.3, invariant
//! I2) that stands in for the library's cyclic-shift convention.
//!
//! This crate assembles directly into coordinate (COO) form rather
//! than shifting each diagonal to column-0 alignment the way a
//! `spdiags`-style packer would: `spec.md`'s own design notes call the
//! shift "a storage-format accommodation, not a mathematical step" and
//! say a triplet/COO builder can skip it. Row `i`'s five coefficients
//! are simply inserted at columns `{i-2,...,i+2}` (wrapped modulo `n`
//! for `Periodic`), which is what the shift was approximating anyway.

use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::error::{FlexureError, FlexureResult};
use crate::stencil::Diagonals;

/// Builds A as a CSR matrix, asserting that every coefficient actually
/// packed into it is finite. Off-grid coefficients that are skipped
/// (non-periodic domain edges) may be NaN; anything that would be
/// packed must not be.
pub fn build_matrix(diag: &Diagonals, periodic: bool) -> FlexureResult<CsrMatrix<f64>> {
    let n = diag.len();
    let mut coo = CooMatrix::new(n, n);

    let mut insert = |row: usize, col_signed: isize, value: f64, label: &'static str| -> FlexureResult<()> {
        let col = if periodic {
            Some(col_signed.rem_euclid(n as isize) as usize)
        } else if col_signed >= 0 && (col_signed as usize) < n {
            Some(col_signed as usize)
        } else {
            None
        };
        match col {
            Some(c) => {
                if !value.is_finite() {
                    return Err(FlexureError::PoisonedStencil { row, diagonal: label });
                }
                coo.push(row, c, value);
                Ok(())
            }
            None => Ok(()), // off-grid and not wrapped: never packed
        }
    };

    for i in 0..n {
        let ii = i as isize;
        insert(i, ii - 2, diag.l2[i], "l2")?;
        insert(i, ii - 1, diag.l1[i], "l1")?;
        insert(i, ii, diag.c0[i], "c0")?;
        insert(i, ii + 1, diag.r1[i], "r1")?;
        insert(i, ii + 2, diag.r2[i], "r2")?;
    }

    Ok(CsrMatrix::from(&coo))
}
