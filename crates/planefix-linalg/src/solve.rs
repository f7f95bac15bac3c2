use crate::error::LinalgError;

/// Relative tolerance under which a pivot is treated as zero.
///
/// The pivot magnitude is compared against `PIVOT_EPSILON` times the largest
/// absolute entry of the input matrix (or 1, whichever is larger).
pub const PIVOT_EPSILON: f64 = 1e-10;

/// Solve the square linear system `A x = b`.
///
/// Uses Gaussian elimination with partial pivoting followed by back
/// substitution. The solver takes ownership of `a` and `b` and uses them as
/// its working storage.
///
/// # Arguments
///
/// * `a` - The coefficient matrix as `n` rows of `n` entries.
/// * `b` - The right-hand side with `n` entries.
///
/// # Returns
///
/// The solution vector `x` with `n` entries.
///
/// # Errors
///
/// * [`LinalgError::DimensionMismatch`] if the system is empty or not square.
/// * [`LinalgError::DegenerateSystem`] if a pivot is (numerically) zero.
///
/// # Example
///
/// ```
/// use planefix_linalg::solve;
///
/// let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
/// let b = vec![3.0, 5.0];
/// let x = solve(a, b).unwrap();
///
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, LinalgError> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return Err(LinalgError::DimensionMismatch {
            rows: a.len(),
            cols: a.first().map_or(0, Vec::len),
            rhs: n,
        });
    }
    if let Some(row) = a.iter().find(|row| row.len() != n) {
        return Err(LinalgError::DimensionMismatch {
            rows: n,
            cols: row.len(),
            rhs: n,
        });
    }

    forward_eliminate(a.as_mut_slice(), b.as_mut_slice())?;

    let mut x = vec![0.0; n];
    back_substitute(a.as_slice(), b.as_slice(), &mut x);
    Ok(x)
}

/// Solve an 8x8 linear system without heap allocation.
///
/// Same algorithm and error semantics as [`solve`].
pub fn solve_8x8(mut a: [[f64; 8]; 8], mut b: [f64; 8]) -> Result<[f64; 8], LinalgError> {
    forward_eliminate(a.as_mut_slice(), b.as_mut_slice())?;

    let mut x = [0.0; 8];
    back_substitute(a.as_slice(), b.as_slice(), &mut x);
    Ok(x)
}

// Reduces `a` to upper-triangular form in place, applying the same row
// operations to `b`.
fn forward_eliminate<R>(a: &mut [R], b: &mut [f64]) -> Result<(), LinalgError>
where
    R: AsRef<[f64]> + AsMut<[f64]>,
{
    let n = b.len();
    let scale = a
        .iter()
        .flat_map(|row| row.as_ref().iter())
        .fold(1.0f64, |acc, v| acc.max(v.abs()));
    let tolerance = PIVOT_EPSILON * scale;

    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_val = a[col].as_ref()[col].abs();
        for row in col + 1..n {
            let val = a[row].as_ref()[col].abs();
            if val > pivot_val {
                pivot_val = val;
                pivot_row = row;
            }
        }

        if !pivot_val.is_finite() || pivot_val < tolerance {
            return Err(LinalgError::DegenerateSystem {
                column: col,
                pivot: pivot_val,
            });
        }

        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        let (upper, lower) = a.split_at_mut(col + 1);
        let pivot = upper[col].as_ref();
        for (offset, row) in lower.iter_mut().enumerate() {
            let row = row.as_mut();
            let factor = row[col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                row[k] -= factor * pivot[k];
            }
            b[col + 1 + offset] -= factor * b[col];
        }
    }

    Ok(())
}

// Solves the upper-triangular system left by `forward_eliminate`.
fn back_substitute<R>(a: &[R], b: &[f64], x: &mut [f64])
where
    R: AsRef<[f64]>,
{
    let n = b.len();
    for i in (0..n).rev() {
        let row = a[i].as_ref();
        let sum: f64 = (i + 1..n).map(|j| row[j] * x[j]).sum();
        x[i] = (b[i] - sum) / row[i];
    }
}
