use crate::riding::GridPos;

/// Smallest `c` with `c * c >= n`.
pub fn ceil_sqrt(n: usize) -> usize {
    let mut c = (n as f64).sqrt() as usize;
    while c * c < n {
        c += 1;
    }
    while c > 0 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    c
}

/// Columns and rows of the rectangle holding `n` packed ridings.
/// Leftover cells go to width: `ceil(sqrt(n))` columns, then only as many
/// rows as needed.
pub fn packed_dims(n: usize) -> (usize, usize) {
    let cols = ceil_sqrt(n);
    if cols == 0 {
        return (0, 0);
    }
    (cols, n.div_ceil(cols))
}

/// Offsets for `n` ridings filled row-major, left to right then top to bottom.
pub fn pack_offsets(n: usize) -> Vec<GridPos> {
    let (cols, _rows) = packed_dims(n);
    (0..n)
        .map(|i| GridPos::new((i / cols) as i32, (i % cols) as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ceil_sqrt() {
        let expected = [0, 1, 2, 2, 2, 3, 3, 3, 3, 3, 4];
        for (n, c) in expected.iter().enumerate() {
            assert_eq!(ceil_sqrt(n), *c, "ceil_sqrt({})", n);
        }
        assert_eq!(ceil_sqrt(121), 11);
        assert_eq!(ceil_sqrt(122), 12);
    }

    #[test]
    fn test_packed_dims() {
        assert_eq!(packed_dims(0), (0, 0));
        assert_eq!(packed_dims(1), (1, 1));
        assert_eq!(packed_dims(3), (2, 2));
        assert_eq!(packed_dims(5), (3, 2));
        assert_eq!(packed_dims(7), (3, 3));
        assert_eq!(packed_dims(78), (9, 9));
        assert_eq!(packed_dims(42), (7, 6));
    }

    #[test]
    fn test_three_offsets() {
        assert_eq!(
            pack_offsets(3),
            vec![GridPos::new(0, 0), GridPos::new(0, 1), GridPos::new(1, 0)]
        );
    }

    proptest! {
        #[test]
        fn packing_fits_its_rectangle(n in 1usize..400) {
            let (cols, rows) = packed_dims(n);
            let offsets = pack_offsets(n);
            prop_assert_eq!(offsets.len(), n);
            prop_assert!(cols * cols >= n);
            prop_assert!((cols - 1) * (cols - 1) < n);
            // No spare row past the last partially filled one.
            prop_assert!(rows * cols >= n && (rows - 1) * cols < n);
            for (i, offset) in offsets.iter().enumerate() {
                prop_assert!(offset.col >= 0 && (offset.col as usize) < cols);
                prop_assert!(offset.row >= 0 && (offset.row as usize) < rows);
                prop_assert_eq!(offset.row as usize * cols + offset.col as usize, i);
            }
        }
    }
}
