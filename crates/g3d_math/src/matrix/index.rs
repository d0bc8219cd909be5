//! Offsets of the matrix elements in the column-major value array.

pub const M00: usize = 0;
pub const M01: usize = 4;
pub const M02: usize = 8;
pub const M03: usize = 12;
pub const M10: usize = 1;
pub const M11: usize = 5;
pub const M12: usize = 9;
pub const M13: usize = 13;
pub const M20: usize = 2;
pub const M21: usize = 6;
pub const M22: usize = 10;
pub const M23: usize = 14;
pub const M30: usize = 3;
pub const M31: usize = 7;
pub const M32: usize = 11;
pub const M33: usize = 15;

/// The offset of the element at the given row and column.
#[inline]
pub const fn offset(row: usize, col: usize) -> usize {
    col * 4 + row
}
