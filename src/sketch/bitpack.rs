use crate::model::project::{MODULE_SIZE, Row};

/// Pack one row of LED states into a single byte.
///
/// Column `c` maps to bit `7 - c`: column 0 is the most significant bit,
/// column 7 the least significant. An all-off row packs to `0`.
pub fn pack_row(row: &Row) -> u8 {
    let mut value = 0u8;
    for (col, lit) in row.leds.iter().enumerate() {
        if *lit {
            value |= 1 << (MODULE_SIZE - 1 - col);
        }
    }
    value
}

/// Inverse of [`pack_row`].
pub fn unpack_row(byte: u8) -> Row {
    let mut row = Row::default();
    for col in 0..MODULE_SIZE {
        row.leds[col] = byte & (1 << (MODULE_SIZE - 1 - col)) != 0;
    }
    row
}

/// Render a packed row as the hex literal used in generated sketches:
/// `0x` prefix, lowercase digits, no zero padding (`0` renders as `0x0`).
pub fn row_hex(byte: u8) -> String {
    format!("{byte:#x}")
}
