use ccl_core::BinaryImage;

/// Builds an image from string rows where `#` marks foreground.
#[must_use]
pub fn picture(rows: &[&str]) -> BinaryImage {
    let rows: Vec<Vec<u8>> = rows
        .iter()
        .map(|row| row.bytes().map(|byte| u8::from(byte == b'#')).collect())
        .collect();
    BinaryImage::from_rows(&rows).expect("picture rows must be rectangular")
}

/// Two blocks of three and four pixels separated by a diagonal gap.
#[must_use]
pub fn two_blocks() -> BinaryImage {
    picture(&["##..", "#...", "..##", "..##"])
}
