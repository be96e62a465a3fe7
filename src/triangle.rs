/// A triangle in index form: three positions in the paired vertex array,
/// plus a packed `0xAARRGGBB` color.
///
/// The indices are only meaningful together with that array and must be
/// valid for it whenever the triangle is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [usize; 3],
    pub color: u32,
}

impl Triangle {
    pub const fn new(a: usize, b: usize, c: usize, color: u32) -> Self {
        Self {
            indices: [a, b, c],
            color,
        }
    }
}
