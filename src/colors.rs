//! Packed `0xAARRGGBB` color helpers.

pub const RED: u32 = 0xFFFF0000;
pub const GREEN: u32 = 0xFF00FF00;
pub const BLUE: u32 = 0xFF0000FF;
pub const YELLOW: u32 = 0xFFFFFF00;
pub const PURPLE: u32 = 0xFFFF00FF;
pub const CYAN: u32 = 0xFF00FFFF;
pub const WHITE: u32 = 0xFFFFFFFF;
pub const BLACK: u32 = 0xFF000000;

/// Brightness applied to a triangle's fill color when drawing its outline.
pub const OUTLINE_BRIGHTNESS: f32 = 0.75;

/// Splits a packed color into `(a, r, g, b)`.
#[inline]
pub fn unpack(color: u32) -> (u8, u8, u8, u8) {
    (
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    )
}

#[inline]
pub fn pack(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Multiplies the RGB channels by `factor`, saturating at 255. Alpha is kept.
pub fn scale(color: u32, factor: f32) -> u32 {
    let (a, r, g, b) = unpack(color);
    let channel = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
    pack(a, channel(r), channel(g), channel(b))
}

/// Like [`scale`] but clamps the brightness to `[0, 1]` first.
pub fn shade(color: u32, brightness: f32) -> u32 {
    scale(color, brightness.clamp(0.0, 1.0))
}

/// Per-channel saturating sum of two colors. Alpha is taken from `lhs`.
pub fn add(lhs: u32, rhs: u32) -> u32 {
    let (a, r0, g0, b0) = unpack(lhs);
    let (_, r1, g1, b1) = unpack(rhs);
    pack(a, r0.saturating_add(r1), g0.saturating_add(g1), b0.saturating_add(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_channels() {
        assert_eq!(unpack(0x80112233), (0x80, 0x11, 0x22, 0x33));
        assert_eq!(pack(0x80, 0x11, 0x22, 0x33), 0x80112233);
    }

    #[test]
    fn outline_darkens_to_three_quarters() {
        assert_eq!(scale(0xFFC8640C, OUTLINE_BRIGHTNESS), 0xFF964B09);
    }

    #[test]
    fn scale_saturates() {
        assert_eq!(scale(0xFF808080, 4.0), WHITE);
    }

    #[test]
    fn shade_clamps_brightness() {
        assert_eq!(shade(RED, 2.0), RED);
        assert_eq!(shade(RED, -1.0), BLACK);
    }

    #[test]
    fn add_saturates_per_channel() {
        assert_eq!(add(0xFFF00010, 0xFF2000F0), 0xFFFF00FF);
    }
}
