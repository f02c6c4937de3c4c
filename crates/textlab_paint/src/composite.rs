//! Porter-Duff "over" on straight-alpha RGBA8 pixels
//!
//! Channels are normalized to [0, 1] for the blend:
//!
//! ```text
//! out_a   = src_a + dst_a * (1 - src_a)
//! out_rgb = (src_rgb * src_a + dst_rgb * dst_a * (1 - src_a)) / out_a
//! ```
//!
//! The result is stored un-premultiplied and rounded to the nearest integer.

/// Blend one source pixel over one destination pixel
#[inline]
pub fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }
    if dst[3] == 0 {
        return src;
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let dst_weight = da * (1.0 - sa);
    let out_a = sa + dst_weight;

    let channel = |s: u8, d: u8| {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        to_u8((s * sa + d * dst_weight) / out_a)
    };

    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        to_u8(out_a),
    ]
}

/// Blend a whole source buffer over a destination buffer of the same layout
///
/// Both slices hold packed RGBA8 pixels; extra trailing bytes in the longer
/// slice are left untouched.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let blended = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&blended);
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
