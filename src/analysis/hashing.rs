//! Seeded content hash used as pattern identity
//!
//! The hash is order-dependent and not cryptographic. Distinct patterns can
//! collide, in which case the registry merges them.

use crate::analysis::raster::Pixel;
use crate::io::configuration::PATTERN_HASH_SEED;

/// Fold one pixel into the running hash
#[inline]
pub const fn mix_pixel(mut hash: u32, pixel: Pixel) -> u32 {
    hash = hash.wrapping_add(pixel.r() as u32);
    hash ^= hash << 13;
    hash = hash.wrapping_add(pixel.g() as u32);
    hash ^= hash >> 7;
    hash = hash.wrapping_add(pixel.b() as u32);
    hash ^= hash << 3;
    hash = hash.wrapping_add(pixel.a() as u32);
    hash ^= hash >> 17;
    hash
}

/// Hash a pixel sequence starting from [`PATTERN_HASH_SEED`]
pub fn pattern_hash(pixels: &[Pixel]) -> u32 {
    pixels
        .iter()
        .fold(PATTERN_HASH_SEED, |hash, &pixel| mix_pixel(hash, pixel))
}
