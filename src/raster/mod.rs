/// Owned RGBA8 pixel buffer with crop/blit/sample.
pub mod buffer;
/// Image decode/encode through the `image` crate.
pub mod codec;
