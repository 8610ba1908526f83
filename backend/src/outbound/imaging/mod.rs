//! Image transcoding adapters.

mod png_normalizer;

pub use png_normalizer::PngImageNormalizer;
