/// Chart layer: backend-independent figure descriptions and their export
/// to SVG, PNG, and PDF files.

pub mod export;
pub mod figure;
