mod macros;
mod ro;

pub use ro::ROSlice;
