pub mod oscillator;
pub mod pool;
pub mod render;
pub mod stream;
