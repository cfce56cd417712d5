pub mod audio;
pub mod config;
pub mod device;
pub mod error;
pub mod ui;
pub mod utils;

pub use audio::oscillator::{OscillatorState, Parameters, SignalGenerator};
pub use audio::stream::{
    AudioBuffer, BufferQueue, Chunk, FilledExtent, FrameProducer, ProcessOutcome,
    SineProducer, StreamCallback,
};
pub use error::{Result, SineError};
