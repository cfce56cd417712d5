/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

/// JACK 客户端名称
pub const JACK_CLIENT_NAME: &str = "sine-rs";

/// 输出端口名称
pub const OUTPUT_PORT_NAME: &str = "sine_out";

/// Passing this as the target disables auto-connect
pub const TARGET_NONE: &str = "0";

// ============================================================================
// Stream format
// ============================================================================

/// Sample rate (Hz)
pub const SAMPLE_RATE: u32 = 48000;

/// Mono output
pub const CHANNELS: usize = 1;

/// Bytes per S32 sample
pub const SAMPLE_SIZE: usize = std::mem::size_of::<i32>();

/// Bytes per frame
pub const STRIDE: usize = SAMPLE_SIZE * CHANNELS;

/// Largest JACK period the sink stages without reallocating
pub const MAX_QUANTUM_FRAMES: usize = 8192;

// ============================================================================
// Tone defaults
// ============================================================================

pub const DEFAULT_FREQUENCY: f64 = 1000.0;

pub const DEFAULT_VOLUME: f64 = 0.5;

// ============================================================================
// Offline rendering
// ============================================================================

/// Seconds rendered when `--duration` is not given
pub const DEFAULT_RENDER_SECONDS: f64 = 5.0;

/// Frames requested per render cycle
pub const DEFAULT_QUANTUM_FRAMES: usize = 1024;
