use std::f64::consts::TAU;

/// Full-scale value of a signed 32-bit sample.
pub const S32_FULL_SCALE: f64 = 2147483647.0;

/// Tone parameters, fixed for the lifetime of a stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    /// Frequency in Hz
    pub frequency: f64,
    /// Linear gain, nominally 0.0-1.0 but not clamped
    pub volume: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            frequency: crate::utils::consts::DEFAULT_FREQUENCY,
            volume: crate::utils::consts::DEFAULT_VOLUME,
        }
    }
}

/// Phase of the oscillator in radians, kept in `[0, 2π)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OscillatorState {
    accumulator: f64,
}

impl OscillatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f64 {
        self.accumulator
    }
}

/// Phase-accumulating sine oscillator producing S32 samples.
///
/// The phase is wrapped with a single subtraction of `2π`. A frequency whose
/// per-sample advance reaches `2π` (anything at or above the sample rate)
/// leaves the accumulator outside `[0, 2π)` and the output is aliased; this
/// is not corrected.
#[derive(Clone, Debug)]
pub struct SignalGenerator {
    params: Parameters,
    sample_rate: f64,
    state: OscillatorState,
}

impl SignalGenerator {
    pub fn new(params: Parameters, sample_rate: u32) -> Self {
        Self::with_state(params, sample_rate, OscillatorState::new())
    }

    pub fn with_state(
        params: Parameters,
        sample_rate: u32,
        state: OscillatorState,
    ) -> Self {
        Self {
            params,
            sample_rate: sample_rate as f64,
            state,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn state(&self) -> OscillatorState {
        self.state
    }

    pub fn phase(&self) -> f64 {
        self.state.accumulator
    }

    /// Phase advance per sample in radians.
    pub fn phase_step(&self) -> f64 {
        TAU * self.params.frequency / self.sample_rate
    }

    /// Advances the phase by one sample and returns the scaled sample.
    ///
    /// Out-of-range products (volume above 1.0) saturate at the `i32` bounds.
    #[inline]
    pub fn next_sample(&mut self) -> i32 {
        self.state.accumulator += self.phase_step();
        if self.state.accumulator >= TAU {
            self.state.accumulator -= TAU;
        }

        let value = self.state.accumulator.sin() * self.params.volume;
        (value * S32_FULL_SCALE) as i32
    }
}
