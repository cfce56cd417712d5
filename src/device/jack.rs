use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error, info, warn};

use crate::audio::oscillator::{Parameters, SignalGenerator};
use crate::audio::pool::BufferPool;
use crate::audio::stream::{AudioBuffer, ProcessOutcome, SineProducer, StreamCallback};
use crate::config::Target;
use crate::error::Result;
use crate::utils::consts::*;

pub fn print_jack_info(client: &jack::Client) -> (usize, usize) {
    let sample_rate = client.sample_rate();
    let buffer_size = client.buffer_size();
    info!("JACK Server Info:");
    info!("  Sample Rate: {} Hz", sample_rate);
    info!("  Buffer Size: {} samples", buffer_size);
    info!(
        "  Buffer Duration: {:.2} ms",
        (buffer_size as f64 / sample_rate as f64) * 1000.0
    );
    (sample_rate as usize, buffer_size as usize)
}

/// Counters written by the process thread, read by the main thread.
#[derive(Debug, Default)]
pub struct SinkStats {
    pub cycles: AtomicU64,
    pub frames: AtomicU64,
    pub skipped: AtomicU64,
}

impl SinkStats {
    fn record(&self, outcome: ProcessOutcome) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
        match outcome {
            ProcessOutcome::Submitted { frames } => {
                self.frames.fetch_add(frames as u64, Ordering::Relaxed);
            }
            ProcessOutcome::OutOfBuffers | ProcessOutcome::Unmapped => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn log_summary(&self) {
        info!(
            "Processed {} cycles, {} frames, {} skipped",
            self.cycles.load(Ordering::Relaxed),
            self.frames.load(Ordering::Relaxed),
            self.skipped.load(Ordering::Relaxed)
        );
    }
}

/// Copies the S32 samples of a submitted buffer into a JACK float port,
/// silencing whatever the buffer did not cover.
pub fn write_port(buffer: &AudioBuffer, out: &mut [f32]) -> usize {
    let mut written = 0;
    for (dst, sample) in out.iter_mut().zip(buffer.samples()) {
        *dst = sample as f32 / i32::MAX as f32;
        written += 1;
    }
    out[written..].fill(0.0);
    written
}

/// One cycle: stamp the JACK period as the request, run the callback, then
/// move whatever got submitted into the port.
pub fn process_cycle(
    callback: &mut StreamCallback<SineProducer>,
    pool: &mut BufferPool,
    out: &mut [f32],
) -> ProcessOutcome {
    pool.set_requested(out.len() as u64);
    let outcome = callback.on_process(pool);

    match pool.take_filled() {
        Some(buffer) => {
            write_port(&buffer, out);
            pool.recycle(buffer);
        }
        None => out.fill(0.0),
    }
    outcome
}

pub fn build_process_closure(
    mut out_port: jack::Port<jack::AudioOut>,
    mut callback: StreamCallback<SineProducer>,
    stats: Arc<SinkStats>,
) -> impl FnMut(&jack::Client, &jack::ProcessScope) -> jack::Control + Send + 'static {
    let mut pool = BufferPool::new(1, MAX_QUANTUM_FRAMES, STRIDE);

    move |_: &jack::Client, ps: &jack::ProcessScope| -> jack::Control {
        let out_buffer = out_port.as_mut_slice(ps);
        let outcome = process_cycle(&mut callback, &mut pool, out_buffer);
        stats.record(outcome);
        jack::Control::Continue
    }
}

pub fn connect_output_to_first_system_input(client: &jack::Client, out_port_name: &str) {
    let system_input_ports = client.ports(
        None,
        None,
        jack::PortFlags::IS_INPUT | jack::PortFlags::IS_PHYSICAL,
    );
    debug!("{} physical input found.", system_input_ports.len());

    match system_input_ports.first() {
        Some(system_in) => connect(client, out_port_name, system_in),
        None => warn!("No physical playback port to connect to"),
    }
}

fn connect(client: &jack::Client, out_port_name: &str, destination: &str) {
    match client.connect_ports_by_name(out_port_name, destination) {
        Ok(_) => info!("Connected Output: {} -> {}", out_port_name, destination),
        Err(e) => error!(
            "Failed connecting Output {} -> {}: {}",
            out_port_name, destination, e
        ),
    }
}

pub fn connect_target(client: &jack::Client, out_port_name: &str, target: &Target) {
    match target {
        Target::Auto => connect_output_to_first_system_input(client, out_port_name),
        Target::Port(name) => connect(client, out_port_name, name),
        Target::Disabled => info!("Auto-connect disabled, {} left unconnected", out_port_name),
    }
}

/// Plays the tone until `shutdown` fires, then deactivates the client.
pub fn run(
    params: Parameters,
    target: &Target,
    shutdown: crossbeam_channel::Receiver<()>,
) -> Result<Arc<SinkStats>> {
    let (client, status) =
        jack::Client::new(JACK_CLIENT_NAME, jack::ClientOptions::NO_START_SERVER)?;
    info!("JACK client status: {:?}", status);

    let (sample_rate, buffer_size) = print_jack_info(&client);
    if sample_rate != SAMPLE_RATE as usize {
        warn!(
            "Server runs at {} Hz, expected {} Hz; generating at the server rate",
            sample_rate, SAMPLE_RATE
        );
    }
    if buffer_size > MAX_QUANTUM_FRAMES {
        warn!(
            "Server period {} exceeds {} staged frames; the remainder is silence",
            buffer_size, MAX_QUANTUM_FRAMES
        );
    }

    let out_port = client.register_port(OUTPUT_PORT_NAME, jack::AudioOut::default())?;
    let out_port_name = out_port.name()?;

    let callback =
        StreamCallback::sine(SignalGenerator::new(params, sample_rate as u32));
    let stats = Arc::new(SinkStats::default());
    let process_cb = build_process_closure(out_port, callback, stats.clone());
    let process = jack::contrib::ClosureProcessHandler::new(process_cb);

    let active_client = client.activate_async((), process)?;
    connect_target(active_client.as_client(), &out_port_name, target);

    info!("Playing {:.1} Hz, press Ctrl-C to stop", params.frequency);
    if shutdown.recv().is_err() {
        warn!("Shutdown channel closed");
    }

    info!("Exiting gracefully...");
    if let Err(err) = active_client.deactivate() {
        error!("Error deactivating client: {}", err);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::stream::Chunk;

    fn sine(volume: f64) -> StreamCallback<SineProducer> {
        StreamCallback::sine(SignalGenerator::new(
            Parameters {
                frequency: 1000.0,
                volume,
            },
            48000,
        ))
    }

    #[test]
    fn cycle_fills_the_whole_period() {
        let mut cb = sine(1.0);
        let mut pool = BufferPool::new(1, 512, STRIDE);
        let mut out = [9.0f32; 256];

        let outcome = process_cycle(&mut cb, &mut pool, &mut out);
        assert_eq!(outcome, ProcessOutcome::Submitted { frames: 256 });
        assert!(out.iter().all(|s| s.abs() <= 1.0));
        // sample 12 sits at the quarter cycle peak
        assert!((out[11] - 1.0).abs() < 1e-6);
        assert_eq!(pool.free_len(), 1);
    }

    #[test]
    fn period_larger_than_staging_is_padded() {
        let mut cb = sine(0.5);
        let mut pool = BufferPool::new(1, 64, STRIDE);
        let mut out = [9.0f32; 100];

        let outcome = process_cycle(&mut cb, &mut pool, &mut out);
        assert_eq!(outcome, ProcessOutcome::Submitted { frames: 64 });
        assert!(out[..64].iter().any(|&s| s != 0.0));
        assert!(out[64..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn empty_pool_outputs_silence() {
        let mut cb = sine(1.0);
        let mut pool = BufferPool::from_buffers(Vec::<AudioBuffer>::new());
        let mut out = [9.0f32; 32];

        let outcome = process_cycle(&mut cb, &mut pool, &mut out);
        assert_eq!(outcome, ProcessOutcome::OutOfBuffers);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn port_conversion_uses_chunk_extent() {
        let mut buffer = AudioBuffer::with_capacity(16);
        if let Some(data) = buffer.data_mut() {
            data[..4].copy_from_slice(&i32::MAX.to_ne_bytes());
            data[4..8].copy_from_slice(&(-(i32::MAX / 2)).to_ne_bytes());
        }
        *buffer.chunk_mut() = Chunk {
            offset: 0,
            stride: 4,
            size: 8,
        };

        let mut out = [9.0f32; 4];
        assert_eq!(write_port(&buffer, &mut out), 2);
        assert_eq!(out[0], 1.0);
        assert!((out[1] + 0.5).abs() < 1e-6);
        assert_eq!(&out[2..], &[0.0, 0.0]);
    }

    #[test]
    fn stats_count_skips() {
        let stats = SinkStats::default();
        stats.record(ProcessOutcome::Submitted { frames: 128 });
        stats.record(ProcessOutcome::OutOfBuffers);
        assert_eq!(stats.cycles.load(Ordering::Relaxed), 2);
        assert_eq!(stats.frames.load(Ordering::Relaxed), 128);
        assert_eq!(stats.skipped.load(Ordering::Relaxed), 1);
    }
}
