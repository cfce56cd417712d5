pub mod progress;

use crate::audio::oscillator::Parameters;

pub fn print_banner(params: &Parameters) {
    println!(
        "sine-rs {} | {:.1} Hz @ volume {:.3}",
        env!("CARGO_PKG_VERSION"),
        params.frequency,
        params.volume
    );
}
