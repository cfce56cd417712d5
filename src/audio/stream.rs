use byteorder::{ByteOrder, NativeEndian};
use tracing::warn;

use super::oscillator::SignalGenerator;
use crate::utils::consts::{CHANNELS, SAMPLE_SIZE};

/// Framing metadata of the valid region of a buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Chunk {
    pub offset: u32,
    pub stride: u32,
    pub size: u32,
}

/// A buffer lent to the stream callback by the collaborator for one cycle.
///
/// Ownership moves into the callback on dequeue and back out on queue or
/// return, so the callback cannot hold on to it past a single invocation.
#[derive(Debug)]
pub struct AudioBuffer {
    data: Option<Box<[u8]>>,
    chunk: Chunk,
    requested: u64,
}

impl AudioBuffer {
    /// Allocates a zeroed buffer of `max_size` bytes.
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            data: Some(vec![0u8; max_size].into_boxed_slice()),
            chunk: Chunk::default(),
            requested: 0,
        }
    }

    /// A buffer whose storage was never mapped.
    pub fn unmapped() -> Self {
        Self {
            data: None,
            chunk: Chunk::default(),
            requested: 0,
        }
    }

    pub fn max_size(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.len())
    }

    /// Frames the collaborator would like, 0 when it has no preference.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn set_requested(&mut self, frames: u64) {
        self.requested = frames;
    }

    pub fn is_mapped(&self) -> bool {
        self.data.is_some()
    }

    pub fn data_mut(&mut self) -> Option<&mut [u8]> {
        self.data.as_deref_mut()
    }

    pub fn chunk(&self) -> &Chunk {
        &self.chunk
    }

    pub fn chunk_mut(&mut self) -> &mut Chunk {
        &mut self.chunk
    }

    /// Bytes covered by the chunk metadata.
    pub fn valid_bytes(&self) -> &[u8] {
        let Some(data) = self.data.as_deref() else {
            return &[];
        };
        let start = (self.chunk.offset as usize).min(data.len());
        let end = start
            .saturating_add(self.chunk.size as usize)
            .min(data.len());
        &data[start..end]
    }

    /// S32 samples covered by the chunk metadata.
    pub fn samples(&self) -> impl Iterator<Item = i32> + '_ {
        self.valid_bytes()
            .chunks_exact(SAMPLE_SIZE)
            .map(NativeEndian::read_i32)
    }
}

/// The collaborator's side of the buffer exchange.
pub trait BufferQueue {
    /// Takes the next free buffer, `None` when the queue is drained.
    fn dequeue_buffer(&mut self) -> Option<AudioBuffer>;

    /// Submits a filled buffer for playback.
    fn queue_buffer(&mut self, buffer: AudioBuffer);

    /// Hands back a buffer that was dequeued but not filled.
    fn return_buffer(&mut self, buffer: AudioBuffer);
}

/// Region written by a [`FrameProducer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilledExtent {
    pub frames: usize,
    pub stride: usize,
}

impl FilledExtent {
    pub fn size(&self) -> usize {
        self.frames * self.stride
    }
}

/// Something that can write audio frames into raw buffer storage.
pub trait FrameProducer {
    /// Bytes per frame.
    fn stride(&self) -> usize;

    /// Writes frames from the start of `dst`. `requested_frames` of 0 means
    /// "as many as fit"; otherwise the smaller of the request and the
    /// capacity is produced.
    fn fill(&mut self, dst: &mut [u8], requested_frames: u64) -> FilledExtent;
}

/// Mono S32 sine frames from a [`SignalGenerator`].
#[derive(Clone, Debug)]
pub struct SineProducer {
    generator: SignalGenerator,
}

impl SineProducer {
    pub fn new(generator: SignalGenerator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &SignalGenerator {
        &self.generator
    }
}

impl FrameProducer for SineProducer {
    fn stride(&self) -> usize {
        SAMPLE_SIZE * CHANNELS
    }

    fn fill(&mut self, dst: &mut [u8], requested_frames: u64) -> FilledExtent {
        let stride = self.stride();
        let capacity = dst.len() / stride;
        let frames = match usize::try_from(requested_frames) {
            Ok(0) => capacity,
            Ok(requested) => requested.min(capacity),
            Err(_) => capacity,
        };

        for frame in dst[..frames * stride].chunks_exact_mut(stride) {
            let value = self.generator.next_sample();
            for sample in frame.chunks_exact_mut(SAMPLE_SIZE) {
                NativeEndian::write_i32(sample, value);
            }
        }

        FilledExtent { frames, stride }
    }
}

/// Result of one process cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessOutcome {
    Submitted { frames: usize },
    /// No buffer was available; nothing was produced.
    OutOfBuffers,
    /// The buffer had no storage and was handed back untouched.
    Unmapped,
}

/// Services "more data needed" notifications from the audio server.
///
/// Must only be driven from one thread at a time; it does not allocate or
/// block, so it is safe to call from the real-time process thread.
#[derive(Debug)]
pub struct StreamCallback<P> {
    producer: P,
}

impl<P: FrameProducer> StreamCallback<P> {
    pub fn new(producer: P) -> Self {
        Self { producer }
    }

    pub fn producer(&self) -> &P {
        &self.producer
    }

    pub fn into_producer(self) -> P {
        self.producer
    }

    pub fn on_process<Q: BufferQueue + ?Sized>(
        &mut self,
        queue: &mut Q,
    ) -> ProcessOutcome {
        let Some(mut buffer) = queue.dequeue_buffer() else {
            warn!("out of buffers");
            return ProcessOutcome::OutOfBuffers;
        };

        let requested = buffer.requested();
        let Some(dst) = buffer.data_mut() else {
            queue.return_buffer(buffer);
            return ProcessOutcome::Unmapped;
        };

        let extent = self.producer.fill(dst, requested);

        *buffer.chunk_mut() = Chunk {
            offset: 0,
            stride: extent.stride as u32,
            size: extent.size() as u32,
        };
        queue.queue_buffer(buffer);

        ProcessOutcome::Submitted {
            frames: extent.frames,
        }
    }
}

impl StreamCallback<SineProducer> {
    pub fn sine(generator: SignalGenerator) -> Self {
        Self::new(SineProducer::new(generator))
    }

    pub fn generator(&self) -> &SignalGenerator {
        self.producer.generator()
    }
}
