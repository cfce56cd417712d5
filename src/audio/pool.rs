use std::collections::VecDeque;

use super::stream::{AudioBuffer, BufferQueue, Chunk};

/// Fixed set of preallocated buffers cycling between a free queue and a
/// filled queue.
///
/// Capacity for both queues is reserved up front so dequeue, queue and
/// recycle never allocate.
#[derive(Debug)]
pub struct BufferPool {
    free: VecDeque<AudioBuffer>,
    filled: VecDeque<AudioBuffer>,
    requested: u64,
}

impl BufferPool {
    /// `count` buffers of `frames * stride` bytes each.
    pub fn new(count: usize, frames: usize, stride: usize) -> Self {
        Self::from_buffers(
            (0..count).map(|_| AudioBuffer::with_capacity(frames * stride)),
        )
    }

    pub fn from_buffers(buffers: impl IntoIterator<Item = AudioBuffer>) -> Self {
        let free: VecDeque<AudioBuffer> = buffers.into_iter().collect();
        let filled = VecDeque::with_capacity(free.len());
        Self {
            free,
            filled,
            requested: 0,
        }
    }

    /// Frame hint stamped on every buffer handed out; 0 for none.
    pub fn set_requested(&mut self, frames: u64) {
        self.requested = frames;
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn filled_len(&self) -> usize {
        self.filled.len()
    }

    /// Oldest submitted buffer, if any.
    pub fn take_filled(&mut self) -> Option<AudioBuffer> {
        self.filled.pop_front()
    }

    /// Puts a consumed buffer back on the free queue.
    pub fn recycle(&mut self, mut buffer: AudioBuffer) {
        *buffer.chunk_mut() = Chunk::default();
        buffer.set_requested(0);
        self.free.push_back(buffer);
    }
}

impl BufferQueue for BufferPool {
    fn dequeue_buffer(&mut self) -> Option<AudioBuffer> {
        let mut buffer = self.free.pop_front()?;
        buffer.set_requested(self.requested);
        Some(buffer)
    }

    fn queue_buffer(&mut self, buffer: AudioBuffer) {
        self.filled.push_back(buffer);
    }

    fn return_buffer(&mut self, buffer: AudioBuffer) {
        self.recycle(buffer);
    }
}
