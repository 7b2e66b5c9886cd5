/// Fixed-capacity sample history with a wrapping write cursor
///
/// Holds the most recent `capacity` samples. Pushing overwrites the oldest
/// sample; lookback is by age, with `0` being the newest sample. Used as the
/// delay line of the FIR engine and as both histories of the IIR engine.
///
/// A zero capacity is raised to one slot.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    data: Vec<f64>,
    pos: usize,
}

impl RingBuffer {
    /// Create a zero-filled buffer holding `capacity` samples
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: vec![0.0; capacity],
            pos: capacity - 1,
        }
    }

    /// Number of samples the buffer holds
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Store `sample` as the newest entry, dropping the oldest
    pub fn push(&mut self, sample: f64) {
        self.pos += 1;
        if self.pos == self.data.len() {
            self.pos = 0;
        }
        self.data[self.pos] = sample;
    }

    /// Sample pushed `age` pushes ago (`0` is the newest)
    ///
    /// `age` wraps modulo the capacity.
    pub fn lookback(&self, age: usize) -> f64 {
        let n = self.data.len();
        let age = age % n;
        let idx = if age <= self.pos {
            self.pos - age
        } else {
            self.pos + n - age
        };
        self.data[idx]
    }

    /// Iterate over the history from newest to oldest
    ///
    /// Walks the storage as two contiguous reverse ranges so the inner
    /// convolution loops need no modulo arithmetic.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = f64> + '_ {
        let (head, tail) = self.data.split_at(self.pos + 1);
        head.iter().rev().chain(tail.iter().rev()).copied()
    }

    /// Zero every sample and restore the construction cursor
    pub fn reset(&mut self) {
        self.data.fill(0.0);
        self.pos = self.data.len() - 1;
    }
}
