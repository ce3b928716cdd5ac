//! Worker handles: owned tokens for one chunk's eventual histogram.
//!
//! Two flavours exist:
//!
//! - [`EagerHandle`]: the chunk was submitted to a thread pool when the handle
//!   was created and is already running; [`WorkerHandle::join`] blocks until
//!   it reports.
//! - [`DeferredHandle`]: nothing runs until [`WorkerHandle::join`] is called,
//!   and then the chunk executes synchronously on the joining thread.
//!
//! `join` takes the handle by value, so each result is consumed exactly once.
//! Neither handle type is `Clone`: a chunk can never be joined twice.
//! A panicking chunk is caught and reported as
//! [`SimulationError::WorkerFailure`] carrying the chunk index.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::error::{Result, SimulationError};
use crate::generator::ChunkKernel;
use crate::histogram::Histogram;
use crate::rng::DieRng;

/// A unit of in-flight or deferred work that yields one [`Histogram`].
pub trait WorkerHandle {
    /// Index of the chunk within its run's partition.
    fn chunk(&self) -> usize;

    /// Waits for (or performs) the chunk and returns its histogram.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::WorkerFailure`] if the chunk panicked or
    /// its worker disappeared without reporting.
    fn join(self) -> Result<Histogram>;
}

/// Handle to a chunk already executing on a worker thread.
#[derive(Debug)]
pub struct EagerHandle {
    chunk: usize,
    receiver: mpsc::Receiver<thread::Result<Histogram>>,
}

impl EagerHandle {
    /// Submits the chunk to `pool` and returns immediately.
    ///
    /// The pool starts the work as soon as a thread is free, concurrently
    /// with the caller.
    pub fn spawn(
        pool: &rayon::ThreadPool,
        chunk: usize,
        trials: u64,
        rng: DieRng,
        kernel: ChunkKernel,
    ) -> Self {
        let (sender, receiver) = mpsc::sync_channel(1);

        pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| kernel(trials, rng)));
            // A send error means the handle was dropped and nobody wants the result.
            let _ = sender.send(outcome);
        });

        debug!(chunk, trials, "eager chunk dispatched");
        Self { chunk, receiver }
    }
}

impl WorkerHandle for EagerHandle {
    fn chunk(&self) -> usize {
        self.chunk
    }

    fn join(self) -> Result<Histogram> {
        match self.receiver.recv() {
            Ok(Ok(histogram)) => {
                debug!(chunk = self.chunk, total = histogram.total(), "eager chunk joined");
                Ok(histogram)
            }
            Ok(Err(payload)) => Err(SimulationError::from_panic(self.chunk, payload)),
            Err(mpsc::RecvError) => Err(SimulationError::WorkerFailure {
                chunk: self.chunk,
                message: "worker exited without reporting a result".to_string(),
            }),
        }
    }
}

/// Handle to a chunk that has not started and will run on the joining thread.
///
/// Holds only what the chunk needs: its size, its generator seed and the
/// kernel to run. Move-only, so the chunk is rolled at most once:
///
/// ```compile_fail
/// use dice_core::{roll_histogram, DeferredHandle};
///
/// let handle = DeferredHandle::new(0, 100, 1, roll_histogram);
/// let copy = handle.clone();
/// ```
#[derive(Debug)]
pub struct DeferredHandle {
    chunk: usize,
    trials: u64,
    seed: u64,
    kernel: ChunkKernel,
}

impl DeferredHandle {
    /// Records the chunk without doing any work.
    pub fn new(chunk: usize, trials: u64, seed: u64, kernel: ChunkKernel) -> Self {
        Self {
            chunk,
            trials,
            seed,
            kernel,
        }
    }

    /// Number of trials this chunk will roll.
    #[inline]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Seed the chunk's generator will be created with.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl WorkerHandle for DeferredHandle {
    fn chunk(&self) -> usize {
        self.chunk
    }

    fn join(self) -> Result<Histogram> {
        let Self {
            chunk,
            trials,
            seed,
            kernel,
        } = self;

        debug!(chunk, trials, "deferred chunk executing on caller");
        panic::catch_unwind(AssertUnwindSafe(|| kernel(trials, DieRng::from_seed(seed))))
            .map_err(|payload| SimulationError::from_panic(chunk, payload))
    }
}
