//! Work dispatch across scoped worker threads.
//!
//! ## Purpose
//!
//! This module fans a range of independent work units out over OS threads
//! and brings every failure back to the calling thread. It is the only
//! parallelism primitive of the crate apart from the pipelined relaxer,
//! which reuses its failure handling.
//!
//! ## Design notes
//!
//! * **Scoped threads**: Workers borrow the caller's data; every thread is
//!   joined before the dispatch returns.
//! * **Inline mode**: One thread (or a single chunk) runs on the caller's
//!   thread with no spawn at all.
//! * **Failure capture**: Errors and panics are collected per worker; the
//!   last one observed in join order is returned, earlier ones are logged
//!   and discarded.
//!
//! ## Key concepts
//!
//! * **Chunk**: A contiguous `[start, end)` slice of the unit range.
//! * **Row chunk**: A contiguous block of rows of a row-major buffer, handed
//!   out as a disjoint `&mut` slice.
//!
//! ## Invariants
//!
//! * Chunks are disjoint and cover the whole range.
//! * Results are returned in chunk order.
//!
//! ## Non-goals
//!
//! * Ordering between chunks (callers synchronize explicitly if needed).
//! * Cancellation of running workers.

use core::any::Any;
use core::num::NonZeroUsize;
use core::ops::Range;
use std::thread::{self, ScopedJoinHandle};

use tracing::{trace, warn};

use crate::primitives::errors::FillError;
use crate::primitives::partition::partition;

// ============================================================================
// Thread Count
// ============================================================================

/// Resolve a requested thread count; `0` means all available cores.
pub fn resolve_threads(requested: usize) -> usize {
    if requested != 0 {
        return requested;
    }
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

// ============================================================================
// Failure Capture
// ============================================================================

/// Keeps the last failure reported by a batch of workers.
#[derive(Debug, Default)]
pub struct FailureSlot {
    last: Option<FillError>,
    discarded: usize,
}

impl FailureSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure, replacing (and logging) any earlier one.
    pub fn record(&mut self, error: FillError) {
        if let Some(previous) = self.last.replace(error) {
            self.discarded += 1;
            warn!(error = %previous, "discarding earlier worker failure");
        }
    }

    /// Number of failures overwritten by a later one.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// `Err` with the last recorded failure, `Ok` if none.
    pub fn into_result(self) -> Result<(), FillError> {
        match self.last {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Join a scoped worker, turning a panic into `FillError::WorkerPanicked`.
pub fn join_worker<R>(handle: ScopedJoinHandle<'_, Result<R, FillError>>) -> Result<R, FillError> {
    handle
        .join()
        .unwrap_or_else(|payload| Err(FillError::WorkerPanicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run `worker(start, end)` over contiguous chunks of `[0, size)`.
///
/// Returns one result per chunk, in chunk order.
pub fn dispatch<R, F>(size: usize, num_threads: usize, worker: F) -> Result<Vec<R>, FillError>
where
    R: Send,
    F: Fn(usize, usize) -> Result<R, FillError> + Sync,
{
    let threads = resolve_threads(num_threads);
    let chunks = partition(size, threads);
    if chunks.len() == 1 {
        return worker(0, size).map(|result| vec![result]);
    }
    trace!(size, chunks = chunks.len(), "dispatching chunks");

    let worker = &worker;
    let mut results = Vec::with_capacity(chunks.len());
    let mut failure = FailureSlot::new();

    thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .iter()
            .map(|chunk| {
                let (start, end) = (chunk.start, chunk.end);
                scope.spawn(move || worker(start, end))
            })
            .collect();

        for handle in handles {
            match join_worker(handle) {
                Ok(result) => results.push(result),
                Err(error) => failure.record(error),
            }
        }
    });

    failure.into_result()?;
    Ok(results)
}

/// Run `worker(rows, chunk)` over disjoint row blocks of a row-major buffer.
///
/// `data` holds rows of `row_len` elements; each worker receives the row
/// range it owns and the matching mutable slice.
pub fn dispatch_rows_mut<T, F>(
    data: &mut [T],
    row_len: usize,
    num_threads: usize,
    worker: F,
) -> Result<(), FillError>
where
    T: Send,
    F: Fn(Range<usize>, &mut [T]) -> Result<(), FillError> + Sync,
{
    let rows = if row_len == 0 { 0 } else { data.len() / row_len };
    let threads = resolve_threads(num_threads);
    let chunks = partition(rows, threads);
    if chunks.len() == 1 {
        return worker(0..rows, data);
    }
    trace!(rows, chunks = chunks.len(), "dispatching row chunks");

    let worker = &worker;
    let mut failure = FailureSlot::new();

    thread::scope(|scope| {
        let mut rest = data;
        let mut handles = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let (head, tail) = core::mem::take(&mut rest).split_at_mut(chunk.len() * row_len);
            rest = tail;
            handles.push(scope.spawn(move || worker(chunk, head)));
        }

        for handle in handles {
            if let Err(error) = join_worker(handle) {
                failure.record(error);
            }
        }
    });

    failure.into_result()
}
