//! Driver loop — feeds pseudo-randomly fragmented elementary-stream
//! chunks through a [`StreamDecoder`] and aggregates counters.
//!
//! # State machine
//!
//! ```text
//! ┌────────────────────┐  decode_header == 0   ┌──────────────────────┐
//! │ A: awaiting header │──────────────────────▸│ B: decoding          │
//! │ (is_init == false) │                       │ decode → realloc on  │
//! │ failure: next chunk│                       │ dim change → drain   │
//! └────────────────────┘                       └──────────────────────┘
//! ```
//!
//! Chunk boundaries are deliberately unrelated to codec framing: each
//! iteration requests a pseudo-random length in `[0, max)`, stressing the
//! decoder's tolerance to arbitrary fragmentation. The loop asserts only
//! liveness (no fault, guaranteed termination at stream exhaustion) and
//! counter reporting — decoded pixels are never inspected or persisted.
//!
//! # Accounting
//!
//! Bytes fed accumulate in a pending counter and are attributed to
//! `total_dec_size` once per drain cycle, not per frame. This matches the
//! reference driver; it over- or under-counts when one decode call yields
//! several frames.

use std::fmt;
use std::io::Read;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, trace};

use crate::decoder::StreamDecoder;

/// Default exclusive upper bound for random chunk lengths, in bytes.
pub const DEFAULT_MAX_CHUNK: usize = 10_000;

// ─── Chunk sizing ────────────────────────────────────────────────────────

/// Chooses how many bytes to request from the input per iteration.
pub trait ChunkPolicy {
    /// Next requested chunk length, or `None` to stop feeding.
    fn next_len(&mut self) -> Option<usize>;
}

/// Production policy: uniform pseudo-random lengths in `[0, max)`.
///
/// A zero-length draw ends the run — a zero-byte read is
/// indistinguishable from end-of-stream by the loop's termination
/// contract.
pub struct RandomChunks {
    rng: StdRng,
    max_len: usize,
}

impl RandomChunks {
    /// Entropy-seeded policy.
    pub fn new(max_len: usize) -> Self {
        Self::seeded(max_len, rand::random())
    }

    /// Fixed-seed policy for reproducible runs.
    pub fn seeded(max_len: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_len,
        }
    }
}

impl ChunkPolicy for RandomChunks {
    fn next_len(&mut self) -> Option<usize> {
        if self.max_len == 0 {
            return Some(0);
        }
        Some(self.rng.gen_range(0..self.max_len))
    }
}

/// Fixed schedule of chunk lengths; exhausting it ends the run.
pub struct FixedChunks(std::vec::IntoIter<usize>);

impl FixedChunks {
    pub fn new(lens: Vec<usize>) -> Self {
        Self(lens.into_iter())
    }
}

impl ChunkPolicy for FixedChunks {
    fn next_len(&mut self) -> Option<usize> {
        self.0.next()
    }
}

// ─── Counters ────────────────────────────────────────────────────────────

/// Aggregate counters for one run. Never reset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodeStats {
    /// Elementary-stream units (chunks) fed past header decoding.
    pub es_count: u64,
    /// Total bytes fed to `decode`.
    pub total_size: u64,
    /// Bytes attributed to decoded frames, per drain cycle.
    pub total_dec_size: u64,
    /// Output buffer (re)allocations triggered by dimension changes.
    pub buffer_reallocs: u64,
}

impl fmt::Display for DecodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "es count = {}, totalSize={}, totalDecSize={}",
            self.es_count, self.total_size, self.total_dec_size
        )
    }
}

// ─── Driver loop ─────────────────────────────────────────────────────────

/// Feed `input` through `decoder` in chunks chosen by `chunks`.
///
/// Terminates when a read returns zero bytes (end of stream or a
/// zero-length chunk request) or the chunk policy is exhausted. Host I/O
/// faults are logged and end the loop; the counters accumulated so far
/// are still returned so the caller can report them.
pub fn run_decode_loop<D, R, C>(
    decoder: &mut D,
    mut input: R,
    mut chunks: C,
    conv_opt: i32,
) -> DecodeStats
where
    D: StreamDecoder + ?Sized,
    R: Read,
    C: ChunkPolicy,
{
    let mut stats = DecodeStats::default();
    let mut chunk = Vec::new();
    let mut width = decoder.width();
    let mut height = decoder.height();
    let mut frame_buf: Vec<u8> = Vec::new();
    // Bytes fed since the last drained frame; attributed on drain.
    let mut es_size: u64 = 0;

    while let Some(want) = chunks.next_len() {
        chunk.resize(want, 0);
        let size = match input.read(&mut chunk) {
            Ok(n) => n,
            Err(err) => {
                error!(error = %err, "input read failed; stopping");
                break;
            }
        };
        if size == 0 {
            debug!("input exhausted");
            break;
        }
        let data = &chunk[..size];

        if !decoder.is_init() {
            debug!(size, "decodeHeader");
            let status = decoder.decode_header(data);
            debug!(status, "decodeHeader done");
            if status != 0 {
                // Try the next chunk rather than re-feeding this one; a
                // persistently malformed stream must still terminate at
                // exhaustion.
                continue;
            }
        }

        stats.es_count += 1;
        stats.total_size += size as u64;
        es_size += size as u64;

        debug!(size, "decode");
        let status = decoder.decode(data);
        debug!(status, "decode done");
        if status != 0 {
            continue;
        }

        if width != decoder.width() || height != decoder.height() {
            width = decoder.width();
            height = decoder.height();
            let need = frame_buf_len(width, height);
            info!(width, height, bytes = need, "dimensions changed; new output buffer");
            // Old buffer is discarded, not pooled.
            frame_buf = vec![0u8; need];
            stats.buffer_reallocs += 1;
        }

        let mut status = decoder.get_frame(&mut frame_buf, conv_opt);
        if status <= 0 {
            debug!(status, "no frame ready");
        }
        while status > 0 {
            trace!(es_size, "frame drained");
            stats.total_dec_size += es_size;
            es_size = 0;
            status = decoder.get_frame(&mut frame_buf, conv_opt);
        }
    }

    stats
}

/// Output buffer size for packed 3-bytes-per-pixel frames.
fn frame_buf_len(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize * 3
}
