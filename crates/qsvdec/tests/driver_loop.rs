//! Behavioral suite for the driver loop, run against a mock decoder.
//!
//! The mock enforces the native-call protocol from inside: it panics if
//! `decode_header` is invoked after initialization completes and if
//! `get_frame` is handed a buffer smaller than the current
//! `width * height * 3`.

use std::io::{self, Cursor, Read};

use qsvdec::decoder::{DEFAULT_CONV_OPT, StreamDecoder};
use qsvdec::harness::{DecodeStats, FixedChunks, RandomChunks, run_decode_loop};

// ─── Mock decoder ────────────────────────────────────────────────────────

struct MockDecoder {
    /// Status returned by `decode_header` until it succeeds.
    header_status: i32,
    init: bool,
    decode_status: i32,
    /// Frames enqueued per successful decode call.
    frames_per_decode: u32,
    ready: u32,
    /// Dimensions reported after the nth decode call (clamped to last).
    dims_by_decode: Vec<(i32, i32)>,
    header_calls: u32,
    decode_calls: u32,
    get_frame_calls: u32,
    seen_buf_lens: Vec<usize>,
}

impl MockDecoder {
    fn new(header_status: i32) -> Self {
        Self {
            header_status,
            init: false,
            decode_status: 0,
            frames_per_decode: 1,
            ready: 0,
            dims_by_decode: vec![(16, 16)],
            header_calls: 0,
            decode_calls: 0,
            get_frame_calls: 0,
            seen_buf_lens: Vec::new(),
        }
    }

    fn dims(&self) -> (i32, i32) {
        if self.decode_calls == 0 {
            return (0, 0);
        }
        let idx = (self.decode_calls as usize - 1).min(self.dims_by_decode.len() - 1);
        self.dims_by_decode[idx]
    }
}

impl StreamDecoder for MockDecoder {
    fn decode_header(&mut self, chunk: &[u8]) -> i32 {
        assert!(!self.init, "decode_header invoked after is_init");
        assert!(!chunk.is_empty(), "zero-length chunk reached the decoder");
        self.header_calls += 1;
        if self.header_status == 0 {
            self.init = true;
        }
        self.header_status
    }

    fn decode(&mut self, chunk: &[u8]) -> i32 {
        assert!(!chunk.is_empty(), "zero-length chunk reached the decoder");
        self.decode_calls += 1;
        if self.decode_status == 0 {
            self.ready += self.frames_per_decode;
        }
        self.decode_status
    }

    fn get_frame(&mut self, out: &mut [u8], conv_opt: i32) -> i32 {
        assert_eq!(conv_opt, DEFAULT_CONV_OPT);
        let (w, h) = self.dims();
        assert!(
            out.len() >= w as usize * h as usize * 3,
            "get_frame buffer smaller than width*height*3"
        );
        self.get_frame_calls += 1;
        self.seen_buf_lens.push(out.len());
        if self.ready > 0 {
            self.ready -= 1;
            1
        } else {
            0
        }
    }

    fn drain_frame(&mut self, out: &mut [u8], conv_opt: i32) -> i32 {
        self.get_frame(out, conv_opt)
    }

    fn width(&self) -> i32 {
        self.dims().0
    }

    fn height(&self) -> i32 {
        self.dims().1
    }

    fn is_init(&self) -> bool {
        self.init
    }
}

fn input_of(len: usize) -> Cursor<Vec<u8>> {
    Cursor::new(vec![0xAB; len])
}

// ─── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn end_to_end_counters_match_reference_scenario() {
    // Header succeeds on the first chunk, every decode yields exactly one
    // 16x16 frame. Three chunks of {100, 200, 300} bytes.
    let mut dec = MockDecoder::new(0);
    let stats = run_decode_loop(
        &mut dec,
        input_of(600),
        FixedChunks::new(vec![100, 200, 300]),
        DEFAULT_CONV_OPT,
    );

    assert_eq!(
        stats,
        DecodeStats {
            es_count: 3,
            total_size: 600,
            total_dec_size: 600,
            buffer_reallocs: 1,
        }
    );
    assert_eq!(dec.header_calls, 1, "header re-decoded mid-stream");
    // One 768-byte buffer, never reallocated.
    assert!(dec.seen_buf_lens.iter().all(|&len| len == 768));
}

#[test]
fn drains_all_ready_frames_per_decode() {
    let mut dec = MockDecoder::new(0);
    dec.frames_per_decode = 3;

    let stats = run_decode_loop(
        &mut dec,
        input_of(50),
        FixedChunks::new(vec![50]),
        DEFAULT_CONV_OPT,
    );

    assert_eq!(dec.ready, 0, "frames left undrained");
    // Three positive polls plus the terminating non-positive one.
    assert_eq!(dec.get_frame_calls, 4);
    // The whole chunk is attributed once, on the first drained frame.
    assert_eq!(stats.total_dec_size, 50);
}

#[test]
fn persistent_header_failure_still_terminates() {
    let mut dec = MockDecoder::new(-3);

    let stats = run_decode_loop(
        &mut dec,
        input_of(1_000),
        FixedChunks::new(vec![300, 300, 300, 300]),
        DEFAULT_CONV_OPT,
    );

    assert_eq!(dec.header_calls, 4, "each chunk gets one header attempt");
    assert_eq!(dec.decode_calls, 0, "decode must not run before init");
    assert_eq!(stats, DecodeStats::default());
}

#[test]
fn empty_input_is_a_clean_noop() {
    let mut dec = MockDecoder::new(0);

    let stats = run_decode_loop(
        &mut dec,
        input_of(0),
        RandomChunks::seeded(10_000, 7),
        DEFAULT_CONV_OPT,
    );

    assert_eq!(stats, DecodeStats::default());
    assert_eq!(dec.header_calls, 0);
}

#[test]
fn zero_length_chunk_request_ends_the_run() {
    let mut dec = MockDecoder::new(0);

    let stats = run_decode_loop(
        &mut dec,
        input_of(500),
        FixedChunks::new(vec![0, 100]),
        DEFAULT_CONV_OPT,
    );

    // A zero-byte read is indistinguishable from end-of-stream.
    assert_eq!(stats, DecodeStats::default());
    assert_eq!(dec.header_calls, 0);
}

#[test]
fn dimension_change_reallocates_before_next_get_frame() {
    let mut dec = MockDecoder::new(0);
    dec.dims_by_decode = vec![(16, 16), (16, 16), (32, 32)];

    let stats = run_decode_loop(
        &mut dec,
        input_of(400),
        FixedChunks::new(vec![100, 100, 100, 100]),
        DEFAULT_CONV_OPT,
    );

    // 0x0 -> 16x16 on the first decode, 16x16 -> 32x32 on the third.
    assert_eq!(stats.buffer_reallocs, 2);
    assert_eq!(dec.seen_buf_lens[0], 768);
    assert_eq!(*dec.seen_buf_lens.last().unwrap(), 3072);
}

#[test]
fn random_fragmentation_reaches_exhaustion() {
    let mut dec = MockDecoder::new(0);
    dec.frames_per_decode = 2;

    let stats = run_decode_loop(
        &mut dec,
        input_of(200_000),
        RandomChunks::seeded(10_000, 1234),
        DEFAULT_CONV_OPT,
    );

    // Liveness: the loop returned, every fed byte was counted at most once.
    assert!(stats.total_size <= 200_000);
    assert_eq!(dec.ready, 0);
}

// Reader that yields one chunk, then fails.
struct FailingReader {
    first: Option<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.first.take() {
            Some(data) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(n)
            }
            None => Err(io::Error::other("injected read fault")),
        }
    }
}

#[test]
fn read_fault_preserves_counters() {
    let mut dec = MockDecoder::new(0);
    let input = FailingReader {
        first: Some(vec![0xCD; 100]),
    };

    let stats = run_decode_loop(
        &mut dec,
        input,
        FixedChunks::new(vec![100, 100]),
        DEFAULT_CONV_OPT,
    );

    assert_eq!(stats.es_count, 1);
    assert_eq!(stats.total_size, 100);
    assert_eq!(stats.total_dec_size, 100);
}
