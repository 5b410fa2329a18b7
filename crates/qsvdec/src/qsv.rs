//! Safe wrapper over the process-wide native QSV decoder instance.
//!
//! The native library hides a single decoder behind free functions, so
//! exclusivity is enforced here with an atomic guard: at most one
//! [`QsvDecoder`] is live at a time, and dropping it releases the native
//! resources via `uninitialize` on every exit path.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use crate::decoder::StreamDecoder;
use crate::error::{DecodeError, Result};
use crate::sys;

/// Whether a `QsvDecoder` currently owns the native instance.
static INSTANCE_HELD: AtomicBool = AtomicBool::new(false);

/// Exclusive handle to the native decoder.
///
/// Construction runs `initialize`; `Drop` runs `uninitialize`. The handle
/// is neither `Send` nor `Sync` — every call mutates hidden native state
/// with no internal locking, and the reference driver is single-threaded.
pub struct QsvDecoder {
    /// Opts out of auto Send/Sync; see type docs.
    _not_thread_safe: PhantomData<*mut ()>,
}

impl QsvDecoder {
    /// Acquire the native decoder instance.
    ///
    /// Fails if another handle is live or if the native `initialize`
    /// returns a nonzero status.
    pub fn new() -> Result<Self> {
        if INSTANCE_HELD.swap(true, Ordering::AcqRel) {
            return Err(DecodeError::InstanceHeld);
        }

        // SAFETY: the guard above guarantees no other live handle; the
        // native call allocates its singleton and takes no arguments.
        let status = unsafe { sys::initialize() };
        if status != sys::QSV_OK {
            INSTANCE_HELD.store(false, Ordering::Release);
            return Err(DecodeError::Init { status });
        }

        debug!("QSV decoder initialized");
        Ok(Self {
            _not_thread_safe: PhantomData,
        })
    }

    /// Bytes `getFrame` will write for the current dimensions (packed
    /// 3 bytes per pixel).
    fn frame_bytes(&self) -> usize {
        self.width().max(0) as usize * self.height().max(0) as usize * 3
    }
}

impl StreamDecoder for QsvDecoder {
    fn decode_header(&mut self, chunk: &[u8]) -> i32 {
        // SAFETY: pointer/length describe a live slice; the library reads
        // at most `length` bytes and copies what it needs.
        unsafe { sys::decodeHeader(chunk.as_ptr(), chunk.len()) }
    }

    fn decode(&mut self, chunk: &[u8]) -> i32 {
        // SAFETY: as for decode_header.
        unsafe { sys::decode(chunk.as_ptr(), chunk.len()) }
    }

    fn get_frame(&mut self, out: &mut [u8], conv_opt: i32) -> i32 {
        let need = self.frame_bytes();
        if out.len() < need {
            // The native call would write past the buffer end. Reject
            // host-side with a non-positive status, which callers already
            // treat as "no frame".
            warn!(have = out.len(), need, "output buffer too small for getFrame");
            return -1;
        }
        // SAFETY: `out` holds at least width*height*3 bytes (checked
        // above), the maximum the library writes for one frame.
        unsafe { sys::getFrame(out.as_mut_ptr(), conv_opt) }
    }

    fn drain_frame(&mut self, out: &mut [u8], conv_opt: i32) -> i32 {
        let need = self.frame_bytes();
        if out.len() < need {
            warn!(have = out.len(), need, "output buffer too small for drainFrame");
            return -1;
        }
        // SAFETY: as for get_frame.
        unsafe { sys::drainFrame(out.as_mut_ptr(), conv_opt) }
    }

    fn width(&self) -> i32 {
        // SAFETY: no arguments; reads native state owned by this handle.
        unsafe { sys::getWidth() }
    }

    fn height(&self) -> i32 {
        // SAFETY: as for width.
        unsafe { sys::getHeight() }
    }

    fn is_init(&self) -> bool {
        // SAFETY: as for width.
        unsafe { sys::isInit() }
    }
}

impl Drop for QsvDecoder {
    fn drop(&mut self) {
        // SAFETY: paired with the successful `initialize` in `new`; the
        // guard is released only after the native teardown completes.
        unsafe { sys::uninitialize() };
        INSTANCE_HELD.store(false, Ordering::Release);
        debug!("QSV decoder released");
    }
}
