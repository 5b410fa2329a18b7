//! Capability trait for elementary-stream decoders.
//!
//! The driver loop in [`crate::harness`] is written against this trait so
//! it runs identically against the real native wrapper
//! ([`crate::qsv::QsvDecoder`]) and against mock decoders in tests.
//!
//! Methods return raw native status codes on purpose: the native library
//! interprets status signs inconsistently between calls (0 = success for
//! `decode_header`/`decode`, positive = frame for `get_frame`), and the
//! harness interprets them ad hoc per call site rather than forcing a
//! uniform error type over a contract the library does not offer.

/// Conversion option forwarded verbatim to `getFrame`/`drainFrame`.
///
/// Selects the output pixel layout; opaque to the harness. The reference
/// driver passes 1.
pub const DEFAULT_CONV_OPT: i32 = 1;

/// Elementary-stream video decoder producing packed 3-bytes-per-pixel
/// host frames.
pub trait StreamDecoder {
    /// Parse a stream header from `chunk`. Returns 0 on success; the
    /// caller must keep feeding chunks here until [`is_init`] reports
    /// true, and must not call it afterwards.
    ///
    /// [`is_init`]: StreamDecoder::is_init
    fn decode_header(&mut self, chunk: &[u8]) -> i32;

    /// Feed one stream fragment. 0 means at least one frame became
    /// decodable; nonzero may merely indicate insufficient data and is
    /// not necessarily fatal.
    fn decode(&mut self, chunk: &[u8]) -> i32;

    /// Retrieve one ready frame into `out`. Positive = frame written,
    /// zero or negative = no frame / error. One `decode` call may yield
    /// several ready frames — poll until non-positive.
    ///
    /// `out` must hold at least `width() * height() * 3` bytes.
    fn get_frame(&mut self, out: &mut [u8], conv_opt: i32) -> i32;

    /// Same contract as [`get_frame`], but flushes frames still buffered
    /// at end-of-stream.
    ///
    /// [`get_frame`]: StreamDecoder::get_frame
    fn drain_frame(&mut self, out: &mut [u8], conv_opt: i32) -> i32;

    /// Current frame width in pixels. May change between `decode` calls;
    /// poll after every successful decode.
    fn width(&self) -> i32;

    /// Current frame height in pixels.
    fn height(&self) -> i32;

    /// True once header decoding has completed and steady-state decoding
    /// may begin.
    fn is_init(&self) -> bool;
}
