#![doc = include_str!("../README.md")]

pub mod decoder;
pub mod error;
pub mod harness;

#[cfg(qsvdec_ffi_stub)]
#[path = "qsv_stub.rs"]
pub mod qsv;
#[cfg(not(qsvdec_ffi_stub))]
pub mod qsv;

pub mod sys;
