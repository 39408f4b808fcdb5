//! IR remote-control input: interrupt-side capture and the decoder.

pub mod capture;
pub mod decoder;

pub use capture::{EdgeCapture, EdgeTrace};
pub use decoder::{decode, DecodedCommand};
