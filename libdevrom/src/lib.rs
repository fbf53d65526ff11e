/// Masking key applied to the development ROM, cycled with wraparound
pub const KEY: [u8; 32] = [
    0xa1, 0x9b, 0xd8, 0xdd, 0x29, 0xf3, 0xa7, 0x77, 0xd7, 0x61, 0x9b, 0x4b, 0x72, 0x90, 0x45,
    0xc8, 0x4a, 0xea, 0x81, 0x93, 0xd5, 0xaf, 0x9a, 0x75, 0x2b, 0xec, 0x6c, 0xf7, 0xb7, 0x47,
    0x50, 0x4d,
];
/// Length of the masking key (in bytes)
pub const KEY_LENGTH: usize = 32;
/// Canonical path of the plain development ROM
pub const SOURCE_ROM: &str = "hello_world.nes";
/// Canonical path of the masked image
pub const ENCODED_ROM: &str = "devrom.bin";

mod error;
pub mod mask;

pub use error::MaskError;

#[cfg(test)]
mod tests;
