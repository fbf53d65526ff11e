use std::fs;
use std::path::Path;

use crate::error::MaskError;
use crate::{KEY, KEY_LENGTH};

/// Apply the fixed repeating key to a byte sequence
pub fn apply_key(data: &[u8]) -> Vec<u8> {
    apply_key_with(data, &KEY)
}

/// Apply a repeating 32-byte key to a byte sequence
pub fn apply_key_with(data: &[u8], key: &[u8; KEY_LENGTH]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(byte, key_byte)| byte ^ key_byte)
        .collect()
}

/// Read the full content of a ROM image
pub fn read_rom(path: impl AsRef<Path>) -> Result<Vec<u8>, MaskError> {
    let path = path.as_ref();

    let data = fs::read(path).map_err(|source| MaskError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("read {} bytes from {:?}", data.len(), path);
    Ok(data)
}

/// Write the full content of an image, creating or truncating the file
pub fn write_rom(path: impl AsRef<Path>, data: &[u8]) -> Result<(), MaskError> {
    let path = path.as_ref();

    fs::write(path, data).map_err(|source| MaskError::DestinationWrite {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}

/// Mask a ROM image: read the whole source, apply the key, write the result.
///
/// The source is read completely before the destination is opened, so a
/// read failure never creates or modifies the destination.
pub fn encode_rom(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<usize, MaskError> {
    let rom = read_rom(source)?;
    let masked = apply_key(&rom);

    write_rom(destination.as_ref(), &masked)?;
    log::info!("masked {} bytes into {:?}", masked.len(), destination.as_ref());

    Ok(masked.len())
}

/// Recover a ROM image from a masked one.
///
/// The key stream is its own inverse, so this is the same pass as masking.
pub fn decode_rom(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<usize, MaskError> {
    let masked = read_rom(source)?;
    let rom = apply_key(&masked);

    write_rom(destination.as_ref(), &rom)?;
    log::info!("unmasked {} bytes into {:?}", rom.len(), destination.as_ref());

    Ok(rom.len())
}
