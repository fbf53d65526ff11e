use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use proptest::prelude::*;

use crate::mask::{apply_key, apply_key_with, decode_rom, encode_rom, read_rom, write_rom};
use crate::{MaskError, KEY, KEY_LENGTH};

fn unix_time_nanos() -> u128 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration.as_nanos(),
        Err(_) => 0,
    }
}

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "devrom-test-{}-{}-{}",
        std::process::id(),
        unix_time_nanos(),
        name
    ));
    path
}

#[test]
fn key_matches_expected_shape() {
    assert_eq!(KEY.len(), KEY_LENGTH);
    assert_eq!(&KEY[..3], &[0xa1, 0x9b, 0xd8]);
}

#[test]
fn zero_bytes_map_to_key_prefix() {
    assert_eq!(apply_key(&[0u8; 3]), vec![0xa1, 0x9b, 0xd8]);
    assert_eq!(apply_key(&[0u8; KEY_LENGTH]), KEY.to_vec());
}

#[test]
fn per_byte_output_follows_the_key_formula() {
    let data: Vec<u8> = (0..512u32).map(|i| (i.wrapping_mul(7) % 256) as u8).collect();
    let masked = apply_key(&data);

    assert_eq!(masked.len(), data.len());
    for (index, byte) in masked.iter().enumerate() {
        assert_eq!(*byte, data[index] ^ KEY[index % KEY_LENGTH]);
    }
}

#[test]
fn key_wraps_around_after_the_last_byte() {
    let masked = apply_key(&[0u8; KEY_LENGTH + 1]);
    assert_eq!(masked[KEY_LENGTH], KEY[0]);
}

#[test]
fn double_application_recovers_the_input() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
    assert_eq!(apply_key(&apply_key(&data)), data);
}

#[test]
fn empty_input_produces_empty_output() {
    assert_eq!(apply_key(&[]), Vec::<u8>::new());
}

#[test]
fn masked_file_round_trips_on_disk() {
    let source = scratch_path("source.nes");
    let masked = scratch_path("masked.bin");
    let recovered = scratch_path("recovered.nes");

    let rom: Vec<u8> = (0..1024u32).map(|i| (i % 256) as u8).collect();
    fs::write(&source, &rom).expect("failed to create scratch ROM");

    let written = encode_rom(&source, &masked).expect("masking failed");
    assert_eq!(written, rom.len());
    assert_eq!(
        read_rom(&masked).expect("missing masked image"),
        apply_key(&rom)
    );

    decode_rom(&masked, &recovered).expect("unmasking failed");
    assert_eq!(read_rom(&recovered).expect("missing recovered ROM"), rom);

    let _ = fs::remove_file(&source);
    let _ = fs::remove_file(&masked);
    let _ = fs::remove_file(&recovered);
}

#[test]
fn missing_source_is_a_read_error_and_writes_nothing() {
    let source = scratch_path("absent.nes");
    let destination = scratch_path("never-written.bin");

    let error = encode_rom(&source, &destination).expect_err("masking a missing ROM succeeded");
    assert!(matches!(error, MaskError::SourceRead { .. }));
    assert!(!destination.exists());
}

#[test]
fn unwritable_destination_is_a_write_error() {
    let destination = scratch_path("missing-dir").join("masked.bin");

    let error =
        write_rom(&destination, b"payload").expect_err("write into a missing directory succeeded");
    assert!(matches!(error, MaskError::DestinationWrite { .. }));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trip_holds_for_any_key(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        key in proptest::array::uniform32(any::<u8>()),
    ) {
        let masked = apply_key_with(&data, &key);
        prop_assert_eq!(masked.len(), data.len());
        prop_assert_eq!(apply_key_with(&masked, &key), data);
    }

    #[test]
    fn fixed_key_round_trip_preserves_the_input(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
    ) {
        let masked = apply_key(&data);
        prop_assert_eq!(masked.len(), data.len());
        prop_assert_eq!(apply_key(&masked), data);
    }
}
