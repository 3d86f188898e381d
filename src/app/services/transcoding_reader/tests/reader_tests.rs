//! Tests for Windows-1252 decoding through the streaming reader

use super::*;
use encoding_rs::WINDOWS_1252;

#[test]
fn test_ascii_passes_through_unchanged() {
    let input = b"d_codigo,d_asenta\r\n\"01000\",San Angel\n";
    assert_eq!(transcode_all(input), String::from_utf8_lossy(input));
}

#[test]
fn test_accented_characters_decoded() {
    // "Cuauhtémoc,México" in Windows-1252
    let input = b"Cuauht\xE9moc,M\xE9xico";
    assert_eq!(transcode_all(input), "Cuauhtémoc,México");

    // "Peñón" and the euro sign from the 0x80 block
    assert_eq!(transcode_all(b"Pe\xF1\xF3n \x80"), "Peñón €");
}

#[test]
fn test_every_byte_round_trips() {
    let all_bytes: Vec<u8> = (0..=255u8).collect();
    let decoded = transcode_all(&all_bytes);
    assert_eq!(decoded.chars().count(), 256);

    let (encoded, _, had_errors) = WINDOWS_1252.encode(&decoded);
    assert!(!had_errors);
    assert_eq!(encoded.as_ref(), all_bytes.as_slice());
}

#[test]
fn test_boundary_bytes_map_to_themselves() {
    for byte in [b',', b'"', b'\n', b'\r', b'\t', b';'] {
        let decoded = transcode_all(&[byte]);
        assert_eq!(decoded.as_bytes(), &[byte]);
    }
}

#[test]
fn test_tiny_buffers_produce_identical_output() {
    let input: Vec<u8> = b"12345,Centro,X,Cuauht\xE9moc,CDMX\n"
        .iter()
        .copied()
        .cycle()
        .take(10_000)
        .collect();
    let expected = transcode_all(&input);

    let mut reader = TranscodingReader::with_capacity(input.as_slice(), WINDOWS_1252, 1);
    let mut out = Vec::new();
    let mut chunk = [0u8; 3];
    loop {
        let n = reader.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&chunk[..n]);
    }

    assert_eq!(String::from_utf8(out).unwrap(), expected);
    assert_eq!(reader.bytes_consumed(), input.len() as u64);
}

#[test]
fn test_empty_input_reads_zero() {
    let mut reader = TranscodingReader::new(&b""[..], WINDOWS_1252);
    let mut buf = [0u8; 16];
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
}

#[test]
fn test_zero_length_buffer() {
    let mut reader = TranscodingReader::new(&b"abc"[..], WINDOWS_1252);
    assert_eq!(reader.read(&mut []).unwrap(), 0);
    let mut out = String::new();
    reader.read_to_string(&mut out).unwrap();
    assert_eq!(out, "abc");
}

#[test]
fn test_inner_read_errors_propagate() {
    let inner = FailingReader::new(b"12345,Centro", io::ErrorKind::BrokenPipe);
    let mut reader = TranscodingReader::with_capacity(inner, WINDOWS_1252, 4);
    let mut out = String::new();

    let err = reader.read_to_string(&mut out).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn test_interrupted_reads_are_retried() {
    let inner = InterruptingReader::new(&b"Quer\xE9taro"[..]);
    let mut reader = TranscodingReader::new(inner, WINDOWS_1252);
    let mut out = String::new();
    reader.read_to_string(&mut out).unwrap();
    assert_eq!(out, "Querétaro");
}

#[test]
fn test_encoding_accessor() {
    let reader = TranscodingReader::new(&b""[..], WINDOWS_1252);
    assert_eq!(reader.encoding().name(), "windows-1252");
    assert!(reader.into_inner().is_empty());
}
