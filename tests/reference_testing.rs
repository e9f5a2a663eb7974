//! Cross-checks this crate's decoder against `flate2` (a binding over
//! miniz_oxide/zlib-ng) as a reference oracle, in the spirit of the teacher
//! crate's own `tests/reference_testing.rs`.
//!
//! There are no fixture files shipped with this crate, so every stream
//! tested here is produced on the fly by compressing a corpus of synthetic
//! buffers with `flate2`'s writer side, then decoded with both `flate2` and
//! `pico_inflate` and compared byte-for-byte.

use std::io::Write;

use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use pico_inflate::{DeflateDecoder, DeflateOptions};

fn corpus() -> Vec<Vec<u8>>
{
    let mut bufs = Vec::new();

    bufs.push(Vec::new());
    bufs.push(b"Hello, world!".to_vec());
    bufs.push(vec![b'A'; 1]);
    bufs.push(vec![b'A'; 258]);
    bufs.push(vec![b'A'; 259]);
    bufs.push(vec![b'A'; 70_000]);

    // Highly repetitive text: exercises long back-references.
    let mut repetitive = Vec::new();
    for _ in 0..2000
    {
        repetitive.extend_from_slice(b"the quick brown fox jumps over the lazy dog. ");
    }
    bufs.push(repetitive);

    // Pseudo-random bytes: exercises stored/near-incompressible blocks.
    let mut state: u32 = 0x1234_5678;
    let mut random = Vec::with_capacity(50_000);
    for _ in 0..50_000
    {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        random.push((state >> 16) as u8);
    }
    bufs.push(random);

    bufs
}

fn zlib_compress(data: &[u8], level: u32) -> Vec<u8>
{
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn gzip_compress(data: &[u8], level: u32) -> Vec<u8>
{
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Strip the 2-byte zlib header and 4-byte Adler-32 trailer that
/// `ZlibEncoder` wraps the raw DEFLATE stream in; this crate only speaks raw
/// DEFLATE and gzip, not zlib/RFC 1950 framing (see DESIGN.md).
fn strip_zlib_framing(zlib: &[u8]) -> &[u8]
{
    &zlib[2..zlib.len() - 4]
}

#[test]
fn matches_flate2_across_corpus_and_levels()
{
    for data in corpus()
    {
        for level in [0, 1, 6, 9]
        {
            let zlib = zlib_compress(&data, level);
            let raw_deflate = strip_zlib_framing(&zlib);

            let mut decoder = DeflateDecoder::new(raw_deflate);
            let decoded = decoder
                .decode_deflate()
                .unwrap_or_else(|e| panic!("level {level}, len {}: {e:?}", data.len()));

            assert_eq!(decoded, data, "mismatch at compression level {level}");
        }
    }
}

#[test]
fn matches_flate2_gzip_framing()
{
    for data in corpus()
    {
        let gzip = gzip_compress(&data, 6);
        let mut decoder = DeflateDecoder::new(&gzip);
        let decoded = decoder.decode_gzip().unwrap();
        assert_eq!(decoded, data);
    }
}

/// `miniz_oxide` compresses raw DEFLATE directly (no zlib/gzip framing to
/// strip), giving a second, independent encoder besides `flate2`/zlib-ng —
/// the same pairing the teacher's own fuzz targets cross the decoder with.
#[test]
fn matches_miniz_oxide_raw_deflate()
{
    for data in corpus()
    {
        for level in [0u8, 6, 10]
        {
            let compressed = miniz_oxide::deflate::compress_to_vec(&data, level);
            let mut decoder = DeflateDecoder::new(&compressed);
            let decoded = decoder
                .decode_deflate()
                .unwrap_or_else(|e| panic!("level {level}, len {}: {e:?}", data.len()));
            assert_eq!(decoded, data);
        }
    }
}

#[test]
fn bounded_limit_truncates_without_overrunning()
{
    let data = vec![b'z'; 10_000];
    let zlib = zlib_compress(&data, 6);
    let raw_deflate = strip_zlib_framing(&zlib);

    let options = DeflateOptions::default().set_limit(Some(100));
    let mut decoder = DeflateDecoder::new_with_options(raw_deflate, options);
    let err = decoder.decode_deflate().unwrap_err();
    assert_eq!(err.data.len(), 100);
}

#[cfg(feature = "crc")]
#[test]
fn checksum_confirmation_accepts_genuine_gzip_and_rejects_tampering()
{
    let data = b"checksum me please".to_vec();
    let mut gzip = gzip_compress(&data, 6);

    let options = DeflateOptions::default().set_confirm_checksum(true);
    let mut decoder = DeflateDecoder::new_with_options(&gzip, options);
    assert_eq!(decoder.decode_gzip().unwrap(), data);

    // Flip a byte inside the trailer's stored CRC-32.
    let trailer_crc_start = gzip.len() - 8;
    gzip[trailer_crc_start] ^= 0xFF;

    let mut decoder = DeflateDecoder::new_with_options(&gzip, options);
    let err = decoder.decode_gzip().unwrap_err();
    assert_eq!(err.data, data, "bytes already decoded must still be reported on mismatch");
}
