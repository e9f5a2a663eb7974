use std::io::{Cursor, Read, Write};
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flate2::write::ZlibEncoder;
use flate2::Compression;

fn corpus() -> Vec<u8>
{
    let mut text = Vec::new();
    for _ in 0..20_000
    {
        text.extend_from_slice(b"the quick brown fox jumps over the lazy dog. ");
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(6));
    encoder.write_all(&text).unwrap();
    let zlib = encoder.finish().unwrap();
    // raw DEFLATE payload, stripped of the 2-byte zlib header and the
    // 4-byte Adler-32 trailer this crate has no use for.
    zlib[2..zlib.len() - 4].to_vec()
}

fn decode_flate2(bytes: &[u8]) -> Vec<u8>
{
    let mut writer = Vec::new();
    let mut deflater = flate2::bufread::DeflateDecoder::new(Cursor::new(bytes));
    deflater.read_to_end(&mut writer).unwrap();
    writer
}

fn decode_pico_inflate(bytes: &[u8]) -> Vec<u8>
{
    let mut decoder = pico_inflate::DeflateDecoder::new(bytes);
    decoder.decode_deflate().unwrap()
}

fn decode_test(c: &mut Criterion)
{
    let data = corpus();

    let mut group = c.benchmark_group("DEFLATE decoding");
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("flate2-[miniz-oxide]", |b| {
        b.iter(|| black_box(decode_flate2(data.as_slice())))
    });

    group.bench_function("pico_inflate", |b| {
        b.iter(|| black_box(decode_pico_inflate(data.as_slice())))
    });
}

criterion_group!(name = benches;
    config = {
        let c = Criterion::default();
        c.measurement_time(Duration::from_secs(10))
    };
    targets = decode_test);

criterion_main!(benches);
