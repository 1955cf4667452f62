//! avbind 性能基准测试.
//!
//! 覆盖有理数运算、注册表查询、格式猜测与码流切分.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use avbind::Library;
use avbind::codec::{CodecCatalog, CodecId, NOPTS_VALUE};
use avbind::core::Rational;
use avbind::filter::FilterCatalog;
use avbind::format::FormatCatalog;

/// 生成 `count` 个等长 ADTS 帧
fn make_adts_stream(count: usize, frame_len: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(count * frame_len);
    for i in 0..count {
        stream.extend_from_slice(&[
            0xFF,
            0xF1,
            0x50,
            0x80 | ((frame_len >> 11) & 0x03) as u8,
            ((frame_len >> 3) & 0xFF) as u8,
            (((frame_len & 0x07) as u8) << 5) | 0x1F,
            0xFC,
        ]);
        stream.resize(stream.len() + frame_len - 7, (i % 200) as u8);
    }
    stream
}

/// 生成 `count` 个访问单元的 H.264 Annex B 码流, 每 30 帧一个 IDR
fn make_h264_stream(count: usize, slice_len: usize) -> Vec<u8> {
    let mut stream = Vec::new();
    for i in 0..count {
        stream.extend_from_slice(&[0, 0, 0, 1, 0x09, 0xF0]);
        let header = if i % 30 == 0 { 0x65 } else { 0x41 };
        stream.extend_from_slice(&[0, 0, 0, 1, header, 0x88]);
        stream.extend((0..slice_len).map(|j| ((j % 250) + 2) as u8));
    }
    stream
}

fn bench_rational(c: &mut Criterion) {
    let a = Rational::new(30000, 1001).unwrap();
    let b = Rational::new(1, 90000).unwrap();
    c.bench_function("rational_mul_reduce", |bench| {
        bench.iter(|| black_box(a).mul(black_box(b)).unwrap().reduce());
    });
    c.bench_function("rational_rescale", |bench| {
        let tb = a.inv().unwrap();
        bench.iter(|| Rational::rescale(black_box(123_456_789), tb, b).unwrap());
    });
}

fn bench_lookup(c: &mut Criterion) {
    let lib = Library::builtin();
    c.bench_function("find_encoder_by_id", |b| {
        b.iter(|| lib.codecs().find_encoder(black_box(CodecId::Opus)).unwrap());
    });
    c.bench_function("filter_get_by_name", |b| {
        b.iter(|| lib.filters().get_by_name(black_box("concat")).unwrap());
    });
    c.bench_function("guess_format_by_filename", |b| {
        b.iter(|| {
            lib.formats()
                .guess_format(None, Some(black_box("/data/out/clip.webm")), None)
                .unwrap()
        });
    });
}

fn bench_parser_split(c: &mut Criterion) {
    let lib = Library::builtin();

    let adts = make_adts_stream(512, 400);
    c.bench_function("parser_split_adts_200k", |b| {
        b.iter(|| {
            let mut parser = lib.parser(CodecId::Aac).unwrap();
            let mut total = 0;
            for (i, chunk) in adts.chunks(4096).enumerate() {
                let pos = (i * 4096) as i64;
                total += parser.split(black_box(chunk), NOPTS_VALUE, NOPTS_VALUE, pos).unwrap().len();
            }
            black_box(total);
        });
    });

    let h264 = make_h264_stream(120, 1500);
    c.bench_function("parser_split_h264_180k", |b| {
        b.iter(|| {
            let mut parser = lib.parser(CodecId::H264).unwrap();
            let mut total = 0;
            for chunk in h264.chunks(4096) {
                total += parser.split(black_box(chunk), NOPTS_VALUE, NOPTS_VALUE, -1).unwrap().len();
            }
            total += usize::from(parser.flush().unwrap().is_some());
            black_box(total);
        });
    });
}

criterion_group!(benches, bench_rational, bench_lookup, bench_parser_split);
criterion_main!(benches);
