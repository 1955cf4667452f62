//! 端到端集成测试: 原始基本流 → 码流解析器 → 完整编码单元.
//!
//! 覆盖 ADTS 与 H.264 Annex B 两种引擎, 以及时间戳与字节偏移的传递.

use avbind::codec::{CodecId, CodecParser, NOPTS_VALUE, Packet, ParserOutput};
use avbind::{AvError, ErrorCode, Library};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 构造一个 ADTS 帧 (无 CRC, AAC LC, 44.1kHz, 双声道)
fn adts_frame(len: usize, fill: u8) -> Vec<u8> {
    let mut frame = vec![
        0xFF,
        0xF1,
        (1 << 6) | (4 << 2),
        (2 << 6) | ((len >> 11) & 0x03) as u8,
        ((len >> 3) & 0xFF) as u8,
        (((len & 0x07) as u8) << 5) | 0x1F,
        0xFC,
    ];
    frame.resize(len, fill);
    frame
}

fn nal(start_code_len: usize, header: u8, payload: &[u8]) -> Vec<u8> {
    let mut v = vec![0u8; start_code_len - 1];
    v.push(1);
    v.push(header);
    v.extend_from_slice(payload);
    v
}

/// AUD + SPS + PPS + IDR, 接着两个 P 帧
fn h264_stream() -> (Vec<u8>, Vec<Vec<u8>>) {
    let mut au0 = nal(4, 0x09, &[0xF0]);
    au0.extend(nal(4, 0x67, &[0x64, 0x00, 0x1F, 0xAC]));
    au0.extend(nal(4, 0x68, &[0xEE, 0x3C, 0x80]));
    au0.extend(nal(3, 0x65, &[0x88, 0x84, 0x00, 0x21, 0xFF]));
    let mut au1 = nal(4, 0x09, &[0x30]);
    au1.extend(nal(4, 0x41, &[0x9A, 0x11, 0x22]));
    let mut au2 = nal(4, 0x09, &[0x30]);
    au2.extend(nal(4, 0x41, &[0x9A, 0x33]));
    let stream = [au0.clone(), au1.clone(), au2.clone()].concat();
    (stream, vec![au0, au1, au2])
}

/// 按固定块大小送入, 每块携带 pts = 块序号 * 1000
fn split_stream(parser: &mut CodecParser, stream: &[u8], chunk: usize) -> Vec<Packet> {
    let mut packets = Vec::new();
    for (i, piece) in stream.chunks(chunk).enumerate() {
        let pts = i as i64 * 1000;
        let pos = (i * chunk) as i64;
        packets.extend(parser.split(piece, pts, pts, pos).unwrap());
    }
    packets.extend(parser.flush().unwrap());
    packets
}

#[test]
fn test_adts_跨块切分与时间戳() {
    init_logger();
    let lib = Library::builtin();
    let mut parser = lib.parser(CodecId::Aac).unwrap();
    let stream = [adts_frame(100, 0x11), adts_frame(57, 0x22), adts_frame(300, 0x33)].concat();

    let packets = split_stream(&mut parser, &stream, 64);
    assert_eq!(packets.len(), 3);
    assert_eq!(packets[0].data.as_ref(), &stream[..100]);
    assert_eq!(packets[1].data.as_ref(), &stream[100..157]);
    assert_eq!(packets[2].data.as_ref(), &stream[157..]);

    // 单元取走其起始字节所在输入块的时间戳
    let pts: Vec<i64> = packets.iter().map(|p| p.pts).collect();
    assert_eq!(pts, vec![0, 1000, 2000]);
    let pos: Vec<i64> = packets.iter().map(|p| p.pos).collect();
    assert_eq!(pos, vec![0, 100, 157]);
    assert!(packets.iter().all(|p| p.is_keyframe));
}

#[test]
fn test_adts_跳过垃圾数据() {
    init_logger();
    let lib = Library::builtin();
    let mut parser = lib.parser(CodecId::Aac).unwrap();
    let mut stream = vec![0x00, 0x12, 0x34];
    stream.extend(adts_frame(40, 0xAA));
    stream.extend(adts_frame(40, 0xBB));
    // 截断的尾帧在结束时丢弃
    stream.extend(&adts_frame(40, 0xCC)[..20]);

    let packets = split_stream(&mut parser, &stream, stream.len());
    assert_eq!(packets.len(), 2);
    assert!(packets.iter().all(|p| p.size() == 40));
    assert_eq!(packets[1].data[39], 0xBB);
}

#[test]
fn test_adts_纯垃圾块之后的帧使用自身时间戳() {
    init_logger();
    let lib = Library::builtin();
    let mut parser = lib.parser(CodecId::Aac).unwrap();

    assert!(parser.split(&[0x00; 10], 500, 500, 0).unwrap().is_empty());
    assert!(parser.split(&[0x12, 0x34, 0x56], 700, 700, 10).unwrap().is_empty());

    let packets = parser.split(&adts_frame(20, 0x5A), 1000, 1000, 13).unwrap();
    assert_eq!(packets.len(), 1);
    assert_eq!((packets[0].pts, packets[0].dts, packets[0].pos), (1000, 1000, 13));
    assert!(parser.flush().unwrap().is_none());
}

/// 帧长度字段为 3 的无效头部, 重新同步后缓存被清空
fn invalid_adts_header() -> Vec<u8> {
    let mut header = adts_frame(7, 0);
    header[4] = 0;
    header[5] = (3 << 5) | 0x1F;
    header
}

#[test]
fn test_adts_重新同步清空缓存后的时间戳() {
    init_logger();
    let lib = Library::builtin();
    let mut parser = lib.parser(CodecId::Aac).unwrap();

    // 无效头部加尾随垃圾, 整块都没有开始任何帧
    let mut garbage = invalid_adts_header();
    garbage.extend([0x00, 0x00, 0x00]);
    assert!(parser.split(&garbage, 500, 500, 0).unwrap().is_empty());
    let packets = parser.split(&adts_frame(24, 0x21), 1000, 1000, 10).unwrap();
    assert_eq!(packets.len(), 1);
    assert_eq!((packets[0].pts, packets[0].pos), (1000, 10));

    // 无效头部之后同一块内开始的帧仍取该块的时间戳, 偏移指向帧起点
    let mut chunk = invalid_adts_header();
    chunk.extend(adts_frame(12, 0x44));
    let packets = parser.split(&chunk, 2000, 2000, 34).unwrap();
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].data.as_ref(), adts_frame(12, 0x44).as_slice());
    assert_eq!((packets[0].pts, packets[0].dts, packets[0].pos), (2000, 2000, 41));
}

#[test]
fn test_h264_访问单元与块大小无关() {
    init_logger();
    let lib = Library::builtin();
    let (stream, expected) = h264_stream();
    for chunk in [1, 3, 8, 64, stream.len()] {
        let mut parser = lib.parser(CodecId::H264).unwrap();
        let packets = split_stream(&mut parser, &stream, chunk);
        let units: Vec<Vec<u8>> = packets.iter().map(|p| p.data.to_vec()).collect();
        assert_eq!(units, expected, "chunk={chunk}");
        let keys: Vec<bool> = packets.iter().map(|p| p.is_keyframe).collect();
        assert_eq!(keys, vec![true, false, false], "chunk={chunk}");
    }
}

#[test]
fn test_h264_未知时间戳保持未定义() {
    init_logger();
    let lib = Library::builtin();
    let (stream, _) = h264_stream();
    let mut parser = lib.parser(CodecId::H264).unwrap();
    let mut packets = parser.split(&stream, NOPTS_VALUE, NOPTS_VALUE, -1).unwrap();
    packets.extend(parser.flush().unwrap());
    assert_eq!(packets.len(), 3);
    assert!(packets.iter().all(|p| p.pts == NOPTS_VALUE && p.dts == NOPTS_VALUE));
    assert!(packets.iter().all(|p| p.pos == -1));
}

#[test]
fn test_手动循环调用() {
    init_logger();
    let lib = Library::builtin();
    let mut parser = lib.parser(CodecId::Aac).unwrap();
    let stream = [adts_frame(30, 1), adts_frame(30, 2)].concat();

    let mut offset = 0;
    let mut sizes = Vec::new();
    while offset < stream.len() {
        let mut unit: ParserOutput = None;
        let consumed = parser
            .parse(&mut unit, &stream[offset..], NOPTS_VALUE, NOPTS_VALUE, offset as i64)
            .unwrap();
        offset += consumed;
        if let Some(packet) = unit {
            sizes.push(packet.size());
        }
    }
    assert_eq!(sizes, vec![30, 30]);

    // 输入结束后再 flush 不产出
    let mut unit = None;
    assert_eq!(parser.parse(&mut unit, &[], NOPTS_VALUE, NOPTS_VALUE, -1).unwrap(), 0);
    assert!(unit.is_none());
}

#[test]
fn test_关闭后调用报错() {
    init_logger();
    let lib = Library::builtin();
    let mut parser = lib.parser(CodecId::H264).unwrap();
    parser.close();
    parser.close();
    assert!(parser.is_closed());

    let mut unit = None;
    let err = parser
        .parse(&mut unit, &[0, 0, 1, 0x65], NOPTS_VALUE, NOPTS_VALUE, 0)
        .unwrap_err();
    assert!(matches!(err, AvError::ParserClosed));
    assert_eq!(
        parser.parse_raw(&mut unit, &[0, 0, 1], NOPTS_VALUE, NOPTS_VALUE, 0),
        ErrorCode::EINVAL.value()
    );
    assert!(parser.flush().is_err());
}

#[test]
fn test_不支持的编解码器() {
    init_logger();
    let lib = Library::builtin();
    for id in [CodecId::Vp9, CodecId::Flac, CodecId::Subrip] {
        let err = lib.parser(id).err().unwrap();
        assert_eq!(err.code(), ErrorCode::ENOSYS, "{id}");
    }
}
