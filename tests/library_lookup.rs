//! 集成测试: 通过 Library 查询编解码器、滤镜与有理数运算.

use avbind::codec::{
    CodecCapabilities, CodecCatalog, CodecDescriptor, CodecId, CodecKind, HwDeviceType,
    ParserRegistry, StaticCodecCatalog, builtin_parsers, iter_codecs,
};
use avbind::core::{MediaType, PixelFormat};
use avbind::filter::{FilterCatalog, FilterFlags, iter_filters};
use avbind::{AvError, ErrorCode, Library, Rational};

// ============================================================
// 编解码器
// ============================================================

#[test]
fn test_按标识查找默认实现() {
    let lib = Library::builtin();
    let dec = lib.codecs().find_decoder(CodecId::H264).unwrap();
    assert_eq!(dec.name(), "h264");
    assert!(!dec.is_hardware(), "默认解码器应该是软件实现");

    let enc = lib.codecs().find_encoder(CodecId::Hevc).unwrap();
    assert_eq!(enc.name(), "libx265");
    assert_eq!(enc.wrapper_name(), Some("libx265"));
}

#[test]
fn test_名称在方向间独立() {
    let lib = Library::builtin();
    let dec = lib.codecs().find_decoder_by_name("aac").unwrap();
    let enc = lib.codecs().find_encoder_by_name("aac").unwrap();
    assert!(dec.is_decoder() && enc.is_encoder());
    assert_ne!(dec, enc, "同名的解码器与编码器是不同的句柄");
    assert!(lib.codecs().find_encoder_by_name("h264_cuvid").is_none());
    assert!(lib.codecs().find_decoder_by_name("libx264").is_none());
}

#[test]
fn test_句柄按身份比较() {
    let lib = Library::builtin();
    let a = lib.codecs().find_decoder(CodecId::Vp9).unwrap();
    let b = lib.codecs().find_decoder_by_name("vp9").unwrap();
    assert_eq!(a, b);
    assert!(std::ptr::eq(a.descriptor(), b.descriptor()));
}

#[test]
fn test_硬件配置遍历() {
    let lib = Library::builtin();
    let dec = lib.codecs().find_decoder(CodecId::H264).unwrap();
    let configs: Vec<_> = dec.hw_configs().collect();
    assert!(!configs.is_empty());
    assert!(configs.iter().any(|c| c.device_type == HwDeviceType::Vaapi));
    assert!(configs.iter().all(|c| c.pixel_format.is_hwaccel()));
    assert!(dec.hw_config(configs.len()).is_none(), "越界索引返回空值");
}

#[test]
fn test_遍历覆盖全部媒体类型() {
    let lib = Library::builtin();
    let types: Vec<MediaType> = iter_codecs(lib.codecs()).map(|c| c.media_type()).collect();
    for expected in [MediaType::Video, MediaType::Audio, MediaType::Subtitle] {
        assert!(types.contains(&expected), "缺少 {expected} 类型的编解码器");
    }
}

static CUSTOM_CODECS: [CodecDescriptor; 2] = [
    CodecDescriptor {
        name: "my_h264",
        long_name: "自定义 H.264 解码器",
        id: CodecId::H264,
        kind: CodecKind::Decoder,
        capabilities: CodecCapabilities::HARDWARE,
        pixel_formats: Some(&[PixelFormat::Nv12]),
        ..CodecDescriptor::TEMPLATE
    },
    CodecDescriptor {
        name: "my_pcm",
        long_name: "自定义 PCM 编码器",
        id: CodecId::PcmS16le,
        kind: CodecKind::Encoder,
        ..CodecDescriptor::TEMPLATE
    },
];

#[test]
fn test_注入自定义引擎() {
    let lib = Library::new(
        Box::new(StaticCodecCatalog::new(&CUSTOM_CODECS)),
        Box::new(*avbind::filter::builtin_filters()),
        Box::new(*avbind::format::builtin_formats()),
        ParserRegistry::new(),
    );
    let dec = lib.codecs().find_decoder(CodecId::H264).unwrap();
    assert_eq!(dec.name(), "my_h264");
    assert!(dec.is_hardware());
    assert!(lib.codecs().find_decoder(CodecId::Aac).is_none());
    assert_eq!(iter_codecs(lib.codecs()).count(), 2);

    // 空解析引擎注册表
    let err = lib.parser(CodecId::Aac).err().unwrap();
    assert_eq!(err.code(), ErrorCode::ENOSYS);
    assert!(builtin_parsers().supports(CodecId::Aac));
}

// ============================================================
// 滤镜
// ============================================================

#[test]
fn test_滤镜端口() {
    let lib = Library::builtin();
    let overlay = lib.filters().get_by_name("overlay").unwrap();
    assert_eq!(overlay.nb_inputs(), 2);
    assert_eq!(overlay.nb_outputs(), 1);
    assert_eq!(overlay.inputs()[1].name, "overlay");
    assert_eq!(overlay.media_types(), vec![MediaType::Video]);

    let amix = lib.filters().get_by_name("amix").unwrap();
    assert!(amix.flags().contains(FilterFlags::DYNAMIC_INPUTS));
    assert_eq!(amix.nb_inputs(), 0, "动态输入的静态端口列表为空");

    assert!(lib.filters().get_by_name("no_such_filter").is_none());
}

#[test]
fn test_滤镜遍历可重启() {
    let lib = Library::builtin();
    let first: Vec<&str> = iter_filters(lib.filters()).map(|f| f.name()).collect();
    assert!(lib.filters().get_by_name("buffer").is_some());
    let again: Vec<&str> = iter_filters(lib.filters()).map(|f| f.name()).collect();
    assert_eq!(first, again);
    assert!(first.contains(&"scale"));
}

// ============================================================
// 有理数
// ============================================================

#[test]
fn test_时间基换算() {
    let ntsc = Rational::new(30000, 1001).unwrap();
    let tb = ntsc.inv().unwrap();
    assert_eq!(tb, Rational::new(1001, 30000).unwrap());

    // 90kHz 时钟下一帧的时长
    let mpeg_tb = Rational::new(1, 90000).unwrap();
    assert_eq!(Rational::rescale(1, tb, mpeg_tb).unwrap(), 3003);

    let sum = tb.add(tb).unwrap();
    assert_eq!(sum.reduce(), Rational::new(1001, 15000).unwrap().reduce());
    assert_eq!(sum.reduce().num(), 1001);
}

#[test]
fn test_有理数错误() {
    let r = Rational::new(3, 4).unwrap();
    assert!(matches!(r.div(Rational::ZERO), Err(AvError::DivisionByZero(_))));
    assert!(matches!(Rational::ZERO.inv(), Err(AvError::DivisionByZero(_))));
    assert!(matches!(Rational::new(1, 0), Err(AvError::InvalidArgument(_))));

    let big = Rational::new(i32::MAX, 1).unwrap();
    assert!(matches!(big.mul(big), Err(AvError::Overflow(_))));

    let err: AvError = "abc".parse::<Rational>().unwrap_err();
    assert_eq!(err.code(), ErrorCode::EINVAL);
}
