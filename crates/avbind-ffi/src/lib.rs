//! # avbind-ffi
//!
//! avbind C ABI 导出层.
//!
//! 将内置引擎的查询与解析接口导出为 C 兼容函数,
//! 编译为 DLL (Windows) / SO (Linux) / dylib (macOS) 供 C/C++ 等语言调用.
//!
//! # 约定
//!
//! - 所有导出函数以 `avbind_` 前缀命名
//! - 空指针表示 "不存在"; 负的 `int` 返回值是 FFmpeg 兼容的错误码
//! - 编解码器/封装器/滤镜指针指向静态描述符, 调用方不得释放
//! - 名称通过调用方提供的缓冲区取出, 返回完整长度 (不含 `\0`), 与 `snprintf` 相同
//! - 解析器由 `avbind_parser_init` 分配, 必须用 `avbind_parser_close` 释放

use std::ffi::{CStr, c_char, c_int};
use std::ptr;

use avbind_codec::{
    CodecCatalog, CodecDescriptor, CodecId, CodecParser, Packet, builtin_codecs, builtin_parsers,
};
use avbind_core::ErrorCode;
use avbind_filter::{FilterCatalog, FilterDescriptor, builtin_filters};
use avbind_format::{FormatCatalog, OutputFormatDescriptor, builtin_formats};

const VERSION: &CStr = match CStr::from_bytes_with_nul(
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes(),
) {
    Ok(version) => version,
    Err(_) => c"unknown",
};

/// C 侧的解析器对象: 解析器本体加上最近一次产出的单元
pub struct AvbindParser {
    inner: CodecParser,
    last: Option<Packet>,
}

/// 获取版本号字符串
///
/// 返回的字符串指针为静态分配, 无需释放.
#[unsafe(no_mangle)]
pub extern "C" fn avbind_version() -> *const c_char {
    VERSION.as_ptr()
}

/// 把可空的 C 字符串转换为 `&str`, 非 UTF-8 视为不存在
///
/// # Safety
///
/// `p` 为空或指向以 `\0` 结尾的有效字符串.
unsafe fn opt_str<'a>(p: *const c_char) -> Option<&'a str> {
    if p.is_null() {
        return None;
    }
    // 安全: 调用方保证 p 指向有效 C 字符串
    unsafe { CStr::from_ptr(p) }.to_str().ok()
}

/// 把字符串复制到调用方缓冲区, 必要时截断, 总以 `\0` 结尾
///
/// # Safety
///
/// `buf` 为空或至少可写 `size` 字节.
unsafe fn copy_str(s: &str, buf: *mut c_char, size: usize) -> c_int {
    if !buf.is_null() && size > 0 {
        let n = s.len().min(size - 1);
        // 安全: n + 1 <= size, 源与目标不重叠
        unsafe {
            ptr::copy_nonoverlapping(s.as_ptr().cast::<c_char>(), buf, n);
            *buf.add(n) = 0;
        }
    }
    c_int::try_from(s.len()).unwrap_or(c_int::MAX)
}

// ========================
// 编解码器
// ========================

/// 按名称查找解码器, 未找到返回空指针
///
/// # Safety
///
/// `name` 为空或指向有效 C 字符串.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_codec_find_decoder_by_name(
    name: *const c_char,
) -> *const CodecDescriptor {
    // 安全: 由调用方保证
    let Some(name) = (unsafe { opt_str(name) }) else {
        return ptr::null();
    };
    builtin_codecs()
        .find_decoder_by_name(name)
        .map_or(ptr::null(), |codec| codec.descriptor())
}

/// 按名称查找编码器, 未找到返回空指针
///
/// # Safety
///
/// `name` 为空或指向有效 C 字符串.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_codec_find_encoder_by_name(
    name: *const c_char,
) -> *const CodecDescriptor {
    let Some(name) = (unsafe { opt_str(name) }) else {
        return ptr::null();
    };
    builtin_codecs()
        .find_encoder_by_name(name)
        .map_or(ptr::null(), |codec| codec.descriptor())
}

/// 取编解码器名称
///
/// # Safety
///
/// `codec` 为空或来自本库的查找函数; `buf` 为空或至少可写 `size` 字节.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_codec_name(
    codec: *const CodecDescriptor,
    buf: *mut c_char,
    size: usize,
) -> c_int {
    // 安全: 描述符指针来自静态表
    match unsafe { codec.as_ref() } {
        Some(desc) => unsafe { copy_str(desc.name, buf, size) },
        None => ErrorCode::EINVAL.value(),
    }
}

/// 是否为编码器: 1 是, 0 否, 空指针返回 EINVAL
///
/// # Safety
///
/// `codec` 为空或来自本库的查找函数.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_codec_is_encoder(codec: *const CodecDescriptor) -> c_int {
    match unsafe { codec.as_ref() } {
        Some(desc) => c_int::from(desc.kind == avbind_codec::CodecKind::Encoder),
        None => ErrorCode::EINVAL.value(),
    }
}

// ========================
// 码流解析器
// ========================

/// 按编解码器名称创建解析器, 不支持时返回空指针
///
/// # Safety
///
/// `codec_name` 为空或指向有效 C 字符串.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_parser_init(codec_name: *const c_char) -> *mut AvbindParser {
    let Some(id) = (unsafe { opt_str(codec_name) }).and_then(CodecId::from_name) else {
        return ptr::null_mut();
    };
    match CodecParser::init(&builtin_parsers(), id) {
        Ok(inner) => Box::into_raw(Box::new(AvbindParser { inner, last: None })),
        Err(err) => {
            log::debug!("avbind_parser_init 失败: {err}");
            ptr::null_mut()
        }
    }
}

/// 送入一段输入, 返回消费的字节数或负的错误码
///
/// 有完整单元时 `*out_data` / `*out_size` 指向该单元, 在下一次调用前有效;
/// 否则置为空指针和 0. `buf_size` 为 0 表示输入结束.
///
/// # Safety
///
/// `parser` 来自 `avbind_parser_init` 且尚未关闭; `buf` 至少可读 `buf_size` 字节;
/// `out_data` / `out_size` 为空或可写.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_parser_parse(
    parser: *mut AvbindParser,
    out_data: *mut *const u8,
    out_size: *mut c_int,
    buf: *const u8,
    buf_size: c_int,
    pts: i64,
    dts: i64,
    pos: i64,
) -> c_int {
    let Some(parser) = (unsafe { parser.as_mut() }) else {
        return ErrorCode::EINVAL.value();
    };
    let Ok(len) = usize::try_from(buf_size) else {
        return ErrorCode::EINVAL.value();
    };
    if buf.is_null() && len > 0 {
        return ErrorCode::EINVAL.value();
    }
    let data: &[u8] = if len == 0 {
        &[]
    } else {
        // 安全: 调用方保证 buf 可读 len 字节
        unsafe { std::slice::from_raw_parts(buf, len) }
    };

    let ret = parser
        .inner
        .parse_raw(&mut parser.last, data, pts, dts, pos);

    let (ptr_out, size_out) = match &parser.last {
        Some(packet) => (
            packet.data.as_ptr(),
            c_int::try_from(packet.size()).unwrap_or(c_int::MAX),
        ),
        None => (ptr::null(), 0),
    };
    // 安全: 调用方保证输出指针可写
    unsafe {
        if !out_data.is_null() {
            *out_data = ptr_out;
        }
        if !out_size.is_null() {
            *out_size = size_out;
        }
    }
    ret
}

/// 关闭并释放解析器, 空指针无副作用
///
/// # Safety
///
/// `parser` 为空或来自 `avbind_parser_init`, 且只能释放一次.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_parser_close(parser: *mut AvbindParser) {
    if parser.is_null() {
        return;
    }
    // 安全: 指针由 Box::into_raw 产生
    let mut parser = unsafe { Box::from_raw(parser) };
    parser.inner.close();
}

// ========================
// 封装器
// ========================

/// 猜测输出格式, 三个参数均可为空
///
/// # Safety
///
/// 各参数为空或指向有效 C 字符串.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_guess_format(
    short_name: *const c_char,
    filename: *const c_char,
    mime_type: *const c_char,
) -> *const OutputFormatDescriptor {
    let (short_name, filename, mime_type) =
        unsafe { (opt_str(short_name), opt_str(filename), opt_str(mime_type)) };
    builtin_formats()
        .guess_format(short_name, filename, mime_type)
        .map_or(ptr::null(), |fmt| fmt.descriptor())
}

/// 取封装器短名称
///
/// # Safety
///
/// `format` 为空或来自 `avbind_guess_format`; `buf` 为空或至少可写 `size` 字节.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_format_name(
    format: *const OutputFormatDescriptor,
    buf: *mut c_char,
    size: usize,
) -> c_int {
    match unsafe { format.as_ref() } {
        Some(desc) => unsafe { copy_str(desc.name, buf, size) },
        None => ErrorCode::EINVAL.value(),
    }
}

// ========================
// 滤镜
// ========================

/// 按名称查找滤镜, 未找到返回空指针
///
/// # Safety
///
/// `name` 为空或指向有效 C 字符串.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_filter_get_by_name(name: *const c_char) -> *const FilterDescriptor {
    let Some(name) = (unsafe { opt_str(name) }) else {
        return ptr::null();
    };
    builtin_filters()
        .get_by_name(name)
        .map_or(ptr::null(), |filter| filter.descriptor())
}

/// 取滤镜名称
///
/// # Safety
///
/// `filter` 为空或来自 `avbind_filter_get_by_name`; `buf` 为空或至少可写 `size` 字节.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_filter_name(
    filter: *const FilterDescriptor,
    buf: *mut c_char,
    size: usize,
) -> c_int {
    match unsafe { filter.as_ref() } {
        Some(desc) => unsafe { copy_str(desc.name, buf, size) },
        None => ErrorCode::EINVAL.value(),
    }
}

// ========================
// 错误码
// ========================

/// 错误码描述 (`av_strerror`)
///
/// # Safety
///
/// `buf` 为空或至少可写 `size` 字节.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn avbind_error_string(code: c_int, buf: *mut c_char, size: usize) -> c_int {
    unsafe { copy_str(ErrorCode(code).description(), buf, size) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(f: impl Fn(*mut c_char, usize) -> c_int) -> String {
        let mut buf = [0 as c_char; 64];
        let n = f(buf.as_mut_ptr(), buf.len());
        assert!(n >= 0);
        unsafe { CStr::from_ptr(buf.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_版本号() {
        let v = unsafe { CStr::from_ptr(avbind_version()) };
        assert_eq!(v.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_编解码器查找与名称() {
        unsafe {
            let enc = avbind_codec_find_encoder_by_name(c"libx264".as_ptr());
            assert!(!enc.is_null());
            assert_eq!(avbind_codec_is_encoder(enc), 1);
            assert_eq!(name_of(|b, s| avbind_codec_name(enc, b, s)), "libx264");

            let dec = avbind_codec_find_decoder_by_name(c"h264".as_ptr());
            assert_eq!(avbind_codec_is_encoder(dec), 0);

            assert!(avbind_codec_find_decoder_by_name(c"nope".as_ptr()).is_null());
            assert!(avbind_codec_find_decoder_by_name(ptr::null()).is_null());
            assert_eq!(avbind_codec_is_encoder(ptr::null()), ErrorCode::EINVAL.value());
        }
    }

    #[test]
    fn test_名称缓冲区截断() {
        let mut buf = [0x7f as c_char; 4];
        let dec = unsafe { avbind_codec_find_decoder_by_name(c"h264".as_ptr()) };
        let n = unsafe { avbind_codec_name(dec, buf.as_mut_ptr(), buf.len()) };
        assert_eq!(n, 4);
        assert_eq!(buf, [b'h' as c_char, b'2' as c_char, b'6' as c_char, 0]);
        // 空缓冲区只返回长度
        assert_eq!(unsafe { avbind_codec_name(dec, ptr::null_mut(), 0) }, 4);
    }

    #[test]
    fn test_解析器生命周期() {
        unsafe {
            assert!(avbind_parser_init(c"hevc".as_ptr()).is_null());
            let parser = avbind_parser_init(c"aac".as_ptr());
            assert!(!parser.is_null());

            let frame: [u8; 9] = [0xFF, 0xF1, 0x50, 0x80, 0x01, 0x3F, 0xFC, 0xAA, 0xBB];
            let mut out: *const u8 = ptr::null();
            let mut out_size: c_int = -1;
            let ret = avbind_parser_parse(
                parser,
                &mut out,
                &mut out_size,
                frame.as_ptr(),
                frame.len() as c_int,
                0,
                0,
                0,
            );
            assert_eq!(ret, 9);
            assert_eq!(out_size, 9);
            assert_eq!(*out.add(7), 0xAA);

            let ret = avbind_parser_parse(parser, &mut out, &mut out_size, ptr::null(), -1, 0, 0, 0);
            assert_eq!(ret, ErrorCode::EINVAL.value());
            avbind_parser_close(parser);
            avbind_parser_close(ptr::null_mut());
        }
    }

    #[test]
    fn test_格式猜测() {
        unsafe {
            let fmt = avbind_guess_format(ptr::null(), c"a.webm".as_ptr(), ptr::null());
            assert_eq!(name_of(|b, s| avbind_format_name(fmt, b, s)), "webm");
            assert!(avbind_guess_format(ptr::null(), ptr::null(), ptr::null()).is_null());
        }
    }

    #[test]
    fn test_滤镜与错误描述() {
        unsafe {
            let f = avbind_filter_get_by_name(c"overlay".as_ptr());
            assert_eq!(name_of(|b, s| avbind_filter_name(f, b, s)), "overlay");
            assert!(avbind_filter_get_by_name(c"OVERLAY".as_ptr()).is_null());
            let msg = name_of(|b, s| avbind_error_string(ErrorCode::EINVAL.value(), b, s));
            assert_eq!(msg, ErrorCode::EINVAL.description());
        }
    }
}
