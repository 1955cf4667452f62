//! 码流解析器 (bitstream parser).
//!
//! 对应 FFmpeg 的 `AVCodecParserContext` 与 `av_parser_init` /
//! `av_parser_parse2` / `av_parser_close`.
//!
//! 解析器把原始基本流切分为完整的编码单元 (帧 / 访问单元). 一个输入块可能
//! 产出零个、一个或多个单元, 一个单元也可能跨越多个输入块, 因此调用方需要
//! 循环调用 [`CodecParser::parse`]:
//!
//! ```rust
//! use avbind_codec::parser::{CodecParser, builtin_parsers};
//! use avbind_codec::{CodecId, NOPTS_VALUE};
//!
//! let registry = builtin_parsers();
//! let mut parser = CodecParser::init(&registry, CodecId::Aac).unwrap();
//! let chunk: &[u8] = &[];
//! let mut offset = 0;
//! while offset < chunk.len() {
//!     let mut unit = None;
//!     let consumed = parser
//!         .parse(&mut unit, &chunk[offset..], NOPTS_VALUE, NOPTS_VALUE, -1)
//!         .unwrap();
//!     offset += consumed;
//!     if let Some(packet) = unit {
//!         // 送往解码器
//!         let _ = packet;
//!     }
//! }
//! parser.close();
//! ```

pub mod adts;
pub mod h264;

use avbind_core::{AvError, AvResult, ErrorCode};

use crate::codec_id::CodecId;
use crate::packet::{NOPTS_VALUE, Packet};

pub use adts::AdtsParser;
pub use h264::H264Parser;

/// 解析引擎 trait
///
/// 对应 FFmpeg 的 `AVCodecParser`, 是引擎一侧的切分实现.
/// 每次调用至多产出一个完整单元.
pub trait ParserEngine: Send {
    /// 引擎名称
    fn name(&self) -> &str;

    /// 送入一段输入
    ///
    /// 返回本次接收的输入字节数. 当一个完整单元就绪时写入 `out` (覆盖原内容),
    /// 否则保持 `out` 为空. 输入非空时, 要么接收至少一个字节, 要么产出一个单元.
    fn parse(&mut self, data: &[u8], out: &mut Vec<u8>) -> AvResult<usize>;

    /// 输入结束, 把缓存中剩余的完整数据写入 `out`
    fn flush(&mut self, out: &mut Vec<u8>);

    /// 缓存中是否留有未完成单元的字节
    ///
    /// 返回 `false` 表示此前送入的输入已全部产出或丢弃.
    fn has_pending(&self) -> bool;

    /// 判断一个完整单元是否为随机访问点
    fn is_keyframe(&self, _unit: &[u8]) -> bool {
        false
    }
}

/// 解析输出: 有完整单元就绪时为 `Some`
pub type ParserOutput = Option<Packet>;

/// 解析引擎工厂函数类型
pub type ParserFactory = fn() -> Box<dyn ParserEngine>;

/// 解析器注册条目
struct ParserEntry {
    /// 引擎名称
    name: &'static str,
    /// 支持的编解码器
    codec_ids: &'static [CodecId],
    /// 工厂函数
    factory: ParserFactory,
}

/// 解析引擎注册表
///
/// 按 `CodecId` 查找并实例化解析引擎. 先注册的条目优先.
pub struct ParserRegistry {
    entries: Vec<ParserEntry>,
}

impl ParserRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 注册一个解析引擎
    pub fn register(
        &mut self,
        name: &'static str,
        codec_ids: &'static [CodecId],
        factory: ParserFactory,
    ) {
        self.entries.push(ParserEntry {
            name,
            codec_ids,
            factory,
        });
    }

    /// 为指定编解码器创建引擎实例, 不支持时返回 `None`
    pub fn create(&self, codec_id: CodecId) -> Option<Box<dyn ParserEngine>> {
        self.entries
            .iter()
            .find(|entry| entry.codec_ids.contains(&codec_id))
            .map(|entry| (entry.factory)())
    }

    /// 是否存在支持该编解码器的引擎
    pub fn supports(&self, codec_id: CodecId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.codec_ids.contains(&codec_id))
    }

    /// 所有已注册的引擎 (名称, 支持的编解码器)
    pub fn list(&self) -> Vec<(&'static str, &'static [CodecId])> {
        self.entries
            .iter()
            .map(|entry| (entry.name, entry.codec_ids))
            .collect()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 注册所有内置解析引擎
pub fn register_all(registry: &mut ParserRegistry) {
    registry.register("aac", &[CodecId::Aac], || Box::new(AdtsParser::new()));
    registry.register("h264", &[CodecId::H264], || Box::new(H264Parser::new()));
}

/// 创建已注册所有内置解析引擎的注册表
pub fn builtin_parsers() -> ParserRegistry {
    let mut registry = ParserRegistry::new();
    register_all(&mut registry);
    registry
}

/// 单元起始处的时间信息
#[derive(Debug, Clone, Copy)]
struct Timing {
    pts: i64,
    dts: i64,
    pos: i64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            pts: NOPTS_VALUE,
            dts: NOPTS_VALUE,
            pos: -1,
        }
    }
}

/// 码流解析器句柄
///
/// 持有引擎状态, 由 [`init`](Self::init) 创建、[`close`](Self::close) 释放.
/// `Drop` 时若尚未关闭会自动释放. 关闭后的任何 `parse` 调用都返回
/// [`AvError::ParserClosed`].
///
/// 时间戳规则: 调用时传入的 pts/dts/pos 记为 "待用时间", 由下一个在输入中
/// 开始的单元取走. 同一输入块的剩余部分应传入 `NOPTS_VALUE`, 并把 `pos`
/// 加上已消费的偏移 ([`split`](Self::split) 即按此规则循环).
pub struct CodecParser {
    codec_id: CodecId,
    engine: Option<Box<dyn ParserEngine>>,
    scratch: Vec<u8>,
    pending: Timing,
    current: Option<Timing>,
}

impl CodecParser {
    /// 为指定编解码器初始化解析器 (`av_parser_init`)
    ///
    /// 注册表中没有对应引擎时返回 `ErrorCode::ENOSYS`.
    pub fn init(registry: &ParserRegistry, codec_id: CodecId) -> AvResult<Self> {
        let engine = registry.create(codec_id).ok_or_else(|| {
            AvError::native(ErrorCode::ENOSYS, format!("没有 {codec_id} 的码流解析器"))
        })?;
        log::debug!("初始化码流解析器: codec={}, engine={}", codec_id, engine.name());
        Ok(Self {
            codec_id,
            engine: Some(engine),
            scratch: Vec::new(),
            pending: Timing::default(),
            current: None,
        })
    }

    /// 解析器对应的编解码器
    pub fn codec_id(&self) -> CodecId {
        self.codec_id
    }

    /// 是否已关闭
    pub fn is_closed(&self) -> bool {
        self.engine.is_none()
    }

    /// 送入一段输入 (`av_parser_parse2`)
    ///
    /// # 参数
    /// - `output`: 有完整单元就绪时写入 `Some(packet)`
    /// - `data`: 输入字节; 空切片表示输入结束, 取出缓存中的最后一个单元
    /// - `pts` / `dts` / `pos`: 输入块的时间戳与字节偏移
    ///
    /// # 返回
    /// 本次消费的输入字节数. 调用方将输入偏移前移该值后继续调用.
    pub fn parse(
        &mut self,
        output: &mut ParserOutput,
        data: &[u8],
        pts: i64,
        dts: i64,
        pos: i64,
    ) -> AvResult<usize> {
        let engine = self.engine.as_mut().ok_or(AvError::ParserClosed)?;
        *output = None;

        if data.is_empty() {
            engine.flush(&mut self.scratch);
            if !self.scratch.is_empty() {
                *output = Some(take_packet(
                    engine.as_ref(),
                    &mut self.scratch,
                    self.current.take().unwrap_or_default(),
                ));
            }
            self.current = None;
            self.pending = Timing::default();
            return Ok(0);
        }

        if pts != NOPTS_VALUE {
            self.pending.pts = pts;
        }
        if dts != NOPTS_VALUE {
            self.pending.dts = dts;
        }
        if pos >= 0 {
            self.pending.pos = pos;
        }
        let started = self.current.is_none();
        if started {
            self.current = Some(std::mem::take(&mut self.pending));
        }

        let consumed = engine.parse(data, &mut self.scratch)?;
        if !self.scratch.is_empty() {
            let timing = self.current.take().unwrap_or_default();
            *output = Some(take_packet(engine.as_ref(), &mut self.scratch, timing));
        } else if !engine.has_pending() {
            // 输入被丢弃, 没有单元开始, 时间信息不能留给之后的单元
            let timing = self.current.take();
            if consumed >= data.len() {
                self.pending = Timing::default();
            } else if let Some(timing) = timing.filter(|_| started) {
                // 本块剩余部分可能开始新单元
                self.pending = timing;
            }
        }
        Ok(consumed)
    }

    /// C 风格的解析调用: 非负值为消费字节数, 负值为错误码
    pub fn parse_raw(
        &mut self,
        output: &mut ParserOutput,
        data: &[u8],
        pts: i64,
        dts: i64,
        pos: i64,
    ) -> i32 {
        if i32::try_from(data.len()).is_err() {
            return ErrorCode::EINVAL.value();
        }
        match self.parse(output, data, pts, dts, pos) {
            // 消费量不超过输入长度, 已在上面确认可放入 i32
            Ok(consumed) => consumed as i32,
            Err(err) => err.code().value(),
        }
    }

    /// 把一个完整输入块切分为编码单元
    ///
    /// 循环调用 `parse` 直到输入耗尽, 收集期间就绪的所有单元.
    /// 跨块的未完成单元留在解析器中, 由后续输入或 [`flush`](Self::flush) 取出.
    pub fn split(&mut self, data: &[u8], pts: i64, dts: i64, pos: i64) -> AvResult<Vec<Packet>> {
        let mut packets = Vec::new();
        let mut offset = 0usize;
        let (mut pts, mut dts) = (pts, dts);
        while offset < data.len() {
            let chunk_pos = if pos >= 0 { pos + offset as i64 } else { -1 };
            let mut unit = None;
            let consumed = self.parse(&mut unit, &data[offset..], pts, dts, chunk_pos)?;
            offset += consumed;
            pts = NOPTS_VALUE;
            dts = NOPTS_VALUE;
            match unit {
                Some(packet) => packets.push(packet),
                None if consumed == 0 => break,
                None => {}
            }
        }
        Ok(packets)
    }

    /// 输入结束, 取出缓存中的最后一个单元
    pub fn flush(&mut self) -> AvResult<Option<Packet>> {
        let mut unit = None;
        self.parse(&mut unit, &[], NOPTS_VALUE, NOPTS_VALUE, -1)?;
        Ok(unit)
    }

    /// 释放引擎状态 (`av_parser_close`), 重复调用无副作用
    pub fn close(&mut self) {
        if let Some(engine) = self.engine.take() {
            log::debug!("关闭码流解析器: codec={}, engine={}", self.codec_id, engine.name());
            self.scratch = Vec::new();
            self.current = None;
        }
    }
}

impl Drop for CodecParser {
    fn drop(&mut self) {
        self.close();
    }
}

fn take_packet(engine: &dyn ParserEngine, scratch: &mut Vec<u8>, timing: Timing) -> Packet {
    let data = std::mem::take(scratch);
    let is_keyframe = engine.is_keyframe(&data);
    Packet {
        data: data.into(),
        pts: timing.pts,
        dts: timing.dts,
        pos: timing.pos,
        is_keyframe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 以固定 4 字节为单元的测试引擎
    struct FixedParser {
        buf: Vec<u8>,
    }

    impl ParserEngine for FixedParser {
        fn name(&self) -> &str {
            "fixed4"
        }

        fn parse(&mut self, data: &[u8], out: &mut Vec<u8>) -> AvResult<usize> {
            let take = (4 - self.buf.len()).min(data.len());
            self.buf.extend_from_slice(&data[..take]);
            if self.buf.len() == 4 {
                out.append(&mut self.buf);
            }
            Ok(take)
        }

        fn flush(&mut self, out: &mut Vec<u8>) {
            out.append(&mut self.buf);
        }

        fn has_pending(&self) -> bool {
            !self.buf.is_empty()
        }
    }

    fn fixed_registry() -> ParserRegistry {
        let mut registry = ParserRegistry::new();
        registry.register("fixed4", &[CodecId::RawVideo], || {
            Box::new(FixedParser { buf: Vec::new() })
        });
        registry
    }

    #[test]
    fn test_未注册的编解码器初始化失败() {
        let err = CodecParser::init(&fixed_registry(), CodecId::H264)
            .err()
            .unwrap();
        assert_eq!(err.code(), ErrorCode::ENOSYS);
    }

    #[test]
    fn test_关闭后解析返回错误() {
        let mut parser = CodecParser::init(&fixed_registry(), CodecId::RawVideo).unwrap();
        parser.close();
        assert!(parser.is_closed());
        let mut unit = None;
        let err = parser.parse(&mut unit, &[1, 2], 0, 0, 0).unwrap_err();
        assert!(matches!(err, AvError::ParserClosed));
        assert_eq!(
            parser.parse_raw(&mut unit, &[1, 2], 0, 0, 0),
            ErrorCode::EINVAL.value()
        );
        // 重复关闭无副作用
        parser.close();
    }

    #[test]
    fn test_单元跨越多个输入块() {
        let mut parser = CodecParser::init(&fixed_registry(), CodecId::RawVideo).unwrap();
        let mut unit = None;
        assert_eq!(parser.parse(&mut unit, &[1, 2], 100, 90, 0).unwrap(), 2);
        assert!(unit.is_none());
        assert_eq!(parser.parse(&mut unit, &[3, 4, 5], 200, 190, 2).unwrap(), 2);
        let packet = unit.take().unwrap();
        assert_eq!(&packet.data[..], &[1, 2, 3, 4]);
        // 时间戳来自单元开始所在的输入块
        assert_eq!((packet.pts, packet.dts, packet.pos), (100, 90, 0));
    }

    #[test]
    fn test_一个输入块产出多个单元() {
        let mut parser = CodecParser::init(&fixed_registry(), CodecId::RawVideo).unwrap();
        let data: Vec<u8> = (0..10).collect();
        let packets = parser.split(&data, 1000, NOPTS_VALUE, 64).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].pts, 1000);
        assert_eq!(packets[0].pos, 64);
        assert_eq!(packets[1].pts, NOPTS_VALUE);
        assert_eq!(packets[1].pos, 68);

        let tail = parser.flush().unwrap().unwrap();
        assert_eq!(&tail.data[..], &[8, 9]);
        assert_eq!(tail.pos, 72);
        assert!(parser.flush().unwrap().is_none());
    }

    #[test]
    fn test_被丢弃的输入块不占用时间戳() {
        let mut parser = CodecParser::init(&builtin_parsers(), CodecId::Aac).unwrap();
        // 没有同步字, 整块丢弃
        assert!(parser.split(&[0; 10], 500, 500, 0).unwrap().is_empty());

        let mut frame = vec![0xFF, 0xF1, 0x50, 0x80, 0x02, 0x9F, 0xFC];
        frame.resize(20, 0x5A);
        let packets = parser.split(&frame, 1000, 1000, 10).unwrap();
        assert_eq!(packets.len(), 1);
        let packet = &packets[0];
        assert_eq!((packet.pts, packet.dts, packet.pos), (1000, 1000, 10));
    }

    #[test]
    fn test_parse_raw返回消费字节数() {
        let mut parser = CodecParser::init(&fixed_registry(), CodecId::RawVideo).unwrap();
        let mut unit = None;
        assert_eq!(parser.parse_raw(&mut unit, &[9; 6], 0, 0, -1), 4);
        assert!(unit.is_some());
    }

    #[test]
    fn test_内置注册表() {
        let registry = builtin_parsers();
        assert!(registry.supports(CodecId::Aac));
        assert!(registry.supports(CodecId::H264));
        assert!(!registry.supports(CodecId::Hevc));
        assert_eq!(registry.list().len(), 2);
    }
}
