//! 压缩数据包 (Packet).
//!
//! 对应 FFmpeg 的 `AVPacket` 中解析器会填写的部分: 一个完整编码单元的数据
//! 以及起始于该单元的输入块所携带的时间戳与字节偏移.

use bytes::Bytes;

/// 表示 "未定义" 的时间戳值 (`AV_NOPTS_VALUE`)
pub const NOPTS_VALUE: i64 = i64::MIN;

/// 压缩数据包
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// 完整编码单元的数据
    pub data: Bytes,
    /// 显示时间戳 (PTS), `NOPTS_VALUE` 表示未知
    pub pts: i64,
    /// 解码时间戳 (DTS), `NOPTS_VALUE` 表示未知
    pub dts: i64,
    /// 单元起始处在输入流中的字节偏移 (-1 表示未知)
    pub pos: i64,
    /// 是否为关键帧 (随机访问点)
    pub is_keyframe: bool,
}

impl Packet {
    /// 创建空数据包
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            pts: NOPTS_VALUE,
            dts: NOPTS_VALUE,
            pos: -1,
            is_keyframe: false,
        }
    }

    /// 从数据创建数据包
    pub fn from_data(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            ..Self::empty()
        }
    }

    /// 数据大小 (字节)
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 是否为空包
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
