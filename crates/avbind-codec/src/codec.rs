//! 编解码器描述符与句柄.
//!
//! 对应 FFmpeg 的 `AVCodec`. 描述符存放在引擎的静态表中, 进程内只读;
//! [`Codec`] 是指向描述符的轻量句柄, 可随意复制和跨线程共享.

use std::fmt;

use avbind_core::{ChannelLayout, MediaType, PixelFormat, Rational, SampleFormat};
use bitflags::bitflags;

use crate::codec_id::CodecId;
use crate::hwaccel::HwConfig;

bitflags! {
    /// 编解码器能力位 (`AV_CODEC_CAP_*`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CodecCapabilities: u32 {
        /// 支持逐条带回调
        const DRAW_HORIZ_BAND     = 1 << 0;
        /// 使用 get_buffer 分配帧
        const DR1                 = 1 << 1;
        /// 存在编解码延迟, 结束时需要 flush
        const DELAY               = 1 << 5;
        /// 允许最后一帧较短
        const SMALL_LAST_FRAME    = 1 << 6;
        /// 一个包可包含多个子帧
        const SUBFRAMES           = 1 << 8;
        /// 实验性实现
        const EXPERIMENTAL        = 1 << 9;
        /// 可能改变声道配置
        const CHANNEL_CONF        = 1 << 10;
        /// 支持帧级多线程
        const FRAME_THREADS       = 1 << 12;
        /// 支持条带级多线程
        const SLICE_THREADS       = 1 << 13;
        /// 支持参数动态变化
        const PARAM_CHANGE        = 1 << 14;
        /// 其它内部多线程方式
        const OTHER_THREADS       = 1 << 15;
        /// 音频帧长可变
        const VARIABLE_FRAME_SIZE = 1 << 16;
        /// 探测时避免使用
        const AVOID_PROBING       = 1 << 17;
        /// 硬件加速实现
        const HARDWARE            = 1 << 18;
        /// 可能回退到软件实现的硬件实现
        const HYBRID              = 1 << 19;
        /// 编码器支持 flush
        const ENCODER_FLUSH       = 1 << 21;
    }
}

/// 描述符的方向: 解码器或编码器
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    /// 解码器
    Decoder,
    /// 编码器
    Encoder,
}

/// 编解码器档次 (`AVProfile`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// 档次编号
    pub id: i32,
    /// 档次名称
    pub name: &'static str,
}

/// 编解码器描述符
///
/// 引擎静态表中的一条记录. 各 `Option` 列表为 `None` 表示 "不限制".
#[derive(Debug)]
pub struct CodecDescriptor {
    /// 短名称, 如 "h264_nvenc"
    pub name: &'static str,
    /// 人类可读名称
    pub long_name: &'static str,
    /// 编解码算法
    pub id: CodecId,
    /// 解码器还是编码器
    pub kind: CodecKind,
    /// 能力位
    pub capabilities: CodecCapabilities,
    /// 外部库包装名称, 如 "libx264"
    pub wrapper_name: Option<&'static str>,
    /// 支持的像素格式
    pub pixel_formats: Option<&'static [PixelFormat]>,
    /// 支持的采样格式
    pub sample_formats: Option<&'static [SampleFormat]>,
    /// 支持的采样率
    pub sample_rates: Option<&'static [u32]>,
    /// 支持的帧率
    pub frame_rates: Option<&'static [Rational]>,
    /// 支持的声道布局
    pub channel_layouts: Option<&'static [ChannelLayout]>,
    /// 已知档次
    pub profiles: &'static [Profile],
    /// 硬件加速配置
    pub hw_configs: &'static [HwConfig],
}

impl CodecDescriptor {
    /// 空白模板, 供静态表以结构体更新语法补全字段
    pub const TEMPLATE: Self = Self {
        name: "",
        long_name: "",
        id: CodecId::None,
        kind: CodecKind::Decoder,
        capabilities: CodecCapabilities::empty(),
        wrapper_name: None,
        pixel_formats: None,
        sample_formats: None,
        sample_rates: None,
        frame_rates: None,
        channel_layouts: None,
        profiles: &[],
        hw_configs: &[],
    };
}

/// 编解码器句柄
///
/// 只读视图, 所有谓词每次调用时根据描述符字段重新计算.
#[derive(Clone, Copy)]
pub struct Codec {
    desc: &'static CodecDescriptor,
}

impl Codec {
    /// 包装引擎静态表中的描述符
    pub const fn from_static(desc: &'static CodecDescriptor) -> Self {
        Self { desc }
    }

    /// 底层描述符
    pub fn descriptor(&self) -> &'static CodecDescriptor {
        self.desc
    }

    /// 编解码算法标识
    pub fn id(&self) -> CodecId {
        self.desc.id
    }

    /// 短名称
    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    /// 人类可读名称
    pub fn long_name(&self) -> &'static str {
        self.desc.long_name
    }

    /// 媒体类型
    pub fn media_type(&self) -> MediaType {
        self.desc.id.media_type()
    }

    /// 能力位
    pub fn capabilities(&self) -> CodecCapabilities {
        self.desc.capabilities
    }

    /// 外部库包装名称
    pub fn wrapper_name(&self) -> Option<&'static str> {
        self.desc.wrapper_name
    }

    /// 是否为编码器 (`av_codec_is_encoder`)
    pub fn is_encoder(&self) -> bool {
        self.desc.kind == CodecKind::Encoder
    }

    /// 是否为解码器 (`av_codec_is_decoder`)
    pub fn is_decoder(&self) -> bool {
        self.desc.kind == CodecKind::Decoder
    }

    /// 是否为硬件实现
    pub fn is_hardware(&self) -> bool {
        self.desc.capabilities.contains(CodecCapabilities::HARDWARE)
    }

    /// 是否为实验性实现
    pub fn is_experimental(&self) -> bool {
        self.desc
            .capabilities
            .contains(CodecCapabilities::EXPERIMENTAL)
    }

    /// 支持的像素格式, `None` 表示未声明
    pub fn supported_pixel_formats(&self) -> Option<&'static [PixelFormat]> {
        self.desc.pixel_formats
    }

    /// 支持的采样格式
    pub fn supported_sample_formats(&self) -> Option<&'static [SampleFormat]> {
        self.desc.sample_formats
    }

    /// 支持的采样率
    pub fn supported_sample_rates(&self) -> Option<&'static [u32]> {
        self.desc.sample_rates
    }

    /// 支持的帧率
    pub fn supported_frame_rates(&self) -> Option<&'static [Rational]> {
        self.desc.frame_rates
    }

    /// 支持的声道布局
    pub fn supported_channel_layouts(&self) -> Option<&'static [ChannelLayout]> {
        self.desc.channel_layouts
    }

    /// 已知档次
    pub fn profiles(&self) -> &'static [Profile] {
        self.desc.profiles
    }

    /// 按索引取硬件配置 (`avcodec_get_hw_config`), 越界返回 `None`
    pub fn hw_config(&self, index: usize) -> Option<HwConfig> {
        self.desc.hw_configs.get(index).copied()
    }

    /// 逐个枚举硬件配置, 直到 `hw_config` 返回 `None`
    pub fn hw_configs(&self) -> impl Iterator<Item = HwConfig> + '_ {
        (0..).map_while(|i| self.hw_config(i))
    }
}

impl PartialEq for Codec {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.desc, other.desc)
    }
}

impl Eq for Codec {}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("name", &self.desc.name)
            .field("id", &self.desc.id)
            .field("kind", &self.desc.kind)
            .finish()
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.desc.name)
    }
}
