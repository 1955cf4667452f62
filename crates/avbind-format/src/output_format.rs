//! 封装器 (输出格式) 描述符与句柄.
//!
//! 对应 FFmpeg 的 `AVOutputFormat`.

use std::fmt;

use avbind_codec::CodecId;
use bitflags::bitflags;

bitflags! {
    /// 封装器标志位 (`AVFMT_*`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FormatFlags: u32 {
        /// 不需要打开文件 (由封装器自行处理 I/O)
        const NOFILE        = 0x0001;
        /// 文件名中需要 `%d`
        const NEEDNUMBER    = 0x0002;
        /// 需要全局头部 (extradata)
        const GLOBALHEADER  = 0x0040;
        /// 不需要时间戳
        const NOTIMESTAMPS  = 0x0080;
        /// 允许可变帧率
        const VARIABLE_FPS  = 0x0400;
        /// 不需要宽高
        const NODIMENSIONS  = 0x0800;
        /// 不需要任何流
        const NOSTREAMS     = 0x1000;
        /// 支持以空包刷新
        const ALLOW_FLUSH   = 0x10000;
        /// 时间戳不要求严格递增
        const TS_NONSTRICT  = 0x20000;
        /// 允许负时间戳
        const TS_NEGATIVE   = 0x40000;
    }
}

/// 封装器描述符
#[derive(Debug)]
pub struct OutputFormatDescriptor {
    /// 短名称, 如 "mp4"
    pub name: &'static str,
    /// 人类可读名称
    pub long_name: &'static str,
    /// MIME 类型
    pub mime_type: Option<&'static str>,
    /// 文件扩展名 (不含 `.`)
    pub extensions: &'static [&'static str],
    /// 默认音频编解码器
    pub audio_codec: CodecId,
    /// 默认视频编解码器
    pub video_codec: CodecId,
    /// 默认字幕编解码器
    pub subtitle_codec: CodecId,
    /// 标志位
    pub flags: FormatFlags,
    /// 默认编解码器之外可以封装的编解码器
    pub codecs: &'static [CodecId],
}

impl OutputFormatDescriptor {
    /// 空白模板
    pub const TEMPLATE: Self = Self {
        name: "",
        long_name: "",
        mime_type: None,
        extensions: &[],
        audio_codec: CodecId::None,
        video_codec: CodecId::None,
        subtitle_codec: CodecId::None,
        flags: FormatFlags::empty(),
        codecs: &[],
    };
}

/// 封装器句柄
#[derive(Clone, Copy)]
pub struct OutputFormat {
    desc: &'static OutputFormatDescriptor,
}

fn present(id: CodecId) -> Option<CodecId> {
    (id != CodecId::None).then_some(id)
}

impl OutputFormat {
    /// 包装引擎静态表中的描述符
    pub const fn from_static(desc: &'static OutputFormatDescriptor) -> Self {
        Self { desc }
    }

    /// 底层描述符
    pub fn descriptor(&self) -> &'static OutputFormatDescriptor {
        self.desc
    }

    /// 短名称, 如 `"mp4"`
    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    /// 描述性长名称
    pub fn long_name(&self) -> &'static str {
        self.desc.long_name
    }

    /// MIME 类型, 未定义时为 `None`
    pub fn mime_type(&self) -> Option<&'static str> {
        self.desc.mime_type
    }

    /// 关联的文件扩展名 (不含点)
    pub fn extensions(&self) -> &'static [&'static str] {
        self.desc.extensions
    }

    /// 默认音频编解码器, 不支持音频时为 `None`
    pub fn audio_codec(&self) -> Option<CodecId> {
        present(self.desc.audio_codec)
    }

    /// 默认视频编解码器
    pub fn video_codec(&self) -> Option<CodecId> {
        present(self.desc.video_codec)
    }

    /// 默认字幕编解码器
    pub fn subtitle_codec(&self) -> Option<CodecId> {
        present(self.desc.subtitle_codec)
    }

    /// 封装器能力标志
    pub fn flags(&self) -> FormatFlags {
        self.desc.flags
    }

    /// 能否封装指定编解码器 (`avformat_query_codec`)
    pub fn query_codec(&self, id: CodecId) -> bool {
        if id == CodecId::None {
            return false;
        }
        [
            self.desc.audio_codec,
            self.desc.video_codec,
            self.desc.subtitle_codec,
        ]
        .contains(&id)
            || self.desc.codecs.contains(&id)
    }

    /// 编码器是否需要输出全局头部
    pub fn is_global_header(&self) -> bool {
        self.desc.flags.contains(FormatFlags::GLOBALHEADER)
    }

    /// 调用方是否需要为其打开输出文件
    pub fn needs_file(&self) -> bool {
        !self.desc.flags.contains(FormatFlags::NOFILE)
    }

    /// 扩展名是否属于该格式 (不区分大小写)
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.desc
            .extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

impl PartialEq for OutputFormat {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.desc, other.desc)
    }
}

impl Eq for OutputFormat {}

impl fmt::Debug for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputFormat")
            .field("name", &self.desc.name)
            .finish()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.desc.name)
    }
}
