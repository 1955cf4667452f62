//! 滤镜描述符与句柄.
//!
//! 对应 FFmpeg 的 `AVFilter` 与 `AVFilterPad`.

use std::fmt;

use avbind_core::MediaType;
use bitflags::bitflags;

bitflags! {
    /// 滤镜标志位 (`AVFILTER_FLAG_*`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FilterFlags: u32 {
        /// 输入端口数量在初始化时动态确定
        const DYNAMIC_INPUTS            = 1 << 0;
        /// 输出端口数量在初始化时动态确定
        const DYNAMIC_OUTPUTS           = 1 << 1;
        /// 支持条带级多线程
        const SLICE_THREADS             = 1 << 2;
        /// 只修改元数据, 不改动帧数据
        const METADATA_ONLY             = 1 << 3;
        /// 需要硬件设备
        const HWDEVICE                  = 1 << 4;
        /// 通用时间线支持 (enable 表达式)
        const SUPPORT_TIMELINE_GENERIC  = 1 << 16;
        /// 滤镜内部处理时间线
        const SUPPORT_TIMELINE_INTERNAL = 1 << 17;
    }
}

impl FilterFlags {
    /// 任一时间线支持
    pub const SUPPORT_TIMELINE: Self =
        Self::SUPPORT_TIMELINE_GENERIC.union(Self::SUPPORT_TIMELINE_INTERNAL);
}

/// 滤镜端口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPad {
    /// 端口名称
    pub name: &'static str,
    /// 端口承载的媒体类型
    pub media_type: MediaType,
}

impl FilterPad {
    pub const fn new(name: &'static str, media_type: MediaType) -> Self {
        Self { name, media_type }
    }
}

/// 滤镜描述符
#[derive(Debug)]
pub struct FilterDescriptor {
    /// 滤镜名称
    pub name: &'static str,
    /// 描述
    pub description: &'static str,
    /// 静态输入端口
    pub inputs: &'static [FilterPad],
    /// 静态输出端口
    pub outputs: &'static [FilterPad],
    /// 标志位
    pub flags: FilterFlags,
}

/// 滤镜句柄
#[derive(Clone, Copy)]
pub struct Filter {
    desc: &'static FilterDescriptor,
}

impl Filter {
    /// 包装引擎静态表中的描述符
    pub const fn from_static(desc: &'static FilterDescriptor) -> Self {
        Self { desc }
    }

    /// 底层描述符
    pub fn descriptor(&self) -> &'static FilterDescriptor {
        self.desc
    }

    /// 滤镜名称, 如 `"scale"`
    pub fn name(&self) -> &'static str {
        self.desc.name
    }

    /// 一行描述
    pub fn description(&self) -> &'static str {
        self.desc.description
    }

    /// 静态输入端口
    pub fn inputs(&self) -> &'static [FilterPad] {
        self.desc.inputs
    }

    /// 静态输出端口
    pub fn outputs(&self) -> &'static [FilterPad] {
        self.desc.outputs
    }

    /// 滤镜能力标志
    pub fn flags(&self) -> FilterFlags {
        self.desc.flags
    }

    /// 静态输入端口数量 (`avfilter_filter_pad_count`)
    pub fn nb_inputs(&self) -> usize {
        self.desc.inputs.len()
    }

    /// 静态输出端口数量
    pub fn nb_outputs(&self) -> usize {
        self.desc.outputs.len()
    }

    /// 是否为源滤镜: 没有静态输入, 也不能动态增加输入
    pub fn is_source(&self) -> bool {
        self.desc.inputs.is_empty() && !self.desc.flags.contains(FilterFlags::DYNAMIC_INPUTS)
    }

    /// 是否为汇滤镜: 没有静态输出, 也不能动态增加输出
    pub fn is_sink(&self) -> bool {
        self.desc.outputs.is_empty() && !self.desc.flags.contains(FilterFlags::DYNAMIC_OUTPUTS)
    }

    /// 端口涉及的媒体类型, 按首次出现的顺序去重
    pub fn media_types(&self) -> Vec<MediaType> {
        let mut types = Vec::new();
        for pad in self.desc.inputs.iter().chain(self.desc.outputs) {
            if !types.contains(&pad.media_type) {
                types.push(pad.media_type);
            }
        }
        types
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.desc, other.desc)
    }
}

impl Eq for Filter {}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("name", &self.desc.name)
            .field("nb_inputs", &self.nb_inputs())
            .field("nb_outputs", &self.nb_outputs())
            .finish()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.desc.name)
    }
}
