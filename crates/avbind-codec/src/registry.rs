//! 编解码器注册表查询.
//!
//! 对应 FFmpeg 的 `av_codec_iterate` / `avcodec_find_decoder` 系列接口.
//! 注册表被建模为可注入的只读服务 [`CodecCatalog`], 由调用方显式传递,
//! 而不是进程级可变单例.

use avbind_core::Cursor;

use crate::codec::{Codec, CodecDescriptor, CodecKind};
use crate::codec_id::CodecId;

/// 编解码器注册表
///
/// 实现方只需提供基于游标的遍历, 查找接口由默认方法实现.
/// 查找失败一律返回 `None`, 不视为错误.
pub trait CodecCatalog: Send + Sync {
    /// 取下一个编解码器并推进游标, 遍历结束返回 `None`
    fn next_codec(&self, cursor: &mut Cursor) -> Option<Codec>;

    /// 惰性遍历所有编解码器, 每次调用都从头开始
    fn codecs(&self) -> Codecs<'_, Self>
    where
        Self: Sized,
    {
        Codecs {
            catalog: self,
            cursor: Cursor::new(),
        }
    }

    /// 按标识查找解码器
    fn find_decoder(&self, id: CodecId) -> Option<Codec> {
        find_by_id(self, id, CodecKind::Decoder)
    }

    /// 按标识查找编码器
    fn find_encoder(&self, id: CodecId) -> Option<Codec> {
        find_by_id(self, id, CodecKind::Encoder)
    }

    /// 按名称查找解码器
    fn find_decoder_by_name(&self, name: &str) -> Option<Codec> {
        find_by_name(self, name, CodecKind::Decoder)
    }

    /// 按名称查找编码器
    fn find_encoder_by_name(&self, name: &str) -> Option<Codec> {
        find_by_name(self, name, CodecKind::Encoder)
    }
}

/// 编解码器遍历器, 由 [`CodecCatalog::codecs`] 创建
pub struct Codecs<'a, C: CodecCatalog + ?Sized> {
    catalog: &'a C,
    cursor: Cursor,
}

impl<C: CodecCatalog + ?Sized> Iterator for Codecs<'_, C> {
    type Item = Codec;

    fn next(&mut self) -> Option<Codec> {
        self.catalog.next_codec(&mut self.cursor)
    }
}

/// 遍历任意注册表 (含 trait 对象)
pub fn iter_codecs<C: CodecCatalog + ?Sized>(catalog: &C) -> Codecs<'_, C> {
    Codecs {
        catalog,
        cursor: Cursor::new(),
    }
}

/// 按标识查找: 优先返回非实验性实现, 没有时退回第一个实验性实现
fn find_by_id<C: CodecCatalog + ?Sized>(catalog: &C, id: CodecId, kind: CodecKind) -> Option<Codec> {
    let mut experimental = None;
    for codec in iter_codecs(catalog) {
        if codec.id() != id || codec.descriptor().kind != kind {
            continue;
        }
        if codec.is_experimental() {
            experimental.get_or_insert(codec);
            continue;
        }
        return Some(codec);
    }
    if experimental.is_none() {
        log::debug!("注册表中没有 {id} 的{}", kind_label(kind));
    }
    experimental
}

fn find_by_name<C: CodecCatalog + ?Sized>(
    catalog: &C,
    name: &str,
    kind: CodecKind,
) -> Option<Codec> {
    let found = iter_codecs(catalog)
        .find(|codec| codec.descriptor().kind == kind && codec.name() == name);
    if found.is_none() {
        log::debug!("注册表中没有名为 {name} 的{}", kind_label(kind));
    }
    found
}

fn kind_label(kind: CodecKind) -> &'static str {
    match kind {
        CodecKind::Decoder => "解码器",
        CodecKind::Encoder => "编码器",
    }
}

/// 基于静态描述符表的注册表
///
/// 表中顺序即遍历顺序, 也决定同名/同标识条目的优先级.
#[derive(Debug, Clone, Copy)]
pub struct StaticCodecCatalog {
    table: &'static [CodecDescriptor],
}

impl StaticCodecCatalog {
    /// 由静态表创建注册表
    pub const fn new(table: &'static [CodecDescriptor]) -> Self {
        Self { table }
    }

    /// 表中条目数量
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// 表是否为空
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl CodecCatalog for StaticCodecCatalog {
    fn next_codec(&self, cursor: &mut Cursor) -> Option<Codec> {
        let index = cursor.next_index(self.table.len())?;
        Some(Codec::from_static(&self.table[index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecCapabilities;

    static TABLE: [CodecDescriptor; 4] = [
        CodecDescriptor {
            name: "vorbis",
            long_name: "Vorbis",
            id: CodecId::Vorbis,
            kind: CodecKind::Encoder,
            capabilities: CodecCapabilities::EXPERIMENTAL,
            ..CodecDescriptor::TEMPLATE
        },
        CodecDescriptor {
            name: "libvorbis",
            long_name: "libvorbis",
            id: CodecId::Vorbis,
            kind: CodecKind::Encoder,
            ..CodecDescriptor::TEMPLATE
        },
        CodecDescriptor {
            name: "vorbis",
            long_name: "Vorbis",
            id: CodecId::Vorbis,
            kind: CodecKind::Decoder,
            ..CodecDescriptor::TEMPLATE
        },
        CodecDescriptor {
            name: "opus",
            long_name: "Opus",
            id: CodecId::Opus,
            kind: CodecKind::Encoder,
            capabilities: CodecCapabilities::EXPERIMENTAL,
            ..CodecDescriptor::TEMPLATE
        },
    ];

    static CATALOG: StaticCodecCatalog = StaticCodecCatalog::new(&TABLE);

    #[test]
    fn test_游标遍历可重启且有限() {
        assert_eq!(CATALOG.codecs().count(), 4);
        let first: Vec<_> = CATALOG.codecs().map(|c| c.name()).collect();
        let second: Vec<_> = CATALOG.codecs().map(|c| c.name()).collect();
        assert_eq!(first, second);

        let mut cursor = Cursor::new();
        for _ in 0..4 {
            assert!(CATALOG.next_codec(&mut cursor).is_some());
        }
        assert!(CATALOG.next_codec(&mut cursor).is_none());
        assert!(CATALOG.next_codec(&mut cursor).is_none());
    }

    #[test]
    fn test_按标识查找跳过实验性实现() {
        let enc = CATALOG.find_encoder(CodecId::Vorbis).unwrap();
        assert_eq!(enc.name(), "libvorbis");
    }

    #[test]
    fn test_只有实验性实现时退回() {
        let enc = CATALOG.find_encoder(CodecId::Opus).unwrap();
        assert!(enc.is_experimental());
    }

    #[test]
    fn test_按名称区分方向() {
        let dec = CATALOG.find_decoder_by_name("vorbis").unwrap();
        assert!(dec.is_decoder());
        let enc = CATALOG.find_encoder_by_name("vorbis").unwrap();
        assert!(enc.is_encoder());
        assert!(CATALOG.find_decoder_by_name("libvorbis").is_none());
    }

    #[test]
    fn test_未找到返回空值() {
        assert!(CATALOG.find_decoder(CodecId::H264).is_none());
        assert!(CATALOG.find_encoder_by_name("nope").is_none());
    }

    #[test]
    fn test_trait对象可遍历() {
        let dyn_catalog: &dyn CodecCatalog = &CATALOG;
        assert_eq!(iter_codecs(dyn_catalog).count(), 4);
        assert!(dyn_catalog.find_decoder(CodecId::Vorbis).is_some());
    }
}
