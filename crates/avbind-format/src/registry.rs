//! 封装器注册表查询与格式猜测.
//!
//! 对应 FFmpeg 的 `av_muxer_iterate` / `av_guess_format`.

use avbind_core::Cursor;

use crate::output_format::{OutputFormat, OutputFormatDescriptor};

/// 短名称匹配得分
const SCORE_NAME: u32 = 100;
/// 文件扩展名匹配得分
const SCORE_EXTENSION: u32 = 10;
/// MIME 类型匹配得分
const SCORE_MIME: u32 = 5;

/// 封装器注册表
pub trait FormatCatalog: Send + Sync {
    /// 取下一个封装器并推进游标
    fn next_muxer(&self, cursor: &mut Cursor) -> Option<OutputFormat>;

    /// 惰性遍历所有封装器
    fn muxers(&self) -> Muxers<'_, Self>
    where
        Self: Sized,
    {
        iter_muxers(self)
    }

    /// 按短名称查找封装器, 名称可为逗号分隔的列表
    fn find_muxer(&self, short_name: &str) -> Option<OutputFormat> {
        iter_muxers(self).find(|fmt| match_name(short_name, fmt.name()))
    }

    /// 根据短名称、文件名、MIME 类型猜测输出格式
    ///
    /// 每个封装器按命中项累计得分: 短名称 100, 扩展名 10, MIME 5.
    /// 得分最高者胜出, 同分取先注册者, 全部为 0 时返回 `None`.
    fn guess_format(
        &self,
        short_name: Option<&str>,
        filename: Option<&str>,
        mime_type: Option<&str>,
    ) -> Option<OutputFormat> {
        let ext = filename.and_then(file_extension);
        let mut best: Option<(u32, OutputFormat)> = None;
        for fmt in iter_muxers(self) {
            let mut score = 0;
            if short_name.is_some_and(|name| match_name(name, fmt.name())) {
                score += SCORE_NAME;
            }
            if mime_type.is_some_and(|mime| fmt.mime_type() == Some(mime)) {
                score += SCORE_MIME;
            }
            if ext.is_some_and(|ext| fmt.matches_extension(ext)) {
                score += SCORE_EXTENSION;
            }
            if score > best.map_or(0, |(s, _)| s) {
                best = Some((score, fmt));
            }
        }
        if best.is_none() {
            log::debug!(
                "无法猜测输出格式: name={short_name:?}, filename={filename:?}, mime={mime_type:?}"
            );
        }
        best.map(|(_, fmt)| fmt)
    }
}

/// 封装器遍历器
pub struct Muxers<'a, C: FormatCatalog + ?Sized> {
    catalog: &'a C,
    cursor: Cursor,
}

impl<C: FormatCatalog + ?Sized> Iterator for Muxers<'_, C> {
    type Item = OutputFormat;

    fn next(&mut self) -> Option<OutputFormat> {
        self.catalog.next_muxer(&mut self.cursor)
    }
}

/// 遍历任意注册表 (含 trait 对象)
pub fn iter_muxers<C: FormatCatalog + ?Sized>(catalog: &C) -> Muxers<'_, C> {
    Muxers {
        catalog,
        cursor: Cursor::new(),
    }
}

/// 名称匹配 (`av_match_name`): 两侧均可为逗号分隔列表, 不区分大小写
pub fn match_name(query: &str, names: &str) -> bool {
    query.split(',').map(str::trim).any(|q| {
        !q.is_empty()
            && names
                .split(',')
                .any(|name| name.trim().eq_ignore_ascii_case(q))
    })
}

/// 取文件名最后一个 `.` 之后的扩展名
///
/// 扩展名只在最后一个路径分隔符之后查找, 没有扩展名时返回 `None`.
pub fn file_extension(filename: &str) -> Option<&str> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (_, ext) = base.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}

/// 基于静态描述符表的封装器注册表
#[derive(Debug, Clone, Copy)]
pub struct StaticFormatCatalog {
    table: &'static [OutputFormatDescriptor],
}

impl StaticFormatCatalog {
    /// 由静态表创建注册表
    pub const fn new(table: &'static [OutputFormatDescriptor]) -> Self {
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

impl FormatCatalog for StaticFormatCatalog {
    fn next_muxer(&self, cursor: &mut Cursor) -> Option<OutputFormat> {
        let index = cursor.next_index(self.table.len())?;
        Some(OutputFormat::from_static(&self.table[index]))
    }
}
