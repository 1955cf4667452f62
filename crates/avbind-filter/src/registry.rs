//! 滤镜注册表查询.
//!
//! 对应 FFmpeg 的 `av_filter_iterate` / `avfilter_get_by_name`.

use avbind_core::Cursor;

use crate::filter::{Filter, FilterDescriptor};

/// 滤镜注册表
pub trait FilterCatalog: Send + Sync {
    /// 取下一个滤镜并推进游标
    fn next_filter(&self, cursor: &mut Cursor) -> Option<Filter>;

    /// 惰性遍历所有滤镜
    fn filters(&self) -> Filters<'_, Self>
    where
        Self: Sized,
    {
        iter_filters(self)
    }

    /// 按名称查找滤镜 (区分大小写)
    fn get_by_name(&self, name: &str) -> Option<Filter> {
        let found = iter_filters(self).find(|f| f.name() == name);
        if found.is_none() {
            log::debug!("注册表中没有名为 {name} 的滤镜");
        }
        found
    }
}

/// 滤镜遍历器
pub struct Filters<'a, C: FilterCatalog + ?Sized> {
    catalog: &'a C,
    cursor: Cursor,
}

impl<C: FilterCatalog + ?Sized> Iterator for Filters<'_, C> {
    type Item = Filter;

    fn next(&mut self) -> Option<Filter> {
        self.catalog.next_filter(&mut self.cursor)
    }
}

/// 遍历任意注册表 (含 trait 对象)
pub fn iter_filters<C: FilterCatalog + ?Sized>(catalog: &C) -> Filters<'_, C> {
    Filters {
        catalog,
        cursor: Cursor::new(),
    }
}

/// 基于静态描述符表的滤镜注册表
#[derive(Debug, Clone, Copy)]
pub struct StaticFilterCatalog {
    table: &'static [FilterDescriptor],
}

impl StaticFilterCatalog {
    /// 由静态表创建注册表
    pub const fn new(table: &'static [FilterDescriptor]) -> Self {
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

impl FilterCatalog for StaticFilterCatalog {
    fn next_filter(&self, cursor: &mut Cursor) -> Option<Filter> {
        let index = cursor.next_index(self.table.len())?;
        Some(Filter::from_static(&self.table[index]))
    }
}
