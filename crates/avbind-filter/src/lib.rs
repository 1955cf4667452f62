//! # avbind-filter
//!
//! avbind 滤镜绑定, 对标 FFmpeg libavfilter 的滤镜查询接口.
//!
//! 只描述滤镜 (名称、端口、标志), 不构建滤镜图.
//!
//! ## 使用示例
//!
//! ```rust
//! use avbind_filter::{FilterCatalog, builtin_filters};
//!
//! let scale = builtin_filters().get_by_name("scale").unwrap();
//! assert_eq!(scale.nb_inputs(), 1);
//! assert!(!scale.is_source());
//! ```

pub mod builtin;
pub mod filter;
pub mod registry;

pub use builtin::builtin_filters;
pub use filter::{Filter, FilterDescriptor, FilterFlags, FilterPad};
pub use registry::{FilterCatalog, Filters, StaticFilterCatalog, iter_filters};
