//! # avbind-format
//!
//! avbind 容器格式绑定, 对标 FFmpeg libavformat 的封装器查询接口.
//!
//! ## 使用示例
//!
//! ```rust
//! use avbind_format::{FormatCatalog, builtin_formats};
//!
//! let formats = builtin_formats();
//! let fmt = formats.guess_format(None, Some("output.mkv"), None).unwrap();
//! assert_eq!(fmt.name(), "matroska");
//! ```

pub mod builtin;
pub mod output_format;
pub mod registry;

pub use builtin::builtin_formats;
pub use output_format::{FormatFlags, OutputFormat, OutputFormatDescriptor};
pub use registry::{FormatCatalog, Muxers, StaticFormatCatalog, file_extension, iter_muxers, match_name};
