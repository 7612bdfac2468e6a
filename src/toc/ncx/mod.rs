//! 高级目录（NCX）提取模块
//!
//! 此模块在通用标签树之上定位测验条目和媒体容器条目，并把媒体条目按类型分类。
//! 提取行为可以通过YAML配置调整测验标记和媒体类型别名。

pub mod config;
pub mod extractor;
pub mod media;

pub use config::{DEFAULT_CONFIG_PATH, ExtractorConfig, MediaTypeConfig, MediaTypeConfigs};
pub use extractor::{AdvancedToc, TocContent, TocExtractor};
pub use media::{CategorizedMediaList, MediaCategory, categorize_media_items};
