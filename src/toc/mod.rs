pub mod error;
pub mod diagnostics;
pub mod source;
pub mod xml;
pub mod ncx;

// 重新导出错误处理
pub use error::{TocError, Result};

// 重新导出诊断输出
pub use diagnostics::{Diagnostic, DiagnosticSink, Level, LogSink, MemorySink};

// 重新导出XML相关
pub use xml::{TreeConverter, XmlDocument, XmlElement, XmlNode, XmlObject, XmlValue};

// 重新导出NCX提取相关
pub use ncx::{
    AdvancedToc,
    CategorizedMediaList,
    DEFAULT_CONFIG_PATH,
    ExtractorConfig,
    MediaCategory,
    MediaTypeConfig,
    MediaTypeConfigs,
    TocContent,
    TocExtractor,
    categorize_media_items,
};

// 重新导出加载函数
pub use source::{is_archive, list_ncx_entries, load_toc_text};
