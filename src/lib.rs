pub mod toc;

// === 核心API重新导出 ===

/// 高级目录提取器（主要接口）
pub use toc::{TocExtractor, TocContent, AdvancedToc};

/// 错误处理
pub use toc::{TocError, Result};

// === 数据结构 ===

/// 通用标签树
pub use toc::{XmlObject, XmlValue};

/// 媒体分类
pub use toc::{CategorizedMediaList, MediaCategory, categorize_media_items};

/// 配置
pub use toc::{DEFAULT_CONFIG_PATH, ExtractorConfig, MediaTypeConfig, MediaTypeConfigs};

/// 诊断输出
pub use toc::{Diagnostic, DiagnosticSink, Level, LogSink, MemorySink};

// === 底层组件（高级用法） ===

/// XML节点树与转换器
pub use toc::{TreeConverter, XmlDocument, XmlElement, XmlNode};

/// 文件加载
pub use toc::{is_archive, list_ncx_entries, load_toc_text};

// === 库信息 ===

/// TocForge库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// TocForge库的描述
pub const DESCRIPTION: &str = "解析高级目录（NCX）并提取测验与媒体条目的库";

// === 便捷函数 ===

/// 快速处理一段高级目录文本
///
/// 这是 `TocExtractor::new` 加 `handle_advanced_toc` 的便捷包装函数，
/// 诊断信息输出到 `log`。
///
/// # 示例
///
/// ```rust
/// let extractor = tocforge::extract(r#"<ncx><navMap/></ncx>"#);
/// assert!(extractor.quiz_item_list().is_none());
/// ```
pub fn extract(content: &str) -> TocExtractor {
    let mut extractor = TocExtractor::new();
    extractor.handle_advanced_toc(content);
    extractor
}

/// 把XML文本转换为通用标签树
///
/// 这是 `TreeConverter::parse_to_tree` 的便捷包装函数。
pub fn parse_to_tree(xml_content: &str) -> Result<XmlObject> {
    TreeConverter::parse_to_tree(xml_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_description() {
        assert!(!DESCRIPTION.is_empty());
    }

    #[test]
    fn test_extract_convenience() {
        let xml = r#"<ncx><navMap>
            <navPoint id="intro"><content src="intro.html"/></navPoint>
            <navPoint id="media"><content/>
                <mediaMap><mediaPoint type="IMG"/><mediaPoint type="GIF"/></mediaMap>
            </navPoint>
        </navMap></ncx>"#;
        let extractor = extract(xml);
        let media = extractor.categorized_list().unwrap();
        assert_eq!(media.img.len(), 1);
        assert_eq!(media.gif.len(), 1);
    }

    #[test]
    fn test_parse_to_tree_convenience() {
        let tree = parse_to_tree(r#"<ncx version="2005-1"/>"#).unwrap();
        assert_eq!(tree.get_str("version"), Some("2005-1"));
    }
}
