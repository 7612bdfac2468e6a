//! 高级目录（NCX）提取器
//!
//! 把整个NCX文档转换为通用标签树，然后在 `navMap.navPoint` 序列中
//! 定位测验条目和媒体容器条目，并对媒体条目分类。

use std::sync::Arc;

use crate::toc::diagnostics::{DiagnosticSink, LogSink};
use crate::toc::error::{Result, TocError};
use crate::toc::ncx::config::ExtractorConfig;
use crate::toc::ncx::media::{CategorizedMediaList, categorize_media_items};
use crate::toc::xml::{TreeConverter, XmlDocument, XmlObject, XmlValue};

const NAV_POINTS_PATH: &[&str] = &["navMap", "navPoint"];
const QUIZ_TYPE_PATH: &[&str] = &["navPoint", "mediaMap", "mediaPoint", "type"];
const MEDIA_POINTS_PATH: &[&str] = &["mediaMap", "mediaPoint"];

/// 提取器的输入：XML文本或已解析的文档
#[derive(Debug, Clone, Copy)]
pub enum TocContent<'a> {
    Text(&'a str),
    Document(&'a XmlDocument),
}

impl TocContent<'_> {
    /// 统一为XML文本，已解析的文档会重新序列化
    fn to_xml_string(self) -> Result<String> {
        match self {
            TocContent::Text(text) => Ok(text.to_string()),
            TocContent::Document(document) => document.to_xml_string(),
        }
    }
}

impl<'a> From<&'a str> for TocContent<'a> {
    fn from(text: &'a str) -> Self {
        TocContent::Text(text)
    }
}

impl<'a> From<&'a String> for TocContent<'a> {
    fn from(text: &'a String) -> Self {
        TocContent::Text(text.as_str())
    }
}

impl<'a> From<&'a XmlDocument> for TocContent<'a> {
    fn from(document: &'a XmlDocument) -> Self {
        TocContent::Document(document)
    }
}

/// 一次提取的完整结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedToc {
    /// 测验条目
    pub quiz_item: Option<XmlObject>,
    /// 分类后的媒体条目；没有媒体容器时为 `None`
    pub media: Option<CategorizedMediaList>,
}

/// 高级目录提取器
///
/// 两个结果字段在创建时为空，每次成功调用 [`TocExtractor::handle_advanced_toc`] 时被覆盖。
pub struct TocExtractor {
    quiz_item_list: Option<XmlObject>,
    categorized_media_list: Option<CategorizedMediaList>,
    config: ExtractorConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl TocExtractor {
    /// 使用默认配置和 `log` 诊断输出创建提取器
    pub fn new() -> Self {
        Self {
            quiz_item_list: None,
            categorized_media_list: None,
            config: ExtractorConfig::default(),
            sink: Arc::new(LogSink),
        }
    }

    /// 替换配置
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// 替换诊断信息接收端
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// 最近一次识别到的测验条目
    pub fn quiz_item_list(&self) -> Option<&XmlObject> {
        self.quiz_item_list.as_ref()
    }

    /// 最近一次得到的媒体分类结果
    pub fn categorized_list(&self) -> Option<&CategorizedMediaList> {
        self.categorized_media_list.as_ref()
    }

    /// 当前状态的快照
    pub fn snapshot(&self) -> AdvancedToc {
        AdvancedToc {
            quiz_item: self.quiz_item_list.clone(),
            media: self.categorized_media_list.clone(),
        }
    }

    /// 处理高级目录内容
    ///
    /// 不会返回错误：解析或遍历失败时通过诊断接收端报告错误，
    /// 已经完成的字段更新不会回滚，未执行到的字段保持原值。
    ///
    /// # 参数
    /// * `content` - NCX的XML文本或已解析的文档
    pub fn handle_advanced_toc<'a>(&mut self, content: impl Into<TocContent<'a>>) {
        if let Err(e) = self.try_handle(content.into()) {
            self.sink
                .error(&format!("Error loading or parsing the data: {}", e));
        }
    }

    fn try_handle(&mut self, content: TocContent<'_>) -> Result<()> {
        let xml_content = content.to_xml_string()?;
        let tree = TreeConverter::parse_to_tree(&xml_content)?;

        let nav_points = nav_point_list(&tree)?;
        log::debug!("navMap中共有 {} 个导航点", nav_points.len());

        self.quiz_item_list = find_quiz_item(&nav_points, &self.config.quiz_media_type).cloned();
        log::debug!("测验条目: {}", if self.quiz_item_list.is_some() { "找到" } else { "无" });

        match find_media_points(&nav_points) {
            Some(media_points) => {
                check_media_types(media_points)?;
                let categorized =
                    categorize_media_items(media_points, &self.config.media_types, self.sink.as_ref());
                log::debug!("媒体条目分类完成，共 {} 个", categorized.total());
                self.categorized_media_list = Some(categorized);
            }
            None => self.sink.warn("No media items found."),
        }

        Ok(())
    }

    /// 纯函数形式的提取：不修改提取器状态，解析失败时返回错误
    ///
    /// 没有媒体容器时 `media` 为 `None`，同样会报告 `No media items found.`。
    pub fn extract<'a>(&self, content: impl Into<TocContent<'a>>) -> Result<AdvancedToc> {
        let xml_content = content.into().to_xml_string()?;
        let tree = TreeConverter::parse_to_tree(&xml_content)?;
        let nav_points = nav_point_list(&tree)?;

        let quiz_item = find_quiz_item(&nav_points, &self.config.quiz_media_type).cloned();
        let media = match find_media_points(&nav_points) {
            Some(media_points) => {
                check_media_types(media_points)?;
                Some(categorize_media_items(
                    media_points,
                    &self.config.media_types,
                    self.sink.as_ref(),
                ))
            }
            None => {
                self.sink.warn("No media items found.");
                None
            }
        };

        Ok(AdvancedToc { quiz_item, media })
    }
}

impl Default for TocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 读取 `navMap.navPoint` 序列；缺失时为空
///
/// 只有一个 `navPoint` 时转换结果是对象而不是序列，按结构错误处理。
fn nav_point_list(tree: &XmlObject) -> Result<Vec<&XmlObject>> {
    match tree.lookup(NAV_POINTS_PATH) {
        Some(XmlValue::List(items)) => Ok(items.iter().filter_map(XmlValue::as_object).collect()),
        Some(_) => Err(TocError::UnexpectedStructure("navMap.navPoint 不是序列".to_string())),
        None => Ok(Vec::new()),
    }
}

/// 媒体条目的 `type` 存在时必须是字符串
fn check_media_types(media_points: &[XmlValue]) -> Result<()> {
    let non_text = media_points
        .iter()
        .filter_map(XmlValue::as_object)
        .filter_map(|point| point.get("type"))
        .any(|media_type| media_type.as_str().is_none());
    if non_text {
        return Err(TocError::UnexpectedStructure("mediaPoint.type 不是字符串".to_string()));
    }
    Ok(())
}

/// 第一个 `navPoint.mediaMap.mediaPoint.type` 等于测验标记的条目
fn find_quiz_item<'t>(nav_points: &[&'t XmlObject], quiz_media_type: &str) -> Option<&'t XmlObject> {
    nav_points.iter().copied().find(|item| {
        item.lookup(QUIZ_TYPE_PATH)
            .and_then(XmlValue::as_str)
            .is_some_and(|t| t == quiz_media_type)
    })
}

/// 第一个媒体容器条目的 `mediaPoint` 序列
///
/// 媒体容器：带有 `content` 元素但没有 `content.src`，且 `mediaMap.mediaPoint` 是非空序列。
fn find_media_points<'t>(nav_points: &[&'t XmlObject]) -> Option<&'t [XmlValue]> {
    nav_points.iter().find_map(|item| {
        let content = item.get("content")?;
        let has_src = content
            .as_object()
            .and_then(|c| c.get("src"))
            .is_some_and(|src| src.as_str() != Some(""));
        if has_src {
            return None;
        }
        item.lookup(MEDIA_POINTS_PATH)
            .and_then(XmlValue::as_list)
            .filter(|points| !points.is_empty())
    })
}
