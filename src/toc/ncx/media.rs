//! 媒体条目分类
//!
//! 把 `mediaPoint` 条目按 `type` 字段归入算法、图片、视频、幻灯片、GIF五个分类。

use crate::toc::diagnostics::DiagnosticSink;
use crate::toc::ncx::config::MediaTypeConfigs;
use crate::toc::xml::{XmlObject, XmlValue};
use serde::Serialize;
use std::fmt;

/// 媒体分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    /// 算法演示
    Algo,
    /// 图片
    Img,
    /// 视频
    Vid,
    /// 幻灯片
    Slid,
    /// GIF动图
    Gif,
}

impl MediaCategory {
    /// 全部分类，按固定顺序
    pub const ALL: [MediaCategory; 5] = [
        MediaCategory::Algo,
        MediaCategory::Img,
        MediaCategory::Vid,
        MediaCategory::Slid,
        MediaCategory::Gif,
    ];

    /// 分类键名
    pub fn key(&self) -> &'static str {
        match self {
            MediaCategory::Algo => "algo",
            MediaCategory::Img => "img",
            MediaCategory::Vid => "vid",
            MediaCategory::Slid => "slid",
            MediaCategory::Gif => "gif",
        }
    }

    /// 由键名得到分类（大小写不敏感）
    pub fn from_key(key: &str) -> Option<Self> {
        let lower = key.to_lowercase();
        Self::ALL.into_iter().find(|category| category.key() == lower)
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 分类后的媒体条目，五个分类始终存在
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizedMediaList {
    pub algo: Vec<XmlObject>,
    pub img: Vec<XmlObject>,
    pub vid: Vec<XmlObject>,
    pub slid: Vec<XmlObject>,
    pub gif: Vec<XmlObject>,
}

impl CategorizedMediaList {
    /// 创建五个分类都为空的列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取某个分类的条目
    pub fn get(&self, category: MediaCategory) -> &[XmlObject] {
        match category {
            MediaCategory::Algo => &self.algo,
            MediaCategory::Img => &self.img,
            MediaCategory::Vid => &self.vid,
            MediaCategory::Slid => &self.slid,
            MediaCategory::Gif => &self.gif,
        }
    }

    fn bucket_mut(&mut self, category: MediaCategory) -> &mut Vec<XmlObject> {
        match category {
            MediaCategory::Algo => &mut self.algo,
            MediaCategory::Img => &mut self.img,
            MediaCategory::Vid => &mut self.vid,
            MediaCategory::Slid => &mut self.slid,
            MediaCategory::Gif => &mut self.gif,
        }
    }

    /// 按分类顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (MediaCategory, &[XmlObject])> {
        MediaCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// 所有分类的条目总数
    pub fn total(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// 按 `type` 字段对媒体条目分类
///
/// * 类型匹配某个分类时追加到该分类，保持输入顺序
/// * 类型存在但无法识别时报告警告并丢弃
/// * 没有字符串类型的 `type` 字段时静默丢弃
///
/// # 参数
/// * `items` - `mediaPoint` 条目序列
/// * `media_types` - 媒体分类配置
/// * `sink` - 诊断信息接收端
pub fn categorize_media_items(
    items: &[XmlValue],
    media_types: &MediaTypeConfigs,
    sink: &dyn DiagnosticSink,
) -> CategorizedMediaList {
    let mut categories = CategorizedMediaList::new();

    for item in items {
        let Some(object) = item.as_object() else {
            continue;
        };
        let Some(media_type) = object.get_str("type").filter(|t| !t.is_empty()) else {
            continue;
        };

        match media_types.classify(media_type) {
            Some(category) => categories.bucket_mut(category).push(object.clone()),
            None => sink.warn(&format!("Unknown media type: {}", media_type.to_lowercase())),
        }
    }

    categories
}
