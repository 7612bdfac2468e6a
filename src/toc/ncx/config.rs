//! 提取器配置模块
//!
//! 提供测验标记和媒体类型别名的配置管理功能，支持从YAML文件加载配置。
//! 默认配置与内置行为完全一致：测验标记为 `GEN`，每个媒体分类只匹配自己的键名。

use crate::toc::error::{Result, TocError};
use crate::toc::ncx::media::MediaCategory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "tocforge.yaml";

/// 默认的测验媒体类型标记
pub const DEFAULT_QUIZ_MEDIA_TYPE: &str = "GEN";

/// 单个媒体分类的类型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeConfig {
    /// 归入该分类的 `type` 取值（不区分大小写）
    pub types: Vec<String>,
    /// 可选的描述
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MediaTypeConfig {
    /// 创建新的类型配置
    pub fn new(types: Vec<String>) -> Self {
        Self {
            types,
            description: None,
        }
    }

    /// 创建带描述的类型配置
    pub fn with_description(types: Vec<String>, description: String) -> Self {
        Self {
            types,
            description: Some(description),
        }
    }

    /// 判断已转为小写的类型是否属于该分类
    fn matches(&self, lower_type: &str) -> bool {
        self.types.iter().any(|t| t.to_lowercase() == lower_type)
    }
}

/// 五个媒体分类各自的类型配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeConfigs {
    /// 算法演示
    pub algo: MediaTypeConfig,
    /// 图片
    pub img: MediaTypeConfig,
    /// 视频
    pub vid: MediaTypeConfig,
    /// 幻灯片
    pub slid: MediaTypeConfig,
    /// GIF动图
    pub gif: MediaTypeConfig,
}

impl MediaTypeConfigs {
    /// 获取某个分类的配置
    pub fn get(&self, category: MediaCategory) -> &MediaTypeConfig {
        match category {
            MediaCategory::Algo => &self.algo,
            MediaCategory::Img => &self.img,
            MediaCategory::Vid => &self.vid,
            MediaCategory::Slid => &self.slid,
            MediaCategory::Gif => &self.gif,
        }
    }

    /// 按配置把媒体类型映射到分类，按 `algo img vid slid gif` 顺序取第一个匹配
    pub fn classify(&self, media_type: &str) -> Option<MediaCategory> {
        let lower_type = media_type.to_lowercase();
        MediaCategory::ALL
            .into_iter()
            .find(|category| self.get(*category).matches(&lower_type))
    }
}

impl Default for MediaTypeConfigs {
    fn default() -> Self {
        let own_key = |category: MediaCategory, description: &str| {
            MediaTypeConfig::with_description(vec![category.key().to_string()], description.to_string())
        };
        Self {
            algo: own_key(MediaCategory::Algo, "算法演示组件"),
            img: own_key(MediaCategory::Img, "图片"),
            vid: own_key(MediaCategory::Vid, "视频"),
            slid: own_key(MediaCategory::Slid, "幻灯片"),
            gif: own_key(MediaCategory::Gif, "GIF动图"),
        }
    }
}

/// 高级目录提取器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// 标记测验条目的 `mediaPoint.type` 取值（区分大小写）
    #[serde(default = "default_quiz_media_type")]
    pub quiz_media_type: String,
    /// 媒体分类配置
    #[serde(default)]
    pub media_types: MediaTypeConfigs,
}

fn default_quiz_media_type() -> String {
    DEFAULT_QUIZ_MEDIA_TYPE.to_string()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            quiz_media_type: default_quiz_media_type(),
            media_types: MediaTypeConfigs::default(),
        }
    }
}

impl ExtractorConfig {
    /// 从指定的YAML配置文件加载
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| TocError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        Self::from_yaml(&content)
    }

    /// 从YAML文本解析配置
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| TocError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件
    ///
    /// # 参数
    /// * `path` - 写入的文件路径
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let yaml_content = serde_yml::to_string(&Self::default())
            .map_err(|e| TocError::ConfigError(format!("序列化配置失败: {}", e)))?;

        let content_with_header = format!(
            "# 高级目录提取配置文件\n# quiz_media_type: 标记测验条目的媒体类型\n# media_types: 每个媒体分类可以包含多个类型名称（不区分大小写）\n\n{}",
            yaml_content
        );

        fs::write(path.as_ref(), content_with_header)
            .map_err(|e| TocError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 尝试从配置文件加载；文件不存在时先生成默认配置文件，再返回默认配置
    ///
    /// 文件存在但内容错误时返回错误。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        if let Err(e) = Self::generate_default_config(path) {
            log::warn!("无法生成默认配置文件 {}: {}", path.display(), e);
        }
        Ok(Self::default())
    }
}
