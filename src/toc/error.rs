use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TocError>;

/// 目录处理相关的错误类型
#[derive(Error, Debug)]
pub enum TocError {
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),

    #[error("Zip文件错误: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML解析错误: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("UTF-8编码错误: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("XML结构错误: {0}")]
    MalformedXml(String),

    #[error("目录结构错误: {0}")]
    UnexpectedStructure(String),

    #[error("配置文件错误: {0}")]
    ConfigError(String),

    #[error("找不到NCX文件: {0}")]
    NcxNotFound(String),

    #[error("序列化错误: {0}")]
    Serialize(String),
}
