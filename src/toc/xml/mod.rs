//! XML处理模块
//!
//! 提供XML文本与节点树之间的解析/序列化，以及节点树到通用标签树的转换。

pub mod converter;
pub mod node;
pub mod value;

pub use converter::TreeConverter;
pub use node::{XmlDocument, XmlElement, XmlNode};
pub use value::{XmlObject, XmlValue};
