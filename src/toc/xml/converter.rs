//! XML到通用标签树的转换
//!
//! 转换规则：
//! 1. 元素的每个属性成为一个字符串字段
//! 2. 子元素按标签名存放；同名子元素出现多次时合并为有序序列
//! 3. `desc` 子元素始终压平为去除首尾空白的文本内容
//! 4. 非空白文本子节点存放在 `text` 字段，多个时以最后一个为准

use crate::toc::error::Result;
use crate::toc::xml::node::{XmlDocument, XmlElement, XmlNode};
use crate::toc::xml::value::{XmlObject, XmlValue};

/// 被压平为纯文本的标签名
const DESC_TAG: &str = "desc";

/// 存放文本子节点的字段名
const TEXT_KEY: &str = "text";

/// XML节点树到通用标签树的转换器（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeConverter;

impl TreeConverter {
    /// 转换任意节点；文本节点得到空对象
    pub fn convert(node: &XmlNode) -> XmlObject {
        match node {
            XmlNode::Element(element) => Self::convert_element(element),
            XmlNode::Text(_) => XmlObject::new(),
        }
    }

    /// 转换一个元素及其全部后代
    pub fn convert_element(element: &XmlElement) -> XmlObject {
        let mut object = XmlObject::new();

        for (name, value) in &element.attributes {
            object.insert(name.as_str(), value.as_str());
        }

        for child in &element.children {
            match child {
                XmlNode::Element(child_element) => {
                    let value = if child_element.name == DESC_TAG {
                        XmlValue::Text(child_element.text_content().trim().to_string())
                    } else {
                        XmlValue::Node(Self::convert_element(child_element))
                    };
                    object.push(&child_element.name, value);
                }
                XmlNode::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        object.insert(TEXT_KEY, trimmed);
                    }
                }
            }
        }

        object
    }

    /// 转换整个文档的根元素
    pub fn convert_document(document: &XmlDocument) -> XmlObject {
        Self::convert_element(&document.root)
    }

    /// 解析XML文本并转换其根元素
    ///
    /// # 参数
    /// * `xml_content` - XML文本
    ///
    /// # 返回值
    /// * `Result<XmlObject, TocError>` - 根元素对应的标签树；XML格式错误时返回错误
    pub fn parse_to_tree(xml_content: &str) -> Result<XmlObject> {
        let document = XmlDocument::parse(xml_content)?;
        Ok(Self::convert_document(&document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(xml: &str) -> XmlObject {
        TreeConverter::parse_to_tree(xml).expect("转换失败")
    }

    #[test]
    fn test_attributes_only() {
        let object = tree(r#"<mediaPoint id="m1" type="IMG" src="a.png"/>"#);
        let expected: XmlObject = [("id", "m1"), ("type", "IMG"), ("src", "a.png")]
            .into_iter()
            .collect();
        assert_eq!(object, expected);
    }

    #[test]
    fn test_empty_element_is_empty_object() {
        let object = tree("<navMap></navMap>");
        assert!(object.is_empty());
    }

    #[test]
    fn test_single_child_is_object() {
        let object = tree(r#"<navMap><navPoint id="p1"/></navMap>"#);
        let nav_point = object.get("navPoint").unwrap();
        assert_eq!(nav_point.as_object().unwrap().get_str("id"), Some("p1"));
    }

    #[test]
    fn test_repeated_children_become_list() {
        let object = tree(r#"<navMap><navPoint id="p1"/><navPoint id="p2"/><navPoint id="p3"/></navMap>"#);
        let items = object.get("navPoint").unwrap().as_list().unwrap();
        let ids: Vec<_> = items
            .iter()
            .map(|item| item.as_object().unwrap().get_str("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_interleaved_repeats_keep_order() {
        let object = tree(r#"<m><p n="1"/><q/><p n="2"/></m>"#);
        let items = object.get("p").unwrap().as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].as_object().unwrap().get_str("n"), Some("2"));
        assert!(object.get("q").unwrap().as_object().unwrap().is_empty());
    }

    #[test]
    fn test_desc_flattened_to_text() {
        let object = tree(r#"<mediaPoint><desc lang="en">
            Some <b>bold</b> words
        </desc></mediaPoint>"#);
        assert_eq!(object.get_str("desc"), Some("Some bold words"));
    }

    #[test]
    fn test_repeated_desc_stays_text() {
        let object = tree("<m><desc> one </desc><desc>two</desc></m>");
        let items = object.get("desc").unwrap().as_list().unwrap();
        assert_eq!(items, &[XmlValue::from("one"), XmlValue::from("two")]);
    }

    #[test]
    fn test_whitespace_text_ignored() {
        let object = tree("<navLabel>\n    <span/>\n  </navLabel>");
        assert!(!object.contains_key("text"));
        assert!(object.contains_key("span"));
    }

    #[test]
    fn test_last_text_wins() {
        let object = tree("<text>  first <br/> second  </text>");
        assert_eq!(object.get_str("text"), Some("second"));
    }

    #[test]
    fn test_text_alongside_attributes() {
        let object = tree(r#"<text lang="zh">  第一章  </text>"#);
        assert_eq!(object.get_str("lang"), Some("zh"));
        assert_eq!(object.get_str("text"), Some("第一章"));
    }

    #[test]
    fn test_convert_text_node_is_empty() {
        let node = XmlNode::Text("hello".to_string());
        assert!(TreeConverter::convert(&node).is_empty());
    }

    #[test]
    fn test_malformed_input_is_error() {
        assert!(TreeConverter::parse_to_tree("<ncx><navMap></ncx>").is_err());
    }
}
