//! XML节点树模块
//!
//! 基于quick-xml构建简单的DOM节点树，并支持将节点树重新序列化为XML文本。
//! 只保留元素、属性和文本三类结构，注释、处理指令、DOCTYPE等一律忽略。

use crate::toc::error::{Result, TocError};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

/// XML节点（元素或文本）
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// 元素节点
    Element(XmlElement),
    /// 文本节点（已反转义，未去除空白）
    Text(String),
}

impl XmlNode {
    /// 如果是元素节点则返回其引用
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        }
    }
}

/// XML元素
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// 限定标签名（保留命名空间前缀）
    pub name: String,
    /// 属性列表，按文档顺序
    pub attributes: Vec<(String, String)>,
    /// 子节点列表，按文档顺序
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// 创建没有属性和子节点的元素
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 添加属性（构建器风格）
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// 添加子元素（构建器风格）
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// 添加文本子节点（构建器风格）
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    /// 查找属性值
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 所有后代文本节点按文档顺序拼接的结果
    pub fn text_content(&self) -> String {
        let mut content = String::new();
        self.collect_text(&mut content);
        content
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                XmlNode::Element(element) => element.write_to(writer)?,
                XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// 已解析的XML文档
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    /// 文档根元素
    pub root: XmlElement,
}

impl XmlDocument {
    /// 以给定根元素创建文档
    pub fn new(root: XmlElement) -> Self {
        Self { root }
    }

    /// 解析XML文本为节点树
    ///
    /// # 参数
    /// * `xml_content` - XML文本
    ///
    /// # 返回值
    /// * `Result<XmlDocument, TocError>` - 解析后的文档；格式错误时返回错误
    pub fn parse(xml_content: &str) -> Result<XmlDocument> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().expand_empty_elements = true;

        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(TocError::MalformedXml("文档包含多个根元素".to_string()));
                    }
                    stack.push(Self::parse_start(e)?);
                }
                Event::End(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let element = stack.pop().ok_or_else(|| {
                        TocError::MalformedXml(format!("多余的结束标签: </{}>", name))
                    })?;
                    if element.name != name {
                        return Err(TocError::MalformedXml(format!(
                            "结束标签不匹配: 期望 </{}>, 找到 </{}>",
                            element.name, name
                        )));
                    }
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::Element(element)),
                        None => root = Some(element),
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    Self::push_text(&mut stack, &text)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).to_string();
                    Self::push_text(&mut stack, &text)?;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(TocError::MalformedXml(format!("元素未闭合: <{}>", open.name)));
        }

        root.map(XmlDocument::new)
            .ok_or_else(|| TocError::MalformedXml("文档没有根元素".to_string()))
    }

    /// 将文档序列化为XML文本
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.root.write_to(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    /// 解析开始标签的名称与属性
    fn parse_start(e: &BytesStart) -> Result<XmlElement> {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let mut element = XmlElement::new(name);

        for attr_result in e.attributes() {
            let attr = attr_result.map_err(|err| TocError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            element.attributes.push((key, value));
        }

        Ok(element)
    }

    /// 把文本追加到当前打开的元素；根元素之外只允许空白
    fn push_text(stack: &mut [XmlElement], text: &str) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => {
                parent.children.push(XmlNode::Text(text.to_string()));
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(TocError::MalformedXml(format!(
                "根元素之外出现文本: {}",
                text.trim()
            ))),
        }
    }
}
