//! In-memory TISS element tree and its serialization
//!
//! The assembler fills an [`XmlElement`] tree in schema order; writing it out
//! is a separate step so tests can inspect the tree without reparsing.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::TissError;
use crate::{TISS_NAMESPACE, TISS_PREFIX, TISS_VERSION};

/// Element content: either character data or child elements, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlContent {
    Text(String),
    Children(Vec<XmlElement>),
}

/// A namespace-qualified element, stored by local name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    content: XmlContent,
}

impl XmlElement {
    /// Element holding character data
    pub fn leaf(name: &'static str, text: impl Into<String>) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: XmlContent::Text(text.into()),
        }
    }

    /// Element holding child elements, in the given order
    pub fn branch(name: &'static str, children: Vec<XmlElement>) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: XmlContent::Children(children),
        }
    }

    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            XmlContent::Text(text) => Some(text),
            XmlContent::Children(_) => None,
        }
    }

    pub fn children(&self) -> &[XmlElement] {
        match &self.content {
            XmlContent::Children(children) => children,
            XmlContent::Text(_) => &[],
        }
    }

    /// Local names of the direct children, in document order
    pub fn child_names(&self) -> Vec<&'static str> {
        self.children().iter().map(|c| c.name).collect()
    }

    /// Follows a path of local names, taking the first match at each step
    pub fn find(&self, path: &[&str]) -> Option<&XmlElement> {
        path.iter().try_fold(self, |current, step| {
            current.children().iter().find(|c| c.name == *step)
        })
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), TissError> {
        let qualified = format!("{TISS_PREFIX}:{}", self.name);
        let mut start = BytesStart::new(qualified.as_str());
        for (name, value) in &self.attributes {
            start.push_attribute((*name, value.as_str()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| TissError::Serialization(e.to_string()))?;
        match &self.content {
            XmlContent::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| TissError::Serialization(e.to_string()))?,
            XmlContent::Children(children) => {
                for child in children {
                    child.write(writer)?;
                }
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(qualified.as_str())))
            .map_err(|e| TissError::Serialization(e.to_string()))?;
        Ok(())
    }
}

/// A complete `mensagemTISS` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TissDocument {
    root: XmlElement,
}

impl TissDocument {
    /// Wraps the three sections under the versioned, namespaced root
    pub fn new(header: XmlElement, body: XmlElement, footer: XmlElement) -> Self {
        let root = XmlElement::branch("mensagemTISS", vec![header, body, footer])
            .with_attribute("xmlns:ans", TISS_NAMESPACE)
            .with_attribute("version", TISS_VERSION);
        Self { root }
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Serializes to a UTF-8 string with an XML declaration and no indentation
    pub fn to_xml_string(&self) -> Result<String, TissError> {
        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| TissError::Serialization(e.to_string()))?;
        self.root.write(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| TissError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TissDocument {
        TissDocument::new(
            XmlElement::branch("cabecalho", vec![XmlElement::leaf("numeroProtocolo", "7")]),
            XmlElement::branch("corpo", vec![]),
            XmlElement::branch("rodape", vec![XmlElement::leaf("valorTotalGeral", "1.00")]),
        )
    }

    #[test]
    fn test_root_attributes() {
        let doc = sample();
        assert_eq!(doc.root().attribute("version"), Some(TISS_VERSION));
        assert_eq!(doc.root().attribute("xmlns:ans"), Some(TISS_NAMESPACE));
        assert_eq!(doc.root().child_names(), vec!["cabecalho", "corpo", "rodape"]);
    }

    #[test]
    fn test_serialization_prefixes_every_element() {
        let xml = sample().to_xml_string().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<ans:numeroProtocolo>7</ans:numeroProtocolo>"));
        assert!(xml.contains("<ans:corpo></ans:corpo>"));
        assert!(xml.ends_with("</ans:mensagemTISS>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = TissDocument::new(
            XmlElement::branch("cabecalho", vec![XmlElement::leaf("nome", "Silva & <Filhos>")]),
            XmlElement::branch("corpo", vec![]),
            XmlElement::branch("rodape", vec![]),
        );
        let xml = doc.to_xml_string().unwrap();
        assert!(xml.contains("Silva &amp; &lt;Filhos&gt;"));
    }

    #[test]
    fn test_find_follows_path() {
        let doc = sample();
        let protocol = doc.root().find(&["cabecalho", "numeroProtocolo"]).unwrap();
        assert_eq!(protocol.text(), Some("7"));
        assert!(doc.root().find(&["cabecalho", "missing"]).is_none());
    }
}
