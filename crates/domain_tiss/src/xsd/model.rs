//! Compiled schema model and the XSD-to-model compiler

use std::collections::HashMap;
use std::fmt;

use roxmltree::{Document, Node};

use super::builtins::Builtin;

pub(crate) const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Longest restriction chain accepted between a simple type and its built-in base
const MAX_DERIVATION_DEPTH: usize = 32;

/// Errors raised while compiling a schema document
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("{0}")]
    Xml(#[from] roxmltree::Error),

    #[error("document root is not xs:schema")]
    NotASchema,

    #[error("line {line}: unsupported schema construct 'xs:{construct}'")]
    Unsupported { line: u32, construct: String },

    #[error("line {line}: {message}")]
    Invalid { line: u32, message: String },
}

/// Namespace-qualified name, displayed the way libxml2 prints it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(namespace: Option<&str>, local: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            local: local.to_string(),
        }
    }

    pub fn of(node: Node<'_, '_>) -> Self {
        Self::new(node.tag_name().namespace(), node.tag_name().name())
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeRef {
    /// No type given: any content is accepted
    Any,
    Builtin(Builtin),
    Simple(usize),
    Complex(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Occurs {
    pub min: u32,
    /// `None` is unbounded
    pub max: Option<u32>,
}

impl Occurs {
    const ONCE: Occurs = Occurs { min: 1, max: Some(1) };
}

#[derive(Debug, Clone)]
pub(crate) struct ElementDecl {
    pub name: QName,
    pub ty: TypeRef,
}

#[derive(Debug, Clone)]
pub(crate) enum ElementTarget {
    Local(ElementDecl),
    Global(usize),
}

#[derive(Debug, Clone)]
pub(crate) enum Particle {
    Element { target: ElementTarget, occurs: Occurs },
    Sequence { items: Vec<Particle>, occurs: Occurs },
    Choice { items: Vec<Particle>, occurs: Occurs },
}

impl Particle {
    pub fn occurs(&self) -> Occurs {
        match self {
            Particle::Element { occurs, .. }
            | Particle::Sequence { occurs, .. }
            | Particle::Choice { occurs, .. } => *occurs,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AttributeDecl {
    pub name: String,
    pub ty: TypeRef,
    pub required: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ComplexType {
    pub content: Option<Particle>,
    pub attributes: Vec<AttributeDecl>,
    pub mixed: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Facets {
    pub enumeration: Vec<String>,
    pub length: Option<usize>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct SimpleType {
    /// Named types display as `{ns}Name`; anonymous ones borrow their base's name
    pub name: Option<QName>,
    pub base: TypeRef,
    pub facets: Facets,
}

/// A compiled XML schema, ready to validate instance documents
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) target_namespace: Option<String>,
    pub(crate) elements: Vec<ElementDecl>,
    pub(crate) complex_types: Vec<ComplexType>,
    pub(crate) simple_types: Vec<SimpleType>,
}

impl Schema {
    /// Compiles schema text
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let doc = Document::parse(text)?;
        Compiler::new(&doc)?.compile()
    }

    pub fn target_namespace(&self) -> Option<&str> {
        self.target_namespace.as_deref()
    }

    /// Names of the global element declarations, in declaration order
    pub fn global_elements(&self) -> impl Iterator<Item = &QName> {
        self.elements.iter().map(|e| &e.name)
    }

    pub(crate) fn element<'s>(&'s self, target: &'s ElementTarget) -> &'s ElementDecl {
        match target {
            ElementTarget::Local(decl) => decl,
            ElementTarget::Global(index) => &self.elements[*index],
        }
    }
}

fn line_of(node: Node<'_, '_>) -> u32 {
    node.document().text_pos_at(node.range().start).row
}

fn invalid(node: Node<'_, '_>, message: impl Into<String>) -> SchemaError {
    SchemaError::Invalid {
        line: line_of(node),
        message: message.into(),
    }
}

fn unsupported(node: Node<'_, '_>) -> SchemaError {
    SchemaError::Unsupported {
        line: line_of(node),
        construct: node.tag_name().name().to_string(),
    }
}

/// XSD element children, skipping text, comments and annotations
fn schema_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Result<Node<'a, 'input>, SchemaError>> {
    node.children()
        .filter(|child| child.is_element())
        .filter(|child| child.tag_name().name() != "annotation")
        .map(|child| {
            if child.tag_name().namespace() == Some(XS_NAMESPACE) {
                Ok(child)
            } else {
                let name = QName::of(child);
                Err(invalid(child, format!("element '{name}' is not in the XML Schema namespace")))
            }
        })
}

fn required_attr<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str, SchemaError> {
    node.attribute(name).ok_or_else(|| {
        let kind = node.tag_name().name();
        invalid(node, format!("xs:{kind} is missing the '{name}' attribute"))
    })
}

struct Compiler<'a, 'input> {
    root: Node<'a, 'input>,
    target_namespace: Option<String>,
    qualified_locals: bool,
    element_index: HashMap<String, usize>,
    complex_index: HashMap<String, usize>,
    simple_index: HashMap<String, usize>,
    elements: Vec<Option<ElementDecl>>,
    complex_types: Vec<Option<ComplexType>>,
    simple_types: Vec<Option<SimpleType>>,
}

impl<'a, 'input> Compiler<'a, 'input> {
    fn new(doc: &'a Document<'input>) -> Result<Self, SchemaError> {
        let root = doc.root_element();
        if root.tag_name().name() != "schema" || root.tag_name().namespace() != Some(XS_NAMESPACE) {
            return Err(SchemaError::NotASchema);
        }

        Ok(Self {
            root,
            target_namespace: root.attribute("targetNamespace").map(str::to_string),
            qualified_locals: root.attribute("elementFormDefault") == Some("qualified"),
            element_index: HashMap::new(),
            complex_index: HashMap::new(),
            simple_index: HashMap::new(),
            elements: Vec::new(),
            complex_types: Vec::new(),
            simple_types: Vec::new(),
        })
    }

    fn compile(mut self) -> Result<Schema, SchemaError> {
        let root = self.root;

        // First pass registers names so declarations may reference each other in any order.
        for child in schema_children(root) {
            let child = child?;
            let kind = child.tag_name().name();
            if !matches!(kind, "element" | "complexType" | "simpleType") {
                return Err(unsupported(child));
            }
            let declared = required_attr(child, "name")?.to_string();
            let (index, slot) = match kind {
                "element" => {
                    self.elements.push(None);
                    (&mut self.element_index, self.elements.len() - 1)
                }
                "complexType" => {
                    self.complex_types.push(None);
                    (&mut self.complex_index, self.complex_types.len() - 1)
                }
                "simpleType" => {
                    self.simple_types.push(None);
                    (&mut self.simple_index, self.simple_types.len() - 1)
                }
                _ => return Err(unsupported(child)),
            };
            if index.insert(declared.clone(), slot).is_some() {
                return Err(invalid(child, format!("duplicate global xs:{kind} '{declared}'")));
            }
        }

        for child in schema_children(root) {
            let child = child?;
            let declared = required_attr(child, "name")?;
            match child.tag_name().name() {
                "element" => {
                    let decl = self.element_decl(child, true)?;
                    let slot = self.element_index[declared];
                    self.elements[slot] = Some(decl);
                }
                "complexType" => {
                    let ty = self.complex_type(child)?;
                    let slot = self.complex_index[declared];
                    self.complex_types[slot] = Some(ty);
                }
                _ => {
                    let name = QName::new(self.target_namespace.as_deref(), declared);
                    let ty = self.simple_type(child, Some(name))?;
                    let slot = self.simple_index[declared];
                    self.simple_types[slot] = Some(ty);
                }
            }
        }

        let schema = Schema {
            target_namespace: self.target_namespace,
            elements: resolved(self.elements, root)?,
            complex_types: resolved(self.complex_types, root)?,
            simple_types: resolved(self.simple_types, root)?,
        };
        check_derivations(&schema, root)?;
        Ok(schema)
    }

    fn element_decl(
        &mut self,
        node: Node<'a, 'input>,
        global: bool,
    ) -> Result<ElementDecl, SchemaError> {
        let local = required_attr(node, "name")?;
        let qualified = if global {
            true
        } else {
            match node.attribute("form") {
                Some("qualified") => true,
                Some("unqualified") => false,
                Some(other) => return Err(invalid(node, format!("invalid form '{other}'"))),
                None => self.qualified_locals,
            }
        };
        let name = QName {
            namespace: if qualified { self.target_namespace.clone() } else { None },
            local: local.to_string(),
        };

        let mut ty = match node.attribute("type") {
            Some(type_name) => Some(self.resolve_type(node, type_name)?),
            None => None,
        };
        for child in schema_children(node) {
            let child = child?;
            if ty.is_some() {
                return Err(invalid(
                    child,
                    format!("element '{local}' has both a type attribute and an inline type"),
                ));
            }
            ty = Some(match child.tag_name().name() {
                "complexType" => {
                    let compiled = self.complex_type(child)?;
                    self.complex_types.push(Some(compiled));
                    TypeRef::Complex(self.complex_types.len() - 1)
                }
                "simpleType" => {
                    let compiled = self.simple_type(child, None)?;
                    self.simple_types.push(Some(compiled));
                    TypeRef::Simple(self.simple_types.len() - 1)
                }
                _ => return Err(unsupported(child)),
            });
        }

        Ok(ElementDecl {
            name,
            ty: ty.unwrap_or(TypeRef::Any),
        })
    }

    fn complex_type(&mut self, node: Node<'a, 'input>) -> Result<ComplexType, SchemaError> {
        let mut compiled = ComplexType {
            mixed: matches!(node.attribute("mixed"), Some("true" | "1")),
            ..Default::default()
        };

        for child in schema_children(node) {
            let child = child?;
            match child.tag_name().name() {
                "sequence" | "choice" => {
                    if compiled.content.is_some() {
                        return Err(invalid(
                            child,
                            "complex type declares more than one content model",
                        ));
                    }
                    if !compiled.attributes.is_empty() {
                        return Err(invalid(
                            child,
                            "content model must precede attribute declarations",
                        ));
                    }
                    compiled.content = Some(self.particle(child)?);
                }
                "attribute" => {
                    let attribute = self.attribute_decl(child)?;
                    if compiled.attributes.iter().any(|a| a.name == attribute.name) {
                        let message = format!("duplicate attribute '{}'", attribute.name);
                        return Err(invalid(child, message));
                    }
                    compiled.attributes.push(attribute);
                }
                _ => return Err(unsupported(child)),
            }
        }
        Ok(compiled)
    }

    fn particle(&mut self, node: Node<'a, 'input>) -> Result<Particle, SchemaError> {
        let occurs = occurs(node)?;
        match node.tag_name().name() {
            "element" => {
                let target = match node.attribute("ref") {
                    Some(reference) => {
                        ElementTarget::Global(self.resolve_element_ref(node, reference)?)
                    }
                    None => ElementTarget::Local(self.element_decl(node, false)?),
                };
                Ok(Particle::Element { target, occurs })
            }
            group @ ("sequence" | "choice") => {
                let items = schema_children(node)
                    .map(|child| child.and_then(|child| self.particle(child)))
                    .collect::<Result<Vec<_>, _>>()?;
                if group == "sequence" {
                    Ok(Particle::Sequence { items, occurs })
                } else {
                    Ok(Particle::Choice { items, occurs })
                }
            }
            _ => Err(unsupported(node)),
        }
    }

    fn attribute_decl(&mut self, node: Node<'a, 'input>) -> Result<AttributeDecl, SchemaError> {
        if node.has_attribute("ref") {
            return Err(invalid(node, "attribute references are not supported"));
        }
        let name = required_attr(node, "name")?.to_string();

        let mut ty = match node.attribute("type") {
            Some(type_name) => Some(self.resolve_type(node, type_name)?),
            None => None,
        };
        for child in schema_children(node) {
            let child = child?;
            if ty.is_some() || child.tag_name().name() != "simpleType" {
                return Err(unsupported(child));
            }
            let compiled = self.simple_type(child, None)?;
            self.simple_types.push(Some(compiled));
            ty = Some(TypeRef::Simple(self.simple_types.len() - 1));
        }
        let ty = ty.unwrap_or(TypeRef::Builtin(Builtin::AnySimpleType));
        if matches!(ty, TypeRef::Complex(_)) {
            return Err(invalid(node, format!("attribute '{name}' must have a simple type")));
        }

        Ok(AttributeDecl {
            name,
            ty,
            required: node.attribute("use") == Some("required"),
        })
    }

    fn simple_type(
        &mut self,
        node: Node<'a, 'input>,
        name: Option<QName>,
    ) -> Result<SimpleType, SchemaError> {
        let mut children = schema_children(node);
        let restriction = match children.next() {
            Some(child) => child?,
            None => return Err(invalid(node, "simple type has no derivation")),
        };
        if restriction.tag_name().name() != "restriction" {
            return Err(unsupported(restriction));
        }
        if let Some(extra) = children.next() {
            return Err(unsupported(extra?));
        }

        let base = self.resolve_type(restriction, required_attr(restriction, "base")?)?;
        if matches!(base, TypeRef::Complex(_) | TypeRef::Any) {
            return Err(invalid(restriction, "simple type must restrict a simple type"));
        }

        let mut facets = Facets::default();
        for facet in schema_children(restriction) {
            let facet = facet?;
            let value = required_attr(facet, "value")?;
            match facet.tag_name().name() {
                "enumeration" => facets.enumeration.push(value.to_string()),
                "length" => facets.length = Some(parse_count(facet, value)?),
                "minLength" => facets.min_length = Some(parse_count(facet, value)?),
                "maxLength" => facets.max_length = Some(parse_count(facet, value)?),
                _ => return Err(unsupported(facet)),
            }
        }

        Ok(SimpleType { name, base, facets })
    }

    fn split_qname<'v>(
        &self,
        node: Node<'a, 'input>,
        value: &'v str,
    ) -> Result<(Option<&'a str>, &'v str), SchemaError> {
        let (prefix, local) = match value.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, value),
        };
        let namespace = node.lookup_namespace_uri(prefix);
        if prefix.is_some() && namespace.is_none() {
            return Err(invalid(node, format!("namespace prefix of '{value}' is not declared")));
        }
        Ok((namespace, local))
    }

    fn resolve_type(&self, node: Node<'a, 'input>, value: &str) -> Result<TypeRef, SchemaError> {
        let (namespace, local) = self.split_qname(node, value)?;

        if namespace == Some(XS_NAMESPACE) {
            if local == "anyType" {
                return Ok(TypeRef::Any);
            }
            return Builtin::from_local_name(local)
                .map(TypeRef::Builtin)
                .ok_or_else(|| {
                    invalid(node, format!("built-in type 'xs:{local}' is not supported"))
                });
        }
        if namespace != self.target_namespace.as_deref() {
            return Err(invalid(node, format!("type '{value}' is not in the target namespace")));
        }
        if let Some(index) = self.complex_index.get(local) {
            return Ok(TypeRef::Complex(*index));
        }
        if let Some(index) = self.simple_index.get(local) {
            return Ok(TypeRef::Simple(*index));
        }
        Err(invalid(node, format!("type '{value}' is not declared")))
    }

    fn resolve_element_ref(
        &self,
        node: Node<'a, 'input>,
        value: &str,
    ) -> Result<usize, SchemaError> {
        let (namespace, local) = self.split_qname(node, value)?;
        if namespace != self.target_namespace.as_deref() {
            return Err(invalid(
                node,
                format!("element reference '{value}' is not in the target namespace"),
            ));
        }
        self.element_index
            .get(local)
            .copied()
            .ok_or_else(|| invalid(node, format!("referenced element '{value}' is not declared")))
    }
}

fn occurs(node: Node<'_, '_>) -> Result<Occurs, SchemaError> {
    let min = match node.attribute("minOccurs") {
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| invalid(node, format!("invalid minOccurs '{value}'")))?,
        None => Occurs::ONCE.min,
    };
    let max = match node.attribute("maxOccurs") {
        Some("unbounded") => None,
        Some(value) => Some(
            value
                .parse::<u32>()
                .map_err(|_| invalid(node, format!("invalid maxOccurs '{value}'")))?,
        ),
        None => Occurs::ONCE.max,
    };
    if let Some(max) = max {
        if max < min {
            return Err(invalid(node, "maxOccurs is smaller than minOccurs"));
        }
    }
    Ok(Occurs { min, max })
}

fn parse_count(node: Node<'_, '_>, value: &str) -> Result<usize, SchemaError> {
    value
        .parse::<usize>()
        .map_err(|_| invalid(node, format!("invalid facet value '{value}'")))
}

fn resolved<T>(slots: Vec<Option<T>>, root: Node<'_, '_>) -> Result<Vec<T>, SchemaError> {
    slots
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| invalid(root, "schema declarations could not be resolved"))
}

fn check_derivations(schema: &Schema, root: Node<'_, '_>) -> Result<(), SchemaError> {
    for start in 0..schema.simple_types.len() {
        let mut current = TypeRef::Simple(start);
        let mut depth = 0;
        while let TypeRef::Simple(index) = current {
            depth += 1;
            if depth > MAX_DERIVATION_DEPTH {
                return Err(invalid(root, "circular simple type derivation"));
            }
            current = schema.simple_types[index].base;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:t="urn:t" targetNamespace="urn:t" elementFormDefault="qualified">"#;

    fn schema(body: &str) -> Result<Schema, SchemaError> {
        Schema::parse(&format!("{HEAD}{body}</xs:schema>"))
    }

    #[test]
    fn test_forward_type_reference_resolves() {
        let compiled = schema(
            r#"<xs:element name="root" type="t:RootType"/>
               <xs:complexType name="RootType"><xs:sequence><xs:element name="a" type="xs:string"/></xs:sequence></xs:complexType>"#,
        )
        .unwrap();
        let names: Vec<String> = compiled.global_elements().map(|q| q.to_string()).collect();
        assert_eq!(names, vec!["{urn:t}root"]);
        assert_eq!(compiled.target_namespace(), Some("urn:t"));
    }

    #[test]
    fn test_local_elements_with_inline_types_take_form() {
        let compiled = schema(
            r#"<xs:element name="root"><xs:complexType><xs:sequence>
                 <xs:element name="inner"><xs:complexType><xs:sequence>
                   <xs:element name="code"><xs:simpleType><xs:restriction base="xs:string"><xs:maxLength value="3"/></xs:restriction></xs:simpleType></xs:element>
                 </xs:sequence></xs:complexType></xs:element>
                 <xs:element name="loose" form="unqualified" type="xs:string"/>
               </xs:sequence></xs:complexType></xs:element>"#,
        )
        .unwrap();

        let root = &compiled.elements[0];
        let TypeRef::Complex(index) = root.ty else {
            panic!("root should have an inline complex type");
        };
        let Some(Particle::Sequence { items, .. }) = &compiled.complex_types[index].content else {
            panic!("root should hold a sequence");
        };
        let names: Vec<String> = items
            .iter()
            .map(|item| match item {
                Particle::Element { target, .. } => compiled.element(target).name.to_string(),
                other => panic!("unexpected particle {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["{urn:t}inner", "loose"]);
    }

    #[test]
    fn test_include_is_unsupported() {
        let err = schema(r#"<xs:include schemaLocation="other.xsd"/>"#).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Unsupported { ref construct, .. } if construct == "include"
        ));
    }

    #[test]
    fn test_undeclared_type_is_rejected() {
        let err = schema(r#"<xs:element name="root" type="t:Missing"/>"#).unwrap_err();
        assert!(err.to_string().contains("is not declared"));
    }

    #[test]
    fn test_circular_restriction_is_rejected() {
        let err = schema(
            r#"<xs:simpleType name="A"><xs:restriction base="t:B"/></xs:simpleType>
               <xs:simpleType name="B"><xs:restriction base="t:A"/></xs:simpleType>"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("circular"));
    }

    #[test]
    fn test_non_schema_root() {
        assert!(matches!(Schema::parse("<html/>"), Err(SchemaError::NotASchema)));
    }

    #[test]
    fn test_qname_display() {
        assert_eq!(QName::new(Some("urn:t"), "a").to_string(), "{urn:t}a");
        assert_eq!(QName::new(None, "a").to_string(), "a");
    }
}
