//! Instance validation against a compiled [`Schema`]
//!
//! Content models are matched greedily without backtracking across
//! particles, which is exact for the deterministic models XSD requires
//! (Unique Particle Attribution). Messages follow libxml2 wording.

use std::fmt;

use roxmltree::{Document, Node, ParsingOptions};

use super::builtins::Builtin;
use super::model::{ComplexType, ElementDecl, Particle, QName, Schema, TypeRef};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// One validation problem, anchored to a source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

impl Schema {
    /// Validates an instance document.
    ///
    /// Returns the structural diagnostics in line order, empty when the
    /// document is valid. Only well-formedness problems are errors; an
    /// internal DTD subset is accepted and its entities expanded.
    pub fn validate(&self, xml: &str) -> Result<Vec<Diagnostic>, roxmltree::Error> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(xml, options)?;
        let root = doc.root_element();

        let mut validator = Validator {
            schema: self,
            diagnostics: Vec::new(),
        };
        match self.elements.iter().find(|decl| is_named(root, &decl.name)) {
            Some(decl) => validator.element(root, decl),
            None => validator.report(
                root,
                format!(
                    "Element '{}': No matching global declaration available for the validation root.",
                    QName::of(root)
                ),
            ),
        }

        let mut diagnostics = validator.diagnostics;
        diagnostics.sort_by_key(|d| d.line);
        Ok(diagnostics)
    }

    /// Built-in type at the bottom of a restriction chain
    fn builtin_base(&self, mut ty: TypeRef) -> Builtin {
        loop {
            match ty {
                TypeRef::Builtin(builtin) => return builtin,
                TypeRef::Simple(index) => ty = self.simple_types[index].base,
                TypeRef::Any | TypeRef::Complex(_) => return Builtin::AnySimpleType,
            }
        }
    }
}

fn is_named(node: Node<'_, '_>, name: &QName) -> bool {
    node.tag_name().name() == name.local && node.tag_name().namespace() == name.namespace.as_deref()
}

fn line_of(node: Node<'_, '_>) -> u32 {
    node.document().text_pos_at(node.range().start).row
}

struct Validator<'s> {
    schema: &'s Schema,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> Validator<'s> {
    fn report(&mut self, node: Node<'_, '_>, message: String) {
        self.diagnostics.push(Diagnostic {
            line: line_of(node),
            message,
        });
    }

    fn element(&mut self, node: Node<'_, '_>, decl: &'s ElementDecl) {
        match decl.ty {
            TypeRef::Any => {}
            TypeRef::Complex(index) => {
                let schema = self.schema;
                let ty = &schema.complex_types[index];
                self.attributes(node, ty);
                self.children(node, ty);
            }
            simple => {
                self.attributes(node, &ComplexType::default());
                self.simple_content(node, simple);
            }
        }
    }

    fn attributes(&mut self, node: Node<'_, '_>, ty: &ComplexType) {
        let name = QName::of(node);

        for decl in &ty.attributes {
            match node.attribute(decl.name.as_str()) {
                Some(value) => {
                    if let Err(problem) = self.check_value(decl.ty, value) {
                        let attr = &decl.name;
                        let message = format!("Element '{name}', attribute '{attr}': {problem}");
                        self.report(node, message);
                    }
                }
                None if decl.required => {
                    let attr = &decl.name;
                    let message = format!(
                        "Element '{name}': The attribute '{attr}' is required but missing."
                    );
                    self.report(node, message);
                }
                None => {}
            }
        }

        for attribute in node.attributes() {
            if attribute.namespace() == Some(XSI_NAMESPACE) {
                continue;
            }
            let declared = attribute.namespace().is_none()
                && ty.attributes.iter().any(|decl| decl.name == attribute.name());
            if !declared {
                let attr_name = QName::new(attribute.namespace(), attribute.name());
                self.report(
                    node,
                    format!(
                        "Element '{name}', attribute '{attr_name}': The attribute '{attr_name}' is not allowed."
                    ),
                );
            }
        }
    }

    fn children(&mut self, node: Node<'_, '_>, ty: &'s ComplexType) {
        let name = QName::of(node);

        if !ty.mixed
            && node
                .children()
                .any(|c| c.is_text() && c.text().is_some_and(|t| !t.trim().is_empty()))
        {
            self.report(
                node,
                format!(
                    "Element '{name}': Character content other than whitespace is not allowed because the content type is 'element-only'."
                ),
            );
        }

        let children: Vec<Node<'_, '_>> = node.children().filter(|c| c.is_element()).collect();
        let Some(content) = &ty.content else {
            if let Some(first) = children.first() {
                let unexpected = QName::of(*first);
                let message = format!("Element '{unexpected}': This element is not expected.");
                self.report(*first, message);
            }
            return;
        };

        let mut matcher = Matcher::new(self.schema, &children);
        let outcome = matcher.particle(content, 0);
        let stop = match outcome {
            Ok(end) => end,
            Err(Mismatch { at }) => at,
        };

        if stop < children.len() {
            let offender = children[stop];
            self.report(
                offender,
                format!(
                    "Element '{}': This element is not expected.{}",
                    QName::of(offender),
                    matcher.expected_clause(stop)
                ),
            );
        } else if outcome.is_err() {
            self.report(
                node,
                format!(
                    "Element '{name}': Missing child element(s).{}",
                    matcher.expected_clause(stop)
                ),
            );
        }

        let assigned = matcher.assigned;
        for (child, decl) in children.iter().zip(assigned).take(stop) {
            if let Some(decl) = decl {
                self.element(*child, decl);
            }
        }
    }

    fn simple_content(&mut self, node: Node<'_, '_>, ty: TypeRef) {
        let name = QName::of(node);
        if node.children().any(|c| c.is_element()) {
            self.report(
                node,
                format!(
                    "Element '{name}': Element content is not allowed, because the content type is a simple type definition."
                ),
            );
            return;
        }

        let text: String = node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();
        if let Err(problem) = self.check_value(ty, &text) {
            self.report(node, format!("Element '{name}': {problem}"));
        }
    }

    fn check_value(&self, ty: TypeRef, raw: &str) -> Result<(), String> {
        match ty {
            TypeRef::Any | TypeRef::Complex(_) => Ok(()),
            TypeRef::Builtin(builtin) => {
                let value = builtin.normalize(raw);
                if builtin.accepts(&value) {
                    Ok(())
                } else {
                    Err(format!(
                        "'{value}' is not a valid value of the atomic type 'xs:{}'.",
                        builtin.local_name()
                    ))
                }
            }
            TypeRef::Simple(index) => {
                let simple = &self.schema.simple_types[index];
                self.check_value(simple.base, raw)?;

                let value = self.schema.builtin_base(simple.base).normalize(raw);
                let facets = &simple.facets;
                if !facets.enumeration.is_empty()
                    && !facets.enumeration.iter().any(|e| *e == value)
                {
                    let set = facets
                        .enumeration
                        .iter()
                        .map(|e| format!("'{e}'"))
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(format!(
                        "[facet 'enumeration'] The value '{value}' is not an element of the set {{{set}}}."
                    ));
                }

                let length = value.chars().count();
                if let Some(expected) = facets.length {
                    if length != expected {
                        return Err(format!(
                            "[facet 'length'] The value '{value}' has a length of '{length}'; this differs from the allowed length of '{expected}'."
                        ));
                    }
                }
                if let Some(min) = facets.min_length {
                    if length < min {
                        return Err(format!(
                            "[facet 'minLength'] The value '{value}' has a length of '{length}'; this underruns the allowed minimum length of '{min}'."
                        ));
                    }
                }
                if let Some(max) = facets.max_length {
                    if length > max {
                        return Err(format!(
                            "[facet 'maxLength'] The value '{value}' has a length of '{length}'; this exceeds the allowed maximum length of '{max}'."
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Position of the child where matching could not continue
#[derive(Debug, Clone, Copy)]
struct Mismatch {
    at: usize,
}

/// Matches a run of sibling elements against a content model
struct Matcher<'s, 'c, 'a, 'input> {
    schema: &'s Schema,
    children: &'c [Node<'a, 'input>],
    assigned: Vec<Option<&'s ElementDecl>>,
    furthest: usize,
    expected: Vec<&'s QName>,
}

impl<'s, 'c, 'a, 'input> Matcher<'s, 'c, 'a, 'input> {
    fn new(schema: &'s Schema, children: &'c [Node<'a, 'input>]) -> Self {
        Self {
            schema,
            children,
            assigned: vec![None; children.len()],
            furthest: 0,
            expected: Vec::new(),
        }
    }

    /// Consumes as many repetitions of `particle` as its bounds allow
    fn particle(&mut self, particle: &'s Particle, start: usize) -> Result<usize, Mismatch> {
        let occurs = particle.occurs();
        let mut pos = start;
        let mut count = 0u32;

        while occurs.max.map_or(true, |max| count < max) {
            match self.term(particle, pos) {
                Ok(next) if next > pos => {
                    pos = next;
                    count += 1;
                }
                // An emptiable term can satisfy any minimum without consuming.
                Ok(_) => break,
                Err(mismatch) if mismatch.at == pos && count >= occurs.min => break,
                Err(mismatch) => return Err(mismatch),
            }
        }
        Ok(pos)
    }

    fn term(&mut self, particle: &'s Particle, pos: usize) -> Result<usize, Mismatch> {
        match particle {
            Particle::Element { target, .. } => {
                let decl = self.schema.element(target);
                match self.children.get(pos) {
                    Some(child) if is_named(*child, &decl.name) => {
                        self.assigned[pos] = Some(decl);
                        Ok(pos + 1)
                    }
                    _ => {
                        self.expect(pos, &decl.name);
                        Err(Mismatch { at: pos })
                    }
                }
            }
            Particle::Sequence { items, .. } => items
                .iter()
                .try_fold(pos, |current, item| self.particle(item, current)),
            Particle::Choice { items, .. } => {
                let mut emptiable = false;
                let mut deepest: Option<Mismatch> = None;
                for item in items {
                    match self.particle(item, pos) {
                        Ok(next) if next > pos => return Ok(next),
                        Ok(_) => emptiable = true,
                        Err(mismatch) if mismatch.at > deepest.map_or(pos, |d| d.at) => {
                            deepest = Some(mismatch)
                        }
                        Err(_) => {}
                    }
                }
                match deepest {
                    Some(mismatch) if !emptiable => Err(mismatch),
                    _ if emptiable => Ok(pos),
                    _ => Err(Mismatch { at: pos }),
                }
            }
        }
    }

    fn expect(&mut self, pos: usize, name: &'s QName) {
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        if pos == self.furthest && !self.expected.contains(&name) {
            self.expected.push(name);
        }
    }

    fn expected_clause(&self, pos: usize) -> String {
        if pos != self.furthest || self.expected.is_empty() {
            return String::new();
        }
        let names = self
            .expected
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        if self.expected.len() == 1 {
            format!(" Expected is ( {names} ).")
        } else {
            format!(" Expected is one of ( {names} ).")
        }
    }
}
