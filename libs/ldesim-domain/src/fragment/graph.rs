//! Graph-of-statements documents

use super::document::{FragmentShape, IdentifierRewrites};
use super::vocab::{LDES_EVENT_STREAM, RDF_TYPE, TREE_NODE, TREE_NODE_TYPE, TREE_VIEW};

/// A literal value with its optional datatype or language tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

impl Literal {
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn language_tagged(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }
}

/// Subject, object or graph position of a statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An absolute identifier
    Iri(String),
    /// A document-local node, without a global identifier
    BlankNode(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn blank(id: impl Into<String>) -> Self {
        Term::BlankNode(id.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    fn is_iri(&self, iri: &str) -> bool {
        self.as_iri() == Some(iri)
    }

    fn rewrite(&mut self, rewrites: &IdentifierRewrites) -> usize {
        if let Term::Iri(iri) = self {
            if let Some(rewritten) = rewrites.get(iri.as_str()) {
                *iri = rewritten.clone();
                return 1;
            }
        }
        0
    }
}

/// A single statement, optionally inside a named graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
    /// `None` for the default graph
    pub graph: Option<Term>,
}

impl Statement {
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
            graph: None,
        }
    }

    pub fn in_graph(mut self, graph: Term) -> Self {
        self.graph = Some(graph);
        self
    }
}

/// A fragment expressed as a collection of statements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDocument {
    statements: Vec<Statement>,
}

impl GraphDocument {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Subjects of every `?s rdf:type <class>` statement
    pub fn subjects_of_type<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.statements
            .iter()
            .filter(move |s| s.predicate == RDF_TYPE && s.object.is_iri(class))
            .map(|s| &s.subject)
    }

    /// Objects of every statement using `predicate`
    pub fn objects_of<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.statements
            .iter()
            .filter(move |s| s.predicate == predicate)
            .map(|s| &s.object)
    }
}

impl FragmentShape for GraphDocument {
    fn primary_identifier(&self) -> Option<&str> {
        // A tree:Node declared by type wins; a view referenced from the stream is the fallback.
        self.subjects_of_type(TREE_NODE_TYPE)
            .find_map(Term::as_iri)
            .or_else(|| self.objects_of(TREE_VIEW).find_map(Term::as_iri))
    }

    fn linked_identifiers(&self) -> Vec<&str> {
        let stream = self
            .subjects_of_type(LDES_EVENT_STREAM)
            .find_map(Term::as_iri);

        stream
            .into_iter()
            .chain(self.objects_of(TREE_NODE).filter_map(Term::as_iri))
            .collect()
    }

    fn rewrite_identifiers(&mut self, rewrites: &IdentifierRewrites) -> usize {
        self.statements
            .iter_mut()
            .map(|statement| {
                statement.subject.rewrite(rewrites) + statement.object.rewrite(rewrites)
            })
            .sum()
    }
}
