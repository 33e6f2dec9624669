//! Statement-based formats: Turtle, N-Triples and N-Quads

use ldesim_domain::fragment::vocab::PREFIXES;
use ldesim_domain::fragment::{GraphDocument, Literal, Statement, Term};
use oxigraph::io::{RdfFormat, RdfParser, RdfSerializer};
use oxigraph::model::vocab::xsd;
use oxigraph::model::{
    BlankNode, GraphName, Literal as RdfLiteral, NamedNode, Quad, Term as RdfTerm,
};
use tracing::debug;

use crate::error::{CodecError, Result};

pub(crate) fn parse(bytes: &[u8], format: RdfFormat) -> Result<GraphDocument> {
    let statements = RdfParser::from_format(format)
        .for_reader(bytes)
        .map(|quad| {
            quad.map(statement_from)
                .map_err(|err| CodecError::syntax(format.media_type(), err.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(format = format.media_type(), statements = statements.len(), "Parsed RDF document");
    Ok(GraphDocument::new(statements))
}

pub(crate) fn serialize(document: &GraphDocument, format: RdfFormat) -> Result<Vec<u8>> {
    let mut serializer = RdfSerializer::from_format(format);
    if format == RdfFormat::Turtle {
        for (prefix, namespace) in PREFIXES {
            serializer = serializer
                .with_prefix(prefix, namespace)
                .map_err(|err| CodecError::serialization(err.to_string()))?;
        }
    }

    let mut writer = serializer.for_writer(Vec::new());
    for statement in document.statements() {
        let quad = quad_from(statement)?;
        if !format.supports_datasets() && quad.graph_name != GraphName::DefaultGraph {
            return Err(CodecError::unsupported_conversion("dataset", format.media_type()));
        }
        writer
            .serialize_quad(&quad)
            .map_err(|err| CodecError::serialization(err.to_string()))?;
    }

    writer
        .finish()
        .map_err(|err| CodecError::serialization(err.to_string()))
}

/// Whether any statement sits in a named graph
pub(crate) fn has_named_graphs(document: &GraphDocument) -> bool {
    document
        .statements()
        .iter()
        .any(|statement| statement.graph.is_some())
}

fn statement_from(quad: Quad) -> Statement {
    let statement = Statement::new(
        term_from(RdfTerm::from(quad.subject)),
        quad.predicate.into_string(),
        term_from(quad.object),
    );

    match quad.graph_name {
        GraphName::NamedNode(node) => statement.in_graph(Term::Iri(node.into_string())),
        GraphName::BlankNode(node) => statement.in_graph(Term::BlankNode(node.as_str().to_string())),
        GraphName::DefaultGraph => statement,
    }
}

fn term_from(term: RdfTerm) -> Term {
    match term {
        RdfTerm::NamedNode(node) => Term::Iri(node.into_string()),
        RdfTerm::BlankNode(node) => Term::BlankNode(node.as_str().to_string()),
        RdfTerm::Literal(literal) => Term::Literal(literal_from(&literal)),
        // Quoted triples only exist with RDF 1.2 support enabled
        #[allow(unreachable_patterns)]
        other => Term::Literal(Literal::simple(other.to_string())),
    }
}

fn literal_from(literal: &RdfLiteral) -> Literal {
    if let Some(language) = literal.language() {
        Literal::language_tagged(literal.value(), language)
    } else if literal.datatype() == xsd::STRING {
        Literal::simple(literal.value())
    } else {
        Literal::typed(literal.value(), literal.datatype().as_str())
    }
}

fn quad_from(statement: &Statement) -> Result<Quad> {
    let predicate = named_node(&statement.predicate)?;
    let object = rdf_term(&statement.object)?;
    let graph = match &statement.graph {
        None => GraphName::DefaultGraph,
        Some(Term::Iri(iri)) => GraphName::NamedNode(named_node(iri)?),
        Some(Term::BlankNode(id)) => GraphName::BlankNode(blank_node(id)?),
        Some(Term::Literal(_)) => {
            return Err(CodecError::serialization("literal used as graph name"))
        }
    };

    match &statement.subject {
        Term::Iri(iri) => Ok(Quad::new(named_node(iri)?, predicate, object, graph)),
        Term::BlankNode(id) => Ok(Quad::new(blank_node(id)?, predicate, object, graph)),
        Term::Literal(_) => Err(CodecError::serialization("literal used as subject")),
    }
}

fn rdf_term(term: &Term) -> Result<RdfTerm> {
    Ok(match term {
        Term::Iri(iri) => named_node(iri)?.into(),
        Term::BlankNode(id) => blank_node(id)?.into(),
        Term::Literal(literal) => rdf_literal(literal)?.into(),
    })
}

fn rdf_literal(literal: &Literal) -> Result<RdfLiteral> {
    match (&literal.language, &literal.datatype) {
        (Some(language), _) => {
            RdfLiteral::new_language_tagged_literal(literal.value.as_str(), language.as_str())
                .map_err(|err| CodecError::serialization(err.to_string()))
        }
        (None, Some(datatype)) => Ok(RdfLiteral::new_typed_literal(
            literal.value.as_str(),
            named_node(datatype)?,
        )),
        (None, None) => Ok(RdfLiteral::new_simple_literal(literal.value.as_str())),
    }
}

fn named_node(iri: &str) -> Result<NamedNode> {
    NamedNode::new(iri).map_err(|err| CodecError::serialization(format!("{}: {}", iri, err)))
}

fn blank_node(id: &str) -> Result<BlankNode> {
    BlankNode::new(id).map_err(|err| CodecError::serialization(format!("_:{}: {}", id, err)))
}
