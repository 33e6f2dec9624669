//! JSON-LD documents
//!
//! A single node object with an `@id` is kept as the tree document it arrived
//! as. Any other JSON-LD payload (a node array, a `@graph` container) is read
//! into statements with oxigraph's JSON-LD parser. Graph documents are written
//! in expanded form: one node object per subject, with every property value
//! spelled out as `@id` or `@value`.

use std::collections::HashMap;

use ldesim_domain::fragment::vocab::RDF_TYPE;
use ldesim_domain::fragment::{Document, GraphDocument, Literal, Statement, Term, TreeDocument};
use oxigraph::io::{JsonLdProfileSet, RdfFormat};
use serde_json::{json, Map, Value};

use crate::error::{CodecError, Result};
use crate::media_type::MediaType;
use crate::rdf;

const JSON_LD: RdfFormat = RdfFormat::JsonLd {
    profile: JsonLdProfileSet::empty(),
};

pub(crate) fn parse(bytes: &[u8]) -> Result<Document> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| CodecError::syntax(MediaType::JsonLd.as_str(), err.to_string()))?;

    if TreeDocument::fits(&value) {
        return Ok(Document::Tree(TreeDocument::new(value)));
    }

    match value {
        Value::Object(_) | Value::Array(_) => Ok(Document::Graph(rdf::parse(bytes, JSON_LD)?)),
        _ => Err(CodecError::syntax(
            MediaType::JsonLd.as_str(),
            "expected an object or an array",
        )),
    }
}

pub(crate) fn serialize_tree(document: &TreeDocument) -> Result<Vec<u8>> {
    serde_json::to_vec(document.as_value()).map_err(|err| CodecError::serialization(err.to_string()))
}

pub(crate) fn serialize_graph(document: &GraphDocument) -> Result<Vec<u8>> {
    serde_json::to_vec(&expand(document)).map_err(|err| CodecError::serialization(err.to_string()))
}

/// Expanded JSON-LD for a graph document
pub(crate) fn expand(document: &GraphDocument) -> Value {
    let mut default_graph = NodeMap::default();
    let mut named_graphs: Vec<(String, NodeMap)> = Vec::new();

    for statement in document.statements() {
        let nodes = match &statement.graph {
            None => &mut default_graph,
            Some(graph) => {
                let name = node_id(graph);
                let index = match named_graphs.iter().position(|(id, _)| *id == name) {
                    Some(index) => index,
                    None => {
                        named_graphs.push((name, NodeMap::default()));
                        named_graphs.len() - 1
                    }
                };
                &mut named_graphs[index].1
            }
        };
        nodes.add(statement);
    }

    for (name, nodes) in named_graphs {
        default_graph
            .node(&name)
            .insert("@graph".to_string(), Value::Array(nodes.into_values()));
    }

    Value::Array(default_graph.into_values())
}

/// Node objects in order of first appearance
#[derive(Default)]
struct NodeMap {
    nodes: Vec<Map<String, Value>>,
    index: HashMap<String, usize>,
}

impl NodeMap {
    fn node(&mut self, id: &str) -> &mut Map<String, Value> {
        let position = match self.index.get(id) {
            Some(position) => *position,
            None => {
                let mut node = Map::new();
                node.insert("@id".to_string(), Value::String(id.to_string()));
                self.nodes.push(node);
                self.index.insert(id.to_string(), self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[position]
    }

    fn add(&mut self, statement: &Statement) {
        let node = self.node(&node_id(&statement.subject));

        let (key, value) = match &statement.object {
            Term::Iri(_) | Term::BlankNode(_) if statement.predicate == RDF_TYPE => {
                ("@type".to_string(), Value::String(node_id(&statement.object)))
            }
            object => (statement.predicate.clone(), object_value(object)),
        };

        if let Value::Array(values) = node.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
            values.push(value);
        }
    }

    fn into_values(self) -> Vec<Value> {
        self.nodes.into_iter().map(Value::Object).collect()
    }
}

fn node_id(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.clone(),
        Term::BlankNode(id) => format!("_:{}", id),
        Term::Literal(literal) => literal.value.clone(),
    }
}

fn object_value(term: &Term) -> Value {
    match term {
        Term::Literal(Literal {
            value,
            datatype,
            language,
        }) => {
            let mut object = Map::new();
            object.insert("@value".to_string(), Value::String(value.clone()));
            if let Some(language) = language {
                object.insert("@language".to_string(), Value::String(language.clone()));
            } else if let Some(datatype) = datatype {
                object.insert("@type".to_string(), Value::String(datatype.clone()));
            }
            Value::Object(object)
        }
        other => json!({ "@id": node_id(other) }),
    }
}
