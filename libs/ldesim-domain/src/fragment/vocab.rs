//! Vocabulary terms the rewriting engine looks for

pub const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const NS_RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const NS_XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const NS_DCTERMS: &str = "http://purl.org/dc/terms/";
pub const NS_TREE: &str = "https://w3id.org/tree#";
pub const NS_LDES: &str = "https://w3id.org/ldes#";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub const TREE_NODE_TYPE: &str = "https://w3id.org/tree#Node";
pub const TREE_NODE: &str = "https://w3id.org/tree#node";
pub const TREE_VIEW: &str = "https://w3id.org/tree#view";
pub const TREE_RELATION: &str = "https://w3id.org/tree#relation";
pub const LDES_EVENT_STREAM: &str = "https://w3id.org/ldes#EventStream";

/// Prefixes used when writing documents back out
pub const PREFIXES: [(&str, &str); 6] = [
    ("rdf", NS_RDF),
    ("rdfs", NS_RDFS),
    ("xsd", NS_XSD),
    ("dct", NS_DCTERMS),
    ("tree", NS_TREE),
    ("ldes", NS_LDES),
];

// Keys of tree-shaped (JSON-LD) documents
pub(crate) const JSON_ID: &str = "@id";
pub(crate) const JSON_CONTEXT: &str = "@context";
pub(crate) const JSON_GRAPH: &str = "@graph";
pub(crate) const JSON_RELATION_KEYS: [&str; 2] = ["tree:relation", TREE_RELATION];
pub(crate) const JSON_NODE_KEYS: [&str; 2] = ["tree:node", TREE_NODE];
