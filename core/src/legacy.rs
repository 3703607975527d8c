//! Minimal legacy document profile.
//!
//! An older, reduced shape of the document model that some consumers still
//! produce. Compared with the canonical types in [`crate::types`]:
//!
//! - every field is always emitted, including empty strings, `false` and
//!   empty lists or maps;
//! - responses are fixed to a single `"200"` entry ([`Responses::ok`]);
//! - parameters carry no body schema, and schemas carry no `$ref`;
//! - definitions have no `required` list;
//! - there is no `security` or `securityDefinitions` section.
//!
//! Missing and `null` fields still decode to their zero value. Use the `From`
//! conversion to lift a legacy document into the canonical model.
//!
//! # Example
//!
//! ```
//! use swagger_model_core::{legacy, Document};
//!
//! let raw = br#"{"swagger":"2.0","info":{"title":"T"}}"#;
//! let old = legacy::decode(raw).unwrap();
//!
//! let out = String::from_utf8(legacy::encode(&old).unwrap()).unwrap();
//! assert!(out.contains(r#""host":"""#));
//!
//! let doc = Document::from(old);
//! assert_eq!(doc.info.title, "T");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::codec::{Format, decode_as, encode_as};
use crate::de::null_as_default;
use crate::error::Result;

/// Root of a legacy document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Swagger version.
    #[serde(deserialize_with = "null_as_default")]
    pub swagger: String,
    /// Basic information about the API.
    #[serde(deserialize_with = "null_as_default")]
    pub info: Info,
    /// Host serving the API.
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    /// Accepted transfer protocols.
    #[serde(deserialize_with = "null_as_default")]
    pub schemes: Vec<String>,
    /// Path prefix for every request.
    #[serde(rename = "basePath", deserialize_with = "null_as_default")]
    pub base_path: String,
    /// MIME types the API can produce.
    #[serde(deserialize_with = "null_as_default")]
    pub produces: Vec<String>,
    /// Path templates to operations keyed by verb.
    #[serde(deserialize_with = "null_as_default")]
    pub paths: IndexMap<String, IndexMap<String, Request>>,
    /// Reusable named types.
    #[serde(deserialize_with = "null_as_default")]
    pub definitions: IndexMap<String, Definition>,
}

/// Basic API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    /// Short name of the API.
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Longer description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Version of the API.
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
}

/// One operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// One-line summary.
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    /// Longer description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Operation parameters.
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
    /// Grouping tags.
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// The `"200"` response.
    #[serde(deserialize_with = "null_as_default")]
    pub responses: Responses,
}

/// Parameter without a body schema. `in` is kept as free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    /// Parameter name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Location, e.g. `query` or `path`.
    #[serde(rename = "in", deserialize_with = "null_as_default")]
    pub location: String,
    /// Description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Whether the parameter is mandatory.
    #[serde(deserialize_with = "null_as_default")]
    pub required: bool,
    /// Primitive type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub param_type: String,
    /// Type format, e.g. `int64`.
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
}

/// The only response a legacy operation can describe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Responses {
    /// Success response.
    #[serde(rename = "200", deserialize_with = "null_as_default")]
    pub ok: Response,
}

/// Response description and payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// Description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Payload shape.
    #[serde(deserialize_with = "null_as_default")]
    pub schema: Schema,
}

/// Payload shape without a `$ref`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Payload type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub schema_type: String,
    /// Element reference for arrays.
    #[serde(deserialize_with = "null_as_default")]
    pub items: ItemRef,
}

/// Reference to a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRef {
    /// `$ref` pointer, kept as an opaque string.
    #[serde(rename = "$ref", deserialize_with = "null_as_default")]
    pub reference: String,
}

/// Named type without a `required` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definition {
    /// Type, usually `object`.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub definition_type: String,
    /// Fields by name.
    #[serde(deserialize_with = "null_as_default")]
    pub properties: IndexMap<String, Property>,
}

/// One field of a [`Definition`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    /// Field type.
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub property_type: String,
    /// Type format.
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
    /// Description.
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Element reference for arrays.
    #[serde(deserialize_with = "null_as_default")]
    pub items: ItemRef,
}

/// Decodes a legacy JSON payload.
pub fn decode(bytes: &[u8]) -> Result<Document> {
    decode_as(bytes, Format::Json)
}

/// Decodes a legacy payload in the given format.
pub fn decode_with(bytes: &[u8], format: Format) -> Result<Document> {
    decode_as(bytes, format)
}

/// Encodes a legacy document as compact JSON, emitting every field.
pub fn encode(doc: &Document) -> Result<Vec<u8>> {
    encode_as(doc, Format::Json, false)
}

fn item_ref(items: ItemRef) -> Option<crate::ItemRef> {
    (!items.reference.is_empty()).then(|| crate::ItemRef::reference(&items.reference))
}

impl From<Document> for crate::Document {
    fn from(doc: Document) -> Self {
        Self {
            swagger: doc.swagger,
            info: doc.info.into(),
            host: doc.host,
            schemes: doc.schemes,
            base_path: doc.base_path,
            produces: doc.produces,
            paths: doc
                .paths
                .into_iter()
                .map(|(path, item)| {
                    let item = item
                        .into_iter()
                        .map(|(verb, request)| (verb, request.into()))
                        .collect();
                    (path, item)
                })
                .collect(),
            definitions: doc
                .definitions
                .into_iter()
                .map(|(name, def)| (name, def.into()))
                .collect(),
            security: Vec::new(),
            security_definitions: IndexMap::new(),
        }
    }
}

impl From<Info> for crate::Info {
    fn from(info: Info) -> Self {
        Self {
            title: info.title,
            description: info.description,
            version: info.version,
        }
    }
}

impl From<Request> for crate::Request {
    fn from(request: Request) -> Self {
        let mut responses = IndexMap::new();
        if request.responses.ok != Response::default() {
            responses.insert("200".to_string(), request.responses.ok.into());
        }
        Self {
            summary: request.summary,
            description: request.description,
            parameters: request.parameters.into_iter().map(Into::into).collect(),
            tags: request.tags,
            responses,
        }
    }
}

impl From<Parameter> for crate::Parameter {
    fn from(param: Parameter) -> Self {
        // Unrecognized locations are dropped rather than rejected.
        let location = serde_json::from_value(serde_json::Value::String(param.location)).ok();
        Self {
            name: param.name,
            location,
            description: param.description,
            required: param.required,
            param_type: param.param_type,
            format: param.format,
            schema: None,
        }
    }
}

impl From<Response> for crate::Response {
    fn from(response: Response) -> Self {
        Self {
            description: response.description,
            schema: crate::Schema {
                schema_type: response.schema.schema_type,
                items: item_ref(response.schema.items),
                reference: String::new(),
            },
        }
    }
}

impl From<Definition> for crate::Definition {
    fn from(def: Definition) -> Self {
        Self {
            definition_type: def.definition_type,
            properties: def
                .properties
                .into_iter()
                .map(|(name, prop)| {
                    let prop = crate::Property {
                        property_type: prop.property_type,
                        format: prop.format,
                        description: prop.description,
                        items: item_ref(prop.items),
                        reference: String::new(),
                    };
                    (name, prop)
                })
                .collect(),
            required: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParameterLocation;

    #[test]
    fn test_every_field_is_emitted() {
        let out: serde_json::Value =
            serde_json::from_slice(&encode(&Document::default()).unwrap()).unwrap();

        assert_eq!(
            out,
            serde_json::json!({
                "swagger": "",
                "info": {"title": "", "description": "", "version": ""},
                "host": "",
                "schemes": [],
                "basePath": "",
                "produces": [],
                "paths": {},
                "definitions": {}
            })
        );
    }

    #[test]
    fn test_required_false_is_emitted() {
        let mut doc = Document::default();
        let mut item = IndexMap::new();
        item.insert(
            "get".to_string(),
            Request {
                parameters: vec![Parameter {
                    name: "q".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
        );
        doc.paths.insert("/a".to_string(), item);

        let out: serde_json::Value = serde_json::from_slice(&encode(&doc).unwrap()).unwrap();
        let get = &out["paths"]["/a"]["get"];
        assert_eq!(get["parameters"][0]["required"], false);
        assert_eq!(get["responses"]["200"]["schema"]["items"]["$ref"], "");
    }

    #[test]
    fn test_round_trip() {
        let raw = br##"{
            "swagger": "2.0",
            "info": {"title": "T", "description": "d", "version": "1"},
            "host": "h", "schemes": ["https"], "basePath": "/b", "produces": ["application/json"],
            "paths": {"/w": {"get": {
                "summary": "s", "description": "d", "tags": ["t"],
                "parameters": [{"name": "id", "in": "path", "description": "i", "required": true, "type": "string", "format": "uuid"}],
                "responses": {"200": {"description": "OK", "schema": {"type": "array", "items": {"$ref": "#/definitions/W"}}}}
            }}},
            "definitions": {"W": {"type": "object", "properties": {"id": {"type": "string", "format": "uuid", "description": "i", "items": {"$ref": ""}}}}}
        }"##;
        let doc = decode(raw).unwrap();
        assert_eq!(decode(&encode(&doc).unwrap()).unwrap(), doc);
        assert_eq!(doc.paths["/w"]["get"].responses.ok.description, "OK");
    }

    #[test]
    fn test_other_status_codes_are_dropped() {
        let raw = br#"{"paths":{"/a":{"get":{"responses":{"200":{"description":"OK"},"404":{"description":"gone"}}}}}}"#;
        let doc = decode(raw).unwrap();
        let out = String::from_utf8(encode(&doc).unwrap()).unwrap();
        assert!(!out.contains("404"));
    }

    #[test]
    fn test_upgrade_to_canonical() {
        let raw = br##"{
            "swagger": "2.0",
            "info": {"title": "T", "version": "1"},
            "paths": {"/w": {"get": {
                "parameters": [{"name": "id", "in": "path", "required": true, "type": "string"},
                               {"name": "x", "in": "somewhere"}],
                "responses": {"200": {"description": "OK", "schema": {"type": "array", "items": {"$ref": "#/definitions/W"}}}}
            }}},
            "definitions": {"W": {"type": "object", "properties": {"id": {"type": "string"}}}}
        }"##;
        let doc = crate::Document::from(decode(raw).unwrap());
        let get = doc.operation("/w", "get").unwrap();

        assert_eq!(get.parameters[0].location, Some(ParameterLocation::Path));
        assert_eq!(get.parameters[1].location, None);
        let ok = get.response("200").unwrap();
        assert_eq!(ok.schema.items.as_ref().unwrap().reference, "#/definitions/W");
        assert!(doc.definitions["W"].properties["id"].items.is_none());

        let canonical = String::from_utf8(crate::encode(&doc).unwrap()).unwrap();
        assert!(!canonical.contains("\"host\""));
    }

    #[test]
    fn test_go_nil_collections_decode_as_empty() {
        let raw = br#"{"swagger":"2.0","info":{"title":"T","description":"","version":"1"},"host":"","schemes":null,"basePath":"","produces":null,"paths":null,"definitions":null}"#;
        let doc = decode(raw).unwrap();

        assert_eq!(doc.swagger, "2.0");
        assert_eq!(doc.info.title, "T");
        assert!(doc.schemes.is_empty());
        assert!(doc.produces.is_empty());
        assert!(doc.paths.is_empty());
        assert!(doc.definitions.is_empty());
    }

    #[test]
    fn test_nested_nulls_decode_as_zero_values() {
        let raw = br#"{"info":null,"paths":{"/a":{"get":{"summary":null,"parameters":null,"tags":null,"responses":{"200":{"description":"OK","schema":null}}}}},"definitions":{"W":{"type":"object","properties":null}}}"#;
        let doc = decode(raw).unwrap();

        let get = &doc.paths["/a"]["get"];
        assert!(get.summary.is_empty());
        assert!(get.parameters.is_empty());
        assert!(get.tags.is_empty());
        assert_eq!(get.responses.ok.description, "OK");
        assert_eq!(get.responses.ok.schema, Schema::default());
        assert!(doc.definitions["W"].properties.is_empty());
    }

    #[test]
    fn test_upgrade_without_response_adds_none() {
        let doc = crate::Document::from(decode(br#"{"paths":{"/a":{"get":{"summary":"s"}}}}"#).unwrap());

        assert!(doc.operation("/a", "get").unwrap().responses.is_empty());
        let out = String::from_utf8(crate::encode(&doc).unwrap()).unwrap();
        assert_eq!(out, r#"{"info":{},"paths":{"/a":{"get":{"summary":"s"}}}}"#);
    }
}
