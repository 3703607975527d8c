//! Swagger 2.0 document type definitions.
//!
//! This module defines the canonical data model for an OpenAPI 2.0 (Swagger)
//! document. Every field is omit-on-empty: a field missing from the input
//! decodes to its zero value, and a zero value is left out of the encoded
//! output. The types are plain values with no back-references, so a decoded
//! [`Document`] is a pure tree.
//!
//! Maps use [`IndexMap`] so keys keep their document order across a
//! decode/encode round trip.

use std::ops::Not;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::de::{null_as_default, security_requirements};

/// Swagger version string written by [`Document::new`].
pub const SWAGGER_VERSION: &str = "2.0";

/// Operations of a single path, keyed by lowercase HTTP verb.
pub type PathItem = IndexMap<String, Request>;

/// One security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Root of a Swagger document.
///
/// # Examples
///
/// ```
/// use swagger_model_core::*;
///
/// let mut doc = Document::new("Widgets", "1.0.0").with_base_path("/api");
/// doc.insert_operation(
///     "/widgets",
///     "get",
///     Request::new("List widgets").with_response("200", Response::new("OK")),
/// );
///
/// assert_eq!(doc.swagger, "2.0");
/// assert!(doc.operation("/widgets", "get").is_some());
/// assert!(doc.operation("/widgets", "post").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Swagger version, usually `"2.0"`.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub swagger: String,
    /// Basic information about the API.
    #[serde(deserialize_with = "null_as_default")]
    pub info: Info,
    /// Host (name or IP, optionally with port) serving the API.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub host: String,
    /// Accepted transfer protocols (`http`, `https`, `ws`, `wss`).
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// Path prefix appended to `host` for every request.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "basePath",
        skip_serializing_if = "String::is_empty"
    )]
    pub base_path: String,
    /// MIME types the API can produce.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Path templates to their operations.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable named types referenced through `$ref`.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, Definition>,
    /// Security requirements applied to every operation.
    #[serde(deserialize_with = "security_requirements", skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    /// Named security schemes.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "securityDefinitions",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_definitions: IndexMap<String, SecurityDefinition>,
}

impl Document {
    /// Creates a document with the given title and API version.
    ///
    /// The `swagger` field is set from [`SWAGGER_VERSION`].
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            swagger: SWAGGER_VERSION.to_string(),
            info: Info::new(title, version),
            ..Default::default()
        }
    }

    /// Sets the host.
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Sets the base path.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    /// Adds an accepted scheme.
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.schemes.push(scheme.to_string());
        self
    }

    /// Adds a produced MIME type.
    pub fn with_produces(mut self, mime: &str) -> Self {
        self.produces.push(mime.to_string());
        self
    }

    /// Adds a named security scheme.
    pub fn with_security_definition(mut self, name: &str, scheme: SecurityDefinition) -> Self {
        self.security_definitions.insert(name.to_string(), scheme);
        self
    }

    /// Inserts an operation, replacing any operation already at `path`/`verb`.
    ///
    /// Returns the replaced operation, if any.
    pub fn insert_operation(&mut self, path: &str, verb: &str, request: Request) -> Option<Request> {
        self.paths
            .entry(path.to_string())
            .or_default()
            .insert(verb.to_string(), request)
    }

    /// Inserts a definition, returning the one it replaced.
    pub fn insert_definition(&mut self, name: &str, definition: Definition) -> Option<Definition> {
        self.definitions.insert(name.to_string(), definition)
    }

    /// Looks up an operation by path template and verb.
    pub fn operation(&self, path: &str, verb: &str) -> Option<&Request> {
        self.paths.get(path).and_then(|item| item.get(verb))
    }

    /// Looks up a definition by name.
    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    /// Iterates over every operation as `(path, verb, request)`, in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// use swagger_model_core::*;
    ///
    /// let mut doc = Document::new("T", "1");
    /// doc.insert_operation("/a", "get", Request::default());
    /// doc.insert_operation("/a", "post", Request::default());
    /// doc.insert_operation("/b", "delete", Request::default());
    ///
    /// let verbs: Vec<_> = doc.operations().map(|(p, v, _)| format!("{v} {p}")).collect();
    /// assert_eq!(verbs, vec!["get /a", "post /a", "delete /b"]);
    /// ```
    pub fn operations(&self) -> impl Iterator<Item = (&str, &str, &Request)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.iter()
                .map(move |(verb, request)| (path.as_str(), verb.as_str(), request))
        })
    }

    /// Total number of operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(IndexMap::len).sum()
    }
}

/// Basic API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    /// Short name of the API.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Longer description of the API.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Version of the API (not of the Swagger format).
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub version: String,
}

impl Info {
    /// Creates info with a title and version.
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            version: version.to_string(),
        }
    }
}

/// One HTTP operation on a path.
///
/// # Examples
///
/// ```
/// use swagger_model_core::*;
///
/// let request = Request::new("Create a widget")
///     .with_tag("widgets")
///     .with_parameter(Parameter::body("body", Schema::reference("#/definitions/Widget")))
///     .with_response("201", Response::new("Created"));
///
/// assert_eq!(request.tags, vec!["widgets"]);
/// assert_eq!(request.body_parameter().unwrap().name, "body");
/// assert!(request.response("201").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Short title of the operation.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// Longer description of the operation.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Ordered list of parameters.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Tags used for grouping operations.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Responses keyed by status code (or `default`).
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,
}

impl Request {
    /// Creates a request with a summary.
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            ..Default::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds or replaces the response for `code`.
    pub fn with_response(mut self, code: &str, response: Response) -> Self {
        self.responses.insert(code.to_string(), response);
        self
    }

    /// Looks up a response by status code.
    pub fn response(&self, code: &str) -> Option<&Response> {
        self.responses.get(code)
    }

    /// Returns the first parameter located in the body, if any.
    pub fn body_parameter(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.location == Some(ParameterLocation::Body))
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Query string (`?id=1`).
    Query,
    /// Request header.
    Header,
    /// Templated path segment (`/items/{id}`).
    Path,
    /// Form field (`application/x-www-form-urlencoded` or multipart).
    FormData,
    /// Request payload, described by [`Parameter::schema`].
    Body,
}

/// A request parameter.
///
/// The Swagger rules tying fields together (for example `type: file`
/// requires `in: formData`) are not checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    /// Parameter name; case sensitive.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Location of the parameter.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
    /// Text description.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Whether the parameter is mandatory.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Not::not")]
    pub required: bool,
    /// One of `string`, `number`, `integer`, `boolean`, `array` or `file`.
    /// Unused for body parameters.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "type",
        skip_serializing_if = "String::is_empty"
    )]
    pub param_type: String,
    /// Refinement of `type`, e.g. `int64` or `date-time`. Unused for body parameters.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// Payload schema for body parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    /// Creates a non-body parameter of the given primitive type.
    ///
    /// # Examples
    ///
    /// ```
    /// use swagger_model_core::*;
    ///
    /// let id = Parameter::new("id", ParameterLocation::Path, "integer").required();
    /// assert!(id.required);
    /// assert_eq!(id.param_type, "integer");
    /// assert!(id.schema.is_none());
    /// ```
    pub fn new(name: &str, location: ParameterLocation, param_type: &str) -> Self {
        Self {
            name: name.to_string(),
            location: Some(location),
            param_type: param_type.to_string(),
            ..Default::default()
        }
    }

    /// Creates a required body parameter with a payload schema.
    pub fn body(name: &str, schema: Schema) -> Self {
        Self {
            name: name.to_string(),
            location: Some(ParameterLocation::Body),
            required: true,
            schema: Some(schema),
            ..Default::default()
        }
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the format.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// A single response of an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// Short description of the response.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Shape of the returned payload.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Schema::is_empty")]
    pub schema: Schema,
}

impl Response {
    /// Creates a response with a description and no payload.
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            schema: Schema::default(),
        }
    }

    /// Sets the payload schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }
}

/// Payload shape of a response or body parameter.
///
/// # Examples
///
/// ```
/// use swagger_model_core::*;
///
/// let list = Schema::array_of(ItemRef::reference("#/definitions/Widget"));
/// assert_eq!(list.schema_type, "array");
/// assert_eq!(list.items.unwrap().reference, "#/definitions/Widget");
///
/// assert!(Schema::default().is_empty());
/// assert!(!Schema::of_type("string").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Type of the payload.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "type",
        skip_serializing_if = "String::is_empty"
    )]
    pub schema_type: String,
    /// Element type when `type` is `array`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemRef>,
    /// Reference to a definition, when the payload is not an array.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "$ref",
        skip_serializing_if = "String::is_empty"
    )]
    pub reference: String,
}

impl Schema {
    /// Schema of a plain type.
    pub fn of_type(schema_type: &str) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            ..Default::default()
        }
    }

    /// Schema pointing at a definition. The pointer is kept as-is.
    pub fn reference(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            ..Default::default()
        }
    }

    /// Array schema whose items are described by `items`.
    pub fn array_of(items: ItemRef) -> Self {
        Self {
            schema_type: "array".to_string(),
            items: Some(items),
            reference: String::new(),
        }
    }

    /// Returns `true` when every field is at its zero value.
    pub fn is_empty(&self) -> bool {
        self.schema_type.is_empty() && self.items.is_none() && self.reference.is_empty()
    }
}

/// Type of the items of an array, either referenced or inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRef {
    /// Reference to a definition, if any.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "$ref",
        skip_serializing_if = "String::is_empty"
    )]
    pub reference: String,
    /// Inline item type.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "type",
        skip_serializing_if = "String::is_empty"
    )]
    pub item_type: String,
}

impl ItemRef {
    /// Items pointing at a definition.
    pub fn reference(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            item_type: String::new(),
        }
    }

    /// Items of an inline primitive type.
    pub fn of_type(item_type: &str) -> Self {
        Self {
            reference: String::new(),
            item_type: item_type.to_string(),
        }
    }

    /// Returns `true` when neither a reference nor a type is set.
    pub fn is_empty(&self) -> bool {
        self.reference.is_empty() && self.item_type.is_empty()
    }
}

/// A named, reusable type.
///
/// # Examples
///
/// ```
/// use swagger_model_core::*;
///
/// let widget = Definition::object()
///     .with_property("id", Property::of_type("integer").with_format("int64"))
///     .with_property("name", Property::of_type("string"))
///     .with_required("id");
///
/// assert_eq!(widget.definition_type, "object");
/// assert_eq!(widget.properties.len(), 2);
/// assert_eq!(widget.required, vec!["id"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definition {
    /// Usually `object`, `string`, `integer` or `array`.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "type",
        skip_serializing_if = "String::is_empty"
    )]
    pub definition_type: String,
    /// Fields of an object definition.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Property>,
    /// Names of required properties.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Definition {
    /// Definition of the given type.
    pub fn of_type(definition_type: &str) -> Self {
        Self {
            definition_type: definition_type.to_string(),
            ..Default::default()
        }
    }

    /// Object definition with no properties yet.
    pub fn object() -> Self {
        Self::of_type("object")
    }

    /// Adds or replaces a property.
    pub fn with_property(mut self, name: &str, property: Property) -> Self {
        self.properties.insert(name.to_string(), property);
        self
    }

    /// Marks a property name as required.
    pub fn with_required(mut self, name: &str) -> Self {
        if !self.required.iter().any(|r| r == name) {
            self.required.push(name.to_string());
        }
        self
    }
}

/// One field of a [`Definition`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    /// Data type.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "type",
        skip_serializing_if = "String::is_empty"
    )]
    pub property_type: String,
    /// Refinement of the data type.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub format: String,
    /// Text description.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Element type when the property is an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<ItemRef>,
    /// Reference to another definition when the property is an object.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "$ref",
        skip_serializing_if = "String::is_empty"
    )]
    pub reference: String,
}

impl Property {
    /// Property of a primitive type.
    pub fn of_type(property_type: &str) -> Self {
        Self {
            property_type: property_type.to_string(),
            ..Default::default()
        }
    }

    /// Property pointing at another definition.
    pub fn reference(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            ..Default::default()
        }
    }

    /// Array property.
    pub fn array_of(items: ItemRef) -> Self {
        Self {
            property_type: "array".to_string(),
            items: Some(items),
            ..Default::default()
        }
    }

    /// Sets the format.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// Where an API key is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiKeyLocation {
    /// Query string.
    Query,
    /// Request header.
    Header,
}

/// A named security scheme.
///
/// # Examples
///
/// ```
/// use swagger_model_core::*;
///
/// let key = SecurityDefinition::api_key("X-API-Key", ApiKeyLocation::Header);
/// assert_eq!(key.scheme_type, "apiKey");
/// assert_eq!(key.location, Some(ApiKeyLocation::Header));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityDefinition {
    /// Scheme type, e.g. `apiKey` or `basic`.
    #[serde(
        deserialize_with = "null_as_default",
        rename = "type",
        skip_serializing_if = "String::is_empty"
    )]
    pub scheme_type: String,
    /// Name of the header or query parameter carrying the credential.
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Where the credential is sent.
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ApiKeyLocation>,
}

impl SecurityDefinition {
    /// An `apiKey` scheme.
    pub fn api_key(name: &str, location: ApiKeyLocation) -> Self {
        Self {
            scheme_type: "apiKey".to_string(),
            name: name.to_string(),
            location: Some(location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new_sets_swagger_version() {
        let doc = Document::new("T", "1");
        assert_eq!(doc.swagger, SWAGGER_VERSION);
        assert_eq!(doc.info.title, "T");
        assert_eq!(doc.info.version, "1");
        assert!(doc.paths.is_empty());
    }

    #[test]
    fn test_insert_operation_replaces_same_verb() {
        let mut doc = Document::new("T", "1");
        assert!(doc.insert_operation("/a", "get", Request::new("first")).is_none());
        let replaced = doc.insert_operation("/a", "get", Request::new("second"));

        assert_eq!(replaced.unwrap().summary, "first");
        assert_eq!(doc.operation_count(), 1);
        assert_eq!(doc.operation("/a", "get").unwrap().summary, "second");
    }

    #[test]
    fn test_body_parameter_skips_other_locations() {
        let request = Request::default()
            .with_parameter(Parameter::new("id", ParameterLocation::Path, "string"))
            .with_parameter(Parameter::body("payload", Schema::of_type("object")));

        assert_eq!(request.body_parameter().unwrap().name, "payload");
    }

    #[test]
    fn test_definition_required_is_deduplicated() {
        let def = Definition::object().with_required("id").with_required("id");
        assert_eq!(def.required, vec!["id"]);
    }

    #[test]
    fn test_item_ref_is_empty() {
        assert!(ItemRef::default().is_empty());
        assert!(!ItemRef::of_type("string").is_empty());
    }
}
