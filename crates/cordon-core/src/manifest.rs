//! Loading Pod and Node objects from JSON or YAML manifests.
//!
//! A manifest may hold a single object, a `v1` `List` of objects, or (YAML
//! only) several `---` separated documents.

use crate::resources::Resource;
use crate::{CordonError, GroupVersionKind, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// On-disk manifest encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Pick the format from a file extension; anything but `.json` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// Split raw manifest text into JSON documents, dropping empty YAML documents
pub fn parse_documents(data: &str, format: ManifestFormat) -> Result<Vec<Value>> {
    match format {
        ManifestFormat::Json => {
            let value: Value = serde_json::from_str(data).map_err(|e| {
                CordonError::serialization_error(
                    format!("Failed to parse JSON manifest: {}", e),
                    Some(Box::new(e)),
                )
            })?;
            Ok(vec![value])
        }
        ManifestFormat::Yaml => {
            let mut documents = Vec::new();
            for document in serde_yaml::Deserializer::from_str(data) {
                let value = Value::deserialize(document).map_err(|e| {
                    CordonError::serialization_error(
                        format!("Failed to parse YAML manifest: {}", e),
                        Some(Box::new(e)),
                    )
                })?;
                if !value.is_null() {
                    documents.push(value);
                }
            }
            Ok(documents)
        }
    }
}

fn document_gvk(document: &Value) -> Option<GroupVersionKind> {
    let api_version = document.get("apiVersion")?.as_str()?;
    let kind = document.get("kind")?.as_str()?;
    Some(GroupVersionKind::from_api_version_kind(api_version, kind))
}

/// Flatten `List` wrappers into their items
fn expand_lists(documents: Vec<Value>) -> Vec<Value> {
    let mut expanded = Vec::with_capacity(documents.len());
    for document in documents {
        if document_gvk(&document).is_some_and(|gvk| gvk.is_list()) {
            if let Some(Value::Array(items)) = document.get("items") {
                expanded.extend(items.iter().cloned());
            }
        } else {
            expanded.push(document);
        }
    }
    expanded
}

fn decode_object<T>(mut document: Value, expected: &GroupVersionKind) -> Result<T>
where
    T: DeserializeOwned,
{
    match document_gvk(&document) {
        Some(gvk) if gvk != *expected => {
            return Err(CordonError::unexpected_kind(
                expected.to_string(),
                gvk.to_string(),
            ));
        }
        Some(_) => {}
        None => {
            // Bare objects (e.g. List items written without type info)
            let Value::Object(map) = &mut document else {
                return Err(CordonError::invalid_resource(
                    "Manifest document is not an object",
                    format!("Provide a {} object", expected.kind),
                ));
            };
            map.insert("apiVersion".to_string(), Value::from(expected.api_version()));
            map.insert("kind".to_string(), Value::from(expected.kind.clone()));
        }
    }

    serde_json::from_value(document).map_err(|e| {
        CordonError::serialization_error(
            format!("Failed to decode {}: {}", expected.kind, e),
            Some(Box::new(e)),
        )
    })
}

/// Decode every object of type `T` found in the manifest text
pub fn parse_objects<T>(data: &str, format: ManifestFormat) -> Result<Vec<T>>
where
    T: Resource + DeserializeOwned + Default,
{
    let expected = T::default().gvk();

    expand_lists(parse_documents(data, format)?)
        .into_iter()
        .map(|document| decode_object(document, &expected))
        .collect()
}

/// Read a manifest file and decode every object of type `T` in it
pub fn load_objects<T>(path: &Path) -> Result<Vec<T>>
where
    T: Resource + DeserializeOwned + Default,
{
    let data = std::fs::read_to_string(path)
        .map_err(|e| CordonError::manifest_io(path.display().to_string(), e))?;
    parse_objects(&data, ManifestFormat::from_path(path))
}
