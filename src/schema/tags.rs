//! # Print Tags
//!
//! Typed view of the `@print.*` annotations attached to fields and action
//! parameters. Annotations are decoded once while the schema is loaded; nothing
//! downstream inspects raw annotation keys.

use super::error::SchemaError;
use crate::constants::annotations as ann;
use serde_json::{json, Map, Value as JsonValue};
use std::collections::{BTreeMap, BTreeSet};

/// Which actions a tag applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Usable from any action that is not otherwise action-scoped
    Generic,
    /// Restricted to the named actions
    Actions(BTreeSet<String>),
}

impl Scope {
    pub fn actions<I, S>(actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Scope::Actions(actions.into_iter().map(Into::into).collect())
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Scope::Generic)
    }

    /// Whether an action-scoped tag names `action`. Generic tags never match.
    pub fn names(&self, action: &str) -> bool {
        match self {
            Scope::Generic => false,
            Scope::Actions(actions) => actions.contains(action),
        }
    }

    fn to_json(&self) -> Option<JsonValue> {
        match self {
            Scope::Generic => None,
            Scope::Actions(actions) => Some(json!(actions.iter().collect::<Vec<_>>())),
        }
    }
}

/// Role a field plays in print configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTag {
    /// Field holds the print queue id; `value_list` names the queue lookup entity
    QueueSource { value_list: Option<String> },
    /// Field holds the number of copies
    CopyCount,
    /// Field holds printable content; `file_name_field` names the field with its file name
    FileContent { file_name_field: Option<String> },
    /// Content field is the main document of the job
    MainDocument,
    /// Parameter selects one content field out of several
    FileSelector,
}

/// A tag together with its action scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedTag {
    pub tag: FieldTag,
    pub scope: Scope,
}

/// All print tags of a single field, in decoding order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<ScopedTag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag, replacing any existing tag of the same kind
    pub fn with(mut self, tag: FieldTag, scope: Scope) -> Self {
        self.insert(tag, scope);
        self
    }

    pub fn insert(&mut self, tag: FieldTag, scope: Scope) {
        self.tags
            .retain(|t| std::mem::discriminant(&t.tag) != std::mem::discriminant(&tag));
        self.tags.push(ScopedTag { tag, scope });
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopedTag> {
        self.tags.iter()
    }

    pub fn queue_source(&self) -> Option<&ScopedTag> {
        self.find(|t| matches!(t, FieldTag::QueueSource { .. }))
    }

    pub fn copy_count(&self) -> Option<&ScopedTag> {
        self.find(|t| matches!(t, FieldTag::CopyCount))
    }

    pub fn file_content(&self) -> Option<&ScopedTag> {
        self.find(|t| matches!(t, FieldTag::FileContent { .. }))
    }

    pub fn main_document(&self) -> Option<&ScopedTag> {
        self.find(|t| matches!(t, FieldTag::MainDocument))
    }

    pub fn file_selector(&self) -> Option<&ScopedTag> {
        self.find(|t| matches!(t, FieldTag::FileSelector))
    }

    fn find(&self, pred: impl Fn(&FieldTag) -> bool) -> Option<&ScopedTag> {
        self.tags.iter().find(|t| pred(&t.tag))
    }

    /// Decode the print tags of `field` from its annotation map
    pub fn decode(
        field: &str,
        annotations: &BTreeMap<String, JsonValue>,
    ) -> Result<Self, SchemaError> {
        let mut tags = TagSet::new();
        let get = |key: &str| annotations.get(key).filter(|v| is_set(v));

        let queue_scope = decode_scope(field, ann::QUEUE_USED_IN_ACTION, get(ann::QUEUE_USED_IN_ACTION))?;
        if get(ann::QUEUE).is_some()
            || get(ann::QUEUE_SOURCE_ENTITY).is_some()
            || !queue_scope.is_generic()
        {
            let value_list = get(ann::QUEUE_SOURCE_ENTITY)
                .and_then(JsonValue::as_str)
                .map(str::to_string);
            tags.insert(FieldTag::QueueSource { value_list }, queue_scope);
        }

        let copies_scope = decode_scope(
            field,
            ann::NUMBER_OF_COPIES_USED_IN_ACTION,
            get(ann::NUMBER_OF_COPIES_USED_IN_ACTION),
        )?;
        if get(ann::NUMBER_OF_COPIES).is_some() || !copies_scope.is_generic() {
            tags.insert(FieldTag::CopyCount, copies_scope);
        }

        let content_scope = decode_scope(
            field,
            ann::FILE_CONTENT_USED_IN_ACTION,
            get(ann::FILE_CONTENT_USED_IN_ACTION),
        )?;
        let file_name_field = get(ann::FILE_CONTENT_FILE_NAME_FIELD)
            .map(|v| decode_field_ref(field, ann::FILE_CONTENT_FILE_NAME_FIELD, v))
            .transpose()?;
        if get(ann::FILE_CONTENT).is_some()
            || file_name_field.is_some()
            || !content_scope.is_generic()
        {
            tags.insert(FieldTag::FileContent { file_name_field }, content_scope);
        }

        let main_scope = decode_scope(
            field,
            ann::MAIN_DOCUMENT_USED_IN_ACTION,
            get(ann::MAIN_DOCUMENT_USED_IN_ACTION),
        )?;
        if get(ann::MAIN_DOCUMENT).is_some() || !main_scope.is_generic() {
            tags.insert(FieldTag::MainDocument, main_scope);
        }

        if get(ann::FILE_SELECTOR).is_some() {
            tags.insert(FieldTag::FileSelector, Scope::Generic);
        }

        Ok(tags)
    }

    /// Render the tag set as annotations, the inverse of [`TagSet::decode`]
    pub fn to_annotations(&self) -> BTreeMap<String, JsonValue> {
        let mut out = BTreeMap::new();
        for ScopedTag { tag, scope } in &self.tags {
            let (marker, scope_key) = match tag {
                FieldTag::QueueSource { value_list } => {
                    if let Some(entity) = value_list {
                        out.insert(ann::QUEUE_SOURCE_ENTITY.to_string(), json!(entity));
                    }
                    (ann::QUEUE, Some(ann::QUEUE_USED_IN_ACTION))
                }
                FieldTag::CopyCount => {
                    (ann::NUMBER_OF_COPIES, Some(ann::NUMBER_OF_COPIES_USED_IN_ACTION))
                }
                FieldTag::FileContent { file_name_field } => {
                    if let Some(name) = file_name_field {
                        out.insert(ann::FILE_CONTENT_FILE_NAME_FIELD.to_string(), json!(name));
                    }
                    (ann::FILE_CONTENT, Some(ann::FILE_CONTENT_USED_IN_ACTION))
                }
                FieldTag::MainDocument => {
                    (ann::MAIN_DOCUMENT, Some(ann::MAIN_DOCUMENT_USED_IN_ACTION))
                }
                FieldTag::FileSelector => (ann::FILE_SELECTOR, None),
            };
            out.insert(marker.to_string(), JsonValue::Bool(true));
            if let (Some(key), Some(actions)) = (scope_key, scope.to_json()) {
                out.insert(key.to_string(), actions);
            }
        }
        out
    }
}

// Falsy annotation values mean "not tagged"
fn is_set(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn decode_scope(
    field: &str,
    key: &str,
    value: Option<&JsonValue>,
) -> Result<Scope, SchemaError> {
    let Some(value) = value else {
        return Ok(Scope::Generic);
    };

    let actions: BTreeSet<String> = match value {
        JsonValue::String(action) => BTreeSet::from([action.clone()]),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    SchemaError::invalid_annotation(field, key, "action names must be strings")
                })
            })
            .collect::<Result<_, _>>()?,
        other => {
            return Err(SchemaError::invalid_annotation(
                field,
                key,
                format!("expected an action name or a list of action names, got {other}"),
            ))
        }
    };

    if actions.is_empty() {
        return Err(SchemaError::invalid_annotation(
            field,
            key,
            "must name at least one action",
        ));
    }

    Ok(Scope::Actions(actions))
}

/// Decode a field reference given either as a plain name or as a `{"=": name}` path
pub(crate) fn decode_field_ref(
    field: &str,
    key: &str,
    value: &JsonValue,
) -> Result<String, SchemaError> {
    match value {
        JsonValue::String(name) => Ok(name.clone()),
        JsonValue::Object(path) => path_ref(path).ok_or_else(|| {
            SchemaError::invalid_annotation(field, key, "path reference must be {\"=\": <field>}")
        }),
        other => Err(SchemaError::invalid_annotation(
            field,
            key,
            format!("expected a field name, got {other}"),
        )),
    }
}

fn path_ref(path: &Map<String, JsonValue>) -> Option<String> {
    path.get("=").and_then(JsonValue::as_str).map(str::to_string)
}
