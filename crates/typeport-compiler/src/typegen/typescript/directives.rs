//! Wire directives carried in struct tags.
//!
//! A field's `cbor` tag takes priority over its `json` tag. Tag values are
//! `name,flag,flag...`:
//! - `cbor:",toarray"` (empty name) marks the struct as a positional tuple;
//!   the marker field itself is not on the wire
//! - `cbor:"name"` renames; no flags are accepted
//! - `json:"name,omitempty"` renames and makes the member optional
//! - `-` as the whole value drops the field

use typeport_core::{Field, StructTag, TagError};

const CBOR: &str = "cbor";
const JSON: &str = "json";

/// What a single field contributes to its struct's declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum FieldPlan {
    /// Not on the wire.
    Skip,
    /// Nameless cbor entry; `to_array` requests tuple shape.
    Marker { to_array: bool },
    Member { name: String, optional: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum DirectiveError {
    Tag(TagError),
    Unsupported {
        key: &'static str,
        directive: String,
    },
}

impl From<TagError> for DirectiveError {
    fn from(err: TagError) -> Self {
        DirectiveError::Tag(err)
    }
}

/// Decide how a non-embedded field is rendered.
pub(super) fn plan(field: &Field) -> Result<FieldPlan, DirectiveError> {
    let tag = StructTag::parse(&field.tag)?;
    if let Some(value) = tag.get(CBOR) {
        return plan_cbor(value);
    }
    if let Some(value) = tag.get(JSON) {
        return plan_json(field, value);
    }
    Ok(FieldPlan::Member {
        name: field.name.clone(),
        optional: false,
    })
}

fn plan_cbor(value: &str) -> Result<FieldPlan, DirectiveError> {
    let (name, mut flags) = split(value);

    if name.is_empty() {
        let mut to_array = false;
        for flag in flags {
            match flag {
                "toarray" => to_array = true,
                other => return Err(unsupported(CBOR, other)),
            }
        }
        return Ok(FieldPlan::Marker { to_array });
    }

    if let Some(flag) = flags.next() {
        return Err(unsupported(CBOR, flag));
    }
    if name == "-" {
        return Ok(FieldPlan::Skip);
    }
    Ok(FieldPlan::Member {
        name: name.to_string(),
        optional: false,
    })
}

fn plan_json(field: &Field, value: &str) -> Result<FieldPlan, DirectiveError> {
    let (name, flags) = split(value);

    let mut optional = false;
    let mut flagged = false;
    for flag in flags {
        flagged = true;
        match flag {
            "omitempty" => optional = true,
            other => return Err(unsupported(JSON, other)),
        }
    }

    if name == "-" && !flagged {
        return Ok(FieldPlan::Skip);
    }
    let name = if name.is_empty() { &field.name } else { name };
    Ok(FieldPlan::Member {
        name: name.to_string(),
        optional,
    })
}

fn split(value: &str) -> (&str, std::str::Split<'_, char>) {
    let mut parts = value.split(',');
    let name = parts.next().unwrap_or_default();
    (name, parts)
}

fn unsupported(key: &'static str, directive: &str) -> DirectiveError {
    DirectiveError::Unsupported {
        key,
        directive: directive.to_string(),
    }
}
