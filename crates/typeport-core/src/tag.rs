//! Struct tag parsing.
//!
//! A tag is a space-separated list of `key:"value"` pairs, e.g.
//! `json:"height,omitempty" cbor:",toarray"`. Values are double-quoted with
//! backslash escapes. Unlike lenient tag readers, malformed tags are errors:
//! a tag that cannot be read must not be mistaken for "no directives".

/// Error while reading a struct tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("malformed tag `{tag}`: expected `key:\"value\"` at offset {offset}")]
    Malformed { tag: String, offset: usize },

    #[error("malformed tag `{tag}`: unterminated value for key `{key}`")]
    Unterminated { tag: String, key: String },

    #[error("malformed tag `{tag}`: invalid escape `\\{escape}`")]
    InvalidEscape { tag: String, escape: char },
}

/// Parsed struct tag: ordered `(key, value)` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructTag {
    entries: Vec<(String, String)>,
}

impl StructTag {
    pub fn parse(tag: &str) -> Result<Self, TagError> {
        let bytes = tag.as_bytes();
        let mut entries = Vec::new();
        let mut pos = 0;

        loop {
            while pos < bytes.len() && bytes[pos] == b' ' {
                pos += 1;
            }
            if pos >= bytes.len() {
                break;
            }

            let key_start = pos;
            while pos < bytes.len() && is_key_byte(bytes[pos]) {
                pos += 1;
            }
            if pos == key_start
                || pos + 1 >= bytes.len()
                || bytes[pos] != b':'
                || bytes[pos + 1] != b'"'
            {
                return Err(TagError::Malformed {
                    tag: tag.to_string(),
                    offset: pos,
                });
            }
            let key = &tag[key_start..pos];
            pos += 2;

            let value_start = pos;
            while pos < bytes.len() && bytes[pos] != b'"' {
                if bytes[pos] == b'\\' {
                    pos += 1;
                }
                pos += 1;
            }
            if pos >= bytes.len() {
                return Err(TagError::Unterminated {
                    tag: tag.to_string(),
                    key: key.to_string(),
                });
            }
            let value = unescape(tag, &tag[value_start..pos])?;
            pos += 1;

            entries.push((key.to_string(), value));
        }

        Ok(Self { entries })
    }

    /// Value of the first entry with `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn is_key_byte(b: u8) -> bool {
    b > b' ' && b != b':' && b != b'"' && b != 0x7f
}

fn unescape(tag: &str, raw: &str) -> Result<String, TagError> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => {
                return Err(TagError::InvalidEscape {
                    tag: tag.to_string(),
                    escape: other,
                });
            }
            None => {
                return Err(TagError::InvalidEscape {
                    tag: tag.to_string(),
                    escape: ' ',
                });
            }
        }
    }
    Ok(out)
}
