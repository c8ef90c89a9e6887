//! Output rendering methods.

use std::borrow::Cow;

use super::{Config, Declaration, Member, Registry};

impl Registry {
    /// Concatenate every declaration in emission order, no blank lines
    /// between them.
    pub fn render(&self, config: &Config) -> String {
        let mut out = String::new();
        for (reference, decl) in self.declarations() {
            decl.render_into(reference, config, &mut out);
        }
        out
    }
}

impl Declaration {
    /// Render the full declaration text for `reference`.
    pub fn render(&self, reference: &str, config: &Config) -> String {
        let mut out = String::new();
        self.render_into(reference, config, &mut out);
        out
    }

    fn render_into(&self, reference: &str, config: &Config, out: &mut String) {
        let c = config.colors;
        if config.export {
            out.push_str(&format!("{}export{} ", c.dim, c.reset));
        }

        match self {
            Declaration::Interface { extends, members } => {
                out.push_str(&format!(
                    "{}interface{} {}{}{}",
                    c.dim, c.reset, c.blue, reference, c.reset
                ));
                if let Some(base) = extends {
                    out.push_str(&format!(
                        " {}extends{} {}{}{}",
                        c.dim, c.reset, c.blue, base, c.reset
                    ));
                }
                out.push_str(&format!(" {}{{{}\n", c.dim, c.reset));
                for member in members {
                    let marker = if member.optional { "?" } else { "" };
                    out.push_str(&format!(
                        "{}{}{}{}:{} {}{};{}\n",
                        config.indent,
                        property_key(&member.name),
                        c.dim,
                        marker,
                        c.reset,
                        member.ty,
                        c.dim,
                        c.reset
                    ));
                }
                out.push_str(&format!("{}}}{}\n", c.dim, c.reset));
            }
            Declaration::Tuple { members } => {
                out.push_str(&format!(
                    "{}type{} {}{}{} {}= [{}\n",
                    c.dim, c.reset, c.blue, reference, c.reset, c.dim, c.reset
                ));
                for Member { name, ty, .. } in members {
                    out.push_str(&format!(
                        "{}{}{}:{} {}{},{}\n",
                        config.indent, name, c.dim, c.reset, ty, c.dim, c.reset
                    ));
                }
                out.push_str(&format!("{}];{}\n", c.dim, c.reset));
            }
            Declaration::EmptyMap => {
                out.push_str(&format!(
                    "{}type{} {}{}{} {}={} Map<never, never>{};{}\n",
                    c.dim, c.reset, c.blue, reference, c.reset, c.dim, c.reset, c.dim, c.reset
                ));
            }
        }
    }
}

/// Record member names that are not plain identifiers are quoted.
pub(super) fn property_key(name: &str) -> Cow<'_, str> {
    if is_identifier(name) {
        return Cow::Borrowed(name);
    }
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for ch in name.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
}
