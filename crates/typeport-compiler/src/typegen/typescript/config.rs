//! Configuration types for TypeScript emission.

use typeport_core::Colors;

/// Configuration for TypeScript emission.
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether to prefix declarations with `export`
    pub(crate) export: bool,
    /// Name used for 64-bit integers and timestamps
    pub(crate) long_int_type: String,
    /// Indentation for members
    pub(crate) indent: String,
    /// Color configuration for output
    pub(crate) colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: true,
            long_int_type: "longnum".to_string(),
            indent: "    ".to_string(),
            colors: Colors::OFF,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to export declarations.
    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    /// Set the TypeScript type used for 64-bit integers.
    ///
    /// The declaration of this type is left to the consumer.
    pub fn long_int_type(mut self, name: impl Into<String>) -> Self {
        self.long_int_type = name.into();
        self
    }

    /// Set the member indentation width in spaces.
    pub fn indent(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    /// Set whether to use colored output.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn long_int(&self) -> &str {
        &self.long_int_type
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }
}
