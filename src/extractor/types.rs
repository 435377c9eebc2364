use indexmap::IndexMap;
use serde::Serialize;

/// A function definition with its full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionBody {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    /// Header through closing brace.
    pub text: String,
    /// Text between the braces.
    pub body: String,
    /// Line of the opening brace; `body` starts on this line.
    pub body_line: usize,
}

/// One parsed struct member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Type tokens with whitespace collapsed, e.g. `const char *`.
    pub ty: String,
    pub name: String,
    /// Array suffix such as `[MAX_CARDS]`, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<String>,
    /// Declaration as written, trimmed, comments removed.
    pub declaration: String,
    pub line: usize,
}

impl Field {
    /// Compare the type ignoring all whitespace, so `char*` equals `char *`.
    #[must_use]
    pub fn type_matches(&self, expected: &str) -> bool {
        strip_whitespace(&self.ty) == strip_whitespace(expected)
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A struct definition and the fields that could be parsed.
///
/// Declarations the parser does not understand (function pointers, nested
/// anonymous aggregates, bitfields, several declarators on one line) are left
/// out. A field being present is reliable; a field being absent is only a hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDef {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
    pub fields: Vec<Field>,
}

impl StructDef {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// An enum definition. `values` maps each enumerator to its line, in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
    pub values: IndexMap<String, usize>,
}

impl EnumDef {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains_key(value)
    }

    pub fn value_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Any construct the extractor can locate by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralElement {
    Function(FunctionBody),
    Struct(StructDef),
    Enum(EnumDef),
}

impl StructuralElement {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Struct(s) => &s.name,
            Self::Enum(e) => &e.name,
        }
    }

    #[must_use]
    pub const fn start_line(&self) -> usize {
        match self {
            Self::Function(f) => f.start_line,
            Self::Struct(s) => s.start_line,
            Self::Enum(e) => e.start_line,
        }
    }

    #[must_use]
    pub const fn end_line(&self) -> usize {
        match self {
            Self::Function(f) => f.end_line,
            Self::Struct(s) => s.end_line,
            Self::Enum(e) => e.end_line,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Function(f) => &f.text,
            Self::Struct(s) => &s.text,
            Self::Enum(e) => &e.text,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Function(_) => "function",
            Self::Struct(_) => "struct",
            Self::Enum(_) => "enum",
        }
    }
}
