//! The string literal table: interned string contents and their generated
//! labels, placed in the data region that follows the machine code.

/// One interned string literal.
pub struct StringEntry {
    pub label: String,
    pub content: String,
}

/// Ordered list of string literals collected while lowering a program.
/// Labels are generated as `str_N` per the symbol-table design.
#[derive(Default)]
pub struct StringTable {
    entries: Vec<StringEntry>,
}

impl StringTable {
    pub fn new() -> Self {
        StringTable::default()
    }

    /// Interns `content`, returning its label. Repeated identical literals
    /// are not deduplicated: each call site gets its own entry, matching
    /// the symbol table's "ordered list" description rather than a map.
    pub fn intern(&mut self, content: &str) -> String {
        let label = format!("str_{}", self.entries.len());
        self.entries.push(StringEntry { label: label.clone(), content: content.to_string() });
        label
    }

    pub fn entries(&self) -> &[StringEntry] {
        &self.entries
    }
}
