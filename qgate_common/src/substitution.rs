//! Template substitutions.
//!
//! Calibration and display parameters never appear in the shell directives.
//! They reach the EPICS records through the controller and axis templates,
//! one [`SubstitutionRow`] per descriptor, written out as a `.substitutions`
//! file by [`SubstitutionFile`].

use std::fmt;

/// Macro values for one instantiation of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRow {
    /// Template file name.
    pub template: &'static str,
    /// Macro name/value pairs in column order.
    pub macros: Vec<(&'static str, String)>,
}

impl SubstitutionRow {
    /// Start an empty row for `template`.
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            macros: Vec::new(),
        }
    }

    /// Append a macro.
    pub fn with(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.macros.push((name, value.to_string()));
        self
    }

    /// Value of macro `name`, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.macros
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.macros.iter().map(|(k, _)| *k)
    }
}

/// A complete `.substitutions` file.
///
/// Rows are grouped by template in order of first appearance. Every row of a
/// template shares the column layout of the first row for that template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionFile {
    rows: Vec<SubstitutionRow>,
}

impl SubstitutionFile {
    /// Create an empty file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row.
    pub fn push(&mut self, row: SubstitutionRow) {
        self.rows.push(row);
    }

    /// Rows for one template.
    pub fn for_template<'a>(
        &'a self,
        template: &'a str,
    ) -> impl Iterator<Item = &'a SubstitutionRow> + 'a {
        self.rows.iter().filter(move |r| r.template == template)
    }

    /// True when no rows were added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn templates(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.template) {
                seen.push(row.template);
            }
        }
        seen
    }
}

impl fmt::Display for SubstitutionFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for template in self.templates() {
            let mut rows = self.for_template(template).peekable();
            let Some(first) = rows.peek() else {
                continue;
            };
            let columns: Vec<&str> = first.names().collect();

            writeln!(f, "file \"{template}\"")?;
            writeln!(f, "{{")?;
            writeln!(f, "pattern")?;
            writeln!(f, "{{ {} }}", columns.join(", "))?;
            for row in rows {
                let values: Vec<String> = columns
                    .iter()
                    .map(|c| format!("\"{}\"", escape(row.get(c).unwrap_or_default())))
                    .collect();
                writeln!(f, "{{ {} }}", values.join(", "))?;
            }
            writeln!(f, "}}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Backslash-escape `\` and `"` for a double-quoted macro value.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
