//! Theme variable set.

use std::fmt::Write as _;

/// Normalize a table key into a custom property name.
#[must_use]
pub fn variable_name(key: &str) -> String {
    let key = key.trim();
    if key.starts_with("--") {
        key.to_owned()
    } else {
        format!("--{key}")
    }
}

/// Ordered set of CSS custom properties.
///
/// Names are unique: inserting an existing name overwrites its value in place,
/// so the last row for a key wins while the first row fixes its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeVariables {
    entries: Vec<(String, String)>,
}

impl ThemeVariables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. Rows with an empty key or value are skipped.
    ///
    /// Returns whether the row was kept.
    pub fn insert(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        if key.trim().is_empty() || value.is_empty() {
            return false;
        }
        let name = variable_name(key);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => value.clone_into(&mut entry.1),
            None => self.entries.push((name, value.to_owned())),
        }
        true
    }

    /// Value of `name`, with or without the `--` prefix.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = variable_name(name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize as a `:root` rule.
    ///
    /// ```
    /// use bw_theme::ThemeVariables;
    ///
    /// let vars: ThemeVariables = [("accent", "#f00")].into_iter().collect();
    /// assert_eq!(vars.to_css(), ":root {\n  --accent: #f00;\n}");
    /// ```
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.entries {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push('}');
        css
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for ThemeVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        vars.extend(iter);
        vars
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Extend<(K, V)> for ThemeVariables {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value.as_ref());
        }
    }
}
