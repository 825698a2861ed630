//! Documentation aggregation and display normalisation.

use std::collections::BTreeMap;

use sysdoc_registry::Registry;

/// Documentation keyed by qualified name (and, for state registries, by bare
/// module name).
pub type DocMap = BTreeMap<String, Option<String>>;

/// Turns raw documentation into its display form.
pub trait DocNormalizer: Send + Sync {
    /// Normalises every documentation string in `docs`.
    fn normalize(&self, docs: DocMap) -> DocMap;
}

impl<F> DocNormalizer for F
where
    F: Send + Sync + Fn(DocMap) -> DocMap,
{
    fn normalize(&self, docs: DocMap) -> DocMap {
        (self)(docs)
    }
}

/// Returns documentation untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl DocNormalizer for Passthrough {
    fn normalize(&self, docs: DocMap) -> DocMap {
        docs
    }
}

/// Strips reStructuredText directives that read poorly on a terminal.
///
/// `.. code-block:: <lang>` directives are dropped wherever they end a line,
/// together with the line break and one following blank line; admonition and version directives become plain prefixes.
#[derive(Clone, Copy, Debug, Default)]
pub struct RstStripper;

const REPLACEMENTS: [(&str, &str); 4] = [
    (".. note::", "Note:"),
    (".. warning::", "Warning:"),
    (".. versionadded::", "New in version"),
    (".. versionchanged::", "Changed in version"),
];

impl RstStripper {
    /// Normalises a single documentation string.
    #[must_use]
    pub fn strip(doc: &str) -> String {
        let mut out = String::with_capacity(doc.len());
        let mut lines = doc.split_inclusive('\n').peekable();
        while let Some(line) = lines.next() {
            let mut line = match code_block_prefix(line) {
                Some(prefix) => {
                    if lines.peek() == Some(&"\n") {
                        lines.next();
                    }
                    prefix.to_owned()
                }
                None => line.to_owned(),
            };
            for (directive, plain) in REPLACEMENTS {
                if line.contains(directive) {
                    line = line.replace(directive, plain);
                }
            }
            out.push_str(&line);
        }
        out
    }
}

impl DocNormalizer for RstStripper {
    fn normalize(&self, mut docs: DocMap) -> DocMap {
        for doc in docs.values_mut().flatten() {
            *doc = Self::strip(doc);
        }
        docs
    }
}

const CODE_BLOCK: &str = ".. code-block:: ";

/// Text preceding a `.. code-block:: <lang>` directive that ends `line`, with
/// the spaces before the directive trimmed.
fn code_block_prefix(line: &str) -> Option<&str> {
    let body = line.strip_suffix('\n')?;
    body.match_indices(CODE_BLOCK).find_map(|(at, directive)| {
        let lang = &body[at + directive.len()..];
        (!lang.is_empty() && !lang.contains(char::is_whitespace))
            .then(|| body[..at].trim_end_matches(' '))
    })
}

/// Collects documentation for `names` from `registry`.
///
/// Names absent from the registry are skipped. For registries whose kind
/// carries module documentation, the owning module's doc is recorded under the
/// bare module name the first time that module is seen.
pub fn docs_for<S: AsRef<str>>(registry: &Registry, names: &[S]) -> DocMap {
    let module_docs = registry.kind().has_module_docs();
    let mut docs = DocMap::new();
    for name in names {
        let Some(entry) = registry.get(name.as_ref()) else {
            continue;
        };
        if module_docs {
            if let Some(module) = entry.name().module() {
                docs.entry(module.to_owned())
                    .or_insert_with(|| entry.module_doc().map(str::to_owned));
            }
        }
        docs.insert(
            entry.name().as_str().to_owned(),
            entry.doc().map(str::to_owned),
        );
    }
    docs
}

#[cfg(test)]
mod tests {
    use super::*;

    use sysdoc_primitives::RegistryKind;
    use sysdoc_registry::{Entry, RegistryBuilder};

    fn registry(kind: RegistryKind) -> Registry {
        Registry::builder(kind)
            .entry(
                Entry::new("service.running")
                    .unwrap()
                    .with_doc("Ensure the service is running")
                    .with_module_doc("Service state module"),
            )
            .and_then(|b| {
                b.entry(
                    Entry::new("service.dead")
                        .unwrap()
                        .with_doc("Ensure the service is dead")
                        .with_module_doc("Service state module"),
                )
            })
            .and_then(|b| b.entry(Entry::new("pkg.installed").unwrap()))
            .map(RegistryBuilder::build)
            .unwrap()
    }

    #[test]
    fn state_docs_include_module_doc_once() {
        let docs = docs_for(
            &registry(RegistryKind::State),
            &["service.dead", "service.running"],
        );
        assert_eq!(docs.len(), 3);
        assert_eq!(docs["service"].as_deref(), Some("Service state module"));
        assert_eq!(
            docs["service.running"].as_deref(),
            Some("Ensure the service is running")
        );
    }

    #[test]
    fn other_kinds_omit_module_doc() {
        let docs = docs_for(&registry(RegistryKind::Execution), &["service.running"]);
        assert_eq!(docs.keys().collect::<Vec<_>>(), ["service.running"]);
    }

    #[test]
    fn missing_docs_are_recorded_as_absent() {
        let docs = docs_for(&registry(RegistryKind::State), &["pkg.installed"]);
        assert_eq!(docs.get("pkg.installed"), Some(&None));
        assert_eq!(docs.get("pkg"), Some(&None));
    }

    #[test]
    fn strips_code_block_directive_and_blank_line() {
        let raw = "Return docs.\n\n    .. code-block:: bash\n\n        sysdoc doc 'sys.*'\n";
        assert_eq!(
            RstStripper::strip(raw),
            "Return docs.\n\n        sysdoc doc 'sys.*'\n"
        );
    }

    #[test]
    fn strips_trailing_code_block_directive_mid_line() {
        let raw = "text .. code-block:: bash\n\nnext\n";
        assert_eq!(RstStripper::strip(raw), "textnext\n");
        assert_eq!(RstStripper::strip("Example: .. code-block:: yaml\nkey: value\n"), "Example:key: value\n");
    }

    #[test]
    fn keeps_code_block_text_that_is_not_a_directive() {
        let raw = "see .. code-block:: two words\n.. code-block:: bash";
        assert_eq!(RstStripper::strip(raw), raw);
    }

    #[test]
    fn rewrites_admonitions() {
        let raw = ".. versionadded:: 2015.5.0\n.. note::\n    Be careful.\n";
        assert_eq!(
            RstStripper::strip(raw),
            "New in version 2015.5.0\nNote:\n    Be careful.\n"
        );
    }

    #[test]
    fn normalizer_leaves_absent_docs_alone() {
        let mut docs = DocMap::new();
        docs.insert("sys.doc".into(), None);
        docs.insert("sys.argspec".into(), Some(".. warning:: slow".into()));

        let docs = RstStripper.normalize(docs);
        assert_eq!(docs["sys.doc"], None);
        assert_eq!(docs["sys.argspec"].as_deref(), Some("Warning: slow"));
    }

    #[test]
    fn closures_are_normalizers() {
        let upper = |docs: DocMap| -> DocMap {
            docs.into_iter()
                .map(|(name, doc)| (name, doc.map(|d| d.to_uppercase())))
                .collect()
        };
        let mut docs = DocMap::new();
        docs.insert("user.info".into(), Some("info".into()));
        assert_eq!(upper.normalize(docs)["user.info"].as_deref(), Some("INFO"));
    }
}
