//! Module-name derivation from qualified names.

use std::collections::BTreeSet;

/// Collects the distinct module segments of `names`, sorted.
///
/// Bare names without a dot are not attributable to a module and are
/// skipped.
pub fn modules_of<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            name.as_ref()
                .split_once('.')
                .map(|(module, _)| module.to_owned())
        })
        .filter(|module| !module.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Collects the distinct owning modules of `names`, sorted, where a bare name
/// owns itself.
pub fn owners_of<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            let owner = name.split_once('.').map_or(name, |(module, _)| module);
            (!owner.is_empty()).then(|| owner.to_owned())
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_sorted_modules() {
        assert_eq!(
            modules_of(["user.info", "sys.doc", "sys.list_functions"]),
            ["sys", "user"]
        );
    }

    #[test]
    fn bare_names_are_excluded() {
        assert!(modules_of(["bare"]).is_empty());
    }

    #[test]
    fn splits_on_first_dot() {
        assert_eq!(modules_of(["cp.get.file"]), ["cp"]);
    }

    #[test]
    fn bare_names_own_themselves() {
        assert_eq!(owners_of(["yaml", "jinja", "json", "jinja"]), ["jinja", "json", "yaml"]);
        assert_eq!(owners_of(["py.render", "py"]), ["py"]);
        assert!(owners_of([".hidden"]).is_empty());
    }
}
