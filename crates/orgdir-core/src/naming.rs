//! Partition naming — deterministic mapping from a human-readable
//! organization name to a storage-safe partition identifier.

/// Namespace tag prefixed to every partition identifier.
pub const PARTITION_PREFIX: &str = "org_";

/// Reduce a name to lowercase `[a-z0-9]` words joined by single `_`.
///
/// Trims surrounding whitespace, lower-cases, collapses every maximal
/// run of characters outside `[a-z0-9]` into one underscore, and strips
/// leading/trailing underscores. Idempotent over its own output.
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Derive the partition identifier for an organization name.
///
/// Deterministic and pure: the same name always yields the same
/// identifier. Distinct names may still collide (e.g. `"Acme Corp"`
/// and `"acme-corp"`); collisions are caught by the directory's
/// uniqueness constraint on `partition_id`, not here.
pub fn partition_id(name: &str) -> String {
    format!("{PARTITION_PREFIX}{}", sanitize(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_name() {
        assert_eq!(partition_id("Acme Corp"), "org_acme_corp");
    }

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(partition_id("  Acme Corp  "), "org_acme_corp");
        assert_eq!(partition_id("ACME"), "org_acme");
    }

    #[test]
    fn collapses_symbol_runs() {
        assert_eq!(partition_id("Acme -- Corp!!"), "org_acme_corp");
        assert_eq!(partition_id("a...b---c"), "org_a_b_c");
    }

    #[test]
    fn strips_edge_separators() {
        assert_eq!(partition_id("--Acme--"), "org_acme");
    }

    #[test]
    fn digits_are_kept() {
        assert_eq!(partition_id("Org 42"), "org_org_42");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in ["Acme Corp", "  A--B  ", "ACME!!", "a1 b2 c3"] {
            let once = sanitize(name);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn symbol_only_name_yields_empty_stem() {
        assert_eq!(sanitize("!!!"), "");
        assert_eq!(partition_id("!!!"), "org_");
    }

    #[test]
    fn deterministic() {
        assert_eq!(partition_id("New Acme"), partition_id("New Acme"));
    }
}
