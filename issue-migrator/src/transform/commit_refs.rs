//! Qualifying bare commit hashes with their repository.
//!
//! A comment saying "fixed in 3f7c..." links to the right commit only inside
//! the repository it was written in. Once the comment lives elsewhere the
//! hash must read `owner/repo@3f7c...` for GitHub to resolve it.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// A full 40-character SHA-1 standing on its own.
static COMMIT_HASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[0-9a-fA-F]{40}\b").expect("commit hash pattern is a valid regex")
});

/// Rewrites every bare commit hash in `text` to `owner/repo@<hash>`.
///
/// Everything that is not a hash is copied through untouched.
pub fn rewrite_commit_references(owner: &str, repo: &str, text: &str) -> String {
    COMMIT_HASH
        .replace_all(text, |caps: &Captures<'_>| {
            format!("{owner}/{repo}@{}", &caps[0])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_A: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f9012345678";
    const HASH_B: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn rewrites_single_hash() {
        let text = format!("see {HASH_A} and done");

        assert_eq!(
            rewrite_commit_references("owner", "repo", &text),
            format!("see owner/repo@{HASH_A} and done")
        );
    }

    #[test]
    fn rewrites_every_hash_in_order() {
        let text = format!("{HASH_A}, then reverted in {HASH_B}.");

        assert_eq!(
            rewrite_commit_references("acme", "api", &text),
            format!("acme/api@{HASH_A}, then reverted in acme/api@{HASH_B}.")
        );
    }

    #[test]
    fn leaves_text_without_hashes_unchanged() {
        let text = "Short sha a1b2c3d and a $dollar sign";
        assert_eq!(rewrite_commit_references("o", "r", text), text);
        assert_eq!(rewrite_commit_references("o", "r", ""), "");
    }

    #[test]
    fn ignores_longer_hex_runs() {
        let text = format!("{HASH_A}ff");
        assert_eq!(rewrite_commit_references("o", "r", &text), text);

        let glued = format!("x{HASH_A}");
        assert_eq!(rewrite_commit_references("o", "r", &glued), glued);
    }

    #[test]
    fn hash_on_its_own_line() {
        let text = format!("Fixed by\n{}\n", HASH_B.to_uppercase());

        assert_eq!(
            rewrite_commit_references("o", "r", &text),
            format!("Fixed by\no/r@{}\n", HASH_B.to_uppercase())
        );
    }
}
