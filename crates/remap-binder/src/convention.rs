//! The naming-convention seam and the default flattening matcher.

use remap_model::{MemberPath, TypeId, TypeTable};
use smallvec::smallvec;

/// Proposes candidate source member chains for one destination name.
///
/// Returns zero or more chains, best first; the binder takes the first
/// candidate when it convention-matches a parameter.
pub trait ConventionMatcher {
    fn match_parameter(&self, table: &TypeTable, source: TypeId, name: &str) -> Vec<MemberPath>;
}

/// Default convention: case-insensitive direct member match, then recursive
/// prefix-split flattening, so `orderTotal` can match member `order`
/// followed by that member's type's `total`.
///
/// Deterministic ordering: the direct match comes first, then split
/// candidates by ascending prefix length.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameMatcher;

impl ConventionMatcher for NameMatcher {
    fn match_parameter(&self, table: &TypeTable, source: TypeId, name: &str) -> Vec<MemberPath> {
        let mut candidates = Vec::new();
        if let Some(member) = table.find_member(source, name) {
            candidates.push(smallvec![member]);
        }
        // Splits at the full length would repeat the direct match above.
        for split in 1..name.len() {
            if !name.is_char_boundary(split) {
                continue;
            }
            let (prefix, rest) = name.split_at(split);
            let Some(member) = table.find_member(source, prefix) else {
                continue;
            };
            for tail in self.match_parameter(table, table.member(member).ty, rest) {
                let mut chain: MemberPath = smallvec![member];
                chain.extend(tail);
                candidates.push(chain);
            }
        }
        candidates
    }
}
