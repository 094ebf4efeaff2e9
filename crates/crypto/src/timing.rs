//! Constant-time operations.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Lengths are compared first and explicitly; a length mismatch returns
/// `false` without touching the contents. Equal-length slices are compared
/// with [`subtle::ConstantTimeEq`], so the running time does not depend on
/// the position of the first differing byte.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
