use crate::FeatureVector;

/// Cosine similarity over the union of keys of two sparse vectors.
///
/// Keys present on one side only contribute weight 0 on the other. Returns 0.0
/// whenever either vector has zero magnitude, so callers never divide by zero.
pub fn cosine_similarity(left: &FeatureVector, right: &FeatureVector) -> f64 {
    let mut dot = 0.0;
    let mut left_mag = 0.0;
    let mut right_mag = 0.0;

    for (key, l) in left {
        left_mag += l * l;
        if let Some(r) = right.get(key) {
            dot += l * r;
        }
    }
    for r in right.values() {
        right_mag += r * r;
    }

    if left_mag == 0.0 || right_mag == 0.0 {
        return 0.0;
    }

    dot / (left_mag.sqrt() * right_mag.sqrt())
}
