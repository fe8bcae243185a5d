// crates/vouch-reputation/src/weight.rs
//
// Attestation weight from attester reputation.

/// Weight of one attestation issued by an attester with `reputation`,
/// scaled by the attester's cluster `discount`.
///
/// `log2(1 + reputation) * discount`. Logarithmic so that very high
/// reputations cannot compound without bound. Negative or NaN reputation
/// is treated as zero; discount is clamped to [0, 1] with NaN as zero.
pub fn attestation_weight(reputation: f64, discount: f64) -> f64 {
    let reputation = reputation.max(0.0);
    let discount = if discount.is_nan() {
        0.0
    } else {
        discount.clamp(0.0, 1.0)
    };
    (reputation.ln_1p() / std::f64::consts::LN_2) * discount
}

/// Weight with no cluster discount applied.
pub fn base_weight(reputation: f64) -> f64 {
    attestation_weight(reputation, 1.0)
}
