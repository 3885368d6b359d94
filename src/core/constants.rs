//! Protocol constants shared by every scenario.

/// Thresholds and fixed figures of the BB84 model.
pub mod qkd_constants {
    /// QBER at or above which a key is classified insecure (Holevo-bound convention).
    pub const SECURITY_THRESHOLD: f64 = 0.11;
    /// Expected bit-flip rate on intercepted transmissions: wrong basis (1/2) × wrong outcome (1/2).
    pub const INTERCEPT_DISTURBANCE: f64 = 0.25;
    /// Margin over the channel's own error rate beyond which eavesdropping is flagged.
    pub const EAVESDROP_DETECTION_MARGIN: f64 = 0.1;
    /// QBER below which a noisy channel is still reported as good quality.
    pub const GOOD_CHANNEL_QBER: f64 = 0.05;
    /// Default cap on qubits in the detailed per-position breakdown.
    pub const DETAILED_QUBIT_CAP: usize = 20;
    /// Longest sifted key string returned before truncation.
    pub const KEY_DISPLAY_LIMIT: usize = 100;
}
