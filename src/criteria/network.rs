use crate::{profile::NetworkDatum, Normalized, Score};

/// Score when nothing is known about the connection.
pub const NEUTRAL: f64 = 50.0;

/// Direct connections occupy [70, 100] and indirect ones [0, 60], so any direct connection
/// outranks any indirect one.
const DIRECT_FLOOR: f64 = 70.0;
const INDIRECT_CEILING: f64 = 60.0;
/// Mutual connections beyond this count add nothing further.
const MUTUAL_SATURATION: u32 = 10;

pub fn score(datum: Option<&NetworkDatum>) -> Score {
    let Some(datum) = datum else {
        return Score::saturating(NEUTRAL);
    };
    let strength = if datum.connection_strength.is_finite() {
        Normalized::saturating(datum.connection_strength / 100.0)
    } else {
        Normalized::ZERO
    };
    if datum.is_direct_connection {
        return Score::saturating(DIRECT_FLOOR + (100.0 - DIRECT_FLOOR) * strength.as_f64());
    }
    let mutual = datum.mutual_connections.min(MUTUAL_SATURATION) as f64 / MUTUAL_SATURATION as f64;
    Score::saturating(INDIRECT_CEILING * (0.5 * mutual + 0.5 * strength.as_f64()))
}
