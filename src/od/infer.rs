use ahash::AHashMap;

use crate::swipe::SwipeRecord;

use super::{Endpoint, OdPair};

/// Parameters of the first-gap heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct OdParams {
    /// Minimum hours between origin and destination swipes.
    pub min_gap_hours: f64,
}

impl Default for OdParams {
    fn default() -> Self { Self { min_gap_hours: 3.0 } }
}

/// Pick the OD pair of one card from its eligible swipes, already ordered by hour.
///
/// The origin is the first swipe. The destination is the first later swipe at least
/// `min_gap_hours` after the origin and at a different position.
pub fn select_pair(swipes: &[&SwipeRecord], params: &OdParams) -> Option<OdPair> {
    if swipes.len() < 2 { return None }

    let origin = swipes[0];
    let origin_hora = origin.hora?;
    let destination = swipes[1..].iter().find(|s| {
        s.hora.is_some_and(|h| h >= origin_hora + params.min_gap_hours)
            && s.position() != origin.position()
    })?;

    Some(OdPair {
        id_tarjeta: origin.id_tarjeta.clone(),
        origin: Endpoint::from_swipe(origin, origin_hora),
        destination: Endpoint::from_swipe(destination, destination.hora?),
    })
}

/// Build at most one OD pair per card. Cards appear in order of their first eligible swipe.
pub fn infer_od_pairs(swipes: &[SwipeRecord], params: &OdParams) -> Vec<OdPair> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut cards: Vec<Vec<&SwipeRecord>> = Vec::new();

    for swipe in swipes.iter().filter(|s| s.is_od_eligible()) {
        let slot = *index.entry(swipe.id_tarjeta.as_str()).or_insert_with(|| {
            cards.push(Vec::new());
            cards.len() - 1
        });
        cards[slot].push(swipe);
    }

    cards.into_iter()
        .filter_map(|mut card| {
            // Stable: equal hours keep input order.
            card.sort_by(|a, b| a.hora.partial_cmp(&b.hora).unwrap_or(std::cmp::Ordering::Equal));
            select_pair(&card, params)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: (f64, f64) = (-34.60, -58.40);
    const B: (f64, f64) = (-34.55, -58.45);
    const C: (f64, f64) = (-34.65, -58.38);

    fn swipe(card: &str, hora: f64, at: (f64, f64)) -> SwipeRecord {
        SwipeRecord {
            id_tarjeta: card.into(),
            lat: at.0,
            lon: at.1,
            etapa_red_sube: Some(0),
            hora: Some(hora),
            modo: Some(format!("m{hora}")),
            ..Default::default()
        }
    }

    #[test]
    fn first_swipe_past_the_gap_at_a_new_place_is_the_destination() {
        let swipes = vec![swipe("X", 7.0, A), swipe("X", 8.0, A), swipe("X", 13.0, B)];
        let pairs = infer_od_pairs(&swipes, &OdParams::default());
        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.id_tarjeta, "X");
        assert_eq!((pair.origin.position.lat, pair.origin.hora), (A.0, 7.0));
        assert_eq!((pair.destination.position.lat, pair.destination.hora), (B.0, 13.0));
        assert!(pair.gap_hours() >= 3.0);
    }

    #[test]
    fn gap_too_short_yields_nothing() {
        let swipes = vec![swipe("X", 7.0, A), swipe("X", 9.0, B)];
        assert!(infer_od_pairs(&swipes, &OdParams::default()).is_empty());
    }

    #[test]
    fn single_swipe_yields_nothing() {
        let swipes = vec![swipe("X", 7.0, A)];
        assert!(infer_od_pairs(&swipes, &OdParams::default()).is_empty());
    }

    #[test]
    fn same_position_after_the_gap_is_skipped() {
        let swipes = vec![swipe("X", 7.0, A), swipe("X", 12.0, A), swipe("X", 14.0, C)];
        let pairs = infer_od_pairs(&swipes, &OdParams::default());
        assert_eq!(pairs[0].destination.hora, 14.0);
    }

    #[test]
    fn gap_is_tunable() {
        let swipes = vec![swipe("X", 7.0, A), swipe("X", 9.0, B)];
        let pairs = infer_od_pairs(&swipes, &OdParams { min_gap_hours: 2.0 });
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn input_order_does_not_matter_across_hours() {
        let swipes = vec![swipe("X", 13.0, B), swipe("X", 7.0, A)];
        let pairs = infer_od_pairs(&swipes, &OdParams::default());
        assert_eq!(pairs[0].origin.hora, 7.0);
    }

    #[test]
    fn ties_keep_input_order() {
        let mut first = swipe("X", 13.0, B);
        first.modo = Some("first".into());
        let mut second = swipe("X", 13.0, C);
        second.modo = Some("second".into());
        let swipes = vec![swipe("X", 7.0, A), first, second];
        let pairs = infer_od_pairs(&swipes, &OdParams::default());
        assert_eq!(pairs[0].destination.modo.as_deref(), Some("first"));
    }

    #[test]
    fn ineligible_stages_are_ignored() {
        let mut transfer = swipe("X", 13.0, B);
        transfer.etapa_red_sube = Some(1);
        let swipes = vec![swipe("X", 7.0, A), transfer];
        assert!(infer_od_pairs(&swipes, &OdParams::default()).is_empty());
    }

    #[test]
    fn one_pair_per_card() {
        let swipes = vec![
            swipe("X", 7.0, A), swipe("Y", 6.0, C), swipe("X", 13.0, B),
            swipe("X", 18.0, C), swipe("Y", 12.0, A), swipe("Z", 8.0, A),
        ];
        let pairs = infer_od_pairs(&swipes, &OdParams::default());
        let cards = pairs.iter().map(|p| p.id_tarjeta.as_str()).collect::<Vec<_>>();
        assert_eq!(cards, vec!["X", "Y"]);
        assert_eq!(pairs[0].destination.hora, 13.0);
    }
}
