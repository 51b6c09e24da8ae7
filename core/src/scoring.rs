use crate::models::RankedCandidate;

/// Ranks candidate answers against a reference popularity.
///
/// Each candidate is scored by the absolute difference between its popularity
/// and `reference`; the output is sorted ascending by that diff. The sort is
/// stable, so candidates with equal diffs keep their input order. Candidates
/// with an empty (or whitespace-only) name are skipped.
pub fn rank_candidates<I, S>(reference: u8, candidates: I) -> Vec<RankedCandidate>
where
    I: IntoIterator<Item = (S, u8)>,
    S: Into<String>,
{
    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .map(|(name, popularity)| (name.into(), popularity))
        .filter(|(name, _)| !name.trim().is_empty())
        .map(|(name, popularity)| RankedCandidate {
            name,
            popularity,
            diff: reference.abs_diff(popularity),
        })
        .collect();

    ranked.sort_by_key(|candidate| candidate.diff);
    ranked
}

/// The winner is the closest candidate, i.e. the first element of a ranked
/// sequence. `None` when no valid candidates were entered.
pub fn winner(ranked: &[RankedCandidate]) -> Option<&RankedCandidate> {
    ranked.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_is_sorted_non_decreasing() {
        let ranked = rank_candidates(50, vec![("a", 10u8), ("b", 90), ("c", 55), ("d", 48)]);

        for pair in ranked.windows(2) {
            assert!(pair[0].diff <= pair[1].diff);
        }
    }

    #[test]
    fn test_reference_scenario() {
        // Theme popularity 50, candidates [40, 70, 50]:
        // diffs [10, 20, 0] -> ranked [50, 40, 70], winner diff 0.
        let ranked = rank_candidates(50, vec![("forty", 40u8), ("seventy", 70), ("fifty", 50)]);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "fifty");
        assert_eq!(ranked[0].diff, 0);
        assert_eq!(ranked[1].name, "forty");
        assert_eq!(ranked[1].diff, 10);
        assert_eq!(ranked[2].name, "seventy");
        assert_eq!(ranked[2].diff, 20);

        assert_eq!(winner(&ranked).unwrap().diff, 0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_candidates(50, vec![("above", 60u8), ("below", 40), ("exact", 50)]);

        assert_eq!(ranked[0].name, "exact");
        // 60 and 40 both have diff 10; "above" was entered first.
        assert_eq!(ranked[1].name, "above");
        assert_eq!(ranked[2].name, "below");
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let ranked = rank_candidates(30, vec![("", 30u8), ("  ", 31), ("real", 35)]);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "real");
    }

    #[test]
    fn test_no_candidates_means_no_winner() {
        let ranked = rank_candidates(80, Vec::<(String, u8)>::new());
        assert!(ranked.is_empty());
        assert!(winner(&ranked).is_none());
    }

    #[test]
    fn test_diff_extremes() {
        let ranked = rank_candidates(0, vec![("max", 100u8), ("min", 0)]);
        assert_eq!(ranked[0].diff, 0);
        assert_eq!(ranked[1].diff, 100);
    }
}
