//! Ranking of the caller's progress against friends' goal summaries.

use uuid::Uuid;

/// One participant's progress summary, as shown in the comparison panel.
#[derive(Debug, Clone)]
pub struct ComparisonEntry {
    pub user_id: Uuid,
    pub user_name: String,
    pub goal_id: Uuid,
    pub goal_name: String,
    pub total_cash: f64,
    pub total_pix: f64,
    pub total_amount: f64,
    pub progress_percentage: f64,
    pub estimated_days: i64,
    pub is_self: bool,
}

/// Display marker for the top of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBadge {
    /// First place; rendered as a trophy.
    Leader,
    /// Second or third place; rendered as the 1-based position number.
    Position(usize),
}

#[derive(Debug, Clone)]
pub struct RankedComparison {
    pub entry: ComparisonEntry,
    /// 0-based rank after sorting.
    pub rank: usize,
    pub badge: Option<RankBadge>,
}

pub struct ComparisonService;

impl ComparisonService {
    /// Sorts entries descending by progress percentage (stable, so equal
    /// percentages keep their incoming order) and assigns display badges.
    pub fn rank(mut entries: Vec<ComparisonEntry>) -> Vec<RankedComparison> {
        entries.sort_by(|a, b| b.progress_percentage.total_cmp(&a.progress_percentage));
        entries
            .into_iter()
            .enumerate()
            .map(|(rank, entry)| {
                let badge = match rank {
                    0 => Some(RankBadge::Leader),
                    1 | 2 => Some(RankBadge::Position(rank + 1)),
                    _ => None,
                };
                RankedComparison { entry, rank, badge }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, percentage: f64) -> ComparisonEntry {
        ComparisonEntry {
            user_id: Uuid::new_v4(),
            user_name: name.into(),
            goal_id: Uuid::new_v4(),
            goal_name: format!("{name}'s goal"),
            total_cash: 0.0,
            total_pix: 0.0,
            total_amount: 0.0,
            progress_percentage: percentage,
            estimated_days: 0,
            is_self: false,
        }
    }

    #[test]
    fn sorts_descending_with_leader_badge() {
        let ranked = ComparisonService::rank(vec![
            entry("Maria", 72.0),
            entry("Pedro", 90.0),
            entry("Ana", 100.0),
        ]);

        let percentages: Vec<f64> = ranked
            .iter()
            .map(|r| r.entry.progress_percentage)
            .collect();
        assert_eq!(percentages, vec![100.0, 90.0, 72.0]);
        assert_eq!(ranked[0].badge, Some(RankBadge::Leader));
        assert_eq!(ranked[1].badge, Some(RankBadge::Position(2)));
        assert_eq!(ranked[2].badge, Some(RankBadge::Position(3)));
    }

    #[test]
    fn ties_keep_incoming_order() {
        let ranked = ComparisonService::rank(vec![
            entry("First", 50.0),
            entry("Second", 50.0),
            entry("Winner", 80.0),
        ]);

        assert_eq!(ranked[0].entry.user_name, "Winner");
        assert_eq!(ranked[1].entry.user_name, "First");
        assert_eq!(ranked[2].entry.user_name, "Second");
    }

    #[test]
    fn nan_percentage_ranks_deterministically() {
        // Peer summaries come from outside; a NaN percentage must not break
        // the sort's total order.
        let ranked = ComparisonService::rank(vec![
            entry("Maria", 72.0),
            entry("Broken", f64::NAN),
            entry("Pedro", 90.0),
        ]);

        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].entry.user_name, "Broken");
        assert_eq!(ranked[1].entry.user_name, "Pedro");
        assert_eq!(ranked[2].entry.user_name, "Maria");
    }

    #[test]
    fn fourth_place_gets_no_badge() {
        let ranked = ComparisonService::rank(vec![
            entry("A", 90.0),
            entry("B", 80.0),
            entry("C", 70.0),
            entry("D", 60.0),
        ]);
        assert_eq!(ranked[3].badge, None);
        assert_eq!(ranked[3].rank, 3);
    }
}
