/**
 * Final grading of a session: a percentage per enabled category, their mean, and the
 * tier that the mean falls into.
 *
 * Title and author are counts of correct answers (higher is better). The year is a
 * penalty (lower is better) and is turned into a percentage by exponential decay of
 * the average penalty per round.
 *
 * Version: October 2026
 */
use super::settings::Categories;
use super::year::UNANSWERED_PENALTY;


/// Decay constant for the year percentage: 0 years off is 100%, 70 years off on
/// average is about half.
const YEAR_DECAY: f64 = 0.01;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores {
    pub titles_correct: u32,
    pub authors_correct: u32,
    pub years_penalty: u64,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Lowest overall percentage that earns this tier.
    pub threshold: u32,
    pub caption: &'static str,
}


/// Checked from the top; the first tier whose threshold is met wins.
pub const TIERS: [Tier; 9] = [
    Tier { threshold: 95, caption: "Curator material. Nothing gets past you." },
    Tier { threshold: 90, caption: "A true connoisseur." },
    Tier { threshold: 80, caption: "You clearly know your way around a gallery." },
    Tier { threshold: 65, caption: "A well-trained eye." },
    Tier { threshold: 50, caption: "Solid, with room to grow." },
    Tier { threshold: 40, caption: "Getting there. Keep looking." },
    Tier { threshold: 30, caption: "Time for another museum visit." },
    Tier { threshold: 20, caption: "At least you recognised some of them." },
    Tier { threshold: 0, caption: "Every expert was a beginner once." },
];


#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    /// `None` when the category was not asked.
    pub title: Option<u32>,
    pub author: Option<u32>,
    pub year: Option<u32>,
    pub overall: u32,
    pub tier: Tier,
}


/// Grade `scores` accumulated over `rounds` rounds. `rounds` is the number of rounds
/// actually played, which is less than the configured total when the enabled groups
/// ran out of artworks.
pub fn grade(scores: &Scores, rounds: usize, categories: &Categories) -> Grade {
    let title = if categories.title {
        Some(count_percentage(scores.titles_correct, rounds))
    } else {
        None
    };
    let author = if categories.author {
        Some(count_percentage(scores.authors_correct, rounds))
    } else {
        None
    };
    let year = if categories.year {
        Some(year_percentage(scores.years_penalty, rounds))
    } else {
        None
    };

    let enabled: Vec<u32> = [title, author, year].iter().filter_map(|p| *p).collect();
    let overall = if enabled.is_empty() {
        0
    } else {
        let sum: u32 = enabled.iter().sum();
        (f64::from(sum) / enabled.len() as f64).round() as u32
    };

    Grade { title, author, year, overall, tier: tier_for(overall) }
}


pub fn count_percentage(correct: u32, rounds: usize) -> u32 {
    if rounds == 0 {
        return 0;
    }
    (100.0 * f64::from(correct) / rounds as f64).round() as u32
}


pub fn year_percentage(penalty: u64, rounds: usize) -> u32 {
    if rounds == 0 {
        return 0;
    }
    let average = penalty as f64 / rounds as f64;
    if average >= f64::from(UNANSWERED_PENALTY) {
        return 0;
    }
    (100.0 * (-YEAR_DECAY * average).exp()).round() as u32
}


pub fn tier_for(percentage: u32) -> Tier {
    for tier in TIERS.iter() {
        if percentage >= tier.threshold {
            return *tier;
        }
    }
    TIERS[TIERS.len() - 1]
}


#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Categories {
        Categories { title: true, author: true, year: true }
    }

    #[test]
    fn perfect_session_gets_top_tier() {
        let scores = Scores { titles_correct: 3, authors_correct: 3, years_penalty: 0 };
        let grade = grade(&scores, 3, &all());
        assert_eq!(grade.title, Some(100));
        assert_eq!(grade.author, Some(100));
        assert_eq!(grade.year, Some(100));
        assert_eq!(grade.overall, 100);
        assert_eq!(grade.tier, TIERS[0]);
    }

    #[test]
    fn count_percentages_are_rounded() {
        assert_eq!(count_percentage(1, 3), 33);
        assert_eq!(count_percentage(2, 3), 67);
        assert_eq!(count_percentage(0, 7), 0);
        assert_eq!(count_percentage(0, 0), 0);
    }

    #[test]
    fn year_percentage_decays_with_average_penalty() {
        assert_eq!(year_percentage(0, 3), 100);
        assert_eq!(year_percentage(30, 3), 90);
        assert_eq!(year_percentage(100, 1), 37);
        assert_eq!(year_percentage(70, 1), 50);
        assert_eq!(tier_for(year_percentage(70, 1)).threshold, 50);
        assert!(year_percentage(75, 1) < 50);
    }

    #[test]
    fn unanswered_average_scores_zero() {
        assert_eq!(year_percentage(500, 1), 0);
        assert_eq!(year_percentage(1500, 3), 0);
        assert_eq!(year_percentage(4000, 3), 0);
        assert!(year_percentage(499, 1) > 0);
    }

    #[test]
    fn disabled_categories_are_left_out_of_the_mean() {
        let scores = Scores { titles_correct: 1, authors_correct: 0, years_penalty: 0 };
        let categories = Categories { title: true, author: false, year: true };
        let grade = grade(&scores, 1, &categories);
        assert_eq!(grade.author, None);
        assert_eq!(grade.overall, 100);

        let grade_all = super::grade(&scores, 1, &all());
        assert_eq!(grade_all.overall, 67);
    }

    #[test]
    fn tiers_are_checked_from_the_top() {
        assert_eq!(tier_for(100).threshold, 95);
        assert_eq!(tier_for(95).threshold, 95);
        assert_eq!(tier_for(94).threshold, 90);
        assert_eq!(tier_for(65).threshold, 65);
        assert_eq!(tier_for(64).threshold, 50);
        assert_eq!(tier_for(20).threshold, 20);
        assert_eq!(tier_for(19).threshold, 0);
        assert_eq!(tier_for(0).threshold, 0);
    }
}
