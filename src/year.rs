/**
 * Turning a year guess into a penalty: the distance in years to the artwork's date
 * range, or a flat penalty when nothing usable was entered.
 *
 * Version: October 2026
 */
use super::artwork::YearRange;


/// Charged when the year is left blank or is not a number.
pub const UNANSWERED_PENALTY: u32 = 500;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearScore {
    pub penalty: u32,
    pub within_range: bool,
    /// `false` when the guess was blank or not a number.
    pub answered: bool,
}


impl YearScore {
    /// The feedback shown after a round, or `None` when the guess was inside the
    /// range.
    pub fn deviation_label(&self) -> Option<String> {
        if !self.answered {
            Some(format!("penalty: +{}", self.penalty))
        } else if self.within_range {
            None
        } else {
            Some(format!("+{}", self.penalty))
        }
    }
}


pub fn score_year(guess: &str, range: &YearRange) -> YearScore {
    let year = match leading_year(guess) {
        Some(year) => year,
        None => {
            return YearScore {
                penalty: UNANSWERED_PENALTY,
                within_range: false,
                answered: false,
            };
        }
    };

    let penalty = if range.contains(year) {
        0
    } else if year < range.start() {
        distance(range.start(), year)
    } else {
        distance(year, range.end())
    };
    YearScore { penalty, within_range: penalty == 0, answered: true }
}


/// Read the integer at the start of `guess`, ignoring anything after its digits, so
/// "1505 AD" and "1889." are read as years. `None` if there are no leading digits or
/// the number does not fit.
fn leading_year(guess: &str) -> Option<i32> {
    let guess = guess.trim();
    let unsigned = guess.trim_start_matches(|c: char| c == '+' || c == '-');
    let sign_len = guess.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits = unsigned.find(|c: char| !c.is_ascii_digit()).unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    guess[..sign_len + digits].parse::<i32>().ok()
}


fn distance(high: i32, low: i32) -> u32 {
    (i64::from(high) - i64::from(low)) as u32
}


#[cfg(test)]
mod tests {
    use super::*;

    fn mona_lisa() -> YearRange {
        YearRange::new(1503, 1506).unwrap()
    }

    #[test]
    fn guesses_inside_the_range_cost_nothing() {
        let score = score_year("1503", &mona_lisa());
        assert_eq!(score.penalty, 0);
        assert!(score.within_range);

        assert_eq!(score_year("1506", &mona_lisa()).penalty, 0);
        assert_eq!(score_year(" 1504 ", &mona_lisa()).penalty, 0);
    }

    #[test]
    fn guesses_outside_the_range_cost_the_distance() {
        let early = score_year("1500", &mona_lisa());
        assert_eq!(early.penalty, 3);
        assert!(!early.within_range);

        let late = score_year("1510", &mona_lisa());
        assert_eq!(late.penalty, 4);
        assert!(!late.within_range);

        assert_eq!(score_year("-500", &YearRange::exact(100)).penalty, 600);
    }

    #[test]
    fn missing_or_invalid_guesses_cost_the_flat_penalty() {
        for guess in &["", "   ", "abc", "c. 1500", "-", "+-1503", "99999999999"] {
            let score = score_year(guess, &mona_lisa());
            assert_eq!(score.penalty, UNANSWERED_PENALTY);
            assert!(!score.within_range);
            assert!(!score.answered);
        }
    }

    #[test]
    fn trailing_text_after_the_year_is_ignored() {
        assert_eq!(leading_year("1505 AD"), Some(1505));
        assert_eq!(leading_year("+1505"), Some(1505));
        assert_eq!(leading_year("-44 BC"), Some(-44));

        for guess in &["1503.5", "1505 AD", "1505?", "15th century"] {
            let score = score_year(guess, &mona_lisa());
            assert!(score.answered, "{} should count as answered", guess);
        }
        assert_eq!(score_year("1503.5", &mona_lisa()).penalty, 0);
        assert_eq!(score_year("1505 AD", &mona_lisa()).penalty, 0);
        assert_eq!(score_year("15th century", &mona_lisa()).penalty, 1488);

        let starry_night = score_year("1889.", &YearRange::exact(1889));
        assert!(starry_night.within_range);
        assert_eq!(starry_night.penalty, 0);
    }

    #[test]
    fn deviation_labels() {
        assert_eq!(score_year("1503", &mona_lisa()).deviation_label(), None);
        assert_eq!(
            score_year("1510", &mona_lisa()).deviation_label(),
            Some(String::from("+4"))
        );
        assert_eq!(
            score_year("", &mona_lisa()).deviation_label(),
            Some(String::from("penalty: +500"))
        );
    }
}
