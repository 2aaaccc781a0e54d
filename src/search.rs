use crate::db::Question;

/// Keeps the questions whose text contains `term`, ignoring case.
///
/// Order is preserved. Callers treat an empty term as "no search requested" and never get here
/// with one.
pub fn search(term: &str, questions: Vec<Question>) -> Vec<Question> {
    let needle = term.to_lowercase();
    questions
        .into_iter()
        .filter(|q| q.question.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, text: &str) -> Question {
        Question {
            id,
            question: text.to_owned(),
            answer: String::new(),
            category: 1,
            difficulty: 1,
        }
    }

    #[test]
    fn matches_regardless_of_case() {
        let questions = vec![
            question(1, "What movie earned Tom Hanks his Title role?"),
            question(2, "Which planet is largest?"),
            question(3, "whose autobiography is entitled 'I Know Why the Caged Bird Sings'?"),
        ];
        let ids: Vec<i64> = search("title", questions).into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn upper_case_term_matches_lower_case_text() {
        let found = search("PLANET", vec![question(2, "Which planet is largest?")]);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn wildcard_characters_are_literal() {
        let questions = vec![question(1, "100% of what?"), question(2, "Anything")];
        let ids: Vec<i64> = search("%", questions).into_iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn no_match_is_empty() {
        assert!(search("zebra", vec![question(1, "Which planet is largest?")]).is_empty());
    }
}
