use rand::Rng;
use uuid::Uuid;

use faceswipe_shared::types::{Gender, UserProfile};

/// Feed visibility rule: never the viewer themselves, never a profile
/// without a photo; viewers with gender `other` see everybody else, all
/// other viewers see only differing genders.
pub fn is_visible_to(viewer_id: Uuid, viewer_gender: Gender, candidate: &UserProfile) -> bool {
    if candidate.id == viewer_id {
        return false;
    }
    if !candidate.has_photo() {
        return false;
    }
    match viewer_gender {
        Gender::Other => true,
        gender => candidate.gender != gender,
    }
}

/// Uniform random permutation (Fisher-Yates) using the process-wide RNG.
pub fn shuffle(cards: &mut [UserProfile]) {
    let mut rng = rand::thread_rng();
    for i in (1..cards.len()).rev() {
        let j = rng.gen_range(0..=i);
        cards.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn profile(username: &str, gender: Gender, photo: bool) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            username: username.into(),
            gender,
            description: String::new(),
            photo_url: if photo { format!("https://cdn.example/{username}.jpg") } else { String::new() },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn male_viewer_sees_only_other_genders_with_photos() {
        let viewer = profile("viewer", Gender::Male, true);
        let a = profile("a", Gender::Female, true);
        let b = profile("b", Gender::Male, true);
        let c = profile("c", Gender::Female, false);

        let visible: Vec<&str> = [&a, &b, &c]
            .into_iter()
            .filter(|p| is_visible_to(viewer.id, viewer.gender, p))
            .map(|p| p.username.as_str())
            .collect();

        assert_eq!(visible, vec!["a"]);
    }

    #[test]
    fn other_viewer_sees_all_genders() {
        let viewer = profile("viewer", Gender::Other, true);
        let candidates = [
            profile("a", Gender::Female, true),
            profile("b", Gender::Male, true),
            profile("c", Gender::Other, true),
            profile("d", Gender::Female, false),
        ];

        let visible: Vec<&str> = candidates
            .iter()
            .filter(|p| is_visible_to(viewer.id, viewer.gender, p))
            .map(|p| p.username.as_str())
            .collect();

        assert_eq!(visible, vec!["a", "b", "c"]);
    }

    #[test]
    fn viewer_never_sees_themselves() {
        let viewer = profile("viewer", Gender::Other, true);
        assert!(!is_visible_to(viewer.id, viewer.gender, &viewer));
    }

    #[test]
    fn shuffle_produces_every_permutation_uniformly() {
        // 4 cards -> 24 orderings; 12_000 runs gives an expected 500 per
        // ordering. Bounds are loose enough to keep the test stable.
        let cards: Vec<UserProfile> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| profile(name, Gender::Other, true))
            .collect();

        const RUNS: usize = 12_000;
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..RUNS {
            let mut deck = cards.clone();
            shuffle(&mut deck);
            let ordering: String = deck.iter().map(|p| p.username.as_str()).collect();
            *counts.entry(ordering).or_default() += 1;
        }

        assert_eq!(counts.len(), 24, "some ordering never occurred");
        let expected = RUNS / 24;
        for (ordering, count) in counts {
            assert!(
                count > expected / 2 && count < expected * 2,
                "ordering {ordering} occurred {count} times, expected around {expected}"
            );
        }
    }

    #[test]
    fn shuffle_handles_tiny_decks() {
        let mut empty: Vec<UserProfile> = vec![];
        shuffle(&mut empty);

        let mut single = vec![profile("a", Gender::Other, true)];
        shuffle(&mut single);
        assert_eq!(single[0].username, "a");
    }
}
