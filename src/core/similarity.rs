use crate::models::TagCasing;
use std::collections::HashSet;

/// Jaccard-style overlap between a user's tags and an item's tags (0-1)
///
/// Scoring formula:
/// score = |user tags found in item tags| / |distinct tags across both|
///
/// Matching for the numerator is case-insensitive and counts every entry of
/// `user_tags`, so a tag repeated in the profile is counted once per
/// occurrence. With `TagCasing::Raw` the union keeps tags as written, so
/// "CSE" and "cse" are two members of the denominator.
///
/// Returns 0 when both sides are empty. The ratio is capped at 1.
pub fn jaccard_score<U, I>(user_tags: &[U], item_tags: &[I], casing: TagCasing) -> f64
where
    U: AsRef<str>,
    I: AsRef<str>,
{
    let item_lower: HashSet<String> = item_tags
        .iter()
        .map(|t| t.as_ref().to_lowercase())
        .collect();

    let intersection = user_tags
        .iter()
        .filter(|t| item_lower.contains(&t.as_ref().to_lowercase()))
        .count();

    let union = union_size(user_tags, item_tags, casing);

    if union == 0 {
        return 0.0;
    }

    (intersection as f64 / union as f64).min(1.0)
}

/// Score with the casing behaviour the marketplace shipped with
#[inline]
pub fn score<U, I>(user_tags: &[U], item_tags: &[I]) -> f64
where
    U: AsRef<str>,
    I: AsRef<str>,
{
    jaccard_score(user_tags, item_tags, TagCasing::Raw)
}

fn union_size<U, I>(user_tags: &[U], item_tags: &[I], casing: TagCasing) -> usize
where
    U: AsRef<str>,
    I: AsRef<str>,
{
    let all = user_tags
        .iter()
        .map(AsRef::as_ref)
        .chain(item_tags.iter().map(AsRef::as_ref));

    match casing {
        TagCasing::Raw => all.collect::<HashSet<&str>>().len(),
        TagCasing::Normalized => all.map(str::to_lowercase).collect::<HashSet<String>>().len(),
    }
}
