use crate::models::Profile;

/// Check whether a candidate is within the eligibility bounds of a target
///
/// Country and region must match exactly (case-sensitive) and the ages must
/// be at most `age_tolerance` years apart, inclusive. Unknown location or age
/// on either side is a miss.
#[inline]
pub fn is_eligible(target: &Profile, candidate: &Profile, age_tolerance: u32) -> bool {
    if !same_known(&target.country, &candidate.country) {
        return false;
    }

    if !same_known(&target.region, &candidate.region) {
        return false;
    }

    match (target.age, candidate.age) {
        (Some(target_age), Some(age)) => target_age.abs_diff(age) <= age_tolerance,
        _ => false,
    }
}

/// Reduce a pool to the candidates eligible for `target`
///
/// Preserves the pool's order. An empty result means nobody is in range.
pub fn filter_candidates<'a>(
    target: &Profile,
    pool: &'a [Profile],
    age_tolerance: u32,
) -> Vec<&'a Profile> {
    pool.iter()
        .filter(|candidate| is_eligible(target, candidate, age_tolerance))
        .collect()
}

#[inline]
fn same_known(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(id: &str, age: u32, country: &str, region: &str) -> Profile {
        Profile::new(id, age, country, region, &["Gaming", "Travel"])
    }

    #[test]
    fn test_same_location_within_tolerance() {
        let target = create_test_profile("t", 25, "US", "NY");
        let candidate = create_test_profile("c", 27, "US", "NY");

        assert!(is_eligible(&target, &candidate, 2));
    }

    #[test]
    fn test_age_boundary() {
        let target = create_test_profile("t", 25, "US", "NY");

        assert!(is_eligible(&target, &create_test_profile("c", 23, "US", "NY"), 2));
        assert!(!is_eligible(&target, &create_test_profile("c", 28, "US", "NY"), 2));
        assert!(!is_eligible(&target, &create_test_profile("c", 22, "US", "NY"), 2));
    }

    #[test]
    fn test_country_mismatch() {
        let target = create_test_profile("t", 25, "US", "NY");
        let candidate = create_test_profile("c", 25, "UK", "NY");

        assert!(!is_eligible(&target, &candidate, 2));
    }

    #[test]
    fn test_region_is_case_sensitive() {
        let target = create_test_profile("t", 25, "US", "NY");
        let candidate = create_test_profile("c", 25, "US", "ny");

        assert!(!is_eligible(&target, &candidate, 2));
    }

    #[test]
    fn test_unknown_fields_miss() {
        let target = create_test_profile("t", 25, "US", "NY");

        let mut no_age = create_test_profile("c", 25, "US", "NY");
        no_age.age = None;
        assert!(!is_eligible(&target, &no_age, 2));

        let mut unknown_target = target.clone();
        unknown_target.country = None;
        let mut unknown_candidate = create_test_profile("c", 25, "US", "NY");
        unknown_candidate.country = None;
        assert!(!is_eligible(&unknown_target, &unknown_candidate, 2));
    }

    #[test]
    fn test_filter_preserves_order() {
        let target = create_test_profile("t", 30, "US", "CA");
        let pool = vec![
            create_test_profile("a", 31, "US", "CA"),
            create_test_profile("b", 40, "US", "CA"),
            create_test_profile("c", 29, "US", "CA"),
        ];

        let ids: Vec<&str> = filter_candidates(&target, &pool, 2)
            .iter()
            .map(|p| p.user_id.as_str())
            .collect();

        assert_eq!(ids, vec!["a", "c"]);
    }
}
