use crate::domain::models::resource::Resource;

/// Case-insensitive substring match over name, description and location.
/// An empty search matches everything; whitespace is part of the needle.
pub fn matches_search(resource: &Resource, search: &str) -> bool {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(&needle));

    contains(Some(&resource.name))
        || contains(resource.description.as_deref())
        || contains(resource.location.as_deref())
}

pub fn filter_resources(resources: Vec<Resource>, search: Option<&str>) -> Vec<Resource> {
    match search {
        Some(s) => resources.into_iter().filter(|r| matches_search(r, s)).collect(),
        None => resources,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::resource::NewResourceParams;

    fn resource(name: &str, description: Option<&str>, location: Option<&str>, is_available: bool) -> Resource {
        Resource::new(NewResourceParams {
            name: name.to_string(),
            description: description.map(str::to_string),
            location: location.map(str::to_string),
            capacity: 4,
            is_available,
        })
    }

    fn names(resources: &[Resource]) -> Vec<&str> {
        resources.iter().map(|r| r.name.as_str()).collect()
    }

    fn fixture() -> Vec<Resource> {
        vec![
            resource("Board Room", Some("Large table and Projector"), Some("Floor 2"), true),
            resource("Camera", None, Some("Media Cupboard"), false),
            resource("Focus Pod", Some("Quiet space"), None, true),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_text_fields() {
        assert_eq!(names(&filter_resources(fixture(), Some("ROOM"))), vec!["Board Room"]);
        assert_eq!(names(&filter_resources(fixture(), Some("PROJECTOR"))), vec!["Board Room"]);
        assert_eq!(names(&filter_resources(fixture(), Some("cupboard"))), vec!["Camera"]);
        assert_eq!(names(&filter_resources(fixture(), Some("Floor"))), vec!["Board Room"]);
    }

    #[test]
    fn test_empty_search_returns_everything() {
        assert_eq!(filter_resources(fixture(), None).len(), 3);
        assert_eq!(filter_resources(fixture(), Some("")).len(), 3);
    }

    #[test]
    fn test_whitespace_is_matched_literally() {
        assert!(filter_resources(fixture(), Some("room ")).is_empty());
        assert!(filter_resources(fixture(), Some("  ")).is_empty());
        assert_eq!(names(&filter_resources(fixture(), Some("d r"))), vec!["Board Room"]);
    }

    #[test]
    fn test_order_is_preserved() {
        assert_eq!(names(&filter_resources(fixture(), Some("A"))), vec!["Board Room", "Camera", "Focus Pod"]);
    }

    #[test]
    fn test_missing_optional_fields_never_match() {
        let r = resource("Desk", None, None, true);
        assert!(!matches_search(&r, "floor"));
        assert!(matches_search(&r, "DESK"));
    }
}
