use serde::Serialize;

use crate::models::ResourceKind;

#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct LibraryResource {
    pub id: u32,
    #[schema(value_type = String)]
    pub title: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[schema(value_type = Vec<String>)]
    pub categories: &'static [&'static str],
    pub featured: bool,
}

const fn entry(
    id: u32,
    title: &'static str,
    description: &'static str,
    kind: ResourceKind,
    categories: &'static [&'static str],
    featured: bool,
) -> LibraryResource {
    LibraryResource { id, title, description, kind, categories, featured }
}

pub const LIBRARY: &[LibraryResource] = &[
    entry(
        1,
        "Understanding Different Academic Systems",
        "Compare grading scales, teaching methods, and expectations across major educational systems.",
        ResourceKind::Guide,
        &["Academic Systems", "Cultural Differences"],
        true,
    ),
    entry(
        2,
        "Writing Academic Papers in Western Universities",
        "Learn about citation styles, plagiarism rules, and essay structure expectations.",
        ResourceKind::Article,
        &["Academic Writing", "Study Skills"],
        false,
    ),
    entry(
        3,
        "Managing Culture Shock in a New Academic Environment",
        "Practical tips for adjusting to new cultural norms in your educational setting.",
        ResourceKind::Video,
        &["Cultural Adjustment", "Mental Health"],
        true,
    ),
    entry(
        4,
        "Financial Aid Options for International Students",
        "Overview of scholarships, grants, and work opportunities for students studying abroad.",
        ResourceKind::Guide,
        &["Financial Planning", "Practical Resources"],
        false,
    ),
    entry(
        5,
        "Student Visa Application Checklist",
        "Step-by-step guidance for preparing and submitting student visa applications.",
        ResourceKind::Checklist,
        &["Visa & Immigration", "Practical Resources"],
        true,
    ),
    entry(
        6,
        "Housing Options for International Students",
        "Compare on-campus housing, private rentals, and homestays in different countries.",
        ResourceKind::Guide,
        &["Accommodation", "Practical Resources"],
        false,
    ),
    entry(
        7,
        "Language Proficiency Test Preparation",
        "Strategies for improving your TOEFL, IELTS, or other language test scores.",
        ResourceKind::Video,
        &["Language Skills", "Study Skills"],
        false,
    ),
    entry(
        8,
        "Building a Social Network in a New Country",
        "Tips for making friends and building connections in your new academic community.",
        ResourceKind::Article,
        &["Social Integration", "Cultural Adjustment"],
        false,
    ),
    entry(
        9,
        "Understanding Healthcare Systems for International Students",
        "Navigate health insurance requirements and accessing medical care abroad.",
        ResourceKind::Guide,
        &["Healthcare", "Practical Resources"],
        false,
    ),
    entry(
        10,
        "Academic Calendar Comparison Tool",
        "Interactive tool to compare academic year structures across different countries.",
        ResourceKind::Tool,
        &["Academic Systems", "Planning"],
        false,
    ),
    entry(
        11,
        "Working While Studying: Rules and Regulations",
        "Understanding work permits and employment restrictions for international students.",
        ResourceKind::Article,
        &["Employment", "Legal Rights"],
        false,
    ),
    entry(
        12,
        "Preparing for Graduate Studies Abroad",
        "Special considerations for international students pursuing master's or doctoral degrees.",
        ResourceKind::Guide,
        &["Graduate Education", "Academic Planning"],
        false,
    ),
];

/// Library entries whose title or description contains `search`
/// (case-insensitive) and that carry at least one of `categories`.
/// A blank search or an empty category list does not filter.
pub fn search(search: Option<&str>, categories: &[&str]) -> Vec<LibraryResource> {
    let needle = search.map(|s| s.trim().to_lowercase()).unwrap_or_default();

    LIBRARY
        .iter()
        .filter(|resource| {
            needle.is_empty()
                || resource.title.to_lowercase().contains(&needle)
                || resource.description.to_lowercase().contains(&needle)
        })
        .filter(|resource| {
            categories.is_empty()
                || categories.iter().any(|wanted| {
                    resource
                        .categories
                        .iter()
                        .any(|category| category.eq_ignore_ascii_case(wanted.trim()))
                })
        })
        .cloned()
        .collect()
}

pub fn featured() -> Vec<LibraryResource> {
    LIBRARY.iter().filter(|r| r.featured).cloned().collect()
}

/// Every category used in the library, sorted and deduplicated.
pub fn categories() -> Vec<&'static str> {
    let mut all: Vec<&'static str> = LIBRARY
        .iter()
        .flat_map(|r| r.categories.iter().copied())
        .collect();
    all.sort_unstable();
    all.dedup();
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(resources: &[LibraryResource]) -> Vec<u32> {
        resources.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_no_filters_returns_whole_library() {
        assert_eq!(search(None, &[]).len(), 12);
        assert_eq!(search(Some("   "), &[]).len(), 12);
    }

    #[test]
    fn test_search_matches_title_or_description_ignoring_case() {
        assert_eq!(ids(&search(Some("VISA"), &[])), vec![5]);
        // "IELTS" only appears in the description
        assert_eq!(ids(&search(Some("ielts"), &[])), vec![7]);
        assert!(search(Some("quantum"), &[]).is_empty());
    }

    #[test]
    fn test_categories_match_any_of() {
        assert_eq!(ids(&search(None, &["Healthcare", "Planning"])), vec![9, 10]);
        assert_eq!(ids(&search(None, &["practical resources"])), vec![4, 5, 6, 9]);
    }

    #[test]
    fn test_search_and_categories_combine() {
        assert_eq!(
            ids(&search(Some("international"), &["Practical Resources"])),
            vec![4, 6, 9]
        );
    }

    #[test]
    fn test_featured_subset() {
        assert_eq!(ids(&featured()), vec![1, 3, 5]);
    }

    #[test]
    fn test_categories_sorted_and_unique() {
        let all = categories();
        assert_eq!(all.first(), Some(&"Academic Planning"));
        assert_eq!(all.last(), Some(&"Visa & Immigration"));
        assert_eq!(all.iter().filter(|c| **c == "Practical Resources").count(), 1);
        assert_eq!(all.len(), 18);
    }
}
