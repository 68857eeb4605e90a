use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
pub enum ResourceKind {
    Article,
    Video,
    Checklist,
    Guide,
    Tool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct JourneyTask {
    pub id: u32,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct JourneyResource {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct JourneyStep {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub tasks: Vec<JourneyTask>,
    pub resources: Vec<JourneyResource>,
    pub completed: bool,
}

/// Document in the "journeys" collection, one per user.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub steps: Vec<JourneyStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<BsonDateTime>,
    /// Bumped on every write; guards read-modify-write updates.
    #[serde(default)]
    pub version: i64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JourneyProgress {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub percent: u8,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct JourneyResponse {
    pub success: bool,
    pub steps: Vec<JourneyStep>,
    pub progress: JourneyProgress,
}

fn task(id: u32, title: &str) -> JourneyTask {
    JourneyTask {
        id,
        title: title.into(),
        completed: false,
    }
}

fn resource(id: u32, title: &str, kind: ResourceKind, href: &str) -> JourneyResource {
    JourneyResource {
        id,
        title: title.into(),
        kind,
        href: Some(href.into()),
    }
}

/// The five-stage checklist every user starts from.
pub fn default_journey_steps() -> Vec<JourneyStep> {
    use ResourceKind::*;

    vec![
        JourneyStep {
            id: 1,
            title: "Research & Decision Making".into(),
            description: "Research educational systems and make informed decisions about your academic path.".into(),
            tasks: vec![
                task(1, "Compare educational systems"),
                task(2, "Research potential institutions"),
                task(3, "Identify required documentation"),
                task(4, "Set academic and career goals"),
            ],
            resources: vec![
                resource(1, "Global Education Guidebook", Guide, "https://www.principledlearning.org/the-global-education-guidebook"),
                resource(2, "How to Choose the Right University Abroad", Article, "https://www.mastersportal.com/articles/2099/how-to-pick-your-university-abroad.html"),
                resource(3, "Student Visa Checklist", Checklist, "https://studee.com/guides/the-essential-student-visa-checklist"),
            ],
            completed: false,
        },
        JourneyStep {
            id: 2,
            title: "Application Process".into(),
            description: "Complete applications for your chosen institutions and programs.".into(),
            tasks: vec![
                task(1, "Prepare personal statement"),
                task(2, "Gather academic transcripts"),
                task(3, "Secure recommendation letters"),
                task(4, "Submit applications"),
            ],
            resources: vec![
                resource(1, "Writing a Successful Personal Statement", Guide, "https://www.odu.edu/sites/default/files/documents/personal-statement-tips.pdf"),
                resource(2, "Application Timeline Planner", Checklist, "https://www.scribbr.com/college-essay/applying-for-college/"),
                resource(3, "How to Request Strong Recommendation Letters", Article, "https://www.coursera.org/articles/how-to-ask-for-a-letter-of-recommendation-template-tips"),
            ],
            completed: false,
        },
        JourneyStep {
            id: 3,
            title: "Pre-Departure Preparation".into(),
            description: "Prepare for relocation with practical and cultural considerations.".into(),
            tasks: vec![
                task(1, "Apply for student visa"),
                task(2, "Arrange accommodation"),
                task(3, "Research healthcare options"),
                task(4, "Prepare financially"),
            ],
            resources: vec![
                resource(1, "Cultural Adjustment Guide", Article, "https://www.therapyinbarcelona.com/the-ultimate-guide-to-cultural-adjustment-therapy/"),
                resource(2, "Student Accommodation Options", Video, "https://www.youtube.com/watch?v=TV-x9ifha7g"),
                resource(3, "Budgeting for International Students", Guide, "https://www.mpowerfinancing.com/blog/budget-management-study-abroad"),
            ],
            completed: false,
        },
        JourneyStep {
            id: 4,
            title: "Arrival & Orientation".into(),
            description: "Navigate your arrival and orientation at your new institution.".into(),
            tasks: vec![
                task(1, "Attend orientation events"),
                task(2, "Complete registration"),
                task(3, "Set up banking"),
                task(4, "Learn campus resources"),
            ],
            resources: vec![
                resource(1, "First Week Survival Checklist", Checklist, "https://theprepared.com/prepping-basics/guides/emergency-preparedness-checklist-prepping-beginners/"),
                resource(2, "Campus Resources for International Students", Guide, "https://www.internationalstudent.com/resources/"),
                resource(3, "Understanding Your New Academic System", Article, "https://www.jstor.org/stable/40279087?seq=1"),
            ],
            completed: false,
        },
        JourneyStep {
            id: 5,
            title: "Academic Integration".into(),
            description: "Adapt to your new academic environment and excel in your studies.".into(),
            tasks: vec![
                task(1, "Understand grading system"),
                task(2, "Learn academic expectations"),
                task(3, "Develop study strategies"),
                task(4, "Connect with academic support"),
            ],
            resources: vec![
                resource(1, "Academic Writing in Different Cultures", Article, "https://www.humak.fi/en/blogs/academic-cross-cultural-differences-academic-writing/"),
                resource(2, "Study Skills for International Students", Video, "https://www.youtube.com/watch?v=SLGxGJ7DOeQ"),
                resource(3, "Working with Academic Advisors", Guide, "https://nacada.ksu.edu/portals/0/Clearinghouse/AdvisingIssues/Example_Univ_Handbook.pdf"),
            ],
            completed: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_shape() {
        let steps = default_journey_steps();
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|s| s.tasks.len() == 4 && s.resources.len() == 3));
        assert!(steps.iter().flat_map(|s| &s.tasks).all(|t| !t.completed));
    }

    #[test]
    fn test_resource_kind_serializes_as_type() {
        let json = serde_json::to_value(&default_journey_steps()[0].resources[0]).unwrap();
        assert_eq!(json["type"], "Guide");
    }
}
