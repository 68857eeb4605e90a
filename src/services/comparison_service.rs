use serde::Serialize;

use crate::utils::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum System {
    Us,
    Uk,
}

impl System {
    fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "us" | "usa" | "united states" => Some(Self::Us),
            "uk" | "gb" | "united kingdom" => Some(Self::Uk),
            _ => None,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Us => "us",
            Self::Uk => "uk",
        }
    }
}

// (us, uk)
type Row = (&'static str, &'static str);

const ACADEMIC_LEVELS: &[Row] = &[
    ("Elementary School (K-5)", "Primary School (Years 1-6)"),
    ("Middle School (6-8)", "Secondary School (Years 7-9)"),
    ("High School (9-12)", "Secondary School (Years 10-11) + Sixth Form (Years 12-13)"),
    ("Associate's Degree (2 years)", "Foundation Degree (2 years)"),
    ("Bachelor's Degree (4 years)", "Bachelor's Degree (3 years)"),
    ("Master's Degree (1-2 years)", "Master's Degree (1 year)"),
    ("Doctoral Degree (PhD) (5-7 years)", "Doctoral Degree (PhD) (3-4 years)"),
];

const GRADING_SYSTEMS: &[Row] = &[
    ("A (90-100%): Excellent", "First Class Honours (70%+): Excellent"),
    ("B (80-89%): Good", "Upper Second Class Honours (60-69%): Very Good"),
    ("C (70-79%): Satisfactory", "Lower Second Class Honours (50-59%): Good"),
    ("D (60-69%): Poor", "Third Class Honours (40-49%): Satisfactory"),
    ("F (Below 60%): Fail", "Fail (Below 40%)"),
    ("GPA System (0.0-4.0)", "Degree Classification System"),
];

const ACADEMIC_CALENDAR: &[Row] = &[
    (
        "Two semesters: Fall (Aug/Sep-Dec) and Spring (Jan-May)",
        "Three terms: Autumn (Sep-Dec), Spring (Jan-Mar), Summer (Apr-Jun)",
    ),
    ("Optional summer sessions (May-Aug)", "Optional summer modules"),
    ("Thanksgiving, Winter, Spring breaks", "Christmas, Easter, Half-term breaks"),
    ("Academic year: August/September to May", "Academic year: September to June"),
];

const TEACHING_STYLE: &[Row] = &[
    ("Interactive classroom discussions", "Lecture-based with seminars"),
    (
        "Continuous assessment (assignments, quizzes, midterms)",
        "Less continuous assessment, more emphasis on final exams",
    ),
    ("Credit hours system", "Module-based learning"),
    ("Broader curriculum with electives", "More specialized and focused from the beginning"),
    (
        "Regular assignments throughout semester",
        "Fewer assignments, greater weight on final assessment",
    ),
];

const COMMON_CHALLENGES: &[Row] = &[
    (
        "UK students: Adapting to continuous assessment",
        "US students: Adjusting to independent study expectations",
    ),
    (
        "UK students: Understanding US credit system",
        "US students: Understanding UK degree classification",
    ),
    (
        "UK students: Different terminology (e.g., 'course' vs 'module')",
        "US students: Shorter degree programs requiring faster adaptation",
    ),
    (
        "UK students: More frequent testing",
        "US students: Fewer opportunities to improve grades",
    ),
    (
        "UK students: Liberal arts requirements",
        "US students: More specialized curriculum from start",
    ),
];

#[derive(Debug, Serialize, Clone, PartialEq, utoipa::ToSchema)]
pub struct ComparisonRow {
    #[schema(value_type = String)]
    pub home: &'static str,
    #[schema(value_type = String)]
    pub destination: &'static str,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub success: bool,
    #[schema(value_type = String)]
    pub home: &'static str,
    #[schema(value_type = String)]
    pub destination: &'static str,
    pub academic_levels: Vec<ComparisonRow>,
    pub grading_systems: Vec<ComparisonRow>,
    pub academic_calendar: Vec<ComparisonRow>,
    pub teaching_style: Vec<ComparisonRow>,
    pub common_challenges: Vec<ComparisonRow>,
}

fn column(row: &Row, system: System) -> &'static str {
    match system {
        System::Us => row.0,
        System::Uk => row.1,
    }
}

fn section(rows: &[Row], home: System, destination: System) -> Vec<ComparisonRow> {
    rows.iter()
        .map(|row| ComparisonRow {
            home: column(row, home),
            destination: column(row, destination),
        })
        .collect()
}

pub fn compare(home: &str, destination: &str) -> Result<Comparison, AppError> {
    let unsupported =
        |code: &str| AppError::NotFound(format!("No comparison data for '{}'", code.trim()));
    let home_system = System::parse(home).ok_or_else(|| unsupported(home))?;
    let destination_system = System::parse(destination).ok_or_else(|| unsupported(destination))?;

    Ok(Comparison {
        success: true,
        home: home_system.code(),
        destination: destination_system.code(),
        academic_levels: section(ACADEMIC_LEVELS, home_system, destination_system),
        grading_systems: section(GRADING_SYSTEMS, home_system, destination_system),
        academic_calendar: section(ACADEMIC_CALENDAR, home_system, destination_system),
        teaching_style: section(TEACHING_STYLE, home_system, destination_system),
        common_challenges: section(COMMON_CHALLENGES, home_system, destination_system),
    })
}
