use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EduBridge API",
        version = "1.0.0",
        description = "Backend for EduBridge, a planner for students moving between education systems.\n\n**Authentication:** profile, journey and posting endpoints require a JWT Bearer token from `/api/signin`.\n\n**Features:**\n- Registration, sign in and profile management\n- Country, city and university directory (cached)\n- Journey checklist with progress\n- Resource library\n- Community feed\n- Education system comparison",
        contact(
            name = "EduBridge Team",
            email = "support@edubridge.app"
        )
    ),
    paths(
        // Auth & profile
        crate::api::auth::register,
        crate::api::auth::sign_in,
        crate::api::profile::get_profile,
        crate::api::profile::update_profile,
        crate::api::profile::change_password,

        // Lookups
        crate::api::fields::fields_of_study,
        crate::api::fields::educational_levels,

        // Directory
        crate::api::directory::countries,
        crate::api::directory::cities,
        crate::api::directory::universities,
        crate::api::directory::programs,
        crate::api::directory::tuition,

        // Journey
        crate::api::journey::get_journey,
        crate::api::journey::toggle_task,
        crate::api::journey::reset_journey,

        // Community & contact
        crate::api::community::list_posts,
        crate::api::community::create_post,
        crate::api::community::like_post,
        crate::api::contact::submit,

        // Resource library
        crate::api::resources::list_resources,
        crate::api::resources::featured_resources,
        crate::api::resources::categories,

        crate::api::compare::compare,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::RegisterResponse,
            crate::services::auth_service::SignInRequest,
            crate::services::auth_service::SignInResponse,
            crate::models::UserProfile,
            crate::models::Preferences,
            crate::models::ProfileUpdate,
            crate::models::PreferencesUpdate,
            crate::api::profile::ProfileResponse,
            crate::services::profile_service::ChangePasswordRequest,
            crate::api::profile::PasswordChangedResponse,

            crate::models::FieldOfStudyItem,
            crate::models::EducationalLevelItem,

            crate::services::directory_service::Country,
            crate::services::directory_service::City,
            crate::services::directory_service::University,
            crate::services::directory_service::Program,
            crate::services::directory_service::TuitionBand,

            crate::models::JourneyResponse,
            crate::models::JourneyStep,
            crate::models::JourneyTask,
            crate::models::JourneyResource,
            crate::models::ResourceKind,
            crate::models::JourneyProgress,

            crate::models::CreatePostRequest,
            crate::models::PostView,
            crate::models::PostAuthor,
            crate::api::community::PostsResponse,
            crate::api::community::PostResponse,
            crate::models::ContactRequest,
            crate::api::contact::ContactResponse,

            crate::services::resources_service::LibraryResource,

            crate::services::comparison_service::Comparison,
            crate::services::comparison_service::ComparisonRow,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Registration and sign in. Sign in returns the JWT used by protected endpoints."),
        (name = "Profile", description = "Read and update the signed-in user's profile. The password only changes through /api/profile/password."),
        (name = "Fields", description = "Lookup lists for fields of study and educational levels."),
        (name = "Directory", description = "Countries, cities and universities from public directories, cached server-side."),
        (name = "Journey", description = "Per-user relocation checklist."),
        (name = "Community", description = "Public feed of short posts."),
        (name = "Contact", description = "Contact form submissions."),
        (name = "Resources", description = "Static library of guides, articles and tools with search and category filters."),
        (name = "Compare", description = "Side-by-side comparison of education systems."),
        (name = "Health", description = "Service health."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/signin"))
                        .build()
                ),
            );
        }
    }
}
