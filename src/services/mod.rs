pub mod auth_service;
pub mod profile_service;
pub mod fields_service;
pub mod directory_service;
pub mod journey_service;
pub mod community_service;
pub mod contact_service;
pub mod comparison_service;
pub mod resources_service;

pub use directory_service::{DirectoryService, HttpDirectorySource};
