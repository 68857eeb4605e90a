use crate::database::{MongoDB, EDUCATIONAL_LEVELS, FIELD_OF_STUDY};
use crate::models::{EducationalLevel, FieldOfStudy};
use mongodb::bson::doc;

const DEFAULT_FIELDS_OF_STUDY: &[&str] = &[
    "Computer Science",
    "Business Administration",
    "Engineering",
    "Medicine",
    "Law",
    "Psychology",
    "Economics",
    "Architecture",
    "Biology",
    "Data Science",
    "Education",
    "Arts & Humanities",
];

const DEFAULT_EDUCATIONAL_LEVELS: &[&str] = &[
    "High School",
    "Vocational Diploma",
    "Associate's Degree",
    "Bachelor's Degree",
    "Master's Degree",
    "Doctorate (PhD)",
];

/// Fills the lookup collections when they are empty. Failures are logged and
/// never stop startup.
pub async fn seed_lookups(db: &MongoDB) {
    seed_fields_of_study(db).await;
    seed_educational_levels(db).await;
}

async fn seed_fields_of_study(db: &MongoDB) {
    let collection = db.collection::<FieldOfStudy>(FIELD_OF_STUDY);

    let count = match collection.count_documents(doc! {}).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("   ❌ Could not count {}: {}", FIELD_OF_STUDY, e);
            return;
        }
    };
    if count > 0 {
        log::info!("📋 Fields of study: {} already in DB, skipping seed", count);
        return;
    }

    let fields: Vec<FieldOfStudy> = DEFAULT_FIELDS_OF_STUDY
        .iter()
        .map(|name| FieldOfStudy { id: None, name: name.to_string() })
        .collect();

    match collection.insert_many(&fields).await {
        Ok(result) => log::info!("   ✅ Inserted {} fields of study", result.inserted_ids.len()),
        Err(e) => log::error!("   ❌ Failed to seed fields of study: {}", e),
    }
}

async fn seed_educational_levels(db: &MongoDB) {
    let collection = db.collection::<EducationalLevel>(EDUCATIONAL_LEVELS);

    let count = match collection.count_documents(doc! {}).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("   ❌ Could not count {}: {}", EDUCATIONAL_LEVELS, e);
            return;
        }
    };
    if count > 0 {
        log::info!("📋 Educational levels: {} already in DB, skipping seed", count);
        return;
    }

    let levels: Vec<EducationalLevel> = DEFAULT_EDUCATIONAL_LEVELS
        .iter()
        .map(|level| EducationalLevel { id: None, level: level.to_string() })
        .collect();

    match collection.insert_many(&levels).await {
        Ok(result) => log::info!("   ✅ Inserted {} educational levels", result.inserted_ids.len()),
        Err(e) => log::error!("   ❌ Failed to seed educational levels: {}", e),
    }
}
