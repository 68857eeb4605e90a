use mongodb::bson::DateTime as BsonDateTime;

use crate::{
    database::Store,
    models::{normalize_email, ContactMessage, ContactRequest},
    utils::AppError,
};

fn validate(request: &ContactRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("name", &request.name),
        ("email", &request.email),
        ("subject", &request.subject),
        ("message", &request.message),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{} is required", field));
        }
    }

    let email = request.email.trim();
    if !email.is_empty() && !email.contains('@') {
        errors.push("email must be a valid email address".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub async fn submit(store: &dyn Store, request: &ContactRequest) -> Result<String, AppError> {
    validate(request).map_err(AppError::Validation)?;

    let message = ContactMessage {
        id: None,
        name: request.name.trim().to_string(),
        email: normalize_email(&request.email),
        subject: request.subject.trim().to_string(),
        message: request.message.trim().to_string(),
        created_at: BsonDateTime::now(),
    };

    let id = store.insert_contact_message(&message).await?;
    log::info!("📬 Contact message {} stored", id);

    Ok(id.to_hex())
}
