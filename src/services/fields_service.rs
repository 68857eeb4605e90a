use crate::{
    database::Store,
    models::{EducationalLevelItem, FieldOfStudyItem},
    utils::AppError,
};

pub async fn fields_of_study(store: &dyn Store) -> Result<Vec<FieldOfStudyItem>, AppError> {
    Ok(store
        .fields_of_study()
        .await?
        .into_iter()
        .map(FieldOfStudyItem::from)
        .collect())
}

pub async fn educational_levels(store: &dyn Store) -> Result<Vec<EducationalLevelItem>, AppError> {
    Ok(store
        .educational_levels()
        .await?
        .into_iter()
        .map(EducationalLevelItem::from)
        .collect())
}
