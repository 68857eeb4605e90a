use crate::{
    database::Store,
    models::{default_journey_steps, JourneyProgress, JourneyResponse, JourneyStep},
    utils::AppError,
};

pub fn progress(steps: &[JourneyStep]) -> JourneyProgress {
    let total_tasks: usize = steps.iter().map(|s| s.tasks.len()).sum();
    let completed_tasks = steps
        .iter()
        .flat_map(|s| s.tasks.iter())
        .filter(|t| t.completed)
        .count();

    let percent = if total_tasks == 0 {
        0
    } else {
        (completed_tasks as f64 / total_tasks as f64 * 100.0).round() as u8
    };

    JourneyProgress {
        completed_tasks,
        total_tasks,
        percent,
    }
}

fn response(steps: Vec<JourneyStep>) -> JourneyResponse {
    JourneyResponse {
        success: true,
        progress: progress(&steps),
        steps,
    }
}

const MAX_TOGGLE_ATTEMPTS: usize = 5;

/// Saved journey for the user, or the default template if none was saved yet.
pub async fn get_journey(store: &dyn Store, user_id: &str) -> Result<JourneyResponse, AppError> {
    let steps = store
        .load_journey(user_id)
        .await?
        .map(|journey| journey.steps)
        .unwrap_or_else(default_journey_steps);

    Ok(response(steps))
}

fn apply_toggle(steps: &mut [JourneyStep], step_id: u32, task_id: u32) -> Result<(), AppError> {
    let step = steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| AppError::NotFound(format!("Step {} not found", step_id)))?;

    let task = step
        .tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found in step {}", task_id, step_id)))?;

    task.completed = !task.completed;
    step.completed = !step.tasks.is_empty() && step.tasks.iter().all(|t| t.completed);
    Ok(())
}

/// Flips one task and recomputes the owning step's `completed` flag.
///
/// The write only lands if nobody else wrote the journey since it was read;
/// otherwise the toggle is replayed on the fresh copy.
pub async fn toggle_task(
    store: &dyn Store,
    user_id: &str,
    step_id: u32,
    task_id: u32,
) -> Result<JourneyResponse, AppError> {
    for attempt in 1..=MAX_TOGGLE_ATTEMPTS {
        let (mut steps, version) = match store.load_journey(user_id).await? {
            Some(journey) => (journey.steps, Some(journey.version)),
            None => (default_journey_steps(), None),
        };

        apply_toggle(&mut steps, step_id, task_id)?;

        if store.replace_journey(user_id, &steps, version).await? {
            log::info!("✅ Journey task {}/{} toggled for user {}", step_id, task_id, user_id);
            return Ok(response(steps));
        }

        log::debug!(
            "🔁 Journey of {} changed during toggle (attempt {}/{})",
            user_id,
            attempt,
            MAX_TOGGLE_ATTEMPTS
        );
    }

    log::warn!("⚠️  Giving up toggling {}/{} for user {}", step_id, task_id, user_id);
    Err(AppError::Conflict(
        "Journey was updated concurrently, please retry".to_string(),
    ))
}

pub async fn reset_journey(store: &dyn Store, user_id: &str) -> Result<JourneyResponse, AppError> {
    let steps = default_journey_steps();
    store.save_journey(user_id, &steps).await?;
    log::info!("🔄 Journey reset for user {}", user_id);

    Ok(response(steps))
}
