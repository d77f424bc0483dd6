use tokio::sync::broadcast::error::RecvError;

use crate::{
    models::SpinRecord,
    spinner::{SpinController, SpinEvent, SpinSnapshot},
    wheel::SpinPlan,
    AppState,
};

fn controller_from_state(state: &AppState) -> SpinController {
    state.spinner.clone()
}

pub async fn get_spin_state(state: &AppState) -> Result<SpinSnapshot, String> {
    let controller = controller_from_state(state);
    Ok(controller.get_snapshot().await)
}

pub async fn spin_wheel(state: &AppState, wheel_id: String) -> Result<SpinPlan, String> {
    let controller = controller_from_state(state);
    controller.spin(&wheel_id).await.map_err(|e| e.to_string())
}

pub async fn cancel_spin(state: &AppState) -> Result<bool, String> {
    let controller = controller_from_state(state);
    Ok(controller.cancel().await)
}

/// Spins `wheel_id` and waits for the outcome. `None` means the spin was
/// cancelled before it landed.
pub async fn spin_and_wait(
    state: &AppState,
    wheel_id: String,
) -> Result<Option<SpinRecord>, String> {
    let controller = controller_from_state(state);
    let mut events = controller.subscribe();
    controller.spin(&wheel_id).await.map_err(|e| e.to_string())?;

    loop {
        match events.recv().await {
            Ok(event) if event.wheel_id() == wheel_id && event.is_terminal() => {
                return match event {
                    SpinEvent::Resolved { record, .. } => Ok(Some(record)),
                    SpinEvent::Failed { message, .. } => Err(message),
                    _ => Ok(None),
                };
            }
            Ok(_) | Err(RecvError::Lagged(_)) => continue,
            Err(RecvError::Closed) => return Err("spin events closed".to_string()),
        }
    }
}
