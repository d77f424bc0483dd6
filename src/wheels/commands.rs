use serde::Serialize;

use crate::{
    log_info,
    models::{Label, SpinRecord, Wheel, WheelInput},
    wheel::{layout, render_svg, Slice},
    AppState, WheelError,
};

const ENABLE_LOGS: bool = true;

/// A slice of the layout paired with the label drawn in it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    #[serde(flatten)]
    pub slice: Slice,
    pub label: Label,
    pub large_arc: bool,
    pub path: String,
}

async fn persist(state: &AppState, wheels: &[Wheel]) -> Result<(), String> {
    state.db.save_wheels(wheels).await.map_err(|e| e.to_string())
}

async fn find_wheel(state: &AppState, wheel_id: &str) -> Result<Wheel, String> {
    let wheels = state.wheels.lock().await;
    wheels
        .get(wheel_id)
        .cloned()
        .ok_or_else(|| WheelError::WheelNotFound(wheel_id.to_string()).to_string())
}

pub async fn list_wheels(state: &AppState) -> Result<Vec<Wheel>, String> {
    let wheels = state.wheels.lock().await;
    Ok(wheels.wheels().to_vec())
}

pub async fn get_selected_wheel(state: &AppState) -> Result<Option<Wheel>, String> {
    let wheels = state.wheels.lock().await;
    Ok(wheels.selected().cloned())
}

/// Builds a wheel from form input, adds it to the collection and selects it.
pub async fn create_wheel(state: &AppState, input: WheelInput) -> Result<Wheel, String> {
    let wheel = Wheel::create(input).map_err(|e| e.to_string())?;

    let mut wheels = state.wheels.lock().await;
    wheels.add(wheel.clone());
    persist(state, wheels.wheels()).await?;

    log_info!(
        "Created wheel {} with {} labels",
        wheel.name,
        wheel.labels.len()
    );
    Ok(wheel)
}

pub async fn select_wheel(state: &AppState, index: usize) -> Result<Wheel, String> {
    let mut wheels = state.wheels.lock().await;
    wheels.select(index).cloned().map_err(|e| e.to_string())
}

/// Removes the wheel at `index`, cancelling its spin if one is in flight.
pub async fn delete_wheel(state: &AppState, index: usize) -> Result<Wheel, String> {
    let wheel_id = {
        let wheels = state.wheels.lock().await;
        wheels
            .wheels()
            .get(index)
            .map(|w| w.id.clone())
            .ok_or_else(|| {
                WheelError::IndexOutOfRange {
                    index,
                    len: wheels.len(),
                }
                .to_string()
            })?
    };

    if state.spinner.spinning_wheel().await.as_deref() == Some(wheel_id.as_str()) {
        state.spinner.cancel().await;
        state.spinner.wait_idle().await.map_err(|e| e.to_string())?;
    }

    let mut wheels = state.wheels.lock().await;
    let index = wheels
        .position(&wheel_id)
        .ok_or_else(|| WheelError::WheelNotFound(wheel_id.clone()).to_string())?;
    let removed = wheels.remove(index).map_err(|e| e.to_string())?;
    persist(state, wheels.wheels()).await?;

    log_info!("Deleted wheel {}", removed.name);
    Ok(removed)
}

pub async fn get_history(state: &AppState, wheel_id: String) -> Result<Vec<SpinRecord>, String> {
    Ok(find_wheel(state, &wheel_id).await?.history)
}

pub async fn get_layout(state: &AppState, wheel_id: String) -> Result<Vec<SlotView>, String> {
    let wheel = find_wheel(state, &wheel_id).await?;
    let slots = layout(wheel.labels.len())
        .into_iter()
        .zip(wheel.labels)
        .map(|(slice, label)| SlotView {
            large_arc: slice.large_arc(),
            path: slice.sector_path(),
            slice,
            label,
        })
        .collect();
    Ok(slots)
}

/// SVG of the wheel at its current rotation.
pub async fn render_wheel(state: &AppState, wheel_id: String) -> Result<String, String> {
    let wheel = find_wheel(state, &wheel_id).await?;
    let rotation = state.spinner.rotation_for(&wheel_id).await;
    render_svg(&wheel, rotation).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        settings::SpinSettings, set_spin_settings, spinner::commands::spin_and_wait,
        test_support::temp_app_state,
    };

    fn input(name: &str, labels: &[&str]) -> WheelInput {
        WheelInput {
            name: name.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_selects_and_persists() {
        let state = temp_app_state().await;
        let wheel = create_wheel(&state, input("w", &["a", " ", "b"]))
            .await
            .unwrap();
        assert_eq!(wheel.labels.len(), 2);

        let selected = get_selected_wheel(&state).await.unwrap().unwrap();
        assert_eq!(selected.id, wheel.id);
        assert_eq!(state.db.load_wheels().await.unwrap(), vec![wheel]);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_form() {
        let state = temp_app_state().await;
        let err = create_wheel(&state, input("w", &["", "  "]))
            .await
            .unwrap_err();
        assert_eq!(err, WheelError::NoLabels.to_string());
        assert!(list_wheels(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_select_and_delete() {
        let state = temp_app_state().await;
        create_wheel(&state, input("a", &["x"])).await.unwrap();
        create_wheel(&state, input("b", &["y"])).await.unwrap();

        assert_eq!(select_wheel(&state, 0).await.unwrap().name, "a");
        assert!(select_wheel(&state, 5).await.is_err());

        let removed = delete_wheel(&state, 0).await.unwrap();
        assert_eq!(removed.name, "a");
        assert!(get_selected_wheel(&state).await.unwrap().is_none());

        let saved = state.db.load_wheels().await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "b");
        assert!(delete_wheel(&state, 3).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_cancels_pending_spin() {
        let state = temp_app_state().await;
        set_spin_settings(
            &state,
            SpinSettings {
                revolutions_per_spin: 5,
                transition_ms: 60_000,
            },
        )
        .unwrap();
        let wheel = create_wheel(&state, input("a", &["x", "y"])).await.unwrap();
        state.spinner.spin(&wheel.id).await.unwrap();

        delete_wheel(&state, 0).await.unwrap();
        assert!(state.spinner.spinning_wheel().await.is_none());
        assert!(list_wheels(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_and_layout() {
        let state = temp_app_state().await;
        set_spin_settings(
            &state,
            SpinSettings {
                revolutions_per_spin: 5,
                transition_ms: 0,
            },
        )
        .unwrap();
        let wheel = create_wheel(&state, input("w", &["a", "b", "c"]))
            .await
            .unwrap();

        spin_and_wait(&state, wheel.id.clone()).await.unwrap();
        spin_and_wait(&state, wheel.id.clone()).await.unwrap();
        assert_eq!(get_history(&state, wheel.id.clone()).await.unwrap().len(), 2);

        let slots = get_layout(&state, wheel.id.clone()).await.unwrap();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[1].label.text, "b");
        assert_eq!(slots[2].slice.end, 1.0);
        assert!(slots.iter().all(|s| !s.large_arc));

        let svg = render_wheel(&state, wheel.id.clone()).await.unwrap();
        let rotation = state.spinner.rotation_for(&wheel.id).await;
        assert!(svg.contains(&format!("rotate({rotation})")));

        assert!(get_history(&state, "missing".into()).await.is_err());
    }
}
