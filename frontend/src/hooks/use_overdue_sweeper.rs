use futures::future::join_all;
use shared::{plan_sweep, SweepReport};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::LocalNow;
use crate::services::logging::Logger;

const COMPONENT: &str = "overdue-sweeper";

/// Run one sweep: promote every past-dated active reservation to overtime.
///
/// Updates are independent requests issued together. A failed update is logged and
/// left for the next sweep.
pub async fn sweep_overdue(api_client: &ApiClient) -> Option<SweepReport> {
    let today = LocalNow::capture().date;

    let reservations = match api_client.get_all_reservations().await {
        Ok(reservations) => reservations,
        Err(e) => {
            Logger::error_with_component(COMPONENT, &format!("Error updating overdue reservations: {}", e));
            return None;
        }
    };

    let plan = plan_sweep(&reservations, today);
    if plan.skipped > 0 {
        Logger::warn_with_component(
            COMPONENT,
            &format!("{} overdue reservation(s) have no record ID and were skipped", plan.skipped),
        );
    }

    let results = join_all(plan.updates.iter().map(|update| async move {
        let result = api_client.update_reservation_status(update).await;
        if let Err(e) = &result {
            Logger::error_with_component(
                COMPONENT,
                &format!("Failed to mark reservation {} as overtime: {}", update.reservation_id, e),
            );
        }
        result
    }))
    .await;

    let report = SweepReport::from_results(plan.skipped, &results);
    if report.promoted > 0 {
        Logger::info_with_component(
            COMPONENT,
            &format!("{} reservation(s) marked as overtime.", report.promoted),
        );
    }
    Some(report)
}

/// Log line for a sweep that left work behind, `None` when every overdue record was promoted
pub fn incomplete_sweep_message(report: &SweepReport) -> Option<String> {
    if report.is_clean() {
        return None;
    }
    Some(format!(
        "Sweep incomplete: {} promoted, {} failed, {} skipped. Retrying on the next refresh.",
        report.promoted, report.failed, report.skipped
    ))
}

/// Callback that starts a sweep in the background
#[hook]
pub fn use_overdue_sweeper(api_client: &ApiClient) -> Callback<()> {
    let api_client = api_client.clone();
    use_callback((), move |_, _| {
        let api_client = api_client.clone();
        spawn_local(async move {
            let report = sweep_overdue(&api_client).await;
            if let Some(message) = report.as_ref().and_then(incomplete_sweep_message) {
                Logger::warn_with_component(COMPONENT, &message);
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_clean_sweep_has_no_warning() {
        let report = SweepReport { promoted: 3, failed: 0, skipped: 0 };
        assert_eq!(incomplete_sweep_message(&report), None);
    }

    #[wasm_bindgen_test]
    fn test_failed_or_skipped_updates_are_reported() {
        let report = SweepReport { promoted: 1, failed: 2, skipped: 1 };
        assert_eq!(
            incomplete_sweep_message(&report).as_deref(),
            Some("Sweep incomplete: 1 promoted, 2 failed, 1 skipped. Retrying on the next refresh.")
        );
    }
}
