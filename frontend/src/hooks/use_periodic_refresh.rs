use std::cell::Cell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Configuration for periodic refresh behavior
#[derive(Clone, PartialEq)]
pub struct PeriodicRefreshConfig {
    pub interval_ms: u32,
    pub initial_delay_ms: Option<u32>,
}

impl Default for PeriodicRefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: 60_000, // re-render the grid every minute
            initial_delay_ms: None,
        }
    }
}

/// Result from the periodic refresh hook
pub struct UsePeriodicRefreshResult {
    /// 0 on mount, incremented on every elapsed interval
    pub tick: u32,
}

/// Hook producing a tick counter that advances every `interval_ms`.
///
/// Effects keyed on `tick` re-run on each interval. The timer loop stops when the
/// config changes or the component unmounts.
#[hook]
pub fn use_periodic_refresh(config: PeriodicRefreshConfig) -> UsePeriodicRefreshResult {
    let tick = use_state(|| 0u32);

    {
        let tick = tick.clone();
        use_effect_with(config, move |config| {
            let cancelled = Rc::new(Cell::new(false));

            {
                let cancelled = cancelled.clone();
                let config = config.clone();
                spawn_local(async move {
                    if let Some(initial_delay) = config.initial_delay_ms {
                        TimeoutFuture::new(initial_delay).await;
                    }

                    let mut count = 0u32;
                    loop {
                        TimeoutFuture::new(config.interval_ms).await;
                        if cancelled.get() {
                            break;
                        }

                        count = count.wrapping_add(1);
                        Logger::debug_with_component("periodic-refresh-hook", &format!("🔄 Refresh tick {}", count));
                        tick.set(count);
                    }
                });
            }

            move || {
                cancelled.set(true);
                Logger::debug_with_component("periodic-refresh-hook", "🧹 Periodic refresh stopped");
            }
        });
    }

    UsePeriodicRefreshResult { tick: *tick }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_default() {
        let config = PeriodicRefreshConfig::default();
        assert_eq!(config.interval_ms, 60_000);
        assert_eq!(config.initial_delay_ms, None);
    }

    #[wasm_bindgen_test]
    fn test_config_staggered() {
        let config = PeriodicRefreshConfig {
            initial_delay_ms: Some(15000),
            ..PeriodicRefreshConfig::default()
        };
        assert_eq!(config.initial_delay_ms, Some(15000));
        assert_eq!(config.interval_ms, 60_000);
    }
}
