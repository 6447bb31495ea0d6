use chrono::NaiveDate;

use crate::{Reservation, ReservationQuery, ReservationStatus, Role, Slot};

/// Classification of a rendered slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Available,
    Reserved,
    Overtime,
}

impl SlotState {
    pub fn css_class(&self) -> &'static str {
        match self {
            SlotState::Available => "space-available",
            SlotState::Reserved => "space-reserved",
            SlotState::Overtime => "space-overtime",
        }
    }
}

/// A slot after reconciliation, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub slot: Slot,
    pub state: SlotState,
    /// "Available", "Reserved", "Overtime", optionally followed by occupant detail
    pub caption: String,
    /// Clicking starts a reservation for this slot
    pub interactive: bool,
    /// Rendered with the not-allowed affordance
    pub disabled: bool,
}

impl SlotView {
    pub fn is_occupied(&self) -> bool {
        self.state != SlotState::Available
    }

    pub fn css_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["slot", self.state.css_class()];
        if self.disabled {
            classes.push("disabled-slot");
        }
        classes
    }
}

/// Pick the space to render: an explicit override wins over the selector value.
/// Blank values count as unresolved.
pub fn resolve_space(override_space: Option<&str>, selection: Option<&str>) -> Option<String> {
    override_space
        .filter(|space| !space.trim().is_empty())
        .or_else(|| selection.filter(|space| !space.trim().is_empty()))
        .map(str::to_string)
}

/// Reservations that occupy a slot on `selected_date`.
///
/// Overtime reservations always count regardless of date. Active ones count only
/// on their own calendar date. Completed reservations never count.
pub fn filter_active(reservations: &[Reservation], selected_date: NaiveDate) -> Vec<&Reservation> {
    reservations
        .iter()
        .filter(|reservation| match reservation.status {
            ReservationStatus::Overtime => true,
            ReservationStatus::Active => reservation.calendar_date() == Some(selected_date),
            ReservationStatus::Completed => false,
        })
        .collect()
}

/// Classify every slot of a freshly generated grid against the reported reservations
pub fn reconcile(
    slots: Vec<Slot>,
    reservations: &[Reservation],
    selected_date: NaiveDate,
    role: Role,
) -> Vec<SlotView> {
    let active = filter_active(reservations, selected_date);
    let capabilities = role.capabilities();

    slots
        .into_iter()
        .map(|mut slot| {
            match active.iter().find(|reservation| reservation.slot_id == slot.id) {
                Some(reservation) => {
                    let state = match reservation.status {
                        ReservationStatus::Overtime => SlotState::Overtime,
                        _ => SlotState::Reserved,
                    };
                    let status_text = reservation.status.display_text();
                    let caption = if !capabilities.can_see_identity {
                        status_text.to_string()
                    } else if reservation.anonymous {
                        format!("{} (Anonymous)", status_text)
                    } else {
                        format!("{} ID: {}", status_text, reservation.user_id)
                    };

                    slot.available = false;
                    slot.reservation_date = reservation.calendar_date();

                    SlotView {
                        slot,
                        state,
                        caption,
                        interactive: false,
                        disabled: false,
                    }
                }
                None => {
                    slot.available = true;
                    slot.reservation_date = None;

                    SlotView {
                        slot,
                        state: SlotState::Available,
                        caption: "Available".to_string(),
                        interactive: capabilities.can_interact,
                        disabled: !capabilities.can_interact,
                    }
                }
            }
        })
        .collect()
}

/// Identifies one reconciliation pass so late responses can be recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub generation: u64,
    pub space: String,
    pub date: NaiveDate,
}

impl RequestTag {
    /// Reservations are requested by space alone. Overtime records from earlier
    /// dates must still come back, so the date is applied locally.
    pub fn reservation_query(&self) -> ReservationQuery {
        ReservationQuery::for_space(self.space.clone())
    }
}

/// Hands out request tags and remembers which one is current
#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: u64,
    current: Option<RequestTag>,
}

impl RequestTracker {
    /// Start a new pass. Any tag issued earlier becomes stale.
    pub fn issue(&mut self, space: impl Into<String>, date: NaiveDate) -> RequestTag {
        self.generation += 1;
        let tag = RequestTag {
            generation: self.generation,
            space: space.into(),
            date,
        };
        self.current = Some(tag.clone());
        tag
    }

    pub fn is_current(&self, tag: &RequestTag) -> bool {
        self.current.as_ref() == Some(tag)
    }
}

/// Result of one completed reconciliation pass
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub tag: RequestTag,
    /// HH:MM captured at the start of the pass, carried into reservation drafts
    pub selected_time: String,
    pub slots: Vec<SlotView>,
}

impl GridSnapshot {
    pub fn space(&self) -> &str {
        &self.tag.space
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.tag.date
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|view| view.is_occupied()).count()
    }
}

/// What the availability container currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityState {
    /// No space resolved yet
    Idle,
    /// Grid generated, reservations still in flight
    Loading { tag: RequestTag, slots: Vec<Slot> },
    Ready(GridSnapshot),
    /// Reservations could not be fetched; occupancy is unknown
    Failed {
        tag: RequestTag,
        slots: Vec<Slot>,
        message: String,
    },
}

/// One rendered cell of the availability container
#[derive(Debug, Clone, PartialEq)]
pub struct SlotCell {
    pub slot_id: u32,
    pub label: String,
    pub caption: String,
    pub classes: Vec<&'static str>,
    pub interactive: bool,
    pub disabled: bool,
}

impl SlotCell {
    fn placeholder(slot: &Slot, class: &'static str, caption: &str) -> Self {
        Self {
            slot_id: slot.id,
            label: slot.label.clone(),
            caption: caption.to_string(),
            classes: vec!["slot", class],
            interactive: false,
            disabled: false,
        }
    }
}

impl From<&SlotView> for SlotCell {
    fn from(view: &SlotView) -> Self {
        Self {
            slot_id: view.slot.id,
            label: view.slot.label.clone(),
            caption: view.caption.clone(),
            classes: view.css_classes(),
            interactive: view.interactive,
            disabled: view.disabled,
        }
    }
}

impl AvailabilityState {
    /// Cells to render. Only a completed pass can show a slot as available;
    /// loading and failed grids show placeholders that never accept clicks.
    pub fn cells(&self) -> Vec<SlotCell> {
        match self {
            AvailabilityState::Idle => Vec::new(),
            AvailabilityState::Loading { slots, .. } => slots
                .iter()
                .map(|slot| SlotCell::placeholder(slot, "space-loading", "Loading..."))
                .collect(),
            AvailabilityState::Failed { slots, .. } => slots
                .iter()
                .map(|slot| SlotCell::placeholder(slot, "space-error", "Unavailable"))
                .collect(),
            AvailabilityState::Ready(snapshot) => snapshot.slots.iter().map(SlotCell::from).collect(),
        }
    }

    /// Banner text when reservations could not be fetched
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AvailabilityState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Tracks the single highlighted slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotSelection(Option<u32>);

impl SlotSelection {
    pub fn select(&mut self, slot_id: u32) {
        self.0 = Some(slot_id);
    }

    pub fn is_selected(&self, slot_id: u32) -> bool {
        self.0 == Some(slot_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_slots;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn reservation(slot_id: u32, status: ReservationStatus, day: u32, anonymous: bool) -> Reservation {
        Reservation {
            id: Some(format!("r{}", slot_id)),
            space: Some("Third Floor".to_string()),
            slot_id,
            status,
            anonymous,
            user_id: "12345678".to_string(),
            date: date(day).format("%Y-%m-%d").to_string(),
            time: None,
        }
    }

    #[test]
    fn test_resolve_space() {
        assert_eq!(resolve_space(Some("Lab"), Some("Third Floor")).as_deref(), Some("Lab"));
        assert_eq!(resolve_space(None, Some("Third Floor")).as_deref(), Some("Third Floor"));
        assert_eq!(resolve_space(Some(""), Some("Third Floor")).as_deref(), Some("Third Floor"));
        assert_eq!(resolve_space(None, Some("  ")), None);
        assert_eq!(resolve_space(None, None), None);
    }

    #[test]
    fn test_filter_active_status_rules() {
        let reservations = vec![
            reservation(1, ReservationStatus::Active, 14, false),
            reservation(2, ReservationStatus::Active, 13, false),
            reservation(3, ReservationStatus::Overtime, 1, false),
            reservation(4, ReservationStatus::Completed, 14, false),
        ];
        let active: Vec<u32> = filter_active(&reservations, date(14)).iter().map(|r| r.slot_id).collect();
        assert_eq!(active, vec![1, 3]);
    }

    #[test]
    fn test_overtime_occupies_regardless_of_date() {
        let reservations = vec![reservation(5, ReservationStatus::Overtime, 2, false)];
        for day in [1, 2, 20] {
            let views = reconcile(generate_slots(5, 5), &reservations, date(day), Role::Student);
            assert_eq!(views[4].state, SlotState::Overtime);
            assert!(!views[4].slot.available);
        }
    }

    #[test]
    fn test_active_occupies_only_on_its_date() {
        let reservations = vec![reservation(2, ReservationStatus::Active, 14, false)];
        let today = reconcile(generate_slots(5, 5), &reservations, date(14), Role::Student);
        assert_eq!(today[1].state, SlotState::Reserved);
        assert_eq!(today[1].slot.reservation_date, Some(date(14)));

        let tomorrow = reconcile(generate_slots(5, 5), &reservations, date(15), Role::Student);
        assert_eq!(tomorrow[1].state, SlotState::Available);
        assert_eq!(tomorrow[1].slot.reservation_date, None);
    }

    #[test]
    fn test_technician_sees_identity() {
        let reservations = vec![
            reservation(1, ReservationStatus::Active, 14, false),
            reservation(2, ReservationStatus::Overtime, 10, true),
        ];
        let views = reconcile(generate_slots(1, 3), &reservations, date(14), Role::Technician);
        assert_eq!(views[0].caption, "Reserved ID: 12345678");
        assert_eq!(views[1].caption, "Overtime (Anonymous)");
        assert_eq!(views[2].caption, "Available");
    }

    #[test]
    fn test_non_technicians_see_bare_status() {
        let reservations = vec![
            reservation(1, ReservationStatus::Active, 14, false),
            reservation(2, ReservationStatus::Overtime, 10, true),
        ];
        for role in [Role::Student, Role::Other] {
            let views = reconcile(generate_slots(1, 2), &reservations, date(14), role);
            assert_eq!(views[0].caption, "Reserved");
            assert_eq!(views[1].caption, "Overtime");
        }
    }

    #[test]
    fn test_occupied_slots_are_never_interactive() {
        let reservations = vec![reservation(1, ReservationStatus::Active, 14, false)];
        let views = reconcile(generate_slots(1, 2), &reservations, date(14), Role::Technician);
        assert!(!views[0].interactive);
        assert!(!views[0].disabled);
        assert!(views[1].interactive);
        assert_eq!(views[0].css_classes(), vec!["slot", "space-reserved"]);
        assert_eq!(views[1].css_classes(), vec!["slot", "space-available"]);
    }

    #[test]
    fn test_student_never_gets_interactive_slots() {
        let views = reconcile(generate_slots(5, 5), &[], date(14), Role::Student);
        assert!(views.iter().all(|v| !v.interactive && v.disabled));
        assert_eq!(views[0].css_classes(), vec!["slot", "space-available", "disabled-slot"]);
    }

    #[test]
    fn test_reconcile_is_pure() {
        let reservations = vec![
            reservation(3, ReservationStatus::Active, 14, false),
            reservation(9, ReservationStatus::Overtime, 1, true),
        ];
        let first = reconcile(generate_slots(5, 5), &reservations, date(14), Role::Technician);
        let second = reconcile(generate_slots(5, 5), &reservations, date(14), Role::Technician);
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_matching_reservation_wins() {
        let mut anonymous = reservation(1, ReservationStatus::Overtime, 14, true);
        anonymous.id = Some("first".to_string());
        let named = reservation(1, ReservationStatus::Active, 14, false);
        let views = reconcile(generate_slots(1, 1), &[anonymous, named], date(14), Role::Technician);
        assert_eq!(views[0].caption, "Overtime (Anonymous)");
    }

    #[test]
    fn test_reservations_outside_grid_are_ignored() {
        let reservations = vec![reservation(99, ReservationStatus::Overtime, 14, false)];
        let views = reconcile(generate_slots(5, 5), &reservations, date(14), Role::Technician);
        assert!(views.iter().all(|v| v.state == SlotState::Available));
    }

    #[test]
    fn test_request_tracker_discards_superseded_tags() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue("Third Floor", date(14));
        assert!(tracker.is_current(&first));

        let second = tracker.issue("Second Floor", date(14));
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert!(second.generation > first.generation);

        // Same space and date, later pass: the earlier response is still stale
        let third = tracker.issue("Second Floor", date(14));
        assert!(!tracker.is_current(&second));
        assert!(tracker.is_current(&third));
    }

    #[test]
    fn test_selection_keeps_single_highlight() {
        let views = reconcile(generate_slots(2, 2), &[], date(14), Role::Technician);
        let mut selection = SlotSelection::default();

        selection.select(views[0].slot.id);
        selection.select(views[3].slot.id);

        let highlighted: Vec<u32> = views
            .iter()
            .filter(|v| selection.is_selected(v.slot.id))
            .map(|v| v.slot.id)
            .collect();
        assert_eq!(highlighted, vec![4]);
        assert_eq!(SlotSelection::default(), SlotSelection(None));
    }

    #[test]
    fn test_snapshot_accessors() {
        let mut tracker = RequestTracker::default();
        let tag = tracker.issue("Third Floor", date(14));
        let reservations = vec![reservation(1, ReservationStatus::Active, 14, false)];
        let snapshot = GridSnapshot {
            tag: tag.clone(),
            selected_time: "09:05".to_string(),
            slots: reconcile(generate_slots(5, 5), &reservations, date(14), Role::Student),
        };
        assert_eq!(snapshot.space(), "Third Floor");
        assert_eq!(snapshot.selected_date(), date(14));
        assert_eq!(snapshot.occupied_count(), 1);
        assert_eq!(snapshot.tag, tag);
    }

    #[test]
    fn test_reservation_query_has_no_date_or_time() {
        let mut tracker = RequestTracker::default();
        let tag = tracker.issue("Third Floor", date(14));
        let query = tag.reservation_query();
        assert_eq!(query.to_query_string(), "space=Third%20Floor");
    }

    #[test]
    fn test_earlier_overtime_from_space_query_stays_occupied() {
        // The space-only query returns every record for the space, old overtime included
        let reservations = vec![reservation(6, ReservationStatus::Overtime, 1, false)];
        let views = reconcile(generate_slots(5, 5), &reservations, date(14), Role::Student);
        assert_eq!(views[5].state, SlotState::Overtime);
    }

    #[test]
    fn test_failed_fetch_never_renders_available() {
        let mut tracker = RequestTracker::default();
        let tag = tracker.issue("Third Floor", date(14));
        let state = AvailabilityState::Failed {
            tag,
            slots: generate_slots(5, 5),
            message: "Network error: offline".to_string(),
        };

        let cells = state.cells();
        assert_eq!(cells.len(), 25);
        assert!(cells.iter().all(|cell| cell.caption != "Available"));
        assert!(cells.iter().all(|cell| !cell.classes.contains(&"space-available")));
        assert!(cells.iter().all(|cell| !cell.interactive));
        assert_eq!(cells[0].classes, vec!["slot", "space-error"]);
        assert_eq!(state.error_message(), Some("Network error: offline"));
    }

    #[test]
    fn test_loading_cells_are_not_clickable() {
        let mut tracker = RequestTracker::default();
        let tag = tracker.issue("Third Floor", date(14));
        let state = AvailabilityState::Loading { tag, slots: generate_slots(1, 2) };
        let cells = state.cells();
        assert!(cells.iter().all(|cell| cell.caption == "Loading..." && !cell.interactive));
        assert_eq!(state.error_message(), None);
        assert!(AvailabilityState::Idle.cells().is_empty());
    }

    #[test]
    fn test_ready_cells_follow_slot_views() {
        let mut tracker = RequestTracker::default();
        let tag = tracker.issue("Third Floor", date(14));
        let reservations = vec![reservation(1, ReservationStatus::Active, 14, false)];
        let state = AvailabilityState::Ready(GridSnapshot {
            tag,
            selected_time: "09:05".to_string(),
            slots: reconcile(generate_slots(1, 2), &reservations, date(14), Role::Technician),
        });
        let cells = state.cells();
        assert_eq!(cells[0].caption, "Reserved ID: 12345678");
        assert!(!cells[0].interactive);
        assert_eq!(cells[1].caption, "Available");
        assert!(cells[1].interactive);
        assert_eq!(cells[1].label, "Slot 2");
    }
}
