use crate::Slot;

/// Layout of the bookable grid and the spaces it is offered for
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
    pub spaces: Vec<String>,
    /// Space loaded when the selector has no value
    pub default_space: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            spaces: vec![
                "First Floor".to_string(),
                "Second Floor".to_string(),
                "Third Floor".to_string(),
            ],
            default_space: "Third Floor".to_string(),
        }
    }
}

impl GridConfig {
    /// Fresh slot grid for one render pass
    pub fn generate(&self) -> Vec<Slot> {
        generate_slots(self.rows, self.cols)
    }
}

/// Number of slots in a `rows` x `cols` grid, or 0 when it cannot be addressed
pub fn slot_capacity(rows: u32, cols: u32) -> usize {
    (rows as usize).checked_mul(cols as usize).unwrap_or(0)
}

/// Build `rows * cols` available slots with IDs assigned row-major from 1
pub fn generate_slots(rows: u32, cols: u32) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(slot_capacity(rows, cols));
    let mut id = 1;
    for _row in 0..rows {
        for _col in 0..cols {
            slots.push(Slot {
                id,
                available: true,
                reservation_date: None,
                label: format!("Slot {}", id),
            });
            id += 1;
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_slots_row_major_ids() {
        for (rows, cols) in [(1, 1), (2, 3), (5, 5), (4, 1)] {
            let slots = generate_slots(rows, cols);
            assert_eq!(slots.len(), (rows * cols) as usize);
            for (index, slot) in slots.iter().enumerate() {
                assert_eq!(slot.id, index as u32 + 1);
            }
        }
    }

    #[test]
    fn test_generated_slots_start_available() {
        let slots = generate_slots(2, 2);
        assert!(slots.iter().all(|s| s.available && s.reservation_date.is_none()));
        assert_eq!(slots[0].label, "Slot 1");
        assert_eq!(slots[3].label, "Slot 4");
    }

    #[test]
    fn test_empty_dimensions_produce_no_slots() {
        assert!(generate_slots(0, 5).is_empty());
        assert!(generate_slots(5, 0).is_empty());
    }

    #[test]
    fn test_slot_capacity_does_not_wrap() {
        assert_eq!(slot_capacity(5, 5), 25);
        assert_eq!(slot_capacity(0, u32::MAX), 0);
        // 65536 * 65536 wraps to 0 in u32
        assert_eq!(slot_capacity(65_536, 65_536), usize::try_from(1u64 << 32).unwrap_or(0));
        let max = u32::MAX as u64;
        assert_eq!(
            slot_capacity(u32::MAX, u32::MAX),
            usize::try_from(max * max).unwrap_or(0)
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_slots(3, 4), generate_slots(3, 4));
    }

    #[test]
    fn test_default_config() {
        let config = GridConfig::default();
        assert_eq!(slot_capacity(config.rows, config.cols), 25);
        assert_eq!(config.default_space, "Third Floor");
        assert!(config.spaces.contains(&config.default_space));
        assert_eq!(config.generate().len(), 25);
    }
}
