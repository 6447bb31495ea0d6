pub mod header;
pub mod reservation_form;
pub mod slot_grid;
pub mod space_selector;
