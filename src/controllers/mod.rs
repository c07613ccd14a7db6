pub mod admin_controller;
pub mod inquiry_controller;
pub mod vehicle_controller;
pub mod working_hours_controller;
