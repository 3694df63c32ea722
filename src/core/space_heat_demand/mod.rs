pub mod building_config;
pub mod internal_gains;
pub mod thermal_bridge;
pub mod ventilation;
pub mod zone;
