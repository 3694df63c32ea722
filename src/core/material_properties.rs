use std::sync::LazyLock;

const LITRES_PER_CUBIC_METRE: u32 = 1_000;

#[derive(Clone, Copy, Debug)]
pub struct MaterialProperties {
    volumetric_heat_capacity: f64, // J/(litre.K)
}

impl MaterialProperties {
    /// ## Arguments
    /// * `density` - in kg / litre
    /// * `specific_heat_capacity` - in J / (kg.K)
    pub fn new(density: f64, specific_heat_capacity: f64) -> Self {
        Self {
            volumetric_heat_capacity: specific_heat_capacity * density,
        }
    }

    /// Return the heat capacity per unit volume, in J / (m3.K)
    pub fn volumetric_heat_capacity_per_m3(&self) -> f64 {
        self.volumetric_heat_capacity * LITRES_PER_CUBIC_METRE as f64
    }
}

// Heat capacity of air per volume is fixed at 1200 J/(m3.K) by ISO 13790, section 9.3.1
pub static AIR: LazyLock<MaterialProperties> =
    LazyLock::new(|| MaterialProperties::new(0.0012, 1000.0));
