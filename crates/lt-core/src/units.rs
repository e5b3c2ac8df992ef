// lt-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, HeatFluxDensity as UomHeatFluxDensity, Length as UomLength,
    MassDensity as UomMassDensity, Ratio as UomRatio,
    SpecificHeatCapacity as UomSpecificHeatCapacity,
    ThermalConductivity as UomThermalConductivity,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Conductivity = UomThermalConductivity;
pub type Density = UomMassDensity;
pub type HeatFlux = UomHeatFluxDensity;
pub type Length = UomLength;
pub type Ratio = UomRatio;
pub type SpecificHeat = UomSpecificHeatCapacity;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[inline]
pub fn w_per_m_k(v: f64) -> Conductivity {
    use uom::si::thermal_conductivity::watt_per_meter_kelvin;
    Conductivity::new::<watt_per_meter_kelvin>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn j_per_kg_k(v: f64) -> SpecificHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecificHeat::new::<joule_per_kilogram_kelvin>(v)
}

#[inline]
pub fn w_per_m2(v: f64) -> HeatFlux {
    use uom::si::heat_flux_density::watt_per_square_meter;
    HeatFlux::new::<watt_per_square_meter>(v)
}

pub mod constants {
    use super::*;

    /// Stefan-Boltzmann constant as carried by the reference regolith model.
    pub const STEFAN_BOLTZMANN_W_M2_K4: f64 = 5.67e-8;

    /// Solar irradiance at 1 AU used by the regolith model.
    pub const SOLAR_CONSTANT_W_M2: f64 = 1365.0;

    /// Synodic month, 29 d 12 h 44 min: one solar day at a lunar surface point.
    pub const SYNODIC_MONTH_S: f64 = ((29.0 * 24.0 + 12.0) * 60.0 + 44.0) * 60.0;

    /// Degrees-per-radian divisor of the reference model (not 180/pi).
    pub const REFERENCE_DEG_PER_RAD: f64 = 57.29;

    #[inline]
    pub fn solar_constant() -> HeatFlux {
        w_per_m2(SOLAR_CONSTANT_W_M2)
    }

    #[inline]
    pub fn synodic_month() -> Time {
        s(SYNODIC_MONTH_S)
    }
}
