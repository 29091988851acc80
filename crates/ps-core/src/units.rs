// ps-core/src/units.rs

use uom::si::f64::{
    Acceleration as UomAcceleration, Angle as UomAngle, Length as UomLength, Mass as UomMass,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Angle = UomAngle;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Time = UomTime;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn ms(v: f64) -> Time {
    use uom::si::time::millisecond;
    Time::new::<millisecond>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

/// Plain SI values for the hot loop.
pub mod si {
    use super::*;

    #[inline]
    pub fn meters(v: Length) -> f64 {
        v.get::<uom::si::length::meter>()
    }

    #[inline]
    pub fn kilograms(v: Mass) -> f64 {
        v.get::<uom::si::mass::kilogram>()
    }

    #[inline]
    pub fn mps2(v: Accel) -> f64 {
        v.get::<uom::si::acceleration::meter_per_second_squared>()
    }

    #[inline]
    pub fn seconds(v: Time) -> f64 {
        v.get::<uom::si::time::second>()
    }

    #[inline]
    pub fn radians(v: Angle) -> f64 {
        v.get::<uom::si::angle::radian>()
    }
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    #[inline]
    pub fn g0() -> Accel {
        mps2(G0_MPS2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = m(0.8);
        let _m = kg(1.0);
        let _g = constants::g0();
        let _t = s(3.0);
    }

    #[test]
    fn conversions_back_to_si() {
        assert!((si::seconds(ms(10.0)) - 0.01).abs() < 1e-15);
        assert!((si::radians(deg(180.0)) - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(si::meters(m(0.8)), 0.8);
        assert_eq!(si::kilograms(kg(5.0)), 5.0);
        assert_eq!(si::mps2(mps2(9.81)), 9.81);
    }
}
