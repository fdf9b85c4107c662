use crate::imports::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Basic {
    ratio: si::Ratio,
}

impl Init for Basic {}
impl SerdeAPI for Basic {}

impl Basic {
    pub fn new(ratio: si::Ratio) -> Self {
        Self { ratio }
    }

    pub fn ratio(&self) -> si::Ratio {
        self.ratio
    }

    /// Rolling resistance on a road inclined by `grade`.  Independent of
    /// speed.
    pub fn calc_res(&self, weight: si::Force, grade: si::Angle) -> si::Force {
        self.ratio * weight * grade.cos()
    }
}
