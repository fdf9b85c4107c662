use crate::imports::*;

/// Aerodynamic drag at sea-level air density
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Basic {
    cd_area: si::Area,
}

impl Init for Basic {}
impl SerdeAPI for Basic {}

impl Basic {
    pub fn new(cd_area: si::Area) -> Self {
        Self { cd_area }
    }

    pub fn cd_area(&self) -> si::Area {
        self.cd_area
    }

    /// [The drag equation](https://en.wikipedia.org/wiki/Drag_(physics)#The_drag_equation)
    /// in still air, with the factor of 0.5 kept explicit.
    pub fn calc_res(&self, speed: si::Velocity) -> si::Force {
        0.5 * uc::RHO_AIR * self.cd_area * speed * speed
    }
}
