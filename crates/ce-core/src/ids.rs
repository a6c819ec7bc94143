//! Typed identifiers for agents and cars.
//!
//! Both are `Copy + Ord + Hash`: agent ids index the population arena,
//! car ids key a garage's customer records.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of an agent in the population.  Construction order equals
    /// scheduling order.
    pub struct AgentId(u32);
}

typed_id! {
    /// Serial number of a car.  Issued once at assembly and never reused, so
    /// it identifies the car across ownership transfers.
    pub struct CarId(u64);
}
