#![warn(clippy::pedantic)]

pub mod cascade;
pub mod machine_set;
pub mod plant;
pub mod polynomial;
pub mod regulation;

pub use cascade::Cascade;
pub use machine_set::{MachineSet, MachineSets};
pub use plant::HydroPlantRecord;
pub use polynomial::{Polynomial, TailracePolynomials};
pub use regulation::RegulationType;
