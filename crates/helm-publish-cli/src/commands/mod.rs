mod charts;
mod doctor;
mod publish;

pub use charts::charts;
pub use doctor::doctor;
pub use publish::publish;
