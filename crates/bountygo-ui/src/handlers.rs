pub mod alerts;
pub mod autofill;
pub mod confirm;
pub mod preview;
pub mod validation;
