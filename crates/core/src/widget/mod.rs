//! Interactive controls of the details screens, drawn onto a [`crate::chart::Canvas`].

pub mod step_scale;
pub mod switch;
