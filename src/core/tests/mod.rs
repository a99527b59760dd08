mod forward;
mod lifecycle;

pub(crate) mod support;
