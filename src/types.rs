use crate::params::Parameters;

pub type HandlerId = u32;

pub type Quality = f64;

pub type RouteMatch = (HandlerId, Parameters);
