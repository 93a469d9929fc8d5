//! Effect capabilities, the keyed registry, profiles and the built-in effect set.

pub(crate) mod builtin;
pub(crate) mod component;
pub(crate) mod profile;
pub(crate) mod registry;
