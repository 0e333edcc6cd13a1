pub mod binder;
pub mod capture;
pub mod control;
pub mod controller;
pub mod provider;

#[cfg(test)]
pub(crate) mod testing;
